//! Renderer contract and the SVG renderer built on plotters.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::provider::Acquisition;

pub const SOURCE_NOTE: &str =
    "Data sourced from Our World in Data (https://ourworldindata.org/co2-and-greenhouse-gas-emissions)";
const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No color configured for country {0:?}")]
    UnmappedCountry(String),
    #[error("Series {label:?} has {values} values for {years} year labels")]
    Misaligned {
        label: String,
        values: usize,
        years: usize,
    },
    #[error("Failed to render chart: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn with_opacity(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS notation, as browser chart libraries expect it.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for RGBAColor {
    fn from(c: Rgba) -> Self {
        RGBAColor(c.r, c.g, c.b, c.a)
    }
}

/// Line color for each country that can appear on the chart.
pub fn country_color(country: &str) -> Result<Rgba, ChartError> {
    let (r, g, b) = match country {
        "United States" => (75, 192, 192),
        "China" => (255, 99, 132),
        "India" => (54, 162, 235),
        "Germany" => (255, 206, 86),
        other => return Err(ChartError::UnmappedCountry(other.to_string())),
    };
    Ok(Rgba { r, g, b, a: 1.0 })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub border_color: Rgba,
    pub background_color: Rgba,
}

/// Everything a line renderer needs: labels, aligned series and captions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub caption: String,
    pub x_title: String,
    pub y_title: String,
    pub years: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Build a line chart for `acq` with one x label per year.
    ///
    /// Series shorter than `years` (the fallback table) cover the leading labels only.
    pub fn line(acq: &Acquisition, years: &[i32]) -> Result<Self, ChartError> {
        let series = acq
            .table
            .iter()
            .map(|s| {
                if s.values.len() > years.len() {
                    return Err(ChartError::Misaligned {
                        label: s.country.clone(),
                        values: s.values.len(),
                        years: years.len(),
                    });
                }
                let color = country_color(&s.country)?;
                Ok(ChartSeries {
                    label: s.country.clone(),
                    values: s.values.clone(),
                    border_color: color,
                    background_color: color.with_opacity(0.2),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let title = match (years.first(), years.last()) {
            (Some(first), Some(last)) => format!("CO2 Emissions Trends ({first}-{last})"),
            _ => "CO2 Emissions Trends".to_string(),
        };

        Ok(Self {
            title,
            caption: format!("{SOURCE_NOTE}. Last updated: {}.", acq.stamp),
            x_title: "Year".to_string(),
            y_title: "CO2 Emissions (Million Tonnes)".to_string(),
            years: years.iter().map(i32::to_string).collect(),
            series,
        })
    }

    fn y_max(&self) -> f64 {
        let max = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_svg(&self, path: &Path, size: (u32, u32)) -> Result<(), ChartError> {
        let root = SVGBackend::new(path, size).into_drawing_area();
        self.draw(&root)?;
        root.present()?;
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        root.fill(&WHITE)?;
        let (_, height) = root.dim_in_pixel();
        let (plot_area, caption_area) = root.split_vertically((height as i32 - 30).max(1));

        let last = self.years.len().saturating_sub(1).max(1);
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&self.title, (FONT, 22))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0..last, 0f64..self.y_max())?;

        let label_for = |i: &usize| self.years.get(*i).cloned().unwrap_or_default();
        chart
            .configure_mesh()
            .x_labels(self.years.len().max(2))
            .x_label_formatter(&label_for)
            .x_desc(self.x_title.as_str())
            .y_desc(self.y_title.as_str())
            .draw()?;

        for s in &self.series {
            let color: RGBAColor = s.border_color.into();
            let points = s.values.iter().copied().enumerate();
            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            chart.draw_series(points.map(|p| Circle::new(p, 4, color.filled())))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        let style = TextStyle::from((FONT, 12).into_font()).color(&BLACK);
        caption_area.draw_text(&self.caption, &style, (20, 8))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::FreshnessStamp;
    use crate::provider::DataOrigin;
    use crate::selection::YEARS;
    use crate::table::{self, EmissionsTable};
    use chrono::NaiveDate;

    fn acquisition(table: EmissionsTable, stamp: FreshnessStamp) -> Acquisition {
        Acquisition {
            table,
            stamp,
            origin: DataOrigin::Live,
        }
    }

    #[test]
    fn colors_are_a_closed_set() {
        assert_eq!(country_color("China").unwrap().css(), "rgba(255, 99, 132, 1)");
        assert_eq!(
            country_color("India").unwrap().with_opacity(0.2).css(),
            "rgba(54, 162, 235, 0.2)"
        );
        assert!(matches!(
            country_color("France"),
            Err(ChartError::UnmappedCountry(c)) if c == "France"
        ));
    }

    #[test]
    fn line_chart_carries_labels_and_caption() {
        let stamp = FreshnessStamp::Updated(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let table: EmissionsTable = [("Germany", vec![1.0; 10])].into_iter().collect();
        let spec = ChartSpec::line(&acquisition(table, stamp), &YEARS).unwrap();

        assert_eq!(spec.title, "CO2 Emissions Trends (1990-2023)");
        assert!(spec.caption.ends_with("Last updated: January 5, 2024."));
        assert_eq!(spec.years.len(), 10);
        assert_eq!(spec.years[0], "1990");
        assert_eq!(spec.series[0].label, "Germany");
        assert_eq!(spec.series[0].background_color.a, 0.2);
    }

    #[test]
    fn fallback_series_are_shorter_than_labels() {
        let spec = ChartSpec::line(
            &acquisition(table::fallback(), FreshnessStamp::Unknown),
            &YEARS,
        )
        .unwrap();
        assert!(spec.caption.ends_with("Last updated: Unknown."));
        assert_eq!(spec.series.len(), 4);
        assert!(spec.series.iter().all(|s| s.values.len() == 7));
    }

    #[test]
    fn fallback_chart_renders_to_svg() {
        let spec = ChartSpec::line(
            &acquisition(table::fallback(), FreshnessStamp::Unknown),
            &YEARS,
        )
        .unwrap();
        let path = std::env::temp_dir().join("co2chart-render-test.svg");
        spec.render_svg(&path, (1200, 700)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(!svg.is_empty());
        assert!(svg.contains("CO2 Emissions Trends (1990-2023)"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unmapped_country_fails_the_chart() {
        let table: EmissionsTable = [("France", vec![0.0])].into_iter().collect();
        let err = ChartSpec::line(&acquisition(table, FreshnessStamp::Unknown), &[2020]).unwrap_err();
        assert!(matches!(err, ChartError::UnmappedCountry(_)));
    }

    #[test]
    fn too_many_values_is_misaligned() {
        let table: EmissionsTable = [("China", vec![1.0, 2.0])].into_iter().collect();
        let err = ChartSpec::line(&acquisition(table, FreshnessStamp::Unknown), &[2020]).unwrap_err();
        assert!(matches!(err, ChartError::Misaligned { values: 2, years: 1, .. }));
    }

    #[test]
    fn json_uses_field_names() {
        let table: EmissionsTable = [("India", vec![2.5])].into_iter().collect();
        let spec = ChartSpec::line(&acquisition(table, FreshnessStamp::Unknown), &[2020]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["years"][0], "2020");
        assert_eq!(json["series"][0]["values"][0], 2.5);
        assert_eq!(json["series"][0]["border_color"]["r"], 54);
    }
}
