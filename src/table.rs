use serde::Serialize;

/// Values for one country, aligned to the selected years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub values: Vec<f64>,
}

/// Per-country emissions, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmissionsTable {
    series: Vec<CountrySeries>,
}

impl EmissionsTable {
    pub fn get(&self, country: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.country == country)
            .map(|s| s.values.as_slice())
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.country.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountrySeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Largest value in the table, 0.0 when empty.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for EmissionsTable {
    fn from_iter<T: IntoIterator<Item = (S, Vec<f64>)>>(iter: T) -> Self {
        let series = iter
            .into_iter()
            .map(|(country, values)| CountrySeries {
                country: country.into(),
                values,
            })
            .collect();
        Self { series }
    }
}

/// Static backup used when the live dataset cannot be fetched or parsed.
///
/// Holds seven points per country against ten live years. Which years they
/// stand for is not recorded, so renderers only place them on the leading labels.
pub fn fallback() -> EmissionsTable {
    [
        (
            "United States",
            vec![4820.0, 5100.0, 5800.0, 5900.0, 5400.0, 5000.0, 4700.0],
        ),
        (
            "China",
            vec![2400.0, 3300.0, 3600.0, 6100.0, 8200.0, 9800.0, 10600.0],
        ),
        (
            "India",
            vec![600.0, 800.0, 1000.0, 1200.0, 1600.0, 2100.0, 2500.0],
        ),
        (
            "Germany",
            vec![1000.0, 950.0, 900.0, 850.0, 800.0, 750.0, 700.0],
        ),
    ]
    .into_iter()
    .collect()
}
