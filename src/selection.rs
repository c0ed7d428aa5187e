use std::collections::{HashMap, HashSet};

use crate::load::{DataSet, DatasetError};
use crate::table::EmissionsTable;

pub const COUNTRIES: [&str; 4] = ["United States", "China", "India", "Germany"];
pub const YEARS: [i32; 10] = [1990, 1995, 2000, 2005, 2010, 2015, 2020, 2021, 2022, 2023];

/// Which countries and years end up in the table, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub countries: Vec<String>,
    pub years: Vec<i32>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(COUNTRIES, YEARS)
    }
}

impl Selection {
    pub fn new<C, Y>(countries: C, years: Y) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        Y: IntoIterator<Item = i32>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            years: years.into_iter().collect(),
        }
    }

    /// Pick one value per (country, year) out of the dataset.
    ///
    /// The first row in source order wins on duplicates. Absent rows, empty
    /// cells and anything that is not a finite number become 0.0.
    pub fn project(&self, ds: &DataSet) -> Result<EmissionsTable, DatasetError> {
        let country = ds.text_column("country")?;
        let year = ds.text_column("year")?;
        let co2 = ds.text_column("co2")?;

        let wanted: HashSet<&str> = self.countries.iter().map(String::as_str).collect();
        let mut first_seen: HashMap<(&str, &str), Option<&str>> = HashMap::new();
        for ((c, y), v) in country.into_iter().zip(year).zip(co2) {
            let (Some(c), Some(y)) = (c, y) else {
                continue;
            };
            if wanted.contains(c) {
                first_seen.entry((c, y)).or_insert(v);
            }
        }

        let table = self
            .countries
            .iter()
            .map(|c| {
                let values = self
                    .years
                    .iter()
                    .map(|y| {
                        let key = (c.as_str(), y.to_string());
                        first_seen
                            .get(&(key.0, key.1.as_str()))
                            .copied()
                            .flatten()
                            .map_or(0.0, parse_co2)
                    })
                    .collect();
                (c.clone(), values)
            })
            .collect();
        Ok(table)
    }
}

fn parse_co2(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
