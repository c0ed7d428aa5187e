use std::io::Cursor;
use std::ops::Deref;

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Dataset has no `{0}` column")]
    MissingColumn(String),
}

/// Raw dataset rows, every column kept as text.
#[derive(Debug)]
pub struct DataSet(DataFrame);

impl Deref for DataSet {
    type Target = DataFrame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DataSet {
    /// Parse CSV text with a header row. No schema inference, so `year`
    /// stays exactly as written in the source.
    pub fn from_csv(text: String) -> Result<Self, DatasetError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
            .finish()?;
        Ok(DataSet(df))
    }

    pub fn text_column(&self, name: &str) -> Result<&StringChunked, DatasetError> {
        let column = self
            .0
            .column(name)
            .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
        Ok(column.as_materialized_series().str()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_column_stays_text() {
        let ds = DataSet::from_csv("country,year,co2\nGermany,2020,644.5\n".to_string()).unwrap();
        assert_eq!(ds.height(), 1);

        let years: Vec<_> = ds.text_column("year").unwrap().into_iter().collect();
        assert_eq!(years, vec![Some("2020")]);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let ds = DataSet::from_csv("country,year\nGermany,2020\n".to_string()).unwrap();
        match ds.text_column("co2") {
            Err(DatasetError::MissingColumn(name)) => assert_eq!(name, "co2"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
