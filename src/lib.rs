use anyhow::Result;

pub mod chart;
pub mod config;
pub mod fetcher;
pub mod freshness;
pub mod load;
pub mod provider;
pub mod selection;
pub mod table;

pub use chart::{country_color, ChartError, ChartSeries, ChartSpec, Rgba};
pub use config::{ChartConfig, OutputFormat};
pub use fetcher::{Fetch, Retriever, Source};
pub use freshness::{Commits, FreshnessError, FreshnessStamp};
pub use load::{DataSet, DatasetError};
pub use provider::{Acquisition, DataOrigin, DataProvider, Endpoints};
pub use selection::Selection;
pub use table::{fallback, CountrySeries, EmissionsTable};

/// Fetch the OWID dataset with the default endpoints, selection and timeout.
pub async fn acquire() -> Result<Acquisition> {
    let retriever = Retriever::new(provider::DEFAULT_TIMEOUT)?;
    Ok(DataProvider::new(retriever).acquire().await)
}
