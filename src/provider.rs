use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::{debug, info, warn};

use crate::fetcher::Source;
use crate::freshness::{Commits, FreshnessStamp};
use crate::load::DataSet;
use crate::selection::Selection;
use crate::table::{self, EmissionsTable};

pub const DATASET_URL: &str = "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv";
pub const COMMITS_URL: &str =
    "https://api.github.com/repos/owid/co2-data/commits?path=owid-co2-data.csv&per_page=1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub dataset: String,
    pub commits: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dataset: DATASET_URL.to_string(),
            commits: COMMITS_URL.to_string(),
        }
    }
}

/// Where the table in an [`Acquisition`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Fallback,
}

/// Finished result of one acquisition run. Never mutated after it is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquisition {
    pub table: EmissionsTable,
    pub stamp: FreshnessStamp,
    pub origin: DataOrigin,
}

pub struct DataProvider<S> {
    source: S,
    endpoints: Endpoints,
    selection: Selection,
    timeout: Duration,
}

impl<S: Source> DataProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            endpoints: Endpoints::default(),
            selection: Selection::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Fetch the freshness stamp and the dataset, absorbing every failure.
    ///
    /// The two lookups are independent: a failed stamp leaves "Unknown" and
    /// a failed dataset swaps in the static fallback table.
    pub async fn acquire(&self) -> Acquisition {
        let (stamp, live) = tokio::join!(self.freshness(), self.emissions());

        let (table, origin) = match live {
            Ok(table) => {
                info!("loaded live emissions for {} countries", table.len());
                (table, DataOrigin::Live)
            }
            Err(e) => {
                warn!("dataset unavailable, using fallback data: {e:#}");
                (table::fallback(), DataOrigin::Fallback)
            }
        };

        Acquisition { table, stamp, origin }
    }

    async fn freshness(&self) -> FreshnessStamp {
        let stamp = match self.fetch(&self.endpoints.commits).await {
            Ok(body) => FreshnessStamp::try_from(Commits(&body)).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        match stamp {
            Ok(stamp) => {
                debug!("dataset last updated: {stamp}");
                stamp
            }
            Err(e) => {
                warn!("could not determine dataset freshness: {e:#}");
                FreshnessStamp::Unknown
            }
        }
    }

    async fn emissions(&self) -> Result<EmissionsTable> {
        let text = self.fetch(&self.endpoints.dataset).await?;
        let ds = DataSet::from_csv(text)?;
        debug!("parsed {} dataset rows", ds.height());
        Ok(self.selection.project(&ds)?)
    }

    async fn fetch(&self, source: &str) -> Result<String> {
        info!("retrieving data from source: {}", source);
        tokio::time::timeout(self.timeout, self.source.retrieve(source))
            .await
            .map_err(|_| anyhow!("timed out after {:?} fetching {source}", self.timeout))?
    }
}
