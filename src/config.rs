use std::time::Duration;

use anyhow::Error;
use clap::ValueEnum;
use confique::Config;

use crate::provider::Endpoints;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Json,
}

#[derive(Debug, Config)]
pub struct ChartConfig {
    #[config(
        env = "CO2_CHART_DATASET_URL",
        default = "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv"
    )]
    pub dataset_url: String,

    #[config(
        env = "CO2_CHART_COMMITS_URL",
        default = "https://api.github.com/repos/owid/co2-data/commits?path=owid-co2-data.csv&per_page=1"
    )]
    pub commits_url: String,

    #[config(env = "CO2_CHART_FETCH_TIMEOUT_SECONDS", default = 30)]
    pub fetch_timeout_seconds: u64,

    #[config(env = "CO2_CHART_OUTPUT", default = "co2-chart.svg")]
    pub output: String,

    /// `svg` or `json`
    #[config(env = "CO2_CHART_FORMAT", default = "svg")]
    pub format: String,

    #[config(env = "CO2_CHART_WIDTH", default = 1200)]
    pub width: u32,

    #[config(env = "CO2_CHART_HEIGHT", default = 700)]
    pub height: u32,
}

impl ChartConfig {
    pub fn load() -> Result<ChartConfig, Error> {
        let c = ChartConfig::builder()
            .env()
            .file("co2-chart.toml")
            .load()?;

        Ok(c)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            dataset: self.dataset_url.clone(),
            commits: self.commits_url.clone(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn parse_format(&self) -> Result<OutputFormat, Error> {
        OutputFormat::from_str(&self.format, true).map_err(Error::msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{COMMITS_URL, DATASET_URL};
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_point_at_owid() {
        let config = ChartConfig::load().unwrap();
        assert_eq!(config.endpoints(), Endpoints::default());
        assert_eq!(config.dataset_url, DATASET_URL);
        assert_eq!(config.commits_url, COMMITS_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.output, "co2-chart.svg");
        assert_eq!(config.parse_format().unwrap(), OutputFormat::Svg);
    }

    #[test]
    #[serial]
    fn format_comes_from_env() {
        temp_env::with_var("CO2_CHART_FORMAT", Some("JSON"), || {
            let config = ChartConfig::load().unwrap();
            assert_eq!(config.parse_format().unwrap(), OutputFormat::Json);
        });

        temp_env::with_var("CO2_CHART_FORMAT", Some("png"), || {
            let config = ChartConfig::load().unwrap();
            assert!(config.parse_format().is_err());
        });
    }

    #[test]
    #[serial]
    fn env_overrides_defaults() {
        temp_env::with_vars(
            [
                ("CO2_CHART_DATASET_URL", Some("file:///tmp/owid.csv")),
                ("CO2_CHART_FETCH_TIMEOUT_SECONDS", Some("5")),
            ],
            || {
                let config = ChartConfig::load().unwrap();
                assert_eq!(config.endpoints().dataset, "file:///tmp/owid.csv");
                assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
            },
        );
    }

    #[test]
    #[serial]
    fn bad_timeout_is_rejected() {
        temp_env::with_var("CO2_CHART_FETCH_TIMEOUT_SECONDS", Some("soon"), || {
            assert!(ChartConfig::load().is_err());
        });
    }
}
