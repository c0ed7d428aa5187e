use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use co2chart::{ChartConfig, ChartSpec, DataOrigin, DataProvider, OutputFormat, Retriever};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Draw national CO2 emissions from Our World in Data.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Where to write the chart, overrides CO2_CHART_OUTPUT
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, overrides CO2_CHART_FORMAT
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ChartConfig::load()?;
    let format = match cli.format {
        Some(format) => format,
        None => config.parse_format()?,
    };

    let provider = DataProvider::new(Retriever::new(config.fetch_timeout())?)
        .with_endpoints(config.endpoints())
        .with_timeout(config.fetch_timeout());
    let acquisition = provider.acquire().await;
    if acquisition.origin == DataOrigin::Fallback {
        warn!("rendering offline fallback data");
    }

    let spec = ChartSpec::line(&acquisition, &provider.selection().years)?;
    let output = cli.output.unwrap_or_else(|| PathBuf::from(&config.output));
    match format {
        OutputFormat::Svg => spec.render_svg(&output, (config.width, config.height))?,
        OutputFormat::Json => tokio::fs::write(&output, spec.to_json()?).await?,
    }

    info!("chart written to {}", output.display());
    Ok(())
}
