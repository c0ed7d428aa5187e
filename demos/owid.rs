use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let acquisition = co2chart::acquire().await?;

    println!("origin: {:?}, last updated: {}", acquisition.origin, acquisition.stamp);
    for series in acquisition.table.iter() {
        println!("{:>15}: {:?}", series.country, series.values);
    }

    Ok(())
}
