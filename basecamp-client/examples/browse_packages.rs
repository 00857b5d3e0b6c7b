// basecamp-client/examples/browse_packages.rs
// List the catalog with multi-currency prices

use basecamp_client::ClientConfig;
use shared::currency::{Currency, format_multi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("BASECAMP_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());

    let client = ClientConfig::new(&base_url).build()?;
    let packages = client.packages().await?;
    tracing::info!("Fetched {} package(s)", packages.len());

    for package in &packages {
        let prices = format_multi(package.price, &Currency::ALL);
        println!(
            "{} ({} days, {:?})",
            package.name, package.duration_days, package.difficulty
        );
        for (currency, price) in &prices {
            println!("    {currency}: {price}");
        }
    }

    Ok(())
}
