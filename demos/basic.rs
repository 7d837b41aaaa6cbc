//! Basic example demonstrating the HashiCorp Releases API client.
//!
//! Run with:
//! ```
//! RUST_LOG=hashicorp_releases=debug cargo run --example basic -- terraform
//! ```

use futures::{StreamExt, TryStreamExt};
use hashicorp_releases::{LicenseClass, ReleasesClient};

#[tokio::main]
async fn main() -> hashicorp_releases::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let product = std::env::args().nth(1).unwrap_or_else(|| "waypoint".to_string());

    // Create client from environment variables
    let client = ReleasesClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List products
    println!("\n--- Products ---");
    let products = client.products().await?;
    println!("Found {} products", products.len());
    for name in products.iter().take(10) {
        println!("  - {}", name);
    }

    // Latest OSS release and its builds
    println!("\n--- Latest OSS Release of {} ---", product);
    let latest = client
        .latest_release(&product, Some(LicenseClass::Oss))
        .await?;
    println!("Version: {}", latest.version);
    println!("  Created: {}", latest.timestamp_created);
    println!("  State: {:?}", latest.status.state);
    for build in latest.supported_builds() {
        println!("  - {}/{}: {}", build.os, build.arch, build.url);
    }

    // Walk the full OSS history page by page
    println!("\n--- OSS Release History ---");
    let mut pages = client.releases_paged(&product, Some(LicenseClass::Oss))?;
    let mut total = 0;
    while let Some(page) = pages.try_next().await? {
        total += page.len();
        let newest = page.items.first().map(|r| r.version.as_str()).unwrap_or("-");
        let oldest = page.last().map(|r| r.version.as_str()).unwrap_or("-");
        println!("  page of {:>2}: {} .. {}", page.len(), newest, oldest);
    }
    println!("Found {} releases", total);

    // Stop early: only the first page is fetched
    println!("\n--- Five Most Recent Releases (any license) ---");
    let recent: Vec<_> = client
        .releases(&product, None)?
        .take(5)
        .try_collect()
        .await?;
    for release in &recent {
        let withdrawn = if release.is_withdrawn() { " (withdrawn)" } else { "" };
        println!("  - {} [{}]{}", release.version, release.license_class, withdrawn);
    }

    println!("\nDone!");
    Ok(())
}
