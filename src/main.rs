use anyhow::Result;
use tracing::{error, info};

use cruise_scraper::browser::BrowserSession;
use cruise_scraper::config::Config;
use cruise_scraper::run::{run_capture, RunOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env();
    info!("Starting cruise listing capture");

    info!("Launching browser");
    let session = BrowserSession::launch(config.headless).await?;

    info!("Navigating to {}", config.listing_url);
    let page = match session
        .navigate(&config.listing_url, config.navigation_timeout)
        .await
    {
        Ok(page) => page,
        Err(e) => {
            error!("Navigation failed: {}", e);
            session.close().await.ok();
            return Err(e.into());
        }
    };

    let result = run_capture(&page, &config).await;
    session.close().await?;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!("Capture failed: {}", e);
            return Err(e.into());
        }
    };

    match report.outcome {
        RunOutcome::Persisted { rows } => info!(
            "Capture complete: {} tiles found, {} scraped, {} rows saved to {}",
            report.found,
            report.scraped,
            rows,
            config.output_path.display()
        ),
        RunOutcome::SkippedEmpty => info!(
            "No cruise data found ({} tiles, all skipped); nothing persisted",
            report.found
        ),
    }

    Ok(())
}
