//! One capture-and-persist cycle over an already-navigated page.

use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::extract::{self, TILE_SELECTOR};
use crate::page::ListingPage;
use crate::store;

/// Terminal state of a successful run. Errors are the failed terminal
/// state and surface as [`Error`].
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Persisted { rows: usize },
    SkippedEmpty,
}

/// Final counts reported to the caller.
#[derive(Debug)]
pub struct RunReport {
    pub found: usize,
    pub scraped: usize,
    pub outcome: RunOutcome,
}

/// Enumerate tiles, collect a batch, and persist it if non-empty.
///
/// An empty batch (zero tiles, or every tile failing) is a legitimate
/// terminal outcome, not an error; nothing is written in that case.
pub async fn run_capture(page: &dyn ListingPage, config: &Config) -> Result<RunReport, Error> {
    info!("Waiting for the cruise tiles");
    page.wait_for_selector(TILE_SELECTOR, config.selector_timeout)
        .await?;

    let tiles = page.query_all(TILE_SELECTOR).await?;
    info!("Found {} cruise tiles", tiles.len());

    let batch = extract::collect(tiles).await;
    info!(
        "Scraped {} cruises ({} tiles skipped)",
        batch.scraped(),
        batch.skipped
    );

    if batch.is_empty() {
        return Ok(RunReport {
            found: batch.found,
            scraped: 0,
            outcome: RunOutcome::SkippedEmpty,
        });
    }

    let rows = batch.scraped();
    store::persist(&batch, &config.output_path)?;
    info!("Data saved to {}", config.output_path.display());

    Ok(RunReport {
        found: batch.found,
        scraped: rows,
        outcome: RunOutcome::Persisted { rows },
    })
}
