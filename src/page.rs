//! Narrow capability surface over the browser collaborator.
//!
//! The extraction pipeline only ever sees these two traits; any automation
//! driver that can enumerate listing tiles and read scoped text is
//! substitutable without touching the extractor.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Error;

/// Handle into one rendered listing unit. Lookups are scoped to the tile;
/// `Ok(None)` means the sub-element is genuinely absent, while `Err` means
/// the driver could not answer (detached element, protocol fault).
#[async_trait]
pub trait Tile: Send + Sync {
    async fn query_sub(&self, selector: &str) -> Result<Option<Box<dyn Tile>>, Error>;

    /// Visible text of the element, untrimmed.
    async fn text(&self) -> Result<Option<String>, Error>;
}

/// A navigated, stabilized page ready for tile enumeration.
#[async_trait]
pub trait ListingPage: Send + Sync {
    /// Block until at least one element matches `selector`, or fail with
    /// [`Error::SelectorTimeout`] once `timeout` elapses.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), Error>;

    /// All elements matching `selector`, in DOM order.
    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn Tile>>, Error>;
}
