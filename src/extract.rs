//! Tile extraction and batch collection.

use tracing::warn;

use crate::error::Error;
use crate::models::{CaptureBatch, CruiseRecord, SENTINEL};
use crate::page::Tile;

/// One listing unit on the page.
pub const TILE_SELECTOR: &str = ".costa-itinerary-tile";

const TITLE_SELECTOR: &str = ".costa-itinerary-tile__title";
const SHIP_SELECTOR: &str = ".costa-itinerary-tile__ship";
const PRICE_SELECTOR: &str = ".currency-GBP";
const DATES_SELECTOR: &str = ".costa-itinerary-tile__dates";
const DURATION_SELECTOR: &str = ".costa-itinerary-tile__days";

/// Extract one record from one tile.
///
/// An absent sub-element degrades that field to the sentinel; a driver
/// error fails the whole tile so the collector can skip it.
pub async fn extract_record(tile: &dyn Tile) -> Result<CruiseRecord, Error> {
    Ok(CruiseRecord {
        title: field_text(tile, TITLE_SELECTOR).await?,
        ship: field_text(tile, SHIP_SELECTOR).await?,
        price: field_text(tile, PRICE_SELECTOR).await?,
        dates: field_text(tile, DATES_SELECTOR).await?,
        duration: field_text(tile, DURATION_SELECTOR).await?,
    })
}

async fn field_text(tile: &dyn Tile, selector: &str) -> Result<String, Error> {
    let sub = match tile.query_sub(selector).await? {
        Some(sub) => sub,
        None => return Ok(SENTINEL.to_string()),
    };
    Ok(match sub.text().await? {
        Some(text) => text.trim().to_string(),
        None => SENTINEL.to_string(),
    })
}

/// Run the extractor over every tile in page order.
///
/// A tile whose extraction errors is logged and skipped; the run
/// continues. Zero tiles, or all tiles failing, yields an empty batch.
pub async fn collect(tiles: Vec<Box<dyn Tile>>) -> CaptureBatch {
    let found = tiles.len();
    let mut records = Vec::with_capacity(found);
    let mut skipped = 0;

    for (idx, tile) in tiles.iter().enumerate() {
        match extract_record(tile.as_ref()).await {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                warn!("Skipping tile {}/{}: {}", idx + 1, found, e);
            }
        }
    }

    CaptureBatch {
        records,
        found,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Canned tile: selector -> text for present sub-elements.
    struct StubTile {
        subs: HashMap<&'static str, String>,
        detached: bool,
    }

    impl StubTile {
        fn with_fields(fields: &[(&'static str, &str)]) -> Self {
            Self {
                subs: fields
                    .iter()
                    .map(|(sel, text)| (*sel, text.to_string()))
                    .collect(),
                detached: false,
            }
        }

        fn detached() -> Self {
            Self {
                subs: HashMap::new(),
                detached: true,
            }
        }

        fn full(title: &str) -> Self {
            Self::with_fields(&[
                (TITLE_SELECTOR, title),
                (SHIP_SELECTOR, "Costa Fortuna"),
                (PRICE_SELECTOR, "£499"),
                (DATES_SELECTOR, "12 Jun - 19 Jun"),
                (DURATION_SELECTOR, "7"),
            ])
        }
    }

    #[async_trait]
    impl Tile for StubTile {
        async fn query_sub(&self, selector: &str) -> Result<Option<Box<dyn Tile>>, Error> {
            if self.detached {
                return Err(Error::Tile("node detached from document".to_string()));
            }
            Ok(self
                .subs
                .get(selector)
                .map(|text| Box::new(StubText(text.clone())) as Box<dyn Tile>))
        }

        async fn text(&self) -> Result<Option<String>, Error> {
            Ok(None)
        }
    }

    struct StubText(String);

    #[async_trait]
    impl Tile for StubText {
        async fn query_sub(&self, _selector: &str) -> Result<Option<Box<dyn Tile>>, Error> {
            Ok(None)
        }

        async fn text(&self) -> Result<Option<String>, Error> {
            Ok(Some(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn extracts_all_five_fields() {
        let tile = StubTile::full("Mediterranean Dream");
        let record = extract_record(&tile).await.unwrap();
        assert_eq!(record.title, "Mediterranean Dream");
        assert_eq!(record.ship, "Costa Fortuna");
        assert_eq!(record.price, "£499");
        assert_eq!(record.dates, "12 Jun - 19 Jun");
        assert_eq!(record.duration, "7");
    }

    #[tokio::test]
    async fn missing_sub_elements_become_sentinel() {
        let tile = StubTile::with_fields(&[(TITLE_SELECTOR, "Norwegian Fjords")]);
        let record = extract_record(&tile).await.unwrap();
        assert_eq!(record.title, "Norwegian Fjords");
        assert_eq!(record.ship, SENTINEL);
        assert_eq!(record.price, SENTINEL);
        assert_eq!(record.dates, SENTINEL);
        assert_eq!(record.duration, SENTINEL);
    }

    #[tokio::test]
    async fn field_text_is_trimmed() {
        let tile = StubTile::with_fields(&[(TITLE_SELECTOR, "  Grand Tour \n")]);
        let record = extract_record(&tile).await.unwrap();
        assert_eq!(record.title, "Grand Tour");
    }

    #[tokio::test]
    async fn detached_tile_fails_extraction() {
        let tile = StubTile::detached();
        assert!(extract_record(&tile).await.is_err());
    }

    #[tokio::test]
    async fn collect_skips_failing_tiles_and_keeps_order() {
        let tiles: Vec<Box<dyn Tile>> = vec![
            Box::new(StubTile::full("First")),
            Box::new(StubTile::detached()),
            Box::new(StubTile::full("Third")),
            Box::new(StubTile::detached()),
            Box::new(StubTile::full("Fifth")),
        ];

        let batch = collect(tiles).await;
        assert_eq!(batch.found, 5);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.scraped(), 3);
        let titles: Vec<&str> = batch.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Third", "Fifth"]);
    }

    #[tokio::test]
    async fn collect_with_no_tiles_yields_empty_batch() {
        let batch = collect(Vec::new()).await;
        assert_eq!(batch.found, 0);
        assert_eq!(batch.skipped, 0);
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn collect_with_all_tiles_failing_yields_empty_batch() {
        let tiles: Vec<Box<dyn Tile>> =
            vec![Box::new(StubTile::detached()), Box::new(StubTile::detached())];
        let batch = collect(tiles).await;
        assert_eq!(batch.found, 2);
        assert_eq!(batch.skipped, 2);
        assert!(batch.is_empty());
    }
}
