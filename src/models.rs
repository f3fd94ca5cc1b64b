use serde::{Deserialize, Serialize};

/// Placeholder written when a tile lacks the sub-element for a field.
pub const SENTINEL: &str = "N/A";

/// One scraped cruise listing. All fields are raw trimmed text; absent
/// sub-elements are recorded as [`SENTINEL`]. No numeric or date parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseRecord {
    pub title: String,
    pub ship: String,
    pub price: String,
    pub dates: String,
    pub duration: String,
}

impl CruiseRecord {
    /// Cells in the fixed workbook column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.ship.clone(),
            self.price.clone(),
            self.dates.clone(),
            self.duration.clone(),
        ]
    }
}

/// The records produced by one run, in page order, plus counts for
/// observability. `records.len()` is always `found - skipped`.
#[derive(Debug, Default)]
pub struct CaptureBatch {
    pub records: Vec<CruiseRecord>,
    pub found: usize,
    pub skipped: usize,
}

impl CaptureBatch {
    pub fn scraped(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
