use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Costa UK cruise listing, sorted by departure date.
pub const DEFAULT_LISTING_URL: &str = "https://www.costacruises.co.uk/cruises.html?page=1#{!tag=destinationTag}destinationIds=PE&occupancy_GBP_anonymous=A&guestAges=30&guestBirthdates=1995-01-25&group.sort=departDate%20asc";

pub const DEFAULT_OUTPUT_FILE: &str = "cruise_data.xlsx";

/// Settings for one capture run, passed explicitly into the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub listing_url: String,
    pub output_path: PathBuf,
    pub headless: bool,
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            headless: true,
            navigation_timeout: Duration::from_secs(30),
            selector_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Defaults, with `CRUISE_LISTING_URL` and `CRUISE_OUTPUT_PATH`
    /// environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var("CRUISE_LISTING_URL") {
            if !url.is_empty() {
                config.listing_url = url;
            }
        }
        if let Ok(path) = env::var("CRUISE_OUTPUT_PATH") {
            if !path.is_empty() {
                config.output_path = PathBuf::from(path);
            }
        }
        config
    }
}
