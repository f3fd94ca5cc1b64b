pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod page;
pub mod run;
pub mod store;

pub use config::Config;
pub use error::{Error, StorageError};
pub use models::{CaptureBatch, CruiseRecord};
pub use run::{RunOutcome, RunReport};
