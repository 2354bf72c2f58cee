pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod pagination;
pub mod progress;
pub mod scanner;
pub mod storage;
pub mod store;

pub use analysis::retention::MissingPricePolicy;
pub use config::AppConfig;
pub use engine::{AdminRequest, AdminResponse, DedupeEngine, DeleteAllReport, DuplicatePage, StatusMessage};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use store::{CatalogStore, InMemoryCatalog};
