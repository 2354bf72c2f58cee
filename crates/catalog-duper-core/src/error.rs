use thiserror::Error;

use crate::storage::models::ItemId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Commerce store is not active: {0}")]
    StoreUnavailable(String),

    #[error("Catalog item #{0} not found")]
    ItemNotFound(ItemId),

    #[error("Invalid catalog item: {0}")]
    InvalidItem(String),

    #[error("{0}")]
    Other(String),
}
