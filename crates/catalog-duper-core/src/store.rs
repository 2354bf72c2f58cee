use std::sync::Mutex;

use tracing::debug;

use crate::error::Error;
use crate::storage::models::{CatalogItem, ItemId, ItemStatus};
use crate::storage::Database;

/// The catalog the engine reads from and deletes from.
///
/// Implementations hand back a plain, finite list in store order; the engine
/// never keeps anything between calls.
pub trait CatalogStore {
    /// Whether the commerce store is active. The engine refuses to scan or
    /// delete when this is `false`.
    fn is_available(&self) -> Result<bool, Error>;

    /// Every published item, in store order.
    fn list_published_items(&self) -> Result<Vec<CatalogItem>, Error>;

    /// Remove an item for good. There is no trash to restore from.
    fn delete_item(&self, id: ItemId) -> Result<(), Error>;
}

impl CatalogStore for Database {
    fn is_available(&self) -> Result<bool, Error> {
        Ok(self.table_exists("catalog_item")?)
    }

    fn list_published_items(&self) -> Result<Vec<CatalogItem>, Error> {
        Ok(Database::list_published_items(self)?)
    }

    fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        if self.delete_item_permanently(id)? {
            Ok(())
        } else {
            Err(Error::ItemNotFound(id))
        }
    }
}

/// Vec-backed store.
pub struct InMemoryCatalog {
    items: Mutex<Vec<CatalogItem>>,
    available: bool,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items),
            available: true,
        }
    }

    /// A store whose commerce subsystem is switched off.
    pub fn unavailable() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            available: false,
        }
    }

    pub fn items(&self) -> Vec<CatalogItem> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CatalogItem>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CatalogStore for InMemoryCatalog {
    fn is_available(&self) -> Result<bool, Error> {
        Ok(self.available)
    }

    fn list_published_items(&self) -> Result<Vec<CatalogItem>, Error> {
        Ok(self
            .lock()
            .iter()
            .filter(|item| item.status == ItemStatus::Publish)
            .cloned()
            .collect())
    }

    fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let mut items = self.lock();
        let position = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(Error::ItemNotFound(id))?;
        let removed = items.remove(position);
        debug!("Removed item #{} '{}' from memory", removed.id, removed.title);
        Ok(())
    }
}
