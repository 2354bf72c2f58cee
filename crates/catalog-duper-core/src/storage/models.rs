use serde::{Deserialize, Serialize};

pub type ItemId = i64;

/// Publication status stored alongside each catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Publish,
    Draft,
    Private,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Publish => "publish",
            ItemStatus::Draft => "draft",
            ItemStatus::Private => "private",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" | "publish" => Some(ItemStatus::Publish),
            "draft" => Some(ItemStatus::Draft),
            "private" => Some(ItemStatus::Private),
            _ => None,
        }
    }
}

/// A read-only snapshot of one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub price: Option<f64>,
    pub categories: Vec<String>,
    /// Display-formatted, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    pub status: ItemStatus,
}

impl CatalogItem {
    pub fn new(id: ItemId, title: &str, price: Option<f64>) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            categories: Vec::new(),
            created_at: String::new(),
            status: ItemStatus::Publish,
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_created_at(mut self, created_at: &str) -> Self {
        self.created_at = created_at.to_string();
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }
}

/// A permanently removed item, as recorded by the SQLite store.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionLogEntry {
    pub id: i64,
    pub item_id: ItemId,
    pub title: String,
    pub price: Option<f64>,
    pub deleted_at: String,
}
