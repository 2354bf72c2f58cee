use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::models::{CatalogItem, ItemId, ItemStatus};
use super::sqlite::Database;
use crate::error::Error;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of a catalog CSV file:
/// `id,title,price,categories,created_at,status`.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: ItemId,
    title: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    categories: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl CatalogRecord {
    fn into_item(self, now: &str) -> Result<CatalogItem, Error> {
        let price = match self.price.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let value: f64 = raw.parse().map_err(|_| {
                    Error::InvalidItem(format!("item #{} has unparsable price '{}'", self.id, raw))
                })?;
                if !value.is_finite() || value < 0.0 {
                    return Err(Error::InvalidItem(format!(
                        "item #{} has invalid price {}",
                        self.id, raw
                    )));
                }
                Some(value)
            }
        };

        let categories = self
            .categories
            .as_deref()
            .unwrap_or("")
            .split('|')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let status_raw = self.status.as_deref().unwrap_or("").trim();
        let status = ItemStatus::parse(status_raw).ok_or_else(|| {
            Error::InvalidItem(format!("item #{} has unknown status '{}'", self.id, status_raw))
        })?;

        let created_at = match self.created_at {
            Some(ts) if !ts.trim().is_empty() => ts.trim().to_string(),
            _ => now.to_string(),
        };

        // Titles are kept byte-for-byte; grouping relies on exact equality.
        Ok(CatalogItem {
            id: self.id,
            title: self.title,
            price,
            categories,
            created_at,
            status,
        })
    }
}

/// Parse catalog rows from any CSV reader with a header line.
pub fn read_catalog_csv<R: Read>(reader: R) -> Result<Vec<CatalogItem>, Error> {
    let now = chrono::Local::now().format(CREATED_AT_FORMAT).to_string();
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::None)
        .flexible(true)
        .from_reader(reader);

    let mut items = Vec::new();
    for record in csv_reader.deserialize::<CatalogRecord>() {
        items.push(record?.into_item(&now)?);
    }
    Ok(items)
}

/// Load a catalog CSV file into the database. Returns the number of rows written.
pub fn import_catalog_csv(db: &Database, path: &Path) -> Result<usize, Error> {
    let file = std::fs::File::open(path)?;
    let items = read_catalog_csv(file)?;
    let written = db.insert_items(&items)?;
    info!("Imported {} catalog items from {}", written, path.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_catalog_csv_parses_optional_columns() {
        let data = "id,title,price,categories,created_at,status\n\
                    1,Shirt,19.99,Clothing|Tops,2024-01-02 03:04:05,publish\n\
                    2,Shirt,,,,\n\
                    3,Mug,4.5,Kitchen,2024-02-01 00:00:00,draft\n";
        let items = read_catalog_csv(data.as_bytes()).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].price, Some(19.99));
        assert_eq!(items[0].categories, vec!["Clothing", "Tops"]);
        assert_eq!(items[0].created_at, "2024-01-02 03:04:05");
        assert_eq!(items[1].price, None);
        assert!(items[1].categories.is_empty());
        assert_eq!(items[1].status, ItemStatus::Publish);
        assert_eq!(items[1].created_at.len(), 19);
        assert_eq!(items[2].status, ItemStatus::Draft);
    }

    #[test]
    fn test_read_catalog_csv_keeps_title_whitespace() {
        let data = "id,title,price\n1,\"shirt \",3\n";
        let items = read_catalog_csv(data.as_bytes()).unwrap();
        assert_eq!(items[0].title, "shirt ");
    }

    #[test]
    fn test_read_catalog_csv_rejects_negative_price() {
        let data = "id,title,price\n1,Shirt,-1\n";
        let err = read_catalog_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidItem(_)));
    }

    #[test]
    fn test_read_catalog_csv_rejects_unknown_status() {
        let data = "id,title,price,categories,created_at,status\n1,Shirt,1,,,trash\n";
        let err = read_catalog_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidItem(_)));
    }
}
