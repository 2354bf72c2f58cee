use super::models::*;
use super::sqlite::Database;
use rusqlite::{params, OptionalExtension, Result, Row};
use std::collections::HashMap;
use tracing::debug;

fn item_from_row(row: &Row) -> Result<CatalogItem> {
    let status: String = row.get(4)?;
    Ok(CatalogItem {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        created_at: row.get(3)?,
        status: ItemStatus::parse(&status).unwrap_or(ItemStatus::Draft),
        categories: Vec::new(),
    })
}

impl Database {
    // ── Catalog Items ────────────────────────────────────────────

    /// Insert or replace catalog items, keeping their ids. Category labels are
    /// rewritten in the given order.
    pub fn insert_items(&self, items: &[CatalogItem]) -> Result<usize> {
        let tx = self.connection().unchecked_transaction()?;
        let mut count = 0;
        {
            let mut item_stmt = tx.prepare_cached(
                "INSERT INTO catalog_item (id, title, price, status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(id) DO UPDATE SET \
                     title = excluded.title, \
                     price = excluded.price, \
                     status = excluded.status, \
                     created_at = excluded.created_at",
            )?;
            let mut clear_stmt =
                tx.prepare_cached("DELETE FROM item_category WHERE item_id = ?1")?;
            let mut category_stmt = tx.prepare_cached(
                "INSERT INTO item_category (item_id, position, name) VALUES (?1, ?2, ?3)",
            )?;

            for item in items {
                count += item_stmt.execute(params![
                    item.id,
                    item.title,
                    item.price,
                    item.status.as_str(),
                    item.created_at,
                ])?;
                clear_stmt.execute(params![item.id])?;
                for (position, name) in item.categories.iter().enumerate() {
                    category_stmt.execute(params![item.id, position as i64, name])?;
                }
            }
        }
        tx.commit()?;
        debug!("Inserted {} catalog items", count);
        Ok(count)
    }

    /// All published items in id order, with their category labels attached.
    pub fn list_published_items(&self) -> Result<Vec<CatalogItem>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, title, price, created_at, status FROM catalog_item \
             WHERE status = 'publish' ORDER BY id",
        )?;
        let mut items = stmt
            .query_map([], item_from_row)?
            .collect::<Result<Vec<_>>>()?;

        let mut categories = self.load_published_categories()?;
        for item in items.iter_mut() {
            if let Some(labels) = categories.remove(&item.id) {
                item.categories = labels;
            }
        }

        Ok(items)
    }

    fn load_published_categories(&self) -> Result<HashMap<ItemId, Vec<String>>> {
        let mut stmt = self.connection().prepare(
            "SELECT ic.item_id, ic.name FROM item_category ic \
             JOIN catalog_item ci ON ci.id = ic.item_id \
             WHERE ci.status = 'publish' \
             ORDER BY ic.item_id, ic.position",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

        let mut map: HashMap<ItemId, Vec<String>> = HashMap::new();
        for row in rows {
            let (item_id, name) = row?;
            map.entry(item_id).or_default().push(name);
        }
        Ok(map)
    }

    pub fn get_item(&self, id: ItemId) -> Result<Option<CatalogItem>> {
        let item = self
            .connection()
            .query_row(
                "SELECT id, title, price, created_at, status FROM catalog_item WHERE id = ?1",
                params![id],
                item_from_row,
            )
            .optional()?;

        let Some(mut item) = item else {
            return Ok(None);
        };

        let mut stmt = self.connection().prepare(
            "SELECT name FROM item_category WHERE item_id = ?1 ORDER BY position",
        )?;
        item.categories = stmt
            .query_map(params![id], |row| row.get(0))?
            .collect::<Result<Vec<String>>>()?;
        Ok(Some(item))
    }

    pub fn count_items(&self) -> Result<i64> {
        self.connection()
            .query_row("SELECT COUNT(*) FROM catalog_item", [], |row| row.get(0))
    }

    /// Permanently remove an item (its categories cascade) and record it in the
    /// deletion log. Returns `false` when no such item exists.
    pub fn delete_item_permanently(&self, id: ItemId) -> Result<bool> {
        let tx = self.connection().unchecked_transaction()?;

        let existing: Option<(String, Option<f64>)> = tx
            .query_row(
                "SELECT title, price FROM catalog_item WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((title, price)) = existing else {
            return Ok(false);
        };

        let now = chrono::Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO deletion_log (item_id, title, price, deleted_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![id, title, price, now],
        )?;
        tx.execute("DELETE FROM catalog_item WHERE id = ?1", params![id])?;
        tx.commit()?;

        debug!("Permanently deleted item #{} '{}'", id, title);
        Ok(true)
    }

    // ── Deletion Log ─────────────────────────────────────────────

    /// Deletion log entries, newest first.
    pub fn get_deletion_log(&self, offset: i64, limit: i64) -> Result<Vec<DeletionLogEntry>> {
        let mut stmt = self.connection().prepare(
            "SELECT id, item_id, title, price, deleted_at FROM deletion_log \
             ORDER BY id DESC LIMIT ?1 OFFSET ?2",
        )?;
        let entries = stmt
            .query_map(params![limit, offset], |row| {
                Ok(DeletionLogEntry {
                    id: row.get(0)?,
                    item_id: row.get(1)?,
                    title: row.get(2)?,
                    price: row.get(3)?,
                    deleted_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;
        Ok(entries)
    }
}
