//! Categories store.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::sync::MutexGuard;

/// A category row.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
}

/// Categories store with a borrowed connection.
pub struct Categories<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Categories<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// List all categories, oldest first.
    pub fn list(&self) -> Result<Vec<CategoryRow>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], Self::row_to_category)?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }

        Ok(categories)
    }

    /// Insert a category and return it, reloaded with its assigned id.
    pub fn create(&self, name: &str) -> Result<CategoryRow, rusqlite::Error> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
        let id = self.conn.last_insert_rowid();

        self.conn.query_row(
            "SELECT id, name FROM categories WHERE id = ?1",
            params![id],
            Self::row_to_category,
        )
    }

    /// Get a category by id.
    pub fn get(&self, id: i64) -> Result<Option<CategoryRow>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1",
                params![id],
                Self::row_to_category,
            )
            .optional()
    }

    /// Delete a category and every prompt in it.
    ///
    /// Runs as one transaction, prompts first, then the category itself; a
    /// failure part-way rolls the whole thing back. Returns whether the
    /// category existed.
    pub fn delete(&mut self, id: i64) -> Result<bool, rusqlite::Error> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM prompts WHERE category_id = ?1", params![id])?;
        let rows_affected = tx.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        tx.commit()?;
        Ok(rows_affected > 0)
    }

    fn row_to_category(row: &rusqlite::Row) -> Result<CategoryRow, rusqlite::Error> {
        Ok(CategoryRow {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn test_create_assigns_ids_in_order() {
        let db = Database::open_in_memory().unwrap();

        let first = db.categories().create("writing").unwrap();
        let second = db.categories().create("coding").unwrap();
        assert!(second.id > first.id);

        let all = db.categories().list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "writing");
        assert_eq!(all[1].name, "coding");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.categories().get(42).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.categories().delete(42).unwrap());
    }

    #[test]
    fn test_delete_empty_category() {
        let db = Database::open_in_memory().unwrap();

        let category = db.categories().create("scratch").unwrap();
        assert!(db.categories().delete(category.id).unwrap());
        assert!(db.categories().list().unwrap().is_empty());
    }
}
