//! SQLite storage for promptstash.
//!
//! Provides a unified [`Database`] struct that owns the SQLite connection
//! and hands out per-request stores via [`Database::categories`] and
//! [`Database::prompts`]. A store holds the connection lock until it is
//! dropped, so every query and mutation a request makes through it falls
//! inside one commit-or-rollback boundary.

mod categories;
mod prompts;

pub use categories::{Categories, CategoryRow};
pub use prompts::{PromptPatch, PromptRow, Prompts};

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at a specific path.
    pub fn open_at(path: &Path) -> Result<Self, rusqlite::Error> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Access the categories store. Holds the connection lock until dropped.
    pub fn categories(&self) -> Categories<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        Categories::new(conn)
    }

    /// Access the prompts store. Holds the connection lock until dropped.
    pub fn prompts(&self) -> Prompts<'_> {
        let conn = self.conn.lock().expect("Database lock poisoned");
        Prompts::new(conn)
    }

    /// Initialize the database schema.
    ///
    /// Creates both tables if missing; additive only, no migrations. Also
    /// turns on foreign-key enforcement for this connection, so a prompt can
    /// never point at a category that does not exist.
    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS categories (
                id   INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS prompts (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL,
                contents    TEXT NOT NULL,
                category_id INTEGER REFERENCES categories(id)
            );

            CREATE INDEX IF NOT EXISTS idx_prompts_category_id ON prompts(category_id);
            "#,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_init_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stash.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.categories().create("writing").unwrap();
        }

        // Reopening the same file must not clobber existing rows.
        let db = Database::open_at(&path).unwrap();
        let categories = db.categories().list().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "writing");
    }

    #[test]
    fn test_category_name_is_unique() {
        let db = Database::open_in_memory().unwrap();

        db.categories().create("coding").unwrap();
        let err = db.categories().create("coding");
        assert!(err.is_err());

        let categories = db.categories().list().unwrap();
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn test_dangling_category_id_is_rejected() {
        let db = Database::open_in_memory().unwrap();

        let err = db.prompts().create("orphan", "body", Some(999));
        assert!(err.is_err());
        assert!(db.prompts().list(None).unwrap().is_empty());
    }

    #[test]
    fn test_update_to_dangling_category_id_is_rejected() {
        let db = Database::open_in_memory().unwrap();

        let prompt = db.prompts().create("p", "body", None).unwrap();
        let patch = PromptPatch {
            category_id: Some(Some(999)),
            ..Default::default()
        };
        assert!(db.prompts().update(prompt.id, &patch).is_err());

        // Row untouched
        let reloaded = db.prompts().get(prompt.id).unwrap().unwrap();
        assert_eq!(reloaded.category_id, None);
    }

    #[test]
    fn test_category_delete_cascades_to_prompts() {
        let db = Database::open_in_memory().unwrap();

        let category = db.categories().create("coding").unwrap();
        let p1 = db
            .prompts()
            .create("review", "Review this diff.", Some(category.id))
            .unwrap();
        let p2 = db
            .prompts()
            .create("explain", "Explain this error.", Some(category.id))
            .unwrap();
        let kept = db.prompts().create("loose", "No category.", None).unwrap();

        let deleted = db.categories().delete(category.id).unwrap();
        assert!(deleted);

        assert!(db.prompts().get(p1.id).unwrap().is_none());
        assert!(db.prompts().get(p2.id).unwrap().is_none());
        assert!(db.prompts().get(kept.id).unwrap().is_some());
    }
}
