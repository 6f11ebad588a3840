//! Prompts store.

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::sync::MutexGuard;

/// A prompt row. `category_id` is null for uncategorized prompts.
#[derive(Debug, Clone, Serialize)]
pub struct PromptRow {
    pub id: i64,
    pub name: String,
    pub contents: String,
    pub category_id: Option<i64>,
}

/// Field-by-field changes to apply to a prompt.
///
/// `None` leaves a column untouched. For `category_id` the inner option is
/// the stored value, so `Some(None)` moves the prompt out of its category.
#[derive(Debug, Default, Clone)]
pub struct PromptPatch {
    pub name: Option<String>,
    pub contents: Option<String>,
    pub category_id: Option<Option<i64>>,
}

/// Prompts store with a borrowed connection.
pub struct Prompts<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Prompts<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// List prompts, optionally restricted to one category, oldest first.
    pub fn list(&self, category_id: Option<i64>) -> Result<Vec<PromptRow>, rusqlite::Error> {
        let mut sql =
            String::from("SELECT id, name, contents, category_id FROM prompts WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = category_id {
            sql.push_str(" AND category_id = ?");
            param_values.push(Box::new(category));
        }

        sql.push_str(" ORDER BY id");

        let params: Vec<&dyn rusqlite::ToSql> = param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params.as_slice(), Self::row_to_prompt)?;

        let mut prompts = Vec::new();
        for row in rows {
            prompts.push(row?);
        }

        Ok(prompts)
    }

    /// Insert a prompt and return it, reloaded with its assigned id.
    pub fn create(
        &self,
        name: &str,
        contents: &str,
        category_id: Option<i64>,
    ) -> Result<PromptRow, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO prompts (name, contents, category_id) VALUES (?1, ?2, ?3)",
            params![name, contents, category_id],
        )?;
        let id = self.conn.last_insert_rowid();

        self.conn.query_row(
            "SELECT id, name, contents, category_id FROM prompts WHERE id = ?1",
            params![id],
            Self::row_to_prompt,
        )
    }

    /// Get a prompt by id.
    pub fn get(&self, id: i64) -> Result<Option<PromptRow>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT id, name, contents, category_id FROM prompts WHERE id = ?1",
                params![id],
                Self::row_to_prompt,
            )
            .optional()
    }

    /// Apply a patch to a prompt and return the updated row, or `None` if the
    /// id does not exist. An empty patch leaves the row as is.
    pub fn update(&self, id: i64, patch: &PromptPatch) -> Result<Option<PromptRow>, rusqlite::Error> {
        let mut sets: Vec<&str> = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = patch.name {
            sets.push("name = ?");
            param_values.push(Box::new(name.clone()));
        }
        if let Some(ref contents) = patch.contents {
            sets.push("contents = ?");
            param_values.push(Box::new(contents.clone()));
        }
        if let Some(category) = patch.category_id {
            sets.push("category_id = ?");
            param_values.push(Box::new(category));
        }

        if sets.is_empty() {
            return self.get(id);
        }

        let sql = format!("UPDATE prompts SET {} WHERE id = ?", sets.join(", "));
        param_values.push(Box::new(id));

        let params: Vec<&dyn rusqlite::ToSql> = param_values.iter().map(|p| p.as_ref()).collect();
        let rows_affected = self.conn.execute(&sql, params.as_slice())?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    /// Delete a prompt by id. Returns whether it existed.
    pub fn delete(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prompts WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    fn row_to_prompt(row: &rusqlite::Row) -> Result<PromptRow, rusqlite::Error> {
        Ok(PromptRow {
            id: row.get(0)?,
            name: row.get(1)?,
            contents: row.get(2)?,
            category_id: row.get(3)?,
        })
    }
}
