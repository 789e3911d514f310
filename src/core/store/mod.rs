//! SQLite-backed record store
//!
//! The [`Store`] owns the single connection to the HOSCON database and is the
//! only way the rest of the crate reads or writes records. It is constructed
//! explicitly by the hosting process and passed to whoever needs it.
//!
//! - Six tables, one per entity type, created idempotently on open
//! - Typed create/read/update per entity (see the submodules)
//! - References between tables are soft: no foreign keys are declared
//! - Single-writer semantics; each create/update is one SQLite statement and
//!   compound operations run inside one transaction

mod communications;
mod dashboard;
mod departments;
mod incidents;
mod resources;
mod schema;
mod staff;
mod tasks;
mod types;

pub use resources::LOW_STOCK_THRESHOLD;
pub use schema::TABLES;
pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection, ErrorCode, ToSql};
use tracing::{debug, info};

use crate::core::error::{HosconError, Result};

/// The record store backed by SQLite
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open or create the store at `path` and make sure the schema exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HosconError::io(parent, e))?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.ensure_schema()?;

        info!(path = %path.display(), "opened store");
        Ok(store)
    }

    /// Open a private in-memory store (nothing is persisted)
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Location of the database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Release the connection, surfacing any error from closing it
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| HosconError::Storage(e))
    }

    /// Run `f` inside one transaction.
    ///
    /// Everything `f` writes through the store is committed together, or
    /// rolled back together when `f` returns an error.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&Store) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    /// Row counts for every table
    pub fn table_counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            departments: self.count("departments")?,
            staff: self.count("staff")?,
            incidents: self.count("incidents")?,
            tasks: self.count("tasks")?,
            resources: self.count("resources")?,
            communication_logs: self.count("communication_logs")?,
        })
    }

    fn count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Whether a row with `id` exists in `table`
    fn exists(&self, table: &str, id: i64) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table);
        Ok(self.conn.query_row(&sql, [id], |row| row.get(0))?)
    }

    /// Run a SELECT built from `base` plus the filter, mapping every row
    fn select<T>(
        &self,
        base: &str,
        filter: SqlFilter,
        order_by: &str,
        map: impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let sql = format!("{}{} ORDER BY {}", base, filter.clause(), order_by);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(filter.values.iter()), map)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

/// Accumulates `AND` conditions for a list query
#[derive(Default)]
pub(crate) struct SqlFilter {
    conditions: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl SqlFilter {
    pub(crate) fn and(&mut self, condition: &'static str, value: impl ToSql + 'static) {
        self.conditions.push(condition);
        self.values.push(Box::new(value));
    }

    fn clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }
}

/// Accumulates `column = ?` assignments for a partial update
#[derive(Default)]
pub(crate) struct SqlAssignments {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl SqlAssignments {
    pub(crate) fn set(&mut self, column: &'static str, value: impl ToSql + 'static) {
        self.columns.push(column);
        self.values.push(Box::new(value));
    }

    /// Apply to row `id` of `table`, returning the number of rows changed
    fn apply(mut self, conn: &Connection, table: &str, id: i64) -> rusqlite::Result<usize> {
        let sets = self
            .columns
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", table, sets);
        self.values.push(Box::new(id));
        debug!(table, id, columns = ?self.columns, "updating");
        conn.execute(&sql, params_from_iter(self.values.iter()))
    }
}

/// Translate a failed INSERT/UPDATE into the caller-facing taxonomy
fn map_write_error(err: rusqlite::Error, entity: &'static str, name: &str) -> HosconError {
    let constraint = match &err {
        rusqlite::Error::SqliteFailure(code, message)
            if code.code == ErrorCode::ConstraintViolation =>
        {
            message.clone()
        }
        _ => None,
    };

    match constraint {
        Some(message) if message.contains("UNIQUE constraint failed") => {
            tracing::warn!(entity, name, "duplicate name rejected");
            HosconError::DuplicateKey {
                entity,
                name: name.to_string(),
            }
        }
        Some(message) if message.contains("CHECK constraint failed") => {
            HosconError::validation("value", message)
        }
        _ => HosconError::Storage(err),
    }
}
