//! Department records

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{map_write_error, DepartmentFilter, SqlAssignments, SqlFilter, Store};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::entities::{Department, DepartmentUpdate, NewDepartment};

const SELECT_DEPARTMENT: &str = "SELECT id, name, status, notes FROM departments";

fn map_department(row: &rusqlite::Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        status: row.get(2)?,
        notes: row.get(3)?,
    })
}

impl Store {
    /// List departments in insertion order
    pub fn list_departments(&self, filter: &DepartmentFilter) -> Result<Vec<Department>> {
        let mut sql = SqlFilter::default();
        if let Some(status) = filter.status {
            sql.and("status = ?", status);
        }
        self.select(SELECT_DEPARTMENT, sql, "id", map_department)
    }

    /// Get a department by id
    pub fn get_department(&self, id: i64) -> Result<Department> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_DEPARTMENT),
                [id],
                map_department,
            )
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: Department::ENTITY,
                id,
            })
    }

    /// Look a department up by its unique name
    pub fn find_department_by_name(&self, name: &str) -> Result<Option<Department>> {
        Ok(self
            .conn
            .query_row(
                &format!("{} WHERE name = ?1", SELECT_DEPARTMENT),
                [name.trim()],
                map_department,
            )
            .optional()?)
    }

    pub fn department_exists(&self, id: i64) -> Result<bool> {
        self.exists(Department::TABLE, id)
    }

    /// Register a department; a taken name fails with `DuplicateKey`
    pub fn create_department(&self, new: NewDepartment) -> Result<Department> {
        let new = new.validate()?;
        self.conn
            .execute(
                "INSERT INTO departments (name, status, notes) VALUES (?1, ?2, ?3)",
                params![new.name, new.status, new.notes],
            )
            .map_err(|e| map_write_error(e, Department::ENTITY, &new.name))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = Department::TABLE, id, name = %new.name, "inserted");

        Ok(Department {
            id,
            name: new.name,
            status: new.status,
            notes: new.notes,
        })
    }

    /// Apply a partial update. Any status may move to any other.
    pub fn update_department(&self, id: i64, update: DepartmentUpdate) -> Result<Department> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_department(id);
        }

        let new_name = update.name.clone().unwrap_or_default();
        let mut set = SqlAssignments::default();
        if let Some(name) = update.name {
            set.set("name", name);
        }
        if let Some(status) = update.status {
            set.set("status", status);
        }
        if let Some(notes) = update.notes {
            set.set("notes", notes);
        }

        let changed = set
            .apply(&self.conn, Department::TABLE, id)
            .map_err(|e| map_write_error(e, Department::ENTITY, &new_name))?;
        if changed == 0 {
            return Err(HosconError::NotFound {
                entity: Department::ENTITY,
                id,
            });
        }

        self.get_department(id)
    }
}
