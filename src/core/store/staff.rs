//! Staff records and the muster views

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{map_write_error, SqlAssignments, SqlFilter, StaffFilter, Store};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::entities::{NewStaff, Staff, StaffUpdate, StaffWithDepartment};

const SELECT_STAFF: &str = "SELECT id, name, role, department_id, present FROM staff";

const SELECT_STAFF_WITH_DEPARTMENT: &str = "SELECT s.id, s.name, s.role, s.department_id, d.name, s.present \
     FROM staff s LEFT JOIN departments d ON s.department_id = d.id";

fn map_staff(row: &rusqlite::Row<'_>) -> rusqlite::Result<Staff> {
    Ok(Staff {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        department_id: row.get(3)?,
        present: row.get(4)?,
    })
}

fn map_staff_with_department(row: &rusqlite::Row<'_>) -> rusqlite::Result<StaffWithDepartment> {
    Ok(StaffWithDepartment {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        department_id: row.get(3)?,
        department: row.get(4)?,
        present: row.get(5)?,
    })
}

impl Store {
    /// List staff in insertion order
    pub fn list_staff(&self, filter: &StaffFilter) -> Result<Vec<Staff>> {
        let mut sql = SqlFilter::default();
        if let Some(present) = filter.present {
            sql.and("present = ?", present);
        }
        if let Some(department_id) = filter.department_id {
            sql.and("department_id = ?", department_id);
        }
        self.select(SELECT_STAFF, sql, "id", map_staff)
    }

    /// Staff joined with their department's name.
    ///
    /// This is a left join: staff whose department is missing are still
    /// listed, with `department` set to `None`.
    pub fn list_staff_with_department(
        &self,
        filter: &StaffFilter,
    ) -> Result<Vec<StaffWithDepartment>> {
        let mut sql = SqlFilter::default();
        if let Some(present) = filter.present {
            sql.and("s.present = ?", present);
        }
        if let Some(department_id) = filter.department_id {
            sql.and("s.department_id = ?", department_id);
        }
        self.select(
            SELECT_STAFF_WITH_DEPARTMENT,
            sql,
            "s.id",
            map_staff_with_department,
        )
    }

    /// Muster view: everyone currently checked in
    pub fn present_staff(&self) -> Result<Vec<StaffWithDepartment>> {
        self.list_staff_with_department(&StaffFilter::present())
    }

    pub fn get_staff(&self, id: i64) -> Result<Staff> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_STAFF), [id], map_staff)
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: Staff::ENTITY,
                id,
            })
    }

    /// First staff member registered under `name`
    pub fn find_staff_by_name(&self, name: &str) -> Result<Option<Staff>> {
        Ok(self
            .conn
            .query_row(
                &format!("{} WHERE name = ?1 ORDER BY id LIMIT 1", SELECT_STAFF),
                [name.trim()],
                map_staff,
            )
            .optional()?)
    }

    pub fn staff_exists(&self, id: i64) -> Result<bool> {
        self.exists(Staff::TABLE, id)
    }

    /// Register a staff member.
    ///
    /// The department reference is not checked here; callers that want
    /// strict behavior check [`Store::department_exists`] first.
    pub fn create_staff(&self, new: NewStaff) -> Result<Staff> {
        let new = new.validate()?;
        self.conn
            .execute(
                "INSERT INTO staff (name, role, department_id, present) VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.role, new.department_id, new.present],
            )
            .map_err(|e| map_write_error(e, Staff::ENTITY, &new.name))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = Staff::TABLE, id, name = %new.name, "inserted");

        Ok(Staff {
            id,
            name: new.name,
            role: new.role,
            department_id: Some(new.department_id),
            present: new.present,
        })
    }

    pub fn update_staff(&self, id: i64, update: StaffUpdate) -> Result<Staff> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_staff(id);
        }

        let mut set = SqlAssignments::default();
        if let Some(name) = update.name {
            set.set("name", name);
        }
        if let Some(role) = update.role {
            set.set("role", role);
        }
        if let Some(department_id) = update.department_id {
            set.set("department_id", department_id);
        }
        if let Some(present) = update.present {
            set.set("present", present);
        }

        let changed = set
            .apply(&self.conn, Staff::TABLE, id)
            .map_err(|e| map_write_error(e, Staff::ENTITY, ""))?;
        if changed == 0 {
            return Err(HosconError::NotFound {
                entity: Staff::ENTITY,
                id,
            });
        }

        self.get_staff(id)
    }
}
