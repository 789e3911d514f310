//! Task records

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{map_write_error, SqlAssignments, SqlFilter, Store, TaskFilter};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::core::workflow::{self, format_timestamp, timestamp_column};
use crate::entities::{NewTask, Task, TaskUpdate, TaskWithAssignee};

const SELECT_TASK: &str =
    "SELECT id, incident_id, title, assigned_to, status, timestamp, resource_id FROM tasks";

const SELECT_TASK_WITH_ASSIGNEE: &str = "SELECT t.id, t.incident_id, t.title, t.assigned_to, t.status, t.timestamp, t.resource_id, s.name \
     FROM tasks t LEFT JOIN staff s ON t.assigned_to = s.id";

fn map_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        incident_id: row.get(1)?,
        title: row.get(2)?,
        assigned_to: row.get(3)?,
        status: row.get(4)?,
        timestamp: timestamp_column(row, 5)?,
        resource_id: row.get(6)?,
    })
}

fn map_task_with_assignee(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskWithAssignee> {
    Ok(TaskWithAssignee {
        task: map_task(row)?,
        assigned_staff: row.get(7)?,
    })
}

fn task_filter(filter: &TaskFilter, joined: bool) -> SqlFilter {
    let (incident, status, assigned) = if joined {
        ("t.incident_id = ?", "t.status = ?", "t.assigned_to = ?")
    } else {
        ("incident_id = ?", "status = ?", "assigned_to = ?")
    };

    let mut sql = SqlFilter::default();
    if let Some(incident_id) = filter.incident_id {
        sql.and(incident, incident_id);
    }
    if let Some(task_status) = filter.status {
        sql.and(status, task_status);
    }
    if let Some(staff_id) = filter.assigned_to {
        sql.and(assigned, staff_id);
    }
    sql
}

impl Store {
    /// List tasks in creation order
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.select(SELECT_TASK, task_filter(filter, false), "id", map_task)
    }

    /// Tasks joined with the assignee's name.
    ///
    /// Left join: unassigned tasks and tasks pointing at a missing staff
    /// member are listed with `assigned_staff` set to `None`.
    pub fn list_tasks_with_assignee(&self, filter: &TaskFilter) -> Result<Vec<TaskWithAssignee>> {
        self.select(
            SELECT_TASK_WITH_ASSIGNEE,
            task_filter(filter, true),
            "t.id",
            map_task_with_assignee,
        )
    }

    pub fn get_task(&self, id: i64) -> Result<Task> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TASK), [id], map_task)
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: Task::ENTITY,
                id,
            })
    }

    /// Create a task against an incident, stamped with the current instant.
    ///
    /// The incident and assignee ids are soft references and are not
    /// checked.
    pub fn create_task(&self, new: NewTask) -> Result<Task> {
        self.insert_task(new, workflow::now())
    }

    pub(super) fn insert_task(&self, new: NewTask, timestamp: DateTime<Utc>) -> Result<Task> {
        let new = new.validate()?;
        self.conn
            .execute(
                "INSERT INTO tasks (incident_id, title, assigned_to, status, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.incident_id,
                    new.title,
                    new.assigned_to,
                    new.status,
                    format_timestamp(&timestamp),
                ],
            )
            .map_err(|e| map_write_error(e, Task::ENTITY, &new.title))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = Task::TABLE, id, incident = new.incident_id, "inserted");

        Ok(Task {
            id,
            incident_id: new.incident_id,
            title: new.title,
            assigned_to: new.assigned_to,
            status: new.status,
            timestamp,
            resource_id: None,
        })
    }

    /// Apply a partial update.
    ///
    /// Any status may move to any other; every write that carries a status
    /// restamps the task's timestamp.
    pub fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Task> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_task(id);
        }

        let mut set = SqlAssignments::default();
        if let Some(title) = update.title {
            set.set("title", title);
        }
        if let Some(assigned_to) = update.assigned_to {
            set.set("assigned_to", assigned_to);
        }
        if let Some(status) = update.status {
            set.set("status", status);
            set.set("timestamp", format_timestamp(&workflow::now()));
        }

        let changed = set
            .apply(&self.conn, Task::TABLE, id)
            .map_err(|e| map_write_error(e, Task::ENTITY, ""))?;
        if changed == 0 {
            return Err(HosconError::NotFound {
                entity: Task::ENTITY,
                id,
            });
        }

        self.get_task(id)
    }
}
