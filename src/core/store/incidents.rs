//! Incident records and the compound incident + first task log

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info, warn};

use super::{map_write_error, IncidentFilter, SqlAssignments, SqlFilter, Store};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::core::workflow::{self, format_timestamp, timestamp_column};
use crate::entities::{Incident, IncidentUpdate, InitialTask, NewIncident, Task};

const SELECT_INCIDENT: &str =
    "SELECT id, type, description, timestamp, priority, status FROM incidents";

fn map_incident(row: &rusqlite::Row<'_>) -> rusqlite::Result<Incident> {
    Ok(Incident {
        id: row.get(0)?,
        incident_type: row.get(1)?,
        description: row.get(2)?,
        timestamp: timestamp_column(row, 3)?,
        priority: row.get(4)?,
        status: row.get(5)?,
    })
}

impl Store {
    /// List incidents in the order they were logged
    pub fn list_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>> {
        let mut sql = SqlFilter::default();
        if let Some(status) = filter.status {
            sql.and("status = ?", status);
        }
        if let Some(priority) = filter.priority {
            sql.and("priority = ?", priority);
        }
        self.select(SELECT_INCIDENT, sql, "id", map_incident)
    }

    pub fn get_incident(&self, id: i64) -> Result<Incident> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_INCIDENT),
                [id],
                map_incident,
            )
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: Incident::ENTITY,
                id,
            })
    }

    pub fn incident_exists(&self, id: i64) -> Result<bool> {
        self.exists(Incident::TABLE, id)
    }

    /// Log an incident, stamped with the current instant
    pub fn create_incident(&self, new: NewIncident) -> Result<Incident> {
        let new = new.validate()?;
        let timestamp = workflow::now();

        self.conn
            .execute(
                "INSERT INTO incidents (type, description, timestamp, priority, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.incident_type,
                    new.description,
                    format_timestamp(&timestamp),
                    new.priority,
                    new.status,
                ],
            )
            .map_err(|e| map_write_error(e, Incident::ENTITY, &new.incident_type))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = Incident::TABLE, id, priority = %new.priority, "inserted");

        Ok(Incident {
            id,
            incident_type: new.incident_type,
            description: new.description,
            timestamp,
            priority: new.priority,
            status: new.status,
        })
    }

    /// Update incident details. The creation timestamp is left untouched.
    pub fn update_incident(&self, id: i64, update: IncidentUpdate) -> Result<Incident> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_incident(id);
        }

        let mut set = SqlAssignments::default();
        if let Some(incident_type) = update.incident_type {
            set.set("type", incident_type);
        }
        if let Some(description) = update.description {
            set.set("description", description);
        }
        if let Some(priority) = update.priority {
            set.set("priority", priority);
        }
        if let Some(status) = update.status {
            set.set("status", status);
        }

        let changed = set
            .apply(&self.conn, Incident::TABLE, id)
            .map_err(|e| map_write_error(e, Incident::ENTITY, ""))?;
        if changed == 0 {
            return Err(HosconError::NotFound {
                entity: Incident::ENTITY,
                id,
            });
        }

        self.get_incident(id)
    }

    /// Log an incident together with its first task, atomically.
    ///
    /// Both rows are written in one transaction: if the task cannot be
    /// created the incident is rolled back too. The task starts `Open` and
    /// shares the incident's timestamp.
    pub fn log_incident_with_task(
        &mut self,
        incident: NewIncident,
        task: InitialTask,
    ) -> Result<(Incident, Task)> {
        let result = self.transaction(|store| {
            let incident = store.create_incident(incident)?;
            let task = store.insert_task(task.for_incident(incident.id), incident.timestamp)?;
            Ok((incident, task))
        });

        match &result {
            Ok((incident, task)) => {
                info!(incident = incident.id, task = task.id, "incident logged");
            }
            Err(e) => warn!(error = %e, "incident log rolled back"),
        }
        result
    }
}
