//! Communication log records (create and read only)

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{map_write_error, CommunicationFilter, SqlFilter, Store};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::core::workflow::{self, format_timestamp, timestamp_column};
use crate::entities::{CommunicationLog, NewCommunicationLog};

const SELECT_COMMUNICATION: &str =
    "SELECT id, timestamp, sender, recipient, message, incident_id FROM communication_logs";

fn map_communication(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommunicationLog> {
    Ok(CommunicationLog {
        id: row.get(0)?,
        timestamp: timestamp_column(row, 1)?,
        sender: row.get(2)?,
        recipient: row.get(3)?,
        message: row.get(4)?,
        incident_id: row.get(5)?,
    })
}

impl Store {
    pub fn list_communication_logs(
        &self,
        filter: &CommunicationFilter,
    ) -> Result<Vec<CommunicationLog>> {
        let mut sql = SqlFilter::default();
        if let Some(incident_id) = filter.incident_id {
            sql.and("incident_id = ?", incident_id);
        }
        self.select(SELECT_COMMUNICATION, sql, "id", map_communication)
    }

    pub fn get_communication_log(&self, id: i64) -> Result<CommunicationLog> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COMMUNICATION),
                [id],
                map_communication,
            )
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: CommunicationLog::ENTITY,
                id,
            })
    }

    /// Record a message, stamped with the current instant
    pub fn create_communication_log(&self, new: NewCommunicationLog) -> Result<CommunicationLog> {
        let new = new.validate()?;
        let timestamp = workflow::now();

        self.conn
            .execute(
                "INSERT INTO communication_logs (timestamp, sender, recipient, message, incident_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    format_timestamp(&timestamp),
                    new.sender,
                    new.recipient,
                    new.message,
                    new.incident_id,
                ],
            )
            .map_err(|e| map_write_error(e, CommunicationLog::ENTITY, &new.sender))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = CommunicationLog::TABLE, id, "inserted");

        Ok(CommunicationLog {
            id,
            timestamp,
            sender: new.sender,
            recipient: new.recipient,
            message: new.message,
            incident_id: new.incident_id,
        })
    }
}
