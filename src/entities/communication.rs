//! Communication log entity
//!
//! Messages exchanged during an incident. The table is part of the schema
//! and exposed through the repository, but no incident flow writes to it
//! yet; entries only appear when a caller records one explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::error::{require_text, Result};
use crate::core::workflow::timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationLog {
    pub id: i64,

    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    pub sender: String,
    pub recipient: String,
    pub message: String,
    pub incident_id: Option<i64>,
}

impl Record for CommunicationLog {
    const TABLE: &'static str = "communication_logs";
    const ENTITY: &'static str = "Communication log";
    const COLUMNS: &'static [&'static str] =
        &["id", "timestamp", "sender", "recipient", "message", "incident_id"];

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct NewCommunicationLog {
    pub sender: String,
    pub recipient: String,
    pub message: String,
    pub incident_id: Option<i64>,
}

impl NewCommunicationLog {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            message: message.into(),
            incident_id: None,
        }
    }

    pub fn about(mut self, incident_id: i64) -> Self {
        self.incident_id = Some(incident_id);
        self
    }

    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            sender: require_text("sender", &self.sender)?,
            recipient: require_text("recipient", &self.recipient)?,
            message: require_text("message", &self.message)?,
            ..self
        })
    }
}
