//! Incident entity - a logged situational event requiring response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{IncidentStatus, Priority, Record};
use crate::core::error::{require_text, Result};
use crate::core::workflow::timestamp;

/// A logged incident.
///
/// `timestamp` is the creation instant and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,

    #[serde(rename = "type")]
    pub incident_type: String,

    pub description: String,

    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    pub priority: Priority,
    pub status: IncidentStatus,
}

impl Record for Incident {
    const TABLE: &'static str = "incidents";
    const ENTITY: &'static str = "Incident";
    const COLUMNS: &'static [&'static str] =
        &["id", "type", "description", "timestamp", "priority", "status"];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fields for logging an incident
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub incident_type: String,
    pub description: String,
    pub priority: Priority,
    pub status: IncidentStatus,
}

impl NewIncident {
    /// A new incident in the default `Open` status
    pub fn new(
        incident_type: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            incident_type: incident_type.into(),
            description: description.into(),
            priority,
            status: IncidentStatus::default(),
        }
    }

    pub fn with_status(mut self, status: IncidentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            incident_type: require_text("incident type", &self.incident_type)?,
            description: require_text("incident description", &self.description)?,
            ..self
        })
    }
}

/// Partial update of incident details; the timestamp is never touched
#[derive(Debug, Clone, Default)]
pub struct IncidentUpdate {
    pub incident_type: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<IncidentStatus>,
}

impl IncidentUpdate {
    pub fn status(status: IncidentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incident_type.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    pub fn validate(self) -> Result<Self> {
        let incident_type = match self.incident_type {
            Some(ref v) => Some(require_text("incident type", v)?),
            None => None,
        };
        let description = match self.description {
            Some(ref v) => Some(require_text("incident description", v)?),
            None => None,
        };
        Ok(Self {
            incident_type,
            description,
            ..self
        })
    }
}
