//! Department entity - an organizational unit with a traffic-light status

use serde::{Deserialize, Serialize};

use crate::core::entity::{DepartmentStatus, Record};
use crate::core::error::{require_text, Result};

/// A hospital department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,

    /// Unique, non-empty name
    pub name: String,

    pub status: DepartmentStatus,

    /// Free-text operator notes
    pub notes: Option<String>,
}

impl Record for Department {
    const TABLE: &'static str = "departments";
    const ENTITY: &'static str = "Department";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "status", "notes"];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Fields for registering a department
#[derive(Debug, Clone, Default)]
pub struct NewDepartment {
    pub name: String,
    pub status: DepartmentStatus,
    pub notes: Option<String>,
}

impl NewDepartment {
    pub fn new(name: impl Into<String>, status: DepartmentStatus) -> Self {
        Self {
            name: name.into(),
            status,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check required fields, returning the normalized payload
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: require_text("department name", &self.name)?,
            ..self
        })
    }
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub status: Option<DepartmentStatus>,
    pub notes: Option<String>,
}

impl DepartmentUpdate {
    /// Status and notes together, the common dashboard edit
    pub fn status(status: DepartmentStatus, notes: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            notes: Some(notes.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.notes.is_none()
    }

    pub fn validate(self) -> Result<Self> {
        let name = match self.name {
            Some(ref name) => Some(require_text("department name", name)?),
            None => None,
        };
        Ok(Self { name, ..self })
    }
}
