//! Task entity - a unit of work derived from an incident

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Record, TaskStatus};
use crate::core::error::{require_text, Result};
use crate::core::workflow::timestamp;

/// Title given to the task created alongside a freshly logged incident
pub const DEFAULT_INITIAL_TASK_TITLE: &str = "Initial Response";

/// A task.
///
/// `timestamp` is the last-mutation instant: it is restamped whenever the
/// status is written. `resource_id` is carried by the schema but no flow
/// writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub incident_id: i64,
    pub title: String,
    pub assigned_to: Option<i64>,
    pub status: TaskStatus,

    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    pub resource_id: Option<i64>,
}

impl Record for Task {
    const TABLE: &'static str = "tasks";
    const ENTITY: &'static str = "Task";
    const COLUMNS: &'static [&'static str] =
        &["id", "incident_id", "title", "assigned_to", "status", "timestamp", "resource_id"];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Task joined with the assignee's name (absent when unassigned or dangling)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskWithAssignee {
    #[serde(flatten)]
    pub task: Task,
    pub assigned_staff: Option<String>,
}

/// Fields for creating a task against an existing incident
#[derive(Debug, Clone)]
pub struct NewTask {
    pub incident_id: i64,
    pub title: String,
    pub assigned_to: Option<i64>,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(incident_id: i64, title: impl Into<String>) -> Self {
        Self {
            incident_id,
            title: title.into(),
            assigned_to: None,
            status: TaskStatus::default(),
        }
    }

    pub fn assigned_to(mut self, staff_id: i64) -> Self {
        self.assigned_to = Some(staff_id);
        self
    }

    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            title: require_text("task title", &self.title)?,
            ..self
        })
    }
}

/// The first task of a compound incident+task log; the incident id is
/// filled in once the incident row exists
#[derive(Debug, Clone)]
pub struct InitialTask {
    pub title: String,
    pub assigned_to: Option<i64>,
}

impl InitialTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            assigned_to: None,
        }
    }

    pub fn assigned_to(mut self, staff_id: i64) -> Self {
        self.assigned_to = Some(staff_id);
        self
    }

    pub fn for_incident(self, incident_id: i64) -> NewTask {
        NewTask {
            incident_id,
            title: self.title,
            assigned_to: self.assigned_to,
            status: TaskStatus::Open,
        }
    }
}

impl Default for InitialTask {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_TASK_TITLE)
    }
}

/// Partial update of a task.
///
/// `assigned_to: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub assigned_to: Option<Option<i64>>,
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.assigned_to.is_none() && self.status.is_none()
    }

    pub fn validate(self) -> Result<Self> {
        let title = match self.title {
            Some(ref v) => Some(require_text("task title", v)?),
            None => None,
        };
        Ok(Self { title, ..self })
    }
}
