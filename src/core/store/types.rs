//! Query filters and aggregate result types

use serde::Serialize;

use crate::core::entity::{DepartmentStatus, IncidentStatus, Priority, TaskStatus};
use crate::entities::Resource;

/// Filter for listing departments
#[derive(Debug, Clone, Default)]
pub struct DepartmentFilter {
    pub status: Option<DepartmentStatus>,
}

/// Filter for listing staff
#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    pub present: Option<bool>,
    pub department_id: Option<i64>,
}

impl StaffFilter {
    /// Only staff checked in at the muster point
    pub fn present() -> Self {
        Self {
            present: Some(true),
            department_id: None,
        }
    }
}

/// Filter for listing incidents
#[derive(Debug, Clone, Default)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
    pub priority: Option<Priority>,
}

/// Filter for listing tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub incident_id: Option<i64>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<i64>,
}

/// Filter for listing resources
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    /// Substring match on the name
    pub search: Option<String>,
}

/// Filter for listing communication logs
#[derive(Debug, Clone, Default)]
pub struct CommunicationFilter {
    pub incident_id: Option<i64>,
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub departments: i64,
    pub staff: i64,
    pub incidents: i64,
    pub tasks: i64,
    pub resources: i64,
    pub communication_logs: i64,
}

/// Number of records carrying a given status value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Situational overview across all tables
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// One entry per department status, zero counts included
    pub departments_by_status: Vec<StatusCount>,

    /// Incidents not yet resolved
    pub open_incidents: i64,

    /// One entry per task status, zero counts included
    pub tasks_by_status: Vec<StatusCount>,

    pub present_staff: i64,
    pub total_staff: i64,

    /// Resources below [`LOW_STOCK_THRESHOLD`](super::LOW_STOCK_THRESHOLD)
    pub low_stock: Vec<Resource>,
}
