//! Entity type definitions
//!
//! HOSCON tracks six record types, one table each:
//!
//! - [`Department`] - organizational units with a Green/Yellow/Red status
//! - [`Staff`] - personnel, their role, department and muster presence
//! - [`Incident`] - logged situational events with priority and status
//! - [`Task`] - work items derived from incidents, optionally assigned
//! - [`Resource`] - countable supplies and equipment
//! - [`CommunicationLog`] - messages exchanged about an incident
//!
//! Each module also holds the `New*` payload used for creation and the
//! `*Update` payload used for partial updates.

pub mod communication;
pub mod department;
pub mod incident;
pub mod resource;
pub mod staff;
pub mod task;

pub use communication::{CommunicationLog, NewCommunicationLog};
pub use department::{Department, DepartmentUpdate, NewDepartment};
pub use incident::{Incident, IncidentUpdate, NewIncident};
pub use resource::{NewResource, Resource, ResourceUpdate};
pub use staff::{NewStaff, Staff, StaffUpdate, StaffWithDepartment};
pub use task::{
    InitialTask, NewTask, Task, TaskUpdate, TaskWithAssignee, DEFAULT_INITIAL_TASK_TITLE,
};
