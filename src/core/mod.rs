//! Core module - storage, domain rules and ambient services

pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod logging;
pub mod seed;
pub mod store;
pub mod workflow;

pub use config::Config;
pub use entity::{DepartmentStatus, IncidentStatus, Priority, Record, TaskStatus};
pub use error::{ErrorKind, HosconError, Result};
pub use export::{export_all, read_bundle, ExportBundle};
pub use seed::SeedReport;
pub use store::Store;
pub use workflow::DomainValue;
