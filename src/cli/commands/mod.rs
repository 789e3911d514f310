//! CLI command implementations

pub mod comms;
pub mod completions;
pub mod dept;
pub mod export;
pub mod incident;
pub mod init;
pub mod resource;
pub mod seed;
pub mod staff;
pub mod status;
pub mod task;
