//! HOSCON: hospital situational awareness console
//!
//! Tracks department status, staff muster, incidents and their tasks,
//! supplies and a communication log in a single local SQLite database.
//! The [`core::Store`] is the only path to the data; the CLI is a thin
//! presentation layer over it.

pub mod cli;
pub mod core;
pub mod entities;
