//! Record trait and the enumerated domain values shared by entity types

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::error::HosconError;
use crate::core::workflow::{parse_domain, DomainValue};

/// Common trait for all persisted record types
pub trait Record: Serialize + DeserializeOwned {
    /// Table the record lives in
    const TABLE: &'static str;

    /// Human-readable entity name used in messages
    const ENTITY: &'static str;

    /// Column names, in field order
    const COLUMNS: &'static [&'static str];

    /// System-assigned row id
    fn id(&self) -> i64;
}

/// Traffic-light operational status of a department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DepartmentStatus {
    #[default]
    Green,
    Yellow,
    Red,
}

impl DomainValue for DepartmentStatus {
    const FIELD: &'static str = "department status";
    const ALL: &'static [Self] = &[Self::Green, Self::Yellow, Self::Red];

    fn as_str(&self) -> &'static str {
        match self {
            DepartmentStatus::Green => "Green",
            DepartmentStatus::Yellow => "Yellow",
            DepartmentStatus::Red => "Red",
        }
    }
}

/// Incident priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl DomainValue for Priority {
    const FIELD: &'static str = "priority";
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

/// Incident lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IncidentStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl DomainValue for IncidentStatus {
    const FIELD: &'static str = "incident status";
    const ALL: &'static [Self] = &[Self::Open, Self::InProgress, Self::Resolved];

    fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "Open",
            IncidentStatus::InProgress => "In Progress",
            IncidentStatus::Resolved => "Resolved",
        }
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl DomainValue for TaskStatus {
    const FIELD: &'static str = "task status";
    const ALL: &'static [Self] = &[Self::Open, Self::InProgress, Self::Completed];

    fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

/// Display, parsing and SQLite conversions for a [`DomainValue`] enum.
/// Stored values use the display spelling; anything else is rejected.
macro_rules! domain_value_impls {
    ($($ty:ty),+ $(,)?) => {$(
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = HosconError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_domain(s)
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let text = value.as_str()?;
                <$ty as DomainValue>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == text)
                    .ok_or_else(|| {
                        FromSqlError::Other(Box::new(HosconError::validation(
                            <$ty as DomainValue>::FIELD,
                            format!("stored value '{}' is out of domain", text),
                        )))
                    })
            }
        }
    )+};
}

domain_value_impls!(DepartmentStatus, Priority, IncidentStatus, TaskStatus);
