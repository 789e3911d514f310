//! Staff entity - personnel with a role, a department and muster presence

use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::error::{require_text, Result};

/// A staff member.
///
/// `department_id` is a soft reference: the department may be missing,
/// in which case joined reads report no department name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub department_id: Option<i64>,

    /// Checked in at the muster point
    pub present: bool,
}

impl Record for Staff {
    const TABLE: &'static str = "staff";
    const ENTITY: &'static str = "Staff";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "role", "department_id", "present"];

    fn id(&self) -> i64 {
        self.id
    }
}

/// Staff row joined with its department name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffWithDepartment {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub department: Option<String>,
    pub present: bool,
}

/// Fields for registering a staff member
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub name: String,
    pub role: String,
    pub department_id: i64,
    pub present: bool,
}

impl NewStaff {
    pub fn new(name: impl Into<String>, role: impl Into<String>, department_id: i64) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            department_id,
            present: false,
        }
    }

    pub fn present(mut self, present: bool) -> Self {
        self.present = present;
        self
    }

    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: require_text("staff name", &self.name)?,
            role: require_text("staff role", &self.role)?,
            ..self
        })
    }
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<i64>,
    pub present: Option<bool>,
}

impl StaffUpdate {
    pub fn presence(present: bool) -> Self {
        Self {
            present: Some(present),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.department_id.is_none()
            && self.present.is_none()
    }

    pub fn validate(self) -> Result<Self> {
        let name = match self.name {
            Some(ref v) => Some(require_text("staff name", v)?),
            None => None,
        };
        let role = match self.role {
            Some(ref v) => Some(require_text("staff role", v)?),
            None => None,
        };
        Ok(Self { name, role, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_staff_requires_role() {
        assert!(NewStaff::new("Alice Smith", " ", 1).validate().is_err());
        let staff = NewStaff::new(" Alice Smith", "Nurse", 1).validate().unwrap();
        assert_eq!(staff.name, "Alice Smith");
        assert!(!staff.present);
    }

    #[test]
    fn test_presence_update() {
        let update = StaffUpdate::presence(true);
        assert!(!update.is_empty());
        assert_eq!(update.present, Some(true));
    }
}
