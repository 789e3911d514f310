//! Baseline demo data
//!
//! Seeding is idempotent: departments, staff and resources are matched by
//! name and only inserted when missing, and the demo incidents are only
//! loaded into an empty incidents table.

use serde::Serialize;
use tracing::{info, warn};

use crate::core::entity::{DepartmentStatus, IncidentStatus, Priority};
use crate::core::error::Result;
use crate::core::store::{IncidentFilter, Store};
use crate::entities::{NewDepartment, NewIncident, NewResource, NewStaff};

const DEPARTMENTS: [(&str, DepartmentStatus, &str); 4] = [
    ("Emergency Department", DepartmentStatus::Green, "All clear"),
    (
        "Intensive Care Unit (ICU)",
        DepartmentStatus::Green,
        "Normal operations",
    ),
    ("Surgery", DepartmentStatus::Green, "Scheduled procedures"),
    ("Pharmacy", DepartmentStatus::Green, "Well-stocked"),
];

/// (name, role, department name, present)
const STAFF: [(&str, &str, &str, bool); 4] = [
    ("Alice Smith", "Nurse", "Emergency Department", true),
    ("Bob Johnson", "Doctor", "Intensive Care Unit (ICU)", true),
    ("Charlie Brown", "Surgeon", "Surgery", false),
    ("Diana Prince", "Pharmacist", "Pharmacy", true),
];

const INCIDENTS: [(&str, &str, Priority, IncidentStatus); 4] = [
    (
        "Mass Casualty Event",
        "Multiple casualties arriving from highway accident",
        Priority::Critical,
        IncidentStatus::Open,
    ),
    (
        "Power Outage",
        "Hospital lost main power, on backup generator",
        Priority::High,
        IncidentStatus::InProgress,
    ),
    (
        "Supply Shortage",
        "Running low on sterile gloves in Emergency",
        Priority::Medium,
        IncidentStatus::Open,
    ),
    (
        "Staffing Issue",
        "Shortage of nurses in ICU for night shift",
        Priority::High,
        IncidentStatus::Open,
    ),
];

const RESOURCES: [(&str, i64, &str); 4] = [
    ("Ventilator", 10, "units"),
    ("Sterile Gloves", 500, "pairs"),
    ("Blood Bags (O+)", 20, "units"),
    ("Stretchers", 15, "units"),
];

/// Rows inserted by one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub departments: usize,
    pub staff: usize,
    pub incidents: usize,
    pub resources: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.departments + self.staff + self.incidents + self.resources
    }
}

impl Store {
    /// Load the baseline rows that are not already present.
    ///
    /// Runs in one transaction; a second call inserts nothing.
    pub fn seed_if_absent(&mut self) -> Result<SeedReport> {
        let report = self.transaction(|store| {
            let mut report = SeedReport::default();

            for (name, status, notes) in DEPARTMENTS {
                if store.find_department_by_name(name)?.is_none() {
                    store.create_department(NewDepartment::new(name, status).with_notes(notes))?;
                    report.departments += 1;
                }
            }

            for (name, role, department, present) in STAFF {
                if store.find_staff_by_name(name)?.is_some() {
                    continue;
                }
                match store.find_department_by_name(department)? {
                    Some(dept) => {
                        store.create_staff(NewStaff::new(name, role, dept.id).present(present))?;
                        report.staff += 1;
                    }
                    None => warn!(staff = name, department, "department missing, staff not seeded"),
                }
            }

            if store.list_incidents(&IncidentFilter::default())?.is_empty() {
                for (incident_type, description, priority, status) in INCIDENTS {
                    store.create_incident(
                        NewIncident::new(incident_type, description, priority).with_status(status),
                    )?;
                    report.incidents += 1;
                }
            }

            for (name, quantity, unit) in RESOURCES {
                if store.find_resource_by_name(name)?.is_none() {
                    store.create_resource(NewResource::new(name, quantity, unit))?;
                    report.resources += 1;
                }
            }

            Ok(report)
        })?;

        info!(
            departments = report.departments,
            staff = report.staff,
            incidents = report.incidents,
            resources = report.resources,
            "seeded baseline data"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{DepartmentFilter, StaffFilter};
    use crate::entities::DepartmentUpdate;

    #[test]
    fn test_seed_fresh_store() {
        let mut store = Store::open_in_memory().unwrap();
        let report = store.seed_if_absent().unwrap();

        assert_eq!(
            report,
            SeedReport {
                departments: 4,
                staff: 4,
                incidents: 4,
                resources: 4,
            }
        );
        assert_eq!(report.total(), 16);

        let counts = store.table_counts().unwrap();
        assert_eq!(counts.tasks, 0);
        assert_eq!(counts.communication_logs, 0);
    }

    #[test]
    fn test_seed_twice_duplicates_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        store.seed_if_absent().unwrap();
        let before = store.table_counts().unwrap();

        let second = store.seed_if_absent().unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(store.table_counts().unwrap(), before);
    }

    #[test]
    fn test_seed_links_staff_to_departments() {
        let mut store = Store::open_in_memory().unwrap();
        store.seed_if_absent().unwrap();

        let staff = store.list_staff_with_department(&StaffFilter::default()).unwrap();
        let bob = staff.iter().find(|s| s.name == "Bob Johnson").unwrap();
        assert_eq!(bob.department.as_deref(), Some("Intensive Care Unit (ICU)"));

        let present = store.present_staff().unwrap();
        assert_eq!(present.len(), 3);
        assert!(present.iter().all(|s| s.name != "Charlie Brown"));
    }

    #[test]
    fn test_seed_keeps_operator_edits() {
        let mut store = Store::open_in_memory().unwrap();
        store.seed_if_absent().unwrap();

        let surgery = store.find_department_by_name("Surgery").unwrap().unwrap();
        store
            .update_department(
                surgery.id,
                DepartmentUpdate::status(DepartmentStatus::Red, "Theatre 2 flooded"),
            )
            .unwrap();
        store.seed_if_absent().unwrap();

        let departments = store.list_departments(&DepartmentFilter::default()).unwrap();
        assert_eq!(departments.len(), 4);
        let surgery = store.get_department(surgery.id).unwrap();
        assert_eq!(surgery.status, DepartmentStatus::Red);
        assert_eq!(surgery.notes.as_deref(), Some("Theatre 2 flooded"));
    }

    #[test]
    fn test_seed_fills_only_missing_rows() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .create_resource(NewResource::new("Ventilator", 2, "units"))
            .unwrap();
        store
            .create_incident(NewIncident::new("Fire", "Kitchen fire", Priority::Critical))
            .unwrap();

        let report = store.seed_if_absent().unwrap();
        assert_eq!(report.resources, 3);
        assert_eq!(report.incidents, 0);
        assert_eq!(
            store.find_resource_by_name("Ventilator").unwrap().unwrap().quantity,
            2
        );
    }
}
