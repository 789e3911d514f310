//! Snapshot export of every table to CSV files and one JSON bundle
//!
//! The artifact names are fixed, so exporting twice into the same
//! directory overwrites the previous snapshot.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::core::store::{
    CommunicationFilter, DepartmentFilter, IncidentFilter, ResourceFilter, StaffFilter, Store,
    TaskFilter,
};
use crate::entities::{CommunicationLog, Department, Incident, Resource, Staff, Task};

/// File name of the JSON bundle
pub const BUNDLE_FILE: &str = "bundle.json";

/// Every table's records, keyed by table name when serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub departments: Vec<Department>,
    pub staff: Vec<Staff>,
    pub incidents: Vec<Incident>,
    pub tasks: Vec<Task>,
    pub resources: Vec<Resource>,
    pub communication_logs: Vec<CommunicationLog>,
}

impl ExportBundle {
    /// Read every table from the store
    pub fn collect(store: &Store) -> Result<Self> {
        Ok(Self {
            departments: store.list_departments(&DepartmentFilter::default())?,
            staff: store.list_staff(&StaffFilter::default())?,
            incidents: store.list_incidents(&IncidentFilter::default())?,
            tasks: store.list_tasks(&TaskFilter::default())?,
            resources: store.list_resources(&ResourceFilter::default())?,
            communication_logs: store.list_communication_logs(&CommunicationFilter::default())?,
        })
    }
}

/// Write one CSV per table plus `bundle.json` into `dir`.
///
/// The directory is created if needed. Returns the artifact file names in
/// the order they were written.
pub fn export_all(store: &Store, dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(dir).map_err(|e| HosconError::io(dir, e))?;

    let bundle = ExportBundle::collect(store)?;
    let mut written = vec![
        write_csv(dir, &bundle.departments)?,
        write_csv(dir, &bundle.staff)?,
        write_csv(dir, &bundle.incidents)?,
        write_csv(dir, &bundle.tasks)?,
        write_csv(dir, &bundle.resources)?,
        write_csv(dir, &bundle.communication_logs)?,
    ];

    let path = dir.join(BUNDLE_FILE);
    let file = File::create(&path).map_err(|e| HosconError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &bundle)?;
    writer.flush().map_err(|e| HosconError::io(&path, e))?;
    written.push(BUNDLE_FILE.to_string());

    info!(dir = %dir.display(), files = written.len(), "exported snapshot");
    Ok(written)
}

/// Load a previously exported bundle
pub fn read_bundle(dir: &Path) -> Result<ExportBundle> {
    let path = dir.join(BUNDLE_FILE);
    let file = File::open(&path).map_err(|e| HosconError::io(&path, e))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write `<table>.csv`; the header row is written even when there are no rows
fn write_csv<T: Record>(dir: &Path, rows: &[T]) -> Result<String> {
    let name = format!("{}.csv", T::TABLE);
    let path = dir.join(&name);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)?;
    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| HosconError::io(&path, e))?;

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{DepartmentStatus, Priority};
    use crate::core::error::ErrorKind;
    use crate::entities::{InitialTask, NewDepartment, NewIncident, NewStaff};
    use tempfile::TempDir;

    fn artifact_names() -> Vec<&'static str> {
        vec![
            "departments.csv",
            "staff.csv",
            "incidents.csv",
            "tasks.csv",
            "resources.csv",
            "communication_logs.csv",
            "bundle.json",
        ]
    }

    #[test]
    fn test_export_empty_store_writes_headers() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open_in_memory().unwrap();

        let written = export_all(&store, tmp.path()).unwrap();
        assert_eq!(written, artifact_names());

        let staff = fs::read_to_string(tmp.path().join("staff.csv")).unwrap();
        assert_eq!(staff.trim_end(), "id,name,role,department_id,present");

        let bundle = read_bundle(tmp.path()).unwrap();
        assert_eq!(bundle, ExportBundle::default());
    }

    #[test]
    fn test_export_matches_live_tables() {
        let tmp = TempDir::new().unwrap();
        let mut store = Store::open_in_memory().unwrap();
        store.seed_if_absent().unwrap();
        store
            .log_incident_with_task(
                NewIncident::new("Fire", "Kitchen fire", Priority::Critical),
                InitialTask::new("Evacuate").assigned_to(1),
            )
            .unwrap();

        export_all(&store, tmp.path()).unwrap();

        let bundle = read_bundle(tmp.path()).unwrap();
        assert_eq!(bundle, ExportBundle::collect(&store).unwrap());
        assert_eq!(bundle.incidents.len(), 5);
        assert_eq!(bundle.tasks.len(), 1);

        let mut reader = csv::Reader::from_path(tmp.path().join("incidents.csv")).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["id", "type", "description", "timestamp", "priority", "status"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[1][5], "In Progress");
    }

    #[test]
    fn test_bundle_json_shape() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open_in_memory().unwrap();
        store
            .create_department(NewDepartment::new("ICU", DepartmentStatus::Yellow))
            .unwrap();
        store
            .create_staff(NewStaff::new("Alice Smith", "Nurse", 1).present(true))
            .unwrap();

        export_all(&store, tmp.path()).unwrap();

        let text = fs::read_to_string(tmp.path().join(BUNDLE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["departments"][0]["status"], "Yellow");
        assert!(value["departments"][0]["notes"].is_null());
        assert_eq!(value["staff"][0]["present"], true);
        assert_eq!(value["staff"][0]["department_id"], 1);
        assert!(value["tasks"].as_array().unwrap().is_empty());

        let staff_csv = fs::read_to_string(tmp.path().join("staff.csv")).unwrap();
        assert!(staff_csv.contains("1,Alice Smith,Nurse,1,true"));
    }

    #[test]
    fn test_export_overwrites_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open_in_memory().unwrap();
        store
            .create_department(NewDepartment::new("ICU", DepartmentStatus::Green))
            .unwrap();
        export_all(&store, tmp.path()).unwrap();

        store
            .create_department(NewDepartment::new("Surgery", DepartmentStatus::Green))
            .unwrap();
        export_all(&store, tmp.path()).unwrap();

        let bundle = read_bundle(tmp.path()).unwrap();
        assert_eq!(bundle.departments.len(), 2);
        let csv_text = fs::read_to_string(tmp.path().join("departments.csv")).unwrap();
        assert_eq!(csv_text.lines().count(), 3);
    }

    #[test]
    fn test_export_into_file_path_fails_with_io() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let store = Store::open_in_memory().unwrap();

        let err = export_all(&store, &blocker).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_read_missing_bundle_fails_with_io() {
        let tmp = TempDir::new().unwrap();
        let err = read_bundle(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
