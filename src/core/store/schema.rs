//! Database schema initialization

use super::Store;
use crate::core::error::Result;

/// Every table, in export order
pub const TABLES: [&str; 6] = [
    "departments",
    "staff",
    "incidents",
    "tasks",
    "resources",
    "communication_logs",
];

impl Store {
    /// Create all tables if absent.
    ///
    /// Safe to call any number of times on an existing store: nothing is
    /// dropped, duplicated or rewritten. No foreign keys are declared, so
    /// table creation order does not matter.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0),
                status TEXT NOT NULL DEFAULT 'Green'
                    CHECK (status IN ('Green', 'Yellow', 'Red')),
                notes TEXT
            );

            CREATE TABLE IF NOT EXISTS staff (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                department_id INTEGER,
                present INTEGER NOT NULL DEFAULT 0 CHECK (present IN (0, 1))
            );
            CREATE INDEX IF NOT EXISTS idx_staff_department ON staff(department_id);

            CREATE TABLE IF NOT EXISTS incidents (
                id INTEGER PRIMARY KEY,
                type TEXT NOT NULL,
                description TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                priority TEXT NOT NULL
                    CHECK (priority IN ('Low', 'Medium', 'High', 'Critical')),
                status TEXT NOT NULL DEFAULT 'Open'
                    CHECK (status IN ('Open', 'In Progress', 'Resolved'))
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                incident_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                assigned_to INTEGER,
                status TEXT NOT NULL DEFAULT 'Open'
                    CHECK (status IN ('Open', 'In Progress', 'Completed')),
                timestamp TEXT NOT NULL,
                resource_id INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_tasks_incident ON tasks(incident_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_assigned ON tasks(assigned_to);

            CREATE TABLE IF NOT EXISTS resources (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE CHECK (length(trim(name)) > 0),
                quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
                unit TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS communication_logs (
                id INTEGER PRIMARY KEY,
                timestamp TEXT NOT NULL,
                sender TEXT NOT NULL,
                recipient TEXT NOT NULL,
                message TEXT NOT NULL,
                incident_id INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_comms_incident ON communication_logs(incident_id);
            "#,
        )?;

        Ok(())
    }

    /// Names of the user tables currently present, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
