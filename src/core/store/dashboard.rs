//! Situational overview

use std::collections::HashMap;

use super::{Dashboard, StatusCount, Store};
use crate::core::entity::{DepartmentStatus, IncidentStatus, TaskStatus};
use crate::core::error::Result;
use crate::core::workflow::DomainValue;

impl Store {
    /// Aggregate counts for the dashboard view
    pub fn dashboard(&self) -> Result<Dashboard> {
        let open_incidents: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM incidents WHERE status != ?1",
            [IncidentStatus::Resolved],
            |row| row.get(0),
        )?;
        let (total_staff, present_staff): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(present), 0) FROM staff",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(Dashboard {
            departments_by_status: self.count_by_status::<DepartmentStatus>("departments")?,
            open_incidents,
            tasks_by_status: self.count_by_status::<TaskStatus>("tasks")?,
            present_staff,
            total_staff,
            low_stock: self.low_stock_resources()?,
        })
    }

    /// Count rows per status value, listing every domain value
    fn count_by_status<T: DomainValue>(&self, table: &str) -> Result<Vec<StatusCount>> {
        let sql = format!("SELECT status, COUNT(*) FROM {} GROUP BY status", table);
        let mut stmt = self.conn.prepare(&sql)?;
        let counts = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;

        Ok(T::ALL
            .iter()
            .map(|v| StatusCount {
                status: v.as_str().to_string(),
                count: counts.get(v.as_str()).copied().unwrap_or(0),
            })
            .collect())
    }
}
