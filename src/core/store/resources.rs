//! Resource records

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{map_write_error, ResourceFilter, SqlAssignments, SqlFilter, Store};
use crate::core::entity::Record;
use crate::core::error::{HosconError, Result};
use crate::entities::{NewResource, Resource, ResourceUpdate};

const SELECT_RESOURCE: &str = "SELECT id, name, quantity, unit FROM resources";

/// Quantity below which a resource is reported as low stock
pub const LOW_STOCK_THRESHOLD: i64 = 5;

fn map_resource(row: &rusqlite::Row<'_>) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit: row.get(3)?,
    })
}

impl Store {
    pub fn list_resources(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        let mut sql = SqlFilter::default();
        if let Some(ref search) = filter.search {
            sql.and("name LIKE ?", format!("%{}%", search));
        }
        self.select(SELECT_RESOURCE, sql, "id", map_resource)
    }

    /// Resources whose quantity is under [`LOW_STOCK_THRESHOLD`]
    pub fn low_stock_resources(&self) -> Result<Vec<Resource>> {
        let mut sql = SqlFilter::default();
        sql.and("quantity < ?", LOW_STOCK_THRESHOLD);
        self.select(SELECT_RESOURCE, sql, "quantity, id", map_resource)
    }

    pub fn get_resource(&self, id: i64) -> Result<Resource> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_RESOURCE),
                [id],
                map_resource,
            )
            .optional()?
            .ok_or(HosconError::NotFound {
                entity: Resource::ENTITY,
                id,
            })
    }

    pub fn find_resource_by_name(&self, name: &str) -> Result<Option<Resource>> {
        Ok(self
            .conn
            .query_row(
                &format!("{} WHERE name = ?1", SELECT_RESOURCE),
                [name.trim()],
                map_resource,
            )
            .optional()?)
    }

    /// Register a resource; a taken name fails with `DuplicateKey`
    pub fn create_resource(&self, new: NewResource) -> Result<Resource> {
        let new = new.validate()?;
        self.conn
            .execute(
                "INSERT INTO resources (name, quantity, unit) VALUES (?1, ?2, ?3)",
                params![new.name, new.quantity, new.unit],
            )
            .map_err(|e| map_write_error(e, Resource::ENTITY, &new.name))?;

        let id = self.conn.last_insert_rowid();
        debug!(table = Resource::TABLE, id, name = %new.name, "inserted");

        Ok(Resource {
            id,
            name: new.name,
            quantity: new.quantity,
            unit: new.unit,
        })
    }

    pub fn update_resource(&self, id: i64, update: ResourceUpdate) -> Result<Resource> {
        let update = update.validate()?;
        if update.is_empty() {
            return self.get_resource(id);
        }

        let mut set = SqlAssignments::default();
        if let Some(quantity) = update.quantity {
            set.set("quantity", quantity);
        }
        if let Some(unit) = update.unit {
            set.set("unit", unit);
        }

        let changed = set
            .apply(&self.conn, Resource::TABLE, id)
            .map_err(|e| map_write_error(e, Resource::ENTITY, ""))?;
        if changed == 0 {
            return Err(HosconError::NotFound {
                entity: Resource::ENTITY,
                id,
            });
        }

        self.get_resource(id)
    }
}
