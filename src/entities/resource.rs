//! Resource entity - a countable supply or equipment item

use serde::{Deserialize, Serialize};

use crate::core::entity::Record;
use crate::core::error::{require_text, HosconError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,

    /// Unique, non-empty name
    pub name: String,

    /// Never negative
    pub quantity: i64,

    pub unit: String,
}

impl Record for Resource {
    const TABLE: &'static str = "resources";
    const ENTITY: &'static str = "Resource";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "quantity", "unit"];

    fn id(&self) -> i64 {
        self.id
    }
}

fn check_quantity(quantity: i64) -> Result<i64> {
    if quantity < 0 {
        return Err(HosconError::validation(
            "quantity",
            format!("must not be negative (got {})", quantity),
        ));
    }
    Ok(quantity)
}

/// Fields for registering a resource
#[derive(Debug, Clone)]
pub struct NewResource {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
}

impl NewResource {
    pub fn new(name: impl Into<String>, quantity: i64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: require_text("resource name", &self.name)?,
            quantity: check_quantity(self.quantity)?,
            unit: require_text("unit", &self.unit)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceUpdate {
    pub quantity: Option<i64>,
    pub unit: Option<String>,
}

impl ResourceUpdate {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            unit: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.unit.is_none()
    }

    pub fn validate(self) -> Result<Self> {
        let quantity = self.quantity.map(check_quantity).transpose()?;
        let unit = match self.unit {
            Some(ref v) => Some(require_text("unit", v)?),
            None => None,
        };
        Ok(Self { quantity, unit })
    }
}
