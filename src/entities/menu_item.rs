//! Menu item entity - Represents one orderable catalog entry.
//!
//! Items are grouped by category (`veg`, `nonVeg`, `water`) and may carry a size
//! label and a temperature variant. The catalog is read-only from the ordering
//! side; rows are created by seeding or by the catalog functions in `core::menu`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Menu section the item belongs to (`veg`, `nonVeg` or `water`)
    pub category: String,
    /// Display name (e.g., "Masala Dosa", "Mineral Water")
    pub name: String,
    /// Optional size label (e.g., "500ml", "Full")
    pub size: Option<String>,
    /// Unit price, never negative
    pub price: f64,
    /// Optional temperature variant (e.g., "hot", "cold")
    pub temperature: Option<String>,
}

impl Model {
    /// Human-readable label used to pick the item from a list.
    ///
    /// Size and temperature are both included so that rows sharing a name stay
    /// distinguishable, e.g. "Coffee (Large) • cold".
    #[must_use]
    pub fn label(&self) -> String {
        match self.temperature.as_deref() {
            Some(temperature) if !temperature.is_empty() => {
                format!("{} • {temperature}", self.base_label())
            }
            _ => self.base_label(),
        }
    }

    /// Name plus size in parentheses when present.
    #[must_use]
    pub fn base_label(&self) -> String {
        match self.size.as_deref() {
            Some(size) if !size.is_empty() => format!("{} ({size})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Menu items have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
