//! Customer order entity - Represents a submitted order for a table.
//!
//! Orders are written once by the customer-facing submission and afterwards only
//! their `status` and `updated_at` columns change. The `items` column holds the
//! line-item snapshot as JSON; older rows may hold that JSON as an encoded string.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name the customer gave when ordering
    pub customer_name: String,
    /// Table the order is served to (1 through 10)
    pub table_number: i32,
    /// Line-item snapshot taken at submission
    pub items: Json,
    /// Optional free-text instructions from the customer
    pub message: Option<String>,
    /// Total computed at submission; never recomputed
    pub total_amount: f64,
    /// Workflow status: `"pending"`, `"inprogress"`, `"slow"`, `"delay"` or `"complete"`
    pub status: String,
    /// When the order was submitted
    pub created_at: DateTimeUtc,
    /// When the status last changed
    pub updated_at: DateTimeUtc,
}

/// `CustomerOrder` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
