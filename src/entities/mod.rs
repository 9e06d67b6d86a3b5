//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer_order;
pub mod menu_item;

// Re-export specific types to avoid conflicts
pub use customer_order::{
    Column as CustomerOrderColumn, Entity as CustomerOrder, Model as CustomerOrderModel,
};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
