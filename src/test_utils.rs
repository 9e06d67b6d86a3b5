//! Shared test utilities for the order desk.
//!
//! This module provides common helper functions for setting up test databases
//! and creating menu items and orders with sensible defaults.

use crate::{
    core::{
        cart::Cart,
        feed::OrderFeed,
        menu::{self, MenuCategory, NewMenuItem},
        order::{self, Order, OrderDetails},
        status::OrderStatus,
    },
    entities::menu_item,
    errors::Result,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a [`NewMenuItem`] with no size or temperature.
#[must_use]
pub fn new_item(category: MenuCategory, name: &str, price: f64) -> NewMenuItem {
    NewMenuItem {
        category,
        name: name.to_string(),
        size: None,
        price,
        temperature: None,
    }
}

/// Creates a menu item with custom parameters.
pub async fn create_custom_menu_item(
    db: &DatabaseConnection,
    category: MenuCategory,
    name: &str,
    price: f64,
    temperature: Option<&str>,
) -> Result<menu_item::Model> {
    menu::create_menu_item(
        db,
        NewMenuItem {
            temperature: temperature.map(ToString::to_string),
            ..new_item(category, name, price)
        },
    )
    .await
}

/// Sets up a database with two menu items.
///
/// # Items
/// * `[0]`: "Cold Coffee", veg, 100.0, temperature "cold"
/// * `[1]`: "Mineral Water", water, 50.0, size "1L", no temperature
pub async fn setup_with_menu() -> Result<(DatabaseConnection, Vec<menu_item::Model>)> {
    let db = setup_test_db().await?;
    let coffee =
        create_custom_menu_item(&db, MenuCategory::Veg, "Cold Coffee", 100.0, Some("cold")).await?;
    let water = menu::create_menu_item(
        &db,
        NewMenuItem {
            size: Some("1L".to_string()),
            ..new_item(MenuCategory::Water, "Mineral Water", 50.0)
        },
    )
    .await?;
    Ok((db, vec![coffee, water]))
}

/// Submits a one-line order of `item` (with its own temperature) for `table_number`.
pub async fn submit_test_order(
    db: &DatabaseConnection,
    feed: &OrderFeed,
    item: &menu_item::Model,
    table_number: i32,
) -> Result<Order> {
    let mut cart = Cart::new();
    cart.add_item(item, item.temperature.as_deref());
    order::submit_order(
        db,
        feed,
        &OrderDetails {
            customer_name: "Test Customer".to_string(),
            table_number,
            message: None,
        },
        &cart,
    )
    .await
}

/// A menu item that is never stored.
#[must_use]
pub fn sample_menu_item(id: i64, price: f64, temperature: Option<&str>) -> menu_item::Model {
    menu_item::Model {
        id,
        category: MenuCategory::Veg.as_str().to_string(),
        name: format!("Item {id}"),
        size: None,
        price,
        temperature: temperature.map(ToString::to_string),
    }
}

/// An order that is never stored, with no items.
#[must_use]
pub fn sample_order(id: i64, table_number: i32, status: OrderStatus) -> Order {
    let now = Utc::now();
    Order {
        id,
        customer_name: format!("Customer {id}"),
        table_number,
        items: Vec::new(),
        message: None,
        total_amount: 0.0,
        status,
        created_at: now,
        updated_at: now,
    }
}
