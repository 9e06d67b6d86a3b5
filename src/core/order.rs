//! Order business logic - submission, reads and status updates.
//!
//! Submission validates the customer's details and cart locally before anything is
//! written. Once stored, an order only ever changes status. Every successful write
//! is announced on the [`OrderFeed`] so dashboards can re-fetch.

use crate::{
    core::{
        cart::{Cart, CartLine},
        feed::{ChangeKind, OrderFeed},
        status::OrderStatus,
        view::StoredItems,
    },
    entities::{CustomerOrder, customer_order},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument, warn};

/// Tables a customer can order for.
pub const TABLE_NUMBERS: RangeInclusive<i32> = 1..=10;

/// A submitted order with its item list decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Unique identifier
    pub id: i64,
    /// Customer name given at submission
    pub customer_name: String,
    /// Table the order is served to
    pub table_number: i32,
    /// Line items as submitted; empty when the stored list is unreadable
    pub items: Vec<CartLine>,
    /// Optional customer instructions
    pub message: Option<String>,
    /// Total computed at submission
    pub total_amount: f64,
    /// Current workflow status
    pub status: OrderStatus,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Last status change
    pub updated_at: DateTime<Utc>,
}

impl From<customer_order::Model> for Order {
    fn from(model: customer_order::Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|_| {
            warn!(
                "Order {} has unknown status '{}', treating it as pending",
                model.id, model.status
            );
            OrderStatus::Pending
        });

        Self {
            id: model.id,
            customer_name: model.customer_name,
            table_number: model.table_number,
            items: StoredItems::from(model.items).parse(),
            message: model.message,
            total_amount: model.total_amount,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Customer details collected alongside the cart.
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    /// Name to call out when serving
    pub customer_name: String,
    /// Table number, 1 through 10
    pub table_number: i32,
    /// Optional special instructions
    pub message: Option<String>,
}

impl OrderDetails {
    /// Checks the details and cart before anything is sent to the store.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the name is blank, the table number is
    /// outside [`TABLE_NUMBERS`], or the cart is empty.
    pub fn validate(&self, cart: &Cart) -> Result<()> {
        if self.customer_name.trim().is_empty() {
            return Err(Error::validation("Please enter your name before ordering."));
        }
        if !TABLE_NUMBERS.contains(&self.table_number) {
            return Err(Error::validation(format!(
                "Please pick a table between {} and {}.",
                TABLE_NUMBERS.start(),
                TABLE_NUMBERS.end()
            )));
        }
        if cart.is_empty() {
            return Err(Error::validation("Please add items to your order."));
        }
        Ok(())
    }
}

/// Stores the cart as a new `pending` order and announces it on the feed.
///
/// The total is taken from the cart at this moment and stored alongside the item
/// snapshot. The cart itself is not touched; callers reset it once this returns
/// `Ok`.
///
/// # Errors
/// Returns [`Error::Validation`] for bad details or an empty cart (nothing is
/// written), or an error if the items cannot be encoded or the insert fails.
#[instrument(skip(db, feed, cart), fields(lines = cart.lines().len()))]
pub async fn submit_order(
    db: &DatabaseConnection,
    feed: &OrderFeed,
    details: &OrderDetails,
    cart: &Cart,
) -> Result<Order> {
    details.validate(cart)?;

    let now = Utc::now();
    let message = details
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToString::to_string);

    let order = customer_order::ActiveModel {
        customer_name: Set(details.customer_name.trim().to_string()),
        table_number: Set(details.table_number),
        items: Set(serde_json::to_value(cart.lines())?),
        message: Set(message),
        total_amount: Set(cart.total()),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let stored = order.insert(db).await?;
    info!(
        "Order {} submitted for table {} by '{}' totalling {}",
        stored.id, stored.table_number, stored.customer_name, stored.total_amount
    );
    feed.publish(ChangeKind::Insert, stored.id);

    Ok(stored.into())
}

/// Retrieves every order, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<Order>> {
    let models = CustomerOrder::find()
        .order_by_desc(customer_order::Column::CreatedAt)
        .order_by_desc(customer_order::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} orders.", models.len());
    Ok(models.into_iter().map(Order::from).collect())
}

/// Retrieves one order by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_id(db: &DatabaseConnection, order_id: i64) -> Result<Option<Order>> {
    Ok(CustomerOrder::find_by_id(order_id)
        .one(db)
        .await?
        .map(Order::from))
}

/// Moves an order to `new_status` and stamps `updated_at`.
///
/// Any status may follow any other, including itself. The update is announced on
/// the feed once stored.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] when no order has `order_id`, or an error if the
/// database update fails (the stored order is then unchanged).
#[instrument(skip(db, feed))]
pub async fn set_status(
    db: &DatabaseConnection,
    feed: &OrderFeed,
    order_id: i64,
    new_status: OrderStatus,
) -> Result<Order> {
    let mut order: customer_order::ActiveModel = CustomerOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?
        .into();

    order.status = Set(new_status.as_str().to_string());
    order.updated_at = Set(Utc::now());

    let updated = order.update(db).await?;
    info!("Order {} status set to {}", order_id, new_status);
    feed.publish(ChangeKind::Update, order_id);

    Ok(updated.into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::menu::MenuCategory;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn details(name: &str, table: i32) -> OrderDetails {
        OrderDetails {
            customer_name: name.to_string(),
            table_number: table,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_submit_order_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let feed = OrderFeed::default();
        let mut cart = Cart::new();
        cart.add_item(&sample_menu_item(1, 50.0, None), None);

        let result = submit_order(&db, &feed, &details("   ", 1), &cart).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = submit_order(&db, &feed, &details("Asha", 0), &cart).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = submit_order(&db, &feed, &details("Asha", 11), &cart).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = submit_order(&db, &feed, &details("Asha", 4), &Cart::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_order_stores_snapshot_and_total() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let mut rx = feed.subscribe();

        let mut cart = Cart::new();
        cart.add_item(&menu[0], Some("cold"));
        cart.add_item(&menu[0], Some("cold"));
        cart.add_item(&menu[1], None);

        let order = submit_order(
            &db,
            &feed,
            &OrderDetails {
                customer_name: "  Ravi ".to_string(),
                table_number: 3,
                message: Some("No onions".to_string()),
            },
            &cart,
        )
        .await?;

        assert_eq!(order.customer_name, "Ravi");
        assert_eq!(order.table_number, 3);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, cart.total());
        assert_eq!(order.items, cart.lines());
        assert_eq!(order.message.as_deref(), Some("No onions"));
        assert_eq!(order.created_at, order.updated_at);

        let change = rx.try_recv().unwrap();
        assert_eq!(change.kind, ChangeKind::Insert);
        assert_eq!(change.order_id, order.id);

        let stored = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stored.items.len(), 2);
        assert_eq!(stored.items[0].quantity, 2);
        assert_eq!(stored.total_amount, 2.0 * menu[0].price + menu[1].price);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_message_is_stored_as_absent() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let mut cart = Cart::new();
        cart.add_item(&menu[1], None);

        let order = submit_order(
            &db,
            &feed,
            &OrderDetails {
                message: Some("  ".to_string()),
                ..details("Meera", 2)
            },
            &cart,
        )
        .await?;
        assert!(order.message.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_orders_newest_first() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();

        let first = submit_test_order(&db, &feed, &menu[0], 1).await?;
        let second = submit_test_order(&db, &feed, &menu[1], 2).await?;
        let third = submit_test_order(&db, &feed, &menu[0], 3).await?;

        let ids: Vec<i64> = get_all_orders(&db).await?.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_any_to_any() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let order = submit_test_order(&db, &feed, &menu[0], 5).await?;

        for current in OrderStatus::ALL {
            for next in OrderStatus::ALL {
                set_status(&db, &feed, order.id, current).await?;
                let updated = set_status(&db, &feed, order.id, next).await?;
                assert_eq!(updated.status, next);
            }
        }

        let stored = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stored.status, OrderStatus::Complete);
        assert!(stored.updated_at >= stored.created_at);
        // Only status and timestamp change
        assert_eq!(stored.total_amount, order.total_amount);
        assert_eq!(stored.items, order.items);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_publishes_update() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let order = submit_test_order(&db, &feed, &menu[0], 5).await?;

        let mut rx = feed.subscribe();
        set_status(&db, &feed, order.id, OrderStatus::Slow).await?;

        let change = rx.try_recv().unwrap();
        assert_eq!(change.kind, ChangeKind::Update);
        assert_eq!(change.order_id, order.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_stamps_updated_at() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let order = submit_test_order(&db, &feed, &menu[0], 8).await?;

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let updated = set_status(&db, &feed, order.id, OrderStatus::Delay).await?;

        assert!(updated.updated_at > order.updated_at);
        assert_eq!(updated.created_at, order.created_at);

        let stored = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stored.updated_at, updated.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_status_update_publishes_nothing() -> Result<()> {
        let now = Utc::now();
        let row = customer_order::Model {
            id: 7,
            customer_name: "Asha".to_string(),
            table_number: 2,
            items: json!([]),
            message: None,
            total_amount: 50.0,
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        // The lookup succeeds, the write fails whichever way the backend issues it
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![row]])
            .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
            .append_exec_errors([DbErr::Custom("disk I/O error".to_string())])
            .into_connection();
        let feed = OrderFeed::default();
        let mut rx = feed.subscribe();

        let result = set_status(&db, &feed, 7, OrderStatus::Complete).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_status_update_keeps_stored_order() -> Result<()> {
        let (db, menu) = setup_with_menu().await?;
        let feed = OrderFeed::default();
        let order = submit_test_order(&db, &feed, &menu[0], 6).await?;
        let mut rx = feed.subscribe();

        db.execute_unprepared(
            "CREATE TRIGGER reject_updates BEFORE UPDATE ON customer_orders \
             BEGIN SELECT RAISE(ABORT, 'updates disabled'); END",
        )
        .await?;

        let result = set_status(&db, &feed, order.id, OrderStatus::Complete).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));
        assert!(rx.try_recv().is_err());

        let stored = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert_eq!(stored.updated_at, order.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_missing_order() -> Result<()> {
        let db = setup_test_db().await?;
        let feed = OrderFeed::default();
        let mut rx = feed.subscribe();

        let result = set_status(&db, &feed, 404, OrderStatus::Complete).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 404 }));
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_rows_degrade_gracefully() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();
        let row = customer_order::ActiveModel {
            customer_name: Set("Legacy".to_string()),
            table_number: Set(7),
            items: Set(json!("{broken")),
            message: Set(None),
            total_amount: Set(120.0),
            status: Set("archived".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let order = get_order_by_id(&db, row.id).await?.unwrap();
        assert!(order.items.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 120.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_text_encoded_items_are_read() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();
        let encoded = json!([{"id": 9, "category": MenuCategory::Water.as_str(), "name": "Water", "price": 20.0, "quantity": 2}]).to_string();
        let row = customer_order::ActiveModel {
            customer_name: Set("Text".to_string()),
            table_number: Set(1),
            items: Set(Json::String(encoded)),
            message: Set(None),
            total_amount: Set(40.0),
            status: Set("delay".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let order = get_order_by_id(&db, row.id).await?.unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.status, OrderStatus::Delay);
        Ok(())
    }
}
