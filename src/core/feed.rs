//! Live order feed and the dashboard board it keeps fresh.
//!
//! Writers publish an [`OrderChange`] after each successful store write. The
//! [`OrderBoard`] treats every change as a trigger to re-fetch the full order list
//! rather than patching its copy; a later fetch simply replaces an earlier one.

use crate::{
    core::order::{self, Order},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

/// Default number of changes buffered per subscriber before it lags.
pub const DEFAULT_FEED_CAPACITY: usize = 64;

/// What happened to an order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A new order was submitted
    Insert,
    /// An order's status changed
    Update,
    /// An order was removed
    Delete,
}

/// Notification that an order row changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderChange {
    /// Kind of change
    pub kind: ChangeKind,
    /// Affected order
    pub order_id: i64,
}

/// Broadcast channel carrying [`OrderChange`]s. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OrderFeed {
    sender: broadcast::Sender<OrderChange>,
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}

impl OrderFeed {
    /// Creates a feed buffering up to `capacity` changes per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Announces a change to every current subscriber.
    pub fn publish(&self, kind: ChangeKind, order_id: i64) {
        let change = OrderChange { kind, order_id };
        match self.sender.send(change) {
            Ok(receivers) => trace!("Published {:?} to {} subscribers", change, receivers),
            Err(_) => trace!("Published {:?} with no subscribers", change),
        }
    }

    /// Subscribes to changes published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderChange> {
        self.sender.subscribe()
    }
}

/// The owner dashboard's copy of all orders, newest first.
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-fetches every order and replaces the board's contents.
    ///
    /// On failure the previous contents are kept.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn refresh(&self, db: &DatabaseConnection) -> Result<usize> {
        let orders = order::get_all_orders(db).await.inspect_err(|e| {
            error!("Failed to fetch orders for the board: {}", e);
        })?;

        let mut board = self.orders.write().await;
        *board = orders;
        debug!("Order board refreshed with {} orders.", board.len());
        Ok(board.len())
    }

    /// Copy of the current orders.
    pub async fn snapshot(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    /// Waits for the next change on `changes` and re-fetches.
    ///
    /// Returns `false` once the feed has closed. A lagged receiver also triggers a
    /// re-fetch, since the missed changes are covered by reading everything. Fetch
    /// failures are logged and leave the board as it was.
    pub async fn handle_next_change(
        &self,
        db: &DatabaseConnection,
        changes: &mut broadcast::Receiver<OrderChange>,
    ) -> bool {
        match changes.recv().await {
            Ok(change) => debug!("Order change received: {:?}", change),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Order board lagged by {} changes, re-fetching", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => return false,
        }

        // Errors are already logged by refresh; the board keeps its previous list
        let _ = self.refresh(db).await;
        true
    }

    /// Spawns a task that keeps the board in sync with `feed` until the feed closes.
    ///
    /// The board is filled once before listening starts.
    pub fn watch(&self, db: Arc<DatabaseConnection>, feed: &OrderFeed) -> JoinHandle<()> {
        let board = self.clone();
        let mut changes = feed.subscribe();
        tokio::spawn(async move {
            let _ = board.refresh(&db).await;
            info!("Order board listening for changes.");
            while board.handle_next_change(&db, &mut changes).await {}
            info!("Order feed closed, board stopped listening.");
        })
    }
}
