//! Core business logic - framework-agnostic catalog, cart, order workflow and
//! dashboard views. Nothing in here knows about Discord.

pub mod cart;
pub mod feed;
pub mod menu;
pub mod order;
pub mod status;
pub mod view;

pub use cart::{Cart, CartLine};
pub use feed::{ChangeKind, OrderBoard, OrderChange, OrderFeed};
pub use order::{Order, OrderDetails, TABLE_NUMBERS};
pub use status::{OrderStatus, StatusBucket};
