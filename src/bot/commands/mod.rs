//! Discord command implementations organized by audience.

#![allow(clippy::too_long_first_doc_paragraph)]

use crate::{bot::BotData, errors::Error};

/// Customer commands: menu, cart and submission
pub mod customer;

/// Owner dashboard commands: live orders and status changes
pub mod dashboard;

/// General utility commands
pub mod general;

// Export commands
pub use customer::*;
pub use dashboard::*;
pub use general::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        menu(),
        add(),
        remove(),
        cart(),
        clear(),
        submit(),
        orders(),
        tables(),
        order(),
        status(),
        ping(),
        help(),
    ]
}
