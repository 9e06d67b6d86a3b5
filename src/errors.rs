//! Unified error type for the order desk.
//!
//! Validation errors carry the message shown to the user as-is. Store failures
//! are kept opaque and reported generically by the bot layer.

use thiserror::Error;

/// Every failure the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input rejected locally before the store was contacted
    #[error("{message}")]
    Validation {
        /// User-facing explanation
        message: String,
    },

    /// Any failure reported by the store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No menu item matches the given id or label
    #[error("Menu item not found: {id}")]
    MenuItemNotFound {
        /// The id or label that was looked up
        id: String,
    },

    /// No order with the given id exists
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The missing order id
        id: i64,
    },

    /// Text that is not one of the workflow statuses
    #[error("Unknown order status: {value}")]
    InvalidStatus {
        /// The rejected text
        value: String,
    },

    /// Negative or non-finite price
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Line items could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord client or framework failure
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True when the error was raised locally and its message is meant for the user.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::MenuItemNotFound { .. }
                | Self::OrderNotFound { .. }
                | Self::InvalidStatus { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
