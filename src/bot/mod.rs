//! Bot layer - Discord-specific interface and command handlers
//!
//! Customers build a cart and submit it through slash commands; the owner reads
//! the live order board and moves orders through the workflow.

/// Discord command implementations (customer, dashboard, general)
pub mod commands;
/// Message formatting shared by the commands
pub mod format;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::{Cart, OrderBoard, OrderFeed},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection, shared with the board watcher
    pub database: Arc<DatabaseConnection>,
    /// Feed that order writes are announced on
    pub feed: OrderFeed,
    /// Live copy of all orders, kept fresh by the feed watcher
    pub board: OrderBoard,
    /// One cart per Discord user, created on first use
    pub carts: RwLock<HashMap<serenity::UserId, Cart>>,
}

impl BotData {
    /// Creates a new `BotData` with no carts.
    #[must_use]
    pub fn new(database: Arc<DatabaseConnection>, feed: OrderFeed, board: OrderBoard) -> Self {
        Self {
            database,
            feed,
            board,
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Copy of a user's cart; empty if they have none yet.
    pub async fn cart(&self, user: serenity::UserId) -> Cart {
        self.carts
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    /// The database connection behind the shared handle.
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Takes a user's cart out, leaving them an empty one.
    ///
    /// Used by submission so that commands arriving while the order is stored
    /// land in a fresh cart instead of being cleared afterwards.
    pub async fn take_cart(&self, user: serenity::UserId) -> Cart {
        self.with_cart(user, std::mem::take).await
    }

    /// Puts a taken cart back after a failed submission, keeping anything added
    /// in the meantime.
    pub async fn restore_cart(&self, user: serenity::UserId, cart: Cart) {
        self.with_cart(user, |current| current.restore(cart)).await;
    }

    /// Runs `f` against a user's cart, creating the cart if needed.
    pub async fn with_cart<T>(&self, user: serenity::UserId, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut carts = self.carts.write().await;
        f(carts.entry(user).or_default())
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {}", ctx.command().name, error);
            let reply = if error.is_user_facing() {
                format!("❌ {error}")
            } else {
                "❌ Something went wrong. Please try again.".to_string()
            };
            if let Err(e) = ctx.say(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Registers every command and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered {} commands globally.", framework.options().commands.len());
                Ok(data)
            })
        })
        .build();

    info!("Setting up Serenity client...");
    let mut client =
        serenity::ClientBuilder::new(&token, serenity::GatewayIntents::non_privileged())
            .framework(framework)
            .await
            .inspect_err(|e| error!("Error creating client: {}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {}", e))?;
    Ok(())
}
