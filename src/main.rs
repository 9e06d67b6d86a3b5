use dotenvy::dotenv;
use order_desk::{
    bot::{self, BotData},
    config::{database, menu as menu_config},
    core::{OrderBoard, OrderFeed, menu},
    errors::{Error, Result},
};
use std::env;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Env vars may also be set externally
    dotenv().ok();

    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;

    let config = menu_config::load_default_config()
        .inspect_err(|e| error!("Failed to load menu configuration: {}", e))?;
    let seeded = menu::seed_menu(&db, &config).await?;
    if seeded > 0 {
        info!("Seeded {} menu items.", seeded);
    }

    let db = Arc::new(db);
    let feed = OrderFeed::default();
    let board = OrderBoard::new();
    let _watcher = board.watch(Arc::clone(&db), &feed);

    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, feed, board)).await
}
