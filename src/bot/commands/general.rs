//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Order Desk Help**\n\
        Browse the menu, build your cart, then send it to the kitchen.\n\n\
        **Ordering**\n\
        • `/menu` - Shows the menu with what's already in your cart.\n\
        • `/add <item> [temperature]` - Adds one of an item to your cart.\n\
        • `/remove <item> [temperature]` - Removes one of an item from your cart.\n\
        • `/cart` - Shows your cart and its total.\n\
        • `/clear` - Empties your cart.\n\
        • `/submit <name> <table> [message]` - Places your order.\n\n\
        **Kitchen Dashboard**\n\
        • `/orders` - Live orders grouped by status.\n\
        • `/tables` - Live orders grouped by table.\n\
        • `/order <id>` - Full details of one order.\n\
        • `/status <id> <status>` - Moves an order to pending, inprogress, slow, delay or complete.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
