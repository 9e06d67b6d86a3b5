//! Customer Discord commands - browsing the menu, editing the cart and submitting.
//!
//! Each Discord user has their own cart held in [`BotData`](crate::bot::BotData).
//! Nothing reaches the store until `/submit`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            format::{DESCRIPTION_LIMIT, format_amount, format_line, join_within, join_within_limit},
            handlers::autocomplete,
        },
        core::{
            Cart, OrderDetails,
            menu::{self, MenuCategory, MenuSections},
            order,
        },
        entities::MenuItemModel,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{error, info};

    /// The cart variant for a resolved item: the row's own temperature when it
    /// has one, otherwise whatever the customer asked for. Always lowercase.
    fn chosen_variant(item: &MenuItemModel, temperature: Option<&str>) -> Option<String> {
        item.temperature
            .as_deref()
            .or(temperature)
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
    }

    fn describe(item: &MenuItemModel, variant: Option<&str>) -> String {
        match variant {
            Some(variant) => format!("{} • {variant}", item.base_label()),
            None => item.base_label(),
        }
    }

    fn menu_entry(item: &MenuItemModel, cart: &Cart) -> String {
        let in_cart: u32 = cart
            .lines()
            .iter()
            .filter(|line| line.item_id == item.id)
            .map(|line| line.quantity)
            .sum();
        let mut entry = format!("**{}** — {}", item.base_label(), format_amount(item.price));
        if let Some(temperature) = item.temperature.as_deref() {
            entry.push_str(&format!(" • {temperature}"));
        }
        if in_cart > 0 {
            entry.push_str(&format!(" 🛒 ×{in_cart}"));
        }
        entry
    }

    /// Shows the menu by section, with how many of each item are in your cart.
    #[poise::command(slash_command)]
    pub async fn menu(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let items = menu::get_menu(data.db()).await?;

        if items.is_empty() {
            ctx.say("📋 The menu is empty right now.").await?;
            return Ok(());
        }

        let cart = data.cart(ctx.author().id).await;
        let sections = MenuSections::from_items(items);

        let fields = MenuCategory::ALL.into_iter().map(|category| {
            let entries: Vec<String> = sections
                .section(category)
                .iter()
                .map(|item| menu_entry(item, &cart))
                .collect();
            (
                category.title(),
                join_within_limit(&entries, "Nothing here yet"),
                false,
            )
        });

        let embed = serenity::CreateEmbed::default()
            .title("📋 Menu")
            .description("Use `/add` to put items in your cart.")
            .color(0x002E_CC71)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Cart: {} items • {}",
                cart.item_count(),
                format_amount(cart.total())
            )));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Adds one of a menu item to your cart.
    #[poise::command(slash_command)]
    pub async fn add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to add"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "Temperature, for drinks served hot or cold"]
        #[autocomplete = "autocomplete::autocomplete_temperature"]
        temperature: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let item =
            menu::find_menu_item_by_label(data.db(), &item, temperature.as_deref()).await?;
        let variant = chosen_variant(&item, temperature.as_deref());

        let (quantity, total) = data
            .with_cart(ctx.author().id, |cart| {
                (cart.add_item(&item, variant.as_deref()), cart.total())
            })
            .await;

        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "✅ Added **{}** (now ×{quantity}). Cart total: {}",
                    describe(&item, variant.as_deref()),
                    format_amount(total)
                ))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Removes one of a menu item from your cart.
    #[poise::command(slash_command)]
    pub async fn remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Menu item to remove"]
        #[autocomplete = "autocomplete::autocomplete_menu_item"]
        item: String,
        #[description = "Temperature it was added with"]
        #[autocomplete = "autocomplete::autocomplete_temperature"]
        temperature: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let item =
            menu::find_menu_item_by_label(data.db(), &item, temperature.as_deref()).await?;
        let variant = chosen_variant(&item, temperature.as_deref());
        let label = describe(&item, variant.as_deref());

        let (remaining, total) = data
            .with_cart(ctx.author().id, |cart| {
                (cart.remove_item(item.id, variant.as_deref()), cart.total())
            })
            .await;

        let message = match remaining {
            None => format!("❌ **{label}** isn't in your cart."),
            Some(0) => format!(
                "🗑️ Removed **{label}** from your cart. Cart total: {}",
                format_amount(total)
            ),
            Some(left) => format!(
                "➖ Removed one **{label}** ({left} left). Cart total: {}",
                format_amount(total)
            ),
        };

        ctx.send(poise::CreateReply::default().content(message).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Shows the items in your cart and the total.
    #[poise::command(slash_command)]
    pub async fn cart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let cart = ctx.data().cart(ctx.author().id).await;

        if cart.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("🛒 No items added yet. Browse with `/menu`.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let lines: Vec<String> = cart.lines().iter().map(format_line).collect();
        let embed = serenity::CreateEmbed::default()
            .title("🛒 Your Cart")
            .description(join_within(&lines, "\n", DESCRIPTION_LIMIT, ""))
            .color(0x00F1_C40F)
            .field("Total", format_amount(cart.total()), true)
            .field("Items", cart.item_count().to_string(), true);

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Empties your cart.
    #[poise::command(slash_command)]
    pub async fn clear(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.data().with_cart(ctx.author().id, Cart::reset).await;
        ctx.send(
            poise::CreateReply::default()
                .content("🧹 Your cart is empty.")
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Sends your cart to the kitchen as an order.
    #[poise::command(slash_command)]
    pub async fn submit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your name"]
        #[max_length = 64]
        customer_name: String,
        #[description = "Your table number"]
        #[min = 1]
        #[max = 10]
        table_number: i32,
        #[description = "Special instructions for the kitchen"]
        #[max_length = 500]
        message: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let user = ctx.author().id;
        // Taken out so that a concurrent /add or a second /submit sees a fresh cart
        let cart = data.take_cart(user).await;
        let details = OrderDetails {
            customer_name,
            table_number,
            message,
        };

        let result = order::submit_order(data.db(), &data.feed, &details, &cart).await;
        if result.is_err() {
            data.restore_cart(user, cart).await;
        }

        match result {
            Ok(order) => {
                info!("User {} submitted order {}", user, order.id);
                ctx.say(format!(
                    "✅ Order **#{}** submitted successfully! Table {} • {}",
                    order.id,
                    order.table_number,
                    format_amount(order.total_amount)
                ))
                .await?;
            }
            Err(e) if e.is_user_facing() => {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!("❌ {e}"))
                        .ephemeral(true),
                )
                .await?;
            }
            Err(e) => {
                error!("Failed to submit order for user {}: {}", user, e);
                ctx.send(
                    poise::CreateReply::default()
                        .content("❌ Failed to submit order. Your cart has been kept, please try again.")
                        .ephemeral(true),
                )
                .await?;
            }
        }
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
