//! Owner dashboard commands - live order views and status changes.
//!
//! `/orders` and `/tables` read the [`OrderBoard`](crate::core::OrderBoard), which
//! re-fetches on every change, so they never query the store themselves.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            format::{
                EMBED_LIMIT, FIELD_LIMIT, TITLE_LIMIT, format_amount, format_line, join_within,
                join_within_limit, order_card, truncate,
            },
            handlers::autocomplete,
        },
        core::{Order, OrderStatus, StatusBucket, order, view},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::collections::BTreeMap;
    use tracing::error;

    type Field = (String, String, bool);

    /// Discord allows at most this many fields per embed.
    const MAX_FIELDS: usize = 25;
    /// Room kept for the title and field names when splitting the embed budget.
    const TABLE_HEADER_RESERVE: usize = 300;

    fn bucket_field(bucket: StatusBucket, orders: &[&Order]) -> Field {
        let cards: Vec<String> = orders.iter().map(|o| order_card(o)).collect();
        (
            format!("{} ({})", bucket.title(), orders.len()),
            join_within_limit(&cards, bucket.empty_text()),
            false,
        )
    }

    /// One field per table, each sized so the whole embed stays within
    /// [`EMBED_LIMIT`].
    fn table_fields(grouped: &BTreeMap<i32, Vec<&Order>>) -> Vec<Field> {
        let shown = grouped.len().clamp(1, MAX_FIELDS);
        let per_value = ((EMBED_LIMIT - TABLE_HEADER_RESERVE) / shown).min(FIELD_LIMIT);

        grouped
            .iter()
            .take(MAX_FIELDS)
            .map(|(table, orders)| {
                let cards: Vec<String> = orders.iter().map(|o| order_card(o)).collect();
                (
                    format!("Table {table} ({} orders)", orders.len()),
                    join_within(&cards, "\n\n", per_value, ""),
                    false,
                )
            })
            .collect()
    }

    fn order_title(order: &Order) -> String {
        truncate(
            &format!("Order #{} • {}", order.id, order.customer_name),
            TITLE_LIMIT,
        )
    }

    fn order_fields(order: &Order) -> Vec<Field> {
        let lines: Vec<String> = order.items.iter().map(format_line).collect();
        let mut fields = vec![
            ("Table".to_string(), order.table_number.to_string(), true),
            (
                "Status".to_string(),
                format!("{} {}", order.status.icon(), order.status),
                true,
            ),
            ("Total".to_string(), format_amount(order.total_amount), true),
            (
                "Items".to_string(),
                join_within(&lines, "\n", FIELD_LIMIT, "No readable items"),
                false,
            ),
        ];
        if let Some(message) = order.message.as_deref() {
            fields.push((
                "📝 Message".to_string(),
                truncate(message, FIELD_LIMIT),
                false,
            ));
        }
        fields
    }

    /// Live orders grouped into pending, in progress and completed, or only those
    /// with one status.
    #[poise::command(slash_command)]
    pub async fn orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Show only orders with this status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
    ) -> Result<()> {
        let status = status
            .map(|s| s.trim().parse::<OrderStatus>())
            .transpose()?;
        let snapshot = ctx.data().board.snapshot().await;

        let embed = serenity::CreateEmbed::default()
            .title("🍽️ Order Dashboard")
            .color(0x00E6_7E22);

        let embed = if let Some(status) = status {
            let matching = view::filter_by_status(&snapshot, status);
            let cards: Vec<String> = matching.iter().map(|o| order_card(o)).collect();
            embed
                .description(format!(
                    "{} {} orders • {} of {} total",
                    status.icon(),
                    status,
                    matching.len(),
                    snapshot.len()
                ))
                .field(
                    format!("{} {} ({})", status.icon(), status, matching.len()),
                    join_within_limit(&cards, &format!("No {status} orders")),
                    false,
                )
        } else {
            let buckets = view::bucket_by_status(&snapshot);
            embed
                .description(format!(
                    "Real-time order management • {} total orders",
                    buckets.len()
                ))
                .fields(
                    StatusBucket::ALL
                        .into_iter()
                        .map(|bucket| bucket_field(bucket, buckets.bucket(bucket))),
                )
        };

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Live orders grouped by table.
    #[poise::command(slash_command)]
    pub async fn tables(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let snapshot = ctx.data().board.snapshot().await;
        let grouped = view::group_by_table(&snapshot);

        if grouped.is_empty() {
            ctx.say("🍽️ No orders yet.").await?;
            return Ok(());
        }

        let embed = serenity::CreateEmbed::default()
            .title("🪑 Orders by Table")
            .color(0x0034_98DB)
            .fields(table_fields(&grouped));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows every item, the message and timestamps of one order.
    #[poise::command(slash_command)]
    pub async fn order(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number"] order_id: i64,
    ) -> Result<()> {
        let Some(order) = order::get_order_by_id(ctx.data().db(), order_id).await? else {
            return Err(Error::OrderNotFound { id: order_id });
        };

        let embed = serenity::CreateEmbed::default()
            .title(order_title(&order))
            .color(0x0058_65F2)
            .fields(order_fields(&order))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Placed {} • Updated {}",
                order.created_at.format("%Y-%m-%d %H:%M"),
                order.updated_at.format("%Y-%m-%d %H:%M")
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Moves an order to any workflow status.
    #[poise::command(slash_command)]
    pub async fn status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number"] order_id: i64,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
    ) -> Result<()> {
        let status: OrderStatus = status.trim().parse()?;
        let data = ctx.data();

        match order::set_status(data.db(), &data.feed, order_id, status).await {
            Ok(order) => {
                ctx.say(format!(
                    "{} Order **#{}** status updated to **{}**",
                    order.status.icon(),
                    order.id,
                    order.status
                ))
                .await?;
            }
            Err(e) if e.is_user_facing() => return Err(e),
            Err(e) => {
                error!("Failed to update order {} status: {}", order_id, e);
                ctx.say("❌ Failed to update order status. Please try again.")
                    .await?;
            }
        }
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
