//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are plain strings that the matching command parses back, so menu
//! items are offered by their label and statuses by their stored text.

use crate::{
    bot::BotData,
    core::{OrderStatus, menu},
    errors::Error,
};

/// Discord shows at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Temperature variants offered for drinks.
pub const TEMPERATURES: [&str; 2] = ["hot", "cold"];

/// Candidates containing `partial`, ignoring case, capped at the Discord limit.
fn matching<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests menu item labels, e.g. "Mineral Water (1L)".
pub async fn autocomplete_menu_item(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(items) = menu::get_menu(ctx.data().db()).await else {
        return Vec::new();
    };
    matching(items.iter().map(crate::entities::MenuItemModel::label), partial)
}

/// Suggests temperature variants.
pub async fn autocomplete_temperature(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(TEMPERATURES.map(String::from), partial)
}

/// Suggests workflow statuses.
pub async fn autocomplete_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(
        OrderStatus::ALL.map(|status| status.as_str().to_string()),
        partial,
    )
}
