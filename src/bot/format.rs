//! Text formatting shared by the Discord commands.

use crate::core::{CartLine, Order, view};
use std::fmt::Write;

/// Discord embed field values are capped at this many characters.
pub const FIELD_LIMIT: usize = 1024;
/// Cap on an embed description.
pub const DESCRIPTION_LIMIT: usize = 4096;
/// Cap on the combined text of one embed.
pub const EMBED_LIMIT: usize = 6000;
/// Cap on an embed title.
pub const TITLE_LIMIT: usize = 256;
/// Longest customer message shown on a dashboard card.
pub const CARD_MESSAGE_LIMIT: usize = 120;

/// Formats a rupee amount, dropping the paise when they are zero.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}

/// "Name (size) • temperature" for a line item.
#[must_use]
pub fn line_label(line: &CartLine) -> String {
    let mut label = line.name.clone();
    if let Some(size) = line.size.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(label, " ({size})");
    }
    if let Some(temperature) = line.temperature.as_deref() {
        let _ = write!(label, " • {temperature}");
    }
    label
}

/// One cart or order line with quantity and subtotal.
#[must_use]
pub fn format_line(line: &CartLine) -> String {
    format!(
        "{} — {} × {} = **{}**",
        line_label(line),
        line.quantity,
        format_amount(line.price),
        format_amount(line.subtotal())
    )
}

/// Short card for an order on the dashboard: header line plus an item preview.
#[must_use]
pub fn order_card(order: &Order) -> String {
    let mut card = format!(
        "**#{}** {} • Table {} • {} {} • {}",
        order.id,
        order.customer_name,
        order.table_number,
        order.status.icon(),
        order.status,
        format_amount(order.total_amount)
    );

    let preview = view::preview_items(&order.items);
    for line in preview.shown {
        let _ = write!(card, "\n  {}x {}", line.quantity, line_label(line));
    }
    if preview.hidden > 0 {
        let _ = write!(card, "\n  +{} more items...", preview.hidden);
    }
    if let Some(message) = order.message.as_deref() {
        let _ = write!(card, "\n  📝 {}", truncate(message, CARD_MESSAGE_LIMIT));
    }
    card
}

/// Cuts `text` to at most `limit` characters, ending with an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Joins entries with `separator`, stopping before `limit` characters.
///
/// When entries are dropped a trailing note says how many. An entry that alone
/// exceeds the limit is cut short.
#[must_use]
pub fn join_within(entries: &[String], separator: &str, limit: usize, empty_text: &str) -> String {
    if entries.is_empty() {
        return truncate(empty_text, limit);
    }

    let mut out = String::new();
    let mut used = 0;
    for (shown, entry) in entries.iter().enumerate() {
        let gap = if shown == 0 { "" } else { separator };
        let remaining = entries.len() - shown;
        let note = format!("{gap}…and {remaining} more");
        let note_len = note.chars().count();
        let entry_len = gap.chars().count() + entry.chars().count();
        let last = remaining == 1;

        if used + entry_len <= limit && (last || used + entry_len + note_len <= limit) {
            out.push_str(gap);
            out.push_str(entry);
            used += entry_len;
        } else if shown == 0 {
            // Not even one entry fits whole
            return truncate(entry, limit);
        } else {
            out.push_str(&note);
            return out;
        }
    }
    out
}

/// Joins entries with blank lines within [`FIELD_LIMIT`].
#[must_use]
pub fn join_within_limit(entries: &[String], empty_text: &str) -> String {
    join_within(entries, "\n\n", FIELD_LIMIT, empty_text)
}

/// Character count Discord charges an embed for a set of fields.
#[must_use]
pub fn fields_len(fields: &[(String, String, bool)]) -> usize {
    fields
        .iter()
        .map(|(name, value, _)| name.chars().count() + value.chars().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OrderStatus;
    use crate::test_utils::sample_order;

    fn line(name: &str, size: Option<&str>, temperature: Option<&str>) -> CartLine {
        CartLine {
            item_id: 1,
            category: "veg".to_string(),
            name: name.to_string(),
            size: size.map(ToString::to_string),
            price: 12.5,
            temperature: temperature.map(ToString::to_string),
            quantity: 2,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(250.0), "₹250");
        assert_eq!(format_amount(12.5), "₹12.50");
        assert_eq!(format_amount(0.0), "₹0");
    }

    #[test]
    fn test_line_label_and_format() {
        assert_eq!(line_label(&line("Tea", None, None)), "Tea");
        assert_eq!(
            line_label(&line("Coffee", Some("Large"), Some("hot"))),
            "Coffee (Large) • hot"
        );
        assert_eq!(
            format_line(&line("Tea", None, Some("cold"))),
            "Tea • cold — 2 × ₹12.50 = **₹25**"
        );
    }

    #[test]
    fn test_order_card_collapses_extra_items() {
        let mut order = sample_order(42, 6, OrderStatus::Slow);
        order.items = (0..5).map(|_| line("Idli", None, None)).collect();
        order.message = Some("Extra chutney".to_string());

        let card = order_card(&order);
        assert!(card.starts_with("**#42** Customer 42 • Table 6"));
        assert!(card.contains("slow"));
        assert_eq!(card.matches("2x Idli").count(), 3);
        assert!(card.contains("+2 more items..."));
        assert!(card.contains("Extra chutney"));
    }

    #[test]
    fn test_join_within_limit() {
        assert_eq!(join_within_limit(&[], "Nothing here"), "Nothing here");

        let short = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_within_limit(&short, ""), "a\n\nb");

        let long: Vec<String> = (0..40).map(|i| format!("{i:0>60}")).collect();
        let joined = join_within_limit(&long, "");
        assert!(joined.chars().count() <= FIELD_LIMIT);
        assert!(joined.ends_with("more"));
    }

    #[test]
    fn test_join_within_small_budget() {
        let lines: Vec<String> = (0..25).map(|i| format!("{i:0>50}")).collect();
        for limit in [60, 200, 580] {
            let joined = join_within(&lines, "\n", limit, "");
            assert!(joined.chars().count() <= limit, "limit {limit}");
        }

        let huge = vec!["x".repeat(3000)];
        let joined = join_within(&huge, "\n", FIELD_LIMIT, "");
        assert_eq!(joined.chars().count(), FIELD_LIMIT);
        assert!(joined.ends_with('…'));
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("chai", 10), "chai");
        assert_eq!(truncate("₹₹₹₹₹", 3), "₹₹…");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_card_message_is_shortened() {
        let mut order = sample_order(1, 1, OrderStatus::Pending);
        order.message = Some("no onions ".repeat(100));
        let card = order_card(&order);
        assert!(card.chars().count() < 300);
        assert!(card.ends_with('…'));
    }

    #[test]
    fn test_fields_len() {
        let fields = vec![
            ("ab".to_string(), "cde".to_string(), false),
            ("₹".to_string(), String::new(), true),
        ];
        assert_eq!(fields_len(&fields), 6);
    }
}
