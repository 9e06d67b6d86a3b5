//! Cart business logic - the customer's in-progress selection.
//!
//! A cart is an ordered list of [`CartLine`]s. Two selections land on the same
//! line only when the menu item id and the temperature variant both match; the
//! size label never takes part in the comparison, and "no variant" is a key of
//! its own rather than a wildcard.

use crate::entities::menu_item;
use serde::{Deserialize, Serialize};

/// One (menu item, variant) entry with its quantity.
///
/// The item fields are copied at selection time, so a submitted order keeps the
/// price it was placed at even if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item identifier
    #[serde(rename = "id")]
    pub item_id: i64,
    /// Menu section of the item
    #[serde(default)]
    pub category: String,
    /// Display name
    pub name: String,
    /// Size label, informational only
    #[serde(default)]
    pub size: Option<String>,
    /// Unit price at selection time
    pub price: f64,
    /// Variant this line was selected with
    #[serde(default)]
    pub temperature: Option<String>,
    /// Number of units, at least 1 while the line is in a cart
    pub quantity: u32,
}

impl CartLine {
    fn new(item: &menu_item::Model, variant: Option<&str>) -> Self {
        Self {
            item_id: item.id,
            category: item.category.clone(),
            name: item.name.clone(),
            size: item.size.clone(),
            price: item.price,
            temperature: variant.map(ToString::to_string),
            quantity: 1,
        }
    }

    /// Whether this line is the one keyed by `(item_id, variant)`.
    #[must_use]
    pub fn matches(&self, item_id: i64, variant: Option<&str>) -> bool {
        self.item_id == item_id && self.temperature.as_deref() == variant
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// The customer's in-progress order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds one unit of `item` with the given variant and returns the line's new quantity.
    ///
    /// An existing `(id, variant)` line is incremented in place; otherwise a new
    /// line is appended at the end.
    pub fn add_item(&mut self, item: &menu_item::Model, variant: Option<&str>) -> u32 {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item.id, variant))
        {
            line.quantity += 1;
            return line.quantity;
        }

        self.lines.push(CartLine::new(item, variant));
        1
    }

    /// Removes one unit from the `(item_id, variant)` line.
    ///
    /// Returns `None` when no such line exists. A line at quantity 1 is deleted and
    /// `Some(0)` is returned; otherwise the remaining quantity is returned.
    pub fn remove_item(&mut self, item_id: i64, variant: Option<&str>) -> Option<u32> {
        let index = self
            .lines
            .iter()
            .position(|line| line.matches(item_id, variant))?;

        if self.lines[index].quantity <= 1 {
            self.lines.remove(index);
            return Some(0);
        }

        self.lines[index].quantity -= 1;
        Some(self.lines[index].quantity)
    }

    /// Sum of price times quantity over all lines; zero when empty.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Empties the cart.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Puts lines taken out earlier back in front of this cart's lines.
    ///
    /// Lines added since are kept; a line for the same `(id, variant)` is folded
    /// into the restored one.
    pub fn restore(&mut self, earlier: Self) {
        let later = std::mem::replace(&mut self.lines, earlier.lines);
        for line in later {
            match self
                .lines
                .iter_mut()
                .find(|existing| existing.matches(line.item_id, line.temperature.as_deref()))
            {
                Some(existing) => existing.quantity += line.quantity,
                None => self.lines.push(line),
            }
        }
    }

    /// Quantity currently selected for `(item_id, variant)`, zero if absent.
    #[must_use]
    pub fn quantity(&self, item_id: i64, variant: Option<&str>) -> u32 {
        self.lines
            .iter()
            .find(|line| line.matches(item_id, variant))
            .map_or(0, |line| line.quantity)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
