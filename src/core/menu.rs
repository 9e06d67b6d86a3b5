//! Menu business logic - catalog reads, item creation and seeding.
//!
//! The catalog is read in category-then-name order and split into the three menu
//! sections shown to customers. Items are created either by seeding from
//! `config.toml` on first run or through [`create_menu_item`].

use crate::{
    config::menu::Config,
    entities::{MenuItem, menu_item},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCategory {
    /// Vegetarian dishes
    Veg,
    /// Non-vegetarian dishes
    NonVeg,
    /// Water bottles and other beverages
    Water,
}

impl MenuCategory {
    /// Every category, in the order sections are shown.
    pub const ALL: [Self; 3] = [Self::Veg, Self::NonVeg, Self::Water];

    /// Text form stored in the `category` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Veg => "veg",
            Self::NonVeg => "nonVeg",
            Self::Water => "water",
        }
    }

    /// Section heading shown to customers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Veg => "🥬 Veg Menu",
            Self::NonVeg => "🍗 Non-Veg Menu",
            Self::Water => "💧 Water Bottles",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown menu category '{s}'")))
    }
}

/// The catalog split into its three sections, each keeping catalog order.
///
/// Items whose category text is not one of the known sections are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSections {
    /// Vegetarian dishes
    pub veg: Vec<menu_item::Model>,
    /// Non-vegetarian dishes
    pub non_veg: Vec<menu_item::Model>,
    /// Water bottles
    pub water: Vec<menu_item::Model>,
}

impl MenuSections {
    /// Splits `items` by category.
    #[must_use]
    pub fn from_items(items: Vec<menu_item::Model>) -> Self {
        let mut sections = Self::default();
        for item in items {
            match item.category.parse::<MenuCategory>() {
                Ok(MenuCategory::Veg) => sections.veg.push(item),
                Ok(MenuCategory::NonVeg) => sections.non_veg.push(item),
                Ok(MenuCategory::Water) => sections.water.push(item),
                Err(_) => debug!(
                    "Menu item {} has unknown category '{}', leaving it out",
                    item.id, item.category
                ),
            }
        }
        sections
    }

    /// Items of one section.
    #[must_use]
    pub fn section(&self, category: MenuCategory) -> &[menu_item::Model] {
        match category {
            MenuCategory::Veg => &self.veg,
            MenuCategory::NonVeg => &self.non_veg,
            MenuCategory::Water => &self.water,
        }
    }
}

/// Input for [`create_menu_item`].
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    /// Menu section
    pub category: MenuCategory,
    /// Display name
    pub name: String,
    /// Optional size label
    pub size: Option<String>,
    /// Unit price
    pub price: f64,
    /// Optional temperature variant
    pub temperature: Option<String>,
}

/// Retrieves the whole catalog ordered by category, then name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_menu<C>(db: &C) -> Result<Vec<menu_item::Model>>
where
    C: ConnectionTrait,
{
    let items = MenuItem::find()
        .order_by_asc(menu_item::Column::Category)
        .order_by_asc(menu_item::Column::Name)
        .order_by_asc(menu_item::Column::Id)
        .all(db)
        .await?;
    debug!("Fetched {} menu items.", items.len());
    Ok(items)
}

/// Resolves a customer's pick to one catalog row.
///
/// `label` may be a full [`label`](menu_item::Model::label) or just the name and
/// size, both compared ignoring case. Rows sharing that name and size are
/// siblings; when `temperature` is given and the siblings carry temperatures, the
/// sibling served at that temperature is chosen. Without a temperature the exact
/// label match wins, then the first sibling.
///
/// # Errors
/// Returns [`Error::MenuItemNotFound`] when nothing matches the label, or no
/// sibling is served at the requested temperature. Returns an error if the
/// database query fails.
pub async fn find_menu_item_by_label(
    db: &DatabaseConnection,
    label: &str,
    temperature: Option<&str>,
) -> Result<menu_item::Model> {
    let wanted = label.trim().to_lowercase();
    let not_found = || Error::MenuItemNotFound {
        id: label.to_string(),
    };
    let items = get_menu(db).await?;

    let exact = items.iter().find(|item| item.label().to_lowercase() == wanted);
    let base = exact
        .or_else(|| {
            items
                .iter()
                .find(|item| item.base_label().to_lowercase() == wanted)
        })
        .map(menu_item::Model::base_label)
        .ok_or_else(not_found)?;
    let siblings: Vec<&menu_item::Model> = items
        .iter()
        .filter(|item| item.base_label() == base)
        .collect();

    let temperature = temperature.map(str::trim).filter(|t| !t.is_empty());
    let has_variants = siblings.iter().any(|item| item.temperature.is_some());
    let picked = match temperature {
        Some(wanted_temperature) if has_variants => siblings.into_iter().find(|item| {
            item.temperature
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(wanted_temperature))
        }),
        _ => exact.or_else(|| siblings.into_iter().next()),
    };

    picked.cloned().ok_or_else(not_found)
}

/// Creates a catalog entry after validating its name and price.
///
/// Blank size and temperature labels are stored as absent; temperatures are
/// stored lowercase.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price is negative or not finite
/// - The database insert fails
pub async fn create_menu_item<C>(db: &C, new_item: NewMenuItem) -> Result<menu_item::Model>
where
    C: ConnectionTrait,
{
    if new_item.name.trim().is_empty() {
        return Err(Error::validation("Menu item name cannot be empty"));
    }

    if new_item.price < 0.0 || !new_item.price.is_finite() {
        return Err(Error::InvalidPrice {
            price: new_item.price,
        });
    }

    let item = menu_item::ActiveModel {
        category: Set(new_item.category.as_str().to_string()),
        name: Set(new_item.name.trim().to_string()),
        size: Set(non_blank(new_item.size)),
        price: Set(new_item.price),
        temperature: Set(non_blank(new_item.temperature).map(|t| t.to_lowercase())),
        ..Default::default()
    };

    let created = item.insert(db).await?;
    info!(
        "Added menu item '{}' (ID: {}) in {} at {}",
        created.name, created.id, created.category, created.price
    );
    Ok(created)
}

/// Seeds the catalog from configuration when the `menu_items` table is empty.
///
/// Returns the number of items inserted; an already populated catalog is left
/// untouched and `0` is returned. All items go in within one transaction.
///
/// # Errors
/// Returns an error if a configured item has an unknown category, fails
/// validation, or the database write fails.
pub async fn seed_menu(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let existing = MenuItem::find().count(db).await?;
    if existing > 0 {
        info!("Menu already has {existing} items, skipping seed.");
        return Ok(0);
    }

    info!(
        "Seeding menu with {} configured items.",
        config.menu_items.len()
    );
    let new_items = config
        .menu_items
        .iter()
        .map(|item_config| {
            Ok(NewMenuItem {
                category: item_config.category.parse::<MenuCategory>()?,
                name: item_config.name.clone(),
                size: item_config.size.clone(),
                price: item_config.price,
                temperature: item_config.temperature.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let txn = db.begin().await?;
    for new_item in new_items {
        create_menu_item(&txn, new_item).await?;
    }
    txn.commit().await?;

    Ok(config.menu_items.len())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
