//! # Menu Module
//!
//! Menu items and the catalog they live in.
//!
//! ## Item Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuItem { name, price, description, kind }                            │
//! │                                      │                                  │
//! │          ┌───────────────────────────┼───────────────────────────┐      │
//! │          ▼                           ▼                           ▼      │
//! │   ItemKind::Food              ItemKind::Drink             ItemKind::Combo│
//! │   allergens, vegetarian       cold, hot, size             components    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are built once (by [`create`] or a catalog loader), wrapped in
//! `Arc`, and never mutated again. Orders hold clones of those `Arc`s, one
//! per unit purchased.
//!
//! ## Usage
//! ```rust
//! use cafe_core::menu::{create, ItemAttributes};
//!
//! let pizza = create("food", ItemAttributes::new("Pizza", "12.50").vegetarian(true)).unwrap();
//! assert_eq!(pizza.price().cents(), 1250);
//! assert!(create("dessert", ItemAttributes::new("Cake", "4")).is_err());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Category;

// =============================================================================
// Menu Item
// =============================================================================

/// A purchasable menu entry.
///
/// Equality is structural: two separately built "Coke" items with the same
/// attributes compare equal. Orders rely on this when removing a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    name: String,
    price: Money,
    description: String,
    kind: ItemKind,
}

/// Variant-specific data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemKind {
    Food(FoodDetails),
    Drink(DrinkDetails),
    Combo(ComboDetails),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDetails {
    pub allergens: Vec<String>,
    pub vegetarian: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrinkDetails {
    pub cold: bool,
    pub hot: bool,
    pub size: String,
}

/// A bundle sold at its own price. Components are for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboDetails {
    pub components: Vec<Arc<MenuItem>>,
}

impl MenuItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        match self.kind {
            ItemKind::Food(_) => Category::Food,
            ItemKind::Drink(_) => Category::Drink,
            ItemKind::Combo(_) => Category::Combo,
        }
    }

    /// One-line menu listing: `Pizza (Food): Cheese pizza - $12.50`.
    pub fn display_line(&self) -> String {
        format!(
            "{} ({}): {} - {}",
            self.name,
            self.category(),
            self.description,
            self.price
        )
    }

    /// Variant-specific detail text shown when an item is inspected.
    pub fn details(&self) -> String {
        match &self.kind {
            ItemKind::Food(food) => {
                let allergens = if food.allergens.is_empty() {
                    "None".to_string()
                } else {
                    food.allergens.join(", ")
                };
                format!(
                    "{} - Vegetarian: {}, Allergens: {}",
                    self.name, food.vegetarian, allergens
                )
            }
            ItemKind::Drink(drink) => format!(
                "{} - Size: {}, Cold: {}, Hot: {}",
                self.name, drink.size, drink.cold, drink.hot
            ),
            ItemKind::Combo(combo) => {
                let parts: Vec<&str> = combo
                    .components
                    .iter()
                    .map(|component| component.description())
                    .collect();
                format!("{} - Combo includes: {}", self.name, parts.join(", "))
            }
        }
    }
}

// =============================================================================
// Item Factory
// =============================================================================

/// Raw attributes for [`create`].
///
/// `name` and `price` are optional here so that missing values surface as
/// `InvalidAttributes` rather than as a type error in the caller. The price
/// is kept as text; catalog files may give it as a JSON number or string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemAttributes {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "price_text")]
    pub price: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default, alias = "vegetarian")]
    pub is_vegetarian: bool,
    /// Drinks default to cold.
    #[serde(default, alias = "cold")]
    pub is_cold: Option<bool>,
    #[serde(default, alias = "hot")]
    pub is_hot: bool,
    /// Drinks default to "Standard".
    #[serde(default)]
    pub size: Option<String>,
    #[serde(skip)]
    pub components: Vec<Arc<MenuItem>>,
}

impl ItemAttributes {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        ItemAttributes {
            name: Some(name.into()),
            price: Some(price.into()),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    pub fn vegetarian(mut self, vegetarian: bool) -> Self {
        self.is_vegetarian = vegetarian;
        self
    }

    pub fn cold(mut self, cold: bool) -> Self {
        self.is_cold = Some(cold);
        self
    }

    pub fn hot(mut self, hot: bool) -> Self {
        self.is_hot = hot;
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn components(mut self, components: Vec<Arc<MenuItem>>) -> Self {
        self.components = components;
        self
    }
}

fn price_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::String(s) => s,
        other => other.to_string(),
    }))
}

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidAttributes {
        reason: reason.into(),
    }
}

/// Builds a menu item for `category` ("food", "drink" or "combo").
///
/// ## Errors
/// - `InvalidCategory` for any other category
/// - `InvalidAttributes` when the name is missing/blank or the price is
///   missing, not a decimal, or negative
pub fn create(category: &str, attributes: ItemAttributes) -> CoreResult<MenuItem> {
    let category: Category = category.parse()?;

    let name = attributes
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| invalid("name is required"))?
        .to_string();

    let price_text = attributes
        .price
        .as_deref()
        .ok_or_else(|| invalid(format!("price is required for {}", name)))?;
    let price = Money::parse(price_text)
        .map_err(|_| invalid(format!("price '{}' for {} is not a number", price_text, name)))?;
    if price.is_negative() {
        return Err(invalid(format!("price for {} cannot be negative", name)));
    }

    let kind = match category {
        Category::Food => ItemKind::Food(FoodDetails {
            allergens: attributes.allergens,
            vegetarian: attributes.is_vegetarian,
        }),
        Category::Drink => ItemKind::Drink(DrinkDetails {
            cold: attributes.is_cold.unwrap_or(true),
            hot: attributes.is_hot,
            size: attributes.size.unwrap_or_else(|| "Standard".to_string()),
        }),
        Category::Combo => ItemKind::Combo(ComboDetails {
            components: attributes.components,
        }),
    };

    Ok(MenuItem {
        name,
        price,
        description: attributes.description,
        kind,
    })
}

// =============================================================================
// Menu Catalog
// =============================================================================

/// The ordered, immutable list of items on sale.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: Vec<Arc<MenuItem>>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    items: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct CatalogEntry {
    category: String,
    #[serde(flatten)]
    attributes: ItemAttributes,
    /// Names of items defined earlier in the same document.
    #[serde(default)]
    components: Vec<String>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        MenuCatalog {
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    /// The cafe's built-in menu, used when no catalog file is configured.
    pub fn sample() -> Self {
        let burger = Arc::new(sample_food(
            "Chicken Burger",
            899,
            "Grilled chicken burger",
            &["gluten"],
            false,
        ));
        let chips = Arc::new(sample_food("Chips", 350, "Crispy fries", &[], true));
        let coke = Arc::new(sample_drink("Coke", 200, "Soda drink", true, false, "500ml"));
        let meal = MenuItem {
            name: "Burger Meal".to_string(),
            price: Money::from_cents(1299),
            description: "Burger, fries and a soda".to_string(),
            kind: ItemKind::Combo(ComboDetails {
                components: vec![burger.clone(), chips.clone(), coke.clone()],
            }),
        };

        MenuCatalog {
            items: vec![
                Arc::new(sample_food("Pizza", 1250, "Cheese pizza", &[], true)),
                burger,
                chips,
                coke,
                Arc::new(sample_drink("Latte", 320, "Coffee with milk", false, true, "12oz")),
                Arc::new(meal),
            ],
        }
    }

    /// Loads a catalog from configuration JSON.
    ///
    /// ```json
    /// { "items": [
    ///     { "category": "food", "name": "Chips", "price": 3.5 },
    ///     { "category": "drink", "name": "Coke", "price": "2.00", "size": "500ml" },
    ///     { "category": "combo", "name": "Snack", "price": 5, "components": ["Chips", "Coke"] }
    /// ] }
    /// ```
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let document: CatalogDocument = serde_json::from_str(text)
            .map_err(|e| invalid(format!("catalog is not valid JSON: {}", e)))?;

        let mut items: Vec<Arc<MenuItem>> = Vec::with_capacity(document.items.len());
        for entry in document.items {
            let mut components = Vec::with_capacity(entry.components.len());
            for component in &entry.components {
                let found = items
                    .iter()
                    .find(|item| item.name().eq_ignore_ascii_case(component))
                    .ok_or_else(|| {
                        invalid(format!("combo component '{}' is not on the menu", component))
                    })?;
                components.push(found.clone());
            }
            let attributes = entry.attributes.components(components);
            items.push(Arc::new(create(&entry.category, attributes)?));
        }

        debug!(count = items.len(), "Menu catalog loaded");
        Ok(MenuCatalog { items })
    }

    pub fn items(&self) -> &[Arc<MenuItem>] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Arc<MenuItem>> {
        self.items.get(index)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Arc<MenuItem>> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name().eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn sample_food(
    name: &str,
    cents: i64,
    description: &str,
    allergens: &[&str],
    vegetarian: bool,
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        price: Money::from_cents(cents),
        description: description.to_string(),
        kind: ItemKind::Food(FoodDetails {
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
            vegetarian,
        }),
    }
}

fn sample_drink(name: &str, cents: i64, description: &str, cold: bool, hot: bool, size: &str) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        price: Money::from_cents(cents),
        description: description.to_string(),
        kind: ItemKind::Drink(DrinkDetails {
            cold,
            hot,
            size: size.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_food_and_drink_defaults() {
        let chips = create(
            "food",
            ItemAttributes::new("Chips", "3.50").description("Crispy fries"),
        )
        .unwrap();
        assert_eq!(chips.category(), Category::Food);
        assert_eq!(chips.details(), "Chips - Vegetarian: false, Allergens: None");

        let water = create("Drink", ItemAttributes::new("Water", "1")).unwrap();
        match water.kind() {
            ItemKind::Drink(drink) => {
                assert!(drink.cold);
                assert!(!drink.hot);
                assert_eq!(drink.size, "Standard");
            }
            other => panic!("expected drink, got {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let err = create("dessert", ItemAttributes::new("Cake", "4.00")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCategory(_)));
    }

    #[test]
    fn test_create_rejects_bad_attributes() {
        let missing_name = ItemAttributes {
            price: Some("1.00".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            create("food", missing_name),
            Err(CoreError::InvalidAttributes { .. })
        ));

        let missing_price = ItemAttributes {
            name: Some("Toast".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            create("food", missing_price),
            Err(CoreError::InvalidAttributes { .. })
        ));

        assert!(create("food", ItemAttributes::new("Toast", "cheap")).is_err());
        assert!(create("food", ItemAttributes::new("Toast", "-1")).is_err());
        assert!(create("food", ItemAttributes::new("   ", "1")).is_err());
    }

    #[test]
    fn test_free_item_is_allowed() {
        let water = create("drink", ItemAttributes::new("Tap Water", "0")).unwrap();
        assert!(water.price().is_zero());
    }

    #[test]
    fn test_display_and_combo_details() {
        let catalog = MenuCatalog::sample();
        let pizza = catalog.find("pizza").unwrap();
        assert_eq!(pizza.display_line(), "Pizza (Food): Cheese pizza - $12.50");

        let meal = catalog.find("Burger Meal").unwrap();
        assert_eq!(
            meal.details(),
            "Burger Meal - Combo includes: Grilled chicken burger, Crispy fries, Soda drink"
        );

        let latte = catalog.find("Latte").unwrap();
        assert_eq!(latte.details(), "Latte - Size: 12oz, Cold: false, Hot: true");
    }

    #[test]
    fn test_structural_equality() {
        let a = create("drink", ItemAttributes::new("Coke", "2.00").size("500ml")).unwrap();
        let b = create("drink", ItemAttributes::new("Coke", "2.00").size("500ml")).unwrap();
        let c = create("drink", ItemAttributes::new("Coke", "2.00").size("1L")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{ "items": [
            { "category": "food", "name": "Chips", "price": 3.5, "is_vegetarian": true },
            { "category": "drink", "name": "Coke", "price": "2.00", "size": "500ml" },
            { "category": "combo", "name": "Snack", "price": 5, "components": ["chips", "Coke"] }
        ] }"#;

        let catalog = MenuCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().price().cents(), 350);
        assert_eq!(catalog.get(1).unwrap().price().cents(), 200);

        let snack = catalog.find("snack").unwrap();
        assert_eq!(snack.price().cents(), 500);
        match snack.kind() {
            ItemKind::Combo(combo) => assert_eq!(combo.components.len(), 2),
            other => panic!("expected combo, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_from_json_errors() {
        assert!(matches!(
            MenuCatalog::from_json("not json"),
            Err(CoreError::InvalidAttributes { .. })
        ));

        let unknown_component = r#"{ "items": [
            { "category": "combo", "name": "Snack", "price": 5, "components": ["Chips"] }
        ] }"#;
        assert!(MenuCatalog::from_json(unknown_component).is_err());

        let bad_category = r#"{ "items": [ { "category": "pastry", "name": "Bun", "price": 1 } ] }"#;
        assert!(matches!(
            MenuCatalog::from_json(bad_category),
            Err(CoreError::InvalidCategory(_))
        ));
    }
}
