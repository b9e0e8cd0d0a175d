//! Menu item domain entity and customization schema

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One selectable option inside a customization group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationOption {
    /// Stable identifier the client sends back (e.g. `"mojito-apple"`)
    pub value: String,
    /// Display label (e.g. `"Mojito Apple"`)
    pub label: String,
    /// Price effect of choosing this option
    #[serde(default)]
    pub price_modifier: Decimal,
}

/// A named option group (e.g. `"drink"`, `"sambalLevel"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomizationGroup {
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<CustomizationOption>,
}

/// Customization schema for a menu item: group key → group.
pub type CustomizationSchema = BTreeMap<String, CustomizationGroup>;

/// A purchasable menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    /// Option groups, when the item is customizable
    pub customization: Option<CustomizationSchema>,
}

impl MenuItem {
    /// Resolve a chosen option by group key and option identifier against
    /// this item's own schema. Returns `None` for unknown groups/options —
    /// client-supplied price modifiers are never consulted.
    pub fn resolve_option(&self, group_key: &str, value: &str) -> Option<&CustomizationOption> {
        self.customization
            .as_ref()?
            .get(group_key)?
            .options
            .iter()
            .find(|o| o.value == value)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_drinks() -> MenuItem {
        let mut schema = CustomizationSchema::new();
        schema.insert(
            "drink".into(),
            CustomizationGroup {
                label: "Pilih Minuman".into(),
                required: true,
                options: vec![
                    CustomizationOption {
                        value: "blue-lemon".into(),
                        label: "Blue Lemon Ice".into(),
                        price_modifier: Decimal::ZERO,
                    },
                    CustomizationOption {
                        value: "mojito-apple".into(),
                        label: "Mojito Apple".into(),
                        price_modifier: Decimal::new(500, 2),
                    },
                ],
            },
        );
        MenuItem {
            id: "set-a".into(),
            name: "Set Ayam Gepuk A".into(),
            price: Decimal::new(1500, 2),
            is_active: true,
            customization: Some(schema),
        }
    }

    #[test]
    fn resolves_known_option() {
        let item = item_with_drinks();
        let opt = item.resolve_option("drink", "mojito-apple").unwrap();
        assert_eq!(opt.price_modifier, Decimal::new(500, 2));
    }

    #[test]
    fn unknown_option_or_group_is_none() {
        let item = item_with_drinks();
        assert!(item.resolve_option("drink", "free-gold").is_none());
        assert!(item.resolve_option("dessert", "blue-lemon").is_none());
    }

    #[test]
    fn item_without_schema_resolves_nothing() {
        let mut item = item_with_drinks();
        item.customization = None;
        assert!(item.resolve_option("drink", "blue-lemon").is_none());
    }

    #[test]
    fn schema_deserializes_without_modifier() {
        let json = r#"{
            "drink": {
                "label": "Pilih Minuman",
                "required": true,
                "options": [{"value": "blue-lemon", "label": "Blue Lemon Ice"}]
            }
        }"#;
        let schema: CustomizationSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema["drink"].options[0].price_modifier, Decimal::ZERO);
    }
}
