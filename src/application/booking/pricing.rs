//! Server-side pricing
//!
//! Totals are always recomputed from stored menu data; the only things
//! trusted from the client are menu item IDs, quantities, and customization
//! option *identifiers*. Price modifiers come exclusively from the menu
//! item's own schema.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{ChosenCustomization, DomainError, DomainResult, MenuItem, OrderLine};

/// SST rate (6%)
pub const SST_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Flat per-order booking fee (RM1), applied to every fulfillment type
pub const BOOKING_FEE: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

/// Per-line quantity bounds
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 100;

/// One raw cart line as submitted by the client.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    /// group key → chosen option identifier
    pub customizations: Option<BTreeMap<String, String>>,
}

/// Authoritative totals for an order.
#[derive(Debug, Clone)]
pub struct Totals {
    pub subtotal: Decimal,
    pub sst: Decimal,
    pub booking_fee: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub lines: Vec<OrderLine>,
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a cart against the active menu.
///
/// `menu` must contain only *active* items (the repository guarantees
/// this); an ID missing from the map means the item was deactivated or
/// never existed, and the whole cart is rejected so the client refreshes.
///
/// An empty cart prices to fees only; callers reject empty carts up front.
pub fn price_cart(
    menu: &HashMap<String, MenuItem>,
    items: &[CartLine],
    delivery_fee: Decimal,
) -> DomainResult<Totals> {
    let delivery_fee = round2(delivery_fee);
    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Decimal::ZERO;

    for item in items {
        let menu_item = menu.get(&item.id).ok_or(DomainError::ItemUnavailable)?;

        if item.quantity < MIN_QUANTITY || item.quantity > MAX_QUANTITY {
            return Err(DomainError::InvalidQuantity(item.id.clone()));
        }

        let mut chosen = Vec::new();
        let mut modifier_sum = Decimal::ZERO;
        if let Some(selections) = &item.customizations {
            for (group, value) in selections {
                let option = menu_item
                    .resolve_option(group, value)
                    .ok_or_else(|| DomainError::InvalidCustomization(item.id.clone()))?;
                modifier_sum += option.price_modifier;
                chosen.push(ChosenCustomization {
                    group: group.clone(),
                    value: option.value.clone(),
                    label: option.label.clone(),
                    price_modifier: option.price_modifier,
                });
            }
        }

        let line_total = round2((menu_item.price + modifier_sum) * Decimal::from(item.quantity));
        subtotal += line_total;

        lines.push(OrderLine {
            menu_item_id: menu_item.id.clone(),
            name: menu_item.name.clone(),
            base_price: menu_item.price,
            quantity: item.quantity,
            customizations: chosen,
            line_total,
        });
    }

    let subtotal = round2(subtotal);
    let sst = round2(subtotal * SST_RATE);
    let total = round2(subtotal + sst + BOOKING_FEE + delivery_fee);

    Ok(Totals {
        subtotal,
        sst,
        booking_fee: BOOKING_FEE,
        delivery_fee,
        total,
        lines,
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomizationGroup, CustomizationOption, CustomizationSchema};

    fn plain_item(id: &str, price: Decimal) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: format!("Item {}", id),
            price,
            is_active: true,
            customization: None,
        }
    }

    fn item_with_spice(id: &str, price: Decimal, modifier: Decimal) -> MenuItem {
        let mut schema = CustomizationSchema::new();
        schema.insert(
            "spiceLevel".into(),
            CustomizationGroup {
                label: "Spice level".into(),
                required: false,
                options: vec![CustomizationOption {
                    value: "extra-hot".into(),
                    label: "Extra hot".into(),
                    price_modifier: modifier,
                }],
            },
        );
        MenuItem {
            id: id.into(),
            name: format!("Item {}", id),
            price,
            is_active: true,
            customization: Some(schema),
        }
    }

    fn menu_of(items: Vec<MenuItem>) -> HashMap<String, MenuItem> {
        items.into_iter().map(|m| (m.id.clone(), m)).collect()
    }

    fn line(id: &str, quantity: u32) -> CartLine {
        CartLine {
            id: id.into(),
            quantity,
            customizations: None,
        }
    }

    #[test]
    fn prices_reference_cart() {
        // A: RM10 ×2, B: RM5 + spice (+RM2) ×1
        // subtotal 27.00, sst 1.62, booking fee 1.00 → total 29.62
        let menu = menu_of(vec![
            plain_item("a", Decimal::new(1000, 2)),
            item_with_spice("b", Decimal::new(500, 2), Decimal::new(200, 2)),
        ]);
        let mut spiced = line("b", 1);
        spiced.customizations = Some(BTreeMap::from([(
            "spiceLevel".to_string(),
            "extra-hot".to_string(),
        )]));

        let totals = price_cart(&menu, &[line("a", 2), spiced], Decimal::ZERO).unwrap();

        assert_eq!(totals.subtotal, Decimal::new(2700, 2));
        assert_eq!(totals.sst, Decimal::new(162, 2));
        assert_eq!(totals.booking_fee, Decimal::new(100, 2));
        assert_eq!(totals.total, Decimal::new(2962, 2));
        assert_eq!(totals.lines.len(), 2);
        assert_eq!(totals.lines[1].line_total, Decimal::new(700, 2));
        assert_eq!(totals.lines[1].customizations[0].label, "Extra hot");
    }

    #[test]
    fn delivery_fee_lands_in_total() {
        let menu = menu_of(vec![plain_item("a", Decimal::new(1000, 2))]);
        let totals = price_cart(&menu, &[line("a", 1)], Decimal::new(600, 2)).unwrap();
        // 10.00 + 0.60 sst + 1.00 fee + 6.00 delivery
        assert_eq!(totals.delivery_fee, Decimal::new(600, 2));
        assert_eq!(totals.total, Decimal::new(1760, 2));
    }

    #[test]
    fn missing_item_fails_cart() {
        let menu = menu_of(vec![plain_item("a", Decimal::new(1000, 2))]);
        let err = price_cart(&menu, &[line("a", 1), line("ghost", 1)], Decimal::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::ItemUnavailable));
    }

    #[test]
    fn quantity_bounds_are_enforced() {
        let menu = menu_of(vec![plain_item("a", Decimal::new(1000, 2))]);
        assert!(matches!(
            price_cart(&menu, &[line("a", 0)], Decimal::ZERO).unwrap_err(),
            DomainError::InvalidQuantity(_)
        ));
        assert!(matches!(
            price_cart(&menu, &[line("a", 101)], Decimal::ZERO).unwrap_err(),
            DomainError::InvalidQuantity(_)
        ));
        assert!(price_cart(&menu, &[line("a", 100)], Decimal::ZERO).is_ok());
    }

    #[test]
    fn unknown_customization_is_rejected() {
        let menu = menu_of(vec![item_with_spice(
            "b",
            Decimal::new(500, 2),
            Decimal::new(200, 2),
        )]);
        let mut l = line("b", 1);
        l.customizations = Some(BTreeMap::from([(
            "spiceLevel".to_string(),
            "free-gold".to_string(),
        )]));
        let err = price_cart(&menu, &[l], Decimal::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCustomization(_)));
    }

    #[test]
    fn client_cannot_influence_modifier_values() {
        // The cart line carries only identifiers; whatever the client
        // claimed a modifier was worth is unrepresentable here. The price
        // comes from the schema.
        let menu = menu_of(vec![item_with_spice(
            "b",
            Decimal::new(500, 2),
            Decimal::new(200, 2),
        )]);
        let mut l = line("b", 3);
        l.customizations = Some(BTreeMap::from([(
            "spiceLevel".to_string(),
            "extra-hot".to_string(),
        )]));
        let totals = price_cart(&menu, &[l], Decimal::ZERO).unwrap();
        // (5.00 + 2.00) × 3 = 21.00
        assert_eq!(totals.lines[0].line_total, Decimal::new(2100, 2));
    }

    #[test]
    fn empty_cart_prices_to_fees_only() {
        let menu = HashMap::new();
        let totals = price_cart(&menu, &[], Decimal::new(500, 2)).unwrap();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.sst, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(600, 2));
        assert!(totals.lines.is_empty());
    }

    #[test]
    fn money_is_rounded_half_away_from_zero() {
        // 1.75 × 0.06 = 0.105: banker's rounding would give 0.10,
        // half-away-from-zero gives 0.11
        let menu = menu_of(vec![plain_item("a", Decimal::new(175, 2))]);
        let totals = price_cart(&menu, &[line("a", 1)], Decimal::ZERO).unwrap();
        assert_eq!(totals.sst, Decimal::new(11, 2));
    }
}
