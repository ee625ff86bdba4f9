//! Margins
//!
//! Converts a raw cost into a customer-facing price. The margin percentage
//! is the share of the final price that is profit, so the conversion divides
//! rather than multiplies: `price = cost / (1 - margin) + flat`. The AI
//! pricing tables carry margin already baked in; this layer is the separate
//! "simplified margin" path used for display pricing.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::resolve::Category;

/// Highest accepted margin percentage; anything above clamps here so the
/// divisor can never reach zero or go negative.
const MARGIN_CAP_PERCENT: u32 = 99;

/// Apply a margin percentage (0–100) and a flat addition to a raw cost.
///
/// Guarantees that `cost` is exactly `(100 - margin)%` of the returned
/// price before the flat addition is layered on. The margin clamps to
/// [`MARGIN_CAP_PERCENT`]; the result never goes below zero.
#[must_use]
pub fn apply_margin(cost: Decimal, margin_percent: Decimal, flat_addition: Decimal) -> Decimal {
    let clamped = margin_percent
        .max(Decimal::ZERO)
        .min(Decimal::from(MARGIN_CAP_PERCENT));

    let keep_fraction = Decimal::ONE - clamped / Decimal::from(100);

    (cost / keep_fraction + flat_addition).max(Decimal::ZERO)
}

/// Default margin fractions per pricing category.
///
/// The defaults sit in the 30–60% band the storefront uses for display
/// pricing; construct explicitly to override any of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMargins {
    /// Margin on blank-cap base prices.
    pub blank_cap: Percentage,

    /// Margin on fabric upcharges.
    pub fabric: Percentage,

    /// Margin on logo applications.
    pub logo: Percentage,

    /// Margin on closures.
    pub closure: Percentage,

    /// Margin on accessories.
    pub accessory: Percentage,

    /// Margin on delivery.
    pub delivery: Percentage,
}

impl Default for CategoryMargins {
    fn default() -> Self {
        Self {
            blank_cap: Percentage::from(0.35),
            fabric: Percentage::from(0.40),
            logo: Percentage::from(0.45),
            closure: Percentage::from(0.50),
            accessory: Percentage::from(0.55),
            delivery: Percentage::from(0.30),
        }
    }
}

impl CategoryMargins {
    /// The margin fraction for one line category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> Percentage {
        match category {
            Category::BlankCap => self.blank_cap,
            Category::Fabric => self.fabric,
            Category::Logo => self.logo,
            Category::Closure => self.closure,
            Category::Accessory => self.accessory,
            Category::Delivery => self.delivery,
        }
    }

    /// Customer-facing price for a category cost, with a flat addition.
    #[must_use]
    pub fn customer_price(
        &self,
        category: Category,
        cost: Decimal,
        flat_addition: Decimal,
    ) -> Decimal {
        // The percentage crate keeps its decimal private; multiplying by one
        // hundred recovers the 0-100 form the margin formula expects.
        let margin_percent = self.for_category(category) * Decimal::from(100);

        apply_margin(cost, margin_percent, flat_addition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_share_of_final_price() {
        // At 50% margin the cost doubles: cost is half the customer price.
        assert_eq!(
            apply_margin(Decimal::from(10), Decimal::from(50), Decimal::ZERO),
            Decimal::from(20)
        );

        // At 20% margin the cost is 80% of the customer price.
        assert_eq!(
            apply_margin(Decimal::from(10), Decimal::from(20), Decimal::ZERO),
            Decimal::new(1250, 2)
        );
    }

    #[test]
    fn flat_addition_layers_after_margin() {
        assert_eq!(
            apply_margin(Decimal::from(10), Decimal::from(50), Decimal::from(3)),
            Decimal::from(23)
        );
    }

    #[test]
    fn margin_round_trips_to_cost() {
        for margin in [0_u32, 20, 36, 45, 50, 75, 90] {
            let margin = Decimal::from(margin);
            let cost = Decimal::new(1234, 2);

            let price = apply_margin(cost, margin, Decimal::ZERO);
            let recovered = price * (Decimal::ONE - margin / Decimal::from(100));

            let drift = (recovered - cost).abs();
            assert!(
                drift < Decimal::new(1, 10),
                "margin {margin} drifted by {drift}"
            );
        }
    }

    #[test]
    fn margin_clamps_at_ninety_nine() {
        let at_cap = apply_margin(Decimal::ONE, Decimal::from(99), Decimal::ZERO);
        let above_cap = apply_margin(Decimal::ONE, Decimal::from(150), Decimal::ZERO);

        assert_eq!(at_cap, above_cap);
        assert_eq!(at_cap, Decimal::from(100));
    }

    #[test]
    fn negative_margin_clamps_to_zero() {
        assert_eq!(
            apply_margin(Decimal::from(10), Decimal::from(-5), Decimal::ZERO),
            Decimal::from(10)
        );
    }

    #[test]
    fn zero_margin_is_identity() {
        assert_eq!(
            apply_margin(Decimal::from(7), Decimal::ZERO, Decimal::ZERO),
            Decimal::from(7)
        );
    }

    #[test]
    fn category_margins_default_within_band() {
        let margins = CategoryMargins::default();

        // 10 at 35% margin: 10 / 0.65 ≈ 15.38.
        let price = margins.customer_price(Category::BlankCap, Decimal::from(10), Decimal::ZERO);

        assert_eq!(price.round_dp(2), Decimal::new(1538, 2));
    }
}
