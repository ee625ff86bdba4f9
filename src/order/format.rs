//! AI-Formatted Breakdown
//!
//! Serializable projection of a [`PricingBreakdown`] carrying
//! pre-stringified lines for direct inclusion in a generated customer
//! message. Downstream message generation must only arrange these
//! strings, never recompute a price, so the quoted numbers cannot drift
//! from the engine's.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use serde::Serialize;

use crate::order::PricingBreakdown;

/// One pre-rendered breakdown line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiLine {
    /// The item or subtotal the line describes.
    pub name: String,

    /// The full customer-facing line.
    pub formatted_line: String,
}

/// The customer-message projection of a pricing breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiBreakdown {
    /// One line per priced item, in breakdown order.
    pub lines: Vec<AiLine>,

    /// One line per one-time mold charge.
    pub mold_charges: Vec<AiLine>,

    /// One line per non-zero category subtotal.
    pub subtotals: Vec<AiLine>,

    /// The grand-total line.
    pub total: AiLine,
}

/// Render a decimal amount as US dollars.
fn usd(amount: Decimal) -> String {
    Money::from_decimal(amount.round_dp(2), iso::USD).to_string()
}

impl From<&PricingBreakdown> for AiBreakdown {
    fn from(breakdown: &PricingBreakdown) -> Self {
        let lines = breakdown
            .line_items
            .iter()
            .map(|item| {
                let formatted_line = if item.is_free {
                    format!("{}: Free", item.name)
                } else {
                    format!(
                        "{}: {} x {} = {}",
                        item.name,
                        item.quantity,
                        usd(item.unit_price),
                        usd(item.total_price)
                    )
                };

                AiLine {
                    name: item.name.clone(),
                    formatted_line,
                }
            })
            .collect();

        let mold_charges = breakdown
            .mold_charges
            .iter()
            .map(|charge| AiLine {
                name: charge.name.clone(),
                formatted_line: format!("{}: {} (one-time)", charge.name, usd(charge.amount)),
            })
            .collect();

        let named_subtotals = [
            ("Blank Caps", breakdown.subtotals.blank_caps),
            ("Premium Fabric", breakdown.subtotals.fabric),
            ("Customization", breakdown.subtotals.customization),
            ("Delivery", breakdown.subtotals.delivery),
        ];

        let subtotals = named_subtotals
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(name, amount)| AiLine {
                name: name.to_string(),
                formatted_line: format!("{name}: {}", usd(amount)),
            })
            .collect();

        let total = AiLine {
            name: "Total Order".to_string(),
            formatted_line: format!("Total Order: {}", usd(breakdown.grand_total)),
        };

        Self {
            lines,
            mold_charges,
            subtotals,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        order::{LineItem, MoldCharge},
        resolve::Category,
    };

    use super::*;

    fn sample_breakdown() -> PricingBreakdown {
        PricingBreakdown::from_parts(
            288,
            vec![
                LineItem::new(
                    "6-Panel Heritage 6C",
                    "Tier 1 blank cap",
                    288,
                    Decimal::new(320, 2),
                    Category::BlankCap,
                ),
                LineItem::new("Polyester", "fabric", 288, Decimal::ZERO, Category::Fabric),
                LineItem::new(
                    "3D Embroidery",
                    "Large 3D Embroidery (Direct)",
                    288,
                    Decimal::new(120, 2),
                    Category::Logo,
                ),
            ],
            vec![MoldCharge {
                name: "3D Embroidery Mold Charge".to_string(),
                amount: Decimal::from(80),
            }],
        )
    }

    #[test]
    fn line_items_render_quantity_and_totals() {
        let projection = AiBreakdown::from(&sample_breakdown());

        let first = projection.lines.first().map(|line| line.formatted_line.clone());

        assert_eq!(
            first.as_deref(),
            Some("6-Panel Heritage 6C: 288 x $3.20 = $921.60")
        );
    }

    #[test]
    fn free_items_render_without_amounts() {
        let projection = AiBreakdown::from(&sample_breakdown());

        assert!(
            projection
                .lines
                .iter()
                .any(|line| line.formatted_line == "Polyester: Free"),
            "free fabric should render as Free"
        );
    }

    #[test]
    fn mold_charges_render_as_one_time_fees() {
        let projection = AiBreakdown::from(&sample_breakdown());

        assert_eq!(
            projection
                .mold_charges
                .first()
                .map(|line| line.formatted_line.clone())
                .as_deref(),
            Some("3D Embroidery Mold Charge: $80.00 (one-time)")
        );
    }

    #[test]
    fn zero_subtotals_are_omitted() {
        let projection = AiBreakdown::from(&sample_breakdown());

        assert!(
            projection
                .subtotals
                .iter()
                .all(|line| !line.name.contains("Delivery")),
            "no delivery line items, so no delivery subtotal"
        );
        // Fabric is free for this order, so its subtotal is zero and omitted.
        assert_eq!(projection.subtotals.len(), 2);
    }

    #[test]
    fn total_line_matches_grand_total() {
        let breakdown = sample_breakdown();
        let projection = AiBreakdown::from(&breakdown);

        // 288 * (3.20 + 1.20) + 80 = 1347.20
        assert_eq!(projection.total.formatted_line, "Total Order: $1,347.20");
    }
}
