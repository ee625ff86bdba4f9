//! Quantity Tiers
//!
//! Order quantities map onto seven fixed pricing breakpoints. Each price
//! table carries one unit-price column per breakpoint; resolution picks the
//! highest breakpoint that does not exceed the actual order quantity, so an
//! order of 150 pieces prices at the 144 column, not 48 or 576.

use serde::{Deserialize, Serialize};

/// The seven quantity breakpoints used by every price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuantityTier {
    /// 48+ pieces (also used below the 48-piece minimum; no smaller column exists).
    Tier48,

    /// 144+ pieces.
    Tier144,

    /// 576+ pieces.
    Tier576,

    /// 1152+ pieces.
    Tier1152,

    /// 2880+ pieces.
    Tier2880,

    /// 10000+ pieces.
    Tier10000,

    /// 20000+ pieces.
    Tier20000,
}

impl QuantityTier {
    /// All tiers in ascending breakpoint order.
    pub const ALL: [QuantityTier; 7] = [
        QuantityTier::Tier48,
        QuantityTier::Tier144,
        QuantityTier::Tier576,
        QuantityTier::Tier1152,
        QuantityTier::Tier2880,
        QuantityTier::Tier10000,
        QuantityTier::Tier20000,
    ];

    /// Resolve the tier for an order quantity.
    ///
    /// Total over `u32`: every quantity resolves to exactly one tier, and
    /// quantities below the 48-piece minimum price at the 48 column.
    #[must_use]
    pub fn for_quantity(quantity: u32) -> Self {
        match quantity {
            0..=143 => QuantityTier::Tier48,
            144..=575 => QuantityTier::Tier144,
            576..=1151 => QuantityTier::Tier576,
            1152..=2879 => QuantityTier::Tier1152,
            2880..=9999 => QuantityTier::Tier2880,
            10000..=19999 => QuantityTier::Tier10000,
            20000.. => QuantityTier::Tier20000,
        }
    }

    /// The breakpoint quantity this tier starts at.
    #[must_use]
    pub fn breakpoint(self) -> u32 {
        match self {
            QuantityTier::Tier48 => 48,
            QuantityTier::Tier144 => 144,
            QuantityTier::Tier576 => 576,
            QuantityTier::Tier1152 => 1152,
            QuantityTier::Tier2880 => 2880,
            QuantityTier::Tier10000 => 10_000,
            QuantityTier::Tier20000 => 20_000,
        }
    }

    /// The source column this tier reads its unit price from.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            QuantityTier::Tier48 => "price48",
            QuantityTier::Tier144 => "price144",
            QuantityTier::Tier576 => "price576",
            QuantityTier::Tier1152 => "price1152",
            QuantityTier::Tier2880 => "price2880",
            QuantityTier::Tier10000 => "price10000",
            QuantityTier::Tier20000 => "price20000",
        }
    }
}
