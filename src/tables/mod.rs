//! Price Tables
//!
//! In-memory representation of the per-category cost tables. Each table row
//! names one purchasable item (a fabric, a logo application, a closure, …)
//! and carries a unit price per quantity breakpoint plus a margin
//! percentage. Rows are immutable once loaded; lookup is case-insensitive
//! by item name.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{catalog::ProductTier, tiers::QuantityTier};

pub mod book;
pub mod source;

pub use book::PriceBook;
pub use source::TableSources;

/// Identifies one physical price table.
///
/// Blank-cap pricing ships as three tables, one per product tier; every
/// other category has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Blank-cap base prices for one product tier.
    BlankCap(ProductTier),

    /// Fabric upcharges.
    Fabric,

    /// Logo applications (type × size × application method).
    Logo,

    /// Closure types.
    Closure,

    /// Accessories.
    Accessory,

    /// Delivery methods.
    Delivery,
}

/// Unit prices at the seven quantity breakpoints.
///
/// A `"Not Applicable"` source cell has already been coerced to zero by the
/// loader, so every value here is a plain non-negative decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrices {
    /// Unit price at 48+ pieces.
    pub price48: Decimal,

    /// Unit price at 144+ pieces.
    pub price144: Decimal,

    /// Unit price at 576+ pieces.
    pub price576: Decimal,

    /// Unit price at 1152+ pieces.
    pub price1152: Decimal,

    /// Unit price at 2880+ pieces.
    pub price2880: Decimal,

    /// Unit price at 10000+ pieces.
    pub price10000: Decimal,

    /// Unit price at 20000+ pieces.
    pub price20000: Decimal,
}

impl TierPrices {
    /// Unit price at the given quantity tier.
    #[must_use]
    pub fn at(&self, tier: QuantityTier) -> Decimal {
        match tier {
            QuantityTier::Tier48 => self.price48,
            QuantityTier::Tier144 => self.price144,
            QuantityTier::Tier576 => self.price576,
            QuantityTier::Tier1152 => self.price1152,
            QuantityTier::Tier2880 => self.price2880,
            QuantityTier::Tier10000 => self.price10000,
            QuantityTier::Tier20000 => self.price20000,
        }
    }

    /// Unit price for an order quantity (resolves the tier first).
    #[must_use]
    pub fn for_quantity(&self, quantity: u32) -> Decimal {
        self.at(QuantityTier::for_quantity(quantity))
    }
}

/// Cost classification for fabric rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostType {
    /// The fabric is included in the blank-cap price and must cost exactly zero.
    Free,

    /// The fabric carries a per-unit upcharge.
    #[default]
    Premium,
}

impl CostType {
    /// Parse the `costType` source cell.
    #[must_use]
    pub fn parse(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("free") {
            CostType::Free
        } else {
            CostType::Premium
        }
    }
}

/// One-time tooling fee class attached to certain logo applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoldClass {
    /// No mold required.
    #[default]
    None,

    /// Small mold, $50 flat.
    Small,

    /// Medium mold, $80 flat.
    Medium,

    /// Large mold, $120 flat.
    Large,
}

impl MoldClass {
    /// Parse the `MoldCharge` descriptor cell (`"Small Mold Charge"`, …).
    ///
    /// An empty or unrecognized descriptor means no mold charge.
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let lowered = descriptor.to_lowercase();

        if lowered.contains("small") {
            MoldClass::Small
        } else if lowered.contains("medium") {
            MoldClass::Medium
        } else if lowered.contains("large") {
            MoldClass::Large
        } else {
            MoldClass::None
        }
    }

    /// The flat charge amount for this class.
    #[must_use]
    pub fn amount(self) -> Decimal {
        match self {
            MoldClass::None => Decimal::ZERO,
            MoldClass::Small => Decimal::from(50),
            MoldClass::Medium => Decimal::from(80),
            MoldClass::Large => Decimal::from(120),
        }
    }
}

/// Category-specific columns carried by a price row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFields {
    /// Blank-cap and accessory rows carry no extra columns.
    Plain,

    /// Fabric rows: cost classification and an optional color note.
    Fabric {
        /// Whether the fabric is free or a premium upcharge.
        cost_type: CostType,

        /// Free-text note about available colors.
        color_note: String,
    },

    /// Logo rows: matched on application and size as well as name.
    Logo {
        /// Application method (`Direct`, `Patch`, …).
        application: String,

        /// Logo size (`Small`, `Medium`, `Large`).
        size: String,

        /// Example dimensions for the size.
        size_example: String,

        /// Mold charge class derived from the descriptor column.
        mold_charge: MoldClass,
    },

    /// Closure rows: closure family and a free-text comment.
    Closure {
        /// Closure family (`Snapback`, `Fitted`, …).
        closure_type: String,

        /// Free-text comment.
        comment: String,
    },

    /// Delivery rows: method family and transit time.
    Delivery {
        /// Delivery family (`Air`, `Sea`, …).
        delivery_type: String,

        /// Transit days quoted for the method.
        delivery_days: String,
    },
}

/// One catalog entry in a category price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Item name; the case-insensitive lookup key.
    pub name: String,

    /// Unit prices per quantity breakpoint.
    pub prices: TierPrices,

    /// Margin percentage (0–100) baked into customer-facing pricing.
    pub margin_percent: Decimal,

    /// Category-specific columns.
    pub fields: CategoryFields,
}

/// An immutable, loaded price table with a case-insensitive name index.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    rows: Vec<PriceRow>,
    index: FxHashMap<String, usize>,
}

impl CategoryTable {
    /// Build a table from loaded rows.
    ///
    /// Later rows win duplicate names, matching source-file precedence.
    #[must_use]
    pub fn new(rows: Vec<PriceRow>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(position, row)| (row.name.to_lowercase(), position))
            .collect();

        Self { rows, index }
    }

    /// An empty table, used when a source fails to load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact, case-insensitive lookup by item name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PriceRow> {
        self.index
            .get(&name.trim().to_lowercase())
            .and_then(|position| self.rows.get(*position))
    }

    /// Substring, case-insensitive lookup: matches when either name
    /// contains the other. Used by delivery-method resolution.
    #[must_use]
    pub fn find_containing(&self, name: &str) -> Option<&PriceRow> {
        let needle = name.trim().to_lowercase();

        self.rows.iter().find(|row| {
            let row_name = row.name.to_lowercase();
            row_name.contains(&needle) || needle.contains(&row_name)
        })
    }

    /// Logo lookup: name-substring match combined with equality on the
    /// size and application columns.
    #[must_use]
    pub fn find_logo(&self, name: &str, size: &str, application: &str) -> Option<&PriceRow> {
        let needle = name.trim().to_lowercase();

        self.rows.iter().find(|row| {
            let CategoryFields::Logo {
                application: row_application,
                size: row_size,
                ..
            } = &row.fields
            else {
                return false;
            };

            let row_name = row.name.to_lowercase();

            (row_name.contains(&needle) || needle.contains(&row_name))
                && row_size.eq_ignore_ascii_case(size.trim())
                && row_application.eq_ignore_ascii_case(application.trim())
        })
    }
}
