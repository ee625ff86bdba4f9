//! Order Pricing
//!
//! Orchestrates every category resolver for one order request and
//! assembles the result into an immutable [`PricingBreakdown`]: an ordered
//! list of priced line items, the one-time mold charges, per-category
//! subtotals, and the grand total. Any category-fatal lookup failure
//! aborts the whole aggregation; a partial order total is never returned
//! as if it were complete.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    resolve::{self, Category, ResolveError},
    tables::{MoldClass, PriceBook, TableId},
};

pub mod format;

pub use format::AiBreakdown;

/// One logo selection on an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoSelection {
    /// Logo type name ("3D Embroidery").
    pub name: String,

    /// Logo size ("Small", "Medium", "Large").
    pub size: String,

    /// Application method ("Direct", "Patch").
    pub application: String,

    /// Optional free-text description for the line item.
    #[serde(default)]
    pub description: Option<String>,
}

/// Everything needed to price one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Number of caps ordered.
    pub quantity: u32,

    /// Free-text cap description used to classify the product tier.
    #[serde(default)]
    pub product_description: Option<String>,

    /// Fabric selections; a name containing `/` is a dual fabric.
    #[serde(default)]
    pub fabrics: Vec<String>,

    /// Logo selections.
    #[serde(default)]
    pub logos: Vec<LogoSelection>,

    /// Accessory selections.
    #[serde(default)]
    pub accessories: Vec<String>,

    /// Closure selection, when the order upgrades from the default.
    #[serde(default)]
    pub closure: Option<String>,

    /// Delivery method name.
    pub delivery_method: String,
}

/// One priced component of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as quoted to the customer.
    pub name: String,

    /// Supporting description (tier, size, application, …).
    pub description: String,

    /// Order quantity the unit price applies to.
    pub quantity: u32,

    /// Per-unit price at the resolved quantity tier.
    pub unit_price: Decimal,

    /// `unit_price * quantity`, exactly.
    pub total_price: Decimal,

    /// The pricing category the item belongs to.
    pub category: Category,

    /// Whether the item costs nothing at this quantity.
    pub is_free: bool,
}

impl LineItem {
    /// Build a line item, deriving the total and free flag.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            quantity,
            unit_price,
            total_price: unit_price * Decimal::from(quantity),
            category,
            is_free: unit_price.is_zero(),
        }
    }
}

/// A one-time, quantity-independent tooling fee for a logo selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoldCharge {
    /// Which logo the charge belongs to.
    pub name: String,

    /// Flat amount; $50/$80/$120 by mold class.
    pub amount: Decimal,
}

/// Per-category subtotals over a breakdown's line items.
///
/// Customization combines the logo, accessory, and closure categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtotals {
    /// Blank-cap base cost.
    pub blank_caps: Decimal,

    /// Fabric upcharges.
    pub fabric: Decimal,

    /// Logos, accessories, and closures combined.
    pub customization: Decimal,

    /// Delivery cost.
    pub delivery: Decimal,
}

/// Aggregate pricing result for one order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Every priced line item, in resolution order.
    pub line_items: Vec<LineItem>,

    /// One-time mold charges collected alongside logo line items.
    pub mold_charges: Vec<MoldCharge>,

    /// Per-category subtotals.
    pub subtotals: Subtotals,

    /// Sum of all line-item totals plus all mold charges.
    pub grand_total: Decimal,

    /// The originating order quantity.
    pub quantity: u32,
}

impl PricingBreakdown {
    /// Assemble a breakdown, computing subtotals and the grand total.
    #[must_use]
    pub fn from_parts(
        quantity: u32,
        line_items: Vec<LineItem>,
        mold_charges: Vec<MoldCharge>,
    ) -> Self {
        let mut subtotals = Subtotals::default();

        for item in &line_items {
            match item.category {
                Category::BlankCap => subtotals.blank_caps += item.total_price,
                Category::Fabric => subtotals.fabric += item.total_price,
                Category::Logo | Category::Accessory | Category::Closure => {
                    subtotals.customization += item.total_price;
                }
                Category::Delivery => subtotals.delivery += item.total_price,
            }
        }

        let lines_total: Decimal = line_items.iter().map(|item| item.total_price).sum();
        let molds_total: Decimal = mold_charges.iter().map(|charge| charge.amount).sum();

        Self {
            line_items,
            mold_charges,
            subtotals,
            grand_total: lines_total + molds_total,
            quantity,
        }
    }
}

/// Price a full order request.
///
/// Resolvers run in a fixed order (blank cap, fabrics, logos,
/// accessories, closure, delivery) and their line items are collected in
/// that order.
///
/// # Errors
///
/// Returns the originating [`ResolveError`] when any category-fatal lookup
/// misses (closure, accessory, logo, single fabric, blank cap, delivery);
/// no partial breakdown is produced.
pub fn price_order(book: &PriceBook, request: &OrderRequest) -> Result<PricingBreakdown, ResolveError> {
    let quantity = request.quantity;
    let mut line_items = Vec::new();
    let mut mold_charges = Vec::new();

    let blank = resolve::blank_cap::resolve(book, request.product_description.as_deref(), quantity)?;

    line_items.push(LineItem::new(
        request
            .product_description
            .clone()
            .unwrap_or_else(|| "Blank Cap".to_string()),
        format!("{} blank cap", blank.tier),
        quantity,
        blank.unit_price,
        Category::BlankCap,
    ));

    let fabric_table = book.table(TableId::Fabric);
    for fabric in &request.fabrics {
        let unit_price = resolve::fabric::unit_price(&fabric_table, fabric, quantity)?;

        line_items.push(LineItem::new(
            fabric.clone(),
            "fabric",
            quantity,
            unit_price,
            Category::Fabric,
        ));
    }

    let logo_table = book.table(TableId::Logo);
    for selection in &request.logos {
        let logo = resolve::logo::resolve(
            &logo_table,
            &selection.name,
            &selection.size,
            &selection.application,
            quantity,
        )?;

        line_items.push(LineItem::new(
            selection.name.clone(),
            selection.description.clone().unwrap_or_else(|| {
                format!("{} {} ({})", selection.size, selection.name, selection.application)
            }),
            quantity,
            logo.unit_price,
            Category::Logo,
        ));

        if logo.mold != MoldClass::None {
            mold_charges.push(MoldCharge {
                name: format!("{} Mold Charge", selection.name),
                amount: logo.mold.amount(),
            });
        }
    }

    let accessory_table = book.table(TableId::Accessory);
    for accessory in &request.accessories {
        let unit_price = resolve::accessory::unit_price(&accessory_table, accessory, quantity)?;

        line_items.push(LineItem::new(
            accessory.clone(),
            "accessory",
            quantity,
            unit_price,
            Category::Accessory,
        ));
    }

    if let Some(closure) = &request.closure {
        let closure_table = book.table(TableId::Closure);
        let unit_price = resolve::closure::unit_price(&closure_table, closure, quantity)?;

        line_items.push(LineItem::new(
            closure.clone(),
            "closure",
            quantity,
            unit_price,
            Category::Closure,
        ));
    }

    let delivery_table = book.table(TableId::Delivery);
    let delivery_price =
        resolve::delivery::unit_price(&delivery_table, &request.delivery_method, quantity)?;

    line_items.push(LineItem::new(
        request.delivery_method.clone(),
        "delivery",
        quantity,
        delivery_price,
        Category::Delivery,
    ));

    Ok(PricingBreakdown::from_parts(quantity, line_items, mold_charges))
}
