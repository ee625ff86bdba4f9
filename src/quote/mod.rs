//! Quote Parsing
//!
//! Extracts a structured order specification from a free-text chat message.
//! The parser only activates on messages that look like a completed quote
//! (both a `Total Order: $N` amount and an `N pieces` count must be
//! present) and never fails: every internal miss degrades to a documented default,
//! and anything unrecoverable returns `None` ("no quote in this message"),
//! never an error.
//!
//! Each attribute has its own extractor built as an ordered list of
//! candidate patterns tried most-specific-first, with first-success-wins
//! semantics. A caller-supplied [`QuoteContext`] re-applies values
//! established earlier in the conversation on top of whatever this message
//! yields, so a follow-up that only confirms a subset of attributes cannot
//! silently regress the rest to extractor defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

mod accessories;
mod attributes;
mod colors;
mod context;
mod fabric;
mod logos;
mod patterns;

pub use context::QuoteContext;

/// Cap-level attributes extracted from a quote message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapDetails {
    /// Product name, when the message states one.
    pub product_name: Option<String>,

    /// Number of caps quoted.
    pub quantity: u32,

    /// Cap size ("7 1/4", "One Size").
    pub size: String,

    /// Cap colors; a two-tone combo stays one joined entry ("Royal/Black").
    pub colors: Vec<String>,

    /// Crown profile ("High", "Mid", "Low").
    pub profile: String,

    /// Bill shape ("Flat", "Slight Curved", "Curved").
    pub bill_shape: String,

    /// Construction ("Structured", "Unstructured", "Foam").
    pub structure: String,

    /// Fabric name; dual fabrics stay one joined entry ("Acrylic/Air Mesh").
    pub fabric: String,

    /// Closure type ("Snapback", "Fitted", …).
    pub closure: String,
}

/// One logo extracted from a quote message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoSpec {
    /// Cap position ("Front", "Back", "Upper Bill", …).
    pub location: String,

    /// Logo type ("3D Embroidery", "Leather Patch", …).
    pub logo_type: String,

    /// Logo size ("Small", "Medium", "Large").
    pub size: String,

    /// One-time mold charge, when previously established.
    #[serde(default)]
    pub mold_charge: Option<Decimal>,

    /// Total cost for this logo, when previously established.
    #[serde(default)]
    pub total_cost: Option<Decimal>,
}

/// Customization extracted from a quote message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customization {
    /// Logos by position.
    pub logos: Vec<LogoSpec>,

    /// Accessory names.
    pub accessories: Vec<String>,
}

/// Delivery details extracted from a quote message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverySpec {
    /// Delivery method ("Regular Delivery", "Priority Delivery").
    pub method: String,

    /// Quoted lead time, when stated ("10-14 business days").
    pub lead_time: Option<String>,

    /// Delivery cost stated by the message.
    pub cost: Decimal,
}

/// Pricing figures extracted from a quote message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePricing {
    /// Blank-cap/base product cost.
    pub base_product_cost: Decimal,

    /// Customization (logos) cost.
    pub logos_cost: Decimal,

    /// Delivery cost.
    pub delivery_cost: Decimal,

    /// Grand total stated by the message.
    pub total: Decimal,

    /// Number of caps the total covers.
    pub quantity: u32,
}

/// A structured order specification extracted from one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuote {
    /// Cap-level attributes.
    pub cap: CapDetails,

    /// Logos and accessories.
    pub customization: Customization,

    /// Delivery method, lead time, and cost.
    pub delivery: DeliverySpec,

    /// The message's own pricing figures.
    pub pricing: QuotePricing,
}

/// The quote parser, holding every compiled pattern set.
#[derive(Debug)]
pub struct QuoteParser {
    money: patterns::MoneyPatterns,
    fabric: fabric::FabricExtractor,
    colors: colors::ColorExtractor,
    accessories: accessories::AccessoryExtractor,
    logos: logos::LogoExtractor,
    attributes: attributes::AttributeExtractors,
}

impl QuoteParser {
    /// Compile every extractor's pattern set.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if any pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            money: patterns::MoneyPatterns::new()?,
            fabric: fabric::FabricExtractor::new()?,
            colors: colors::ColorExtractor::new()?,
            accessories: accessories::AccessoryExtractor::new()?,
            logos: logos::LogoExtractor::new()?,
            attributes: attributes::AttributeExtractors::new()?,
        })
    }

    /// Parse a chat message into a structured quote.
    ///
    /// Returns `None` when the message does not carry both a
    /// `Total Order: $N` amount and an `N pieces` count; ordinary chat is
    /// not a quote. Preserved context fields, when supplied, override the
    /// freshly extracted values.
    #[must_use]
    pub fn parse(&self, message: &str, context: Option<&QuoteContext>) -> Option<ParsedQuote> {
        let total = self.money.total(message);
        let quantity = self.money.pieces(message);

        let (Some(total), Some(quantity)) = (total, quantity) else {
            tracing::debug!("message lacks a total/pieces pair; not a quote");
            return None;
        };

        let delivery_cost = self.money.delivery_cost(message).unwrap_or(Decimal::ZERO);

        let mut parsed = ParsedQuote {
            cap: CapDetails {
                product_name: self.attributes.product_name(message),
                quantity,
                size: self.attributes.size(message),
                colors: self.colors.extract(message),
                profile: self.attributes.profile(message),
                bill_shape: self.attributes.bill_shape(message),
                structure: self.attributes.structure(message),
                fabric: self.fabric.extract(message),
                closure: self.attributes.closure(message),
            },
            customization: Customization {
                logos: self.logos.extract(message),
                accessories: self.accessories.extract(message),
            },
            delivery: DeliverySpec {
                method: self.attributes.delivery_method(message),
                lead_time: self.attributes.lead_time(message),
                cost: delivery_cost,
            },
            pricing: QuotePricing {
                base_product_cost: self.money.base_cost(message).unwrap_or(Decimal::ZERO),
                logos_cost: self.money.customization_cost(message).unwrap_or(Decimal::ZERO),
                delivery_cost,
                total,
                quantity,
            },
        };

        if let Some(context) = context {
            context.apply(&mut parsed);
        }

        Some(parsed)
    }
}
