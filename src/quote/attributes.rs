//! Attribute Extraction
//!
//! Short ordered-pattern extractors for the remaining cap attributes:
//! profile, structure, closure, bill shape, size, lead time, delivery
//! method, and product name. Each tries its candidates most-specific-first
//! and returns a documented default when nothing matches.
//!
//! Bill shape keeps the full three-way `Flat` / `Slight Curved` / `Curved`
//! distinction: "slight curved" is matched ahead of plain "curved" so it
//! is never collapsed, and feeding an already-normalized value back
//! through the extractor returns it unchanged.

use regex::Regex;

use crate::quote::patterns::{capture_string, title_case};

/// Profile assumed when the message states none.
const DEFAULT_PROFILE: &str = "High";

/// Structure assumed when the message states none.
const DEFAULT_STRUCTURE: &str = "Structured";

/// Closure assumed when the message states none.
const DEFAULT_CLOSURE: &str = "Snapback";

/// Bill shape assumed when the message states none.
const DEFAULT_BILL_SHAPE: &str = "Curved";

/// Size assumed when the message states none.
const DEFAULT_SIZE: &str = "One Size";

/// Delivery method assumed when the message states none.
const DEFAULT_DELIVERY: &str = "Regular Delivery";

#[derive(Debug)]
pub(crate) struct AttributeExtractors {
    profile: Regex,
    structure: Regex,
    closure: Regex,
    bill_slight: Regex,
    bill_flat: Regex,
    bill_curved: Regex,
    size_hat: Regex,
    size_labeled: Regex,
    lead_range: Regex,
    lead_single: Regex,
    lead_weeks: Regex,
    lead_labeled: Regex,
    delivery_priority: Regex,
    delivery_freight: Regex,
    product_labeled: Regex,
    product_pieces_of: Regex,
}

impl AttributeExtractors {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            profile: Regex::new(r"(?i)\b(high|mid|medium|low)[\s-]*profile\b")?,
            structure: Regex::new(r"(?i)\b(unstructured|structured|foam)\b")?,
            closure: Regex::new(
                r"(?i)\b(fitted|snap\s?back|strap\s?back|adjustable|velcro|buckle|elastic|stretch)\b",
            )?,
            bill_slight: Regex::new(r"(?i)\bslight(?:ly)?[\s-]*curved\b")?,
            bill_flat: Regex::new(r"(?i)\bflat\b")?,
            bill_curved: Regex::new(r"(?i)\b(?:pre[\s-]*)?curved\b")?,
            size_hat: Regex::new(r"\b([67]\s+[0-9]/[0-9])\b")?,
            size_labeled: Regex::new(r"(?im)\bsize\s*:\s*([^\n,]+?)\s*$")?,
            lead_range: Regex::new(
                r"(?i)\b([0-9]{1,2}\s*[-–]\s*[0-9]{1,2}\s*(?:business\s+)?days)\b",
            )?,
            lead_single: Regex::new(r"(?i)\b([0-9]{1,2}\s*(?:business\s+)?days)\b")?,
            lead_weeks: Regex::new(r"(?i)\b([0-9]{1,2}\s*(?:[-–]\s*[0-9]{1,2}\s*)?weeks?)\b")?,
            lead_labeled: Regex::new(r"(?im)\blead\s*time\s*:\s*([^\n,]+?)\s*$")?,
            delivery_priority: Regex::new(r"(?i)\b(priority|rush|express|expedited)\b")?,
            delivery_freight: Regex::new(r"(?i)\b(air|sea)\s+freight\b")?,
            product_labeled: Regex::new(r"(?im)\bproduct\s*:\s*([^\n]+?)\s*$")?,
            product_pieces_of: Regex::new(
                r"(?i)\bpieces\s+of\s+(?:the\s+)?([A-Za-z0-9][A-Za-z0-9 -]{2,50})",
            )?,
        })
    }

    /// Crown profile; defaults to "High".
    pub(crate) fn profile(&self, text: &str) -> String {
        self.profile
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map_or_else(
                || DEFAULT_PROFILE.to_string(),
                |found| match found.as_str().to_lowercase().as_str() {
                    "mid" | "medium" => "Mid".to_string(),
                    "low" => "Low".to_string(),
                    _ => "High".to_string(),
                },
            )
    }

    /// Construction; defaults to "Structured".
    pub(crate) fn structure(&self, text: &str) -> String {
        self.structure
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| DEFAULT_STRUCTURE.to_string(), |found| title_case(found.as_str()))
    }

    /// Closure vocabulary: Fitted, Snapback, Adjustable, Velcro, Buckle,
    /// Elastic. Defaults to "Snapback".
    pub(crate) fn closure(&self, text: &str) -> String {
        self.closure
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map_or_else(
                || DEFAULT_CLOSURE.to_string(),
                |found| {
                    let collapsed = found.as_str().split_whitespace().collect::<String>();

                    match collapsed.to_lowercase().as_str() {
                        "fitted" => "Fitted".to_string(),
                        "snapback" => "Snapback".to_string(),
                        "strapback" | "adjustable" => "Adjustable".to_string(),
                        "velcro" => "Velcro".to_string(),
                        "buckle" => "Buckle".to_string(),
                        _ => "Elastic".to_string(),
                    }
                },
            )
    }

    /// Bill shape; keeps the three-way distinction and defaults to "Curved".
    pub(crate) fn bill_shape(&self, text: &str) -> String {
        if self.bill_slight.is_match(text) {
            return "Slight Curved".to_string();
        }

        if self.bill_flat.is_match(text) {
            return "Flat".to_string();
        }

        if self.bill_curved.is_match(text) {
            return "Curved".to_string();
        }

        DEFAULT_BILL_SHAPE.to_string()
    }

    /// Cap size; defaults to "One Size".
    pub(crate) fn size(&self, text: &str) -> String {
        if let Some(hat_size) = capture_string(&self.size_hat, text) {
            return hat_size;
        }

        if let Some(labeled) = capture_string(&self.size_labeled, text) {
            if !labeled.contains('$') {
                return labeled;
            }
        }

        DEFAULT_SIZE.to_string()
    }

    /// Quoted lead time, when the message states one.
    pub(crate) fn lead_time(&self, text: &str) -> Option<String> {
        capture_string(&self.lead_range, text)
            .or_else(|| capture_string(&self.lead_single, text))
            .or_else(|| capture_string(&self.lead_weeks, text))
            .or_else(|| capture_string(&self.lead_labeled, text))
    }

    /// Delivery method; defaults to "Regular Delivery".
    pub(crate) fn delivery_method(&self, text: &str) -> String {
        if self.delivery_priority.is_match(text) {
            return "Priority Delivery".to_string();
        }

        if let Some(freight) = self.delivery_freight.find(text) {
            return title_case(freight.as_str());
        }

        DEFAULT_DELIVERY.to_string()
    }

    /// Product name, when the message states one.
    pub(crate) fn product_name(&self, text: &str) -> Option<String> {
        capture_string(&self.product_labeled, text)
            .or_else(|| {
                capture_string(&self.product_pieces_of, text)
                    .map(|name| name.trim_end_matches(['.', ',', ' ']).to_string())
            })
            .filter(|name| !name.is_empty() && !name.contains('$'))
    }
}
