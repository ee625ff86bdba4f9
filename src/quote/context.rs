//! Preserved Context
//!
//! A follow-up AI message often restates only part of an order in prose.
//! Whatever the conversation already established (quantity, colors,
//! logos, accessories, fabric, closure, size) must survive re-parsing,
//! so the caller hands the previously extracted values back in and they
//! override the fresh extraction wherever they are present and non-empty.

use serde::{Deserialize, Serialize};

use crate::quote::{LogoSpec, ParsedQuote};

/// Previously established order attributes.
///
/// Every field is optional; only present, non-empty values override the
/// corresponding freshly parsed value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteContext {
    /// Established order quantity.
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Established cap size.
    #[serde(default)]
    pub size: Option<String>,

    /// Established colors.
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    /// Established fabric.
    #[serde(default)]
    pub fabric: Option<String>,

    /// Established closure.
    #[serde(default)]
    pub closure: Option<String>,

    /// Established logos, including their mold-charge and cost figures.
    #[serde(default)]
    pub logos: Option<Vec<LogoSpec>>,

    /// Established accessories.
    #[serde(default)]
    pub accessories: Option<Vec<String>>,
}

impl QuoteContext {
    /// Override the parsed quote's fields with the preserved values.
    pub(crate) fn apply(&self, parsed: &mut ParsedQuote) {
        if let Some(quantity) = self.quantity {
            parsed.cap.quantity = quantity;
            parsed.pricing.quantity = quantity;
        }

        if let Some(size) = &self.size {
            if !size.is_empty() {
                parsed.cap.size.clone_from(size);
            }
        }

        if let Some(colors) = &self.colors {
            if !colors.is_empty() {
                parsed.cap.colors.clone_from(colors);
            }
        }

        if let Some(fabric) = &self.fabric {
            if !fabric.is_empty() {
                parsed.cap.fabric.clone_from(fabric);
            }
        }

        if let Some(closure) = &self.closure {
            if !closure.is_empty() {
                parsed.cap.closure.clone_from(closure);
            }
        }

        if let Some(logos) = &self.logos {
            if !logos.is_empty() {
                parsed.customization.logos.clone_from(logos);
            }
        }

        if let Some(accessories) = &self.accessories {
            if !accessories.is_empty() {
                parsed.customization.accessories.clone_from(accessories);
            }
        }
    }
}
