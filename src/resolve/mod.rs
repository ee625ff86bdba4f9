//! Category Resolvers
//!
//! One resolver per cost category. Each looks an item up in its category's
//! price table and returns the unit price at the resolved quantity tier.
//! An unmatched closure, accessory, logo, or single fabric is a hard
//! [`ResolveError`] that aborts the enclosing order pricing, because
//! silently substituting a default price would misquote the customer. Only
//! dual-fabric components degrade gracefully.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod accessory;
pub mod blank_cap;
pub mod closure;
pub mod delivery;
pub mod fabric;
pub mod logo;

/// The six pricing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Blank-cap base price.
    BlankCap,

    /// Fabric upcharges.
    Fabric,

    /// Logo applications.
    Logo,

    /// Closure types.
    Closure,

    /// Accessories.
    Accessory,

    /// Delivery methods.
    Delivery,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::BlankCap => write!(f, "blank cap"),
            Category::Fabric => write!(f, "fabric"),
            Category::Logo => write!(f, "logo"),
            Category::Closure => write!(f, "closure"),
            Category::Accessory => write!(f, "accessory"),
            Category::Delivery => write!(f, "delivery"),
        }
    }
}

/// Errors raised by category resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No table entry matched the requested item.
    #[error("no {category} entry matched {name:?}")]
    Lookup {
        /// The category whose lookup failed.
        category: Category,

        /// The unmatched item name.
        name: String,
    },
}

impl ResolveError {
    /// Build a lookup failure for the given category and item name.
    #[must_use]
    pub fn lookup(category: Category, name: impl Into<String>) -> Self {
        ResolveError::Lookup {
            category,
            name: name.into(),
        }
    }
}
