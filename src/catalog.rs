//! Product Catalog
//!
//! Named cap products with descriptive attributes, used to infer which
//! blank-cap price table applies to a free-text product description. The
//! classifier scores every catalog entry by keyword overlap and falls back
//! to deterministic panel-count heuristics on a tie or zero score. It
//! always returns *a* tier, because pricing must always produce a price.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

/// Keyword-overlap score for a matching product-name token.
const SCORE_NAME_TOKEN: u32 = 1;

/// Keyword-overlap score for a matching profile term.
const SCORE_PROFILE: u32 = 2;

/// Keyword-overlap score for a matching bill-shape term.
const SCORE_BILL_SHAPE: u32 = 2;

/// Keyword-overlap score for a matching structure term.
const SCORE_STRUCTURE: u32 = 2;

/// Keyword-overlap score for a matching panel-count term.
const SCORE_PANEL_COUNT: u32 = 3;

/// Keyword-overlap score for a fabric term shared by description and entry.
const SCORE_FABRIC_TERM: u32 = 3;

/// Keyword-overlap score for a matching product nickname.
const SCORE_NICKNAME: u32 = 4;

/// Co-occurrence bonus: "duck camo" with a trucker/mesh product.
const BONUS_DUCK_CAMO_TRUCKER: u32 = 5;

/// Co-occurrence bonus: "trucker mesh" with a trucker product.
const BONUS_TRUCKER_MESH: u32 = 10;

/// Fabric terms that tie a description to a product's material styling.
const FABRIC_TERMS: [&str; 7] = [
    "trucker",
    "mesh",
    "camo",
    "suede",
    "corduroy",
    "denim",
    "leather",
];

new_key_type! {
    /// Catalog Entry Key
    pub struct CatalogKey;
}

/// The blank-cap price table a product belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductTier {
    /// Entry-level 5/6-panel curved styles.
    #[default]
    Tier1,

    /// Mid-range flat and specialty 5/6-panel styles.
    Tier2,

    /// Premium 7-panel and specialty construction styles.
    Tier3,
}

impl ProductTier {
    /// All tiers in ascending order.
    pub const ALL: [ProductTier; 3] = [ProductTier::Tier1, ProductTier::Tier2, ProductTier::Tier3];

    /// Parse a `priceTier` source cell (`"Tier 2"`, `"2"`).
    #[must_use]
    pub fn parse(cell: &str) -> Option<Self> {
        let lowered = cell.trim().to_lowercase();

        match lowered.trim_start_matches("tier").trim() {
            "1" => Some(ProductTier::Tier1),
            "2" => Some(ProductTier::Tier2),
            "3" => Some(ProductTier::Tier3),
            _ => None,
        }
    }
}

impl fmt::Display for ProductTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductTier::Tier1 => write!(f, "Tier 1"),
            ProductTier::Tier2 => write!(f, "Tier 2"),
            ProductTier::Tier3 => write!(f, "Tier 3"),
        }
    }
}

/// A named product with the descriptive attributes used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Product name (`"6-Panel Heritage 6C"`).
    pub name: String,

    /// Crown profile (`"High"`, `"Mid"`, `"Low"`).
    pub profile: String,

    /// Bill shape (`"Curved"`, `"Flat"`, `"Slight Curved"`).
    pub bill_shape: String,

    /// Number of crown panels.
    pub panel_count: u8,

    /// Construction (`"Structured"`, `"Unstructured"`, `"Foam"`).
    pub structure_type: String,

    /// Common nicknames customers use for the style.
    pub nicknames: SmallVec<[String; 5]>,

    /// The blank-cap price table the product belongs to.
    pub price_tier: ProductTier,
}

impl CatalogEntry {
    /// Whether the entry's name or nicknames mention the given lowercase term.
    fn mentions(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .nicknames
                .iter()
                .any(|nickname| nickname.to_lowercase().contains(term))
    }
}

/// The loaded product catalog with a case-insensitive name/nickname index.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    entries: SlotMap<CatalogKey, CatalogEntry>,
    by_name: FxHashMap<String, CatalogKey>,
}

impl ProductCatalog {
    /// Build a catalog from loaded entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Self::default();

        for entry in entries {
            let names: Vec<String> = std::iter::once(entry.name.to_lowercase())
                .chain(entry.nicknames.iter().map(|n| n.to_lowercase()))
                .collect();

            let key = catalog.entries.insert(entry);

            for name in names {
                catalog.by_name.insert(name, key);
            }
        }

        catalog
    }

    /// An empty catalog, used when the source fails to load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-insensitive lookup by product name or nickname.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .and_then(|key| self.entries.get(*key))
    }

    /// Infer the product tier for a free-text description.
    ///
    /// Seven-panel descriptions are always Tier 3. Otherwise every catalog
    /// entry is scored by keyword overlap and the best unique score wins; a
    /// tie or zero score falls through to panel-count heuristics. An empty
    /// catalog classifies as Tier 1 so pricing still proceeds.
    #[must_use]
    pub fn classify(&self, description: &str) -> ProductTier {
        let desc = description.to_lowercase();

        // 7-panel always prices as Tier 3, whatever else the text mentions.
        if desc.contains('7') && (desc.contains("panel") || desc.contains("crown")) {
            return ProductTier::Tier3;
        }

        if self.is_empty() {
            return ProductTier::Tier1;
        }

        let mut best: Option<(&CatalogEntry, u32)> = None;
        let mut tied = false;

        for entry in self.entries.values() {
            let score = score_entry(entry, &desc);

            match best {
                Some((_, best_score)) if score == best_score => tied = true,
                Some((_, best_score)) if score > best_score => {
                    best = Some((entry, score));
                    tied = false;
                }
                None => best = Some((entry, score)),
                Some(_) => {}
            }
        }

        match best {
            Some((entry, score)) if score > 0 && !tied => entry.price_tier,
            _ => heuristic_tier(&desc),
        }
    }
}

/// Keyword-overlap score of one catalog entry against a lowercase description.
fn score_entry(entry: &CatalogEntry, desc: &str) -> u32 {
    let mut score = 0;

    let hyphenated = format!("{}-panel", entry.panel_count);
    let spaced = format!("{} panel", entry.panel_count);
    if desc.contains(&hyphenated) || desc.contains(&spaced) {
        score += SCORE_PANEL_COUNT;
    }

    let profile = entry.profile.to_lowercase();
    if !profile.is_empty() && desc.contains(&profile) && desc.contains("profile") {
        score += SCORE_PROFILE;
    }

    let bill = entry.bill_shape.to_lowercase();
    if !bill.is_empty() && desc.contains(&bill) {
        score += SCORE_BILL_SHAPE;
    }

    let structure = entry.structure_type.to_lowercase();
    if !structure.is_empty() && desc.contains(&structure) {
        score += SCORE_STRUCTURE;
    }

    for nickname in &entry.nicknames {
        if desc.contains(&nickname.to_lowercase()) {
            score += SCORE_NICKNAME;
        }
    }

    for token in entry.name.to_lowercase().split_whitespace() {
        if token.len() > 2 && desc.contains(token) {
            score += SCORE_NAME_TOKEN;
        }
    }

    for term in FABRIC_TERMS {
        if desc.contains(term) && entry.mentions(term) {
            score += SCORE_FABRIC_TERM;
        }
    }

    // Empirically tuned co-occurrence bonuses; treat as configuration.
    if desc.contains("duck camo")
        && (desc.contains("trucker") || desc.contains("mesh"))
        && (entry.mentions("trucker") || entry.mentions("mesh"))
    {
        score += BONUS_DUCK_CAMO_TRUCKER;
    }

    if desc.contains("trucker mesh") && entry.mentions("trucker") {
        score += BONUS_TRUCKER_MESH;
    }

    score
}

/// Deterministic fallback when catalog scoring is ambiguous.
fn heuristic_tier(desc: &str) -> ProductTier {
    let curved = desc.contains("curved") && !desc.contains("flat") && !desc.contains("slight");

    let five_or_six_panel =
        (desc.contains('5') || desc.contains('6')) && desc.contains("panel");

    if five_or_six_panel {
        if curved {
            return ProductTier::Tier1;
        }

        return ProductTier::Tier2;
    }

    // "6-Panel Heritage" assumption: an unrecognized style prices mid-table.
    ProductTier::Tier2
}
