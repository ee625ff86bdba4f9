//! Table Sources
//!
//! CSV-backed loading of the category price tables and the product catalog.
//! Every source file has a header row; columns begin with `Name` and end
//! with `margin`, with the seven `price48`–`price20000` columns between and
//! category-specific extras where noted. A price cell may literally contain
//! `"Not Applicable"`, which coerces to zero here so the rest of the engine
//! only ever sees plain decimals.
//!
//! A missing or unreadable source is a data problem, not a process-fatal
//! one: the `*_or_empty` variants log and return an empty table, leaving
//! resolvers to surface lookup failures naturally.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{CatalogEntry, ProductCatalog, ProductTier},
    tables::{CategoryFields, CategoryTable, CostType, MoldClass, PriceRow, TableId, TierPrices},
};

/// Errors raised while loading a tabular source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or a record could not be read.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A price or margin cell held something other than a number
    /// or `"Not Applicable"`.
    #[error("invalid price cell {cell:?} in row {name:?}")]
    Price {
        /// Row the bad cell belongs to.
        name: String,

        /// The offending cell contents.
        cell: String,

        /// Underlying decimal parse failure.
        #[source]
        source: rust_decimal::Error,
    },

    /// A `panelCount` cell was not a small integer.
    #[error("invalid panel count {cell:?} in row {name:?}")]
    PanelCount {
        /// Row the bad cell belongs to.
        name: String,

        /// The offending cell contents.
        cell: String,

        /// Underlying integer parse failure.
        #[source]
        source: std::num::ParseIntError,
    },

    /// A `priceTier` cell named an unknown tier.
    #[error("unknown price tier {cell:?} in row {name:?}")]
    Tier {
        /// Row the bad cell belongs to.
        name: String,

        /// The offending cell contents.
        cell: String,
    },
}

/// Filesystem locations of every tabular source.
///
/// Constructed explicitly and injected into the [`PriceBook`]; the engine
/// performs no environment or global lookups of its own.
///
/// [`PriceBook`]: crate::tables::PriceBook
#[derive(Debug, Clone)]
pub struct TableSources {
    /// Blank-cap base prices, Tier 1.
    pub blank_cap_tier1: PathBuf,

    /// Blank-cap base prices, Tier 2.
    pub blank_cap_tier2: PathBuf,

    /// Blank-cap base prices, Tier 3.
    pub blank_cap_tier3: PathBuf,

    /// Fabric upcharges.
    pub fabric: PathBuf,

    /// Logo applications.
    pub logo: PathBuf,

    /// Closure types.
    pub closure: PathBuf,

    /// Accessories.
    pub accessory: PathBuf,

    /// Delivery methods.
    pub delivery: PathBuf,

    /// Product catalog for tier classification.
    pub products: PathBuf,
}

impl TableSources {
    /// Canonical file layout under a single directory.
    pub fn under(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        Self {
            blank_cap_tier1: dir.join("blank_caps_tier1.csv"),
            blank_cap_tier2: dir.join("blank_caps_tier2.csv"),
            blank_cap_tier3: dir.join("blank_caps_tier3.csv"),
            fabric: dir.join("fabrics.csv"),
            logo: dir.join("logos.csv"),
            closure: dir.join("closures.csv"),
            accessory: dir.join("accessories.csv"),
            delivery: dir.join("delivery.csv"),
            products: dir.join("products.csv"),
        }
    }

    /// Source path for one physical table.
    #[must_use]
    pub fn path_for(&self, id: TableId) -> &Path {
        match id {
            TableId::BlankCap(ProductTier::Tier1) => &self.blank_cap_tier1,
            TableId::BlankCap(ProductTier::Tier2) => &self.blank_cap_tier2,
            TableId::BlankCap(ProductTier::Tier3) => &self.blank_cap_tier3,
            TableId::Fabric => &self.fabric,
            TableId::Logo => &self.logo,
            TableId::Closure => &self.closure,
            TableId::Accessory => &self.accessory,
            TableId::Delivery => &self.delivery,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlainRecord {
    #[serde(rename = "Name")]
    name: String,
    price48: String,
    price144: String,
    price576: String,
    price1152: String,
    price2880: String,
    price10000: String,
    price20000: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct FabricRecord {
    #[serde(rename = "Name")]
    name: String,
    price48: String,
    price144: String,
    price576: String,
    price1152: String,
    price2880: String,
    price10000: String,
    price20000: String,
    #[serde(rename = "costType")]
    cost_type: String,
    #[serde(rename = "ColorNote", default)]
    color_note: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct LogoRecord {
    #[serde(rename = "Name")]
    name: String,
    price48: String,
    price144: String,
    price576: String,
    price1152: String,
    price2880: String,
    price10000: String,
    price20000: String,
    #[serde(rename = "Application")]
    application: String,
    #[serde(rename = "Size")]
    size: String,
    #[serde(rename = "SizeExample", default)]
    size_example: String,
    #[serde(rename = "MoldCharge", default)]
    mold_charge: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct ClosureRecord {
    #[serde(rename = "Name")]
    name: String,
    price48: String,
    price144: String,
    price576: String,
    price1152: String,
    price2880: String,
    price10000: String,
    price20000: String,
    #[serde(rename = "type", default)]
    closure_type: String,
    #[serde(rename = "Comment", default)]
    comment: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct DeliveryRecord {
    #[serde(rename = "Name")]
    name: String,
    price48: String,
    price144: String,
    price576: String,
    price1152: String,
    price2880: String,
    price10000: String,
    price20000: String,
    #[serde(rename = "type", default)]
    delivery_type: String,
    #[serde(rename = "DeliveryDays", default)]
    delivery_days: String,
    margin: String,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Profile", default)]
    profile: String,
    #[serde(rename = "billOrVisorShape", default)]
    bill_shape: String,
    #[serde(rename = "panelCount")]
    panel_count: String,
    #[serde(rename = "priceTier")]
    price_tier: String,
    #[serde(rename = "structureType", default)]
    structure_type: String,
    #[serde(rename = "nickNames", default)]
    nicknames: String,
}

/// Parse a price or margin cell; `"Not Applicable"`, blanks, and a leading
/// `$` are tolerated.
fn parse_price(name: &str, cell: &str) -> Result<Decimal, LoadError> {
    let trimmed = cell.trim().trim_start_matches('$').trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("not applicable") {
        return Ok(Decimal::ZERO);
    }

    trimmed
        .replace(',', "")
        .parse()
        .map_err(|source| LoadError::Price {
            name: name.to_string(),
            cell: cell.to_string(),
            source,
        })
}

fn tier_prices(name: &str, cells: [&str; 7]) -> Result<TierPrices, LoadError> {
    let [p48, p144, p576, p1152, p2880, p10000, p20000] = cells;

    Ok(TierPrices {
        price48: parse_price(name, p48)?,
        price144: parse_price(name, p144)?,
        price576: parse_price(name, p576)?,
        price1152: parse_price(name, p1152)?,
        price2880: parse_price(name, p2880)?,
        price10000: parse_price(name, p10000)?,
        price20000: parse_price(name, p20000)?,
    })
}

/// Load one category price table.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or a cell fails to
/// parse. Use [`load_table_or_empty`] where degradation is wanted instead.
pub fn load_table(path: &Path, id: TableId) -> Result<CategoryTable, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    match id {
        TableId::BlankCap(_) | TableId::Accessory => {
            for record in reader.deserialize() {
                let record: PlainRecord = record?;
                rows.push(plain_row(&record)?);
            }
        }
        TableId::Fabric => {
            for record in reader.deserialize() {
                let record: FabricRecord = record?;
                rows.push(fabric_row(&record)?);
            }
        }
        TableId::Logo => {
            for record in reader.deserialize() {
                let record: LogoRecord = record?;
                rows.push(logo_row(&record)?);
            }
        }
        TableId::Closure => {
            for record in reader.deserialize() {
                let record: ClosureRecord = record?;
                rows.push(closure_row(&record)?);
            }
        }
        TableId::Delivery => {
            for record in reader.deserialize() {
                let record: DeliveryRecord = record?;
                rows.push(delivery_row(&record)?);
            }
        }
    }

    Ok(CategoryTable::new(rows))
}

/// Load one category table, degrading to an empty table on any failure.
///
/// The failure is logged; resolvers will then miss their lookups naturally
/// rather than the process failing at load time.
#[must_use]
pub fn load_table_or_empty(path: &Path, id: TableId) -> CategoryTable {
    match load_table(path, id) {
        Ok(table) => table,
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "price table failed to load; using empty table");
            CategoryTable::empty()
        }
    }
}

/// Load the product catalog.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or a cell fails to
/// parse. Use [`load_catalog_or_empty`] where degradation is wanted instead.
pub fn load_catalog(path: &Path) -> Result<ProductCatalog, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();

    for record in reader.deserialize() {
        let record: ProductRecord = record?;

        let panel_count =
            record
                .panel_count
                .trim()
                .parse()
                .map_err(|source| LoadError::PanelCount {
                    name: record.name.clone(),
                    cell: record.panel_count.clone(),
                    source,
                })?;

        let price_tier = ProductTier::parse(&record.price_tier).ok_or_else(|| LoadError::Tier {
            name: record.name.clone(),
            cell: record.price_tier.clone(),
        })?;

        entries.push(CatalogEntry {
            name: record.name,
            profile: record.profile,
            bill_shape: record.bill_shape,
            panel_count,
            structure_type: record.structure_type,
            nicknames: record
                .nicknames
                .split(';')
                .map(str::trim)
                .filter(|nickname| !nickname.is_empty())
                .map(ToString::to_string)
                .collect(),
            price_tier,
        });
    }

    Ok(ProductCatalog::new(entries))
}

/// Load the product catalog, degrading to an empty catalog on any failure.
#[must_use]
pub fn load_catalog_or_empty(path: &Path) -> ProductCatalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "product catalog failed to load; using empty catalog");
            ProductCatalog::empty()
        }
    }
}

fn prices_and_margin(
    name: &str,
    cells: [&str; 7],
    margin: &str,
) -> Result<(TierPrices, Decimal), LoadError> {
    Ok((tier_prices(name, cells)?, parse_price(name, margin)?))
}

fn plain_row(record: &PlainRecord) -> Result<PriceRow, LoadError> {
    let (prices, margin_percent) = prices_and_margin(
        &record.name,
        [
            &record.price48,
            &record.price144,
            &record.price576,
            &record.price1152,
            &record.price2880,
            &record.price10000,
            &record.price20000,
        ],
        &record.margin,
    )?;

    Ok(PriceRow {
        name: record.name.clone(),
        prices,
        margin_percent,
        fields: CategoryFields::Plain,
    })
}

fn fabric_row(record: &FabricRecord) -> Result<PriceRow, LoadError> {
    let (prices, margin_percent) = prices_and_margin(
        &record.name,
        [
            &record.price48,
            &record.price144,
            &record.price576,
            &record.price1152,
            &record.price2880,
            &record.price10000,
            &record.price20000,
        ],
        &record.margin,
    )?;

    Ok(PriceRow {
        name: record.name.clone(),
        prices,
        margin_percent,
        fields: CategoryFields::Fabric {
            cost_type: CostType::parse(&record.cost_type),
            color_note: record.color_note.clone(),
        },
    })
}

fn logo_row(record: &LogoRecord) -> Result<PriceRow, LoadError> {
    let (prices, margin_percent) = prices_and_margin(
        &record.name,
        [
            &record.price48,
            &record.price144,
            &record.price576,
            &record.price1152,
            &record.price2880,
            &record.price10000,
            &record.price20000,
        ],
        &record.margin,
    )?;

    Ok(PriceRow {
        name: record.name.clone(),
        prices,
        margin_percent,
        fields: CategoryFields::Logo {
            application: record.application.clone(),
            size: record.size.clone(),
            size_example: record.size_example.clone(),
            mold_charge: MoldClass::parse(&record.mold_charge),
        },
    })
}

fn closure_row(record: &ClosureRecord) -> Result<PriceRow, LoadError> {
    let (prices, margin_percent) = prices_and_margin(
        &record.name,
        [
            &record.price48,
            &record.price144,
            &record.price576,
            &record.price1152,
            &record.price2880,
            &record.price10000,
            &record.price20000,
        ],
        &record.margin,
    )?;

    Ok(PriceRow {
        name: record.name.clone(),
        prices,
        margin_percent,
        fields: CategoryFields::Closure {
            closure_type: record.closure_type.clone(),
            comment: record.comment.clone(),
        },
    })
}

fn delivery_row(record: &DeliveryRecord) -> Result<PriceRow, LoadError> {
    let (prices, margin_percent) = prices_and_margin(
        &record.name,
        [
            &record.price48,
            &record.price144,
            &record.price576,
            &record.price1152,
            &record.price2880,
            &record.price10000,
            &record.price20000,
        ],
        &record.margin,
    )?;

    Ok(PriceRow {
        name: record.name.clone(),
        prices,
        margin_percent,
        fields: CategoryFields::Delivery {
            delivery_type: record.delivery_type.clone(),
            delivery_days: record.delivery_days.clone(),
        },
    })
}
