//! Price Book
//!
//! Process-wide cache of the loaded price tables and product catalog. Each
//! table is loaded lazily on first access and memoized for the lifetime of
//! the book; [`PriceBook::invalidate`] drops every memoized table so the
//! next access reloads from the backing source. Population is idempotent
//! and safe to race; the worst case is a redundant reload of the same
//! immutable data.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::{
    catalog::ProductCatalog,
    tables::{
        CategoryTable, TableId,
        source::{self, TableSources},
    },
};

/// Owner of all loaded pricing data.
///
/// Constructed once at process start and shared by reference with every
/// resolver; there is no module-level global state.
#[derive(Debug)]
pub struct PriceBook {
    sources: TableSources,
    tables: RwLock<FxHashMap<TableId, Arc<CategoryTable>>>,
    catalog: RwLock<Option<Arc<ProductCatalog>>>,
}

impl PriceBook {
    /// Create a book over the given table sources. Nothing is loaded yet.
    #[must_use]
    pub fn new(sources: TableSources) -> Self {
        Self {
            sources,
            tables: RwLock::new(FxHashMap::default()),
            catalog: RwLock::new(None),
        }
    }

    /// The configured table sources.
    #[must_use]
    pub fn sources(&self) -> &TableSources {
        &self.sources
    }

    /// Fetch one price table, loading and memoizing it on first access.
    ///
    /// A table whose source fails to load memoizes as empty; lookups
    /// against it miss naturally.
    #[must_use]
    pub fn table(&self, id: TableId) -> Arc<CategoryTable> {
        {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);

            if let Some(table) = tables.get(&id) {
                return Arc::clone(table);
            }
        }

        let loaded = Arc::new(source::load_table_or_empty(self.sources.path_for(id), id));

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);

        // A concurrent caller may have populated the slot while we loaded;
        // first write wins and both see the same immutable data.
        Arc::clone(tables.entry(id).or_insert(loaded))
    }

    /// Fetch the product catalog, loading and memoizing it on first access.
    #[must_use]
    pub fn catalog(&self) -> Arc<ProductCatalog> {
        {
            let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);

            if let Some(catalog) = catalog.as_ref() {
                return Arc::clone(catalog);
            }
        }

        let loaded = Arc::new(source::load_catalog_or_empty(&self.sources.products));

        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);

        Arc::clone(catalog.get_or_insert(loaded))
    }

    /// Drop every memoized table and the catalog, forcing reloads.
    ///
    /// Used after source-data updates or to recover from a stale load.
    pub fn invalidate(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testresult::TestResult;

    use crate::catalog::ProductTier;

    use super::*;

    const CLOSURES_CSV: &str = "\
Name,price48,price144,price576,price1152,price2880,price10000,price20000,type,Comment,margin
Snapback,0.00,0.00,0.00,0.00,0.00,0.00,0.00,Plastic,Standard,50
Fitted,1.00,0.88,0.75,0.63,0.50,0.45,0.40,Stretch,Flexfit style,50
";

    #[test]
    fn loads_lazily_and_memoizes() -> TestResult {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("closures.csv"), CLOSURES_CSV)?;

        let book = PriceBook::new(TableSources::under(dir.path()));

        let first = book.table(TableId::Closure);
        let second = book.table(TableId::Closure);

        assert_eq!(first.rows().len(), 2);
        assert!(
            Arc::ptr_eq(&first, &second),
            "second access must reuse the memoized table"
        );

        Ok(())
    }

    #[test]
    fn invalidate_forces_reload() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("closures.csv");
        fs::write(&path, CLOSURES_CSV)?;

        let book = PriceBook::new(TableSources::under(dir.path()));
        assert_eq!(book.table(TableId::Closure).rows().len(), 2);

        // Rewrite the source with one row; the memoized table still has two
        // until the cache is invalidated.
        fs::write(
            &path,
            "Name,price48,price144,price576,price1152,price2880,price10000,price20000,type,Comment,margin\n\
             Snapback,0.00,0.00,0.00,0.00,0.00,0.00,0.00,Plastic,Standard,50\n",
        )?;

        assert_eq!(book.table(TableId::Closure).rows().len(), 2);

        book.invalidate();

        assert_eq!(book.table(TableId::Closure).rows().len(), 1);

        Ok(())
    }

    #[test]
    fn missing_source_memoizes_empty_table() {
        let book = PriceBook::new(TableSources::under("/nonexistent"));

        assert!(book.table(TableId::BlankCap(ProductTier::Tier1)).is_empty());
        assert!(book.catalog().is_empty());
    }
}
