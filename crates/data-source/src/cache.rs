use crate::error::DataSourceError;
use crate::sheet::SalesSheet;
use core_types::Sale;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// The process-wide dataset. Loaded on first use, read-only afterwards.
pub static DATASET: DatasetCache = DatasetCache::new();

/// Holds the loaded sales so the sheet is read at most once.
///
/// A failed load leaves the cache empty, so a later call can try again.
#[derive(Debug)]
pub struct DatasetCache {
    cell: OnceCell<Arc<[Sale]>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the cached sales, loading them from `sheet` on the first call.
    pub fn get_or_load(&self, sheet: &SalesSheet) -> Result<Arc<[Sale]>, DataSourceError> {
        self.get_or_try_init(|| sheet.load())
    }

    pub fn get_or_try_init<F>(&self, load: F) -> Result<Arc<[Sale]>, DataSourceError>
    where
        F: FnOnce() -> Result<Vec<Sale>, DataSourceError>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::from))
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<[Sale]>> {
        self.cell.get().cloned()
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::cell::Cell;

    fn one_sale() -> Vec<Sale> {
        vec![Sale::new(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), None, dec!(10), dec!(5))]
    }

    #[test]
    fn loads_only_once() {
        let cache = DatasetCache::new();
        let calls = Cell::new(0);

        let first = cache
            .get_or_try_init(|| {
                calls.set(calls.get() + 1);
                Ok(one_sale())
            })
            .unwrap();
        let second = cache
            .get_or_try_init(|| {
                calls.set(calls.get() + 1);
                Ok(Vec::new())
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn failed_load_can_be_retried() {
        let cache = DatasetCache::new();
        let err = cache.get_or_load(&SalesSheet::new("missing/sales.csv"));
        assert!(err.is_err());
        assert!(cache.get().is_none());

        let sales = cache.get_or_try_init(|| Ok(one_sale())).unwrap();
        assert_eq!(sales.len(), 1);
    }
}
