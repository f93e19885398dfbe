use rastertiles_datatypes::tiles::TableName;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::source::NoDataLookup;
use crate::util::Result;

/// A `NoDataLookup` that answers from a fixed map of tile names and counts its queries
#[derive(Debug, Default)]
pub struct MockNoDataLookup {
    values: HashMap<String, f64>,
    queries: AtomicUsize,
}

impl MockNoDataLookup {
    #[must_use]
    pub fn with_value(mut self, tile: &str, no_data_value: f64) -> Self {
        self.values.insert(tile.to_string(), no_data_value);
        self
    }

    /// The number of lookups so far
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl NoDataLookup for MockNoDataLookup {
    fn band_no_data_value(
        &self,
        _alias: &str,
        _table: &TableName,
        tile: &str,
    ) -> Result<Option<f64>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self.values.get(tile).copied())
    }
}
