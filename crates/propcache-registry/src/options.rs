//! Initial sizing of registries and table caches.

/// Initial capacities for a private [`AccessorRegistry`](crate::AccessorRegistry)
/// or [`TableCache`](crate::TableCache).
///
/// Capacities only size the first allocation. The maps grow as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Initial number of accessor slots.
    pub registry_capacity: usize,
    /// Initial number of table slots per visibility view.
    pub table_capacity: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            registry_capacity: 64,
            table_capacity: 16,
        }
    }
}

impl CacheOptions {
    pub fn with_registry_capacity(mut self, capacity: usize) -> Self {
        self.registry_capacity = capacity;
        self
    }

    pub fn with_table_capacity(mut self, capacity: usize) -> Self {
        self.table_capacity = capacity;
        self
    }
}
