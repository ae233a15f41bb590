use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{load_table, LoadError};
use super::model::Table;

/// Loaded tables keyed by the path they were read from.
///
/// A path is read at most once until it is invalidated. There is no
/// modification-time check: an edited file is only picked up after
/// [`TableCache::invalidate`] or [`TableCache::clear`]. Failed loads are not
/// stored, so the next call retries.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<PathBuf, Arc<Table>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, reading the file only on a miss.
    pub fn load(&mut self, path: &Path) -> Result<Arc<Table>, LoadError> {
        if let Some(table) = self.tables.get(path) {
            log::debug!("cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_table(path)?);
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            table.len(),
            table.headers,
            path.display()
        );
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Forget one path. Returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.tables.remove(path).is_some()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.tables.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
