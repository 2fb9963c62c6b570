//! Shared rubric cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use super::Rubric;
use crate::detect::FileType;
use crate::error::Result;

/// Rubrics keyed by name or path, shared read-only across gradings.
///
/// The cache is an explicit object: create one per process or session,
/// pass it where rubrics are needed and call [`RubricCache::clear`] to
/// invalidate.
#[derive(Debug, Default)]
pub struct RubricCache {
    entries: RwLock<HashMap<String, Arc<Rubric>>>,
}

impl RubricCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached rubric by key.
    pub fn get(&self, key: &str) -> Option<Arc<Rubric>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store a rubric under a key, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, rubric: Rubric) -> Arc<Rubric> {
        let rubric = Arc::new(rubric);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), rubric.clone());
        rubric
    }

    /// Cached rubric by key, loading it with `load` on a miss.
    pub fn get_or_try_insert<F>(&self, key: &str, load: F) -> Result<Arc<Rubric>>
    where
        F: FnOnce() -> Result<Rubric>,
    {
        if let Some(rubric) = self.get(key) {
            return Ok(rubric);
        }
        let rubric = load()?;
        log::debug!("Caching rubric '{}' under {}", rubric.name, key);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded the same key meanwhile
        Ok(entries
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(rubric))
            .clone())
    }

    /// Rubric from a JSON file, cached by path.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Arc<Rubric>> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();
        self.get_or_try_insert(&key, || Rubric::from_file(path))
    }

    /// Built-in rubric for a document kind, cached.
    pub fn builtin(&self, file_type: FileType) -> Result<Arc<Rubric>> {
        let key = format!("builtin:{}", file_type);
        self.get_or_try_insert(&key, || Rubric::builtin(file_type))
    }

    /// Number of cached rubrics.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached rubric.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
