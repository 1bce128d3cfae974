//! Single-slot memoization for pipeline stages.

/// Remembers the last `(key, value)` pair.
///
/// A stage is recomputed only when its key differs from the previous call;
/// values are expected to be cheap to clone (shared pointers).
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V: Clone> Memo<K, V> {
    /// Return the cached value for `key`, computing it on a miss.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                self.hits += 1;
                return value.clone();
            }
        }
        self.misses += 1;
        let value = compute();
        self.slot = Some((key, value.clone()));
        value
    }

    /// Forget the cached value.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
