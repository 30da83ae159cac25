//! Diagnostic snapshot of cache contents

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Point-in-time copy of the recency order and index contents.
///
/// For debugging and tests only; taking one clones every key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump<K, V> {
    /// Keys from most to least recently used
    pub order: Vec<K>,

    /// Every index entry, in index iteration order
    pub entries: Vec<(K, V)>,
}

impl<K, V> Dump<K, V> {
    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries keyed for order-independent comparison
    pub fn entries_map(&self) -> HashMap<K, V>
    where
        K: Hash + Eq + Clone,
        V: Clone,
    {
        self.entries.iter().cloned().collect()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Dump<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-------------------------")?;

        let mut keys = self.order.iter();
        if let Some(first) = keys.next() {
            write!(f, "{}", first)?;
            for key in keys {
                write!(f, " {}", key)?;
            }
        }
        writeln!(f)?;

        for (key, value) in &self.entries {
            writeln!(f, "{} {}", key, value)?;
        }
        Ok(())
    }
}
