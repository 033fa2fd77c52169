//! Single-assignment versioning
//!
//! Every assignment to a symbol mints the next integer version; the solver
//! sees `stem@version` as an independent constant.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::features::smt::{terms, Sort, Term};

/// Solver-level identity of a variable: symbol stem plus sort
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey {
    name: Arc<str>,
    sort: Sort,
}

impl SymbolKey {
    pub fn new(name: impl Into<Arc<str>>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    /// Declared constant for one version of this symbol
    pub fn versioned(&self, version: u32) -> Term {
        terms::declare_const(format!("{}@{}", self.name, version), self.sort)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.sort)
    }
}

/// Highest assigned version per symbol.
///
/// Copy-on-write: clones share one table until one of them is modified, so
/// sibling states fanning out of a branch stay cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionMap {
    inner: Arc<FxHashMap<SymbolKey, u32>>,
}

impl VersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version (symbols never assigned are at version 0)
    pub fn get(&self, key: &SymbolKey) -> u32 {
        self.inner.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.inner.contains_key(key)
    }

    pub fn insert(&mut self, key: SymbolKey, version: u32) {
        Arc::make_mut(&mut self.inner).insert(key, version);
    }

    /// Copy with `key` advanced to its next version, plus that version
    pub fn bump(&self, key: &SymbolKey) -> (VersionMap, u32) {
        let next = self.get(key) + 1;
        let mut map = self.clone();
        map.insert(key.clone(), next);
        (map, next)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn shares_storage(&self, other: &VersionMap) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Entries ordered by key
    pub fn entries(&self) -> Vec<(&SymbolKey, u32)> {
        let mut entries: Vec<_> = self.inner.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort();
        entries
    }

    /// Per symbol, the highest version found in any of `maps`
    pub fn merge_max<'a, I>(maps: I) -> VersionMap
    where
        I: IntoIterator<Item = &'a VersionMap>,
    {
        let mut maps = maps.into_iter();
        let Some(first) = maps.next() else {
            return VersionMap::new();
        };
        let mut merged = first.clone();
        for map in maps {
            if merged.shares_storage(map) {
                continue;
            }
            for (key, &version) in map.inner.iter() {
                let current = merged.inner.get(key).copied();
                if current.map_or(true, |c| version > c) {
                    merged.insert(key.clone(), version);
                }
            }
        }
        merged
    }
}
