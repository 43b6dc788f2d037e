//! Reverse-lookup tables: by key, by value, and by index.
//!
//! Built once during container construction, read many times. The key
//! table is an ordered map so declaration order survives into iteration;
//! the value and index tables are plain hash maps. Misses never fail the
//! caller — they return `None` and emit a warning carrying the
//! diagnostic from [`lookup_miss_message`].

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::diagnostics::{LookupKind, lookup_miss_message};
use crate::member::EnumMember;

pub(crate) struct LookupIndex {
    by_key: IndexMap<String, Arc<EnumMember>, FxBuildHasher>,
    by_value: FxHashMap<String, Arc<EnumMember>>,
    by_index: FxHashMap<u64, Arc<EnumMember>>,
}

impl LookupIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            by_key: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            by_value: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            by_index: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Insert in declaration order. Keys are unique by validation;
    /// duplicate values (map-input mode) overwrite the earlier entry in
    /// the value table only — the earlier member stays reachable by key.
    pub(crate) fn insert(&mut self, member: Arc<EnumMember>) {
        self.by_key
            .insert(member.key().to_string(), member.clone());
        self.by_value
            .insert(member.value().to_string(), member.clone());
        self.by_index.insert(member.index(), member);
    }

    pub(crate) fn by_key(&self, key: &str) -> Option<&Arc<EnumMember>> {
        let found = self.by_key.get(key);
        if found.is_none() {
            tracing::warn!("{}", lookup_miss_message(LookupKind::Key, key, self));
        }
        found
    }

    pub(crate) fn by_value(&self, value: &str) -> Option<&Arc<EnumMember>> {
        let found = self.by_value.get(value);
        if found.is_none() {
            tracing::warn!("{}", lookup_miss_message(LookupKind::Value, value, self));
        }
        found
    }

    pub(crate) fn by_index(&self, index: u64) -> Option<&Arc<EnumMember>> {
        let found = self.by_index.get(&index);
        if found.is_none() {
            tracing::warn!(
                "{}",
                lookup_miss_message(LookupKind::Index, &index.to_string(), self)
            );
        }
        found
    }

    /// Silent variant of [`by_key`](Self::by_key) for existence checks
    /// and type guards, which should not log.
    pub(crate) fn peek_key(&self, key: &str) -> Option<&Arc<EnumMember>> {
        self.by_key.get(key)
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub(crate) fn contains_value(&self, value: &str) -> bool {
        self.by_value.contains_key(value)
    }

    pub(crate) fn contains_index(&self, index: u64) -> bool {
        self.by_index.contains_key(&index)
    }

    /// Members in declaration order (the key table preserves insertion
    /// order). Drives both iteration and diagnostic listings.
    pub(crate) fn members_in_order(&self) -> impl Iterator<Item = &Arc<EnumMember>> {
        self.by_key.values()
    }
}

impl std::fmt::Debug for LookupIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupIndex")
            .field("members", &self.by_key.len())
            .finish()
    }
}
