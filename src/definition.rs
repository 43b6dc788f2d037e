//! Declarative enum definitions: input building, validation, and index
//! allocation.
//!
//! A definition is an ordered list of `key -> { value, explicit index? }`
//! entries. [`EnumDefinition::normalize`] is the single validation pass:
//! it either yields fully-indexed entries ready for member construction
//! or fails with the first [`EnumError`] encountered in declaration
//! order. It is a pure function of the definition — no side effects, no
//! shared state between construction calls.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagnostics::EnumError;

/// How the definition was supplied. List mode additionally rejects
/// case-insensitive duplicate values; map mode permits them (resolved by
/// last-write-wins in the value lookup table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefinitionMode {
    Map,
    List,
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    value: String,
    /// Explicit index as declared. `i64` so a negative declaration is
    /// representable and can be rejected with `NegativeIndex`.
    index: Option<i64>,
}

/// A validated entry: every member has a resolved, conflict-free index.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedEntry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) index: u64,
}

/// An ordered, declarative description of the desired members.
///
/// Built fluently:
///
/// ```
/// use safe_enum::EnumDefinition;
///
/// let def = EnumDefinition::new()
///     .member("GET", "get")
///     .member_at("TRACE", "trace", 9);
/// assert_eq!(def.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EnumDefinition {
    entries: Vec<Entry>,
    mode: DefinitionMode,
}

impl EnumDefinition {
    /// An empty map-mode definition.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            mode: DefinitionMode::Map,
        }
    }

    /// Append a member whose index will be auto-assigned: the lowest
    /// non-negative integer not already taken at allocation time.
    pub fn member(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(Entry {
            key: key.into(),
            value: value.into(),
            index: None,
        });
        self
    }

    /// Append a member with an explicit index. Explicit indices are
    /// honored exactly and always win over auto-assignment.
    pub fn member_at(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        index: i64,
    ) -> Self {
        self.entries.push(Entry {
            key: key.into(),
            value: value.into(),
            index: Some(index),
        });
        self
    }

    /// List-mode definition: each string becomes a member with
    /// `key = value.to_uppercase()` and `index = position`.
    pub(crate) fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                let value = value.into();
                Entry {
                    key: value.to_uppercase(),
                    value,
                    index: Some(position as i64),
                }
            })
            .collect();
        Self {
            entries,
            mode: DefinitionMode::List,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and fully index the definition.
    ///
    /// Checks run per entry in declaration order: empty key, empty value,
    /// case-insensitive duplicate values in list mode (reporting the
    /// spelling of the later occurrence), duplicate key, negative index,
    /// and duplicate explicit index (naming both keys). A second pass
    /// assigns indices to members that omitted one, using a cursor that
    /// starts at 0, skips past taken indices, and resumes after each
    /// assignment, so auto-assignment is monotonic and collision-free.
    pub(crate) fn normalize(&self) -> Result<Vec<ResolvedEntry>, EnumError> {
        let mut seen_keys: FxHashSet<&str> = FxHashSet::default();
        let mut seen_values: FxHashSet<String> = FxHashSet::default();
        // explicit index -> position of the entry that claimed it
        let mut claimed: FxHashMap<u64, usize> = FxHashMap::default();

        for (position, entry) in self.entries.iter().enumerate() {
            if entry.key.is_empty() {
                return Err(EnumError::EmptyKey);
            }
            if entry.value.is_empty() {
                return Err(EnumError::EmptyValue {
                    key: entry.key.clone(),
                });
            }
            // Checked before key uniqueness: in list mode a duplicate
            // value also produces a duplicate uppercased key, and the
            // value collision is the error that names the real problem.
            if self.mode == DefinitionMode::List
                && !seen_values.insert(entry.value.to_lowercase())
            {
                return Err(EnumError::DuplicateValue {
                    value: entry.value.clone(),
                });
            }
            if !seen_keys.insert(&entry.key) {
                return Err(EnumError::DuplicateKey {
                    key: entry.key.clone(),
                });
            }
            if let Some(declared) = entry.index {
                if declared < 0 {
                    return Err(EnumError::NegativeIndex {
                        key: entry.key.clone(),
                        index: declared,
                    });
                }
                let index = declared as u64;
                if let Some(&first) = claimed.get(&index) {
                    return Err(EnumError::DuplicateIndex {
                        first: self.entries[first].key.clone(),
                        second: entry.key.clone(),
                        index,
                    });
                }
                claimed.insert(index, position);
            }
        }

        let mut used: FxHashSet<u64> = claimed.keys().copied().collect();
        let mut cursor: u64 = 0;
        let resolved = self
            .entries
            .iter()
            .map(|entry| {
                let index = match entry.index {
                    Some(declared) => declared as u64,
                    None => {
                        while used.contains(&cursor) {
                            cursor += 1;
                        }
                        let assigned = cursor;
                        used.insert(assigned);
                        cursor += 1;
                        assigned
                    }
                };
                ResolvedEntry {
                    key: entry.key.clone(),
                    value: entry.value.clone(),
                    index,
                }
            })
            .collect();
        Ok(resolved)
    }
}

impl Default for EnumDefinition {
    fn default() -> Self {
        Self::new()
    }
}
