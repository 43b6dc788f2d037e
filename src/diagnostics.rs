//! Error taxonomy and diagnostic message formatting.
//!
//! Construction failures are fatal and abort the build of a container.
//! Lookup misses are not errors at all: they surface as `None` plus a
//! warning log carrying a message built by [`lookup_miss_message`], so
//! call sites can branch on presence without exception-driven control
//! flow.

use thiserror::Error;

use crate::lookup::LookupIndex;

/// Every failure the crate can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumError {
    /// A definition entry has an empty key string.
    #[error("enum member key must be a non-empty string")]
    EmptyKey,

    /// A definition entry has an empty value string.
    #[error("enum member `{key}` has an empty value")]
    EmptyValue { key: String },

    /// An explicit index in the definition is negative.
    #[error("enum member `{key}` has a negative index ({index})")]
    NegativeIndex { key: String, index: i64 },

    /// Two members declared the same explicit index.
    #[error("enum members `{first}` and `{second}` both declare index {index}")]
    DuplicateIndex {
        first: String,
        second: String,
        index: u64,
    },

    /// List-mode only: two input strings collide case-insensitively.
    /// Carries the value as spelled at the later occurrence.
    #[error("duplicate enum value `{value}` (values are compared case-insensitively)")]
    DuplicateValue { value: String },

    /// The same key was declared twice.
    #[error("duplicate enum key `{key}`")]
    DuplicateKey { key: String },

    /// A fallible accessor found its field absent or empty.
    #[error("enum member field `{field}` is missing or empty")]
    MissingField { field: &'static str },

    /// Write access was requested on a frozen container or member.
    #[error("enum `{type_tag}` is frozen; members cannot be modified after construction")]
    ImmutableMutation { type_tag: String },
}

/// Which lookup table a miss occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Key,
    Value,
    Index,
}

impl LookupKind {
    fn singular(self) -> &'static str {
        match self {
            LookupKind::Key => "key",
            LookupKind::Value => "value",
            LookupKind::Index => "index",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            LookupKind::Key => "keys",
            LookupKind::Value => "values",
            LookupKind::Index => "index: key pairs",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.singular())
    }
}

/// Build the diagnostic for a failed lookup: names the attempted value and
/// kind, then enumerates the valid candidates in declaration order,
/// comma-joined and quoted.
pub(crate) fn lookup_miss_message(
    kind: LookupKind,
    attempted: &str,
    tables: &LookupIndex,
) -> String {
    let candidates: Vec<String> = tables
        .members_in_order()
        .map(|m| match kind {
            LookupKind::Key => format!("\"{}\"", m.key()),
            LookupKind::Value => format!("\"{}\"", m.value()),
            LookupKind::Index => format!("\"{}: {}\"", m.index(), m.key()),
        })
        .collect();
    let listing = if candidates.is_empty() {
        "(none)".to_string()
    } else {
        candidates.join(", ")
    };
    format!(
        "no enum member with {} \"{}\"; valid {}: {}",
        kind.singular(),
        attempted,
        kind.plural(),
        listing
    )
}
