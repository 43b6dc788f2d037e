//! One immutable constant of an enum set.
//!
//! Members are produced only by container construction and are never
//! mutated afterwards: all fields are private and the public surface is
//! read-only. Equality is nominal — the type tag participates in every
//! comparison, so two members from different enum families are never
//! equal even when key, value, and index all coincide.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diagnostics::EnumError;

/// Tag carried by members that did not come out of a container build
/// (i.e. were deserialized). Never matches a real family tag, so such
/// members always fail `is_enum_value`.
fn unregistered_tag() -> Arc<str> {
    Arc::from("")
}

/// One constant of a closed enum set: `key` / `value` / `index` plus the
/// nominal family tag.
///
/// Serializes as `{"key": ..., "value": ..., "index": ...}` — the tag is
/// deliberately omitted so the JSON form stays interoperable.
/// Deserialization is supported for interchange, but a deserialized
/// member carries an empty tag and is rejected by
/// [`EnumContainer::is_enum_value`](crate::EnumContainer::is_enum_value).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    key: String,
    value: String,
    index: u64,
    #[serde(skip, default = "unregistered_tag")]
    type_tag: Arc<str>,
}

impl EnumMember {
    pub(crate) fn new(key: String, value: String, index: u64, type_tag: Arc<str>) -> Self {
        Self {
            key,
            value,
            index,
            type_tag,
        }
    }

    /// The unique, case-sensitive identifier (conventionally UPPER_SNAKE).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The member's string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The member's integer index, unique within its family.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The nominal family tag this member belongs to.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.key == key
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.value == value
    }

    pub fn has_index(&self, index: u64) -> bool {
        self.index == index
    }

    /// Full-identity comparison against every element of a collection.
    ///
    /// True iff the collection is non-empty and every element matches this
    /// member on tag, key, value, and index. An empty collection is false:
    /// vacuous equality is rejected by design — at least one element must
    /// actually match.
    pub fn is_equal<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a EnumMember>,
    {
        let mut matched_any = false;
        for other in others {
            if other != self {
                return false;
            }
            matched_any = true;
        }
        matched_any
    }

    /// The key, or `MissingField` if it is empty.
    ///
    /// A member built by a container always has a non-empty key; this can
    /// only fail on members that arrived via deserialization.
    pub fn try_key(&self) -> Result<&str, EnumError> {
        if self.key.is_empty() {
            return Err(EnumError::MissingField { field: "key" });
        }
        Ok(&self.key)
    }

    /// The value, or `MissingField` if it is empty.
    pub fn try_value(&self) -> Result<&str, EnumError> {
        if self.value.is_empty() {
            return Err(EnumError::MissingField { field: "value" });
        }
        Ok(&self.value)
    }

    /// The index. Infallible in practice — zero is a valid index, not a
    /// missing one, and an unsigned index is always present — but returns
    /// `Result` for parity with the other fallible accessors.
    pub fn try_index(&self) -> Result<u64, EnumError> {
        Ok(self.index)
    }
}

impl std::fmt::Display for EnumMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}, index: {}", self.key, self.value, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(key: &str, value: &str, index: u64, tag: &str) -> EnumMember {
        EnumMember::new(key.into(), value.into(), index, Arc::from(tag))
    }

    #[test]
    fn test_field_checks() {
        let m = member("GET", "get", 0, "HttpMethod");
        assert!(m.has_key("GET"));
        assert!(m.has_value("get"));
        assert!(m.has_index(0));
        assert!(!m.has_key("get"), "keys are case-sensitive");
        assert!(!m.has_index(1));
    }

    #[test]
    fn test_is_equal_self_and_empty() {
        let m = member("GET", "get", 0, "HttpMethod");
        assert!(m.is_equal([&m]));
        assert!(m.is_equal([&m, &m]));
        assert!(
            !m.is_equal(std::iter::empty::<&EnumMember>()),
            "empty input must not be vacuously equal"
        );
    }

    #[test]
    fn test_is_equal_rejects_other_family() {
        let a = member("GET", "get", 0, "HttpMethod");
        let b = member("GET", "get", 0, "RpcMethod");
        assert_ne!(a, b, "identical fields but different tags");
        assert!(!a.is_equal([&b]));
        assert!(!a.is_equal([&a, &b]), "one mismatch fails the whole set");
    }

    #[test]
    fn test_display_format() {
        let m = member("NOT_FOUND", "not found", 404, "Status");
        assert_eq!(m.to_string(), "NOT_FOUND: not found, index: 404");
    }

    #[test]
    fn test_json_shape_omits_tag() {
        let m = member("GET", "get", 0, "HttpMethod");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "GET", "value": "get", "index": 0})
        );
    }

    #[test]
    fn test_deserialized_member_is_untagged() {
        let m: EnumMember =
            serde_json::from_value(serde_json::json!({"key": "GET", "value": "get", "index": 0}))
                .unwrap();
        assert_eq!(m.type_tag(), "");
        let real = member("GET", "get", 0, "HttpMethod");
        assert_ne!(m, real);
    }

    #[test]
    fn test_try_accessors_on_deserialized_member() {
        let m: EnumMember =
            serde_json::from_value(serde_json::json!({"key": "", "value": "x", "index": 0}))
                .unwrap();
        assert_eq!(m.try_key(), Err(EnumError::MissingField { field: "key" }));
        assert_eq!(m.try_value(), Ok("x"));
        assert_eq!(m.try_index(), Ok(0), "index zero is valid, not missing");
    }
}
