//! The frozen aggregate returned to callers.
//!
//! An [`EnumContainer`] owns its members (shared with the lookup tables
//! via `Arc`), the three reverse-lookup tables, and the family type tag.
//! It is assembled in one synchronous pass and never mutated afterwards,
//! so it can be shared by reference across threads without locking.

use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::definition::EnumDefinition;
use crate::diagnostics::EnumError;
use crate::lookup::LookupIndex;
use crate::member::EnumMember;

/// A closed, immutable enum value set.
///
/// Built with [`from_map`](Self::from_map) or
/// [`from_list`](Self::from_list); construction validates the whole
/// definition up front and either returns a complete container or an
/// [`EnumError`] — a partially built container is never observable.
#[derive(Debug)]
pub struct EnumContainer {
    type_tag: Arc<str>,
    /// Declaration order; every element is aliased by the lookup tables.
    members: Vec<Arc<EnumMember>>,
    lookup: LookupIndex,
}

impl EnumContainer {
    /// Build from an ordered map-mode definition.
    ///
    /// Map mode permits duplicate string values; the later member wins
    /// the value-lookup slot while both stay reachable by key.
    pub fn from_map(definition: EnumDefinition, type_tag: &str) -> Result<Self, EnumError> {
        Self::build(&definition, type_tag)
    }

    /// Build from an ordered list of values: `key = value.to_uppercase()`,
    /// `index = position`. Fails on case-insensitive duplicate values.
    pub fn from_list<I, S>(values: I, type_tag: &str) -> Result<Self, EnumError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(&EnumDefinition::from_values(values), type_tag)
    }

    fn build(definition: &EnumDefinition, type_tag: &str) -> Result<Self, EnumError> {
        let resolved = definition.normalize()?;
        let tag: Arc<str> = Arc::from(type_tag);
        let mut members = Vec::with_capacity(resolved.len());
        let mut lookup = LookupIndex::with_capacity(resolved.len());
        for entry in resolved {
            let member = Arc::new(EnumMember::new(
                entry.key,
                entry.value,
                entry.index,
                tag.clone(),
            ));
            lookup.insert(member.clone());
            members.push(member);
        }
        Ok(Self {
            type_tag: tag,
            members,
            lookup,
        })
    }

    /// The nominal family tag shared by every member.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.key())
    }

    /// Member values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.value())
    }

    /// Member indices in declaration order.
    pub fn indexes(&self) -> impl Iterator<Item = u64> {
        self.members.iter().map(|m| m.index())
    }

    /// `(key, member)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &EnumMember)> {
        self.members.iter().map(|m| (m.key(), m.as_ref()))
    }

    /// All members in declaration order.
    pub fn members(&self) -> Members<'_> {
        Members(self.members.iter())
    }

    /// The member registered under `key`, without logging on a miss.
    /// This is the named-field access path; see also the `container[key]`
    /// indexing operator.
    pub fn get(&self, key: &str) -> Option<&EnumMember> {
        self.lookup.peek_key(key).map(Arc::as_ref)
    }

    /// Lookup by key. A miss returns `None` and emits a warning listing
    /// the valid keys; it never aborts caller flow.
    pub fn from_key(&self, key: &str) -> Option<&EnumMember> {
        self.lookup.by_key(key).map(Arc::as_ref)
    }

    /// Lookup by value. On duplicate values (map mode) this resolves to
    /// the last-declared member.
    pub fn from_value(&self, value: &str) -> Option<&EnumMember> {
        self.lookup.by_value(value).map(Arc::as_ref)
    }

    /// Lookup by index.
    pub fn from_index(&self, index: u64) -> Option<&EnumMember> {
        self.lookup.by_index(index).map(Arc::as_ref)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.lookup.contains_value(value)
    }

    pub fn has_index(&self, index: u64) -> bool {
        self.lookup.contains_index(index)
    }

    /// Structural + nominal type guard.
    ///
    /// True iff the candidate's tag matches this family *and* its
    /// key/value/index triple is exactly what is registered under that
    /// key. A forged look-alike — same fields, wrong or missing tag, or a
    /// triple that was never registered — is rejected.
    pub fn is_enum_value(&self, candidate: &EnumMember) -> bool {
        if candidate.type_tag() != self.type_tag() {
            return false;
        }
        match self.lookup.peek_key(candidate.key()) {
            Some(registered) => registered.as_ref() == candidate,
            None => false,
        }
    }

    /// Value-only comparison across a collection, first element as
    /// reference: true iff the slice is non-empty and every element's
    /// `value` equals the first element's `value`.
    ///
    /// Note the deliberate asymmetry with [`EnumMember::is_equal`], which
    /// compares full identity including the tag. The container-level
    /// check matches only on `value`.
    pub fn is_equal(&self, members: &[&EnumMember]) -> bool {
        let Some(first) = members.first() else {
            return false;
        };
        members.iter().all(|m| m.value() == first.value())
    }

    /// Request write access to a member. Always refused: every member is
    /// aliased by the lookup tables, so exclusive access does not exist,
    /// and an unknown key cannot be added either. The container is frozen
    /// from the moment it is returned.
    pub fn member_mut(&mut self, key: &str) -> Result<&mut EnumMember, EnumError> {
        let refused = EnumError::ImmutableMutation {
            type_tag: self.type_tag.to_string(),
        };
        self.members
            .iter_mut()
            .find(|m| m.key() == key)
            .and_then(Arc::get_mut)
            .ok_or(refused)
    }
}

/// Declaration-order iterator over a container's members. A fresh
/// iterator is produced per call, so iteration is restartable.
pub struct Members<'a>(std::slice::Iter<'a, Arc<EnumMember>>);

impl<'a> Iterator for Members<'a> {
    type Item = &'a EnumMember;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Members<'_> {}

impl<'a> IntoIterator for &'a EnumContainer {
    type Item = &'a EnumMember;
    type IntoIter = Members<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.members()
    }
}

impl std::ops::Index<&str> for EnumContainer {
    type Output = EnumMember;

    /// Named-field access: `container["GET"]`. Panics on an unknown key,
    /// like the standard map indexers; use [`get`](EnumContainer::get) or
    /// [`from_key`](EnumContainer::from_key) for a non-panicking lookup.
    fn index(&self, key: &str) -> &EnumMember {
        match self.get(key) {
            Some(member) => member,
            None => panic!("no member `{key}` in enum `{}`", self.type_tag),
        }
    }
}

/// Serializes as `{"typeName": ..., "values": [member JSON, ...]}`.
impl Serialize for EnumContainer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EnumContainer", 2)?;
        state.serialize_field("typeName", self.type_tag())?;
        let values: Vec<&EnumMember> = self.members().collect();
        state.serialize_field("values", &values)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_methods() -> EnumContainer {
        EnumContainer::from_map(
            EnumDefinition::new()
                .member("GET", "get")
                .member("POST", "post")
                .member_at("TRACE", "trace", 9),
            "HttpMethod",
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_lookups() {
        let methods = http_methods();
        for member in &methods {
            assert_eq!(methods.from_key(member.key()).unwrap().key(), member.key());
            assert_eq!(
                methods.from_value(member.value()).unwrap().value(),
                member.value()
            );
            assert_eq!(
                methods.from_index(member.index()).unwrap().index(),
                member.index()
            );
        }
    }

    #[test]
    fn test_collection_accessors() {
        let methods = http_methods();
        assert_eq!(methods.keys().collect::<Vec<_>>(), vec!["GET", "POST", "TRACE"]);
        assert_eq!(
            methods.values().collect::<Vec<_>>(),
            vec!["get", "post", "trace"]
        );
        assert_eq!(methods.indexes().collect::<Vec<_>>(), vec![0, 1, 9]);
        let entries: Vec<(&str, u64)> = methods
            .entries()
            .map(|(key, member)| (key, member.index()))
            .collect();
        assert_eq!(entries, vec![("GET", 0), ("POST", 1), ("TRACE", 9)]);
    }

    #[test]
    fn test_empty_definition() {
        let empty = EnumContainer::from_map(EnumDefinition::new(), "Empty").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.keys().count(), 0);
        assert_eq!(empty.values().count(), 0);
        assert_eq!(empty.indexes().count(), 0);
        assert_eq!(empty.entries().count(), 0);
        assert!(empty.from_key("A").is_none());
    }

    #[test]
    fn test_existence_checks() {
        let methods = http_methods();
        assert!(methods.has_key("GET"));
        assert!(!methods.has_key("get"));
        assert!(methods.has_value("post"));
        assert!(methods.has_index(9));
        assert!(!methods.has_index(2));
    }

    #[test]
    fn test_map_mode_value_collision_last_write_wins() {
        let aliases = EnumContainer::from_map(
            EnumDefinition::new().member("A", "x").member("B", "x"),
            "Alias",
        )
        .unwrap();
        assert_eq!(aliases.from_value("x").unwrap().key(), "B");
        assert_eq!(aliases.from_key("A").unwrap().value(), "x");
    }

    #[test]
    fn test_from_list_derives_keys_and_positions() {
        let methods = EnumContainer::from_list(["get", "post"], "HttpMethod").unwrap();
        assert_eq!(methods["GET"].index(), 0);
        assert_eq!(methods["POST"].index(), 1);
        assert_eq!(methods["POST"].value(), "post");
    }

    #[test]
    fn test_from_list_rejects_case_insensitive_duplicates() {
        let err = EnumContainer::from_list(["test", "TEST"], "T").unwrap_err();
        assert_eq!(
            err,
            EnumError::DuplicateValue {
                value: "TEST".into()
            }
        );
    }

    #[test]
    fn test_is_enum_value_accepts_registered_members() {
        let methods = http_methods();
        let get = methods.from_key("GET").unwrap();
        assert!(methods.is_enum_value(get));
    }

    #[test]
    fn test_is_enum_value_rejects_other_family() {
        let methods = http_methods();
        let twin = EnumContainer::from_map(
            EnumDefinition::new().member("GET", "get"),
            "RpcMethod",
        )
        .unwrap();
        let forged = twin.from_key("GET").unwrap();
        assert!(
            !methods.is_enum_value(forged),
            "same fields, different family tag"
        );
    }

    #[test]
    fn test_is_enum_value_rejects_deserialized_member() {
        let methods = http_methods();
        let forged: EnumMember =
            serde_json::from_value(serde_json::json!({"key": "GET", "value": "get", "index": 0}))
                .unwrap();
        assert!(!methods.is_enum_value(&forged), "deserialized tag is empty");
    }

    #[test]
    fn test_container_is_equal_compares_values_only() {
        let aliases = EnumContainer::from_map(
            EnumDefinition::new()
                .member("A", "x")
                .member("B", "x")
                .member("C", "y"),
            "Alias",
        )
        .unwrap();
        let a = aliases.from_key("A").unwrap();
        let b = aliases.from_key("B").unwrap();
        let c = aliases.from_key("C").unwrap();
        assert!(aliases.is_equal(&[a, b]), "distinct members, same value");
        assert!(!aliases.is_equal(&[a, c]));
        assert!(!aliases.is_equal(&[]), "empty input is not equal");
        // the member-level check disagrees on purpose: full identity
        assert!(!a.is_equal([b]));
    }

    #[test]
    fn test_member_mut_is_refused() {
        let mut methods = http_methods();
        let err = methods.member_mut("GET").unwrap_err();
        assert_eq!(
            err,
            EnumError::ImmutableMutation {
                type_tag: "HttpMethod".into()
            }
        );
        assert!(methods.member_mut("UNKNOWN").is_err(), "no new slots either");
    }

    #[test]
    fn test_iteration_is_restartable() {
        let methods = http_methods();
        let first: Vec<&str> = methods.members().map(|m| m.key()).collect();
        let second: Vec<&str> = (&methods).into_iter().map(|m| m.key()).collect();
        assert_eq!(first, second);
        assert_eq!(methods.members().len(), 3);
    }

    #[test]
    fn test_container_json_shape() {
        let methods = EnumContainer::from_map(
            EnumDefinition::new().member("GET", "get"),
            "HttpMethod",
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(&methods).unwrap(),
            serde_json::json!({
                "typeName": "HttpMethod",
                "values": [{"key": "GET", "value": "get", "index": 0}],
            })
        );
    }

    #[test]
    #[should_panic(expected = "no member `PUT` in enum `HttpMethod`")]
    fn test_index_operator_panics_on_unknown_key() {
        let methods = http_methods();
        let _ = &methods["PUT"];
    }

    #[test]
    fn test_container_is_send_sync() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<EnumContainer>();
    }
}
