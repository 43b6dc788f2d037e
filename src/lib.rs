//! Closed, immutable "safe enum" value sets with runtime validation.
//!
//! Native enums in most languages either coerce arbitrary values or have
//! weak reverse-lookup support. This crate builds a closed member set from a
//! declarative definition and returns a frozen [`EnumContainer`] with:
//!
//! - a unique key, string value, and integer index per member
//! - O(1) reverse lookups by key, by value, and by index
//! - identity-safe equality via a nominal runtime type tag
//! - JSON serialization of members and the whole container
//!
//! # Example
//!
//! ```
//! use safe_enum::{EnumContainer, EnumDefinition};
//!
//! let methods = EnumContainer::from_map(
//!     EnumDefinition::new()
//!         .member("GET", "get")
//!         .member("POST", "post"),
//!     "HttpMethod",
//! )?;
//!
//! assert_eq!(methods.from_value("post").unwrap().key(), "POST");
//! assert_eq!(methods["GET"].index(), 0);
//! # Ok::<(), safe_enum::EnumError>(())
//! ```
//!
//! Construction either returns a complete container or an [`EnumError`];
//! no partially built container is ever observable. Once built, the
//! container and every member are immutable and safe to share across
//! threads without locking.

// Error taxonomy and lookup-miss message formatting
pub mod diagnostics;
pub use diagnostics::{EnumError, LookupKind};

// Declarative input: map/list definitions, validation, index allocation
pub mod definition;
pub use definition::EnumDefinition;

// One immutable constant of a set
pub mod member;
pub use member::EnumMember;

// Reverse-lookup tables (internal; surfaced through the container)
mod lookup;

// The frozen aggregate returned to callers
pub mod container;
pub use container::EnumContainer;
