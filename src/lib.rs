//! Validator and generator for community mesh-radio node names.
//!
//! Repeaters and room servers on a community mesh carry short, structured
//! names that say where a node is and what it does. This crate defines the
//! naming grammar, checks candidate names against it and assembles new names
//! from field values.
//!
//! # Overview
//!
//! Names have the structure:
//!
//! ```text
//! <state>-<city>-<landmark>-<type_role><counter>
//! ```
//!
//! The type+role code and the two-digit counter share the last segment with no
//! separator between them.
//!
//! # Quick Start
//!
//! ```rust
//! use meshname::{NodeName, NodeNameGrammar, ServerKind};
//!
//! // Validate a name
//! let name = NodeName::parse("CO-DENVER-CHSPARK-RC01").unwrap();
//! assert_eq!(name.city(), "DENVER");
//! assert_eq!(name.type_role().server_kind(), ServerKind::Repeater);
//!
//! // Every issue is reported, not just the first
//! let grammar = NodeNameGrammar::canonical();
//! let result = grammar.validate("COLORADO-DENVER-CHEESMANPARK-RC01");
//! for issue in result.issues() {
//!     println!("{issue}");
//! }
//! assert_eq!(result.issues().len(), 4);
//!
//! // Generate a name from field values
//! let name = grammar.generate("co", "denver", "chspark", "tm", 7).unwrap();
//! assert_eq!(name.as_str(), "CO-DENVER-CHSPARK-TM07");
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use meshname::NodeNameBuilder;
//!
//! let name = NodeNameBuilder::new()
//!     .state("WA")
//!     .city("SEATTLE")
//!     .landmark("SPCNEED")
//!     .type_role("RE")
//!     .counter(12)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(name.as_str(), "WA-SEATTLE-SPCNEED-RE12");
//! ```
//!
//! # Field Constraints
//!
//! | Field | Width | Characters |
//! |-------|-------|------------|
//! | State | 2-3 | `A-Z`, from the region table |
//! | City | 1-7 | `A-Z0-9` |
//! | Landmark | 1-7 | `A-Z0-9` |
//! | Type+role | 1-2 | from the type+role table |
//! | Counter | 2 | `01`-`99` |
//! | Whole name | at most 23 | |
//!
//! The field widths plus separators allow 24 characters; the 23-character cap
//! is checked on each name. See [`LengthPolicy`].
//!
//! # Type+Role Codes
//!
//! | Code | Server | Mobility | Tier |
//! |------|--------|----------|------|
//! | `T` | room | static | none |
//! | `TM` | room | mobile | none |
//! | `TR` | room | static | edge |
//! | `RC` | repeater | static | core |
//! | `RD` | repeater | static | distribution |
//! | `RE` | repeater | static | edge |
//! | `RM` | repeater | mobile | none |
//!
//! More regions and codes can be registered through [`CodeRegistry`], or
//! loaded from JSON with the `config` feature.
//!
//! # Features
//!
//! - `serde`: `Serialize` for results and issues; validated `Deserialize` for
//!   [`NodeName`] and [`PublicKeyId`]
//! - `config`: [`CodeRegistry::from_json`]

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod constants;
mod contact;
mod error;
mod field_spec;
mod grammar;
mod issue;
mod key_id;
mod node_name;
pub mod prelude;
mod registry;
mod type_role;
mod validator;

pub use builder::{Empty, HasCity, HasLandmark, HasState, NodeNameBuilder, Ready, generate};
pub use constants::{
    COUNTER_WIDTH, LONG_ID_LENGTH, MAX_CITY_LENGTH, MAX_COUNTER, MAX_LANDMARK_LENGTH,
    MAX_NAME_LENGTH, MAX_STATE_LENGTH, MAX_SUGGESTIONS, MAX_TYPE_ROLE_LENGTH, MIN_COUNTER,
    MIN_STATE_LENGTH, PUBLIC_KEY_HEX_LENGTH, SEPARATOR, SHORT_ID_LENGTH,
};
pub use contact::{ContactUrl, advert_type};
pub use error::{GenerationFailure, InvalidName, KeyIdError, RegistryError, StructuralError};
pub use field_spec::{Charset, FieldKind, FieldSpec};
pub use grammar::{LengthPolicy, NodeNameGrammar};
pub use issue::{IssueKind, ValidationIssue, ValidationResult};
pub use key_id::PublicKeyId;
pub use node_name::NodeName;
pub use registry::{CodeRegistry, Region};
pub use type_role::{ExtensionRole, InfrastructureTier, Mobility, ServerKind, TypeRoleCode};
pub use validator::validate;
