//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use meshname::prelude::*;
//!
//! let name = NodeName::parse("CO-DENVER-CHSPARK-RC01").unwrap();
//! assert_eq!(name.type_role(), &TypeRoleCode::CoreRepeater);
//! ```
//!
//! Builder state markers (`Empty`, `HasState`, `HasCity`, `HasLandmark`,
//! `Ready`) are left out.

pub use crate::{
    // Core types
    Charset, CodeRegistry, ContactUrl, ExtensionRole, FieldKind, FieldSpec, InfrastructureTier,
    IssueKind, LengthPolicy, Mobility, NodeName, NodeNameGrammar, PublicKeyId, Region, ServerKind,
    TypeRoleCode, ValidationIssue, ValidationResult,
    // Operations
    NodeNameBuilder, generate, validate,
    // Errors
    GenerationFailure, InvalidName, KeyIdError, RegistryError, StructuralError,
    // Constants
    MAX_NAME_LENGTH, SEPARATOR,
};
