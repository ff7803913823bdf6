//! Error types for grammar construction, registries, generation and key ids.

use std::fmt;

use crate::field_spec::FieldKind;
use crate::issue::ValidationIssue;

/// The grammar table failed its structural self-check.
///
/// Raised once when a [`NodeNameGrammar`](crate::NodeNameGrammar) is built.
/// The canonical grammar treats this as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// Wrong number of fields
    FieldCount {
        /// Expected number of fields
        expected: usize,
        /// Actual number of fields
        actual: usize,
    },
    /// Fields are not in the expected order
    FieldOrder {
        /// Position in the field table
        index: usize,
        /// The field expected at this position
        expected: FieldKind,
        /// The field found at this position
        found: FieldKind,
    },
    /// Minimum and maximum widths are inconsistent
    InvalidWidth {
        /// The offending field
        field: FieldKind,
        /// Declared minimum
        min: usize,
        /// Declared maximum
        max: usize,
    },
    /// A joined field is not preceded by an enumerated field
    InvalidJoin {
        /// The joined field
        field: FieldKind,
    },
    /// The counter field cannot be read as a number
    InvalidCounter {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// An enumerated field has no allowed values
    EmptyEnum {
        /// The offending field
        field: FieldKind,
    },
    /// An enumerated value does not satisfy its own field's constraints
    InvalidEnumValue {
        /// The offending field
        field: FieldKind,
        /// The offending value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Even the shortest possible name exceeds the maximum length
    MinimumTooLong {
        /// Shortest possible name length
        minimum: usize,
        /// Maximum allowed name length
        max: usize,
    },
    /// The longest possible name exceeds the maximum length
    WorstCaseTooLong {
        /// Longest possible name length
        worst_case: usize,
        /// Maximum allowed name length
        max: usize,
    },
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid name grammar: ")?;
        match self {
            Self::FieldCount { expected, actual } => {
                write!(f, "expected {expected} fields, found {actual}")
            }
            Self::FieldOrder {
                index,
                expected,
                found,
            } => {
                write!(f, "field {index} must be {expected}, found {found}")
            }
            Self::InvalidWidth { field, min, max } => {
                write!(f, "{field} width {min}..={max} is empty or zero")
            }
            Self::InvalidJoin { field } => {
                write!(
                    f,
                    "{field} is joined without a separator but does not follow an enumerated field"
                )
            }
            Self::InvalidCounter { reason } => write!(f, "{reason}"),
            Self::EmptyEnum { field } => write!(f, "{field} has no allowed values"),
            Self::InvalidEnumValue {
                field,
                value,
                reason,
            } => {
                write!(f, "{field} value '{value}' is not a valid {field}: {reason}")
            }
            Self::MinimumTooLong { minimum, max } => {
                write!(f, "shortest possible name is {minimum} chars, maximum is {max}")
            }
            Self::WorstCaseTooLong { worst_case, max } => {
                write!(
                    f,
                    "field widths allow {worst_case} chars including separators, maximum is {max}"
                )
            }
        }
    }
}

impl std::error::Error for StructuralError {}

/// Errors for loading or extending a code registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry document could not be decoded
    Malformed(String),
    /// A region code is invalid
    InvalidRegion {
        /// The invalid code
        code: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A type+role code is invalid
    InvalidRole {
        /// The invalid code
        code: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A code was declared twice
    DuplicateCode {
        /// The duplicated code
        code: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "malformed registry: {msg}"),
            Self::InvalidRegion { code, reason } => {
                write!(f, "invalid region code '{code}': {reason}")
            }
            Self::InvalidRole { code, reason } => {
                write!(f, "invalid type+role code '{code}': {reason}")
            }
            Self::DuplicateCode { code } => write!(f, "code '{code}' is declared twice"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A generated name did not pass validation.
///
/// Carries the assembled candidate and every issue the validator reported,
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// The assembled candidate
    pub candidate: String,
    /// Issues reported by the validator
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "generated name '{}' is invalid ({} issue{})",
            self.candidate,
            self.issues.len(),
            if self.issues.len() == 1 { "" } else { "s" }
        )?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GenerationFailure {}

/// A string was rejected by [`NodeName::parse`](crate::NodeName::parse).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidName {
    /// The input that failed to validate
    pub input: String,
    /// Every issue found
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for InvalidName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid node name '{}'", self.input)?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidName {}

/// Errors for public key id parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIdError {
    /// Input is empty
    Empty,
    /// Input is shorter than required
    TooShort {
        /// Minimum required hex digits
        min: usize,
        /// Actual length
        actual: usize,
    },
    /// Input exceeds a full public key
    TooLong {
        /// Maximum allowed hex digits
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// Input does not encode whole bytes
    OddLength {
        /// Actual length
        actual: usize,
    },
    /// Non-hex character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
}

impl fmt::Display for KeyIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "public key cannot be empty"),
            Self::TooShort { min, actual } => {
                write!(f, "public key has {actual} hex digits, at least {min} required")
            }
            Self::TooLong { max, actual } => {
                write!(f, "public key length {actual} exceeds maximum {max}")
            }
            Self::OddLength { actual } => {
                write!(f, "public key has an odd number of hex digits ({actual})")
            }
            Self::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only hex digits allowed"
                )
            }
        }
    }
}

impl std::error::Error for KeyIdError {}
