//! Validation issues and results.

use std::fmt;

use crate::field_spec::FieldKind;
use crate::node_name::NodeName;

/// What went wrong in one place of a candidate name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum IssueKind {
    /// The candidate could not be split into fields
    Segmentation {
        /// Expected number of separators
        expected: usize,
        /// Number of separators found
        found: usize,
    },
    /// Field is shorter or longer than allowed
    FieldLength {
        /// Minimum allowed width
        min: usize,
        /// Maximum allowed width
        max: usize,
        /// Actual width
        actual: usize,
    },
    /// Field contains a character outside its charset
    FieldCharset {
        /// The first invalid character
        char: char,
        /// Position within the field
        position: usize,
        /// Description of the allowed charset
        allowed: &'static str,
    },
    /// Field value is not one of the enumerated values
    FieldEnum {
        /// The rejected value
        value: String,
        /// Closest allowed values
        suggestions: Vec<String>,
    },
    /// Counter value is out of range
    CounterRange {
        /// The rejected value
        value: u32,
        /// Lowest allowed value
        min: u32,
        /// Highest allowed value
        max: u32,
    },
    /// Whole name exceeds the maximum length
    TotalLength {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
}

/// One problem found in a candidate name.
///
/// `field` is `None` for issues concerning the whole candidate (segmentation
/// and total length).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The field the issue is attributed to
    pub field: Option<FieldKind>,
    /// The specific issue
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub(crate) const fn whole(kind: IssueKind) -> Self {
        Self { field: None, kind }
    }

    pub(crate) const fn at(field: FieldKind, kind: IssueKind) -> Self {
        Self {
            field: Some(field),
            kind,
        }
    }

    /// Index of the attributed field in name order.
    #[must_use]
    pub fn field_index(&self) -> Option<usize> {
        let field = self.field?;
        FieldKind::ALL.iter().position(|&k| k == field)
    }

    /// Human-readable description.
    #[must_use]
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "{field}: ")?,
            None => write!(f, "name: ")?,
        }
        match &self.kind {
            IssueKind::Segmentation { expected, found } => {
                write!(
                    f,
                    "expected {expected} separators, found {found}; cannot split into fields"
                )
            }
            IssueKind::FieldLength { min, max, actual } => {
                if actual < min {
                    write!(f, "length {actual} is below minimum {min}")
                } else {
                    write!(f, "length {actual} exceeds maximum {max}")
                }
            }
            IssueKind::FieldCharset {
                char,
                position,
                allowed,
            } => {
                write!(
                    f,
                    "invalid character '{char}' at position {position}; only {allowed} allowed"
                )
            }
            IssueKind::FieldEnum { value, suggestions } => {
                write!(f, "'{value}' is not a known code")?;
                if !suggestions.is_empty() {
                    write!(f, "; did you mean {}?", suggestions.join(", "))?;
                }
                Ok(())
            }
            IssueKind::CounterRange { value, min, max } => {
                write!(f, "value {value:02} is outside {min:02}..={max:02}")
            }
            IssueKind::TotalLength { max, actual } => {
                write!(f, "total length {actual} exceeds maximum {max}")
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationIssue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationIssue", 4)?;
        state.serialize_field("field", &self.field)?;
        state.serialize_field("index", &self.field_index())?;
        state.serialize_field("issue", &self.kind)?;
        state.serialize_field("detail", &self.detail())?;
        state.end()
    }
}

/// Outcome of validating a candidate name.
///
/// # Examples
///
/// ```
/// use meshname::{validate, FieldKind, IssueKind, NodeNameGrammar};
///
/// let grammar = NodeNameGrammar::canonical();
///
/// let result = validate("CO-DENVER-CHSPARK-RC01", grammar);
/// assert!(result.is_valid());
///
/// let result = validate("CO-DENVER-CHSPARK-XX01", grammar);
/// assert_eq!(result.issues().len(), 1);
/// assert_eq!(result.issues()[0].field, Some(FieldKind::TypeRole));
/// assert!(matches!(result.issues()[0].kind, IssueKind::FieldEnum { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The candidate conforms to the grammar
    Valid(NodeName),
    /// The candidate has at least one issue, in reporting order
    Invalid(Vec<ValidationIssue>),
}

impl ValidationResult {
    /// Returns true if no issues were found.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the validated name, if valid.
    #[must_use]
    pub const fn name(&self) -> Option<&NodeName> {
        match self {
            Self::Valid(name) => Some(name),
            Self::Invalid(_) => None,
        }
    }

    /// Returns all issues; empty when valid.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(issues) => issues,
        }
    }

    /// Returns the issues attributed to one field.
    pub fn issues_for(&self, field: FieldKind) -> impl Iterator<Item = &ValidationIssue> {
        self.issues().iter().filter(move |i| i.field == Some(field))
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the issue list if the candidate was invalid.
    pub fn into_result(self) -> Result<NodeName, Vec<ValidationIssue>> {
        match self {
            Self::Valid(name) => Ok(name),
            Self::Invalid(issues) => Err(issues),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("issues", self.issues())?;
        state.end()
    }
}
