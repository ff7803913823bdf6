//! Field specifications for the segments of a node name.

use std::fmt;
use std::ops::RangeInclusive;

/// Identifies one field of a node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// State or region short-code, e.g. `CO`
    State,
    /// City short-code, e.g. `DENVER`
    City,
    /// Landmark short-code, e.g. `CHSPARK`
    Landmark,
    /// Type+role code, e.g. `RC`
    TypeRole,
    /// Two-digit counter, e.g. `01`
    Counter,
}

impl FieldKind {
    /// All fields in name order.
    pub const ALL: [Self; 5] = [
        Self::State,
        Self::City,
        Self::Landmark,
        Self::TypeRole,
        Self::Counter,
    ];

    /// Returns the field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::City => "city",
            Self::Landmark => "landmark",
            Self::TypeRole => "type_role",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of characters a field may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    /// `A-Z`
    UpperAlpha,
    /// `A-Z` and `0-9`
    UpperAlphanumeric,
    /// `0-9`
    Digits,
}

impl Charset {
    /// Returns true if the character belongs to this set.
    #[must_use]
    pub const fn contains(self, c: char) -> bool {
        match self {
            Self::UpperAlpha => c.is_ascii_uppercase(),
            Self::UpperAlphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit(),
            Self::Digits => c.is_ascii_digit(),
        }
    }

    /// Returns the position and value of the first character outside this set.
    #[must_use]
    pub fn first_invalid(self, value: &str) -> Option<(usize, char)> {
        value.chars().enumerate().find(|&(_, c)| !self.contains(c))
    }

    /// Human-readable description used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::UpperAlpha => "uppercase letters",
            Self::UpperAlphanumeric => "uppercase letters and digits",
            Self::Digits => "digits",
        }
    }
}

/// Describes one field of a node name.
///
/// A spec is immutable once it is part of a grammar.
///
/// # Examples
///
/// ```
/// use meshname::{Charset, FieldKind, FieldSpec};
///
/// let city = FieldSpec::new(FieldKind::City, 1, 7, Charset::UpperAlphanumeric);
/// assert_eq!(city.name(), "city");
/// assert!(city.is_required());
/// assert!(city.enum_values().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    kind: FieldKind,
    min_length: usize,
    max_length: usize,
    charset: Charset,
    enum_values: Option<Vec<String>>,
    range: Option<RangeInclusive<u32>>,
    required: bool,
    joined: bool,
}

impl FieldSpec {
    /// Creates a required field with the given width bounds and charset.
    #[must_use]
    pub const fn new(kind: FieldKind, min_length: usize, max_length: usize, charset: Charset) -> Self {
        Self {
            kind,
            min_length,
            max_length,
            charset,
            enum_values: None,
            range: None,
            required: true,
            joined: false,
        }
    }

    /// Restricts the field to an exact set of values.
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the numeric value of the field.
    #[must_use]
    pub fn with_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.range = Some(range);
        self
    }

    /// Marks the field as following the previous one without a separator.
    #[must_use]
    pub fn joined(mut self) -> Self {
        self.joined = true;
        self
    }

    /// Marks the field as optional; an empty value is then accepted.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Returns which field this is.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    /// Returns the minimum width.
    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Returns the maximum width.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the allowed charset.
    #[must_use]
    pub const fn charset(&self) -> Charset {
        self.charset
    }

    /// Returns the allowed values, if the field is enumerated.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }

    /// Returns the allowed numeric range, if any.
    #[must_use]
    pub const fn range(&self) -> Option<&RangeInclusive<u32>> {
        self.range.as_ref()
    }

    /// Returns true if the field must be non-empty.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if no separator precedes this field.
    #[must_use]
    pub const fn is_joined(&self) -> bool {
        self.joined
    }

    /// Shortest width this field can take in a valid name.
    #[must_use]
    pub const fn effective_min(&self) -> usize {
        if self.required { self.min_length } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_membership() {
        assert!(Charset::UpperAlpha.contains('A'));
        assert!(!Charset::UpperAlpha.contains('a'));
        assert!(!Charset::UpperAlpha.contains('1'));
        assert!(Charset::UpperAlphanumeric.contains('7'));
        assert!(!Charset::UpperAlphanumeric.contains('-'));
        assert!(Charset::Digits.contains('0'));
        assert!(!Charset::Digits.contains('O'));
        assert!(!Charset::UpperAlphanumeric.contains('É'));
    }

    #[test]
    fn first_invalid_reports_char_position() {
        assert_eq!(Charset::UpperAlpha.first_invalid("ABC"), None);
        assert_eq!(Charset::UpperAlpha.first_invalid("AbC"), Some((1, 'b')));
        assert_eq!(Charset::Digits.first_invalid("0x1"), Some((1, 'x')));
    }

    #[test]
    fn builder_methods() {
        let spec = FieldSpec::new(FieldKind::Counter, 2, 2, Charset::Digits)
            .with_range(1..=99)
            .joined();
        assert_eq!(spec.range(), Some(&(1..=99)));
        assert!(spec.is_joined());
        assert!(spec.is_required());
        assert_eq!(spec.effective_min(), 2);

        let opt = FieldSpec::new(FieldKind::Landmark, 1, 7, Charset::UpperAlphanumeric).optional();
        assert!(!opt.is_required());
        assert_eq!(opt.effective_min(), 0);
    }

    #[test]
    fn enum_values_are_owned_strings() {
        let spec = FieldSpec::new(FieldKind::TypeRole, 1, 2, Charset::UpperAlpha)
            .with_enum_values(["T", "RC"]);
        assert_eq!(spec.enum_values(), Some(&["T".to_string(), "RC".to_string()][..]));
    }
}
