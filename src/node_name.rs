//! The validated node name type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::InvalidName;
use crate::grammar::NodeNameGrammar;
use crate::issue::ValidationResult;
use crate::type_role::TypeRoleCode;

/// A node name that passed validation.
///
/// Values are only produced by the validator, so every `NodeName` conforms
/// to the grammar it was checked against. Equality, hashing and ordering all
/// go by the name text alone.
///
/// ```text
/// CO-DENVER-CHSPARK-RC01
/// |  |      |       | |
/// |  |      |       | counter
/// |  |      |       type+role
/// |  |      landmark
/// |  city
/// state
/// ```
///
/// # Examples
///
/// ```
/// use meshname::{NodeName, ServerKind};
///
/// let name = NodeName::parse("CO-DENVER-CHSPARK-RC01").unwrap();
/// assert_eq!(name.state(), "CO");
/// assert_eq!(name.counter(), 1);
/// assert_eq!(name.type_role().server_kind(), ServerKind::Repeater);
/// assert_eq!(name.to_string(), "CO-DENVER-CHSPARK-RC01");
/// ```
#[derive(Debug, Clone)]
pub struct NodeName {
    state: String,
    city: String,
    landmark: String,
    type_role: TypeRoleCode,
    counter: u32,
    normalized: String,
}

impl NodeName {
    /// Parses a name against the canonical grammar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` carrying every issue found.
    pub fn parse(input: &str) -> Result<Self, InvalidName> {
        Self::parse_with(input, NodeNameGrammar::canonical())
    }

    /// Parses a name against a specific grammar.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` carrying every issue found.
    pub fn parse_with(input: &str, grammar: &NodeNameGrammar) -> Result<Self, InvalidName> {
        match grammar.validate(input) {
            ValidationResult::Valid(name) => Ok(name),
            ValidationResult::Invalid(issues) => Err(InvalidName {
                input: input.to_string(),
                issues,
            }),
        }
    }

    pub(crate) fn from_parts(
        normalized: &str,
        state: &str,
        city: &str,
        landmark: &str,
        type_role: TypeRoleCode,
        counter: u32,
    ) -> Self {
        Self {
            state: state.to_string(),
            city: city.to_string(),
            landmark: landmark.to_string(),
            type_role,
            counter,
            normalized: normalized.to_string(),
        }
    }

    /// Returns the state or region code.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the city code.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the landmark code.
    #[must_use]
    pub fn landmark(&self) -> &str {
        &self.landmark
    }

    /// Returns the type+role code.
    #[must_use]
    pub const fn type_role(&self) -> &TypeRoleCode {
        &self.type_role
    }

    /// Returns the counter.
    #[must_use]
    pub const fn counter(&self) -> u32 {
        self.counter
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns the name length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normalized.chars().count()
    }

    /// Returns true if the name is empty. Never the case for a validated name.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for NodeName {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for NodeName {
    type Error = InvalidName;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialEq for NodeName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for NodeName {}

impl Hash for NodeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for NodeName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
