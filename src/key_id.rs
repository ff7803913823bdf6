//! Public key identifiers.

use std::fmt;
use std::str::FromStr;

use crate::constants::{LONG_ID_LENGTH, PUBLIC_KEY_HEX_LENGTH, SHORT_ID_LENGTH};
use crate::error::KeyIdError;

/// A public key, or a leading part of one, in uppercase hex.
///
/// Nodes are addressed on the mesh by the first byte of their public key.
/// Some leading bytes are reserved and should not be used for new nodes:
/// `00` and `FF` are taken by map services, and the whole `A` block is held
/// back for future use.
///
/// # Examples
///
/// ```
/// use meshname::PublicKeyId;
///
/// let id = PublicKeyId::parse("3f9a").unwrap();
/// assert_eq!(id.as_str(), "3F9A");
/// assert_eq!(id.short_id(), "3F");
/// assert_eq!(id.long_id(), Some("3F9A"));
/// assert!(!id.is_reserved());
///
/// assert!(PublicKeyId::parse("A1").unwrap().is_reserved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKeyId(String);

impl PublicKeyId {
    /// Parses a hex key id and normalizes it to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `KeyIdError` if:
    /// - The input is empty
    /// - The input is longer than a full public key (64 hex digits)
    /// - The input contains a non-hex character
    /// - The input is shorter than one byte or does not encode whole bytes
    pub fn parse(input: &str) -> Result<Self, KeyIdError> {
        if input.is_empty() {
            return Err(KeyIdError::Empty);
        }

        let actual = input.chars().count();
        if actual > PUBLIC_KEY_HEX_LENGTH {
            return Err(KeyIdError::TooLong {
                max: PUBLIC_KEY_HEX_LENGTH,
                actual,
            });
        }

        for (i, c) in input.chars().enumerate() {
            if !c.is_ascii_hexdigit() {
                return Err(KeyIdError::InvalidChar { char: c, position: i });
            }
        }

        if actual < SHORT_ID_LENGTH {
            return Err(KeyIdError::TooShort {
                min: SHORT_ID_LENGTH,
                actual,
            });
        }
        if actual % 2 != 0 {
            return Err(KeyIdError::OddLength { actual });
        }

        Ok(Self(input.to_ascii_uppercase()))
    }

    /// Returns the id as uppercase hex.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first byte as two hex digits.
    #[must_use]
    pub fn short_id(&self) -> &str {
        &self.0[..SHORT_ID_LENGTH]
    }

    /// Returns the first two bytes as four hex digits, if present.
    #[must_use]
    pub fn long_id(&self) -> Option<&str> {
        self.0.get(..LONG_ID_LENGTH)
    }

    /// Returns true if this is a complete 32-byte public key.
    #[must_use]
    pub fn is_full_key(&self) -> bool {
        self.0.len() == PUBLIC_KEY_HEX_LENGTH
    }

    /// Returns true if the leading byte is reserved.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        let short = self.short_id();
        short == "00" || short == "FF" || short.starts_with('A')
    }
}

impl fmt::Display for PublicKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PublicKeyId {
    type Err = KeyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PublicKeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PublicKeyId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PublicKeyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
