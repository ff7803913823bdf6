//! Contact links for sharing a node with mesh clients.

use std::fmt;

use crate::constants::{CONTACT_URL_PREFIX, PUBLIC_KEY_HEX_LENGTH};
use crate::error::KeyIdError;
use crate::key_id::PublicKeyId;
use crate::node_name::NodeName;
use crate::type_role::ServerKind;

/// A `meshcore://contact/add` link for a named node.
///
/// The advert type comes from the node's type+role code: `2` for repeaters
/// and `3` for room servers. Name characters are all URL-unreserved, so no
/// escaping is needed.
///
/// # Examples
///
/// ```
/// use meshname::{ContactUrl, NodeName, PublicKeyId};
///
/// let name = NodeName::parse("CO-DENVER-CHSPARK-RC01").unwrap();
/// let key = PublicKeyId::parse(&"3f".repeat(32)).unwrap();
/// let url = ContactUrl::new(&name, &key).unwrap();
/// assert!(url.as_str().ends_with("&type=2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactUrl(String);

impl ContactUrl {
    /// Builds the link for a node and its full public key.
    ///
    /// # Errors
    ///
    /// Returns `KeyIdError::TooShort` if `key` is not a complete public key.
    pub fn new(name: &NodeName, key: &PublicKeyId) -> Result<Self, KeyIdError> {
        if !key.is_full_key() {
            return Err(KeyIdError::TooShort {
                min: PUBLIC_KEY_HEX_LENGTH,
                actual: key.as_str().len(),
            });
        }

        Ok(Self(format!(
            "{CONTACT_URL_PREFIX}?name={name}&public_key={key}&type={}",
            advert_type(name.type_role().server_kind())
        )))
    }

    /// Returns the link as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Advert type number used by mesh clients.
#[must_use]
pub const fn advert_type(kind: ServerKind) -> u8 {
    match kind {
        ServerKind::Repeater => 2,
        ServerKind::Room => 3,
    }
}

impl fmt::Display for ContactUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContactUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
