//! Type+role classification for named nodes.

use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_TYPE_ROLE_LENGTH;

/// Whether a node stays in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mobility {
    /// Fixed installation
    Static,
    /// Vehicle, backpack or otherwise moving
    Mobile,
}

/// What kind of server a node runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ServerKind {
    /// Hosts persistent messages
    Room,
    /// Relays traffic across the mesh
    Repeater,
}

/// Position of a node in the infrastructure hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InfrastructureTier {
    /// Long-haul backbone site
    Core,
    /// Links core sites to local coverage
    Distribution,
    /// Local coverage
    Edge,
    /// Not part of the relay hierarchy
    None,
}

impl Mobility {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Mobile => "mobile",
        }
    }
}

impl ServerKind {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Repeater => "repeater",
        }
    }
}

impl InfrastructureTier {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Distribution => "distribution",
            Self::Edge => "edge",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Mobility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for InfrastructureTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Type+role code of a node, the letters before the counter.
///
/// The seven core codes are fixed. Communities can agree on additional codes,
/// which are carried as [`TypeRoleCode::Extension`] with metadata supplied by a
/// [`CodeRegistry`](crate::CodeRegistry).
///
/// # Examples
///
/// ```
/// use meshname::{InfrastructureTier, ServerKind, TypeRoleCode};
///
/// let code: TypeRoleCode = "RC".parse().unwrap();
/// assert_eq!(code, TypeRoleCode::CoreRepeater);
/// assert_eq!(code.server_kind(), ServerKind::Repeater);
/// assert_eq!(code.tier(), InfrastructureTier::Core);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRoleCode {
    /// `T`: static room server
    Room,
    /// `TM`: mobile room server
    MobileRoom,
    /// `TR`: room server that also repeats at the edge
    RelayRoom,
    /// `RC`: core repeater
    CoreRepeater,
    /// `RD`: distribution repeater
    DistributionRepeater,
    /// `RE`: edge repeater
    EdgeRepeater,
    /// `RM`: mobile repeater
    MobileRepeater,
    /// Community-added code not in the core set
    Extension(ExtensionRole),
}

/// A community-added type+role code with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionRole {
    code: String,
    server_kind: ServerKind,
    mobility: Mobility,
    tier: InfrastructureTier,
}

impl ExtensionRole {
    /// Creates a new extension role.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, longer than two characters,
    /// contains anything other than uppercase letters, or shadows a core code.
    pub fn new(
        code: &str,
        server_kind: ServerKind,
        mobility: Mobility,
        tier: InfrastructureTier,
    ) -> Result<Self, &'static str> {
        if code.is_empty() {
            return Err("type+role code cannot be empty");
        }
        if code.len() > MAX_TYPE_ROLE_LENGTH {
            return Err("type+role code must be at most 2 characters");
        }
        if !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err("type+role code must be all uppercase letters");
        }
        if TypeRoleCode::core(code).is_some() {
            return Err("type+role code is already a core code");
        }
        Ok(Self {
            code: code.to_string(),
            server_kind,
            mobility,
            tier,
        })
    }

    /// Returns the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ExtensionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl TypeRoleCode {
    /// All core codes in table order.
    pub const CORE: [Self; 7] = [
        Self::Room,
        Self::MobileRoom,
        Self::RelayRoom,
        Self::CoreRepeater,
        Self::DistributionRepeater,
        Self::EdgeRepeater,
        Self::MobileRepeater,
    ];

    /// Looks up a core code. Matching is exact and case-sensitive.
    #[must_use]
    pub fn core(code: &str) -> Option<Self> {
        Self::CORE.into_iter().find(|c| c.as_str() == code)
    }

    /// Returns the code as written in a node name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Room => "T",
            Self::MobileRoom => "TM",
            Self::RelayRoom => "TR",
            Self::CoreRepeater => "RC",
            Self::DistributionRepeater => "RD",
            Self::EdgeRepeater => "RE",
            Self::MobileRepeater => "RM",
            Self::Extension(ext) => ext.as_str(),
        }
    }

    /// Returns the server kind.
    #[must_use]
    pub const fn server_kind(&self) -> ServerKind {
        match self {
            Self::Room | Self::MobileRoom | Self::RelayRoom => ServerKind::Room,
            Self::CoreRepeater
            | Self::DistributionRepeater
            | Self::EdgeRepeater
            | Self::MobileRepeater => ServerKind::Repeater,
            Self::Extension(ext) => ext.server_kind,
        }
    }

    /// Returns the mobility.
    #[must_use]
    pub const fn mobility(&self) -> Mobility {
        match self {
            Self::MobileRoom | Self::MobileRepeater => Mobility::Mobile,
            Self::Room
            | Self::RelayRoom
            | Self::CoreRepeater
            | Self::DistributionRepeater
            | Self::EdgeRepeater => Mobility::Static,
            Self::Extension(ext) => ext.mobility,
        }
    }

    /// Returns the infrastructure tier.
    #[must_use]
    pub const fn tier(&self) -> InfrastructureTier {
        match self {
            Self::CoreRepeater => InfrastructureTier::Core,
            Self::DistributionRepeater => InfrastructureTier::Distribution,
            Self::EdgeRepeater | Self::RelayRoom => InfrastructureTier::Edge,
            Self::Room | Self::MobileRoom | Self::MobileRepeater => InfrastructureTier::None,
            Self::Extension(ext) => ext.tier,
        }
    }

    /// Returns true if this is a core code (not an extension).
    #[must_use]
    pub const fn is_core(&self) -> bool {
        !matches!(self, Self::Extension(_))
    }
}

impl fmt::Display for TypeRoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeRoleCode {
    type Err = &'static str;

    /// Parses a core code. Extension codes need a registry to resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::core(s).ok_or("unknown type+role code")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TypeRoleCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
