//! Region and type+role code tables.
//!
//! The grammar reads its enumerated values from a [`CodeRegistry`] so that new
//! codes agreed by the community can be added without touching validation
//! logic. With the `config` feature a registry can be loaded from JSON:
//!
//! ```json
//! {
//!   "include_builtin": true,
//!   "regions": [{ "code": "DEN", "name": "Denver metro" }],
//!   "roles": [{ "code": "RS", "server": "repeater", "mobility": "static", "tier": "edge" }]
//! }
//! ```

use std::fmt;

use crate::constants::{MAX_STATE_LENGTH, MIN_STATE_LENGTH};
use crate::error::RegistryError;
use crate::type_role::{ExtensionRole, TypeRoleCode};

/// Built-in state and territory codes.
const BUILTIN_REGIONS: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AS", "American Samoa"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("GU", "Guam"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("MP", "Northern Mariana Islands"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("VI", "U.S. Virgin Islands"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// A state or region short-code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Region {
    code: String,
    name: String,
}

impl Region {
    /// Returns the short-code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the descriptive name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

/// Region and type+role tables consumed by the grammar.
///
/// The seven core type+role codes are always present.
///
/// # Examples
///
/// ```
/// use meshname::{CodeRegistry, ExtensionRole, InfrastructureTier, Mobility, ServerKind};
///
/// let mut registry = CodeRegistry::builtin();
/// assert!(registry.region("CO").is_some());
///
/// registry.add_region("DEN", "Denver metro").unwrap();
/// registry
///     .add_role(ExtensionRole::new("RS", ServerKind::Repeater, Mobility::Static, InfrastructureTier::Edge).unwrap())
///     .unwrap();
/// assert_eq!(registry.role("RS").map(|r| r.as_str()), Some("RS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegistry {
    regions: Vec<Region>,
    roles: Vec<TypeRoleCode>,
}

impl CodeRegistry {
    /// Creates a registry with the core roles and no regions.
    #[must_use]
    pub fn core_roles_only() -> Self {
        Self {
            regions: Vec::new(),
            roles: TypeRoleCode::CORE.to_vec(),
        }
    }

    /// Creates a registry with the built-in regions and core roles.
    #[must_use]
    pub fn builtin() -> Self {
        let regions = BUILTIN_REGIONS
            .iter()
            .map(|&(code, name)| Region {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect();
        Self {
            regions,
            roles: TypeRoleCode::CORE.to_vec(),
        }
    }

    /// Adds a region code.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the code is not 2-3 uppercase letters or is
    /// already registered.
    pub fn add_region(&mut self, code: &str, name: &str) -> Result<(), RegistryError> {
        let len = code.chars().count();
        if !(MIN_STATE_LENGTH..=MAX_STATE_LENGTH).contains(&len) {
            return Err(RegistryError::InvalidRegion {
                code: code.to_string(),
                reason: "region codes are 2 or 3 characters",
            });
        }
        if !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(RegistryError::InvalidRegion {
                code: code.to_string(),
                reason: "region codes are uppercase letters only",
            });
        }
        if self.region(code).is_some() {
            return Err(RegistryError::DuplicateCode {
                code: code.to_string(),
            });
        }
        self.regions.push(Region {
            code: code.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    /// Adds an extension type+role code.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateCode` if the code is already registered.
    pub fn add_role(&mut self, role: ExtensionRole) -> Result<(), RegistryError> {
        if self.role(role.as_str()).is_some() {
            return Err(RegistryError::DuplicateCode {
                code: role.as_str().to_string(),
            });
        }
        self.roles.push(TypeRoleCode::Extension(role));
        Ok(())
    }

    /// Looks up a region by exact code.
    #[must_use]
    pub fn region(&self, code: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.code == code)
    }

    /// Looks up a type+role code by exact code.
    #[must_use]
    pub fn role(&self, code: &str) -> Option<&TypeRoleCode> {
        self.roles.iter().find(|r| r.as_str() == code)
    }

    /// Returns all regions in registration order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Returns all type+role codes in registration order.
    #[must_use]
    pub fn roles(&self) -> &[TypeRoleCode] {
        &self.roles
    }

    /// Parses a registry document.
    ///
    /// Core roles are always included. Built-in regions are included unless
    /// the document sets `"include_builtin": false`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if the document is not valid JSON of the
    /// expected shape, or if any code is invalid or duplicated.
    #[cfg(feature = "config")]
    pub fn from_json(input: &str) -> Result<Self, RegistryError> {
        let doc: document::RegistryDocument =
            serde_json::from_str(input).map_err(|e| RegistryError::Malformed(e.to_string()))?;

        let mut registry = if doc.include_builtin {
            Self::builtin()
        } else {
            Self::core_roles_only()
        };

        for region in &doc.regions {
            registry.add_region(&region.code, &region.name)?;
        }
        for role in doc.roles {
            let ext = ExtensionRole::new(&role.code, role.server, role.mobility, role.tier)
                .map_err(|reason| RegistryError::InvalidRole {
                    code: role.code.clone(),
                    reason,
                })?;
            registry.add_role(ext)?;
        }

        tracing::info!(
            regions = registry.regions.len(),
            roles = registry.roles.len(),
            "loaded code registry"
        );
        Ok(registry)
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(feature = "config")]
mod document {
    use serde::Deserialize;

    use crate::type_role::{InfrastructureTier, Mobility, ServerKind};

    const fn default_true() -> bool {
        true
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct RegistryDocument {
        #[serde(default = "default_true")]
        pub include_builtin: bool,
        #[serde(default)]
        pub regions: Vec<RegionEntry>,
        #[serde(default)]
        pub roles: Vec<RoleEntry>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct RegionEntry {
        pub code: String,
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct RoleEntry {
        pub code: String,
        pub server: ServerKind,
        pub mobility: Mobility,
        #[serde(default = "default_tier")]
        pub tier: InfrastructureTier,
    }

    const fn default_tier() -> InfrastructureTier {
        InfrastructureTier::None
    }
}
