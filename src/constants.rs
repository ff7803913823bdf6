//! Constants for node name validation.

/// Separator between name segments.
pub const SEPARATOR: char = '-';

/// Maximum total node name length in characters, separators included.
pub const MAX_NAME_LENGTH: usize = 23;

/// Minimum state/region code length.
pub const MIN_STATE_LENGTH: usize = 2;

/// Maximum state/region code length.
pub const MAX_STATE_LENGTH: usize = 3;

/// Maximum city code length.
pub const MAX_CITY_LENGTH: usize = 7;

/// Maximum landmark code length.
pub const MAX_LANDMARK_LENGTH: usize = 7;

/// Maximum type+role code length.
pub const MAX_TYPE_ROLE_LENGTH: usize = 2;

/// Fixed counter width (zero-padded).
pub const COUNTER_WIDTH: usize = 2;

/// Lowest counter value; counters start at `01`.
pub const MIN_COUNTER: u32 = 1;

/// Highest counter value.
pub const MAX_COUNTER: u32 = 99;

/// Maximum number of enum suggestions attached to a single issue.
pub const MAX_SUGGESTIONS: usize = 3;

/// Hex digits in a full public key (32 bytes).
pub const PUBLIC_KEY_HEX_LENGTH: usize = 64;

/// Hex digits in a short key id (first byte).
pub const SHORT_ID_LENGTH: usize = 2;

/// Hex digits in a long key id (first two bytes).
pub const LONG_ID_LENGTH: usize = 4;

/// URL prefix for contact links.
pub const CONTACT_URL_PREFIX: &str = "meshcore://contact/add";
