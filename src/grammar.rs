//! The node name grammar and its structural self-check.

use std::sync::LazyLock;

use crate::builder::generate;
use crate::constants::{
    COUNTER_WIDTH, MAX_CITY_LENGTH, MAX_COUNTER, MAX_LANDMARK_LENGTH, MAX_NAME_LENGTH,
    MAX_STATE_LENGTH, MAX_TYPE_ROLE_LENGTH, MIN_COUNTER, MIN_STATE_LENGTH, SEPARATOR,
};
use crate::error::{GenerationFailure, StructuralError};
use crate::field_spec::{Charset, FieldKind, FieldSpec};
use crate::issue::ValidationResult;
use crate::node_name::NodeName;
use crate::registry::{CodeRegistry, Region};
use crate::type_role::TypeRoleCode;
use crate::validator::validate;

/// Widest counter that always fits a `u32`.
const MAX_COUNTER_DIGITS: usize = 9;

static CANONICAL: LazyLock<NodeNameGrammar> = LazyLock::new(|| {
    match NodeNameGrammar::from_registry(CodeRegistry::builtin()) {
        Ok(grammar) => grammar,
        Err(e) => panic!("canonical grammar failed its self-check: {e}"),
    }
});

/// How the overall length cap relates to the field widths.
///
/// The documented widths (state 3, city 7, landmark 7, type+role 2, counter 2)
/// plus three separators add up to 24, one more than the 23-character cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Field widths may jointly exceed the cap; the cap is enforced on each
    /// candidate as a total-length check.
    #[default]
    Capped,
    /// The sum of the maximum field widths plus separators must fit the cap.
    Strict,
}

/// Ordered field table, separator and length cap for node names.
///
/// ```text
/// <state>-<city>-<landmark>-<type_role><counter>
/// ```
///
/// # Examples
///
/// ```
/// use meshname::{FieldKind, NodeNameGrammar};
///
/// let grammar = NodeNameGrammar::canonical();
/// assert_eq!(grammar.max_length(), 23);
/// assert_eq!(grammar.separator(), '-');
/// assert_eq!(grammar.field(FieldKind::City).max_length(), 7);
///
/// let name = grammar.validate("CO-DENVER-CHSPARK-RC01").into_result().unwrap();
/// assert_eq!(name.city(), "DENVER");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeNameGrammar {
    fields: Vec<FieldSpec>,
    separator: char,
    max_length: usize,
    registry: CodeRegistry,
}

impl NodeNameGrammar {
    /// Returns the canonical grammar built from the built-in registry.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in table fails its structural
    /// self-check. This is a configuration error, not an input error.
    #[must_use]
    pub fn canonical() -> &'static Self {
        &CANONICAL
    }

    /// Builds the standard field table for a registry.
    ///
    /// The state field is enumerated only if the registry has regions.
    #[must_use]
    pub fn standard_fields(registry: &CodeRegistry) -> Vec<FieldSpec> {
        let mut state = FieldSpec::new(
            FieldKind::State,
            MIN_STATE_LENGTH,
            MAX_STATE_LENGTH,
            Charset::UpperAlpha,
        );
        if !registry.regions().is_empty() {
            state = state.with_enum_values(registry.regions().iter().map(Region::code));
        }

        vec![
            state,
            FieldSpec::new(FieldKind::City, 1, MAX_CITY_LENGTH, Charset::UpperAlphanumeric),
            FieldSpec::new(
                FieldKind::Landmark,
                1,
                MAX_LANDMARK_LENGTH,
                Charset::UpperAlphanumeric,
            ),
            FieldSpec::new(FieldKind::TypeRole, 1, MAX_TYPE_ROLE_LENGTH, Charset::UpperAlpha)
                .with_enum_values(registry.roles().iter().map(TypeRoleCode::as_str)),
            FieldSpec::new(FieldKind::Counter, COUNTER_WIDTH, COUNTER_WIDTH, Charset::Digits)
                .with_range(MIN_COUNTER..=MAX_COUNTER)
                .joined(),
        ]
    }

    /// Builds the standard grammar for a registry under [`LengthPolicy::Capped`].
    ///
    /// # Errors
    ///
    /// Returns `StructuralError` if a registry code does not fit its field.
    pub fn from_registry(registry: CodeRegistry) -> Result<Self, StructuralError> {
        let fields = Self::standard_fields(&registry);
        Self::new(fields, registry, LengthPolicy::Capped)
    }

    /// Builds a grammar from an explicit field table and runs the self-check.
    ///
    /// # Errors
    ///
    /// Returns `StructuralError` if the table is malformed or, under
    /// [`LengthPolicy::Strict`], if the widest possible name exceeds the cap.
    pub fn new(
        fields: Vec<FieldSpec>,
        registry: CodeRegistry,
        policy: LengthPolicy,
    ) -> Result<Self, StructuralError> {
        let grammar = Self {
            fields,
            separator: SEPARATOR,
            max_length: MAX_NAME_LENGTH,
            registry,
        };
        grammar.self_check(policy)?;
        Ok(grammar)
    }

    /// Returns the fields in name order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the constraints for one field.
    #[must_use]
    pub fn field(&self, kind: FieldKind) -> &FieldSpec {
        // Field order is fixed by the self-check.
        &self.fields[kind as usize]
    }

    /// Returns the separator character.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Returns the maximum name length.
    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns the code registry the grammar was built from.
    #[must_use]
    pub const fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    /// Number of separators in a well-formed name.
    #[must_use]
    pub fn separator_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| !f.is_joined())
            .count()
            .saturating_sub(1)
    }

    /// Length of the longest name the field widths allow.
    #[must_use]
    pub fn worst_case_length(&self) -> usize {
        self.fields.iter().map(FieldSpec::max_length).sum::<usize>() + self.separator_count()
    }

    /// Length of the shortest name the field widths allow.
    #[must_use]
    pub fn minimum_length(&self) -> usize {
        self.fields.iter().map(FieldSpec::effective_min).sum::<usize>() + self.separator_count()
    }

    /// Validates a candidate against this grammar.
    #[must_use]
    pub fn validate(&self, candidate: &str) -> ValidationResult {
        validate(candidate, self)
    }

    /// Assembles and validates a name from field values.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailure` with every validator issue if the
    /// assembled name is invalid.
    pub fn generate(
        &self,
        state: &str,
        city: &str,
        landmark: &str,
        type_role: &str,
        counter: u32,
    ) -> Result<NodeName, GenerationFailure> {
        generate(self, state, city, landmark, type_role, counter)
    }

    fn self_check(&self, policy: LengthPolicy) -> Result<(), StructuralError> {
        if self.fields.len() != FieldKind::ALL.len() {
            return Err(StructuralError::FieldCount {
                expected: FieldKind::ALL.len(),
                actual: self.fields.len(),
            });
        }

        for (index, (spec, expected)) in self.fields.iter().zip(FieldKind::ALL).enumerate() {
            if spec.kind() != expected {
                return Err(StructuralError::FieldOrder {
                    index,
                    expected,
                    found: spec.kind(),
                });
            }
            Self::check_field(spec)?;
            match spec.kind() {
                FieldKind::TypeRole => self.check_roles_registered(spec)?,
                FieldKind::Counter => Self::check_counter(spec)?,
                _ => {}
            }

            if spec.is_joined() {
                let joinable = index
                    .checked_sub(1)
                    .map(|i| &self.fields[i])
                    .is_some_and(|prev| prev.enum_values().is_some() && !prev.is_joined());
                if !joinable {
                    return Err(StructuralError::InvalidJoin { field: spec.kind() });
                }
            }
        }

        let minimum = self.minimum_length();
        if minimum > self.max_length {
            return Err(StructuralError::MinimumTooLong {
                minimum,
                max: self.max_length,
            });
        }

        let worst_case = self.worst_case_length();
        if worst_case > self.max_length {
            match policy {
                LengthPolicy::Strict => {
                    return Err(StructuralError::WorstCaseTooLong {
                        worst_case,
                        max: self.max_length,
                    });
                }
                LengthPolicy::Capped => tracing::debug!(
                    worst_case,
                    max = self.max_length,
                    "field widths exceed the name cap; total length is checked per name"
                ),
            }
        }

        Ok(())
    }

    fn check_roles_registered(&self, spec: &FieldSpec) -> Result<(), StructuralError> {
        let Some(values) = spec.enum_values() else {
            return Err(StructuralError::EmptyEnum { field: spec.kind() });
        };
        match values.iter().find(|v| self.registry.role(v).is_none()) {
            Some(value) => Err(StructuralError::InvalidEnumValue {
                field: spec.kind(),
                value: value.clone(),
                reason: "not a registered type+role code",
            }),
            None => Ok(()),
        }
    }

    fn check_counter(spec: &FieldSpec) -> Result<(), StructuralError> {
        if spec.charset() != Charset::Digits || spec.range().is_none() {
            return Err(StructuralError::InvalidCounter {
                reason: "counter must be digits with a numeric range",
            });
        }
        if spec.max_length() > MAX_COUNTER_DIGITS {
            return Err(StructuralError::InvalidCounter {
                reason: "counter must be at most 9 digits",
            });
        }
        Ok(())
    }

    fn check_field(spec: &FieldSpec) -> Result<(), StructuralError> {
        if spec.min_length() == 0 || spec.min_length() > spec.max_length() {
            return Err(StructuralError::InvalidWidth {
                field: spec.kind(),
                min: spec.min_length(),
                max: spec.max_length(),
            });
        }

        let Some(values) = spec.enum_values() else {
            return Ok(());
        };
        if values.is_empty() {
            return Err(StructuralError::EmptyEnum { field: spec.kind() });
        }
        for value in values {
            let len = value.chars().count();
            let reason = if len < spec.min_length() || len > spec.max_length() {
                Some("length outside the field width")
            } else if spec.charset().first_invalid(value).is_some() {
                Some("contains characters outside the field charset")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(StructuralError::InvalidEnumValue {
                    field: spec.kind(),
                    value: value.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_grammar_passes_self_check() {
        let grammar = NodeNameGrammar::from_registry(CodeRegistry::builtin());
        assert!(grammar.is_ok());
        assert_eq!(NodeNameGrammar::canonical().fields().len(), 5);
    }

    #[test]
    fn canonical_layout() {
        let grammar = NodeNameGrammar::canonical();
        assert_eq!(grammar.separator_count(), 3);
        assert_eq!(grammar.minimum_length(), 2 + 1 + 1 + 1 + 2 + 3);
        assert_eq!(grammar.field(FieldKind::State).min_length(), 2);
        assert_eq!(grammar.field(FieldKind::State).max_length(), 3);
        assert_eq!(grammar.field(FieldKind::Landmark).max_length(), 7);
        assert_eq!(grammar.field(FieldKind::TypeRole).max_length(), 2);
        assert_eq!(grammar.field(FieldKind::Counter).range(), Some(&(1..=99)));
        assert!(grammar.field(FieldKind::Counter).is_joined());
    }

    #[test]
    fn documented_widths_exceed_cap_by_one() {
        // 3 + 7 + 7 + 2 + 2 + 3 separators
        let grammar = NodeNameGrammar::canonical();
        assert_eq!(grammar.worst_case_length(), 24);
        assert!(grammar.worst_case_length() > grammar.max_length());
    }

    #[test]
    fn strict_policy_rejects_documented_widths() {
        let registry = CodeRegistry::builtin();
        let fields = NodeNameGrammar::standard_fields(&registry);
        let result = NodeNameGrammar::new(fields, registry, LengthPolicy::Strict);
        assert_eq!(
            result.unwrap_err(),
            StructuralError::WorstCaseTooLong {
                worst_case: 24,
                max: 23
            }
        );
    }

    #[test]
    fn strict_policy_accepts_two_letter_states() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[0] = FieldSpec::new(FieldKind::State, 2, 2, Charset::UpperAlpha)
            .with_enum_values(registry.regions().iter().map(Region::code));
        let grammar = NodeNameGrammar::new(fields, registry, LengthPolicy::Strict).unwrap();
        assert_eq!(grammar.worst_case_length(), 23);
    }

    #[test]
    fn regionless_registry_leaves_state_open() {
        let grammar = NodeNameGrammar::from_registry(CodeRegistry::core_roles_only()).unwrap();
        assert!(grammar.field(FieldKind::State).enum_values().is_none());
        assert!(grammar.validate("ON-OTTAWA-CHATEAU-RC01").is_valid());
    }

    #[test]
    fn wrong_field_count_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields.pop();
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::FieldCount {
                expected: 5,
                actual: 4
            })
        ));
    }

    #[test]
    fn wrong_field_order_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields.swap(1, 2);
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::FieldOrder { index: 1, .. })
        ));
    }

    #[test]
    fn join_after_open_field_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[2] = FieldSpec::new(FieldKind::Landmark, 1, 7, Charset::UpperAlphanumeric).joined();
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::InvalidJoin {
                field: FieldKind::Landmark
            })
        ));
    }

    #[test]
    fn enum_value_wider_than_field_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[3] = FieldSpec::new(FieldKind::TypeRole, 1, 2, Charset::UpperAlpha)
            .with_enum_values(["T", "RCX"]);
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::InvalidEnumValue { field: FieldKind::TypeRole, .. })
        ));
    }

    #[test]
    fn unregistered_role_code_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[3] = FieldSpec::new(FieldKind::TypeRole, 1, 2, Charset::UpperAlpha)
            .with_enum_values(["T", "RX"]);
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::InvalidEnumValue { ref value, .. }) if value == "RX"
        ));
    }

    #[test]
    fn open_type_role_field_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[3] = FieldSpec::new(FieldKind::TypeRole, 1, 2, Charset::UpperAlpha);
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::EmptyEnum {
                field: FieldKind::TypeRole
            })
        ));
    }

    #[test]
    fn counter_without_range_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[4] = FieldSpec::new(FieldKind::Counter, 2, 2, Charset::Digits).joined();
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::InvalidCounter { .. })
        ));
    }

    #[test]
    fn empty_enum_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[3] = FieldSpec::new(FieldKind::TypeRole, 1, 2, Charset::UpperAlpha)
            .with_enum_values(Vec::<String>::new());
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::EmptyEnum { .. })
        ));
    }

    #[test]
    fn inverted_width_fails() {
        let registry = CodeRegistry::builtin();
        let mut fields = NodeNameGrammar::standard_fields(&registry);
        fields[1] = FieldSpec::new(FieldKind::City, 5, 3, Charset::UpperAlphanumeric);
        assert!(matches!(
            NodeNameGrammar::new(fields, registry, LengthPolicy::Capped),
            Err(StructuralError::InvalidWidth { min: 5, max: 3, .. })
        ));
    }
}
