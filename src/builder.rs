//! Name generation and a typestate builder over it.
//!
//! Generation assembles a candidate from field values and runs it through the
//! validator. Nothing is truncated or stripped: a value that does not fit is
//! reported, never silently shortened.

use std::marker::PhantomData;

use crate::constants::MIN_COUNTER;
use crate::error::GenerationFailure;
use crate::field_spec::FieldKind;
use crate::grammar::NodeNameGrammar;
use crate::issue::ValidationResult;
use crate::node_name::NodeName;

/// Assembles a name from field values and validates it.
///
/// Letters are uppercased (ASCII only) and the counter is zero-padded to the
/// counter width. Every other character is kept as given, so invalid input
/// surfaces as validator issues.
///
/// # Errors
///
/// Returns [`GenerationFailure`] with the assembled candidate and the
/// validator's issues, unmodified.
///
/// # Examples
///
/// ```
/// use meshname::{generate, NodeNameGrammar};
///
/// let grammar = NodeNameGrammar::canonical();
/// let name = generate(grammar, "co", "denver", "chspark", "rc", 1).unwrap();
/// assert_eq!(name.as_str(), "CO-DENVER-CHSPARK-RC01");
///
/// let err = generate(grammar, "CO", "DENVER", "CHEESMANPARK", "RC", 1).unwrap_err();
/// assert_eq!(err.candidate, "CO-DENVER-CHEESMANPARK-RC01");
/// ```
pub fn generate(
    grammar: &NodeNameGrammar,
    state: &str,
    city: &str,
    landmark: &str,
    type_role: &str,
    counter: u32,
) -> Result<NodeName, GenerationFailure> {
    let candidate = assemble(grammar, state, city, landmark, type_role, counter);

    match grammar.validate(&candidate) {
        ValidationResult::Valid(name) => Ok(name),
        ValidationResult::Invalid(issues) => {
            tracing::debug!(
                candidate = %candidate,
                issues = issues.len(),
                "generated node name failed validation"
            );
            Err(GenerationFailure { candidate, issues })
        }
    }
}

fn assemble(
    grammar: &NodeNameGrammar,
    state: &str,
    city: &str,
    landmark: &str,
    type_role: &str,
    counter: u32,
) -> String {
    let sep = grammar.separator();
    let width = grammar.field(FieldKind::Counter).max_length();
    format!(
        "{}{sep}{}{sep}{}{sep}{}{counter:0width$}",
        state.to_ascii_uppercase(),
        city.to_ascii_uppercase(),
        landmark.to_ascii_uppercase(),
        type_role.to_ascii_uppercase(),
    )
}

/// Marker: No fields set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: State has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasState;

/// Marker: State and city have been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasCity;

/// Marker: State, city and landmark have been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasLandmark;

/// Marker: All required fields are set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// A typestate builder for [`NodeName`] values.
///
/// Fields are set in name order: state, city, landmark, then type+role. The
/// counter may be set at any point and defaults to 1.
///
/// # Examples
///
/// ```
/// use meshname::NodeNameBuilder;
///
/// let name = NodeNameBuilder::new()
///     .state("CO")
///     .city("DENVER")
///     .landmark("CHSPARK")
///     .type_role("RD")
///     .counter(4)
///     .build()
///     .unwrap();
///
/// assert_eq!(name.as_str(), "CO-DENVER-CHSPARK-RD04");
/// ```
///
/// ```compile_fail
/// use meshname::NodeNameBuilder;
///
/// // Error: cannot call city() before state()
/// let builder = NodeNameBuilder::new().city("DENVER");
/// ```
///
/// ```compile_fail
/// use meshname::NodeNameBuilder;
///
/// // Error: cannot call build() without a type+role code
/// let name = NodeNameBuilder::new()
///     .state("CO")
///     .city("DENVER")
///     .landmark("CHSPARK")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct NodeNameBuilder<'g, State = Empty> {
    grammar: &'g NodeNameGrammar,
    state: String,
    city: String,
    landmark: String,
    type_role: String,
    counter: u32,
    _state: PhantomData<State>,
}

impl NodeNameBuilder<'static, Empty> {
    /// Creates a builder for the canonical grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grammar(NodeNameGrammar::canonical())
    }
}

impl Default for NodeNameBuilder<'static, Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'g> NodeNameBuilder<'g, Empty> {
    /// Creates a builder for a specific grammar.
    #[must_use]
    pub fn with_grammar(grammar: &'g NodeNameGrammar) -> Self {
        Self {
            grammar,
            state: String::new(),
            city: String::new(),
            landmark: String::new(),
            type_role: String::new(),
            counter: MIN_COUNTER,
            _state: PhantomData,
        }
    }

    /// Sets the state or region code.
    #[must_use]
    pub fn state(self, state: &str) -> NodeNameBuilder<'g, HasState> {
        NodeNameBuilder {
            state: state.to_string(),
            ..self.transition()
        }
    }
}

impl<'g> NodeNameBuilder<'g, HasState> {
    /// Sets the city code.
    #[must_use]
    pub fn city(self, city: &str) -> NodeNameBuilder<'g, HasCity> {
        NodeNameBuilder {
            city: city.to_string(),
            ..self.transition()
        }
    }
}

impl<'g> NodeNameBuilder<'g, HasCity> {
    /// Sets the landmark code.
    #[must_use]
    pub fn landmark(self, landmark: &str) -> NodeNameBuilder<'g, HasLandmark> {
        NodeNameBuilder {
            landmark: landmark.to_string(),
            ..self.transition()
        }
    }
}

impl<'g> NodeNameBuilder<'g, HasLandmark> {
    /// Sets the type+role code.
    #[must_use]
    pub fn type_role(self, type_role: &str) -> NodeNameBuilder<'g, Ready> {
        NodeNameBuilder {
            type_role: type_role.to_string(),
            ..self.transition()
        }
    }
}

impl NodeNameBuilder<'_, Ready> {
    /// Generates and validates the name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure`] if the assembled name is invalid.
    pub fn build(self) -> Result<NodeName, GenerationFailure> {
        generate(
            self.grammar,
            &self.state,
            &self.city,
            &self.landmark,
            &self.type_role,
            self.counter,
        )
    }
}

impl<'g, State> NodeNameBuilder<'g, State> {
    /// Sets the counter. Can be called in any state; the last value wins.
    #[must_use]
    pub fn counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self
    }

    fn transition<Next>(self) -> NodeNameBuilder<'g, Next> {
        NodeNameBuilder {
            grammar: self.grammar,
            state: self.state,
            city: self.city,
            landmark: self.landmark,
            type_role: self.type_role,
            counter: self.counter,
            _state: PhantomData,
        }
    }
}
