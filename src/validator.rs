//! Candidate name validation.

use crate::constants::MAX_SUGGESTIONS;
use crate::field_spec::{FieldKind, FieldSpec};
use crate::grammar::NodeNameGrammar;
use crate::issue::{IssueKind, ValidationIssue, ValidationResult};
use crate::node_name::NodeName;

/// Validates a candidate name against a grammar.
///
/// Every issue is collected; validation never stops at the first problem.
/// If the candidate cannot be split into fields, a single segmentation issue
/// is reported and per-field checks are skipped. The total length is checked
/// in all cases.
///
/// The type+role code and counter share the last segment. It is split on the
/// longest type+role code that leaves only counter characters behind, so
/// `RC01` reads as `RC` + `01` and `T01` as `T` + `01`. Without such a code the
/// segment is cut before its first counter character.
///
/// Enum membership is checked for every enumerated field, even one that
/// already failed its length or charset check. Suggestions are ranked on the
/// uppercased value, so `rc` suggests `RC`.
///
/// # Examples
///
/// ```
/// use meshname::{validate, FieldKind, IssueKind, NodeNameGrammar, TypeRoleCode};
///
/// let grammar = NodeNameGrammar::canonical();
///
/// let name = validate("CO-DENVER-CHSPARK-T01", grammar).into_result().unwrap();
/// assert_eq!(name.type_role(), &TypeRoleCode::Room);
///
/// let result = validate("COLORADO-DENVER-CHEESMANPARK-RC01", grammar);
/// assert_eq!(result.issues_for(FieldKind::State).count(), 2);
/// assert_eq!(result.issues_for(FieldKind::Landmark).count(), 1);
/// ```
#[must_use]
pub fn validate(candidate: &str, grammar: &NodeNameGrammar) -> ValidationResult {
    let mut issues = Vec::new();

    let segments = segment(candidate, grammar);
    match &segments {
        Ok(values) => {
            for (spec, value) in grammar.fields().iter().zip(values) {
                check_field(spec, value, &mut issues);
            }
        }
        Err(found) => issues.push(ValidationIssue::whole(IssueKind::Segmentation {
            expected: grammar.separator_count(),
            found: *found,
        })),
    }

    let actual = candidate.chars().count();
    if actual > grammar.max_length() {
        issues.push(ValidationIssue::whole(IssueKind::TotalLength {
            max: grammar.max_length(),
            actual,
        }));
    }

    tracing::trace!(candidate, issues = issues.len(), "validated node name");

    match segments {
        Ok(values) if issues.is_empty() => assemble(candidate, &values, grammar),
        _ => ValidationResult::Invalid(issues),
    }
}

/// Splits a candidate into one value per field.
///
/// Returns the number of separators found if it does not match the grammar.
fn segment<'a>(candidate: &'a str, grammar: &NodeNameGrammar) -> Result<Vec<&'a str>, usize> {
    let parts: Vec<&str> = candidate.split(grammar.separator()).collect();
    if parts.len() != grammar.separator_count() + 1 {
        return Err(parts.len() - 1);
    }

    let fields = grammar.fields();
    let mut values = Vec::with_capacity(fields.len());
    let mut parts = parts.into_iter();
    let mut i = 0;
    while i < fields.len() {
        let Some(part) = parts.next() else {
            break;
        };
        match fields.get(i + 1).filter(|next| next.is_joined()) {
            Some(next) => {
                let (head, tail) = split_joined(part, &fields[i], next);
                values.push(head);
                values.push(tail);
                i += 2;
            }
            None => {
                values.push(part);
                i += 1;
            }
        }
    }
    Ok(values)
}

/// Splits a segment holding an enumerated field followed by a joined field.
fn split_joined<'a>(segment: &'a str, head: &FieldSpec, tail: &FieldSpec) -> (&'a str, &'a str) {
    let longest = head.enum_values().and_then(|values| {
        values
            .iter()
            .filter(|v| {
                segment
                    .strip_prefix(v.as_str())
                    .is_some_and(|rest| tail.charset().first_invalid(rest).is_none())
            })
            .max_by_key(|v| v.len())
    });

    let cut = match longest {
        Some(code) => code.len(),
        None => segment
            .char_indices()
            .find(|&(_, c)| tail.charset().contains(c))
            .map_or(segment.len(), |(i, _)| i),
    };
    segment.split_at(cut)
}

fn check_field(spec: &FieldSpec, value: &str, issues: &mut Vec<ValidationIssue>) {
    let actual = value.chars().count();
    if actual == 0 && !spec.is_required() {
        return;
    }

    if actual < spec.min_length() || actual > spec.max_length() {
        issues.push(ValidationIssue::at(
            spec.kind(),
            IssueKind::FieldLength {
                min: spec.min_length(),
                max: spec.max_length(),
                actual,
            },
        ));
    }
    if let Some((position, char)) = spec.charset().first_invalid(value) {
        issues.push(ValidationIssue::at(
            spec.kind(),
            IssueKind::FieldCharset {
                char,
                position,
                allowed: spec.charset().describe(),
            },
        ));
    }

    if let Some(values) = spec.enum_values()
        && !values.iter().any(|v| v == value)
    {
        issues.push(ValidationIssue::at(
            spec.kind(),
            IssueKind::FieldEnum {
                value: value.to_string(),
                suggestions: suggest(&value.to_ascii_uppercase(), values),
            },
        ));
    }

    if let Some(range) = spec.range()
        && let Ok(n) = value.parse::<u32>()
        && !range.contains(&n)
    {
        issues.push(ValidationIssue::at(
            spec.kind(),
            IssueKind::CounterRange {
                value: n,
                min: *range.start(),
                max: *range.end(),
            },
        ));
    }
}

fn assemble(candidate: &str, values: &[&str], grammar: &NodeNameGrammar) -> ValidationResult {
    let value = |kind: FieldKind| values[kind as usize];

    let code = value(FieldKind::TypeRole);
    let Some(type_role) = grammar.registry().role(code).cloned() else {
        return ValidationResult::Invalid(vec![ValidationIssue::at(
            FieldKind::TypeRole,
            IssueKind::FieldEnum {
                value: code.to_string(),
                suggestions: Vec::new(),
            },
        )]);
    };
    // Digits only and at most nine wide, both enforced by the self-check.
    let counter = value(FieldKind::Counter).parse::<u32>().unwrap_or_default();

    ValidationResult::Valid(NodeName::from_parts(
        candidate,
        value(FieldKind::State),
        value(FieldKind::City),
        value(FieldKind::Landmark),
        type_role,
        counter,
    ))
}

/// Returns the allowed values closest to `value` by edit distance.
fn suggest(value: &str, allowed: &[String]) -> Vec<String> {
    let scored: Vec<(usize, &String)> = allowed
        .iter()
        .map(|v| (edit_distance(value, v), v))
        .collect();
    let Some(best) = scored.iter().map(|&(d, _)| d).min() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|&(d, _)| d == best)
        .map(|(_, v)| v.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = Vec::with_capacity(b.len() + 1);
        row.push(i + 1);
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            row.push(substitute.min(prev[j + 1] + 1).min(row[j] + 1));
        }
        prev = row;
    }
    prev[b.len()]
}
