//! Domain error model.

use serde::Serialize;
use thiserror::Error;

/// Result type used across the outline crates.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single way in which a candidate record fails the item contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The candidate is not a key/value object at all.
    NotAnObject { found: &'static str },
    /// A required field is absent.
    MissingField { field: &'static str },
    /// A known field is present but does not hold a string.
    WrongType {
        field: &'static str,
        found: &'static str,
    },
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Violation::NotAnObject { found } => write!(f, "expected an object, found {found}"),
            Violation::MissingField { field } => write!(f, "missing required field `{field}`"),
            Violation::WrongType { field, found } => {
                write!(f, "field `{field}` must be a string, found {found}")
            }
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic data failures (malformed input, contract
/// violations). IO concerns belong to the binaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Input could not be decoded into key/value form at all.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// Input decoded but does not satisfy the item contract.
    #[error("non-conforming item: {}", join_violations(.0))]
    NonConforming(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn non_conforming(violations: Vec<Violation>) -> Self {
        Self::NonConforming(violations)
    }

    /// Violations carried by a `NonConforming` error, empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::NonConforming(v) => v,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_conforming_message_lists_every_violation() {
        let err = DomainError::non_conforming(vec![
            Violation::MissingField { field: "text" },
            Violation::WrongType {
                field: "view",
                found: "number",
            },
        ]);

        assert_eq!(
            err.to_string(),
            "non-conforming item: missing required field `text`; field `view` must be a string, found number"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn other_variants_carry_no_violations() {
        assert!(DomainError::malformed("eof").violations().is_empty());
        assert!(DomainError::validation("bad").violations().is_empty());
    }

    #[test]
    fn violations_serialize_with_kind_tag() {
        let v = Violation::WrongType {
            field: "uid",
            found: "bool",
        };
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            serde_json::json!({ "kind": "wrong_type", "field": "uid", "found": "bool" })
        );
    }
}
