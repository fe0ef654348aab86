//! Conformance checking of untyped key/value data against the item contract.
//!
//! A candidate conforms when it is an object holding a string for each of `id`,
//! `uid`, `parent`, `text`, `format` and `view`, and either nothing, `null` or a
//! string for `orientation`. Empty strings conform. Keys outside the contract
//! are reported but tolerated.

use serde::Deserialize;
use serde_json::Value;

use outliner_core::{DomainError, DomainResult, Violation};

use crate::field::ItemField;
use crate::item::Item;

/// Outcome of [`check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceReport {
    violations: Vec<Violation>,
    unknown_keys: Vec<String>,
}

impl ConformanceReport {
    pub fn is_conforming(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Keys present in the candidate that are not item fields, sorted.
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    pub fn into_result(self) -> DomainResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::non_conforming(self.violations))
        }
    }
}

/// Check `value` against the item contract, collecting every violation.
pub fn check(value: &Value) -> ConformanceReport {
    let mut report = ConformanceReport::default();

    let Some(object) = value.as_object() else {
        report.violations.push(Violation::NotAnObject {
            found: json_kind(value),
        });
        return report;
    };

    for field in ItemField::ALL {
        match object.get(field.as_str()) {
            None => {
                if field.is_required() {
                    report.violations.push(Violation::MissingField {
                        field: field.as_str(),
                    });
                }
            }
            Some(Value::String(_)) => {}
            Some(Value::Null) if !field.is_required() => {}
            Some(other) => report.violations.push(Violation::WrongType {
                field: field.as_str(),
                found: json_kind(other),
            }),
        }
    }

    report.unknown_keys = object
        .keys()
        .filter(|key| key.parse::<ItemField>().is_err())
        .cloned()
        .collect();

    tracing::trace!(
        violations = report.violations.len(),
        unknown_keys = report.unknown_keys.len(),
        "checked item candidate"
    );

    report
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Item {
    /// Convert a JSON value, failing with every violation when it does not conform.
    pub fn from_value(value: &Value) -> DomainResult<Item> {
        let report = check(value);
        if !report.unknown_keys().is_empty() {
            tracing::debug!(keys = ?report.unknown_keys(), "ignoring unknown item keys");
        }
        report.into_result()?;
        // A conforming object always deserializes; this error is unreachable.
        Item::deserialize(value).map_err(|e| DomainError::malformed(e.to_string()))
    }

    /// JSON object with one string entry per present field.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries()
                .map(|(field, value)| (field.as_str().to_owned(), Value::String(value.to_owned())))
                .collect(),
        )
    }

    pub fn from_json(input: &str) -> DomainResult<Item> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| DomainError::malformed(e.to_string()))?;
        Item::from_value(&value)
    }

    /// Parse either a single object or an array of objects.
    ///
    /// The outer `Err` is reserved for input that is not JSON; each element gets
    /// its own result so callers can report on all of them.
    pub fn from_json_many(input: &str) -> DomainResult<Vec<DomainResult<Item>>> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| DomainError::malformed(e.to_string()))?;
        Ok(match value {
            Value::Array(values) => values.iter().map(Item::from_value).collect(),
            single => vec![Item::from_value(&single)],
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}
