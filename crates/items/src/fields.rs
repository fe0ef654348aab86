//! Flat string representations of an [`Item`].
//!
//! Two shapes are supported: a `BTreeMap<String, String>` with one entry per
//! present field, and a line format with one `key: value` pair per line.
//! A document may hold several line-format records separated by `---` lines.
//! Line values escape `\`, newline, carriage return and tab so that multi-line
//! text stays on one line.

use std::collections::BTreeMap;

use outliner_core::{DomainError, DomainResult, Violation};

use crate::field::ItemField;
use crate::item::Item;

impl Item {
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        self.entries()
            .map(|(field, value)| (field.as_str().to_owned(), value.to_owned()))
            .collect()
    }

    /// Build an item from a flat map. Every missing required key is reported.
    pub fn from_fields(fields: &BTreeMap<String, String>) -> DomainResult<Item> {
        let missing: Vec<Violation> = ItemField::REQUIRED
            .into_iter()
            .filter(|field| !fields.contains_key(field.as_str()))
            .map(|field| Violation::MissingField {
                field: field.as_str(),
            })
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::non_conforming(missing));
        }

        let unknown = fields
            .keys()
            .filter(|key| key.parse::<ItemField>().is_err())
            .count();
        if unknown > 0 {
            tracing::debug!(unknown, "ignoring unknown item keys");
        }

        let take = |field: ItemField| fields.get(field.as_str()).cloned();
        let required = |field: ItemField| take(field).unwrap_or_default();

        Ok(Item {
            id: required(ItemField::Id),
            uid: required(ItemField::Uid),
            parent: required(ItemField::Parent),
            text: required(ItemField::Text),
            format: required(ItemField::Format),
            view: required(ItemField::View),
            orientation: take(ItemField::Orientation),
        })
    }

    /// Render as `key: value` lines in declaration order.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for (field, value) in self.entries() {
            out.push_str(field.as_str());
            out.push_str(": ");
            escape_into(value, &mut out);
            out.push('\n');
        }
        out
    }

    /// Parse the output of [`Item::to_lines`]. Blank lines are skipped.
    pub fn from_lines(input: &str) -> DomainResult<Item> {
        let mut fields = BTreeMap::new();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (key, raw) = line.split_once(':').ok_or_else(|| {
                DomainError::malformed(format!("line {line_no}: expected `key: value`"))
            })?;
            let key = key.trim();
            let raw = raw.strip_prefix(' ').unwrap_or(raw);
            let value = unescape(raw)
                .map_err(|msg| DomainError::malformed(format!("line {line_no}: {msg}")))?;

            if fields.insert(key.to_owned(), value).is_some() {
                return Err(DomainError::malformed(format!(
                    "line {line_no}: duplicate key `{key}`"
                )));
            }
        }

        Item::from_fields(&fields)
    }

    /// Parse a document of line-format records separated by `---` lines.
    ///
    /// Chunks holding only blank lines are skipped.
    pub fn from_lines_many(input: &str) -> Vec<DomainResult<Item>> {
        let mut records = Vec::new();
        let mut chunk = String::new();
        for line in input.lines() {
            if line.trim_end() == RECORD_SEPARATOR {
                records.push(std::mem::take(&mut chunk));
            } else {
                chunk.push_str(line);
                chunk.push('\n');
            }
        }
        records.push(chunk);

        records
            .iter()
            .filter(|record| !record.trim().is_empty())
            .map(|record| Item::from_lines(record))
            .collect()
    }
}

const RECORD_SEPARATOR: &str = "---";

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("dangling `\\` at end of value".to_string()),
        }
    }
    Ok(out)
}
