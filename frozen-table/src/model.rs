//! Row data as supplied by the caller.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One line of a list-style detail block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub value: String,
}

impl DetailEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// The secondary section revealed when a row is expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details {
    /// A descriptive string, shown as a single accordion line.
    Text(String),
    /// Sub-rows aligned under the value columns.
    Entries(Vec<DetailEntry>),
}

impl Default for Details {
    fn default() -> Self {
        Details::Text(String::new())
    }
}

impl Details {
    /// Only non-empty text details make the frozen label a toggle.
    pub fn is_interactive_text(&self) -> bool {
        matches!(self, Details::Text(text) if !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub name: String,
    pub other_columns: Vec<String>,
    #[serde(default)]
    pub details: Details,
}

impl Row {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        other_columns: impl IntoIterator<Item = impl Into<String>>,
        details: Details,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            other_columns: other_columns.into_iter().map(Into::into).collect(),
            details,
        }
    }
}

/// Read a JSON array of rows.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Shape problems found in a row sequence. None of them stop rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowAudit {
    /// Ids that occur more than once, in first-repeat order.
    pub duplicate_ids: Vec<String>,
    /// `(row id, column count)` for rows whose count differs from the first row's.
    pub column_mismatches: Vec<(String, usize)>,
}

impl RowAudit {
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.column_mismatches.is_empty()
    }
}

pub fn audit_rows(rows: &[Row]) -> RowAudit {
    let mut audit = RowAudit::default();
    let mut seen = HashSet::new();
    let expected = rows.first().map(|r| r.other_columns.len());

    for row in rows {
        if !seen.insert(row.id.as_str()) && !audit.duplicate_ids.contains(&row.id) {
            audit.duplicate_ids.push(row.id.clone());
        }
        if let Some(expected) = expected
            && row.other_columns.len() != expected
        {
            audit
                .column_mismatches
                .push((row.id.clone(), row.other_columns.len()));
        }
    }

    audit
}
