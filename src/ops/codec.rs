use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::task::{Column, Priority, Task};
use crate::store;

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid import format: expected an array of tasks or {{ tasks: [...] }}")]
    UnrecognizedShape,
}

/// Exported board document: `{ exportedAt, tasks }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub tasks: Vec<Task>,
}

/// Build the export document for the full collection, stamped with the
/// current time.
pub fn export_document(tasks: &[Task]) -> ExportDocument {
    ExportDocument {
        exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        tasks: tasks.to_vec(),
    }
}

/// Default export filename, carrying the current date.
pub fn export_filename() -> String {
    format!("plank_tasks_{}.json", Utc::now().format("%Y-%m-%d"))
}

/// A record as it appears in an import document, before validation and
/// normalization. Every field is optional here; `normalize` fills the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<String>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub column: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<i64>,
}

/// A soft-validation finding for one incoming record. Warnings do not abort
/// the import; the caller decides whether to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// Index of the record in the incoming sequence
    pub index: usize,
    pub message: String,
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {}", self.index, self.message)
    }
}

/// Parse an import document body. Accepted shapes: a bare array of records,
/// `{ tasks: [...] }`, or `{ data: [...] }` as a fallback alias. Anything
/// else is a format error and nothing is imported.
pub fn parse_import(text: &str) -> Result<Vec<RawRecord>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match &value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("tasks").or_else(|| map.get("data")) {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(ImportError::UnrecognizedShape),
        },
        _ => return Err(ImportError::UnrecognizedShape),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ImportError::Parse))
        .collect()
}

/// Check incoming records for the required fields: `id`, `title`, and a
/// `column` from the fixed set.
pub fn validate(records: &[RawRecord]) -> Vec<ImportWarning> {
    let mut warnings = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if record.id.as_deref().map_or(true, str::is_empty) {
            warnings.push(ImportWarning {
                index,
                message: "missing id".to_string(),
            });
        }
        if record.title.as_deref().map_or(true, str::is_empty) {
            warnings.push(ImportWarning {
                index,
                message: "missing title".to_string(),
            });
        }
        match record.column.as_deref() {
            Some(col) if Column::parse(col).is_some() => {}
            Some(col) => warnings.push(ImportWarning {
                index,
                message: format!("unknown column \"{}\"", col),
            }),
            None => warnings.push(ImportWarning {
                index,
                message: "missing column".to_string(),
            }),
        }
    }
    warnings
}

/// Coerce incoming records into well-formed tasks: generate missing ids,
/// default missing fields, force unknown columns to backlog.
pub fn normalize(records: Vec<RawRecord>) -> Vec<Task> {
    records
        .into_iter()
        .map(|r| Task {
            id: r.id.filter(|id| !id.is_empty()).unwrap_or_else(store::fresh_id),
            title: r
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string()),
            desc: r.desc.unwrap_or_default(),
            priority: r
                .priority
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_default(),
            assignee: r.assignee.unwrap_or_default(),
            due: r.due.unwrap_or_default(),
            column: r
                .column
                .as_deref()
                .and_then(Column::parse)
                .unwrap_or(Column::Backlog),
            created_at: r.created_at.unwrap_or_else(store::now_ms),
        })
        .collect()
}
