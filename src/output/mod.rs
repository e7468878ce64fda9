mod csv;
mod json;
mod table;
mod yaml;

pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

use kube::ResourceExt;
use kube::api::DynamicObject;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;

/// Placeholder for missing cells
pub const NONE: &str = "<none>";

/// Matched resources laid out as rows: kind, namespace, name and the filtered annotation
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FilterResult {
    /// Empty result with a column for `annotation_key`
    pub fn new(annotation_key: &str) -> Self {
        let annotation_column = if annotation_key.is_empty() {
            "ANNOTATION".to_string()
        } else {
            annotation_key.to_string()
        };
        Self {
            columns: vec![
                "KIND".to_string(),
                "NAMESPACE".to_string(),
                "NAME".to_string(),
                annotation_column,
            ],
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: &str, namespace: Option<&str>, name: &str, value: Option<&str>) {
        self.rows.push(vec![
            kind.to_string(),
            namespace.unwrap_or(NONE).to_string(),
            name.to_string(),
            value.unwrap_or(NONE).to_string(),
        ]);
    }

    /// Append rows for listed objects
    pub fn extend_objects<'a>(
        &mut self,
        kind: &str,
        key: &str,
        objects: impl IntoIterator<Item = &'a DynamicObject>,
    ) {
        for obj in objects {
            let value = obj.annotations().get(key).map(String::as_str);
            self.push(kind, obj.namespace().as_deref(), &obj.name_any(), value);
        }
    }

    /// Append rows for untyped records (already validated by the filter)
    pub fn extend_values<'a>(&mut self, key: &str, values: impl IntoIterator<Item = &'a Value>) {
        for value in values {
            let kind = value.get("kind").and_then(Value::as_str).unwrap_or(NONE);
            let metadata = value.get("metadata");
            let field = |name: &str| {
                metadata
                    .and_then(|m| m.get(name))
                    .and_then(Value::as_str)
            };
            let annotation = metadata
                .and_then(|m| m.get("annotations"))
                .and_then(|a| a.get(key))
                .and_then(Value::as_str);
            self.push(kind, field("namespace"), field("name").unwrap_or(NONE), annotation);
        }
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let map: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(col, val)| (col.clone(), Value::String(val.clone())))
                    .collect();
                Value::Object(map)
            })
            .collect()
    }

    pub fn format(&self, format: &OutputFormat, no_headers: bool) -> String {
        match format {
            OutputFormat::Table => TableFormatter::format(self, no_headers),
            OutputFormat::Json => JsonFormatter::format(self),
            OutputFormat::Csv => CsvFormatter::format(self, no_headers),
            OutputFormat::Yaml => YamlFormatter::format(self),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
