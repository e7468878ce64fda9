// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Offline input: resource records read from JSON or YAML files
//!
//! Accepts the shapes `kubectl get -o json|yaml` produces (a `List` with
//! `items`), a bare array, a single object, or a multi-document YAML stream.
//! Records are returned untyped; malformed ones are reported by the filter.

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read every record from `path`
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let documents = match extension.as_deref() {
        Some("json") => vec![parse_json(&content)?],
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        _ => match parse_json(&content) {
            Ok(doc) => vec![doc],
            Err(_) => parse_yaml(&content)?,
        },
    }
    .into_iter();

    Ok(documents.flat_map(flatten).collect())
}

fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).context("Failed to parse JSON input")
}

fn parse_yaml(content: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document).context("Failed to parse YAML input")?;
        if !value.is_null() {
            documents.push(value);
        }
    }
    if documents.is_empty() {
        return Err(anyhow!("Input contains no documents"));
    }
    Ok(documents)
}

/// Expand a document into records: `List` objects and arrays yield their elements
fn flatten(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) if matches!(map.get("items"), Some(Value::Array(_))) => {
            match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => vec![other],
    }
}
