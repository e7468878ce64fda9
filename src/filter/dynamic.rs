// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation lookup on untyped JSON records
//!
//! Records loaded from files are plain `serde_json::Value`s, so the annotation
//! map has to be checked per element. A record is supported when `metadata` is
//! an object and `metadata.annotations` is missing, null, or an object of
//! string values.

use serde_json::Value;

use super::error::FilterError;
use super::predicate::AnnotationPredicate;

/// Look up `key` in the annotations of an untyped record.
///
/// Returns `Ok(None)` when the record is well formed but the key is absent.
pub fn annotation_value<'a>(
    item: &'a Value,
    key: &str,
    index: usize,
) -> Result<Option<&'a str>, FilterError> {
    let object = item
        .as_object()
        .ok_or_else(|| FilterError::unsupported(index, "record is not an object"))?;

    let metadata = match object.get("metadata") {
        Some(Value::Object(metadata)) => metadata,
        Some(_) => return Err(FilterError::unsupported(index, "metadata is not an object")),
        None => return Err(FilterError::unsupported(index, "record has no metadata")),
    };

    let annotations = match metadata.get("annotations") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(annotations)) => annotations,
        Some(_) => {
            return Err(FilterError::unsupported(
                index,
                "metadata.annotations is not a map",
            ));
        }
    };

    // Validate the whole map, not just the looked-up key, so malformed records
    // fail regardless of which key is queried.
    let mut found = None;
    for (name, value) in annotations {
        let value = value.as_str().ok_or_else(|| {
            FilterError::unsupported(index, format!("annotation '{}' is not a string", name))
        })?;
        if name == key {
            found = Some(value);
        }
    }
    Ok(found)
}

/// Filter untyped records. Fails atomically on the first unsupported record.
pub fn filter_values<'a>(
    items: &'a [Value],
    predicate: &AnnotationPredicate,
) -> Result<Vec<&'a Value>, FilterError> {
    let mut matched = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let value = annotation_value(item, predicate.key(), index)?;
        if predicate.matches_value(value) {
            matched.push(item);
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, annotations: Value) -> Value {
        json!({
            "apiVersion": "v1",
            "kind": "Node",
            "metadata": { "name": name, "annotations": annotations }
        })
    }

    #[test]
    fn test_annotation_value() {
        let item = record("a", json!({"env": "prod", "empty": ""}));
        assert_eq!(annotation_value(&item, "env", 0).unwrap(), Some("prod"));
        assert_eq!(annotation_value(&item, "empty", 0).unwrap(), Some(""));
        assert_eq!(annotation_value(&item, "other", 0).unwrap(), None);
    }

    #[test]
    fn test_missing_or_null_annotations() {
        let no_map = json!({"metadata": {"name": "x"}});
        assert_eq!(annotation_value(&no_map, "env", 0).unwrap(), None);

        let null_map = record("y", Value::Null);
        assert_eq!(annotation_value(&null_map, "env", 0).unwrap(), None);
    }

    #[test]
    fn test_unsupported_shapes() {
        let cases = [
            json!("just a string"),
            json!({"kind": "Node"}),
            json!({"metadata": []}),
            json!({"metadata": {"annotations": ["a"]}}),
            json!({"metadata": {"annotations": {"replicas": 3}}}),
        ];
        for (i, case) in cases.iter().enumerate() {
            let err = annotation_value(case, "env", i).unwrap_err();
            match err {
                FilterError::UnsupportedElement { index, .. } => assert_eq!(index, i),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_filter_values_scenario() {
        let items = vec![
            record("a", json!({"env": "prod"})),
            record("b", json!({})),
            record("c", json!({"env": "dev"})),
        ];

        let eq = AnnotationPredicate::present("env").with_target("prod");
        let names: Vec<_> = filter_values(&items, &eq)
            .unwrap()
            .iter()
            .map(|v| v["metadata"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a"]);

        let ne = AnnotationPredicate::absent("env").with_target("prod");
        let names: Vec<_> = filter_values(&items, &ne)
            .unwrap()
            .iter()
            .map(|v| v["metadata"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_filter_values_aborts_without_partial_result() {
        let items = vec![
            record("a", json!({"env": "prod"})),
            json!({"spec": {}}),
            record("c", json!({"env": "prod"})),
        ];
        let result = filter_values(&items, &AnnotationPredicate::present("env"));
        assert_eq!(
            result,
            Err(FilterError::UnsupportedElement {
                index: 1,
                reason: "record has no metadata".to_string(),
            })
        );
    }

    #[test]
    fn test_filter_values_borrows_input() {
        let items = vec![record("a", json!({"env": "prod"}))];
        let matched = filter_values(&items, &AnnotationPredicate::present("env")).unwrap();
        assert!(std::ptr::eq(matched[0], &items[0]));
    }
}
