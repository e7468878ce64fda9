// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation filtering engine
//!
//! Selects the records whose metadata annotations satisfy an
//! [`AnnotationPredicate`]. The engine is a pure function over borrowed input:
//! results preserve input order, never contain anything that was not in the
//! input, and nothing is retained between calls.

mod annotated;
mod dynamic;
mod error;
mod predicate;

pub use annotated::{Annotated, KnownResource};
pub use dynamic::{annotation_value, filter_values};
pub use error::FilterError;
pub use predicate::{AnnotationPredicate, MatchMode};

/// Borrow the records matching `predicate`, in input order.
pub fn filter<'a, T: Annotated>(items: &'a [T], predicate: &AnnotationPredicate) -> Vec<&'a T> {
    items.iter().filter(|item| predicate.matches(*item)).collect()
}

/// Move the matching records out of an owned collection, in input order.
pub fn filter_owned<T, I>(items: I, predicate: &AnnotationPredicate) -> Vec<T>
where
    T: Annotated,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| predicate.matches(item))
        .collect()
}

/// Filter with loose arguments: `targets` may hold zero or one value.
///
/// More than one target is rejected with [`FilterError::InvalidPredicate`]
/// before any record is looked at.
pub fn filter_args<'a, T: Annotated, S: AsRef<str>>(
    items: &'a [T],
    key: &str,
    present: bool,
    targets: &[S],
) -> Result<Vec<&'a T>, FilterError> {
    let predicate = AnnotationPredicate::from_args(key, present, targets)?;
    Ok(filter(items, &predicate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::apps::v1::Deployment;
    use k8s_openapi::api::core::v1::Node;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use std::collections::BTreeMap;

    fn node(name: &str, annotations: &[(&str, &str)]) -> Node {
        let map: BTreeMap<String, String> = annotations
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Node {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                annotations: if annotations.is_empty() { None } else { Some(map) },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn names<T: kube::ResourceExt>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.name_any()).collect()
    }

    fn scenario() -> Vec<Node> {
        vec![
            node("A", &[("env", "prod")]),
            node("B", &[]),
            node("C", &[("env", "dev")]),
        ]
    }

    fn assert_subset_in_order<T>(result: &[&T], items: &[T]) {
        let mut cursor = 0;
        for r in result {
            let pos = items[cursor..]
                .iter()
                .position(|i| std::ptr::eq(i, *r))
                .expect("result element not found in input after previous match");
            cursor += pos + 1;
        }
    }

    #[test]
    fn test_scenario() {
        let items = scenario();

        let r = filter_args(&items, "env", true, &["prod"]).unwrap();
        assert_eq!(names(&r), vec!["A"]);

        let r = filter_args(&items, "env", false, &["prod"]).unwrap();
        assert_eq!(names(&r), vec!["B", "C"]);

        let r = filter_args::<_, &str>(&items, "env", true, &[]).unwrap();
        assert_eq!(names(&r), vec!["A", "C"]);

        let r = filter_args::<_, &str>(&items, "env", false, &[]).unwrap();
        assert_eq!(names(&r), vec!["B"]);
    }

    #[test]
    fn test_subset_and_order() {
        let items = scenario();
        let predicates = [
            AnnotationPredicate::present("env"),
            AnnotationPredicate::absent("env"),
            AnnotationPredicate::present("env").with_target("dev"),
            AnnotationPredicate::absent("env").with_target("dev"),
        ];
        for p in &predicates {
            let result = filter(&items, p);
            assert!(result.len() <= items.len());
            assert_subset_in_order(&result, &items);
        }
    }

    #[test]
    fn test_idempotence() {
        let items = scenario();
        let p = AnnotationPredicate::absent("env").with_target("prod");
        let once: Vec<Node> = filter(&items, &p).into_iter().cloned().collect();
        let twice = filter(&once, &p);
        assert_eq!(twice.len(), once.len());
        assert_subset_in_order(&twice, &once);
        assert_eq!(names(&twice), vec!["B", "C"]);
    }

    #[test]
    fn test_complement_partitions_input() {
        let items = vec![
            node("a", &[("k", "")]),
            node("b", &[]),
            node("c", &[("k", "v")]),
            node("d", &[("other", "v")]),
        ];
        let present = filter(&items, &AnnotationPredicate::present("k"));
        let absent = filter(&items, &AnnotationPredicate::absent("k"));

        assert_eq!(present.len() + absent.len(), items.len());
        for item in &items {
            let in_present = present.iter().any(|p| std::ptr::eq(*p, item));
            let in_absent = absent.iter().any(|a| std::ptr::eq(*a, item));
            assert!(in_present ^ in_absent);
        }
    }

    #[test]
    fn test_target_absence_edge_case() {
        let items = vec![node("lonely", &[])];
        let ne = filter_args(&items, "key", false, &["x"]).unwrap();
        assert_eq!(ne.len(), 1);
        let eq = filter_args(&items, "key", true, &["x"]).unwrap();
        assert!(eq.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<Node> = Vec::new();
        let r = filter_args::<_, &str>(&items, "env", true, &[]).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_empty_key() {
        let items = scenario();
        assert!(filter(&items, &AnnotationPredicate::present("")).is_empty());
        assert_eq!(filter(&items, &AnnotationPredicate::absent("")).len(), 3);
    }

    #[test]
    fn test_multiple_targets_rejected() {
        let items = scenario();
        let err = filter_args(&items, "env", true, &["a", "b"]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPredicate(_)));
    }

    #[test]
    fn test_filter_owned_moves_matches() {
        let matched = filter_owned(scenario(), &AnnotationPredicate::present("env"));
        let names: Vec<_> = matched
            .iter()
            .map(|n| n.metadata.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_mixed_kinds_in_one_call() {
        let deploy = Deployment {
            metadata: ObjectMeta {
                name: Some("web".to_string()),
                annotations: Some(
                    [(
                        "kubernetes.io/created-by".to_string(),
                        "ci".to_string(),
                    )]
                    .into_iter()
                    .collect(),
                ),
                ..Default::default()
            },
            ..Default::default()
        };
        let items = vec![
            KnownResource::from(node("n1", &[])),
            KnownResource::from(deploy),
            KnownResource::from(node("n2", &[("kubernetes.io/created-by", "me")])),
        ];

        let created = filter(&items, &AnnotationPredicate::present("kubernetes.io/created-by"));
        let kinds: Vec<_> = created.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["Deployment", "Node"]);

        let by_ci = filter(
            &items,
            &AnnotationPredicate::present("kubernetes.io/created-by").with_target("ci"),
        );
        assert_eq!(by_ci.len(), 1);
        assert_eq!(by_ci[0].name(), "web");
    }
}
