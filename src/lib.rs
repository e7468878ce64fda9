// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Select Kubernetes resources by their metadata annotations.
//!
//! The [`filter`] module holds the engine: a pure, order-preserving selection
//! over any record that exposes an annotation map. The remaining modules supply
//! records (a cluster via kubeconfig, or a file) and render results.
//!
//! ```
//! use annofilter::filter::{AnnotationPredicate, filter};
//! use k8s_openapi::api::core::v1::Node;
//!
//! let nodes: Vec<Node> = Vec::new();
//! let predicate = AnnotationPredicate::absent("example.com/owner").with_target("infra");
//! assert!(filter(&nodes, &predicate).is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod filter;
pub mod input;
pub mod kubernetes;
pub mod output;
pub mod progress;
