// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Cluster access: kubeconfig contexts, discovery and listing.
//!
//! Produces point-in-time snapshots that are handed to the filter engine.

mod client;
pub mod resources;

pub use client::{ClusterClient, ResourceSnapshot, current_context, list_contexts};
pub use resources::{KNOWN_KINDS, KnownKind, ResourceTarget, parse_targets};
