// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation access for resource records
//!
//! Every type that can be filtered implements [`Annotated`]. All `kube::Resource`
//! types get it for free (k8s-openapi structs, `DynamicObject`, derived CRDs), so
//! callers never write a per-kind accessor. [`KnownResource`] is a closed set of
//! kinds for collections that mix several kinds in one call.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod};
use kube::api::DynamicObject;
use kube::{Resource, ResourceExt};

/// A record that exposes its metadata annotations.
pub trait Annotated {
    /// The annotation map, or `None` when the record carries no annotations at all.
    fn annotations(&self) -> Option<&BTreeMap<String, String>>;

    /// Value of a single annotation. An empty string is a present value.
    fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations()
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }
}

impl<K: Resource> Annotated for K {
    fn annotations(&self) -> Option<&BTreeMap<String, String>> {
        self.meta().annotations.as_ref()
    }
}

/// Well-known resource kinds that can share one collection
#[derive(Debug, Clone)]
pub enum KnownResource {
    Node(Node),
    Namespace(Namespace),
    Pod(Pod),
    Deployment(Deployment),
    /// Any other kind, including custom resources
    Dynamic(DynamicObject),
}

impl KnownResource {
    /// Kind name as shown to users
    pub fn kind(&self) -> &str {
        match self {
            Self::Node(_) => "Node",
            Self::Namespace(_) => "Namespace",
            Self::Pod(_) => "Pod",
            Self::Deployment(_) => "Deployment",
            Self::Dynamic(obj) => obj
                .types
                .as_ref()
                .map(|t| t.kind.as_str())
                .unwrap_or("Unknown"),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Node(r) => r.name_any(),
            Self::Namespace(r) => r.name_any(),
            Self::Pod(r) => r.name_any(),
            Self::Deployment(r) => r.name_any(),
            Self::Dynamic(r) => r.name_any(),
        }
    }
}

impl Annotated for KnownResource {
    fn annotations(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Node(r) => Annotated::annotations(r),
            Self::Namespace(r) => Annotated::annotations(r),
            Self::Pod(r) => Annotated::annotations(r),
            Self::Deployment(r) => Annotated::annotations(r),
            Self::Dynamic(r) => Annotated::annotations(r),
        }
    }
}

impl From<Node> for KnownResource {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl From<Namespace> for KnownResource {
    fn from(value: Namespace) -> Self {
        Self::Namespace(value)
    }
}

impl From<Pod> for KnownResource {
    fn from(value: Pod) -> Self {
        Self::Pod(value)
    }
}

impl From<Deployment> for KnownResource {
    fn from(value: Deployment) -> Self {
        Self::Deployment(value)
    }
}

impl From<DynamicObject> for KnownResource {
    fn from(value: DynamicObject) -> Self {
        Self::Dynamic(value)
    }
}
