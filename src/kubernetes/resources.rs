// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Resource kinds that can be listed and filtered
//!
//! Well-known kinds are addressed by plural name or a short alias
//! (`nodes`, `no`, `deploy`). Anything else, including custom resources,
//! is addressed explicitly as `version/resource` for the core group or
//! `group/version/resource` (e.g. `stable.example.com/v1/users`).

use std::fmt;

use anyhow::{Result, anyhow};

/// A catalog entry: group, plural resource name and short aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownKind {
    pub group: &'static str,
    pub resource: &'static str,
    pub kind: &'static str,
    pub aliases: &'static [&'static str],
}

const fn kind(
    group: &'static str,
    resource: &'static str,
    kind: &'static str,
    aliases: &'static [&'static str],
) -> KnownKind {
    KnownKind {
        group,
        resource,
        kind,
        aliases,
    }
}

/// Built-in kinds. Versions are resolved from discovery (preferred version).
pub const KNOWN_KINDS: &[KnownKind] = &[
    kind("", "namespaces", "Namespace", &["namespace", "ns"]),
    kind("", "nodes", "Node", &["node", "no"]),
    kind("", "resourcequotas", "ResourceQuota", &["resourcequota", "quota"]),
    kind("", "pods", "Pod", &["pod", "po"]),
    kind("", "services", "Service", &["service", "svc"]),
    kind(
        "",
        "persistentvolumeclaims",
        "PersistentVolumeClaim",
        &["persistentvolumeclaim", "pvc", "pvcs"],
    ),
    kind("", "secrets", "Secret", &["secret"]),
    kind("", "configmaps", "ConfigMap", &["configmap", "cm"]),
    kind("rbac.authorization.k8s.io", "roles", "Role", &["role"]),
    kind(
        "rbac.authorization.k8s.io",
        "rolebindings",
        "RoleBinding",
        &["rolebinding"],
    ),
    kind(
        "rbac.authorization.k8s.io",
        "clusterroles",
        "ClusterRole",
        &["clusterrole"],
    ),
    kind(
        "rbac.authorization.k8s.io",
        "clusterrolebindings",
        "ClusterRoleBinding",
        &["clusterrolebinding"],
    ),
    kind("apps", "deployments", "Deployment", &["deployment", "deploy"]),
    kind("apps", "daemonsets", "DaemonSet", &["daemonset", "ds"]),
    kind("apps", "replicasets", "ReplicaSet", &["replicaset", "rs"]),
    kind("apps", "statefulsets", "StatefulSet", &["statefulset", "sts"]),
    kind(
        "apps",
        "controllerrevisions",
        "ControllerRevision",
        &["controllerrevision"],
    ),
    kind("storage.k8s.io", "storageclasses", "StorageClass", &["storageclass", "sc"]),
    kind("batch", "jobs", "Job", &["job"]),
    kind("batch", "cronjobs", "CronJob", &["cronjob", "cj"]),
    kind(
        "networking.k8s.io",
        "networkpolicies",
        "NetworkPolicy",
        &["networkpolicy", "netpol"],
    ),
];

/// A resource to list, resolved against API discovery at fetch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTarget {
    /// API group (empty for core)
    pub group: String,
    /// Explicit version, or `None` for the group's preferred version
    pub version: Option<String>,
    /// Plural resource name
    pub resource: String,
}

impl ResourceTarget {
    /// Parse a command-line resource spec
    ///
    /// Accepted forms:
    /// - `nodes`, `no`, `Deployment` (catalog lookup, case-insensitive)
    /// - `v1/configmaps` (core group, explicit version)
    /// - `stable.example.com/v1/users` (any group)
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let parts: Vec<&str> = spec.split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(anyhow!("Invalid resource '{}'", spec));
        }

        match parts.as_slice() {
            [name] => lookup_kind(name)
                .map(Self::from)
                .ok_or_else(|| {
                    anyhow!(
                        "Unknown resource '{}'. Run `annofilter kinds` to see built-in kinds, \
                         or use group/version/resource",
                        name
                    )
                }),
            [version, resource] => Ok(Self {
                group: String::new(),
                version: Some(version.to_string()),
                resource: resource.to_lowercase(),
            }),
            [group, version, resource] => Ok(Self {
                group: group.to_string(),
                version: Some(version.to_string()),
                resource: resource.to_lowercase(),
            }),
            _ => Err(anyhow!(
                "Invalid resource '{}': expected NAME, VERSION/NAME or GROUP/VERSION/NAME",
                spec
            )),
        }
    }
}

impl From<&KnownKind> for ResourceTarget {
    fn from(known: &KnownKind) -> Self {
        Self {
            group: known.group.to_string(),
            version: None,
            resource: known.resource.to_string(),
        }
    }
}

impl fmt::Display for ResourceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prefix = String::new();
        if !self.group.is_empty() {
            prefix.push_str(&self.group);
            prefix.push('/');
        }
        if let Some(version) = &self.version {
            prefix.push_str(version);
            prefix.push('/');
        }
        write!(f, "{}{}", prefix, self.resource)
    }
}

/// Find a catalog entry by plural name, alias or kind (case-insensitive)
pub fn lookup_kind(name: &str) -> Option<&'static KnownKind> {
    let name = name.to_lowercase();
    KNOWN_KINDS.iter().find(|k| {
        k.resource == name || k.kind.to_lowercase() == name || k.aliases.contains(&name.as_str())
    })
}

/// Parse several specs, keeping the order given
pub fn parse_targets<S: AsRef<str>>(specs: &[S]) -> Result<Vec<ResourceTarget>> {
    specs
        .iter()
        .flat_map(|s| s.as_ref().split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ResourceTarget::parse)
        .collect()
}
