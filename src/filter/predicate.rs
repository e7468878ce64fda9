// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation predicates
//!
//! A predicate is a key, a match mode and an optional target value. The four
//! combinations give presence, absence, equality and inequality matching:
//!
//! | mode      | target | matches when                    |
//! |-----------|--------|---------------------------------|
//! | `Present` | none   | key present                     |
//! | `Absent`  | none   | key absent                      |
//! | `Present` | `t`    | key present and value == `t`    |
//! | `Absent`  | `t`    | key absent or value != `t`      |
//!
//! A key that is absent is treated as "not equal" to any target.

use std::fmt;

use super::annotated::Annotated;
use super::error::FilterError;

/// Which side of the match a predicate selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Key present (or value equal to the target)
    #[default]
    Present,
    /// Key absent (or value not equal to the target)
    Absent,
}

impl From<bool> for MatchMode {
    fn from(present: bool) -> Self {
        if present { Self::Present } else { Self::Absent }
    }
}

/// Immutable annotation match condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPredicate {
    key: String,
    mode: MatchMode,
    target: Option<String>,
}

impl AnnotationPredicate {
    /// Predicate on presence (`Present`) or absence (`Absent`) of `key`.
    ///
    /// An empty key is accepted; no real annotation map contains it.
    pub fn new(key: impl Into<String>, mode: impl Into<MatchMode>) -> Self {
        Self {
            key: key.into(),
            mode: mode.into(),
            target: None,
        }
    }

    /// Shorthand for `new(key, MatchMode::Present)`
    pub fn present(key: impl Into<String>) -> Self {
        Self::new(key, MatchMode::Present)
    }

    /// Shorthand for `new(key, MatchMode::Absent)`
    pub fn absent(key: impl Into<String>) -> Self {
        Self::new(key, MatchMode::Absent)
    }

    /// Narrow the predicate to value equality (`Present`) or inequality (`Absent`).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Build a predicate from a list of target values, as collected from
    /// repeated command-line flags. More than one value is rejected.
    pub fn from_args<S: AsRef<str>>(
        key: impl Into<String>,
        present: bool,
        targets: &[S],
    ) -> Result<Self, FilterError> {
        let predicate = Self::new(key, present);
        match targets {
            [] => Ok(predicate),
            [target] => Ok(predicate.with_target(target.as_ref())),
            _ => Err(FilterError::InvalidPredicate(format!(
                "expected at most one target value, got {}",
                targets.len()
            ))),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Evaluate against the looked-up annotation value (`None` when the key is absent).
    pub fn matches_value(&self, value: Option<&str>) -> bool {
        match (self.mode, self.target.as_deref()) {
            (MatchMode::Present, None) => value.is_some(),
            (MatchMode::Absent, None) => value.is_none(),
            (MatchMode::Present, Some(target)) => value == Some(target),
            (MatchMode::Absent, Some(target)) => value != Some(target),
        }
    }

    /// Evaluate against a record.
    pub fn matches<T: Annotated + ?Sized>(&self, item: &T) -> bool {
        self.matches_value(item.annotation(&self.key))
    }
}

impl fmt::Display for AnnotationPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mode, &self.target) {
            (MatchMode::Present, None) => write!(f, "{}", self.key),
            (MatchMode::Absent, None) => write!(f, "!{}", self.key),
            (MatchMode::Present, Some(t)) => write!(f, "{}={}", self.key, t),
            (MatchMode::Absent, Some(t)) => write!(f, "{}!={}", self.key, t),
        }
    }
}
