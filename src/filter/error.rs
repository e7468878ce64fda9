// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for annotation filtering.

use thiserror::Error;

/// Errors produced while building a predicate or scanning records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The predicate arguments are malformed (e.g. more than one target value).
    /// Always reported before any record is scanned.
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// A record at `index` does not expose an annotation map.
    #[error("Unsupported element at index {index}: {reason}")]
    UnsupportedElement {
        /// Position of the offending record in the input.
        index: usize,
        /// Why the annotation map could not be read.
        reason: String,
    },
}

impl FilterError {
    pub(crate) fn unsupported(index: usize, reason: impl Into<String>) -> Self {
        Self::UnsupportedElement {
            index,
            reason: reason.into(),
        }
    }
}
