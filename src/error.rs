// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error kinds at the engine boundary.
//!
//! Two things can go wrong, and both mean the engine must not start:
//! an artifact that fails schema validation, or a rule that validates
//! structurally but breaks a value invariant (which points at a training
//! bug upstream). Everything that can go wrong at query time — unknown
//! basket ids, queries matching nothing — resolves to a normal value.

use std::fmt;

/// Errors surfaced while loading artifacts and building the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A product or suggestion artifact failed schema validation.
    ArtifactMalformed {
        /// Which artifact was being parsed.
        artifact: &'static str,
        /// Line number (product TSV) or record index (suggestion array).
        position: usize,
        detail: String,
    },
    /// A structurally valid record produced a value that breaks the data
    /// model invariants (unsorted antecedent, consequent inside its own
    /// antecedent, negative lift, ...).
    InvariantViolation { detail: String },
}

impl Error {
    pub(crate) fn malformed(
        artifact: &'static str,
        position: usize,
        detail: impl Into<String>,
    ) -> Self {
        Error::ArtifactMalformed {
            artifact,
            position,
            detail: detail.into(),
        }
    }

    pub(crate) fn invariant(detail: impl Into<String>) -> Self {
        Error::InvariantViolation {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ArtifactMalformed {
                artifact,
                position,
                detail,
            } => {
                write!(f, "{} artifact malformed at {}: {}", artifact, position, detail)
            }
            Error::InvariantViolation { detail } => {
                write!(f, "invariant violation: {}", detail)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
