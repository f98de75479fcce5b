//! Core capability errors (parsing and validation of domain inputs).
//!
//! The pure selection functions never fail; these errors only come from
//! turning untrusted strings and documents into domain values.

use thiserror::Error;

use super::effect::{Effect, Transience};

/// Category key that is neither current nor an alias.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("category `{raw}` is not a current category")]
pub struct InvalidCategory {
    pub raw: String,
}

/// Place or user id that cannot be stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("id `{raw}` is invalid: {reason}")]
pub struct InvalidId {
    pub raw: String,
    pub reason: &'static str,
}

/// Status string outside `unvisited | visited | bucketList`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("status `{raw}` is invalid")]
pub struct InvalidStatus {
    pub raw: String,
}

/// Reference data document could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("reference data is invalid: {reason}")]
pub struct InvalidReference {
    pub reason: String,
}

/// Canonical error enum for core capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidCategory(#[from] InvalidCategory),
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),
    #[error(transparent)]
    InvalidReference(#[from] InvalidReference),
}

impl CoreError {
    pub fn transience(&self) -> Transience {
        // Core errors are pure input failures.
        Transience::Permanent
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}
