// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for the playback clock.

use thiserror::Error;

/// Result type for exoclock operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Which end of a transit table a lookup ran off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBound {
    /// At or before the first transit.
    Start,
    /// After the last transit.
    End,
}

impl std::fmt::Display for TableBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableBound::Start => f.write_str("start"),
            TableBound::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur when querying transit or orbit data.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Transit table or orbital-period data is absent or malformed.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// The bracketing transits collapsed onto one record, so there is no
    /// span to interpolate across.
    #[error("Degenerate range at the {bound} of the transit table")]
    DegenerateRange { bound: TableBound },

    /// Transit BJDs must be non-decreasing.
    #[error("Transit table out of order at record {index}")]
    UnorderedTable { index: usize },

    /// A Julian Date that cannot be turned into a calendar date.
    #[error("Non-finite Julian Date: {0}")]
    NonFiniteDate(f64),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog document is not valid JSON.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        EngineError::MissingData(what.into())
    }
}
