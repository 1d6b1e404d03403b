// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the poker domain types.
use thiserror::Error;

use crate::poker::PlayerId;

/// A poker domain error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The player has no entry in the round bets.
    #[error("player {0} not found in round bets")]
    PlayerNotFound(PlayerId),
    /// A wire value that doesn't decode to a known enum variant.
    #[error("invalid {kind} value: {value}")]
    InvalidEnumValue {
        /// The enum being decoded.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl Error {
    pub(crate) fn invalid_enum(kind: &'static str, value: impl ToString) -> Self {
        Error::InvalidEnumValue {
            kind,
            value: value.to_string(),
        }
    }
}
