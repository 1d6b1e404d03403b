// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions and betting rounds.
//!
//! The integer codes are decoded by value on the game engine, they must stay in
//! sync with the engine and never be renumbered.
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, str::FromStr};

use crate::error::Error;

/// A Player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum PokerAction {
    /// Player folds.
    Fold = 1,
    /// Player checks.
    Check = 2,
    /// Player calls.
    Call = 3,
    /// Player raises.
    Raise = 4,
    /// Player goes all in.
    AllIn = 5,
}

impl PokerAction {
    /// The wire code for this action.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PokerAction::Fold => "FOLD",
            PokerAction::Check => "CHECK",
            PokerAction::Call => "CALL",
            PokerAction::Raise => "RAISE",
            PokerAction::AllIn => "ALL_IN",
        }
    }
}

impl TryFrom<u8> for PokerAction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PokerAction::Fold),
            2 => Ok(PokerAction::Check),
            3 => Ok(PokerAction::Call),
            4 => Ok(PokerAction::Raise),
            5 => Ok(PokerAction::AllIn),
            _ => Err(Error::invalid_enum("action", code)),
        }
    }
}

impl From<PokerAction> for u8 {
    fn from(action: PokerAction) -> Self {
        action.code()
    }
}

impl fmt::Display for PokerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A betting round, ordered by street progression.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
#[repr(u8)]
pub enum PokerRound {
    /// Betting before the flop.
    Preflop = 0,
    /// Betting after the flop.
    Flop = 1,
    /// Betting after the turn.
    Turn = 2,
    /// Betting after the river.
    River = 3,
}

impl PokerRound {
    /// The wire code for this round.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The round label.
    pub fn label(&self) -> &'static str {
        match self {
            PokerRound::Preflop => "PREFLOP",
            PokerRound::Flop => "FLOP",
            PokerRound::Turn => "TURN",
            PokerRound::River => "RIVER",
        }
    }
}

impl TryFrom<u8> for PokerRound {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PokerRound::Preflop),
            1 => Ok(PokerRound::Flop),
            2 => Ok(PokerRound::Turn),
            3 => Ok(PokerRound::River),
            _ => Err(Error::invalid_enum("round", code)),
        }
    }
}

impl From<PokerRound> for u8 {
    fn from(round: PokerRound) -> Self {
        round.code()
    }
}

impl FromStr for PokerRound {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PREFLOP" => Ok(PokerRound::Preflop),
            "FLOP" => Ok(PokerRound::Flop),
            "TURN" => Ok(PokerRound::Turn),
            "RIVER" => Ok(PokerRound::River),
            _ => Err(Error::invalid_enum("round", s)),
        }
    }
}

impl fmt::Display for PokerRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// The engine sends the street either as its code or as its name.
impl<'de> Deserialize<'de> for PokerRound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(u8),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => PokerRound::try_from(code).map_err(de::Error::custom),
            Repr::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}
