// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Types used in a Poker game.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, ops, str::FromStr};

/// A player identifier assigned by the game engine.
///
/// The engine sends ids as numbers but keys the round bets by the stringified
/// id, so both representations decode to the same [PlayerId].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Creates a player id with the given value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(PlayerId(n)),
            Repr::Text(s) => s
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid player id {s:?}"))),
        }
    }
}

/// Chips amount.
///
/// Engines may send amounts as floats once a fractional bet has been placed,
/// these decode to the nearest chip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Chips(u32);

impl Chips {
    /// The zero chips.
    pub const ZERO: Chips = Chips(0);

    /// Creates chips with the given value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The integer amount.
    pub fn amount(&self) -> u32 {
        self.0
    }

    /// The amount as a float for odds computations.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Creates chips from a float amount, rounding to the nearest chip.
    ///
    /// Negative and NaN amounts are zero, amounts past the limit saturate.
    pub fn from_f64(value: f64) -> Self {
        let rounded = value.round();
        if rounded.is_nan() || rounded <= 0.0 {
            Chips::ZERO
        } else if rounded >= u32::MAX as f64 {
            Chips(u32::MAX)
        } else {
            Chips(rounded as u32)
        }
    }

    /// Multiplies this amount by a factor rounding to the nearest chip.
    pub fn scale(self, factor: f64) -> Self {
        Chips::from_f64(self.0 as f64 * factor)
    }

    /// Checks if this is a zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Chips {
    fn from(val: u32) -> Self {
        Chips(val)
    }
}

impl From<Chips> for u32 {
    fn from(val: Chips) -> Self {
        val.0
    }
}

impl ops::Add for Chips {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl ops::Sub<Chips> for Chips {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl<'de> Deserialize<'de> for Chips {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Integer(u64),
            Float(f64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Integer(n) => Ok(Chips(u32::try_from(n).unwrap_or(u32::MAX))),
            Repr::Float(f) => Ok(Chips::from_f64(f)),
        }
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
