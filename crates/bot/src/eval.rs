// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand strength evaluators.
use rand::{prelude::*, rngs::StdRng};
use std::ops::RangeInclusive;

use riverbot_core::action::PokerRound;

/// Estimates the strength of a hand as a value in `[0, 1]`.
pub trait HandEvaluator: Send + 'static {
    /// Evaluates the player cards against the board for the given street.
    fn evaluate(&mut self, round: PokerRound, cards: &[String], community_cards: &[String]) -> f64;
}

/// Preflop strength range.
pub const PREFLOP_RANGE: RangeInclusive<f64> = 0.3..=0.7;

/// Postflop strength range.
pub const POSTFLOP_RANGE: RangeInclusive<f64> = 0.4..=0.9;

/// Draws a uniform random strength, it doesn't look at the cards at all.
///
/// This is a placeholder for a real hand evaluator.
#[derive(Debug)]
pub struct RandomEvaluator {
    rng: StdRng,
}

impl RandomEvaluator {
    /// Creates an evaluator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates an evaluator with a deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl HandEvaluator for RandomEvaluator {
    fn evaluate(&mut self, round: PokerRound, _cards: &[String], _board: &[String]) -> f64 {
        let range = match round {
            PokerRound::Preflop => PREFLOP_RANGE,
            _ => POSTFLOP_RANGE,
        };

        self.rng.random_range(range)
    }
}

/// Always returns the same strength.
#[derive(Debug, Clone, Copy)]
pub struct FixedEvaluator(pub f64);

impl HandEvaluator for FixedEvaluator {
    fn evaluate(&mut self, _round: PokerRound, _cards: &[String], _board: &[String]) -> f64 {
        self.0.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_strength_ranges() {
        let mut eval = RandomEvaluator::with_seed(13);

        for _ in 0..1000 {
            let s = eval.evaluate(PokerRound::Preflop, &[], &[]);
            assert!(PREFLOP_RANGE.contains(&s), "preflop strength {s}");
        }

        for round in [PokerRound::Flop, PokerRound::Turn, PokerRound::River] {
            for _ in 0..1000 {
                let s = eval.evaluate(round, &[], &[]);
                assert!(POSTFLOP_RANGE.contains(&s), "{round} strength {s}");
            }
        }
    }

    #[test]
    fn seeded_evaluators_agree() {
        let mut e1 = RandomEvaluator::with_seed(7);
        let mut e2 = RandomEvaluator::with_seed(7);
        for _ in 0..10 {
            assert_eq!(
                e1.evaluate(PokerRound::Turn, &[], &[]),
                e2.evaluate(PokerRound::Turn, &[], &[])
            );
        }
    }

    #[test]
    fn fixed_strength() {
        assert_eq!(FixedEvaluator(0.8).evaluate(PokerRound::Flop, &[], &[]), 0.8);
        assert_eq!(FixedEvaluator(1.5).evaluate(PokerRound::Flop, &[], &[]), 1.0);
    }
}
