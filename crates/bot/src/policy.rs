// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple pot odds betting policy.
//!
//! The hand strength comes from a [HandEvaluator] that runs once at the start
//! of each round, the resulting [RoundContext] drives every decision in that
//! round.
use log::info;

use riverbot_core::{
    Error,
    action::PokerAction,
    poker::{Chips, PlayerId},
    round_state::RoundState,
};

use crate::{
    client::Bot,
    eval::{HandEvaluator, RandomEvaluator},
};

/// Pot multiplier used to size raises.
pub const AGGRESSION_FACTOR: f64 = 1.2;

/// Fold when the hand strength is below the pot odds times this margin.
const FOLD_MARGIN: f64 = 1.5;

/// Strong hand threshold.
const STRONG_HAND: f64 = 0.7;

/// Pot odds below this are favorable.
const FAVORABLE_ODDS: f64 = 0.3;

/// Decent hand threshold for positional raises.
const DECENT_HAND: f64 = 0.6;

/// Positions after this index raise with a decent hand.
// NOTE: raw index comparison, not a real late position check.
const LATE_POSITION: usize = 1;

/// The state computed once at the start of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoundContext {
    /// The hand strength estimate in `[0, 1]`.
    pub hand_strength: f64,
}

impl RoundContext {
    /// Creates a context with the given hand strength.
    pub fn new(hand_strength: f64) -> Self {
        Self { hand_strength }
    }
}

/// Pot odds for calling `amount_to_call` into `pot`.
pub fn pot_odds(amount_to_call: Chips, pot: Chips) -> f64 {
    if amount_to_call.is_zero() {
        0.0
    } else {
        amount_to_call.as_f64() / (pot.as_f64() + amount_to_call.as_f64())
    }
}

/// Raise size clamped by the max raise and the remaining chips.
pub fn raise_amount(state: &RoundState, remaining_chips: Chips) -> Chips {
    state
        .pot
        .scale(AGGRESSION_FACTOR)
        .min(state.max_raise)
        .min(remaining_chips)
}

/// Checks if the hand is worth a raise.
pub fn should_raise(ctx: &RoundContext, state: &RoundState, pot_odds: f64) -> bool {
    if ctx.hand_strength > STRONG_HAND && pot_odds < FAVORABLE_ODDS {
        return true;
    }

    state.current_player > LATE_POSITION && ctx.hand_strength > DECENT_HAND
}

/// Chooses an action and its amount.
///
/// Fails if the player has no entry in the round bets.
pub fn decide(
    ctx: &RoundContext,
    state: &RoundState,
    player_id: PlayerId,
    remaining_chips: Chips,
) -> Result<(PokerAction, Chips), Error> {
    let amount_to_call = state.amount_to_call(player_id)?;
    let odds = pot_odds(amount_to_call, state.pot);

    if amount_to_call.is_zero() {
        return Ok(if should_raise(ctx, state, odds) {
            (PokerAction::Raise, raise_amount(state, remaining_chips))
        } else {
            (PokerAction::Check, Chips::ZERO)
        });
    }

    if ctx.hand_strength < odds * FOLD_MARGIN {
        Ok((PokerAction::Fold, Chips::ZERO))
    } else if should_raise(ctx, state, odds) {
        Ok((PokerAction::Raise, raise_amount(state, remaining_chips)))
    } else if ctx.hand_strength >= odds {
        Ok((PokerAction::Call, amount_to_call))
    } else {
        Ok((PokerAction::Fold, Chips::ZERO))
    }
}

/// A bot that plays pot odds against an estimated hand strength.
#[derive(Debug)]
pub struct SimplePlayer<E = RandomEvaluator> {
    id: PlayerId,
    starting_chips: Chips,
    context: RoundContext,
    evaluator: E,
}

impl SimplePlayer<RandomEvaluator> {
    /// Creates a player with a random strength evaluator.
    pub fn new() -> Self {
        Self::with_evaluator(RandomEvaluator::new())
    }
}

impl Default for SimplePlayer<RandomEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HandEvaluator> SimplePlayer<E> {
    /// Creates a player with the given evaluator.
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            id: PlayerId::default(),
            starting_chips: Chips::ZERO,
            context: RoundContext::default(),
            evaluator,
        }
    }

    /// The player id.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The chips this player started the game with.
    pub fn starting_chips(&self) -> Chips {
        self.starting_chips
    }

    /// The context for the current round.
    pub fn context(&self) -> &RoundContext {
        &self.context
    }
}

impl<E: HandEvaluator> Bot for SimplePlayer<E> {
    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    fn on_start(&mut self, starting_chips: Chips) {
        self.starting_chips = starting_chips;
        info!("Player {} starting with {starting_chips} chips", self.id);
    }

    fn on_round_start(&mut self, state: &RoundState, _remaining_chips: Chips) {
        // The engine doesn't deal hole cards to clients.
        let strength = self
            .evaluator
            .evaluate(state.round, &[], &state.community_cards);
        self.context = RoundContext::new(strength);
        info!("Player {} hand strength: {strength:.3}", self.id);
    }

    fn get_action(
        &mut self,
        state: &RoundState,
        remaining_chips: Chips,
    ) -> Result<(PokerAction, Chips), Error> {
        decide(&self.context, state, self.id, remaining_chips)
    }

    fn on_end_round(&mut self, _state: &RoundState, remaining_chips: Chips) {
        info!(
            "Player {} ended round with {remaining_chips} chips",
            self.id
        );
    }

    fn on_end_game(&mut self, _state: &RoundState, score: f64) {
        info!("Player {} ended game with score: {score}", self.id);
    }
}
