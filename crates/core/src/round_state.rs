// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Round state snapshot sent by the game engine.
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    action::PokerRound,
    error::Error,
    poker::{Chips, PlayerId},
};

/// A snapshot of the current betting round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// The hand number.
    pub round_num: u32,
    /// The current street.
    pub round: PokerRound,
    /// The board cards as sent by the engine.
    #[serde(default)]
    pub community_cards: Vec<String>,
    /// The pot.
    pub pot: Chips,
    /// The position index of the acting player.
    pub current_player: usize,
    /// The bet each player has to match.
    pub current_bet: Chips,
    /// The minimum raise.
    #[serde(default)]
    pub min_raise: Chips,
    /// The maximum raise.
    pub max_raise: Chips,
    /// The total bet of each player in this round.
    pub player_bets: AHashMap<PlayerId, Chips>,
    /// The last action label of each player.
    #[serde(default)]
    pub player_actions: AHashMap<PlayerId, String>,
}

impl RoundState {
    /// Returns the total bet of a player in this round.
    pub fn bet_of(&self, player_id: PlayerId) -> Result<Chips, Error> {
        self.player_bets
            .get(&player_id)
            .copied()
            .ok_or(Error::PlayerNotFound(player_id))
    }

    /// Returns the chips a player has to put in to match the current bet.
    pub fn amount_to_call(&self, player_id: PlayerId) -> Result<Chips, Error> {
        Ok(self.current_bet - self.bet_of(player_id)?)
    }
}
