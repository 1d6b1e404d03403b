// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Automated poker client.
use anyhow::{Result, bail};
use log::{debug, error, info, warn};
use std::path::PathBuf;
use tokio::sync::{broadcast, mpsc};

use riverbot_core::{
    Error,
    action::PokerAction,
    connection::{self, Connection},
    message::{ActionResponse, Message},
    poker::{Chips, PlayerId},
    round_state::RoundState,
};

use crate::{Config, results};

/// The chips each player gets at the start of a game.
pub const START_MONEY: Chips = Chips::new(10_000);

/// A Poker bot driven by the game engine lifecycle.
///
/// For each game the engine calls [Bot::on_start], then for each round
/// [Bot::on_round_start], zero or more [Bot::get_action] and
/// [Bot::on_end_round], and finally [Bot::on_end_game].
pub trait Bot: Send + 'static {
    /// Sets the id assigned by the engine.
    fn set_id(&mut self, id: PlayerId);

    /// Called when the game starts.
    fn on_start(&mut self, starting_chips: Chips);

    /// Called at the start of each round.
    fn on_round_start(&mut self, state: &RoundState, remaining_chips: Chips);

    /// Called when it is this player turn to act.
    fn get_action(
        &mut self,
        state: &RoundState,
        remaining_chips: Chips,
    ) -> Result<(PokerAction, Chips), Error>;

    /// Called at the end of each round.
    fn on_end_round(&mut self, state: &RoundState, remaining_chips: Chips);

    /// Called at the end of the game.
    fn on_end_game(&mut self, state: &RoundState, score: f64);
}

/// Checks an action against the engine betting rules before sending it.
///
/// A check is valid when the player owes nothing, not only when the current
/// bet is zero, so a big blind that matched the bet can check.
pub fn validate_action(
    state: &RoundState,
    player_id: PlayerId,
    player_money: Chips,
    action: PokerAction,
    amount: Chips,
) -> Result<()> {
    if amount > player_money {
        // The engine caps the amount, this is not fatal.
        warn!("Amount {amount} exceeds player money {player_money}");
    }

    match action {
        PokerAction::Fold => {}
        PokerAction::Check => {
            if !state.amount_to_call(player_id)?.is_zero() {
                bail!("Invalid check action: there is a bet to call");
            }
        }
        PokerAction::Call => {
            let needed = state.amount_to_call(player_id)?;
            if needed.is_zero() || amount != needed {
                bail!("Invalid call action: amount {amount} doesn't match {needed}");
            }
        }
        PokerAction::Raise => {
            if amount + state.bet_of(player_id)? < state.current_bet {
                bail!("Invalid raise action: amount {amount} out of range");
            }
        }
        PokerAction::AllIn => {
            if amount != player_money {
                bail!("Invalid all-in action: amount {amount} doesn't match {player_money}");
            }
        }
    }

    Ok(())
}

/// Poker client playing one game.
pub(crate) struct Client<B: Bot> {
    bot: B,
    conn: Connection,
    player_id: Option<PlayerId>,
    round_state: Option<RoundState>,
    player_money: Chips,
    score: Option<f64>,
    game_over: bool,
    result_path: PathBuf,
    record_result: bool,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl<B: Bot> Client<B> {
    /// Connects a new client to the engine.
    pub(crate) async fn connect(
        bot: B,
        config: &Config,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        _shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port);
        let conn = connection::connect_async(&addr).await?;
        info!("Connected to server at {addr}");

        Ok(Self {
            bot,
            conn,
            player_id: None,
            round_state: None,
            player_money: START_MONEY,
            score: None,
            game_over: false,
            result_path: config.result_path.clone(),
            record_result: !config.simulation,
            shutdown_broadcast_rx,
            _shutdown_complete_tx,
        })
    }

    /// Runs the client message loop.
    ///
    /// Returns the game score if the game ended before the connection closed.
    pub(crate) async fn run(&mut self) -> Result<Option<f64>> {
        loop {
            let res = tokio::select! {
                res = self.conn.recv() => match res {
                    Some(res) => res,
                    None => {
                        info!("Server closed connection");
                        break;
                    }
                },
                _ = self.shutdown_broadcast_rx.recv() => {
                    info!("Interrupted by user");
                    break;
                }
            };

            match res {
                Ok(msg) => {
                    if let Err(e) = self.handle_message(msg).await {
                        error!("Error processing message: {e}");
                    }
                }
                Err(e) => error!("{e}"),
            }

            if self.game_over {
                break;
            }
        }

        self.conn.close().await;
        info!("Connection closed");

        Ok(self.score)
    }

    async fn handle_message(&mut self, msg: Message) -> Result<()> {
        info!("Received message type: {}", msg.message_type().name());

        match msg {
            Message::Connect(player_id) => {
                self.player_id = Some(player_id);
                self.bot.set_id(player_id);
                info!("Connected with player ID: {player_id}");
            }
            Message::GameStart => {
                self.bot.on_start(self.player_money);
                info!("Game started");
            }
            Message::GameState(state) => {
                debug!("Updated game state: round {}", state.round_num);
                self.round_state = Some(*state);
            }
            Message::RoundStart => {
                if let Some(state) = &self.round_state {
                    self.bot.on_round_start(state, self.player_money);
                    info!("Round {} started", state.round_num);
                } else {
                    info!("Round unknown started");
                }
            }
            Message::RequestPlayerAction => self.request_action().await?,
            Message::RoundEnd => {
                if let Some(state) = &self.round_state {
                    self.bot.on_end_round(state, self.player_money);
                }
                info!("Round ended");
            }
            Message::GameEnd(score) => {
                // A game without a round state doesn't count.
                if let Some(state) = &self.round_state {
                    self.bot.on_end_game(state, score);

                    if self.record_result {
                        let line = score.to_string();
                        if let Err(e) = results::append(&self.result_path, &line) {
                            error!("Error writing to file {}: {e}", self.result_path.display());
                        }
                    }

                    self.score = Some(score);
                }

                self.game_over = true;
                info!("Game ended");
            }
            Message::Text(text) => info!("Server: {text}"),
            Message::Disconnect | Message::TimeStamp(_) => {}
            Message::PlayerAction(_) => warn!("Unexpected player action from server"),
        }

        Ok(())
    }

    async fn request_action(&mut self) -> Result<()> {
        let (Some(player_id), Some(state)) = (self.player_id, &self.round_state) else {
            bail!("Action requested before connection and game state");
        };

        let (action, amount) = self.bot.get_action(state, self.player_money)?;
        info!("Bot action: {action}, amount: {amount}");

        let (action, amount) =
            match validate_action(state, player_id, self.player_money, action, amount) {
                Ok(()) => (action, amount),
                Err(e) => {
                    error!("{e}");
                    (PokerAction::Fold, Chips::ZERO)
                }
            };

        let msg = Message::PlayerAction(ActionResponse {
            player_id,
            action,
            amount,
        });

        self.conn.send(&msg).await?;
        debug!("Sent action: {action}, amount: {amount}");

        self.player_money -= amount;
        Ok(())
    }
}
