// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages between the bot and the game engine.
//!
//! Every message is a JSON object with a `type` code and a `message` payload,
//! one message per line.
use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    action::PokerAction,
    poker::{Chips, PlayerId},
    round_state::RoundState,
};

/// The message type codes, in sync with the game engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Connection confirmed.
    Connect = 0,
    /// Connection closed.
    Disconnect = 1,
    /// The game starts.
    GameStart = 2,
    /// A round starts.
    RoundStart = 3,
    /// The engine waits for this player action.
    RequestPlayerAction = 4,
    /// A player action.
    PlayerAction = 5,
    /// A round ended.
    RoundEnd = 6,
    /// The game ended.
    GameEnd = 7,
    /// Clock update.
    TimeStamp = 8,
    /// Round state update.
    GameState = 9,
    /// Text from the engine.
    Message = 10,
}

impl MessageType {
    /// The wire code for this message type.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            MessageType::Connect => "Connect",
            MessageType::Disconnect => "Disconnect",
            MessageType::GameStart => "Game Start",
            MessageType::RoundStart => "Round Start",
            MessageType::RequestPlayerAction => "Request Player Action",
            MessageType::PlayerAction => "Player Action",
            MessageType::RoundEnd => "Round End",
            MessageType::GameEnd => "Game End",
            MessageType::TimeStamp => "Time Stamp",
            MessageType::GameState => "Game State",
            MessageType::Message => "Message",
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = crate::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let ty = match code {
            0 => MessageType::Connect,
            1 => MessageType::Disconnect,
            2 => MessageType::GameStart,
            3 => MessageType::RoundStart,
            4 => MessageType::RequestPlayerAction,
            5 => MessageType::PlayerAction,
            6 => MessageType::RoundEnd,
            7 => MessageType::GameEnd,
            8 => MessageType::TimeStamp,
            9 => MessageType::GameState,
            10 => MessageType::Message,
            _ => return Err(crate::Error::invalid_enum("message type", code)),
        };

        Ok(ty)
    }
}

/// Message exchanged by the bot and the engine.
#[derive(Debug, Clone)]
pub enum Message {
    /// Connection confirmed with the id assigned to this player.
    Connect(PlayerId),
    /// The engine closed the connection.
    Disconnect,
    /// The game starts.
    GameStart,
    /// A new round starts.
    RoundStart,
    /// Request action from this player.
    RequestPlayerAction,
    /// Player action response.
    PlayerAction(ActionResponse),
    /// A round ended.
    RoundEnd,
    /// The game ended with this player score.
    GameEnd(f64),
    /// Engine clock update.
    TimeStamp(Value),
    /// A round state update.
    GameState(Box<RoundState>),
    /// Text from the engine.
    Text(String),
}

/// The action sent by a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// The player id.
    pub player_id: PlayerId,
    /// The action from the player.
    pub action: PokerAction,
    /// The amount for this action.
    pub amount: Chips,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    ty: Option<u8>,
    #[serde(default)]
    message: Value,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    #[serde(rename = "type")]
    ty: u8,
    message: &'a T,
}

impl Message {
    /// The type of this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::Connect(_) => MessageType::Connect,
            Message::Disconnect => MessageType::Disconnect,
            Message::GameStart => MessageType::GameStart,
            Message::RoundStart => MessageType::RoundStart,
            Message::RequestPlayerAction => MessageType::RequestPlayerAction,
            Message::PlayerAction(_) => MessageType::PlayerAction,
            Message::RoundEnd => MessageType::RoundEnd,
            Message::GameEnd(_) => MessageType::GameEnd,
            Message::TimeStamp(_) => MessageType::TimeStamp,
            Message::GameState(_) => MessageType::GameState,
            Message::Text(_) => MessageType::Message,
        }
    }

    /// Decodes a message from a JSON line.
    pub fn decode(line: &str) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_str(line).map_err(|e| anyhow!("Error decoding message: {e}"))?;

        let Some(code) = envelope.ty else {
            bail!("Invalid message: missing type");
        };

        let payload = envelope.message;
        let msg = match MessageType::try_from(code)? {
            MessageType::Connect => Message::Connect(serde_json::from_value(payload)?),
            MessageType::Disconnect => Message::Disconnect,
            MessageType::GameStart => Message::GameStart,
            MessageType::RoundStart => Message::RoundStart,
            MessageType::RequestPlayerAction => Message::RequestPlayerAction,
            MessageType::PlayerAction => Message::PlayerAction(serde_json::from_value(payload)?),
            MessageType::RoundEnd => Message::RoundEnd,
            MessageType::GameEnd => Message::GameEnd(decode_score(&payload)?),
            MessageType::TimeStamp => Message::TimeStamp(payload),
            MessageType::GameState => Message::GameState(Box::new(serde_json::from_value(payload)?)),
            MessageType::Message => match payload {
                Value::String(s) => Message::Text(s),
                other => Message::Text(other.to_string()),
            },
        };

        Ok(msg)
    }

    /// Encodes this message as a JSON line without the trailing newline.
    pub fn encode(&self) -> Result<String> {
        let ty = self.message_type().code();
        let json = match self {
            Message::Connect(id) => serde_json::to_string(&EnvelopeRef { ty, message: id })?,
            Message::PlayerAction(res) => serde_json::to_string(&EnvelopeRef { ty, message: res })?,
            Message::GameEnd(score) => serde_json::to_string(&EnvelopeRef { ty, message: score })?,
            Message::TimeStamp(v) => serde_json::to_string(&EnvelopeRef { ty, message: v })?,
            Message::GameState(state) => {
                serde_json::to_string(&EnvelopeRef { ty, message: state })?
            }
            Message::Text(s) => serde_json::to_string(&EnvelopeRef { ty, message: s })?,
            _ => serde_json::to_string(&EnvelopeRef {
                ty,
                message: &Value::Null,
            })?,
        };

        Ok(json)
    }
}

// Scores are numbers but some engines send them as strings.
fn decode_score(payload: &Value) -> Result<f64> {
    match payload {
        Value::Number(n) => n.as_f64().ok_or_else(|| anyhow!("Invalid score {n}")),
        Value::String(s) => s.trim().parse().map_err(|_| anyhow!("Invalid score {s:?}")),
        other => Err(anyhow!("Invalid score {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::PokerRound;

    #[test]
    fn message_type_names() {
        assert_eq!(MessageType::try_from(0).unwrap().name(), "Connect");
        assert_eq!(
            MessageType::try_from(4).unwrap().name(),
            "Request Player Action"
        );
        assert_eq!(MessageType::try_from(10).unwrap().name(), "Message");
        assert!(MessageType::try_from(11).is_err());
    }

    #[test]
    fn decode_messages() {
        let msg = Message::decode(r#"{"type": 0, "message": 17}"#).unwrap();
        assert!(matches!(msg, Message::Connect(id) if id == PlayerId::new(17)));

        let msg = Message::decode(r#"{"type": 2, "message": null}"#).unwrap();
        assert!(matches!(msg, Message::GameStart));

        let msg = Message::decode(r#"{"type": 3}"#).unwrap();
        assert!(matches!(msg, Message::RoundStart));

        let msg = Message::decode(r#"{"type": 7, "message": 250}"#).unwrap();
        assert!(matches!(msg, Message::GameEnd(s) if s == 250.0));

        let msg = Message::decode(r#"{"type": 10, "message": "hello"}"#).unwrap();
        assert!(matches!(msg, Message::Text(s) if s == "hello"));

        let msg = Message::decode(
            r#"{"type": 9, "message": {"round_num": 1, "round": 0, "community_cards": [],
                "pot": 30, "current_player": 0, "current_bet": 20, "min_raise": 20,
                "max_raise": 1000, "player_bets": {"1": 10, "2": 20}, "player_actions": {}}}"#,
        )
        .unwrap();
        match msg {
            Message::GameState(state) => {
                assert_eq!(state.round, PokerRound::Preflop);
                assert_eq!(state.pot, Chips::new(30));
            }
            _ => panic!("Expected game state"),
        }
    }

    #[test]
    fn decode_float_amounts() {
        let msg = Message::decode(
            r#"{"type": 9, "message": {"round_num": 2, "round": "Flop", "pot": 220.0,
                "current_player": 1, "current_bet": 120.0, "max_raise": 900,
                "player_bets": {"1": 0, "2": 120.0}}}"#,
        )
        .unwrap();
        assert!(matches!(msg, Message::GameState(state) if state.current_bet == Chips::new(120)));

        let msg = Message::decode(
            r#"{"type": 5, "message": {"player_id": 2, "action": 4, "amount": 121.2}}"#,
        )
        .unwrap();
        assert!(matches!(msg, Message::PlayerAction(res) if res.amount == Chips::new(121)));
    }

    #[test]
    fn decode_errors() {
        assert!(Message::decode("not json").is_err());
        assert!(Message::decode(r#"{"message": 1}"#).is_err());
        assert!(Message::decode(r#"{"type": 42}"#).is_err());
        assert!(Message::decode(r#"{"type": 9, "message": {"pot": 1}}"#).is_err());
    }

    #[test]
    fn encode_action() {
        let msg = Message::PlayerAction(ActionResponse {
            player_id: PlayerId::new(3),
            action: PokerAction::Raise,
            amount: Chips::new(120),
        });

        let json = msg.encode().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], 5);
        assert_eq!(value["message"]["player_id"], 3);
        assert_eq!(value["message"]["action"], 4);
        assert_eq!(value["message"]["amount"], 120);

        let decoded = Message::decode(&json).unwrap();
        assert!(matches!(decoded, Message::PlayerAction(res) if res.action == PokerAction::Raise));
    }
}
