// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot that never bets.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;

use riverbot_bot::{
    Bot,
    core::{
        Error,
        action::PokerAction,
        poker::{Chips, PlayerId},
        round_state::RoundState,
    },
};

struct AlwaysCallOrCheck {
    id: PlayerId,
}

impl Bot for AlwaysCallOrCheck {
    fn set_id(&mut self, id: PlayerId) {
        self.id = id;
    }

    fn on_start(&mut self, _starting_chips: Chips) {}

    fn on_round_start(&mut self, _state: &RoundState, _remaining_chips: Chips) {}

    fn get_action(
        &mut self,
        state: &RoundState,
        remaining_chips: Chips,
    ) -> Result<(PokerAction, Chips), Error> {
        let to_call = state.amount_to_call(self.id)?;
        if to_call.is_zero() {
            Ok((PokerAction::Check, Chips::ZERO))
        } else if to_call <= remaining_chips {
            Ok((PokerAction::Call, to_call))
        } else {
            Ok((PokerAction::Fold, Chips::ZERO))
        }
    }

    fn on_end_round(&mut self, _state: &RoundState, _remaining_chips: Chips) {}

    fn on_end_game(&mut self, _state: &RoundState, score: f64) {
        println!("Game ended with score {score}");
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of clients to run.
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    clients: u8,
    /// The server address.
    #[clap(long, short = 'H', default_value = "localhost")]
    host: String,
    /// The server port.
    #[clap(long, short, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let config = riverbot_bot::Config {
        clients: cli.clients,
        host: cli.host,
        port: cli.port,
        result_path: "simple_result.log".into(),
        simulation: false,
    };

    riverbot_bot::run(&config, || AlwaysCallOrCheck {
        id: PlayerId::default(),
    })
    .await?;

    Ok(())
}
