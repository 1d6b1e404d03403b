// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverbot Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;
use std::{fs::File, path::PathBuf};

use riverbot_bot::{Session, policy::SimplePlayer, results};

/// Result file used in local mode.
const LOCAL_RESULT_FILE: &str = "game_result.log";

/// Log file used with --log-file.
const LOG_FILE: &str = "poker_runner.log";

#[derive(Debug, Parser)]
struct Cli {
    /// Server hostname or IP address.
    #[clap(long, short = 'H', default_value = "localhost")]
    host: String,
    /// Server port.
    #[clap(long, short, default_value_t = 5000)]
    port: u16,
    /// Number of clients to run.
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    clients: u8,
    /// File to save the result.
    #[clap(long, short, default_value = "result.log")]
    result: PathBuf,
    /// Log to a file instead of the console.
    #[clap(long)]
    log_file: bool,
    /// Run in simulation mode.
    #[clap(long, short)]
    simulation: bool,
    /// Number of games in simulation mode.
    #[clap(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    simulation_rounds: u32,
    /// Run in local mode, saving results to a local file.
    #[clap(long, short)]
    local: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the result saved in the result file.
    Check,
    /// Clear the result file.
    Cleanup,
}

fn init_logger(log_file: bool) -> Result<()> {
    let mut builder = env_logger::builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis();

    if log_file {
        let file = File::create(LOG_FILE)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut result_path = cli.result;
    if cli.local {
        println!("Running in local mode, saving results to local file");
        result_path = PathBuf::from(LOCAL_RESULT_FILE);
    }

    match cli.command {
        Some(Command::Check) => {
            match results::read_result(&result_path)? {
                Some(result) => println!("{result}"),
                None => println!("No result"),
            }
            return Ok(());
        }
        Some(Command::Cleanup) => return results::clear(&result_path),
        None => {}
    }

    init_logger(cli.log_file)?;

    let config = riverbot_bot::Config {
        clients: cli.clients,
        host: cli.host,
        port: cli.port,
        result_path,
        simulation: cli.simulation,
    };

    if config.simulation {
        println!(
            "Running in simulation mode for {} rounds",
            cli.simulation_rounds
        );

        match riverbot_bot::simulate(&config, cli.simulation_rounds, SimplePlayer::new).await {
            Ok(Some(sim)) => {
                println!("Simulation completed. Total score: {}", sim.total_score);
                println!("Average score per round: {}", sim.average_score());
            }
            Ok(None) => println!("\nExiting..."),
            Err(e) => error!("{e}"),
        }
    } else {
        match riverbot_bot::run(&config, SimplePlayer::new).await {
            Ok(Session::Completed(_)) => {}
            Ok(Session::Interrupted) => println!("\nExiting..."),
            Err(e) => error!("{e}"),
        }
    }

    Ok(())
}
