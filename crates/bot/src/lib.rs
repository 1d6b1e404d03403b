// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Riverbot Poker Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use log::{error, info, warn};
use std::path::PathBuf;
use tokio::{
    signal,
    sync::{broadcast, mpsc},
    task::JoinSet,
    time::{self, Duration},
};

mod client;
pub mod eval;
pub mod policy;
pub mod results;

pub use client::{Bot, START_MONEY, validate_action};
pub use riverbot_core as core;

/// Pause between simulated games.
const SIMULATION_DELAY: Duration = Duration::from_millis(100);

/// Give up a simulation after this many failed games in a row.
const MAX_FAILED_GAMES: u32 = 20;

/// Bot clients configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of clients to run.
    pub clients: u8,
    /// The engine address.
    pub host: String,
    /// The engine port.
    pub port: u16,
    /// The file scores are appended to.
    pub result_path: PathBuf,
    /// Simulation mode, scores are recorded by [simulate] only.
    pub simulation: bool,
}

/// The outcome of a [run].
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// All clients finished, with the scores of the games that ended.
    Completed(Vec<f64>),
    /// Stopped by a Ctrl-c signal.
    Interrupted,
}

/// The outcome of a [simulate].
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// The number of games played.
    pub games: u32,
    /// The sum of the game scores.
    pub total_score: f64,
}

impl Simulation {
    /// Average score per game.
    pub fn average_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score / self.games as f64
        }
    }
}

/// Runs clients given a config and a bot factory called for each client.
pub async fn run<F, B>(config: &Config, factory: F) -> Result<Session>
where
    F: Fn() -> B,
    B: Bot,
{
    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);

    let mut tasks = JoinSet::new();
    for idx in 0..config.clients {
        let mut client = client::Client::connect(
            factory(),
            config,
            shutdown_broadcast_tx.subscribe(),
            shutdown_complete_tx.clone(),
        )
        .await?;

        tasks.spawn(async move {
            let res = client.run().await;
            if let Err(err) = &res {
                error!("Client {idx} error: {err}");
            }

            info!("Client {idx} connection closed");
            res.ok().flatten()
        });
    }

    let mut scores = Vec::new();
    let interrupted = tokio::select! {
        _ = async {
            while let Some(res) = tasks.join_next().await {
                if let Ok(Some(score)) = res {
                    scores.push(score);
                }
            }
        } => false,
        _ = signal::ctrl_c() => {
            info!("Received Ctrl-c signal");
            true
        }
    };

    // Signal clients to shutdown and wait for tasks to complete.
    drop(shutdown_broadcast_tx);
    drop(shutdown_complete_tx);
    let _ = shutdown_complete_rx.recv().await;

    if interrupted {
        Ok(Session::Interrupted)
    } else {
        Ok(Session::Completed(scores))
    }
}

/// Plays `games` games one after the other with a fresh bot for each game.
///
/// The truncated average score is appended to the result file.
pub async fn simulate<F, B>(config: &Config, games: u32, factory: F) -> Result<Option<Simulation>>
where
    F: Fn() -> B,
    B: Bot,
{
    let config = Config {
        clients: 1,
        simulation: true,
        ..config.clone()
    };

    let mut sim = Simulation {
        games: 0,
        total_score: 0.0,
    };
    let mut failed = 0;

    while sim.games < games {
        info!("Running simulation game {}/{games}", sim.games + 1);

        let score = match run(&config, &factory).await {
            Ok(Session::Completed(scores)) => scores.first().copied(),
            Ok(Session::Interrupted) => return Ok(None),
            Err(e) => {
                error!("{e}");
                None
            }
        };

        time::sleep(SIMULATION_DELAY).await;

        match score {
            Some(score) => {
                sim.games += 1;
                sim.total_score += score;
                failed = 0;
                info!("Simulation game {} completed successfully", sim.games);
            }
            None => {
                failed += 1;
                warn!("Simulation game failed ({failed}/{MAX_FAILED_GAMES})");
                if failed >= MAX_FAILED_GAMES {
                    bail!("Simulation aborted after {failed} failed games");
                }
            }
        }
    }

    let average = sim.average_score().trunc() as i64;
    results::append(&config.result_path, &average.to_string())?;

    Ok(Some(sim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval::FixedEvaluator, policy::SimplePlayer};
    use std::fs;
    use tokio::{io::AsyncWriteExt, net::TcpListener};

    // Serves one connection per entry, a `None` score closes the connection
    // before the game ends.
    async fn serve_games(listener: TcpListener, scores: Vec<Option<i64>>) {
        for (idx, score) in scores.into_iter().enumerate() {
            let (mut stream, _) = listener.accept().await.unwrap();
            let Some(score) = score else {
                continue;
            };

            let id = idx + 1;
            let lines = [
                format!(r#"{{"type": 0, "message": {id}}}"#),
                r#"{"type": 2, "message": null}"#.to_string(),
                format!(
                    r#"{{"type": 9, "message": {{"round_num": 1, "round": 0, "pot": 0,
                    "current_player": 0, "current_bet": 0, "max_raise": 100,
                    "player_bets": {{"{id}": 0}}}}}}"#
                )
                .replace('\n', " "),
                format!(r#"{{"type": 7, "message": {score}}}"#),
            ];

            for line in lines {
                stream.write_all(format!("{line}\n").as_bytes()).await.unwrap();
            }
        }
    }

    async fn listen() -> (TcpListener, Config) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let result_path = std::env::temp_dir().join(format!("riverbot-lib-{port}.log"));
        let _ = fs::remove_file(&result_path);

        let config = Config {
            clients: 1,
            host: "127.0.0.1".to_string(),
            port,
            result_path,
            simulation: false,
        };

        (listener, config)
    }

    fn bot() -> SimplePlayer<FixedEvaluator> {
        SimplePlayer::with_evaluator(FixedEvaluator(0.5))
    }

    #[tokio::test]
    async fn run_collects_all_scores() {
        let (listener, mut config) = listen().await;
        config.clients = 2;

        let server = tokio::spawn(serve_games(listener, vec![Some(10), Some(-30)]));

        let session = run(&config, bot).await.unwrap();
        server.await.unwrap();

        let Session::Completed(mut scores) = session else {
            panic!("Expected a completed session");
        };
        scores.sort_by(f64::total_cmp);
        assert_eq!(scores, vec![-30.0, 10.0]);

        let content = fs::read_to_string(&config.result_path).unwrap();
        let mut lines = content.lines().collect::<Vec<_>>();
        lines.sort();
        assert_eq!(lines, vec!["-30", "10"]);

        let _ = fs::remove_file(&config.result_path);
    }

    #[tokio::test]
    async fn simulate_retries_and_records_average() {
        let (listener, config) = listen().await;

        let server = tokio::spawn(serve_games(listener, vec![None, Some(100), Some(51)]));

        let sim = simulate(&config, 2, bot).await.unwrap().unwrap();
        server.await.unwrap();

        assert_eq!(sim.games, 2);
        assert_eq!(sim.total_score, 151.0);
        assert_eq!(sim.average_score(), 75.5);

        // Only the truncated average, no per game scores.
        let content = fs::read_to_string(&config.result_path).unwrap();
        assert_eq!(content, "75\n");

        let _ = fs::remove_file(&config.result_path);
    }

    #[tokio::test]
    async fn simulate_gives_up_after_failed_games() {
        let (listener, config) = listen().await;

        let games = vec![None; MAX_FAILED_GAMES as usize];
        let server = tokio::spawn(serve_games(listener, games));

        let res = simulate(&config, 1, bot).await;
        server.await.unwrap();

        assert!(res.is_err());
        assert!(!config.result_path.exists());
    }

    #[test]
    fn average_score() {
        let sim = Simulation {
            games: 4,
            total_score: 250.0,
        };
        assert_eq!(sim.average_score(), 62.5);

        let sim = Simulation {
            games: 0,
            total_score: 0.0,
        };
        assert_eq!(sim.average_score(), 0.0);
    }
}
