use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use spades_bot::autoplay::{AutoplayError, MatchOutcome, play_match};
use spades_bot::bid::{FixedBidder, RandomBidder};
use spades_bot::policy::{LowestLegalPlayer, PlayPolicy, RandomLegalPlayer};
use spades_bot::seating::{SeatDriver, Seating};
use spades_core::game::events::GameEvent;
use spades_core::game::match_state::MatchState;
use spades_core::game::ports::{BidSource, GameObserver};
use spades_core::model::player::Seat;
use spades_core::model::score::TeamScore;
use spades_core::model::team::Team;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BidderKind, PlayerKind, ResolvedOutputs, SeatConfig, SimulationConfig};

/// Plays the configured games back to back and streams one JSONL row per game.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run, also written as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub games_played: usize,
    pub team_a_wins: usize,
    pub team_b_wins: usize,
    pub truncated: usize,
    pub average_rounds: f64,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != Seat::COUNT {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }
        Ok(Self { config, outputs })
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_json.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut wins = [0usize; 2];
        let mut truncated = 0usize;
        let mut total_rounds = 0u64;

        for game_index in 0..self.config.games.count {
            let game_seed = rng.next_u64();
            let started = Instant::now();
            let mut tally = EventTally::default();
            let outcome = self.play_game(game_seed, &mut tally)?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            match outcome.winner {
                Some(team) => wins[team.index()] += 1,
                None => truncated += 1,
            }
            total_rounds += u64::from(outcome.rounds_played);

            let row = GameRow {
                run_id: &self.config.run_id,
                game_index,
                game_seed,
                seats: self.seat_snapshots(),
                winner: outcome.winner,
                truncated: outcome.truncated,
                rounds_played: outcome.rounds_played,
                scores: outcome.scores,
                tricks_played: tally.tricks,
                bid_rejections: tally.bid_rejections,
                elapsed_ms,
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            event!(
                Level::INFO,
                game = game_index,
                seed = game_seed,
                winner = ?outcome.winner,
                rounds = outcome.rounds_played,
                "game complete"
            );
        }

        writer.flush()?;

        let games_played = self.config.games.count;
        let summary = RunSummary {
            run_id: self.config.run_id.clone(),
            games_played,
            team_a_wins: wins[Team::A.index()],
            team_b_wins: wins[Team::B.index()],
            truncated,
            average_rounds: total_rounds as f64 / games_played.max(1) as f64,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_json.clone(),
        };

        let mut summary_writer = BufWriter::new(File::create(&self.outputs.summary_json)?);
        serde_json::to_writer_pretty(&mut summary_writer, &summary)?;
        summary_writer.write_all(b"\n")?;
        summary_writer.flush()?;

        Ok(summary)
    }

    fn play_game(&self, game_seed: u64, tally: &mut EventTally) -> Result<MatchOutcome, RunnerError> {
        let mut state = MatchState::with_seed(self.config.game.clone(), game_seed);
        let mut seating = self.build_seating(game_seed);
        let outcome = play_match(
            &mut state,
            &mut seating,
            self.config.games.max_rounds,
            tally,
        )?;
        Ok(outcome)
    }

    fn build_seating(&self, game_seed: u64) -> Seating {
        let drivers = Seat::LOOP.map(|seat| {
            let seat_config = &self.config.seats[seat.index()];
            let seat_seed = game_seed.wrapping_add(seat.index() as u64 + 1);
            driver_for(seat_config, seat_seed)
        });
        Seating::new(drivers)
    }

    fn seat_snapshots(&self) -> Vec<SeatSnapshot> {
        Seat::LOOP
            .iter()
            .zip(&self.config.seats)
            .map(|(seat, config)| SeatSnapshot {
                seat: *seat,
                team: seat.team(),
                name: config.name.clone(),
                bidder: config.bidder,
                player: config.player,
            })
            .collect()
    }
}

fn driver_for(config: &SeatConfig, seed: u64) -> SeatDriver {
    let bidder: Box<dyn BidSource + Send> = match config.bidder {
        BidderKind::Random => Box::new(RandomBidder::new(seed)),
        BidderKind::Fixed => Box::new(FixedBidder::new(config.bid.unwrap_or(0))),
    };
    let player: Box<dyn PlayPolicy> = match config.player {
        PlayerKind::RandomLegal => Box::new(RandomLegalPlayer::new(seed.rotate_left(29))),
        PlayerKind::LowestLegal => Box::new(LowestLegalPlayer),
    };
    SeatDriver { bidder, player }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Counts what happened during a game without keeping the events.
#[derive(Debug, Default)]
struct EventTally {
    tricks: u32,
    bid_rejections: u32,
}

impl GameObserver for EventTally {
    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TrickResolved(_) => self.tricks += 1,
            GameEvent::BidRejected { .. } => self.bid_rejections += 1,
            _ => {}
        }
    }
}

#[derive(Clone, Serialize)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub team: Team,
    pub name: String,
    pub bidder: BidderKind,
    pub player: PlayerKind,
}

#[derive(Serialize)]
struct GameRow<'a> {
    run_id: &'a str,
    game_index: usize,
    game_seed: u64,
    seats: Vec<SeatSnapshot>,
    winner: Option<Team>,
    truncated: bool,
    rounds_played: u32,
    scores: [TeamScore; 2],
    tricks_played: u32,
    bid_rejections: u32,
    elapsed_ms: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {0}")]
    Game(#[from] AutoplayError),
    #[error("configuration requires exactly 4 seats but found {found}")]
    SeatCount { found: usize },
}
