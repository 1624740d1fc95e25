use crate::game::config::GameConfig;
use crate::game::events::{GameEvent, RoundSummary};
use crate::game::ports::{BidRequest, BidSource, GameObserver};
use crate::game::serialization::GameSnapshot;
use crate::model::bid::{Bid, BidError};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::Seat;
use crate::model::round::{BidOutcome, Opening, PlayError, PlayOutcome, RoundPhase, RoundState, TrickResult};
use crate::model::score::ScoreBoard;
use crate::model::team::Team;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    InProgress,
    Finished { winner: Team },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Bid(#[from] BidError),
    #[error(transparent)]
    Play(#[from] PlayError),
    #[error("the game is over")]
    GameOver,
    #[error("{seat} gave {attempts} invalid bids in a row")]
    BidAttemptsExhausted { seat: Seat, attempts: u32 },
}

/// What a single accepted card play led to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayReport {
    /// Seat to act next, if any.
    pub next: Option<Seat>,
    pub trick: Option<TrickResult>,
    pub round: Option<RoundSummary>,
    pub winner: Option<Team>,
}

/// Owns a whole game: the round in progress, the scoreboard, the shuffle
/// RNG and the queue of events waiting for an observer.
#[derive(Debug, Clone)]
pub struct MatchState {
    config: GameConfig,
    scores: ScoreBoard,
    round_number: u32,
    current_round: RoundState,
    status: MatchStatus,
    last_round: Option<RoundSummary>,
    pending: Vec<GameEvent>,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(config: GameConfig) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(config, seed)
    }

    /// Starts round one: the two of clubs holder leads and bids first.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let current_round = RoundState::deal(&deck, Opening::TwoOfClubs, false);
        Self::from_round(config, current_round, rng, seed)
    }

    /// Starts a game from pre-arranged hands; later rounds are shuffled
    /// from `seed`.
    pub fn from_round(config: GameConfig, round: RoundState, rng: StdRng, seed: u64) -> Self {
        let mut state = Self {
            config,
            scores: ScoreBoard::new(),
            round_number: 1,
            current_round: round,
            status: MatchStatus::InProgress,
            last_round: None,
            pending: Vec::new(),
            rng,
            seed,
        };
        state.announce_round();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn round(&self) -> &RoundState {
        &self.current_round
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, MatchStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<Team> {
        match self.status {
            MatchStatus::Finished { winner } => Some(winner),
            MatchStatus::InProgress => None,
        }
    }

    pub fn current_player(&self) -> Option<Seat> {
        if self.is_over() {
            return None;
        }
        self.current_round.current_player()
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Hands every queued event to `observer`, oldest first.
    pub fn publish(&mut self, observer: &mut dyn GameObserver) {
        for event in self.pending.drain(..) {
            observer.notify(&event);
        }
    }

    pub fn submit_bid(&mut self, seat: Seat, value: i32) -> Result<BidOutcome, GameError> {
        self.ensure_in_progress()?;
        let bid = Bid::new(value)?;
        let outcome = self.current_round.submit_bid(seat, bid)?;

        event!(Level::DEBUG, round = self.round_number, seat = seat.index(), bid = bid.value(), "bid placed");
        self.pending.push(GameEvent::BidPlaced { seat, bid });

        if outcome == BidOutcome::Complete {
            if let Some(bids) = self.current_round.bidding().completed() {
                self.pending.push(GameEvent::BiddingComplete { bids });
            }
        }
        Ok(outcome)
    }

    /// Asks `source` for every outstanding bid. Invalid answers are reported
    /// and the same seat is asked again.
    pub fn collect_bids<S>(&mut self, source: &mut S) -> Result<(), GameError>
    where
        S: BidSource + ?Sized,
    {
        self.ensure_in_progress()?;
        if self.current_round.phase() != RoundPhase::Bidding {
            return Err(BidError::NotInBiddingPhase.into());
        }

        while let Some(seat) = self.current_round.bidding().expected_seat() {
            let mut attempt = 0;
            loop {
                let request = self.bid_request(seat, attempt);
                let value = source.request_bid(&request);
                match self.submit_bid(seat, value) {
                    Ok(_) => break,
                    Err(GameError::Bid(err)) => {
                        event!(Level::WARN, seat = seat.index(), value, error = %err, "bid rejected");
                        self.pending.push(GameEvent::BidRejected {
                            seat,
                            value,
                            reason: err.to_string(),
                        });
                        attempt += 1;
                        if attempt >= self.config.max_bid_attempts {
                            return Err(GameError::BidAttemptsExhausted {
                                seat,
                                attempts: attempt,
                            });
                        }
                    }
                    Err(other) => return Err(other),
                }
            }
        }
        Ok(())
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayReport, GameError> {
        self.ensure_in_progress()?;
        let outcome = self.current_round.play_card(seat, card)?;

        event!(Level::DEBUG, round = self.round_number, seat = seat.index(), card = %card, "card played");
        self.pending.push(GameEvent::CardPlayed { seat, card });
        if outcome.breaks_spades() {
            self.pending.push(GameEvent::SpadesBroken { seat });
        }

        match outcome {
            PlayOutcome::Played { next, .. } => Ok(PlayReport {
                next: Some(next),
                ..PlayReport::default()
            }),
            PlayOutcome::TrickFull { .. } => {
                let plays = self.current_round.current_trick().plays();
                if let [a, b, c, d] = plays {
                    self.pending.push(GameEvent::TrickCompleted {
                        cards: [a.card, b.card, c.card, d.card],
                    });
                }
                if self.config.defer_trick_resolution {
                    Ok(PlayReport::default())
                } else {
                    self.resolve_trick()
                }
            }
        }
    }

    /// Settles the full trick on the table. Called automatically unless
    /// trick resolution is deferred.
    pub fn resolve_trick(&mut self) -> Result<PlayReport, GameError> {
        self.ensure_in_progress()?;
        let result = self.current_round.resolve_trick()?;

        event!(
            Level::DEBUG,
            round = self.round_number,
            winner = result.winner.index(),
            card = %result.winning_card,
            "trick resolved"
        );
        self.pending.push(GameEvent::TrickResolved(result.clone()));

        let mut report = PlayReport {
            next: Some(result.winner),
            trick: Some(result.clone()),
            ..PlayReport::default()
        };

        if result.round_complete {
            let summary = self.score_round();
            report.round = Some(summary);
            match self.scores.winner(&self.config.scoring) {
                Some(winner) => {
                    self.finish(winner);
                    report.winner = Some(winner);
                    report.next = None;
                }
                None => {
                    self.start_next_round();
                    report.next = self.current_round.current_player();
                }
            }
        }

        Ok(report)
    }

    fn score_round(&mut self) -> RoundSummary {
        let bids = self
            .current_round
            .bidding()
            .bids()
            .map(|bid| bid.map_or(0, Bid::value));
        let tricks_won = self.current_round.tricks_won_by_seat();
        let teams = self
            .scores
            .apply_round(bids, tricks_won, &self.config.scoring);

        let summary = RoundSummary {
            round: self.round_number,
            bids,
            tricks_won,
            teams,
            standings: self.scores.standings(),
        };

        event!(
            Level::INFO,
            round = self.round_number,
            team_a = summary.standings[0].score,
            bags_a = summary.standings[0].bags,
            team_b = summary.standings[1].score,
            bags_b = summary.standings[1].bags,
            "round scored"
        );
        self.pending.push(GameEvent::RoundScored(summary.clone()));
        self.last_round = Some(summary.clone());
        summary
    }

    fn finish(&mut self, winner: Team) {
        self.status = MatchStatus::Finished { winner };
        event!(Level::INFO, round = self.round_number, winner = %winner, "game over");
        self.pending.push(GameEvent::GameOver {
            winner,
            scores: self.scores.standings(),
        });
    }

    /// Deals the next round. The lead rotates one seat from the previous
    /// round's starting player, whoever took the last trick.
    fn start_next_round(&mut self) {
        let next_starting = self.current_round.starting_player().next();
        let spades_broken = self.current_round.spades_broken();

        self.round_number += 1;
        let deck = Deck::shuffled(&mut self.rng);
        self.current_round = RoundState::deal(&deck, Opening::Rotated(next_starting), spades_broken);
        self.announce_round();
    }

    fn announce_round(&mut self) {
        let starting_player = self.current_round.starting_player();
        event!(
            Level::DEBUG,
            round = self.round_number,
            starting_player = starting_player.index(),
            "round dealt"
        );
        self.pending.push(GameEvent::RoundStarted {
            round: self.round_number,
            starting_player,
        });
    }

    fn bid_request(&self, seat: Seat, attempt: u32) -> BidRequest {
        BidRequest {
            seat,
            round: self.round_number,
            hand: self.current_round.hand(seat).clone(),
            bids: self.current_round.bidding().bids(),
            standings: self.scores.standings(),
            attempt,
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.is_over() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }
}
