use crate::policy::PolicyContext;
use crate::seating::Seating;
use spades_core::game::match_state::{GameError, MatchState};
use spades_core::game::ports::GameObserver;
use spades_core::model::card::Card;
use spades_core::model::player::Seat;
use spades_core::model::round::{RoundPhase, TrickState};
use spades_core::model::score::TeamScore;
use spades_core::model::team::Team;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Option<Team>,
    pub rounds_played: u32,
    pub scores: [TeamScore; 2],
    /// The round cap was hit before anyone reached the target.
    pub truncated: bool,
}

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("{seat} has no legal card to play")]
    NoLegalCard { seat: Seat },
    #[error("{seat} chose {card}, which is not a legal play")]
    IllegalChoice { seat: Seat, card: Card },
}

/// Drives `state` with `seating` until the game ends or `max_rounds` rounds
/// have been scored. Events are published to `observer` after every input.
pub fn play_match(
    state: &mut MatchState,
    seating: &mut Seating,
    max_rounds: u32,
    observer: &mut dyn GameObserver,
) -> Result<MatchOutcome, AutoplayError> {
    state.publish(observer);

    while !state.is_over() && state.round_number() <= max_rounds {
        match state.round().phase() {
            RoundPhase::Bidding => state.collect_bids(seating)?,
            RoundPhase::Playing if state.round().trick_state() == TrickState::TrickComplete => {
                state.resolve_trick()?;
            }
            RoundPhase::Playing => {
                let Some(seat) = state.current_player() else {
                    break;
                };
                let legal = state.round().legal_cards(seat);
                let ctx = PolicyContext {
                    seat,
                    round: state.round(),
                    scores: state.scores(),
                    legal: &legal,
                };
                let card = seating
                    .choose_play(&ctx)
                    .ok_or(AutoplayError::NoLegalCard { seat })?;
                if !legal.contains(&card) {
                    return Err(AutoplayError::IllegalChoice { seat, card });
                }
                state.play_card(seat, card)?;
            }
            // Scoring deals the next round before returning, so a finished
            // round is never observed here.
            RoundPhase::Complete => break,
        }
        state.publish(observer);
    }

    let rounds_played = if state.is_over() {
        state.round_number()
    } else {
        state.round_number().saturating_sub(1)
    };
    let outcome = MatchOutcome {
        winner: state.winner(),
        rounds_played,
        scores: state.scores().standings(),
        truncated: !state.is_over(),
    };

    event!(
        Level::INFO,
        seed = state.seed(),
        rounds = outcome.rounds_played,
        winner = ?outcome.winner,
        truncated = outcome.truncated,
        "match finished"
    );
    Ok(outcome)
}
