use super::{PlayPolicy, PolicyContext};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use spades_core::model::card::Card;
use tracing::{Level, event};

/// Uniform pick among the legal cards.
#[derive(Debug, Clone)]
pub struct RandomLegalPlayer {
    rng: StdRng,
}

impl RandomLegalPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PlayPolicy for RandomLegalPlayer {
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let card = ctx.legal.choose(&mut self.rng).copied()?;
        log_play_decision(ctx, card, "random_legal");
        Some(card)
    }
}

/// Plays the lowest legal card by rank, preferring non-spades on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestLegalPlayer;

impl PlayPolicy for LowestLegalPlayer {
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        let card = ctx
            .legal
            .iter()
            .copied()
            .min_by_key(|card| (card.rank, card.is_spade(), card.suit))?;
        log_play_decision(ctx, card, "lowest_legal");
        Some(card)
    }
}

fn log_play_decision(ctx: &PolicyContext, card: Card, reason: &'static str) {
    event!(
        target: "spades_bot::play",
        Level::DEBUG,
        seat = ctx.seat.index(),
        card = %card,
        legal = ctx.legal.len(),
        tricks = ctx.round.tricks_completed(),
        reason,
        "play chosen"
    );
}
