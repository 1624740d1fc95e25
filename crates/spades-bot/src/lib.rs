pub mod autoplay;
pub mod bid;
pub mod policy;
pub mod seating;

pub use autoplay::{AutoplayError, MatchOutcome, play_match};
pub use bid::{FixedBidder, RandomBidder};
pub use policy::{LowestLegalPlayer, PlayPolicy, PolicyContext, RandomLegalPlayer};
pub use seating::{SeatDriver, Seating};
