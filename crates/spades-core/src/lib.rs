#![deny(warnings)]
pub mod game;
pub mod model;

pub use game::config::GameConfig;
pub use game::match_state::{GameError, MatchState, MatchStatus};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "spades"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
