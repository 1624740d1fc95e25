pub mod config;
pub mod events;
pub mod match_state;
pub mod ports;
pub mod serialization;
