//! Heads-up No-Limit Hold'em game engine (C3): betting rules, street
//! advancement, and showdown settlement. Illegal actions are rejected with a
//! recoverable `riposte_core::EngineError`; the engine never panics on
//! caller input.

pub mod action;
pub mod game;
pub mod player;
pub mod round;

pub use action::{Action, ActionRecord};
pub use game::GameState;
pub use player::{Player, Status};
pub use round::BettingRound;
