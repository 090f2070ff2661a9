//! The heads-up NLHE engine's external surface: the engine-facing API a
//! frontend drives a live game through, the serialized-state wire format,
//! and the boundary action alphabet. The `train`/`match`/`match_series`
//! CLI in `main.rs` is a thin client of this same library.

pub mod boundary;
pub mod commands;
pub mod serialize;
pub mod session;

pub use boundary::BoundaryAction;
pub use serialize::serialize_state;
pub use session::{Bot, GameId, Session};
