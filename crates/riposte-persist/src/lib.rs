//! Persistence layer: tabular strategy files, neural checkpoints, and the
//! append-only hand-history log, kept separate from the training/playing
//! crates so training can run with persistence disabled entirely (hand
//! history) or only at a save cadence (strategy/checkpoint files).

pub mod checkpoint;
pub mod hand_history;
pub mod strategy;

pub use checkpoint::{load_checkpoint, save_checkpoint, Checkpoint, ConfigSnapshot};
pub use hand_history::{HandHistoryWriter, LoggedAction};
pub use strategy::{load_strategy, require_config_file, save_strategy};
