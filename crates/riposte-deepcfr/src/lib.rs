//! Deep-CFR (C10): neural function approximation layered over the same
//! information-set abstraction `riposte-mccfr`/`riposte-nlhe` train
//! tabularly. A shared `InfoSetTable` still accumulates regrets and average
//! strategy exactly as in outcome-sampling CFR; this crate additionally
//! buffers each decision node's features against its regret/strategy
//! targets in reservoirs, periodically trains an advantage network and a
//! policy network against those buffers, and exposes a bot that mixes
//! neural predictions with the tabular fallback at decision time.

pub mod advantage;
pub mod bot;
pub mod network;
pub mod policy;
pub mod reservoir;
pub mod state_features;
pub mod trainer;
pub mod value;

pub use advantage::{advantages_to_strategy, regret_vector, AdvantageNetwork, AdvantageSample, ACTION_COUNT};
pub use bot::DeepCfrBot;
pub use network::{softmax, FeedForward, NetworkSnapshot};
pub use policy::{strategy_vector, PolicyNetwork, PolicySample};
pub use reservoir::Reservoir;
pub use state_features::state_features;
pub use trainer::DeepCfrTrainer;
pub use value::{ValueNetwork, ValueSample};
