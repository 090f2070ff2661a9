//! Game-tree abstraction (C7): the fixed card-bucket and action alphabets
//! that every information set is defined over.

pub mod action;
pub mod bucket;

pub use action::{legal_actions, to_engine_action, AbstractAction};
pub use bucket::{preflop_bucket_of, CardBucket, FLOP_BUCKETS, RIVER_BUCKETS, TURN_BUCKETS};
