//! Generic information-set manager (C8): stable 128-bit info-set keys,
//! fixed-length feature vectors, CFR+ regret matching, and linear-weighted
//! average-strategy accumulation. Concrete game trees (`riposte-nlhe`) own
//! the sampling and recursion; this crate owns the regret/strategy math
//! every sampler updates through.

pub mod features;
pub mod infoset;
pub mod key;
pub mod normalize;
pub mod pot;
pub mod table;

pub use features::{build_features, FeatureInputs, FEATURE_VECTOR_LEN};
pub use infoset::InfoSet;
pub use key::InfoKey;
pub use normalize::{normalize, normalize_default};
pub use pot::{pot_bucket_of, NUM_POT_BUCKETS, POT_BUCKET_CUTOFFS_BB};
pub use table::InfoSetTable;
