//! Concrete NLHE instantiation of the generic MCCFR machinery: outcome-
//! sampling CFR training (C9) and the CFR bot that plays from the trained
//! table (C11).

pub mod bot;
pub mod encoder;
pub mod fabricate;
pub mod solver;

pub use bot::CfrBot;
pub use encoder::{board_street, encode, Encoding};
pub use fabricate::fabricate_random_state;
pub use solver::{cfr_recurse, Trainer};
