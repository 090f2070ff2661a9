//! Hand-crafted heads-up strategy bot (C6): opponent modeling, villain range
//! estimation, multi-street planning, betting-line reads, river-specialized
//! play, and the top-level decision dispatcher that ties them together.

pub mod decision;
pub mod line;
pub mod opponent_model;
pub mod plan;
pub mod postflop;
pub mod preflop;
pub mod ranges;
pub mod river;

pub use decision::decide_action;
pub use line::{analyze_betting_line, BettingLine, LineType, SizingTell};
pub use opponent_model::OpponentModel;
pub use plan::{categorize_hand, create_multi_street_plan, HandCategory, MultiStreetPlan, PlannedAction};
pub use postflop::{
    decide_call_raise_fold_advanced, decide_check_or_bet_advanced, needs_protection, CallRaiseFold,
    CheckOrBet,
};
pub use preflop::{adjust_for_opponent_preflop, get_simple_hand_strength, preflop_decision};
pub use ranges::estimate_villain_range;
pub use river::{
    calculate_river_hand_strength, river_betting_decision, river_calling_decision, RiverBettingDecision,
};

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_engine::{Action, GameState};

    #[test]
    fn a_fresh_hand_produces_a_legal_looking_decision() {
        let state = GameState::new_game();
        let mut model = OpponentModel::new();
        let seat = state.current_player.unwrap();
        let action = decide_action(&state, seat, &mut model);
        assert!(matches!(action, Action::Fold | Action::Check | Action::Call | Action::Raise(_)));
    }
}
