use riposte_abstraction::{preflop_bucket_of, AbstractAction, CardBucket};
use riposte_cards::classify;
use riposte_engine::GameState;
use riposte_mccfr::{build_features, FeatureInputs, FEATURE_VECTOR_LEN};
use riposte_nlhe::board_street;

/// builds the fixed-length neural feature vector for `seat` at `state`,
/// given the abstract-action history seen so far. Mirrors the tabular
/// encoder's card-bucket lookup in `riposte-nlhe`, but additionally derives
/// the scalar pot-odds/SPR/position features the tabular info-set key
/// doesn't need (it only needs the pot *bucket*, not the exact ratio).
pub fn state_features(
    state: &GameState,
    seat: usize,
    history: &[AbstractAction],
) -> [f32; FEATURE_VECTOR_LEN] {
    let street = board_street(state);
    let bucket = if street == riposte_cards::Street::Preflop {
        let hole = state.players[seat].hole.expect("dealt hand has a hole");
        let (class, _) = classify(&hole);
        preflop_bucket_of(class)
    } else {
        CardBucket::postflop(street, &state.community.cards)
    };

    let to_call = state.players[seat].to_call(state.current_bet);
    let pot = state.pot.max(1) as f32;
    let pot_odds = to_call as f32 / (pot + to_call as f32);
    let effective_stack = state.players[seat].stack.min(state.players[state.other(seat)].stack);
    let spr = effective_stack as f32 / pot;
    let pot_bucket = riposte_mccfr::pot_bucket_of(pot / riposte_core::BIG_BLIND as f32);
    let in_position = seat != state.dealer_pos;

    let inputs = FeatureInputs {
        street,
        card_bucket_index: bucket.index(),
        pot_bucket,
        pot_odds,
        spr,
        history,
        in_position,
    };
    build_features(&inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_hand_produces_a_finite_feature_vector() {
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let features = state_features(&state, seat, &[]);
        assert_eq!(features.len(), FEATURE_VECTOR_LEN);
        assert!(features.iter().all(|f| f.is_finite()));
    }
}
