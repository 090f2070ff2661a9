use riposte_core::{Chips, BIG_BLIND};
use riposte_engine::GameState;

const MIN_FABRICATED_STACK_BB: Chips = 5;
const MAX_FABRICATED_STACK_BB: Chips = 400;

/// builds a random training state from engine primitives only: deal a fresh
/// hand, then randomize each player's stack depth and fast-forward a random
/// number of streets by auto-resolving betting rounds with checks/calls, so
/// training samples the full range of stack depths and board textures
/// rather than only the fixed `STARTING_STACK` preflop state.
pub fn fabricate_random_state() -> GameState {
    let mut state = GameState::new_game();
    for player in state.players.iter_mut() {
        let stack_bb = rand::random_range(MIN_FABRICATED_STACK_BB..=MAX_FABRICATED_STACK_BB);
        player.stack = stack_bb * BIG_BLIND;
    }
    let streets_to_skip = rand::random_range(0..4u8);
    for _ in 0..streets_to_skip {
        if !close_out_street(&mut state) {
            break;
        }
    }
    state
}

/// checks/calls through the current betting round to close it, then
/// advances to the next street. Returns `false` once the hand is already
/// over, so the caller stops trying to skip further streets.
fn close_out_street(state: &mut GameState) -> bool {
    use riposte_engine::Action;
    while !state.betting_round_over() {
        let Some(seat) = state.current_player else { break };
        let action = if state.players[seat].to_call(state.current_bet) > 0 {
            Action::Call
        } else {
            Action::Check
        };
        if state.apply(action).is_err() {
            return false;
        }
    }
    if state.is_hand_over() {
        return false;
    }
    state.advance_round().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabricated_stacks_stay_within_bounds() {
        for _ in 0..20 {
            let state = fabricate_random_state();
            for player in &state.players {
                assert!(player.stack >= 0);
                assert!(player.stack <= MAX_FABRICATED_STACK_BB * BIG_BLIND);
            }
        }
    }

    #[test]
    fn fabrication_never_panics() {
        for _ in 0..50 {
            let _ = fabricate_random_state();
        }
    }
}
