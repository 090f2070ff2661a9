use riposte_core::Chips;
use riposte_engine::{Action, GameState};

/// the canonical, fixed action alphabet every info-set's strategy is defined
/// over. Preflop `RaiseX` means `X·BB` when opening or `X` times the
/// opponent's total bet when facing a raise; postflop `RaiseX` means `X·pot`
/// when opening or `X` times the opponent's total when facing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AbstractAction {
    Fold,
    Check,
    Call,
    Raise1_0,
    Raise3_0,
    Raise5_0,
    Raise0_35,
    Raise0_7,
    Raise1_1,
    AllIn,
}

impl AbstractAction {
    pub const ALPHABET: [AbstractAction; 10] = [
        AbstractAction::Fold,
        AbstractAction::Check,
        AbstractAction::Call,
        AbstractAction::Raise1_0,
        AbstractAction::Raise3_0,
        AbstractAction::Raise5_0,
        AbstractAction::Raise0_35,
        AbstractAction::Raise0_7,
        AbstractAction::Raise1_1,
        AbstractAction::AllIn,
    ];

    fn raise_multiplier(self) -> Option<f32> {
        match self {
            AbstractAction::Raise1_0 => Some(1.0),
            AbstractAction::Raise3_0 => Some(3.0),
            AbstractAction::Raise5_0 => Some(5.0),
            AbstractAction::Raise0_35 => Some(0.35),
            AbstractAction::Raise0_7 => Some(0.7),
            AbstractAction::Raise1_1 => Some(1.1),
            _ => None,
        }
    }
}

impl std::fmt::Display for AbstractAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            AbstractAction::Fold => "fold",
            AbstractAction::Check => "check",
            AbstractAction::Call => "call",
            AbstractAction::Raise1_0 => "raise_1.0",
            AbstractAction::Raise3_0 => "raise_3.0",
            AbstractAction::Raise5_0 => "raise_5.0",
            AbstractAction::Raise0_35 => "raise_0.35",
            AbstractAction::Raise0_7 => "raise_0.7",
            AbstractAction::Raise1_1 => "raise_1.1",
            AbstractAction::AllIn => "allin",
        };
        write!(f, "{s}")
    }
}

/// the subset of `AbstractAction::ALPHABET` legal in `state` for `seat`,
/// filtered by heads-up preflop scenario (SB open / BB vs. raise / BB vs.
/// limp) and by whether a raise of that size even fits in the stack.
pub fn legal_actions(state: &GameState, seat: usize) -> Vec<AbstractAction> {
    let engine_actions = state.legal_actions(seat);
    let facing_bet = engine_actions.contains(&Action::Fold);
    let can_raise = engine_actions.iter().any(|a| matches!(a, Action::Raise(_)));

    let is_preflop = state.betting_round == riposte_engine::BettingRound::Preflop;
    let is_opener = is_preflop && state.current_bet <= riposte_core::BIG_BLIND;
    let is_limp_pot = is_preflop && !facing_bet && state.current_bet == riposte_core::BIG_BLIND;

    let mut out = Vec::with_capacity(4);
    for &action in engine_actions.iter() {
        match action {
            Action::Fold => out.push(AbstractAction::Fold),
            Action::Check => out.push(AbstractAction::Check),
            Action::Call => out.push(AbstractAction::Call),
            Action::Raise(_) => {}
        }
    }
    if !can_raise {
        return out;
    }

    if is_preflop {
        if is_opener {
            out.push(AbstractAction::Raise3_0); // ~2.5x-sized open, closest alphabet entry
        } else if is_limp_pot {
            out.push(AbstractAction::Raise3_0);
            out.push(AbstractAction::Raise5_0);
        } else {
            out.push(AbstractAction::Raise3_0);
            out.push(AbstractAction::Raise5_0);
        }
    } else {
        out.push(AbstractAction::Raise0_35);
        out.push(AbstractAction::Raise0_7);
        out.push(AbstractAction::Raise1_0);
        out.push(AbstractAction::Raise1_1);
        out.push(AbstractAction::Raise3_0);
    }
    out.push(AbstractAction::AllIn);
    out
}

/// maps an abstract action back to a concrete engine `Action`, clipping the
/// computed raise target to the legal [min, stack] range. `opponent_total`
/// is the opponent's current total bet this street, used as the `×X` base
/// when facing a raise.
pub fn to_engine_action(
    abstract_action: AbstractAction,
    state: &GameState,
    seat: usize,
    opponent_total: Chips,
) -> Action {
    match abstract_action {
        AbstractAction::Fold => Action::Fold,
        AbstractAction::Check => Action::Check,
        AbstractAction::Call => Action::Call,
        AbstractAction::AllIn => Action::Raise(state.max_raise_target(seat)),
        other => {
            let is_preflop = state.betting_round == riposte_engine::BettingRound::Preflop;
            let multiplier = other.raise_multiplier().expect("raise variant has a multiplier");
            let facing_bet = state.current_bet > state.players[seat].current_bet;
            let target = if is_preflop {
                if facing_bet {
                    (opponent_total as f32 * multiplier).round() as Chips
                } else {
                    (riposte_core::BIG_BLIND as f32 * multiplier).round() as Chips
                }
            } else if facing_bet {
                (opponent_total as f32 * multiplier).round() as Chips
            } else {
                (state.pot as f32 * multiplier).round() as Chips
            };
            let min_target = state.min_raise_target(seat);
            let max_target = state.max_raise_target(seat);
            Action::Raise(target.clamp(min_target.min(max_target), max_target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflop_opener_cannot_see_postflop_sizings() {
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let actions = legal_actions(&state, seat);
        assert!(!actions.contains(&AbstractAction::Raise0_35));
        assert!(actions.contains(&AbstractAction::AllIn));
    }

    #[test]
    fn allin_maps_to_full_stack_raise() {
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let action = to_engine_action(AbstractAction::AllIn, &state, seat, 0);
        assert_eq!(action, Action::Raise(state.max_raise_target(seat)));
    }
}
