use crate::encoder::encode;
use riposte_abstraction::{to_engine_action, AbstractAction};
use riposte_core::Probability;
use riposte_engine::{Action, GameState};
use riposte_mccfr::InfoSetTable;
use std::collections::BTreeMap;

/// plays from a trained strategy table: maps the engine state to an
/// information-set key, samples from that info-set's average strategy, and
/// maps the sampled abstract action back to a concrete engine action.
/// Falls back to a fixed mixed policy whenever the table has nothing
/// trained for this info-set, or whatever it has is degenerate (empty or
/// containing a non-finite probability).
pub struct CfrBot<'a> {
    table: &'a InfoSetTable,
}

impl<'a> CfrBot<'a> {
    pub fn new(table: &'a InfoSetTable) -> Self {
        Self { table }
    }

    pub fn decide(&self, state: &GameState, seat: usize, history: &[AbstractAction]) -> Action {
        let encoding = encode(state, seat, history);
        let facing_bet = state.players[seat].to_call(state.current_bet) > 0;

        let strategy = self.table.get(&encoding.key).map(|info| info.average_strategy());
        let chosen = match strategy {
            Some(strategy) if is_usable(&strategy) => sample(&strategy),
            _ => fallback_action(facing_bet),
        };

        let opponent_total = state.players[state.other(seat)].current_bet;
        to_engine_action(chosen, state, seat, opponent_total)
    }
}

fn is_usable(strategy: &BTreeMap<AbstractAction, Probability>) -> bool {
    !strategy.is_empty() && strategy.values().all(|p| p.is_finite())
}

fn sample(strategy: &BTreeMap<AbstractAction, Probability>) -> AbstractAction {
    let roll: f32 = rand::random();
    let mut cumulative = 0.0;
    for (&action, &p) in strategy {
        cumulative += p;
        if roll <= cumulative {
            return action;
        }
    }
    *strategy.keys().last().expect("non-empty strategy")
}

/// pathological-input fallback: call 60 / fold 40 facing a bet; check 70 /
/// bet-small 30 otherwise. `Raise0_35` stands in for "half-pot" since it's
/// the alphabet's nearest postflop opening size to that target.
fn fallback_action(facing_bet: bool) -> AbstractAction {
    let roll: f32 = rand::random();
    if facing_bet {
        if roll < 0.60 {
            AbstractAction::Call
        } else {
            AbstractAction::Fold
        }
    } else if roll < 0.70 {
        AbstractAction::Check
    } else {
        AbstractAction::Raise0_35
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_table_always_falls_back_to_a_legal_action() {
        let table = InfoSetTable::new();
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let bot = CfrBot::new(&table);
        let action = bot.decide(&state, seat, &[]);
        assert!(matches!(action, Action::Fold | Action::Check | Action::Call | Action::Raise(_)));
    }

    #[test]
    fn fallback_never_checks_when_facing_a_bet() {
        for _ in 0..50 {
            assert_ne!(fallback_action(true), AbstractAction::Check);
        }
    }
}
