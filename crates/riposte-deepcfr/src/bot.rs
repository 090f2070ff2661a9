use crate::policy::PolicyNetwork;
use crate::state_features::state_features;
use riposte_abstraction::{to_engine_action, AbstractAction};
use riposte_core::Probability;
use riposte_engine::{Action, GameState};
use riposte_mccfr::InfoSetTable;
use riposte_nlhe::encode;
use std::collections::BTreeMap;

/// plays from a Deep-CFR run: with `neural_mix_probability` chance, samples
/// from the policy network's predicted distribution; otherwise (or if the
/// network's output turns out unusable) falls back to the tabular average
/// strategy, and if that's unusable too, to the same pathological-input
/// mixed policy the tabular bot uses. The network is a cheaper approximation
/// of the table it was trained to imitate, never a second source of truth —
/// any failure on its side just defers to the table.
pub struct DeepCfrBot<'a> {
    table: &'a InfoSetTable,
    policy_net: &'a PolicyNetwork,
    neural_mix_probability: f32,
}

impl<'a> DeepCfrBot<'a> {
    pub fn new(table: &'a InfoSetTable, policy_net: &'a PolicyNetwork, neural_mix_probability: f32) -> Self {
        Self {
            table,
            policy_net,
            neural_mix_probability,
        }
    }

    pub fn decide(&self, state: &GameState, seat: usize, history: &[AbstractAction]) -> Action {
        let encoding = encode(state, seat, history);
        let facing_bet = state.players[seat].to_call(state.current_bet) > 0;

        let use_neural = rand::random::<f32>() < self.neural_mix_probability;
        let neural_strategy = if use_neural {
            let features = state_features(state, seat, history);
            let predicted = self.policy_net.predict(&features, &encoding.legal);
            is_usable(&predicted).then_some(predicted)
        } else {
            None
        };

        let strategy = neural_strategy.or_else(|| {
            self.table
                .get(&encoding.key)
                .map(|info| info.average_strategy())
                .filter(is_usable)
        });

        let chosen = match strategy {
            Some(strategy) => sample(&strategy),
            None => fallback_action(facing_bet),
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
    fn an_untrained_setup_always_falls_back_to_a_legal_action() {
        let table = InfoSetTable::new();
        let policy_net = PolicyNetwork::new();
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let bot = DeepCfrBot::new(&table, &policy_net, 1.0);
        let action = bot.decide(&state, seat, &[]);
        assert!(matches!(action, Action::Fold | Action::Check | Action::Call | Action::Raise(_)));
    }

    #[test]
    fn zero_mix_probability_never_consults_the_network() {
        let table = InfoSetTable::new();
        let policy_net = PolicyNetwork::new();
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let bot = DeepCfrBot::new(&table, &policy_net, 0.0);
        for _ in 0..20 {
            let _ = bot.decide(&state, seat, &[]);
        }
    }
}
