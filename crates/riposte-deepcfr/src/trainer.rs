use crate::advantage::{regret_vector, AdvantageNetwork, AdvantageSample};
use crate::policy::{strategy_vector, PolicyNetwork, PolicySample};
use crate::reservoir::Reservoir;
use crate::state_features::state_features;
use riposte_abstraction::{to_engine_action, AbstractAction};
use riposte_core::{
    Chips, Probability, Utility, CFR_MAX_DEPTH, CFR_MAX_NODES_PER_ITER, DEEPCFR_ADVANTAGE_TRAIN_EVERY,
    DEEPCFR_GRAD_CLIP_NORM, DEEPCFR_POLICY_TRAIN_EVERY, DEEPCFR_RESERVOIR_CAPACITY, NUM_PLAYERS,
};
use riposte_engine::GameState;
use riposte_mccfr::InfoSetTable;
use riposte_nlhe::{encode, fabricate_random_state};
use std::collections::BTreeMap;

const TRAIN_BATCH_SIZE: usize = 256;

fn auto_advance(state: &mut GameState) {
    while !state.is_hand_over() && state.current_player.is_none() {
        if state.advance_round().is_err() {
            break;
        }
    }
}

fn sample_action(strategy: &BTreeMap<AbstractAction, Probability>) -> AbstractAction {
    let roll: f32 = rand::random();
    let mut cumulative = 0.0;
    for (&action, &p) in strategy {
        cumulative += p;
        if roll <= cumulative {
            return action;
        }
    }
    *strategy.keys().last().expect("strategy has at least one legal action")
}

/// Deep-CFR training: runs the same outcome-sampling recursion as the
/// tabular trainer over a shared `InfoSetTable`, but additionally records
/// each decision node's features paired with its current regrets and
/// average strategy into reservoir buffers, and periodically trains the
/// advantage and policy networks on batches sampled from those buffers.
/// The tabular table remains the ground truth the networks are learning to
/// approximate; `riposte_nlhe::CfrBot` or `DeepCfrBot` can both play from
/// the same run, one from `table`, the other from the trained networks.
pub struct DeepCfrTrainer {
    pub table: InfoSetTable,
    pub advantage_net: AdvantageNetwork,
    pub policy_net: PolicyNetwork,
    advantage_buffer: Reservoir<AdvantageSample>,
    policy_buffer: Reservoir<PolicySample>,
    pub iterations: usize,
}

impl DeepCfrTrainer {
    pub fn new() -> Self {
        Self {
            table: InfoSetTable::new(),
            advantage_net: AdvantageNetwork::new(),
            policy_net: PolicyNetwork::new(),
            advantage_buffer: Reservoir::new(DEEPCFR_RESERVOIR_CAPACITY),
            policy_buffer: Reservoir::new(DEEPCFR_RESERVOIR_CAPACITY),
            iterations: 0,
        }
    }

    pub fn train(&mut self, iterations: usize) {
        for _ in 0..iterations {
            self.iterations += 1;
            let state = fabricate_random_state();
            let initial_stacks = [state.players[0].stack, state.players[1].stack];
            let mut shared_budget = CFR_MAX_NODES_PER_ITER;
            for traverser in 0..NUM_PLAYERS {
                let mut history = Vec::new();
                self.recurse(
                    &mut state.clone(),
                    traverser,
                    1.0,
                    1.0,
                    0,
                    &mut shared_budget,
                    self.iterations,
                    &mut history,
                    initial_stacks,
                );
            }

            if self.iterations % DEEPCFR_ADVANTAGE_TRAIN_EVERY == 0 && !self.advantage_buffer.is_empty() {
                let batch = self.advantage_buffer.sample_batch(TRAIN_BATCH_SIZE);
                let loss = self.advantage_net.train_batch(&batch, DEEPCFR_GRAD_CLIP_NORM);
                #[cfg(feature = "native")]
                log::info!("deep-cfr advantage net iteration {:<10} loss {:.4}", self.iterations, loss);
                #[cfg(not(feature = "native"))]
                let _ = loss;
            }
            if self.iterations % DEEPCFR_POLICY_TRAIN_EVERY == 0 && !self.policy_buffer.is_empty() {
                let batch = self.policy_buffer.sample_batch(TRAIN_BATCH_SIZE);
                let kl = self.policy_net.train_batch(&batch, DEEPCFR_GRAD_CLIP_NORM);
                #[cfg(feature = "native")]
                log::info!("deep-cfr policy net iteration {:<10} kl {:.4}", self.iterations, kl);
                #[cfg(not(feature = "native"))]
                let _ = kl;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn recurse(
        &mut self,
        state: &mut GameState,
        traverser: usize,
        reach_traverser: f32,
        reach_opponent: f32,
        depth: usize,
        budget: &mut usize,
        iteration: usize,
        history: &mut Vec<AbstractAction>,
        initial_stacks: [Chips; 2],
    ) -> Utility {
        if *budget == 0 {
            return 0.0;
        }
        *budget -= 1;
        if depth > CFR_MAX_DEPTH {
            return 0.0;
        }

        auto_advance(state);

        if state.is_hand_over() {
            let _ = state.showdown();
            return (state.players[traverser].stack - initial_stacks[traverser]) as Utility;
        }

        let seat = state.current_player.expect("non-terminal state has an actor");
        let encoding = encode(state, seat, history);
        if encoding.legal.is_empty() {
            return 0.0;
        }
        let features = state_features(state, seat, history);
        let info = self.table.get_or_create(encoding.key, &encoding.legal);
        let strategy = info.current_strategy();

        let sampled = sample_action(&strategy);
        let opponent_seat = state.other(seat);
        let opponent_total = state.players[opponent_seat].current_bet;
        let engine_action = to_engine_action(sampled, state, seat, opponent_total);

        let mut next_state = state.clone();
        next_state
            .apply(engine_action)
            .expect("an abstract legal action always maps to an engine-legal one");

        history.push(sampled);
        let p = strategy.get(&sampled).copied().unwrap_or(0.0);
        let (next_reach_traverser, next_reach_opponent) = if seat == traverser {
            (reach_traverser * p, reach_opponent)
        } else {
            (reach_traverser, reach_opponent * p)
        };
        let u = self.recurse(
            &mut next_state,
            traverser,
            next_reach_traverser,
            next_reach_opponent,
            depth + 1,
            budget,
            iteration,
            history,
            initial_stacks,
        );
        history.pop();

        let action_utilities: BTreeMap<AbstractAction, Utility> =
            encoding.legal.iter().map(|&a| (a, u)).collect();

        let info = self.table.get_or_create(encoding.key, &encoding.legal);
        info.update_average(&strategy, iteration as f32 * reach_traverser);
        if seat == traverser {
            info.update_regret(&strategy, &action_utilities, reach_opponent);
        }

        self.advantage_buffer.add(AdvantageSample {
            features,
            regrets: regret_vector(info.regret_sum()),
        });
        self.policy_buffer.add(PolicySample {
            features,
            average_strategy: strategy_vector(&info.average_strategy()),
        });

        u
    }
}

impl Default for DeepCfrTrainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_a_handful_of_iterations_populates_both_buffers_and_the_table() {
        let mut trainer = DeepCfrTrainer::new();
        trainer.train(5);
        assert!(trainer.table.len() > 0);
        assert!(!trainer.advantage_buffer.is_empty());
        assert!(!trainer.policy_buffer.is_empty());
    }

    #[test]
    fn training_cadence_eventually_trains_both_networks_without_panicking() {
        let mut trainer = DeepCfrTrainer::new();
        trainer.train(DEEPCFR_ADVANTAGE_TRAIN_EVERY + 1);
    }
}
