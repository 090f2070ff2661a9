use crate::encoder::encode;
use crate::fabricate::fabricate_random_state;
use riposte_abstraction::{to_engine_action, AbstractAction};
use riposte_core::{Chips, Probability, Utility, CFR_MAX_DEPTH, CFR_MAX_NODES_PER_ITER, NUM_PLAYERS};
use riposte_engine::GameState;
use riposte_mccfr::InfoSetTable;
use std::collections::BTreeMap;

/// runs the remaining engine-driven transitions (street advances, board
/// deals) that aren't themselves a player decision, so `cfr_recurse` only
/// ever has to handle a genuine choice node or a true terminal.
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

/// outcome-sampling `cfr_recurse`, following the contract verbatim: budget
/// and depth guards abort with zero utility, terminals resolve through
/// showdown, and — per the algorithm's simplifying choice here — one
/// sampled child's utility stands in for every action's counterfactual
/// value rather than separately exploring each one (a cruder, cheaper
/// variant than canonical external-sampling MCCFR, but what the recursion
/// contract as written actually specifies).
#[allow(clippy::too_many_arguments)]
pub fn cfr_recurse(
    table: &mut InfoSetTable,
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
    let info = table.get_or_create(encoding.key, &encoding.legal);
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
    let u = cfr_recurse(
        table,
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

    let info = table.get_or_create(encoding.key, &encoding.legal);
    info.update_average(&strategy, iteration as f32 * reach_traverser);
    if seat == traverser {
        info.update_regret(&strategy, &action_utilities, reach_opponent);
    }

    u
}

/// the training loop: one fabricated random state per iteration, both
/// seats traversed in turn against a shared node budget.
pub struct Trainer {
    pub table: InfoSetTable,
    pub iterations: usize,
}

impl Trainer {
    pub fn new() -> Self {
        Self {
            table: InfoSetTable::new(),
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
                cfr_recurse(
                    &mut self.table,
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
            #[cfg(feature = "native")]
            if self.iterations % riposte_core::CFR_EVAL_FREQUENCY == 0 {
                log::info!(
                    "cfr iteration {:<10} infosets {:<10}",
                    self.iterations,
                    self.table.len()
                );
            }
        }
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn training_a_handful_of_iterations_populates_the_table() {
        let mut trainer = Trainer::new();
        trainer.train(5);
        assert!(trainer.table.len() > 0);
    }

    #[test]
    fn budget_exhaustion_returns_zero_utility() {
        let mut table = InfoSetTable::new();
        let mut state = GameState::new_game();
        let mut budget = 0usize;
        let mut history = Vec::new();
        let u = cfr_recurse(&mut table, &mut state, 0, 1.0, 1.0, 0, &mut budget, 1, &mut history, [200, 200]);
        assert_eq!(u, 0.0);
    }

    #[test]
    fn depth_guard_returns_zero_utility() {
        let mut table = InfoSetTable::new();
        let mut state = GameState::new_game();
        let mut budget = CFR_MAX_NODES_PER_ITER;
        let mut history = Vec::new();
        let u = cfr_recurse(
            &mut table,
            &mut state,
            0,
            1.0,
            1.0,
            CFR_MAX_DEPTH + 1,
            &mut budget,
            1,
            &mut history,
            [200, 200],
        );
        assert_eq!(u, 0.0);
    }
}
