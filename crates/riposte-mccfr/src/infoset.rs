use crate::normalize::normalize_default;
use riposte_abstraction::AbstractAction;
use riposte_core::{Probability, Utility};
use std::collections::BTreeMap;

/// one information set's accumulated regrets and strategy weights. Regrets
/// are clipped to non-negative (CFR+); the average strategy is built from
/// `strategy_sum`, weighted by `iteration · reach_own` at each update
/// (linear CFR) rather than uniformly across iterations.
#[derive(Debug, Clone)]
pub struct InfoSet {
    legal: Vec<AbstractAction>,
    regret_sum: BTreeMap<AbstractAction, Utility>,
    strategy_sum: BTreeMap<AbstractAction, Probability>,
}

impl InfoSet {
    pub fn new(legal: Vec<AbstractAction>) -> Self {
        let regret_sum = legal.iter().map(|&a| (a, 0.0)).collect();
        let strategy_sum = legal.iter().map(|&a| (a, 0.0)).collect();
        Self {
            legal,
            regret_sum,
            strategy_sum,
        }
    }

    pub fn legal_actions(&self) -> &[AbstractAction] {
        &self.legal
    }

    /// CFR+ regret matching: `strategy[a] = max(R[a], 0) / Σ max(R[·], 0)`,
    /// falling back to uniform over legal actions when every regret is
    /// non-positive.
    pub fn current_strategy(&self) -> BTreeMap<AbstractAction, Probability> {
        let positive: BTreeMap<AbstractAction, Probability> = self
            .regret_sum
            .iter()
            .map(|(&a, &r)| (a, r.max(0.0)))
            .collect();
        normalize_default(&positive)
    }

    /// applies a CFR+ regret update for this visit: for each legal action
    /// `a`, `R[a] ← max(0, R[a] + reach_opp · (u[a] − Σ σ[b]·u[b]))`, where
    /// the subtracted term is the node's expected utility under the
    /// strategy that was actually sampled from.
    pub fn update_regret(
        &mut self,
        strategy: &BTreeMap<AbstractAction, Probability>,
        action_utilities: &BTreeMap<AbstractAction, Utility>,
        reach_opp: f32,
    ) {
        let expected: Utility = strategy
            .iter()
            .map(|(a, &p)| p * action_utilities.get(a).copied().unwrap_or(0.0))
            .sum();
        for &action in &self.legal {
            let u = action_utilities.get(&action).copied().unwrap_or(0.0);
            let entry = self.regret_sum.entry(action).or_insert(0.0);
            *entry = (*entry + reach_opp * (u - expected)).max(0.0);
        }
    }

    /// linear-CFR average-strategy update: accumulates `weight · σ[a]` into
    /// `strategy_sum`, where `weight` is typically `iteration · reach_own`.
    pub fn update_average(&mut self, strategy: &BTreeMap<AbstractAction, Probability>, weight: f32) {
        for &action in &self.legal {
            let p = strategy.get(&action).copied().unwrap_or(0.0);
            *self.strategy_sum.entry(action).or_insert(0.0) += weight * p;
        }
    }

    /// `strategy_sum[a] / Σ strategy_sum[·]`, sanitized the same way as
    /// every other probability distribution in this crate.
    pub fn average_strategy(&self) -> BTreeMap<AbstractAction, Probability> {
        normalize_default(&self.strategy_sum)
    }

    pub fn regret_sum(&self) -> &BTreeMap<AbstractAction, Utility> {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &BTreeMap<AbstractAction, Probability> {
        &self.strategy_sum
    }

    /// rebuilds an `InfoSet` from round-tripped persisted sums; used by
    /// strategy-file loaders so a restored table behaves identically to
    /// one still warm from training.
    pub fn from_sums(
        legal: Vec<AbstractAction>,
        regret_sum: BTreeMap<AbstractAction, Utility>,
        strategy_sum: BTreeMap<AbstractAction, Probability>,
    ) -> Self {
        Self {
            legal,
            regret_sum,
            strategy_sum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::AbstractAction::{Call, Check, Fold};

    #[test]
    fn fresh_infoset_plays_uniformly() {
        let info = InfoSet::new(vec![Fold, Check, Call]);
        let strategy = info.current_strategy();
        for p in strategy.values() {
            assert!((*p - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn regret_clipping_recovers_only_after_a_positive_swing() {
        let mut info = InfoSet::new(vec![Fold, Call]);
        let strategy = info.current_strategy();

        let mut negative_swing = BTreeMap::new();
        negative_swing.insert(Fold, 0.0);
        negative_swing.insert(Call, -5.0);
        info.update_regret(&strategy, &negative_swing, 1.0);
        assert_eq!(info.regret_sum()[&Call], 0.0);

        let strategy = info.current_strategy();
        let mut positive_swing = BTreeMap::new();
        positive_swing.insert(Fold, 0.0);
        positive_swing.insert(Call, 3.0);
        info.update_regret(&strategy, &positive_swing, 1.0);
        assert!(info.regret_sum()[&Call] > 0.0);
        assert!(info.current_strategy()[&Call] > 0.0);
    }

    #[test]
    fn average_strategy_sums_to_one() {
        let mut info = InfoSet::new(vec![Fold, Check, Call]);
        let strategy = info.current_strategy();
        info.update_average(&strategy, 1.0);
        let average = info.average_strategy();
        let sum: f32 = average.values().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }
}
