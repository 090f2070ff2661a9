use crate::network::FeedForward;
use ndarray::Array1;
use riposte_abstraction::AbstractAction;
use riposte_core::{Probability, Utility};
use riposte_mccfr::FEATURE_VECTOR_LEN;
use std::collections::BTreeMap;

const HIDDEN_DIM: usize = 64;
const LEARNING_RATE: f32 = 1e-3;

/// number of entries in the fixed action alphabet; the advantage and policy
/// networks both emit one output per entry regardless of which ones are
/// legal at a given info-set.
pub const ACTION_COUNT: usize = AbstractAction::ALPHABET.len();

/// one training sample: a feature vector and the per-action regret vector
/// that vector should predict (zero in positions that weren't legal).
pub struct AdvantageSample {
    pub features: [f32; FEATURE_VECTOR_LEN],
    pub regrets: [f32; ACTION_COUNT],
}

fn action_index(action: AbstractAction) -> usize {
    AbstractAction::ALPHABET
        .iter()
        .position(|&a| a == action)
        .expect("action is a member of the fixed alphabet")
}

pub fn regret_vector(regrets: &BTreeMap<AbstractAction, Utility>) -> [f32; ACTION_COUNT] {
    let mut out = [0.0f32; ACTION_COUNT];
    for (&action, &regret) in regrets {
        out[action_index(action)] = regret;
    }
    out
}

/// predicts, for a legal action subset, the advantage (instantaneous regret)
/// network's estimate, and trains on batches of `AdvantageSample`s using
/// mean-squared error against z-scored targets: the regression target
/// scale varies wildly between info-sets near a showdown and ones deep in a
/// betting tree, and z-scoring the batch keeps gradient magnitude stable
/// across that range instead of letting large-pot samples dominate.
pub struct AdvantageNetwork {
    net: FeedForward,
}

impl AdvantageNetwork {
    pub fn new() -> Self {
        Self {
            net: FeedForward::new(FEATURE_VECTOR_LEN, HIDDEN_DIM, ACTION_COUNT),
        }
    }

    pub fn snapshot(&self) -> crate::network::NetworkSnapshot {
        self.net.snapshot()
    }

    pub fn restore(snapshot: &crate::network::NetworkSnapshot) -> Self {
        Self {
            net: FeedForward::restore(snapshot),
        }
    }

    pub fn predict(&self, features: &[f32; FEATURE_VECTOR_LEN]) -> [f32; ACTION_COUNT] {
        let input = Array1::from_vec(features.to_vec());
        let output = self.net.forward(&input);
        let mut out = [0.0f32; ACTION_COUNT];
        out.copy_from_slice(output.as_slice().expect("contiguous output"));
        out
    }

    pub fn train_batch(&mut self, samples: &[&AdvantageSample], grad_clip_norm: f32) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let all_values: Vec<f32> = samples.iter().flat_map(|s| s.regrets.iter().copied()).collect();
        let mean = all_values.iter().sum::<f32>() / all_values.len() as f32;
        let variance = all_values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / all_values.len() as f32;
        let std = variance.sqrt().max(1e-6);

        let mut total_loss = 0.0;
        for sample in samples {
            let input = Array1::from_vec(sample.features.to_vec());
            let target = Array1::from_vec(sample.regrets.iter().map(|&r| (r - mean) / std).collect());
            total_loss += self.net.train_step(&input, &target, LEARNING_RATE, grad_clip_norm);
        }
        total_loss / samples.len() as f32
    }
}

impl Default for AdvantageNetwork {
    fn default() -> Self {
        Self::new()
    }
}

/// renormalizes network-predicted advantages, restricted to the legal
/// actions at this info-set, into a strategy the same way tabular CFR+
/// regret-matching would: clip to non-negative, normalize, uniform
/// fallback if every legal advantage is non-positive.
pub fn advantages_to_strategy(
    advantages: &[f32; ACTION_COUNT],
    legal: &[AbstractAction],
) -> BTreeMap<AbstractAction, Probability> {
    let positive: BTreeMap<AbstractAction, Probability> = legal
        .iter()
        .map(|&a| (a, advantages[action_index(a)].max(0.0)))
        .collect();
    riposte_mccfr::normalize_default(&positive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::AbstractAction::{Call, Check, Fold};

    #[test]
    fn regret_vector_places_values_at_the_right_index() {
        let mut regrets = BTreeMap::new();
        regrets.insert(Call, 2.5);
        let vector = regret_vector(&regrets);
        assert_eq!(vector[action_index(Call)], 2.5);
        assert_eq!(vector[action_index(Fold)], 0.0);
    }

    #[test]
    fn predict_returns_the_fixed_action_count() {
        let net = AdvantageNetwork::new();
        let features = [0.0f32; FEATURE_VECTOR_LEN];
        assert_eq!(net.predict(&features).len(), ACTION_COUNT);
    }

    #[test]
    fn advantages_to_strategy_is_uniform_when_all_non_positive() {
        let advantages = [-1.0; ACTION_COUNT];
        let legal = vec![Fold, Check, Call];
        let strategy = advantages_to_strategy(&advantages, &legal);
        for &action in &legal {
            assert!((strategy[&action] - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn training_batch_reduces_average_loss() {
        let mut net = AdvantageNetwork::new();
        let sample = AdvantageSample {
            features: [0.3; FEATURE_VECTOR_LEN],
            regrets: [1.0; ACTION_COUNT],
        };
        let refs = vec![&sample; 8];
        let first = net.train_batch(&refs, 1.0);
        let mut last = first;
        for _ in 0..20 {
            last = net.train_batch(&refs, 1.0);
        }
        assert!(last <= first);
    }
}
