use crate::advantage::ACTION_COUNT;
use crate::network::{softmax, FeedForward};
use ndarray::Array1;
use riposte_abstraction::AbstractAction;
use riposte_core::Probability;
use riposte_mccfr::FEATURE_VECTOR_LEN;
use std::collections::BTreeMap;

const HIDDEN_DIM: usize = 64;
const LEARNING_RATE: f32 = 1e-3;

/// one training sample: a feature vector and the average-strategy
/// distribution it should predict, over the full fixed alphabet (zero
/// outside the info-set's legal subset).
pub struct PolicySample {
    pub features: [f32; FEATURE_VECTOR_LEN],
    pub average_strategy: [f32; ACTION_COUNT],
}

fn action_index(action: AbstractAction) -> usize {
    AbstractAction::ALPHABET
        .iter()
        .position(|&a| a == action)
        .expect("action is a member of the fixed alphabet")
}

pub fn strategy_vector(strategy: &BTreeMap<AbstractAction, Probability>) -> [f32; ACTION_COUNT] {
    let mut out = [0.0f32; ACTION_COUNT];
    for (&action, &p) in strategy {
        out[action_index(action)] = p;
    }
    out
}

/// the average-policy network: predicts a softmax distribution over the
/// full action alphabet and trains against target distributions by KL
/// divergence, which is the natural loss when both sides are probability
/// vectors rather than point estimates.
pub struct PolicyNetwork {
    net: FeedForward,
}

impl PolicyNetwork {
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

    /// predicts a strategy restricted to `legal`, renormalized after masking
    /// out illegal actions.
    pub fn predict(
        &self,
        features: &[f32; FEATURE_VECTOR_LEN],
        legal: &[AbstractAction],
    ) -> BTreeMap<AbstractAction, Probability> {
        let input = Array1::from_vec(features.to_vec());
        let logits = self.net.forward(&input);
        let distribution = softmax(&logits);
        let masked: BTreeMap<AbstractAction, Probability> = legal
            .iter()
            .map(|&a| (a, distribution[action_index(a)]))
            .collect();
        riposte_mccfr::normalize_default(&masked)
    }

    pub fn train_batch(&mut self, samples: &[&PolicySample], grad_clip_norm: f32) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let mut total_kl = 0.0;
        for sample in samples {
            let input = Array1::from_vec(sample.features.to_vec());
            let target = Array1::from_vec(sample.average_strategy.to_vec());
            total_kl += self.net.train_step_distribution(&input, &target, LEARNING_RATE, grad_clip_norm);
        }
        total_kl / samples.len() as f32
    }
}

impl Default for PolicyNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::AbstractAction::{Call, Check, Fold};

    #[test]
    fn strategy_vector_places_probability_at_the_right_index() {
        let mut strategy = BTreeMap::new();
        strategy.insert(Call, 0.6);
        let vector = strategy_vector(&strategy);
        assert_eq!(vector[action_index(Call)], 0.6);
    }

    #[test]
    fn predict_renormalizes_over_the_legal_subset() {
        let net = PolicyNetwork::new();
        let features = [0.1f32; FEATURE_VECTOR_LEN];
        let legal = vec![Fold, Check, Call];
        let strategy = net.predict(&features, &legal);
        let total: f32 = strategy.values().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn training_batch_reduces_average_kl() {
        let mut net = PolicyNetwork::new();
        let mut target = [0.0f32; ACTION_COUNT];
        target[action_index(Call)] = 1.0;
        let sample = PolicySample {
            features: [0.2; FEATURE_VECTOR_LEN],
            average_strategy: target,
        };
        let refs = vec![&sample; 8];
        let first = net.train_batch(&refs, 1.0);
        let mut last = first;
        for _ in 0..50 {
            last = net.train_batch(&refs, 1.0);
        }
        assert!(last < first);
    }
}
