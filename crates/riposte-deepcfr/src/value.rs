use crate::network::FeedForward;
use ndarray::Array1;
use riposte_core::Utility;
use riposte_mccfr::FEATURE_VECTOR_LEN;

const HIDDEN_DIM: usize = 32;
const LEARNING_RATE: f32 = 1e-3;

/// a single training sample for the scalar value network: features paired
/// with the realized (or bootstrapped) utility observed from that info-set.
pub struct ValueSample {
    pub features: [f32; FEATURE_VECTOR_LEN],
    pub utility: Utility,
}

/// predicts a scalar expected value for a feature vector, trained by plain
/// mean-squared error. Used to sanity-check advantage-network predictions
/// and as an auxiliary evaluation signal during training; the bot itself
/// only ever samples from the policy network or the tabular average
/// strategy, never from this network directly.
pub struct ValueNetwork {
    net: FeedForward,
}

impl ValueNetwork {
    pub fn new() -> Self {
        Self {
            net: FeedForward::new(FEATURE_VECTOR_LEN, HIDDEN_DIM, 1),
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

    pub fn predict(&self, features: &[f32; FEATURE_VECTOR_LEN]) -> Utility {
        let input = Array1::from_vec(features.to_vec());
        self.net.forward(&input)[0]
    }

    pub fn train_batch(&mut self, samples: &[&ValueSample], grad_clip_norm: f32) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let mut total_loss = 0.0;
        for sample in samples {
            let input = Array1::from_vec(sample.features.to_vec());
            let target = Array1::from_vec(vec![sample.utility]);
            total_loss += self.net.train_step(&input, &target, LEARNING_RATE, grad_clip_norm);
        }
        total_loss / samples.len() as f32
    }
}

impl Default for ValueNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_returns_a_finite_scalar() {
        let net = ValueNetwork::new();
        let features = [0.1f32; FEATURE_VECTOR_LEN];
        assert!(net.predict(&features).is_finite());
    }

    #[test]
    fn training_batch_reduces_average_loss() {
        let mut net = ValueNetwork::new();
        let sample = ValueSample {
            features: [0.4; FEATURE_VECTOR_LEN],
            utility: 12.0,
        };
        let refs = vec![&sample; 8];
        let first = net.train_batch(&refs, 1.0);
        let mut last = first;
        for _ in 0..30 {
            last = net.train_batch(&refs, 1.0);
        }
        assert!(last < first);
    }
}
