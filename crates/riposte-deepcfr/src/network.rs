use ndarray::{Array1, Array2, Axis};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// a single-hidden-layer feedforward network with tanh activation, trained
/// by plain SGD with joint gradient-norm clipping. Every Deep-CFR network
/// (value, advantage, policy) is one of these with a different input/output
/// shape and a different loss on top of `train_step`'s raw squared-error
/// gradient.
pub struct FeedForward {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

/// a flat, serializable dump of a `FeedForward`'s parameters — the model
/// half of a neural checkpoint. Plain SGD here has no per-parameter
/// optimizer state beyond the learning rate itself, so a checkpoint's
/// "optimizer state" is just that scalar, carried alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub input_dim: usize,
    pub hidden_dim: usize,
    pub output_dim: usize,
    pub w1: Vec<f32>,
    pub b1: Vec<f32>,
    pub w2: Vec<f32>,
    pub b2: Vec<f32>,
}

impl FeedForward {
    pub fn new(input_dim: usize, hidden_dim: usize, output_dim: usize) -> Self {
        let mut rng = rand::rng();
        let fan_in = Normal::new(0.0, (1.0 / input_dim as f32).sqrt()).expect("finite stddev");
        let fan_hidden = Normal::new(0.0, (1.0 / hidden_dim as f32).sqrt()).expect("finite stddev");
        Self {
            w1: Array2::from_shape_fn((hidden_dim, input_dim), |_| fan_in.sample(&mut rng)),
            b1: Array1::zeros(hidden_dim),
            w2: Array2::from_shape_fn((output_dim, hidden_dim), |_| fan_hidden.sample(&mut rng)),
            b2: Array1::zeros(output_dim),
        }
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        let (hidden_dim, input_dim) = self.w1.dim();
        let (output_dim, _) = self.w2.dim();
        NetworkSnapshot {
            input_dim,
            hidden_dim,
            output_dim,
            w1: self.w1.iter().copied().collect(),
            b1: self.b1.iter().copied().collect(),
            w2: self.w2.iter().copied().collect(),
            b2: self.b2.iter().copied().collect(),
        }
    }

    pub fn restore(snapshot: &NetworkSnapshot) -> Self {
        Self {
            w1: Array2::from_shape_vec((snapshot.hidden_dim, snapshot.input_dim), snapshot.w1.clone())
                .expect("snapshot w1 shape matches its recorded dimensions"),
            b1: Array1::from_vec(snapshot.b1.clone()),
            w2: Array2::from_shape_vec((snapshot.output_dim, snapshot.hidden_dim), snapshot.w2.clone())
                .expect("snapshot w2 shape matches its recorded dimensions"),
            b2: Array1::from_vec(snapshot.b2.clone()),
        }
    }

    fn hidden(&self, input: &Array1<f32>) -> Array1<f32> {
        (self.w1.dot(input) + &self.b1).mapv(f32::tanh)
    }

    /// raw linear output of the second layer; callers apply softmax or take
    /// it as-is depending on what the network represents.
    pub fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        self.w2.dot(&self.hidden(input)) + &self.b2
    }

    /// one SGD step minimizing squared error between `forward(input)` and
    /// `target`. Returns the pre-step loss. Gradients from both layers are
    /// clipped by their combined L2 norm, not layer-by-layer, so a single
    /// runaway gradient can't dodge the clip by hiding in the other layer.
    pub fn train_step(
        &mut self,
        input: &Array1<f32>,
        target: &Array1<f32>,
        learning_rate: f32,
        grad_clip_norm: f32,
    ) -> f32 {
        let h = self.hidden(input);
        let output = self.w2.dot(&h) + &self.b2;
        let error = &output - target;
        let loss = error.mapv(|e| e * e).sum() / error.len() as f32;
        let grad_output = &error * (2.0 / error.len() as f32);
        self.backprop(input, &h, &grad_output, learning_rate, grad_clip_norm);
        loss
    }

    /// one SGD step treating `forward(input)` as logits for a categorical
    /// distribution and minimizing the KL divergence to `target_distribution`
    /// (a probability vector summing to 1). Softmax-then-cross-entropy has
    /// the well-known gradient `predicted - target`, which also happens to
    /// be exactly the KL-divergence gradient since the two losses differ
    /// only by the target's own (input-independent) entropy term. Returns
    /// the pre-step KL divergence.
    pub fn train_step_distribution(
        &mut self,
        input: &Array1<f32>,
        target_distribution: &Array1<f32>,
        learning_rate: f32,
        grad_clip_norm: f32,
    ) -> f32 {
        let h = self.hidden(input);
        let logits = self.w2.dot(&h) + &self.b2;
        let predicted = softmax(&logits);
        let kl = predicted
            .iter()
            .zip(target_distribution.iter())
            .filter(|(_, &t)| t > 0.0)
            .map(|(&p, &t)| t * ((t.max(1e-12)) / p.max(1e-12)).ln())
            .sum();
        let grad_output = &predicted - target_distribution;
        self.backprop(input, &h, &grad_output, learning_rate, grad_clip_norm);
        kl
    }

    fn backprop(
        &mut self,
        input: &Array1<f32>,
        h: &Array1<f32>,
        grad_output: &Array1<f32>,
        learning_rate: f32,
        grad_clip_norm: f32,
    ) {
        let grad_w2 = grad_output
            .clone()
            .insert_axis(Axis(1))
            .dot(&h.clone().insert_axis(Axis(0)));
        let grad_b2 = grad_output.clone();

        let grad_hidden = self.w2.t().dot(grad_output) * h.mapv(|v| 1.0 - v * v);
        let grad_w1 = grad_hidden
            .clone()
            .insert_axis(Axis(1))
            .dot(&input.clone().insert_axis(Axis(0)));
        let grad_b1 = grad_hidden;

        let norm_sq = grad_w1.mapv(|v| v * v).sum()
            + grad_w2.mapv(|v| v * v).sum()
            + grad_b1.mapv(|v| v * v).sum()
            + grad_b2.mapv(|v| v * v).sum();
        let norm = norm_sq.sqrt();
        let scale = if norm > grad_clip_norm { grad_clip_norm / norm } else { 1.0 };
        let step = scale * learning_rate;

        self.w1 = &self.w1 - &(grad_w1 * step);
        self.b1 = &self.b1 - &(grad_b1 * step);
        self.w2 = &self.w2 - &(grad_w2 * step);
        self.b2 = &self.b2 - &(grad_b2 * step);
    }
}

/// numerically stable softmax over a raw logit vector.
pub fn softmax(logits: &Array1<f32>) -> Array1<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let shifted = logits.mapv(|v| (v - max).exp());
    let sum = shifted.sum();
    if sum > 0.0 && sum.is_finite() {
        shifted / sum
    } else {
        Array1::from_elem(logits.len(), 1.0 / logits.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_produces_the_requested_output_dimension() {
        let net = FeedForward::new(4, 8, 3);
        let input = Array1::from_vec(vec![0.1, 0.2, 0.3, 0.4]);
        assert_eq!(net.forward(&input).len(), 3);
    }

    #[test]
    fn training_reduces_loss_on_a_fixed_example() {
        let mut net = FeedForward::new(4, 8, 1);
        let input = Array1::from_vec(vec![0.1, -0.2, 0.3, 0.4]);
        let target = Array1::from_vec(vec![1.0]);
        let first = net.train_step(&input, &target, 0.1, 1.0);
        let mut last = first;
        for _ in 0..50 {
            last = net.train_step(&input, &target, 0.1, 1.0);
        }
        assert!(last < first);
    }

    #[test]
    fn softmax_sums_to_one() {
        let logits = Array1::from_vec(vec![1.0, 2.0, -1.0, 0.5]);
        let probabilities = softmax(&logits);
        assert!((probabilities.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn softmax_falls_back_to_uniform_on_non_finite_input() {
        let logits = Array1::from_vec(vec![f32::NAN, 1.0]);
        let probabilities = softmax(&logits);
        assert_eq!(probabilities[0], 0.5);
    }

    #[test]
    fn snapshot_and_restore_reproduce_identical_forward_output() {
        let net = FeedForward::new(4, 8, 3);
        let input = Array1::from_vec(vec![0.1, 0.2, 0.3, 0.4]);
        let before = net.forward(&input);
        let restored = FeedForward::restore(&net.snapshot());
        let after = restored.forward(&input);
        assert_eq!(before, after);
    }

    #[test]
    fn distribution_training_reduces_kl_on_a_fixed_example() {
        let mut net = FeedForward::new(4, 8, 3);
        let input = Array1::from_vec(vec![0.1, -0.2, 0.3, 0.4]);
        let target = Array1::from_vec(vec![0.7, 0.2, 0.1]);
        let first = net.train_step_distribution(&input, &target, 0.1, 1.0);
        let mut last = first;
        for _ in 0..50 {
            last = net.train_step_distribution(&input, &target, 0.1, 1.0);
        }
        assert!(last < first);
    }
}
