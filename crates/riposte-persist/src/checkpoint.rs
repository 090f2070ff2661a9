use anyhow::{Context, Result};
use riposte_deepcfr::{AdvantageNetwork, NetworkSnapshot, PolicyNetwork, ValueNetwork};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// a full neural checkpoint: every network's parameters, the iteration
/// counter training had reached, and a snapshot of the hyperparameters that
/// produced it (so loading a checkpoint trained under a different config
/// is at least detectable, even though this implementation doesn't refuse
/// to load a mismatched one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub iteration: usize,
    pub advantage_net: NetworkSnapshot,
    pub policy_net: NetworkSnapshot,
    pub value_net: NetworkSnapshot,
    pub config: ConfigSnapshot,
}

/// the config constants fixed at startup that matter for replaying a
/// checkpoint's training run, per the External Interfaces' "config
/// constants fixed at startup" requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub advantage_train_every: usize,
    pub policy_train_every: usize,
    pub reservoir_capacity: usize,
    pub grad_clip_norm: f32,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            advantage_train_every: riposte_core::DEEPCFR_ADVANTAGE_TRAIN_EVERY,
            policy_train_every: riposte_core::DEEPCFR_POLICY_TRAIN_EVERY,
            reservoir_capacity: riposte_core::DEEPCFR_RESERVOIR_CAPACITY,
            grad_clip_norm: riposte_core::DEEPCFR_GRAD_CLIP_NORM,
        }
    }
}

pub fn save_checkpoint(
    iteration: usize,
    advantage_net: &AdvantageNetwork,
    policy_net: &PolicyNetwork,
    value_net: &ValueNetwork,
    path: impl AsRef<Path>,
) -> Result<()> {
    let checkpoint = Checkpoint {
        iteration,
        advantage_net: advantage_net.snapshot(),
        policy_net: policy_net.snapshot(),
        value_net: value_net.snapshot(),
        config: ConfigSnapshot::default(),
    };
    let bytes = serde_json::to_vec(&checkpoint)?;
    std::fs::write(path.as_ref(), bytes)
        .with_context(|| format!("writing checkpoint to {}", path.as_ref().display()))?;
    Ok(())
}

/// per the error taxonomy, checkpoint I/O failure is logged and the run
/// continues rather than aborting; callers should treat an `Err` here as
/// non-fatal and keep training.
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<(usize, AdvantageNetwork, PolicyNetwork, ValueNetwork)> {
    let bytes = std::fs::read(path.as_ref())
        .with_context(|| format!("reading checkpoint from {}", path.as_ref().display()))?;
    let checkpoint: Checkpoint = serde_json::from_slice(&bytes)?;
    Ok((
        checkpoint.iteration,
        AdvantageNetwork::restore(&checkpoint.advantage_net),
        PolicyNetwork::restore(&checkpoint.policy_net),
        ValueNetwork::restore(&checkpoint.value_net),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_checkpoint_round_trips_its_iteration_counter_and_weights() {
        let advantage_net = AdvantageNetwork::new();
        let policy_net = PolicyNetwork::new();
        let value_net = ValueNetwork::new();

        let dir = std::env::temp_dir();
        let path = dir.join(format!("riposte-checkpoint-test-{}.json", std::process::id()));
        save_checkpoint(42, &advantage_net, &policy_net, &value_net, &path).unwrap();
        let (iteration, restored_advantage, _restored_policy, _restored_value) = load_checkpoint(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(iteration, 42);
        let features = [0.2f32; riposte_mccfr::FEATURE_VECTOR_LEN];
        assert_eq!(advantage_net.predict(&features), restored_advantage.predict(&features));
    }

    #[test]
    fn loading_a_missing_checkpoint_is_an_error_not_a_panic() {
        let result = load_checkpoint("/nonexistent/riposte-checkpoint-that-does-not-exist.json");
        assert!(result.is_err());
    }
}
