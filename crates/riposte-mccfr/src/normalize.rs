use riposte_core::{Probability, STRATEGY_NORMALIZE_EPSILON};
use std::collections::BTreeMap;

/// centralizes the floating-point sanitation every sampler in this crate
/// needs: clip negative weights to zero, zero out anything below `eps`, then
/// renormalize so the result sums to 1 over its keys. Falls back to a
/// uniform distribution over the keys when every weight sanitizes to zero.
pub fn normalize<K: Ord + Copy>(
    weights: &BTreeMap<K, Probability>,
    eps: Probability,
) -> BTreeMap<K, Probability> {
    if weights.is_empty() {
        return BTreeMap::new();
    }
    let clipped: BTreeMap<K, Probability> = weights
        .iter()
        .map(|(&k, &w)| (k, if w > eps { w } else { 0.0 }))
        .collect();
    let sum: Probability = clipped.values().sum();
    if sum <= eps {
        let share = 1.0 / clipped.len() as Probability;
        return clipped.into_iter().map(|(k, _)| (k, share)).collect();
    }
    clipped.into_iter().map(|(k, w)| (k, w / sum)).collect()
}

/// `normalize` with this crate's default epsilon.
pub fn normalize_default<K: Ord + Copy>(weights: &BTreeMap<K, Probability>) -> BTreeMap<K, Probability> {
    normalize(weights, STRATEGY_NORMALIZE_EPSILON)
}
