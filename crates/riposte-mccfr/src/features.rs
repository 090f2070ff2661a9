use riposte_abstraction::AbstractAction;
use riposte_cards::Street;

/// fixed length of the feature vector fed to the Deep-CFR networks. Every
/// producer and consumer of a feature vector must agree on this constant;
/// a mismatch is a programmer bug, not a runtime condition to recover from.
///
/// layout: one-hot street (4) + card_bucket/200 (1) + pot_bucket/20 (1)
/// + pot_odds (1) + SPR (1) + 7 clipped history-category counts (7)
/// + history length/20 (1) + position (1) = 17.
pub const FEATURE_VECTOR_LEN: usize = 17;

/// the seven action categories the history-count features are bucketed
/// into, collapsing the ten-entry action alphabet down to the granularity
/// the feature vector actually needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryCategory {
    Fold,
    Check,
    Call,
    SmallRaise,
    MediumRaise,
    LargeRaise,
    AllIn,
}

const HISTORY_CATEGORIES: [HistoryCategory; 7] = [
    HistoryCategory::Fold,
    HistoryCategory::Check,
    HistoryCategory::Call,
    HistoryCategory::SmallRaise,
    HistoryCategory::MediumRaise,
    HistoryCategory::LargeRaise,
    HistoryCategory::AllIn,
];

fn categorize(action: AbstractAction) -> HistoryCategory {
    match action {
        AbstractAction::Fold => HistoryCategory::Fold,
        AbstractAction::Check => HistoryCategory::Check,
        AbstractAction::Call => HistoryCategory::Call,
        AbstractAction::Raise0_35 | AbstractAction::Raise0_7 => HistoryCategory::SmallRaise,
        AbstractAction::Raise1_0 | AbstractAction::Raise1_1 => HistoryCategory::MediumRaise,
        AbstractAction::Raise3_0 | AbstractAction::Raise5_0 => HistoryCategory::LargeRaise,
        AbstractAction::AllIn => HistoryCategory::AllIn,
    }
}

fn street_one_hot(street: Street) -> [f32; 4] {
    let mut one_hot = [0.0; 4];
    let index = match street {
        Street::Preflop => 0,
        Street::Flop => 1,
        Street::Turn => 2,
        Street::River => 3,
    };
    one_hot[index] = 1.0;
    one_hot
}

/// everything `build_features` needs, kept separate from the engine's own
/// `GameState` so this crate doesn't depend on `riposte-engine`.
pub struct FeatureInputs<'a> {
    pub street: Street,
    pub card_bucket_index: usize,
    pub pot_bucket: u8,
    pub pot_odds: f32,
    pub spr: f32,
    pub history: &'a [AbstractAction],
    pub in_position: bool,
}

/// builds the fixed-length feature vector consumed by the Deep-CFR networks.
pub fn build_features(inputs: &FeatureInputs) -> [f32; FEATURE_VECTOR_LEN] {
    let mut features = [0.0f32; FEATURE_VECTOR_LEN];
    let street_bits = street_one_hot(inputs.street);
    features[0..4].copy_from_slice(&street_bits);
    features[4] = inputs.card_bucket_index as f32 / 200.0;
    features[5] = inputs.pot_bucket as f32 / 20.0;
    features[6] = inputs.pot_odds;
    features[7] = inputs.spr;

    for (i, category) in HISTORY_CATEGORIES.iter().enumerate() {
        let count = inputs
            .history
            .iter()
            .filter(|&&action| categorize(action) == *category)
            .count();
        features[8 + i] = count.min(5) as f32 / 5.0;
    }

    features[15] = (inputs.history.len().min(20)) as f32 / 20.0;
    features[16] = if inputs.in_position { 1.0 } else { 0.0 };
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_vector_has_the_contractual_length() {
        let inputs = FeatureInputs {
            street: Street::Flop,
            card_bucket_index: 10,
            pot_bucket: 3,
            pot_odds: 0.33,
            spr: 4.0,
            history: &[AbstractAction::Raise3_0, AbstractAction::Call],
            in_position: true,
        };
        let features = build_features(&inputs);
        assert_eq!(features.len(), FEATURE_VECTOR_LEN);
    }

    #[test]
    fn street_one_hot_is_exclusive() {
        let inputs = FeatureInputs {
            street: Street::River,
            card_bucket_index: 0,
            pot_bucket: 0,
            pot_odds: 0.0,
            spr: 0.0,
            history: &[],
            in_position: false,
        };
        let features = build_features(&inputs);
        assert_eq!(&features[0..4], &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn history_counts_clip_at_five() {
        let history = vec![AbstractAction::Call; 9];
        let inputs = FeatureInputs {
            street: Street::Turn,
            card_bucket_index: 0,
            pot_bucket: 0,
            pot_odds: 0.0,
            spr: 0.0,
            history: &history,
            in_position: false,
        };
        let features = build_features(&inputs);
        let call_index = 8 + 2; // Fold, Check, Call
        assert_eq!(features[call_index], 1.0);
    }
}
