use crate::opponent_model::OpponentModel;
use riposte_cards::{tier_of, HandClass};
use riposte_preflop::{PreflopAction, Scenario};

/// overrides the chart's suggested action when villain's observed
/// tendencies make the chart line too loose or too tight: a tight villain
/// who'd otherwise get a free call with our best hands should see a
/// 3-bet instead, and a loose villain 3-betting too light should get called
/// down rather than folded to or 4-bet.
pub fn adjust_for_opponent_preflop(
    chart_action: PreflopAction,
    hand_strength: f32,
    model: &OpponentModel,
) -> PreflopAction {
    if !model.has_enough_sample() {
        return chart_action;
    }
    if model.vpip() < 0.3 && chart_action == PreflopAction::Call && hand_strength >= 0.85 {
        return PreflopAction::ThreeBet;
    }
    if model.vpip() > 0.7 && chart_action == PreflopAction::ThreeBet && hand_strength < 0.85 {
        return PreflopAction::Call;
    }
    chart_action
}

/// quick 0-1 preflop hand-strength heuristic derived from the tier
/// assignment alone, used only to gate the opponent-model override above
/// (the full postflop equity machinery isn't needed preflop).
pub fn get_simple_hand_strength(class: HandClass) -> f32 {
    let tier = tier_of(class) as f32;
    (1.0 - tier / 10.0).clamp(0.0, 1.0)
}

/// chart-driven preflop decision, folding the opponent-model adjustment in
/// on top of the raw chart lookup.
pub fn preflop_decision(class: HandClass, scenario: &Scenario, model: &OpponentModel) -> PreflopAction {
    let tier = tier_of(class);
    let chart_action = riposte_preflop::get_preflop_action(tier, scenario);
    let strength = get_simple_hand_strength(class);
    adjust_for_opponent_preflop(chart_action, strength, model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::Rank;
    use riposte_preflop::{FacingAction, Position};

    fn scenario() -> Scenario {
        Scenario {
            position: Position::BigBlind,
            action_to_hero: FacingAction::Raise,
            raise_size_bb: 2.2,
            stack_bb: 100,
            pot_bb: 3.2,
            num_raises: 1,
            bet_history_bb: [0.0; 3],
        }
    }

    #[test]
    fn unseasoned_model_never_overrides_the_chart() {
        let model = OpponentModel::new();
        let adjusted = adjust_for_opponent_preflop(PreflopAction::Call, 0.9, &model);
        assert_eq!(adjusted, PreflopAction::Call);
    }

    #[test]
    fn aces_always_look_like_a_premium_strength() {
        assert_eq!(get_simple_hand_strength(HandClass::Pair(Rank::Ace)), 1.0);
    }

    #[test]
    fn decision_delegates_to_the_chart() {
        let model = OpponentModel::new();
        let action = preflop_decision(HandClass::Pair(Rank::Ace), &scenario(), &model);
        assert_eq!(action, PreflopAction::ThreeBet);
    }
}
