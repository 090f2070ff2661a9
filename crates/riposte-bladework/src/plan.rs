use riposte_cards::Street;

/// coarse equity/made-hand bucket a hand falls into on a given street, used
/// to pick a line for the rest of the hand before later streets narrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandCategory {
    PremiumValue,
    StrongValue,
    MediumMade,
    StrongDraw,
    WeakDraw,
    Air,
}

impl std::fmt::Display for HandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            HandCategory::PremiumValue => "premium_value",
            HandCategory::StrongValue => "strong_value",
            HandCategory::MediumMade => "medium_made",
            HandCategory::StrongDraw => "strong_draw",
            HandCategory::WeakDraw => "weak_draw",
            HandCategory::Air => "air",
        };
        write!(f, "{s}")
    }
}

/// buckets a made-hand-strength/draw-equity pair into the category that
/// drives the rest of the street-by-street plan.
pub fn categorize_hand(hand_strength: f32, draw_equity: f32) -> HandCategory {
    if hand_strength >= 0.85 {
        HandCategory::PremiumValue
    } else if hand_strength >= 0.65 {
        HandCategory::StrongValue
    } else if hand_strength >= 0.40 {
        HandCategory::MediumMade
    } else if draw_equity >= 0.35 {
        HandCategory::StrongDraw
    } else if draw_equity >= 0.20 {
        HandCategory::WeakDraw
    } else {
        HandCategory::Air
    }
}

/// the action this bot intends to take on one street, in a plan laid out
/// before that street is reached. The plan is advisory: later street logic
/// re-derives the actual decision from fresh board/equity information and
/// may deviate, but the reasoning here explains the default intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    BetForValue,
    BetOrRaise,
    CheckCall,
    CheckFold,
    SemiBluff,
    GiveUp,
}

impl std::fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            PlannedAction::BetForValue => "bet_for_value",
            PlannedAction::BetOrRaise => "bet_or_raise",
            PlannedAction::CheckCall => "check_call",
            PlannedAction::CheckFold => "check_fold",
            PlannedAction::SemiBluff => "semi_bluff",
            PlannedAction::GiveUp => "give_up",
        };
        write!(f, "{s}")
    }
}

/// a street-by-street plan for the rest of the hand, built once a category
/// is assigned and consulted (not blindly followed) as later streets arrive.
#[derive(Debug, Clone)]
pub struct MultiStreetPlan {
    pub category: HandCategory,
    pub flop: PlannedAction,
    pub turn: PlannedAction,
    pub river: PlannedAction,
    pub reasoning: String,
}

/// builds the default plan for a hand category, mirroring the reasoning a
/// human would give for playing each category the way it's played.
pub fn create_multi_street_plan(category: HandCategory) -> MultiStreetPlan {
    let (flop, turn, river, reasoning) = match category {
        HandCategory::PremiumValue => (
            PlannedAction::BetForValue,
            PlannedAction::BetForValue,
            PlannedAction::BetForValue,
            "premium made hand: build the pot on every street".to_string(),
        ),
        HandCategory::StrongValue => (
            PlannedAction::BetForValue,
            PlannedAction::BetOrRaise,
            PlannedAction::BetForValue,
            "strong hand: bet for value, re-evaluate against aggression".to_string(),
        ),
        HandCategory::MediumMade => (
            PlannedAction::CheckCall,
            PlannedAction::CheckCall,
            PlannedAction::CheckFold,
            "medium made hand: pot control, give up to heavy river pressure".to_string(),
        ),
        HandCategory::StrongDraw => (
            PlannedAction::SemiBluff,
            PlannedAction::SemiBluff,
            PlannedAction::CheckFold,
            "strong draw: semi-bluff for fold equity, check back if it misses".to_string(),
        ),
        HandCategory::WeakDraw => (
            PlannedAction::CheckCall,
            PlannedAction::CheckFold,
            PlannedAction::CheckFold,
            "weak draw: take a cheap card, give up once the price rises".to_string(),
        ),
        HandCategory::Air => (
            PlannedAction::CheckFold,
            PlannedAction::GiveUp,
            PlannedAction::GiveUp,
            "no equity: look for a cheap bluff opportunity, otherwise fold".to_string(),
        ),
    };
    MultiStreetPlan {
        category,
        flop,
        turn,
        river,
        reasoning,
    }
}

impl MultiStreetPlan {
    /// the planned action for a specific street; preflop has no plan entry.
    pub fn for_street(&self, street: Street) -> Option<PlannedAction> {
        match street {
            Street::Preflop => None,
            Street::Flop => Some(self.flop),
            Street::Turn => Some(self.turn),
            Street::River => Some(self.river),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_hands_plan_to_bet_every_street() {
        let plan = create_multi_street_plan(categorize_hand(0.9, 0.0));
        assert_eq!(plan.flop, PlannedAction::BetForValue);
        assert_eq!(plan.turn, PlannedAction::BetForValue);
        assert_eq!(plan.river, PlannedAction::BetForValue);
    }

    #[test]
    fn strong_draws_plan_to_semi_bluff_then_give_up() {
        let plan = create_multi_street_plan(categorize_hand(0.20, 0.40));
        assert_eq!(plan.category, HandCategory::StrongDraw);
        assert_eq!(plan.flop, PlannedAction::SemiBluff);
        assert_eq!(plan.river, PlannedAction::CheckFold);
    }

    #[test]
    fn air_has_no_river_hope() {
        let plan = create_multi_street_plan(categorize_hand(0.1, 0.05));
        assert_eq!(plan.category, HandCategory::Air);
        assert_eq!(plan.for_street(Street::River), Some(PlannedAction::GiveUp));
        assert_eq!(plan.for_street(Street::Preflop), None);
    }
}
