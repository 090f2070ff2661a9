use crate::plan::MultiStreetPlan;
use riposte_engine::{Action, ActionRecord, BettingRound};

/// running tally of villain tendencies, owned by the bot instance and
/// updated from the engine's `action_history` as new entries appear. Not
/// part of `GameState` — the engine has no notion of a bot watching it.
#[derive(Debug, Clone, Default)]
pub struct OpponentModel {
    hands_played: usize,
    vpip: u32,
    vpip_opportunities: u32,
    pfr: u32,
    pfr_opportunities: u32,
    cbet: u32,
    cbet_opportunities: u32,
    fold_to_cbet: u32,
    fold_to_cbet_opportunities: u32,
    last_seen_len: usize,
    plan_memo: Option<((usize, usize), MultiStreetPlan)>,
}

impl OpponentModel {
    pub fn new() -> OpponentModel {
        OpponentModel::default()
    }

    pub fn hands_played(&self) -> usize {
        self.hands_played
    }

    /// `vpip / vpip_opportunities`, 0.5 (unbiased) before there's a sample.
    pub fn vpip(&self) -> f32 {
        ratio(self.vpip, self.vpip_opportunities, 0.5)
    }

    pub fn pfr(&self) -> f32 {
        ratio(self.pfr, self.pfr_opportunities, 0.3)
    }

    pub fn fold_to_cbet(&self) -> f32 {
        ratio(self.fold_to_cbet, self.fold_to_cbet_opportunities, 0.5)
    }

    pub fn has_enough_sample(&self) -> bool {
        self.vpip_opportunities >= 5
    }

    /// call once per new hand: rotates the dealer-relative bookkeeping.
    pub fn on_new_hand(&mut self) {
        self.hands_played += 1;
        self.plan_memo = None;
    }

    /// the multi-street plan for the current hand, built once at the first
    /// postflop decision and reused on later streets. `key` is
    /// `(dealer_pos, hand_count)`; a key change (a new hand started without
    /// going through `on_new_hand`, e.g. `prepare_next_hand`) invalidates
    /// the cached plan instead of serving a stale one.
    pub fn plan_for(
        &mut self,
        key: (usize, usize),
        category: crate::plan::HandCategory,
    ) -> &MultiStreetPlan {
        let stale = match &self.plan_memo {
            Some((memo_key, plan)) => *memo_key != key || plan.category != category,
            None => true,
        };
        if stale {
            self.plan_memo = Some((key, crate::plan::create_multi_street_plan(category)));
        }
        &self.plan_memo.as_ref().expect("just set above").1
    }

    /// observes every `villain`-authored entry in `history` that hasn't
    /// been seen yet. `villain` is the seat index that is NOT this bot.
    pub fn observe(&mut self, history: &[ActionRecord], villain: usize) {
        for record in history.iter().skip(self.last_seen_len) {
            if record.player == villain {
                self.observe_one(record);
            }
        }
        self.last_seen_len = history.len();
    }

    fn observe_one(&mut self, record: &ActionRecord) {
        if record.round == riposte_cards::Street::Preflop {
            self.vpip_opportunities += 1;
            if matches!(record.action, Action::Call | Action::Raise(_)) {
                self.vpip += 1;
            }
            if matches!(record.action, Action::Raise(_)) {
                self.pfr += 1;
                self.pfr_opportunities += 1;
            }
        } else if record.round == riposte_cards::Street::Flop {
            self.cbet_opportunities += 1;
            if matches!(record.action, Action::Raise(_)) {
                self.cbet += 1;
            }
            if matches!(record.action, Action::Fold) {
                self.fold_to_cbet_opportunities += 1;
                self.fold_to_cbet += 1;
            }
        }
    }
}

fn ratio(num: u32, denom: u32, default: f32) -> f32 {
    if denom == 0 {
        default
    } else {
        num as f32 / denom as f32
    }
}

/// betting-round-qualified convenience, since `OpponentModel` only needs
/// `BettingRound` for the caller's own bookkeeping.
pub fn is_postflop(round: BettingRound) -> bool {
    !matches!(round, BettingRound::Preflop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::Street;
    use riposte_core::Chips;

    fn record(player: usize, action: Action, round: Street) -> ActionRecord {
        ActionRecord {
            player,
            action,
            amount: 0 as Chips,
            round,
            pot_after: 0,
        }
    }

    #[test]
    fn vpip_counts_calls_and_raises_preflop() {
        let mut model = OpponentModel::new();
        let history = vec![
            record(1, Action::Call, Street::Preflop),
            record(0, Action::Check, Street::Preflop),
        ];
        model.observe(&history, 1);
        assert_eq!(model.vpip(), 1.0);
    }

    #[test]
    fn fresh_model_has_no_sample() {
        let model = OpponentModel::new();
        assert!(!model.has_enough_sample());
    }

    #[test]
    fn plan_is_memoized_for_the_same_hand() {
        use crate::plan::HandCategory;

        let mut model = OpponentModel::new();
        let first = model.plan_for((0, 3), HandCategory::StrongDraw) as *const _;
        let second = model.plan_for((0, 3), HandCategory::StrongDraw) as *const _;
        assert_eq!(first, second, "same (dealer_pos, hand_count) key reuses the cached plan");
        assert_eq!(model.plan_for((0, 3), HandCategory::StrongDraw).category, HandCategory::StrongDraw);
    }

    #[test]
    fn plan_is_invalidated_by_a_new_hand_key() {
        use crate::plan::HandCategory;

        let mut model = OpponentModel::new();
        model.plan_for((0, 3), HandCategory::Air);
        let plan = model.plan_for((1, 4), HandCategory::PremiumValue);
        assert_eq!(plan.category, HandCategory::PremiumValue);
    }

    #[test]
    fn on_new_hand_clears_the_memoized_plan() {
        use crate::plan::HandCategory;

        let mut model = OpponentModel::new();
        model.plan_for((0, 3), HandCategory::Air);
        model.on_new_hand();
        assert!(model.plan_memo.is_none());
    }
}
