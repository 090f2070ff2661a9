//! Preflop chart oracle (C4): scenario-keyed decision tables over the
//! 11-tier hand table from `riposte-cards`, ported from the bet-size and
//! tier cutoffs of the hand-coded Python preflop charts this was distilled
//! from.

use riposte_cards::Tier;

/// heads-up preflop seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Button, // small blind, heads-up
    BigBlind,
}

/// what hero is facing before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingAction {
    None,
    Limp,
    Raise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreflopAction {
    Fold,
    Check,
    Call,
    Raise,
    ThreeBet,
    FourBet,
    FiveBet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackDepth {
    Short,
    Medium,
    Deep,
}

fn stack_depth(stack_bb: u32) -> StackDepth {
    if stack_bb <= 25 {
        StackDepth::Short
    } else if stack_bb <= 60 {
        StackDepth::Medium
    } else {
        StackDepth::Deep
    }
}

/// bet-size bucket, derived from the multiple over the previous bet (or the
/// absolute BB size for an initial raise, when `previous_bb == 1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeBucket {
    MinRaise,
    StandardLow,
    Standard,
    Large,
    Overbet,
}

fn categorize_bet_size(bet_size_bb: f32, previous_bb: f32) -> SizeBucket {
    let previous_bb = if previous_bb <= 0.0 { 1.0 } else { previous_bb };
    let multiple = bet_size_bb / previous_bb;
    if multiple <= 2.5 {
        SizeBucket::MinRaise
    } else if multiple <= 3.8 {
        SizeBucket::StandardLow
    } else if multiple <= 6.0 {
        SizeBucket::Standard
    } else if multiple <= 12.0 {
        SizeBucket::Large
    } else {
        SizeBucket::Overbet
    }
}

/// the full scenario input to the oracle.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub position: Position,
    pub action_to_hero: FacingAction,
    pub raise_size_bb: f32,
    pub stack_bb: u32,
    pub pot_bb: f32,
    pub num_raises: u32,
    /// `[original_raise, 3bet, 4bet, ...]`, whichever prefix is known.
    pub bet_history_bb: [f32; 3],
}

struct ThreeBetRange {
    call: Tier,
    four_bet: Tier,
}
fn sb_vs_3bet_ranges(bucket: SizeBucket) -> ThreeBetRange {
    match bucket {
        SizeBucket::MinRaise => ThreeBetRange { call: 6, four_bet: 3 },
        SizeBucket::StandardLow => ThreeBetRange { call: 4, four_bet: 1 },
        SizeBucket::Standard => ThreeBetRange { call: 3, four_bet: 0 },
        SizeBucket::Large => ThreeBetRange { call: 1, four_bet: 0 },
        SizeBucket::Overbet => ThreeBetRange { call: 1, four_bet: 0 },
    }
}

struct DefenseRange {
    call: Tier,
    three_bet: Tier,
}
fn bb_defense_ranges(bucket: SizeBucket) -> DefenseRange {
    match bucket {
        SizeBucket::MinRaise => DefenseRange { call: 7, three_bet: 3 },
        SizeBucket::StandardLow => DefenseRange { call: 6, three_bet: 3 },
        SizeBucket::Standard => DefenseRange { call: 5, three_bet: 2 },
        SizeBucket::Large => DefenseRange { call: 3, three_bet: 2 },
        SizeBucket::Overbet => DefenseRange { call: 1, three_bet: 0 },
    }
}

struct FourBetRange {
    call: Option<Tier>,
    five_bet: Tier,
}
fn bb_vs_4bet_ranges(bucket: SizeBucket) -> FourBetRange {
    match bucket {
        SizeBucket::StandardLow => FourBetRange { call: Some(1), five_bet: 0 },
        SizeBucket::Standard => FourBetRange { call: Some(1), five_bet: 0 },
        SizeBucket::Large | SizeBucket::Overbet => FourBetRange { call: None, five_bet: 0 },
        SizeBucket::MinRaise => FourBetRange { call: Some(1), five_bet: 0 },
    }
}

fn sb_vs_5bet_call_tier(bucket: SizeBucket) -> Tier {
    match bucket {
        SizeBucket::MinRaise => 2,
        SizeBucket::StandardLow => 1,
        SizeBucket::Standard => 1,
        SizeBucket::Large => 0,
        SizeBucket::Overbet => 0,
    }
}

fn sb_rfi_max_tier(depth: StackDepth) -> Tier {
    match depth {
        StackDepth::Short => 7,
        StackDepth::Medium => 8,
        StackDepth::Deep => 8,
    }
}

const BB_VS_LIMP_RAISE_TIER: Tier = 6;

fn sb_first_action(tier: Tier, stack_bb: u32) -> PreflopAction {
    if tier <= sb_rfi_max_tier(stack_depth(stack_bb)) {
        PreflopAction::Raise
    } else {
        PreflopAction::Fold
    }
}

fn bb_vs_sb_limp(tier: Tier) -> PreflopAction {
    if tier <= BB_VS_LIMP_RAISE_TIER {
        PreflopAction::Raise
    } else {
        PreflopAction::Check
    }
}

fn bb_vs_sb_raise(tier: Tier, raise_size_bb: f32) -> PreflopAction {
    let bucket = categorize_bet_size(raise_size_bb, 1.0);
    let ranges = bb_defense_ranges(bucket);
    if tier <= ranges.three_bet {
        PreflopAction::ThreeBet
    } else if tier <= ranges.call {
        PreflopAction::Call
    } else {
        PreflopAction::Fold
    }
}

fn vs_3bet(tier: Tier, three_bet_size_bb: f32, original_raise_bb: f32) -> PreflopAction {
    let bucket = categorize_bet_size(three_bet_size_bb, original_raise_bb);
    let ranges = sb_vs_3bet_ranges(bucket);
    if tier <= ranges.four_bet {
        PreflopAction::FourBet
    } else if tier <= ranges.call {
        PreflopAction::Call
    } else {
        PreflopAction::Fold
    }
}

fn bb_vs_sb_4bet(tier: Tier, four_bet_size_bb: f32, three_bet_size_bb: f32) -> PreflopAction {
    let bucket = categorize_bet_size(four_bet_size_bb, three_bet_size_bb);
    let ranges = bb_vs_4bet_ranges(bucket);
    if tier <= ranges.five_bet {
        PreflopAction::FiveBet
    } else if ranges.call.is_some_and(|call| tier <= call) {
        PreflopAction::Call
    } else {
        PreflopAction::Fold
    }
}

fn sb_vs_bb_5bet(tier: Tier, five_bet_size_bb: f32, four_bet_size_bb: f32) -> PreflopAction {
    let bucket = categorize_bet_size(five_bet_size_bb, four_bet_size_bb);
    if tier <= sb_vs_5bet_call_tier(bucket) {
        PreflopAction::Call
    } else {
        PreflopAction::Fold
    }
}

fn estimate_original_raise(pot_bb: f32, three_bet_size_bb: f32) -> f32 {
    let estimated = ((pot_bb - 1.5) / 2.0).max(2.0);
    estimated.min(three_bet_size_bb / 2.5)
}
fn estimate_previous_3bet(four_bet_size_bb: f32) -> f32 {
    (four_bet_size_bb / 2.5).max(6.0)
}
fn estimate_previous_4bet(five_bet_size_bb: f32) -> f32 {
    (five_bet_size_bb / 2.5).max(15.0)
}

/// the oracle's single entry point: maps a preflop `Scenario` plus the
/// hero's strength `Tier` to a chart action. Every scenario not covered by
/// the six explicit tables falls back to a conservative nuts-only rule.
pub fn get_preflop_action(tier: Tier, scenario: &Scenario) -> PreflopAction {
    use FacingAction::*;
    use Position::*;
    match (scenario.position, scenario.action_to_hero, scenario.num_raises) {
        (Button, None, _) => sb_first_action(tier, scenario.stack_bb),
        (BigBlind, Limp, _) => bb_vs_sb_limp(tier),
        (BigBlind, Raise, 1) => bb_vs_sb_raise(tier, scenario.raise_size_bb),
        // `num_raises == 2` (a 3-bet is live) only ever reaches the button:
        // the big blind's raise was the opening raise (num_raises == 1),
        // so the reraise the button now faces is the small blind's own
        // second raise of the hand, not a line the big blind can be on.
        (Button, Raise, 2) => {
            let original = if scenario.bet_history_bb[0] > 0.0 {
                scenario.bet_history_bb[0]
            } else {
                estimate_original_raise(scenario.pot_bb, scenario.raise_size_bb)
            };
            vs_3bet(tier, scenario.raise_size_bb, original)
        }
        (BigBlind, Raise, 3) => {
            let three_bet = if scenario.bet_history_bb[1] > 0.0 {
                scenario.bet_history_bb[1]
            } else {
                estimate_previous_3bet(scenario.raise_size_bb)
            };
            bb_vs_sb_4bet(tier, scenario.raise_size_bb, three_bet)
        }
        (Button, Raise, 4) => {
            let four_bet = if scenario.bet_history_bb[2] > 0.0 {
                scenario.bet_history_bb[2]
            } else {
                estimate_previous_4bet(scenario.raise_size_bb)
            };
            sb_vs_bb_5bet(tier, scenario.raise_size_bb, four_bet)
        }
        _ => {
            // 6-bet and beyond: conservative fallback, shove the nuts.
            if tier == 0 {
                PreflopAction::Raise
            } else if tier == 1 {
                if scenario.raise_size_bb > 0.0 {
                    PreflopAction::Call
                } else {
                    PreflopAction::Check
                }
            } else {
                PreflopAction::Fold
            }
        }
    }
}
