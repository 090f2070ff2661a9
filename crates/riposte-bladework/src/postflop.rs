use riposte_core::Chips;
use riposte_postflop::{get_optimal_bet_size, should_bluff, BoardTexture, DrawCounts};

/// the action this bot takes when it is first to act (check or bet),
/// chosen from hand strength, draw equity, and whether the board needs a
/// protection bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOrBet {
    ProtectionBet,
    ValueBet,
    MixedValueBet,
    SemiBluff,
    PureBluff,
    Check,
}

/// whether a made hand or draw needs protection against redraws: a
/// decent-but-vulnerable hand on a draw-heavy board wants to charge draws
/// rather than give a free card.
pub fn needs_protection(hand_strength: f32, draws: &DrawCounts, texture: &BoardTexture) -> bool {
    (0.45..0.80).contains(&hand_strength) && texture.draw_heavy && draws.outs == 0
}

/// decides whether to check or bet when facing no bet, mirroring the
/// source's tiered thresholds: protect a vulnerable made hand, bet strong
/// and medium value, semi-bluff a strong draw, and occasionally bluff air.
pub fn decide_check_or_bet_advanced(
    hand_strength: f32,
    draw_equity: f32,
    draws: &DrawCounts,
    texture: &BoardTexture,
    bluff_frequency: f32,
) -> CheckOrBet {
    if needs_protection(hand_strength, draws, texture) {
        return CheckOrBet::ProtectionBet;
    }
    if hand_strength >= 0.75 {
        CheckOrBet::ValueBet
    } else if hand_strength >= 0.55 {
        CheckOrBet::MixedValueBet
    } else if draw_equity >= 0.30 {
        CheckOrBet::SemiBluff
    } else if draw_equity <= 0.25 && should_bluff(bluff_frequency) {
        CheckOrBet::PureBluff
    } else {
        CheckOrBet::Check
    }
}

/// the action this bot takes when facing a bet: call/raise/fold, chosen
/// from a dynamic strength threshold keyed on how big the bet is relative
/// to the pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallRaiseFold {
    Raise,
    Call,
    Fold,
}

fn min_strength_threshold(bet_size_ratio: f32) -> f32 {
    let table: [(f32, f32); 7] = [
        (0.0, 0.10),
        (0.33, 0.15),
        (0.5, 0.20),
        (0.67, 0.30),
        (1.0, 0.45),
        (1.5, 0.65),
        (2.0, 0.80),
    ];
    table
        .iter()
        .rev()
        .find(|(ratio, _)| bet_size_ratio >= *ratio)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(0.10)
}

/// decides whether to raise, call, or fold against a bet. Premium hands
/// raise outright; strong hands mix between raising and calling; everything
/// else is measured against a dynamic calling threshold that rises with bet
/// size, loosened for draws with implied odds and tightened out of position.
pub fn decide_call_raise_fold_advanced(
    hand_strength: f32,
    draw_equity: f32,
    bet_size_ratio: f32,
    board_draw_heavy: bool,
    is_action_card: bool,
    in_position: bool,
    semi_bluff_raise_frequency: f32,
) -> CallRaiseFold {
    if hand_strength >= 0.85 {
        return CallRaiseFold::Raise;
    }
    if hand_strength >= 0.65 {
        if should_bluff(0.5) {
            return CallRaiseFold::Raise;
        }
        return CallRaiseFold::Call;
    }

    let mut threshold = min_strength_threshold(bet_size_ratio);
    if board_draw_heavy {
        threshold -= 0.05;
    }
    if is_action_card {
        threshold += 0.05;
    }

    let mut effective_strength = hand_strength;
    if draw_equity >= 0.35 {
        effective_strength = effective_strength.max(draw_equity * 0.85);
    }
    if !in_position {
        effective_strength *= 0.95;
    }

    if draw_equity >= 0.35 && should_bluff(semi_bluff_raise_frequency) {
        return CallRaiseFold::Raise;
    }

    if effective_strength >= threshold {
        CallRaiseFold::Call
    } else {
        CallRaiseFold::Fold
    }
}

/// sizes a protection bet: slightly smaller than a standard value bet, just
/// big enough to make a draw's continuing unprofitable.
pub fn calculate_protection_bet_size(pot_size: Chips, stack_size: Chips) -> Chips {
    get_optimal_bet_size(0.60, true, pot_size, stack_size, false)
}

/// a semi-bluff or pure-bluff frequency capped well under break-even so
/// bluffs remain a minority of the betting range.
pub fn should_semi_bluff(score: f32) -> bool {
    rand::random::<f32>() < score.min(0.70)
}

pub fn should_bluff_advanced(score: f32) -> bool {
    rand::random::<f32>() < score.min(0.50)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_postflop::analyze_board;
    use riposte_cards::{Card, Rank, Suit};

    fn wet_board_texture() -> BoardTexture {
        let board = vec![
            Card::new(Rank::Eight, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
            Card::new(Rank::Ten, Suit::Heart),
        ];
        analyze_board(&board)
    }

    #[test]
    fn strong_value_always_bets() {
        let texture = wet_board_texture();
        let draws = DrawCounts::default();
        let decision = decide_check_or_bet_advanced(0.9, 0.0, &draws, &texture, 0.2);
        assert_eq!(decision, CheckOrBet::ValueBet);
    }

    #[test]
    fn premium_hands_always_raise_facing_a_bet() {
        let decision =
            decide_call_raise_fold_advanced(0.9, 0.0, 0.5, false, false, true, 0.3);
        assert_eq!(decision, CallRaiseFold::Raise);
    }

    #[test]
    fn big_bets_need_more_strength_to_call() {
        let small = min_strength_threshold(0.33);
        let big = min_strength_threshold(2.0);
        assert!(big > small);
    }

    #[test]
    fn air_against_a_pot_sized_bet_folds() {
        let decision =
            decide_call_raise_fold_advanced(0.05, 0.0, 1.0, false, false, true, 0.0);
        assert_eq!(decision, CallRaiseFold::Fold);
    }
}
