use crate::line::{BettingLine, LineType, SizingTell};
use crate::opponent_model::OpponentModel;
use riposte_core::Chips;
use riposte_postflop::{bluff_suitability_score, BoardTexture};

/// adjusts a raw river hand-strength estimate for the context the hand
/// arrived in: board texture, the betting line that got here, and the
/// sizing tell on the bet (if any), then clamps to a sane range.
pub fn calculate_river_hand_strength(
    raw_strength: f32,
    texture: &BoardTexture,
    line: &BettingLine,
) -> f32 {
    let mut s = raw_strength;

    if texture.draw_heavy {
        if s >= 0.5 {
            s *= 1.05;
        } else {
            s *= 0.90;
        }
    } else if texture.is_static {
        if (0.20..0.45).contains(&s) {
            s *= 1.15;
        }
    }

    if texture.paired {
        if s >= 0.80 {
            s *= 1.08;
        } else if s <= 0.40 {
            s *= 0.85;
        }
    }

    match line.line_type {
        LineType::CheckCheckBet => {
            if (0.35..0.70).contains(&s) {
                s *= 0.85;
            } else if s >= 0.85 {
                s *= 1.02;
            }
        }
        LineType::TripleBarrel => {
            if (0.45..0.75).contains(&s) {
                s *= 0.92;
            }
        }
        LineType::PassiveLine => {
            if s <= 0.70 {
                s *= 0.80;
            }
        }
        _ => {}
    }

    match line.river_sizing_tell {
        Some(SizingTell::Overbet) => {
            if (0.40..0.75).contains(&s) {
                s *= 0.88;
            }
        }
        Some(SizingTell::Small) => {
            if (0.30..0.60).contains(&s) {
                s *= 1.08;
            }
        }
        _ => {}
    }

    s.clamp(0.05, 0.99)
}

/// whether hero should bet the river for value/bluff, or check, given an
/// adjusted hand strength and bluff suitability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiverBettingDecision {
    Value,
    Bluff,
    Check,
}

pub fn river_betting_decision(adjusted_strength: f32, bluff_score: f32) -> RiverBettingDecision {
    if adjusted_strength >= 0.75 {
        RiverBettingDecision::Value
    } else if adjusted_strength <= 0.25 && should_river_bluff(bluff_score) {
        RiverBettingDecision::Bluff
    } else {
        RiverBettingDecision::Check
    }
}

/// samples whether a thin-air river bluff goes in, capped well below even
/// odds so bluffs stay infrequent enough to hold up.
pub fn should_river_bluff(bluff_score: f32) -> bool {
    let freq = (bluff_score * 0.5).min(0.45);
    rand::random::<f32>() < freq
}

fn calling_threshold_for_size(bet_size_ratio: f32) -> f32 {
    let table: [(f32, f32); 7] = [
        (0.25, 0.50),
        (0.33, 0.55),
        (0.50, 0.65),
        (0.75, 0.75),
        (1.00, 0.80),
        (1.50, 0.90),
        (2.00, 0.95),
    ];
    table
        .iter()
        .rev()
        .find(|(ratio, _)| bet_size_ratio >= *ratio)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(0.50)
}

/// the hand-strength threshold required to call a river bet of the given
/// size, adjusted for the betting line, opponent tendencies, and blockers.
pub fn river_calling_decision(
    bet_size_ratio: f32,
    line: &BettingLine,
    texture: &BoardTexture,
    model: &OpponentModel,
    hero_blocks_villain: bool,
) -> f32 {
    let mut threshold = calling_threshold_for_size(bet_size_ratio);

    threshold += match line.line_type {
        LineType::CheckCheckBet => 0.15,
        LineType::CbetCheckBet => 0.10,
        LineType::TripleBarrel => -0.05,
        LineType::PassiveLine => 0.20,
        _ => 0.0,
    };

    threshold += match line.river_sizing_tell {
        Some(SizingTell::Small) => -0.05,
        Some(SizingTell::Overbet) => 0.05,
        _ => 0.0,
    };

    if texture.draw_heavy {
        threshold += 0.08;
    } else if texture.is_static {
        threshold -= 0.03;
    }

    if model.has_enough_sample() {
        if model.fold_to_cbet() > 0.6 {
            threshold -= 0.05;
        } else if model.fold_to_cbet() < 0.4 {
            threshold += 0.05;
        }
    }

    if hero_blocks_villain {
        threshold -= 0.05;
    }

    threshold.clamp(0.45, 0.95)
}

pub fn hero_blocks_villain_value(hole: riposte_cards::Hole, board: &[riposte_cards::Card]) -> bool {
    bluff_suitability_score(hole, board) >= 0.4
}

pub fn pot_fraction(bet: Chips, pot_before_bet: Chips) -> f32 {
    if pot_before_bet <= 0 {
        return 1.0;
    }
    bet as f32 / pot_before_bet as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineType;
    use riposte_postflop::analyze_board;
    use riposte_cards::{Card, Rank, Suit};

    fn neutral_line(line_type: LineType) -> BettingLine {
        BettingLine {
            aggressed_flop: false,
            aggressed_turn: false,
            aggressed_river: true,
            line_type,
            river_sizing_tell: None,
        }
    }

    #[test]
    fn checked_through_then_bet_shrinks_medium_strength() {
        let board = vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Jack, Suit::Heart),
        ];
        let texture = analyze_board(&board);
        let line = neutral_line(LineType::CheckCheckBet);
        let adjusted = calculate_river_hand_strength(0.5, &texture, &line);
        assert!(adjusted < 0.5);
    }

    #[test]
    fn bigger_bets_require_a_higher_calling_threshold() {
        let board = vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Jack, Suit::Heart),
        ];
        let texture = analyze_board(&board);
        let line = neutral_line(LineType::MixedAggression);
        let model = OpponentModel::new();
        let small = river_calling_decision(0.33, &line, &texture, &model, false);
        let large = river_calling_decision(2.00, &line, &texture, &model, false);
        assert!(large > small);
    }

    #[test]
    fn calling_threshold_always_within_clamp() {
        let board = vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Jack, Suit::Heart),
        ];
        let texture = analyze_board(&board);
        let line = neutral_line(LineType::PassiveLine);
        let model = OpponentModel::new();
        let threshold = river_calling_decision(0.25, &line, &texture, &model, true);
        assert!((0.45..=0.95).contains(&threshold));
    }
}
