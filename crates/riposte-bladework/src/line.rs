use riposte_cards::Street;
use riposte_core::Chips;
use riposte_engine::{Action, ActionRecord};

/// shape of the betting action across flop/turn/river, used to read
/// aggression patterns into the river decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// villain checked flop, then bet turn or river after hero checked back.
    CheckCheckBet,
    /// villain c-bet the flop, then checked a later street.
    CbetCheckBet,
    /// villain bet three streets in a row.
    TripleBarrel,
    /// villain bet twice, then checked.
    DoubleBarrelCheck,
    /// villain mostly checked and called, no sustained aggression.
    PassiveLine,
    /// aggression switched hands between streets.
    MixedAggression,
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            LineType::CheckCheckBet => "check_check_bet",
            LineType::CbetCheckBet => "cbet_check_bet",
            LineType::TripleBarrel => "triple_barrel",
            LineType::DoubleBarrelCheck => "double_barrel_check",
            LineType::PassiveLine => "passive_line",
            LineType::MixedAggression => "mixed_aggression",
        };
        write!(f, "{s}")
    }
}

/// how large the river bet is relative to the pot in front of it, read as a
/// tell about whether it's more likely value or a bluff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingTell {
    Small,
    Medium,
    Large,
    Overbet,
}

impl std::fmt::Display for SizingTell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            SizingTell::Small => "small",
            SizingTell::Medium => "medium",
            SizingTell::Large => "large",
            SizingTell::Overbet => "overbet",
        };
        write!(f, "{s}")
    }
}

pub fn classify_sizing_tell(bet: Chips, pot_before_bet: Chips) -> SizingTell {
    if pot_before_bet <= 0 {
        return SizingTell::Medium;
    }
    let ratio = bet as f32 / pot_before_bet as f32;
    if ratio <= 0.4 {
        SizingTell::Small
    } else if ratio <= 0.75 {
        SizingTell::Medium
    } else if ratio <= 1.2 {
        SizingTell::Large
    } else {
        SizingTell::Overbet
    }
}

/// full read of how `villain` has played the streets seen so far this hand,
/// built from the raw action history.
#[derive(Debug, Clone)]
pub struct BettingLine {
    pub aggressed_flop: bool,
    pub aggressed_turn: bool,
    pub aggressed_river: bool,
    pub line_type: LineType,
    pub river_sizing_tell: Option<SizingTell>,
}

fn street_action(history: &[&ActionRecord], villain: usize) -> bool {
    history
        .iter()
        .any(|a| a.player == villain && matches!(a.action, Action::Raise(_)))
}

fn street_was_checked_through(history: &[&ActionRecord]) -> bool {
    !history.is_empty() && history.iter().all(|a| matches!(a.action, Action::Check))
}

/// reads the villain's betting line from `history`, the full action log for
/// the hand so far.
pub fn analyze_betting_line(history: &[ActionRecord], villain: usize) -> BettingLine {
    let flop: Vec<&ActionRecord> = history.iter().filter(|a| a.round == Street::Flop).collect();
    let turn: Vec<&ActionRecord> = history.iter().filter(|a| a.round == Street::Turn).collect();
    let river: Vec<&ActionRecord> = history.iter().filter(|a| a.round == Street::River).collect();

    let aggressed_flop = street_action(&flop, villain);
    let aggressed_turn = street_action(&turn, villain);
    let aggressed_river = street_action(&river, villain);

    let flop_checked = street_was_checked_through(&flop);
    let turn_checked = street_was_checked_through(&turn);

    let line_type = if aggressed_flop && aggressed_turn && aggressed_river {
        LineType::TripleBarrel
    } else if aggressed_flop && aggressed_turn && !aggressed_river {
        LineType::DoubleBarrelCheck
    } else if aggressed_flop && !aggressed_turn && aggressed_river {
        LineType::CbetCheckBet
    } else if flop_checked && turn_checked && aggressed_river {
        LineType::CheckCheckBet
    } else if flop_checked && turn_checked && !aggressed_river {
        LineType::PassiveLine
    } else {
        LineType::MixedAggression
    };

    let river_sizing_tell = river
        .iter()
        .find(|a| a.player == villain && matches!(a.action, Action::Raise(_)))
        .map(|a| {
            let pot_before = (a.pot_after - a.amount).max(1);
            classify_sizing_tell(a.amount, pot_before)
        });

    BettingLine {
        aggressed_flop,
        aggressed_turn,
        aggressed_river,
        line_type,
        river_sizing_tell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: usize, action: Action, round: Street, amount: Chips, pot_after: Chips) -> ActionRecord {
        ActionRecord { player, action, amount, round, pot_after }
    }

    #[test]
    fn checked_flop_and_turn_then_river_bet_is_delayed_cbet() {
        let history = vec![
            record(0, Action::Check, Street::Flop, 0, 10),
            record(1, Action::Check, Street::Flop, 0, 10),
            record(0, Action::Check, Street::Turn, 0, 10),
            record(1, Action::Check, Street::Turn, 0, 10),
            record(1, Action::Raise(8), Street::River, 8, 18),
        ];
        let line = analyze_betting_line(&history, 1);
        assert_eq!(line.line_type, LineType::CheckCheckBet);
        assert_eq!(line.river_sizing_tell, Some(SizingTell::Large));
    }

    #[test]
    fn three_streets_of_aggression_is_triple_barrel() {
        let history = vec![
            record(1, Action::Raise(5), Street::Flop, 5, 15),
            record(0, Action::Call, Street::Flop, 5, 20),
            record(1, Action::Raise(10), Street::Turn, 10, 30),
            record(0, Action::Call, Street::Turn, 10, 40),
            record(1, Action::Raise(20), Street::River, 20, 60),
            record(0, Action::Call, Street::River, 20, 80),
        ];
        let line = analyze_betting_line(&history, 1);
        assert_eq!(line.line_type, LineType::TripleBarrel);
    }
}
