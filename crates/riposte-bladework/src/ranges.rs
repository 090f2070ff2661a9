use riposte_cards::{classes_in_tier, Card, HandClass, Hole, Suit};
use riposte_engine::{Action, ActionRecord, BettingRound};

/// which preflop scenario the villain's action history shows, used to pick
/// which union of strength tiers their continuing range is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreflopLine {
    OpenedAndCalledOurOpen,
    ThreeBet,
    FourBetOrMore,
    OpenRaised,
    Limped,
}

fn classify_line(preflop: &[&ActionRecord], hero: usize) -> PreflopLine {
    let villain = 1 - hero;
    let hero_opened = preflop.iter().any(|a| a.player == hero && matches!(a.action, Action::Raise(_)));
    let villain_opened = preflop.iter().any(|a| a.player == villain && matches!(a.action, Action::Raise(_)));
    let raises = preflop.iter().filter(|a| matches!(a.action, Action::Raise(_))).count();

    if hero_opened {
        let villain_last = preflop.iter().rev().find(|a| a.player == villain);
        match villain_last.map(|a| a.action) {
            Some(Action::Call) => PreflopLine::OpenedAndCalledOurOpen,
            Some(Action::Raise(_)) if raises == 2 => PreflopLine::ThreeBet,
            Some(Action::Raise(_)) => PreflopLine::FourBetOrMore,
            _ => PreflopLine::Limped,
        }
    } else if villain_opened {
        PreflopLine::OpenRaised
    } else {
        PreflopLine::Limped
    }
}

/// tier range (inclusive, exclusive end) each preflop line implies for the
/// villain's continuing range.
fn tier_range(line: PreflopLine) -> std::ops::Range<u8> {
    match line {
        PreflopLine::OpenedAndCalledOurOpen => 0..7,
        PreflopLine::ThreeBet => 0..3,
        PreflopLine::FourBetOrMore => 0..1,
        PreflopLine::OpenRaised => 0..9,
        PreflopLine::Limped => 0..8,
    }
}

/// estimates villain's preflop range from the hand's preflop action history,
/// expressed as the full list of concrete two-card combos consistent with
/// the inferred tier union, excluding any card already visible to hero.
pub fn estimate_villain_range(history: &[ActionRecord], hero: usize, known: &[Card]) -> Vec<Hole> {
    let preflop: Vec<&ActionRecord> = history
        .iter()
        .filter(|a| a.round == riposte_cards::Street::Preflop)
        .collect();

    let line = classify_line(&preflop, hero);
    let range = tier_range(line);

    let mut classes: Vec<HandClass> = range.flat_map(classes_in_tier).collect();
    if classes.is_empty() {
        classes = (0..6).flat_map(classes_in_tier).collect();
    }

    expand_classes(&classes, known)
}

/// converts a list of starting-hand classes into every concrete two-card
/// combo they represent, skipping combos that collide with `known` cards.
pub fn expand_classes(classes: &[HandClass], known: &[Card]) -> Vec<Hole> {
    let mut out = Vec::new();
    for &class in classes {
        for (a, b) in combos_of(class) {
            if known.contains(&a) || known.contains(&b) {
                continue;
            }
            out.push(Hole::new(a, b));
        }
    }
    out
}

fn combos_of(class: HandClass) -> Vec<(Card, Card)> {
    let mut combos = Vec::new();
    match class {
        HandClass::Pair(rank) => {
            for (i, &s1) in Suit::ALL.iter().enumerate() {
                for &s2 in Suit::ALL.iter().skip(i + 1) {
                    combos.push((Card::new(rank, s1), Card::new(rank, s2)));
                }
            }
        }
        HandClass::Suited(hi, lo) => {
            for &s in Suit::ALL.iter() {
                combos.push((Card::new(hi, s), Card::new(lo, s)));
            }
        }
        HandClass::Offsuit(hi, lo) => {
            for &s1 in Suit::ALL.iter() {
                for &s2 in Suit::ALL.iter() {
                    if s1 != s2 {
                        combos.push((Card::new(hi, s1), Card::new(lo, s2)));
                    }
                }
            }
        }
    }
    combos
}

/// `true` once `history` shows the villain has acted postflop at all this
/// hand (used to decide whether a postflop bucket widening applies).
pub fn villain_has_acted_postflop(history: &[ActionRecord], hero: usize) -> bool {
    let villain = 1 - hero;
    history
        .iter()
        .any(|a| a.player == villain && a.round != riposte_cards::Street::Preflop)
}

pub fn is_preflop_round(round: BettingRound) -> bool {
    round == BettingRound::Preflop
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_core::Chips;

    fn record(player: usize, action: Action, round: riposte_cards::Street) -> ActionRecord {
        ActionRecord {
            player,
            action,
            amount: 0 as Chips,
            round,
            pot_after: 0,
        }
    }

    #[test]
    fn villain_calling_our_open_yields_tiers_zero_through_six() {
        let history = vec![
            record(0, Action::Raise(6), riposte_cards::Street::Preflop),
            record(1, Action::Call, riposte_cards::Street::Preflop),
        ];
        let range = estimate_villain_range(&history, 0, &[]);
        assert!(!range.is_empty());
    }

    #[test]
    fn three_bet_yields_a_tighter_range_than_calling() {
        let call_history = vec![
            record(0, Action::Raise(6), riposte_cards::Street::Preflop),
            record(1, Action::Call, riposte_cards::Street::Preflop),
        ];
        let threebet_history = vec![
            record(0, Action::Raise(6), riposte_cards::Street::Preflop),
            record(1, Action::Raise(20), riposte_cards::Street::Preflop),
        ];
        let call_range = estimate_villain_range(&call_history, 0, &[]);
        let threebet_range = estimate_villain_range(&threebet_history, 0, &[]);
        assert!(threebet_range.len() < call_range.len());
    }
}
