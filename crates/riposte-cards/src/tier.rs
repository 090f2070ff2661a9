use super::rank::Rank;
use std::sync::OnceLock;

/// one of the 169 canonical starting-hand classes: a pocket pair, or a
/// suited/offsuit combination of two distinct ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandClass {
    Pair(Rank),
    Suited(Rank, Rank),
    Offsuit(Rank, Rank),
}

impl HandClass {
    /// classify two hole cards into their canonical class, ignoring suit
    /// identity (only whether the two cards share a suit matters).
    pub fn of(r1: Rank, s1: super::suit::Suit, r2: Rank, s2: super::suit::Suit) -> HandClass {
        let (hi, lo) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
        if hi == lo {
            HandClass::Pair(hi)
        } else if s1 == s2 {
            HandClass::Suited(hi, lo)
        } else {
            HandClass::Offsuit(hi, lo)
        }
    }

    fn high(&self) -> u8 {
        match self {
            HandClass::Pair(r) => *r as u8,
            HandClass::Suited(hi, _) | HandClass::Offsuit(hi, _) => *hi as u8,
        }
    }
    fn low(&self) -> u8 {
        match self {
            HandClass::Pair(r) => *r as u8,
            HandClass::Suited(_, lo) | HandClass::Offsuit(_, lo) => *lo as u8,
        }
    }
    fn is_suited(&self) -> bool {
        matches!(self, HandClass::Suited(..))
    }

    /// number of 52-card combos this class represents: 6 for a pair, 4 for
    /// suited, 12 for offsuit.
    fn combos(&self) -> u32 {
        match self {
            HandClass::Pair(_) => 6,
            HandClass::Suited(..) => 4,
            HandClass::Offsuit(..) => 12,
        }
    }

    /// heuristic strength score used only to seed the initial tier
    /// partition; the elite and pair overrides below take final say.
    fn strength_score(&self) -> i32 {
        if let HandClass::Pair(_) = self {
            let rank = self.high() as i32;
            let penalty = if rank < 7 { (7 - rank) * 80 } else { 0 };
            return 300 + 25 * rank - penalty;
        }
        let hi = self.high() as i32;
        let lo = self.low() as i32;
        let gap = hi - lo;
        let mut score = hi * 20 + lo;
        score += (5 - gap).max(0) * 10;
        if hi == 12 {
            score += 30; // ace high
        } else if hi >= 9 {
            score += 10;
        }
        if self.is_suited() {
            score += 40;
            if gap == 1 {
                score += 60;
            } else if gap == 2 {
                score += 30;
            }
        }
        if hi <= 5 && lo <= 3 && !self.is_suited() {
            score -= 20;
        }
        score
    }
}

impl std::fmt::Display for HandClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HandClass::Pair(r) => write!(f, "{r}{r}"),
            HandClass::Suited(hi, lo) => write!(f, "{hi}{lo}s"),
            HandClass::Offsuit(hi, lo) => write!(f, "{hi}{lo}o"),
        }
    }
}

/// strength tier in [0, 10]; 0 is the strongest ("elite") tier.
pub type Tier = u8;

pub const NUM_TIERS: usize = 11;

fn all_classes() -> Vec<HandClass> {
    let mut classes = Vec::with_capacity(169);
    for hi in Rank::ALL.iter().rev() {
        for lo in Rank::ALL.iter().rev() {
            if *lo > *hi {
                continue;
            }
            if hi == lo {
                classes.push(HandClass::Pair(*hi));
            } else {
                classes.push(HandClass::Suited(*hi, *lo));
                classes.push(HandClass::Offsuit(*hi, *lo));
            }
        }
    }
    classes
}

/// ranks elevated into tier 0 regardless of where the strength-score
/// partition would otherwise place them.
fn elite() -> Vec<HandClass> {
    vec![
        HandClass::Pair(Rank::Ace),
        HandClass::Pair(Rank::King),
        HandClass::Pair(Rank::Queen),
        HandClass::Pair(Rank::Jack),
        HandClass::Offsuit(Rank::Ace, Rank::King),
        HandClass::Suited(Rank::Ace, Rank::King),
        HandClass::Suited(Rank::Ace, Rank::Queen),
    ]
}

/// small/medium pocket pairs are re-pinned into tiers below where raw
/// high-card strength scoring would put them: in practice they play worse
/// multiway and worse out of position than the scoring heuristic credits.
fn pair_overrides() -> Vec<(Rank, Tier)> {
    vec![
        (Rank::Two, 4),
        (Rank::Three, 4),
        (Rank::Four, 3),
        (Rank::Five, 3),
        (Rank::Six, 3),
        (Rank::Seven, 2),
        (Rank::Eight, 2),
    ]
}

const TOTAL_COMBOS: u32 = 1326;

fn build_tiers() -> Vec<Vec<HandClass>> {
    let mut classes = all_classes();
    classes.sort_by_key(|c| std::cmp::Reverse(c.strength_score()));

    let target = TOTAL_COMBOS / 10;
    let mut tiers: Vec<Vec<HandClass>> = vec![Vec::new(); 10];
    let mut idx = 0usize;
    let mut running = 0u32;
    for class in classes {
        if running + class.combos() > target && idx < 9 {
            idx += 1;
            running = 0;
        }
        tiers[idx].push(class);
        running += class.combos();
    }

    for elite_class in elite() {
        for tier in tiers.iter_mut() {
            if let Some(pos) = tier.iter().position(|c| *c == elite_class) {
                tier.remove(pos);
                break;
            }
        }
    }
    tiers.insert(0, elite());

    for (rank, tier_idx) in pair_overrides() {
        let pair = HandClass::Pair(rank);
        for tier in tiers.iter_mut() {
            if let Some(pos) = tier.iter().position(|c| *c == pair) {
                tier.remove(pos);
                break;
            }
        }
        tiers[tier_idx as usize].push(pair);
    }

    tiers
}

static TIERS: OnceLock<Vec<Vec<HandClass>>> = OnceLock::new();

fn tiers() -> &'static Vec<Vec<HandClass>> {
    TIERS.get_or_init(build_tiers)
}

/// looks up the strength tier (0 = strongest, 10 = weakest) for a starting
/// hand class. Every one of the 169 classes resolves to exactly one tier.
pub fn tier_of(class: HandClass) -> Tier {
    tiers()
        .iter()
        .position(|tier| tier.contains(&class))
        .unwrap_or_else(|| panic!("hand class {class} not assigned to any tier")) as Tier
}

/// every starting-hand class assigned to `tier`, used to build villain
/// ranges as a union of tiers (e.g. "called our open" ⇒ tiers 0..6).
pub fn classes_in_tier(tier: Tier) -> Vec<HandClass> {
    tiers().get(tier as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_a_tier() {
        for class in all_classes() {
            let t = tier_of(class);
            assert!((t as usize) < NUM_TIERS);
        }
    }

    #[test]
    fn aces_are_elite() {
        assert_eq!(tier_of(HandClass::Pair(Rank::Ace)), 0);
    }

    #[test]
    fn seven_deuce_offsuit_is_worst() {
        let worst = HandClass::Offsuit(Rank::Seven, Rank::Two);
        assert_eq!(tier_of(worst), 10);
    }

    #[test]
    fn pair_override_lands_deuces_in_tier_four() {
        assert_eq!(tier_of(HandClass::Pair(Rank::Two)), 4);
    }

    #[test]
    fn tiers_partition_all_combos() {
        let total: u32 = tiers().iter().flatten().map(|c| c.combos()).sum();
        assert_eq!(total, TOTAL_COMBOS);
    }
}
