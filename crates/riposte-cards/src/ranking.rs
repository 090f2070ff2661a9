use super::rank::Rank;

/// a poker hand's value, ordered by strength; ties within the same variant
/// are broken by `Evaluator::find_kickers`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 0 kickers
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(r1, r2) => write!(f, "full house, {r1}s over {r2}s"),
            Ranking::TwoPair(r1, r2) => write!(f, "two pair, {r1}s and {r2}s"),
            Ranking::HighCard(r) => write!(f, "high card {r}"),
            Ranking::OnePair(r) => write!(f, "pair of {r}s"),
            Ranking::ThreeOAK(r) => write!(f, "three of a kind, {r}s"),
            Ranking::Straight(r) => write!(f, "straight to the {r}"),
            Ranking::FourOAK(r) => write!(f, "four of a kind, {r}s"),
            Ranking::Flush(r) => write!(f, "flush, {r} high"),
            Ranking::StraightFlush(r) => write!(f, "straight flush to the {r}"),
        }
    }
}
