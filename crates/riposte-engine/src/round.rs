/// betting stage of the hand; distinct from `riposte_cards::Street` because
/// it has a terminal `Showdown` value past the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BettingRound {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl BettingRound {
    pub fn next(&self) -> BettingRound {
        match self {
            BettingRound::Preflop => BettingRound::Flop,
            BettingRound::Flop => BettingRound::Turn,
            BettingRound::Turn => BettingRound::River,
            BettingRound::River | BettingRound::Showdown => BettingRound::Showdown,
        }
    }
}

impl std::fmt::Display for BettingRound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BettingRound::Preflop => write!(f, "preflop"),
            BettingRound::Flop => write!(f, "flop"),
            BettingRound::Turn => write!(f, "turn"),
            BettingRound::River => write!(f, "river"),
            BettingRound::Showdown => write!(f, "showdown"),
        }
    }
}
