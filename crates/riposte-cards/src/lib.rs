//! Card primitives, 5-to-7 card hand evaluation, and the 169-class preflop
//! strength tier table (C1, C2).

pub mod board;
pub mod card;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod hole;
pub mod kicks;
pub mod rank;
pub mod ranking;
pub mod street;
pub mod suit;
pub mod tier;

pub use board::Board;
pub use card::Card;
pub use deck::Deck;
pub use evaluator::Evaluator;
pub use hand::{Hand, HandIterator};
pub use hole::Hole;
pub use kicks::Kickers;
pub use rank::Rank;
pub use ranking::Ranking;
pub use street::Street;
pub use suit::Suit;
pub use tier::{classes_in_tier, tier_of, HandClass, Tier, NUM_TIERS};

/// ranks a made 5-to-7 card hand, returning the `Ranking` and the `Kickers`
/// needed to break a tie against another hand of the same `Ranking`.
pub fn evaluate(hand: Hand) -> (Ranking, Kickers) {
    let evaluator = Evaluator::from(hand);
    let ranking = evaluator.find_ranking();
    let kickers = evaluator.find_kickers(ranking);
    (ranking, kickers)
}

/// classifies a hole into its canonical starting-hand class and tier, used
/// by the preflop chart oracle.
pub fn classify(hole: &Hole) -> (HandClass, Tier) {
    let a = hole.cards[0];
    let b = hole.cards[1];
    let class = HandClass::of(a.rank(), a.suit(), b.rank(), b.suit());
    (class, tier_of(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_combines_ranking_and_kickers() {
        let hand = Hand::from(vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::Queen, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
        ]);
        let (ranking, _) = evaluate(hand);
        assert_eq!(ranking, Ranking::OnePair(Rank::Ace));
    }

    #[test]
    fn classify_pocket_aces_is_elite() {
        let hole = Hole::new(
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
        );
        let (class, tier) = classify(&hole);
        assert_eq!(class, HandClass::Pair(Rank::Ace));
        assert_eq!(tier, 0);
    }
}
