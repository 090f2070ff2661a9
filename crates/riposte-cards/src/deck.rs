use super::card::Card;
use super::hand::Hand;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Deck {
        let mut deck = Deck {
            cards: (0..52).map(Card::from).collect(),
        };
        deck.shuffle();
        deck
    }

    /// fresh deck with every card in `dead` removed, used when dealing a
    /// board around hole cards that have already been shown
    pub fn excluding(dead: Hand) -> Deck {
        let mut deck = Deck {
            cards: (0..52).map(Card::from).filter(|c| !dead.contains(*c)).collect(),
        };
        deck.shuffle();
        deck
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.cards.shuffle(&mut rng);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_has_52() {
        assert_eq!(Deck::new().remaining(), 52);
    }

    #[test]
    fn excluding_removes_dead_cards() {
        let dead = Hand::from(vec![Card::from(0u8), Card::from(1u8)]);
        assert_eq!(Deck::excluding(dead).remaining(), 50);
    }
}
