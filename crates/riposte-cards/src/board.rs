use super::card::Card;
use super::street::Street;
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone)]
pub struct Board {
    pub cards: Vec<Card>,
    pub street: Street,
}

impl Board {
    pub fn new() -> Board {
        Board {
            cards: Vec::with_capacity(5),
            street: Street::Preflop,
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
        self.street = match self.cards.len() {
            0 => Street::Preflop,
            1..=3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::River,
            n => panic!("invalid board size {n}"),
        };
    }

    pub fn extend(&mut self, cards: &[Card]) {
        for card in cards {
            self.cards.push(*card);
        }
        self.street = match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::River,
            n => panic!("invalid board size {n}"),
        };
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter) -> Result {
        for card in &self.cards {
            write!(f, "{card} ")?;
        }
        Ok(())
    }
}
