use riposte_cards::{evaluate, Card, Deck, Hand, Hole};
use riposte_core::POSTFLOP_MC_SIMULATIONS;

/// Monte Carlo equity estimate of `hero` against a uniform draw from
/// `villain_range`, over the cards still to come. `num_simulations` of 0
/// means "use the default" (`POSTFLOP_MC_SIMULATIONS`).
///
/// Falls back to sampling an unconstrained villain hand from the remaining
/// deck when every range entry collides with known cards, mirroring the
/// source's behavior rather than returning a degenerate 0 equity.
pub fn calculate_hand_equity(
    hero: Hole,
    board: &[Card],
    villain_range: &[Hole],
    num_simulations: usize,
) -> f32 {
    if board.len() == 5 {
        return calculate_showdown_equity(hero, board, villain_range);
    }

    let sims = if num_simulations == 0 {
        POSTFLOP_MC_SIMULATIONS
    } else {
        num_simulations
    };

    let known = known_mask(hero, board);
    let mut valid_range: Vec<Hole> = villain_range
        .iter()
        .filter(|h| !collides(h, known))
        .copied()
        .collect();

    let mut rng = rand::rng();
    let mut wins = 0.0f32;
    let mut total = 0usize;
    let to_come = 5 - board.len();

    for _ in 0..sims {
        let mut deck = Deck::excluding(known);
        let mut completion = Vec::with_capacity(to_come);
        for _ in 0..to_come {
            match deck.draw() {
                Some(card) => completion.push(card),
                None => break,
            }
        }
        if completion.len() != to_come {
            continue;
        }
        let runout_mask = Hand::from(known_with(known, &completion));

        if valid_range.is_empty() {
            valid_range = sample_unconstrained_range(runout_mask);
        }
        let candidates: Vec<Hole> = valid_range
            .iter()
            .filter(|h| !collides(h, runout_mask))
            .copied()
            .collect();
        let Some(&villain) = pick(&candidates) else {
            continue;
        };

        let mut hero_cards: Vec<Card> = Vec::from(hero);
        hero_cards.extend(board.iter().copied());
        hero_cards.extend(completion.iter().copied());
        let mut villain_cards: Vec<Card> = Vec::from(villain);
        villain_cards.extend(board.iter().copied());
        villain_cards.extend(completion.iter().copied());

        let (hero_rank, hero_kick) = evaluate(Hand::from(hero_cards));
        let (villain_rank, villain_kick) = evaluate(Hand::from(villain_cards));

        use std::cmp::Ordering::*;
        match (hero_rank, hero_kick).cmp(&(villain_rank, villain_kick)) {
            Greater => wins += 1.0,
            Equal => wins += 0.5,
            Less => {}
        }
        total += 1;
        let _ = &mut rng; // rng drives Deck::excluding's internal shuffle
    }

    if total == 0 {
        0.5
    } else {
        wins / total as f32
    }
}

/// exact equity against every combination in (or consistent with) a range,
/// used once the board is complete and there is nothing left to sample.
pub fn calculate_showdown_equity(hero: Hole, board: &[Card], villain_range: &[Hole]) -> f32 {
    assert_eq!(board.len(), 5, "showdown equity requires a complete board");
    let known = known_mask(hero, board);
    let candidates: Vec<Hole> = if villain_range.is_empty() {
        sample_unconstrained_range(known)
    } else {
        villain_range
            .iter()
            .filter(|h| !collides(h, known))
            .copied()
            .collect()
    };
    if candidates.is_empty() {
        return 0.5;
    }

    let mut hero_cards: Vec<Card> = Vec::from(hero);
    hero_cards.extend(board.iter().copied());
    let (hero_rank, hero_kick) = evaluate(Hand::from(hero_cards));

    let mut wins = 0.0f32;
    for villain in &candidates {
        let mut villain_cards: Vec<Card> = Vec::from(*villain);
        villain_cards.extend(board.iter().copied());
        let (villain_rank, villain_kick) = evaluate(Hand::from(villain_cards));
        use std::cmp::Ordering::*;
        match (hero_rank, hero_kick).cmp(&(villain_rank, villain_kick)) {
            Greater => wins += 1.0,
            Equal => wins += 0.5,
            Less => {}
        }
    }
    wins / candidates.len() as f32
}

fn known_mask(hero: Hole, board: &[Card]) -> Hand {
    let mut cards: Vec<Card> = Vec::from(hero);
    cards.extend(board.iter().copied());
    Hand::from(cards)
}

fn known_with(known: Hand, extra: &[Card]) -> Vec<Card> {
    let mut cards = Vec::from(known);
    cards.extend(extra.iter().copied());
    cards
}

fn collides(hole: &Hole, mask: Hand) -> bool {
    mask.contains(hole.cards[0]) || mask.contains(hole.cards[1])
}

fn sample_unconstrained_range(mask: Hand) -> Vec<Hole> {
    let remaining: Vec<Card> = (0..52u8)
        .map(Card::from)
        .filter(|c| !mask.contains(*c))
        .collect();
    let mut hands = Vec::with_capacity(remaining.len() * remaining.len() / 2);
    for (i, &a) in remaining.iter().enumerate() {
        for &b in remaining.iter().skip(i + 1) {
            hands.push(Hole::new(a, b));
        }
    }
    hands
}

fn pick<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get(rand::random_range(0..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::{Rank, Suit};

    #[test]
    fn nut_flush_on_the_river_has_high_equity() {
        let hero = Hole::new(
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
        );
        let board = vec![
            Card::new(Rank::Two, Suit::Spade),
            Card::new(Rank::Seven, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Three, Suit::Heart),
        ];
        let equity = calculate_showdown_equity(hero, &board, &[]);
        assert!(equity > 0.95, "equity was {equity}");
    }

    #[test]
    fn equity_is_between_zero_and_one() {
        let hero = Hole::new(
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Two, Suit::Club),
        );
        let board = vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Queen, Suit::Diamond),
        ];
        let equity = calculate_hand_equity(hero, &board, &[], 50);
        assert!((0.0..=1.0).contains(&equity));
    }
}
