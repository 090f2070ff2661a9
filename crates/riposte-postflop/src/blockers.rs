use riposte_cards::{Card, Hole, Rank};

/// how much a hole card blocks villain's continuing range: the ace/king of
/// the flush suit, the nut flush card itself, or a card that would
/// otherwise complete a backdoor draw for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockerProfile {
    pub blocks_nut_flush: bool,
    pub blocks_second_nut_flush: bool,
    pub holds_ace_blocker: bool,
    pub holds_king_blocker: bool,
    pub flush_suit_blockers: u32,
}

/// analyzes which of villain's strong continuing hands `hole` blocks,
/// relative to the flush suit on `board` (if any).
pub fn analyze_blockers(hole: Hole, board: &[Card]) -> BlockerProfile {
    let mut suit_counts = [0u32; 4];
    for c in board {
        suit_counts[c.suit() as usize] += 1;
    }
    let flush_suit = suit_counts
        .iter()
        .enumerate()
        .find(|(_, &n)| n >= 3)
        .map(|(s, _)| s as u8);

    let mut profile = BlockerProfile::default();
    profile.holds_ace_blocker = hole.cards.iter().any(|c| c.rank() == Rank::Ace);
    profile.holds_king_blocker = hole.cards.iter().any(|c| c.rank() == Rank::King);

    if let Some(suit) = flush_suit {
        for c in hole.cards {
            if c.suit() as u8 == suit {
                profile.flush_suit_blockers += 1;
                if c.rank() == Rank::Ace {
                    profile.blocks_nut_flush = true;
                } else if c.rank() == Rank::King {
                    profile.blocks_second_nut_flush = true;
                }
            }
        }
    }

    profile
}

/// bluffs play better when they block villain's strongest continues, so a
/// hand that blocks the nut flush or holds the ace of a coordinated board
/// is a better bluffing candidate than a random air hand.
pub fn bluff_suitability_score(hole: Hole, board: &[Card]) -> f32 {
    let profile = analyze_blockers(hole, board);
    let mut score = 0.0;
    if profile.blocks_nut_flush {
        score += 0.4;
    }
    if profile.blocks_second_nut_flush {
        score += 0.2;
    }
    if profile.holds_ace_blocker {
        score += 0.2;
    }
    if profile.holds_king_blocker {
        score += 0.1;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::{Card, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn ace_of_flush_suit_blocks_the_nuts() {
        let hole = Hole::new(card(Rank::Ace, Suit::Spade), card(Rank::Two, Suit::Club));
        let board = vec![
            card(Rank::Four, Suit::Spade),
            card(Rank::Seven, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
        ];
        let profile = analyze_blockers(hole, &board);
        assert!(profile.blocks_nut_flush);
        assert_eq!(profile.flush_suit_blockers, 1);
    }

    #[test]
    fn no_flush_draw_on_board_means_no_flush_blockers() {
        let hole = Hole::new(card(Rank::Ace, Suit::Spade), card(Rank::Two, Suit::Club));
        let board = vec![
            card(Rank::Four, Suit::Diamond),
            card(Rank::Seven, Suit::Heart),
            card(Rank::Nine, Suit::Club),
        ];
        let profile = analyze_blockers(hole, &board);
        assert!(!profile.blocks_nut_flush);
        assert_eq!(profile.flush_suit_blockers, 0);
    }
}
