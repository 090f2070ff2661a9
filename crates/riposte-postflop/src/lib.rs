//! Postflop strategy primitives (C5): Monte Carlo equity, draw/outs
//! counting, board texture classification, blocker analysis, and bet
//! sizing.

pub mod blockers;
pub mod draws;
pub mod equity;
pub mod sizing;
pub mod texture;

pub use blockers::{analyze_blockers, bluff_suitability_score, BlockerProfile};
pub use draws::{analyze_draws, DrawCounts};
pub use equity::{calculate_hand_equity, calculate_showdown_equity};
pub use sizing::{
    bluff_frequency, calculate_pot_odds, get_optimal_bet_size, minimum_defense_frequency,
    should_bluff,
};
pub use texture::{analyze_board, hero_draw_strength, BoardTexture, TextureType};

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::{Card, Hole, Rank, Suit};

    #[test]
    fn draw_heavy_flop_raises_bluff_frequency_input() {
        let board = vec![
            Card::new(Rank::Eight, Suit::Spade),
            Card::new(Rank::Nine, Suit::Spade),
            Card::new(Rank::Two, Suit::Heart),
        ];
        let texture = analyze_board(&board);
        assert!(texture.flush_draws > 0 || texture.straight_draws > 0);
    }

    #[test]
    fn hero_draw_strength_reflects_outs() {
        let hole = Hole::new(
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
        );
        let board = vec![
            Card::new(Rank::Two, Suit::Spade),
            Card::new(Rank::Seven, Suit::Spade),
            Card::new(Rank::Nine, Suit::Heart),
        ];
        assert_eq!(hero_draw_strength(hole, &board), 9);
    }
}
