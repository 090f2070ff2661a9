use riposte_core::Chips;

/// `pot_size / bet_to_call`, infinite when there's nothing to call.
pub fn calculate_pot_odds(bet_to_call: Chips, pot_size: Chips) -> f32 {
    if bet_to_call <= 0 {
        f32::INFINITY
    } else {
        pot_size as f32 / bet_to_call as f32
    }
}

/// minimum frequency hero must defend against a bet to keep villain's
/// bluffs from being automatically profitable.
pub fn minimum_defense_frequency(bet_size: Chips, pot_size: Chips) -> f32 {
    let total_after_bet = pot_size + bet_size;
    if total_after_bet == 0 {
        0.0
    } else {
        pot_size as f32 / total_after_bet as f32
    }
}

/// chooses a bet size from hand strength and board wetness, standard 2/3-pot
/// baseline with bigger sizing for nutted hands and wider bluff sizing on
/// wet boards.
pub fn get_optimal_bet_size(
    hand_strength: f32,
    board_is_wet: bool,
    pot_size: Chips,
    stack_size: Chips,
    is_river: bool,
) -> Chips {
    let pot = pot_size as f32;
    let sized = if hand_strength >= 0.85 {
        if is_river {
            pot
        } else {
            pot * 0.75
        }
    } else if hand_strength >= 0.65 {
        pot * 0.67
    } else if hand_strength >= 0.35 {
        pot * 0.5
    } else if board_is_wet {
        pot * 0.75
    } else {
        pot * 0.5
    };
    (sized.round() as Chips).min(stack_size).max(0)
}

/// street-indexed base bluffing frequency, scaled up on draw-heavy boards
/// and against villains who fold too much to continuation bets, then scaled
/// again for bluffs that carry good blockers.
pub fn bluff_frequency(
    street: riposte_cards::Street,
    board_has_draws: bool,
    villain_fold_to_cbet: f32,
    bluff_hand_suitable: bool,
) -> f32 {
    use riposte_cards::Street;
    let base = match street {
        Street::Flop => 0.25,
        Street::Turn => 0.20,
        Street::River => 0.15,
        Street::Preflop => 0.15,
    };
    let mut freq = base;
    if board_has_draws {
        freq *= 1.2;
    }
    freq *= villain_fold_to_cbet / 0.5;
    if bluff_hand_suitable {
        freq *= 1.3;
    }
    freq
}

/// samples whether to bluff this spot given the computed frequency.
pub fn should_bluff(frequency: f32) -> bool {
    rand::random::<f32>() < frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_cards::Street;

    #[test]
    fn pot_odds_with_nothing_to_call_is_infinite() {
        assert_eq!(calculate_pot_odds(0, 100), f32::INFINITY);
    }

    #[test]
    fn pot_odds_half_pot_bet_is_three_to_one() {
        let odds = calculate_pot_odds(50, 150);
        assert!((odds - 3.0).abs() < 1e-6);
    }

    #[test]
    fn mdf_against_pot_sized_bet_is_half() {
        let mdf = minimum_defense_frequency(100, 100);
        assert!((mdf - 0.5).abs() < 1e-6);
    }

    #[test]
    fn nutted_hand_bets_bigger_on_the_river() {
        let flop_size = get_optimal_bet_size(0.9, false, 100, 500, false);
        let river_size = get_optimal_bet_size(0.9, false, 100, 500, true);
        assert!(river_size > flop_size);
    }

    #[test]
    fn weak_hand_bluffs_bigger_on_a_wet_board() {
        let dry = get_optimal_bet_size(0.1, false, 100, 500, false);
        let wet = get_optimal_bet_size(0.1, true, 100, 500, false);
        assert!(wet > dry);
    }

    #[test]
    fn bluff_frequency_scales_with_fold_equity() {
        let low_fold = bluff_frequency(Street::Flop, false, 0.3, false);
        let high_fold = bluff_frequency(Street::Flop, false, 0.8, false);
        assert!(high_fold > low_fold);
    }
}
