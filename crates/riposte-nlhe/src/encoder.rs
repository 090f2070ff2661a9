use riposte_abstraction::{legal_actions, preflop_bucket_of, AbstractAction, CardBucket};
use riposte_cards::{classify, Street};
use riposte_core::BIG_BLIND;
use riposte_engine::GameState;
use riposte_mccfr::{pot_bucket_of, InfoKey};

/// how many of the most recent abstract actions feed the info-set key's
/// history component; older actions fall out of the window.
const HISTORY_WINDOW: usize = 8;

pub struct Encoding {
    pub key: InfoKey,
    pub legal: Vec<AbstractAction>,
}

pub fn board_street(state: &GameState) -> Street {
    match state.community.cards.len() {
        0 => Street::Preflop,
        3 => Street::Flop,
        4 => Street::Turn,
        _ => Street::River,
    }
}

fn card_bucket(state: &GameState, seat: usize, street: Street) -> CardBucket {
    if street == Street::Preflop {
        let hole = state.players[seat].hole.expect("dealt hand has a hole");
        let (class, _) = classify(&hole);
        preflop_bucket_of(class)
    } else {
        CardBucket::postflop(street, &state.community.cards)
    }
}

fn normalized_history(history: &[AbstractAction]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

/// builds this seat's information-set key and legal-action set at the
/// current game state, given the abstract-action history seen so far.
pub fn encode(state: &GameState, seat: usize, history: &[AbstractAction]) -> Encoding {
    let street = board_street(state);
    let bucket = card_bucket(state, seat, street);
    let pot_bucket = pot_bucket_of(state.pot as f32 / BIG_BLIND as f32);
    let key = InfoKey::build(seat, street, bucket, &normalized_history(history), pot_bucket);
    Encoding {
        key,
        legal: legal_actions(state, seat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::AbstractAction::{Call, Raise3_0};

    #[test]
    fn history_window_keeps_only_the_most_recent_actions() {
        let history = vec![Call; 20];
        assert_eq!(normalized_history(&history).split('|').count(), HISTORY_WINDOW);
    }

    #[test]
    fn a_fresh_hand_encodes_to_preflop_street() {
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let encoding = encode(&state, seat, &[]);
        assert!(!encoding.legal.is_empty());
        let _ = Raise3_0;
    }
}
