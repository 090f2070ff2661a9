//! Builds the serialized-state JSON dict returned by every engine-facing
//! API call. `riposte_engine`'s `serde` Cargo feature is declared but wired
//! to nothing in that crate, so rather than adding derives to an already-
//! finished crate this assembles the dict by hand with `serde_json::json!`.

use riposte_cards::Card;
use riposte_engine::{Action, BettingRound, GameState, Player, Status};
use serde_json::{json, Value};

pub fn serialize_state(game_id: u64, state: &GameState) -> Value {
    json!({
        "game_id": game_id,
        "player_hand": state.players.iter().map(hole_strings).collect::<Vec<_>>(),
        "community": state.community.cards.iter().map(card_string).collect::<Vec<_>>(),
        "pot": state.pot,
        "players": state.players.iter().enumerate().map(|(seat, p)| player_json(seat, p)).collect::<Vec<_>>(),
        "current_player": state.current_player,
        "betting_round": betting_round_str(state.betting_round),
        "current_bet": state.current_bet,
        "last_bet_amount": state.last_bet_amount,
        "action_history": state.action_history.iter().map(action_record_json).collect::<Vec<_>>(),
        "dealer_pos": state.dealer_pos,
        "hand_count": state.hand_count,
        "hand_over": state.is_hand_over(),
    })
}

fn hole_strings(player: &Player) -> Vec<String> {
    player
        .hole
        .map(|hole| Vec::from(hole).into_iter().map(|c| card_string(&c)).collect())
        .unwrap_or_default()
}

fn card_string(card: &Card) -> String {
    card.to_string()
}

fn player_json(seat: usize, player: &Player) -> Value {
    json!({
        "name": format!("player{seat}"),
        "stack": player.stack,
        "current_bet": player.current_bet,
        "status": status_str(player.status),
        "hand": hole_strings(player),
    })
}

fn status_str(status: Status) -> &'static str {
    match status {
        Status::Active => "active",
        Status::Folded => "folded",
        Status::AllIn => "allin",
        Status::Out => "out",
    }
}

fn betting_round_str(round: BettingRound) -> String {
    round.to_string()
}

fn action_record_json(record: &riposte_engine::ActionRecord) -> Value {
    json!({
        "player": record.player,
        "action": action_verb(record.action),
        "amount": record.amount,
        "round": record.round.to_string(),
        "pot_after": record.pot_after,
    })
}

fn action_verb(action: Action) -> &'static str {
    match action {
        Action::Fold => "fold",
        Action::Check => "check",
        Action::Call => "call",
        Action::Raise(_) => "raise",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_hand_serializes_every_required_key() {
        let state = GameState::new_game();
        let value = serialize_state(1, &state);
        for key in [
            "game_id",
            "player_hand",
            "community",
            "pot",
            "players",
            "current_player",
            "betting_round",
            "current_bet",
            "last_bet_amount",
            "action_history",
            "dealer_pos",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["players"].as_array().unwrap().len(), 2);
        assert_eq!(value["community"].as_array().unwrap().len(), 0);
    }
}
