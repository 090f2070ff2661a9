//! The engine-facing API: a table of live games, each paired with the bot
//! playing the seat opposite the caller, mutated only through the five
//! operations below so every response carries a fresh serialized state.

use crate::boundary::BoundaryAction;
use crate::serialize::serialize_state;
use anyhow::{anyhow, Result};
use riposte_abstraction::AbstractAction;
use riposte_bladework::{decide_action, OpponentModel};
use riposte_core::Chips;
use riposte_deepcfr::DeepCfrBot;
use riposte_engine::{Action, GameState};
use riposte_mccfr::InfoSetTable;
use riposte_nlhe::CfrBot;
use riposte_persist::{HandHistoryWriter, LoggedAction};
use serde_json::{json, Value};
use std::collections::HashMap;

pub type GameId = u64;

/// the opponent seat's decision source. `history` only matters to the CFR
/// variants, which encode information sets over the abstract-action
/// sequence rather than the raw engine state.
pub enum Bot {
    Bladework(OpponentModel),
    Cfr {
        table: InfoSetTable,
        history: Vec<AbstractAction>,
    },
    DeepCfr {
        table: InfoSetTable,
        policy_net: riposte_deepcfr::PolicyNetwork,
        neural_mix_probability: f32,
        history: Vec<AbstractAction>,
    },
}

impl Bot {
    pub(crate) fn decide(&mut self, state: &GameState, seat: usize) -> riposte_engine::Action {
        match self {
            Bot::Bladework(model) => decide_action(state, seat, model),
            Bot::Cfr { table, history } => CfrBot::new(table).decide(state, seat, history),
            Bot::DeepCfr {
                table,
                policy_net,
                neural_mix_probability,
                history,
            } => DeepCfrBot::new(table, policy_net, *neural_mix_probability).decide(state, seat, history),
        }
    }

    pub(crate) fn record(&mut self, action: riposte_engine::Action) {
        if let Some(abstract_action) = to_abstract(action) {
            match self {
                Bot::Cfr { history, .. } | Bot::DeepCfr { history, .. } => history.push(abstract_action),
                Bot::Bladework(_) => {}
            }
        }
    }

    pub(crate) fn reset_hand(&mut self) {
        match self {
            Bot::Cfr { history, .. } | Bot::DeepCfr { history, .. } => history.clear(),
            Bot::Bladework(model) => model.on_new_hand(),
        }
    }
}

/// abstract-action history is only an approximation of `action` (raise
/// sizing buckets collapse many engine raises onto one label); close
/// enough for the opponent's own bookkeeping, never used to reconstruct the
/// exact engine action.
fn to_abstract(action: riposte_engine::Action) -> Option<AbstractAction> {
    match action {
        riposte_engine::Action::Fold => Some(AbstractAction::Fold),
        riposte_engine::Action::Check => Some(AbstractAction::Check),
        riposte_engine::Action::Call => Some(AbstractAction::Call),
        riposte_engine::Action::Raise(_) => Some(AbstractAction::Raise1_0),
    }
}

struct Game {
    state: GameState,
    bot: Bot,
    history: HandHistoryWriter,
}

pub struct Session {
    games: HashMap<GameId, Game>,
    next_id: GameId,
}

impl Session {
    pub fn new() -> Self {
        Self {
            games: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn start_game(&mut self, bot: Bot) -> (GameId, Value) {
        let id = self.next_id;
        self.next_id += 1;
        let state = GameState::new_game();
        let serialized = serialize_state(id, &state);
        let mut history = open_hand_history(id);
        log_new_hand(&mut history, &state);
        self.games.insert(
            id,
            Game {
                state,
                bot,
                history,
            },
        );
        (id, serialized)
    }

    pub fn get_state(&self, id: GameId) -> Result<Value> {
        let game = self.find(id)?;
        Ok(serialize_state(id, &game.state))
    }

    pub fn player_action(&mut self, id: GameId, verb: &str, amount: Option<Chips>) -> Result<Value> {
        let action = BoundaryAction::parse(verb, amount)?.to_engine();
        let game = self.find_mut(id)?;
        if game.state.is_hand_over() {
            return Err(anyhow!("hand is already over; call new_hand first"));
        }
        let seat = game
            .state
            .current_player
            .ok_or_else(|| anyhow!("no player to act"))?;
        let before = log_snapshot(&game.state, seat);
        match game.state.apply(action) {
            Ok(()) => {
                game.bot.record(action);
                log_action(&mut game.history, seat, action, before);
                Ok(settle(id, game))
            }
            Err(err) => Ok(json!({
                "updated_state": serialize_state(id, &game.state),
                "hand_over": game.state.is_hand_over(),
                "message": err.to_string(),
            })),
        }
    }

    pub fn ai_turn(&mut self, id: GameId) -> Result<Value> {
        let game = self.find_mut(id)?;
        let seat = game
            .state
            .current_player
            .ok_or_else(|| anyhow!("no player to act"))?;
        let before = log_snapshot(&game.state, seat);
        let action = game.bot.decide(&game.state, seat);
        game.state.apply(action).map_err(|e| anyhow!(e.to_string()))?;
        game.bot.record(action);
        log_action(&mut game.history, seat, action, before);
        Ok(settle(id, game))
    }

    pub fn new_hand(&mut self, id: GameId) -> Result<Value> {
        let game = self.find_mut(id)?;
        if !game.state.is_hand_over() {
            return Err(anyhow!("hand is still in progress"));
        }
        if game.state.pot > 0 {
            let _ = game.state.showdown();
        }
        game.state.prepare_next_hand();
        game.bot.reset_hand();
        log_new_hand(&mut game.history, &game.state);
        Ok(serialize_state(id, &game.state))
    }

    fn find(&self, id: GameId) -> Result<&Game> {
        self.games.get(&id).ok_or_else(|| anyhow!("unknown game id {id}"))
    }

    fn find_mut(&mut self, id: GameId) -> Result<&mut Game> {
        self.games.get_mut(&id).ok_or_else(|| anyhow!("unknown game id {id}"))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// runs every engine-driven transition that follows a decision (street
/// advances, board deals, terminal showdown) and reports the outcome
/// alongside the fresh serialized state.
fn settle(id: GameId, game: &mut Game) -> Value {
    let mut winners = None;
    loop {
        if game.state.is_hand_over() {
            if game.state.pot > 0 {
                winners = Some(game.state.showdown().expect("hand-over state always settles"));
            }
            break;
        }
        if game.state.current_player.is_some() {
            break;
        }
        if game.state.advance_round().is_err() {
            break;
        }
    }
    let hand_over = game.state.is_hand_over();
    if hand_over {
        if let Some(winnings) = &winners {
            let summary = winnings
                .iter()
                .enumerate()
                .map(|(seat, amount)| format!("player{seat} collected {amount}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = game.history.close_hand(&summary);
        } else {
            let _ = game.history.close_hand("no pot awarded");
        }
    }
    let mut response = json!({
        "updated_state": serialize_state(id, &game.state),
        "hand_over": hand_over,
    });
    if let Some(winnings) = winners {
        response["winners"] = json!(winnings);
    }
    response
}

/// opens the game's hand-history log; falls back to a disabled (no-op)
/// writer if the file can't be opened, per §7's "log; continue" policy for
/// non-fatal I/O failures.
fn open_hand_history(id: GameId) -> HandHistoryWriter {
    let path = format!("logs/hand_history/game-{id}.log");
    if let Some(parent) = std::path::Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match HandHistoryWriter::enabled(&path) {
        Ok(writer) => writer,
        Err(_err) => {
            #[cfg(feature = "native")]
            log::warn!("hand-history log failed to open for game {id}: {_err}");
            HandHistoryWriter::disabled()
        }
    }
}

/// writes the hand header and both blind posts; called once at
/// `start_game` and again after every `new_hand`.
fn log_new_hand(history: &mut HandHistoryWriter, state: &GameState) {
    let names = ["player0", "player1"];
    let stacks = [state.players[0].stack, state.players[1].stack];
    let _ = history.start_hand(names, stacks);
    let sb_seat = state.dealer_pos;
    let bb_seat = state.other(sb_seat);
    let _ = history.log_action(
        names[sb_seat],
        &LoggedAction::PostsSmallBlind(state.players[sb_seat].current_bet),
    );
    let _ = history.log_action(
        names[bb_seat],
        &LoggedAction::PostsBigBlind(state.players[bb_seat].current_bet),
    );
}

/// the acting seat's `current_bet` and the table's `current_bet` just
/// before an action is applied, needed afterward to render the action's
/// chip deltas in the canonical verb grammar.
struct ActionSnapshot {
    player_bet_before: Chips,
    table_bet_before: Chips,
}

fn log_snapshot(state: &GameState, seat: usize) -> ActionSnapshot {
    ActionSnapshot {
        player_bet_before: state.players[seat].current_bet,
        table_bet_before: state.current_bet,
    }
}

fn log_action(history: &mut HandHistoryWriter, seat: usize, action: Action, before: ActionSnapshot) {
    let name = if seat == 0 { "player0" } else { "player1" };
    let logged = match action {
        Action::Fold => LoggedAction::Folds,
        Action::Check => LoggedAction::Checks,
        Action::Call => LoggedAction::Calls(before.table_bet_before - before.player_bet_before),
        Action::Raise(total) => {
            let added = total - before.player_bet_before;
            if before.table_bet_before == 0 {
                LoggedAction::Bets(added)
            } else {
                LoggedAction::RaisesTo { added, total }
            }
        }
    };
    let _ = history.log_action(name, &logged);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_a_game_returns_a_serialized_state_with_blinds_posted() {
        let mut session = Session::new();
        let (id, state) = session.start_game(Bot::Bladework(OpponentModel::new()));
        assert_eq!(state["game_id"], json!(id));
        assert!(state["pot"].as_i64().unwrap() > 0);
    }

    #[test]
    fn ai_turn_against_an_unknown_game_fails_cleanly() {
        let mut session = Session::new();
        assert!(session.ai_turn(999).is_err());
    }

    #[test]
    fn folding_settles_the_hand_and_reports_winners() {
        let mut session = Session::new();
        let (id, _) = session.start_game(Bot::Cfr {
            table: InfoSetTable::new(),
            history: Vec::new(),
        });
        let response = session.player_action(id, "fold", None).unwrap();
        assert_eq!(response["hand_over"], json!(true));
        assert!(response.get("winners").is_some());
    }

    #[test]
    fn new_hand_after_a_finished_hand_deals_a_fresh_one() {
        let mut session = Session::new();
        let (id, _) = session.start_game(Bot::Bladework(OpponentModel::new()));
        session.player_action(id, "fold", None).unwrap();
        let fresh = session.new_hand(id).unwrap();
        assert_eq!(fresh["hand_count"], json!(1));
    }
}
