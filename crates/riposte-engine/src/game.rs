use crate::action::{Action, ActionRecord};
use crate::player::{Player, Status};
use crate::round::BettingRound;
use riposte_cards::{Board, Card, Deck, Hole};
use riposte_core::{Chips, EngineError, EngineResult, BIG_BLIND, NUM_PLAYERS, SMALL_BLIND, STARTING_STACK};

/// heads-up table state. Owned entirely by the caller; every mutation goes
/// through `apply`/`advance_round`/`deal_remaining`/`showdown` so illegal
/// transitions are rejected rather than corrupting state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub deck: Deck,
    pub community: Board,
    pub players: [Player; NUM_PLAYERS],
    pub pot: Chips,
    pub dealer_pos: usize,
    pub current_player: Option<usize>,
    pub betting_round: BettingRound,
    pub current_bet: Chips,
    pub last_bet_amount: Chips,
    pub action_history: Vec<ActionRecord>,
    pub hand_count: usize,
    last_aggressor: Option<usize>,
    acted_since_aggression: [bool; NUM_PLAYERS],
}

impl GameState {
    /// deal a fresh hand: shuffle, deal two cards each, post blinds, and set
    /// the dealer (small blind, heads-up) to act first.
    pub fn new_game() -> GameState {
        let mut state = GameState {
            deck: Deck::new(),
            community: Board::new(),
            players: [Player::new(STARTING_STACK), Player::new(STARTING_STACK)],
            pot: 0,
            dealer_pos: 0,
            current_player: None,
            betting_round: BettingRound::Preflop,
            current_bet: 0,
            last_bet_amount: BIG_BLIND,
            action_history: Vec::new(),
            hand_count: 0,
            last_aggressor: None,
            acted_since_aggression: [false; NUM_PLAYERS],
        };
        state.deal_hand();
        state
    }

    fn deal_hand(&mut self) {
        self.deck = Deck::new();
        self.community = Board::new();
        self.pot = 0;
        self.betting_round = BettingRound::Preflop;
        self.action_history.clear();
        self.last_aggressor = None;
        self.acted_since_aggression = [false; NUM_PLAYERS];

        for player in self.players.iter_mut() {
            let hole = Hole::new(
                self.deck.draw().expect("52-card deck has cards"),
                self.deck.draw().expect("52-card deck has cards"),
            );
            player.reset_for_hand(hole);
        }

        let sb = self.dealer_pos;
        let bb = 1 - self.dealer_pos;
        self.post_blind(sb, SMALL_BLIND);
        self.post_blind(bb, BIG_BLIND);
        self.current_bet = BIG_BLIND;
        self.last_bet_amount = BIG_BLIND;
        self.current_player = Some(sb); // heads-up preflop: dealer/SB acts first
    }

    fn post_blind(&mut self, seat: usize, amount: Chips) {
        let player = &mut self.players[seat];
        let posted = amount.min(player.stack);
        player.stack -= posted;
        player.current_bet += posted;
        self.pot += posted;
        if player.stack == 0 {
            player.status = Status::AllIn;
        }
    }

    pub fn other(&self, seat: usize) -> usize {
        1 - seat
    }

    fn non_folded(&self) -> Vec<usize> {
        (0..NUM_PLAYERS)
            .filter(|&p| self.players[p].status != Status::Folded)
            .collect()
    }

    /// minimum legal total-bet target for a raise this street.
    pub fn min_raise_target(&self, _seat: usize) -> Chips {
        self.current_bet + self.last_bet_amount.max(BIG_BLIND)
    }

    /// maximum legal total-bet target for a raise this street (all-in).
    pub fn max_raise_target(&self, seat: usize) -> Chips {
        self.players[seat].current_bet + self.players[seat].stack
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<Action> {
        if self.current_player != Some(seat) {
            return Vec::new();
        }
        let player = &self.players[seat];
        let to_call = player.to_call(self.current_bet);
        let mut actions = Vec::with_capacity(4);
        if to_call == 0 {
            actions.push(Action::Check);
        } else {
            actions.push(Action::Fold);
            actions.push(Action::Call);
        }
        if self.max_raise_target(seat) > self.current_bet.max(player.current_bet) {
            let min_target = self.min_raise_target(seat).min(self.max_raise_target(seat));
            actions.push(Action::Raise(min_target));
        }
        actions
    }

    pub fn apply(&mut self, action: Action) -> EngineResult<()> {
        let seat = self
            .current_player
            .ok_or(EngineError::HandAlreadyOver)?;
        match action {
            Action::Fold => self.apply_fold(seat)?,
            Action::Check => self.apply_check(seat)?,
            Action::Call => self.apply_call(seat)?,
            Action::Raise(target) => self.apply_raise(seat, target)?,
        }
        self.advance_actor(seat);
        Ok(())
    }

    fn apply_fold(&mut self, seat: usize) -> EngineResult<()> {
        let to_call = self.players[seat].to_call(self.current_bet);
        if to_call == 0 {
            return Err(EngineError::IllegalAction {
                reason: "cannot fold when there is nothing to call".into(),
            });
        }
        self.players[seat].status = Status::Folded;
        self.record(seat, Action::Fold, 0);
        Ok(())
    }

    fn apply_check(&mut self, seat: usize) -> EngineResult<()> {
        if self.players[seat].current_bet != self.current_bet {
            return Err(EngineError::IllegalAction {
                reason: "cannot check facing a bet".into(),
            });
        }
        self.record(seat, Action::Check, 0);
        Ok(())
    }

    fn apply_call(&mut self, seat: usize) -> EngineResult<()> {
        let to_call = self.players[seat].to_call(self.current_bet);
        if to_call == 0 {
            return Err(EngineError::IllegalAction {
                reason: "nothing to call".into(),
            });
        }
        let amount = to_call.min(self.players[seat].stack);
        self.move_chips(seat, amount);
        self.record(seat, Action::Call, amount);
        Ok(())
    }

    fn apply_raise(&mut self, seat: usize, target: Chips) -> EngineResult<()> {
        let previous_current_bet = self.current_bet;
        let min_target = self.min_raise_target(seat);
        let max_target = self.max_raise_target(seat);
        let is_all_in_short = target == max_target && target < min_target;
        if target < min_target && !is_all_in_short {
            return Err(EngineError::IllegalRaiseSize {
                minimum: min_target,
                requested: target,
            });
        }
        if target > max_target {
            return Err(EngineError::IllegalRaiseSize {
                minimum: min_target,
                requested: target,
            });
        }
        let increment = target - self.players[seat].current_bet;
        self.move_chips(seat, increment);
        self.current_bet = self.current_bet.max(self.players[seat].current_bet);
        self.last_bet_amount = self.players[seat].current_bet - previous_current_bet;
        self.last_aggressor = Some(seat);
        self.acted_since_aggression = [false; NUM_PLAYERS];
        self.record(seat, Action::Raise(target), increment);
        Ok(())
    }

    fn move_chips(&mut self, seat: usize, amount: Chips) {
        let player = &mut self.players[seat];
        player.stack -= amount;
        player.current_bet += amount;
        self.pot += amount;
        if player.stack == 0 && player.status == Status::Active {
            player.status = Status::AllIn;
        }
    }

    fn record(&mut self, seat: usize, action: Action, amount: Chips) {
        self.acted_since_aggression[seat] = true;
        self.action_history.push(ActionRecord {
            player: seat,
            action,
            amount,
            round: street_of(self.betting_round),
            pot_after: self.pot,
        });
    }

    fn advance_actor(&mut self, just_acted: usize) {
        if self.non_folded().len() <= 1 {
            self.current_player = None;
            return;
        }
        let next = self.other(just_acted);
        if self.betting_round_over() {
            self.current_player = None;
        } else if self.players[next].status == Status::Active {
            self.current_player = Some(next);
        } else {
            self.current_player = None;
        }
    }

    /// true iff: at most one player remains, or everyone left is all-in, or
    /// all non-folded players have matched `current_bet` and the
    /// non-aggressor has acted since the last raise.
    pub fn betting_round_over(&self) -> bool {
        let alive = self.non_folded();
        if alive.len() <= 1 {
            return true;
        }
        if alive
            .iter()
            .all(|&p| self.players[p].status == Status::AllIn)
        {
            return true;
        }
        let matched = alive
            .iter()
            .all(|&p| self.players[p].status == Status::AllIn || self.players[p].current_bet == self.current_bet);
        if !matched {
            return false;
        }
        match self.last_aggressor {
            None => alive.iter().all(|&p| self.acted_since_aggression[p]),
            Some(aggressor) => alive
                .iter()
                .filter(|&&p| p != aggressor)
                .all(|&p| self.acted_since_aggression[p]),
        }
    }

    /// preflop -> flop (3) -> turn (1) -> river (1) -> showdown. Resets
    /// per-street bets and sets the first-to-act seat: dealer acts first
    /// postflop, heads-up. Once both non-folded players are all-in, no
    /// further action is possible, so this delegates to `deal_remaining`
    /// instead of pausing one street at a time.
    pub fn advance_round(&mut self) -> EngineResult<()> {
        if !self.betting_round_over() {
            return Err(EngineError::IllegalAction {
                reason: "betting round is not over".into(),
            });
        }
        if self.non_folded().len() <= 1 {
            self.betting_round = BettingRound::Showdown;
            self.current_player = None;
            return Ok(());
        }
        if self.betting_round != BettingRound::Showdown
            && self
                .players
                .iter()
                .filter(|p| p.status != Status::Folded)
                .all(|p| p.status == Status::AllIn)
        {
            return self.deal_remaining();
        }
        let n_new_cards = match self.betting_round {
            BettingRound::Preflop => 3,
            BettingRound::Flop | BettingRound::Turn => 1,
            BettingRound::River | BettingRound::Showdown => 0,
        };
        for _ in 0..n_new_cards {
            let card = self.deck.draw().expect("deck has enough cards for the board");
            self.community.push(card);
        }
        self.betting_round = self.betting_round.next();
        self.current_bet = 0;
        self.last_bet_amount = BIG_BLIND;
        self.last_aggressor = None;
        self.acted_since_aggression = [false; NUM_PLAYERS];
        for player in self.players.iter_mut() {
            player.reset_for_street();
        }
        if self.betting_round == BettingRound::Showdown {
            self.current_player = None;
        } else {
            // the all-in-runout case returned via `deal_remaining` above,
            // so reaching here means at least one non-folded player still
            // has chips and a decision to make.
            self.current_player = Some(self.dealer_pos);
        }
        Ok(())
    }

    /// once both remaining players are all-in, run the board out with no
    /// further betting and go straight to showdown.
    pub fn deal_remaining(&mut self) -> EngineResult<()> {
        while self.community.cards.len() < 5 && self.non_folded().len() > 1 {
            let card = self.deck.draw().expect("deck has enough cards for the board");
            self.community.push(card);
        }
        self.betting_round = BettingRound::Showdown;
        self.current_player = None;
        Ok(())
    }

    /// evaluates survivors' best 5-of-7 hand, awards the pot (split on
    /// ties), and returns each player's net winnings this hand (may be 0).
    pub fn showdown(&mut self) -> EngineResult<[Chips; NUM_PLAYERS]> {
        let alive = self.non_folded();
        let mut winnings = [0 as Chips; NUM_PLAYERS];
        if alive.len() == 1 {
            let winner = alive[0];
            self.players[winner].stack += self.pot;
            winnings[winner] = self.pot;
        } else {
            let ranked: Vec<(usize, (riposte_cards::Ranking, riposte_cards::Kickers))> = alive
                .iter()
                .map(|&seat| {
                    let hole = self.players[seat].hole.expect("dealt hand has a hole");
                    let mut cards: Vec<Card> = Vec::from(hole).into_iter().collect();
                    cards.extend(self.community.cards.iter().copied());
                    (seat, riposte_cards::evaluate(riposte_cards::Hand::from(cards)))
                })
                .collect();
            let best = ranked.iter().map(|(_, v)| *v).max().expect("at least one survivor");
            let winners: Vec<usize> = ranked
                .iter()
                .filter(|(_, v)| *v == best)
                .map(|(seat, _)| *seat)
                .collect();
            let share = self.pot / winners.len() as Chips;
            let remainder = self.pot % winners.len() as Chips;
            for (i, &seat) in winners.iter().enumerate() {
                let bonus = if i < remainder as usize { 1 } else { 0 };
                let reward = share + bonus;
                self.players[seat].stack += reward;
                winnings[seat] = reward;
            }
        }
        self.pot = 0;
        self.current_player = None;
        Ok(winnings)
    }

    /// rotate the dealer button, reshuffle, re-deal, re-post blinds; keeps
    /// stacks and increments `hand_count`. Caller-owned state such as an
    /// opponent model survives because it lives outside `GameState`.
    pub fn prepare_next_hand(&mut self) {
        self.dealer_pos = self.other(self.dealer_pos);
        self.hand_count += 1;
        self.deal_hand();
    }

    pub fn is_hand_over(&self) -> bool {
        self.betting_round == BettingRound::Showdown || self.non_folded().len() <= 1
    }
}

fn street_of(round: BettingRound) -> riposte_cards::Street {
    match round {
        BettingRound::Preflop => riposte_cards::Street::Preflop,
        BettingRound::Flop => riposte_cards::Street::Flop,
        BettingRound::Turn => riposte_cards::Street::Turn,
        BettingRound::River | BettingRound::Showdown => riposte_cards::Street::River,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_posts_blinds() {
        let state = GameState::new_game();
        assert_eq!(state.pot, SMALL_BLIND + BIG_BLIND);
        assert_eq!(state.current_bet, BIG_BLIND);
        assert_eq!(state.current_player, Some(state.dealer_pos));
    }

    #[test]
    fn fold_awards_pot_to_survivor() {
        let mut state = GameState::new_game();
        let folder = state.current_player.unwrap();
        let survivor = state.other(folder);
        let before = state.players[survivor].stack;
        state.apply(Action::Fold).unwrap();
        assert!(state.is_hand_over());
        let pot = state.pot;
        let winnings = state.showdown().unwrap();
        assert_eq!(winnings[survivor], pot);
        assert_eq!(state.players[survivor].stack, before + pot);
    }

    #[test]
    fn check_rejected_facing_a_bet() {
        let mut state = GameState::new_game();
        let err = state.apply(Action::Check).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    #[test]
    fn call_then_checks_closes_preflop() {
        let mut state = GameState::new_game();
        state.apply(Action::Call).unwrap();
        assert!(!state.betting_round_over() || state.current_player.is_some());
        state.apply(Action::Check).unwrap();
        assert!(state.betting_round_over());
        state.advance_round().unwrap();
        assert_eq!(state.betting_round, BettingRound::Flop);
        assert_eq!(state.community.cards.len(), 3);
        assert_eq!(state.current_player, Some(state.dealer_pos));
    }

    #[test]
    fn min_raise_respects_last_bet_amount() {
        let state = GameState::new_game();
        let seat = state.current_player.unwrap();
        assert_eq!(state.min_raise_target(seat), BIG_BLIND * 2);
    }

    #[test]
    fn raise_below_the_minimum_is_rejected_and_leaves_state_untouched() {
        let mut state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let min_target = state.min_raise_target(seat);
        let before = state.clone();
        let err = state.apply(Action::Raise(min_target - 1)).unwrap_err();
        assert!(matches!(err, EngineError::IllegalRaiseSize { .. }));
        assert_eq!(state.pot, before.pot);
        assert_eq!(state.players[seat].current_bet, before.players[seat].current_bet);
        assert_eq!(state.players[seat].stack, before.players[seat].stack);
        assert_eq!(state.current_player, before.current_player);
    }

    #[test]
    fn all_in_preflop_runs_the_board_out_to_showdown() {
        let mut state = GameState::new_game();
        let seat = state.current_player.unwrap();
        let other = state.other(seat);
        // both seats start a fresh hand with equal stacks, so a full shove
        // and a full call commit both players' entire starting stacks.
        let shove_target = state.max_raise_target(seat);
        state.apply(Action::Raise(shove_target)).unwrap();
        state.apply(Action::Call).unwrap();

        assert_eq!(state.players[seat].status, Status::AllIn);
        assert_eq!(state.players[other].status, Status::AllIn);
        assert!(state.betting_round_over());
        state.advance_round().unwrap();

        assert_eq!(state.betting_round, BettingRound::Showdown);
        assert_eq!(state.community.cards.len(), 5);
        assert!(state.is_hand_over());
        assert_eq!(state.pot, 2 * STARTING_STACK);
    }

    #[test]
    fn chip_conservation_holds_through_a_fold() {
        let mut state = GameState::new_game();
        let total_before: Chips = state.players.iter().map(|p| p.stack).sum::<Chips>() + state.pot;
        state.apply(Action::Fold).unwrap();
        state.showdown().unwrap();
        let total_after: Chips = state.players.iter().map(|p| p.stack).sum::<Chips>() + state.pot;
        assert_eq!(total_before, total_after);
    }
}
