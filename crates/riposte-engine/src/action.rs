use riposte_core::Chips;

/// an action taken by a player at the table. `amount` in `Raise`/`Call` is
/// the player's total chips committed this street after the action, not the
/// increment — matching `GameState.current_bet` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Chips),
}

#[cfg(feature = "native")]
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        match self {
            Action::Fold => write!(f, "{}", "FOLD".red()),
            Action::Check => write!(f, "{}", "CHECK".cyan()),
            Action::Call => write!(f, "{}", "CALL".yellow()),
            Action::Raise(to) => write!(f, "{}", format!("RAISE to {to}").green()),
        }
    }
}

#[cfg(not(feature = "native"))]
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::Raise(to) => write!(f, "RAISE to {to}"),
        }
    }
}

/// one entry in `GameState.action_history`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRecord {
    pub player: usize,
    pub action: Action,
    pub amount: Chips,
    pub round: riposte_cards::Street,
    pub pot_after: Chips,
}
