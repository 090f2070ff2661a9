use riposte_cards::Hole;
use riposte_core::Chips;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Folded,
    AllIn,
    Out,
}

#[cfg(feature = "native")]
impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use colored::Colorize;
        match self {
            Status::Active => write!(f, "{}", "P".cyan()),
            Status::AllIn => write!(f, "{}", "A".magenta()),
            Status::Folded => write!(f, "{}", "F".red()),
            Status::Out => write!(f, "{}", "O".white()),
        }
    }
}

#[cfg(not(feature = "native"))]
impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Active => write!(f, "P"),
            Status::AllIn => write!(f, "A"),
            Status::Folded => write!(f, "F"),
            Status::Out => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: Status,
    pub hole: Option<Hole>,
}

impl Player {
    pub fn new(stack: Chips) -> Player {
        Player {
            stack,
            current_bet: 0,
            status: Status::Active,
            hole: None,
        }
    }

    pub fn reset_for_hand(&mut self, hole: Hole) {
        self.current_bet = 0;
        self.hole = Some(hole);
        self.status = if self.stack > 0 {
            Status::Active
        } else {
            Status::Out
        };
    }

    pub fn reset_for_street(&mut self) {
        self.current_bet = 0;
    }

    /// total chips this player can still put in this street
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        (current_bet - self.current_bet).max(0)
    }
}
