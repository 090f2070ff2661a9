use anyhow::{Context, Result};
use riposte_core::Chips;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// one line of a hand's action log, in the canonical verb set the grammar
/// requires. `raise` always logs the new total, not the delta, matching the
/// engine-facing action alphabet's `amount` convention.
pub enum LoggedAction {
    PostsSmallBlind(Chips),
    PostsBigBlind(Chips),
    Folds,
    Checks,
    Calls(Chips),
    RaisesTo { added: Chips, total: Chips },
    Bets(Chips),
}

impl std::fmt::Display for LoggedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggedAction::PostsSmallBlind(amount) => write!(f, "posts small blind {amount}"),
            LoggedAction::PostsBigBlind(amount) => write!(f, "posts big blind {amount}"),
            LoggedAction::Folds => write!(f, "folds"),
            LoggedAction::Checks => write!(f, "checks"),
            LoggedAction::Calls(amount) => write!(f, "calls ${amount}"),
            LoggedAction::RaisesTo { added, total } => write!(f, "raises ${added} to ${total}"),
            LoggedAction::Bets(amount) => write!(f, "bets ${amount}"),
        }
    }
}

/// append-only hand-history log. Disabled by default (training never opens
/// one, to keep the allocation path allocation-light); play mode opts in by
/// constructing one with a real path.
pub struct HandHistoryWriter {
    file: Option<File>,
    next_hand_number: u64,
}

impl HandHistoryWriter {
    /// training mode: every call is a no-op.
    pub fn disabled() -> Self {
        Self {
            file: None,
            next_hand_number: 1,
        }
    }

    pub fn enabled(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .with_context(|| format!("opening hand history log {}", path.as_ref().display()))?;
        Ok(Self {
            file: Some(file),
            next_hand_number: 1,
        })
    }

    pub fn start_hand(&mut self, players: [&str; 2], stacks: [Chips; 2]) -> Result<()> {
        let Some(file) = self.file.as_mut() else { return Ok(()) };
        writeln!(file, "Riposte Hand #{:05}", self.next_hand_number)?;
        writeln!(file, "Seat 1: {} ({})", players[0], stacks[0])?;
        writeln!(file, "Seat 2: {} ({})", players[1], stacks[1])?;
        self.next_hand_number += 1;
        Ok(())
    }

    pub fn log_action(&mut self, seat_name: &str, action: &LoggedAction) -> Result<()> {
        let Some(file) = self.file.as_mut() else { return Ok(()) };
        writeln!(file, "{seat_name}: {action}")?;
        Ok(())
    }

    pub fn close_hand(&mut self, summary: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else { return Ok(()) };
        writeln!(file, "*** SUMMARY ***")?;
        writeln!(file, "{summary}")?;
        writeln!(file)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_writer_never_touches_disk() {
        let mut writer = HandHistoryWriter::disabled();
        writer.start_hand(["sb", "bb"], [200, 200]).unwrap();
        writer.log_action("sb", &LoggedAction::Folds).unwrap();
        writer.close_hand("bb wins 4").unwrap();
    }

    #[test]
    fn enabled_writer_appends_the_canonical_verb_forms() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("riposte-hh-test-{}.log", std::process::id()));
        {
            let mut writer = HandHistoryWriter::enabled(&path).unwrap();
            writer.start_hand(["sb", "bb"], [200, 200]).unwrap();
            writer.log_action("sb", &LoggedAction::PostsSmallBlind(1)).unwrap();
            writer.log_action("bb", &LoggedAction::PostsBigBlind(2)).unwrap();
            writer.log_action("sb", &LoggedAction::Folds).unwrap();
            writer.close_hand("bb wins 2").unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(contents.starts_with("Riposte Hand #1"));
        assert!(contents.contains("posts small blind 1"));
        assert!(contents.contains("posts big blind 2"));
        assert!(contents.contains("folds"));
    }
}
