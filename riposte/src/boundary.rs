//! The action alphabet exposed across the engine-facing API boundary:
//! four lowercase verbs, `amount` always the total chips committed to the
//! pot this street (never a delta), matching `riposte_engine::Action`'s own
//! convention so the translation is a plain rename.

use anyhow::{bail, Result};
use riposte_core::Chips;
use riposte_engine::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    Fold,
    Check,
    Call,
    Raise(Chips),
}

impl BoundaryAction {
    pub fn parse(verb: &str, amount: Option<Chips>) -> Result<Self> {
        match (verb, amount) {
            ("fold", _) => Ok(Self::Fold),
            ("check", _) => Ok(Self::Check),
            ("call", _) => Ok(Self::Call),
            ("raise", Some(target)) => Ok(Self::Raise(target)),
            ("raise", None) => bail!("raise requires an amount"),
            (other, _) => bail!("unrecognized action '{other}'"),
        }
    }

    pub fn to_engine(self) -> Action {
        match self {
            Self::Fold => Action::Fold,
            Self::Check => Action::Check,
            Self::Call => Action::Call,
            Self::Raise(target) => Action::Raise(target),
        }
    }
}

impl From<Action> for BoundaryAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Fold => Self::Fold,
            Action::Check => Self::Check,
            Action::Call => Self::Call,
            Action::Raise(target) => Self::Raise(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_without_an_amount_is_rejected() {
        assert!(BoundaryAction::parse("raise", None).is_err());
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert!(BoundaryAction::parse("shove", None).is_err());
    }

    #[test]
    fn known_verbs_round_trip_through_the_engine_action() {
        let fold = BoundaryAction::parse("fold", None).unwrap();
        assert_eq!(BoundaryAction::from(fold.to_engine()), fold);
        let raise = BoundaryAction::parse("raise", Some(20)).unwrap();
        assert_eq!(raise.to_engine(), Action::Raise(20));
    }
}
