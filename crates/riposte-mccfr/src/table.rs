use crate::infoset::InfoSet;
use crate::key::InfoKey;
use riposte_abstraction::AbstractAction;
use std::collections::HashMap;

/// the dense hash table of information sets keyed by their 128-bit hash,
/// growing monotonically over the course of training. Streaming this to
/// disk once it exceeds RAM capacity is a persistence-layer concern, not
/// this crate's (see `riposte-persist`).
#[derive(Debug, Default)]
pub struct InfoSetTable {
    entries: HashMap<InfoKey, InfoSet>,
}

impl InfoSetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// first visit to `key` allocates a fresh, zeroed `InfoSet` over
    /// `legal`; subsequent visits return the same entry regardless of
    /// what `legal` is passed (the legal set at a given info-set key is
    /// assumed stable across visits, per the abstraction's determinism).
    pub fn get_or_create(&mut self, key: InfoKey, legal: &[AbstractAction]) -> &mut InfoSet {
        self.entries
            .entry(key)
            .or_insert_with(|| InfoSet::new(legal.to_vec()))
    }

    pub fn get(&self, key: &InfoKey) -> Option<&InfoSet> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InfoKey, &InfoSet)> {
        self.entries.iter()
    }

    pub fn insert(&mut self, key: InfoKey, info: InfoSet) {
        self.entries.insert(key, info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riposte_abstraction::preflop_bucket_of;
    use riposte_cards::{HandClass, Rank, Street};

    #[test]
    fn repeated_lookups_return_the_same_infoset() {
        let mut table = InfoSetTable::new();
        let bucket = preflop_bucket_of(HandClass::Pair(Rank::Ace));
        let key = InfoKey::build(0, Street::Preflop, bucket, "", 0);
        table.get_or_create(key, &[AbstractAction::Fold, AbstractAction::Call]);
        assert_eq!(table.len(), 1);
        table.get_or_create(key, &[AbstractAction::Fold, AbstractAction::Call]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn distinct_keys_allocate_distinct_entries() {
        let mut table = InfoSetTable::new();
        let bucket = preflop_bucket_of(HandClass::Pair(Rank::Ace));
        let a = InfoKey::build(0, Street::Preflop, bucket, "", 0);
        let b = InfoKey::build(1, Street::Preflop, bucket, "", 0);
        table.get_or_create(a, &[AbstractAction::Fold]);
        table.get_or_create(b, &[AbstractAction::Fold]);
        assert_eq!(table.len(), 2);
    }
}
