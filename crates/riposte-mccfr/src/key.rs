use riposte_abstraction::CardBucket;
use riposte_cards::Street;

/// stable, platform-independent 128-bit hash identifying an information set:
/// `(player, street, card_bucket, normalized_history_string, pot_bucket)`.
/// FNV-1a is used instead of `std::hash::DefaultHasher` because the latter's
/// output is only guaranteed stable within a single process, and this key is
/// meant to round-trip through a persisted strategy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoKey(pub u128);

const FNV_OFFSET: u128 = 0x6c62272e07bb014262b821756295c58d;
const FNV_PRIME: u128 = 0x0000000001000000000000000000013b;

fn fnv1a_128(bytes: &[u8]) -> u128 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= byte as u128;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl InfoKey {
    pub fn build(player: usize, street: Street, card_bucket: CardBucket, history: &str, pot_bucket: u8) -> Self {
        let mut bytes = Vec::with_capacity(history.len() + 8);
        bytes.push(player as u8);
        bytes.push(street as u8);
        bytes.extend_from_slice(&u16::from(card_bucket).to_le_bytes());
        bytes.push(pot_bucket);
        bytes.push(0xff); // separator between the fixed header and the history string
        bytes.extend_from_slice(history.as_bytes());
        Self(fnv1a_128(&bytes))
    }
}

impl std::fmt::Display for InfoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl From<InfoKey> for u128 {
    fn from(key: InfoKey) -> u128 {
        key.0
    }
}

impl From<u128> for InfoKey {
    fn from(value: u128) -> InfoKey {
        InfoKey(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_tuples_hash_identically() {
        let bucket = CardBucket::preflop(3);
        let a = InfoKey::build(0, Street::Preflop, bucket, "raise_3.0|call", 1);
        let b = InfoKey::build(0, Street::Preflop, bucket, "raise_3.0|call", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_history_changes_the_key() {
        let bucket = CardBucket::preflop(3);
        let a = InfoKey::build(0, Street::Preflop, bucket, "raise_3.0|call", 1);
        let b = InfoKey::build(0, Street::Preflop, bucket, "raise_3.0|fold", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn differing_player_changes_the_key() {
        let bucket = CardBucket::preflop(3);
        let a = InfoKey::build(0, Street::Preflop, bucket, "call", 1);
        let b = InfoKey::build(1, Street::Preflop, bucket, "call", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn roundtrips_through_u128() {
        let bucket = CardBucket::preflop(7);
        let key = InfoKey::build(1, Street::River, bucket, "check|bet_1.0", 6);
        assert_eq!(key, InfoKey::from(u128::from(key)));
    }
}
