/// fixed cutoffs (in big blinds) an info-set key's pot size snaps to, per
/// the information-set manager contract: `{≤2, ≤5, ≤10, ≤20, ≤50, ≤100, >100}`.
pub const POT_BUCKET_CUTOFFS_BB: [f32; 6] = [2.0, 5.0, 10.0, 20.0, 50.0, 100.0];
pub const NUM_POT_BUCKETS: usize = POT_BUCKET_CUTOFFS_BB.len() + 1;

/// maps a pot size (in big blinds) onto its bucket index `0..NUM_POT_BUCKETS`.
pub fn pot_bucket_of(pot_bb: f32) -> u8 {
    POT_BUCKET_CUTOFFS_BB
        .iter()
        .position(|&cutoff| pot_bb <= cutoff)
        .unwrap_or(POT_BUCKET_CUTOFFS_BB.len()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_pots_land_in_the_first_bucket() {
        assert_eq!(pot_bucket_of(1.5), 0);
        assert_eq!(pot_bucket_of(2.0), 0);
    }

    #[test]
    fn huge_pots_land_in_the_overflow_bucket() {
        assert_eq!(pot_bucket_of(500.0), NUM_POT_BUCKETS as u8 - 1);
    }

    #[test]
    fn bucket_boundaries_are_inclusive_on_the_low_side() {
        assert_eq!(pot_bucket_of(10.0), 2);
        assert_eq!(pot_bucket_of(10.01), 3);
    }
}
