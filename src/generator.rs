//! Random, but reproducible, plates.

use std::iter;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::plate::{VehiclePlate, LETTERS, MAX_DIGITS, REGIONS};

/// The seed used by [`PlateGenerator::new`].
///
/// It's the default seed of the Mersenne Twister, for old times' sake.
pub const DEFAULT_SEED: u64 = 5489;

/// Generates random valid plates.
///
/// Each plate is drawn independently of the previous ones, so duplicates happen. Two generators
/// created with the same seed produce the same sequence of plates.
///
/// ```rust
/// use platebench::PlateGenerator;
///
/// let mut first = PlateGenerator::new();
/// let mut second = PlateGenerator::new();
/// let plate = first.generate();
/// assert!(plate.is_valid());
/// assert_eq!(plate, second.generate());
/// ```
#[derive(Clone, Debug)]
pub struct PlateGenerator {
    rng: StdRng,
}

impl PlateGenerator {
    /// A generator seeded with the [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One of the [`LETTERS`].
    pub fn generate_char(&mut self) -> char {
        let idx = self.rng.gen_range(0, LETTERS.len());
        // The letters are all ASCII.
        LETTERS.as_bytes()[idx] as char
    }

    /// A number in `0..=999`.
    pub fn generate_digits(&mut self) -> u16 {
        self.rng.gen_range(0, MAX_DIGITS + 1)
    }

    /// One of the [`REGIONS`], each of them equally likely.
    pub fn generate_region(&mut self) -> u16 {
        REGIONS[self.rng.gen_range(0, REGIONS.len())]
    }

    pub fn generate(&mut self) -> VehiclePlate {
        let l0 = self.generate_char();
        let l1 = self.generate_char();
        let digits = self.generate_digits();
        let l2 = self.generate_char();
        let region = self.generate_region();
        VehiclePlate::new(l0, l1, digits, l2, region)
    }

    /// Generates `count` plates in a row.
    pub fn batch(&mut self, count: usize) -> Vec<VehiclePlate> {
        iter::repeat_with(|| self.generate()).take(count).collect()
    }
}

impl Default for PlateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn deterministic() {
        let first = PlateGenerator::new().batch(1000);
        let second = PlateGenerator::default().batch(1000);
        assert_eq!(first, second);

        let other = PlateGenerator::with_seed(DEFAULT_SEED + 1).batch(1000);
        assert_ne!(first, other);
    }

    #[test]
    fn batch_continues_sequence() {
        let mut one_by_one = PlateGenerator::new();
        let expected = (0..10).map(|_| one_by_one.generate()).collect::<Vec<_>>();

        let mut batched = PlateGenerator::new();
        let mut plates = batched.batch(4);
        plates.extend(batched.batch(6));
        assert_eq!(expected, plates);
    }

    #[test]
    fn covers_everything() {
        let mut generator = PlateGenerator::new();
        let letters = (0..1000)
            .map(|_| generator.generate_char())
            .collect::<HashSet<_>>();
        assert_eq!(LETTERS.chars().collect::<HashSet<_>>(), letters);

        let regions = (0..10_000)
            .map(|_| generator.generate_region())
            .collect::<HashSet<_>>();
        assert_eq!(REGIONS.iter().cloned().collect::<HashSet<_>>(), regions);

        let digits = (0..100_000)
            .map(|_| generator.generate_digits())
            .collect::<HashSet<_>>();
        assert_eq!(1000, digits.len());
        assert!(digits.contains(&0));
        assert!(digits.contains(&MAX_DIGITS));
    }

    proptest! {
        #[test]
        fn only_valid(seed in any::<u64>()) {
            let mut generator = PlateGenerator::with_seed(seed);
            for plate in generator.batch(100) {
                prop_assert!(plate.is_valid(), "Invalid plate {}", plate);
                prop_assert!(REGIONS.contains(&plate.region()));
            }
        }
    }
}
