//! Hash strategies for [`VehiclePlate`]s.
//!
//! The hash containers in this crate don't go through the [`Hash`] trait and a [`Hasher`] fed with
//! bytes. They ask a [`KeyHasher`] for the whole hash of a whole key instead, which allows the
//! strategies here to look at the structure of the plate directly.
//!
//! The strategies range from terrible to good:
//!
//! * [`TrivialHasher`] looks only at the digits, so there are at most 1000 distinct hashes.
//! * [`RegionHasher`] mixes in the region, but still ignores the letters.
//! * [`StringHasher`] renders the plate and hashes the text. Good distribution, but it allocates
//!   and formats on every call.
//! * [`PolynomialHasher`] folds all the parts together without any allocation.

use std::collections::hash_map::{DefaultHasher, RandomState};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

use crate::plate::VehiclePlate;

/// Computes hashes of whole keys.
///
/// Keys that are equal must produce equal hashes. Different keys are allowed to collide, but the
/// containers get slower the more they do.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized + Hash> KeyHasher<K> for RandomState {
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = self.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

impl<K, H> KeyHasher<K> for BuildHasherDefault<H>
where
    K: ?Sized + Hash,
    H: Default + Hasher,
{
    fn hash_key(&self, key: &K) -> u64 {
        let mut hasher = self.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }
}

/// Just the digits.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrivialHasher;

impl KeyHasher<VehiclePlate> for TrivialHasher {
    fn hash_key(&self, plate: &VehiclePlate) -> u64 {
        u64::from(plate.digits())
    }
}

/// The digits and the region, each one in their own decimal places.
#[derive(Copy, Clone, Debug, Default)]
pub struct RegionHasher;

impl KeyHasher<VehiclePlate> for RegionHasher {
    fn hash_key(&self, plate: &VehiclePlate) -> u64 {
        u64::from(plate.digits()) + u64::from(plate.region()) * 1000
    }
}

/// Hashes the textual form of the plate.
///
/// This uses the standard library's SipHash with fixed keys, so the results are the same in every
/// run.
#[derive(Copy, Clone, Debug, Default)]
pub struct StringHasher;

impl KeyHasher<VehiclePlate> for StringHasher {
    fn hash_key(&self, plate: &VehiclePlate) -> u64 {
        let mut hasher = DefaultHasher::new();
        plate.to_string().hash(&mut hasher);
        hasher.finish()
    }
}

/// A base 31 polynomial over the letters, the digits and the region, in this order.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolynomialHasher;

const POLYNOMIAL_BASE: u64 = 31;

impl KeyHasher<VehiclePlate> for PolynomialHasher {
    fn hash_key(&self, plate: &VehiclePlate) -> u64 {
        let fold = |acc: u64, field: u64| acc.wrapping_mul(POLYNOMIAL_BASE).wrapping_add(field);
        let letters = plate
            .letters()
            .iter()
            .fold(0, |acc, l| fold(acc, u64::from(u32::from(*l))));
        let digits = fold(letters, u64::from(plate.digits()));
        fold(digits, u64::from(plate.region()))
    }
}

/// Picks one of the plate hash strategies at runtime.
///
/// ```rust
/// use platebench::{KeyHasher, Strategy, VehiclePlate};
///
/// let plate = VehiclePlate::new('A', 'B', 123, 'C', 77);
/// assert_eq!(123, Strategy::Trivial.hash_key(&plate));
/// assert_eq!(77_123, Strategy::Region.hash_key(&plate));
/// assert_eq!(Ok(Strategy::Polynomial), "polynomial".parse());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// [`TrivialHasher`]
    Trivial,
    /// [`RegionHasher`]
    Region,
    /// [`StringHasher`]
    String,
    /// [`PolynomialHasher`]
    Polynomial,
}

impl Strategy {
    /// All the strategies, from the worst one to the best.
    pub const ALL: [Strategy; 4] = [
        Strategy::Trivial,
        Strategy::Region,
        Strategy::String,
        Strategy::Polynomial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Trivial => "trivial",
            Strategy::Region => "region",
            Strategy::String => "string",
            Strategy::Polynomial => "polynomial",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Polynomial
    }
}

impl KeyHasher<VehiclePlate> for Strategy {
    fn hash_key(&self, plate: &VehiclePlate) -> u64 {
        match self {
            Strategy::Trivial => TrivialHasher.hash_key(plate),
            Strategy::Region => RegionHasher.hash_key(plate),
            Strategy::String => StringHasher.hash_key(plate),
            Strategy::Polynomial => PolynomialHasher.hash_key(plate),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        fmt.write_str(self.name())
    }
}

/// A name that doesn't belong to any [`Strategy`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown hash strategy {0:?}")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, UnknownStrategy> {
        Strategy::ALL
            .iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .cloned()
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    // Both globs bring a `Strategy`, ours is the one meant here.
    use super::Strategy;
    use crate::generator::PlateGenerator;
    use crate::plate::tests::valid_plate;

    #[test]
    fn polynomial_by_hand() {
        let plate = VehiclePlate::new('A', 'B', 123, 'C', 77);
        let expected = ((((65 * 31) + 66) * 31 + 67) * 31 + 123) * 31 + 77;
        assert_eq!(expected, PolynomialHasher.hash_key(&plate));
        assert_eq!(expected, Strategy::Polynomial.hash_key(&plate));
    }

    #[test]
    fn weak_ones_ignore_letters() {
        let a = VehiclePlate::new('A', 'B', 123, 'C', 77);
        let b = VehiclePlate::new('X', 'Y', 123, 'K', 77);
        let c = VehiclePlate::new('X', 'Y', 123, 'K', 777);
        assert_eq!(TrivialHasher.hash_key(&a), TrivialHasher.hash_key(&b));
        assert_eq!(TrivialHasher.hash_key(&a), TrivialHasher.hash_key(&c));
        assert_eq!(RegionHasher.hash_key(&a), RegionHasher.hash_key(&b));
        assert_eq!(777_123, RegionHasher.hash_key(&c));
        assert_ne!(StringHasher.hash_key(&a), StringHasher.hash_key(&b));
        assert_ne!(PolynomialHasher.hash_key(&a), PolynomialHasher.hash_key(&b));
    }

    #[test]
    fn trivial_collides() {
        let plates = PlateGenerator::with_seed(42).batch(10_000);
        let distinct = |strategy: Strategy| {
            plates
                .iter()
                .map(|p| strategy.hash_key(p))
                .collect::<HashSet<_>>()
                .len()
        };
        let unique_plates = plates.iter().collect::<HashSet<_>>().len();

        assert!(distinct(Strategy::Trivial) <= 1000);
        assert!(distinct(Strategy::Region) < distinct(Strategy::Polynomial));
        // 64 bits of SipHash over 10k values. A collision here would be a reason to buy a lottery
        // ticket.
        assert_eq!(unique_plates, distinct(Strategy::String));
    }

    #[test]
    fn strategy_names() {
        for strategy in &Strategy::ALL {
            assert_eq!(Ok(*strategy), strategy.to_string().parse());
            assert_eq!(Ok(*strategy), strategy.name().to_uppercase().parse());
        }
        assert_eq!(
            Err(UnknownStrategy("sha256".to_owned())),
            "sha256".parse::<Strategy>()
        );
        assert_eq!(Strategy::Polynomial, Strategy::default());
    }

    proptest! {
        #[test]
        fn equal_plates_equal_hashes(plate in valid_plate()) {
            let copy = VehiclePlate::new(
                plate.letters()[0],
                plate.letters()[1],
                plate.digits(),
                plate.letters()[2],
                plate.region(),
            );
            prop_assert_eq!(plate, copy);
            for strategy in &Strategy::ALL {
                prop_assert_eq!(strategy.hash_key(&plate), strategy.hash_key(&copy));
            }
            let random = RandomState::new();
            prop_assert_eq!(random.hash_key(&plate), random.hash_key(&copy));
        }
    }
}
