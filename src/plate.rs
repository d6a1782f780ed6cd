//! The [`VehiclePlate`] key and the tables describing what a valid plate looks like.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use thiserror::Error;

/// Letters allowed on a plate.
///
/// These are the ones that look the same in Latin and Cyrillic.
pub const LETTERS: &str = "ABCEHKMNOPTXY";

/// Region codes that may appear on a plate.
///
/// Not a contiguous range. Some regions got additional (usually three digit) codes once they ran
/// out of the original ones.
pub static REGIONS: [u16; 122] = [
    1, 2, 102, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 113, 14, 15, 16, 116, 17, 18, 19, 20, 21, 121,
    22, 23, 93, 123, 24, 84, 88, 124, 25, 125, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 136, 37,
    38, 85, 39, 91, 40, 41, 82, 42, 142, 43, 44, 45, 46, 47, 48, 49, 50, 90, 150, 190, 51, 52, 152,
    53, 54, 154, 55, 56, 57, 58, 59, 81, 159, 60, 61, 161, 62, 63, 163, 64, 164, 65, 66, 96, 67, 68,
    69, 70, 71, 72, 73, 173, 74, 174, 75, 80, 76, 77, 97, 99, 177, 199, 197, 777, 78, 98, 178, 79,
    83, 86, 87, 89, 94, 95,
];

/// The largest number that fits into the numeric part of a plate.
pub const MAX_DIGITS: u16 = 999;

/// A vehicle registration plate, like `AB123C77`.
///
/// Two letters, three digits, one more letter and a region code. The plate is a plain value, it
/// is never modified once created.
///
/// Plates compare lexicographically: first the letters (in the order they are written), then the
/// digits and the region last.
///
/// ```rust
/// use platebench::VehiclePlate;
///
/// let plate = VehiclePlate::new('A', 'B', 7, 'C', 77);
/// assert_eq!("AB007C77", plate.to_string());
/// assert!(plate < VehiclePlate::new('A', 'B', 7, 'C', 78));
/// assert!(plate > VehiclePlate::new('A', 'A', 999, 'Y', 777));
/// ```
// The field order matters, the derived comparisons go through them top to bottom.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VehiclePlate {
    letters: [char; 3],
    digits: u16,
    region: u16,
}

impl VehiclePlate {
    /// Creates a plate from its parts, in the order they are written on it.
    ///
    /// No validation is done here. Use [`is_valid`][VehiclePlate::is_valid] or parse the plate
    /// from a string if the parts come from an untrusted place.
    pub fn new(l0: char, l1: char, digits: u16, l2: char, region: u16) -> Self {
        Self {
            letters: [l0, l1, l2],
            digits,
            region,
        }
    }

    /// All three letters; the first two precede the digits, the last one follows them.
    pub fn letters(&self) -> [char; 3] {
        self.letters
    }

    pub fn digits(&self) -> u16 {
        self.digits
    }

    pub fn region(&self) -> u16 {
        self.region
    }

    /// Checks all the parts are from the allowed sets.
    pub fn is_valid(&self) -> bool {
        self.letters.iter().all(|l| LETTERS.contains(*l))
            && self.digits <= MAX_DIGITS
            && REGIONS.contains(&self.region)
    }
}

impl Display for VehiclePlate {
    fn fmt(&self, fmt: &mut Formatter) -> FmtResult {
        let [l0, l1, l2] = self.letters;
        write!(
            fmt,
            "{}{}{:03}{}{:02}",
            l0, l1, self.digits, l2, self.region
        )
    }
}

/// Reasons why a string is not a valid plate.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParsePlateError {
    #[error("a plate has 8 or 9 characters, not {0}")]
    Length(usize),
    #[error("letter {0:?} is not allowed on a plate")]
    Letter(char),
    #[error("{0:?} is not a three digit number")]
    Digits(String),
    #[error("{0:?} is not a known region code")]
    Region(String),
}

fn letter(c: char) -> Result<char, ParsePlateError> {
    if LETTERS.contains(c) {
        Ok(c)
    } else {
        Err(ParsePlateError::Letter(c))
    }
}

fn all_digits(s: &[char]) -> bool {
    s.iter().all(|c| c.is_ascii_digit())
}

impl FromStr for VehiclePlate {
    type Err = ParsePlateError;

    /// Parses the form produced by [`Display`], validating every part.
    ///
    /// ```rust
    /// use platebench::VehiclePlate;
    ///
    /// let plate: VehiclePlate = "XY042K777".parse().unwrap();
    /// assert_eq!(VehiclePlate::new('X', 'Y', 42, 'K', 777), plate);
    /// assert!("XY042K778".parse::<VehiclePlate>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, ParsePlateError> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 8 && chars.len() != 9 {
            return Err(ParsePlateError::Length(chars.len()));
        }

        let l0 = letter(chars[0])?;
        let l1 = letter(chars[1])?;
        let l2 = letter(chars[5])?;

        let digits = &chars[2..5];
        if !all_digits(digits) {
            return Err(ParsePlateError::Digits(digits.iter().collect()));
        }
        // Three ASCII digits always fit.
        let digits = digits
            .iter()
            .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0) as u16);

        let region_str = &chars[6..];
        let region_err = || ParsePlateError::Region(region_str.iter().collect());
        // A three digit region is never zero padded, so `001` is not the same thing as `01`.
        if !all_digits(region_str) || (region_str.len() == 3 && region_str[0] == '0') {
            return Err(region_err());
        }
        let region = region_str
            .iter()
            .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0) as u16);
        if !REGIONS.contains(&region) {
            return Err(region_err());
        }

        Ok(Self::new(l0, l1, digits, l2, region))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Any plate that could come out of the generator.
    pub(crate) fn valid_plate() -> impl Strategy<Value = VehiclePlate> + Clone {
        let letter = || (0..LETTERS.len()).prop_map(|i| LETTERS.as_bytes()[i] as char);
        (
            letter(),
            letter(),
            0..=MAX_DIGITS,
            letter(),
            (0..REGIONS.len()).prop_map(|i| REGIONS[i]),
        )
            .prop_map(|(l0, l1, digits, l2, region)| {
                VehiclePlate::new(l0, l1, digits, l2, region)
            })
    }

    #[test]
    fn regions_unique() {
        let unique = REGIONS.iter().collect::<HashSet<_>>();
        assert_eq!(REGIONS.len(), unique.len());
        assert!(REGIONS.iter().all(|r| *r > 0 && *r < 1000));
    }

    #[test]
    fn letters_ascii() {
        assert_eq!(13, LETTERS.len());
        assert!(LETTERS.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn render() {
        assert_eq!("AB123C77", VehiclePlate::new('A', 'B', 123, 'C', 77).to_string());
        assert_eq!("MN000X777", VehiclePlate::new('M', 'N', 0, 'X', 777).to_string());
        assert_eq!("OP009T01", VehiclePlate::new('O', 'P', 9, 'T', 1).to_string());
    }

    #[test]
    fn order_letters_first() {
        let low = VehiclePlate::new('A', 'Y', 999, 'Y', 777);
        let high = VehiclePlate::new('B', 'A', 0, 'A', 1);
        assert!(low < high);

        // The third letter is compared before the digits, even though it is written after them.
        let low = VehiclePlate::new('A', 'A', 999, 'A', 777);
        let high = VehiclePlate::new('A', 'A', 0, 'B', 1);
        assert!(low < high);

        let low = VehiclePlate::new('A', 'A', 5, 'A', 777);
        let high = VehiclePlate::new('A', 'A', 6, 'A', 1);
        assert!(low < high);

        let low = VehiclePlate::new('A', 'A', 5, 'A', 77);
        let high = VehiclePlate::new('A', 'A', 5, 'A', 177);
        assert!(low < high);
    }

    #[test]
    fn validity() {
        assert!(VehiclePlate::new('A', 'B', 123, 'C', 77).is_valid());
        assert!(!VehiclePlate::new('D', 'B', 123, 'C', 77).is_valid());
        assert!(!VehiclePlate::new('A', 'B', 1000, 'C', 77).is_valid());
        assert!(!VehiclePlate::new('A', 'B', 123, 'C', 100).is_valid());
    }

    #[test]
    fn parse_errors() {
        use ParsePlateError::*;

        assert_eq!(Err(Length(0)), "".parse::<VehiclePlate>());
        assert_eq!(Err(Length(7)), "AB123C1".parse::<VehiclePlate>());
        assert_eq!(Err(Letter('Z')), "AZ123C77".parse::<VehiclePlate>());
        assert_eq!(Err(Letter('4')), "AB12345C".parse::<VehiclePlate>());
        assert_eq!(Err(Digits("1X3".to_owned())), "AB1X3C77".parse::<VehiclePlate>());
        assert_eq!(Err(Region("00".to_owned())), "AB123C00".parse::<VehiclePlate>());
        assert_eq!(Err(Region("001".to_owned())), "AB123C001".parse::<VehiclePlate>());
        assert_eq!(Err(Region("7A".to_owned())), "AB123C7A".parse::<VehiclePlate>());
        assert_eq!(Err(Region("100".to_owned())), "AB123C100".parse::<VehiclePlate>());
    }

    proptest! {
        #[test]
        fn rendered_length(plate in valid_plate()) {
            let rendered = plate.to_string();
            let region_len = plate.region().to_string().len();
            prop_assert_eq!(6 + region_len.max(2), rendered.len());
            let digits = &rendered[2..5];
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(plate.digits(), digits.parse::<u16>().unwrap());
        }

        #[test]
        fn parse_rendered(plate in valid_plate()) {
            prop_assert!(plate.is_valid());
            prop_assert_eq!(Ok(plate), plate.to_string().parse());
        }

        #[test]
        fn order_matches_tuples(a in valid_plate(), b in valid_plate()) {
            let tuple = |p: &VehiclePlate| (p.letters(), p.digits(), p.region());
            prop_assert_eq!(a == b, tuple(&a) == tuple(&b));
            prop_assert_eq!(a.cmp(&b), tuple(&a).cmp(&tuple(&b)));
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }
}
