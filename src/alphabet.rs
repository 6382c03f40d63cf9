//! Alphabets which identifiers are drawn from.

use crate::error::{IdError, IdResult};
use crate::mask;
use std::fmt::{Display, Formatter};

/// The largest alphabet a single random byte can index without bias.
pub const MAX_ALPHABET_LEN: usize = 256;

/// The 64 URL-safe symbols (`A-Z`, `a-z`, `0-9`, `_` and `-`) used by default.
pub const URL_ALPHABET: [char; 64] = [
    '_', '-', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// An ordered sequence of 1 to 256 symbols.
///
/// Each symbol is a single `char` and is emitted as one atomic unit, no matter how many
/// bytes it occupies in UTF-8. Symbols are addressed by their position.
///
/// Duplicates are accepted but make the duplicated symbol proportionally more likely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the given symbols, keeping their order.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> IdResult<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() || symbols.len() > MAX_ALPHABET_LEN {
            return Err(IdError::InvalidAlphabet { len: symbols.len() });
        }

        Ok(Self { symbols })
    }

    /// Returns the URL-safe alphabet.
    pub fn url_safe() -> Self {
        Self {
            symbols: URL_ALPHABET.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`, as empty alphabets are rejected upon creation.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbol at the given position, if there is one.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns the smallest `2^k - 1` bitmask covering all indices of this alphabet.
    pub fn mask(&self) -> u8 {
        mask::mask_for(self.len())
    }

    /// Determines if every masked byte yields a valid index, so no byte is ever rejected.
    ///
    /// This holds for lengths which are a power of two, except for the single symbol
    /// alphabet whose mask is still `1`.
    pub fn accepts_every_byte(&self) -> bool {
        self.mask() as usize + 1 == self.len()
    }
}

impl TryFrom<&str> for Alphabet {
    type Error = IdError;

    fn try_from(symbols: &str) -> IdResult<Self> {
        Self::new(symbols.chars())
    }
}

impl TryFrom<Vec<char>> for Alphabet {
    type Error = IdError;

    fn try_from(symbols: Vec<char>) -> IdResult<Self> {
        Self::new(symbols)
    }
}

impl TryFrom<&[char]> for Alphabet {
    type Error = IdError;

    fn try_from(symbols: &[char]) -> IdResult<Self> {
        Self::new(symbols.iter().copied())
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::url_safe()
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_alphabet_contains_every_url_safe_symbol_once() {
        let alphabet = Alphabet::url_safe();
        assert_eq!(alphabet.len(), 64);
        assert!(alphabet.accepts_every_byte());
        assert_eq!(alphabet.mask(), 63);

        for symbol in ('A'..='Z').chain('a'..='z').chain('0'..='9').chain(['_', '-']) {
            assert_eq!(
                URL_ALPHABET.iter().filter(|c| **c == symbol).count(),
                1,
                "{symbol} must occur exactly once"
            );
        }
    }

    #[test]
    fn empty_and_oversized_alphabets_are_rejected() {
        assert!(matches!(
            Alphabet::try_from(""),
            Err(IdError::InvalidAlphabet { len: 0 })
        ));

        let oversized: Vec<char> = (0..257u32).filter_map(|i| char::from_u32(0x100 + i)).collect();
        assert!(matches!(
            Alphabet::try_from(oversized),
            Err(IdError::InvalidAlphabet { len: 257 })
        ));
    }

    #[test]
    fn the_largest_alphabet_is_accepted() {
        let symbols: Vec<char> = (0..256u32).filter_map(|i| char::from_u32(0x100 + i)).collect();
        let alphabet = Alphabet::try_from(symbols).unwrap();

        assert_eq!(alphabet.len(), 256);
        assert_eq!(alphabet.mask(), 255);
        assert!(alphabet.accepts_every_byte());
    }

    #[test]
    fn single_symbol_alphabets_still_reject_bytes() {
        let alphabet = Alphabet::try_from("x").unwrap();

        assert_eq!(alphabet.mask(), 1);
        assert!(!alphabet.accepts_every_byte());
        assert!(!Alphabet::try_from("0123456789").unwrap().accepts_every_byte());
    }

    #[test]
    fn multi_byte_symbols_are_counted_as_one() {
        let alphabet = Alphabet::try_from("äöü€").unwrap();

        assert_eq!(alphabet.len(), 4);
        assert_eq!(alphabet.symbol(3), Some('€'));
        assert_eq!(alphabet.symbol(4), None);
        assert_eq!(alphabet.to_string(), "äöü€");
    }
}
