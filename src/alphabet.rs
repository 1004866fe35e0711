//! Alphabets for flip-flop coding
//!
//! An [`Alphabet`] is the ordered set of canonical symbols a network calls.
//! Label `i` stands for the `i`-th symbol; flip-flop state `i + N` is the flop
//! copy of the same symbol.
//!
//! A [`ModAlphabet`] extends the canonical alphabet with modified symbols. Each
//! modified symbol is a variant of one canonical base, and the network reports
//! its weight in the block of columns belonging to that base.

use std::fmt;

use rand::Rng;

use crate::{
    error::{AlphabetError, Result},
    mods::ModLayout,
    policy::Policy,
};

/// Alphabet used when the caller does not provide one
pub const DEFAULT_ALPHABET: &str = "ACGT";

/// Largest supported alphabet: flop states `N..2N` must fit in a `u8`
pub const MAX_ALPHABET_SIZE: usize = 127;

/// An ordered collection of distinct single-byte ASCII symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<u8>,
}
impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_ALPHABET.as_bytes().to_vec(),
        }
    }
}
impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl TryFrom<&str> for Alphabet {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl Alphabet {
    /// Creates an alphabet from a string of symbols
    ///
    /// Fails if the string is empty, contains non-ASCII or repeated symbols, or
    /// holds more than [`MAX_ALPHABET_SIZE`] symbols.
    ///
    /// ```
    /// use flipflop::Alphabet;
    ///
    /// let alphabet = Alphabet::new("ACGT").unwrap();
    /// assert_eq!(alphabet.len(), 4);
    /// assert!(Alphabet::new("ACGA").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(AlphabetError::Empty.into());
        }
        let mut seen = [false; 128];
        for c in symbols.chars() {
            if !c.is_ascii() {
                return Err(AlphabetError::NonAsciiSymbol(c).into());
            }
            let idx = c as usize;
            if seen[idx] {
                return Err(AlphabetError::DuplicateSymbol(c).into());
            }
            seen[idx] = true;
        }
        if symbols.len() > MAX_ALPHABET_SIZE {
            return Err(AlphabetError::TooLarge(symbols.len(), MAX_ALPHABET_SIZE).into());
        }
        Ok(Self {
            symbols: symbols.as_bytes().to_vec(),
        })
    }

    /// Number of symbols in the alphabet
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: an alphabet cannot be constructed without symbols
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // symbols are validated as ASCII on construction
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }

    /// Label of `symbol`, if it belongs to the alphabet
    #[must_use]
    pub fn index_of(&self, symbol: u8) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&s| s == symbol)
            .map(|i| i as u8)
    }

    /// Symbol for a label or flip-flop state, ignoring the flop offset
    ///
    /// Callers are expected to have range-checked `code` against `2 * len()`.
    #[must_use]
    pub fn symbol(&self, code: u8) -> u8 {
        self.symbols[code as usize % self.symbols.len()]
    }

    /// Number of flip-flop network outputs for this alphabet
    #[must_use]
    pub fn nstate(&self) -> usize {
        crate::sizing::nstate_flipflop(self.len())
    }

    /// Converts a base sequence into labels
    ///
    /// First clears the label buffer. Sequences made only of alphabet symbols are
    /// converted directly; otherwise the [`Policy`] decides what happens.
    ///
    /// Returns whether the buffer holds labels that should be processed further.
    pub fn labels_from_bases<R: Rng>(
        &self,
        sequence: &[u8],
        policy: Policy,
        rng: &mut R,
        ibuf: &mut Vec<u8>,
    ) -> Result<bool> {
        ibuf.clear();
        for &base in sequence {
            match self.index_of(base) {
                Some(label) => ibuf.push(label),
                None => return policy.handle(sequence, self, ibuf, rng),
            }
        }
        Ok(true)
    }
}

/// A modified variant of a canonical base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModBase {
    /// Single-character code of the modified base
    pub symbol: char,
    /// The canonical base this symbol is a variant of
    pub canonical: char,
    /// Human readable name, e.g. `5mC`
    pub long_name: String,
}
impl ModBase {
    pub fn new(symbol: char, canonical: char, long_name: impl Into<String>) -> Self {
        Self {
            symbol,
            canonical,
            long_name: long_name.into(),
        }
    }
}

/// A canonical alphabet together with the modified bases a network can call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModAlphabet {
    canonical: Alphabet,
    /// Sorted by canonical base, order of declaration kept within each base
    mods: Vec<ModBase>,
}
impl From<Alphabet> for ModAlphabet {
    fn from(canonical: Alphabet) -> Self {
        Self {
            canonical,
            mods: Vec::new(),
        }
    }
}
impl ModAlphabet {
    /// Creates a modified-base alphabet
    ///
    /// Every modified symbol must name a canonical base of `canonical` and must not
    /// collide with a canonical symbol or another modified symbol.
    ///
    /// ```
    /// use flipflop::{Alphabet, ModAlphabet, ModBase};
    ///
    /// let alphabet = ModAlphabet::new(
    ///     Alphabet::default(),
    ///     vec![ModBase::new('m', 'C', "5mC"), ModBase::new('a', 'A', "6mA")],
    /// )
    /// .unwrap();
    /// assert_eq!(alphabet.can_nmods(), vec![1, 1, 0, 0]);
    /// assert_eq!(alphabet.mod_symbols(), vec!['a', 'm']);
    /// ```
    pub fn new(canonical: Alphabet, mods: Vec<ModBase>) -> Result<Self> {
        let mut seen = [false; 128];
        for &s in canonical.symbols() {
            seen[s as usize] = true;
        }
        for m in &mods {
            if !m.symbol.is_ascii() {
                return Err(AlphabetError::NonAsciiSymbol(m.symbol).into());
            }
            if !m.canonical.is_ascii() || canonical.index_of(m.canonical as u8).is_none() {
                return Err(AlphabetError::UnknownCanonicalBase {
                    symbol: m.symbol,
                    canonical: m.canonical,
                }
                .into());
            }
            if seen[m.symbol as usize] {
                return Err(AlphabetError::DuplicateSymbol(m.symbol).into());
            }
            seen[m.symbol as usize] = true;
        }

        let mut mods = mods;
        // stable sort keeps the declared variant order within each base
        mods.sort_by_key(|m| canonical.index_of(m.canonical as u8));
        Ok(Self { canonical, mods })
    }

    #[must_use]
    pub fn canonical(&self) -> &Alphabet {
        &self.canonical
    }

    /// Modified bases in output column order
    #[must_use]
    pub fn mods(&self) -> &[ModBase] {
        &self.mods
    }

    /// Number of modified variants of each canonical base, in alphabet order
    #[must_use]
    pub fn can_nmods(&self) -> Vec<usize> {
        let mut counts = vec![0; self.canonical.len()];
        for m in &self.mods {
            if let Some(idx) = self.canonical.index_of(m.canonical as u8) {
                counts[idx as usize] += 1;
            }
        }
        counts
    }

    /// Symbols labelling the columns of projected modification scores
    #[must_use]
    pub fn mod_symbols(&self) -> Vec<char> {
        self.mods.iter().map(|m| m.symbol).collect()
    }

    /// Column layout of the network's modification weights
    #[must_use]
    pub fn layout(&self) -> ModLayout {
        ModLayout::new(self.can_nmods())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.as_str(), "ACGT");
        assert_eq!(alphabet.nstate(), 40);
        assert_eq!(alphabet.to_string(), "ACGT");
    }

    #[test]
    fn test_invalid_alphabets() {
        let cases = [
            ("", AlphabetError::Empty),
            ("ACCT", AlphabetError::DuplicateSymbol('C')),
            ("ACμ", AlphabetError::NonAsciiSymbol('μ')),
        ];
        for (symbols, expected) in cases {
            match Alphabet::new(symbols) {
                Err(Error::AlphabetError(e)) => assert_eq!(e, expected),
                other => panic!("expected {expected:?} for {symbols:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_too_large() {
        let symbols: String = (0u8..128).map(char::from).collect();
        match Alphabet::new(&symbols) {
            Err(Error::AlphabetError(AlphabetError::TooLarge(128, 127))) => {}
            other => panic!("expected too large, got {other:?}"),
        }
        assert!(Alphabet::new(&symbols[..127]).is_ok());
    }

    #[test]
    fn test_symbol_lookup() -> anyhow::Result<()> {
        let alphabet = Alphabet::new("ACGTZ")?;
        assert_eq!(alphabet.index_of(b'Z'), Some(4));
        assert_eq!(alphabet.index_of(b'N'), None);
        assert_eq!(alphabet.symbol(1), b'C');
        assert_eq!(alphabet.symbol(6), b'C');
        assert_eq!(alphabet.symbol(9), b'Z');
        Ok(())
    }

    #[test]
    fn test_labels_from_bases() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ibuf = Vec::new();

        assert!(alphabet.labels_from_bases(b"GATTACA", Policy::BreakOnInvalid, &mut rng, &mut ibuf)?);
        assert_eq!(ibuf, vec![2, 0, 3, 3, 0, 1, 0]);

        assert!(!alphabet.labels_from_bases(b"GANTACA", Policy::default(), &mut rng, &mut ibuf)?);
        assert!(ibuf.is_empty());

        assert!(alphabet.labels_from_bases(b"GANT", Policy::SetToSymbol(b'C'), &mut rng, &mut ibuf)?);
        assert_eq!(ibuf, vec![2, 0, 1, 3]);
        Ok(())
    }

    #[test]
    fn test_mod_alphabet() -> anyhow::Result<()> {
        let alphabet = ModAlphabet::new(
            Alphabet::default(),
            vec![
                ModBase::new('h', 'C', "5hmC"),
                ModBase::new('a', 'A', "6mA"),
                ModBase::new('m', 'C', "5mC"),
            ],
        )?;
        assert_eq!(alphabet.can_nmods(), vec![1, 2, 0, 0]);
        assert_eq!(alphabet.mod_symbols(), vec!['a', 'h', 'm']);
        assert_eq!(alphabet.layout().n_mods(), 3);
        assert_eq!(alphabet.layout().n_weight_columns(), 7);

        let plain = ModAlphabet::from(Alphabet::default());
        assert_eq!(plain.can_nmods(), vec![0, 0, 0, 0]);
        assert!(plain.mod_symbols().is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_mod_alphabet() {
        match ModAlphabet::new(Alphabet::default(), vec![ModBase::new('m', 'U', "5mU")]) {
            Err(Error::AlphabetError(AlphabetError::UnknownCanonicalBase { symbol, canonical })) => {
                assert_eq!(symbol, 'm');
                assert_eq!(canonical, 'U');
            }
            other => panic!("expected unknown canonical base, got {other:?}"),
        }
        assert!(ModAlphabet::new(Alphabet::default(), vec![ModBase::new('C', 'C', "C")]).is_err());
        assert!(ModAlphabet::new(
            Alphabet::default(),
            vec![ModBase::new('m', 'C', "5mC"), ModBase::new('m', 'A', "m6A")]
        )
        .is_err());
    }
}
