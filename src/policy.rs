use rand::Rng;

use crate::{alphabet::Alphabet, error::CodecError, Result};

/// Policy for handling symbols outside the alphabet when converting bases to labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Policy {
    /// Skip the whole sequence
    #[default]
    IgnoreSequence,
    /// Return an error
    BreakOnInvalid,
    /// Replace each invalid symbol with a uniformly drawn label
    RandomDraw,
    /// Replace each invalid symbol with the label of this symbol
    SetToSymbol(u8),
}
impl Policy {
    fn fill_with_known(sequence: &[u8], alphabet: &Alphabet, val: u8, ibuf: &mut Vec<u8>) {
        for &n in sequence {
            ibuf.push(alphabet.index_of(n).unwrap_or(val));
        }
    }

    fn fill_with_random<R: Rng>(
        sequence: &[u8],
        alphabet: &Alphabet,
        rng: &mut R,
        ibuf: &mut Vec<u8>,
    ) {
        let n_symbols = alphabet.len() as u8;
        for &n in sequence {
            ibuf.push(match alphabet.index_of(n) {
                Some(label) => label,
                None => rng.random_range(0..n_symbols),
            });
        }
    }

    /// Convert a sequence containing invalid symbols into labels according to the policy
    ///
    /// First clears the label buffer to ensure that it is empty.
    ///
    /// Returns a boolean indicating whether the sequence should be processed further.
    /// Returns an error if the policy breaks on invalid symbols, or if the replacement
    /// symbol is itself not part of the alphabet.
    ///
    /// # Arguments
    /// * `sequence` - The sequence to be converted
    /// * `alphabet` - The alphabet labels index into
    /// * `ibuf` - The buffer to store the labels
    /// * `rng` - The random number generator
    pub fn handle<R: Rng>(
        &self,
        sequence: &[u8],
        alphabet: &Alphabet,
        ibuf: &mut Vec<u8>,
        rng: &mut R,
    ) -> Result<bool> {
        ibuf.clear();

        match self {
            Self::IgnoreSequence => Ok(false),
            Self::BreakOnInvalid => {
                let seq_str = String::from_utf8_lossy(sequence).into_owned();
                Err(CodecError::InvalidSymbol(seq_str).into())
            }
            Self::RandomDraw => {
                Self::fill_with_random(sequence, alphabet, rng, ibuf);
                Ok(true)
            }
            Self::SetToSymbol(symbol) => {
                let Some(val) = alphabet.index_of(*symbol) else {
                    return Err(CodecError::InvalidSymbol(char::from(*symbol).to_string()).into());
                };
                Self::fill_with_known(sequence, alphabet, val, ibuf);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_ignore_sequence() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ibuf = vec![9, 9];
        assert!(!Policy::IgnoreSequence.handle(b"ACNT", &alphabet, &mut ibuf, &mut rng)?);
        assert!(ibuf.is_empty());
        Ok(())
    }

    #[test]
    fn test_break_on_invalid() {
        let alphabet = Alphabet::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ibuf = Vec::new();
        match Policy::BreakOnInvalid.handle(b"ACNT", &alphabet, &mut ibuf, &mut rng) {
            Err(Error::CodecError(CodecError::InvalidSymbol(s))) => assert_eq!(s, "ACNT"),
            other => panic!("expected invalid symbol error, got {other:?}"),
        }
    }

    #[test]
    fn test_set_to_symbol() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ibuf = Vec::new();
        assert!(Policy::SetToSymbol(b'G').handle(b"ANNT", &alphabet, &mut ibuf, &mut rng)?);
        assert_eq!(ibuf, vec![0, 2, 2, 3]);

        assert!(Policy::SetToSymbol(b'N')
            .handle(b"ANNT", &alphabet, &mut ibuf, &mut rng)
            .is_err());
        Ok(())
    }

    #[test]
    fn test_random_draw() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ibuf = Vec::new();
        assert!(Policy::RandomDraw.handle(b"ANNNNT", &alphabet, &mut ibuf, &mut rng)?);
        assert_eq!(ibuf.len(), 6);
        assert_eq!(ibuf[0], 0);
        assert_eq!(ibuf[5], 3);
        assert!(ibuf.iter().all(|&l| l < 4));
        Ok(())
    }
}
