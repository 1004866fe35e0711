//! Flip-flop path decoding
//!
//! A path holds one flip-flop state per network block. Consecutive blocks in the
//! same state are a stay; every change of state emits the symbol of the new
//! state. Flip and flop copies of a symbol decode to the same character.

use crate::{
    alphabet::Alphabet,
    error::CodecError,
    runs::{mark_moves, select},
    Result,
};

/// Converts a flip-flop path into a basecall string
///
/// Every change of state emits one symbol. With `include_first_source` the state
/// the path starts in is emitted as well, which matches the convention used for
/// training labels; without it the first state is only the source of the first
/// transition, which matches decoders that only report moves.
///
/// Every path value must be in `[0, 2 * alphabet.len())`. An empty path decodes
/// to an empty string.
///
/// ```
/// use flipflop::{path_to_str, Alphabet};
///
/// let alphabet = Alphabet::default();
/// assert_eq!(path_to_str(&[0, 0, 1, 1, 1, 2], &alphabet, true).unwrap(), "ACG");
/// assert_eq!(path_to_str(&[0, 0, 1, 1, 1, 2], &alphabet, false).unwrap(), "CG");
/// ```
pub fn path_to_str(path: &[u8], alphabet: &Alphabet, include_first_source: bool) -> Result<String> {
    check_path(path, alphabet.len())?;
    let moves = mark_moves(path, include_first_source);
    let basecall = select(path, &moves)
        .into_iter()
        .map(|code| char::from(alphabet.symbol(code)))
        .collect();
    log::trace!(
        "decoded path of {} blocks into {} symbols",
        path.len(),
        moves.iter().filter(|&&m| m).count()
    );
    Ok(basecall)
}

/// Converts a flip-flop path into the labels of the emitted symbols
///
/// Same emission rule as [`path_to_str`], but the flop offset is removed and the
/// canonical labels in `[0, alphabet_length)` are returned.
pub fn path_to_labels(
    path: &[u8],
    alphabet_length: usize,
    include_first_source: bool,
) -> Result<Vec<u8>> {
    check_path(path, alphabet_length)?;
    let moves = mark_moves(path, include_first_source);
    Ok(select(path, &moves)
        .into_iter()
        .map(|code| (code as usize % alphabet_length) as u8)
        .collect())
}

/// Checks every path value is a valid flip-flop state for `nbase` symbols
pub(crate) fn check_path(path: &[u8], nbase: usize) -> Result<()> {
    let limit = 2 * nbase;
    match path.iter().position(|&state| state as usize >= limit) {
        Some(position) => Err(CodecError::InvalidAlphabetIndex {
            position,
            value: path[position],
            limit,
        }
        .into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;

    #[test]
    fn test_path_to_str_example() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        let path = [0, 0, 1, 1, 1, 2];
        assert_eq!(path_to_str(&path, &alphabet, true)?, "ACG");
        assert_eq!(path_to_str(&path, &alphabet, false)?, "CG");
        Ok(())
    }

    #[test]
    fn test_flop_states_decode_to_same_symbol() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        // C C C C as flip, flop, flip, flop
        let path = [1, 1, 5, 5, 1, 5, 5, 2];
        assert_eq!(path_to_str(&path, &alphabet, true)?, "CCCCG");
        assert_eq!(path_to_str(&path, &alphabet, false)?, "CCCG");
        Ok(())
    }

    #[test]
    fn test_empty_and_single() -> anyhow::Result<()> {
        let alphabet = Alphabet::default();
        assert_eq!(path_to_str(&[], &alphabet, true)?, "");
        assert_eq!(path_to_str(&[], &alphabet, false)?, "");
        assert_eq!(path_to_str(&[6, 6, 6], &alphabet, true)?, "G");
        assert_eq!(path_to_str(&[6, 6, 6], &alphabet, false)?, "");
        Ok(())
    }

    #[test]
    fn test_custom_alphabet() -> anyhow::Result<()> {
        let alphabet = Alphabet::new("ACGTZ")?;
        let path = [4, 9, 9, 0, 3, 8];
        assert_eq!(path_to_str(&path, &alphabet, true)?, "ZZATT");
        assert_eq!(path_to_labels(&path, alphabet.len(), true)?, vec![4, 4, 0, 3, 3]);
        Ok(())
    }

    #[test]
    fn test_path_to_labels() -> anyhow::Result<()> {
        let path = [0, 0, 4, 1, 1, 5, 7];
        assert_eq!(path_to_labels(&path, 4, true)?, vec![0, 0, 1, 1, 3]);
        assert_eq!(path_to_labels(&path, 4, false)?, vec![0, 1, 1, 3]);
        Ok(())
    }

    #[test]
    fn test_out_of_range_state() {
        let alphabet = Alphabet::default();
        match path_to_str(&[0, 1, 8, 2], &alphabet, true) {
            Err(Error::CodecError(CodecError::InvalidAlphabetIndex {
                position,
                value,
                limit,
            })) => {
                assert_eq!(position, 2);
                assert_eq!(value, 8);
                assert_eq!(limit, 8);
            }
            other => panic!("expected invalid alphabet index, got {other:?}"),
        }
    }
}
