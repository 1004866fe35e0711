//! Flip-flop encoding of label sequences
//!
//! Within a run of identical labels the flip-flop code alternates between the
//! flip state (`label`) and the flop state (`label + N`), starting with flip.
//! This keeps consecutive repeats of a base distinguishable as separate calls.

use rand::Rng;

use crate::{
    alphabet::{Alphabet, MAX_ALPHABET_SIZE},
    error::{AlphabetError, CodecError},
    policy::Policy,
    runs::run_offsets,
    Result,
};

/// Marks the labels sitting at odd offsets within their run of identical labels
///
/// The first element of every run is false, and the flag then alternates along
/// the run. Runs of length one are always false.
///
/// ```
/// use flipflop::flopmask;
///
/// let labels = [1, 3, 2, 3, 3, 3, 3, 1, 1];
/// let fm = flopmask(&labels);
/// assert_eq!(fm, [false, false, false, false, true, false, true, false, true]);
/// ```
#[must_use]
pub fn flopmask(labels: &[u8]) -> Vec<bool> {
    run_offsets(labels)
        .into_iter()
        .map(|offset| offset % 2 == 1)
        .collect()
}

/// Adds `alphabet_length` to the labels in flop position
///
/// Every label must be in `[0, alphabet_length)`, and `alphabet_length` may not
/// exceed [`MAX_ALPHABET_SIZE`]. The returned states are in
/// `[0, 2 * alphabet_length)`.
///
/// ```
/// use flipflop::flipflop_code;
///
/// let labels = [1, 3, 2, 3, 3, 3, 3, 1, 1];
/// assert_eq!(flipflop_code(&labels, 4).unwrap(), vec![1, 3, 2, 3, 7, 3, 7, 1, 5]);
/// ```
pub fn flipflop_code(labels: &[u8], alphabet_length: usize) -> Result<Vec<u8>> {
    if alphabet_length > MAX_ALPHABET_SIZE {
        return Err(AlphabetError::TooLarge(alphabet_length, MAX_ALPHABET_SIZE).into());
    }
    check_labels(labels, alphabet_length)?;
    let offset = alphabet_length as u8;
    Ok(labels
        .iter()
        .zip(flopmask(labels))
        .map(|(&label, flop)| if flop { label + offset } else { label })
        .collect())
}

/// Flip-flop codes `labels` over `alphabet`
pub fn encode(labels: &[u8], alphabet: &Alphabet) -> Result<Vec<u8>> {
    flipflop_code(labels, alphabet.len())
}

/// Converts a base sequence to labels and flip-flop codes it
///
/// Returns `None` when the [`Policy`] skips the sequence.
pub fn encode_bases<R: Rng>(
    sequence: &[u8],
    alphabet: &Alphabet,
    policy: Policy,
    rng: &mut R,
) -> Result<Option<Vec<u8>>> {
    let mut labels = Vec::with_capacity(sequence.len());
    if !alphabet.labels_from_bases(sequence, policy, rng, &mut labels)? {
        return Ok(None);
    }
    encode(&labels, alphabet).map(Some)
}

fn check_labels(labels: &[u8], alphabet_length: usize) -> Result<()> {
    match labels
        .iter()
        .position(|&label| label as usize >= alphabet_length)
    {
        Some(position) => Err(CodecError::InvalidAlphabetIndex {
            position,
            value: labels[position],
            limit: alphabet_length,
        }
        .into()),
        None => Ok(()),
    }
}
