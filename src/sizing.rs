//! Conversions between alphabet size and flip-flop network output width
//!
//! A flip-flop network over `nbase` symbols has `2 * nbase` states (a flip and
//! a flop state per symbol) and emits one transition score for every allowed
//! move between them: `2 * nbase * (nbase + 1)` values per block.

use crate::error::{AlphabetError, Result};

/// Number of states in the output of a flip-flop network over `nbase` symbols
///
/// # Examples
///
/// ```
/// use flipflop::nstate_flipflop;
///
/// assert_eq!(nstate_flipflop(4), 40);
/// ```
#[must_use]
pub fn nstate_flipflop(nbase: usize) -> usize {
    2 * nbase * (nbase + 1)
}

/// Number of symbols in the alphabet of a flip-flop network with `nstate` outputs
///
/// Inverts [`nstate_flipflop`]. Fails with [`AlphabetError::InvalidStateCount`]
/// if `nstate` is not the output width of any non-empty alphabet.
///
/// ```
/// use flipflop::nbase_flipflop;
///
/// assert_eq!(nbase_flipflop(40).unwrap(), 4);
/// assert!(nbase_flipflop(41).is_err());
/// ```
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn nbase_flipflop(nstate: usize) -> Result<usize> {
    let nbase_f = (0.25 + 0.5 * nstate as f64).sqrt() - 0.5;
    let nbase = nbase_f.round() as usize;

    // the float estimate only picks the candidate, exactness is checked on integers
    if nbase == 0 || nstate_flipflop(nbase) != nstate {
        return Err(AlphabetError::InvalidStateCount(nstate).into());
    }
    Ok(nbase)
}

/// Checks that a network with `nstate` outputs was built for `nbase` symbols
pub fn check_network_width(nbase: usize, nstate: usize) -> Result<()> {
    let observed = nbase_flipflop(nstate)?;
    if observed != nbase {
        return Err(AlphabetError::StateCountMismatch {
            expected: nstate_flipflop(nbase),
            got: nstate,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;

    #[test]
    fn test_known_widths() {
        assert_eq!(nstate_flipflop(1), 4);
        assert_eq!(nstate_flipflop(4), 40);
        assert_eq!(nstate_flipflop(5), 60);
        assert_eq!(nbase_flipflop(40).unwrap(), 4);
        assert_eq!(nbase_flipflop(60).unwrap(), 5);
    }

    #[test]
    fn test_round_trip() {
        for nbase in 1..=127 {
            let nstate = nstate_flipflop(nbase);
            assert_eq!(nbase_flipflop(nstate).unwrap(), nbase);
            assert_eq!(nstate_flipflop(nbase_flipflop(nstate).unwrap()), nstate);
        }
    }

    #[test]
    fn test_invalid_widths() {
        for nstate in [0, 1, 3, 5, 39, 41, 59, 61] {
            match nbase_flipflop(nstate) {
                Err(Error::AlphabetError(AlphabetError::InvalidStateCount(n))) => {
                    assert_eq!(n, nstate);
                }
                other => panic!("expected invalid state count for {nstate}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_network_width_check() {
        assert!(check_network_width(4, 40).is_ok());
        match check_network_width(4, 60) {
            Err(Error::AlphabetError(AlphabetError::StateCountMismatch { expected, got })) => {
                assert_eq!(expected, 40);
                assert_eq!(got, 60);
            }
            other => panic!("expected mismatch, got {other:?}"),
        }
        assert!(check_network_width(4, 41).is_err());
    }
}
