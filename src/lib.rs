//! # flipflop
//!
//! Flip-flop path codec for nanopore basecalling.
//!
//! A flip-flop network calls each symbol of an alphabet of `N` bases through two
//! alternating states: a *flip* state (`b`) and a *flop* state (`b + N`). A run
//! of repeated bases then shows up as alternating states, so a stay in one state
//! can be told apart from a second call of the same base.
//!
//! This crate covers the in-memory side of that representation:
//!
//! - [`flipflop_code`] turns base labels into flip-flop states for training;
//! - [`path_to_str`] decodes a state path back into a basecall;
//! - [`extract_mod_weights`] projects modified-base weights onto basecall positions;
//! - [`nstate_flipflop`] and [`nbase_flipflop`] relate alphabet size and network width;
//! - [`Decoder`] bundles these for per-read and parallel decoding.
//!
//! ## Example
//!
//! ```
//! use flipflop::{decode, encode, Alphabet};
//!
//! let alphabet = Alphabet::default();
//! let labels = [1, 3, 2, 3, 3, 3, 3, 1, 1];
//!
//! let path = encode(&labels, &alphabet).unwrap();
//! assert_eq!(path, vec![1, 3, 2, 3, 7, 3, 7, 1, 5]);
//! assert_eq!(decode(&path, &alphabet, true).unwrap(), "CTGTTTTCC");
//! ```

mod alphabet;
mod decode;
mod decoder;
mod encode;
mod error;
mod mods;
mod parallel;
mod policy;
mod runs;
mod sizing;

pub use alphabet::{Alphabet, ModAlphabet, ModBase, DEFAULT_ALPHABET, MAX_ALPHABET_SIZE};
pub use decode::{path_to_labels, path_to_str, path_to_str as decode};
pub use decoder::{Basecall, Decoder, DecoderBuilder, DecoderConfig};
pub use encode::{encode, encode_bases, flipflop_code, flopmask};
pub use error::{AlphabetError, CodecError, Error, Result, ShapeError};
pub use mods::{extract_mod_weights, extract_mod_weights as project_mod_weights, ModLayout};
pub use parallel::{NetworkRead, ReadProcessor, BATCH_SIZE};
pub use policy::Policy;
pub use runs::{mark_moves, mark_moves_within, run_offsets};
pub use sizing::{
    check_network_width, nbase_flipflop, nbase_flipflop as alphabet_size_for_states,
    nstate_flipflop, nstate_flipflop as states_for_alphabet_size,
};
