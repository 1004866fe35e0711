/// Custom Result type for flip-flop codec operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the flipflop library, encompassing all possible error cases
/// that can occur while encoding labels, decoding paths, or projecting modification weights.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// Errors related to alphabet construction and network sizing
    AlphabetError(#[from] AlphabetError),
    /// Errors raised while encoding labels or decoding paths
    CodecError(#[from] CodecError),
    /// Errors raised when input matrices do not have the expected shape
    ShapeError(#[from] ShapeError),
    /// Generic errors, usually raised by caller-supplied read processors
    AnyhowError(#[from] anyhow::Error),
}

/// Errors specific to building and validating alphabets
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AlphabetError {
    /// The alphabet contains no symbols
    #[error("Alphabet must contain at least one symbol")]
    Empty,

    /// The same symbol appears more than once
    ///
    /// # Arguments
    /// * `char` - The repeated symbol
    #[error("Duplicate symbol in alphabet: {0:?}")]
    DuplicateSymbol(char),

    /// A symbol is not a single-byte ASCII character
    #[error("Alphabet symbols must be ASCII: {0:?}")]
    NonAsciiSymbol(char),

    /// The alphabet is too large for its flip-flop states to fit in a byte
    ///
    /// # Arguments
    /// * First `usize` - The number of symbols provided
    /// * Second `usize` - The maximum number of symbols supported
    #[error("Alphabet has {0} symbols, at most {1} are supported")]
    TooLarge(usize, usize),

    /// A modified base refers to a canonical base that is not in the alphabet
    #[error("Modified base {symbol:?} refers to unknown canonical base {canonical:?}")]
    UnknownCanonicalBase { symbol: char, canonical: char },

    /// The network output width does not correspond to any alphabet size
    ///
    /// # Arguments
    /// * `usize` - The invalid number of states
    #[error("Number of states not valid for flip-flop model: {0}")]
    InvalidStateCount(usize),

    /// The network output width corresponds to a different alphabet size
    ///
    /// # Fields
    /// * `expected` - The number of states implied by the alphabet
    /// * `got` - The number of states reported by the network
    #[error("Network has {got} flip-flop states but the alphabet requires {expected}")]
    StateCountMismatch { expected: usize, got: usize },
}

/// Errors that can occur while encoding labels or decoding flip-flop paths
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// A label or path value falls outside its valid range
    ///
    /// # Fields
    /// * `position` - Index of the offending value in its sequence
    /// * `value` - The offending value
    /// * `limit` - The exclusive upper bound for values
    #[error("Value {value} at position {position} is outside the valid range [0, {limit})")]
    InvalidAlphabetIndex {
        position: usize,
        value: u8,
        limit: usize,
    },

    /// A base sequence contained symbols outside the alphabet
    ///
    /// # Arguments
    /// * `String` - The offending sequence
    #[error("Invalid symbols found in sequence: {0}")]
    InvalidSymbol(String),
}

/// Errors raised when the modification weight inputs disagree with the path or alphabet
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// The weight matrix does not have one row per path transition
    #[error("Modification weights have {got} rows, expected {expected} for the path length")]
    ModWeightRows { expected: usize, got: usize },

    /// The weight matrix does not have one column per canonical and modified class
    #[error("Modification weights have {got} columns, expected {expected}")]
    ModWeightColumns { expected: usize, got: usize },

    /// The per-base modification counts do not cover the alphabet
    #[error("Modification counts given for {got} bases but the alphabet has {expected}")]
    CanNmodsLength { expected: usize, got: usize },
}
