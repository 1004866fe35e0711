//! Configured decoding of network output
//!
//! [`Decoder`] bundles everything needed to turn one read's network output into
//! a [`Basecall`]: the alphabet, the first-source convention, and the layout of
//! modification weights. It is built with a [`DecoderBuilder`], which validates
//! the pieces against each other (and, optionally, against the network width)
//! once, so per-read decoding only checks the read itself.

use ndarray::{s, Array2, ArrayBase, Data, Ix2};

use crate::{
    alphabet::{Alphabet, ModAlphabet, ModBase},
    decode::{path_to_labels, path_to_str},
    error::{Result, ShapeError},
    mods::ModLayout,
    sizing::check_network_width,
};

/// The decoded output of one read
#[derive(Debug, Clone, PartialEq)]
pub struct Basecall {
    /// Decoded symbols
    pub sequence: String,

    /// Modification scores, one row per symbol of `sequence` and one column per
    /// modified variant. `None` when no weights were decoded.
    pub mod_scores: Option<Array2<f32>>,
}
impl Basecall {
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Settings shared by every read a [`Decoder`] handles
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Canonical alphabet the network calls
    pub alphabet: Alphabet,

    /// Emit the state a path starts in
    pub include_first_source: bool,

    /// Column layout of modification weights
    pub layout: ModLayout,

    /// Modified symbols in projected column order, when known
    pub mod_symbols: Vec<char>,

    /// Output width of the network, when known
    pub network_states: Option<usize>,
}
impl Default for DecoderConfig {
    fn default() -> Self {
        let alphabet = Alphabet::default();
        let layout = ModLayout::new(vec![0; alphabet.len()]);
        Self {
            alphabet,
            include_first_source: true,
            layout,
            mod_symbols: Vec::new(),
            network_states: None,
        }
    }
}

/// Where the modification layout of a decoder comes from
#[derive(Debug, Clone)]
enum ModSource {
    Bases(Vec<ModBase>),
    Counts(Vec<usize>),
}

#[derive(Debug, Clone, Default)]
pub struct DecoderBuilder {
    alphabet: Option<Alphabet>,
    include_first_source: Option<bool>,
    mods: Option<ModSource>,
    network_states: Option<usize>,
}
impl DecoderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical alphabet, defaults to `ACGT`
    #[must_use]
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Whether the first state of a path is emitted, defaults to `true`
    #[must_use]
    pub fn include_first_source(mut self, include_first_source: bool) -> Self {
        self.include_first_source = Some(include_first_source);
        self
    }

    /// Canonical alphabet and modified bases together
    ///
    /// Replaces any alphabet or modification counts set earlier.
    #[must_use]
    pub fn mod_alphabet(mut self, mod_alphabet: ModAlphabet) -> Self {
        self.alphabet = Some(mod_alphabet.canonical().clone());
        self.mods = Some(ModSource::Bases(mod_alphabet.mods().to_vec()));
        self
    }

    /// Number of modified variants per canonical base, without symbols
    ///
    /// Replaces any modified bases set earlier.
    #[must_use]
    pub fn can_nmods(mut self, can_nmods: Vec<usize>) -> Self {
        self.mods = Some(ModSource::Counts(can_nmods));
        self
    }

    /// Output width of the network, checked against the alphabet on build
    #[must_use]
    pub fn network_states(mut self, nstate: usize) -> Self {
        self.network_states = Some(nstate);
        self
    }

    pub fn build(self) -> Result<Decoder> {
        let alphabet = self.alphabet.unwrap_or_default();
        let (layout, mod_symbols) = match self.mods {
            Some(ModSource::Bases(mods)) => {
                let mod_alphabet = ModAlphabet::new(alphabet.clone(), mods)?;
                (mod_alphabet.layout(), mod_alphabet.mod_symbols())
            }
            Some(ModSource::Counts(can_nmods)) => {
                if can_nmods.len() != alphabet.len() {
                    return Err(ShapeError::CanNmodsLength {
                        expected: alphabet.len(),
                        got: can_nmods.len(),
                    }
                    .into());
                }
                (ModLayout::new(can_nmods), Vec::new())
            }
            None => (ModLayout::new(vec![0; alphabet.len()]), Vec::new()),
        };
        if let Some(nstate) = self.network_states {
            check_network_width(alphabet.len(), nstate)?;
        }
        Ok(Decoder {
            config: DecoderConfig {
                alphabet,
                include_first_source: self.include_first_source.unwrap_or(true),
                layout,
                mod_symbols,
                network_states: self.network_states,
            },
        })
    }
}

/// Decodes flip-flop paths and modification weights of individual reads
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}
impl Decoder {
    #[must_use]
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.config.alphabet
    }

    #[must_use]
    pub fn layout(&self) -> &ModLayout {
        &self.config.layout
    }

    /// Decodes a path into its basecall string
    pub fn decode(&self, path: &[u8]) -> Result<String> {
        path_to_str(path, &self.config.alphabet, self.config.include_first_source)
    }

    /// Decodes a path into canonical labels
    pub fn decode_labels(&self, path: &[u8]) -> Result<Vec<u8>> {
        path_to_labels(
            path,
            self.config.alphabet.len(),
            self.config.include_first_source,
        )
    }

    /// Decodes a path together with its modification weights
    ///
    /// The projected scores always have a first row for the state the path
    /// starts in, which carries no evidence. When the decoder does not emit that
    /// state the row is dropped, so score rows stay aligned with `sequence`.
    pub fn decode_with_mods<S>(&self, path: &[u8], mod_weights: &ArrayBase<S, Ix2>) -> Result<Basecall>
    where
        S: Data<Elem = f32>,
    {
        let sequence = self.decode(path)?;
        let scores = self.config.layout.project(mod_weights, path)?;
        let scores = if self.config.include_first_source || scores.nrows() == 0 {
            scores
        } else {
            scores.slice(s![1.., ..]).to_owned()
        };
        debug_assert_eq!(scores.nrows(), sequence.len());
        Ok(Basecall {
            sequence,
            mod_scores: Some(scores),
        })
    }

    /// Decodes a read with optional modification weights
    pub fn basecall<S>(&self, path: &[u8], mod_weights: Option<&ArrayBase<S, Ix2>>) -> Result<Basecall>
    where
        S: Data<Elem = f32>,
    {
        match mod_weights {
            Some(weights) => self.decode_with_mods(path, weights),
            None => Ok(Basecall {
                sequence: self.decode(path)?,
                mod_scores: None,
            }),
        }
    }

    /// Checks that a network with `nstate` outputs matches the decoder's alphabet
    pub fn check_network(&self, nstate: usize) -> Result<()> {
        check_network_width(self.config.alphabet.len(), nstate)
    }
}
