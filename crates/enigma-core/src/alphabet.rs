//! Ordered symbol set with dense index mapping.

use std::collections::HashMap;
use std::fmt;

use crate::error::{EnigmaError, Result};

/// Symbols reserved as delimiters by the textual configuration format.
pub const RESERVED_SYMBOLS: [char; 4] = ['*', '(', ')', ' '];

/// Symbols of the default alphabet.
pub const DEFAULT_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Closed set of encodable symbols. Symbol `k` has index `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from `symbols` in order.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::ReservedSymbol`] for `*`, `(`, `)` or space and
    /// [`EnigmaError::DuplicateSymbol`] when a symbol repeats.
    pub fn new(symbols: &str) -> Result<Self> {
        let mut ordered = Vec::with_capacity(symbols.len());
        let mut indices = HashMap::with_capacity(symbols.len());

        for symbol in symbols.chars() {
            if RESERVED_SYMBOLS.contains(&symbol) {
                return Err(EnigmaError::ReservedSymbol(symbol));
            }
            if indices.insert(symbol, ordered.len()).is_some() {
                return Err(EnigmaError::DuplicateSymbol(symbol));
            }
            ordered.push(symbol);
        }

        Ok(Self {
            symbols: ordered,
            indices,
        })
    }

    /// Number of symbols.
    #[must_use]
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` when `symbol` belongs to the alphabet.
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.indices.contains_key(&symbol)
    }

    /// Returns the index of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] when `symbol` is absent.
    pub fn to_index(&self, symbol: char) -> Result<usize> {
        self.indices
            .get(&symbol)
            .copied()
            .ok_or(EnigmaError::SymbolNotInAlphabet(symbol))
    }

    /// Returns the symbol at `index`, or `None` past the end.
    #[must_use]
    pub fn to_symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Iterates symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_SYMBOLS.chars().collect();
        let indices = symbols.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        Self { symbols, indices }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}
