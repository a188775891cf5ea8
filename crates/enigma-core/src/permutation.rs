//! Cycle-notation permutations over alphabet indices.
//!
//! A permutation is written as consecutive parenthesized cycles, e.g.
//! `(AELT) (BKNW) (S)`. Cycle `(c1c2...cn)` maps `c1 -> c2 -> ... -> cn -> c1`.
//! Whitespace between cycles is ignored. A single-symbol cycle pins that symbol
//! to itself; symbols mentioned by no cycle are fixed points as well.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::{EnigmaError, Result};

/// Bijection over `0..alphabet.size()` with precomputed forward and inverse tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` over `alphabet`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::MalformedCycle`] for unbalanced or nested
    /// parentheses, text outside a cycle, or a symbol outside the alphabet, and
    /// [`EnigmaError::DuplicateInCycle`] when a symbol is mentioned twice.
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut inverse: Vec<usize> = (0..size).collect();
        let mut traced = vec![false; size];

        for cycle in split_cycles(cycles)? {
            let members = cycle
                .chars()
                .map(|symbol| {
                    alphabet.to_index(symbol).map_err(|_| {
                        EnigmaError::MalformedCycle(format!(
                            "`{symbol}` in ({cycle}) is not in the alphabet"
                        ))
                    })
                })
                .collect::<Result<Vec<usize>>>()?;

            for (position, &index) in members.iter().enumerate() {
                if traced[index] {
                    return Err(EnigmaError::DuplicateInCycle(
                        alphabet.to_symbol(index).unwrap_or_default(),
                    ));
                }
                traced[index] = true;

                let next = members[(position + 1) % members.len()];
                forward[index] = next;
                inverse[next] = index;
            }
        }

        Ok(Self {
            alphabet,
            forward,
            inverse,
        })
    }

    /// Identity permutation over `alphabet`.
    #[must_use]
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let size = alphabet.size();
        Self {
            alphabet,
            forward: (0..size).collect(),
            inverse: (0..size).collect(),
        }
    }

    /// Alphabet this permutation ranges over.
    #[must_use]
    pub const fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Size of the underlying alphabet.
    #[must_use]
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Reduces `n` modulo [`size`](Self::size) into `0..size`, never negative.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn wrap(&self, n: isize) -> usize {
        n.rem_euclid(self.size() as isize) as usize
    }

    /// Applies the permutation to `index` (taken modulo the size).
    #[must_use]
    pub fn permute(&self, index: usize) -> usize {
        self.forward[index % self.size()]
    }

    /// Applies the inverse permutation to `index` (taken modulo the size).
    #[must_use]
    pub fn invert(&self, index: usize) -> usize {
        self.inverse[index % self.size()]
    }

    /// Symbol form of [`permute`](Self::permute).
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] when `symbol` is absent.
    pub fn permute_symbol(&self, symbol: char) -> Result<char> {
        let index = self.permute(self.alphabet.to_index(symbol)?);
        Ok(self.symbol_at(index))
    }

    /// Symbol form of [`invert`](Self::invert).
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] when `symbol` is absent.
    pub fn invert_symbol(&self, symbol: char) -> Result<char> {
        let index = self.invert(self.alphabet.to_index(symbol)?);
        Ok(self.symbol_at(index))
    }

    /// Returns `true` when no index maps to itself.
    #[must_use]
    pub fn is_derangement(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(index, &image)| index != image)
    }

    fn symbol_at(&self, index: usize) -> char {
        // Table entries are always valid alphabet indices.
        self.alphabet.to_symbol(index).unwrap_or_default()
    }
}

/// Splits cycle text into the bodies of its parenthesized groups.
fn split_cycles(text: &str) -> Result<Vec<&str>> {
    let mut cycles = Vec::new();
    let mut open: Option<usize> = None;

    for (offset, symbol) in text.char_indices() {
        match (symbol, open) {
            ('(', None) => open = Some(offset + 1),
            (')', Some(start)) => {
                cycles.push(&text[start..offset]);
                open = None;
            }
            ('(', Some(_)) => {
                return Err(EnigmaError::MalformedCycle(format!(
                    "nested `(` at offset {offset}"
                )));
            }
            (')', None) => {
                return Err(EnigmaError::MalformedCycle(format!(
                    "unmatched `)` at offset {offset}"
                )));
            }
            (symbol, None) if !symbol.is_whitespace() => {
                return Err(EnigmaError::MalformedCycle(format!(
                    "`{symbol}` outside of a cycle at offset {offset}"
                )));
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(EnigmaError::MalformedCycle("unclosed `(`".to_string()));
    }

    Ok(cycles)
}
