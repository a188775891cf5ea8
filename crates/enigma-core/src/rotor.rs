//! Rotors: a fixed wiring permutation mounted on a turnable body.
//!
//! All rotors share the offset-permute-offset conversion path. The kind only
//! decides whether the rotor rotates, reflects, or carries notches.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::api::{RotorDescriptor, RotorKind};
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;

/// Kind-specific rotor state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mechanism {
    /// Neither rotates nor reflects.
    Fixed,
    /// Pawl-driven rotor with turnover notches.
    Moving {
        /// Notch indices as declared, before any ring offset.
        declared: Vec<usize>,
        /// Notch indices adjusted for the current ring offset.
        notches: Vec<usize>,
    },
    /// Reflector, permanently at position 0.
    Reflecting,
}

/// A named wheel in the signal path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    permutation: Permutation,
    position: usize,
    ring: usize,
    mechanism: Mechanism,
}

impl Rotor {
    /// Non-moving, non-reflecting rotor at position 0.
    #[must_use]
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_mechanism(name.into(), permutation, Mechanism::Fixed)
    }

    /// Reflector at position 0.
    #[must_use]
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Self::with_mechanism(name.into(), permutation, Mechanism::Reflecting)
    }

    /// Moving rotor whose notches are the symbols of `notches`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] for a notch symbol outside
    /// the permutation's alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self> {
        let declared = notches
            .chars()
            .map(|symbol| permutation.alphabet().to_index(symbol))
            .collect::<Result<Vec<_>>>()?;
        let mechanism = Mechanism::Moving {
            notches: declared.clone(),
            declared,
        };
        Ok(Self::with_mechanism(name.into(), permutation, mechanism))
    }

    /// Builds the rotor described by `descriptor` over `alphabet`.
    ///
    /// # Errors
    ///
    /// Propagates cycle-parsing and notch-symbol errors.
    pub fn from_descriptor(descriptor: &RotorDescriptor, alphabet: &Arc<Alphabet>) -> Result<Self> {
        let permutation = Permutation::new(&descriptor.cycles, Arc::clone(alphabet))?;
        match &descriptor.kind {
            RotorKind::Moving { notches } => Self::moving(&*descriptor.name, permutation, notches),
            RotorKind::Fixed => Ok(Self::fixed(&*descriptor.name, permutation)),
            RotorKind::Reflecting => Ok(Self::reflector(&*descriptor.name, permutation)),
        }
    }

    const fn with_mechanism(name: String, permutation: Permutation, mechanism: Mechanism) -> Self {
        Self {
            name,
            permutation,
            position: 0,
            ring: 0,
            mechanism,
        }
    }

    /// Rotor name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alphabet of the wiring.
    #[must_use]
    pub const fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Wiring at position 0.
    #[must_use]
    pub const fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Alphabet size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.permutation.size()
    }

    /// Returns `true` for pawl-driven rotors.
    #[must_use]
    pub const fn rotates(&self) -> bool {
        matches!(self.mechanism, Mechanism::Moving { .. })
    }

    /// Returns `true` for reflectors.
    #[must_use]
    pub const fn reflecting(&self) -> bool {
        matches!(self.mechanism, Mechanism::Reflecting)
    }

    /// Raw rotational position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Ring offset.
    #[must_use]
    pub const fn ring(&self) -> usize {
        self.ring
    }

    /// Effective offset: `position - ring`, wrapped.
    #[must_use]
    pub fn setting(&self) -> usize {
        self.unshift(self.position, self.ring)
    }

    /// Current notch indices; empty unless the rotor moves.
    #[must_use]
    pub fn notches(&self) -> &[usize] {
        match &self.mechanism {
            Mechanism::Moving { notches, .. } => notches,
            Mechanism::Fixed | Mechanism::Reflecting => &[],
        }
    }

    /// Sets the raw position to `position`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::PositionOutOfRange`] past the alphabet and
    /// [`EnigmaError::InvalidOperation`] for a non-zero reflector position.
    pub fn set(&mut self, position: usize) -> Result<()> {
        if self.reflecting() {
            if position != 0 {
                return Err(self.refuse("a reflector has only position 0"));
            }
            return Ok(());
        }
        if position >= self.size() {
            return Err(EnigmaError::PositionOutOfRange {
                position,
                size: self.size(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Sets the raw position to the index of `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] for unknown symbols, or any
    /// error of [`set`](Self::set).
    pub fn set_symbol(&mut self, symbol: char) -> Result<()> {
        let position = self.alphabet().to_index(symbol)?;
        self.set(position)
    }

    /// Sets the ring offset, taken modulo the alphabet size.
    ///
    /// Notches are not touched; call [`set_notches`](Self::set_notches)
    /// afterwards on moving rotors.
    pub fn set_ring(&mut self, ring: usize) {
        self.ring = ring % self.size();
    }

    /// Recomputes notches from the declared ones and the current ring offset.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::InvalidOperation`] unless the rotor moves.
    pub fn set_notches(&mut self) -> Result<()> {
        let size = self.size();
        let ring = self.ring;
        match &mut self.mechanism {
            Mechanism::Moving { declared, notches } => {
                for (notch, &origin) in notches.iter_mut().zip(declared.iter()) {
                    *notch = (origin + size - ring) % size;
                }
                Ok(())
            }
            Mechanism::Fixed | Mechanism::Reflecting => {
                Err(self.refuse("only moving rotors have notches"))
            }
        }
    }

    /// Returns `true` when the setting sits on a notch.
    #[must_use]
    pub fn at_notch(&self) -> bool {
        let setting = self.setting();
        self.notches().contains(&setting)
    }

    /// Steps the rotor one position.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::InvalidOperation`] unless the rotor moves.
    pub fn advance(&mut self) -> Result<()> {
        if !self.rotates() {
            let reason = if self.reflecting() {
                "a reflector cannot advance"
            } else {
                "a fixed rotor cannot advance"
            };
            return Err(self.refuse(reason));
        }
        // setting + ring + 1, i.e. one tooth past the raw position.
        self.position = self.shift(self.setting(), self.ring + 1);
        Ok(())
    }

    /// Passes contact `p` right-to-left through the wiring at the current setting.
    #[must_use]
    pub fn convert_forward(&self, p: usize) -> usize {
        let setting = self.setting();
        let contact = self.permutation.permute(self.shift(p, setting));
        self.unshift(contact, setting)
    }

    /// Passes contact `e` left-to-right through the inverse wiring.
    #[must_use]
    pub fn convert_backward(&self, e: usize) -> usize {
        let setting = self.setting();
        let contact = self.permutation.invert(self.shift(e, setting));
        self.unshift(contact, setting)
    }

    fn shift(&self, index: usize, by: usize) -> usize {
        (index + by) % self.size()
    }

    fn unshift(&self, index: usize, by: usize) -> usize {
        let size = self.size();
        (index % size + size - by % size) % size
    }

    fn refuse(&self, reason: &'static str) -> EnigmaError {
        EnigmaError::InvalidOperation {
            rotor: self.name.clone(),
            reason,
        }
    }
}
