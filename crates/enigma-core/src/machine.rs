//! The assembled machine: rotor slots, plugboard, stepping and signal path.

use std::collections::HashMap;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::api::{NullTrace, SessionSettings, TraceEvent, TraceSink};
use crate::error::{EnigmaError, Result};
use crate::permutation::Permutation;
use crate::rotor::Rotor;

/// A rotor machine with a fixed slot layout and a catalog of available rotors.
///
/// Slot 0 holds the reflector. The rightmost `num_pawls` slots hold moving
/// rotors and every other slot holds a non-moving one. The catalog owns every
/// rotor for the lifetime of the machine and slots refer into it, so ring
/// offsets and notches set in one session stay with the rotor in the next.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    rotors: Vec<Rotor>,
    by_name: HashMap<String, usize>,
    slots: Vec<usize>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots and `num_pawls` pawls.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::InvalidRotorCount`] when `num_rotors <= 1`,
    /// [`EnigmaError::InvalidPawlCount`] unless `num_pawls < num_rotors`, and
    /// [`EnigmaError::DuplicateRotor`] when two catalog rotors share a name.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        available: impl IntoIterator<Item = Rotor>,
    ) -> Result<Self> {
        if num_rotors <= 1 {
            return Err(EnigmaError::InvalidRotorCount(num_rotors));
        }
        if num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidPawlCount {
                pawls: num_pawls,
                rotors: num_rotors,
            });
        }

        let rotors: Vec<Rotor> = available.into_iter().collect();
        let mut by_name = HashMap::with_capacity(rotors.len());
        for (index, rotor) in rotors.iter().enumerate() {
            if by_name.insert(rotor.name().to_string(), index).is_some() {
                return Err(EnigmaError::DuplicateRotor(rotor.name().to_string()));
            }
        }

        Ok(Self {
            plugboard: Permutation::identity(Arc::clone(&alphabet)),
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
            by_name,
            slots: Vec::new(),
        })
    }

    /// Shared alphabet.
    #[must_use]
    pub const fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Number of rotor slots.
    #[must_use]
    pub const fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Number of pawls, i.e. moving rotors.
    #[must_use]
    pub const fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Installed rotors, reflector first. Empty until rotors are inserted.
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = &Rotor> + ExactSizeIterator + '_ {
        self.slots.iter().map(move |&index| &self.rotors[index])
    }

    /// Rotor in slot `slot`, if rotors are inserted.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&Rotor> {
        self.slots.get(slot).map(|&index| &self.rotors[index])
    }

    /// Current plugboard.
    #[must_use]
    pub const fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Installs the catalog rotors named by `names`, reflector first.
    ///
    /// Rotors keep their ring offsets and notches from earlier sessions.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SlotCountMismatch`], [`EnigmaError::RotorNotFound`],
    /// [`EnigmaError::MissingReflector`], [`EnigmaError::DuplicateRotor`] or
    /// [`EnigmaError::RotorPlacementInvalid`]; on error the slots are unchanged.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.slots = self.resolve_slots(names)?;
        Ok(())
    }

    /// Positions slots `1..` from `setting`, leftmost first. Reflectors are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::RotorsNotInserted`],
    /// [`EnigmaError::SettingLengthMismatch`] or
    /// [`EnigmaError::SymbolNotInAlphabet`]; on error no rotor moves.
    pub fn set_rotors(&mut self, setting: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let positions = self.setting_indices(setting)?;
        self.apply_positions(&positions)
    }

    /// Applies ring offsets to slots `1..` from `rings`, leftmost first.
    ///
    /// Must run after [`insert_rotors`](Self::insert_rotors) and before any
    /// conversion; moving rotors recompute their notches for the new ring.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::RotorsNotInserted`],
    /// [`EnigmaError::RingLengthMismatch`] or
    /// [`EnigmaError::SymbolNotInAlphabet`]; on error no ring changes.
    pub fn set_rings(&mut self, rings: &str) -> Result<()> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let offsets = self.ring_indices(rings)?;
        self.apply_rings(&offsets)
    }

    /// Replaces the plugboard. It must range over the machine's alphabet.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        self.plugboard = plugboard;
    }

    /// Applies a full session setup: rotors, settings, optional rings, plugboard.
    ///
    /// Every part is validated before the machine changes, so a failing
    /// session leaves the previous one installed.
    ///
    /// # Errors
    ///
    /// Returns the first error of the plugboard, rotor list, setting or ring
    /// validation.
    pub fn configure(&mut self, settings: &SessionSettings) -> Result<()> {
        let plugboard = Permutation::new(&settings.plugboard, Arc::clone(&self.alphabet))?;
        let slots = self.resolve_slots(&settings.rotors)?;
        let positions = self.setting_indices(&settings.setting)?;
        let rings = settings
            .rings
            .as_deref()
            .map(|rings| self.ring_indices(rings))
            .transpose()?;

        self.slots = slots;
        self.apply_positions(&positions)?;
        if let Some(rings) = rings {
            self.apply_rings(&rings)?;
        }
        self.plugboard = plugboard;
        Ok(())
    }

    /// Current settings of slots `1..`, rendered as symbols.
    #[must_use]
    pub fn setting_text(&self) -> String {
        self.slots()
            .skip(1)
            .filter_map(|rotor| self.alphabet.to_symbol(rotor.setting()))
            .collect()
    }

    /// Steps the machine and converts one symbol index.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::RotorsNotInserted`] before rotors are inserted,
    /// or [`EnigmaError::InvalidOperation`] when the rightmost slot cannot
    /// advance.
    pub fn convert(&mut self, index: usize) -> Result<usize> {
        self.convert_traced(index, &mut NullTrace)
    }

    /// [`convert`](Self::convert) reporting activity to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`convert`](Self::convert).
    pub fn convert_traced(&mut self, index: usize, sink: &mut dyn TraceSink) -> Result<usize> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }

        self.step_rotors(sink)?;

        let mut contact = self.plugboard.permute(index);
        for rotor in self.slots().rev() {
            contact = rotor.convert_forward(contact);
        }
        for rotor in self.slots().skip(1) {
            contact = rotor.convert_backward(contact);
        }
        // Plugboard cycles are transpositions, so one more pass inverts them.
        let output = self.plugboard.permute(contact);

        sink.on_event(TraceEvent::SymbolConverted {
            input: index % self.alphabet.size(),
            output,
        });
        Ok(output)
    }

    /// Converts every symbol of `message`, stepping before each one.
    ///
    /// # Errors
    ///
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] for the first foreign
    /// symbol, before any rotor moves, or any error of
    /// [`convert`](Self::convert).
    pub fn convert_message(&mut self, message: &str) -> Result<String> {
        self.convert_message_traced(message, &mut NullTrace)
    }

    /// [`convert_message`](Self::convert_message) reporting activity to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`convert_message`](Self::convert_message).
    pub fn convert_message_traced(
        &mut self,
        message: &str,
        sink: &mut dyn TraceSink,
    ) -> Result<String> {
        if self.slots.is_empty() {
            return Err(EnigmaError::RotorsNotInserted);
        }
        let indices = message
            .chars()
            .map(|symbol| self.alphabet.to_index(symbol))
            .collect::<Result<Vec<_>>>()?;

        let mut converted = String::with_capacity(message.len());
        for index in indices {
            let output = self.convert_traced(index, sink)?;
            converted.extend(self.alphabet.to_symbol(output));
        }
        Ok(converted)
    }

    /// Advances rotors for one keystroke, double-stepping included.
    ///
    /// A rotor at its notch advances together with its left neighbour when
    /// that neighbour rotates. The rightmost slot always advances, which
    /// fails when it holds a non-moving rotor.
    fn step_rotors(&mut self, sink: &mut dyn TraceSink) -> Result<()> {
        let count = self.slots.len();
        let mut advancing = vec![false; count];

        for (left, pair) in self.slots.windows(2).enumerate() {
            if self.rotors[pair[0]].rotates() && self.rotors[pair[1]].at_notch() {
                advancing[left] = true;
                advancing[left + 1] = true;
            }
        }
        advancing[count - 1] = true;

        for (slot, &index) in self.slots.iter().enumerate().skip(1) {
            if !advancing[slot] {
                continue;
            }
            let rotor = &mut self.rotors[index];
            rotor.advance()?;
            sink.on_event(TraceEvent::RotorAdvanced {
                slot,
                setting: rotor.setting(),
            });
        }
        Ok(())
    }

    /// Resolves `names` to catalog indices and checks the slot layout.
    fn resolve_slots<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>> {
        if names.len() != self.num_rotors {
            return Err(EnigmaError::SlotCountMismatch {
                expected: self.num_rotors,
                found: names.len(),
            });
        }

        let mut slots: Vec<usize> = Vec::with_capacity(self.num_rotors);
        for (slot, name) in names.iter().map(AsRef::as_ref).enumerate() {
            let index = *self
                .by_name
                .get(name)
                .ok_or_else(|| EnigmaError::RotorNotFound(name.to_string()))?;
            if slot == 0 && !self.rotors[index].reflecting() {
                return Err(EnigmaError::MissingReflector(name.to_string()));
            }
            if slots.contains(&index) {
                return Err(EnigmaError::DuplicateRotor(name.to_string()));
            }
            slots.push(index);
        }

        let first_moving = self.num_rotors - self.num_pawls;
        for (slot, &index) in slots.iter().enumerate() {
            let rotor = &self.rotors[index];
            if rotor.rotates() != (slot >= first_moving) {
                return Err(EnigmaError::RotorPlacementInvalid {
                    slot,
                    rotor: rotor.name().to_string(),
                });
            }
        }
        Ok(slots)
    }

    fn setting_indices(&self, setting: &str) -> Result<Vec<usize>> {
        self.slot_symbols(setting, |expected, found| {
            EnigmaError::SettingLengthMismatch { expected, found }
        })
    }

    fn ring_indices(&self, rings: &str) -> Result<Vec<usize>> {
        self.slot_symbols(rings, |expected, found| EnigmaError::RingLengthMismatch {
            expected,
            found,
        })
    }

    /// Maps one symbol per non-reflector slot to indices.
    fn slot_symbols(
        &self,
        text: &str,
        mismatch: impl FnOnce(usize, usize) -> EnigmaError,
    ) -> Result<Vec<usize>> {
        let expected = self.num_rotors - 1;
        let found = text.chars().count();
        if found != expected {
            return Err(mismatch(expected, found));
        }
        text.chars()
            .map(|symbol| self.alphabet.to_index(symbol))
            .collect()
    }

    fn apply_positions(&mut self, positions: &[usize]) -> Result<()> {
        for (&index, &position) in self.slots.iter().skip(1).zip(positions) {
            let rotor = &mut self.rotors[index];
            if !rotor.reflecting() {
                rotor.set(position)?;
            }
        }
        Ok(())
    }

    fn apply_rings(&mut self, rings: &[usize]) -> Result<()> {
        for (&index, &ring) in self.slots.iter().skip(1).zip(rings) {
            let rotor = &mut self.rotors[index];
            if rotor.reflecting() {
                continue;
            }
            rotor.set_ring(ring);
            if rotor.rotates() {
                rotor.set_notches()?;
            }
        }
        Ok(())
    }
}
