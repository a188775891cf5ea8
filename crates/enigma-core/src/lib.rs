//! Rotor cipher engine for Enigma-style machines.
//!
//! The signal path for each keystroke is: step the rotors, apply the
//! plugboard, pass right-to-left through every rotor (the reflector last),
//! pass back left-to-right through every rotor except the reflector, and
//! apply the plugboard again.

/// Ordered symbol sets.
pub mod alphabet;
pub use alphabet::{Alphabet, DEFAULT_SYMBOLS, RESERVED_SYMBOLS};

/// Cycle-notation permutations.
pub mod permutation;
pub use permutation::Permutation;

/// Fixed, moving and reflecting rotors.
pub mod rotor;
pub use rotor::Rotor;

/// Rotor slots, plugboard and stepping.
pub mod machine;
pub use machine::Machine;

/// Descriptor, session and trace contracts for front-ends.
pub mod api;
pub use api::{NullTrace, RotorDescriptor, RotorKind, SessionSettings, TraceEvent, TraceSink};

/// Error taxonomy.
pub mod error;
pub use error::{EnigmaError, ErrorClass, Result};

#[cfg(test)]
use proptest as _;
