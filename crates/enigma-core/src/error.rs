use thiserror::Error;

/// Error classes used to group failures by the component that raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ErrorClass {
    /// Alphabet construction or symbol lookup.
    Alphabet,
    /// Cycle-notation parsing.
    Permutation,
    /// Rotor positioning and movement.
    Rotor,
    /// Machine construction and session setup.
    Configuration,
}

/// Every failure the cipher engine can report.
///
/// Configuration errors are raised eagerly by the offending call and leave the
/// receiver unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum EnigmaError {
    /// A symbol occurs twice in an alphabet definition.
    #[error("duplicate symbol `{0}` in alphabet")]
    DuplicateSymbol(char),
    /// An alphabet definition uses one of the structural delimiters.
    #[error("reserved symbol `{0}` cannot appear in an alphabet")]
    ReservedSymbol(char),
    /// A symbol was looked up that the alphabet does not contain.
    #[error("symbol `{0}` is not in the alphabet")]
    SymbolNotInAlphabet(char),
    /// Cycle text has unbalanced parentheses, stray text, or unknown symbols.
    #[error("malformed cycle notation: {0}")]
    MalformedCycle(String),
    /// A symbol is mentioned by more than one cycle.
    #[error("symbol `{0}` appears in more than one cycle")]
    DuplicateInCycle(char),
    /// A rotor was set to an index outside the alphabet.
    #[error("position {position} is outside an alphabet of size {size}")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Alphabet size.
        size: usize,
    },
    /// The rotor kind does not support the requested operation.
    #[error("rotor {rotor}: {reason}")]
    InvalidOperation {
        /// Name of the rotor.
        rotor: String,
        /// What was refused.
        reason: &'static str,
    },
    /// A machine needs at least two rotor slots.
    #[error("a machine needs more than one rotor slot, got {0}")]
    InvalidRotorCount(usize),
    /// Pawl count must satisfy `0 <= pawls < rotors`.
    #[error("pawl count {pawls} must be below the rotor count {rotors}")]
    InvalidPawlCount {
        /// Requested pawl count.
        pawls: usize,
        /// Machine rotor count.
        rotors: usize,
    },
    /// Wrong number of rotor names for the machine's slots.
    #[error("expected {expected} rotors, got {found}")]
    SlotCountMismatch {
        /// Slot count of the machine.
        expected: usize,
        /// Names supplied.
        found: usize,
    },
    /// A rotor name is absent from the catalog.
    #[error("rotor `{0}` is not in the catalog")]
    RotorNotFound(String),
    /// A rotor name was used twice.
    #[error("rotor `{0}` is used more than once")]
    DuplicateRotor(String),
    /// Slot 0 does not hold a reflector.
    #[error("leftmost rotor `{0}` is not a reflector")]
    MissingReflector(String),
    /// A moving rotor sits in a fixed slot or vice versa.
    #[error("rotor `{rotor}` cannot occupy slot {slot}")]
    RotorPlacementInvalid {
        /// Offending slot index.
        slot: usize,
        /// Name of the rotor placed there.
        rotor: String,
    },
    /// Rotor-setting text has the wrong length.
    #[error("expected {expected} rotor setting symbols, got {found}")]
    SettingLengthMismatch {
        /// `numRotors - 1`.
        expected: usize,
        /// Symbols supplied.
        found: usize,
    },
    /// Ring-setting text has the wrong length.
    #[error("expected {expected} ring setting symbols, got {found}")]
    RingLengthMismatch {
        /// `numRotors - 1`.
        expected: usize,
        /// Symbols supplied.
        found: usize,
    },
    /// Settings or conversion were requested before rotors were inserted.
    #[error("no rotors have been inserted")]
    RotorsNotInserted,
}

impl EnigmaError {
    /// Returns the component class for this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateSymbol(_) | Self::ReservedSymbol(_) | Self::SymbolNotInAlphabet(_) => {
                ErrorClass::Alphabet
            }
            Self::MalformedCycle(_) | Self::DuplicateInCycle(_) => ErrorClass::Permutation,
            Self::PositionOutOfRange { .. } | Self::InvalidOperation { .. } => ErrorClass::Rotor,
            Self::InvalidRotorCount(_)
            | Self::InvalidPawlCount { .. }
            | Self::SlotCountMismatch { .. }
            | Self::RotorNotFound(_)
            | Self::DuplicateRotor(_)
            | Self::MissingReflector(_)
            | Self::RotorPlacementInvalid { .. }
            | Self::SettingLengthMismatch { .. }
            | Self::RingLengthMismatch { .. }
            | Self::RotorsNotInserted => ErrorClass::Configuration,
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EnigmaError>;
