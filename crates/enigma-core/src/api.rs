//! Contracts between the engine and its textual front-end.
//!
//! The front-end hands the engine well-formed rotor descriptors and session
//! settings; the engine reports per-step activity through [`TraceSink`].

/// Rotor kind as declared in a machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RotorKind {
    /// Pawl-driven rotor; `notches` lists its turnover symbols.
    Moving {
        /// Notch symbols, in declaration order.
        notches: String,
    },
    /// Non-moving, non-reflecting rotor.
    Fixed,
    /// Reflector.
    Reflecting,
}

/// One catalog entry: everything needed to build a [`Rotor`](crate::Rotor).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RotorDescriptor {
    /// Unique rotor name.
    pub name: String,
    /// Rotor kind.
    pub kind: RotorKind,
    /// Wiring in cycle notation.
    pub cycles: String,
}

/// Per-session machine setup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SessionSettings {
    /// Rotor names for every slot, reflector first.
    pub rotors: Vec<String>,
    /// One symbol per non-reflector slot, leftmost first.
    pub setting: String,
    /// Optional ring symbols, same shape as `setting`.
    pub rings: Option<String>,
    /// Plugboard wiring in cycle notation.
    pub plugboard: String,
}

/// Trace events emitted while converting symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TraceEvent {
    /// A rotor advanced during the stepping phase.
    RotorAdvanced {
        /// Slot index of the rotor.
        slot: usize,
        /// Setting after the advance.
        setting: usize,
    },
    /// A symbol completed the signal path.
    SymbolConverted {
        /// Input index.
        input: usize,
        /// Output index.
        output: usize,
    },
}

/// Sink trait for step-level trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
