//! Machine configuration text.
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!           (RX) (SZ) (TV)
//! ```
//!
//! The first line is the alphabet. Next come the slot and pawl counts, then
//! one description per rotor: name, kind tag (`R`, `N`, or `M` followed by the
//! notch symbols) and its wiring cycles, which may continue on later lines.

use std::sync::Arc;

use enigma_core::{Alphabet, Machine, Rotor, RotorDescriptor, RotorKind};

use crate::errors::{SimulatorError, SimulatorErrorKind};

/// Origin label used for configuration errors.
pub const CONFIG_ORIGIN: &str = "<config>";

/// Built-in catalog: naval rotors I-VIII, thin rotors Beta and Gamma, and
/// reflectors B and C, for a five-slot, three-pawl machine.
pub const DEFAULT_CONFIG: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
 5 3
 I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
 II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
 III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
 IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
 V MZ      (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
 VI MZM    (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
 VII MZM   (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
 VIII MZM  (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
 Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
 Gamma N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
 B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
           (RX) (SZ) (TV)
 C R       (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW)
           (QZ) (SX) (UY)
";

/// A parsed and validated machine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Shared alphabet.
    pub alphabet: Arc<Alphabet>,
    /// Number of rotor slots.
    pub num_rotors: usize,
    /// Number of pawls.
    pub num_pawls: usize,
    /// Rotor catalog in declaration order.
    pub rotors: Vec<RotorDescriptor>,
}

impl MachineConfig {
    /// Parses the built-in catalog.
    ///
    /// # Errors
    ///
    /// Never fails for the shipped text; the `Result` mirrors [`parse_config`].
    pub fn builtin() -> Result<Self, SimulatorError> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Builds a fresh machine from this configuration.
    ///
    /// # Errors
    ///
    /// Returns the engine error for invalid slot or pawl counts.
    pub fn build(&self) -> Result<Machine, SimulatorError> {
        let rotors = self
            .rotors
            .iter()
            .map(|descriptor| Rotor::from_descriptor(descriptor, &self.alphabet))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Machine::new(
            Arc::clone(&self.alphabet),
            self.num_rotors,
            self.num_pawls,
            rotors,
        )?)
    }
}

struct Token<'a> {
    text: &'a str,
    line: usize,
}

/// Parses configuration text.
///
/// Every rotor is built once while parsing so wiring and notch errors point
/// at the line that declared the rotor.
///
/// # Errors
///
/// Returns a located [`SimulatorError`] for truncated text, bad counts, bad
/// kind tags, or any engine error raised by the alphabet or a rotor.
pub fn parse_config(text: &str) -> Result<MachineConfig, SimulatorError> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let (_, alphabet_line) = lines
        .next()
        .ok_or_else(|| config_error("missing alphabet line", 1))?;
    let alphabet = Arc::new(
        Alphabet::new(alphabet_line.trim())
            .map_err(|e| SimulatorError::from(e).at(CONFIG_ORIGIN, 1))?,
    );

    let tokens: Vec<Token<'_>> = lines
        .flat_map(|(line, content)| {
            content
                .split_whitespace()
                .map(move |text| Token { text, line })
        })
        .collect();
    let mut tokens = tokens.into_iter().peekable();

    let num_rotors = parse_count(tokens.next(), "rotor count")?;
    let num_pawls = parse_count(tokens.next(), "pawl count")?;

    let mut rotors = Vec::new();
    while let Some(name) = tokens.next() {
        if name.text.starts_with('(') {
            return Err(config_error(
                &format!("cycle `{}` does not follow a rotor kind", name.text),
                name.line,
            ));
        }
        let kind_token = tokens.next().ok_or_else(|| {
            config_error(&format!("rotor `{}` has no kind", name.text), name.line)
        })?;
        let kind = parse_kind(name.text, &kind_token)?;

        let mut cycles = Vec::new();
        while let Some(cycle) = tokens.next_if(|token| token.text.starts_with('(')) {
            cycles.push(cycle.text);
        }

        let descriptor = RotorDescriptor {
            name: name.text.to_string(),
            kind,
            cycles: cycles.join(" "),
        };
        Rotor::from_descriptor(&descriptor, &alphabet)
            .map_err(|e| SimulatorError::from(e).at(CONFIG_ORIGIN, name.line))?;
        rotors.push(descriptor);
    }

    Ok(MachineConfig {
        alphabet,
        num_rotors,
        num_pawls,
        rotors,
    })
}

fn parse_count(token: Option<Token<'_>>, what: &str) -> Result<usize, SimulatorError> {
    let token = token.ok_or_else(|| config_error(&format!("truncated before {what}"), 2))?;
    token.text.parse().map_err(|_| {
        config_error(
            &format!("expected {what}, found `{}`", token.text),
            token.line,
        )
    })
}

fn parse_kind(name: &str, token: &Token<'_>) -> Result<RotorKind, SimulatorError> {
    match (token.text, token.text.strip_prefix('M')) {
        (_, Some("")) => Err(config_error(
            &format!("moving rotor `{name}` declares no notches"),
            token.line,
        )),
        (_, Some(notches)) => Ok(RotorKind::Moving {
            notches: notches.to_string(),
        }),
        ("N", None) => Ok(RotorKind::Fixed),
        ("R", None) => Ok(RotorKind::Reflecting),
        _ => Err(config_error(
            &format!("rotor `{name}` has unknown kind `{}`", token.text),
            token.line,
        )),
    }
}

fn config_error(message: &str, line: usize) -> SimulatorError {
    SimulatorError::new(SimulatorErrorKind::Config(message.to_string())).at(CONFIG_ORIGIN, line)
}
