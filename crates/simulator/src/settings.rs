//! Setting lines: `* <reflector> <rotor>... <setting> [<rings>] [<cycles>...]`.

use enigma_core::SessionSettings;

use crate::errors::SimulatorErrorKind;

/// Parses one setting line for a machine with `num_rotors` slots.
///
/// The ring token is present when the token after the setting does not open
/// a cycle. Everything after that is plugboard wiring.
///
/// # Errors
///
/// Returns [`SimulatorErrorKind::Setting`] when the line does not start with a
/// lone `*` or is too short to name every slot and a setting.
pub fn parse_setting_line(
    line: &str,
    num_rotors: usize,
) -> Result<SessionSettings, SimulatorErrorKind> {
    let mut tokens = line.split_whitespace().peekable();

    match tokens.next() {
        Some("*") => {}
        Some(first) => {
            return Err(SimulatorErrorKind::Setting(format!(
                "expected `*` at the start, found `{first}`"
            )));
        }
        None => return Err(SimulatorErrorKind::Setting("empty line".to_string())),
    }

    let rotors: Vec<String> = tokens.by_ref().take(num_rotors).map(String::from).collect();
    let setting = tokens.next().filter(|_| rotors.len() == num_rotors);
    let Some(setting) = setting else {
        return Err(SimulatorErrorKind::Setting(format!(
            "expected {num_rotors} rotor names and a setting"
        )));
    };
    if setting.starts_with('(') {
        return Err(SimulatorErrorKind::Setting(format!(
            "expected a setting, found cycle `{setting}`"
        )));
    }

    let rings = tokens
        .next_if(|token| !token.starts_with('('))
        .map(String::from);
    let plugboard = tokens.collect::<Vec<_>>().join(" ");

    Ok(SessionSettings {
        rotors,
        setting: setting.to_string(),
        rings,
        plugboard,
    })
}
