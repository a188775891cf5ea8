//! Line-oriented driver: setting lines reconfigure the machine, every other
//! line is a message to convert.

use enigma_core::{Machine, NullTrace, TraceSink};

use crate::config::MachineConfig;
use crate::errors::{SimulatorError, SimulatorErrorKind};
use crate::format::group_in_fives;
use crate::settings::parse_setting_line;

/// Origin label used for message-input errors.
pub const INPUT_ORIGIN: &str = "<input>";

/// A machine plus the state of the line-oriented session around it.
#[derive(Debug, Clone)]
pub struct Simulator {
    machine: Machine,
    configured: bool,
}

impl Simulator {
    /// Builds a simulator around a fresh machine for `config`.
    ///
    /// # Errors
    ///
    /// Returns the engine error for invalid slot or pawl counts.
    pub fn new(config: &MachineConfig) -> Result<Self, SimulatorError> {
        Ok(Self {
            machine: config.build()?,
            configured: false,
        })
    }

    /// Builds a simulator over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in catalog is invalid.
    pub fn with_default_config() -> Result<Self, SimulatorError> {
        Self::new(&MachineConfig::builtin()?)
    }

    /// The underlying machine.
    #[must_use]
    pub const fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Processes `input` line by line, appending converted messages to `output`.
    ///
    /// # Errors
    ///
    /// Returns the first error, located at its 1-indexed line of `input`.
    /// Output produced by earlier lines stays in `output`.
    pub fn process(&mut self, input: &str, output: &mut String) -> Result<(), SimulatorError> {
        self.process_traced(input, output, &mut NullTrace)
    }

    /// [`process`](Self::process) reporting machine activity to `sink`.
    ///
    /// # Errors
    ///
    /// Same as [`process`](Self::process).
    pub fn process_traced(
        &mut self,
        input: &str,
        output: &mut String,
        sink: &mut dyn TraceSink,
    ) -> Result<(), SimulatorError> {
        for (index, line) in input.lines().enumerate() {
            self.process_line(line, output, sink)
                .map_err(|kind| SimulatorError::new(kind).at(INPUT_ORIGIN, index + 1))?;
        }
        Ok(())
    }

    fn process_line(
        &mut self,
        line: &str,
        output: &mut String,
        sink: &mut dyn TraceSink,
    ) -> Result<(), SimulatorErrorKind> {
        let trimmed = line.trim_start();

        if trimmed.starts_with('*') {
            let settings = parse_setting_line(trimmed, self.machine.num_rotors())?;
            self.machine.configure(&settings)?;
            self.configured = true;
            return Ok(());
        }

        if !self.configured {
            if trimmed.is_empty() {
                return Ok(());
            }
            return Err(SimulatorErrorKind::MissingSettingLine);
        }

        let message: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = self.machine.convert_message_traced(&message, sink)?;
        output.push_str(&group_in_fives(&converted));
        output.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Simulator;
    use crate::config::parse_config;
    use crate::errors::{SimulatorErrorKind, SourceLoc};
    use enigma_core::{EnigmaError, TraceEvent};

    const HIAWATHA: &str = "\
* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
FROM his shoulder Hiawatha
";

    fn simulator() -> Simulator {
        Simulator::with_default_config().expect("built-in catalog is valid")
    }

    #[test]
    fn lowercase_is_foreign_to_the_default_alphabet() {
        let mut sim = simulator();
        let mut output = String::new();
        let error = sim
            .process(HIAWATHA, &mut output)
            .expect_err("lowercase symbols are outside A-Z");
        assert_eq!(
            error.kind,
            SimulatorErrorKind::Enigma(EnigmaError::SymbolNotInAlphabet('h'))
        );
        assert_eq!(error.location.map(|loc| loc.line), Some(2));
        assert!(output.is_empty());
        assert_eq!(sim.machine().setting_text(), "AXLE");
    }

    #[test]
    fn messages_are_stripped_converted_and_grouped() {
        let mut sim = simulator();
        let mut output = String::new();
        sim.process(
            "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\n\
             FROM HIS SHOULDER HIAWATHA\n\
             TOOK THE CAMERA OF ROSEWOOD\n",
            &mut output,
        )
        .expect("valid session");
        assert_eq!(
            output,
            "QVPQS OKOIL PUBKJ ZPISF XDW\nBHCNS CXNUO AATZX SRCFY DGU\n"
        );
    }

    #[test]
    fn decrypting_restores_plaintext() {
        let mut sim = simulator();
        let mut output = String::new();
        sim.process(
            "* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)\nQVPQS OKOIL PUBKJ ZPISF XDW\n",
            &mut output,
        )
        .expect("valid session");
        assert_eq!(output, "FROMH ISSHO ULDER HIAWA THA\n");
    }

    #[test]
    fn blank_lines_echo_only_after_first_setting() {
        let mut sim = simulator();
        let mut output = String::new();
        sim.process(
            "\n   \n* B Beta III IV I AAAA\n\nAAAAA\n",
            &mut output,
        )
        .expect("valid session");
        assert_eq!(output, "\nLQFPI\n");
    }

    #[test]
    fn each_setting_line_restarts_the_machine() {
        let mut sim = simulator();
        let mut output = String::new();
        sim.process(
            "* B Beta III IV I AAAA\nAAAAA\n* B Beta III IV I AAAA\nAAAAA\n",
            &mut output,
        )
        .expect("valid session");
        assert_eq!(output, "LQFPI\nLQFPI\n");
    }

    #[test]
    fn ring_setting_persists_when_a_later_line_omits_it() {
        let mut with_rings = String::new();
        simulator()
            .process("* B Beta III IV I AAAA BCDE\nAAAAA\n", &mut with_rings)
            .expect("valid session");

        let mut carried = String::new();
        simulator()
            .process(
                "* B Beta III IV I AAAA BCDE\nHELLO\n* B Beta III IV I AAAA\nAAAAA\n",
                &mut carried,
            )
            .expect("valid session");

        let second = carried.lines().nth(1).expect("two messages");
        assert_eq!(format!("{second}\n"), with_rings);
    }

    #[test]
    fn message_before_setting_is_rejected() {
        let mut sim = simulator();
        let mut output = String::new();
        let error = sim
            .process("\nHELLO\n", &mut output)
            .expect_err("no setting yet");
        assert_eq!(error.kind, SimulatorErrorKind::MissingSettingLine);
        assert_eq!(
            error.location,
            Some(SourceLoc {
                origin: "<input>".into(),
                line: 2
            })
        );
    }

    #[test]
    fn unknown_rotor_is_located() {
        let mut sim = simulator();
        let mut output = String::new();
        let error = sim
            .process("* B Beta III IV Delta AAAA\n", &mut output)
            .expect_err("Delta is not in the catalog");
        assert_eq!(
            error.format_for_stderr(),
            "<input>:1: error: rotor `Delta` is not in the catalog"
        );
    }

    #[test]
    fn custom_configuration_drives_the_session() {
        let config = parse_config("ABCD\n3 1\nR R (AB)(CD)\nF N (ABCD)\nM MA (AC)(BD)\n")
            .expect("valid configuration");
        let mut sim = Simulator::new(&config).expect("valid counts");
        let mut plain = String::new();
        sim.process("* R F M AA\nABCDDCBA\n", &mut plain)
            .expect("valid session");

        let mut round_trip = String::new();
        let ciphertext: String = plain.chars().filter(|c| !c.is_whitespace()).collect();
        sim.process(&format!("* R F M AA\n{ciphertext}\n"), &mut round_trip)
            .expect("valid session");
        assert_eq!(round_trip, "ABCDD CBA\n");
    }

    #[test]
    fn traced_processing_reports_every_symbol() {
        let mut sim = simulator();
        let mut output = String::new();
        let mut events: Vec<TraceEvent> = Vec::new();
        sim.process_traced("* B Beta III IV I AAAA\nAAA\n", &mut output, &mut events)
            .expect("valid session");
        let converted = events
            .iter()
            .filter(|event| matches!(event, TraceEvent::SymbolConverted { .. }))
            .count();
        assert_eq!(converted, 3);
        assert_eq!(output, "LQF\n");
    }
}
