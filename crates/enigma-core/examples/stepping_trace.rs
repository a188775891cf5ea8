//! Prints the rotor settings after every keystroke of a short message,
//! followed by an FNV fingerprint of the full trace.

#![allow(clippy::cast_possible_truncation)]

use std::sync::Arc;

use enigma_core::{Alphabet, Machine, Permutation, Rotor, TraceEvent, TraceSink};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

struct Printer {
    alphabet: Arc<Alphabet>,
    hash: u64,
}

impl Printer {
    fn mix(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= u64::from(*byte);
            self.hash = self.hash.wrapping_mul(0x1000_0000_01B3);
        }
    }

    fn symbol(&self, index: usize) -> char {
        self.alphabet.to_symbol(index).unwrap_or('?')
    }
}

impl TraceSink for Printer {
    fn on_event(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::RotorAdvanced { slot, setting } => {
                println!("  slot {slot} -> {}", self.symbol(setting));
                self.mix(&[0x10, slot as u8, setting as u8]);
            }
            TraceEvent::SymbolConverted { input, output } => {
                println!("{} => {}", self.symbol(input), self.symbol(output));
                self.mix(&[0x11, input as u8, output as u8]);
            }
        }
    }
}

fn main() {
    let alphabet = Arc::new(Alphabet::default());
    let wiring = |cycles: &str| {
        Permutation::new(cycles, Arc::clone(&alphabet)).expect("example wiring is valid")
    };
    let rotors = vec![
        Rotor::reflector(
            "B",
            wiring("(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)"),
        ),
        Rotor::moving("II", wiring("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E")
            .expect("notch"),
        Rotor::moving("I", wiring("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q")
            .expect("notch"),
    ];

    let mut machine = Machine::new(Arc::clone(&alphabet), 3, 2, rotors).expect("valid machine");
    machine.insert_rotors(&["B", "II", "I"]).expect("valid rotors");
    machine.set_rotors("DO").expect("valid setting");

    let mut printer = Printer {
        alphabet,
        hash: 0xcbf2_9ce4_8422_2325,
    };
    let ciphertext = machine
        .convert_message_traced("ATTACKATDAWN", &mut printer)
        .expect("letters convert");

    println!("{ciphertext}");
    println!("{:016x}", printer.hash);
}
