//! End-to-end machine scenarios over the historical rotor set.

#![allow(clippy::pedantic, clippy::nursery)]

use std::sync::Arc;

use enigma_core::{
    Alphabet, EnigmaError, ErrorClass, Machine, Permutation, Rotor, RotorDescriptor, RotorKind,
    SessionSettings,
};
use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn descriptor(name: &str, kind: RotorKind, cycles: &str) -> RotorDescriptor {
    RotorDescriptor {
        name: name.to_string(),
        kind,
        cycles: cycles.to_string(),
    }
}

fn moving(notches: &str) -> RotorKind {
    RotorKind::Moving {
        notches: notches.to_string(),
    }
}

fn historical_catalog() -> Vec<RotorDescriptor> {
    vec![
        descriptor("I", moving("Q"), "(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"),
        descriptor("II", moving("E"), "(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"),
        descriptor("III", moving("V"), "(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"),
        descriptor("IV", moving("J"), "(AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)"),
        descriptor("V", moving("Z"), "(AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)"),
        descriptor("Beta", RotorKind::Fixed, "(ALBEVFCYODJWUGNMQTZSKPR) (HIX)"),
        descriptor("Gamma", RotorKind::Fixed, "(AFNIRLBSQWVXGUZDKMTPCOYJHE)"),
        descriptor(
            "B",
            RotorKind::Reflecting,
            "(AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
        ),
        descriptor(
            "C",
            RotorKind::Reflecting,
            "(AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)",
        ),
    ]
}

fn naval_machine() -> Machine {
    let alphabet = Arc::new(Alphabet::default());
    let rotors = historical_catalog()
        .iter()
        .map(|d| Rotor::from_descriptor(d, &alphabet))
        .collect::<Result<Vec<_>, _>>()
        .expect("catalog is well formed");
    Machine::new(alphabet, 5, 3, rotors).expect("valid machine")
}

fn session(rotors: [&str; 5], setting: &str, rings: Option<&str>, plugboard: &str) -> SessionSettings {
    SessionSettings {
        rotors: rotors.map(String::from).to_vec(),
        setting: setting.to_string(),
        rings: rings.map(String::from),
        plugboard: plugboard.to_string(),
    }
}

#[test]
fn hello_world_round_trips_with_neutral_rings() {
    let settings = session(
        ["B", "Beta", "III", "IV", "I"],
        "AXLE",
        Some("AAAA"),
        "(HQ) (EX) (IP) (TR) (BY)",
    );

    let mut encoder = naval_machine();
    encoder.configure(&settings).expect("valid session");
    let ciphertext = encoder.convert_message("HELLOWORLD").expect("letters");
    assert_eq!(ciphertext, "UPVGJZUNSG");

    let mut decoder = naval_machine();
    decoder.configure(&settings).expect("valid session");
    assert_eq!(decoder.convert_message(&ciphertext).expect("letters"), "HELLOWORLD");
}

#[test]
fn ring_offsets_change_ciphertext_but_stay_reciprocal() {
    let settings = session(["B", "Beta", "I", "II", "III"], "AAAA", Some("AAAB"), "(AQ) (EP)");

    let mut encoder = naval_machine();
    encoder.configure(&settings).expect("valid session");
    let ciphertext = encoder.convert_message("HELLOWORLD").expect("letters");
    assert_eq!(ciphertext, "ZLPBMAKNGR");

    let mut decoder = naval_machine();
    decoder.configure(&settings).expect("valid session");
    assert_eq!(decoder.convert_message(&ciphertext).expect("letters"), "HELLOWORLD");
}

#[test]
fn ring_settings_carry_into_the_next_session() {
    let with_rings = session(["B", "Beta", "III", "IV", "I"], "AAAA", Some("BCDE"), "");
    let without_rings = session(["B", "Beta", "III", "IV", "I"], "AAAA", None, "");

    let mut machine = naval_machine();
    machine.configure(&with_rings).expect("valid session");
    machine.convert_message("ABCDEFG").expect("letters");
    machine.configure(&without_rings).expect("valid session");

    let rings: Vec<usize> = machine.slots().map(Rotor::ring).collect();
    assert_eq!(rings, [0, 1, 2, 3, 4]);
    assert_eq!(machine.setting_text(), "ZYXW");

    let mut fresh = naval_machine();
    fresh.configure(&with_rings).expect("valid session");
    assert_eq!(
        machine.convert_message("AAAAAAAAAA").expect("letters"),
        fresh.convert_message("AAAAAAAAAA").expect("letters")
    );
}

#[test]
fn double_step_moves_three_rotors_in_one_keystroke() {
    let mut machine = naval_machine();
    machine
        .configure(&session(["B", "Beta", "III", "IV", "I"], "AAJA", None, ""))
        .expect("valid session");
    let before: Vec<usize> = machine.slots().map(Rotor::setting).collect();

    machine.convert_message("A").expect("letters");

    let after: Vec<usize> = machine.slots().map(Rotor::setting).collect();
    let changed = before.iter().zip(&after).filter(|(b, a)| b != a).count();
    assert_eq!(changed, 3);
    assert_eq!(machine.setting_text(), "ABKB");
}

#[test]
fn long_message_walks_the_middle_rotor_through_its_notch() {
    let mut machine = naval_machine();
    machine
        .configure(&session(["B", "Beta", "III", "IV", "I"], "AAIO", None, ""))
        .expect("valid session");

    let mut seen = Vec::new();
    for _ in 0..5 {
        machine.convert_message("X").expect("letters");
        seen.push(machine.setting_text());
    }
    assert_eq!(seen, ["AAIP", "AAIQ", "AAJR", "ABKS", "ABKT"]);
}

#[rstest]
#[case(session(["C", "Beta", "III", "IV", "I"], "AAAA", None, "(AB"), ErrorClass::Permutation)]
#[case(session(["I", "Beta", "III", "IV", "II"], "AAAA", None, ""), ErrorClass::Configuration)]
#[case(session(["B", "Gamma", "III", "IV", "I"], "AAA", None, ""), ErrorClass::Configuration)]
#[case(session(["B", "Gamma", "III", "IV", "I"], "AAAA", Some("A1AA"), ""), ErrorClass::Alphabet)]
fn configure_reports_error_class(#[case] settings: SessionSettings, #[case] class: ErrorClass) {
    let mut machine = naval_machine();
    let error = machine.configure(&settings).expect_err("session is invalid");
    assert_eq!(error.class(), class, "{error}");
}

#[test]
fn construction_errors_match_contract() {
    assert_eq!(Alphabet::new("AAB"), Err(EnigmaError::DuplicateSymbol('A')));

    let alphabet = Arc::new(Alphabet::default());
    assert_eq!(
        Machine::new(Arc::clone(&alphabet), 1, 0, Vec::<Rotor>::new()).map(|_| ()),
        Err(EnigmaError::InvalidRotorCount(1))
    );

    let mut fixed = Rotor::fixed("Gamma", Permutation::identity(Arc::clone(&alphabet)));
    assert!(matches!(
        fixed.advance(),
        Err(EnigmaError::InvalidOperation { .. })
    ));

    let reflector = Rotor::reflector(
        "R",
        Permutation::new("(AB)", Arc::clone(&alphabet)).expect("wiring"),
    );
    let mut static_machine =
        Machine::new(alphabet, 2, 0, [reflector, fixed]).expect("valid machine");
    static_machine.insert_rotors(&["R", "Gamma"]).expect("valid rotors");
    assert_eq!(
        static_machine.convert_message("A").map(|_| ()),
        Err(EnigmaError::InvalidOperation {
            rotor: "Gamma".into(),
            reason: "a fixed rotor cannot advance",
        })
    );
}
