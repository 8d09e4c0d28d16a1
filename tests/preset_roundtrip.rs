//! Preset serialization: idempotence, byte-identical round trips, rejection
//!
//! Run with:
//! ```bash
//! cargo test -p patchbay --test preset_roundtrip
//! ```

mod helpers;

use helpers::{lfo_cutoff_patch, test_synth};
use patchbay::{PresetDocument, Synth};
use proptest::prelude::*;

#[test]
fn test_end_to_end_scenario() {
    let synth = test_synth();
    assert!(synth.connect_modulation("lfo_1", "filter_1_cutoff"));
    synth.control("modulation_1_amount").unwrap().set(1.0);

    let filter_on = synth.control("filter_1_on").unwrap();
    filter_on.set(1.0);
    assert_eq!(filter_on.value(), 1.0);

    let json = synth.to_json();

    let fresh = test_synth();
    assert!(fresh.load_json(&json));
    assert_eq!(fresh.to_json(), json);

    let mods = fresh.modulations().unwrap();
    assert_eq!(mods.len(), 1);
    assert_eq!(mods[0].source, "lfo_1");
    assert_eq!(mods[0].destination, "filter_1_cutoff");
    assert_eq!(mods[0].amount, 1.0);
}

#[test]
fn test_to_json_is_stable() {
    let synth = lfo_cutoff_patch();
    assert_eq!(synth.to_json(), synth.to_json());
}

#[test]
fn test_load_own_json_is_idempotent() {
    let synth = lfo_cutoff_patch();
    synth.set_bpm(133.3).unwrap();
    let pan = synth.control("osc_1_pan").unwrap();
    pan.set_normalized(0.1234567);

    let before = synth.to_json();
    assert!(synth.load_json(&before));
    assert_eq!(synth.to_json(), before);
}

#[test]
fn test_document_shape() {
    let synth = lfo_cutoff_patch();
    let value: serde_json::Value = serde_json::from_str(&synth.to_json()).unwrap();

    assert_eq!(value["synth_version"], "1.0");
    assert_eq!(value["bpm"], 120.0);
    assert_eq!(value["controls"]["filter_1_on"], 1.0);
    assert_eq!(value["modulations"][0]["source"], "lfo_1");
    assert_eq!(value["modulations"][0]["destination"], "filter_1_cutoff");
    assert_eq!(value["modulations"][0]["amount"], 1.0);
    assert_eq!(value["modulations"][0]["slot"], 1);
}

#[test]
fn test_slot_gaps_survive_roundtrip() {
    let synth = test_synth();
    assert!(synth.connect_modulation_with_amount("lfo_1", "filter_1_cutoff", 0.5));
    assert!(synth.connect_modulation_with_amount("lfo_2", "filter_2_cutoff", -0.5));
    assert!(synth.connect_modulation_with_amount("env_2", "osc_1_level", 0.25));
    synth.disconnect_modulation("lfo_2", "filter_2_cutoff");

    let json = synth.to_json();
    let fresh = test_synth();
    assert!(fresh.load_json(&json));
    assert_eq!(fresh.to_json(), json);
    let modulations = fresh.modulations().unwrap();
    let slots: Vec<_> = modulations.iter().map(|m| m.slot).collect();
    assert_eq!(slots, vec![Some(1), Some(3)]);
}

#[test]
fn test_rejected_load_leaves_state_unchanged() {
    let synth = lfo_cutoff_patch();
    let before = synth.to_json();

    let unknown_control = concat!(
        r#"{"synth_version":"1.0","bpm":120.0,"#,
        r#""controls":{"no_such_control":1.0}}"#
    );
    let unknown_destination = concat!(
        r#"{"synth_version":"1.0","bpm":120.0,"modulations":"#,
        r#"[{"source":"lfo_1","destination":"bogus","amount":1.0}]}"#
    );

    assert!(!synth.load_json("{ this is not json"));
    assert!(!synth.load_json(unknown_control));
    assert!(!synth.load_json(r#"{"synth_version":"9.0","bpm":120.0}"#));
    assert!(!synth.load_json(r#"{"synth_version":"1.0","bpm":2000.0}"#));
    assert!(!synth.load_json(unknown_destination));

    assert_eq!(synth.to_json(), before);
}

#[test]
fn test_load_replaces_everything() {
    let synth = lfo_cutoff_patch();
    synth.control("filter_1_cutoff").unwrap().set(100.0);

    assert!(synth.load_json(r#"{"synth_version":"1.0","bpm":90.0,"controls":{"osc_2_pan":0.5}}"#));
    assert!(synth.modulations().unwrap().is_empty());
    assert_eq!(synth.bpm(), 90.0);
    assert_eq!(synth.control("filter_1_cutoff").unwrap().value(), 60.0);
    assert_eq!(synth.control("filter_1_on").unwrap().value(), 0.0);
    assert_eq!(synth.control("osc_2_pan").unwrap().value(), 0.5);
}

#[test]
fn test_handles_follow_loaded_preset() {
    let synth = test_synth();
    let cutoff = synth.control("filter_1_cutoff").unwrap().clone();

    let source = test_synth();
    source.control("filter_1_cutoff").unwrap().set(42.0);
    assert!(synth.load_json(&source.to_json()));

    assert_eq!(cutoff.value(), 42.0);
    cutoff.set(50.0);
    assert!(synth.to_json().contains("\"filter_1_cutoff\": 50.0"));
}

#[test]
fn test_preset_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lfo_cutoff.vital");

    let synth = lfo_cutoff_patch();
    synth.save_preset(&path).unwrap();

    let fresh = test_synth();
    assert!(fresh.load_preset(&path));
    assert_eq!(fresh.to_json(), synth.to_json());

    let missing = dir.path().join("missing.vital");
    assert!(!fresh.load_preset(&missing));
    assert!(fresh.try_load_preset(&missing).unwrap_err().is_not_found());
    assert_eq!(fresh.to_json(), synth.to_json());
}

#[test]
fn test_document_api() {
    let synth = lfo_cutoff_patch();
    let doc = PresetDocument::from_json(&synth.to_json()).unwrap();
    assert_eq!(doc.to_json().unwrap(), synth.to_json());
    assert_eq!(doc.modulations.len(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn arbitrary_states_roundtrip_byte_identical(
        normalized in proptest::collection::vec(0.0f32..=1.0, 8),
        amount in -1.0f32..=1.0,
        bpm in 20.0f32..=999.0,
    ) {
        let names = [
            "filter_1_cutoff", "volume", "env_1_attack", "lfo_1_frequency",
            "osc_1_pan", "delay_style", "osc_1_unison_voices", "reverb_chorus_amount",
        ];
        let synth = Synth::new();
        for (name, t) in names.iter().zip(&normalized) {
            synth.control(name).unwrap().set_normalized(*t);
        }
        synth.set_bpm(bpm).unwrap();
        prop_assert!(synth.connect_modulation_with_amount("random_1", "osc_1_pan", amount));

        let json = synth.to_json();
        let fresh = Synth::new();
        prop_assert!(fresh.load_json(&json));
        prop_assert_eq!(fresh.to_json(), json);
    }
}
