//! Control thread / render thread interaction
//!
//! One writer loads presets and edits controls while a reader takes render
//! snapshots. A snapshot must always show one complete preset.
//!
//! Run with:
//! ```bash
//! cargo test -p patchbay --test concurrency
//! ```

mod helpers;

use helpers::test_synth;
use patchbay::Synth;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn preset(cutoff: f32, resonance: f32, bpm: f32, with_modulation: bool) -> String {
    let synth = Synth::builder().bpm(bpm).build().unwrap();
    synth.control("filter_1_cutoff").unwrap().set(cutoff);
    synth.control("filter_1_resonance").unwrap().set(resonance);
    if with_modulation {
        assert!(synth.connect_modulation_with_amount("lfo_1", "filter_1_cutoff", 0.5));
    }
    synth.to_json()
}

#[test]
fn test_preset_swap_is_atomic() {
    let synth = test_synth();
    let a = preset(20.0, 0.1, 100.0, false);
    let b = preset(120.0, 0.9, 200.0, true);
    assert!(synth.load_json(&a));

    let reader = synth.reader();
    let done = Arc::new(AtomicBool::new(false));

    let render = {
        let done = done.clone();
        thread::spawn(move || {
            let mut seen = 0usize;
            loop {
                let finished = done.load(Ordering::Acquire);
                let snapshot = reader.snapshot();
                let cutoff = snapshot.value("filter_1_cutoff").unwrap();
                let resonance = snapshot.value("filter_1_resonance").unwrap();
                let bpm = snapshot.bpm();
                let connections = snapshot.graph().len();

                let is_a = cutoff == 20.0 && resonance == 0.1 && bpm == 100.0 && connections == 0;
                let is_b = cutoff == 120.0 && resonance == 0.9 && bpm == 200.0 && connections == 1;
                assert!(
                    is_a || is_b,
                    "torn snapshot: {} {} {} {}",
                    cutoff,
                    resonance,
                    bpm,
                    connections
                );
                seen += 1;
                if finished {
                    break seen;
                }
            }
        })
    };

    for i in 0..500 {
        let json = if i % 2 == 0 { &b } else { &a };
        assert!(synth.load_json(json));
    }
    done.store(true, Ordering::Release);

    let seen = render.join().unwrap();
    assert!(seen > 0);
}

#[test]
fn test_control_writes_are_never_torn() {
    let synth = test_synth();
    let cutoff = synth.control("filter_1_cutoff").unwrap().clone();
    let reader = synth.reader();
    let done = Arc::new(AtomicBool::new(false));

    let render = {
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                let value = reader.snapshot().value("filter_1_cutoff").unwrap();
                assert!(
                    value == 8.0 || value == 136.0 || value == 60.0,
                    "torn value {}",
                    value
                );
            }
        })
    };

    for i in 0..10_000 {
        cutoff.set(if i % 2 == 0 { 8.0 } else { 136.0 });
    }
    done.store(true, Ordering::Release);
    render.join().unwrap();
}

#[test]
fn test_graph_edits_publish_whole_tables() {
    let synth = test_synth();
    let reader = synth.reader();
    let done = Arc::new(AtomicBool::new(false));

    let render = {
        let done = done.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                let snapshot = reader.snapshot();
                let len = snapshot.graph().len();
                assert!(len <= 2);
                assert_eq!(snapshot.graph().connections().count(), len);
            }
        })
    };

    for _ in 0..500 {
        assert!(synth.connect_modulation("lfo_1", "filter_1_cutoff"));
        assert!(synth.connect_modulation("env_1", "osc_1_level"));
        synth.clear_modulations();
    }
    done.store(true, Ordering::Release);
    render.join().unwrap();
}

#[test]
fn test_handles_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<patchbay::Control>();
    assert_send_sync::<patchbay::StateReader>();
    assert_send_sync::<patchbay::RenderSnapshot>();
    assert_send_sync::<Synth>();
}
