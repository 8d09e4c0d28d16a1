//! The standard synth control table.
//!
//! Models a three-oscillator wavetable synth: global voice settings,
//! oscillators, two filters plus an effects-chain filter, envelopes, LFOs,
//! random LFOs, the effects rack and the modulation slot bank.

use crate::catalog::ControlCatalog;
use crate::constants::{
    CompressorBandOption, DelayStyle, DelaySyncOption, DistortionEffect, DistortionType,
    FilterModel, FilterStyle, LfoSyncOption, LfoSyncType, Oversampling, RandomLfoStyle,
    SourceDestination, SpectralMorph, SyncedFrequency, VoiceOverride, VoicePriority,
};
use crate::descriptor::ControlDescriptor;
use crate::scale::ValueScale::{self, *};

pub const NUM_OSCILLATORS: usize = 3;
pub const NUM_FILTERS: usize = 2;
pub const NUM_ENVELOPES: usize = 6;
pub const NUM_LFOS: usize = 8;
pub const NUM_RANDOM_LFOS: usize = 4;
pub const NUM_MACROS: usize = 4;

/// Number of modulation slots, each backed by its own set of controls.
pub const MAX_MODULATION_SLOTS: usize = 64;

/// Per-slot modulation control suffixes.
pub const MODULATION_AMOUNT: &str = "amount";
pub const MODULATION_POWER: &str = "power";
pub const MODULATION_BIPOLAR: &str = "bipolar";
pub const MODULATION_STEREO: &str = "stereo";
pub const MODULATION_BYPASS: &str = "bypass";

pub const MODULATION_SLOT_FIELDS: [&str; 5] = [
    MODULATION_AMOUNT,
    MODULATION_POWER,
    MODULATION_BIPOLAR,
    MODULATION_STEREO,
    MODULATION_BYPASS,
];

/// Control name for a 1-based modulation slot field, e.g. `modulation_3_amount`.
pub fn modulation_control(slot: usize, field: &str) -> String {
    format!("modulation_{}_{}", slot, field)
}

const SECS: &str = " secs";
const SEMITONES: &str = " semitones";
const PERCENT: &str = "%";
const DB: &str = " dB";
const DEGREES: &str = "°";
const CENTS: &str = " cents";

/// Shorthand for a continuous control.
fn knob(name: String, min: f32, max: f32, default: f32, scale: ValueScale) -> ControlDescriptor {
    ControlDescriptor::continuous(name, min, max, default, scale)
}

fn percent(name: String, min: f32, max: f32, default: f32) -> ControlDescriptor {
    knob(name, min, max, default, Linear)
        .multiply(100.0)
        .units(PERCENT)
}

fn counted(name: String, min: i32, max: i32, default: i32, suffix: &str) -> ControlDescriptor {
    let options = (min..=max).map(|n| format!("{}{}", n, suffix)).collect();
    ControlDescriptor::indexed_from(name, min, options, default)
}

fn switch(name: impl Into<String>, default_on: bool) -> ControlDescriptor {
    ControlDescriptor::toggle(name, default_on)
}

fn choice(name: impl Into<String>, options: &[&str], default: usize) -> ControlDescriptor {
    ControlDescriptor::indexed(name, options, default)
}

fn global(table: &mut Vec<ControlDescriptor>) {
    table.push(switch("bypass", false).display_name("Bypass"));
    table.push(
        knob("volume".into(), 0.0, 1.0, 0.7071, Quadratic)
            .multiply(100.0)
            .units(PERCENT)
            .display_name("Volume"),
    );
    table.push(counted("polyphony".into(), 1, 32, 8, "").display_name("Polyphony"));

    let priority = VoicePriority::RoundRobin.index();
    table.push(
        choice("voice_priority", VoicePriority::LABELS, priority).display_name("Voice Priority"),
    );
    let override_mode = VoiceOverride::Kill.index();
    table.push(
        choice("voice_override", VoiceOverride::LABELS, override_mode)
            .display_name("Voice Override"),
    );
    table.push(switch("legato", false).display_name("Legato"));
    table.push(
        knob("portamento_time".into(), -10.0, 4.0, -10.0, Exponential)
            .units(SECS)
            .display_name("Glide Time"),
    );
    table.push(knob("portamento_slope".into(), -8.0, 8.0, 0.0, Linear).display_name("Glide Slope"));
    table.push(
        knob("pitch_bend_range".into(), 0.0, 48.0, 2.0, Linear)
            .units(SEMITONES)
            .display_name("Pitch Bend Range"),
    );
    table.push(percent("velocity_track".into(), -1.0, 1.0, 0.0).display_name("Velocity Tracking"));
    table.push(percent("stereo_routing".into(), 0.0, 1.0, 1.0).display_name("Stereo Routing"));
    let oversampling = Oversampling::X2.index();
    table.push(
        choice("oversampling", Oversampling::LABELS, oversampling).display_name("Oversampling"),
    );

    for i in 1..=NUM_MACROS {
        let name = format!("macro_control_{}", i);
        table.push(percent(name, 0.0, 1.0, 0.0).display_name(format!("Macro {}", i)));
    }
}

fn oscillators(table: &mut Vec<ControlDescriptor>) {
    for i in 1..=NUM_OSCILLATORS {
        let name = |suffix: &str| format!("osc_{}_{}", i, suffix);
        let title = |suffix: &str| format!("Oscillator {} {}", i, suffix);

        table.push(switch(name("on"), i == 1).display_name(title("Switch")));
        table.push(
            knob(name("level"), 0.0, 1.0, 0.7071, Quadratic)
                .multiply(100.0)
                .units(PERCENT)
                .display_name(title("Level")),
        );
        table.push(percent(name("pan"), -1.0, 1.0, 0.0).display_name(title("Pan")));
        table.push(
            knob(name("transpose"), -48.0, 48.0, 0.0, Linear)
                .units(SEMITONES)
                .display_name(title("Transpose")),
        );
        table.push(
            knob(name("tune"), -1.0, 1.0, 0.0, Linear)
                .multiply(100.0)
                .units(CENTS)
                .display_name(title("Tune")),
        );
        table.push(
            knob(name("wave_frame"), 0.0, 256.0, 0.0, Linear).display_name(title("Wave Frame")),
        );
        table.push(
            counted(name("unison_voices"), 1, 16, 1, "v").display_name(title("Unison Voices")),
        );
        table.push(
            knob(name("unison_detune"), 0.0, 10.0, 4.472136, Quadratic)
                .units(PERCENT)
                .display_name(title("Unison Detune")),
        );
        table.push(
            knob(name("phase"), 0.0, 1.0, 0.5, Linear)
                .multiply(360.0)
                .units(DEGREES)
                .display_name(title("Phase")),
        );
        table.push(
            percent(name("random_phase"), 0.0, 1.0, 1.0).display_name(title("Phase Randomization")),
        );
        table.push(
            choice(name("spectral_morph_type"), SpectralMorph::LABELS, 0)
                .display_name(title("Frequency Morph Type")),
        );
        table.push(
            percent(name("spectral_morph_amount"), 0.0, 1.0, 0.5)
                .display_name(title("Frequency Morph Amount")),
        );
        table.push(
            choice(name("distortion_type"), DistortionType::LABELS, 0)
                .display_name(title("Distortion Type")),
        );
        table.push(
            percent(name("distortion_amount"), 0.0, 1.0, 0.5)
                .display_name(title("Distortion Amount")),
        );
        table.push(
            choice(name("destination"), SourceDestination::LABELS, 0)
                .display_name(title("Destination")),
        );
    }
}

fn filter(table: &mut Vec<ControlDescriptor>, p: &str, label: &str) {
    let name = |suffix: &str| format!("{}_{}", p, suffix);
    let title = |suffix: &str| format!("{} {}", label, suffix);

    table.push(switch(name("on"), false).display_name(title("Switch")));
    table.push(
        knob(name("cutoff"), 8.0, 136.0, 60.0, Linear)
            .units(SEMITONES)
            .display_name(title("Cutoff")),
    );
    table.push(percent(name("resonance"), 0.0, 1.0, 0.5).display_name(title("Resonance")));
    table.push(
        knob(name("drive"), 0.0, 20.0, 0.0, Linear)
            .units(DB)
            .display_name(title("Drive")),
    );
    table.push(percent(name("mix"), 0.0, 1.0, 1.0).display_name(title("Mix")));
    table.push(knob(name("blend"), -1.0, 1.0, 0.0, Linear).display_name(title("Blend")));
    table.push(percent(name("keytrack"), -1.0, 1.0, 0.0).display_name(title("Key Track")));
    table.push(choice(name("model"), FilterModel::LABELS, 0).display_name(title("Model")));
    table.push(choice(name("style"), FilterStyle::LABELS, 0).display_name(title("Style")));
}

fn filters(table: &mut Vec<ControlDescriptor>) {
    for i in 1..=NUM_FILTERS {
        filter(table, &format!("filter_{}", i), &format!("Filter {}", i));
    }
    filter(table, "filter_fx", "FX Filter");
}

fn envelopes(table: &mut Vec<ControlDescriptor>) {
    for i in 1..=NUM_ENVELOPES {
        let name = |suffix: &str| format!("env_{}_{}", i, suffix);
        let title = |suffix: &str| format!("Envelope {} {}", i, suffix);
        let time = |stage: &str, max: f32, default: f32| {
            knob(name(stage), 0.0, max, default, Quartic)
                .units(SECS)
                .display_name(title(&capitalize(stage)))
        };
        let power = |stage: &str, default: f32| {
            let suffix = format!("{}_power", stage);
            knob(name(&suffix), -20.0, 20.0, default, Linear)
                .display_name(title(&format!("{} Power", capitalize(stage))))
        };

        table.push(time("delay", 1.4142135, 0.0));
        table.push(time("attack", 2.3784142, 0.1495));
        table.push(time("hold", 1.4142135, 0.0));
        table.push(time("decay", 2.3784142, 1.0));
        table.push(percent(name("sustain"), 0.0, 1.0, 1.0).display_name(title("Sustain")));
        table.push(time("release", 2.3784142, 0.5476));
        table.push(power("attack", 0.0));
        table.push(power("decay", -2.0));
        table.push(power("release", -2.0));
    }
}

fn lfos(table: &mut Vec<ControlDescriptor>) {
    for i in 1..=NUM_LFOS {
        let name = |suffix: &str| format!("lfo_{}_{}", i, suffix);
        let title = |suffix: &str| format!("LFO {} {}", i, suffix);

        table.push(
            knob(name("frequency"), -7.0, 9.0, 1.0, Exponential)
                .inverted()
                .units(SECS)
                .display_name(title("Frequency")),
        );
        let sync = LfoSyncOption::Tempo.index();
        table.push(choice(name("sync"), LfoSyncOption::LABELS, sync).display_name(title("Sync")));
        let tempo = SyncedFrequency::K1_4.index();
        table.push(
            choice(name("tempo"), SyncedFrequency::LABELS, tempo).display_name(title("Tempo")),
        );
        table.push(
            choice(name("sync_type"), LfoSyncType::LABELS, 0).display_name(title("Sync Type")),
        );
        table.push(
            knob(name("phase"), 0.0, 1.0, 0.0, Linear)
                .multiply(360.0)
                .units(DEGREES)
                .display_name(title("Phase")),
        );
        table.push(
            knob(name("fade_time"), 0.0, 8.0, 0.0, Linear)
                .units(SECS)
                .display_name(title("Fade In")),
        );
        table.push(
            knob(name("delay_time"), 0.0, 4.0, 0.0, Linear)
                .units(SECS)
                .display_name(title("Delay")),
        );
        table.push(switch(name("smooth_mode"), true).display_name(title("Smooth Mode")));
        table.push(
            knob(name("smooth_time"), -10.0, 4.0, -7.5, Exponential)
                .units(SECS)
                .display_name(title("Smooth Time")),
        );
        table.push(percent(name("stereo"), -0.5, 0.5, 0.0).display_name(title("Stereo")));
        table.push(
            knob(name("keytrack_transpose"), -60.0, 36.0, -12.0, Linear)
                .units(SEMITONES)
                .display_name(title("Transpose")),
        );
    }
}

fn random_lfos(table: &mut Vec<ControlDescriptor>) {
    for i in 1..=NUM_RANDOM_LFOS {
        let name = |suffix: &str| format!("random_{}_{}", i, suffix);
        let title = |suffix: &str| format!("Random LFO {} {}", i, suffix);

        table.push(
            knob(name("frequency"), -7.0, 9.0, 1.0, Exponential)
                .inverted()
                .units(SECS)
                .display_name(title("Frequency")),
        );
        table.push(choice(name("style"), RandomLfoStyle::LABELS, 0).display_name(title("Style")));
        let sync = LfoSyncOption::Tempo.index();
        table.push(choice(name("sync"), LfoSyncOption::LABELS, sync).display_name(title("Sync")));
        let tempo = SyncedFrequency::K1_4.index();
        table.push(
            choice(name("tempo"), SyncedFrequency::LABELS, tempo).display_name(title("Tempo")),
        );
        table.push(switch(name("stereo"), false).display_name(title("Stereo")));
        table.push(
            knob(name("keytrack_transpose"), -60.0, 36.0, -12.0, Linear)
                .units(SEMITONES)
                .display_name(title("Transpose")),
        );
    }
}

fn effects(table: &mut Vec<ControlDescriptor>) {
    table.push(switch("delay_on", false).display_name("Delay Switch"));
    table.push(choice("delay_style", DelayStyle::LABELS, 0).display_name("Delay Style"));
    table.push(percent("delay_feedback".into(), -1.0, 1.0, 0.5).display_name("Delay Feedback"));
    table.push(percent("delay_dry_wet".into(), 0.0, 1.0, 0.3334).display_name("Delay Mix"));
    table.push(
        knob("delay_frequency".into(), -2.0, 9.0, 2.0, Exponential)
            .inverted()
            .units(SECS)
            .display_name("Delay Frequency"),
    );
    let sync = DelaySyncOption::Tempo.index();
    table.push(choice("delay_sync", DelaySyncOption::LABELS, sync).display_name("Delay Sync"));
    let tempo = SyncedFrequency::K1_16.index();
    table.push(choice("delay_tempo", SyncedFrequency::LABELS, tempo).display_name("Delay Tempo"));
    table.push(
        knob("delay_filter_cutoff".into(), 8.0, 136.0, 60.0, Linear)
            .units(SEMITONES)
            .display_name("Delay Filter Cutoff"),
    );
    table.push(
        percent("delay_filter_spread".into(), 0.0, 1.0, 1.0).display_name("Delay Filter Spread"),
    );

    table.push(switch("reverb_on", false).display_name("Reverb Switch"));
    table.push(percent("reverb_dry_wet".into(), 0.0, 1.0, 0.25).display_name("Reverb Mix"));
    table.push(
        knob("reverb_decay_time".into(), -6.0, 6.0, 0.0, Exponential)
            .units(SECS)
            .display_name("Reverb Decay Time"),
    );
    table.push(percent("reverb_size".into(), 0.0, 1.0, 0.5).display_name("Reverb Size"));
    table.push(
        knob("reverb_pre_high_cutoff".into(), 0.0, 128.0, 110.0, Linear)
            .units(SEMITONES)
            .display_name("Reverb Pre High Cutoff"),
    );
    table.push(
        knob("reverb_chorus_amount".into(), 0.0, 1.0, 0.15, Quadratic)
            .multiply(100.0)
            .units(PERCENT)
            .display_name("Reverb Chorus Amount"),
    );

    table.push(switch("chorus_on", false).display_name("Chorus Switch"));
    table.push(percent("chorus_dry_wet".into(), 0.0, 1.0, 0.5).display_name("Chorus Mix"));
    table.push(percent("chorus_feedback".into(), -0.95, 0.95, 0.4).display_name("Chorus Feedback"));
    table.push(counted("chorus_voices".into(), 1, 4, 4, "").display_name("Chorus Voices"));
    table.push(
        knob("chorus_frequency".into(), -6.0, 3.0, -3.0, Exponential)
            .inverted()
            .units(SECS)
            .display_name("Chorus Frequency"),
    );
    table.push(percent("chorus_mod_depth".into(), 0.0, 1.0, 0.5).display_name("Chorus Mod Depth"));

    table.push(switch("distortion_on", false).display_name("Distortion Switch"));
    table.push(
        choice("distortion_type", DistortionEffect::LABELS, 0).display_name("Distortion Type"),
    );
    table.push(
        knob("distortion_drive".into(), -30.0, 30.0, 0.0, Linear)
            .units(DB)
            .display_name("Distortion Drive"),
    );
    table.push(percent("distortion_mix".into(), 0.0, 1.0, 1.0).display_name("Distortion Mix"));

    table.push(switch("compressor_on", false).display_name("Compressor Switch"));
    table.push(
        choice("compressor_enabled_bands", CompressorBandOption::LABELS, 0)
            .display_name("Compressor Enabled Bands"),
    );
    table.push(
        percent("compressor_attack".into(), 0.0, 1.0, 0.5).display_name("Compressor Attack"),
    );
    table.push(
        percent("compressor_release".into(), 0.0, 1.0, 0.5).display_name("Compressor Release"),
    );
    table.push(percent("compressor_mix".into(), 0.0, 1.0, 1.0).display_name("Compressor Mix"));

    table.push(switch("phaser_on", false).display_name("Phaser Switch"));
    table.push(percent("phaser_dry_wet".into(), 0.0, 1.0, 1.0).display_name("Phaser Mix"));
    table.push(percent("phaser_feedback".into(), 0.0, 1.0, 0.5).display_name("Phaser Feedback"));
    table.push(
        knob("phaser_frequency".into(), -5.0, 2.0, -3.0, Exponential)
            .inverted()
            .units(SECS)
            .display_name("Phaser Frequency"),
    );
    table.push(
        knob("phaser_center".into(), 8.0, 136.0, 80.0, Linear)
            .units(SEMITONES)
            .display_name("Phaser Center"),
    );

    table.push(switch("flanger_on", false).display_name("Flanger Switch"));
    table.push(percent("flanger_dry_wet".into(), 0.0, 0.5, 0.5).display_name("Flanger Mix"));
    table.push(percent("flanger_feedback".into(), -1.0, 1.0, 0.5).display_name("Flanger Feedback"));
    table.push(
        knob("flanger_frequency".into(), -5.0, 2.0, 2.0, Exponential)
            .inverted()
            .units(SECS)
            .display_name("Flanger Frequency"),
    );

    table.push(switch("eq_on", false).display_name("EQ Switch"));
    for (band, cutoff) in [("low", 40.0), ("band", 80.0), ("high", 100.0)] {
        let label = capitalize(band);
        table.push(
            knob(format!("eq_{}_gain", band), -30.0, 30.0, 0.0, Linear)
                .units(DB)
                .display_name(format!("EQ {} Gain", label)),
        );
        table.push(
            knob(format!("eq_{}_cutoff", band), 8.0, 136.0, cutoff, Linear)
                .units(SEMITONES)
                .display_name(format!("EQ {} Cutoff", label)),
        );
    }
}

fn modulation_slots(table: &mut Vec<ControlDescriptor>) {
    for slot in 1..=MAX_MODULATION_SLOTS {
        let name = |field: &str| modulation_control(slot, field);
        let title = |suffix: &str| format!("Modulation {} {}", slot, suffix);

        table.push(
            knob(name(MODULATION_AMOUNT), -1.0, 1.0, 0.0, Linear).display_name(title("Amount")),
        );
        table.push(
            knob(name(MODULATION_POWER), -10.0, 10.0, 0.0, Linear).display_name(title("Power")),
        );
        table.push(switch(name(MODULATION_BIPOLAR), false).display_name(title("Bipolar")));
        table.push(switch(name(MODULATION_STEREO), false).display_name(title("Stereo")));
        table.push(switch(name(MODULATION_BYPASS), false).display_name(title("Bypass")));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Every descriptor of the standard table, in index order.
pub fn descriptors() -> Vec<ControlDescriptor> {
    let mut table = Vec::with_capacity(1024);
    global(&mut table);
    oscillators(&mut table);
    filters(&mut table);
    envelopes(&mut table);
    lfos(&mut table);
    random_lfos(&mut table);
    effects(&mut table);
    modulation_slots(&mut table);
    table
}

pub(crate) fn build() -> ControlCatalog {
    ControlCatalog::from_static(descriptors())
}
