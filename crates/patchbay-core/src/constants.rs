//! Typed option indices for discrete controls.
//!
//! Each enum lists the options of one family of indexed controls in table
//! order, so a variant converts straight to the native value the control
//! stores:
//!
//! ```
//! use patchbay_core::constants::SyncedFrequency;
//! use patchbay_core::ControlCatalog;
//!
//! let tempo = ControlCatalog::standard().get("lfo_1_tempo")?.clone();
//! let value = f32::from(SyncedFrequency::K1_16);
//! assert_eq!(value, 9.0);
//! assert_eq!(tempo.text(value), "1/16");
//! # Ok::<(), patchbay_core::Error>(())
//! ```
//!
//! The `LABELS` of each enum are the option lists the standard table is
//! built from.

macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl $name {
            /// Every option in index order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Display label of every option in index order.
            pub const LABELS: &'static [&'static str] = &[$($label,)+];

            /// Option index; the native value of the control.
            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            pub fn label(self) -> &'static str {
                Self::LABELS[self.index()]
            }

            /// Option at `index`, if any.
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }

            /// Option for a native value, rounding to the nearest index.
            pub fn from_value(value: f32) -> Option<Self> {
                if !value.is_finite() || value < -0.5 {
                    return None;
                }
                Self::from_index(value.round() as usize)
            }
        }

        impl From<$name> for f32 {
            #[inline]
            fn from(option: $name) -> f32 {
                option as i32 as f32
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

option_enum! {
    /// Where an oscillator or the sampler sends its output.
    SourceDestination {
        Filter1 => "Filter 1",
        Filter2 => "Filter 2",
        DualFilters => "Dual Filters",
        Effects => "Effects",
        DirectOut => "Direct Out",
    }
}

option_enum! {
    /// Effects in the default chain order.
    Effect {
        Chorus => "Chorus",
        Compressor => "Compressor",
        Delay => "Delay",
        Distortion => "Distortion",
        Eq => "Eq",
        FilterFx => "Filter",
        Flanger => "Flanger",
        Phaser => "Phaser",
        Reverb => "Reverb",
    }
}

option_enum! {
    /// `filter_N_model` and `filter_fx_model`.
    FilterModel {
        Analog => "Analog",
        Dirty => "Dirty",
        Ladder => "Ladder",
        Digital => "Digital",
        Diode => "Diode",
        Formant => "Formant",
        Comb => "Comb",
        Phase => "Phase",
    }
}

option_enum! {
    /// `filter_N_style` and `filter_fx_style`.
    FilterStyle {
        K12Db => "12dB",
        K24Db => "24dB",
        NotchPassSwap => "Notch Pass Swap",
        DualNotchBand => "Dual Notch Band",
        BandPeakNotch => "Band Peak Notch",
        Shelving => "Shelving",
    }
}

option_enum! {
    /// `osc_N_spectral_morph_type`.
    SpectralMorph {
        NoSpectralMorph => "None",
        Vocode => "Vocode",
        FormScale => "Formant Scale",
        HarmonicScale => "Harmonic Stretch",
        InharmonicScale => "Inharmonic Stretch",
        Smear => "Smear",
        RandomAmplitudes => "Random Amplitudes",
        LowPass => "Low Pass",
        HighPass => "High Pass",
        PhaseDisperse => "Phase Disperse",
        ShepardTone => "Shepard Tone",
        Skew => "Skew",
    }
}

option_enum! {
    /// `osc_N_distortion_type`: the oscillator's phase distortion.
    DistortionType {
        None => "None",
        Sync => "Sync",
        Formant => "Formant",
        Quantize => "Quantize",
        Bend => "Bend",
        Squeeze => "Squeeze",
        PulseWidth => "Pulse Width",
        FmOscillatorA => "FM <- Osc A",
        FmOscillatorB => "FM <- Osc B",
        FmSample => "FM <- Sample",
        RmOscillatorA => "RM <- Osc A",
        RmOscillatorB => "RM <- Osc B",
        RmSample => "RM <- Sample",
    }
}

option_enum! {
    /// `distortion_type`: the distortion effect's waveshaper.
    DistortionEffect {
        SoftClip => "Soft Clip",
        HardClip => "Hard Clip",
        LinearFold => "Linear Fold",
        SineFold => "Sine Fold",
        BitCrush => "Bit Crush",
        DownSample => "Down Sample",
    }
}

option_enum! {
    /// Stacking of unison voices.
    UnisonStackType {
        Normal => "Normal",
        CenterDropOctave => "Center Drop 12",
        CenterDropOctave2 => "Center Drop 24",
        Octave => "Octave",
        Octave2 => "2x Octave",
        PowerChord => "Power Chord",
        PowerChord2 => "2x Power Chord",
        MajorChord => "Major Chord",
        MinorChord => "Minor Chord",
        HarmonicSeries => "Harmonics",
        OddHarmonicSeries => "Odd Harmonics",
    }
}

option_enum! {
    /// `random_N_style`.
    RandomLfoStyle {
        Perlin => "Perlin",
        SampleAndHold => "Sample & Hold",
        SinInterpolate => "Sine Interpolate",
        LorenzAttractor => "Lorenz Attractor",
    }
}

option_enum! {
    /// `voice_priority`.
    VoicePriority {
        Newest => "Newest",
        Oldest => "Oldest",
        Highest => "Highest",
        Lowest => "Lowest",
        RoundRobin => "Round Robin",
    }
}

option_enum! {
    /// `voice_override`.
    VoiceOverride {
        Kill => "Kill",
        Steal => "Steal",
    }
}

option_enum! {
    /// Basic LFO wave shapes.
    WaveShape {
        Sin => "Sin",
        SaturatedSin => "Saturated Sin",
        Triangle => "Triangle",
        Square => "Square",
        Pulse => "Pulse",
        Saw => "Saw",
    }
}

option_enum! {
    /// `lfo_N_sync_type`: how an LFO's phase follows the note.
    LfoSyncType {
        Trigger => "Trigger",
        Sync => "Sync",
        Envelope => "Envelope",
        SustainEnvelope => "Sustain Envelope",
        LoopPoint => "Loop Point",
        LoopHold => "Loop Hold",
    }
}

option_enum! {
    /// `lfo_N_sync` and `random_N_sync`: the unit of the rate control.
    LfoSyncOption {
        Time => "Time",
        Tempo => "Tempo",
        DottedTempo => "Dotted Tempo",
        TripletTempo => "Triplet Tempo",
        Keytrack => "Keytrack",
    }
}

option_enum! {
    /// `delay_sync`. Same as [`LfoSyncOption`] without keytracking.
    DelaySyncOption {
        Time => "Time",
        Tempo => "Tempo",
        DottedTempo => "Dotted Tempo",
        TripletTempo => "Triplet Tempo",
    }
}

option_enum! {
    /// Tempo-synced note lengths for `lfo_N_tempo`, `random_N_tempo` and `delay_tempo`.
    SyncedFrequency {
        K32_1 => "32/1",
        K16_1 => "16/1",
        K8_1 => "8/1",
        K4_1 => "4/1",
        K2_1 => "2/1",
        K1_1 => "1/1",
        K1_2 => "1/2",
        K1_4 => "1/4",
        K1_8 => "1/8",
        K1_16 => "1/16",
        K1_32 => "1/32",
        K1_64 => "1/64",
    }
}

option_enum! {
    /// `oversampling`.
    Oversampling {
        X1 => "1x",
        X2 => "2x",
        X4 => "4x",
        X8 => "8x",
    }
}

option_enum! {
    /// `delay_style`.
    DelayStyle {
        Mono => "Mono",
        Stereo => "Stereo",
        PingPong => "Ping Pong",
        MidPingPong => "Mid Ping Pong",
    }
}

option_enum! {
    /// `compressor_enabled_bands`.
    CompressorBandOption {
        Multiband => "Multiband",
        LowBand => "Low Band",
        HighBand => "High Band",
        SingleBand => "Single Band",
    }
}
