//! Renderer collaborator interface.
//!
//! Audio generation lives outside this crate. A [`Renderer`] receives a
//! pinned [`RenderSnapshot`] of control values and modulation, plus the note
//! to play, and returns a planar buffer.

use crate::state::RenderSnapshot;
use crate::Result;

/// Note to render. Values are passed through unvalidated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// MIDI note number.
    pub pitch: i32,
    /// 0.0-1.0
    pub velocity: f32,
    /// Seconds the note is held.
    pub note_duration: f32,
    /// Seconds of audio to produce, including release tail.
    pub total_duration: f32,
}

/// Rendered audio, one `Vec` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Silent stereo buffer.
    pub fn stereo(sample_rate: u32, frames: usize) -> Self {
        Self::silent(2, sample_rate, frames)
    }

    pub fn silent(channel_count: usize, sample_rate: u32, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channel_count],
            sample_rate,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Frames in the shortest channel.
    pub fn frames(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Peak absolute sample across channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    /// Interleaved frames `[c0, c1, ..., c0, c1, ...]`.
    pub fn interleaved(&self) -> Vec<f32> {
        let frames = self.frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for i in 0..frames {
            out.extend(self.channels.iter().map(|c| c[i]));
        }
        out
    }
}

/// Produces audio from control state.
pub trait Renderer {
    fn render(&mut self, snapshot: &RenderSnapshot, request: &RenderRequest) -> Result<AudioBuffer>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(
        &mut self,
        snapshot: &RenderSnapshot,
        request: &RenderRequest,
    ) -> Result<AudioBuffer> {
        (**self).render(snapshot, request)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(
        &mut self,
        snapshot: &RenderSnapshot,
        request: &RenderRequest,
    ) -> Result<AudioBuffer> {
        (**self).render(snapshot, request)
    }
}
