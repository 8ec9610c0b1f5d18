//! Gain and frequency readouts.
//!
//! Frequency comes from a band-crossing count: samples strictly inside
//! [`CROSSING_BAND`] are counted and scaled by a constant derived from the
//! capture window, assuming [`CROSSINGS_PER_CYCLE`] band visits per period.
//! The count is only an approximation. Every sample inside the band counts,
//! so a signal that lingers in the band for several consecutive samples, or
//! chatters across its edges, is counted more than once per visit and the
//! result depends on slope and noise as much as on the period. No hysteresis
//! is applied.

use crate::buffer::SampleBuffer;
use crate::config::{ADC_MAX, CROSSINGS_PER_CYCLE, CROSSING_BAND};
use crate::hw::{AnalogSource, Input};

/// Readouts of one cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimates {
    pub gain: f32,
    pub frequency: f32,
}

impl Default for Estimates {
    fn default() -> Self {
        Estimates {
            gain: gain_from_code(0),
            frequency: 0.0,
        }
    }
}

pub struct Estimator {
    scale: f32,
    last_gain_code: u16,
}

impl Estimator {
    /// `sample_rate_hz` and `sample_count` describe the capture window the
    /// crossing count is taken over.
    pub fn new(sample_rate_hz: u32, sample_count: usize) -> Self {
        let scale =
            sample_rate_hz as f32 / sample_count as f32 / CROSSINGS_PER_CYCLE as f32;
        Estimator {
            scale,
            last_gain_code: 0,
        }
    }

    /// Hz per counted crossing.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn frequency<const LEN: usize>(&self, buffer: &SampleBuffer<LEN>) -> f32 {
        crossing_count(buffer) as f32 * self.scale
    }

    /// Reads the gain channel once and derives both readouts. A failed gain
    /// read reuses the previous code.
    pub fn estimate<A, const LEN: usize>(
        &mut self,
        buffer: &SampleBuffer<LEN>,
        source: &mut A,
    ) -> Estimates
    where
        A: AnalogSource,
    {
        match source.read(Input::Gain) {
            Ok(code) if code <= ADC_MAX => self.last_gain_code = code,
            _ => warn!("gain read failed, keeping code {=u16}", self.last_gain_code),
        }
        Estimates {
            gain: gain_from_code(self.last_gain_code),
            frequency: self.frequency(buffer),
        }
    }
}

/// Maps a gain channel code onto `[1.0, 11.0]`.
pub fn gain_from_code(code: u16) -> f32 {
    10.0 * code as f32 / ADC_MAX as f32 + 1.0
}

pub fn crossing_count<const LEN: usize>(buffer: &SampleBuffer<LEN>) -> usize {
    let (low, high) = CROSSING_BAND;
    buffer.iter().filter(|&code| low < code && code < high).count()
}
