//! Compile-time configuration of the acquisition, estimation and UI.

/// Samples captured per acquisition cycle.
pub const SAMPLE_COUNT: usize = 1000;
/// Target sampling rate of the signal channel.
pub const SAMPLE_RATE_HZ: u32 = 10_000;
/// Largest code of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

/// Open band of ADC codes around the expected DC midpoint. A sample strictly
/// inside counts as one crossing.
pub const CROSSING_BAND: (u16, u16) = (2000, 2080);
/// Band entries produced by one period of the signal.
pub const CROSSINGS_PER_CYCLE: u32 = 2;

pub const SCREEN_WIDTH: u16 = 320;
pub const SCREEN_HEIGHT: u16 = 240;

pub const INFO_TEXT_Y: i32 = 8;
pub const MENU_Y: i32 = 24;
pub const WAVEFORM_TOP: i32 = 48;
pub const WAVEFORM_HEIGHT: i32 = SCREEN_HEIGHT as i32 - WAVEFORM_TOP - 16;

pub const ZOOM_INITIAL: f32 = 0.3;
pub const ZOOM_FLOOR: f32 = 0.1;
pub const ZOOM_STEP: f32 = 1.5;

/// Minimum time between two accepted button actions.
pub const DEBOUNCE_INTERVAL_US: u32 = 50_000;
