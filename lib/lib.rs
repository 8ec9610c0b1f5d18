#![cfg_attr(not(test), no_std)]

#[cfg(target_os = "none")]
use defmt_rtt as _; // global logger
#[cfg(target_os = "none")]
use panic_probe as _;

#[macro_use]
mod fmt;

pub mod buffer;
pub mod config;
pub mod display;
pub mod error;
pub mod estimator;
pub mod hw;
pub mod sampler;
pub mod scope;
pub mod theme;
pub mod time;
pub mod ui;

#[cfg(target_os = "none")]
defmt::timestamp!("{=u32}", hw::micros());
