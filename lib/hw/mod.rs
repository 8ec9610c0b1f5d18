use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::drawable::Drawable;

use crate::time::Instant;

#[cfg(target_os = "none")]
mod adc;
#[cfg(target_os = "none")]
mod helper;
#[cfg(target_os = "none")]
mod lcd;
#[cfg(target_os = "none")]
mod timers;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(target_os = "none")]
pub use adc::{AdcError, FrontEnd};
#[cfg(target_os = "none")]
pub use helper::*;
#[cfg(target_os = "none")]
pub use lcd::IliError;
#[cfg(target_os = "none")]
pub use timers::{micros, MonoTimer};

pub trait Lcd {
    type Error;
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;
    fn draw<D: Drawable<Rgb565>>(&mut self, drawable: D) -> Result<(), Self::Error>;
}

/// Analog channels of the front end.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// Probe signal, read once per sample
    Signal,
    /// Gain potentiometer, read once per cycle
    Gain,
}

pub trait AnalogSource {
    type Error;
    fn read(&mut self, input: Input) -> Result<u16, Self::Error>;
}

pub trait Clock {
    fn now(&mut self) -> Instant;

    /// Spins until `deadline` is reached and returns the instant at which that
    /// was observed. Returns immediately when the deadline already passed.
    fn wait_until(&mut self, deadline: Instant) -> Instant {
        loop {
            let now = self.now();
            if now.ticks_until(deadline) <= 0 {
                return now;
            }
            core::hint::spin_loop();
        }
    }
}
