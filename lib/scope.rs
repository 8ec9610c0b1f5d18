use crate::buffer::SampleBuffer;
use crate::display::Display;
use crate::error::{Error, Result};
use crate::estimator::{Estimates, Estimator};
use crate::hw::{AnalogSource, Clock, Lcd};
use crate::sampler::{Acquisition, Sampler};
use crate::ui::{Action, ButtonPad, Ui};

/// What happened during one [`Scope::cycle`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cycle {
    pub acquisition: Acquisition,
    pub action: Option<Action>,
    pub drawn: bool,
}

/// All state carried from one cycle to the next.
pub struct Scope<const LEN: usize> {
    buffer: SampleBuffer<LEN>,
    sampler: Sampler,
    estimator: Estimator,
    estimates: Estimates,
    ui: Ui,
}

impl<const LEN: usize> Scope<LEN> {
    pub fn new(sample_rate_hz: u32) -> Self {
        Scope {
            buffer: SampleBuffer::new(),
            sampler: Sampler::from_rate(sample_rate_hz),
            estimator: Estimator::new(sample_rate_hz, LEN),
            estimates: Estimates::default(),
            ui: Ui::new(),
        }
    }

    pub fn buffer(&self) -> &SampleBuffer<LEN> {
        &self.buffer
    }

    pub fn estimates(&self) -> &Estimates {
        &self.estimates
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// Paints the initial background.
    pub fn start<LCD: Lcd>(&self, display: &mut Display<LCD>) {
        if display.clear(self.ui.theme()).is_err() {
            warn!("initial screen clear failed");
        }
    }

    /// Acquire, estimate, handle buttons, render. Display errors drop the
    /// frame; the next cycle redraws everything it needs.
    pub fn cycle<A, C, P, LCD>(
        &mut self,
        source: &mut A,
        clock: &mut C,
        buttons: &mut P,
        display: &mut Display<LCD>,
    ) -> Cycle
    where
        A: AnalogSource,
        C: Clock,
        P: ButtonPad,
        LCD: Lcd,
    {
        let acquisition = self.sampler.acquire(&mut self.buffer, source, clock);
        self.estimates = self.estimator.estimate(&self.buffer, source);
        let action = self.ui.handle(clock.now(), buttons.pressed());

        let drawn = match self.render(action, display) {
            Ok(()) => true,
            Err(Error::Lcd(_)) => {
                warn!("display write failed, frame dropped");
                false
            }
            Err(Error::BufferWrite) => {
                warn!("info text does not fit, frame dropped");
                false
            }
        };

        Cycle {
            acquisition,
            action,
            drawn,
        }
    }

    fn render<LCD: Lcd>(
        &self,
        action: Option<Action>,
        display: &mut Display<LCD>,
    ) -> Result<(), LCD::Error> {
        let theme = self.ui.theme();
        if action.map_or(false, Action::clears_screen) {
            display.clear(theme)?;
        }
        display.waveform(&self.buffer, self.ui.zoom(), theme)?;
        display.info(&self.estimates, theme)?;
        display.menu(self.ui.state(), theme)
    }
}
