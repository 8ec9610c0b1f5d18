use stm32g0xx_hal::analog::adc::{Adc, AdcExt, Precision, SampleTime};
use stm32g0xx_hal::hal::adc::OneShot;
use stm32g0xx_hal::rcc::Rcc;
use stm32g0xx_hal::stm32g0::stm32g070::ADC;

use crate::hw::helper::{GainInput, SignalInput};
use crate::hw::{AnalogSource, Input};

#[derive(Debug)]
pub struct AdcError;

/// Probe and gain inputs sharing the single ADC. Every read is one blocking
/// conversion.
pub struct FrontEnd {
    adc: Adc,
    signal: SignalInput,
    gain: GainInput,
}

impl FrontEnd {
    pub fn new(pac_adc: ADC, signal: SignalInput, gain: GainInput, rcc: &mut Rcc) -> Self {
        let mut adc = pac_adc.constrain(rcc);
        // Conversion stays well below the 100 us sample interval
        adc.set_sample_time(SampleTime::T_80);
        adc.set_precision(Precision::B_12);
        adc.calibrate();
        FrontEnd { adc, signal, gain }
    }
}

impl AnalogSource for FrontEnd {
    type Error = AdcError;

    fn read(&mut self, input: Input) -> Result<u16, AdcError> {
        let code: u16 = match input {
            Input::Signal => nb::block!(self.adc.read(&mut self.signal)),
            Input::Gain => nb::block!(self.adc.read(&mut self.gain)),
        }
        .map_err(|_| AdcError)?;
        Ok(code)
    }
}
