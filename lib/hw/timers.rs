use core::sync::atomic::{AtomicU32, Ordering};
use stm32g0xx_hal::rcc::Rcc;
use stm32g0xx_hal::stm32g0::stm32g070::{RCC, TIM3};

use crate::hw::Clock;
use crate::time::Instant;

// Upper half of the microsecond count, written only by the TIM3 interrupt
static OVERFLOWS: AtomicU32 = AtomicU32::new(0);

/// Free running 1 MHz counter on TIM3, extended to 32 bits by counting
/// update events.
pub struct MonoTimer {
    timer: TIM3,
}

impl MonoTimer {
    const TICK_HZ: u32 = 1_000_000;

    pub fn new(pac_timer: TIM3, rcc: &mut Rcc) -> Self {
        MonoTimer::enable_clock_and_reset(rcc);
        let mut timer = MonoTimer { timer: pac_timer };
        timer.configure(rcc.clocks.apb_tim_clk.0);
        timer
    }

    pub fn start(&mut self) {
        self.timer.cr1.modify(|_, w| w.cen().set_bit());
    }

    /// Has to be called from the TIM3 interrupt.
    pub fn on_overflow() {
        let timer = unsafe { &(*TIM3::ptr()) };
        timer.sr.modify(|_, w| w.uif().clear_bit());
        let overflows = OVERFLOWS.load(Ordering::Relaxed);
        OVERFLOWS.store(overflows.wrapping_add(1), Ordering::Release);
    }

    fn configure(&mut self, timer_clock_hz: u32) {
        // Prescale to 1 us ticks
        self.timer
            .psc
            .write(|w| unsafe { w.psc().bits((timer_clock_hz / MonoTimer::TICK_HZ - 1) as u16) });
        // Set ARR to max value
        self.timer
            .arr
            .write(|w| unsafe { w.arr_l().bits(u16::max_value()) });

        // Trigger update event to load the registers
        self.timer.cr1.modify(|_, w| w.urs().set_bit());
        self.timer.egr.write(|w| w.ug().set_bit());
        self.timer.cr1.modify(|_, w| w.urs().clear_bit());
        self.timer.sr.modify(|_, w| w.uif().clear_bit());

        // Interrupt on overflow
        self.timer.dier.write(|w| w.uie().set_bit());
    }

    fn enable_clock_and_reset(_: &mut Rcc) {
        let rcc = unsafe { &(*RCC::ptr()) };
        rcc.apbenr1.modify(|_, w| w.tim3en().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim3rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim3rst().clear_bit());
    }
}

impl Clock for MonoTimer {
    fn now(&mut self) -> Instant {
        Instant::from_micros(micros())
    }
}

/// Microseconds since [`MonoTimer::start`].
pub fn micros() -> u32 {
    let timer = unsafe { &(*TIM3::ptr()) };
    loop {
        let high = OVERFLOWS.load(Ordering::Acquire);
        let low = timer.cnt.read().cnt_l().bits();
        // Wrapped, but the interrupt has not run yet
        let pending = timer.sr.read().uif().bit_is_set() && low < 0x8000;
        if OVERFLOWS.load(Ordering::Acquire) == high {
            let high = if pending { high.wrapping_add(1) } else { high };
            return high << 16 | low as u32;
        }
    }
}
