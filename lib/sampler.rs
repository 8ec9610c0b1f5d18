use crate::buffer::SampleBuffer;
use crate::config::ADC_MAX;
use crate::hw::{AnalogSource, Clock, Input};
use crate::time::Instant;

/// Outcome of one capture.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Acquisition {
    /// Instant the first sample was due
    pub start: Instant,
    /// Samples taken one full interval or more after their deadline
    pub late: usize,
    /// Reads that failed and were replaced by the last good code
    pub substituted: usize,
}

/// Fills a [`SampleBuffer`] at a fixed rate.
///
/// Every deadline is computed from the capture start, so a slow read delays
/// only the sample that follows it and the grid is picked up again right
/// after. Offsets wrap together with [`Instant`], so any buffer length works;
/// the interval itself must stay below 2^31 us.
pub struct Sampler {
    interval_us: u32,
    last_good: u16,
}

impl Sampler {
    pub fn new(interval_us: u32) -> Self {
        Sampler {
            interval_us,
            last_good: 0,
        }
    }

    pub fn from_rate(rate_hz: u32) -> Self {
        Sampler::new(1_000_000 / rate_hz)
    }

    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    pub fn acquire<A, C, const LEN: usize>(
        &mut self,
        buffer: &mut SampleBuffer<LEN>,
        source: &mut A,
        clock: &mut C,
    ) -> Acquisition
    where
        A: AnalogSource,
        C: Clock,
    {
        let start = clock.now();
        let mut late = 0;
        let mut substituted = 0;

        for index in 0..LEN {
            let deadline = start.add_micros((index as u32).wrapping_mul(self.interval_us));
            let woke = clock.wait_until(deadline);
            if deadline.ticks_until(woke) >= self.interval_us as i32 {
                late += 1;
            }
            let code = match source.read(Input::Signal) {
                Ok(code) if code <= ADC_MAX => {
                    self.last_good = code;
                    code
                }
                _ => {
                    substituted += 1;
                    self.last_good
                }
            };
            buffer.store(index, code);
        }

        if late > 0 {
            trace!("{=usize} samples missed their deadline", late);
        }
        if substituted > 0 {
            warn!("{=usize} signal reads failed, reused last good code", substituted);
        }

        Acquisition {
            start,
            late,
            substituted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::mock::{FakeAdc, FakeClock};

    const INTERVAL: u32 = 100;
    const READ_COST: u32 = 30;
    const SPIN_STEP: u32 = 1;

    #[test]
    fn samples_land_on_the_deadline_grid() {
        let clock = FakeClock::new(5_000, SPIN_STEP);
        let mut adc = FakeAdc::from_fn(|i| Ok(i as u16)).with_clock(clock.clone(), |_| READ_COST);
        let mut buffer = SampleBuffer::<64>::new();
        let mut sampler = Sampler::new(INTERVAL);

        let acquisition = sampler.acquire(&mut buffer, &mut adc, &mut clock.clone());

        assert_eq!(adc.read_times.len(), 64);
        let start = acquisition.start.as_micros();
        for (i, time) in adc.read_times.iter().enumerate() {
            let nominal = start + i as u32 * INTERVAL;
            assert!(*time >= nominal, "sample {} early", i);
            assert!(*time - nominal <= SPIN_STEP, "sample {} drifted", i);
        }
        assert_eq!(acquisition.late, 0);
        assert_eq!(buffer.get(63), Some(63));
    }

    #[test]
    fn overrun_is_local_to_the_next_sample() {
        let clock = FakeClock::new(0, SPIN_STEP);
        // Read 10 takes two and a half intervals
        let mut adc = FakeAdc::constant(2048).with_clock(clock.clone(), |i| {
            if i == 10 {
                250
            } else {
                READ_COST
            }
        });
        let mut buffer = SampleBuffer::<32>::new();
        let mut sampler = Sampler::new(INTERVAL);

        let acquisition = sampler.acquire(&mut buffer, &mut adc, &mut clock.clone());
        let start = acquisition.start.as_micros();
        let offset = |i: usize| adc.read_times[i] - (start + i as u32 * INTERVAL);

        assert!(offset(11) > INTERVAL);
        assert!(offset(12) > 0 && offset(12) < INTERVAL);
        assert!(offset(13) < offset(12));
        for i in 14..32 {
            assert!(offset(i) <= SPIN_STEP, "sample {} still late", i);
        }
        assert_eq!(acquisition.late, 1);
    }

    #[test]
    fn always_fills_the_whole_buffer() {
        let clock = FakeClock::new(u32::MAX - 1_000, SPIN_STEP);
        let mut adc = FakeAdc::constant(1).with_clock(clock.clone(), |_| READ_COST);
        let mut buffer = SampleBuffer::<200>::new();

        Sampler::new(17).acquire(&mut buffer, &mut adc, &mut clock.clone());

        assert_eq!(adc.read_times.len(), 200);
        assert!(buffer.iter().all(|code| code == 1));
    }

    #[test]
    fn failed_reads_reuse_last_good_code() {
        let mut adc = FakeAdc::from_fn(|i| match i {
            2 | 3 => Err(()),
            4 => Ok(9999),
            _ => Ok(100 + i as u16),
        });
        let mut buffer = SampleBuffer::<6>::new();

        let acquisition =
            Sampler::new(1).acquire(&mut buffer, &mut adc, &mut FakeClock::new(0, 1));

        assert_eq!(buffer.as_slice(), &[100, 101, 101, 101, 101, 105]);
        assert_eq!(acquisition.substituted, 3);
    }

    #[test]
    fn interval_follows_rate() {
        assert_eq!(Sampler::from_rate(10_000).interval_us(), 100);
    }

    #[test]
    fn capture_longer_than_counter_period_stays_on_grid() {
        // 1000 samples of 5 s span more than one 32-bit microsecond period
        const SLOW: u32 = 5_000_000;
        let clock = FakeClock::new(0, 250_000);
        let mut adc = FakeAdc::constant(7).with_clock(clock.clone(), |_| READ_COST);
        let mut buffer = SampleBuffer::<1000>::new();

        let acquisition = Sampler::new(SLOW).acquire(&mut buffer, &mut adc, &mut clock.clone());

        let start = acquisition.start;
        for (i, &time) in adc.read_times.iter().enumerate() {
            let deadline = start.add_micros((i as u32).wrapping_mul(SLOW));
            let offset = deadline.ticks_until(Instant::from_micros(time));
            assert!(offset >= 0 && offset <= 250_000, "sample {} off grid", i);
        }
        assert_eq!(adc.read_times.len(), 1000);
        assert_eq!(acquisition.late, 0);
    }
}
