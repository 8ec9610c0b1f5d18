/// Microsecond timestamp of a free running 32-bit counter.
///
/// The counter wraps roughly every 71 minutes; differences are computed with
/// wrapping arithmetic so comparisons stay valid across the wrap as long as
/// the two instants are less than half a period apart.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Instant(u32);

impl Instant {
    pub const fn from_micros(micros: u32) -> Self {
        Instant(micros)
    }

    pub const fn as_micros(self) -> u32 {
        self.0
    }

    pub const fn add_micros(self, micros: u32) -> Self {
        Instant(self.0.wrapping_add(micros))
    }

    /// Signed distance to `deadline`, positive while the deadline is ahead.
    pub const fn ticks_until(self, deadline: Instant) -> i32 {
        deadline.0.wrapping_sub(self.0) as i32
    }

    /// Time passed since `earlier`.
    pub const fn elapsed_since(self, earlier: Instant) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}
