//! 48 bit hardware sample counter arithmetic.
use hifitime::{Duration, Unit};

/// Significant bits of the hardware sample counter.
pub const TICK_BITS: u32 = 48;

/// Wrap period of the hardware sample counter, in ticks.
pub const TICK_WRAP: u64 = 1 << TICK_BITS;

/// Mask reducing a raw counter read to its [TICK_BITS] significant bits.
pub const TICK_MASK: u64 = TICK_WRAP - 1;

/// Reduces a raw counter read modulo 2^48.
pub(crate) const fn mask(tick: u64) -> u64 {
    tick & TICK_MASK
}

/// [TickCounter] interprets the receiver's free running 48 bit sample
/// counter, converting pairs of counter reads into elapsed [Duration].
#[derive(Debug, Clone, Copy)]
pub struct TickCounter {
    /// Nominal oscillator frequency [Hz]
    f_osc_hz: f64,
}

impl TickCounter {
    /// Builds a new [TickCounter] from the nominal oscillator frequency in Hz.
    pub fn new(f_osc_hz: f64) -> Self {
        Self { f_osc_hz }
    }

    /// Elapsed ticks from `previous` to `current`, bridging at most one
    /// counter wraparound. Counter reads are assumed non decreasing modulo
    /// 2^48: a violation is not detected and yields a meaningless (huge)
    /// interval, so callers must sample often compared to the wrap period.
    pub fn elapsed_ticks(current: u64, previous: u64) -> u64 {
        let (current, previous) = (mask(current), mask(previous));
        current + ((current < previous) as u64) * TICK_WRAP - previous
    }

    /// Elapsed [Duration] from `previous` to `current` counter reads.
    pub fn elapsed_since(&self, current: u64, previous: u64) -> Duration {
        Self::elapsed_ticks(current, previous) as f64 / self.f_osc_hz * Unit::Second
    }
}
