//! Host/device clock reconciliation.
//!
//! The device stamps the FIFO with a free-running 32-bit tick counter. The
//! filter extends it to 64 bits across rollovers and keeps an exponentially
//! weighted estimate of the host-minus-device offset, fed with the interrupt
//! time interpolated across each burst.

/// Smoothing weight numerator (weight = 120 / 128).
pub(crate) const EWMA_LEVEL: i64 = 120;
/// Smoothing weight denominator.
pub(crate) const EWMA_DIV: i64 = 128;

/// Monotonic host clock.
pub trait Clock {
    /// Current host time in nanoseconds.
    fn now_ns(&self) -> i64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ns(&self) -> i64 {
        (**self).now_ns()
    }
}

/// [`Clock`] backed by `embassy_time::Instant`.
#[cfg(feature = "embassy-time")]
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl Clock for EmbassyClock {
    fn now_ns(&self) -> i64 {
        let micros = embassy_time::Instant::now().as_micros();
        (micros as i64).saturating_mul(1_000)
    }
}

/// Host interrupt timing captured by the fast handler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptTiming {
    /// Host time of the latest interrupt.
    pub ts: i64,
    /// Time elapsed since the previous interrupt.
    pub delta_ts: i64,
}

impl InterruptTiming {
    /// Returns the timing after an interrupt observed at `now_ns`.
    #[must_use]
    pub const fn advance(self, now_ns: i64) -> Self {
        Self {
            ts: now_ns,
            delta_ts: now_ns - self.ts,
        }
    }
}

/// `old + (1 - w) * (new - old)` with `w = weight / EWMA_DIV`, truncating.
pub(crate) const fn ewma(old: i64, new: i64, weight: i64) -> i64 {
    let diff = new - old;
    old + ((EWMA_DIV - weight) * diff) / EWMA_DIV
}

/// Hardware clock extension and host offset estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareClockState {
    raw_ticks_low: u32,
    rollover_count: u32,
    tick_period_ns: u64,
    hw_time_ns: i64,
    reconciled_ts: i64,
    offset_ns: i64,
}

impl HardwareClockState {
    /// Creates a filter for a counter ticking every `tick_period_ns`.
    pub const fn new(tick_period_ns: u64) -> Self {
        Self {
            raw_ticks_low: 0,
            rollover_count: 0,
            tick_period_ns,
            hw_time_ns: 0,
            reconciled_ts: i64::MIN,
            offset_ns: 0,
        }
    }

    /// Restarts the filter with the host clock reading `now_ns` as offset.
    pub fn reset(&mut self, now_ns: i64) {
        *self = Self {
            offset_ns: now_ns,
            ..Self::new(self.tick_period_ns)
        };
    }

    /// Accounts a raw tick reading and returns the extended hardware time.
    ///
    /// A reading lower than the previous one is a single counter rollover;
    /// the counter cannot wrap twice within one drain.
    pub fn on_ticks(&mut self, ticks: u32) -> i64 {
        if ticks < self.raw_ticks_low {
            self.rollover_count = self.rollover_count.wrapping_add(1);
        }
        self.raw_ticks_low = ticks;

        let extended = (u64::from(self.rollover_count) << 32) | u64::from(ticks);
        self.hw_time_ns = extended.saturating_mul(self.tick_period_ns).min(i64::MAX as u64) as i64;
        self.hw_time_ns
    }

    /// Feeds one host/device observation into the offset estimate.
    pub fn sync(&mut self, host_ts: i64) {
        let delta = host_ts - self.hw_time_ns;
        self.offset_ns = ewma(self.offset_ns, delta, EWMA_LEVEL);
    }

    /// Host timestamp for a sample following the latest tick reading.
    ///
    /// Never returns less than a previous call since the last reset.
    pub fn reconcile(&mut self) -> i64 {
        let ts = self.hw_time_ns.saturating_add(self.offset_ns);
        if ts > self.reconciled_ts {
            self.reconciled_ts = ts;
        }
        self.reconciled_ts
    }

    /// Low 32 bits of the last tick reading.
    pub const fn raw_ticks_low(&self) -> u32 {
        self.raw_ticks_low
    }

    /// Number of counter rollovers since the last reset.
    pub const fn rollover_count(&self) -> u32 {
        self.rollover_count
    }

    /// Tick duration in nanoseconds.
    pub const fn tick_period_ns(&self) -> u64 {
        self.tick_period_ns
    }

    /// Extended hardware time of the last tick reading.
    pub const fn hw_time_ns(&self) -> i64 {
        self.hw_time_ns
    }

    /// Latest timestamp handed out, `None` before the first sample.
    pub const fn reconciled_ts(&self) -> Option<i64> {
        if self.reconciled_ts == i64::MIN {
            None
        } else {
            Some(self.reconciled_ts)
        }
    }

    /// Current host-minus-device offset estimate.
    pub const fn offset_ns(&self) -> i64 {
        self.offset_ns
    }
}
