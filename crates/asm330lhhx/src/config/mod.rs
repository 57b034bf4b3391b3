//! Configuration for the FIFO engine and its channels.

pub(crate) mod channel;
pub(crate) mod mode;

pub use channel::{ChannelConfig, OutputDataRate, SensorId};
pub use mode::FifoMode;

use crate::data::{FIFO_BURST_RECORDS_MAX, RECORD_SIZE};

/// Engine-wide settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Hardware timestamp records are batched into the FIFO.
    pub hw_timestamp: bool,
    /// Duration of one hardware timestamp tick in nanoseconds.
    pub tick_period_ns: u64,
    /// Largest number of records read in a single bus transfer.
    pub burst_records: u16,
    /// Route samples drained right after a wake-up to the replay channel.
    pub wake_replay: bool,
    /// Log2 of the number of records per sample packet, used to back-date
    /// the replay baseline after a wake-up.
    pub resume_sample_shift: u8,
    /// Spacing between replayed samples in nanoseconds.
    pub resume_sample_tick_ns: i64,
    /// Idle timer is rearmed from the interrupt handler (low-power timing).
    pub low_power_timer: bool,
    /// Machine learning core status is polled before each interrupt drain.
    pub mlc: bool,
    /// Settle time after powering a sensor up, before batching starts.
    pub settle_delay_ms: u32,
    /// Extra delay before re-arming the gyroscope after it was disabled.
    pub gyro_arm_delay_ms: u32,
}

impl EngineConfig {
    /// Default engine configuration.
    pub const DEFAULT: Self = Self {
        hw_timestamp: true,
        tick_period_ns: 25_000,
        burst_records: FIFO_BURST_RECORDS_MAX as u16,
        wake_replay: false,
        resume_sample_shift: 0,
        resume_sample_tick_ns: 0,
        low_power_timer: false,
        mlc: false,
        settle_delay_ms: 100,
        gyro_arm_delay_ms: 10,
    };

    /// Creates a default configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Enables or disables hardware timestamp batching.
    #[must_use]
    pub const fn with_hw_timestamp(mut self, enable: bool) -> Self {
        self.hw_timestamp = enable;
        self
    }

    /// Sets the hardware timestamp tick duration.
    #[must_use]
    pub const fn with_tick_period_ns(mut self, tick_period_ns: u64) -> Self {
        self.tick_period_ns = tick_period_ns;
        self
    }

    /// Sets the maximum number of records per bus transfer.
    #[must_use]
    pub const fn with_burst_records(mut self, records: u16) -> Self {
        self.burst_records = records;
        self
    }

    /// Enables the wake-up replay path.
    #[must_use]
    pub const fn with_wake_replay(mut self, shift: u8, tick_ns: i64) -> Self {
        self.wake_replay = true;
        self.resume_sample_shift = shift;
        self.resume_sample_tick_ns = tick_ns;
        self
    }

    /// Enables low-power timing (idle timer rearmed on every interrupt).
    #[must_use]
    pub const fn with_low_power_timer(mut self, enable: bool) -> Self {
        self.low_power_timer = enable;
        self
    }

    /// Enables the machine learning core status check.
    #[must_use]
    pub const fn with_mlc(mut self, enable: bool) -> Self {
        self.mlc = enable;
        self
    }

    /// Sets the sensor power-up settle delay.
    #[must_use]
    pub const fn with_settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Sets the gyroscope re-arm delay.
    #[must_use]
    pub const fn with_gyro_arm_delay_ms(mut self, ms: u32) -> Self {
        self.gyro_arm_delay_ms = ms;
        self
    }

    /// Minimum watermark the FIFO is allowed to run with.
    pub(crate) const fn watermark_floor(self) -> u16 {
        if self.hw_timestamp { 2 } else { 1 }
    }

    /// Bytes per bus transfer, always a whole number of records.
    pub(crate) const fn burst_len(self) -> usize {
        let records = if self.burst_records == 0 {
            1
        } else if self.burst_records as usize > FIFO_BURST_RECORDS_MAX {
            FIFO_BURST_RECORDS_MAX
        } else {
            self.burst_records as usize
        };
        records * RECORD_SIZE
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
