//! FIFO engine state and mode control.

use crate::config::{ChannelConfig, EngineConfig, FifoMode, OutputDataRate, SensorId};
use crate::data::{FifoStatus, MAX_FIFO_DEPTH};
use crate::error::Error;
use crate::interface::Interface;
use crate::interrupt::InterruptConfig;
use crate::platform::Platform;
use crate::register::{Register, ctrl10_c, fifo_ctrl4, fifo_wtm, field, timestamp2};
use crate::sink::{ChannelSink, FifoEvent};
use crate::timestamp::{Clock, HardwareClockState, InterruptTiming};

/// Per-channel runtime state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelRuntime {
    pub(crate) odr: Option<OutputDataRate>,
    pub(crate) decimation_factor: u16,
    pub(crate) decimation_counter: u16,
    pub(crate) last_timestamp: i64,
    pub(crate) watermark_request: u16,
    pub(crate) enabled: bool,
}

impl ChannelRuntime {
    const DEFAULT: Self = Self::from_config(ChannelConfig::DEFAULT);

    const fn from_config(config: ChannelConfig) -> Self {
        Self {
            odr: config.odr,
            decimation_factor: config.decimation,
            decimation_counter: 0,
            last_timestamp: 0,
            watermark_request: config.watermark,
            enabled: false,
        }
    }

    /// Output data rate programmed when the channel is enabled.
    pub const fn odr(&self) -> Option<OutputDataRate> {
        self.odr
    }

    /// Number of samples dropped between two forwarded samples.
    pub const fn decimation_factor(&self) -> u16 {
        self.decimation_factor
    }

    /// Samples still to drop before the next one is forwarded.
    pub const fn decimation_counter(&self) -> u16 {
        self.decimation_counter
    }

    /// Timestamp of the last forwarded sample.
    pub const fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    /// Watermark requested by this channel.
    pub const fn watermark_request(&self) -> u16 {
        self.watermark_request
    }

    /// Channel is batching into the FIFO.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Drain counters, accumulated since the engine was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStats {
    /// Records read from the FIFO.
    pub records: u32,
    /// Samples handed to the sink.
    pub forwarded: u32,
    /// Ready samples dropped by decimation.
    pub decimated: u32,
    /// Placeholder samples discarded.
    pub not_ready: u32,
    /// Records with a tag not mapped to any channel.
    pub unknown_tag: u32,
    /// Hardware timestamp records seen.
    pub timestamps: u32,
}

/// FIFO ingestion engine.
///
/// Owns the register transport, the clock filter and all channel state. All
/// methods take `&mut self`; [`Asm330lhhx`](crate::Asm330lhhx) serializes
/// access from the interrupt pipeline and from configuration requests.
pub struct Engine<I, C, S, P = ()> {
    pub(crate) interface: I,
    pub(crate) clock: C,
    pub(crate) sink: S,
    pub(crate) platform: P,
    pub(crate) config: EngineConfig,
    pub(crate) mode: FifoMode,
    pub(crate) operational: bool,
    pub(crate) flushing: bool,
    pub(crate) resuming: bool,
    pub(crate) hw_clock: HardwareClockState,
    pub(crate) channels: [ChannelRuntime; SensorId::COUNT],
    pub(crate) fifo_watermark: u16,
    pub(crate) irq: InterruptTiming,
    pub(crate) resume_ts: i64,
    pub(crate) gyro_rearm_pending: bool,
    pub(crate) stats: DrainStats,
}

impl<I, C, S, P> Engine<I, C, S, P> {
    /// Creates an engine in Bypass mode with every channel disabled.
    pub fn new(interface: I, clock: C, sink: S, platform: P, config: EngineConfig) -> Self {
        Self {
            interface,
            clock,
            sink,
            platform,
            config,
            mode: FifoMode::Bypass,
            operational: false,
            flushing: false,
            resuming: false,
            hw_clock: HardwareClockState::new(config.tick_period_ns),
            channels: [ChannelRuntime::DEFAULT; SensorId::COUNT],
            fifo_watermark: 0,
            irq: InterruptTiming::default(),
            resume_ts: 0,
            gyro_rearm_pending: false,
            stats: DrainStats::default(),
        }
    }

    /// Engine configuration.
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// Current FIFO mode.
    pub const fn mode(&self) -> FifoMode {
        self.mode
    }

    /// Returns true while the FIFO is out of Bypass mode.
    pub const fn is_operational(&self) -> bool {
        self.operational
    }

    /// Returns true while a wake-up drain is pending.
    pub const fn is_resuming(&self) -> bool {
        self.resuming
    }

    /// Watermark currently programmed into the device.
    pub const fn fifo_watermark(&self) -> u16 {
        self.fifo_watermark
    }

    /// Runtime state of `channel`.
    pub const fn channel(&self, channel: SensorId) -> &ChannelRuntime {
        &self.channels[channel.index()]
    }

    /// Watermark requested by `channel`.
    pub const fn watermark(&self, channel: SensorId) -> u16 {
        self.channels[channel.index()].watermark_request
    }

    /// Largest watermark a channel may request.
    pub const fn max_watermark(&self) -> u16 {
        MAX_FIFO_DEPTH
    }

    /// Clock reconciliation state.
    pub const fn clock_state(&self) -> &HardwareClockState {
        &self.hw_clock
    }

    /// Latest interrupt timing used by the drain.
    pub const fn interrupt_timing(&self) -> InterruptTiming {
        self.irq
    }

    /// Drain counters.
    pub const fn stats(&self) -> DrainStats {
        self.stats
    }

    /// Sample consumer.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sample consumer.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Host clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Platform hooks.
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    /// Register transport.
    pub const fn interface(&self) -> &I {
        &self.interface
    }

    /// Releases the register transport, the sink and the platform hooks.
    pub fn release(self) -> (I, S, P) {
        (self.interface, self.sink, self.platform)
    }

    /// Replaces the rate, watermark request and decimation of `channel`.
    ///
    /// Takes effect on the next enable; an enabled channel keeps its current
    /// hardware settings.
    pub fn configure_channel(&mut self, channel: SensorId, config: ChannelConfig) {
        let runtime = &mut self.channels[channel.index()];
        runtime.odr = config.odr;
        runtime.watermark_request = config.watermark;
        runtime.decimation_factor = config.decimation;
    }

    /// Sets the decimation factor of `channel` (forward 1 of `factor + 1`).
    pub fn set_decimation(&mut self, channel: SensorId, factor: u16) {
        self.channels[channel.index()].decimation_factor = factor;
    }

    /// Stores the interrupt timing captured by the fast handler.
    pub fn latch_interrupt(&mut self, timing: InterruptTiming) {
        self.irq = timing;
    }

    /// Marks the next interrupt drain as the first one after a host wake-up.
    pub fn set_resuming(&mut self, resuming: bool) {
        self.resuming = resuming;
    }

    /// Returns [`Error::NotOperational`] while the FIFO is in Bypass mode.
    pub const fn ensure_operational(&self) -> Result<(), Error> {
        if self.operational {
            Ok(())
        } else {
            Err(Error::NotOperational)
        }
    }

    pub(crate) fn any_enabled(&self) -> bool {
        self.channels.iter().any(|runtime| runtime.enabled)
    }
}

impl<I, C, S, P> Engine<I, C, S, P>
where
    I: Interface,
    C: Clock,
    S: ChannelSink,
    P: Platform,
{
    /// Programs FIFO_CTRL4.FIFO_MODE.
    ///
    /// Bypass clears the operational flag, any other mode sets it. Nothing is
    /// recorded when the write fails.
    pub async fn set_mode(&mut self, mode: FifoMode) -> Result<(), Error> {
        self.interface
            .update_bits(
                Register::FifoCtrl4.addr(),
                fifo_ctrl4::FIFO_MODE_MASK,
                mode.ctrl4_field(),
            )
            .await?;
        self.mode = mode;
        self.operational = mode.is_operational();
        debug!("fifo mode {:?}", mode);
        Ok(())
    }

    /// Recomputes and programs the shared FIFO watermark.
    ///
    /// Takes the smallest request among enabled channels, with `requested`
    /// standing in for `channel`. The result is floored to 2 records with
    /// hardware timestamping (1 without) unless a wake-up drain is pending, in
    /// which case `requested` is used as is.
    pub async fn compute_watermark(
        &mut self,
        requested: u16,
        channel: SensorId,
    ) -> Result<(), Error> {
        let mut watermark = MAX_FIFO_DEPTH;
        for id in SensorId::ALL {
            let runtime = &self.channels[id.index()];
            if !runtime.enabled {
                continue;
            }
            let request = if id == channel {
                requested
            } else {
                runtime.watermark_request
            };
            watermark = watermark.min(request);
        }

        if self.resuming {
            watermark = requested.min(MAX_FIFO_DEPTH);
        } else {
            watermark = watermark.max(self.config.watermark_floor());
        }

        let hi = self.read_reg(Register::FifoCtrl2).await?;
        let merged =
            ((u16::from(hi) << 8) & !fifo_wtm::WTM_MASK) | (watermark & fifo_wtm::WTM_MASK);
        self.write_regs(Register::FifoCtrl1, &merged.to_le_bytes())
            .await?;

        self.fifo_watermark = watermark & fifo_wtm::WTM_MASK;
        trace!("fifo watermark {}", self.fifo_watermark);
        Ok(())
    }

    /// Sets the watermark request of `channel` and reprograms the FIFO.
    ///
    /// The stored request only changes when the register write succeeds.
    pub async fn set_watermark(&mut self, channel: SensorId, watermark: u16) -> Result<(), Error> {
        if watermark > self.max_watermark() {
            return Err(Error::InvalidData);
        }
        self.platform.disable_irq();
        let result = self.compute_watermark(watermark, channel).await;
        self.platform.enable_irq();
        result?;
        self.channels[channel.index()].watermark_request = watermark;
        Ok(())
    }

    /// Configures the interrupt pin and FIFO timestamp batching.
    ///
    /// Applies polarity and drive mode (CTRL3_C), routes the FIFO threshold
    /// interrupt and batches one timestamp record per batch event when
    /// hardware timestamping is enabled.
    pub async fn setup_interrupt(&mut self, config: InterruptConfig) -> Result<(), Error> {
        let (mask, value) = config.ctrl3_bits();
        self.interface
            .update_bits(Register::Ctrl3C.addr(), mask, value)
            .await?;

        let (reg, bit) = config.routing();
        self.interface.update_bits(reg.addr(), bit, bit).await?;

        let dec_ts = u8::from(self.config.hw_timestamp);
        self.write_field(Register::FifoCtrl4, fifo_ctrl4::DEC_TS_BATCH_MASK, dec_ts)
            .await?;
        if self.config.hw_timestamp {
            self.write_field(Register::Ctrl10C, ctrl10_c::TIMESTAMP_EN, 1)
                .await?;
        }
        debug!("interrupt configured, active low {}", config.active_low);
        Ok(())
    }

    /// Restarts clock reconciliation and the device timestamp counter.
    pub async fn reset_timestamp(&mut self) -> Result<(), Error> {
        let now = self.clock.now_ns();
        self.hw_clock.reset(now);
        self.irq.ts = now;
        self.write_reg(Register::Timestamp2, timestamp2::RESET)
            .await
    }

    /// Reads the machine learning core status; non-zero means a wake event.
    pub async fn check_mlc_status(&mut self) -> Result<bool, Error> {
        let status = self.read_reg(Register::MlcStatus).await?;
        if status != 0 {
            debug!("mlc status {}", status);
        }
        Ok(status != 0)
    }

    /// Reads the FIFO fill level and flags.
    pub async fn fifo_status(&mut self) -> Result<FifoStatus, Error> {
        let mut regs = [0u8; 2];
        self.read_regs(Register::FifoStatus1, &mut regs).await?;
        Ok(FifoStatus::from_regs(regs))
    }

    /// Drains whatever is batched and switches the FIFO to Bypass.
    pub async fn suspend(&mut self) -> Result<(), Error> {
        if let Err(err) = self.drain(false).await {
            warn!("drain before suspend failed: {:?}", err);
        }
        self.set_mode(FifoMode::Bypass).await
    }

    /// Drains the FIFO on behalf of `channel` and publishes a flush event.
    ///
    /// The clock filter stays frozen until the next interrupt drain clears
    /// the flush state. Returns the number of bytes drained. The event
    /// carries the timestamp of the last sample forwarded on `channel`, or
    /// the current host time when nothing was drained.
    pub async fn flush(&mut self, channel: SensorId) -> Result<usize, Error> {
        let now = self.clock.now_ns();
        self.irq = self.irq.advance(now);
        self.flush_latched(channel, now).await
    }

    /// Flush body, run with the interrupt timing already restamped at `now`.
    pub(crate) async fn flush_latched(
        &mut self,
        channel: SensorId,
        now: i64,
    ) -> Result<usize, Error> {
        self.flushing = true;
        let result = self.drain(false).await;

        let runtime = &mut self.channels[channel.index()];
        runtime.decimation_counter = 0;
        let count = match result {
            Ok(count) => count,
            Err(err) => {
                warn!("flush drain failed: {:?}", err);
                0
            }
        };
        let timestamp = if count > 0 { runtime.last_timestamp } else { now };
        self.sink
            .push_event(channel, FifoEvent::Flush { data: count > 0 }, timestamp);
        result
    }

    pub(crate) async fn read_reg(&mut self, reg: Register) -> Result<u8, Error> {
        self.interface.read_reg(reg.addr()).await
    }

    pub(crate) async fn read_regs(
        &mut self,
        reg: Register,
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.interface.read_regs(reg.addr(), buffer).await
    }

    pub(crate) async fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        self.interface.write_reg(reg.addr(), value).await
    }

    pub(crate) async fn write_regs(&mut self, reg: Register, data: &[u8]) -> Result<(), Error> {
        self.interface.write_regs(reg.addr(), data).await
    }

    /// Writes `value` into the field of `reg` selected by `mask`.
    pub(crate) async fn write_field(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Result<(), Error> {
        self.interface
            .update_bits(reg.addr(), mask, field(mask, value))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{ctrl3_c, int_ctrl};
    use crate::testing::{MockClock, MockInterface, MockPlatform, RecordingSink};
    use futures::executor::block_on;

    type TestEngine = Engine<MockInterface, MockClock, RecordingSink, MockPlatform>;

    fn engine(interface: MockInterface, config: EngineConfig) -> TestEngine {
        Engine::new(
            interface,
            MockClock::fixed(1_000_000),
            RecordingSink::default(),
            MockPlatform::default(),
            config,
        )
    }

    fn enable(engine: &mut TestEngine, channel: SensorId, watermark: u16) {
        let runtime = &mut engine.channels[channel.index()];
        runtime.enabled = true;
        runtime.watermark_request = watermark;
    }

    #[test]
    fn set_mode_tracks_operational_flag() {
        let interface = MockInterface::default().with_reg(Register::FifoCtrl4.addr(), 0xC0);
        let mut engine = engine(interface, EngineConfig::new());

        block_on(engine.set_mode(FifoMode::Continuous)).expect("continuous");
        assert!(engine.is_operational());
        assert_eq!(engine.interface().reg(Register::FifoCtrl4.addr()), 0xC6);

        block_on(engine.set_mode(FifoMode::Bypass)).expect("bypass");
        assert!(!engine.is_operational());
        assert_eq!(engine.ensure_operational(), Err(Error::NotOperational));
        assert_eq!(engine.interface().reg(Register::FifoCtrl4.addr()), 0xC0);
    }

    #[test]
    fn set_mode_failure_keeps_state() {
        let interface = MockInterface::default().with_failing_reg(Register::FifoCtrl4.addr());
        let mut engine = engine(interface, EngineConfig::new());

        assert_eq!(block_on(engine.set_mode(FifoMode::Continuous)), Err(Error::Bus));
        assert_eq!(engine.mode(), FifoMode::Bypass);
        assert!(!engine.is_operational());
    }

    #[test]
    fn watermark_is_minimum_of_enabled_requests() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 64);
        enable(&mut engine, SensorId::Gyro, 32);
        engine.channels[SensorId::Temp.index()].watermark_request = 4;

        block_on(engine.compute_watermark(40, SensorId::Accel)).expect("watermark");

        assert_eq!(engine.fifo_watermark(), 32);
        assert_eq!(engine.interface().write_bursts()[0].1, [32, 0]);
    }

    #[test]
    fn updated_channel_contributes_its_new_request() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 64);
        enable(&mut engine, SensorId::Gyro, 32);

        block_on(engine.compute_watermark(8, SensorId::Accel)).expect("watermark");
        assert_eq!(engine.fifo_watermark(), 8);
    }

    #[test]
    fn watermark_floor_depends_on_hw_timestamping() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 1);
        block_on(engine.compute_watermark(1, SensorId::Accel)).expect("watermark");
        assert_eq!(engine.fifo_watermark(), 2);

        let config = EngineConfig::new().with_hw_timestamp(false);
        let mut engine = self::engine(MockInterface::default(), config);
        enable(&mut engine, SensorId::Accel, 1);
        block_on(engine.compute_watermark(1, SensorId::Accel)).expect("watermark");
        assert_eq!(engine.fifo_watermark(), 1);
    }

    #[test]
    fn resuming_uses_request_verbatim() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 10);
        enable(&mut engine, SensorId::Gyro, 5);
        engine.set_resuming(true);

        block_on(engine.compute_watermark(1, SensorId::Accel)).expect("watermark");
        assert_eq!(engine.fifo_watermark(), 1);
    }

    #[test]
    fn watermark_preserves_unrelated_ctrl2_bits() {
        let interface = MockInterface::default().with_reg(Register::FifoCtrl2.addr(), 0b1000_0001);
        let mut engine = engine(interface, EngineConfig::new());
        enable(&mut engine, SensorId::Gyro, 300);

        block_on(engine.compute_watermark(300, SensorId::Gyro)).expect("watermark");

        // 300 = 0x12C: bit 8 lands in FIFO_CTRL2 bit 0, bit 7 of CTRL2 is kept.
        let bursts = engine.interface().write_bursts();
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].0, Register::FifoCtrl1.addr());
        assert_eq!(bursts[0].1, [0x2C, 0b1000_0001]);
    }

    #[test]
    fn watermark_read_failure_keeps_cache() {
        let interface = MockInterface::default().with_failing_reg(Register::FifoCtrl2.addr());
        let mut engine = engine(interface, EngineConfig::new());
        engine.fifo_watermark = 12;
        enable(&mut engine, SensorId::Accel, 3);

        assert_eq!(
            block_on(engine.compute_watermark(3, SensorId::Accel)),
            Err(Error::Bus)
        );
        assert_eq!(engine.fifo_watermark(), 12);
    }

    #[test]
    fn set_watermark_validates_and_masks_irq() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 10);

        assert_eq!(
            block_on(engine.set_watermark(SensorId::Accel, MAX_FIFO_DEPTH + 1)),
            Err(Error::InvalidData)
        );
        assert_eq!(engine.platform().disable_calls, 0);

        block_on(engine.set_watermark(SensorId::Accel, 20)).expect("watermark");
        assert_eq!(engine.watermark(SensorId::Accel), 20);
        assert_eq!(engine.fifo_watermark(), 20);
        assert_eq!(engine.platform().disable_calls, 1);
        assert_eq!(engine.platform().enable_calls, 1);
    }

    #[test]
    fn zero_request_is_raised_to_the_floor() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 10);
        block_on(engine.set_watermark(SensorId::Accel, 0)).expect("watermark");
        assert_eq!(engine.watermark(SensorId::Accel), 0);
        assert_eq!(engine.fifo_watermark(), 2);
        assert_eq!(engine.interface().write_bursts()[0].1, [2, 0]);

        let config = EngineConfig::new().with_hw_timestamp(false);
        let mut engine = self::engine(MockInterface::default(), config);
        enable(&mut engine, SensorId::Accel, 10);
        block_on(engine.set_watermark(SensorId::Accel, 0)).expect("watermark");
        assert_eq!(engine.fifo_watermark(), 1);
    }

    #[test]
    fn resuming_request_is_capped_at_fifo_depth() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 10);
        engine.set_resuming(true);

        block_on(engine.compute_watermark(600, SensorId::Accel)).expect("watermark");

        assert_eq!(engine.fifo_watermark(), MAX_FIFO_DEPTH);
        assert_eq!(
            engine.interface().write_bursts()[0].1,
            MAX_FIFO_DEPTH.to_le_bytes()
        );
    }

    #[test]
    fn set_watermark_failure_keeps_request() {
        let interface = MockInterface::default().with_failing_reg(Register::FifoCtrl1.addr());
        let mut engine = engine(interface, EngineConfig::new());
        enable(&mut engine, SensorId::Accel, 10);

        assert_eq!(
            block_on(engine.set_watermark(SensorId::Accel, 20)),
            Err(Error::Bus)
        );
        assert_eq!(engine.watermark(SensorId::Accel), 10);
        assert!(!engine.platform().masked.get());
    }

    #[test]
    fn setup_interrupt_programs_pin_and_timestamp_batching() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        let config = InterruptConfig::new()
            .with_active_low(true)
            .with_open_drain(true);

        block_on(engine.setup_interrupt(config)).expect("setup");

        let interface = engine.interface();
        assert_eq!(
            interface.reg(Register::Ctrl3C.addr()),
            ctrl3_c::H_LACTIVE | ctrl3_c::PP_OD
        );
        assert_eq!(interface.reg(Register::Int1Ctrl.addr()), int_ctrl::INT_FIFO_TH);
        assert_eq!(interface.reg(Register::FifoCtrl4.addr()), 0b0100_0000);
        assert_eq!(interface.reg(Register::Ctrl10C.addr()), ctrl10_c::TIMESTAMP_EN);
    }

    #[test]
    fn reset_timestamp_seeds_filter_and_restarts_counter() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        engine.hw_clock.on_ticks(1234);

        block_on(engine.reset_timestamp()).expect("reset");

        assert_eq!(engine.clock_state().offset_ns(), 1_000_000);
        assert_eq!(engine.clock_state().raw_ticks_low(), 0);
        assert_eq!(engine.interrupt_timing().ts, 1_000_000);
        assert_eq!(
            engine.interface().writes(),
            [(Register::Timestamp2.addr(), timestamp2::RESET)]
        );
    }

    #[test]
    fn mlc_status_reports_pending_events() {
        let interface = MockInterface::default().with_reg(Register::MlcStatus.addr(), 0x01);
        let mut engine = engine(interface, EngineConfig::new());
        assert_eq!(block_on(engine.check_mlc_status()), Ok(true));

        let mut engine = self::engine(MockInterface::default(), EngineConfig::new());
        assert_eq!(block_on(engine.check_mlc_status()), Ok(false));
    }

    #[test]
    fn configure_channel_keeps_decimation_progress() {
        let mut engine = engine(MockInterface::default(), EngineConfig::new());
        engine.channels[SensorId::Ext0.index()].decimation_counter = 2;

        engine.configure_channel(
            SensorId::Ext0,
            ChannelConfig::new(OutputDataRate::Hz12_5)
                .with_watermark(16)
                .with_decimation(3),
        );

        let runtime = engine.channel(SensorId::Ext0);
        assert_eq!(runtime.odr(), Some(OutputDataRate::Hz12_5));
        assert_eq!(runtime.watermark_request(), 16);
        assert_eq!(runtime.decimation_factor(), 3);
        assert_eq!(runtime.decimation_counter(), 2);
        assert!(!runtime.is_enabled());
    }
}
