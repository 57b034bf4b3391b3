//! ASM330LHHX interrupt pipeline.
//!
//! The interrupt is split in two stages. [`Asm330lhhx::on_interrupt`] runs
//! in interrupt context: it timestamps the interrupt, rearms the idle timer
//! and wakes the slow stage. [`Asm330lhhx::process_interrupt`] (or the
//! [`Asm330lhhx::run`] loop) drains the FIFO from task context.
//!
//! Locking: the slow stage takes the handler lock, then the engine lock.
//! Flush and configuration requests take the engine lock only, and the
//! engine lock is never held while waiting for the handler lock.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use embedded_hal_async::spi::SpiDevice;

use crate::config::{EngineConfig, SensorId};
use crate::device::Engine;
use crate::error::Error;
use crate::interface::{Asm330Address, I2cInterface, Interface, SpiInterface};
use crate::interrupt::InterruptConfig;
use crate::platform::{IdleTimer, Platform};
use crate::sink::ChannelSink;
use crate::timestamp::{Clock, InterruptTiming};

/// ASM330LHHX FIFO driver.
///
/// All methods take `&self` so one instance can be shared between the
/// interrupt handler, the drain task and configuration callers.
pub struct Asm330lhhx<M: RawMutex, I, C, S, P = (), T = ()> {
    engine: Mutex<M, Engine<I, C, S, P>>,
    handler_lock: Mutex<M, ()>,
    timing: BlockingMutex<M, Cell<InterruptTiming>>,
    timer: BlockingMutex<M, RefCell<T>>,
    pending: Signal<M, ()>,
    low_power_timer: bool,
    mlc: bool,
}

/// I2C type alias for the ASM330LHHX driver.
pub type Asm330lhhxI2c<M, I2C, C, S, P = (), T = ()> =
    Asm330lhhx<M, I2cInterface<I2C>, C, S, P, T>;
/// SPI type alias for the ASM330LHHX driver.
pub type Asm330lhhxSpi<M, SPI, C, S, P = (), T = ()> =
    Asm330lhhx<M, SpiInterface<SPI>, C, S, P, T>;

impl<M, I2C, C, S, P, T> Asm330lhhx<M, I2cInterface<I2C>, C, S, P, T>
where
    M: RawMutex,
    I2C: I2c,
{
    /// Creates an I2C-based driver.
    pub fn new_i2c(
        i2c: I2C,
        address: Asm330Address,
        clock: C,
        sink: S,
        platform: P,
        timer: T,
        config: EngineConfig,
    ) -> Self {
        let interface = I2cInterface::new(i2c, address.addr());
        Self::new(Engine::new(interface, clock, sink, platform, config), timer)
    }
}

impl<M, SPI, C, S, P, T> Asm330lhhx<M, SpiInterface<SPI>, C, S, P, T>
where
    M: RawMutex,
    SPI: SpiDevice,
{
    /// Creates an SPI-based driver.
    pub fn new_spi(
        spi: SPI,
        clock: C,
        sink: S,
        platform: P,
        timer: T,
        config: EngineConfig,
    ) -> Self {
        let interface = SpiInterface::new(spi);
        Self::new(Engine::new(interface, clock, sink, platform, config), timer)
    }
}

impl<M: RawMutex, I, C, S, P, T> Asm330lhhx<M, I, C, S, P, T> {
    /// Wraps an engine; `timer` is only used with low-power timing.
    pub fn new(engine: Engine<I, C, S, P>, timer: T) -> Self {
        let config = engine.config();
        Self {
            engine: Mutex::new(engine),
            handler_lock: Mutex::new(()),
            timing: BlockingMutex::new(Cell::new(InterruptTiming::default())),
            timer: BlockingMutex::new(RefCell::new(timer)),
            pending: Signal::new(),
            low_power_timer: config.low_power_timer,
            mlc: config.mlc,
        }
    }

    /// Locks the engine for direct access.
    pub async fn engine(&self) -> MutexGuard<'_, M, Engine<I, C, S, P>> {
        self.engine.lock().await
    }

    /// Latest interrupt timing captured by [`Self::on_interrupt`].
    pub fn interrupt_timing(&self) -> InterruptTiming {
        self.timing.lock(Cell::get)
    }

    /// Consumes the driver and returns the engine.
    pub fn into_engine(self) -> Engine<I, C, S, P> {
        self.engine.into_inner()
    }
}

impl<M, I, C, S, P, T> Asm330lhhx<M, I, C, S, P, T>
where
    M: RawMutex,
    T: IdleTimer,
{
    /// Fast interrupt stage; call from the interrupt handler.
    ///
    /// Records the interrupt time and period, rearms the idle timer in
    /// low-power timing mode and wakes the slow stage. Never blocks.
    pub fn on_interrupt(&self, now_ns: i64) {
        let timing = self.timing.lock(|cell| {
            let timing = cell.get().advance(now_ns);
            cell.set(timing);
            timing
        });
        if self.low_power_timer {
            self.timer
                .lock(|timer| timer.borrow_mut().rearm(timing.delta_ts));
        }
        self.pending.signal(());
    }

    fn set_cpu_idle(&self, allowed: bool) {
        if self.low_power_timer {
            self.timer
                .lock(|timer| timer.borrow_mut().set_cpu_idle(allowed));
        }
    }
}

impl<M, I, C, S, P, T> Asm330lhhx<M, I, C, S, P, T>
where
    M: RawMutex,
    I: Interface,
    C: Clock,
    S: ChannelSink,
    P: Platform,
    T: IdleTimer,
{
    /// Slow interrupt stage: drains the FIFO for the latest interrupt.
    ///
    /// Errors are logged and returned; the device stays in its current state.
    pub async fn process_interrupt(&self) -> Result<usize, Error> {
        let _handler = self.handler_lock.lock().await;
        self.set_cpu_idle(false);

        let mut engine = self.engine.lock().await;
        let notify = if self.mlc {
            engine.check_mlc_status().await.unwrap_or_else(|err| {
                warn!("mlc status read failed: {:?}", err);
                false
            })
        } else {
            false
        };

        let timing = self.timing.lock(Cell::get);
        let result = engine.drain_interrupt(timing, notify).await;
        if let Err(err) = result {
            warn!("interrupt drain failed: {:?}", err);
        }
        result
    }

    /// Waits for interrupts and drains the FIFO, forever.
    pub async fn run(&self) {
        loop {
            self.pending.wait().await;
            let _ = self.process_interrupt().await;
        }
    }

    /// Drains the FIFO on behalf of `channel` and publishes a flush event.
    ///
    /// The shared interrupt timing is restamped before the drain starts, so
    /// an interrupt taken while the flush is reading stays recorded.
    pub async fn flush(&self, channel: SensorId) -> Result<usize, Error> {
        let mut engine = self.engine.lock().await;
        let now = engine.clock().now_ns();
        let timing = self.timing.lock(|cell| {
            let timing = cell.get().advance(now);
            cell.set(timing);
            timing
        });
        engine.latch_interrupt(timing);
        engine.flush_latched(channel, now).await
    }

    /// Starts or stops batching `channel`.
    ///
    /// When this starts the FIFO, the interrupt time base restarts together
    /// with the clock filter and deep idle is allowed again.
    pub async fn set_channel_enabled<D: DelayNs>(
        &self,
        channel: SensorId,
        enable: bool,
        delay: &mut D,
    ) -> Result<(), Error> {
        let mut engine = self.engine.lock().await;
        let was_operational = engine.is_operational();
        let result = engine.set_channel_enabled(channel, enable, delay).await;
        if engine.is_operational() && !was_operational {
            let ts = engine.interrupt_timing().ts;
            self.timing.lock(|cell| {
                cell.set(InterruptTiming {
                    ts,
                    ..cell.get()
                });
            });
            self.set_cpu_idle(true);
        }
        result
    }

    /// Sets the watermark request of `channel`.
    pub async fn set_watermark(&self, channel: SensorId, watermark: u16) -> Result<(), Error> {
        self.engine.lock().await.set_watermark(channel, watermark).await
    }

    /// Changes the batching rate of `channel` without touching its sensor.
    pub async fn update_batching(&self, channel: SensorId, enable: bool) -> Result<(), Error> {
        self.engine.lock().await.update_batching(channel, enable).await
    }

    /// Configures the FIFO interrupt line and timestamp batching.
    pub async fn setup_interrupt(&self, config: InterruptConfig) -> Result<(), Error> {
        self.engine.lock().await.setup_interrupt(config).await
    }

    /// Drains the FIFO and switches it to Bypass ahead of a host suspend.
    pub async fn suspend(&self) -> Result<(), Error> {
        self.engine.lock().await.suspend().await
    }

    /// Marks the next interrupt drain as the first one after a host wake-up.
    pub async fn set_resuming(&self, resuming: bool) {
        self.engine.lock().await.set_resuming(resuming);
    }
}
