//! Async `#![no_std]` FIFO ingestion engine for the
//! [ASM330LHHX](https://www.st.com/en/mems-and-sensors/asm330lhhx.html)
//! 6-axis automotive IMU from STMicroelectronics.
//!
//! The engine batches accelerometer, gyroscope, temperature and external
//! sensor samples through the on-chip FIFO, drains it on the watermark
//! interrupt, demultiplexes records by tag and stamps every sample with host
//! time reconciled from the hardware timestamp counter.
//!
//! # Quick start (I2C)
//!
//! ```rust,no_run
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use ph_asm330lhhx::{
//!     Asm330Address, Asm330lhhxI2c, ChannelConfig, ChannelSink, Clock, EngineConfig,
//!     InterruptConfig, OutputDataRate, SensorId,
//! };
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::i2c::I2c;
//! #
//! # async fn example<I2C: I2c, D: DelayNs, C: Clock, S: ChannelSink>(
//! #     i2c: I2C, clock: C, sink: S, delay: &mut D,
//! # ) -> Result<(), ph_asm330lhhx::Error> {
//! let imu: Asm330lhhxI2c<CriticalSectionRawMutex, I2C, C, S> = Asm330lhhxI2c::new_i2c(
//!     i2c,
//!     Asm330Address::Primary,
//!     clock,
//!     sink,
//!     (),
//!     (),
//!     EngineConfig::new(),
//! );
//! imu.engine()
//!     .await
//!     .configure_channel(SensorId::Accel, ChannelConfig::new(OutputDataRate::Hz104));
//! imu.setup_interrupt(InterruptConfig::new()).await?;
//! imu.set_channel_enabled(SensorId::Accel, true, delay).await?;
//! // Call `imu.on_interrupt(now_ns)` from the INT1 handler and run `imu.run()`
//! // in a task.
//! # Ok(())
//! # }
//! ```
//!
//! # Timestamps
//!
//! With hardware timestamp batching enabled the FIFO interleaves timestamp
//! records with samples. The counter is extended past its 32-bit rollover and
//! pulled towards host time by an integer moving average, see
//! [`HardwareClockState`]. Stamps handed to the sink never go backwards.
//!
//! # Wake-up replay
//!
//! When the machine learning core raised the interrupt that woke the host,
//! the first drain after [`Asm330lhhx::set_resuming`] routes its samples to
//! [`SensorId::WakeReplay`], back-dated from the time of the wake-up.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

#[macro_use]
mod fmt;

mod batching;
mod config;
mod data;
mod device;
mod drain;
mod driver;
mod error;
mod interface;
mod interrupt;
mod platform;
mod register;
mod sink;
mod timestamp;

#[cfg(test)]
mod testing;

// Interface layer
pub use interface::{Asm330Address, I2cInterface, Interface, SpiInterface};

// Configuration
pub use config::{ChannelConfig, EngineConfig, FifoMode, OutputDataRate, SensorId};

// Engine and driver
pub use device::{ChannelRuntime, DrainStats, Engine};
pub use driver::{Asm330lhhx, Asm330lhhxI2c, Asm330lhhxSpi};

// Data types
pub use data::{ChannelTag, FifoRecord, FifoRecordIterator, RawFifoRecord, RecordError};
pub use data::{FifoStatus, MAX_FIFO_DEPTH, RECORD_SIZE, SAMPLE_SIZE, TAG_SIZE};

// Host integration
pub use error::Error;
pub use interrupt::{InterruptConfig, InterruptPin, InterruptTrigger};
pub use platform::{IdleTimer, Platform};
pub use sink::{ChannelSink, FifoEvent};

// Time
#[cfg(feature = "embassy-time")]
pub use timestamp::EmbassyClock;
pub use timestamp::{Clock, HardwareClockState, InterruptTiming};
