//! Host platform hooks used by the engine.

use crate::config::SensorId;
use crate::error::Error;

/// Interrupt line, wake source and auxiliary bus control.
///
/// `()` implements every hook as a no-op; shuttle channels then report
/// [`Error::Unsupported`].
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Masks the device interrupt line.
    fn disable_irq(&mut self);

    /// Unmasks the device interrupt line.
    fn enable_irq(&mut self);

    /// Keeps the host awake for `timeout_ms` after a wake-up drain.
    fn stay_awake(&mut self, timeout_ms: u32) {
        let _ = timeout_ms;
    }

    /// Enables or disables an auxiliary bus channel (`Ext0` / `Ext1`).
    async fn shuttle_enable(&mut self, channel: SensorId, enable: bool) -> Result<(), Error> {
        let _ = (channel, enable);
        Err(Error::Unsupported)
    }
}

impl Platform for () {
    fn disable_irq(&mut self) {}

    fn enable_irq(&mut self) {}
}

/// High resolution idle timer driven in low-power timing mode.
pub trait IdleTimer {
    /// Restarts the timer with the latest interrupt period.
    fn rearm(&mut self, interval_ns: i64);

    /// Allows or forbids deep CPU idle states.
    fn set_cpu_idle(&mut self, allowed: bool);
}

impl IdleTimer for () {
    fn rearm(&mut self, _interval_ns: i64) {}

    fn set_cpu_idle(&mut self, _allowed: bool) {}
}
