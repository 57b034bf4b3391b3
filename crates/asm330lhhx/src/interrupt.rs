//! Interrupt pin electrical configuration and FIFO threshold routing.

use crate::register::{Register, ctrl3_c, int_ctrl};

/// Interrupt pin selection (device pins).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// Interrupt pin 1.
    #[default]
    Int1,
    /// Interrupt pin 2.
    Int2,
}

/// Trigger type of the host interrupt line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptTrigger {
    /// Trigger not specified by the platform; treated as level high.
    #[default]
    None,
    /// Rising edge.
    RisingEdge,
    /// Falling edge.
    FallingEdge,
    /// Level high.
    LevelHigh,
    /// Level low.
    LevelLow,
}

impl InterruptTrigger {
    /// Returns true when the device pin has to idle high.
    pub const fn is_active_low(self) -> bool {
        matches!(self, Self::FallingEdge | Self::LevelLow)
    }
}

/// Interrupt pin configuration applied by `Engine::setup_interrupt`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Drive the pin active low (CTRL3_C.H_LACTIVE).
    pub active_low: bool,
    /// Open-drain output, for lines shared with other devices (CTRL3_C.PP_OD).
    pub open_drain: bool,
    /// Pin the FIFO threshold interrupt is routed to.
    pub pin: InterruptPin,
}

impl InterruptConfig {
    /// Default interrupt configuration (active high, push-pull, INT1).
    pub const DEFAULT: Self = Self {
        active_low: false,
        open_drain: false,
        pin: InterruptPin::Int1,
    };

    /// Creates a new interrupt configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Derives the pin polarity from the host trigger type.
    pub const fn from_trigger(trigger: InterruptTrigger) -> Self {
        Self::DEFAULT.with_active_low(trigger.is_active_low())
    }

    /// Sets the pin polarity.
    #[must_use]
    pub const fn with_active_low(mut self, active_low: bool) -> Self {
        self.active_low = active_low;
        self
    }

    /// Selects open-drain output.
    #[must_use]
    pub const fn with_open_drain(mut self, open_drain: bool) -> Self {
        self.open_drain = open_drain;
        self
    }

    /// Sets the pin the FIFO threshold interrupt is routed to.
    #[must_use]
    pub const fn with_pin(mut self, pin: InterruptPin) -> Self {
        self.pin = pin;
        self
    }

    /// CTRL3_C mask and value for the pin electrical settings.
    pub(crate) const fn ctrl3_bits(self) -> (u8, u8) {
        let mut value = 0;
        if self.active_low {
            value |= ctrl3_c::H_LACTIVE;
        }
        if self.open_drain {
            value |= ctrl3_c::PP_OD;
        }
        (ctrl3_c::H_LACTIVE | ctrl3_c::PP_OD, value)
    }

    /// Routing register (INT1_CTRL / INT2_CTRL) and FIFO threshold bit.
    pub(crate) const fn routing(self) -> (Register, u8) {
        let reg = match self.pin {
            InterruptPin::Int1 => Register::Int1Ctrl,
            InterruptPin::Int2 => Register::Int2Ctrl,
        };
        (reg, int_ctrl::INT_FIFO_TH)
    }
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
