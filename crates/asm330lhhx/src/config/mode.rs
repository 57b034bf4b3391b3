//! FIFO operating mode.

use crate::register::{fifo_ctrl4, field};

/// FIFO operating mode (FIFO_CTRL4.FIFO_MODE).
///
/// Bypass is both the power-on state and the "off" state; Continuous is only
/// entered while at least one channel is batching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO disabled, contents discarded.
    #[default]
    Bypass,
    /// Continuous (stream) mode: oldest records are overwritten when full.
    Continuous,
}

impl FifoMode {
    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::Bypass => 0b000,
            Self::Continuous => 0b110,
        }
    }

    pub(crate) const fn ctrl4_field(self) -> u8 {
        field(fifo_ctrl4::FIFO_MODE_MASK, self.bits())
    }

    /// Returns true when the drain engine may read the FIFO in this mode.
    pub const fn is_operational(self) -> bool {
        !matches!(self, Self::Bypass)
    }
}
