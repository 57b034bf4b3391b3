//! FIFO wire format.

pub(crate) mod record;

pub use record::{ChannelTag, FifoRecord, FifoRecordIterator, RawFifoRecord, RecordError};

use crate::register::fifo_status;

/// Tag byte preceding every FIFO payload.
pub const TAG_SIZE: usize = 1;
/// Payload bytes carried by each FIFO record.
pub const SAMPLE_SIZE: usize = 6;
/// Bytes per FIFO record (tag + payload).
pub const RECORD_SIZE: usize = TAG_SIZE + SAMPLE_SIZE;
/// FIFO capacity in records.
pub const MAX_FIFO_DEPTH: u16 = 416;

/// First ready-field value marking a placeholder sample.
pub(crate) const SAMPLE_DISCARD: i16 = 0x7FFD;
/// Drain buffer size, in records.
pub(crate) const FIFO_BURST_RECORDS_MAX: usize = 60;

/// FIFO status decoded from FIFO_STATUS1/FIFO_STATUS2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Unread records.
    pub depth: u16,
    /// Watermark threshold reached.
    pub watermark: bool,
    /// FIFO overrun occurred.
    pub overrun: bool,
    /// FIFO will be full at the next ODR.
    pub full: bool,
}

impl FifoStatus {
    pub(crate) const fn from_regs(regs: [u8; 2]) -> Self {
        let raw = u16::from_le_bytes(regs);
        let status2 = regs[1];
        Self {
            depth: raw & fifo_status::DIFF_FIFO_MASK,
            watermark: (status2 & fifo_status::FIFO_WTM_IA) != 0,
            overrun: (status2 & fifo_status::FIFO_OVR_IA) != 0,
            full: (status2 & fifo_status::FIFO_FULL_IA) != 0,
        }
    }

    /// Bytes waiting in the FIFO.
    pub const fn bytes(self) -> usize {
        self.depth as usize * RECORD_SIZE
    }
}
