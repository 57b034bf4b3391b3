//! Tagged FIFO record decoding.
//!
//! Record layout (7 bytes):
//! - byte 0: tag sensor in bits 7:3, tag counter and parity below;
//! - bytes 1..7: payload. Data records start with a little-endian 16-bit
//!   ready field (`0x7FFD..=0x7FFF` marks a placeholder), timestamp records
//!   carry a little-endian 32-bit tick counter.

use super::{RECORD_SIZE, SAMPLE_DISCARD, SAMPLE_SIZE};
use crate::register::fifo_tag;

/// FIFO tag identifying the source of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelTag {
    /// Gyroscope sample.
    Gyro,
    /// Accelerometer sample.
    Accel,
    /// Temperature sample.
    Temp,
    /// Hardware timestamp.
    Timestamp,
    /// Auxiliary bus, first slot.
    Ext0,
    /// Auxiliary bus, second slot.
    Ext1,
}

impl ChannelTag {
    /// Decodes the tag sensor field; unknown values return `None`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0x01 => Some(Self::Gyro),
            0x02 => Some(Self::Accel),
            0x03 => Some(Self::Temp),
            0x04 => Some(Self::Timestamp),
            0x0F => Some(Self::Ext0),
            0x10 => Some(Self::Ext1),
            _ => None,
        }
    }

    /// Returns the tag sensor field value.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Gyro => 0x01,
            Self::Accel => 0x02,
            Self::Temp => 0x03,
            Self::Timestamp => 0x04,
            Self::Ext0 => 0x0F,
            Self::Ext1 => 0x10,
        }
    }
}

/// Reason a record was not turned into a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Tag value is not mapped to any channel.
    UnknownTag(u8),
    /// Data record carries the "not ready" placeholder.
    NotReady(ChannelTag),
}

/// Decoded view of one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoRecord<'a> {
    /// Hardware timestamp (low 32 bits of the tick counter).
    Timestamp {
        /// Raw tick count.
        ticks: u32,
    },
    /// Ready data sample.
    Sample {
        /// Source tag.
        tag: ChannelTag,
        /// Sample payload.
        payload: &'a [u8; SAMPLE_SIZE],
    },
}

/// Borrowed view of one raw 7-byte record inside a drain buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawFifoRecord<'a> {
    bytes: &'a [u8; RECORD_SIZE],
}

impl<'a> RawFifoRecord<'a> {
    /// Wraps a raw record.
    pub const fn new(bytes: &'a [u8; RECORD_SIZE]) -> Self {
        Self { bytes }
    }

    /// Tag sensor field (top five bits of the tag byte).
    pub const fn tag_bits(&self) -> u8 {
        self.bytes[0] >> fifo_tag::TAG_SHIFT
    }

    /// Decoded tag, if known.
    pub const fn tag(&self) -> Option<ChannelTag> {
        ChannelTag::from_bits(self.tag_bits())
    }

    /// Payload bytes following the tag.
    pub fn payload(&self) -> &'a [u8; SAMPLE_SIZE] {
        let [_, payload @ ..] = self.bytes;
        payload
    }

    /// Little-endian 16-bit ready field of a data record.
    pub const fn ready_field(&self) -> i16 {
        i16::from_le_bytes([self.bytes[1], self.bytes[2]])
    }

    /// Little-endian 32-bit tick counter of a timestamp record.
    pub const fn timestamp_ticks(&self) -> u32 {
        u32::from_le_bytes([self.bytes[1], self.bytes[2], self.bytes[3], self.bytes[4]])
    }

    /// Decodes the record.
    pub fn decode(&self) -> Result<FifoRecord<'a>, RecordError> {
        let tag = self.tag().ok_or(RecordError::UnknownTag(self.tag_bits()))?;
        if tag == ChannelTag::Timestamp {
            return Ok(FifoRecord::Timestamp {
                ticks: self.timestamp_ticks(),
            });
        }
        if self.ready_field() >= SAMPLE_DISCARD {
            return Err(RecordError::NotReady(tag));
        }
        Ok(FifoRecord::Sample {
            tag,
            payload: self.payload(),
        })
    }
}

/// Iterator over the complete records of a drain buffer.
///
/// A trailing partial record is ignored.
pub struct FifoRecordIterator<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> FifoRecordIterator<'a> {
    /// Creates an iterator over raw FIFO bytes.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Returns the remaining unparsed bytes.
    pub const fn remaining(&self) -> usize {
        if self.offset >= self.data.len() {
            0
        } else {
            self.data.len() - self.offset
        }
    }
}

impl<'a> Iterator for FifoRecordIterator<'a> {
    type Item = RawFifoRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.offset + RECORD_SIZE;
        let bytes: &'a [u8; RECORD_SIZE] = self.data.get(self.offset..end)?.try_into().ok()?;
        self.offset = end;
        Some(RawFifoRecord::new(bytes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let records = self.remaining() / RECORD_SIZE;
        (records, Some(records))
    }
}
