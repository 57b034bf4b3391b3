//! Per-channel sample consumer.

use crate::config::SensorId;
use crate::data::SAMPLE_SIZE;

/// Out-of-band event published on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoEvent {
    /// A flush request completed; `data` is false when the FIFO was empty.
    Flush {
        /// At least one byte was drained by the flush.
        data: bool,
    },
}

/// Receives demultiplexed samples from the drain.
pub trait ChannelSink {
    /// Publishes one sample with its host timestamp.
    fn push(&mut self, channel: SensorId, payload: &[u8; SAMPLE_SIZE], timestamp_ns: i64);

    /// Publishes an event.
    fn push_event(&mut self, channel: SensorId, event: FifoEvent, timestamp_ns: i64) {
        let _ = (channel, event, timestamp_ns);
    }
}

impl<T: ChannelSink + ?Sized> ChannelSink for &mut T {
    fn push(&mut self, channel: SensorId, payload: &[u8; SAMPLE_SIZE], timestamp_ns: i64) {
        (**self).push(channel, payload, timestamp_ns);
    }

    fn push_event(&mut self, channel: SensorId, event: FifoEvent, timestamp_ns: i64) {
        (**self).push_event(channel, event, timestamp_ns);
    }
}
