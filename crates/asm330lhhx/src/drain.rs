//! FIFO drain: burst reads, tag demultiplexing, clock sync and decimation.

use crate::config::SensorId;
use crate::data::{
    ChannelTag, FIFO_BURST_RECORDS_MAX, FifoRecord, FifoRecordIterator, RECORD_SIZE, RawFifoRecord,
    RecordError, SAMPLE_SIZE,
};
use crate::device::Engine;
use crate::error::Error;
use crate::interface::Interface;
use crate::platform::Platform;
use crate::register::Register;
use crate::sink::ChannelSink;
use crate::timestamp::{Clock, InterruptTiming};

/// Wake hold requested after a wake-up drain.
pub(crate) const WAKE_HOLD_MS: u32 = 10_000;
/// Timestamp carried by the end-of-replay marker.
pub(crate) const WAKE_MARKER_TS: i64 = 0xFFFF_FFFF;

fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}

impl<I, C, S, P> Engine<I, C, S, P>
where
    I: Interface,
    C: Clock,
    S: ChannelSink,
    P: Platform,
{
    /// Reads every batched record and forwards ready samples to the sink.
    ///
    /// Sample timestamps are interpolated across the interval since the
    /// previous interrupt and reconciled against the hardware timestamp
    /// records found in the stream. With `notify` set while a wake-up is
    /// pending, samples are replayed on [`SensorId::WakeReplay`] instead.
    ///
    /// Returns the number of bytes read; 0 in Bypass mode or when the FIFO
    /// is empty. A bus error aborts the drain, samples already forwarded
    /// stay delivered.
    pub async fn drain(&mut self, notify: bool) -> Result<usize, Error> {
        if !self.operational {
            warn!("drain skipped: fifo in bypass mode");
            return Ok(0);
        }

        let status = self.fifo_status().await?;
        if status.depth == 0 {
            return Ok(0);
        }
        if status.overrun {
            warn!("fifo overrun, {} records pending", status.depth);
        }

        let total = status.bytes();
        let depth = i64::from(status.depth);
        let delta = self.irq.delta_ts / depth;
        let mut provisional = self.irq.ts - self.irq.delta_ts;

        let replay = self.resuming && notify;
        if replay {
            let packets = status
                .depth
                .checked_shr(u32::from(self.config.resume_sample_shift))
                .unwrap_or(0);
            self.resume_ts =
                self.clock.now_ns() - i64::from(packets) * self.config.resume_sample_tick_ns;
        }

        let mut buffer = [0u8; FIFO_BURST_RECORDS_MAX * RECORD_SIZE];
        let burst = self.config.burst_len();
        let mut read = 0;
        while read < total {
            let len = burst.min(total - read);
            self.read_regs(Register::FifoDataOutTag, &mut buffer[..len])
                .await?;
            for record in FifoRecordIterator::new(&buffer[..len]) {
                provisional += delta;
                self.process_record(record, provisional, replay);
            }
            read += len;
        }

        if replay {
            self.sink
                .push(SensorId::WakeReplay, &[0; SAMPLE_SIZE], WAKE_MARKER_TS);
            self.platform.stay_awake(WAKE_HOLD_MS);
        }

        trace!("drained {} bytes", total);
        Ok(total)
    }

    /// Drain run by the interrupt pipeline.
    ///
    /// Latches `timing` and ends a pending flush once the drain is done, so
    /// the clock filter resumes syncing from the next drain on.
    pub async fn drain_interrupt(
        &mut self,
        timing: InterruptTiming,
        notify: bool,
    ) -> Result<usize, Error> {
        self.latch_interrupt(timing);
        let result = self.drain(notify).await;
        self.flushing = false;
        result
    }

    fn process_record(&mut self, record: RawFifoRecord<'_>, provisional: i64, replay: bool) {
        bump(&mut self.stats.records);

        let (tag, payload) = match record.decode() {
            Ok(FifoRecord::Timestamp { ticks }) => {
                bump(&mut self.stats.timestamps);
                self.hw_clock.on_ticks(ticks);
                if !self.flushing {
                    self.hw_clock.sync(provisional);
                }
                return;
            }
            Ok(FifoRecord::Sample { tag, payload }) => (tag, payload),
            Err(RecordError::UnknownTag(bits)) => {
                bump(&mut self.stats.unknown_tag);
                trace!("unknown fifo tag {}", bits);
                return;
            }
            Err(RecordError::NotReady(tag)) => {
                bump(&mut self.stats.not_ready);
                trace!("sample not ready, tag {:?}", tag);
                return;
            }
        };

        let Some(channel) = self.channel_for(tag) else {
            return;
        };

        if replay && self.config.wake_replay {
            self.sink.push(SensorId::WakeReplay, payload, self.resume_ts);
            self.resume_ts += self.config.resume_sample_tick_ns;
            bump(&mut self.stats.forwarded);
            return;
        }

        let ts = self.hw_clock.reconcile();
        let runtime = &mut self.channels[channel.index()];
        if runtime.decimation_counter > 0 {
            runtime.decimation_counter -= 1;
            bump(&mut self.stats.decimated);
            return;
        }
        runtime.decimation_counter = runtime.decimation_factor;
        runtime.last_timestamp = ts;
        self.sink.push(channel, payload, ts);
        bump(&mut self.stats.forwarded);
    }

    /// Logical channel receiving records tagged `tag`.
    ///
    /// The first auxiliary slot falls back to the second channel when it is
    /// not enabled itself.
    fn channel_for(&self, tag: ChannelTag) -> Option<SensorId> {
        match tag {
            ChannelTag::Gyro => Some(SensorId::Gyro),
            ChannelTag::Accel => Some(SensorId::Accel),
            ChannelTag::Temp => Some(SensorId::Temp),
            ChannelTag::Ext0 if self.channels[SensorId::Ext0.index()].enabled => {
                Some(SensorId::Ext0)
            }
            ChannelTag::Ext0 | ChannelTag::Ext1 => Some(SensorId::Ext1),
            ChannelTag::Timestamp => None,
        }
    }
}
