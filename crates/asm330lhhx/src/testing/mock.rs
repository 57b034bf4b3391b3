extern crate std;

use core::cell::Cell;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::config::SensorId;
use crate::data::{RECORD_SIZE, SAMPLE_SIZE};
use crate::error::Error;
use crate::interface::Interface;
use crate::platform::{IdleTimer, Platform};
use crate::register::{Register, fifo_status};
use crate::sink::{ChannelSink, FifoEvent};
use crate::timestamp::Clock;

/// Register file with a FIFO queue behind FIFO_DATA_OUT_TAG.
///
/// FIFO_STATUS1/2 report the number of complete records still queued, so a
/// second drain after the first one sees an empty FIFO.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    writes: Vec<(u8, u8)>,
    write_bursts: Vec<(u8, Vec<u8>)>,
    fifo: Vec<u8>,
    fifo_cursor: usize,
    fifo_reads: Vec<(usize, usize)>,
    status_reads: Vec<u16>,
    fail_reg: Option<u8>,
    fail_fifo_after: Option<usize>,
    yield_on_read: bool,
    irq_probe: Option<Rc<Cell<bool>>>,
    unmasked_writes: usize,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            writes: Vec::new(),
            write_bursts: Vec::new(),
            fifo: Vec::new(),
            fifo_cursor: 0,
            fifo_reads: Vec::new(),
            status_reads: Vec::new(),
            fail_reg: None,
            fail_fifo_after: None,
            yield_on_read: false,
            irq_probe: None,
            unmasked_writes: 0,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.set_reg(reg, value);
        self
    }

    pub(crate) fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    /// Queues raw records behind FIFO_DATA_OUT_TAG.
    pub(crate) fn with_records(mut self, records: &[[u8; RECORD_SIZE]]) -> Self {
        self.push_records(records);
        self
    }

    pub(crate) fn push_records(&mut self, records: &[[u8; RECORD_SIZE]]) {
        for record in records {
            self.fifo.extend_from_slice(record);
        }
    }

    /// Every access to `reg` fails with a bus error.
    pub(crate) fn with_failing_reg(mut self, reg: u8) -> Self {
        self.fail_reg = Some(reg);
        self
    }

    /// FIFO data reads fail once `reads` transfers have succeeded.
    pub(crate) fn with_fifo_failure_after(mut self, reads: usize) -> Self {
        self.fail_fifo_after = Some(reads);
        self
    }

    /// Yields to the executor once before every read.
    pub(crate) fn with_yield(mut self) -> Self {
        self.yield_on_read = true;
        self
    }

    /// Counts writes issued while `masked` reads false.
    pub(crate) fn with_irq_probe(mut self, masked: Rc<Cell<bool>>) -> Self {
        self.irq_probe = Some(masked);
        self
    }

    pub(crate) fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub(crate) fn write_bursts(&self) -> &[(u8, Vec<u8>)] {
        &self.write_bursts
    }

    /// `(offset, len)` of every FIFO data transfer.
    pub(crate) fn fifo_reads(&self) -> &[(usize, usize)] {
        &self.fifo_reads
    }

    /// Depth reported by every FIFO status read.
    pub(crate) fn status_reads(&self) -> &[u16] {
        &self.status_reads
    }

    pub(crate) fn unmasked_writes(&self) -> usize {
        self.unmasked_writes
    }

    fn queued_records(&self) -> u16 {
        let remaining = self.fifo.len().saturating_sub(self.fifo_cursor) / RECORD_SIZE;
        remaining as u16 & fifo_status::DIFF_FIFO_MASK
    }

    fn check(&self, reg: u8) -> Result<(), Error> {
        if self.fail_reg == Some(reg) {
            return Err(Error::Bus);
        }
        Ok(())
    }

    fn note_write(&mut self) {
        if let Some(masked) = &self.irq_probe {
            if !masked.get() {
                self.unmasked_writes += 1;
            }
        }
    }

    fn read_fifo(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        if let Some(limit) = self.fail_fifo_after {
            if self.fifo_reads.len() >= limit {
                return Err(Error::Bus);
            }
        }
        self.fifo_reads.push((self.fifo_cursor, buffer.len()));
        for slot in buffer.iter_mut() {
            *slot = self.fifo.get(self.fifo_cursor).copied().unwrap_or(0);
            self.fifo_cursor += 1;
        }
        Ok(())
    }
}

impl Interface for MockInterface {
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buffer = [0u8];
        self.read_regs(reg, &mut buffer).await?;
        Ok(buffer[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if self.yield_on_read {
            YieldNow::default().await;
        }
        self.check(reg)?;
        if buffer.is_empty() {
            return Ok(());
        }
        if reg == Register::FifoDataOutTag.addr() {
            return self.read_fifo(buffer);
        }
        if reg == Register::FifoStatus1.addr() {
            let depth = self.queued_records();
            self.status_reads.push(depth);
            let [lo, hi] = depth.to_le_bytes();
            self.regs[reg as usize] = lo;
            let flags = self.regs[Register::FifoStatus2.addr() as usize] & !0x03;
            self.regs[Register::FifoStatus2.addr() as usize] = flags | hi;
        }
        for (offset, slot) in buffer.iter_mut().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            *slot = self.regs[addr as usize];
        }
        Ok(())
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.check(reg)?;
        self.note_write();
        self.regs[reg as usize] = value;
        self.writes.push((reg, value));
        Ok(())
    }

    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        self.check(reg)?;
        if data.is_empty() {
            return Ok(());
        }
        self.note_write();
        for (offset, value) in data.iter().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            self.regs[addr as usize] = *value;
        }
        self.write_bursts.push((reg, data.to_vec()));
        Ok(())
    }
}

/// Builds a timestamp record carrying `ticks`.
pub(crate) fn timestamp_record(ticks: u32) -> [u8; RECORD_SIZE] {
    let [b0, b1, b2, b3] = ticks.to_le_bytes();
    [0x04 << 3, b0, b1, b2, b3, 0, 0]
}

/// Builds a data record with tag sensor field `tag`.
pub(crate) fn sample_record(tag: u8, payload: [u8; SAMPLE_SIZE]) -> [u8; RECORD_SIZE] {
    let [p0, p1, p2, p3, p4, p5] = payload;
    [tag << 3, p0, p1, p2, p3, p4, p5]
}

/// Builds a data record carrying the not-ready placeholder.
pub(crate) fn not_ready_record(tag: u8) -> [u8; RECORD_SIZE] {
    sample_record(tag, [0xFE, 0x7F, 0, 0, 0, 0])
}

/// Host clock advancing by `step_ns` on every read.
#[derive(Debug, Default)]
pub(crate) struct MockClock {
    now: Cell<i64>,
    step_ns: i64,
}

impl MockClock {
    pub(crate) fn new(start_ns: i64, step_ns: i64) -> Self {
        Self {
            now: Cell::new(start_ns),
            step_ns,
        }
    }

    pub(crate) fn fixed(now_ns: i64) -> Self {
        Self::new(now_ns, 0)
    }

    pub(crate) fn set(&self, now_ns: i64) {
        self.now.set(now_ns);
    }
}

impl Clock for MockClock {
    fn now_ns(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + self.step_ns);
        now
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) samples: Vec<(SensorId, [u8; SAMPLE_SIZE], i64)>,
    pub(crate) events: Vec<(SensorId, FifoEvent, i64)>,
}

impl RecordingSink {
    pub(crate) fn channel(&self, channel: SensorId) -> Vec<(&[u8; SAMPLE_SIZE], i64)> {
        self.samples
            .iter()
            .filter(|(id, _, _)| *id == channel)
            .map(|(_, payload, ts)| (payload, *ts))
            .collect()
    }
}

impl ChannelSink for RecordingSink {
    fn push(&mut self, channel: SensorId, payload: &[u8; SAMPLE_SIZE], timestamp_ns: i64) {
        self.samples.push((channel, *payload, timestamp_ns));
    }

    fn push_event(&mut self, channel: SensorId, event: FifoEvent, timestamp_ns: i64) {
        self.events.push((channel, event, timestamp_ns));
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockPlatform {
    pub(crate) masked: Rc<Cell<bool>>,
    pub(crate) disable_calls: u32,
    pub(crate) enable_calls: u32,
    pub(crate) stay_awake: Vec<u32>,
    pub(crate) shuttle: Vec<(SensorId, bool)>,
    pub(crate) shuttle_error: Option<Error>,
}

impl MockPlatform {
    pub(crate) fn probe(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.masked)
    }
}

impl Platform for MockPlatform {
    fn disable_irq(&mut self) {
        self.disable_calls += 1;
        self.masked.set(true);
    }

    fn enable_irq(&mut self) {
        self.enable_calls += 1;
        self.masked.set(false);
    }

    fn stay_awake(&mut self, timeout_ms: u32) {
        self.stay_awake.push(timeout_ms);
    }

    async fn shuttle_enable(&mut self, channel: SensorId, enable: bool) -> Result<(), Error> {
        self.shuttle.push((channel, enable));
        match self.shuttle_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockIdleTimer {
    pub(crate) rearms: Vec<i64>,
    pub(crate) cpu_idle: Vec<bool>,
}

impl IdleTimer for MockIdleTimer {
    fn rearm(&mut self, interval_ns: i64) {
        self.rearms.push(interval_ns);
    }

    fn set_cpu_idle(&mut self, allowed: bool) {
        self.cpu_idle.push(allowed);
    }
}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) last_ns: Option<u32>,
    pub(crate) total_ns: u64,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.last_ns = Some(ns);
        self.total_ns += u64::from(ns);
    }
}

/// Future that returns `Pending` once, waking itself.
#[derive(Default)]
pub(crate) struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
