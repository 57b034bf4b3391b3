//! Testing infrastructure (mock transport, clock, sink, platform hooks).

pub(crate) mod mock;

pub(crate) use mock::{
    MockClock, MockDelay, MockIdleTimer, MockInterface, MockPlatform, RecordingSink, YieldNow,
    not_ready_record, sample_record, timestamp_record,
};
