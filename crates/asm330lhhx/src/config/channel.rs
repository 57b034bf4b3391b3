use crate::register::{Register, ctrl1_xl, ctrl2_g, fifo_ctrl3, fifo_ctrl4};

/// Logical output channel fed by the FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorId {
    /// Gyroscope.
    Gyro,
    /// Accelerometer.
    Accel,
    /// Internal temperature sensor.
    Temp,
    /// First external sensor on the auxiliary bus.
    Ext0,
    /// Second external sensor on the auxiliary bus.
    Ext1,
    /// Replay channel receiving samples batched while the host was suspended.
    WakeReplay,
}

impl SensorId {
    /// Number of logical channels.
    pub const COUNT: usize = 6;

    /// All logical channels, in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Gyro,
        Self::Accel,
        Self::Temp,
        Self::Ext0,
        Self::Ext1,
        Self::WakeReplay,
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Gyro => 0,
            Self::Accel => 1,
            Self::Temp => 2,
            Self::Ext0 => 3,
            Self::Ext1 => 4,
            Self::WakeReplay => 5,
        }
    }

    /// Returns true for channels relayed through the auxiliary bus shuttle.
    pub const fn is_shuttle(self) -> bool {
        matches!(self, Self::Ext0 | Self::Ext1)
    }

    /// Returns true for the channels that own a batching rate of their own
    /// on the primary data path (accelerometer and gyroscope).
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Gyro | Self::Accel)
    }

    /// Output data rate field, for channels that have one.
    pub(crate) const fn odr_field(self) -> Option<(Register, u8)> {
        match self {
            Self::Accel => Some((Register::Ctrl1Xl, ctrl1_xl::ODR_XL_MASK)),
            Self::Gyro => Some((Register::Ctrl2G, ctrl2_g::ODR_G_MASK)),
            _ => None,
        }
    }

    /// Batching data rate field, for channels batched directly by the FIFO.
    pub(crate) const fn batching_field(self) -> Option<(Register, u8)> {
        match self {
            Self::Accel => Some((Register::FifoCtrl3, fifo_ctrl3::BDR_XL_MASK)),
            Self::Gyro => Some((Register::FifoCtrl3, fifo_ctrl3::BDR_GY_MASK)),
            Self::Temp => Some((Register::FifoCtrl4, fifo_ctrl4::ODR_T_BATCH_MASK)),
            _ => None,
        }
    }
}

/// Output / batching data rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    /// 1.6 Hz (accelerometer and temperature batching only).
    Hz1_6,
    /// 12.5 Hz.
    Hz12_5,
    /// 26 Hz.
    Hz26,
    /// 52 Hz.
    Hz52,
    /// 104 Hz.
    Hz104,
    /// 208 Hz.
    Hz208,
    /// 417 Hz.
    Hz417,
    /// 833 Hz.
    Hz833,
    /// 1667 Hz.
    Hz1667,
    /// 3333 Hz.
    Hz3333,
    /// 6667 Hz.
    Hz6667,
}

impl OutputDataRate {
    /// Returns the rate in millihertz.
    pub const fn hz_milli(self) -> u32 {
        match self {
            Self::Hz1_6 => 1_600,
            Self::Hz12_5 => 12_500,
            Self::Hz26 => 26_000,
            Self::Hz52 => 52_000,
            Self::Hz104 => 104_000,
            Self::Hz208 => 208_000,
            Self::Hz417 => 417_000,
            Self::Hz833 => 833_000,
            Self::Hz1667 => 1_667_000,
            Self::Hz3333 => 3_333_000,
            Self::Hz6667 => 6_667_000,
        }
    }

    /// CTRL1_XL/CTRL2_G and FIFO_CTRL3 share the same rate encoding.
    const fn rate_bits(self) -> u8 {
        match self {
            Self::Hz1_6 => 0b1011,
            Self::Hz12_5 => 0b0001,
            Self::Hz26 => 0b0010,
            Self::Hz52 => 0b0011,
            Self::Hz104 => 0b0100,
            Self::Hz208 => 0b0101,
            Self::Hz417 => 0b0110,
            Self::Hz833 => 0b0111,
            Self::Hz1667 => 0b1000,
            Self::Hz3333 => 0b1001,
            Self::Hz6667 => 0b1010,
        }
    }

    /// Output data rate bits for `sensor`, if the sensor supports the rate.
    pub(crate) const fn odr_bits(self, sensor: SensorId) -> Option<u8> {
        match (sensor, self) {
            (SensorId::Gyro, Self::Hz1_6) => None,
            (SensorId::Accel | SensorId::Gyro, _) => Some(self.rate_bits()),
            _ => None,
        }
    }

    /// Batching data rate bits used when `sensor` feeds the FIFO at this rate.
    pub(crate) const fn batch_bits(self, sensor: SensorId) -> Option<u8> {
        match sensor {
            SensorId::Accel | SensorId::Gyro => self.odr_bits(sensor),
            SensorId::Temp => match self {
                Self::Hz1_6 => Some(0b01),
                Self::Hz12_5 => Some(0b10),
                Self::Hz52 => Some(0b11),
                _ => None,
            },
            SensorId::Ext0 | SensorId::Ext1 | SensorId::WakeReplay => None,
        }
    }
}

/// Per-channel batching configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Output data rate programmed when the channel is enabled.
    pub odr: Option<OutputDataRate>,
    /// Requested FIFO watermark (in records).
    pub watermark: u16,
    /// Number of samples dropped between two forwarded samples.
    pub decimation: u16,
}

impl ChannelConfig {
    /// Default channel configuration (no rate, watermark 1, no decimation).
    pub const DEFAULT: Self = Self {
        odr: None,
        watermark: 1,
        decimation: 0,
    };

    /// Creates a configuration for the given output data rate.
    pub const fn new(odr: OutputDataRate) -> Self {
        Self {
            odr: Some(odr),
            ..Self::DEFAULT
        }
    }

    /// Sets the requested watermark.
    #[must_use]
    pub const fn with_watermark(mut self, watermark: u16) -> Self {
        self.watermark = watermark;
        self
    }

    /// Sets the decimation factor (forward 1 of every `decimation + 1` samples).
    #[must_use]
    pub const fn with_decimation(mut self, decimation: u16) -> Self {
        self.decimation = decimation;
        self
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
