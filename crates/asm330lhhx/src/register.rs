//! ASM330LHHX register definitions.
//!
//! This module contains the main-page register map used by the FIFO engine,
//! plus the bit masks used by the driver.

#![allow(dead_code)] // Full register map is intentional; many entries are not wired yet.

/// ASM330LHHX register addresses (main page).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Embedded functions / sensor hub page selection.
    FuncCfgAccess = 0x01,
    /// SDO/OCS pull-up control.
    PinCtrl = 0x02,
    /// FIFO control register 1 (watermark bits 7:0).
    FifoCtrl1 = 0x07,
    /// FIFO control register 2 (watermark bit 8, compression, ODR change).
    FifoCtrl2 = 0x08,
    /// FIFO control register 3 (accelerometer / gyroscope batching rates).
    FifoCtrl3 = 0x09,
    /// FIFO control register 4 (mode, temperature batching, timestamp decimation).
    FifoCtrl4 = 0x0A,
    /// Batch data rate counter register 1.
    CounterBdrReg1 = 0x0B,
    /// Batch data rate counter register 2.
    CounterBdrReg2 = 0x0C,
    /// INT1 pin routing.
    Int1Ctrl = 0x0D,
    /// INT2 pin routing.
    Int2Ctrl = 0x0E,
    /// Device identifier register.
    WhoAmI = 0x0F,
    /// Accelerometer control (ODR, full scale).
    Ctrl1Xl = 0x10,
    /// Gyroscope control (ODR, full scale).
    Ctrl2G = 0x11,
    /// Control register 3 (interface, interrupt polarity, reset).
    Ctrl3C = 0x12,
    /// Control register 4.
    Ctrl4C = 0x13,
    /// Control register 5 (self-test, rounding).
    Ctrl5C = 0x14,
    /// Control register 6 (gyro LPF1 bandwidth).
    Ctrl6C = 0x15,
    /// Control register 7 (gyro high-pass filter).
    Ctrl7G = 0x16,
    /// Control register 8 (accelerometer filtering).
    Ctrl8Xl = 0x17,
    /// Control register 9.
    Ctrl9Xl = 0x18,
    /// Control register 10 (timestamp enable).
    Ctrl10C = 0x19,
    /// Source register for all interrupts.
    AllIntSrc = 0x1A,
    /// Data ready status register.
    StatusReg = 0x1E,
    /// Temperature output low byte.
    OutTempL = 0x20,
    /// Temperature output high byte.
    OutTempH = 0x21,
    /// Machine learning core status (main page mirror).
    MlcStatus = 0x38,
    /// FIFO status register 1 (unread record count bits 7:0).
    FifoStatus1 = 0x3A,
    /// FIFO status register 2 (unread record count bits 9:8, flags).
    FifoStatus2 = 0x3B,
    /// Timestamp counter byte 0.
    Timestamp0 = 0x40,
    /// Timestamp counter byte 1.
    Timestamp1 = 0x41,
    /// Timestamp counter byte 2 (write 0xAA to reset the counter).
    Timestamp2 = 0x42,
    /// Timestamp counter byte 3.
    Timestamp3 = 0x43,
    /// FIFO data output tag byte (burst reads stream whole records from here).
    FifoDataOutTag = 0x78,
    /// FIFO data output X low byte.
    FifoDataOutXL = 0x79,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Places `value` into the field selected by `mask`.
pub(crate) const fn field(mask: u8, value: u8) -> u8 {
    (value << mask.trailing_zeros()) & mask
}

/// WHO_AM_I register values.
pub mod who_am_i {
    /// Expected WHO_AM_I value.
    pub const EXPECTED: u8 = 0x6B;
}

/// FIFO watermark bits spanning FIFO_CTRL1/FIFO_CTRL2.
pub mod fifo_wtm {
    /// Watermark field mask on the little-endian 16-bit register pair.
    pub const WTM_MASK: u16 = 0x01FF;
}

/// FIFO_CTRL3 register bits.
pub mod fifo_ctrl3 {
    /// Gyroscope batching data rate.
    pub const BDR_GY_MASK: u8 = 0b1111_0000;
    /// Accelerometer batching data rate.
    pub const BDR_XL_MASK: u8 = 0b0000_1111;
}

/// FIFO_CTRL4 register bits.
pub mod fifo_ctrl4 {
    /// Timestamp batching decimation.
    pub const DEC_TS_BATCH_MASK: u8 = 0b1100_0000;
    /// Temperature batching data rate.
    pub const ODR_T_BATCH_MASK: u8 = 0b0011_0000;
    /// FIFO mode selection.
    pub const FIFO_MODE_MASK: u8 = 0b0000_0111;
}

/// FIFO_STATUS1/FIFO_STATUS2 bits.
pub mod fifo_status {
    /// Unread record count on the little-endian 16-bit register pair.
    pub const DIFF_FIFO_MASK: u16 = 0x03FF;
    /// FIFO watermark reached (FIFO_STATUS2).
    pub const FIFO_WTM_IA: u8 = 0b1000_0000;
    /// FIFO overrun (FIFO_STATUS2).
    pub const FIFO_OVR_IA: u8 = 0b0100_0000;
    /// FIFO full at next ODR (FIFO_STATUS2).
    pub const FIFO_FULL_IA: u8 = 0b0010_0000;
}

/// INT1_CTRL / INT2_CTRL register bits.
pub mod int_ctrl {
    /// FIFO threshold interrupt.
    pub const INT_FIFO_TH: u8 = 0b0000_1000;
}

/// CTRL1_XL register bits.
pub mod ctrl1_xl {
    /// Accelerometer output data rate.
    pub const ODR_XL_MASK: u8 = 0b1111_0000;
}

/// CTRL2_G register bits.
pub mod ctrl2_g {
    /// Gyroscope output data rate.
    pub const ODR_G_MASK: u8 = 0b1111_0000;
}

/// CTRL3_C register bits.
pub mod ctrl3_c {
    /// Reboot memory content.
    pub const BOOT: u8 = 0b1000_0000;
    /// Block data update.
    pub const BDU: u8 = 0b0100_0000;
    /// Interrupt activation level (1 = active low).
    pub const H_LACTIVE: u8 = 0b0010_0000;
    /// Push-pull / open-drain selection on INT pins (1 = open drain).
    pub const PP_OD: u8 = 0b0001_0000;
    /// SPI serial interface mode (1 = 3-wire).
    pub const SIM: u8 = 0b0000_1000;
    /// Register address auto-increment.
    pub const IF_INC: u8 = 0b0000_0100;
    /// Software reset.
    pub const SW_RESET: u8 = 0b0000_0001;
}

/// CTRL10_C register bits.
pub mod ctrl10_c {
    /// Timestamp counter enable.
    pub const TIMESTAMP_EN: u8 = 0b0010_0000;
}

/// TIMESTAMP2 register values.
pub mod timestamp2 {
    /// Writing this value restarts the timestamp counter.
    pub const RESET: u8 = 0xAA;
}

/// FIFO_DATA_OUT_TAG byte layout.
pub mod fifo_tag {
    /// Tag sensor field shift (bits 7:3).
    pub const TAG_SHIFT: u8 = 3;
}
