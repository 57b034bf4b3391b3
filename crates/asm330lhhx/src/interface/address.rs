//! I2C address definitions for the ASM330LHHX.

/// ASM330LHHX I2C addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Asm330Address {
    /// Primary address: 0x6A (SDO/SA0 = low).
    Primary,
    /// Secondary address: 0x6B (SDO/SA0 = high).
    Secondary,
}

impl Asm330Address {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => 0x6A,
            Self::Secondary => 0x6B,
        }
    }
}

impl Default for Asm330Address {
    fn default() -> Self {
        Self::Primary
    }
}
