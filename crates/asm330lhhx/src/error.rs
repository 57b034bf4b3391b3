//! Error type for the ASM330LHHX FIFO engine.

/// Error type for ASM330LHHX operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus communication error (I2C, SPI, etc.).
    Bus,
    /// FIFO is in bypass mode; there is nothing to drain.
    NotOperational,
    /// Invalid data or configuration.
    InvalidData,
    /// Operation not supported for this channel.
    Unsupported,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => f.write_str("register transport failure"),
            Self::NotOperational => f.write_str("fifo is not operational"),
            Self::InvalidData => f.write_str("invalid data or configuration"),
            Self::Unsupported => f.write_str("operation not supported"),
        }
    }
}
