//! Interface abstraction for register I/O.

pub(crate) mod address;
pub(crate) mod i2c;
pub(crate) mod spi;

pub use address::Asm330Address;
pub use i2c::I2cInterface;
pub use spi::SpiInterface;

use crate::error::Error;

/// Minimal async register I/O for the FIFO engine.
///
/// Implementations are expected to serialize their own bus access; every
/// failure is reported as [`Error::Bus`].
#[allow(async_fn_in_trait)]
pub trait Interface {
    /// Reads a single register.
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error>;
    /// Reads a contiguous block of registers into `buffer`.
    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error>;
    /// Writes a single register.
    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error>;
    /// Writes a contiguous block of registers from `data`.
    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error>;

    /// Replaces the bits selected by `mask` with `value & mask`.
    ///
    /// The write is skipped when the register already holds the value.
    async fn update_bits(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error> {
        let current = self.read_reg(reg).await?;
        let updated = (current & !mask) | (value & mask);
        if updated == current {
            return Ok(());
        }
        self.write_reg(reg, updated).await
    }
}
