//! I2C interface adapter for the ASM330LHHX.

use embedded_hal_async::i2c::{I2c, Operation};

use super::Interface;
use crate::error::Error;

/// I2C register interface.
///
/// Burst reads rely on CTRL3_C.IF_INC (enabled at power-on) so that a single
/// transfer from FIFO_DATA_OUT_TAG streams whole records.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new I2C interface with the given bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit I2C address in use.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buffer = [0u8];
        self.read_regs(reg, &mut buffer).await?;
        Ok(buffer[0])
    }

    async fn read_regs(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.address, &[reg], buffer)
            .await
            .map_err(|_| Error::Bus)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let buffer = [reg, value];
        self.i2c
            .write(self.address, &buffer)
            .await
            .map_err(|_| Error::Bus)
    }

    async fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<(), Error> {
        if data.is_empty() {
            return Ok(());
        }
        let reg_buffer = [reg];
        let mut ops = [Operation::Write(&reg_buffer), Operation::Write(data)];
        self.i2c
            .transaction(self.address, &mut ops)
            .await
            .map_err(|_| Error::Bus)
    }
}
