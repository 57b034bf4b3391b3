//! Channel enable/disable and FIFO batching configuration.

use embedded_hal_async::delay::DelayNs;

use crate::config::{FifoMode, SensorId};
use crate::device::Engine;
use crate::error::Error;
use crate::interface::Interface;
use crate::platform::Platform;
use crate::register::{Register, fifo_ctrl3};
use crate::sink::ChannelSink;
use crate::timestamp::Clock;

impl<I, C, S, P> Engine<I, C, S, P>
where
    I: Interface,
    C: Clock,
    S: ChannelSink,
    P: Platform,
{
    /// Starts or stops batching `channel` into the FIFO.
    ///
    /// Runs with the interrupt line masked: programs the sensor rate (or the
    /// auxiliary bus shuttle), the batching rate and the shared watermark,
    /// then moves the FIFO out of Bypass for the first channel and back into
    /// Bypass after the last one. Steps completed before a failure are not
    /// rolled back; the first error is returned.
    pub async fn set_channel_enabled<D: DelayNs>(
        &mut self,
        channel: SensorId,
        enable: bool,
        delay: &mut D,
    ) -> Result<(), Error> {
        if channel == SensorId::WakeReplay {
            return Err(Error::Unsupported);
        }

        if channel == SensorId::Gyro {
            if !enable {
                self.gyro_rearm_pending = true;
            } else if self.gyro_rearm_pending {
                self.gyro_rearm_pending = false;
                delay.delay_ms(self.config.gyro_arm_delay_ms).await;
            }
        }

        self.platform.disable_irq();
        let result = self.apply_channel_enable(channel, enable, delay).await;
        self.platform.enable_irq();

        if let Err(err) = result {
            warn!("channel enable failed: {:?}", err);
        }
        result
    }

    /// Reprograms the batching rate of `channel` alone, interrupt line masked.
    pub async fn update_batching(&mut self, channel: SensorId, enable: bool) -> Result<(), Error> {
        self.platform.disable_irq();
        let result = self.set_batching(channel, enable).await;
        self.platform.enable_irq();
        result
    }

    async fn apply_channel_enable<D: DelayNs>(
        &mut self,
        channel: SensorId,
        enable: bool,
        delay: &mut D,
    ) -> Result<(), Error> {
        if channel.is_shuttle() {
            self.platform.shuttle_enable(channel, enable).await?;
            self.channels[channel.index()].enabled = enable;
        } else {
            self.set_sensor_enabled(channel, enable).await?;
            if enable {
                delay.delay_ms(self.config.settle_delay_ms).await;
            }
            self.set_batching(channel, enable).await?;
        }

        // Temperature records are only batched alongside a primary sensor.
        let primary_enabled = SensorId::ALL
            .iter()
            .any(|id| id.is_primary() && self.channels[id.index()].enabled);
        if channel == SensorId::Temp && !primary_enabled {
            let bits = if enable {
                self.channels[channel.index()]
                    .odr
                    .and_then(|odr| odr.batch_bits(SensorId::Accel))
                    .ok_or(Error::InvalidData)?
            } else {
                0
            };
            self.write_field(Register::FifoCtrl3, fifo_ctrl3::BDR_XL_MASK, bits)
                .await?;
        }

        let request = self.channels[channel.index()].watermark_request;
        self.compute_watermark(request, channel).await?;

        if enable && self.mode == FifoMode::Bypass {
            self.reset_timestamp().await?;
            self.set_mode(FifoMode::Continuous).await?;
        } else if !self.any_enabled() {
            self.set_mode(FifoMode::Bypass).await?;
        }
        Ok(())
    }

    /// Programs the output data rate (0 powers the sensor down) and records
    /// the enable state.
    async fn set_sensor_enabled(&mut self, channel: SensorId, enable: bool) -> Result<(), Error> {
        if let Some((reg, mask)) = channel.odr_field() {
            let bits = if enable {
                self.channels[channel.index()]
                    .odr
                    .and_then(|odr| odr.odr_bits(channel))
                    .ok_or(Error::InvalidData)?
            } else {
                0
            };
            self.write_field(reg, mask, bits).await?;
        }
        self.channels[channel.index()].enabled = enable;
        debug!("channel {:?} enabled {}", channel, enable);
        Ok(())
    }

    async fn set_batching(&mut self, channel: SensorId, enable: bool) -> Result<(), Error> {
        let Some((reg, mask)) = channel.batching_field() else {
            return Err(Error::Unsupported);
        };
        let bits = if enable {
            self.channels[channel.index()]
                .odr
                .and_then(|odr| odr.batch_bits(channel))
                .ok_or(Error::InvalidData)?
        } else {
            0
        };
        self.write_field(reg, mask, bits).await
    }
}
