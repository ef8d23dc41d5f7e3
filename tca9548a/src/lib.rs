#![no_std]

//! Driver for the TCA9548A 1-to-8 I2C multiplexer.
//!
//! The multiplexer has a single control register and no register pointer: a
//! one-byte write sets the port mask, a one-byte read returns it.
//!
//! `Tca9548a` does not own the bus. It is a small capability value that a
//! device driver keeps next to its own bus handle and uses to route the bus
//! before every transaction. Nothing here serialises access: when several
//! drivers share one multiplexer from different execution contexts, the
//! caller must hold the bus across the select and the transaction that
//! follows it, otherwise another context may switch the port in between.

pub mod registers;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{debug, trace};

pub use registers::ChannelMask;

pub const DEFAULT_ADDRESS: u8 = 0x70;

/// Number of downstream ports.
pub const CHANNEL_COUNT: u8 = 8;

/// Time the switch needs after a port change before the downstream line is usable.
pub const SETTLE_TIME_US: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    I2c(E),
    InvalidChannel(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tca9548a {
    address: SevenBitAddress,
}

impl Default for Tca9548a {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl Tca9548a {
    pub fn new(address: SevenBitAddress) -> Self {
        Self { address }
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Connects downstream port `channel` (0..=7) and waits for the switch to settle.
    ///
    /// An out of range channel fails before anything is put on the bus. The
    /// port change is not read back, so a missing multiplexer only shows up
    /// as a failure of the next transaction on the downstream device.
    pub fn select<I2C, D>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        channel: u8,
    ) -> Result<(), Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        let mask = ChannelMask::single(channel).ok_or(Error::InvalidChannel(channel))?;
        trace!("tca9548a {:#04x}: select channel {}", self.address, channel);
        self.select_mask(i2c, delay, mask)
    }

    /// Writes an arbitrary port mask. Several ports may be connected at once.
    pub fn select_mask<I2C, D>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        mask: ChannelMask,
    ) -> Result<(), Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        i2c.write(self.address, &[mask.bits()]).map_err(Error::I2c)?;
        delay.delay_us(SETTLE_TIME_US);
        Ok(())
    }

    /// Disconnects every downstream port.
    pub fn disable_all<I2C, D>(&self, i2c: &mut I2C, delay: &mut D) -> Result<(), Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        debug!("tca9548a {:#04x}: disable all channels", self.address);
        self.select_mask(i2c, delay, ChannelMask::empty())
    }

    /// Reads the control register back.
    pub fn selected<I2C: I2c>(&self, i2c: &mut I2C) -> Result<ChannelMask, Error<I2C::Error>> {
        let mut buf = [0u8];
        i2c.read(self.address, &mut buf).map_err(Error::I2c)?;
        Ok(ChannelMask::from_bits_retain(buf[0]))
    }
}
