#![no_std]

//! Driver for the Infineon TLV493D 3D magnetic sensor, optionally behind a
//! TCA9548A I2C multiplexer.
//!
//! The sensor has no register pointer. Every read returns registers from
//! 0x00 upwards and every write fills the mode registers from 0x00 upwards.
//! Its configuration registers also carry factory trim that has to be read
//! out and written back untouched, so the sensor must be started with
//! [`Tlv493d::start`] before it is read.
//!
//! ```ignore
//! let mut mag = Tlv493d::new(i2c);
//! mag.start(ADDRESS_SDA_HIGH, Some(2), &mut delay)?;
//! if mag.read(&mut delay).is_ok() {
//!     let bx = mag.field_x();
//! }
//! ```
//!
//! A session holds no lock on the multiplexer. Sessions sharing a bus from
//! several execution contexts must serialise whole `read`/`start` calls.

pub mod codec;
pub mod configs;
pub mod registers;
pub mod types;
pub mod units;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{debug, trace, warn};
use tca9548a::Tca9548a;

use configs::Profile;
use registers::*;

pub use configs::PowerMode;
pub use types::{ErrorFlags, Sample};

/// Trait alias to support both I2c<SevenBitAddress> and I2c without address mode.
pub trait CompatibleI2c<E>: I2c<Error = E> {}
impl<T, E> CompatibleI2c<E> for T where T: I2c<Error = E> {}

/// Address with SDA high at power-up.
pub const ADDRESS_SDA_HIGH: u8 = 0x1F;
/// Address with SDA low at power-up.
pub const ADDRESS_SDA_LOW: u8 = 0x5E;

/// Wait after writing the mode registers.
pub const CONFIG_SETTLE_US: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    I2c(E),
    /// Multiplexer channel outside 0..=7.
    InvalidChannel(u8),
    /// The frame was sampled while the sensor was still converting.
    ConversionInProgress,
    /// No `start` has read the factory trim yet.
    NotStarted,
}

impl<E> From<tca9548a::Error<E>> for Error<E> {
    fn from(e: tca9548a::Error<E>) -> Self {
        match e {
            tca9548a::Error::I2c(e) => Error::I2c(e),
            tca9548a::Error::InvalidChannel(ch) => Error::InvalidChannel(ch),
        }
    }
}

pub struct Tlv493d<I2C, E> {
    i2c: I2C,
    address: SevenBitAddress,
    mux: Tca9548a,
    channel: Option<u8>,
    rbuffer: [u8; READ_LEN],
    wbuffer: [u8; WRITE_LEN],
    factory: Option<Profile>,
    errors: ErrorFlags,
    data: Sample,
    _error: core::marker::PhantomData<E>,
}

impl<I2C, E> Tlv493d<I2C, E> {
    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }
}

impl<I2C, E> Tlv493d<I2C, E>
where
    I2C: CompatibleI2c<E>,
    E: core::fmt::Debug,
{
    /// An idle session: address 0, no channel, zeroed buffers. Nothing is
    /// configured until [`Tlv493d::start`] has read the factory trim.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            mux: Tca9548a::default(),
            channel: None,
            rbuffer: [0; READ_LEN],
            wbuffer: [0; WRITE_LEN],
            factory: None,
            errors: ErrorFlags::empty(),
            data: Sample::default(),
            _error: core::marker::PhantomData,
        }
    }

    /// Routes through a multiplexer at a non-default address.
    pub fn with_multiplexer(mut self, mux: Tca9548a) -> Self {
        self.mux = mux;
        self
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Multiplexer port of this sensor, `None` when it sits directly on the bus.
    pub fn channel(&self) -> Option<u8> {
        self.channel
    }

    pub fn error_flags(&self) -> ErrorFlags {
        self.errors
    }

    /// Sample from the last successful read.
    pub fn sample(&self) -> Sample {
        self.data
    }

    /// Mode register image last written to the sensor.
    pub fn write_registers(&self) -> [u8; WRITE_LEN] {
        self.wbuffer
    }

    /// Register image from the last reads. Bytes 6..=9 are only refreshed by `start`.
    pub fn read_registers(&self) -> [u8; READ_LEN] {
        self.rbuffer
    }

    /// Starts the sensor in low power mode. See [`Tlv493d::start_in_mode`].
    pub fn start<D: DelayNs>(
        &mut self,
        address: SevenBitAddress,
        channel: Option<u8>,
        delay: &mut D,
    ) -> Result<[u8; WRITE_LEN], Error<E>> {
        self.start_in_mode(address, channel, PowerMode::default(), delay)
    }

    /// Reads all ten registers, carries the factory trim over into the mode
    /// registers, overlays the `mode` bits and writes the four mode bytes
    /// back in one transaction. Returns the bytes that were written.
    pub fn start_in_mode<D: DelayNs>(
        &mut self,
        address: SevenBitAddress,
        channel: Option<u8>,
        mode: PowerMode,
        delay: &mut D,
    ) -> Result<[u8; WRITE_LEN], Error<E>> {
        self.address = address;
        self.channel = channel;
        self.factory = None;
        debug!("tlv493d {:#04x}: start on channel {:?} in {:?}", address, channel, mode);

        self.route(delay)?;
        let mut buf = [0u8; READ_LEN];
        self.i2c.read(self.address, &mut buf).map_err(|e| self.bus_error(e))?;
        self.rbuffer = buf;
        let factory = configs::factory_bits(&self.rbuffer);
        self.factory = Some(factory);

        self.write_mode(factory, mode, delay)?;
        Ok(self.wbuffer)
    }

    /// Switches power mode, keeping the factory trim captured by `start`.
    ///
    /// Fails with [`Error::NotStarted`] before a `start` has read the trim,
    /// without touching the bus.
    pub fn set_power_mode<D: DelayNs>(
        &mut self,
        mode: PowerMode,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        let factory = self.factory.ok_or(Error::NotStarted)?;
        self.route(delay)?;
        self.write_mode(factory, mode, delay)
    }

    fn write_mode<D: DelayNs>(
        &mut self,
        factory: Profile,
        mode: PowerMode,
        delay: &mut D,
    ) -> Result<(), Error<E>> {
        self.wbuffer = configs::apply_profile(factory, mode);
        for reg in WRITE_REGS {
            let v = self.wbuffer[reg.addr() as usize];
            debug!("write_reg {:<5}({:#04X}) = {:#010b}", reg.name(), reg.addr(), v);
        }
        let wbuffer = self.wbuffer;
        self.i2c.write(self.address, &wbuffer).map_err(|e| self.bus_error(e))?;
        delay.delay_us(CONFIG_SETTLE_US);
        Ok(())
    }

    /// Fetches a new frame and updates the cached sample.
    ///
    /// A frame caught mid-conversion is rejected with
    /// [`Error::ConversionInProgress`] and the previous sample is kept.
    pub fn read<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        self.route(delay)?;
        let mut buf = [0u8; MEASUREMENT_LEN];
        self.i2c.read(self.address, &mut buf).map_err(|e| self.bus_error(e))?;
        self.rbuffer[..MEASUREMENT_LEN].copy_from_slice(&buf);
        trace!("tlv493d {:#04x}: {:02x?}", self.address, buf);

        let temp = self.rbuffer[ReadReg::Temp as usize];
        if codec::conversion_in_progress(temp) {
            let ch = codec::channel_bits(temp);
            warn!("tlv493d {:#04x}: conversion in progress (ch={})", self.address, ch);
            self.errors |= ErrorFlags::CONVERSION_IN_PROGRESS;
            return Err(Error::ConversionInProgress);
        }

        let r = &self.rbuffer;
        self.data = Sample::new(
            codec::decode_x(r[ReadReg::Bx as usize], r[ReadReg::Bx2 as usize]),
            codec::decode_y(r[ReadReg::By as usize], r[ReadReg::Bx2 as usize]),
            codec::decode_z(r[ReadReg::Bz as usize], r[ReadReg::Bz2 as usize]),
            codec::decode_t(r[ReadReg::Temp as usize], r[ReadReg::Temp2 as usize]),
        );
        Ok(())
    }

    /// Runs [`Tlv493d::read`] and returns the cached sample whatever the
    /// outcome. Check [`Tlv493d::error_flags`] to tell a fresh sample from a stale one.
    pub fn read_data<D: DelayNs>(&mut self, delay: &mut D) -> Sample {
        if let Err(e) = self.read(delay) {
            trace!("tlv493d {:#04x}: read_data keeps previous sample: {:?}", self.address, e);
        }
        self.data
    }

    /// Frame counter of the last frame read.
    pub fn frame_counter(&self) -> u8 {
        codec::frame_counter(self.rbuffer[ReadReg::Temp as usize])
    }

    pub fn temperature(&self) -> f64 {
        units::temperature(&self.data)
    }

    pub fn temperature_raw(&self) -> i16 {
        self.data.t
    }

    pub fn field_x(&self) -> f64 {
        units::field(self.data.x)
    }

    pub fn field_x_raw(&self) -> i16 {
        self.data.x
    }

    pub fn field_y(&self) -> f64 {
        units::field(self.data.y)
    }

    pub fn field_y_raw(&self) -> i16 {
        self.data.y
    }

    pub fn field_z(&self) -> f64 {
        units::field(self.data.z)
    }

    pub fn field_z_raw(&self) -> i16 {
        self.data.z
    }

    pub fn magnitude(&self) -> f64 {
        units::magnitude(&self.data)
    }

    pub fn angle_x(&self) -> f64 {
        units::angle_x(&self.data)
    }

    pub fn angle_y(&self) -> f64 {
        units::angle_y(&self.data)
    }

    pub fn angle_z(&self) -> f64 {
        units::angle_z(&self.data)
    }

    /// Logs the cached register image.
    pub fn dump_registers(&self) {
        for reg in READ_REGS {
            let v = self.rbuffer[reg.addr() as usize];
            debug!("{:<8}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", reg.name(), reg.addr(), v, v, v);
        }
        for reg in WRITE_REGS {
            let v = self.wbuffer[reg.addr() as usize];
            debug!("{:<8}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", reg.name(), reg.addr(), v, v, v);
        }
    }

    fn route<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        if let Some(channel) = self.channel {
            if let Err(e) = self.mux.select(&mut self.i2c, delay, channel) {
                if matches!(e, tca9548a::Error::I2c(_)) {
                    self.errors |= ErrorFlags::BUS;
                }
                return Err(e.into());
            }
        }
        Ok(())
    }

    fn bus_error(&mut self, e: E) -> Error<E> {
        warn!("tlv493d {:#04x}: bus error {:?}", self.address, e);
        self.errors |= ErrorFlags::BUS;
        Error::I2c(e)
    }
}
