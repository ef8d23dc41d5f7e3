use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use tca9548a::{ChannelMask, Error, Tca9548a, DEFAULT_ADDRESS, SETTLE_TIME_US};

/// Accumulates requested delay time.
#[derive(Default)]
struct TotalDelay {
    ns: u64,
}

impl DelayNs for TotalDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }
}

#[test]
fn select_highest_channel_writes_top_bit() {
    let expectations = [I2cTransaction::write(DEFAULT_ADDRESS, vec![0b1000_0000])];
    let mut i2c = I2cMock::new(&expectations);
    let mut delay = TotalDelay::default();

    let mux = Tca9548a::default();
    assert!(mux.select(&mut i2c, &mut delay, 7).is_ok());
    assert_eq!(delay.ns, u64::from(SETTLE_TIME_US) * 1_000);

    i2c.done();
}

#[test]
fn select_out_of_range_touches_nothing() {
    let mut i2c = I2cMock::new(&[]);
    let mut delay = TotalDelay::default();

    let mux = Tca9548a::default();
    assert_eq!(mux.select(&mut i2c, &mut delay, 8), Err(Error::InvalidChannel(8)));
    assert_eq!(delay.ns, 0);

    i2c.done();
}

#[test]
fn select_each_channel() {
    let expectations: Vec<_> = (0..8u8)
        .map(|ch| I2cTransaction::write(0x74, vec![1 << ch]))
        .collect();
    let mut i2c = I2cMock::new(&expectations);

    let mux = Tca9548a::new(0x74);
    for ch in 0..8 {
        mux.select(&mut i2c, &mut NoopDelay::new(), ch).unwrap();
    }

    i2c.done();
}

#[test]
fn select_propagates_bus_error() {
    let expectations =
        [I2cTransaction::write(DEFAULT_ADDRESS, vec![0b0000_0100]).with_error(ErrorKind::Other)];
    let mut i2c = I2cMock::new(&expectations);
    let mut delay = TotalDelay::default();

    let mux = Tca9548a::default();
    assert_eq!(mux.select(&mut i2c, &mut delay, 2), Err(Error::I2c(ErrorKind::Other)));
    assert_eq!(delay.ns, 0);

    i2c.done();
}

#[test]
fn disable_all_and_read_back() {
    let expectations = [
        I2cTransaction::write(DEFAULT_ADDRESS, vec![0]),
        I2cTransaction::read(DEFAULT_ADDRESS, vec![0b0001_0010]),
    ];
    let mut i2c = I2cMock::new(&expectations);

    let mux = Tca9548a::default();
    mux.disable_all(&mut i2c, &mut NoopDelay::new()).unwrap();
    let mask = mux.selected(&mut i2c).unwrap();
    assert_eq!(mask, ChannelMask::CH1 | ChannelMask::CH4);

    i2c.done();
}
