use bitflags::bitflags;

/// One decoded frame: raw 12-bit values sign-extended to 16 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub t: i16,
}

impl Sample {
    pub const fn new(x: i16, y: i16, z: i16, t: i16) -> Self {
        Self { x, y, z, t }
    }
}

bitflags! {
    /// Error bits accumulated over the lifetime of a session.
    ///
    /// Bits are only ever set. To detect new failures keep a copy and compare.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ErrorFlags: u8 {
        /// A read caught the sensor mid-conversion.
        const CONVERSION_IN_PROGRESS = 1 << 0;
        /// The bus transport reported a failure.
        const BUS                    = 1 << 1;
    }
}
