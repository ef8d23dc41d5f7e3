use bitflags::bitflags;

/* CONTROL REGISTER
 * B7   B6   B5   B4   B3   B2   B1   B0
 * SD7  SD6  SD5  SD4  SD3  SD2  SD1  SD0
 *
 * A set bit connects the upstream bus to downstream port n.
*/
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ChannelMask: u8 {
        const CH0 = 1 << 0;
        const CH1 = 1 << 1;
        const CH2 = 1 << 2;
        const CH3 = 1 << 3;
        const CH4 = 1 << 4;
        const CH5 = 1 << 5;
        const CH6 = 1 << 6;
        const CH7 = 1 << 7;
    }
}

impl ChannelMask {
    /// Mask with only port `channel` connected, or `None` for a port the
    /// device does not have.
    pub fn single(channel: u8) -> Option<Self> {
        if channel >= crate::CHANNEL_COUNT {
            return None;
        }
        Some(Self::from_bits_retain(1 << channel))
    }
}
