use crate::registers::*;

/// Operating mode written to MOD1/MOD2 during start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerMode {
    UltraLowPower,
    #[default]
    LowPower,
    /// Not supported by this driver yet. Accepted, but configures the sensor
    /// exactly like `LowPower`.
    Fast,
    PowerDown,
}

pub type Profile = [u8; WRITE_LEN];

pub const PROFILE_ULTRA_LOW_POWER: Profile = [0, Mod1Flags::LOW_POWER.bits(), 0, 0];
pub const PROFILE_LOW_POWER: Profile =
    [0, Mod1Flags::LOW_POWER.bits(), 0, Mod2Flags::LP_PERIOD.bits()];
pub const PROFILE_POWER_DOWN: Profile = [0, Mod1Flags::LOW_POWER.bits(), 0, 0];

impl PowerMode {
    pub fn profile(self) -> &'static Profile {
        match self {
            PowerMode::UltraLowPower => &PROFILE_ULTRA_LOW_POWER,
            PowerMode::LowPower | PowerMode::Fast => &PROFILE_LOW_POWER,
            PowerMode::PowerDown => &PROFILE_POWER_DOWN,
        }
    }
}

/// Factory trim carried from the read registers into the write registers.
///
/// Res1 is not configurable and is always written as zero.
pub fn factory_bits(read: &[u8; READ_LEN]) -> Profile {
    [
        0,
        read[ReadReg::FactSet1 as usize] & FACTSET1_MASK,
        read[ReadReg::FactSet2 as usize],
        read[ReadReg::FactSet3 as usize] & FACTSET3_MASK,
    ]
}

/// ORs a mode profile over the factory bits.
pub fn apply_profile(factory: Profile, mode: PowerMode) -> Profile {
    let profile = mode.profile();
    let mut out = factory;
    for (byte, bits) in out.iter_mut().zip(profile.iter()) {
        *byte |= bits;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_power_profile_bits() {
        assert_eq!(PROFILE_LOW_POWER, [0, 0b0000_0001, 0, 0b0100_0000]);
        assert_eq!(PROFILE_ULTRA_LOW_POWER, [0, 0b0000_0001, 0, 0]);
    }

    #[test]
    fn test_fast_mode_matches_low_power() {
        assert_eq!(PowerMode::Fast.profile(), PowerMode::LowPower.profile());
        assert_eq!(PowerMode::default(), PowerMode::LowPower);
    }

    #[test]
    fn test_factory_bits_masked() {
        let mut read = [0xFFu8; READ_LEN];
        read[7] = 0b1111_1111;
        read[8] = 0b1010_1010;
        read[9] = 0b0000_1111;
        assert_eq!(factory_bits(&read), [0, 0b0111_1000, 0b1010_1010, 0b0000_1111]);
    }

    #[test]
    fn test_apply_low_power() {
        let factory = [0, 0b0111_1000, 0b1010_1010, 0b0000_1111];
        assert_eq!(
            apply_profile(factory, PowerMode::LowPower),
            [0, 0b0111_1001, 0b1010_1010, 0b0100_1111]
        );
    }

    #[test]
    fn test_profile_never_clears_factory_bits() {
        let factory = [0, FACTSET1_MASK, 0xFF, FACTSET3_MASK];
        let modes = [
            PowerMode::UltraLowPower,
            PowerMode::LowPower,
            PowerMode::Fast,
            PowerMode::PowerDown,
        ];
        for mode in modes {
            let out = apply_profile(factory, mode);
            assert_eq!(out[1] & FACTSET1_MASK, FACTSET1_MASK);
            assert_eq!(out[2], 0xFF);
            assert_eq!(out[3] & FACTSET3_MASK, FACTSET3_MASK);
        }
    }
}
