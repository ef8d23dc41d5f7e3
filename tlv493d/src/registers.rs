use bitflags::bitflags;

macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl NamedRegister for $enum_name {
            fn name(&self) -> &'static str {
                self.name()
            }
        }
    };
}

pub trait NamedRegister: Register {
    fn name(&self) -> &'static str;
}

/// The TLV493D has no register pointer: reads always start at register 0
/// and writes at register 0, so `addr` is the byte offset in the burst.
pub trait Register: Copy {
    fn addr(self) -> u8;
}

registers! {
    ReadReg, READ_REGS {
        Bx = 0x00,
        By = 0x01,
        Bz = 0x02,
        Temp = 0x03,
        Bx2 = 0x04,
        Bz2 = 0x05,
        Temp2 = 0x06,
        FactSet1 = 0x07,
        FactSet2 = 0x08,
        FactSet3 = 0x09,
    }
}

registers! {
    WriteReg, WRITE_REGS {
        Res1 = 0x00,
        Mod1 = 0x01,
        Res2 = 0x02,
        Mod2 = 0x03,
    }
}

/// Full read-out, registers 0x00..=0x09.
pub const READ_LEN: usize = READ_REGS.len();
/// Measurement read-out, registers 0x00..=0x05.
pub const MEASUREMENT_LEN: usize = 6;
pub const WRITE_LEN: usize = WRITE_REGS.len();

/* TEMP (0x03)
 * B7   B6   B5   B4   B3   B2   B1   B0
 * T11  T10  T9   T8   FRM1 FRM0 CH1  CH0
*/
pub const TEMP_HIGH_MASK: u8 = 0b1111_0000;
pub const FRAME_LOC: u8 = 2;
pub const FRAME_MASK: u8 = 0b0000_1100;
/// Non-zero while a conversion is running.
pub const CHANNEL_MASK: u8 = 0b0000_0011;

/* BX2 (0x04)
 * B7   B6   B5   B4   B3   B2   B1   B0
 * X3   X2   X1   X0   Y3   Y2   Y1   Y0
*/
pub const BX2_X_LOC: u8 = 4;
pub const LOW_NIBBLE_MASK: u8 = 0b0000_1111;

/* MOD1 (write 0x01)
 * B7   B6   B5   B4   B3   B2   B1   B0
 * P    IICAddr   factory   INT  FAST LOW
 *
 * Bits 6:3 come from FACTSET1 (read 0x07) and must be written back unchanged.
*/
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mod1Flags: u8 {
        const LOW_POWER = 1 << 0;
        const FAST      = 1 << 1;
        const INT       = 1 << 2;
    }
}

pub const FACTSET1_MASK: u8 = 0b0111_1000;

/* MOD2 (write 0x03)
 * B7   B6   B5   B4   B3   B2   B1   B0
 * T    LP   PT   factory
 *
 * Bits 4:0 come from FACTSET3 (read 0x09); only the low nibble is carried over.
*/
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mod2Flags: u8 {
        const TEMP_DISABLE = 1 << 7;
        /// LP period 12 ms instead of 100 ms
        const LP_PERIOD    = 1 << 6;
        const PARITY_TEST  = 1 << 5;
    }
}

pub const FACTSET3_MASK: u8 = 0b0000_1111;
