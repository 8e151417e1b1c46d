use core::ops::{BitOr, BitOrAssign};

/// Failures reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SHT31Error {
    /// The sensor did not acknowledge a write or probe.
    EndTransmission,
    /// The bus did not deliver the requested number of bytes.
    RequestLen,
    /// The bus accepted fewer bytes than the command frame.
    WriteLen,
    /// A response word failed its CRC.
    CrcCheck,
    /// The command is not valid for the requested operation.
    WrongCommand,
}

impl SHT31Error {
    /// Bit recorded in the sticky [`ErrorMask`] for this failure.
    pub const fn mask(self) -> ErrorMask {
        match self {
            SHT31Error::EndTransmission => ErrorMask::END_TRANSMISSION,
            SHT31Error::RequestLen => ErrorMask::REQUEST_LEN,
            SHT31Error::WriteLen => ErrorMask::WRITE_LEN,
            SHT31Error::CrcCheck => ErrorMask::CRC_CHECK,
            SHT31Error::WrongCommand => ErrorMask::WRONG_COMMAND,
        }
    }
}

/// Accumulated failure flags. Bits are only ever added; the mask is reset
/// by [`ErrorMask::drain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ErrorMask(u16);

impl ErrorMask {
    pub const NO_ERROR: ErrorMask = ErrorMask(0);
    pub const TRANSMISSION_LEN: ErrorMask = ErrorMask(0b0000_0000_0000_0001);
    pub const END_TRANSMISSION: ErrorMask = ErrorMask(0b0000_0000_0000_0010);
    pub const REQUEST_LEN: ErrorMask = ErrorMask(0b0000_0000_0000_0100);
    pub const WRITE_LEN: ErrorMask = ErrorMask(0b0000_0000_0000_1000);
    pub const WRONG_SENSOR_ID: ErrorMask = ErrorMask(0b0000_0000_0001_0000);
    pub const FM_TIMEOUT: ErrorMask = ErrorMask(0b0000_0000_0010_0000);
    pub const NOT_CONNECTED: ErrorMask = ErrorMask(0b0000_0000_0100_0000);
    pub const CRC_CHECK: ErrorMask = ErrorMask(0b0000_0000_1000_0000);
    pub const WRONG_COMMAND: ErrorMask = ErrorMask(0b0000_0001_0000_0000);

    pub const fn from_bits(bits: u16) -> Self {
        ErrorMask(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ErrorMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn record(&mut self, flags: ErrorMask) {
        self.0 |= flags.0;
    }

    /// Returns the accumulated flags and clears them.
    pub fn drain(&mut self) -> ErrorMask {
        core::mem::take(self)
    }
}

impl BitOr for ErrorMask {
    type Output = ErrorMask;

    fn bitor(self, rhs: ErrorMask) -> ErrorMask {
        ErrorMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for ErrorMask {
    fn bitor_assign(&mut self, rhs: ErrorMask) {
        self.record(rhs);
    }
}

impl From<SHT31Error> for ErrorMask {
    fn from(error: SHT31Error) -> ErrorMask {
        error.mask()
    }
}
