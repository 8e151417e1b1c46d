use embassy_time::Duration;

use crate::SHT31Error;

/// SHT3x command opcodes.
///
/// Only the non-stretching single shot commands are ever sent for
/// measurements; the clock stretching variants are listed so that raw
/// opcodes can be recognised and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Command {
    SoftReset = 0x30A2,
    GeneralCallReset = 0x0006,

    SingleShotHigh = 0x2400,
    SingleShotMedium = 0x240B,
    SingleShotLow = 0x2416,

    SingleShotStretchHigh = 0x2C06,
    SingleShotStretchMedium = 0x2C0D,
    SingleShotStretchLow = 0x2C10,

    ReadStatus = 0xF32D,
    ClearStatus = 0x3041,

    HeaterOn = 0x306D,
    HeaterOff = 0x3066,
}

impl Command {
    const ALL: [Command; 12] = [
        Command::SoftReset,
        Command::GeneralCallReset,
        Command::SingleShotHigh,
        Command::SingleShotMedium,
        Command::SingleShotLow,
        Command::SingleShotStretchHigh,
        Command::SingleShotStretchMedium,
        Command::SingleShotStretchLow,
        Command::ReadStatus,
        Command::ClearStatus,
        Command::HeaterOn,
        Command::HeaterOff,
    ];

    pub const fn opcode(self) -> u16 {
        self as u16
    }

    /// Big-endian wire frame.
    pub const fn encode(self) -> [u8; 2] {
        self.opcode().to_be_bytes()
    }

    pub const fn is_reset(self) -> bool {
        matches!(self, Command::SoftReset | Command::GeneralCallReset)
    }

    /// Repeatability of a non-stretching single shot command, `None` for
    /// everything else.
    pub const fn single_shot_repeatability(self) -> Option<Repeatability> {
        match self {
            Command::SingleShotHigh => Some(Repeatability::High),
            Command::SingleShotMedium => Some(Repeatability::Medium),
            Command::SingleShotLow => Some(Repeatability::Low),
            _ => None,
        }
    }
}

impl From<Command> for u16 {
    fn from(command: Command) -> u16 {
        command.opcode()
    }
}

impl TryFrom<u16> for Command {
    type Error = SHT31Error;

    fn try_from(opcode: u16) -> Result<Self, Self::Error> {
        Command::ALL
            .into_iter()
            .find(|command| command.opcode() == opcode)
            .ok_or(SHT31Error::WrongCommand)
    }
}

/// Measurement repeatability. Higher repeatability means less noise and a
/// longer conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Repeatability {
    High,
    Medium,
    #[default]
    Low,
}

impl Repeatability {
    pub const fn single_shot_command(self) -> Command {
        match self {
            Repeatability::High => Command::SingleShotHigh,
            Repeatability::Medium => Command::SingleShotMedium,
            Repeatability::Low => Command::SingleShotLow,
        }
    }

    /// Wait between the trigger and the data read. Each value is above the
    /// datasheet's maximum measurement duration for that repeatability.
    pub const fn conversion_time(self) -> Duration {
        match self {
            Repeatability::High => Duration::from_millis(16),
            Repeatability::Medium => Duration::from_millis(7),
            Repeatability::Low => Duration::from_millis(5),
        }
    }
}
