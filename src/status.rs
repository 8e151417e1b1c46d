/// Value returned by [`crate::SHT31Sensor::read_status_word`] when the status
/// register could not be read.
pub const STATUS_SENTINEL: u16 = 0xFFFF;

/// SHT3x status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u16);

impl Status {
    const ALERT_PENDING: u16 = 1 << 15;
    const HEATER_ON: u16 = 1 << 13;
    const HUMIDITY_ALERT: u16 = 1 << 11;
    const TEMPERATURE_ALERT: u16 = 1 << 10;
    const RESET_DETECTED: u16 = 1 << 4;
    const COMMAND_FAILED: u16 = 1 << 1;
    const WRITE_CHECKSUM_FAILED: u16 = 1 << 0;

    pub const fn from_bits(bits: u16) -> Self {
        Status(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    const fn is_set(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    /// At least one tracking alert is pending.
    pub const fn alert_pending(self) -> bool {
        self.is_set(Self::ALERT_PENDING)
    }

    pub const fn heater_on(self) -> bool {
        self.is_set(Self::HEATER_ON)
    }

    pub const fn humidity_alert(self) -> bool {
        self.is_set(Self::HUMIDITY_ALERT)
    }

    pub const fn temperature_alert(self) -> bool {
        self.is_set(Self::TEMPERATURE_ALERT)
    }

    /// Set after power-up, hard reset or soft reset, until status is cleared.
    pub const fn reset_detected(self) -> bool {
        self.is_set(Self::RESET_DETECTED)
    }

    /// The last command was not processed.
    pub const fn command_failed(self) -> bool {
        self.is_set(Self::COMMAND_FAILED)
    }

    /// The checksum of the last write transfer was wrong.
    pub const fn write_checksum_failed(self) -> bool {
        self.is_set(Self::WRITE_CHECKSUM_FAILED)
    }
}

impl From<Status> for u16 {
    fn from(status: Status) -> u16 {
        status.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_up_status() {
        // Typical value right after power-up: alert pending and reset detected.
        let status = Status::from_bits(0x8010);
        assert!(status.alert_pending());
        assert!(status.reset_detected());
        assert!(!status.heater_on());
        assert!(!status.command_failed());
        assert!(!status.write_checksum_failed());
    }

    #[test]
    fn individual_flags() {
        assert!(Status::from_bits(0x2000).heater_on());
        assert!(Status::from_bits(0x0800).humidity_alert());
        assert!(Status::from_bits(0x0400).temperature_alert());
        assert!(Status::from_bits(0x0002).command_failed());
        assert!(Status::from_bits(0x0001).write_checksum_failed());
        assert_eq!(u16::from(Status::from_bits(0x1234)), 0x1234);
    }
}
