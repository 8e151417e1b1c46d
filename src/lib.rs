#![cfg_attr(not(test), no_std)]

mod fmt;

mod command;
pub mod crc;
mod error;
#[cfg(test)]
mod mock_i2c;
mod sht31;
mod status;

pub use command::{Command, Repeatability};
pub use error::{ErrorMask, SHT31Error};
pub use sht31::{Conversion, SHT31Sensor};
pub use status::{STATUS_SENTINEL, Status};

/// Address with the ADDR pin tied low.
pub const DEFAULT_ADDRESS: u8 = 0x44;
/// Address with the ADDR pin tied high.
pub const ALTERNATE_ADDRESS: u8 = 0x45;
/// Standard mode bus clock to configure the I2C peripheral with.
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

const RAW_FULL_SCALE: f32 = 65535.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SHT31Response {
    pub humidity: f32,
    pub temperature: f32,
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Converts a raw temperature word to this unit.
    pub fn convert(self, raw: u16) -> f32 {
        match self {
            TemperatureUnit::Celsius => raw as f32 * (175.0 / RAW_FULL_SCALE) - 45.0,
            TemperatureUnit::Fahrenheit => raw as f32 * (315.0 / RAW_FULL_SCALE) - 49.0,
        }
    }
}

/// Converts a raw humidity word to percent relative humidity.
pub fn relative_humidity(raw: u16) -> f32 {
    raw as f32 * (100.0 / RAW_FULL_SCALE)
}

/// Driver settings applied with [`SHT31Sensor::set_defaults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Verify the CRC of measurement words. Status words are always verified.
    pub use_crc: bool,
    pub unit: TemperatureUnit,
    /// Repeatability used by [`SHT31Sensor::read`].
    pub repeatability: Repeatability,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_crc: true,
            unit: TemperatureUnit::Celsius,
            repeatability: Repeatability::Low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-3, "{actual} != {expected}");
    }

    #[test]
    fn celsius_endpoints() {
        assert_close(TemperatureUnit::Celsius.convert(0), -45.0);
        assert_close(TemperatureUnit::Celsius.convert(0xFFFF), 130.0);
        assert_close(TemperatureUnit::Celsius.convert(0x6666), 25.0);
    }

    #[test]
    fn fahrenheit_endpoints() {
        assert_close(TemperatureUnit::Fahrenheit.convert(0), -49.0);
        assert_close(TemperatureUnit::Fahrenheit.convert(0xFFFF), 266.0);
        assert_close(TemperatureUnit::Fahrenheit.convert(0x6666), 77.0);
    }

    #[test]
    fn humidity_endpoints() {
        assert_close(relative_humidity(0), 0.0);
        assert_close(relative_humidity(0xFFFF), 100.0);
        assert_close(relative_humidity(0x8000), 50.0);
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.use_crc);
        assert_eq!(config.unit, TemperatureUnit::Celsius);
        assert_eq!(config.repeatability, Repeatability::Low);
    }
}
