use embassy_time::{Instant, Timer};
use embedded_hal_async::i2c::{Error as _, ErrorKind, I2c};

use crate::command::Command;
use crate::crc::{self, GROUP_LEN};
use crate::status::{STATUS_SENTINEL, Status};
use crate::{Config, ErrorMask, SHT31Error, SHT31Response, relative_humidity};

const MEASUREMENT_LEN: usize = 2 * GROUP_LEN;

/// SHT31 driver bound to one device address.
///
/// Every operation returns a `Result`. Each failure is also OR-ed into a
/// sticky [`ErrorMask`] that only [`SHT31Sensor::last_error`] clears.
pub struct SHT31Sensor<'a, T: I2c> {
    i2c: &'a mut T,
    address: u8,
    config: Config,
    errors: ErrorMask,
    last_response: Option<SHT31Response>,
}

/// A triggered single shot measurement.
///
/// Returned by [`SHT31Sensor::start_single_shot`]; the result can be read
/// with [`SHT31Sensor::fetch`] once the conversion time has passed.
/// `fetch` consumes the token, so each trigger is read at most once.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conversion {
    command: Command,
    ready_at: Instant,
}

impl Conversion {
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn ready_at(&self) -> Instant {
        self.ready_at
    }

    pub fn is_ready(&self) -> bool {
        Instant::now() >= self.ready_at
    }
}

impl<'a, T: I2c> SHT31Sensor<'a, T> {
    pub fn new(i2c: &'a mut T, address: u8) -> Self {
        Self {
            i2c,
            address,
            config: Config::default(),
            errors: ErrorMask::NO_ERROR,
            last_response: None,
        }
    }

    /// Releases the bus.
    pub fn free(self) -> &'a mut T {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn set_defaults(&mut self, config: Config) {
        debug!("SHT31 config: {:?}", config);
        self.config = config;
    }

    /// Most recent successful measurement.
    pub fn last_response(&self) -> Option<SHT31Response> {
        self.last_response
    }

    /// Returns every failure flag recorded since the previous call and clears
    /// them.
    pub fn last_error(&mut self) -> ErrorMask {
        self.errors.drain()
    }

    /// Addresses the sensor with an empty write.
    ///
    /// The bus HAL must put address-only writes on the wire. Some do not
    /// (embassy-rp returns `Ok` for an empty write without a START), in which
    /// case this always succeeds; use [`SHT31Sensor::read_status`] to check
    /// for the sensor on such buses.
    pub async fn probe(&mut self) -> Result<(), SHT31Error> {
        match self.i2c.write(self.address, &[]).await {
            Ok(_) => Ok(()),
            Err(_) => Err(self.record(SHT31Error::EndTransmission)),
        }
    }

    pub async fn is_connected(&mut self) -> bool {
        self.probe().await.is_ok()
    }

    /// Brings the sensor to a known state with a general call reset.
    /// The bus itself must already run at [`crate::I2C_FREQUENCY_HZ`].
    pub async fn begin(&mut self) -> Result<(), SHT31Error> {
        info!("SHT31 begin at address {:#x}", self.address);
        self.reset(Command::GeneralCallReset).await
    }

    /// Sends `command`, which must be [`Command::SoftReset`] or
    /// [`Command::GeneralCallReset`].
    pub async fn reset(&mut self, command: Command) -> Result<(), SHT31Error> {
        if !command.is_reset() {
            return Err(self.record(SHT31Error::WrongCommand));
        }
        info!("SHT31 reset: {:?}", command);
        // Only the repeated frame is checked; it confirms the bus is idle again.
        if self.i2c.write(self.address, &command.encode()).await.is_err() {
            debug!("SHT31 reset: first frame not acknowledged");
        }
        self.write_command(command).await
    }

    /// [`SHT31Sensor::reset`] for a raw opcode. Unknown opcodes are rejected
    /// with [`SHT31Error::WrongCommand`] before any bus traffic.
    pub async fn reset_raw(&mut self, opcode: u16) -> Result<(), SHT31Error> {
        let command = self.command_from(opcode)?;
        self.reset(command).await
    }

    /// Polling read: checks connectivity, then runs a single shot with the
    /// configured repeatability. On failure the previous reading is kept.
    pub async fn read(&mut self) -> Result<SHT31Response, SHT31Error> {
        self.probe().await?;
        self.single_shot(self.config.repeatability.single_shot_command())
            .await
    }

    /// Triggers a non-stretching single shot and waits for its result.
    /// The call does not return before the conversion time has passed.
    pub async fn single_shot(&mut self, command: Command) -> Result<SHT31Response, SHT31Error> {
        let conversion = self.start_single_shot(command).await?;
        self.fetch(conversion).await
    }

    /// [`SHT31Sensor::single_shot`] for a raw opcode.
    pub async fn single_shot_raw(&mut self, opcode: u16) -> Result<SHT31Response, SHT31Error> {
        let command = self.command_from(opcode)?;
        self.single_shot(command).await
    }

    /// Triggers a non-stretching single shot without waiting.
    pub async fn start_single_shot(&mut self, command: Command) -> Result<Conversion, SHT31Error> {
        let Some(repeatability) = command.single_shot_repeatability() else {
            return Err(self.record(SHT31Error::WrongCommand));
        };
        self.write_command(command).await?;
        let conversion = Conversion {
            command,
            ready_at: Instant::now() + repeatability.conversion_time(),
        };
        debug!("SHT31 conversion started: {:?}", repeatability);
        Ok(conversion)
    }

    /// Waits until `conversion` is done, then reads and converts it.
    pub async fn fetch(&mut self, conversion: Conversion) -> Result<SHT31Response, SHT31Error> {
        Timer::at(conversion.ready_at).await;

        let frame: [u8; MEASUREMENT_LEN] = self.read_bytes().await?;
        let temperature = [frame[0], frame[1], frame[2]];
        let humidity = [frame[3], frame[4], frame[5]];

        if self.config.use_crc && !(crc::verify_group(&temperature) && crc::verify_group(&humidity)) {
            return Err(self.record(SHT31Error::CrcCheck));
        }

        let unit = self.config.unit;
        let response = SHT31Response {
            temperature: unit.convert(crc::group_word(&temperature)),
            humidity: relative_humidity(crc::group_word(&humidity)),
            unit,
        };
        info!(
            "SHT31 temperature: {}, humidity: {}%",
            response.temperature, response.humidity
        );
        self.last_response = Some(response);
        Ok(response)
    }

    /// Reads the status register. Its checksum is verified regardless of
    /// [`Config::use_crc`].
    pub async fn read_status(&mut self) -> Result<Status, SHT31Error> {
        self.write_command(Command::ReadStatus).await?;
        let group: [u8; GROUP_LEN] = self.read_bytes().await?;
        if !crc::verify_group(&group) {
            return Err(self.record(SHT31Error::CrcCheck));
        }
        let status = Status::from_bits(crc::group_word(&group));
        debug!("SHT31 status: {:#x}", status.bits());
        Ok(status)
    }

    /// Status word, or [`STATUS_SENTINEL`] if it could not be read.
    pub async fn read_status_word(&mut self) -> u16 {
        self.read_status().await.map_or(STATUS_SENTINEL, Status::bits)
    }

    pub async fn clear_status(&mut self) -> Result<(), SHT31Error> {
        self.write_command(Command::ClearStatus).await
    }

    pub async fn set_heater(&mut self, on: bool) -> Result<(), SHT31Error> {
        let command = if on { Command::HeaterOn } else { Command::HeaterOff };
        self.write_command(command).await
    }

    async fn write_command(&mut self, command: Command) -> Result<(), SHT31Error> {
        trace!("SHT31 write {:#x}", command.opcode());
        match self.i2c.write(self.address, &command.encode()).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let error = match e.kind() {
                    ErrorKind::Overrun => SHT31Error::WriteLen,
                    _ => SHT31Error::EndTransmission,
                };
                Err(self.record(error))
            }
        }
    }

    async fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], SHT31Error> {
        let mut buf = [0u8; N];
        match self.i2c.read(self.address, &mut buf).await {
            Ok(_) => Ok(buf),
            Err(_) => Err(self.record(SHT31Error::RequestLen)),
        }
    }

    fn command_from(&mut self, opcode: u16) -> Result<Command, SHT31Error> {
        Command::try_from(opcode).map_err(|e| self.record(e))
    }

    fn record(&mut self, error: SHT31Error) -> SHT31Error {
        warn!("SHT31 error: {:?}", error);
        self.errors.record(error.mask());
        error
    }
}
