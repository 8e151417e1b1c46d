#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::peripherals::I2C0;
use embassy_rp::{bind_interrupts, i2c};
use embassy_sht31_sensor::{
    Command, Config, DEFAULT_ADDRESS, I2C_FREQUENCY_HZ, SHT31Sensor, STATUS_SENTINEL,
    TemperatureUnit,
};
use embassy_time::{Duration, Timer};
use panic_probe as _;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    let sda = p.PIN_0;
    let scl = p.PIN_1;

    // Configure I2C
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY_HZ;
    let mut i2c = i2c::I2c::new_async(p.I2C0, scl, sda, Irqs, config);

    // Create sensor instance
    let mut sensor = SHT31Sensor::new(&mut i2c, DEFAULT_ADDRESS);
    sensor.set_defaults(Config {
        use_crc: true,
        unit: TemperatureUnit::Celsius,
        ..Config::default()
    });

    // embassy-rp does not put empty writes on the bus, so a status read is
    // used to check that the sensor answers.
    if sensor.read_status().await.is_err() || sensor.begin().await.is_err() {
        error!("SHT31 not found, errors: {:#x}", sensor.last_error().bits());
        loop {
            Timer::after(Duration::from_secs(1)).await;
        }
    }

    let status = sensor.read_status_word().await;
    if status != STATUS_SENTINEL {
        info!("Status: {:#x}", status);
    }
    if sensor.clear_status().await.is_err() {
        error!("Could not clear status");
    }

    // Read sensor data
    loop {
        if sensor.read_status().await.is_ok() {
            match sensor.single_shot(Command::SingleShotLow).await {
                Ok(data) => {
                    info!("Temperature: {}°C, Humidity: {}%", data.temperature, data.humidity);
                }
                Err(e) => error!("Measurement failed: {:?}", e),
            }
        }

        let errors = sensor.last_error();
        if !errors.is_empty() {
            error!("Error mask: {:#x}", errors.bits());
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
