//! A line source reading from a serial port.

use std::time::Duration;

use log::info;
use serialport::{FlowControl, SerialPort};

use super::Lines;

/// How long a single read waits for data before it is retried.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Configuration for [`open`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The serial device, e.g. `/dev/ttyUSB0` or `COM3`.
    pub address: String,

    /// The baud rate the sensor firmware writes at.
    pub baud_rate: u32,
}

/// Open the serial port described by `config` and read lines from it.
///
/// The port is opened once. If it is later lost, the returned source ends (see
/// [`LineSource`](super::LineSource)) and a new one has to be opened by the caller.
///
/// # Errors
///
/// Propagates any `serialport::Error` that occurs when opening the port.
pub fn open(config: &Config) -> serialport::Result<Lines<Box<dyn SerialPort>>> {
    let port = serialport::new(&config.address, config.baud_rate)
        .timeout(READ_TIMEOUT)
        .flow_control(FlowControl::None)
        .open()?;

    println!("Serial connection established.");
    info!(
        "Opened serial port {} at {} baud",
        config.address, config.baud_rate
    );

    Ok(Lines::new(port))
}
