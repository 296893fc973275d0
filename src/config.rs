//! The configuration file read at startup.
//!
//! The file is YAML with flat keys, e.g.:
//!
//! ```yaml
//! serial_address: /dev/ttyUSB0
//! baud_rate: 9600
//! serial_log_filename: serial.log
//! influxdb_host: localhost
//! influxdb_port: 8086
//! influxdb_user: logger
//! influxdb_passwd: secret
//! influxdb_dbname: sensors
//! location: bedroom
//! ```
//!
//! Every key is required except `serial_log_filename` and `location`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::line_source::serial;
use crate::metric_sink::{influxdb, Series, DEFAULT_LOCATION};

/// The contents of the configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// The serial device the sensor is attached to.
    pub serial_address: String,

    /// The serial baud rate.
    pub baud_rate: u32,

    /// A file to append every line read from the sensor to.
    #[serde(default)]
    pub serial_log_filename: Option<PathBuf>,

    /// The `InfluxDB` host.
    pub influxdb_host: String,

    /// The `InfluxDB` HTTP port.
    pub influxdb_port: u16,

    /// The `InfluxDB` user.
    pub influxdb_user: String,

    /// The `InfluxDB` password.
    pub influxdb_passwd: String,

    /// The `InfluxDB` database to write to.
    pub influxdb_dbname: String,

    /// The `location` tag attached to every point.
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

/// Possible error situations when loading the configuration file.
#[derive(Debug)]
pub enum Error {
    /// The file could not be read (e.g. it doesn't exist, or permission denied).
    Read {
        /// The path that was read.
        path: PathBuf,

        /// The underlying error.
        source: io::Error,
    },

    /// The file is not valid YAML, or is missing a required key.
    Parse {
        /// The path that was read.
        path: PathBuf,

        /// The underlying error.
        source: serde_yaml::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Error reading {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "Error parsing {} file: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Load the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// - If the file can't be read, an [`Error::Read`] is returned.
    /// - If the file can't be parsed, or a required key is missing, an [`Error::Parse`] is
    ///   returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The settings for the serial line source.
    #[must_use]
    pub fn serial(&self) -> serial::Config {
        serial::Config {
            address: self.serial_address.clone(),
            baud_rate: self.baud_rate,
        }
    }

    /// The settings for the `InfluxDB` emitter.
    #[must_use]
    pub fn influxdb(&self) -> influxdb::Config {
        influxdb::Config {
            host: self.influxdb_host.clone(),
            port: self.influxdb_port,
            user: self.influxdb_user.clone(),
            password: self.influxdb_passwd.clone(),
            database: self.influxdb_dbname.clone(),
        }
    }

    /// The series every point is written to.
    #[must_use]
    pub fn series(&self) -> Series {
        Series::new(self.location.clone())
    }
}
