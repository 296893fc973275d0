//! An [`Emitter`](super::Emitter) that writes to an `InfluxDB` 1.x server over HTTP.
//!
//! Each point is sent as a single [line protocol] record to the `/write` endpoint, with second
//! precision timestamps. Nothing is buffered: a failed write is reported to the caller and the
//! point is gone.
//!
//! [line protocol]: https://docs.influxdata.com/influxdb/v1/write_protocols/line_protocol_reference/

use std::fmt::Write as _;

use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;

use super::{EmitError, FieldValue, MetricPoint};

/// Connection details for [`InfluxDb::open`].
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The server's host name or address.
    pub host: String,

    /// The server's HTTP port.
    pub port: u16,

    /// The user to authenticate as.
    pub user: String,

    /// The password for `user`.
    pub password: String,

    /// The database points are written to.
    pub database: String,
}

/// Possible error situations when setting up an [`InfluxDb`] emitter.
#[derive(Debug)]
pub enum OpenError {
    /// The configured host and port don't form a valid URL.
    Url(String),

    /// The HTTP client could not be constructed.
    Client(reqwest::Error),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Url(message) => write!(f, "invalid InfluxDB address: {}", message),
            Self::Client(error) => write!(f, "unable to create InfluxDB client: {}", error),
        }
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Url(_) => None,
            Self::Client(error) => Some(error),
        }
    }
}

/// Writes [`MetricPoint`]s to an `InfluxDB` database.
#[derive(Debug)]
pub struct InfluxDb {
    client: Client,
    write_url: Url,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl InfluxDb {
    /// Prepare an emitter for the server described by `config`.
    ///
    /// No connection is made until the first point is emitted.
    ///
    /// # Errors
    ///
    /// Returns an [`OpenError`] if the address is invalid or the HTTP client can't be built.
    pub fn open(config: &Config) -> Result<Self, OpenError> {
        let client = Client::builder().build().map_err(OpenError::Client)?;
        Self::with_client(config, client)
    }

    fn with_client(config: &Config, client: Client) -> Result<Self, OpenError> {
        // IPv6 literals have to be bracketed in a URL.
        let host = if config.host.contains(':') && !config.host.starts_with('[') {
            format!("[{}]", config.host)
        } else {
            config.host.clone()
        };
        let write_url = Url::parse_with_params(
            &format!("http://{}:{}/write", host, config.port),
            &[
                ("db", config.database.as_str()),
                ("u", config.user.as_str()),
                ("p", config.password.as_str()),
                ("precision", "s"),
            ],
        )
        .map_err(|error| OpenError::Url(error.to_string()))?;

        Ok(Self { client, write_url })
    }
}

impl super::Emitter for InfluxDb {
    fn emit(&mut self, point: &MetricPoint) -> Result<(), EmitError> {
        let body = line_protocol(point);
        debug!("Writing point: {}", body);

        let response = self.client.post(self.write_url.clone()).body(body).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text()?;
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error_body) => error_body.error,
            Err(_) => body.trim().to_string(),
        };
        Err(EmitError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Encode `point` as a single line protocol record (without a trailing newline).
#[must_use]
pub fn line_protocol(point: &MetricPoint) -> String {
    let mut line = escape(&point.measurement, &[',', ' ']);

    for (key, value) in &point.tags {
        line.push(',');
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        line.push_str(&escape(value, &[',', '=', ' ']));
    }

    for (index, (key, value)) in point.fields.iter().enumerate() {
        line.push(if index == 0 { ' ' } else { ',' });
        line.push_str(&escape(key, &[',', '=', ' ']));
        line.push('=');
        // `unwrap` is OK since writing to a `String` can't fail.
        match value {
            FieldValue::Integer(value) => write!(line, "{}i", value).unwrap(),
            FieldValue::Float(value) => write!(line, "{}", value).unwrap(),
        }
    }

    write!(line, " {}", point.timestamp.timestamp()).unwrap();
    line
}

fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
