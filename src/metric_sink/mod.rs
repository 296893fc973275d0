// metric_sink/mod.rs

//! The interface for writing sensor readings to a time-series store.

pub mod influxdb;
#[cfg(test)]
pub(crate) mod memory;

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};

use crate::extract::Reading;
use crate::units::celsius_to_fahrenheit;

/// The measurement name every point is written under.
pub const MEASUREMENT: &str = "arduino-dht22";

/// The `location` tag value used when none is configured.
pub const DEFAULT_LOCATION: &str = "bedroom";

/// Tags used to identify a series.
///
/// For now this is just a type alias, matching what the store expects.
pub type Tags = BTreeMap<String, String>;

/// The identity shared by every point this process writes.
///
/// This is fixed at startup and never changes afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// The measurement name.
    pub measurement: String,

    /// The value of the `location` tag.
    pub location: String,
}

impl Series {
    /// A series for [`MEASUREMENT`] at the given `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            measurement: MEASUREMENT.to_string(),
            location: location.into(),
        }
    }

    fn tags(&self) -> Tags {
        let mut tags = Tags::new();
        tags.insert("location".to_string(), self.location.clone());
        tags
    }
}

/// The value of a single field in a [`MetricPoint`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
    /// A signed integer field.
    Integer(i64),

    /// A floating point field.
    Float(f64),
}

/// One timestamped, tagged record for the time-series store.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricPoint {
    /// The measurement name.
    pub measurement: String,

    /// Tags identifying the series.
    pub tags: Tags,

    /// The time the point was recorded, truncated to whole seconds.
    pub timestamp: DateTime<Utc>,

    /// Field names and values, in the order they are written.
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl MetricPoint {
    /// Build a point from a complete `reading`.
    ///
    /// Returns `None` if the reading isn't [complete](Reading::is_complete).
    #[must_use]
    pub fn from_reading(
        series: &Series,
        reading: &Reading,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        if !reading.is_complete() {
            return None;
        }
        let humidity = reading.humidity?;
        let temperature = reading.temperature?;
        let heat_index = reading.heat_index?;

        Some(Self {
            measurement: series.measurement.clone(),
            tags: series.tags(),
            timestamp: timestamp.trunc_subsecs(0),
            fields: vec![
                ("humidity", FieldValue::Integer(i64::from(humidity))),
                ("temperature", FieldValue::Float(temperature)),
                ("heat_index", FieldValue::Float(heat_index)),
                (
                    "temperature_fahrenheit",
                    FieldValue::Float(celsius_to_fahrenheit(temperature)),
                ),
                (
                    "heat_index_fahrenheit",
                    FieldValue::Float(celsius_to_fahrenheit(heat_index)),
                ),
            ],
        })
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| *value)
    }
}

/// Possible error situations when emitting a point.
#[derive(Debug)]
pub enum EmitError {
    /// The request could not be sent, or the response could not be read.
    Http(reqwest::Error),

    /// The store answered with a non-success status.
    Status {
        /// The HTTP status code.
        status: u16,

        /// The error message reported by the store, or the raw response body.
        message: String,
    },
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Http(error) => write!(f, "error sending point: {}", error),
            Self::Status { status, message } => {
                write!(f, "point rejected with status {}: {}", status, message)
            }
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(error) => Some(error),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for EmitError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error)
    }
}

/// Anything that can write [`MetricPoint`]s somewhere.
pub trait Emitter {
    /// Write a single point.
    ///
    /// # Errors
    ///
    /// Implementations return an [`EmitError`] if the point could not be written. Callers are
    /// not expected to retry.
    fn emit(&mut self, point: &MetricPoint) -> Result<(), EmitError>;
}
