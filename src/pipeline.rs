//! The read-parse-emit loop.
//!
//! Every line is logged to [`AUDIT_TARGET`](crate::AUDIT_TARGET), then checked for a complete
//! reading. Complete readings become a [`MetricPoint`] that is handed to the emitter before the
//! next line is read, so points are written in the order their lines arrived.

use std::io;

use chrono::Utc;
use log::{error, info, trace, warn};

use crate::extract::Extractor;
use crate::line_source::LineSource;
use crate::metric_sink::{Emitter, MetricPoint, Series};
use crate::AUDIT_TARGET;

/// Turns sensor lines into metric points.
pub struct Pipeline<E> {
    extractor: Extractor,
    series: Series,
    emitter: E,
}

impl<E: Emitter> Pipeline<E> {
    /// Create a pipeline that writes points for `series` to `emitter`.
    pub fn new(series: Series, emitter: E) -> Self {
        Self {
            extractor: Extractor::new(),
            series,
            emitter,
        }
    }

    /// Process a single line.
    ///
    /// Returns the point that was built from the line, if any. The point is returned whether or
    /// not the emitter accepted it; emit failures are logged and otherwise ignored.
    pub fn handle_line(&mut self, line: &str) -> Option<MetricPoint> {
        let reading = self.extractor.extract(line);
        info!(target: AUDIT_TARGET, "{}", line);

        let point = match MetricPoint::from_reading(&self.series, &reading, Utc::now()) {
            Some(point) => point,
            None => {
                trace!("Incomplete reading {:?}", reading);
                return None;
            }
        };

        if let Err(error) = self.emitter.emit(&point) {
            warn!("Dropping point: {}", error);
        }
        Some(point)
    }

    /// Process lines from `source` until the connection is lost.
    ///
    /// This only returns once `source` yields an error or ends, and returns the error that
    /// ended it.
    pub fn run<S: LineSource>(&mut self, source: S) -> io::Error {
        for line in source {
            match line {
                Ok(line) => {
                    self.handle_line(&line);
                }
                Err(error) => return Self::connection_lost(error),
            }
        }
        Self::connection_lost(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "line source ended",
        ))
    }

    fn connection_lost(error: io::Error) -> io::Error {
        error!(target: AUDIT_TARGET, "Serial port connection lost.");
        error
    }
}
