//! Pull sensor values out of the text lines printed by the sensor firmware.
//!
//! The firmware prints lines such as:
//!
//! ```text
//! Humidity: 45.00%  Temperature: 23.50°C 74.30°F  Heat index: 24.10°C 75.38°F
//! ```
//!
//! Each of the three values is matched independently, so a line may yield any subset of them.
//! Anything that doesn't match exactly is left out rather than treated as an error.

use regex::Regex;

const HUMIDITY_PATTERN: &str = r"^Humidity: ([0-9]{2})\.00%";
const TEMPERATURE_PATTERN: &str = r"Temperature: ([0-9]{2}\.[0-9]{2})°C";
const HEAT_INDEX_PATTERN: &str = r"Heat index: ([0-9]{2}\.[0-9]{2})°C";

/// The values found in a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    /// Relative humidity in whole percent.
    pub humidity: Option<u8>,

    /// Temperature in degrees Celsius.
    pub temperature: Option<f64>,

    /// Heat index in degrees Celsius.
    pub heat_index: Option<f64>,
}

impl Reading {
    /// Whether this reading should be turned into a metric point.
    ///
    /// All three values must be present. A humidity of exactly `0` also counts as missing.
    // TODO: find out whether `Humidity: 00.00%` lines should be recorded rather than dropped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match (self.humidity, self.temperature, self.heat_index) {
            (Some(humidity), Some(_), Some(_)) => humidity != 0,
            _ => false,
        }
    }
}

/// Compiled patterns for each of the values in a sensor line.
#[derive(Clone, Debug)]
pub struct Extractor {
    humidity: Regex,
    temperature: Regex,
    heat_index: Regex,
}

impl Extractor {
    /// Compile the sensor line patterns.
    #[must_use]
    pub fn new() -> Self {
        // `unwrap` is OK since the patterns are constants covered by the tests below.
        Self {
            humidity: Regex::new(HUMIDITY_PATTERN).unwrap(),
            temperature: Regex::new(TEMPERATURE_PATTERN).unwrap(),
            heat_index: Regex::new(HEAT_INDEX_PATTERN).unwrap(),
        }
    }

    /// Extract every value that `line` carries.
    #[must_use]
    pub fn extract(&self, line: &str) -> Reading {
        Reading {
            humidity: self.humidity(line),
            temperature: self.temperature(line),
            heat_index: self.heat_index(line),
        }
    }

    /// Humidity, only when the line starts with `Humidity: NN.00%`.
    #[must_use]
    pub fn humidity(&self, line: &str) -> Option<u8> {
        capture(&self.humidity, line)?.parse().ok()
    }

    /// Temperature from a `Temperature: DD.DD°C` marker anywhere in the line.
    #[must_use]
    pub fn temperature(&self, line: &str) -> Option<f64> {
        capture(&self.temperature, line)?.parse().ok()
    }

    /// Heat index from a `Heat index: DD.DD°C` marker anywhere in the line.
    #[must_use]
    pub fn heat_index(&self, line: &str) -> Option<f64> {
        capture(&self.heat_index, line)?.parse().ok()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

fn capture<'line>(pattern: &Regex, line: &'line str) -> Option<&'line str> {
    pattern
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::{Extractor, Reading};

    #[test]
    fn full_line() {
        let line = "Humidity: 45.00%  Temperature: 23.50°C  Heat index: 24.10°C";
        let reading = Extractor::new().extract(line);

        assert_eq!(
            reading,
            Reading {
                humidity: Some(45),
                temperature: Some(23.5),
                heat_index: Some(24.1),
            }
        );
        assert!(reading.is_complete());
    }

    #[test]
    fn firmware_line_with_fahrenheit() {
        let reading = Extractor::new().extract(
            "Humidity: 61.00%  Temperature: 19.80°C 67.64°F  Heat index: 19.54°C 67.17°F",
        );

        assert_eq!(reading.humidity, Some(61));
        assert_eq!(reading.temperature, Some(19.8));
        assert_eq!(reading.heat_index, Some(19.54));
    }

    #[test]
    fn humidity_requires_whole_percent() {
        let extractor = Extractor::new();

        assert_eq!(extractor.humidity("Humidity: 07.00%"), Some(7));
        assert_eq!(extractor.humidity("Humidity: 99.00% trailing"), Some(99));
        assert_eq!(extractor.humidity("Humidity: 55.5%"), None);
        assert_eq!(extractor.humidity("Humidity: 55.50%"), None);
        assert_eq!(extractor.humidity("Humidity: 5.00%"), None);
        assert_eq!(extractor.humidity("Humidity: 100.00%"), None);
        assert_eq!(extractor.humidity("Humidity: 45.00"), None);
        assert_eq!(extractor.humidity("45.00%"), None);
    }

    #[test]
    fn humidity_must_start_the_line() {
        let extractor = Extractor::new();

        assert_eq!(extractor.humidity(" Humidity: 45.00%"), None);
        assert_eq!(extractor.humidity("DHT22 Humidity: 45.00%"), None);
    }

    #[test]
    fn temperature_anywhere_in_line() {
        let extractor = Extractor::new();

        assert_eq!(extractor.temperature("Temperature: 23.50°C"), Some(23.5));
        assert_eq!(
            extractor.temperature("noise Temperature: 08.25°C more noise"),
            Some(8.25)
        );
        assert_eq!(extractor.temperature("Temperature: 23.5°C"), None);
        assert_eq!(extractor.temperature("Temperature: 123.50°C"), None);
        assert_eq!(extractor.temperature("Temperature: 23.50°F"), None);
        assert_eq!(extractor.temperature("Temperature: -3.50°C"), None);
        assert_eq!(extractor.temperature("temperature: 23.50°C"), None);
    }

    #[test]
    fn heat_index_anywhere_in_line() {
        let extractor = Extractor::new();

        assert_eq!(extractor.heat_index("Heat index: 24.10°C"), Some(24.1));
        assert_eq!(
            extractor.heat_index("Temperature: 23.50°C Heat index: 31.07°C"),
            Some(31.07)
        );
        assert_eq!(extractor.heat_index("Heat index: 24.1°C"), None);
        assert_eq!(extractor.heat_index("Heat Index: 24.10°C"), None);
    }

    #[test]
    fn partial_lines() {
        let extractor = Extractor::new();

        let reading = extractor.extract("Temperature: 23.50°C");
        assert_eq!(
            reading,
            Reading {
                humidity: None,
                temperature: Some(23.5),
                heat_index: None,
            }
        );
        assert!(!reading.is_complete());

        let reading = extractor.extract("Humidity: 45.00%  Heat index: 24.10°C");
        assert!(!reading.is_complete());
    }

    #[test]
    fn garbage() {
        let extractor = Extractor::new();

        assert_eq!(extractor.extract("garbage data"), Reading::default());
        assert_eq!(extractor.extract(""), Reading::default());
        assert_eq!(extractor.extract("Failed to read from DHT sensor!"), Reading::default());
    }

    #[test]
    fn zero_humidity_is_incomplete() {
        let reading = Extractor::new()
            .extract("Humidity: 00.00%  Temperature: 20.00°C  Heat index: 20.00°C");

        assert_eq!(reading.humidity, Some(0));
        assert!(!reading.is_complete());
    }

    #[test]
    fn zero_temperature_is_complete() {
        let reading = Reading {
            humidity: Some(80),
            temperature: Some(0.0),
            heat_index: Some(0.0),
        };
        assert!(reading.is_complete());
    }
}
