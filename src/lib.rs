// lib.rs

//! The elements that drive the `dht-logger` binary.
//!
//! Lines arrive from a [`line_source`], are picked apart by the [`extract`] module, and complete
//! readings are handed to a [`metric_sink`] as [`MetricPoint`](metric_sink::MetricPoint)s. The
//! [`pipeline`] module ties these together.

#![warn(
    explicit_outlives_requirements,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_docs,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_lifetimes,
    variant_size_differences,
    clippy::cargo,
    clippy::pedantic
)]

pub mod config;
pub mod extract;
pub mod line_source;
pub mod logging;
pub mod metric_sink;
pub mod pipeline;
pub mod units;


/// The log target that receives every raw line read from the sensor.
///
/// This is routed to the audit file when one is configured (see [`logging::config`]).
pub const AUDIT_TARGET: &str = "serial";
