// main.rs
#[macro_use]
extern crate log;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use dht_logger::config::Config;
use dht_logger::line_source::serial;
use dht_logger::logging;
use dht_logger::metric_sink::influxdb::InfluxDb;
use dht_logger::pipeline::Pipeline;

#[derive(StructOpt)]
#[structopt(about = "Forward DHT22 readings from a serial port to InfluxDB.")]
struct Args {
    /// Path to the YAML configuration file.
    #[structopt(short, long, default_value = "config.yaml", parse(from_os_str))]
    config: PathBuf,

    /// Minimum level of log records shown on stderr.
    #[structopt(long, default_value = "warn")]
    log_level: log::LevelFilter,
}

fn main() {
    let args = Args::from_args();

    if let Err(error) = run(&args) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("DHT Logger v1 - reading {}", args.config.display());
    let config = Config::load(&args.config)?;

    logging::init(args.log_level, config.serial_log_filename.as_deref())?;
    info!("Loaded configuration from {}", args.config.display());

    let influxdb_config = config.influxdb();
    println!(
        "Connecting to InfluxDB {}:{}",
        influxdb_config.host, influxdb_config.port
    );
    let influxdb = InfluxDb::open(&influxdb_config)?;

    let serial_config = config.serial();
    println!(
        "Attempting to connect to serial port {}",
        serial_config.address
    );
    let lines = serial::open(&serial_config).map_err(|error| {
        format!(
            "Unable to open serial port {}: {}",
            serial_config.address, error
        )
    })?;

    let mut pipeline = Pipeline::new(config.series(), influxdb);
    let error = pipeline.run(lines);
    Err(format!("Serial port connection lost: {}", error).into())
}
