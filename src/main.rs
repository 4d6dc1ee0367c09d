//! Samples a configured property over a time range and prints `time, value` rows.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{
    NaiveDateTime,
    TimeDelta
};
use clap::Parser;
use tracing::{
    error,
    info
};

use timeproperty::configuration::Configuration;
use timeproperty::logging::{
    LoggingConfig,
    init_logging
};
use timeproperty::property::property::{
    Property,
    SampleOptions
};
use timeproperty::time::simulationtime::SimulationTime;

#[derive(Parser)]
#[command(name = "timeproperty")]
#[command(about = "Sample a piecewise time-varying property from a JSON configuration")]
struct Args {
    /// Configuration file
    config: PathBuf,

    /// Name of the property to sample
    property: String,

    /// Start of the sampled range (defaults to the property's first interval start)
    #[arg(value_parser = parse_time_arg)]
    start: Option<NaiveDateTime>,

    /// Stop of the sampled range (defaults to the property's last interval stop)
    #[arg(value_parser = parse_time_arg)]
    stop: Option<NaiveDateTime>,

    /// Maximum step between samples, in seconds
    step_seconds: Option<i64>
}

fn parse_time_arg(text: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_time(text).ok_or(format!("unable to parse time '{}'", text))
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = Configuration::new();
    config
        .from_reader(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    init_logging(&config.logging_config());

    let property = config.property(&args.property)?;
    let start = args.start
        .or(property.intervals().start())
        .context("property has no intervals")?;
    let stop = args.stop
        .or(property.intervals().stop())
        .context("property has no intervals")?;
    let mut options = SampleOptions::new();
    if let Some(seconds) = args.step_seconds {
        options = options.with_maximum_step(TimeDelta::seconds(seconds));
    }

    let mut times = Vec::new();
    let mut values = Vec::new();
    property.sample_value(start, stop, &options, &mut times, &mut values)?;
    info!(property = %args.property, samples = times.len(), "Sampled property");
    for (time, value) in times.iter().zip(values.iter()) {
        println!("{}, {}", time, value);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // No-op when the configuration already installed a subscriber.
            init_logging(&LoggingConfig::default());
            error!("Sampling failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
