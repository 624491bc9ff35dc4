mod cli;
mod logger;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use icylisterlib::config::ListenerSettings;
use icylisterlib::icy::IcyStreamReader;
use icylisterlib::poll::{poll, PollOptions};

#[macro_use]
extern crate log;

fn main() -> Result<()> {
    // print error to the log and then throw it
    if let Err(err) = actual_main() {
        error!("Error: {:?}", err);
        return Err(err);
    }

    Ok(())
}

fn actual_main() -> Result<()> {
    let args = cli::Args::parse();
    let _logger = logger::setup(&args.log_options);
    let settings = get_settings(&args)?;
    debug!("Using settings {settings:?}");

    let mut reader = IcyStreamReader::open(&args.url, Some(settings.user_agent.as_str()))
        .with_context(|| format!("Failed to open stream {:?}", args.url))?;

    let station = reader.station();
    if !station.is_empty() {
        info!(
            "Station {:?} ({:?}), genre {:?}, {:?} kbit/s",
            station.name, station.description, station.genre, station.bitrate
        );
    }

    let stop = Arc::new(AtomicBool::new(false));
    let stop_ctrlc = stop.clone();
    ctrlc::set_handler(move || {
        // a second interrupt while the stream stalls ends the process right away, still as a clean stop
        if stop_ctrlc.swap(true, Ordering::SeqCst) {
            info!("Interrupted again, exiting");
            std::process::exit(0);
        }
        info!("Interrupted, stopping after the current cycle");
    })
    .context("Error setting Ctrl-C handler")?;

    let options = PollOptions {
        timestamp: settings.timestamp,
        fields: settings.fields,
    };

    let stdout = std::io::stdout();
    let mut sink = settings.format.sink(stdout.lock());
    let res = poll(&mut reader, sink.as_mut(), &options, &stop);
    reader.close();

    res
}

/// Read the config file if given, then apply the arguments over it
fn get_settings(args: &cli::Args) -> Result<ListenerSettings> {
    let settings = match &args.config {
        Some(path) => ListenerSettings::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ListenerSettings::default(),
    };

    Ok(args.overlay(settings))
}
