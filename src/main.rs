use std::env;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use tracing::error;

mod config;
mod plaato;

use config::Config;
use plaato::{Client, Listing};

fn usage(program: &str) {
    eprintln!("Usage: {program} [SUBCOMMAND] [OPTIONS]");
    eprintln!("Without a subcommand, lists devices and fetches the last week of readings of the first one.");
    eprintln!("Subcommands:");
    eprintln!("    devices [--raw] [--ids]           list devices (raw: print full response, ids: ids only)");
    eprintln!("    readings <device_id> [from] [to]  fetch readings, bounds as YYYY-MM-DDTHH:MM:SS");
    eprintln!("    help                              show this message");
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
                format!("{app_name}=info").into()
            }),
        )
        .init();
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, ()> {
    raw.parse::<NaiveDateTime>().map_err(|err| {
        error!("invalid time '{raw}', expected YYYY-MM-DDTHH:MM:SS: {err}");
    })
}

/// Lists device ids and prints the readings of the first device.
fn run_default(client: &Client) -> Result<(), ()> {
    let listing = client.list_devices(true, true).map_err(|err| {
        error!("failed fetching devices data: {err}");
    })?;

    let Some(first_device) = listing.first_id() else {
        println!("No devices found");
        return Err(());
    };

    let readings = client.fetch_readings(first_device, None, None).map_err(|err| {
        error!("failed fetching readings of device '{first_device}': {err}");
    })?;
    println!("{readings}");
    Ok(())
}

fn run_devices(client: &Client, args: impl Iterator<Item = String>) -> Result<(), ()> {
    let mut include_raw_output = false;
    let mut ids_only = false;
    for arg in args {
        match arg.as_str() {
            "--raw" => include_raw_output = true,
            "--ids" => ids_only = true,
            _ => {
                error!("unknown devices option '{arg}'");
                return Err(());
            }
        }
    }

    let listing = client.list_devices(include_raw_output, ids_only).map_err(|err| {
        error!("failed fetching devices data: {err}");
    })?;
    if listing.is_empty() {
        println!("No devices found");
        return Err(());
    }
    match listing {
        Listing::Ids(ids) => {
            for id in ids {
                println!("{id}");
            }
            Ok(())
        }
        Listing::Document(document) => {
            println!("{document}");
            Ok(())
        }
    }
}

fn run_readings(client: &Client, mut args: impl Iterator<Item = String>) -> Result<(), ()> {
    let device_id = args.next().ok_or_else(|| {
        error!("'readings' requires a device id");
    })?;
    let start = args.next().map(|raw| parse_instant(&raw)).transpose()?;
    let end = args.next().map(|raw| parse_instant(&raw)).transpose()?;

    let readings = client.fetch_readings(&device_id, start, end).map_err(|err| {
        error!("failed fetching readings of device '{device_id}': {err}");
    })?;
    println!("{readings}");
    Ok(())
}

fn entry() -> Result<(), ()> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let subcommand = args.next();

    if matches!(subcommand.as_deref(), Some("help" | "-h" | "--help")) {
        usage(&program);
        return Ok(());
    }

    Config::load_dotenv();
    let config = Config::from_env();
    let client = Client::new(&config).map_err(|err| {
        error!("could not set up the Plaato client: {err}");
    })?;

    match subcommand.as_deref() {
        None => run_default(&client),
        Some("devices") => run_devices(&client, args),
        Some("readings") => run_readings(&client, args),
        Some(other) => {
            usage(&program);
            error!("unknown subcommand {other}");
            Err(())
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    match entry() {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}
