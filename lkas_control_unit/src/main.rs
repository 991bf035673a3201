//! # LKAS Replay
//!
//! Drives one steering session from recorded tick inputs.
//!
//! Reads a session TOML and a JSON-lines file of `ControlCycleInput`
//! records (stdin when `--input` is omitted), runs one tick per record and
//! writes one JSON object per tick to stdout:
//!
//! ```text
//! {"tick":0,"applied_torque":3.0,"authority_ratio":1.0,"alert":null,"messages":[...]}
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lkas_common::alert::DriverAlert;
use lkas_common::config::{ConfigError, LogLevel};
use lkas_common::message::MessageBatch;
use lkas_common::prelude::ControlCycleInput;
use lkas_control_unit::config::{LoadedConfig, load_config};
use lkas_control_unit::cycle::SteeringSession;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// LKAS Replay: run recorded ticks through the steering arbitration
#[derive(Parser, Debug)]
#[command(name = "lkas_replay")]
#[command(version)]
#[command(about = "Replay recorded control ticks through one LKAS session")]
struct Args {
    /// Session configuration TOML.
    #[arg(short, long, value_name = "FILE", default_value = "config/session.toml")]
    config: PathBuf,

    /// JSON-lines tick input. Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("malformed tick at line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("output error: {0}")]
    Write(#[from] io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One output line.
#[derive(Serialize)]
struct TickRecord<'a> {
    tick: u64,
    applied_torque: f64,
    authority_ratio: f64,
    alert: Option<DriverAlert>,
    messages: &'a MessageBatch,
}

fn main() {
    let args = Args::parse();
    let loaded = load_config(&args.config);
    setup_tracing(&args, loaded.as_ref().ok().map(|c| c.session.log_level));

    let result = loaded
        .map_err(ReplayError::from)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: LoadedConfig) -> Result<(), ReplayError> {
    info!(
        family = ?config.session.family,
        longitudinal = config.session.longitudinal_control,
        "session config loaded from {}",
        args.config.display()
    );

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| ReplayError::Open {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    let mut session = SteeringSession::new(config);
    let mut out = BufWriter::new(io::stdout().lock());

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ReplayError::Read {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let input: ControlCycleInput =
            serde_json::from_str(trimmed).map_err(|source| ReplayError::Decode {
                line: line_no,
                source,
            })?;

        let output = session.tick(&input);
        let record = TickRecord {
            tick: input.tick_index,
            applied_torque: output.steer.torque,
            authority_ratio: output.authority_ratio,
            alert: output.alert,
            messages: &output.messages,
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let stats = session.stats();
    info!(
        ticks = stats.ticks,
        rate_limited = stats.rate_limited,
        authority_clamped = stats.authority_clamped,
        inactive = stats.inactive,
        override_held = stats.override_held,
        resume_presses = stats.resume_presses,
        cancel_presses = stats.cancel_presses,
        "replay complete"
    );
    Ok(())
}

fn setup_tracing(args: &Args, configured: Option<LogLevel>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured
            .and_then(|l| l.as_directive().parse().ok())
            .unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}
