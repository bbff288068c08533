//! `civic` command-line front end
//!
//! Prints generated datasets as JSON on stdout. Logs go to stderr,
//! filtered by `RUST_LOG` (default `warn`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use civic_seed::Coordinate;
use civic_synth::audit::audit_coordinates;
use civic_synth::{initiative_insights, CivicDataGenerator, CountHints, GeneratorConfig};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("civic")
        .version(civic_synth::VERSION)
        .about("Deterministic, location-seeded civic data generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lat")
                .long("lat")
                .global(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Latitude (defaults to the configured coordinate)"),
        )
        .arg(
            Arg::new("lng")
                .long("lng")
                .global(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Longitude (defaults to the configured coordinate)"),
        )
        .arg(
            Arg::new("as-of")
                .long("as-of")
                .global(true)
                .value_parser(parse_as_of)
                .help("Reference instant for generated dates (RFC 3339, defaults to now)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Requested record count, clamped per domain"),
        )
        .arg(
            Arg::new("compact")
                .long("compact")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print single-line JSON"),
        )
        .subcommand(Command::new("issues").about("Reported civic issues near the coordinate"))
        .subcommand(Command::new("engagement").about("Engagement heatmap areas"))
        .subcommand(Command::new("zones").about("Improvement zones, Critical first"))
        .subcommand(Command::new("initiatives").about("Community initiatives"))
        .subcommand(Command::new("stats").about("Community statistics"))
        .subcommand(Command::new("snapshot").about("Every dataset for the coordinate"))
        .subcommand(
            Command::new("insights")
                .about("Analysis points for one initiative")
                .arg(
                    Arg::new("index")
                        .long("index")
                        .default_value("0")
                        .value_parser(value_parser!(usize))
                        .help("Position of the initiative in the generated list"),
                ),
        )
        .subcommand(
            Command::new("certify")
                .about("Audit invariants over sampled coordinates")
                .arg(
                    Arg::new("samples")
                        .long("samples")
                        .default_value("1000")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Number of coordinates to sample (at least one)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                ),
        )
}

fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration from `--config`, overridden by `--as-of` and `--count`
fn load_config(matches: &ArgMatches) -> Result<GeneratorConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(as_of) = matches.get_one::<DateTime<Utc>>("as-of") {
        config = config.with_as_of(*as_of);
    }
    if let Some(count) = matches.get_one::<usize>("count") {
        config = config.with_counts(CountHints::uniform(Some(*count)));
    }
    Ok(config)
}

/// Coordinate from `--lat`/`--lng`, missing parts from `fallback`
fn resolve_coordinate(matches: &ArgMatches, fallback: Coordinate) -> Result<Coordinate> {
    let lat = matches.get_one::<f64>("lat").copied().unwrap_or(fallback.lat);
    let lng = matches.get_one::<f64>("lng").copied().unwrap_or(fallback.lng);
    let coordinate = Coordinate::new(lat, lng);
    if !coordinate.is_finite() {
        bail!("coordinate {coordinate} is not finite");
    }
    Ok(coordinate)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

fn sample_coordinates(samples: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coords = vec![Coordinate::new(0.0, 0.0), Coordinate::DEFAULT];
    coords.extend(
        (0..samples)
            .map(|_| Coordinate::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))),
    );
    coords.truncate(samples);
    coords
}

fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let (name, args) = matches
        .subcommand()
        .context("a subcommand is required")?;

    let config = load_config(args)?;
    let coordinate = resolve_coordinate(args, config.default_coordinate)?;
    let compact = args.get_flag("compact");
    let generator = CivicDataGenerator::new(config);
    tracing::debug!(command = name, %coordinate, as_of = %generator.as_of(), "running");

    match name {
        "issues" => print_json(&generator.issues(coordinate), compact)?,
        "engagement" => print_json(&generator.engagement(coordinate), compact)?,
        "zones" => print_json(&generator.zones(coordinate), compact)?,
        "initiatives" => print_json(&generator.initiatives(coordinate), compact)?,
        "stats" => print_json(&generator.stats(coordinate), compact)?,
        "snapshot" => print_json(&generator.snapshot(coordinate), compact)?,
        "insights" => {
            let index = args.get_one::<usize>("index").copied().unwrap_or(0);
            let initiatives = generator.initiatives(coordinate);
            let Some(initiative) = initiatives.get(index) else {
                bail!("initiative index {index} out of range, {} generated", initiatives.len());
            };
            print_json(
                &serde_json::json!({
                    "initiative": initiative,
                    "insights": initiative_insights(initiative),
                }),
                compact,
            )?;
        }
        "certify" => {
            let samples = args.get_one::<u64>("samples").copied().unwrap_or(1000);
            let samples = usize::try_from(samples).context("--samples does not fit in memory")?;
            let seed = args.get_one::<u64>("seed").copied().unwrap_or(42);
            eprintln!("Auditing {samples} coordinates (seed {seed})...");

            let report = audit_coordinates(&generator, sample_coordinates(samples, seed));
            println!("{}", report.generate_text());
            return Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }
        other => bail!("unknown subcommand '{other}'"),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
