//! mdsurround - environmental effects core driven headlessly
//!
//! Runs a scripted world through the environment snapshot, effect handlers,
//! sound admission and diagnostics overlay, then prints what the overlay
//! would show.

mod ambient;
mod scenario;
mod session;

use anyhow::Result;
use mdsurround_core::SurroundConfig;
use mdsurround_hud::strip_formatting;
use session::SessionConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    let cli = CliOptions::parse(env::args().skip(1));

    // WARN by default, INFO with --verbose; RUST_LOG wins over both.
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting mdsurround v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => SurroundConfig::load_from_path(path),
        None => SurroundConfig::load(),
    };

    if let Some(path) = &cli.write_config {
        config.save_to_path(path)?;
        info!(path = %path.display(), "Wrote config");
        return Ok(());
    }

    let summary = session::run(SessionConfig {
        config,
        scenario: cli.scenario,
        world_seed: cli.world_seed,
        hardware_channels: cli.hardware_channels,
        max_ticks: cli.max_ticks,
        events: cli.events,
        metrics: cli.metrics,
        diagnostics: cli.diagnostics,
    })?;

    if cli.diagnostics {
        for line in summary.overlay_left.iter().chain(&summary.overlay_right) {
            println!("{}", strip_formatting(line));
        }
        for line in &summary.block_panel {
            println!("{}", strip_formatting(line));
        }
    }

    if let (Some(env), Some(sound)) = (&summary.report.environment, &summary.report.sound) {
        println!(
            "{} ticks ({} counted), {} in battle, {} inside, {} biomes",
            env.ticks, env.tick_counter, env.battle_ticks, env.inside_ticks, env.biomes_seen
        );
        println!(
            "{} sounds requested, {} admitted, {} no room, {} refused; peak {} of {}",
            sound.requested,
            sound.admitted,
            sound.rejected_no_room,
            sound.rejected_backend,
            sound.peak_live,
            sound.normal_channels
        );
    }
    println!("{} aurora frames", summary.aurora_frames);

    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    write_config: Option<PathBuf>,
    scenario: Option<PathBuf>,
    world_seed: Option<u64>,
    hardware_channels: Option<u32>,
    max_ticks: Option<u64>,
    events: Option<PathBuf>,
    metrics: Option<PathBuf>,
    diagnostics: bool,
    verbose: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            hardware_channels: Some(128),
            ..CliOptions::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config = path_arg(&mut args, "--config"),
                "--write-config" => opts.write_config = path_arg(&mut args, "--write-config"),
                "--scenario" => opts.scenario = path_arg(&mut args, "--scenario"),
                "--events" => opts.events = path_arg(&mut args, "--events"),
                "--metrics" => opts.metrics = path_arg(&mut args, "--metrics"),
                "--world-seed" => opts.world_seed = int_arg(&mut args, "--world-seed"),
                "--max-ticks" => opts.max_ticks = int_arg(&mut args, "--max-ticks"),
                "--hardware-channels" => {
                    opts.hardware_channels =
                        int_arg(&mut args, "--hardware-channels").or(opts.hardware_channels)
                }
                "--unknown-hardware" => opts.hardware_channels = None,
                "--diagnostics" => opts.diagnostics = true,
                "--verbose" => opts.verbose = true,
                other => {
                    eprintln!("Unknown argument: {other}");
                }
            }
        }

        opts
    }
}

fn path_arg<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Option<PathBuf> {
    let value = args.next().map(PathBuf::from);
    if value.is_none() {
        eprintln!("{flag} requires a path");
    }
    value
}

fn int_arg<T, I>(args: &mut I, flag: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    I: Iterator<Item = String>,
{
    let Some(raw) = args.next() else {
        eprintln!("{flag} requires an integer");
        return None;
    };
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("{flag} must be an integer ({err}): {raw}");
            None
        }
    }
}
