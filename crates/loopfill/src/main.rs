//! Loopfill - stretch an audio clip to a target duration by seamless looping
//!
//! Decodes the input file, repeats it back-to-back until the target duration
//! is filled (clipping the last repetition), and writes a 16-bit PCM WAV.
//!
//! ## Settings
//!
//! Values come from the command line, then the YAML config file
//! (`~/.config/loopfill/config.yaml` by default), then built-in defaults.
//! Set `RUST_LOG=debug` for verbose output.

mod args;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use args::{Command, RunArgs};
use loopfill_core::config::{default_config_path, load_config, try_load_config, LoopFillConfig};
use loopfill_core::decode::{SourceDecoder, SymphoniaDecoder};
use loopfill_core::pipeline;

/// Load the config file
///
/// A file given with `--config` must exist and parse. The default location
/// is optional and falls back to built-in defaults.
fn load_settings(explicit: Option<&Path>) -> Result<LoopFillConfig> {
    match explicit {
        Some(path) => try_load_config(path)?
            .with_context(|| format!("Config file not found: {:?}", path)),
        None => Ok(load_config(&default_config_path())),
    }
}

/// Merge command line overrides into the loaded config
fn resolve_config(opts: &RunArgs) -> Result<(LoopFillConfig, PathBuf)> {
    let mut config = load_settings(opts.config.as_deref())?;

    if let Some(secs) = opts.duration_secs {
        config.target_duration_secs = secs;
    }
    config.validate().context("Invalid settings")?;

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| config.output_path_for(&opts.input));
    Ok((config, output))
}

fn run(opts: RunArgs) -> Result<()> {
    let (config, output) = resolve_config(&opts)?;
    let decoder = SymphoniaDecoder::new();

    log::info!(
        "Looping {:?} to {}s with {} decoder",
        opts.input,
        config.target_duration_secs,
        decoder.name()
    );

    let wav = pipeline::loop_fill_file(&decoder, &opts.input, config.target_duration_secs)
        .with_context(|| format!("Failed to process {:?}", opts.input))?;
    let header = wav.header().context("Encoder produced an unreadable header")?;

    std::fs::write(&output, wav.as_bytes())
        .with_context(|| format!("Failed to write {:?}", output))?;

    log::info!(
        "Wrote {:?}: {} ch @ {} Hz, {} frames ({:.3}s), {} bytes",
        output,
        header.channels,
        header.sample_rate,
        header.frame_count(),
        header.duration_seconds(),
        wav.len()
    );
    println!("{}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    match args::parse(std::env::args().skip(1))? {
        Command::Help => {
            println!("{}", args::USAGE);
            Ok(())
        }
        Command::Run(opts) => run(opts),
    }
}
