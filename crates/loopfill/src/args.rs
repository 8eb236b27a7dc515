//! Command line parsing

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: loopfill <INPUT> [options]

Loop an audio clip back-to-back until it fills the target duration and
save the result as a 16-bit PCM WAV file.

Options:
  -d, --duration <SECS>   Target duration in seconds (overrides config)
  -o, --output <PATH>     Output WAV path (overrides config)
  -c, --config <PATH>     Config file (default: ~/.config/loopfill/config.yaml)
  -h, --help              Show this help";

/// Options for a loop-fill run
#[derive(Debug, Clone, PartialEq)]
pub struct RunArgs {
    pub input: PathBuf,
    pub duration_secs: Option<f64>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(RunArgs),
}

fn value_for<I>(flag: &str, args: &mut I) -> Result<String>
where
    I: Iterator<Item = String>,
{
    args.next().ok_or_else(|| anyhow!("{} requires a value", flag))
}

/// Parse arguments (without the program name)
pub fn parse<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut input: Option<PathBuf> = None;
    let mut duration_secs = None;
    let mut output = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-d" | "--duration" => {
                let value = value_for(&arg, &mut args)?;
                let secs: f64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid duration: {:?}", value))?;
                duration_secs = Some(secs);
            }
            "-o" | "--output" => output = Some(PathBuf::from(value_for(&arg, &mut args)?)),
            "-c" | "--config" => config = Some(PathBuf::from(value_for(&arg, &mut args)?)),
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("Unknown option: {}", flag),
            _ => {
                if input.is_some() {
                    bail!("Unexpected extra argument: {}", arg);
                }
                input = Some(PathBuf::from(&arg));
            }
        }
    }

    let input = input.ok_or_else(|| anyhow!("No input file given\n\n{}", USAGE))?;
    Ok(Command::Run(RunArgs {
        input,
        duration_secs,
        output,
        config,
    }))
}
