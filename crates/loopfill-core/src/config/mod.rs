//! Configuration for loop-fill runs
//!
//! - Generic YAML config loading/saving (lenient and strict)
//! - Default config file location
//! - [`LoopFillConfig`]: target duration and output naming
//!
//! # Usage
//!
//! ```ignore
//! use loopfill_core::config::{default_config_path, load_config, LoopFillConfig};
//!
//! let config: LoopFillConfig = load_config(&default_config_path());
//! config.validate()?;
//! ```

mod io;
mod run;
mod paths;

pub use io::{load_config, save_config, try_load_config};
pub use run::{LoopFillConfig, DEFAULT_OUTPUT_FILE_NAME, DEFAULT_TARGET_DURATION_SECS};
pub use paths::{default_config_dir, default_config_path};
