//! Loopfill Core - loop-fill scheduling and canonical WAV encoding
//!
//! Takes a decoded clip and stretches it to a target duration by laying
//! copies of it back-to-back, then serializes the result as a 16-bit PCM
//! RIFF/WAVE byte stream.
//!
//! ```ignore
//! use loopfill_core::{decode::SymphoniaDecoder, pipeline};
//!
//! let wav = pipeline::loop_fill_file(&SymphoniaDecoder::new(), path, 30.0)?;
//! std::fs::write("edited_audio.wav", wav.as_bytes())?;
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod scheduler;
pub mod types;
pub mod wav;

pub use error::{LoopFillError, Result};
pub use scheduler::{schedule, LoopPlacement};
pub use types::*;
pub use wav::{encode, WavBytes, WavHeader};
