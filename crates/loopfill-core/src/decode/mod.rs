//! Source decoding boundary
//!
//! The scheduler and encoder only ever see a [`SampleBuffer`]. Getting one
//! from a file on disk is the job of a [`SourceDecoder`]; whatever goes wrong
//! there is surfaced to the caller as
//! [`DecodeFailure`](crate::error::LoopFillError::DecodeFailure)
//! without interpretation.
//!
//! ## Available Decoders
//!
//! - **SymphoniaDecoder**: pure-Rust decoding of WAV, FLAC, MP3, AAC, OGG/Vorbis
//!   and every other format symphonia is built with

mod symphonia_decoder;

pub use symphonia_decoder::SymphoniaDecoder;

use std::path::Path;

use crate::error::Result;
use crate::types::SampleBuffer;

/// Trait for turning an audio file into a planar sample buffer
///
/// Decoding is synchronous: the call returns once the whole file has been
/// decoded, or fails.
pub trait SourceDecoder {
    /// Decode the file at `path`
    fn decode(&self, path: &Path) -> Result<SampleBuffer>;

    /// Human-readable decoder name (for logging)
    fn name(&self) -> &'static str;
}
