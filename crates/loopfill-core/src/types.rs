//! Common types for Loopfill
//!
//! This module contains the sample buffer shared by the scheduler, the
//! encoder and the decoding boundary.

use crate::error::{try_zeroed, LoopFillError, Result};

/// Audio sample type (32-bit float for processing, stored as 16-bit in files)
pub type Sample = f32;

/// Multi-channel planar audio buffer
///
/// Holds one sample vector per channel, all of exactly `frame_count`
/// elements. Samples are nominally in [-1.0, 1.0]; out-of-range values are
/// kept as-is and clamped only when encoding.
///
/// The buffer owns its storage. Outside this crate it is read-only once
/// constructed; the scheduler is the only writer, and only while rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    frame_count: usize,
    channels: Vec<Vec<Sample>>,
}

impl SampleBuffer {
    /// Wrap planar channel data
    ///
    /// Fails with `InvalidArgument` if the channels have different lengths.
    /// An empty channel list yields a zero-channel, zero-frame buffer, which
    /// the scheduler and encoder reject on use.
    pub fn new(sample_rate: u32, channels: Vec<Vec<Sample>>) -> Result<Self> {
        let frame_count = channels.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != frame_count)
        {
            return Err(LoopFillError::invalid(format!(
                "channel {} has {} frames, expected {}",
                idx,
                ch.len(),
                frame_count
            )));
        }

        Ok(Self {
            sample_rate,
            frame_count,
            channels,
        })
    }

    /// Allocate a silent buffer of the given shape
    pub fn silent(channel_count: usize, sample_rate: u32, frame_count: usize) -> Result<Self> {
        let mut channels = Vec::new();
        channels
            .try_reserve_exact(channel_count)
            .map_err(|_| LoopFillError::AllocationFailure {
                what: "channel list",
                len: channel_count,
            })?;
        for _ in 0..channel_count {
            channels.push(try_zeroed("channel samples", frame_count)?);
        }

        Ok(Self {
            sample_rate,
            frame_count,
            channels,
        })
    }

    /// Build a planar buffer from interleaved samples (frame-major)
    ///
    /// Trailing samples that do not fill a whole frame are dropped.
    pub fn from_interleaved(samples: &[Sample], channel_count: usize, sample_rate: u32) -> Result<Self> {
        if channel_count == 0 {
            return Err(LoopFillError::invalid("channel count must be >= 1"));
        }

        let frame_count = samples.len() / channel_count;
        let mut buffer = Self::silent(channel_count, sample_rate, frame_count)?;
        for (frame, chunk) in samples.chunks_exact(channel_count).enumerate() {
            for (ch, &s) in chunk.iter().enumerate() {
                buffer.channels[ch][frame] = s;
            }
        }
        Ok(buffer)
    }

    /// Number of channels
    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples per channel
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Samples of one channel, or `None` if out of range
    #[inline]
    pub fn channel(&self, index: usize) -> Option<&[Sample]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels in order
    #[inline]
    pub fn channels(&self) -> &[Vec<Sample>] {
        &self.channels
    }

    #[inline]
    pub(crate) fn channel_mut(&mut self, index: usize) -> &mut [Sample] {
        &mut self.channels[index]
    }

    /// Duration in seconds (0.0 for a zero sample rate)
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count as f64 / self.sample_rate as f64
    }
}
