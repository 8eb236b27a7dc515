//! Canonical WAV header reader

use super::{BITS_PER_SAMPLE, FMT_CHUNK_SIZE, FORMAT_PCM, HEADER_LEN};
use crate::error::{LoopFillError, Result};

/// Fields of a canonical 44-byte PCM WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// RIFF chunk size (total length - 8)
    pub riff_size: u32,
    /// Audio format tag (1 = PCM)
    pub format_tag: u16,
    /// Number of channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Size of the sample data in bytes
    pub data_size: u32,
}

fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl WavHeader {
    /// Read the header at the start of `bytes`
    ///
    /// Only the canonical layout is accepted: `fmt ` directly after `WAVE`
    /// with a 16-byte body, followed immediately by `data`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(LoopFillError::invalid(format!(
                "WAV header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(LoopFillError::invalid("not a RIFF/WAVE stream"));
        }
        if &bytes[12..16] != b"fmt " || u32_at(bytes, 16) != FMT_CHUNK_SIZE {
            return Err(LoopFillError::invalid("missing canonical fmt chunk"));
        }
        if &bytes[36..40] != b"data" {
            return Err(LoopFillError::invalid("missing data chunk after fmt"));
        }

        Ok(Self {
            riff_size: u32_at(bytes, 4),
            format_tag: u16_at(bytes, 20),
            channels: u16_at(bytes, 22),
            sample_rate: u32_at(bytes, 24),
            byte_rate: u32_at(bytes, 28),
            block_align: u16_at(bytes, 32),
            bits_per_sample: u16_at(bytes, 34),
            data_size: u32_at(bytes, 40),
        })
    }

    /// True for 16-bit integer PCM
    pub fn is_pcm16(&self) -> bool {
        self.format_tag == FORMAT_PCM && self.bits_per_sample == BITS_PER_SAMPLE
    }

    /// Number of sample frames in the data chunk
    pub fn frame_count(&self) -> usize {
        if self.block_align == 0 {
            return 0;
        }
        usize::try_from(self.data_size).unwrap_or(usize::MAX) / usize::from(self.block_align)
    }

    /// Duration of the data chunk in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}
