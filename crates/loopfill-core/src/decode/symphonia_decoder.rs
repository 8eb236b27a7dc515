//! Symphonia-backed source decoder

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as PacketBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::SourceDecoder;
use crate::error::{LoopFillError, Result};
use crate::types::SampleBuffer;

/// Decodes any format symphonia was built with into a planar f32 buffer
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

fn failure(msg: impl std::fmt::Display) -> LoopFillError {
    LoopFillError::DecodeFailure(msg.to_string())
}

impl SourceDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<SampleBuffer> {
        let file = File::open(path).map_err(|e| failure(format_args!("{}: {}", path.display(), e)))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Create a hint with the file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(failure)?;
        let mut format = probed.format;

        // Find the first audio track
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| failure("no audio track found"))?;
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(failure)?;

        let mut interleaved: Vec<f32> = Vec::new();
        let mut packet_buf: Option<(PacketBuffer<f32>, usize)> = None;
        let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
        let mut channel_count = track.codec_params.channels.map(|c| c.count()).unwrap_or(0);

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                // Chained streams are not supported; keep what was decoded so far
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(failure(e)),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(msg)) => {
                    log::warn!("decode: skipping corrupt packet: {}", msg);
                    continue;
                }
                Err(e) => return Err(failure(e)),
            };

            let spec = *decoded.spec();
            sample_rate = spec.rate;
            channel_count = spec.channels.count();

            // Packet sizes can grow mid-stream; reallocate only when needed
            let capacity = decoded.capacity();
            let needs_alloc = packet_buf.as_ref().map_or(true, |(_, cap)| *cap < capacity);
            if needs_alloc {
                packet_buf = Some((PacketBuffer::new(capacity as u64, spec), capacity));
            }

            if let Some((buf, _)) = packet_buf.as_mut() {
                buf.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buf.samples());
            }
        }

        if channel_count == 0 || interleaved.is_empty() {
            return Err(failure(format_args!("{}: no audio frames decoded", path.display())));
        }
        if sample_rate == 0 {
            return Err(failure(format_args!("{}: unknown sample rate", path.display())));
        }

        let buffer = SampleBuffer::from_interleaved(&interleaved, channel_count, sample_rate)?;
        log::info!(
            "decode: {:?} -> {} ch @ {} Hz, {} frames ({:.3}s)",
            path,
            buffer.channel_count(),
            buffer.sample_rate(),
            buffer.frame_count(),
            buffer.duration_seconds()
        );
        Ok(buffer)
    }

    fn name(&self) -> &'static str {
        "Symphonia"
    }
}
