//! PCM/WAV encoder

use super::{
    LeWriter, WavHeader, BITS_PER_SAMPLE, BYTES_PER_SAMPLE, FMT_CHUNK_SIZE, FORMAT_PCM,
    HEADER_LEN, WAV_MAX_DATA_SIZE,
};
use crate::error::{try_zeroed, LoopFillError, Result};
use crate::types::{Sample, SampleBuffer};

/// An encoded WAV file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBytes(Vec<u8>);

impl WavBytes {
    /// Media type to offer the bytes under
    pub const MIME_TYPE: &'static str = "audio/wav";

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The header this encoder wrote
    pub fn header(&self) -> Result<WavHeader> {
        WavHeader::parse(&self.0)
    }

    /// Sample data following the header
    pub fn data(&self) -> &[u8] {
        &self.0[HEADER_LEN.min(self.0.len())..]
    }
}

impl AsRef<[u8]> for WavBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Convert a float sample to 16-bit PCM
///
/// Clamps to [-1.0, 1.0], then scales by 32768 when `0.5 + s < 0` and by
/// 32767 otherwise, truncating toward zero. Values in [-0.5, 0) therefore
/// use the positive scale. NaN encodes as 0.
#[inline]
pub fn sample_to_i16(sample: Sample) -> i16 {
    let s = f64::from(sample).clamp(-1.0, 1.0);
    let scaled = if 0.5 + s < 0.0 { s * 32768.0 } else { s * 32767.0 };
    scaled as i16
}

/// Encode the first `frame_count` frames of `buffer` as a canonical WAV
///
/// `frame_count` may be smaller than the buffer to drop trailing frames.
/// The result is exactly `44 + frame_count * channels * 2` bytes.
///
/// # Errors
/// * `InvalidArgument` - no channels, more than 32767 channels, zero sample
///   rate, `frame_count` past the end of the buffer, or a size that does not
///   fit a 32-bit RIFF header
/// * `AllocationFailure` - the output bytes could not be reserved
pub fn encode(buffer: &SampleBuffer, frame_count: usize) -> Result<WavBytes> {
    let channels = buffer.channel_count();
    if channels == 0 {
        return Err(LoopFillError::invalid("buffer has no channels"));
    }
    let num_channels = u16::try_from(channels)
        .map_err(|_| LoopFillError::invalid(format!("{} channels exceeds WAV limit", channels)))?;
    if buffer.sample_rate() == 0 {
        return Err(LoopFillError::invalid("buffer sample rate must be > 0"));
    }
    if frame_count > buffer.frame_count() {
        return Err(LoopFillError::invalid(format!(
            "requested {} frames but buffer holds {}",
            frame_count,
            buffer.frame_count()
        )));
    }

    let block_align = num_channels as usize * BYTES_PER_SAMPLE;
    let block_align_u16 = u16::try_from(block_align).map_err(|_| {
        LoopFillError::invalid(format!("{} channels exceeds the WAV block align limit", channels))
    })?;
    let data_size = frame_count
        .checked_mul(block_align)
        .filter(|&size| size <= WAV_MAX_DATA_SIZE)
        .ok_or_else(|| {
            LoopFillError::invalid(format!(
                "{} frames x {} channels exceeds the 4 GiB WAV size limit",
                frame_count, channels
            ))
        })?;
    let byte_rate = u32::try_from(buffer.sample_rate() as u64 * block_align as u64)
        .map_err(|_| LoopFillError::invalid("byte rate exceeds 32 bits"))?;

    let total_len = HEADER_LEN + data_size;
    let mut bytes = try_zeroed::<u8>("WAV bytes", total_len)?;
    let mut w = LeWriter::new(&mut bytes);

    // RIFF header
    w.write_tag(b"RIFF");
    w.write_u32((total_len - 8) as u32);
    w.write_tag(b"WAVE");

    // fmt chunk
    w.write_tag(b"fmt ");
    w.write_u32(FMT_CHUNK_SIZE);
    w.write_u16(FORMAT_PCM);
    w.write_u16(num_channels);
    w.write_u32(buffer.sample_rate());
    w.write_u32(byte_rate);
    w.write_u16(block_align_u16);
    w.write_u16(BITS_PER_SAMPLE);

    // data chunk
    w.write_tag(b"data");
    w.write_u32(data_size as u32);
    debug_assert_eq!(w.position(), HEADER_LEN);

    let planes = buffer.channels();
    for frame in 0..frame_count {
        for plane in planes {
            w.write_i16(sample_to_i16(plane[frame]));
        }
    }
    debug_assert_eq!(w.remaining(), 0);

    log::debug!(
        "encode: {} frames, {} ch @ {} Hz -> {} bytes",
        frame_count,
        channels,
        buffer.sample_rate(),
        total_len
    );

    Ok(WavBytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_with_hound(wav: &WavBytes) -> (hound::WavSpec, Vec<i16>) {
        let reader = hound::WavReader::new(Cursor::new(wav.as_bytes().to_vec())).unwrap();
        let spec = reader.spec();
        let samples = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        (spec, samples)
    }

    #[test]
    fn test_sample_conversion_rule() {
        assert_eq!(sample_to_i16(1.0), 32767);
        assert_eq!(sample_to_i16(-1.0), -32768);
        assert_eq!(sample_to_i16(0.0), 0);
        assert_eq!(sample_to_i16(0.5), 16383);
        // -0.5 sits on the boundary and uses the positive scale
        assert_eq!(sample_to_i16(-0.5), -16383);
        assert_eq!(sample_to_i16(-0.25), -8191);
        assert_eq!(sample_to_i16(-0.75), -24576);
        assert_eq!(sample_to_i16(-0.500_001), -16384);
    }

    #[test]
    fn test_sample_conversion_clamps() {
        assert_eq!(sample_to_i16(2.0), 32767);
        assert_eq!(sample_to_i16(-3.5), -32768);
        assert_eq!(sample_to_i16(f32::INFINITY), 32767);
        assert_eq!(sample_to_i16(f32::NEG_INFINITY), -32768);
        assert_eq!(sample_to_i16(f32::NAN), 0);
    }

    #[test]
    fn test_header_layout() {
        let buffer = SampleBuffer::new(44100, vec![vec![0.0; 10], vec![0.0; 10]]).unwrap();
        let wav = encode(&buffer, 10).unwrap();
        let bytes = wav.as_bytes();

        assert_eq!(bytes.len(), 44 + 10 * 2 * 2);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[4..8], &(bytes.len() as u32 - 8).to_le_bytes());
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(&bytes[16..20], &16u32.to_le_bytes());
        assert_eq!(&bytes[20..22], &1u16.to_le_bytes());
        assert_eq!(&bytes[22..24], &2u16.to_le_bytes());
        assert_eq!(&bytes[24..28], &44100u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &(44100u32 * 4).to_le_bytes());
        assert_eq!(&bytes[32..34], &4u16.to_le_bytes());
        assert_eq!(&bytes[34..36], &16u16.to_le_bytes());
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(&bytes[40..44], &40u32.to_le_bytes());
    }

    #[test]
    fn test_length_matches_formula() {
        for &(channels, frames, requested) in &[(1usize, 0usize, 0usize), (1, 7, 7), (2, 100, 37), (6, 11, 11)] {
            let buffer = SampleBuffer::silent(channels, 48000, frames).unwrap();
            let wav = encode(&buffer, requested).unwrap();
            assert_eq!(wav.len(), 44 + requested * channels * 2);
        }
    }

    #[test]
    fn test_interleaves_frame_major() {
        let buffer = SampleBuffer::new(8000, vec![vec![1.0, 0.0], vec![-1.0, 0.5]]).unwrap();
        let wav = encode(&buffer, 2).unwrap();
        assert_eq!(
            wav.data(),
            &[0xFF, 0x7F, 0x00, 0x80, 0x00, 0x00, 0xFF, 0x3F]
        );
    }

    #[test]
    fn test_truncates_to_requested_frames() {
        let buffer = SampleBuffer::new(8000, vec![vec![0.5, 0.5, 1.0, 1.0]]).unwrap();
        let wav = encode(&buffer, 2).unwrap();
        assert_eq!(wav.header().unwrap().frame_count(), 2);
        assert_eq!(wav.data(), &[0xFF, 0x3F, 0xFF, 0x3F]);
        assert_eq!(wav.into_vec().len(), 48);
    }

    #[test]
    fn test_header_round_trip() {
        let buffer = SampleBuffer::silent(3, 22050, 64).unwrap();
        let header = encode(&buffer, 64).unwrap().header().unwrap();
        assert_eq!(header.channels, 3);
        assert_eq!(header.sample_rate, 22050);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.block_align, 6);
        assert_eq!(header.byte_rate, 22050 * 6);
        assert!(header.is_pcm16());
        assert_eq!(header.frame_count(), 64);
    }

    #[test]
    fn test_hound_reads_output() {
        let left: Vec<f32> = (0..256).map(|i| (i as f32 / 128.0) - 1.0).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();
        let buffer = SampleBuffer::new(48000, vec![left.clone(), right.clone()]).unwrap();
        let wav = encode(&buffer, 256).unwrap();

        let (spec, samples) = read_with_hound(&wav);
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        assert_eq!(samples.len(), 512);
        for frame in 0..256 {
            assert_eq!(samples[frame * 2], sample_to_i16(left[frame]));
            assert_eq!(samples[frame * 2 + 1], sample_to_i16(right[frame]));
        }
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        let buffer = SampleBuffer::silent(1, 8000, 10).unwrap();
        assert!(matches!(encode(&buffer, 11), Err(LoopFillError::InvalidArgument(_))));

        let no_channels = SampleBuffer::new(8000, Vec::new()).unwrap();
        assert!(matches!(encode(&no_channels, 0), Err(LoopFillError::InvalidArgument(_))));

        let no_rate = SampleBuffer::silent(1, 0, 10).unwrap();
        assert!(matches!(encode(&no_rate, 10), Err(LoopFillError::InvalidArgument(_))));
    }

    #[test]
    fn test_block_align_limit() {
        // 40000 channels fit a u16 count but need an 80000 byte block align
        let too_wide = SampleBuffer::silent(40000, 8000, 1).unwrap();
        assert!(matches!(encode(&too_wide, 1), Err(LoopFillError::InvalidArgument(_))));

        let widest = SampleBuffer::silent(32767, 8000, 1).unwrap();
        let header = encode(&widest, 1).unwrap().header().unwrap();
        assert_eq!(header.channels, 32767);
        assert_eq!(header.block_align, 65534);
        assert_eq!(header.frame_count(), 1);
    }
}
