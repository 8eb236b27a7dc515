//! Loop-fill pipeline: decode -> schedule -> encode

use std::path::Path;

use crate::decode::SourceDecoder;
use crate::error::Result;
use crate::scheduler::schedule;
use crate::types::SampleBuffer;
use crate::wav::{encode, WavBytes};

/// Stretch `source` to `target_secs` by looping and encode it as WAV
///
/// The rendered buffer holds exactly the frames covering the target
/// duration, so it is encoded in full.
pub fn loop_fill(source: &SampleBuffer, target_secs: f64) -> Result<WavBytes> {
    let rendered = schedule(source, target_secs)?;
    let wav = encode(&rendered, rendered.frame_count())?;
    log::info!(
        "loop_fill: {:.3}s target -> {} frames, {} bytes",
        target_secs,
        rendered.frame_count(),
        wav.len()
    );
    Ok(wav)
}

/// Decode the file at `path` with `decoder`, then run [`loop_fill`]
///
/// Decoder failures are returned unchanged.
pub fn loop_fill_file<D>(decoder: &D, path: &Path, target_secs: f64) -> Result<WavBytes>
where
    D: SourceDecoder + ?Sized,
{
    log::debug!("loop_fill_file: decoding {:?} with {}", path, decoder.name());
    let source = decoder.decode(path)?;
    loop_fill(&source, target_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoopFillError;
    use crate::wav::HEADER_LEN;

    fn pattern_source() -> SampleBuffer {
        let pattern = [1.0, -1.0, 0.0, 0.5];
        let samples: Vec<f32> = (0..4000).map(|i| pattern[i % 4]).collect();
        SampleBuffer::new(8000, vec![samples]).unwrap()
    }

    struct FixedDecoder(SampleBuffer);

    impl SourceDecoder for FixedDecoder {
        fn decode(&self, _path: &Path) -> Result<SampleBuffer> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingDecoder;

    impl SourceDecoder for FailingDecoder {
        fn decode(&self, _path: &Path) -> Result<SampleBuffer> {
            Err(LoopFillError::DecodeFailure("unsupported codec".into()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_one_second_from_half_second_pattern() {
        let wav = loop_fill(&pattern_source(), 1.0).unwrap();
        let bytes = wav.as_bytes();

        assert_eq!(bytes.len(), 16044);
        assert_eq!(&bytes[HEADER_LEN..HEADER_LEN + 2], &[0xFF, 0x7F]);
        assert_eq!(&bytes[HEADER_LEN + 2..HEADER_LEN + 4], &[0x00, 0x80]);
        assert_eq!(&bytes[HEADER_LEN + 4..HEADER_LEN + 6], &[0x00, 0x00]);
        assert_eq!(&bytes[HEADER_LEN + 6..HEADER_LEN + 8], &[0xFF, 0x3F]);

        // Second copy starts at frame 4000 with the same pattern
        let second = HEADER_LEN + 4000 * 2;
        assert_eq!(&bytes[second..second + 4], &[0xFF, 0x7F, 0x00, 0x80]);

        let header = wav.header().unwrap();
        assert_eq!(header.channels, 1);
        assert_eq!(header.sample_rate, 8000);
        assert_eq!(header.bits_per_sample, 16);
        assert_eq!(header.frame_count(), 8000);
    }

    #[test]
    fn test_repeated_runs_are_byte_identical() {
        let source = pattern_source();
        let a = loop_fill(&source, 2.3).unwrap();
        let b = loop_fill(&source, 2.3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_target_returns_no_output() {
        let source = pattern_source();
        assert!(matches!(loop_fill(&source, 0.0), Err(LoopFillError::InvalidArgument(_))));
    }

    #[test]
    fn test_loop_fill_file_uses_decoder() {
        let decoder = FixedDecoder(pattern_source());
        let wav = loop_fill_file(&decoder, Path::new("ignored.wav"), 0.25).unwrap();
        assert_eq!(wav.len(), HEADER_LEN + 2000 * 2);
    }

    #[test]
    fn test_decoder_failure_passes_through() {
        let err = loop_fill_file(&FailingDecoder, Path::new("x.ogg"), 1.0).unwrap_err();
        match err {
            LoopFillError::DecodeFailure(msg) => assert_eq!(msg, "unsupported codec"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_dyn_decoder() {
        let decoder: Box<dyn SourceDecoder> = Box::new(FixedDecoder(pattern_source()));
        assert!(loop_fill_file(decoder.as_ref(), Path::new("a.wav"), 0.1).is_ok());
    }
}
