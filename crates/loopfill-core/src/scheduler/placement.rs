//! Loop placements on the output timeline

use crate::types::SampleBuffer;

/// One copy of the source laid onto the output timeline
///
/// Placements are back-to-back and never overlap: placement `k` starts at
/// frame `k * source.frame_count()`. Only the last one may be truncated.
#[derive(Debug, Clone, Copy)]
pub struct LoopPlacement<'a> {
    /// Position in the placement sequence (0-based)
    pub index: usize,
    /// First output frame written by this placement
    pub start_frame: usize,
    /// Number of source frames written (less than the source length if truncated)
    pub frame_count: usize,
    /// The buffer being repeated
    pub source: &'a SampleBuffer,
}

impl LoopPlacement<'_> {
    /// Start time in seconds on the output timeline
    pub fn start_seconds(&self) -> f64 {
        self.start_frame as f64 / self.source.sample_rate() as f64
    }

    /// One past the last output frame written
    pub fn end_frame(&self) -> usize {
        self.start_frame + self.frame_count
    }

    /// True if this copy was clipped at the output boundary
    pub fn is_truncated(&self) -> bool {
        self.frame_count < self.source.frame_count()
    }
}

/// Lazy sequence of placements tiling `output_frames`
///
/// Computed purely from the frame counts, so a very short source against a
/// long target costs nothing until iterated.
#[derive(Debug, Clone)]
pub struct Placements<'a> {
    source: &'a SampleBuffer,
    output_frames: usize,
    next: usize,
    count: usize,
}

impl<'a> Placements<'a> {
    /// Caller guarantees `source.frame_count() > 0`
    pub(crate) fn new(source: &'a SampleBuffer, output_frames: usize) -> Self {
        let count = output_frames.div_ceil(source.frame_count());
        Self {
            source,
            output_frames,
            next: 0,
            count,
        }
    }

    /// Frame count of the timeline being tiled
    pub fn output_frames(&self) -> usize {
        self.output_frames
    }
}

impl<'a> Iterator for Placements<'a> {
    type Item = LoopPlacement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let loop_len = self.source.frame_count();
        let start_frame = self.next * loop_len;
        let placement = LoopPlacement {
            index: self.next,
            start_frame,
            frame_count: loop_len.min(self.output_frames - start_frame),
            source: self.source,
        };
        self.next += 1;
        Some(placement)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Placements<'_> {}
