//! Loop scheduler
//!
//! Stretches a clip to a target duration by repeating it back-to-back with
//! no gaps and no cross-fade. The last repetition is clipped exactly at the
//! output boundary.
//!
//! ## Timeline
//!
//! ```text
//! source:  |abcd|
//! target:  |abcdabcdab|
//!           ^   ^   ^
//!           0   4   8   (placement start frames)
//! ```
//!
//! The output holds `ceil(target_secs * sample_rate)` frames, so it is never
//! shorter than the requested duration.

mod placement;

pub use placement::{LoopPlacement, Placements};

use crate::error::{LoopFillError, Result};
use crate::types::SampleBuffer;

/// Number of output frames needed to cover `target_secs` at `sample_rate`
///
/// Rounds up, never returns less than one frame for a positive target.
/// Non-finite or unrepresentable results are reported as `AllocationFailure`
/// since no buffer of that size could exist.
pub fn output_frame_count(target_secs: f64, sample_rate: u32) -> Result<usize> {
    if !(target_secs > 0.0) {
        return Err(LoopFillError::invalid(format!(
            "target duration must be > 0, got {}",
            target_secs
        )));
    }
    if sample_rate == 0 {
        return Err(LoopFillError::invalid("sample rate must be > 0"));
    }

    let exact = target_secs * sample_rate as f64;
    if !exact.is_finite() || exact >= usize::MAX as f64 {
        return Err(LoopFillError::AllocationFailure {
            what: "output frames",
            len: usize::MAX,
        });
    }

    Ok((exact.ceil() as usize).max(1))
}

fn validate_source(source: &SampleBuffer) -> Result<()> {
    if source.channel_count() == 0 {
        return Err(LoopFillError::invalid("source has no channels"));
    }
    if source.sample_rate() == 0 {
        return Err(LoopFillError::invalid("source sample rate must be > 0"));
    }
    if source.frame_count() == 0 {
        return Err(LoopFillError::invalid("source has no frames"));
    }
    Ok(())
}

/// Compute the placements that tile `target_secs` with copies of `source`
///
/// Placement `k` starts at `k * source.duration` and the sequence continues
/// while the start time is before the target. Done in integer frames:
/// `k * frames < ceil(target * rate)` is the same condition for integer
/// start frames, without accumulating float error across many copies.
pub fn plan(source: &SampleBuffer, target_secs: f64) -> Result<Placements<'_>> {
    validate_source(source)?;
    let output_frames = output_frame_count(target_secs, source.sample_rate())?;
    Ok(Placements::new(source, output_frames))
}

/// Render `source` looped to fill `target_secs`
///
/// Returns a newly allocated buffer with the source's channel count and
/// sample rate and exactly `output_frame_count(target_secs, rate)` frames.
///
/// # Errors
/// * `InvalidArgument` - non-positive target, or an empty/zero-rate source
/// * `AllocationFailure` - the output buffer could not be reserved
pub fn schedule(source: &SampleBuffer, target_secs: f64) -> Result<SampleBuffer> {
    let placements = plan(source, target_secs)?;
    let output_frames = placements.output_frames();

    log::debug!(
        "schedule: {} ch @ {} Hz, {} source frames -> {} output frames ({} placements)",
        source.channel_count(),
        source.sample_rate(),
        source.frame_count(),
        output_frames,
        placements.len()
    );

    let mut rendered = SampleBuffer::silent(source.channel_count(), source.sample_rate(), output_frames)?;

    for placement in placements {
        let start = placement.start_frame;
        let end = placement.end_frame();
        for (ch, src) in source.channels().iter().enumerate() {
            rendered.channel_mut(ch)[start..end].copy_from_slice(&src[..placement.frame_count]);
        }
        if placement.is_truncated() {
            log::debug!(
                "schedule: placement {} truncated to {} of {} frames",
                placement.index,
                placement.frame_count,
                source.frame_count()
            );
        }
    }

    log::info!(
        "schedule: rendered {:.3}s from a {:.3}s source",
        rendered.duration_seconds(),
        source.duration_seconds()
    );

    Ok(rendered)
}
