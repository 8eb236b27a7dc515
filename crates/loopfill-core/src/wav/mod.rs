//! Canonical 16-bit PCM WAV encoding
//!
//! Produces the classic 44-byte-header RIFF/WAVE layout:
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  total length - 8
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  16 (fmt chunk size)
//!     20     2  1 (PCM)
//!     22     2  channels
//!     24     4  sample rate
//!     28     4  byte rate (rate * channels * 2)
//!     32     2  block align (channels * 2)
//!     34     2  16 (bits per sample)
//!     36     4  "data"
//!     40     4  data size (frames * channels * 2)
//!     44     -  interleaved i16 LE samples, frame-major
//! ```

mod encoder;
mod header;
mod writer;

pub use encoder::{encode, sample_to_i16, WavBytes};
pub use header::WavHeader;
pub use writer::LeWriter;

/// Size of the canonical header (12 RIFF + 24 fmt + 8 data chunk header)
pub const HEADER_LEN: usize = 44;

/// Size of the fmt chunk body for plain PCM
pub const FMT_CHUNK_SIZE: u32 = 16;

/// WAVE_FORMAT_PCM
pub const FORMAT_PCM: u16 = 1;

/// Output bit depth
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per encoded sample
pub const BYTES_PER_SAMPLE: usize = 2;

/// Largest data chunk whose RIFF size (data + 36) still fits in 32 bits
pub const WAV_MAX_DATA_SIZE: usize = (u32::MAX - 36) as usize;
