//! Adaptive fixed-width frame codec
//!
//! Samples are grouped into frames of 32. Each frame is zigzag-transformed and
//! stored as its largest code followed by every code packed at the smallest
//! width that holds that maximum:
//!
//! | Bytes       | Content                                          |
//! |-------------|--------------------------------------------------|
//! | 1           | max code of the frame                            |
//! | 4 x `bits`  | 4 groups of 8 codes, `bits` each, MSB first      |
//!
//! A frame of silence therefore costs a single zero byte. The last
//! `len % 32` samples of a stream are not framed and are copied verbatim.

pub mod decoder;
pub mod encoder;

#[cfg(test)]
mod tests;

use std::io::{Read, Write};

use crate::core::error::truncated;
use crate::core::{PlacResult, FRAME_SAMPLES, GROUPS_PER_FRAME, MAX_BIT_WIDTH};

pub use decoder::FrameDecoder;
pub use encoder::FrameEncoder;

/// largest number of bytes a single frame can take
pub const MAX_ENCODED_FRAME_LEN: usize = 1 + GROUPS_PER_FRAME * MAX_BIT_WIDTH as usize;

/// bits needed to store every code up to `max_code`, i.e. ceil(log2(max_code + 1))
#[inline]
pub fn bit_width(max_code: u8) -> u8 {
    (u8::BITS - max_code.leading_zeros()) as u8
}

/// bytes a full frame of the given width occupies
#[inline]
pub fn encoded_frame_len(bits: u8) -> usize {
    1 + GROUPS_PER_FRAME * bits as usize
}

/// number of full frames and tail length for a data section
pub fn split_frames(data_size: u64) -> (u64, usize) {
    (
        data_size / FRAME_SAMPLES as u64,
        (data_size % FRAME_SAMPLES as u64) as usize,
    )
}

/// pass the unframed tail through untouched
pub(crate) fn copy_tail<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    len: usize,
    context: &'static str,
) -> PlacResult<()> {
    debug_assert!(len < FRAME_SAMPLES);
    let mut tail = [0u8; FRAME_SAMPLES];
    input
        .read_exact(&mut tail[..len])
        .map_err(truncated(context))?;
    output.write_all(&tail[..len])?;
    Ok(())
}
