use std::io::{Read, Write};

use tracing::trace;

use crate::core::error::truncated;
use crate::core::{
    zigzag, BitWriter, FrameStats, PlacResult, FRAME_SAMPLES, GROUPS_PER_FRAME, GROUP_SAMPLES,
};

use super::{bit_width, copy_tail, split_frames, MAX_ENCODED_FRAME_LEN};

/// packs 32-sample frames
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameEncoder;

impl FrameEncoder {
    pub fn new() -> Self {
        FrameEncoder
    }

    /// encode one full frame onto `out`, returns the bit width used
    pub fn encode_frame(&self, samples: &[u8; FRAME_SAMPLES], out: &mut Vec<u8>) -> u8 {
        let mut codes = *samples;
        zigzag::forward_in_place(&mut codes);

        let max_code = codes.iter().copied().max().unwrap_or(0);
        let bits = bit_width(max_code);
        out.push(max_code);

        // every code is zero, nothing to pack
        if bits == 0 {
            return 0;
        }

        let mut writer = BitWriter::with_capacity(GROUPS_PER_FRAME * bits as usize);
        for group in codes.chunks_exact(GROUP_SAMPLES) {
            for &code in group {
                writer.write_bits(code, bits);
            }
            // 8 codes of `bits` bits always end on a byte boundary
            debug_assert!(writer.is_aligned());
        }
        out.extend_from_slice(&writer.into_bytes());

        bits
    }

    /// encode a whole data section of `data_size` samples from `input`
    ///
    /// Frames are written as they are read; the trailing `data_size % 32`
    /// samples are copied raw. Counters accumulate in `stats`.
    pub fn encode_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        data_size: u64,
        stats: &mut FrameStats,
    ) -> PlacResult<()> {
        let (frames, tail_len) = split_frames(data_size);

        let mut samples = [0u8; FRAME_SAMPLES];
        let mut packed = Vec::with_capacity(MAX_ENCODED_FRAME_LEN);

        for index in 0..frames {
            input
                .read_exact(&mut samples)
                .map_err(truncated("wave data"))?;

            packed.clear();
            let bits = self.encode_frame(&samples, &mut packed);
            output.write_all(&packed)?;

            stats.record_frame(bits);
            trace!(frame = index, bits, "encoded frame");
        }

        copy_tail(input, output, tail_len, "wave data")?;
        stats.record_tail(tail_len);

        Ok(())
    }
}
