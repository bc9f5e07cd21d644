use std::io::{Read, Write};

use tracing::trace;

use crate::core::error::truncated;
use crate::core::{
    zigzag, BitReader, FrameStats, PlacError, PlacHeader, PlacResult, FRAME_SAMPLES,
    GROUPS_PER_FRAME, MAX_BIT_WIDTH,
};

use super::{bit_width, copy_tail, split_frames};

/// unpacks 32-sample frames
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        FrameDecoder
    }

    /// read one frame from `input` into `samples`, returns the bit width it used
    pub fn decode_frame<R: Read>(
        &self,
        input: &mut R,
        samples: &mut [u8; FRAME_SAMPLES],
    ) -> PlacResult<u8> {
        let mut max_code = [0u8; 1];
        input
            .read_exact(&mut max_code)
            .map_err(truncated("plac payload"))?;
        let bits = bit_width(max_code[0]);

        if bits == 0 {
            samples.fill(zigzag::SILENCE);
            return Ok(0);
        }

        let mut packed = [0u8; GROUPS_PER_FRAME * MAX_BIT_WIDTH as usize];
        let packed = &mut packed[..GROUPS_PER_FRAME * bits as usize];
        input
            .read_exact(packed)
            .map_err(truncated("plac payload"))?;

        unpack_codes(packed, bits, samples);
        zigzag::inverse_in_place(samples);

        Ok(bits)
    }

    /// decode the payload described by `header` from `input`
    ///
    /// The header's compressed size must match what the frames actually used.
    pub fn decode_stream<R: Read, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        header: &PlacHeader,
        stats: &mut FrameStats,
    ) -> PlacResult<()> {
        let (frames, tail_len) = split_frames(header.original_data_size as u64);

        let mut samples = [0u8; FRAME_SAMPLES];
        for index in 0..frames {
            let bits = self.decode_frame(input, &mut samples)?;
            output.write_all(&samples)?;

            stats.record_frame(bits);
            trace!(frame = index, bits, "decoded frame");

            // a corrupt width can only ever make the payload longer
            if stats.compressed_bytes > header.compressed_data_size as u64 {
                return Err(PlacError::InconsistentSize(format!(
                    "frames exceed declared compressed size of {} bytes",
                    header.compressed_data_size
                )));
            }
        }

        copy_tail(input, output, tail_len, "plac payload")?;
        stats.record_tail(tail_len);

        if stats.compressed_bytes != header.compressed_data_size as u64 {
            return Err(PlacError::InconsistentSize(format!(
                "payload used {} bytes, header declares {}",
                stats.compressed_bytes, header.compressed_data_size
            )));
        }

        Ok(())
    }
}

/// split `packed` into 32 codes of `bits` bits each, low-order bits only
pub fn unpack_codes(packed: &[u8], bits: u8, codes: &mut [u8; FRAME_SAMPLES]) {
    let mut reader = BitReader::new(packed);
    for code in codes.iter_mut() {
        *code = reader.read_bits(bits);
    }
}
