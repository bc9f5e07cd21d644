//! PLAC - lossless compression for 8 kHz, 8-bit mono PCM
//!
//! Samples are zigzag-mapped around silence and packed in 32-sample frames at
//! the smallest bit width each frame needs. Conversions run through
//! [`Encoder`] and [`Decoder`] over any seekable streams; [`encode`] and
//! [`decode`] do the same on byte buffers.

use std::io::Cursor;

pub mod core;
pub mod frame;
pub mod session;

mod reader;
mod writer;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::{
    zigzag, Direction, FrameStats, PlacError, PlacHeader, PlacInfo, PlacResult, SessionReport,
    WavHeader, FRAME_SAMPLES, MAGIC, PLAC_HEADER_SIZE, SAMPLE_RATE, VERSION, WAV_HEADER_SIZE,
};
pub use frame::{bit_width, encoded_frame_len, FrameDecoder, FrameEncoder};
pub use reader::{check_plac_sizes, check_wav_sizes, Reader};
pub use session::{probe, Decoder, Encoder};
pub use writer::{plac_header_bytes, wav_header_bytes, Writer};

/// encode a complete wav file held in memory
///
/// # Arguments
/// * `wav` - bytes of a mono, 8-bit, 8000 Hz PCM wav file
///
/// # Returns
/// plac file as byte array
pub fn encode(wav: &[u8]) -> PlacResult<Vec<u8>> {
    let mut output = Cursor::new(Vec::with_capacity(wav.len()));
    Encoder::new(Cursor::new(wav))?.encode_to(&mut output)?;
    Ok(output.into_inner())
}

/// decode a complete plac file held in memory
///
/// # Returns
/// canonical 44-byte-header wav file as byte array
pub fn decode(plac: &[u8]) -> PlacResult<Vec<u8>> {
    let mut output = Cursor::new(Vec::new());
    Decoder::new(Cursor::new(plac))?.decode_to(&mut output)?;
    Ok(output.into_inner())
}

/// header-level info about a plac file held in memory
pub fn info(plac: &[u8]) -> PlacResult<PlacInfo> {
    probe(Cursor::new(plac))
}
