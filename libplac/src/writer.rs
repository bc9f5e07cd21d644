use std::io::{Seek, SeekFrom, Write};

use crate::core::{
    PlacError, PlacHeader, PlacResult, WavHeader, AUDIO_FORMAT_PCM, BITS_PER_SAMPLE, BLOCK_ALIGN,
    BYTE_RATE, CHANNELS, COMPRESSED_SIZE_OFFSET, DATA_ID, DATA_SIZE_OFFSET, FMT_ID, FMT_SIZE,
    MAGIC, ORIGINAL_SIZE_OFFSET, PLAC_HEADER_SIZE, RIFF_ID, RIFF_SIZE_OFFSET, SAMPLE_RATE,
    WAVE_ID, WAV_HEADER_SIZE,
};

/// canonical 44-byte waveform header
///
/// fmt extension and fact chunks are never written.
pub fn wav_header_bytes(header: &WavHeader) -> [u8; WAV_HEADER_SIZE] {
    let mut bytes = [0u8; WAV_HEADER_SIZE];

    // riff
    bytes[0..4].copy_from_slice(&RIFF_ID);
    bytes[4..8].copy_from_slice(&header.riff_size.to_le_bytes());
    bytes[8..12].copy_from_slice(&WAVE_ID);

    // fmt
    bytes[12..16].copy_from_slice(&FMT_ID);
    bytes[16..20].copy_from_slice(&FMT_SIZE.to_le_bytes());
    bytes[20..22].copy_from_slice(&AUDIO_FORMAT_PCM.to_le_bytes());
    bytes[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
    bytes[24..28].copy_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes[28..32].copy_from_slice(&BYTE_RATE.to_le_bytes());
    bytes[32..34].copy_from_slice(&BLOCK_ALIGN.to_le_bytes());
    bytes[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data
    bytes[36..40].copy_from_slice(&DATA_ID);
    bytes[40..44].copy_from_slice(&header.data_size.to_le_bytes());
    bytes
}

/// 16-byte native header
pub fn plac_header_bytes(header: &PlacHeader) -> [u8; PLAC_HEADER_SIZE] {
    let mut bytes = [0u8; PLAC_HEADER_SIZE];
    bytes[0..4].copy_from_slice(&MAGIC);
    bytes[4..8].copy_from_slice(&header.version.to_le_bytes());
    bytes[8..12].copy_from_slice(&header.original_data_size.to_le_bytes());
    bytes[12..16].copy_from_slice(&header.compressed_data_size.to_le_bytes());
    bytes
}

/// header writer over a seekable sink
///
/// Headers go out with zeroed sizes first and get patched in place once the
/// payload is written.
pub struct Writer<W> {
    inner: W,
    header_start: u64,
}

impl<W: Write + Seek> Writer<W> {
    /// new writer, the header starts at the sink's current position
    pub fn new(mut inner: W) -> PlacResult<Self> {
        let header_start = inner.stream_position()?;
        Ok(Writer {
            inner,
            header_start,
        })
    }

    pub fn write_wav_header(&mut self, header: &WavHeader) -> PlacResult<()> {
        self.inner.write_all(&wav_header_bytes(header))?;
        Ok(())
    }

    pub fn write_plac_header(&mut self, header: &PlacHeader) -> PlacResult<()> {
        self.inner.write_all(&plac_header_bytes(header))?;
        Ok(())
    }

    /// fill in riff and data sizes of a canonical header
    pub fn patch_wav_sizes(&mut self, data_size: u64) -> PlacResult<()> {
        let riff_size = (WAV_HEADER_SIZE as u64 - 8) + data_size;
        self.patch_u32(RIFF_SIZE_OFFSET, to_u32(riff_size, "riff size")?)?;
        self.patch_u32(DATA_SIZE_OFFSET, to_u32(data_size, "data size")?)
    }

    /// fill in the two size fields of a native header
    pub fn patch_plac_sizes(&mut self, original: u64, compressed: u64) -> PlacResult<()> {
        self.patch_u32(ORIGINAL_SIZE_OFFSET, to_u32(original, "original data size")?)?;
        self.patch_u32(
            COMPRESSED_SIZE_OFFSET,
            to_u32(compressed, "compressed data size")?,
        )
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    // write at header offset, then go back to where we were
    fn patch_u32(&mut self, offset: u64, value: u32) -> PlacResult<()> {
        let end = self.inner.stream_position()?;
        self.inner
            .seek(SeekFrom::Start(self.header_start + offset))?;
        self.inner.write_all(&value.to_le_bytes())?;
        self.inner.seek(SeekFrom::Start(end))?;
        Ok(())
    }
}

fn to_u32(value: u64, what: &str) -> PlacResult<u32> {
    u32::try_from(value)
        .map_err(|_| PlacError::InconsistentSize(format!("{} {} exceeds 32 bits", what, value)))
}
