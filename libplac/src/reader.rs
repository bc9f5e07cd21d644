use std::io::Read;

use tracing::{debug, warn};

use crate::core::error::truncated;
use crate::core::{
    PlacError, PlacHeader, PlacResult, WavHeader, AUDIO_FORMAT_PCM, BITS_PER_SAMPLE, BLOCK_ALIGN,
    BYTE_RATE, CHANNELS, DATA_ID, FACT_ID, FACT_SIZE, FMT_ID, FMT_SIZE, FMT_SIZE_EXTENDED, MAGIC,
    PLAC_HEADER_SIZE, RIFF_ID, SAMPLE_RATE, VERSION, WAVE_ID,
};

/// header reader for both containers
pub struct Reader<R> {
    inner: R,
    context: &'static str,
}

impl<R: Read> Reader<R> {
    /// new reader, positioned at the start of a header
    pub fn new(inner: R) -> Self {
        Reader {
            inner,
            context: "header",
        }
    }

    /// read and validate a waveform header up to the first data byte
    pub fn read_wav_header(&mut self) -> PlacResult<WavHeader> {
        self.context = "wave header";

        // riff
        self.expect_id("wave", RIFF_ID)?;
        let riff_size = self.read_u32_le()?;
        self.expect_id("wave", WAVE_ID)?;

        // fmt
        self.expect_id("wave", FMT_ID)?;
        let fmt_size = self.read_u32_le()?;
        if fmt_size != FMT_SIZE && fmt_size != FMT_SIZE_EXTENDED {
            return Err(unsupported("fmt chunk size", FMT_SIZE, fmt_size));
        }

        let audio_format = self.read_u16_le()?;
        expect_field("audio format", AUDIO_FORMAT_PCM as u32, audio_format as u32)?;
        let channels = self.read_u16_le()?;
        expect_field("channel count", CHANNELS as u32, channels as u32)?;
        let sample_rate = self.read_u32_le()?;
        expect_field("sample rate", SAMPLE_RATE, sample_rate)?;
        let byte_rate = self.read_u32_le()?;
        expect_field("byte rate", BYTE_RATE, byte_rate)?;
        let block_align = self.read_u16_le()?;
        expect_field("block align", BLOCK_ALIGN as u32, block_align as u32)?;
        let bits_per_sample = self.read_u16_le()?;
        expect_field("bits per sample", BITS_PER_SAMPLE as u32, bits_per_sample as u32)?;

        if fmt_size == FMT_SIZE_EXTENDED {
            let extension_size = self.read_u16_le()?;
            expect_field("fmt extension size", 0, extension_size as u32)?;
        }

        // optional fact, then data
        let mut id = self.read_id()?;
        let mut fact_samples = None;
        if id == FACT_ID {
            let fact_size = self.read_u32_le()?;
            expect_field("fact chunk size", FACT_SIZE, fact_size)?;
            fact_samples = Some(self.read_u32_le()?);
            id = self.read_id()?;
        }
        if id != DATA_ID {
            return Err(PlacError::bad_magic("wave", DATA_ID, id));
        }
        let data_size = self.read_u32_le()?;

        if let Some(samples) = fact_samples {
            if samples != data_size {
                warn!(
                    fact_samples = samples,
                    data_size, "fact sample count disagrees with data size"
                );
            }
        }

        let header = WavHeader {
            riff_size,
            fmt_size,
            fact_samples,
            data_size,
        };
        debug!(?header, "read wave header");
        Ok(header)
    }

    /// read and validate a native header
    pub fn read_plac_header(&mut self) -> PlacResult<PlacHeader> {
        self.context = "plac header";

        self.expect_id("plac", MAGIC)?;
        let version = self.read_u32_le()?;
        expect_field("plac version", VERSION, version)?;

        let header = PlacHeader {
            version,
            original_data_size: self.read_u32_le()?,
            compressed_data_size: self.read_u32_le()?,
        };
        debug!(?header, "read plac header");
        Ok(header)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn expect_id(&mut self, container: &'static str, expected: [u8; 4]) -> PlacResult<()> {
        let found = self.read_id()?;
        if found != expected {
            return Err(PlacError::bad_magic(container, expected, found));
        }
        Ok(())
    }

    fn read_id(&mut self) -> PlacResult<[u8; 4]> {
        let mut bytes = [0u8; 4];
        self.inner
            .read_exact(&mut bytes)
            .map_err(truncated(self.context))?;
        Ok(bytes)
    }

    fn read_u16_le(&mut self) -> PlacResult<u16> {
        let mut bytes = [0u8; 2];
        self.inner
            .read_exact(&mut bytes)
            .map_err(truncated(self.context))?;
        Ok(u16::from_le_bytes(bytes))
    }

    fn read_u32_le(&mut self) -> PlacResult<u32> {
        let mut bytes = [0u8; 4];
        self.inner
            .read_exact(&mut bytes)
            .map_err(truncated(self.context))?;
        Ok(u32::from_le_bytes(bytes))
    }
}

/// check a waveform header's sizes against the stream holding it
pub fn check_wav_sizes(header: &WavHeader, stream_len: u64) -> PlacResult<()> {
    let data_end = header.header_len() as u64 + header.data_size as u64;
    if data_end > stream_len {
        return Err(PlacError::InconsistentSize(format!(
            "data chunk declares {} bytes but only {} follow the header",
            header.data_size,
            stream_len.saturating_sub(header.header_len() as u64)
        )));
    }
    if header.riff_size as u64 + 8 < data_end {
        return Err(PlacError::InconsistentSize(format!(
            "riff size {} does not cover the data chunk ending at {}",
            header.riff_size, data_end
        )));
    }
    Ok(())
}

/// check a native header's sizes against the stream holding it
pub fn check_plac_sizes(header: &PlacHeader, stream_len: u64) -> PlacResult<()> {
    let payload = stream_len.saturating_sub(PLAC_HEADER_SIZE as u64);
    if header.compressed_data_size as u64 != payload {
        return Err(PlacError::InconsistentSize(format!(
            "header declares {} compressed bytes, file holds {}",
            header.compressed_data_size, payload
        )));
    }
    if (header.compressed_data_size as u64) < header.min_compressed_size() {
        return Err(PlacError::InconsistentSize(format!(
            "{} compressed bytes cannot hold {} samples",
            header.compressed_data_size, header.original_data_size
        )));
    }
    Ok(())
}

fn unsupported(field: &'static str, expected: u32, found: u32) -> PlacError {
    PlacError::Unsupported {
        field,
        expected,
        found,
    }
}

fn expect_field(field: &'static str, expected: u32, found: u32) -> PlacResult<()> {
    if found != expected {
        return Err(unsupported(field, expected, found));
    }
    Ok(())
}
