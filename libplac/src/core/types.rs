//! common types for the plac codec

use serde::Serialize;

// constants

/// Magic number "PLAC"
pub const MAGIC: [u8; 4] = *b"PLAC";

/// format version, the only one a decoder accepts
pub const VERSION: u32 = 0;

/// native header size in bytes
pub const PLAC_HEADER_SIZE: usize = 16;

/// canonical waveform header size in bytes
pub const WAV_HEADER_SIZE: usize = 44;

/// samples per frame
pub const FRAME_SAMPLES: usize = 32;

/// samples per packing group within a frame
pub const GROUP_SAMPLES: usize = 8;

/// packing groups per frame
pub const GROUPS_PER_FRAME: usize = FRAME_SAMPLES / GROUP_SAMPLES;

/// widest code a frame can need
pub const MAX_BIT_WIDTH: u8 = 8;

// waveform constants

pub const RIFF_ID: [u8; 4] = *b"RIFF";
pub const WAVE_ID: [u8; 4] = *b"WAVE";
pub const FMT_ID: [u8; 4] = *b"fmt ";
pub const FACT_ID: [u8; 4] = *b"fact";
pub const DATA_ID: [u8; 4] = *b"data";

/// plain PCM fmt chunk
pub const FMT_SIZE: u32 = 16;
/// fmt chunk carrying a (zero) extension size
pub const FMT_SIZE_EXTENDED: u32 = 18;
/// size of a fact chunk body
pub const FACT_SIZE: u32 = 4;

pub const AUDIO_FORMAT_PCM: u16 = 1;
pub const CHANNELS: u16 = 1;
pub const SAMPLE_RATE: u32 = 8000;
pub const BITS_PER_SAMPLE: u16 = 8;
pub const BLOCK_ALIGN: u16 = 1;
pub const BYTE_RATE: u32 = SAMPLE_RATE * BLOCK_ALIGN as u32;

/// offset of the riff size field in a canonical header
pub const RIFF_SIZE_OFFSET: u64 = 4;
/// offset of the data size field in a canonical header
pub const DATA_SIZE_OFFSET: u64 = 40;
/// offset of the original size field in the native header
pub const ORIGINAL_SIZE_OFFSET: u64 = 8;
/// offset of the compressed size field in the native header
pub const COMPRESSED_SIZE_OFFSET: u64 = 12;

// data structures

/// native container header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacHeader {
    pub version: u32,
    pub original_data_size: u32,
    pub compressed_data_size: u32,
}

impl PlacHeader {
    /// header with both size fields zeroed, ready to be patched
    pub fn placeholder() -> Self {
        PlacHeader {
            version: VERSION,
            original_data_size: 0,
            compressed_data_size: 0,
        }
    }

    /// full frames the payload holds
    pub fn frame_count(&self) -> u64 {
        self.original_data_size as u64 / FRAME_SAMPLES as u64
    }

    /// raw bytes after the last full frame
    pub fn tail_len(&self) -> usize {
        self.original_data_size as usize % FRAME_SAMPLES
    }

    /// smallest payload that could describe `original_data_size` samples
    pub fn min_compressed_size(&self) -> u64 {
        self.frame_count() + self.tail_len() as u64
    }
}

impl Default for PlacHeader {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// waveform container header as parsed
///
/// Only the fields that may vary between accepted files are kept, everything
/// else is pinned to the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    pub riff_size: u32,
    /// 16, or 18 when the extension size field is present
    pub fmt_size: u32,
    /// sample count from an optional fact chunk
    pub fact_samples: Option<u32>,
    pub data_size: u32,
}

impl WavHeader {
    /// header with both size fields zeroed, ready to be patched
    pub fn placeholder() -> Self {
        WavHeader {
            riff_size: 0,
            fmt_size: FMT_SIZE,
            fact_samples: None,
            data_size: 0,
        }
    }

    /// bytes from the start of the file to the first sample
    pub fn header_len(&self) -> usize {
        let fmt_extra = (self.fmt_size - FMT_SIZE) as usize;
        let fact = if self.fact_samples.is_some() {
            8 + FACT_SIZE as usize
        } else {
            0
        };
        WAV_HEADER_SIZE + fmt_extra + fact
    }
}

impl Default for WavHeader {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// which way a session converts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// wav to plac
    Encode,
    /// plac to wav
    Decode,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Encode => f.write_str("encode"),
            Direction::Decode => f.write_str("decode"),
        }
    }
}

/// running counters of a frame loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// full frames processed
    pub frames: u64,
    /// raw bytes passed through after the last frame
    pub tail_len: usize,
    /// data bytes on the uncompressed side
    pub original_bytes: u64,
    /// data bytes on the compressed side
    pub compressed_bytes: u64,
    /// frames per bit width, indexed 0..=8
    pub bit_widths: [u64; MAX_BIT_WIDTH as usize + 1],
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// count one full frame of the given width
    pub fn record_frame(&mut self, bits: u8) {
        self.frames += 1;
        self.original_bytes += FRAME_SAMPLES as u64;
        self.compressed_bytes += crate::frame::encoded_frame_len(bits) as u64;
        self.bit_widths[bits as usize] += 1;
    }

    /// count the raw tail
    pub fn record_tail(&mut self, len: usize) {
        self.tail_len = len;
        self.original_bytes += len as u64;
        self.compressed_bytes += len as u64;
    }

    /// mean bits per sample over full frames
    pub fn mean_bit_width(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        let total: u64 = self
            .bit_widths
            .iter()
            .enumerate()
            .map(|(bits, &count)| bits as u64 * count)
            .sum();
        total as f64 / self.frames as f64
    }
}

/// what a finished session did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub direction: Direction,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub frames: u64,
    pub tail_len: usize,
    pub bit_widths: [u64; MAX_BIT_WIDTH as usize + 1],
}

impl SessionReport {
    pub fn new(direction: Direction, stats: &FrameStats) -> Self {
        SessionReport {
            direction,
            original_bytes: stats.original_bytes,
            compressed_bytes: stats.compressed_bytes,
            frames: stats.frames,
            tail_len: stats.tail_len,
            bit_widths: stats.bit_widths,
        }
    }

    /// output data size over input data size
    ///
    /// compressed/original when encoding, original/compressed when decoding.
    pub fn ratio(&self) -> f64 {
        let (num, den) = match self.direction {
            Direction::Encode => (self.compressed_bytes, self.original_bytes),
            Direction::Decode => (self.original_bytes, self.compressed_bytes),
        };
        if den == 0 {
            0.0
        } else {
            num as f64 / den as f64
        }
    }
}

/// header-level facts about a plac file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacInfo {
    pub version: u32,
    pub sample_rate: u32,
    pub original_data_size: u32,
    pub compressed_data_size: u32,
    pub frames: u64,
    pub tail_len: usize,
    pub duration_secs: f64,
    /// original / compressed
    pub compression_ratio: f64,
    pub file_size: u64,
}

impl PlacInfo {
    pub fn new(header: &PlacHeader, file_size: u64) -> Self {
        let compression_ratio = if header.compressed_data_size == 0 {
            0.0
        } else {
            header.original_data_size as f64 / header.compressed_data_size as f64
        };
        PlacInfo {
            version: header.version,
            sample_rate: SAMPLE_RATE,
            original_data_size: header.original_data_size,
            compressed_data_size: header.compressed_data_size,
            frames: header.frame_count(),
            tail_len: header.tail_len(),
            duration_secs: header.original_data_size as f64 / SAMPLE_RATE as f64,
            compression_ratio,
            file_size,
        }
    }
}
