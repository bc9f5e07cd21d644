//! Conversion sessions
//!
//! An `Encoder` or `Decoder` validates its input header up front, so a caller
//! can reject a bad file before creating any output. Converting then hands
//! the input and the output sink to a `Session` which owns both, keeps the
//! running counters and patches the header sizes at the end.

use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::core::{
    Direction, FrameStats, PlacHeader, PlacInfo, PlacResult, SessionReport, WavHeader,
};
use crate::frame::{FrameDecoder, FrameEncoder};
use crate::reader::{check_plac_sizes, check_wav_sizes, Reader};
use crate::writer::Writer;

/// one conversion in flight
struct Session<R, W> {
    input: R,
    output: Writer<W>,
    stats: FrameStats,
}

impl<R: Read, W: Write + Seek> Session<R, W> {
    fn new(input: R, output: W) -> PlacResult<Self> {
        Ok(Session {
            input,
            output: Writer::new(output)?,
            stats: FrameStats::new(),
        })
    }

    fn finish(mut self, direction: Direction) -> PlacResult<SessionReport> {
        self.output.get_mut().flush()?;

        debug!(
            %direction,
            frames = self.stats.frames,
            tail_len = self.stats.tail_len,
            original_bytes = self.stats.original_bytes,
            compressed_bytes = self.stats.compressed_bytes,
            mean_bits = self.stats.mean_bit_width(),
            "session finished"
        );
        Ok(SessionReport::new(direction, &self.stats))
    }
}

/// bytes between the current position and the end, position unchanged
fn remaining_len<S: Seek>(stream: &mut S) -> PlacResult<u64> {
    let start = stream.stream_position()?;
    let end = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(start))?;
    Ok(end.saturating_sub(start))
}

/// wav to plac
pub struct Encoder<R> {
    input: R,
    header: WavHeader,
}

impl<R: Read + Seek> Encoder<R> {
    /// read and validate the waveform header at the input's current position
    pub fn new(mut input: R) -> PlacResult<Self> {
        let stream_len = remaining_len(&mut input)?;

        let mut reader = Reader::new(input);
        let header = reader.read_wav_header()?;
        check_wav_sizes(&header, stream_len)?;

        Ok(Encoder {
            input: reader.into_inner(),
            header,
        })
    }

    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    /// compress the data section into `output`
    pub fn encode_to<W: Write + Seek>(self, output: W) -> PlacResult<SessionReport> {
        let data_size = self.header.data_size as u64;
        let mut session = Session::new(self.input, output)?;

        session.output.write_plac_header(&PlacHeader::placeholder())?;
        FrameEncoder::new().encode_stream(
            &mut session.input,
            session.output.get_mut(),
            data_size,
            &mut session.stats,
        )?;
        session
            .output
            .patch_plac_sizes(session.stats.original_bytes, session.stats.compressed_bytes)?;

        session.finish(Direction::Encode)
    }
}

/// plac to wav
pub struct Decoder<R> {
    input: R,
    header: PlacHeader,
    stream_len: u64,
}

impl<R: Read + Seek> Decoder<R> {
    /// read and validate the native header at the input's current position
    pub fn new(mut input: R) -> PlacResult<Self> {
        let stream_len = remaining_len(&mut input)?;

        let mut reader = Reader::new(input);
        let header = reader.read_plac_header()?;
        check_plac_sizes(&header, stream_len)?;

        Ok(Decoder {
            input: reader.into_inner(),
            header,
            stream_len,
        })
    }

    pub fn header(&self) -> &PlacHeader {
        &self.header
    }

    /// header-level summary of the file
    pub fn info(&self) -> PlacInfo {
        PlacInfo::new(&self.header, self.stream_len)
    }

    /// expand the payload into a canonical waveform file in `output`
    pub fn decode_to<W: Write + Seek>(self, output: W) -> PlacResult<SessionReport> {
        let header = self.header;
        let mut session = Session::new(self.input, output)?;

        session.output.write_wav_header(&WavHeader::placeholder())?;
        FrameDecoder::new().decode_stream(
            &mut session.input,
            session.output.get_mut(),
            &header,
            &mut session.stats,
        )?;
        session.output.patch_wav_sizes(session.stats.original_bytes)?;

        session.finish(Direction::Decode)
    }
}

/// read just the native header of `input`
pub fn probe<R: Read + Seek>(input: R) -> PlacResult<PlacInfo> {
    Ok(Decoder::new(input)?.info())
}
