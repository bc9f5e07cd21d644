//! replac - WAV <-> PLAC file converter library
//!
//! File-level plumbing around libplac: picks the direction from the input's
//! extension, chooses a free output name, runs the session and removes any
//! partially written output when it fails.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Re-export libplac types
pub use libplac_audio::{Direction, PlacError, PlacInfo, SessionReport};

/// extension of waveform files
pub const WAV_EXTENSION: &str = "wav";

/// extension of compressed files
pub const PLAC_EXTENSION: &str = "plac";

/// conversion direction implied by a path's extension
pub fn direction_for_path(path: &Path) -> Result<Direction> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some(WAV_EXTENSION) => Ok(Direction::Encode),
        Some(PLAC_EXTENSION) => Ok(Direction::Decode),
        Some(other) => bail!(
            "Unsupported file extension '.{}': expected .{} or .{}",
            other,
            WAV_EXTENSION,
            PLAC_EXTENSION
        ),
        None => bail!(
            "{} has no file extension: expected .{} or .{}",
            path.display(),
            WAV_EXTENSION,
            PLAC_EXTENSION
        ),
    }
}

/// first free output path for `input` converted in `direction`
///
/// `song.wav` becomes `song.plac`, then `song(1).plac`, `song(2).plac`, ...
pub fn output_path_for(input: &Path, direction: Direction) -> PathBuf {
    let extension = match direction {
        Direction::Encode => PLAC_EXTENSION,
        Direction::Decode => WAV_EXTENSION,
    };

    let candidate = input.with_extension(extension);
    if !candidate.exists() {
        return candidate;
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (1u32..)
        .map(|n| input.with_file_name(format!("{}({}).{}", stem, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// what one conversion did
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub elapsed_secs: f64,
    /// output data size over input data size
    pub ratio: f64,
    pub session: SessionReport,
}

impl ConversionReport {
    fn new(input: &Path, output: &Path, elapsed: Duration, session: SessionReport) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            elapsed_secs: elapsed.as_secs_f64(),
            ratio: session.ratio(),
            session,
        }
    }
}

/// convert `input` next to itself, direction picked from its extension
///
/// The input header is validated before the output file is created. If the
/// conversion then fails the output is removed again.
pub fn convert_file(input: &Path) -> Result<ConversionReport> {
    let direction = direction_for_path(input)?;
    if !input.is_file() {
        bail!("File not found: {}", input.display());
    }

    let started = Instant::now();
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );

    match direction {
        Direction::Encode => {
            let encoder = libplac_audio::Encoder::new(reader)
                .map_err(|e| header_error(e, WAV_EXTENSION, input))?;
            debug!(header = ?encoder.header(), "validated input");
            let output = output_path_for(input, direction);
            let session = write_output(&output, |sink| encoder.encode_to(sink))?;
            Ok(ConversionReport::new(input, &output, started.elapsed(), session))
        }
        Direction::Decode => {
            let decoder = libplac_audio::Decoder::new(reader)
                .map_err(|e| header_error(e, PLAC_EXTENSION, input))?;
            debug!(header = ?decoder.header(), "validated input");
            let output = output_path_for(input, direction);
            let session = write_output(&output, |sink| decoder.decode_to(sink))?;
            Ok(ConversionReport::new(input, &output, started.elapsed(), session))
        }
    }
}

/// create `output`, run `convert` into it, delete it again on failure
fn write_output<F>(output: &Path, convert: F) -> Result<SessionReport>
where
    F: FnOnce(&mut BufWriter<File>) -> libplac_audio::PlacResult<SessionReport>,
{
    let file = File::create_new(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    info!(output = %output.display(), "writing");

    let mut sink = BufWriter::new(file);
    let result = convert(&mut sink);
    // close before any removal
    drop(sink);

    match result {
        Ok(session) => Ok(session),
        Err(e) => {
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(output = %output.display(), error = %remove_err, "could not remove partial output");
            }
            Err(e).with_context(|| format!("Conversion to {} failed", output.display()))
        }
    }
}

/// header-level info about a plac file
pub fn inspect_file(input: &Path) -> Result<PlacInfo> {
    if direction_for_path(input)? != Direction::Decode {
        bail!("--info expects a .{} file", PLAC_EXTENSION);
    }
    let reader = BufReader::new(
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?,
    );
    libplac_audio::probe(reader).map_err(|e| header_error(e, PLAC_EXTENSION, input))
}

// bad contents and failed reads get different messages
fn header_error(e: PlacError, kind: &str, input: &Path) -> anyhow::Error {
    let context = if e.is_validation() {
        format!("Invalid {} file {}", kind, input.display())
    } else {
        format!("Failed to read {}", input.display())
    };
    anyhow::Error::new(e).context(context)
}
