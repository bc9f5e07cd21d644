//! errors for plac containers and sessions

use std::io;

/// result type for plac stuff
pub type PlacResult<T> = Result<T, PlacError>;

#[derive(Debug, thiserror::Error)]
pub enum PlacError {
    /// a chunk id or magic number did not match
    #[error("invalid {container} file: expected {expected:?}, found {found:?}")]
    BadMagic {
        container: &'static str,
        expected: String,
        found: String,
    },

    /// a header field holds a value this codec does not handle
    #[error("unsupported {field}: expected {expected}, found {found}")]
    Unsupported {
        field: &'static str,
        expected: u32,
        found: u32,
    },

    /// declared sizes disagree with each other or with the stream
    #[error("inconsistent size: {0}")]
    InconsistentSize(String),

    /// the input ended before a header or the payload was complete
    #[error("unexpected end of file in {0}")]
    Truncated(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PlacError {
    pub(crate) fn bad_magic(container: &'static str, expected: [u8; 4], found: [u8; 4]) -> Self {
        PlacError::BadMagic {
            container,
            expected: String::from_utf8_lossy(&expected).into_owned(),
            found: String::from_utf8_lossy(&found).into_owned(),
        }
    }

    /// true for errors caused by the input's contents rather than the I/O layer
    pub fn is_validation(&self) -> bool {
        !matches!(self, PlacError::Io(_))
    }
}

/// map an early end of input to `Truncated`, keep other I/O errors as they are
pub(crate) fn truncated(context: &'static str) -> impl FnOnce(io::Error) -> PlacError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PlacError::Truncated(context)
        } else {
            PlacError::Io(e)
        }
    }
}
