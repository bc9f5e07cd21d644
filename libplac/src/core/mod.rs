pub mod bits;
pub mod error;
pub mod types;
pub mod zigzag;

pub use bits::{BitReader, BitWriter};
pub use error::{PlacError, PlacResult};
pub use types::*;
