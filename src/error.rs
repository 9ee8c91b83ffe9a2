//! Typed decode-failure surface, grounded on `DracoError`/`ErrorCode`
//! (`examples/Filyus-draco/crates/draco-core/src/error.rs`) and
//! `SymphoniaError` (`examples/pdeljanov-Symphonia/symphonia-core/src/errors.rs`):
//! a closed enum at the public decode boundary, rather than `anyhow`'s
//! stringly-typed `bail!` which this crate's internal builders still use.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RansError {
    #[error("compressed input too short to contain a valid header")]
    TooShort,

    #[error("order byte {0} is neither 0 nor 1")]
    BadOrder(u8),

    #[error("header declares compressed size {declared} but input has {actual} bytes after the header")]
    SizeMismatch { declared: u32, actual: u32 },

    #[error("frequency table entry pushes cumulative frequency past TOTFREQ")]
    TableOverrun,

    #[error("run-length in frequency table pushes symbol index past 255")]
    IndexOverflow,

    #[error("not enough bytes remaining to read the interleaved rANS state words")]
    TruncatedStream,

    #[error("initial rANS state {0} is below the renormalisation lower bound")]
    StateBelowLowerBound(u32),

    #[error("order-1 stream referenced context {0} which has no row in the frequency table")]
    UnknownContext(u8),
}
