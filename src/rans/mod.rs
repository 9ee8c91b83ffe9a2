pub mod kernel;
pub mod symbol;

pub use kernel::RansState;
pub use symbol::{DecoderSymbol, EncoderSymbol};
