//! Document decoding
//!
//! Turns raw input (line-delimited JSON or a whole JSON file) into the
//! per-document values the inference engine consumes.

mod decoders;
mod types;

pub use decoders::{build_decoder, JsonDecoder, JsonlDecoder};
pub use types::{DocumentFormat, RecordDecoder};

#[cfg(test)]
mod tests;
