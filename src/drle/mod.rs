mod decoder;
mod encoder;
mod token;

pub use decoder::{decode_drle, decode_drle_with, DrleDecoder};
pub use encoder::{encode_drle, encode_drle_with, DrleEncoder};
pub use token::{Token, TokenBytes};

/// Stream layout variants. Both share the token format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrleFormat {
    /// Bit compatible with deployed streams: the first byte carries the seed
    /// run and is dropped by the decoder, and a trailing run of one sample is
    /// not flushed.
    #[default]
    Compat,
    /// No seed token, every run flushed. Round-trips any input whose values
    /// fit the 13-bit payload; the encoder fails on anything larger.
    Exact,
}

/// Options shared by [`DrleEncoder`] and [`DrleDecoder`]. Both sides of a
/// link must agree on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrleOptions {
    pub format: DrleFormat,
    /// Value both sides assume before the first sample.
    pub seed: u16,
}
