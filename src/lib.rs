//! # DRLE Encoding Scheme
//!
//! Samples are delta encoded against the previous sample (`delta = prev - cur`,
//! 16-bit wrapping) and runs of up to 4 equal deltas are folded into one token.
//!
//! ```text
//!         MSB      LSB
//!          │        │
//!          ▼        ▼
//!         0CCD DDDD
//!         ▲
//!  SHORT──┘
//! ```
//!
//! When the delta, read as an unsigned 16-bit number, is at most `0x1F`,
//! the token is one byte. `CC` is `count - 1`, `DDDDD` the delta.
//!
//! ```text
//!          MSB                LSB
//!           │                  │
//!           ▼                  ▼
//!         1CCD DDDD  DDDD DDDD
//!         ▲
//!   WIDE──┘
//! ```
//!
//! Otherwise the token is two bytes carrying the low 13 bits of the delta.
//! The decoder sign extends from bit 12, so wide deltas cover `-4096..=4095`.
//!
//! Decoding applies `value = value - delta` `count` times per token and emits
//! `value & 0x1FFF`.
//!
//! The encoding does not include size, nor a checksum.
//! The decoder MUST be fed exactly the bytes of one encoder run.
//!
//! # Seed
//!
//! Both sides start from a seed value (0 unless configured) and a seed delta
//! of 0. In [`DrleFormat::Compat`] the encoder always emits the seed run as
//! its first token and the decoder drops the first byte of the stream.
//! Samples equal to the seed at the head of the input merge into that token
//! and are lost, and a trailing run of length 1 is never flushed.
//! [`DrleFormat::Exact`] drops the seed token and always flushes, at the cost
//! of bit compatibility with `Compat` streams. It rejects samples above
//! `0x1FFF` instead of letting the mask corrupt them.
//!
//! # RLE and DELTA
//!
//! ```text
//!         ┌───────┬──────────┬──────────┐
//!   RLE   │ count │ value hi │ value lo │   count 1..=255, encoder caps at 4
//!         └───────┴──────────┴──────────┘
//!         ┌──────────┬──────────┐
//!   DELTA │ delta hi │ delta lo │           one pair per sample
//!         └──────────┴──────────┘
//! ```

#[macro_use]
extern crate log;

mod delta;
mod drle;
mod error;
pub mod hdc;
mod rle;
mod scheme;
mod sink;
mod stats;

pub use delta::{decode_delta, encode_delta, DeltaDecoder, DeltaEncoder};
pub use drle::{
    decode_drle, decode_drle_with, encode_drle, encode_drle_with, DrleDecoder, DrleEncoder,
    DrleFormat, DrleOptions, Token, TokenBytes,
};
pub use error::{CodecError, Result};
pub use rle::{decode_rle, encode_rle, encode_rle_with, RleDecoder, RleEncoder, RleOptions};
pub use scheme::Scheme;
pub use sink::{BeSink, FnSink, ValueSink};
pub use stats::{estimate_drle_len, CompressionReport, CompressionStats, CountingWriter};

/// Longest run a DRLE token can carry.
const MAX_DRLE_RUN: u8 = 4;
/// Largest delta stored in a one byte token.
const SHORT_DELTA_MAX: u16 = 0x1F;
/// Bits of delta carried by a two byte token.
const WIDE_DELTA_BITS: u32 = 13;
/// Bits of delta carried by a one byte token.
const SHORT_DELTA_BITS: u32 = 5;
/// Mask applied to every value the DRLE decoder emits.
const PAYLOAD_MASK: u16 = 0x1FFF;
/// Default cap on RLE runs, matching the DRLE token limit.
const DEFAULT_RLE_RUN: u8 = MAX_DRLE_RUN;
