use super::{DrleFormat, DrleOptions, Token};
use crate::error::{CodecError, Result};
use crate::{MAX_DRLE_RUN, PAYLOAD_MASK};
use std::io;

/// Streaming DRLE encoder writing tokens to `W`.
pub struct DrleEncoder<W> {
    options: DrleOptions,
    last_value: u16,
    last_delta: u16,
    /// Length of the pending run. 0 only before the first sample in `Exact`.
    count: u8,
    samples: usize,
    writer: W,
}

impl<W: io::Write> DrleEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, DrleOptions::default())
    }

    pub fn with_options(writer: W, options: DrleOptions) -> Self {
        let count = match options.format {
            // the seed itself is the first run
            DrleFormat::Compat => 1,
            DrleFormat::Exact => 0,
        };
        DrleEncoder {
            options,
            last_value: options.seed,
            last_delta: 0,
            count,
            samples: 0,
            writer,
        }
    }

    /// Number of samples fed so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    #[inline(always)]
    pub fn update(&mut self, sample: u16) -> Result<()> {
        if self.options.format == DrleFormat::Exact && sample > PAYLOAD_MASK {
            return Err(CodecError::SampleOutOfRange {
                index: self.samples,
                value: sample,
            });
        }
        let delta = self.last_value.wrapping_sub(sample);
        trace!(
            "sample {sample}, delta {}, pending {:?}",
            delta as i16,
            self.pending()
        );
        if self.count == 0 {
            self.count = 1;
        } else if delta == self.last_delta && self.count < MAX_DRLE_RUN {
            self.count += 1;
        } else {
            self.emit()?;
            self.count = 1;
        }
        self.last_delta = delta;
        self.last_value = sample;
        self.samples += 1;
        Ok(())
    }

    /// Flushes the pending run and hands back the writer.
    pub fn finalize(mut self) -> Result<W> {
        if self.samples == 0 {
            return Err(CodecError::EmptyInput);
        }
        let flush = match self.options.format {
            // a lone trailing sample is left out of compat streams
            DrleFormat::Compat => self.count >= 2,
            DrleFormat::Exact => self.count >= 1,
        };
        debug!(
            "finalize after {} samples, last run {:?}, flush: {flush}",
            self.samples,
            self.pending()
        );
        if flush {
            self.emit()?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    #[inline(always)]
    fn pending(&self) -> Token {
        Token {
            count: self.count,
            delta: self.last_delta,
        }
    }

    #[inline(always)]
    fn emit(&mut self) -> Result<()> {
        let bytes = Token::new(self.count, self.last_delta).encode();
        self.writer.write_all(bytes.as_slice())?;
        Ok(())
    }
}

/// Encodes `samples` as a compat DRLE stream into `writer`.
pub fn encode_drle<W: io::Write>(samples: &[u16], writer: W) -> Result<W> {
    encode_drle_with(samples, writer, DrleOptions::default())
}

pub fn encode_drle_with<W: io::Write>(
    samples: &[u16],
    writer: W,
    options: DrleOptions,
) -> Result<W> {
    let mut encoder = DrleEncoder::with_options(writer, options);
    for &sample in samples {
        encoder.update(sample)?;
    }
    encoder.finalize()
}
