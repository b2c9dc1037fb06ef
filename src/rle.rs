use crate::error::{CodecError, Result};
use crate::sink::ValueSink;
use crate::DEFAULT_RLE_RUN;
use std::fmt::Debug;
use std::{fmt, io};

const RUN_LEN: usize = 3;

/// Options for [`RleEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleOptions {
    /// Longest run folded into one triple, 1..=255.
    pub max_run: u8,
}

impl Default for RleOptions {
    fn default() -> Self {
        RleOptions {
            max_run: DEFAULT_RLE_RUN,
        }
    }
}

pub struct RleEncoder<W> {
    status: RleStatus,
    max_run: u8,
    writer: W,
}

#[derive(Copy, Clone)]
enum RleStatus {
    Run { value: u16, count: u8 },
    Wait,
}

impl<W: io::Write> RleEncoder<W> {
    pub fn new(writer: W) -> Self {
        RleEncoder {
            status: RleStatus::Wait,
            max_run: DEFAULT_RLE_RUN,
            writer,
        }
    }

    pub fn with_options(writer: W, options: RleOptions) -> Result<Self> {
        if options.max_run == 0 {
            return Err(CodecError::InvalidOption(
                "max_run must be at least 1".to_string(),
            ));
        }
        Ok(RleEncoder {
            status: RleStatus::Wait,
            max_run: options.max_run,
            writer,
        })
    }

    #[inline(always)]
    pub fn update(&mut self, sample: u16) -> Result<()> {
        trace!("update sample {sample}, current status {:?}", self.status);
        match self.status {
            RleStatus::Run { value, count } if value == sample && count < self.max_run => {
                self.status = RleStatus::Run {
                    value,
                    count: count + 1,
                };
            }
            RleStatus::Run { .. } => {
                self.emit()?;
                self.status = RleStatus::Run {
                    value: sample,
                    count: 1,
                };
                trace!("transit to {:?}", self.status);
            }
            RleStatus::Wait => {
                self.status = RleStatus::Run {
                    value: sample,
                    count: 1,
                };
                trace!("transit to {:?}", self.status);
            }
        }
        Ok(())
    }

    pub fn finalize(mut self) -> Result<W> {
        trace!("last block: {:?}", self.status);
        if let RleStatus::Wait = self.status {
            return Err(CodecError::EmptyInput);
        }
        self.emit()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    #[inline(always)]
    fn emit(&mut self) -> Result<()> {
        if let Some(encode) = self.status.try_encode() {
            self.writer.write_all(&encode)?;
        }
        Ok(())
    }
}

impl RleStatus {
    #[inline(always)]
    fn try_encode(self) -> Option<[u8; RUN_LEN]> {
        match self {
            RleStatus::Wait => None,
            RleStatus::Run { value, count } => {
                debug_assert!(count >= 1);
                let [hi, lo] = value.to_be_bytes();
                trace!("encode run {count} x {value:#06X}");
                Some([count, hi, lo])
            }
        }
    }
}

impl Debug for RleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleStatus::Run { value, count } => f
                .debug_struct("Run")
                .field("value", &format!("{value:#06X}"))
                .field("count", &count)
                .finish(),
            RleStatus::Wait => f.write_str("Wait"),
        }
    }
}

/// Decodes `{count, hi, lo}` triples. Any count is honoured, not only the
/// encoder's cap.
pub struct RleDecoder<S> {
    buf: [u8; RUN_LEN],
    len: usize,
    offset: usize,
    sink: S,
}

impl<S: ValueSink> RleDecoder<S> {
    pub fn new(sink: S) -> Self {
        RleDecoder {
            buf: [0; RUN_LEN],
            len: 0,
            offset: 0,
            sink,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> Result<()> {
        self.buf[self.len] = byte;
        self.len += 1;
        self.offset += 1;
        if self.len < RUN_LEN {
            return Ok(());
        }
        self.len = 0;
        let [count, hi, lo] = self.buf;
        let value = u16::from_be_bytes([hi, lo]);
        if count == 0 {
            warn!("zero length run at byte {}", self.offset - RUN_LEN);
        }
        trace!("decode run {count} x {value:#06X}");
        for _ in 0..count {
            self.sink.push(value)?;
        }
        Ok(())
    }

    pub fn finalize(self) -> Result<S> {
        if self.len != 0 {
            return Err(CodecError::TruncatedStream {
                offset: self.offset - self.len,
            });
        }
        Ok(self.sink)
    }
}

impl<S: ValueSink> io::Write for RleDecoder<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update(*byte).map_err(|e| match e {
                CodecError::Io(e) => e,
                e => io::Error::new(io::ErrorKind::InvalidData, e),
            })?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn encode_rle<W: io::Write>(samples: &[u16], writer: W) -> Result<W> {
    encode_rle_with(samples, writer, RleOptions::default())
}

pub fn encode_rle_with<W: io::Write>(samples: &[u16], writer: W, options: RleOptions) -> Result<W> {
    let mut rle = RleEncoder::with_options(writer, options)?;
    for &sample in samples {
        rle.update(sample)?;
    }
    rle.finalize()
}

pub fn decode_rle<S: ValueSink>(bytes: &[u8], sink: S) -> Result<S> {
    let mut decoder = RleDecoder::new(sink);
    for &byte in bytes {
        decoder.update(byte)?;
    }
    decoder.finalize()
}
