use crate::error::Result;
use crate::{encode_rle_with, RleOptions, Token, MAX_DRLE_RUN};
use std::io;

/// Size of an encoded stream against the raw two-bytes-per-sample input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub raw_bytes: usize,
    pub encoded_bytes: usize,
}

impl CompressionStats {
    pub fn for_samples(samples: usize, encoded_bytes: usize) -> Self {
        CompressionStats {
            raw_bytes: samples * 2,
            encoded_bytes,
        }
    }

    /// Percent of the raw size saved. Negative when the stream grew.
    pub fn space_savings(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.encoded_bytes as f64 / self.raw_bytes as f64) * 100.0
    }

    /// `raw / encoded`; infinite for an empty stream.
    pub fn ratio(&self) -> f64 {
        self.raw_bytes as f64 / self.encoded_bytes as f64
    }
}

/// Sizes of the same samples under each scheme, the rows of a compression
/// report. `ddrle` runs the delta pass twice before run-length folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionReport {
    pub raw: CompressionStats,
    pub rle: CompressionStats,
    pub drle: CompressionStats,
    pub ddrle: CompressionStats,
}

impl CompressionReport {
    /// RLE is measured with runs of up to 255, the format's full capacity.
    pub fn for_samples(samples: &[u16]) -> Result<Self> {
        let n = samples.len();
        let rle = encode_rle_with(
            samples,
            CountingWriter::new(io::sink()),
            RleOptions { max_run: u8::MAX },
        )?;
        let report = CompressionReport {
            raw: CompressionStats::for_samples(n, n * 2),
            rle: CompressionStats::for_samples(n, rle.count()),
            drle: CompressionStats::for_samples(n, estimate_drle_len(samples, 1)),
            ddrle: CompressionStats::for_samples(n, estimate_drle_len(samples, 2)),
        };
        debug!("{report:?}");
        Ok(report)
    }
}

/// Bytes of DRLE tokens needed for `samples` after `order` delta passes,
/// each seeded with 0. Order 1 is the size of an exact DRLE stream.
pub fn estimate_drle_len(samples: &[u16], order: u32) -> usize {
    let mut values = samples.to_vec();
    for _ in 0..order {
        let mut prev: u16 = 0;
        for v in values.iter_mut() {
            let cur = *v;
            *v = prev.wrapping_sub(cur);
            prev = cur;
        }
    }

    let mut len = 0;
    let mut iter = values.into_iter().peekable();
    while let Some(delta) = iter.next() {
        let mut count = 1;
        while count < MAX_DRLE_RUN && iter.peek() == Some(&delta) {
            iter.next();
            count += 1;
        }
        len += Token::new(count, delta).encoded_len();
    }
    len
}

/// Counts the bytes passing through to `W`.
pub struct CountingWriter<W> {
    count: usize,
    writer: W,
}

impl<W> CountingWriter<W> {
    pub fn new(writer: W) -> Self {
        CountingWriter { count: 0, writer }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> io::Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.count += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
