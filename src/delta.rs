use crate::error::{CodecError, Result};
use crate::sink::ValueSink;
use std::io;

/// Writes one big-endian `prev - cur` pair per sample.
pub struct DeltaEncoder<W> {
    last_value: u16,
    samples: usize,
    writer: W,
}

impl<W: io::Write> DeltaEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_seed(writer, 0)
    }

    pub fn with_seed(writer: W, seed: u16) -> Self {
        DeltaEncoder {
            last_value: seed,
            samples: 0,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, sample: u16) -> Result<()> {
        let delta = self.last_value.wrapping_sub(sample);
        trace!("sample {sample}, delta {}", delta as i16);
        self.writer.write_all(&delta.to_be_bytes())?;
        self.last_value = sample;
        self.samples += 1;
        Ok(())
    }

    pub fn finalize(mut self) -> Result<W> {
        if self.samples == 0 {
            return Err(CodecError::EmptyInput);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

pub struct DeltaDecoder<S> {
    value: u16,
    high: Option<u8>,
    offset: usize,
    sink: S,
}

impl<S: ValueSink> DeltaDecoder<S> {
    pub fn new(sink: S) -> Self {
        Self::with_seed(sink, 0)
    }

    pub fn with_seed(sink: S, seed: u16) -> Self {
        DeltaDecoder {
            value: seed,
            high: None,
            offset: 0,
            sink,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> Result<()> {
        self.offset += 1;
        match self.high.take() {
            None => {
                self.high = Some(byte);
                Ok(())
            }
            Some(high) => {
                let delta = u16::from_be_bytes([high, byte]);
                self.value = self.value.wrapping_sub(delta);
                trace!("delta {}, decode: {}", delta as i16, self.value);
                self.sink.push(self.value)?;
                Ok(())
            }
        }
    }

    pub fn finalize(self) -> Result<S> {
        if self.high.is_some() {
            return Err(CodecError::TruncatedStream {
                offset: self.offset - 1,
            });
        }
        Ok(self.sink)
    }
}

impl<S: ValueSink> io::Write for DeltaDecoder<S> {
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

pub fn encode_delta<W: io::Write>(samples: &[u16], writer: W) -> Result<W> {
    let mut encoder = DeltaEncoder::new(writer);
    for &sample in samples {
        encoder.update(sample)?;
    }
    encoder.finalize()
}

pub fn decode_delta<S: ValueSink>(bytes: &[u8], sink: S) -> Result<S> {
    let mut decoder = DeltaDecoder::new(sink);
    for &byte in bytes {
        decoder.update(byte)?;
    }
    decoder.finalize()
}

#[cfg(test)]
mod tests {
    use super::{decode_delta, encode_delta, DeltaDecoder, DeltaEncoder};
    use crate::CodecError;
    use std::io::Write;

    // (samples, stream)
    const TEST_VECTOR: [(&[u16], &str); 4] = [
        (&[10], "fff6"),
        (&[100, 50], "ff9c0032"),
        (&[50, 100], "ffceffce"),
        (&[0, 0xFFFF, 0, 0x8000], "00000001ffff8000"),
    ];

    #[test]
    fn test_delta_encode() {
        for (input, expected) in TEST_VECTOR.into_iter() {
            let out = encode_delta(input, vec![]).unwrap();
            assert_eq!(hex::encode(out), expected);
        }
    }

    #[test]
    fn test_delta_decode() {
        for (expected, input) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let out: Vec<u16> = decode_delta(&input, vec![]).unwrap();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_delta_full_range_round_trip() {
        let samples: Vec<u16> = (0..=u16::MAX).step_by(257).rev().collect();
        let bytes = encode_delta(&samples, vec![]).unwrap();
        assert_eq!(bytes.len(), samples.len() * 2);
        let out: Vec<u16> = decode_delta(&bytes, vec![]).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_delta_seed() {
        let mut encoder = DeltaEncoder::with_seed(vec![], 500);
        encoder.update(500).unwrap();
        encoder.update(499).unwrap();
        let bytes = encoder.finalize().unwrap();
        assert_eq!(hex::encode(&bytes), "00000001");

        let mut decoder = DeltaDecoder::with_seed(Vec::<u16>::new(), 500);
        decoder.write_all(&bytes).unwrap();
        assert_eq!(decoder.finalize().unwrap(), vec![500, 499]);
    }

    #[test]
    fn test_delta_errors() {
        assert!(matches!(
            encode_delta(&[], vec![]),
            Err(CodecError::EmptyInput)
        ));
        let err = decode_delta(&[0, 1, 2], Vec::<u16>::new()).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedStream { offset: 2 }));
    }
}
