use super::{DrleFormat, DrleOptions, Token};
use crate::error::{CodecError, Result};
use crate::sink::ValueSink;
use crate::PAYLOAD_MASK;
use std::io;

/// Streaming DRLE decoder pushing samples to `S`.
pub struct DrleDecoder<S> {
    value: u16,
    /// Bytes still to drop before the first real token.
    skip: u8,
    /// Head byte of a wide token waiting for its low byte.
    head: Option<u8>,
    offset: usize,
    sink: S,
}

impl<S: ValueSink> DrleDecoder<S> {
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, DrleOptions::default())
    }

    pub fn with_options(sink: S, options: DrleOptions) -> Self {
        let skip = match options.format {
            DrleFormat::Compat => 1,
            DrleFormat::Exact => 0,
        };
        DrleDecoder {
            value: options.seed,
            skip,
            head: None,
            offset: 0,
            sink,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> Result<()> {
        self.offset += 1;
        if self.skip > 0 {
            debug!("skip seed byte 0x{byte:02X}");
            self.skip -= 1;
            return Ok(());
        }
        let token = match self.head.take() {
            Some(head) => Token::decode_wide(head, byte),
            None if Token::head_is_wide(byte) => {
                trace!("wide head 0x{byte:02X}, waiting for low byte");
                self.head = Some(byte);
                return Ok(());
            }
            None => Token::decode_short(byte),
        };
        self.apply(token)
    }

    #[inline(always)]
    fn apply(&mut self, token: Token) -> Result<()> {
        trace!("apply {token:?} to {}", self.value);
        for _ in 0..token.count {
            self.value = self.value.wrapping_sub(token.delta);
            let out = self.value & PAYLOAD_MASK;
            trace!("decode: {out}");
            self.sink.push(out)?;
        }
        Ok(())
    }

    /// Checks the stream ended on a token boundary and hands back the sink.
    pub fn finalize(self) -> Result<S> {
        if self.head.is_some() {
            return Err(CodecError::TruncatedStream {
                offset: self.offset - 1,
            });
        }
        debug!("finalize after {} bytes", self.offset);
        Ok(self.sink)
    }
}

impl<S: ValueSink> io::Write for DrleDecoder<S> {
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

/// Decodes a compat DRLE stream into `sink`.
pub fn decode_drle<S: ValueSink>(bytes: &[u8], sink: S) -> Result<S> {
    decode_drle_with(bytes, sink, DrleOptions::default())
}

pub fn decode_drle_with<S: ValueSink>(bytes: &[u8], sink: S, options: DrleOptions) -> Result<S> {
    let mut decoder = DrleDecoder::with_options(sink, options);
    for &byte in bytes {
        decoder.update(byte)?;
    }
    decoder.finalize()
}

#[cfg(test)]
mod tests {
    use super::{decode_drle, decode_drle_with, DrleDecoder};
    use crate::{encode_drle, encode_drle_with, CodecError, DrleFormat, DrleOptions, FnSink};
    use std::io::Write;
    use std::sync::Once;

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            let _ = pretty_env_logger::try_init();
        });
    }

    const EXACT: DrleOptions = DrleOptions {
        format: DrleFormat::Exact,
        seed: 0,
    };

    // (compat stream, decoded samples)
    const TEST_VECTOR: [(&str, &[u16]); 7] = [
        ("009ff640", &[10, 10, 10, 10]),
        ("209ffb00", &[5, 5]),
        ("009f9c803220", &[100, 50, 50, 50]),
        ("00bfce20", &[50, 100, 100, 100]),
        ("009ff76161", &[9, 8, 7, 6, 5, 4, 3, 2, 1]),
        ("009000900020", &[0x1000, 0, 0, 0]),
        // first byte is dropped whatever it holds
        ("ff01", &[0x1FFF]),
    ];

    #[test]
    fn test_drle_decode() {
        setup();
        for (input, expected) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let out: Vec<u16> = decode_drle(&input, vec![]).unwrap();
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_short_token_is_unsigned() {
        setup();
        // 0x1F is +31, not -1
        let out: Vec<u16> = decode_drle_with(&[0x1F], vec![], EXACT).unwrap();
        assert_eq!(out, vec![(0u16).wrapping_sub(31) & 0x1FFF]);
    }

    #[test]
    fn test_sign_round_trip() {
        setup();
        for samples in [[100u16, 50, 50, 50], [50, 100, 100, 100]] {
            let bytes = encode_drle(&samples, vec![]).unwrap();
            let out: Vec<u16> = decode_drle(&bytes, vec![]).unwrap();
            assert_eq!(out, samples);
        }
    }

    #[test]
    fn test_compat_drops_leading_seed_samples() {
        setup();
        let samples = [0, 0, 0, 9, 9, 9];
        let bytes = encode_drle(&samples, vec![]).unwrap();
        assert_eq!(hex::encode(&bytes), "609ff720");
        let out: Vec<u16> = decode_drle(&bytes, vec![]).unwrap();
        assert_eq!(out, vec![9, 9, 9]);
    }

    #[test]
    fn test_compat_drops_trailing_singleton() {
        setup();
        let bytes = encode_drle(&[5, 7], vec![]).unwrap();
        let out: Vec<u16> = decode_drle(&bytes, vec![]).unwrap();
        assert_eq!(out, vec![5]);
    }

    #[test]
    fn test_exact_round_trip() {
        setup();
        let cases: [&[u16]; 6] = [
            &[0],
            &[5, 7],
            &[0, 0, 0, 9, 9],
            &[0, 5, 5, 10],
            &[0x1FFF, 0, 0x1FFF, 0x1000, 0x0FFF, 1],
            &[4, 4, 4, 4, 4, 4],
        ];
        for samples in cases {
            let bytes = encode_drle_with(samples, vec![], EXACT).unwrap();
            let out: Vec<u16> = decode_drle_with(&bytes, vec![], EXACT).unwrap();
            assert_eq!(out, samples);
        }
    }

    #[test]
    fn test_exact_round_trip_sensor_trace() {
        setup();
        // slow drift with plateaus, like a temperature log
        let mut samples = vec![];
        let mut value: u16 = 6400;
        for i in 0..500u32 {
            if i % 7 == 0 {
                value = value.wrapping_add(3);
            } else if i % 11 == 0 {
                value = value.wrapping_sub(40);
            }
            samples.push(value);
        }
        let bytes = encode_drle_with(&samples, vec![], EXACT).unwrap();
        assert!(bytes.len() < samples.len() * 2);
        let out: Vec<u16> = decode_drle_with(&bytes, vec![], EXACT).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_seed_round_trip() {
        setup();
        let options = DrleOptions {
            format: DrleFormat::Exact,
            seed: 6000,
        };
        let samples = [6000, 6000, 6010, 6020];
        let bytes = encode_drle_with(&samples, vec![], options).unwrap();
        assert_eq!(bytes[0], 0x20);
        let out: Vec<u16> = decode_drle_with(&bytes, vec![], options).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn test_truncated_wide_token() {
        setup();
        let err = decode_drle(&hex::decode("00409f").unwrap(), Vec::<u16>::new()).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedStream { offset: 2 }));
    }

    #[test]
    fn test_empty_stream() {
        setup();
        let out: Vec<u16> = decode_drle(&[], vec![]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_in_chunks() {
        setup();
        let bytes = hex::decode("009f9c803220").unwrap();
        let mut seen: Vec<u16> = vec![];
        let mut decoder = DrleDecoder::new(FnSink(|v: u16| seen.push(v)));
        // split inside the wide token
        decoder.write_all(&bytes[..2]).unwrap();
        decoder.write_all(&bytes[2..]).unwrap();
        decoder.finalize().unwrap();
        assert_eq!(seen, vec![100, 50, 50, 50]);
    }
}
