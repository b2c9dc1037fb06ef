use crate::error::{CodecError, Result};
use crate::{decode_delta, decode_drle, decode_rle, encode_delta, encode_drle, encode_rle};

/// Codec selection by name. DRLE uses the compat format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `{count, value}` triples.
    Rle,
    /// One 16-bit delta per sample.
    Delta,
    /// Delta run-length tokens.
    #[default]
    Drle,
}

impl Scheme {
    pub fn encode(&self, samples: &[u16]) -> Result<Vec<u8>> {
        let out = Vec::with_capacity(samples.len() * 2);
        match self {
            Scheme::Rle => encode_rle(samples, out),
            Scheme::Delta => encode_delta(samples, out),
            Scheme::Drle => encode_drle(samples, out),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<u16>> {
        let out = Vec::with_capacity(bytes.len());
        match self {
            Scheme::Rle => decode_rle(bytes, out),
            Scheme::Delta => decode_delta(bytes, out),
            Scheme::Drle => decode_drle(bytes, out),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rle => write!(f, "rle"),
            Self::Delta => write!(f, "delta"),
            Self::Drle => write!(f, "drle"),
        }
    }
}

impl std::str::FromStr for Scheme {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rle" => Ok(Self::Rle),
            "delta" => Ok(Self::Delta),
            "drle" => Ok(Self::Drle),
            _ => Err(CodecError::UnknownScheme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemes_round_trip() {
        // starts away from the seed and ends on a run, so compat DRLE is lossless
        let samples: Vec<u16> = vec![6000, 6000, 6003, 6003, 6003, 5990, 5990, 5990];
        for scheme in [Scheme::Rle, Scheme::Delta, Scheme::Drle] {
            let encoded = scheme.encode(&samples).unwrap();
            let decoded = scheme.decode(&encoded).unwrap();
            assert_eq!(samples, decoded, "{scheme}");
        }
    }

    #[test]
    fn test_names() {
        for scheme in [Scheme::Rle, Scheme::Delta, Scheme::Drle] {
            assert_eq!(scheme.to_string().parse::<Scheme>().unwrap(), scheme);
        }
        assert_eq!("DRLE".parse::<Scheme>().unwrap(), Scheme::Drle);
        assert!(matches!(
            "huffman".parse::<Scheme>(),
            Err(CodecError::UnknownScheme(_))
        ));
        assert_eq!(Scheme::default(), Scheme::Drle);
    }
}
