use crate::{MAX_DRLE_RUN, SHORT_DELTA_BITS, SHORT_DELTA_MAX, WIDE_DELTA_BITS};
use std::fmt;

const WIDE_FLAG: u8 = 0x80;
const COUNT_SHIFT: u8 = 5;
const COUNT_MASK: u8 = 0x3;
const HIGH_FIELD_MASK: u8 = 0x1F;

/// One DRLE wire unit: `count` repeats of `delta`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token {
    pub count: u8,
    pub delta: u16,
}

/// Encoded form of a [`Token`], one or two bytes long.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TokenBytes {
    buf: [u8; 2],
    len: usize,
}

impl TokenBytes {
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl AsRef<[u8]> for TokenBytes {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Token {
    #[inline(always)]
    pub fn new(count: u8, delta: u16) -> Self {
        debug_assert!((1..=MAX_DRLE_RUN).contains(&count));
        Token { count, delta }
    }

    /// Whether this token needs the two byte form.
    #[inline(always)]
    pub fn is_wide(&self) -> bool {
        self.delta > SHORT_DELTA_MAX
    }

    /// Bytes on the wire, MSB first.
    pub fn encoded_len(&self) -> usize {
        if self.is_wide() {
            2
        } else {
            1
        }
    }

    /// Wire bytes of this token, MSB first.
    #[inline(always)]
    pub fn encode(self) -> TokenBytes {
        let count = (self.count - 1) << COUNT_SHIFT;
        let bytes = if self.is_wide() {
            let head = WIDE_FLAG | count | ((self.delta >> 8) as u8 & HIGH_FIELD_MASK);
            TokenBytes {
                buf: [head, (self.delta & 0xFF) as u8],
                len: 2,
            }
        } else {
            TokenBytes {
                buf: [count | self.delta as u8, 0],
                len: 1,
            }
        };
        trace!("encode {:?} as {:02X?}", self, bytes.as_slice());
        bytes
    }

    /// Reads the token at the start of `bytes`, returning it with the number
    /// of bytes it took. `None` when `bytes` is empty or a wide token is cut.
    pub fn decode(bytes: &[u8]) -> Option<(Token, usize)> {
        match *bytes {
            [head, low, ..] if Self::head_is_wide(head) => {
                Some((Self::decode_wide(head, low), 2))
            }
            [head, ..] if !Self::head_is_wide(head) => Some((Self::decode_short(head), 1)),
            _ => None,
        }
    }

    /// Whether `head` opens a two byte token.
    #[inline(always)]
    pub(crate) fn head_is_wide(head: u8) -> bool {
        head & WIDE_FLAG != 0
    }

    #[inline(always)]
    pub(crate) fn decode_short(head: u8) -> Self {
        let raw = (head & HIGH_FIELD_MASK) as u16;
        Token {
            count: Self::head_count(head),
            delta: widen(raw, SHORT_DELTA_BITS, false),
        }
    }

    #[inline(always)]
    pub(crate) fn decode_wide(head: u8, low: u8) -> Self {
        let raw = ((head & HIGH_FIELD_MASK) as u16) << 8 | low as u16;
        Token {
            count: Self::head_count(head),
            delta: widen(raw, WIDE_DELTA_BITS, true),
        }
    }

    #[inline(always)]
    fn head_count(head: u8) -> u8 {
        ((head >> COUNT_SHIFT) & COUNT_MASK) + 1
    }
}

/// Extends the low `bits` of `raw` to 16 bits, replicating the field's top
/// bit when `signed`.
#[inline(always)]
pub(crate) fn widen(raw: u16, bits: u32, signed: bool) -> u16 {
    debug_assert!(bits > 0 && bits < 16);
    let field = raw & ((1 << bits) - 1);
    if signed && field & (1 << (bits - 1)) != 0 {
        field | (u16::MAX << bits)
    } else {
        field
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("count", &self.count)
            .field("delta", &(self.delta as i16))
            .finish()
    }
}
