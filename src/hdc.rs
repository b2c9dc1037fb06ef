//! HDC1080 temperature samples.
//!
//! The sensor reports temperature in the top 14 bits of a 16-bit register,
//! `T = raw16 / 2^16 * 165 - 40`. Samples fed to the codecs carry the
//! register shifted down by 2, so they fit the 14 significant bits.

const SPAN: f64 = 165.0;
const OFFSET: f64 = 40.0;
const FULL_SCALE: f64 = 65536.0;
const LSB_PADDING: u32 = 2;

/// Lowest and highest temperature the sensor can report, upper bound excluded.
pub const MIN_CELSIUS: f64 = -OFFSET;
pub const MAX_CELSIUS: f64 = SPAN - OFFSET;

/// Converts a reading to a 14-bit sample, `None` outside the sensor range.
pub fn celsius_to_raw(celsius: f64) -> Option<u16> {
    if !celsius.is_finite() || !(MIN_CELSIUS..MAX_CELSIUS).contains(&celsius) {
        return None;
    }
    let register = ((celsius + OFFSET) / SPAN * FULL_SCALE) as u32;
    Some((register >> LSB_PADDING) as u16)
}

pub fn raw_to_celsius(raw: u16) -> f64 {
    ((raw as u32) << LSB_PADDING) as f64 / FULL_SCALE * SPAN - OFFSET
}

/// Weather station logs mark failed readings with values like 999.
pub fn is_valid_reading(celsius: f64) -> bool {
    (-100.0..=100.0).contains(&celsius)
}
