//! Numeric helpers shared by the encoder, the length estimator and the
//! decoder.

use std::fmt;

use super::error::{BencodeError, MalformedReason};

/// Width of the low half in the two-part integer decomposition.
const MAX_LO: i64 = 0x8000_0000;
const MAX_LO_F: f64 = 2_147_483_648.0;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// A numeric input before it is reduced to a wire integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Reduces the number to the integer written on the wire.
    ///
    /// The value is split into `hi = trunc(n / 2^31)` and `lo = trunc(n % 2^31)`,
    /// each wrapped to 32 bits, then put back together as `hi * 2^31 + lo`.
    /// This drops any fractional part and wraps magnitudes past 2^62.
    /// Returns `None` for NaN and infinities.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbencode::Number;
    ///
    /// assert_eq!(Number::Integer(12345).to_wire(), Some(12345));
    /// assert_eq!(Number::Float(3.9).to_wire(), Some(3));
    /// assert_eq!(Number::Float(-3.9).to_wire(), Some(-3));
    /// assert_eq!(Number::Float(f64::NAN).to_wire(), None);
    /// ```
    pub fn to_wire(self) -> Option<i64> {
        match self {
            Number::Integer(n) => {
                let hi = (n / MAX_LO) as i32;
                let lo = (n % MAX_LO) as i32;
                Some(i64::from(hi) * MAX_LO + i64::from(lo))
            }
            Number::Float(f) if f.is_finite() => {
                let hi = to_int32(f / MAX_LO_F);
                let lo = to_int32(f % MAX_LO_F);
                Some(i64::from(hi) * MAX_LO + i64::from(lo))
            }
            Number::Float(_) => None,
        }
    }

    /// Whether `wire` represents this number without loss.
    pub fn is_exact(self, wire: i64) -> bool {
        match self {
            Number::Integer(n) => n == wire,
            Number::Float(f) => f == wire as f64,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Reduces `number` to its wire integer, rejecting NaN and infinities.
pub(crate) fn coerce(number: Number) -> Result<i64, BencodeError> {
    number.to_wire().ok_or(BencodeError::UnsupportedType {
        kind: "non-finite number",
    })
}

/// Truncates toward zero and wraps into the signed 32-bit range.
fn to_int32(f: f64) -> i32 {
    let m = f.trunc().rem_euclid(TWO_POW_32);
    if m >= MAX_LO_F {
        (m - TWO_POW_32) as i32
    } else {
        m as i32
    }
}

/// Number of bytes in the decimal form of `n`, sign included.
///
/// # Examples
///
/// ```
/// use rbencode::digit_count;
///
/// assert_eq!(digit_count(0), 1);
/// assert_eq!(digit_count(-5), 2);
/// assert_eq!(digit_count(100), 3);
/// ```
pub fn digit_count(n: i64) -> usize {
    usize::from(n < 0) + unsigned_digit_count(n.unsigned_abs())
}

/// Number of decimal digits in `n`.
pub(crate) fn unsigned_digit_count(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Parses the ASCII integer in `data[start..end]`.
///
/// A leading `+` is skipped and a leading `-` negates the result. Parsing
/// stops at the first `.`, so `3.5` reads as `3`. Any other non-digit byte is
/// rejected with its offset.
pub(crate) fn parse_int(data: &[u8], start: usize, end: usize) -> Result<i64, BencodeError> {
    let mut sum: i64 = 0;
    let mut negative = false;

    for (pos, &byte) in data[start..end].iter().enumerate() {
        let pos = start + pos;
        match byte {
            b'0'..=b'9' => {
                let digit = i64::from(byte - b'0');
                let digit = if negative { -digit } else { digit };
                sum = sum
                    .checked_mul(10)
                    .and_then(|s| s.checked_add(digit))
                    .ok_or(BencodeError::malformed(pos, MalformedReason::IntegerOverflow))?;
            }
            b'+' if pos == start => {}
            b'-' if pos == start => negative = true,
            b'.' => break,
            _ => return Err(BencodeError::malformed(pos, MalformedReason::InvalidByte(byte))),
        }
    }

    Ok(sum)
}
