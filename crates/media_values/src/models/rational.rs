//! Exact rational numbers (edit rates, aspect ratios).
//!
//! A [`Rational`] stores its numerator and denominator exactly as given.
//! Nothing is reduced to lowest terms, so `1/2` and `2/4` are different
//! values. A zero denominator is allowed and marks an undefined ratio;
//! evaluating one with [`Rational::double_value`] returns
//! [`ValueError::DivisionByZero`].
//!
//! The canonical text form is `"<numerator>/<denominator>"`, e.g. `"1/4"`,
//! produced by `Display` and accepted by [`parse_rational`]. Serde uses the
//! same text form.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ValueError, ValueResult};

/// An exact fraction with 32-bit signed numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: i32,
    denominator: i32,
}

impl Rational {
    /// 24 fps film.
    pub const FILM_24: Rational = Rational::new(24, 1);
    /// 23.976 fps film transferred to NTSC.
    pub const FILM_23_976: Rational = Rational::new(24000, 1001);
    /// 25 fps PAL video.
    pub const PAL_25: Rational = Rational::new(25, 1);
    /// 29.97 fps NTSC video.
    pub const NTSC_29_97: Rational = Rational::new(30000, 1001);
    /// 50 fps progressive HD.
    pub const HD_50: Rational = Rational::new(50, 1);
    /// 59.94 fps progressive HD.
    pub const HD_59_94: Rational = Rational::new(60000, 1001);
    /// 48 kHz audio sample rate.
    pub const AUDIO_48K: Rational = Rational::new(48000, 1);

    /// Create a rational from an explicit numerator and denominator.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Numerator as last set.
    pub fn numerator(&self) -> i32 {
        self.numerator
    }

    /// Denominator as last set.
    pub fn denominator(&self) -> i32 {
        self.denominator
    }

    /// Replace the numerator, leaving the denominator untouched.
    pub fn set_numerator(&mut self, numerator: i32) {
        self.numerator = numerator;
    }

    /// Replace the denominator, leaving the numerator untouched.
    pub fn set_denominator(&mut self, denominator: i32) {
        self.denominator = denominator;
    }

    /// Replace both fields together.
    ///
    /// Callers sharing one value across threads should hold their lock
    /// around this call rather than around two separate setters.
    pub fn set_rational(&mut self, numerator: i32, denominator: i32) {
        *self = Self::new(numerator, denominator);
    }

    /// Whether the denominator is zero.
    pub fn is_undefined(&self) -> bool {
        self.denominator == 0
    }

    /// Floating-point approximation of `numerator / denominator`.
    pub fn double_value(&self) -> ValueResult<f64> {
        if self.is_undefined() {
            return Err(ValueError::DivisionByZero {
                numerator: self.numerator,
            });
        }
        Ok(f64::from(self.numerator) / f64::from(self.denominator))
    }

    /// Compare the mathematical magnitude of two rationals.
    ///
    /// `1/2` and `2/4` compare `Equal` here even though they are unequal
    /// values. Returns `None` when either denominator is zero.
    pub fn cmp_value(&self, other: &Rational) -> Option<Ordering> {
        let (ln, ld) = self.normalized_sign()?;
        let (rn, rd) = other.normalized_sign()?;
        // |n| and |d| are at most 2^31, so each product fits in i64.
        Some((ln * rd).cmp(&(rn * ld)))
    }

    fn normalized_sign(&self) -> Option<(i64, i64)> {
        let n = i64::from(self.numerator);
        let d = i64::from(self.denominator);
        match d.cmp(&0) {
            Ordering::Equal => None,
            Ordering::Less => Some((-n, -d)),
            Ordering::Greater => Some((n, d)),
        }
    }

    /// Encode as 8 bytes: numerator then denominator, big-endian.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.numerator.to_be_bytes());
        out[4..].copy_from_slice(&self.denominator.to_be_bytes());
        out
    }

    /// Decode from 8 big-endian bytes written by [`Rational::to_be_bytes`].
    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        let (num, den) = split_halves(bytes);
        Self::new(i32::from_be_bytes(num), i32::from_be_bytes(den))
    }

    /// Encode as 8 bytes: numerator then denominator, little-endian.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.numerator.to_le_bytes());
        out[4..].copy_from_slice(&self.denominator.to_le_bytes());
        out
    }

    /// Decode from 8 little-endian bytes written by [`Rational::to_le_bytes`].
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        let (num, den) = split_halves(bytes);
        Self::new(i32::from_le_bytes(num), i32::from_le_bytes(den))
    }
}

fn split_halves(bytes: [u8; 8]) -> ([u8; 4], [u8; 4]) {
    let [a, b, c, d, e, f, g, h] = bytes;
    ([a, b, c, d], [e, f, g, h])
}

impl Default for Rational {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<(i32, i32)> for Rational {
    fn from((numerator, denominator): (i32, i32)) -> Self {
        Self::new(numerator, denominator)
    }
}

impl From<Rational> for (i32, i32) {
    fn from(value: Rational) -> Self {
        (value.numerator, value.denominator)
    }
}

/// Parse the canonical `["-"] digits "/" ["-"] digits` form.
///
/// No whitespace, `+` sign, grouping, or exponent is accepted, and each
/// side must fit in an `i32`.
pub fn parse_rational(input: &str) -> ValueResult<Rational> {
    let malformed = |reason: &'static str| {
        tracing::debug!(input, reason, "Rejected rational text");
        ValueError::MalformedValue {
            input: input.to_string(),
            reason,
        }
    };

    let (num_text, den_text) = input
        .split_once('/')
        .ok_or_else(|| malformed("missing '/' separator"))?;

    let numerator =
        parse_component(num_text).ok_or_else(|| malformed("numerator is not a decimal integer"))?;
    let denominator = parse_component(den_text)
        .ok_or_else(|| malformed("denominator is not a decimal integer"))?;

    Ok(Rational::new(numerator, denominator))
}

/// Parse one side: optional `-` followed by one or more ASCII digits.
fn parse_component(text: &str) -> Option<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // `str::parse` would also take a leading '+', which was excluded above.
    text.parse::<i32>().ok()
}

impl FromStr for Rational {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rational(s)
    }
}

impl Serialize for Rational {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rational {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_rational(&text).map_err(serde::de::Error::custom)
    }
}
