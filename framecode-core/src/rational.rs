//! Rational number type for precise frame rate representation.
//!
//! Comparison and reduction never go through floating point: ordering uses
//! cross-multiplication and reduction uses a continued-fraction expansion to
//! find the closest fraction whose terms fit under a bound.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// 24 fps (film).
pub const FPS_24: Rational = Rational::new(24, 1);
/// 23.976 fps (24000/1001, NTSC film).
pub const FPS_23_976: Rational = Rational::new(24000, 1001);
/// 25 fps (PAL).
pub const FPS_25: Rational = Rational::new(25, 1);
/// 29.97 fps (30000/1001, NTSC).
pub const FPS_29_97: Rational = Rational::new(30000, 1001);
/// 30 fps.
pub const FPS_30: Rational = Rational::new(30, 1);
/// 48 fps (HFR film).
pub const FPS_48: Rational = Rational::new(48, 1);
/// 50 fps (PAL).
pub const FPS_50: Rational = Rational::new(50, 1);
/// 59.94 fps (60000/1001, NTSC).
pub const FPS_59_94: Rational = Rational::new(60000, 1001);
/// 60 fps.
pub const FPS_60: Rational = Rational::new(60, 1);

/// A rational number represented as a numerator and denominator.
///
/// Unlike most fraction types the denominator may be zero: `0/0` is the
/// "undefined" rate and compares as neither smaller, equal nor greater than
/// anything. Values are stored exactly as given; the arithmetic operations
/// return results with the sign on the numerator, reduced to lowest terms.
///
/// `PartialEq` is structural (`1/2 != 2/4`). Use [`Rational::compare`] for
/// value comparison.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    /// Numerator
    pub num: i64,
    /// Denominator
    pub den: i64,
}

impl Rational {
    /// Create a rational number from its raw terms.
    pub const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Create a rational from an integer.
    pub const fn from_int(n: i64) -> Self {
        Self { num: n, den: 1 }
    }

    /// Create a zero rational.
    pub const fn zero() -> Self {
        Self { num: 0, den: 1 }
    }

    /// Create a rational representing one.
    pub const fn one() -> Self {
        Self { num: 1, den: 1 }
    }

    /// The undefined rational `0/0`.
    pub const fn undefined() -> Self {
        Self { num: 0, den: 0 }
    }

    /// Check if this is the undefined form `0/0`.
    pub fn is_undefined(&self) -> bool {
        self.num == 0 && self.den == 0
    }

    /// Check if this rational is zero.
    pub fn is_zero(&self) -> bool {
        self.num == 0 && self.den != 0
    }

    /// Compare two rationals by value.
    ///
    /// Returns `None` if either side is `0/0`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        cmp_q(*self, *other)
    }

    /// Reduce to lowest terms.
    pub fn reduce(&self) -> Self {
        reduce(self.num, self.den, i64::MAX).0
    }

    /// Get the reciprocal of this rational.
    pub fn inverse(&self) -> Self {
        inv_q(*self)
    }

    /// Convert to f64.
    ///
    /// Only meant for display; comparisons should use [`Rational::compare`].
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({}/{})", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Rational {
    type Err = Error;

    /// Parse `num/den`, `num:den` or a bare integer.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidRational(s.to_string());

        match s.split_once(['/', ':']) {
            Some((num, den)) => {
                let num = num.trim().parse().map_err(|_| invalid())?;
                let den = den.trim().parse().map_err(|_| invalid())?;
                Ok(Self::new(num, den))
            }
            None => s.parse().map(Self::from_int).map_err(|_| invalid()),
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        add_q(self, rhs)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        sub_q(self, rhs)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        mul_q(self, rhs)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        div_q(self, rhs)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.num.checked_neg() {
            Some(num) => Self::new(num, self.den),
            None => mul_q(self, Self::new(-1, 1)),
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<(i64, i64)> for Rational {
    fn from((num, den): (i64, i64)) -> Self {
        Self::new(num, den)
    }
}

/// Compare two rationals.
///
/// Returns `None` if one of the values is of the form `0/0`. Values with
/// different representations of the same fraction compare equal.
pub fn cmp_q(a: Rational, b: Rational) -> Option<Ordering> {
    if a.is_undefined() || b.is_undefined() {
        return None;
    }

    let cross = a.num as i128 * b.den as i128 - b.num as i128 * a.den as i128;
    let ord = cross.cmp(&0);

    // a/b - c/d has the sign of (ad - cb) * bd
    if (a.den < 0) != (b.den < 0) {
        Some(ord.reverse())
    } else {
        Some(ord)
    }
}

/// Greatest common divisor of the magnitudes of `a` and `b`.
///
/// `gcd(a, 0) == |a|`.
pub fn gcd(a: i64, b: i64) -> u64 {
    gcd_u128(a.unsigned_abs() as u128, b.unsigned_abs() as u128) as u64
}

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduce a fraction.
///
/// Returns the fraction in lowest terms when both terms fit within `max`,
/// otherwise the closest fraction whose terms do. The flag is `true` when
/// the result is exact.
///
/// ```rust
/// use framecode_core::rational::reduce;
///
/// let (q, exact) = reduce(31415926, 10000000, 1000);
/// assert_eq!((q.num, q.den), (355, 113));
/// assert!(!exact);
/// ```
pub fn reduce(num: i64, den: i64, max: i64) -> (Rational, bool) {
    reduce_wide(num as i128, den as i128, max)
}

fn reduce_wide(num: i128, den: i128, max: i64) -> (Rational, bool) {
    reduce_signed(
        (num < 0) != (den < 0),
        num.unsigned_abs(),
        den.unsigned_abs(),
        max,
    )
}

fn reduce_signed(negative: bool, num: u128, den: u128, max: i64) -> (Rational, bool) {
    let (num, den, exact) = reduce_magnitude(num, den, max.max(0) as u128);

    if !exact {
        tracing::trace!(num, den, max, "fraction approximated under bound");
    }

    // Both terms are <= max <= i64::MAX here.
    let num = num as i64;
    (
        Rational::new(if negative { -num } else { num }, den as i64),
        exact,
    )
}

/// Continued-fraction reduction on magnitudes.
///
/// Convergents never exceed the reduced input, so the products below cannot
/// overflow.
fn reduce_magnitude(mut num: u128, mut den: u128, max: u128) -> (u128, u128, bool) {
    let mut a0 = (0u128, 1u128);
    let mut a1 = (1u128, 0u128);

    let g = gcd_u128(num, den);
    if g != 0 {
        num /= g;
        den /= g;
    }
    if num <= max && den <= max {
        a1 = (num, den);
        den = 0;
    }

    while den != 0 {
        let x = num / den;
        let next_den = num - den * x;
        let a2 = (x * a1.0 + a0.0, x * a1.1 + a0.1);

        if a2.0 > max || a2.1 > max {
            let mut x = x;
            if a1.0 != 0 {
                x = max.saturating_sub(a0.0) / a1.0;
            }
            if a1.1 != 0 {
                x = x.min(max.saturating_sub(a0.1) / a1.1);
            }

            // Take the clamped convergent when it lies closer than a1, i.e.
            // when num/den < (2x * a1.den + a0.den) / a1.den.
            let nearer = a1.1 == 0
                || cmp_ratio(2 * x * a1.1 + a0.1, a1.1, num, den) == Ordering::Greater;
            if nearer {
                a1 = (x * a1.0 + a0.0, x * a1.1 + a0.1);
            }
            break;
        }

        a0 = a1;
        a1 = a2;
        num = den;
        den = next_den;
    }

    (a1.0, a1.1, den == 0)
}

/// Compare `a/b` with `c/d` (`b`, `d` nonzero) without forming products.
fn cmp_ratio(mut a: u128, mut b: u128, mut c: u128, mut d: u128) -> Ordering {
    let mut flipped = false;
    loop {
        let (qa, qc) = (a / b, c / d);
        let ord = if qa != qc {
            qa.cmp(&qc)
        } else {
            match (a % b, c % d) {
                (0, 0) => Ordering::Equal,
                (0, _) => Ordering::Less,
                (_, 0) => Ordering::Greater,
                (ra, rc) => {
                    // ra/b < rc/d  <=>  b/ra > d/rc
                    (a, b, c, d) = (b, ra, d, rc);
                    flipped = !flipped;
                    continue;
                }
            }
        };
        return if flipped { ord.reverse() } else { ord };
    }
}

/// Multiply two rationals.
pub fn mul_q(b: Rational, c: Rational) -> Rational {
    reduce_wide(
        b.num as i128 * c.num as i128,
        b.den as i128 * c.den as i128,
        i64::MAX,
    )
    .0
}

/// Divide one rational by another.
pub fn div_q(b: Rational, c: Rational) -> Rational {
    mul_q(b, inv_q(c))
}

/// Add two rationals.
pub fn add_q(b: Rational, c: Rational) -> Rational {
    sum_wide(
        b.num as i128 * c.den as i128,
        c.num as i128 * b.den as i128,
        b.den as i128 * c.den as i128,
    )
}

/// Subtract one rational from another.
pub fn sub_q(b: Rational, c: Rational) -> Rational {
    // Each product is at least -(2^126 - 2^63), so negating one cannot overflow.
    sum_wide(
        b.num as i128 * c.den as i128,
        -(c.num as i128 * b.den as i128),
        b.den as i128 * c.den as i128,
    )
}

/// Reduce `(x + y) / den`. Two products of `i64` terms can sum to `2^127`,
/// one past `i128::MAX`; that sum is carried as a `u128` magnitude.
fn sum_wide(x: i128, y: i128, den: i128) -> Rational {
    match x.checked_add(y) {
        Some(num) => reduce_wide(num, den, i64::MAX).0,
        // Overflow means both terms share a sign.
        None => reduce_signed(
            (x < 0) != (den < 0),
            x.unsigned_abs() + y.unsigned_abs(),
            den.unsigned_abs(),
            i64::MAX,
        )
        .0,
    }
}

/// Invert a rational by swapping its terms.
///
/// A negative numerator moves onto the new numerator, so `-2/3` inverts to
/// `-3/2`. `0/0` stays `0/0` and `n/0` becomes `0/n`.
pub fn inv_q(q: Rational) -> Rational {
    if q.num >= 0 {
        return Rational::new(q.den, q.num);
    }
    match (q.den.checked_neg(), q.num.checked_neg()) {
        (Some(num), Some(den)) => Rational::new(num, den),
        _ => reduce(q.den, q.num, i64::MAX).0,
    }
}
