//! Currency amounts and the per-serving unit cost calculation.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ModelError, Result};

/// A currency amount held exactly as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    /// Amount in currency units, for use as an LP coefficient.
    pub fn as_f64(self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_positive(self) -> bool {
        self.cents > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Money {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Cost of one serving: `price / servings` rounded to whole cents.
///
/// The quotient is taken in `f64` and rounded half-to-even on its exact binary
/// value, so `3.69 / 6` (stored just below `0.615`) becomes `0.61`.
/// Fails with [`ModelError::InvalidInput`] unless both price and servings are positive.
pub fn unit_cost(price: Money, servings: i64) -> Result<Money> {
    if servings <= 0 {
        return Err(ModelError::InvalidInput(format!(
            "servings per package must be positive, got {}",
            servings
        )));
    }
    if !price.is_positive() {
        return Err(ModelError::InvalidInput(format!("package price must be positive, got {}", price)));
    }

    let quotient = price.as_f64() / servings as f64;
    Ok(Money::from_cents(round_cents(quotient)))
}

/// Round a positive finite amount to whole cents, ties to even.
fn round_cents(value: f64) -> i64 {
    // Below a tenth of a cent the result is zero whatever the rounding mode.
    if value < 1e-3 {
        return 0;
    }

    // The scaled float may be one off the exact floor; settle it exactly.
    let mut cents = (value * 100.0).floor() as i64;
    while cmp_exact(value, cents as i128, 100) == Ordering::Less {
        cents -= 1;
    }
    while cmp_exact(value, (cents + 1) as i128, 100) != Ordering::Less {
        cents += 1;
    }

    match cmp_exact(value, (2 * cents + 1) as i128, 200) {
        Ordering::Less => cents,
        Ordering::Greater => cents + 1,
        Ordering::Equal if cents % 2 == 0 => cents,
        Ordering::Equal => cents + 1,
    }
}

/// Exact ordering of `value` against `n / d`, for normal `value` in `[1e-3, 2^57)`.
fn cmp_exact(value: f64, n: i128, d: i128) -> Ordering {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = ((bits & ((1 << 52) - 1)) | (1 << 52)) as i128;

    if exponent >= 0 {
        (mantissa << exponent).saturating_mul(d).cmp(&n)
    } else {
        (mantissa * d).cmp(&(n << -exponent))
    }
}
