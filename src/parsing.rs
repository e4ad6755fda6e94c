//! Exact Kubernetes resource quantities.
//!
//! Values are held as an integer count of nano-units, the finest scale the
//! quantity grammar can express, so addition and comparison are exact.
//! Scaled reads (`milli_value`, `value`) round up, matching the apiserver.

use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity as RawQuantity;

use crate::error::TopError;
use crate::types::MeasuredResource;

const NANOS_PER_UNIT: i128 = 1_000_000_000;
const NANOS_PER_MILLI: i128 = 1_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    nanos: i128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    /// Power of ten relative to the base unit.
    Decimal(i32),
    /// Power of 1024 relative to the base unit.
    Binary(u32),
}

impl Quantity {
    pub fn from_milli(milli: i64) -> Self {
        Self { nanos: milli as i128 * NANOS_PER_MILLI }
    }

    pub fn from_value(value: i64) -> Self {
        Self { nanos: value as i128 * NANOS_PER_UNIT }
    }

    /// Value in thousandths of the base unit, rounded up.
    pub fn milli_value(&self) -> i64 {
        saturate(ceil_div(self.nanos, NANOS_PER_MILLI))
    }

    /// Value in whole base units, rounded up.
    pub fn value(&self) -> i64 {
        saturate(ceil_div(self.nanos, NANOS_PER_UNIT))
    }

    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }
}

/// Zero value for `resource`, built from the "0" literal.
pub fn zero_quantity(resource: MeasuredResource) -> Result<Quantity, TopError> {
    "0"
        .parse::<Quantity>()
        .map_err(|_| TopError::MalformedZeroLiteral(resource))
}

impl FromStr for Quantity {
    type Err = TopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &'static str| TopError::InvalidQuantity {
            value: s.to_string(),
            reason,
        };

        let text = s.trim();
        let (negative, rest) = if let Some(r) = text.strip_prefix('-') {
            (true, r)
        } else if let Some(r) = text.strip_prefix('+') {
            (false, r)
        } else {
            (false, text)
        };

        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, suffix) = rest.split_at(number_len);
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("missing digits"));
        }
        if fraction.contains('.') {
            return Err(invalid("more than one decimal point"));
        }

        let scale = parse_suffix(suffix).ok_or_else(|| invalid("unknown suffix"))?;
        let mantissa: i128 = format!("{whole}{fraction}")
            .parse()
            .map_err(|_| invalid("number out of range"))?;

        let mut numerator = mantissa;
        let mut denominator = u32::try_from(fraction.len())
            .ok()
            .and_then(pow10)
            .ok_or_else(|| invalid("number out of range"))?;
        match scale {
            Scale::Decimal(exp) => {
                let shift = exp.checked_add(9).ok_or_else(|| invalid("exponent out of range"))?;
                let factor = pow10(shift.unsigned_abs()).ok_or_else(|| invalid("exponent out of range"))?;
                if shift >= 0 {
                    numerator = numerator.checked_mul(factor).ok_or_else(|| invalid("number out of range"))?;
                } else {
                    denominator = denominator.checked_mul(factor).ok_or_else(|| invalid("number out of range"))?;
                }
            }
            Scale::Binary(power) => {
                numerator = 1024i128
                    .checked_pow(power)
                    .and_then(|f| numerator.checked_mul(f))
                    .and_then(|n| n.checked_mul(NANOS_PER_UNIT))
                    .ok_or_else(|| invalid("number out of range"))?;
            }
        }

        let magnitude = ceil_div(numerator, denominator);
        Ok(Quantity {
            nanos: if negative { -magnitude } else { magnitude },
        })
    }
}

impl TryFrom<&RawQuantity> for Quantity {
    type Error = TopError;

    fn try_from(raw: &RawQuantity) -> Result<Self, Self::Error> {
        raw.0.parse()
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity {
            nanos: self.nanos.saturating_add(rhs.nanos),
        }
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Quantity) {
        *self = *self + rhs;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Quantity {
        iter.fold(Quantity::default(), Add::add)
    }
}

fn parse_suffix(suffix: &str) -> Option<Scale> {
    let scale = match suffix {
        "" => Scale::Decimal(0),
        "n" => Scale::Decimal(-9),
        "u" => Scale::Decimal(-6),
        "m" => Scale::Decimal(-3),
        "k" => Scale::Decimal(3),
        "M" => Scale::Decimal(6),
        "G" => Scale::Decimal(9),
        "T" => Scale::Decimal(12),
        "P" => Scale::Decimal(15),
        "E" => Scale::Decimal(18),
        "Ki" => Scale::Binary(1),
        "Mi" => Scale::Binary(2),
        "Gi" => Scale::Binary(3),
        "Ti" => Scale::Binary(4),
        "Pi" => Scale::Binary(5),
        "Ei" => Scale::Binary(6),
        other => {
            let exp = other.strip_prefix(['e', 'E'])?;
            Scale::Decimal(exp.parse().ok()?)
        }
    };
    Some(scale)
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

fn ceil_div(n: i128, d: i128) -> i128 {
    let q = n / d;
    if n % d > 0 {
        q + 1
    } else {
        q
    }
}

fn saturate(v: i128) -> i64 {
    i64::try_from(v).unwrap_or(if v > 0 { i64::MAX } else { i64::MIN })
}
