//! Monetary amounts on integer minor units.
//!
//! Customer money is accumulated in centavos. Decimal values are rounded
//! half-up once, when they enter the system; every later operation is exact
//! integer arithmetic.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A peso amount held as integer centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    pub fn centavos(self) -> i64 {
        self.0
    }

    /// Converts a decimal value into centavos, rounding halves up.
    ///
    /// This is the only place rounding happens; rejects NaN, infinities and
    /// values outside the representable centavo range.
    pub fn from_decimal(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        let scaled = value * 100.0;
        if scaled.abs() >= i64::MAX as f64 {
            return Err(AmountError::OutOfRange);
        }
        let centavos = if scaled >= 0.0 {
            (scaled + 0.5).floor()
        } else {
            (scaled - 0.5).ceil()
        };
        Ok(Self(centavos as i64))
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Renders the amount prefixed with a currency symbol, e.g. `₱2,000.00`.
    pub fn display_with(self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0 - rhs.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centavos = self.0.unsigned_abs();
        let whole = group_digits(&(centavos / 100).to_string());
        let frac = centavos % 100;
        if self.0 < 0 {
            write!(f, "-{}.{:02}", whole, frac)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    NotFinite,
    OutOfRange,
    NotPositive,
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            AmountError::NotFinite => "amount is not a finite number",
            AmountError::OutOfRange => "amount exceeds the representable range",
            AmountError::NotPositive => "amount must be greater than zero",
        };
        f.write_str(message)
    }
}

impl std::error::Error for AmountError {}

/// Remaining balance on a record, floored at zero.
pub fn balance_due(total: Amount, amount_paid: Amount) -> Amount {
    if total > amount_paid {
        total - amount_paid
    } else {
        Amount::ZERO
    }
}

/// A record is fully paid once its balance reaches zero against a known,
/// non-zero total. An unquoted record is never fully paid.
pub fn is_fully_paid(total: Amount, amount_paid: Amount) -> bool {
    total > Amount::ZERO && balance_due(total, amount_paid).is_zero()
}

/// Accumulates a confirmed payment into the running paid total.
pub fn apply_payment(amount_paid: Amount, incoming: Amount) -> Result<Amount, AmountError> {
    if incoming <= Amount::ZERO {
        return Err(AmountError::NotPositive);
    }
    Ok(amount_paid + incoming)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
