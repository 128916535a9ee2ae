//! Coin amounts and fee arithmetic
//!
//! All monetary amounts are arbitrary-precision non-negative integers in base
//! denomination units. Decimal input (display units, gas prices) is converted
//! with exact integer scaling; binary floating point is never involved, so
//! there is no rounding drift. 1 display unit = 10^8 base units.

use crate::errors::{CroSignerError, CroSignerResult};
use crate::network::{Network, DISPLAY_DECIMALS};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// Denomination unit an amount string is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Base denomination (e.g. basecro); integer amounts only
    Base,
    /// Display denomination (e.g. cro/tcro); up to 8 fractional digits
    Display,
}

impl Unit {
    fn decimals(self) -> u32 {
        match self {
            Unit::Base => 0,
            Unit::Display => DISPLAY_DECIMALS,
        }
    }
}

/// A non-negative amount in base denomination units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    amount: BigUint,
    denom: String,
}

impl Coin {
    /// Parse a decimal amount string in the given unit
    ///
    /// The amount is converted to base units exactly; input with more
    /// fractional digits than the unit supports is rejected rather than
    /// rounded.
    pub fn new(amount: &str, unit: Unit, network: &Network) -> CroSignerResult<Self> {
        let (mantissa, scale) = parse_decimal(amount)?;
        let decimals = unit.decimals();
        let base_amount = if decimals >= scale {
            mantissa * pow10(decimals - scale)
        } else {
            let divisor = pow10(scale - decimals);
            let remainder = &mantissa % &divisor;
            if !remainder.is_zero() {
                return Err(CroSignerError::InvalidAmount {
                    message: format!(
                        "'{amount}' exceeds the {decimals} decimal place(s) of the unit"
                    ),
                });
            }
            mantissa / divisor
        };
        Ok(Self {
            amount: base_amount,
            denom: network.base_denom.to_string(),
        })
    }

    /// Wrap an already-scaled base-unit amount
    pub fn from_base_amount(amount: BigUint, network: &Network) -> Self {
        Self {
            amount,
            denom: network.base_denom.to_string(),
        }
    }

    /// Reconstruct a coin from on-wire parts (integer amount string + denom)
    pub fn from_wire(amount: &str, denom: &str) -> CroSignerResult<Self> {
        let (mantissa, scale) = parse_decimal(amount)?;
        if scale != 0 {
            return Err(CroSignerError::InvalidAmount {
                message: format!("on-wire amount '{amount}' must be an integer"),
            });
        }
        Ok(Self {
            amount: mantissa,
            denom: denom.to_string(),
        })
    }

    /// Amount in base units
    pub fn amount(&self) -> &BigUint {
        &self.amount
    }

    /// Denomination tag
    pub fn denom(&self) -> &str {
        &self.denom
    }

    /// Amount as a u64, failing if it does not fit
    pub fn to_u64(&self) -> CroSignerResult<u64> {
        self.amount.to_u64().ok_or_else(|| CroSignerError::Overflow {
            message: format!("{} does not fit in a u64", self.amount),
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Fee = `gas_limit × gas_price`, truncated toward zero to base units
///
/// The gas price is a decimal string in base units per gas unit
/// (e.g. "0.025"). The multiplication is exact; only the final division by
/// the price's decimal scale truncates.
pub fn compute_fee(gas_limit: u64, gas_price: &str, network: &Network) -> CroSignerResult<Coin> {
    let (mantissa, scale) = parse_decimal(gas_price)?;
    let total = BigUint::from(gas_limit) * mantissa;
    let amount = total / pow10(scale);
    Ok(Coin::from_base_amount(amount, network))
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Parse a non-negative decimal string into `(mantissa, scale)` where the
/// value equals `mantissa / 10^scale`
fn parse_decimal(input: &str) -> CroSignerResult<(BigUint, u32)> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(CroSignerError::NegativeAmount {
            message: format!("'{trimmed}' is negative"),
        });
    }
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CroSignerError::InvalidAmount {
            message: format!("'{input}' is not a decimal number"),
        });
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(CroSignerError::InvalidAmount {
            message: format!("'{input}' is not a decimal number"),
        });
    }
    let digits = format!("{int_part}{frac_part}");
    let mantissa = BigUint::from_str(&digits).map_err(|e| CroSignerError::InvalidAmount {
        message: format!("'{input}': {e}"),
    })?;
    Ok((mantissa, frac_part.len() as u32))
}
