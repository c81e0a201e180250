//! Conversion of user-entered token amounts into on-chain base units.
//!
//! Amounts arrive as free text from the frame's text input. The text is read the way a
//! lenient float parser reads it (longest numeric prefix wins), scaled by `10^decimals`
//! in `f64`, and truncated toward zero. The float product is converted to `U256` from its
//! exact binary value, so `1e23` yields `99999999999999991611392`, not a rounded decimal.

use std::sync::OnceLock;

use alloy_primitives::ruint::ToUintError;
use alloy_primitives::U256;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons an amount could not be represented as a `uint256`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is not a number")]
    NotANumber,

    #[error("amount is negative")]
    Negative,

    #[error("amount does not fit in uint256")]
    Overflow,
}

fn float_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("float prefix pattern is valid")
    })
}

/// Parse the longest decimal-float prefix of `text`, skipping leading whitespace.
///
/// Returns `None` when no prefix parses (`""`, `"abc"`, `"."`).
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let prefix = float_prefix().find(trimmed)?;
    prefix.as_str().parse::<f64>().ok()
}

/// Scale `value` by `10^decimals` and truncate to an integer number of base units.
pub fn to_base_units(value: f64, decimals: u8) -> Result<U256, AmountError> {
    let scaled = value * 10f64.powi(decimals as i32);
    // try_from rounds to nearest, amounts truncate
    U256::try_from(scaled.trunc()).map_err(|e| match e {
        ToUintError::NotANumber(_) => AmountError::NotANumber,
        ToUintError::ValueNegative(..) => AmountError::Negative,
        _ => AmountError::Overflow,
    })
}

/// Convert the approve screen's text input into base units.
///
/// Absent or empty text is `"0"`. Anything that cannot be represented is coerced to zero.
pub fn approve_amount(input_text: Option<&str>, decimals: u8) -> U256 {
    let text = match input_text {
        Some(text) if !text.is_empty() => text,
        _ => "0",
    };

    let Some(value) = parse_float_prefix(text) else {
        debug!("Amount text {:?} is not numeric, using 0", text);
        return U256::ZERO;
    };

    match to_base_units(value, decimals) {
        Ok(amount) => amount,
        Err(e) => {
            warn!("Amount {:?} coerced to 0: {}", text, e);
            U256::ZERO
        }
    }
}
