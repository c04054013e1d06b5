use alloy::primitives::U256;
use thiserror::Error;

/// 10^12 — wei per micro-ETH (6 fractional display digits).
const WEI_PER_MICRO: u64 = 1_000_000_000_000;

/// 10^6 — micro-ETH per ETH.
const MICRO_PER_ETH: u64 = 1_000_000;

/// 10^18 — wei per ETH.
const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;

/// Format a wei amount as a decimal ETH string with at most 6 fractional
/// digits, rounded, trailing zeros stripped; zero renders as `"0"`.
///
/// Presentational only; never used for amount construction.
pub fn wei_to_display(wei: U256) -> String {
    let micro = (wei + U256::from(WEI_PER_MICRO / 2)) / U256::from(WEI_PER_MICRO);
    let whole = micro / U256::from(MICRO_PER_ETH);
    let frac = micro % U256::from(MICRO_PER_ETH);
    if frac.is_zero() {
        return whole.to_string();
    }
    // frac < 10^6, always fits u64
    let digits = format!("{:06}", frac.to::<u64>());
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountParseError {
    #[error("invalid amount string: {0:?}")]
    Invalid(String),

    #[error("too many decimal places (max 18): {0:?}")]
    TooManyDecimals(String),
}

/// Parse a user-entered decimal ETH string into wei, exactly. Used only when
/// constructing a transaction value.
pub fn parse_amount(s: &str) -> Result<U256, AmountParseError> {
    let trimmed = s.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AmountParseError::Invalid(s.to_string()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmountParseError::Invalid(s.to_string()));
    }
    if frac.len() > 18 {
        return Err(AmountParseError::TooManyDecimals(s.to_string()));
    }

    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10)
            .map_err(|_| AmountParseError::Invalid(s.to_string()))?
            .checked_mul(U256::from(WEI_PER_ETH))
            .ok_or_else(|| AmountParseError::Invalid(s.to_string()))?
    };

    let frac_wei = if frac.is_empty() {
        U256::ZERO
    } else {
        // right-pad to 18 digits: "001" → "001000000000000000"
        let padded = format!("{frac:0<18}");
        U256::from_str_radix(&padded, 10)
            .map_err(|_| AmountParseError::Invalid(s.to_string()))?
    };

    whole_wei
        .checked_add(frac_wei)
        .ok_or_else(|| AmountParseError::Invalid(s.to_string()))
}
