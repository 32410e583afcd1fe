// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Exact conversion between display amounts and base units (wei).
//!
//! Amounts are handled as decimal text end to end. Converting through `f64`
//! loses precision for values such as `0.1`, so the digits are shifted
//! instead of multiplied.

use alloy::primitives::U256;

use crate::error::DashboardError;

/// Largest power of ten that fits in a `U256`.
const MAX_SCALE: i64 = 77;

/// Parse a human-readable amount to base units.
///
/// Accepts plain decimals (`"1.5"`) and the exponent form JSON serialisers
/// emit for small floats (`"1e-7"`). Digits beyond `decimals` are truncated
/// toward zero.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "0.1")
/// * `decimals` - Number of decimals (18 for ETH)
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, DashboardError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(DashboardError::InvalidAmount("amount is empty".to_string()));
    }
    if amount.starts_with('-') {
        return Err(DashboardError::InvalidAmount(
            "amount must not be negative".to_string(),
        ));
    }

    let (mantissa, exponent) = match amount.split_once(['e', 'E']) {
        Some((mantissa, exp)) => {
            let exp = exp
                .trim_start_matches('+')
                .parse::<i64>()
                .map_err(|_| DashboardError::InvalidAmount(format!("invalid exponent in `{amount}`")))?;
            (mantissa, exp)
        }
        None => (amount, 0),
    };

    let parts: Vec<&str> = mantissa.split('.').collect();
    if parts.len() > 2 {
        return Err(DashboardError::InvalidAmount(format!(
            "invalid amount format `{amount}`"
        )));
    }

    let whole = parts[0];
    let fraction = parts.get(1).copied().unwrap_or("");
    if whole.is_empty() && fraction.is_empty() {
        return Err(DashboardError::InvalidAmount(format!(
            "invalid amount format `{amount}`"
        )));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(DashboardError::InvalidAmount(format!(
            "amount `{amount}` contains non-digit characters"
        )));
    }

    let mut digits = format!("{whole}{fraction}");
    let shift = i64::try_from(fraction.len())
        .ok()
        .and_then(|len| i64::from(decimals).checked_add(exponent)?.checked_sub(len))
        .ok_or_else(|| DashboardError::InvalidAmount("amount overflow".to_string()))?;

    if shift >= 0 {
        if shift > MAX_SCALE {
            return Err(DashboardError::InvalidAmount("amount overflow".to_string()));
        }
        digits.extend(std::iter::repeat_n('0', shift as usize));
    } else {
        // Truncate toward zero.
        let keep = digits.len().saturating_sub(shift.unsigned_abs() as usize);
        digits.truncate(keep);
    }

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10)
        .map_err(|_| DashboardError::InvalidAmount("amount overflow".to_string()))
}

/// Format base units to a human-readable amount.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        }
    }
}
