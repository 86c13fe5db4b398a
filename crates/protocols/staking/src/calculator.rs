//! Staking Calculator
//!
//! Pure functions for amount parsing/formatting and the dashboard
//! derivations. No async, no node.
//!
//! Validation and submission work on smallest-unit integers only; floating
//! point appears solely in display derivations (APY, pool share), where
//! precision loss is acceptable.

use alloy_primitives::U256;

use crate::constants::{REWARD_RATE_DIVISOR, TOKEN_DECIMALS};
use crate::state::{AccountSnapshot, DerivedView, PoolSnapshot};

/// 10^18, the token's smallest-unit scaling
fn unit_scale() -> U256 {
    U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// Parse a decimal amount string into smallest units (18 decimals).
///
/// Returns None for empty/garbage input, signs, more than 18 fraction
/// digits, or overflow. All arithmetic is checked; no floating point.
pub fn parse_units(amount: &str) -> Option<U256> {
    let amount = amount.trim();
    if amount.is_empty() || amount == "." {
        return None;
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > TOKEN_DECIMALS as usize {
        return None;
    }

    let whole_units = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).ok()?
    };

    // Right-pad the fraction to 18 digits: "25" -> 250000000000000000
    let mut frac_padded = frac.to_string();
    while frac_padded.len() < TOKEN_DECIMALS as usize {
        frac_padded.push('0');
    }
    let frac_units = U256::from_str_radix(&frac_padded, 10).ok()?;

    whole_units
        .checked_mul(unit_scale())?
        .checked_add(frac_units)
}

/// Format a smallest-unit amount as a decimal string, trailing zeros trimmed
pub fn format_units(amount: U256) -> String {
    let scale = unit_scale();
    let whole = amount / scale;
    let frac = amount % scale;

    if frac.is_zero() {
        return whole.to_string();
    }

    let frac_str = format!("{:0>width$}", frac, width = TOKEN_DECIMALS as usize);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

/// Lossy conversion for display math only
fn to_f64_lossy(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .enumerate()
        .map(|(i, limb)| *limb as f64 * 2f64.powi(64 * i as i32))
        .sum()
}

/// Smallest-unit amount as a floating token count
fn normalized(value: U256) -> f64 {
    to_f64_lossy(value) / 10f64.powi(TOKEN_DECIMALS as i32)
}

/// Annual percentage yield from the pool's published rate.
///
/// The contract's rate unit is fixed: dividing by 100 yields percent
/// (500 -> 5%). Unknown rate derives to 0.
pub fn compute_apy(reward_rate: Option<U256>) -> f64 {
    match reward_rate {
        Some(rate) => to_f64_lossy(rate) / REWARD_RATE_DIVISOR,
        None => 0.0,
    }
}

/// The account's share of the pool as a percentage.
///
/// Computed on normalized magnitudes so the division cannot overflow;
/// display only, never authoritative accounting. Zero/unknown total is 0.
pub fn compute_pool_share(staked_amount: U256, total_staked: U256) -> f64 {
    if total_staked.is_zero() {
        return 0.0;
    }
    normalized(staked_amount) / normalized(total_staked) * 100.0
}

/// Whether a fresh approval is required before staking `requested` units.
///
/// Unknown allowance always requires approval; a known allowance covers the
/// request iff it is at least as large.
pub fn needs_approval(allowance: Option<U256>, requested: U256) -> bool {
    match allowance {
        None => true,
        Some(a) => a < requested,
    }
}

/// Derive the dashboard view from the current snapshots and the amount typed
/// into the stake field. Pure; call on every input change.
pub fn derive_view(
    account: Option<&AccountSnapshot>,
    pool: Option<&PoolSnapshot>,
    allowance: Option<U256>,
    stake_input: &str,
) -> DerivedView {
    let requested = parse_units(stake_input).unwrap_or(U256::ZERO);

    let pool_share_percent = match (account, pool) {
        (Some(a), Some(p)) => compute_pool_share(a.staked_amount, p.total_staked),
        _ => 0.0,
    };

    DerivedView {
        token_balance: format_units(account.map(|a| a.token_balance).unwrap_or(U256::ZERO)),
        staked_amount: format_units(account.map(|a| a.staked_amount).unwrap_or(U256::ZERO)),
        pending_rewards: format_units(account.map(|a| a.pending_rewards).unwrap_or(U256::ZERO)),
        total_staked: format_units(pool.map(|p| p.total_staked).unwrap_or(U256::ZERO)),
        apy_percent: compute_apy(pool.map(|p| p.reward_rate)),
        pool_share_percent,
        needs_approval: needs_approval(allowance, requested),
        claimable: account.is_some_and(|a| !a.pending_rewards.is_zero()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: u64) -> U256 {
        U256::from(n) * unit_scale()
    }

    #[test]
    fn test_parse_units_whole() {
        assert_eq!(parse_units("500"), Some(units(500)));
        assert_eq!(parse_units("0"), Some(U256::ZERO));
        assert_eq!(parse_units(" 1000 "), Some(units(1000)));
    }

    #[test]
    fn test_parse_units_fractional() {
        let expected = units(500) + U256::from(250_000_000_000_000_000u64);
        assert_eq!(parse_units("500.25"), Some(expected));
        assert_eq!(parse_units(".25"), Some(U256::from(250_000_000_000_000_000u64)));
        // Exactly 18 fraction digits is the finest granularity
        assert_eq!(parse_units("0.000000000000000001"), Some(U256::from(1)));
    }

    #[test]
    fn test_parse_units_rejects_garbage() {
        assert_eq!(parse_units(""), None);
        assert_eq!(parse_units("."), None);
        assert_eq!(parse_units("abc"), None);
        assert_eq!(parse_units("-5"), None);
        assert_eq!(parse_units("+5"), None);
        assert_eq!(parse_units("1.2.3"), None);
        assert_eq!(parse_units("1e18"), None);
        // 19 fraction digits would silently truncate; reject instead
        assert_eq!(parse_units("0.0000000000000000001"), None);
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(units(1000)), "1000");
        assert_eq!(format_units(U256::ZERO), "0");
        assert_eq!(
            format_units(units(500) + U256::from(250_000_000_000_000_000u64)),
            "500.25"
        );
        assert_eq!(format_units(U256::from(1)), "0.000000000000000001");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for s in ["0", "1", "1000", "500.25", "0.5"] {
            assert_eq!(format_units(parse_units(s).unwrap()), s);
        }
    }

    #[test]
    fn test_compute_apy() {
        assert_eq!(compute_apy(Some(U256::from(500))), 5.0);
        assert_eq!(compute_apy(Some(U256::from(1250))), 12.5);
        assert_eq!(compute_apy(Some(U256::ZERO)), 0.0);
        assert_eq!(compute_apy(None), 0.0);
    }

    #[test]
    fn test_pool_share_bounds() {
        // staked <= total stays within [0, 100]
        for (staked, total) in [(1u64, 1000u64), (500, 1000), (1000, 1000)] {
            let share = compute_pool_share(units(staked), units(total));
            assert!((0.0..=100.0).contains(&share), "share {} out of range", share);
        }

        assert_eq!(compute_pool_share(units(500), units(1000)), 50.0);
        assert_eq!(compute_pool_share(units(123), U256::ZERO), 0.0);
        assert_eq!(compute_pool_share(U256::ZERO, units(1000)), 0.0);
    }

    #[test]
    fn test_needs_approval() {
        let a = units(500);
        assert!(!needs_approval(Some(a), a));
        assert!(needs_approval(Some(a), a + U256::from(1)));
        assert!(!needs_approval(Some(a), a - U256::from(1)));
        // Unknown allowance always needs approval
        assert!(needs_approval(None, U256::ZERO));
        assert!(needs_approval(None, units(1)));
        // Known allowance trivially covers a zero request
        assert!(!needs_approval(Some(U256::ZERO), U256::ZERO));
    }

    #[test]
    fn test_derive_view_unknown_state() {
        let view = derive_view(None, None, None, "");
        assert_eq!(view.token_balance, "0");
        assert_eq!(view.total_staked, "0");
        assert_eq!(view.apy_percent, 0.0);
        assert_eq!(view.pool_share_percent, 0.0);
        // Unknown allowance gates approval on; unknown rewards gate claim off
        assert!(view.needs_approval);
        assert!(!view.claimable);
    }

    #[test]
    fn test_derive_view_populated() {
        let account = AccountSnapshot {
            token_balance: units(1000),
            staked_amount: units(250),
            pending_rewards: units(3),
        };
        let pool = PoolSnapshot {
            total_staked: units(1000),
            reward_rate: U256::from(500),
        };

        let view = derive_view(Some(&account), Some(&pool), Some(units(500)), "500");
        assert_eq!(view.token_balance, "1000");
        assert_eq!(view.staked_amount, "250");
        assert_eq!(view.pending_rewards, "3");
        assert_eq!(view.total_staked, "1000");
        assert_eq!(view.apy_percent, 5.0);
        assert_eq!(view.pool_share_percent, 25.0);
        assert!(!view.needs_approval);
        assert!(view.claimable);

        // Typing past the allowance flips the approval gate
        let view = derive_view(Some(&account), Some(&pool), Some(units(500)), "500.01");
        assert!(view.needs_approval);

        // Unparsable input is treated as a zero request
        let view = derive_view(Some(&account), Some(&pool), Some(units(500)), "oops");
        assert!(!view.needs_approval);
    }

    #[test]
    fn test_derive_view_idempotent() {
        let account = AccountSnapshot {
            token_balance: units(42),
            staked_amount: units(7),
            pending_rewards: U256::ZERO,
        };
        let pool = PoolSnapshot {
            total_staked: units(70),
            reward_rate: U256::from(800),
        };

        let first = derive_view(Some(&account), Some(&pool), Some(units(10)), "5");
        let second = derive_view(Some(&account), Some(&pool), Some(units(10)), "5");
        assert_eq!(first, second);
    }
}
