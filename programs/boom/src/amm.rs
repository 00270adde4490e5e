use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::BoomError;

// ─────────────────────────────────────────────────────────────────────────────
// Constant-product math
// ─────────────────────────────────────────────────────────────────────────────
//
// All intermediates are u128: reserve * amount_in * 10_000 fits for any
// pair of u64 operands. Results are floored, so rounding favors the pool.

/// Output of a constant-product swap with the fee taken on the input leg:
///
/// `out = reserve_out * in * (10000 - fee) / (reserve_in * 10000 + in * (10000 - fee))`
pub fn swap_output(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_bps: u16) -> Result<u64> {
    require!(
        reserve_in > 0 && reserve_out > 0,
        BoomError::InsufficientLiquidity
    );
    require!((fee_bps as u64) < BPS_DENOMINATOR, BoomError::InvalidFee);

    let fee_factor = (BPS_DENOMINATOR - fee_bps as u64) as u128;
    let amount_in_with_fee = (amount_in as u128)
        .checked_mul(fee_factor)
        .ok_or(BoomError::ArithmeticOverflow)?;
    let numerator = (reserve_out as u128)
        .checked_mul(amount_in_with_fee)
        .ok_or(BoomError::ArithmeticOverflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .and_then(|v| v.checked_add(amount_in_with_fee))
        .ok_or(BoomError::ArithmeticOverflow)?;

    let out = numerator
        .checked_div(denominator)
        .ok_or(BoomError::ArithmeticOverflow)?;
    u64::try_from(out).map_err(|_| error!(BoomError::ArithmeticOverflow))
}

/// Client-side price impact in percent:
/// `|1 - (out / in) / (reserve_out / reserve_in)| * 100`.
pub fn price_impact_pct(amount_in: u64, amount_out: u64, reserve_in: u64, reserve_out: u64) -> f64 {
    if amount_in == 0 || reserve_in == 0 || reserve_out == 0 {
        return 0.0;
    }
    let execution = amount_out as f64 / amount_in as f64;
    let spot = reserve_out as f64 / reserve_in as f64;
    ((1.0 - execution / spot) * 100.0).abs()
}

/// Fully diluted market cap in lamports at the pool's spot price.
pub fn market_cap_lamports(sol_reserve: u64, token_reserve: u64, supply: u64) -> Result<u64> {
    require!(token_reserve > 0, BoomError::InsufficientLiquidity);
    let cap = (sol_reserve as u128)
        .checked_mul(supply as u128)
        .ok_or(BoomError::ArithmeticOverflow)?
        / token_reserve as u128;
    u64::try_from(cap).map_err(|_| error!(BoomError::ArithmeticOverflow))
}

/// `market_cap_lamports` clamped into u64: 0 for an empty pool, `u64::MAX`
/// past the top of the range.
pub fn market_cap_saturating(sol_reserve: u64, token_reserve: u64, supply: u64) -> u64 {
    if token_reserve == 0 {
        return 0;
    }
    let cap = sol_reserve as u128 * supply as u128 / token_reserve as u128;
    u64::try_from(cap).unwrap_or(u64::MAX)
}

/// A holder's slice of the payout pot for `amount` burned tokens.
pub fn payout_share(total_sol: u64, amount: u64, supply: u64) -> Result<u64> {
    require!(supply > 0, BoomError::ZeroBalance);
    let share = (total_sol as u128)
        .checked_mul(amount as u128)
        .ok_or(BoomError::ArithmeticOverflow)?
        / supply as u128;
    u64::try_from(share).map_err(|_| error!(BoomError::ArithmeticOverflow))
}
