use anchor_lang::prelude::*;

use crate::state::ExplosionReason;

#[event]
pub struct PresaleStarted {
    pub round_id: u64,
    pub authority: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub lottery_spots: u32,
    pub min_deposit: u64,
    pub max_deposit: u64,
}

#[event]
pub struct DepositMade {
    pub round_id: u64,
    pub depositor: Pubkey,
    pub amount: u64,
    pub position: u32,
}

#[event]
pub struct PresaleFinalized {
    pub round_id: u64,
    pub total_deposited: u64,
    pub depositor_count: u32,
    pub selected_count: u32,
    pub lottery_seed: [u8; 32],
    pub winner_indexes: Vec<u32>,
    pub forced: bool,
}

#[event]
pub struct WinnerMarked {
    pub round_id: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RefundClaimed {
    pub round_id: u64,
    pub depositor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WinnerClaimed {
    pub round_id: u64,
    pub winner: Pubkey,
    pub tokens: u64,
}

#[event]
pub struct PresaleTokenCreated {
    pub round_id: u64,
    pub mint: Pubkey,
    pub total_supply: u64,
    pub tokens_per_winner: u64,
}

#[event]
pub struct PoolCreated {
    pub round_id: u64,
    pub pool: Pubkey,
    pub token_vault: Pubkey,
    pub sol_reserve: u64,
    pub token_reserve: u64,
    pub fee_bps: u16,
}

#[event]
pub struct SwapExecuted {
    pub round_id: u64,
    pub user: Pubkey,
    pub is_buy: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub sol_reserve: u64,
    pub token_reserve: u64,
}

#[event]
pub struct ReservesSynced {
    pub round_id: u64,
    pub sol_reserve: u64,
    pub token_reserve: u64,
}

#[event]
pub struct ExplosionArmed {
    pub round_id: u64,
    pub cap_hash: [u8; 32],
}

#[event]
pub struct ExplosionTimerStarted {
    pub round_id: u64,
    pub deadline: i64,
}

#[event]
pub struct ExplosionTriggered {
    pub round_id: u64,
    pub reason: ExplosionReason,
    pub revealed_cap: u64,
    pub explosion_time: i64,
}

#[event]
pub struct PayoutRegistered {
    pub round_id: u64,
    pub total_sol: u64,
    pub supply_at_explosion: u64,
}

#[event]
pub struct PayoutClaimed {
    pub round_id: u64,
    pub holder: Pubkey,
    pub tokens_burned: u64,
    pub sol_paid: u64,
}

#[event]
pub struct LpRegistered {
    pub round_id: u64,
    pub pool_id: Pubkey,
    pub lp_mint: Pubkey,
}
