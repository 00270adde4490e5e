use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::amm;
use crate::constants::{MAX_DEPOSITORS, MAX_NAME_LEN, MAX_SYMBOL_LEN};
use crate::errors::BoomError;
use crate::lottery;

// ─────────────────────────────────────────────────────────────────────────────
// PresaleRound — one per round
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"presale", round_id.to_le_bytes()]
// Holds the deposited lamports until they are refunded or moved to the pool.

#[account]
#[derive(Debug)]
pub struct PresaleRound {
    pub round_id: u64,

    /// Round owner. Finalizes, marks winners and launches the token.
    pub authority: Pubkey,

    pub start_time: i64,
    pub end_time: i64,

    /// Number of early-access winner slots.
    pub lottery_spots: u32,

    pub min_deposit: u64,
    pub max_deposit: u64,

    /// Sum of all deposits, refunded or not.
    pub total_deposited: u64,

    /// Depositors so far. Also the next deposit's lottery position.
    pub depositor_count: u32,

    /// Set once by `end_presale_and_lottery`, never cleared.
    pub is_finalized: bool,

    /// Most recent slot hash at finalization. Seeds the lottery draw.
    pub lottery_seed: [u8; 32],

    pub winners_marked: u32,

    /// Marked winners whose allocation has been minted.
    pub winners_claimed: u32,

    /// Deposits of marked winners; seeds the pool's SOL side.
    pub winner_deposits: u64,

    pub total_refunded: u64,

    /// Bump seed for this PDA.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 28],
}

impl PresaleRound {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // authority
        + 8   // start_time
        + 8   // end_time
        + 4   // lottery_spots
        + 8   // min_deposit
        + 8   // max_deposit
        + 8   // total_deposited
        + 4   // depositor_count
        + 1   // is_finalized
        + 32  // lottery_seed
        + 4   // winners_marked
        + 4   // winners_claimed
        + 8   // winner_deposits
        + 8   // total_refunded
        + 1   // bump
        + 28; // _reserved

    #[allow(clippy::too_many_arguments)]
    pub fn open(
        &mut self,
        round_id: u64,
        authority: Pubkey,
        now: i64,
        duration: i64,
        lottery_spots: u32,
        min_deposit: u64,
        max_deposit: u64,
        bump: u8,
    ) -> Result<()> {
        require!(
            min_deposit > 0 && min_deposit <= max_deposit,
            BoomError::InvalidBounds
        );
        require!(lottery_spots > 0 && duration > 0, BoomError::InvalidConfig);

        self.round_id = round_id;
        self.authority = authority;
        self.start_time = now;
        self.end_time = now
            .checked_add(duration)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.lottery_spots = lottery_spots;
        self.min_deposit = min_deposit;
        self.max_deposit = max_deposit;
        self.total_deposited = 0;
        self.depositor_count = 0;
        self.is_finalized = false;
        self.lottery_seed = [0u8; 32];
        self.winners_marked = 0;
        self.winners_claimed = 0;
        self.winner_deposits = 0;
        self.total_refunded = 0;
        self.bump = bump;
        self._reserved = [0u8; 28];
        Ok(())
    }

    pub fn is_active(&self, now: i64) -> bool {
        !self.is_finalized && now >= self.start_time && now < self.end_time
    }

    /// Accepts one deposit and returns its lottery position.
    pub fn record_deposit(&mut self, amount: u64, now: i64) -> Result<u32> {
        require!(!self.is_finalized, BoomError::AlreadyFinalized);
        require!(now < self.end_time, BoomError::RoundEnded);
        require!(
            amount >= self.min_deposit && amount <= self.max_deposit,
            BoomError::OutOfBounds
        );
        require!(self.depositor_count < MAX_DEPOSITORS, BoomError::RoundFull);

        let position = self.depositor_count;
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.depositor_count = self
            .depositor_count
            .checked_add(1)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(position)
    }

    /// Closes the round. `force` lets the authority end it before `end_time`.
    pub fn finalize(&mut self, now: i64, force: bool, seed: [u8; 32]) -> Result<()> {
        require!(!self.is_finalized, BoomError::AlreadyFinalized);
        require!(force || now >= self.end_time, BoomError::RoundNotEnded);

        self.is_finalized = true;
        self.lottery_seed = seed;
        Ok(())
    }

    /// Winners the lottery selects: `min(lottery_spots, depositor_count)`.
    pub fn selected_count(&self) -> u32 {
        lottery::winner_count(self.depositor_count, self.lottery_spots)
    }

    pub fn is_selected(&self, position: u32) -> bool {
        self.is_finalized
            && lottery::is_winner(
                &self.lottery_seed,
                self.depositor_count,
                self.lottery_spots,
                position,
            )
    }

    pub fn all_winners_marked(&self) -> bool {
        self.winners_marked == self.selected_count()
    }

    fn record_winner(&mut self, amount: u64) -> Result<()> {
        self.winners_marked = self
            .winners_marked
            .checked_add(1)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.winner_deposits = self
            .winner_deposits
            .checked_add(amount)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Winner tokens owed but not yet minted.
    pub fn unclaimed_allocation(&self, tokens_per_winner: u64) -> Result<u64> {
        let pending = self
            .winners_marked
            .checked_sub(self.winners_claimed)
            .ok_or(BoomError::ArithmeticOverflow)?;
        (pending as u64)
            .checked_mul(tokens_per_winner)
            .ok_or(error!(BoomError::ArithmeticOverflow))
    }

    /// Supply every holder claims against once the pool is unwound:
    /// minted tokens plus winner allocations still to be minted.
    pub fn payout_supply(&self, minted_supply: u64, tokens_per_winner: u64) -> Result<u64> {
        minted_supply
            .checked_add(self.unclaimed_allocation(tokens_per_winner)?)
            .ok_or(error!(BoomError::ArithmeticOverflow))
    }

    fn record_claim(&mut self) -> Result<()> {
        self.winners_claimed = self
            .winners_claimed
            .checked_add(1)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(())
    }

    fn record_refund(&mut self, amount: u64) -> Result<()> {
        self.total_refunded = self
            .total_refunded
            .checked_add(amount)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UserDeposit — one per (round, depositor)
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"deposit", round_id.to_le_bytes(), depositor.key().as_ref()]

#[account]
#[derive(Debug)]
pub struct UserDeposit {
    pub round_id: u64,
    pub depositor: Pubkey,

    /// Lamports deposited. A depositor deposits exactly once.
    pub amount: u64,

    pub deposit_time: i64,

    /// Arrival order within the round, used as the lottery index.
    pub position: u32,

    pub is_winner: bool,

    /// Refund taken (non-winner) or allocation minted (winner).
    pub claimed: bool,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl UserDeposit {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // depositor
        + 8   // amount
        + 8   // deposit_time
        + 4   // position
        + 1   // is_winner
        + 1   // claimed
        + 1;  // bump

    pub fn is_recorded(&self) -> bool {
        self.depositor != Pubkey::default()
    }

    pub fn record(
        &mut self,
        round: &mut PresaleRound,
        depositor: Pubkey,
        amount: u64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.is_recorded(), BoomError::AlreadyDeposited);
        let position = round.record_deposit(amount, now)?;

        self.round_id = round.round_id;
        self.depositor = depositor;
        self.amount = amount;
        self.deposit_time = now;
        self.position = position;
        self.is_winner = false;
        self.claimed = false;
        self.bump = bump;
        Ok(())
    }

    pub fn mark_winner(&mut self, round: &mut PresaleRound) -> Result<()> {
        require!(round.is_finalized, BoomError::NotFinalized);
        require!(!self.is_winner, BoomError::AlreadyWinner);
        require!(round.is_selected(self.position), BoomError::NotSelected);

        self.is_winner = true;
        round.record_winner(self.amount)
    }

    /// Returns the lamports owed back to a depositor the lottery passed over.
    pub fn take_refund(&mut self, round: &mut PresaleRound) -> Result<u64> {
        require!(round.is_finalized, BoomError::NotFinalized);
        require!(
            !self.is_winner && !round.is_selected(self.position),
            BoomError::WinnerCannotRefund
        );
        require!(!self.claimed, BoomError::AlreadyClaimed);

        self.claimed = true;
        round.record_refund(self.amount)?;
        Ok(self.amount)
    }

    /// Returns the token allocation owed to a marked winner.
    pub fn take_allocation(
        &mut self,
        round: &mut PresaleRound,
        token: &PresaleToken,
    ) -> Result<u64> {
        require!(round.is_finalized, BoomError::NotFinalized);
        require!(self.is_winner, BoomError::NotAWinner);
        require!(!self.claimed, BoomError::AlreadyClaimed);

        self.claimed = true;
        round.record_claim()?;
        Ok(token.tokens_per_winner)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PresaleToken — one per round
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"presale_token", round_id.to_le_bytes()]

#[account]
#[derive(Debug)]
pub struct PresaleToken {
    pub round_id: u64,

    /// Token-2022 mint with the transfer hook pointing at the gate.
    pub mint: Pubkey,

    /// Raw units, 9 decimals.
    pub total_supply: u64,
    pub tokens_per_winner: u64,

    /// Zero-padded UTF-8.
    pub name: [u8; MAX_NAME_LEN],
    pub symbol: [u8; MAX_SYMBOL_LEN],

    pub created_at: i64,

    /// Bump seed for this PDA.
    pub bump: u8,

    /// Bump of the `mint_authority` PDA.
    pub mint_authority_bump: u8,
}

impl PresaleToken {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // mint
        + 8   // total_supply
        + 8   // tokens_per_winner
        + MAX_NAME_LEN
        + MAX_SYMBOL_LEN
        + 8   // created_at
        + 1   // bump
        + 1;  // mint_authority_bump

    pub fn is_created(&self) -> bool {
        self.mint != Pubkey::default()
    }

    /// Checks a launch of `total_supply` with `tokens_per_winner` against
    /// the round's lottery outcome.
    pub fn validate_launch(
        round: &PresaleRound,
        total_supply: u64,
        tokens_per_winner: u64,
    ) -> Result<()> {
        require!(round.is_finalized, BoomError::NotFinalized);
        require!(round.winners_marked > 0, BoomError::NoWinners);
        require!(
            total_supply > 0 && tokens_per_winner > 0,
            BoomError::ZeroSupply
        );
        let allocated = tokens_per_winner
            .checked_mul(round.selected_count() as u64)
            .ok_or(BoomError::SupplyTooSmall)?;
        require!(allocated <= total_supply, BoomError::SupplyTooSmall);
        Ok(())
    }

    /// Tokens left for the pool once every winner is paid.
    pub fn pool_allocation(&self, winners: u32) -> Result<u64> {
        let allocated = self
            .tokens_per_winner
            .checked_mul(winners as u64)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.total_supply
            .checked_sub(allocated)
            .ok_or_else(|| error!(BoomError::SupplyTooSmall))
    }
}

/// Copies `value` into a zero-padded fixed-width field.
pub fn fixed_bytes<const N: usize>(value: &str) -> Option<[u8; N]> {
    let bytes = value.as_bytes();
    if bytes.len() > N {
        return None;
    }
    let mut out = [0u8; N];
    out[..bytes.len()].copy_from_slice(bytes);
    Some(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Pool — one constant-product pool per round
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"pool", round_id.to_le_bytes()]
// SOL vault: [b"sol_vault", round_id.to_le_bytes()] (system account)
// Token vault: the pool PDA's associated Token-2022 account

#[account]
#[derive(Debug)]
pub struct Pool {
    pub round_id: u64,
    pub mint: Pubkey,
    pub token_vault: Pubkey,
    pub sol_vault: Pubkey,

    /// Cached vault balances. `sync` rewrites them from the vaults.
    pub sol_reserve: u64,
    pub token_reserve: u64,

    pub fee_bps: u16,

    /// Lamports traded through the pool, both directions.
    pub total_volume_sol: u64,
    pub swap_count: u64,

    /// Set when the pool is unwound into the payout pool.
    pub is_closed: bool,

    pub created_at: i64,

    /// Bump seed for this PDA.
    pub bump: u8,
    pub sol_vault_bump: u8,
}

impl Pool {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // mint
        + 32  // token_vault
        + 32  // sol_vault
        + 8   // sol_reserve
        + 8   // token_reserve
        + 2   // fee_bps
        + 8   // total_volume_sol
        + 8   // swap_count
        + 1   // is_closed
        + 8   // created_at
        + 1   // bump
        + 1;  // sol_vault_bump

    /// `(reserve_in, reserve_out)` for a trade direction.
    pub fn reserves(&self, is_buy: bool) -> (u64, u64) {
        if is_buy {
            (self.sol_reserve, self.token_reserve)
        } else {
            (self.token_reserve, self.sol_reserve)
        }
    }

    pub fn quote(&self, amount_in: u64, is_buy: bool) -> Result<u64> {
        let (reserve_in, reserve_out) = self.reserves(is_buy);
        amm::swap_output(amount_in, reserve_in, reserve_out, self.fee_bps)
    }

    /// Rewrites both reserves from vault balances. `sol_vault_rent` is the
    /// rent-exempt floor the SOL vault always keeps.
    pub fn sync(&mut self, sol_vault_lamports: u64, sol_vault_rent: u64, token_vault_amount: u64) {
        self.sol_reserve = sol_vault_lamports.saturating_sub(sol_vault_rent);
        self.token_reserve = token_vault_amount;
    }

    pub fn record_swap(&mut self, sol_leg: u64) -> Result<()> {
        self.total_volume_sol = self
            .total_volume_sol
            .checked_add(sol_leg)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.swap_count = self
            .swap_count
            .checked_add(1)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Quotes a swap and enforces the caller's slippage floor.
    pub fn quote_checked(&self, amount_in: u64, min_amount_out: u64, is_buy: bool) -> Result<u64> {
        require!(amount_in > 0, BoomError::ZeroAmount);
        let amount_out = self.quote(amount_in, is_buy)?;
        require!(amount_out > 0, BoomError::ZeroAmount);
        require!(amount_out >= min_amount_out, BoomError::SlippageExceeded);
        Ok(amount_out)
    }

    pub fn market_cap(&self, supply: u64) -> Result<u64> {
        amm::market_cap_lamports(self.sol_reserve, self.token_reserve, supply)
    }

    /// Market cap for the cap trigger: 0 for an empty pool, `u64::MAX`
    /// when the true value does not fit.
    pub fn market_cap_saturating(&self, supply: u64) -> u64 {
        amm::market_cap_saturating(self.sol_reserve, self.token_reserve, supply)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PresaleExplosion — commit-reveal cap plus deadline
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"presale_explosion", round_id.to_le_bytes()]

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExplosionStatus {
    /// No cap committed yet.
    Uninitialized,
    /// Cap hash committed, trading not open.
    Armed,
    /// Deadline set, swaps allowed until it passes or the cap is hit.
    Trading,
    /// Terminal.
    Exploded,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExplosionReason {
    None,
    CapHit,
    TimeLimit,
}

#[account]
#[derive(Debug)]
pub struct PresaleExplosion {
    pub round_id: u64,
    pub status: ExplosionStatus,
    pub reason: ExplosionReason,

    /// sha256 of the secret cap (lamports, u64 LE).
    pub cap_hash: [u8; 32],

    /// Zero until a cap trigger reveals it.
    pub revealed_cap: u64,

    /// Zero until the timer starts.
    pub deadline: i64,

    pub explosion_time: i64,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl PresaleExplosion {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 1   // status
        + 1   // reason
        + 32  // cap_hash
        + 8   // revealed_cap
        + 8   // deadline
        + 8   // explosion_time
        + 1;  // bump

    /// The commitment stored for a secret cap.
    pub fn commitment(cap: u64) -> [u8; 32] {
        hash(&cap.to_le_bytes()).to_bytes()
    }

    pub fn is_exploded(&self) -> bool {
        self.status == ExplosionStatus::Exploded
    }

    pub fn arm(&mut self, cap_hash: [u8; 32]) -> Result<()> {
        require!(
            self.status == ExplosionStatus::Uninitialized,
            BoomError::AlreadyArmed
        );
        self.status = ExplosionStatus::Armed;
        self.reason = ExplosionReason::None;
        self.cap_hash = cap_hash;
        self.revealed_cap = 0;
        self.deadline = 0;
        self.explosion_time = 0;
        Ok(())
    }

    pub fn start_timer(&mut self, duration: i64, now: i64) -> Result<()> {
        match self.status {
            ExplosionStatus::Uninitialized => return err!(BoomError::NotArmed),
            ExplosionStatus::Trading => return err!(BoomError::TimerAlreadyStarted),
            ExplosionStatus::Exploded => return err!(BoomError::AlreadyExploded),
            ExplosionStatus::Armed => {}
        }
        require!(duration > 0, BoomError::InvalidConfig);

        self.deadline = now
            .checked_add(duration)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.status = ExplosionStatus::Trading;
        Ok(())
    }

    /// Swaps are only valid while the timer runs and nothing has fired.
    pub fn ensure_trading_open(&self, now: i64) -> Result<()> {
        require!(
            self.status == ExplosionStatus::Trading && now < self.deadline,
            BoomError::TradingClosed
        );
        Ok(())
    }

    pub fn trigger_cap(&mut self, revealed_cap: u64, market_cap: u64, now: i64) -> Result<()> {
        require!(!self.is_exploded(), BoomError::AlreadyExploded);
        require!(
            self.status != ExplosionStatus::Uninitialized,
            BoomError::NotArmed
        );
        require!(
            Self::commitment(revealed_cap) == self.cap_hash,
            BoomError::InvalidReveal
        );
        require!(market_cap >= revealed_cap, BoomError::CapNotReached);

        self.revealed_cap = revealed_cap;
        self.explode(ExplosionReason::CapHit, now);
        Ok(())
    }

    pub fn trigger_time(&mut self, now: i64) -> Result<()> {
        require!(!self.is_exploded(), BoomError::AlreadyExploded);
        require!(
            self.status == ExplosionStatus::Trading,
            BoomError::NoDeadlineSet
        );
        require!(now >= self.deadline, BoomError::DeadlineNotReached);

        self.explode(ExplosionReason::TimeLimit, now);
        Ok(())
    }

    fn explode(&mut self, reason: ExplosionReason, now: i64) {
        self.status = ExplosionStatus::Exploded;
        self.reason = reason;
        self.explosion_time = now;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PayoutPool — post-explosion SOL pot
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"payout_pool", round_id.to_le_bytes()]
// SOL vault: [b"payout_vault", round_id.to_le_bytes()] (system account)

#[account]
#[derive(Debug)]
pub struct PayoutPool {
    pub round_id: u64,
    pub mint: Pubkey,

    /// Lamports distributable to holders. Fixed at registration.
    pub total_sol: u64,

    /// Mint supply after the pool's tokens were burned.
    pub supply_at_explosion: u64,

    pub claimed_count: u64,
    pub claimed_sol: u64,
    pub tokens_redeemed: u64,

    pub registered_at: i64,

    /// Bump seed for this PDA.
    pub bump: u8,
    pub vault_bump: u8,
}

impl PayoutPool {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // mint
        + 8   // total_sol
        + 8   // supply_at_explosion
        + 8   // claimed_count
        + 8   // claimed_sol
        + 8   // tokens_redeemed
        + 8   // registered_at
        + 1   // bump
        + 1;  // vault_bump

    pub fn is_registered(&self) -> bool {
        self.mint != Pubkey::default()
    }

    pub fn register(
        &mut self,
        round_id: u64,
        mint: Pubkey,
        total_sol: u64,
        supply_at_explosion: u64,
        now: i64,
    ) -> Result<()> {
        require!(!self.is_registered(), BoomError::AlreadyRegistered);

        self.round_id = round_id;
        self.mint = mint;
        self.total_sol = total_sol;
        self.supply_at_explosion = supply_at_explosion;
        self.claimed_count = 0;
        self.claimed_sol = 0;
        self.tokens_redeemed = 0;
        self.registered_at = now;
        Ok(())
    }

    pub fn remaining_sol(&self) -> u64 {
        self.total_sol.saturating_sub(self.claimed_sol)
    }

    /// Books a claim of `amount` tokens from a holder owning `balance`,
    /// returning the lamports owed.
    pub fn claim_share(&mut self, amount: u64, balance: u64) -> Result<u64> {
        require!(amount > 0 && balance > 0, BoomError::ZeroBalance);
        require!(amount <= balance, BoomError::InsufficientBalance);

        let share = amm::payout_share(self.total_sol, amount, self.supply_at_explosion)?;
        require!(share > 0, BoomError::PayoutTooSmall);

        let claimed_sol = self
            .claimed_sol
            .checked_add(share)
            .ok_or(BoomError::ArithmeticOverflow)?;
        require!(claimed_sol <= self.total_sol, BoomError::PayoutExhausted);

        self.claimed_sol = claimed_sol;
        self.tokens_redeemed = self
            .tokens_redeemed
            .checked_add(amount)
            .ok_or(BoomError::ArithmeticOverflow)?;
        self.claimed_count = self
            .claimed_count
            .checked_add(1)
            .ok_or(BoomError::ArithmeticOverflow)?;
        Ok(share)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LpInfo — metadata of an external liquidity pool
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"lp_info", round_id.to_le_bytes()]

#[account]
#[derive(Debug)]
pub struct LpInfo {
    pub round_id: u64,
    pub pool_id: Pubkey,
    pub lp_mint: Pubkey,

    /// SOL side.
    pub vault_a: Pubkey,
    /// Token side.
    pub vault_b: Pubkey,

    pub registered_at: i64,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl LpInfo {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 8   // round_id
        + 32  // pool_id
        + 32  // lp_mint
        + 32  // vault_a
        + 32  // vault_b
        + 8   // registered_at
        + 1;  // bump
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    fn error_code<T: std::fmt::Debug>(result: Result<T>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            other => panic!("expected anchor error, got {:?}", other),
        }
    }

    fn code(err: BoomError) -> u32 {
        u32::from(err)
    }

    fn empty_round() -> PresaleRound {
        PresaleRound {
            round_id: 0,
            authority: Pubkey::default(),
            start_time: 0,
            end_time: 0,
            lottery_spots: 0,
            min_deposit: 0,
            max_deposit: 0,
            total_deposited: 0,
            depositor_count: 0,
            is_finalized: false,
            lottery_seed: [0u8; 32],
            winners_marked: 0,
            winners_claimed: 0,
            winner_deposits: 0,
            total_refunded: 0,
            bump: 0,
            _reserved: [0u8; 28],
        }
    }

    fn empty_deposit() -> UserDeposit {
        UserDeposit {
            round_id: 0,
            depositor: Pubkey::default(),
            amount: 0,
            deposit_time: 0,
            position: 0,
            is_winner: false,
            claimed: false,
            bump: 0,
        }
    }

    fn open_round(spots: u32) -> PresaleRound {
        let mut round = empty_round();
        round
            .open(1, Pubkey::new_unique(), 1_000, 60, spots, SOL / 10, SOL, 254)
            .unwrap();
        round
    }

    fn empty_explosion() -> PresaleExplosion {
        PresaleExplosion {
            round_id: 1,
            status: ExplosionStatus::Uninitialized,
            reason: ExplosionReason::None,
            cap_hash: [0u8; 32],
            revealed_cap: 0,
            deadline: 0,
            explosion_time: 0,
            bump: 0,
        }
    }

    fn empty_pool() -> Pool {
        Pool {
            round_id: 1,
            mint: Pubkey::new_unique(),
            token_vault: Pubkey::new_unique(),
            sol_vault: Pubkey::new_unique(),
            sol_reserve: 42,
            token_reserve: 42,
            fee_bps: 50,
            total_volume_sol: 0,
            swap_count: 0,
            is_closed: false,
            created_at: 0,
            bump: 0,
            sol_vault_bump: 0,
        }
    }

    fn empty_payout() -> PayoutPool {
        PayoutPool {
            round_id: 0,
            mint: Pubkey::default(),
            total_sol: 0,
            supply_at_explosion: 0,
            claimed_count: 0,
            claimed_sol: 0,
            tokens_redeemed: 0,
            registered_at: 0,
            bump: 0,
            vault_bump: 0,
        }
    }

    #[test]
    fn open_rejects_bad_config() {
        let mut round = empty_round();
        let authority = Pubkey::new_unique();
        assert_eq!(
            error_code(round.open(1, authority, 0, 60, 2, 0, SOL, 0)),
            code(BoomError::InvalidBounds)
        );
        assert_eq!(
            error_code(round.open(1, authority, 0, 60, 2, SOL, SOL / 2, 0)),
            code(BoomError::InvalidBounds)
        );
        assert_eq!(
            error_code(round.open(1, authority, 0, 60, 0, 1, SOL, 0)),
            code(BoomError::InvalidConfig)
        );
        assert_eq!(
            error_code(round.open(1, authority, 0, 0, 2, 1, SOL, 0)),
            code(BoomError::InvalidConfig)
        );
        assert_eq!(
            error_code(round.open(1, authority, i64::MAX, 1, 2, 1, SOL, 0)),
            code(BoomError::ArithmeticOverflow)
        );
    }

    #[test]
    fn deposit_bounds_are_inclusive() {
        let mut round = open_round(2);
        assert_eq!(round.record_deposit(SOL / 10, 1_001).unwrap(), 0);
        assert_eq!(round.record_deposit(SOL, 1_001).unwrap(), 1);
        assert_eq!(
            error_code(round.record_deposit(SOL / 10 - 1, 1_001)),
            code(BoomError::OutOfBounds)
        );
        assert_eq!(
            error_code(round.record_deposit(SOL + 1, 1_001)),
            code(BoomError::OutOfBounds)
        );
        assert_eq!(round.total_deposited, SOL / 10 + SOL);
        assert_eq!(round.depositor_count, 2);
    }

    #[test]
    fn deposit_after_end_or_finalize_fails() {
        let mut round = open_round(2);
        assert!(round.is_active(1_059));
        assert!(!round.is_active(1_060));
        assert_eq!(
            error_code(round.record_deposit(SOL / 2, 1_060)),
            code(BoomError::RoundEnded)
        );

        round.finalize(1_010, true, [1u8; 32]).unwrap();
        assert_eq!(
            error_code(round.record_deposit(SOL / 2, 1_010)),
            code(BoomError::AlreadyFinalized)
        );
    }

    #[test]
    fn round_caps_depositors() {
        let mut round = open_round(2);
        round.depositor_count = MAX_DEPOSITORS;
        assert_eq!(
            error_code(round.record_deposit(SOL / 2, 1_001)),
            code(BoomError::RoundFull)
        );
    }

    #[test]
    fn second_deposit_is_rejected_not_summed() {
        let mut round = open_round(2);
        let mut deposit = empty_deposit();
        let who = Pubkey::new_unique();
        deposit.record(&mut round, who, SOL / 2, 1_001, 253).unwrap();
        assert_eq!(
            error_code(deposit.record(&mut round, who, SOL / 2, 1_002, 253)),
            code(BoomError::AlreadyDeposited)
        );
        assert_eq!(deposit.amount, SOL / 2);
        assert_eq!(round.total_deposited, SOL / 2);
        assert_eq!(round.depositor_count, 1);
    }

    #[test]
    fn finalize_waits_for_end_unless_forced() {
        let mut round = open_round(2);
        assert_eq!(
            error_code(round.finalize(1_030, false, [0u8; 32])),
            code(BoomError::RoundNotEnded)
        );
        round.finalize(1_060, false, [7u8; 32]).unwrap();
        assert!(round.is_finalized);
        assert_eq!(round.lottery_seed, [7u8; 32]);
        assert_eq!(
            error_code(round.finalize(1_070, true, [0u8; 32])),
            code(BoomError::AlreadyFinalized)
        );
        assert_eq!(round.lottery_seed, [7u8; 32]);
    }

    #[test]
    fn mark_winner_guards() {
        let mut round = open_round(1);
        let mut a = empty_deposit();
        let mut b = empty_deposit();
        a.record(&mut round, Pubkey::new_unique(), SOL / 2, 1_001, 0).unwrap();
        b.record(&mut round, Pubkey::new_unique(), SOL / 2, 1_002, 0).unwrap();

        assert_eq!(
            error_code(a.mark_winner(&mut round)),
            code(BoomError::NotFinalized)
        );
        round.finalize(1_060, false, [3u8; 32]).unwrap();

        let (winner, loser) = if round.is_selected(a.position) {
            (&mut a, &mut b)
        } else {
            (&mut b, &mut a)
        };
        assert_eq!(
            error_code(loser.mark_winner(&mut round)),
            code(BoomError::NotSelected)
        );
        winner.mark_winner(&mut round).unwrap();
        assert_eq!(
            error_code(winner.mark_winner(&mut round)),
            code(BoomError::AlreadyWinner)
        );
        assert_eq!(round.winners_marked, 1);
        assert_eq!(round.winner_deposits, SOL / 2);
        assert!(round.all_winners_marked());
    }

    #[test]
    fn refunds_only_for_unselected_depositors() {
        let mut round = open_round(1);
        let mut a = empty_deposit();
        let mut b = empty_deposit();
        a.record(&mut round, Pubkey::new_unique(), SOL / 2, 1_001, 0).unwrap();
        b.record(&mut round, Pubkey::new_unique(), SOL / 4, 1_002, 0).unwrap();

        assert_eq!(
            error_code(a.take_refund(&mut round)),
            code(BoomError::NotFinalized)
        );
        round.finalize(1_060, false, [4u8; 32]).unwrap();

        let (selected, unselected) = if round.is_selected(a.position) {
            (&mut a, &mut b)
        } else {
            (&mut b, &mut a)
        };
        // selected but not yet marked still cannot refund
        assert_eq!(
            error_code(selected.take_refund(&mut round)),
            code(BoomError::WinnerCannotRefund)
        );
        let owed = unselected.amount;
        assert_eq!(unselected.take_refund(&mut round).unwrap(), owed);
        assert_eq!(
            error_code(unselected.take_refund(&mut round)),
            code(BoomError::AlreadyClaimed)
        );
        assert_eq!(round.total_refunded, owed);
    }

    #[test]
    fn allocation_only_for_marked_winners_once() {
        let mut round = open_round(5);
        let mut d = empty_deposit();
        d.record(&mut round, Pubkey::new_unique(), SOL / 2, 1_001, 0).unwrap();
        round.finalize(1_060, false, [0u8; 32]).unwrap();

        let token = PresaleToken {
            round_id: 1,
            mint: Pubkey::new_unique(),
            total_supply: 1_000,
            tokens_per_winner: 100,
            name: [0u8; MAX_NAME_LEN],
            symbol: [0u8; MAX_SYMBOL_LEN],
            created_at: 0,
            bump: 0,
            mint_authority_bump: 0,
        };
        assert_eq!(
            error_code(d.take_allocation(&mut round, &token)),
            code(BoomError::NotAWinner)
        );
        d.mark_winner(&mut round).unwrap();
        assert_eq!(round.unclaimed_allocation(100).unwrap(), 100);
        assert_eq!(d.take_allocation(&mut round, &token).unwrap(), 100);
        assert_eq!(round.winners_claimed, 1);
        assert_eq!(round.unclaimed_allocation(100).unwrap(), 0);
        assert_eq!(
            error_code(d.take_allocation(&mut round, &token)),
            code(BoomError::AlreadyClaimed)
        );
        assert_eq!(round.winners_claimed, 1);
    }

    #[test]
    fn payout_supply_counts_unminted_allocations() {
        let mut round = open_round(3);
        round.winners_marked = 3;
        round.winners_claimed = 1;
        // 100 minted to the one claimant plus 2 * 100 still owed.
        assert_eq!(round.payout_supply(100, 100).unwrap(), 300);
        round.winners_claimed = 3;
        assert_eq!(round.payout_supply(300, 100).unwrap(), 300);
        round.winners_marked = 2;
        assert!(round.unclaimed_allocation(100).is_err());
    }

    #[test]
    fn launch_validation() {
        let mut round = open_round(2);
        let mut deposits = [empty_deposit(), empty_deposit(), empty_deposit()];
        for (i, d) in deposits.iter_mut().enumerate() {
            d.record(&mut round, Pubkey::new_unique(), SOL / 2, 1_001 + i as i64, 0)
                .unwrap();
        }
        assert_eq!(
            error_code(PresaleToken::validate_launch(&round, 1_000, 10)),
            code(BoomError::NotFinalized)
        );
        round.finalize(1_060, false, [9u8; 32]).unwrap();
        assert_eq!(
            error_code(PresaleToken::validate_launch(&round, 1_000, 10)),
            code(BoomError::NoWinners)
        );

        for d in deposits.iter_mut() {
            if round.is_selected(d.position) {
                d.mark_winner(&mut round).unwrap();
            }
        }
        assert_eq!(round.winners_marked, 2);
        assert_eq!(
            error_code(PresaleToken::validate_launch(&round, 0, 10)),
            code(BoomError::ZeroSupply)
        );
        assert_eq!(
            error_code(PresaleToken::validate_launch(&round, 19, 10)),
            code(BoomError::SupplyTooSmall)
        );
        PresaleToken::validate_launch(&round, 20, 10).unwrap();
    }

    #[test]
    fn fixed_bytes_pads_and_limits() {
        let name: [u8; MAX_NAME_LEN] = fixed_bytes("Boom").unwrap();
        assert_eq!(&name[..4], b"Boom");
        assert!(name[4..].iter().all(|b| *b == 0));
        assert!(fixed_bytes::<MAX_SYMBOL_LEN>("ELEVENCHARS").is_none());
        assert!(fixed_bytes::<MAX_SYMBOL_LEN>("TENCHARSOK").is_some());
    }

    #[test]
    fn pool_sync_reads_vault_truth() {
        let mut pool = empty_pool();
        pool.sync(SOL + 890_880, 890_880, 1_000_000_000);
        assert_eq!(pool.sol_reserve, SOL);
        assert_eq!(pool.token_reserve, 1_000_000_000);
        assert_eq!(pool.quote(SOL / 100, true).unwrap(), 9_851_972);
        assert_eq!(pool.reserves(false), (1_000_000_000, SOL));

        pool.record_swap(SOL / 100).unwrap();
        assert_eq!(pool.swap_count, 1);
        assert_eq!(pool.total_volume_sol, SOL / 100);
    }

    #[test]
    fn quote_checked_enforces_slippage_floor() {
        let mut pool = empty_pool();
        pool.sync(SOL + 890_880, 890_880, 1_000_000_000);
        let out = pool.quote(SOL / 100, true).unwrap();

        assert_eq!(pool.quote_checked(SOL / 100, out, true).unwrap(), out);
        assert_eq!(pool.quote_checked(SOL / 100, 0, true).unwrap(), out);
        assert_eq!(
            error_code(pool.quote_checked(SOL / 100, out + 1, true)),
            code(BoomError::SlippageExceeded)
        );
        assert_eq!(
            error_code(pool.quote_checked(0, 0, true)),
            code(BoomError::ZeroAmount)
        );
        // one lamport buys less than one base unit
        assert_eq!(
            error_code(pool.quote_checked(1, 0, true)),
            code(BoomError::ZeroAmount)
        );
    }

    #[test]
    fn quotes_follow_donated_reserves() {
        let mut pool = empty_pool();
        pool.sync(SOL + 890_880, 890_880, 1_000_000_000);
        let before = pool.quote_checked(SOL / 100, 0, true).unwrap();

        // lamports sent straight to the SOL vault deepen the SOL side
        pool.sync(2 * SOL + 890_880, 890_880, 1_000_000_000);
        let after = pool.quote_checked(SOL / 100, 0, true).unwrap();
        assert!(after < before);
        assert_eq!(after, amm::swap_output(SOL / 100, 2 * SOL, 1_000_000_000, 50).unwrap());
    }

    #[test]
    fn saturating_market_cap_still_fires_the_trigger() {
        let mut pool = empty_pool();
        pool.sync(100 * SOL + 890_880, 890_880, 1_000_000);
        let supply = 1_000_000_000_000_000_000;
        assert!(pool.market_cap(supply).is_err());
        assert_eq!(pool.market_cap_saturating(supply), u64::MAX);

        let mut explosion = empty_explosion();
        explosion.arm(PresaleExplosion::commitment(1_000 * SOL)).unwrap();
        explosion.start_timer(60, 0).unwrap();
        explosion
            .trigger_cap(1_000 * SOL, pool.market_cap_saturating(supply), 5)
            .unwrap();
        assert_eq!(explosion.reason, ExplosionReason::CapHit);

        pool.sync(SOL, 890_880, 0);
        assert_eq!(pool.market_cap_saturating(supply), 0);
    }

    #[test]
    fn explosion_lifecycle() {
        let mut explosion = empty_explosion();
        assert_eq!(
            error_code(explosion.start_timer(60, 0)),
            code(BoomError::NotArmed)
        );
        assert_eq!(
            error_code(explosion.ensure_trading_open(0)),
            code(BoomError::TradingClosed)
        );

        explosion.arm(PresaleExplosion::commitment(500)).unwrap();
        assert_eq!(
            error_code(explosion.arm([1u8; 32])),
            code(BoomError::AlreadyArmed)
        );
        assert_eq!(
            error_code(explosion.trigger_time(10)),
            code(BoomError::NoDeadlineSet)
        );

        explosion.start_timer(60, 100).unwrap();
        assert_eq!(explosion.deadline, 160);
        assert_eq!(
            error_code(explosion.start_timer(60, 100)),
            code(BoomError::TimerAlreadyStarted)
        );
        explosion.ensure_trading_open(159).unwrap();
        assert_eq!(
            error_code(explosion.ensure_trading_open(160)),
            code(BoomError::TradingClosed)
        );
        assert_eq!(
            error_code(explosion.trigger_time(159)),
            code(BoomError::DeadlineNotReached)
        );
    }

    #[test]
    fn cap_trigger_checks_reveal_then_market_cap() {
        let mut explosion = empty_explosion();
        explosion.arm(PresaleExplosion::commitment(500)).unwrap();
        explosion.start_timer(60, 0).unwrap();

        assert_eq!(
            error_code(explosion.trigger_cap(499, 10_000, 5)),
            code(BoomError::InvalidReveal)
        );
        assert_eq!(
            error_code(explosion.trigger_cap(500, 499, 5)),
            code(BoomError::CapNotReached)
        );
        explosion.trigger_cap(500, 500, 5).unwrap();
        assert!(explosion.is_exploded());
        assert_eq!(explosion.reason, ExplosionReason::CapHit);
        assert_eq!(explosion.revealed_cap, 500);
        assert_eq!(explosion.explosion_time, 5);
    }

    #[test]
    fn explosion_fires_exactly_once() {
        let mut by_cap = empty_explosion();
        by_cap.arm(PresaleExplosion::commitment(7)).unwrap();
        by_cap.start_timer(10, 0).unwrap();
        by_cap.trigger_cap(7, 7, 3).unwrap();
        assert_eq!(
            error_code(by_cap.trigger_time(100)),
            code(BoomError::AlreadyExploded)
        );
        assert_eq!(
            error_code(by_cap.trigger_cap(7, 7, 100)),
            code(BoomError::AlreadyExploded)
        );

        let mut by_time = empty_explosion();
        by_time.arm(PresaleExplosion::commitment(7)).unwrap();
        by_time.start_timer(10, 0).unwrap();
        by_time.trigger_time(10).unwrap();
        assert_eq!(by_time.reason, ExplosionReason::TimeLimit);
        assert_eq!(
            error_code(by_time.trigger_cap(7, 7, 11)),
            code(BoomError::AlreadyExploded)
        );
        assert_eq!(
            error_code(by_time.trigger_time(11)),
            code(BoomError::AlreadyExploded)
        );
        assert_eq!(
            error_code(by_time.start_timer(10, 11)),
            code(BoomError::AlreadyExploded)
        );
        assert_eq!(
            error_code(by_time.ensure_trading_open(5)),
            code(BoomError::TradingClosed)
        );
    }

    #[test]
    fn payout_registers_once() {
        let mut payout = empty_payout();
        let mint = Pubkey::new_unique();
        payout.register(1, mint, 10 * SOL, 1_000, 50).unwrap();
        assert!(payout.is_registered());
        assert_eq!(
            error_code(payout.register(1, mint, SOL, 1_000, 60)),
            code(BoomError::AlreadyRegistered)
        );
        assert_eq!(payout.total_sol, 10 * SOL);
    }

    #[test]
    fn payout_claims_are_proportional_and_bounded() {
        let mut payout = empty_payout();
        payout.register(1, Pubkey::new_unique(), 1_000, 3, 0).unwrap();

        assert_eq!(
            error_code(payout.claim_share(0, 5)),
            code(BoomError::ZeroBalance)
        );
        assert_eq!(
            error_code(payout.claim_share(1, 0)),
            code(BoomError::ZeroBalance)
        );
        assert_eq!(
            error_code(payout.claim_share(2, 1)),
            code(BoomError::InsufficientBalance)
        );

        let mut paid = 0;
        for _ in 0..3 {
            paid += payout.claim_share(1, 1).unwrap();
        }
        assert_eq!(paid, 999);
        assert!(paid <= payout.total_sol);
        assert_eq!(payout.claimed_count, 3);
        assert_eq!(payout.tokens_redeemed, 3);
        assert_eq!(payout.remaining_sol(), 1);
    }

    #[test]
    fn payout_never_exceeds_total() {
        let mut payout = empty_payout();
        payout.register(1, Pubkey::new_unique(), 100, 10, 0).unwrap();
        // holders presenting more than the recorded supply drain the pot
        payout.claim_share(10, 10).unwrap();
        assert_eq!(
            error_code(payout.claim_share(1, 1)),
            code(BoomError::PayoutExhausted)
        );

        let mut dust = empty_payout();
        dust.register(1, Pubkey::new_unique(), 1, 10, 0).unwrap();
        assert_eq!(
            error_code(dust.claim_share(1, 1)),
            code(BoomError::PayoutTooSmall)
        );
    }
}
