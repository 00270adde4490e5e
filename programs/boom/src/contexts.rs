use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::sysvar;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint as MintAccount, TokenAccount};
use boom_gate::program::BoomGate;
use boom_gate::{GateConfig, MintWhitelist};

use crate::constants::*;
use crate::errors::BoomError;
use crate::state::*;

// ═════════════════════════════════════════════════════════════════════════════
// PRESALE
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct StartPresale<'info> {
    /// Round owner, pays for the round account.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = PresaleRound::MAX_SIZE,
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DepositPresale<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    /// Receives the deposited lamports.
    #[account(
        mut,
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    /// Created on first deposit. A second deposit finds it populated.
    #[account(
        init_if_needed,
        payer = depositor,
        space = UserDeposit::MAX_SIZE,
        seeds = [
            DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            depositor.key().as_ref(),
        ],
        bump,
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EndPresaleAndLottery<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    /// CHECK: address-checked sysvar, read raw for the lottery seed.
    #[account(address = sysvar::slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct MarkWinner<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [
            DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            user_deposit.depositor.as_ref(),
        ],
        bump = user_deposit.bump,
    )]
    pub user_deposit: Account<'info, UserDeposit>,
}

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [
            DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            depositor.key().as_ref(),
        ],
        bump = user_deposit.bump,
        has_one = depositor @ BoomError::Unauthorized,
    )]
    pub user_deposit: Account<'info, UserDeposit>,
}

// ═════════════════════════════════════════════════════════════════════════════
// TOKEN LAUNCH
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct CreatePresaleToken<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Box<Account<'info, PresaleRound>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PresaleToken::MAX_SIZE,
        seeds = [PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale_token: Box<Account<'info, PresaleToken>>,

    /// Fresh keypair; created here as a Token-2022 mint with the transfer hook.
    #[account(mut)]
    pub mint: Signer<'info>,

    /// CHECK: PDA signer only, holds no data.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RegisterPresaleToken<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Box<Account<'info, PresaleRound>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PresaleToken::MAX_SIZE,
        seeds = [PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale_token: Box<Account<'info, PresaleToken>>,

    /// Externally created mint. Must already be controlled by the round.
    #[account(
        mint::token_program = token_program,
        constraint = mint.mint_authority == COption::Some(mint_authority.key())
            @ BoomError::InvalidMintAuthority,
    )]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    /// CHECK: PDA signer only, holds no data.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimWinnerTokens<'info> {
    #[account(mut)]
    pub winner: Signer<'info>,

    #[account(
        mut,
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Box<Account<'info, PresaleRound>>,

    #[account(
        seeds = [PRESALE_TOKEN_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
        constraint = presale_token.mint == mint.key() @ BoomError::InvalidMint,
    )]
    pub presale_token: Box<Account<'info, PresaleToken>>,

    #[account(
        mut,
        seeds = [
            DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            winner.key().as_ref(),
        ],
        bump = user_deposit.bump,
    )]
    pub user_deposit: Box<Account<'info, UserDeposit>>,

    #[account(mut)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    /// CHECK: PDA signer only, holds no data.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_token.mint_authority_bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = winner,
        associated_token::mint = mint,
        associated_token::authority = winner,
        associated_token::token_program = token_program,
    )]
    pub winner_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

// ═════════════════════════════════════════════════════════════════════════════
// POOL
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct CreatePool<'info> {
    /// Round owner. Must also be the gate authority to approve the vault.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Source of the winners' lamports.
    #[account(
        mut,
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Box<Account<'info, PresaleRound>>,

    #[account(
        seeds = [PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
        constraint = presale_token.mint == mint.key() @ BoomError::InvalidMint,
    )]
    pub presale_token: Box<Account<'info, PresaleToken>>,

    #[account(mut)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    /// CHECK: PDA signer only, holds no data.
    #[account(
        seeds = [MINT_AUTHORITY_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_token.mint_authority_bump,
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        space = Pool::MAX_SIZE,
        seeds = [POOL_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    /// The pool's token side; becomes the gate's approved address.
    #[account(
        init,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = pool,
        associated_token::token_program = token_program,
    )]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        seeds = [boom_gate::GATE_CONFIG_SEED],
        bump = gate_config.bump,
        seeds::program = boom_gate::ID,
    )]
    pub gate_config: Box<Account<'info, GateConfig>>,

    #[account(
        mut,
        seeds = [boom_gate::WHITELIST_SEED, mint.key().as_ref()],
        bump = whitelist.bump,
        seeds::program = boom_gate::ID,
    )]
    pub whitelist: Box<Account<'info, MintWhitelist>>,

    pub gate_program: Program<'info, BoomGate>,
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SyncPoolReserves<'info> {
    #[account(
        mut,
        seeds = [POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(address = pool.token_vault @ BoomError::InvalidMint)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,
}

#[derive(Accounts)]
pub struct QuoteSwap<'info> {
    #[account(
        seeds = [POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

/// Accounts shared by every swap entry point.
#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
        constraint = !pool.is_closed @ BoomError::TradingClosed,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        seeds = [PRESALE_EXPLOSION_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Box<Account<'info, PresaleExplosion>>,

    #[account(address = pool.mint @ BoomError::InvalidMint)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut, address = pool.token_vault @ BoomError::InvalidMint)]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: the gate's meta list for this mint, checked by seeds.
    #[account(
        seeds = [boom_gate::EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump,
        seeds::program = boom_gate::ID,
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        seeds = [boom_gate::GATE_CONFIG_SEED],
        bump = gate_config.bump,
        seeds::program = boom_gate::ID,
    )]
    pub gate_config: Box<Account<'info, GateConfig>>,

    #[account(
        seeds = [boom_gate::WHITELIST_SEED, mint.key().as_ref()],
        bump = whitelist.bump,
        seeds::program = boom_gate::ID,
    )]
    pub whitelist: Box<Account<'info, MintWhitelist>>,

    pub gate_program: Program<'info, BoomGate>,
    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

/// Same as [`Swap`], but creates the user's associated token account.
#[derive(Accounts)]
pub struct SwapAtomic<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
        constraint = !pool.is_closed @ BoomError::TradingClosed,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        seeds = [PRESALE_EXPLOSION_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Box<Account<'info, PresaleExplosion>>,

    #[account(address = pool.mint @ BoomError::InvalidMint)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut, address = pool.token_vault @ BoomError::InvalidMint)]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: the gate's meta list for this mint, checked by seeds.
    #[account(
        seeds = [boom_gate::EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump,
        seeds::program = boom_gate::ID,
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        seeds = [boom_gate::GATE_CONFIG_SEED],
        bump = gate_config.bump,
        seeds::program = boom_gate::ID,
    )]
    pub gate_config: Box<Account<'info, GateConfig>>,

    #[account(
        seeds = [boom_gate::WHITELIST_SEED, mint.key().as_ref()],
        bump = whitelist.bump,
        seeds::program = boom_gate::ID,
    )]
    pub whitelist: Box<Account<'info, MintWhitelist>>,

    pub gate_program: Program<'info, BoomGate>,
    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

// ═════════════════════════════════════════════════════════════════════════════
// EXPLOSION
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct InitPresaleExplosion<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PresaleExplosion::MAX_SIZE,
        seeds = [PRESALE_EXPLOSION_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct StartExplosionTimer<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [PRESALE_EXPLOSION_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    /// Trading cannot open before the pool exists.
    #[account(
        seeds = [POOL_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct TriggerPresaleExplosionCap<'info> {
    #[account(
        mut,
        seeds = [PRESALE_EXPLOSION_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(
        seeds = [POOL_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.mint @ BoomError::InvalidMint)]
    pub mint: InterfaceAccount<'info, MintAccount>,
}

#[derive(Accounts)]
pub struct TriggerPresaleExplosionTime<'info> {
    #[account(
        mut,
        seeds = [PRESALE_EXPLOSION_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,
}

// ═════════════════════════════════════════════════════════════════════════════
// PAYOUT
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
pub struct RegisterPayout<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Box<Account<'info, PresaleRound>>,

    #[account(
        seeds = [PRESALE_EXPLOSION_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Box<Account<'info, PresaleExplosion>>,

    /// Winner allocations not yet minted still count toward the payout supply.
    #[account(
        seeds = [PRESALE_TOKEN_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
        constraint = presale_token.mint == mint.key() @ BoomError::InvalidMint,
    )]
    pub presale_token: Box<Account<'info, PresaleToken>>,

    #[account(
        mut,
        seeds = [POOL_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut, address = pool.mint @ BoomError::InvalidMint)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    #[account(
        mut,
        seeds = [SOL_VAULT_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut, address = pool.token_vault @ BoomError::InvalidMint)]
    pub token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = PayoutPool::MAX_SIZE,
        seeds = [PAYOUT_POOL_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub payout_pool: Box<Account<'info, PayoutPool>>,

    #[account(
        mut,
        seeds = [PAYOUT_VAULT_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub payout_vault: SystemAccount<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimExplosionPayout<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        seeds = [PRESALE_EXPLOSION_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Box<Account<'info, PresaleExplosion>>,

    /// Absent until `register_payout` runs.
    #[account(
        mut,
        seeds = [PAYOUT_POOL_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub payout_pool: Option<Box<Account<'info, PayoutPool>>>,

    #[account(
        mut,
        seeds = [PAYOUT_VAULT_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub payout_vault: SystemAccount<'info>,

    #[account(mut)]
    pub mint: Box<InterfaceAccount<'info, MintAccount>>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = holder,
        token::token_program = token_program,
    )]
    pub holder_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RegisterLp<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
        has_one = authority @ BoomError::Unauthorized,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        init,
        payer = authority,
        space = LpInfo::MAX_SIZE,
        seeds = [LP_INFO_SEED, round_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub lp_info: Account<'info, LpInfo>,

    pub system_program: Program<'info, System>,
}

/// Borrowed view over either swap context, so both entry points share one
/// execution path.
pub(crate) struct SwapLegs<'a, 'info> {
    pub user: &'a Signer<'info>,
    pub pool: &'a mut Account<'info, Pool>,
    pub presale_explosion: &'a Account<'info, PresaleExplosion>,
    pub mint: &'a InterfaceAccount<'info, MintAccount>,
    pub sol_vault: &'a SystemAccount<'info>,
    pub token_vault: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub user_token_account: &'a InterfaceAccount<'info, TokenAccount>,
    pub extra_account_meta_list: &'a UncheckedAccount<'info>,
    pub gate_config: &'a Account<'info, GateConfig>,
    pub whitelist: &'a Account<'info, MintWhitelist>,
    pub gate_program: &'a Program<'info, BoomGate>,
    pub token_program: &'a Program<'info, Token2022>,
    pub system_program: &'a Program<'info, System>,
}

impl<'info> Swap<'info> {
    pub(crate) fn legs(&mut self) -> SwapLegs<'_, 'info> {
        SwapLegs {
            user: &self.user,
            pool: &mut self.pool,
            presale_explosion: &self.presale_explosion,
            mint: &self.mint,
            sol_vault: &self.sol_vault,
            token_vault: &mut self.token_vault,
            user_token_account: &self.user_token_account,
            extra_account_meta_list: &self.extra_account_meta_list,
            gate_config: &self.gate_config,
            whitelist: &self.whitelist,
            gate_program: &self.gate_program,
            token_program: &self.token_program,
            system_program: &self.system_program,
        }
    }
}

impl<'info> SwapAtomic<'info> {
    pub(crate) fn legs(&mut self) -> SwapLegs<'_, 'info> {
        SwapLegs {
            user: &self.user,
            pool: &mut self.pool,
            presale_explosion: &self.presale_explosion,
            mint: &self.mint,
            sol_vault: &self.sol_vault,
            token_vault: &mut self.token_vault,
            user_token_account: &self.user_token_account,
            extra_account_meta_list: &self.extra_account_meta_list,
            gate_config: &self.gate_config,
            whitelist: &self.whitelist,
            gate_program: &self.gate_program,
            token_program: &self.token_program,
            system_program: &self.system_program,
        }
    }
}
