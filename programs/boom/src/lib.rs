use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke;
use anchor_lang::system_program;
use anchor_spl::token_2022;
use boom_gate::GatedTransfer;
use spl_token_2022::extension::{transfer_hook, ExtensionType};
use spl_token_2022::onchain::invoke_transfer_checked;

pub mod amm;
pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod lottery;
pub mod pda;
pub mod state;

use constants::*;
pub use contexts::*;
use errors::BoomError;
pub use events::*;
pub use state::*;

declare_id!("BMSg6UzxJpwkBBfNZ5bXaRfCxsFFmySr87Q7j7CZe916");

#[program]
pub mod boom {
    use super::*;

    // ═════════════════════════════════════════════════════════════════════
    // 1. START PRESALE
    // ═════════════════════════════════════════════════════════════════════
    /// Opens a round accepting one deposit per wallet within
    /// `[min_deposit, max_deposit]` for `duration` seconds.
    pub fn start_presale(
        ctx: Context<StartPresale>,
        round_id: u64,
        duration: i64,
        lottery_spots: u32,
        min_deposit: u64,
        max_deposit: u64,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let round = &mut ctx.accounts.presale_round;
        round.open(
            round_id,
            ctx.accounts.authority.key(),
            now,
            duration,
            lottery_spots,
            min_deposit,
            max_deposit,
            ctx.bumps.presale_round,
        )?;

        emit!(PresaleStarted {
            round_id,
            authority: round.authority,
            start_time: round.start_time,
            end_time: round.end_time,
            lottery_spots,
            min_deposit,
            max_deposit,
        });
        msg!(
            "BOOM: Round {} open until {}. spots={}, bounds=[{}, {}]",
            round_id,
            round.end_time,
            lottery_spots,
            min_deposit,
            max_deposit
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 2. DEPOSIT
    // ═════════════════════════════════════════════════════════════════════
    /// Records the depositor's single deposit and moves the lamports into
    /// the round account.
    pub fn deposit_presale(ctx: Context<DepositPresale>, amount: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let depositor = ctx.accounts.depositor.key();

        let accounts = ctx.accounts;
        accounts.user_deposit.record(
            &mut accounts.presale_round,
            depositor,
            amount,
            now,
            ctx.bumps.user_deposit,
        )?;

        system_program::transfer(
            CpiContext::new(
                accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: accounts.depositor.to_account_info(),
                    to: accounts.presale_round.to_account_info(),
                },
            ),
            amount,
        )?;

        let round_id = accounts.presale_round.round_id;
        let position = accounts.user_deposit.position;
        emit!(DepositMade {
            round_id,
            depositor,
            amount,
            position,
        });
        msg!(
            "BOOM: Deposit {} lamports from {} (position {})",
            amount,
            depositor,
            position
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 3. END PRESALE AND LOTTERY
    // ═════════════════════════════════════════════════════════════════════
    /// Finalizes the round and captures the lottery seed. `force` ends it
    /// before `end_time`. `winner_indexes` is echoed in the event for
    /// off-chain bookkeeping; the on-chain draw is what `mark_winner` checks.
    pub fn end_presale_and_lottery(
        ctx: Context<EndPresaleAndLottery>,
        winner_indexes: Vec<u32>,
        force: bool,
    ) -> Result<()> {
        let round = &mut ctx.accounts.presale_round;
        require!(
            winner_indexes.len() <= round.lottery_spots as usize,
            BoomError::TooManyWinners
        );

        let seed = {
            let data = ctx.accounts.slot_hashes.try_borrow_data()?;
            lottery::seed_from_slot_hashes(&data)?
        };
        let now = Clock::get()?.unix_timestamp;
        round.finalize(now, force, seed)?;

        emit!(PresaleFinalized {
            round_id: round.round_id,
            total_deposited: round.total_deposited,
            depositor_count: round.depositor_count,
            selected_count: round.selected_count(),
            lottery_seed: seed,
            winner_indexes,
            forced: force,
        });
        msg!(
            "BOOM: Round {} finalized. depositors={}, winners={}, forced={}",
            round.round_id,
            round.depositor_count,
            round.selected_count(),
            force
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 4. MARK WINNER
    // ═════════════════════════════════════════════════════════════════════
    /// Flags a depositor the draw selected. Fails for anyone else.
    pub fn mark_winner(ctx: Context<MarkWinner>) -> Result<()> {
        let accounts = ctx.accounts;
        accounts
            .user_deposit
            .mark_winner(&mut accounts.presale_round)?;

        let deposit = &accounts.user_deposit;
        emit!(WinnerMarked {
            round_id: deposit.round_id,
            winner: deposit.depositor,
            amount: deposit.amount,
        });
        msg!(
            "BOOM: Winner marked {} ({}/{})",
            deposit.depositor,
            accounts.presale_round.winners_marked,
            accounts.presale_round.selected_count()
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 5. CLAIM REFUND
    // ═════════════════════════════════════════════════════════════════════
    /// Returns the full deposit of a depositor the draw passed over.
    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        let accounts = ctx.accounts;
        let amount = accounts
            .user_deposit
            .take_refund(&mut accounts.presale_round)?;

        move_lamports(
            &accounts.presale_round.to_account_info(),
            &accounts.depositor.to_account_info(),
            amount,
        )?;

        emit!(RefundClaimed {
            round_id: accounts.presale_round.round_id,
            depositor: accounts.depositor.key(),
            amount,
        });
        msg!(
            "BOOM: Refund {} lamports to {}",
            amount,
            accounts.depositor.key()
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 6. CREATE PRESALE TOKEN
    // ═════════════════════════════════════════════════════════════════════
    /// Creates the round's Token-2022 mint with the transfer hook pointing
    /// at the gate. The round's `mint_authority` PDA mints; nobody freezes.
    ///
    /// The gate authority still has to run
    /// `boom_gate::initialize_extra_account_meta_list` for the new mint
    /// before any hooked transfer can succeed.
    pub fn create_presale_token(
        ctx: Context<CreatePresaleToken>,
        round_id: u64,
        name: String,
        symbol: String,
        total_supply: u64,
        tokens_per_winner: u64,
    ) -> Result<()> {
        // ── Validation ──────────────────────────────────────────────────
        require!(
            !ctx.accounts.presale_token.is_created(),
            BoomError::AlreadyCreated
        );
        let name_bytes = fixed_bytes::<MAX_NAME_LEN>(&name).ok_or(BoomError::NameTooLong)?;
        let symbol_bytes =
            fixed_bytes::<MAX_SYMBOL_LEN>(&symbol).ok_or(BoomError::SymbolTooLong)?;
        PresaleToken::validate_launch(
            &ctx.accounts.presale_round,
            total_supply,
            tokens_per_winner,
        )?;

        // ── Mint account with the TransferHook extension ────────────────
        let token_program_id = ctx.accounts.token_program.key();
        let space = ExtensionType::try_calculate_account_len::<spl_token_2022::state::Mint>(&[
            ExtensionType::TransferHook,
        ])?;
        let lamports = Rent::get()?.minimum_balance(space);
        system_program::create_account(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::CreateAccount {
                    from: ctx.accounts.authority.to_account_info(),
                    to: ctx.accounts.mint.to_account_info(),
                },
            ),
            lamports,
            space as u64,
            &token_program_id,
        )?;

        let init_hook = transfer_hook::instruction::initialize(
            &token_program_id,
            &ctx.accounts.mint.key(),
            Some(ctx.accounts.authority.key()),
            Some(boom_gate::ID),
        )?;
        invoke(&init_hook, &[ctx.accounts.mint.to_account_info()])?;

        token_2022::initialize_mint2(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token_2022::InitializeMint2 {
                    mint: ctx.accounts.mint.to_account_info(),
                },
            ),
            TOKEN_DECIMALS,
            &ctx.accounts.mint_authority.key(),
            None,
        )?;

        // ── Record ──────────────────────────────────────────────────────
        let now = Clock::get()?.unix_timestamp;
        let token = &mut ctx.accounts.presale_token;
        token.name = name_bytes;
        token.symbol = symbol_bytes;
        record_launch(
            token,
            round_id,
            ctx.accounts.mint.key(),
            total_supply,
            tokens_per_winner,
            now,
            ctx.bumps.presale_token,
            ctx.bumps.mint_authority,
        );

        msg!(
            "BOOM: Token {} ({}) created. mint={}, supply={}",
            name,
            symbol,
            token.mint,
            total_supply
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 7. REGISTER PRESALE TOKEN
    // ═════════════════════════════════════════════════════════════════════
    /// Records a mint created elsewhere whose mint authority is already the
    /// round's `mint_authority` PDA.
    pub fn register_presale_token(
        ctx: Context<RegisterPresaleToken>,
        round_id: u64,
        total_supply: u64,
        tokens_per_winner: u64,
    ) -> Result<()> {
        require!(
            !ctx.accounts.presale_token.is_created(),
            BoomError::AlreadyCreated
        );
        PresaleToken::validate_launch(
            &ctx.accounts.presale_round,
            total_supply,
            tokens_per_winner,
        )?;

        let now = Clock::get()?.unix_timestamp;
        let token = &mut ctx.accounts.presale_token;
        token.name = [0u8; MAX_NAME_LEN];
        token.symbol = [0u8; MAX_SYMBOL_LEN];
        record_launch(
            token,
            round_id,
            ctx.accounts.mint.key(),
            total_supply,
            tokens_per_winner,
            now,
            ctx.bumps.presale_token,
            ctx.bumps.mint_authority,
        );

        msg!(
            "BOOM: Token registered. mint={}, supply={}",
            token.mint,
            total_supply
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 8. CLAIM WINNER TOKENS
    // ═════════════════════════════════════════════════════════════════════
    /// Mints a marked winner's allocation. Minting skips the transfer hook.
    pub fn claim_winner_tokens(ctx: Context<ClaimWinnerTokens>) -> Result<()> {
        let tokens = ctx
            .accounts
            .user_deposit
            .take_allocation(&mut ctx.accounts.presale_round, &ctx.accounts.presale_token)?;

        let round_id_bytes = ctx.accounts.presale_round.round_id.to_le_bytes();
        let authority_bump = [ctx.accounts.presale_token.mint_authority_bump];
        let mint_authority_seeds: &[&[u8]] =
            &[MINT_AUTHORITY_SEED, &round_id_bytes, &authority_bump];

        token_2022::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token_2022::MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.winner_token_account.to_account_info(),
                    authority: ctx.accounts.mint_authority.to_account_info(),
                },
                &[mint_authority_seeds],
            ),
            tokens,
        )?;

        emit!(WinnerClaimed {
            round_id: ctx.accounts.presale_round.round_id,
            winner: ctx.accounts.winner.key(),
            tokens,
        });
        msg!(
            "BOOM: Minted {} tokens to winner {}",
            tokens,
            ctx.accounts.winner.key()
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 9. CREATE POOL
    // ═════════════════════════════════════════════════════════════════════
    /// Seeds the pool with the winners' lamports and the unallocated
    /// supply, then approves the token vault on the gate.
    pub fn create_pool(ctx: Context<CreatePool>, round_id: u64, fee_bps: u16) -> Result<()> {
        // ── Validation ──────────────────────────────────────────────────
        require!((fee_bps as u64) < BPS_DENOMINATOR, BoomError::InvalidFee);
        let round = &ctx.accounts.presale_round;
        require!(round.is_finalized, BoomError::NotFinalized);
        require!(round.winners_marked > 0, BoomError::NoWinners);
        require!(round.all_winners_marked(), BoomError::WinnersPending);
        let seed_lamports = round.winner_deposits;
        let pool_tokens = ctx
            .accounts
            .presale_token
            .pool_allocation(round.winners_marked)?;
        require!(
            seed_lamports > 0 && pool_tokens > 0,
            BoomError::InsufficientLiquidity
        );

        // ── SOL side ────────────────────────────────────────────────────
        let rent_floor = Rent::get()?.minimum_balance(0);
        let vault_lamports = ctx.accounts.sol_vault.lamports();
        if vault_lamports < rent_floor {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.authority.to_account_info(),
                        to: ctx.accounts.sol_vault.to_account_info(),
                    },
                ),
                rent_floor - vault_lamports,
            )?;
        }
        move_lamports(
            &ctx.accounts.presale_round.to_account_info(),
            &ctx.accounts.sol_vault.to_account_info(),
            seed_lamports,
        )?;

        // ── Token side ──────────────────────────────────────────────────
        let round_id_bytes = round_id.to_le_bytes();
        let authority_bump = [ctx.accounts.presale_token.mint_authority_bump];
        let mint_authority_seeds: &[&[u8]] =
            &[MINT_AUTHORITY_SEED, &round_id_bytes, &authority_bump];

        token_2022::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                token_2022::MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.token_vault.to_account_info(),
                    authority: ctx.accounts.mint_authority.to_account_info(),
                },
                &[mint_authority_seeds],
            ),
            pool_tokens,
        )?;

        // ── Gate: the vault becomes the approved liquidity address ──────
        boom_gate::cpi::update_whitelist(
            CpiContext::new(
                ctx.accounts.gate_program.to_account_info(),
                boom_gate::cpi::accounts::UpdateWhitelist {
                    authority: ctx.accounts.authority.to_account_info(),
                    gate_config: ctx.accounts.gate_config.to_account_info(),
                    whitelist: ctx.accounts.whitelist.to_account_info(),
                },
            ),
            ctx.accounts.token_vault.key(),
        )?;

        // ── Pool record ─────────────────────────────────────────────────
        ctx.accounts.token_vault.reload()?;
        let now = Clock::get()?.unix_timestamp;
        let sol_vault_lamports = ctx.accounts.sol_vault.lamports();
        let vault_amount = ctx.accounts.token_vault.amount;

        let pool = &mut ctx.accounts.pool;
        pool.round_id = round_id;
        pool.mint = ctx.accounts.mint.key();
        pool.token_vault = ctx.accounts.token_vault.key();
        pool.sol_vault = ctx.accounts.sol_vault.key();
        pool.fee_bps = fee_bps;
        pool.total_volume_sol = 0;
        pool.swap_count = 0;
        pool.is_closed = false;
        pool.created_at = now;
        pool.bump = ctx.bumps.pool;
        pool.sol_vault_bump = ctx.bumps.sol_vault;
        pool.sync(sol_vault_lamports, rent_floor, vault_amount);

        emit!(PoolCreated {
            round_id,
            pool: pool.key(),
            token_vault: pool.token_vault,
            sol_reserve: pool.sol_reserve,
            token_reserve: pool.token_reserve,
            fee_bps,
        });
        msg!(
            "BOOM: Pool created. sol_reserve={}, token_reserve={}, fee_bps={}",
            pool.sol_reserve,
            pool.token_reserve,
            fee_bps
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 10. SYNC POOL RESERVES
    // ═════════════════════════════════════════════════════════════════════
    /// Rewrites the cached reserves from the vault balances.
    pub fn sync_pool_reserves(ctx: Context<SyncPoolReserves>) -> Result<()> {
        let rent_floor = Rent::get()?.minimum_balance(0);
        let sol_vault_lamports = ctx.accounts.sol_vault.lamports();
        let vault_amount = ctx.accounts.token_vault.amount;

        let pool = &mut ctx.accounts.pool;
        pool.sync(sol_vault_lamports, rent_floor, vault_amount);

        emit!(ReservesSynced {
            round_id: pool.round_id,
            sol_reserve: pool.sol_reserve,
            token_reserve: pool.token_reserve,
        });
        msg!(
            "BOOM: Reserves synced. sol={}, token={}",
            pool.sol_reserve,
            pool.token_reserve
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 11. SWAP
    // ═════════════════════════════════════════════════════════════════════
    /// Trades against the pool. `is_buy` pays SOL for tokens; otherwise
    /// tokens for SOL. Fails if fewer than `min_amount_out` would come back.
    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
        is_buy: bool,
    ) -> Result<()> {
        execute_swap(ctx.accounts.legs(), amount_in, min_amount_out, is_buy).map(|_| ())
    }

    /// Buy that creates the caller's token account if it is missing.
    pub fn swap_atomic_buy(
        ctx: Context<SwapAtomic>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<()> {
        execute_swap(ctx.accounts.legs(), amount_in, min_amount_out, true).map(|_| ())
    }

    /// Sell through the caller's associated token account.
    pub fn swap_atomic_sell(
        ctx: Context<SwapAtomic>,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<()> {
        execute_swap(ctx.accounts.legs(), amount_in, min_amount_out, false).map(|_| ())
    }

    /// Read-only quote at the current cached reserves.
    pub fn quote_swap(ctx: Context<QuoteSwap>, amount_in: u64, is_buy: bool) -> Result<u64> {
        ctx.accounts.pool.quote(amount_in, is_buy)
    }

    // ═════════════════════════════════════════════════════════════════════
    // 12. EXPLOSION
    // ═════════════════════════════════════════════════════════════════════
    /// Commits to a secret market-cap threshold: `cap_hash = sha256(cap LE)`.
    pub fn init_presale_explosion(
        ctx: Context<InitPresaleExplosion>,
        round_id: u64,
        cap_hash: [u8; 32],
    ) -> Result<()> {
        require!(
            ctx.accounts.presale_round.is_finalized,
            BoomError::NotFinalized
        );

        let explosion = &mut ctx.accounts.presale_explosion;
        explosion.arm(cap_hash)?;
        explosion.round_id = round_id;
        explosion.bump = ctx.bumps.presale_explosion;

        emit!(ExplosionArmed { round_id, cap_hash });
        msg!("BOOM: Explosion armed for round {}", round_id);
        Ok(())
    }

    /// Opens trading until `now + duration`.
    pub fn start_explosion_timer(ctx: Context<StartExplosionTimer>, duration: i64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let explosion = &mut ctx.accounts.presale_explosion;
        explosion.start_timer(duration, now)?;

        emit!(ExplosionTimerStarted {
            round_id: explosion.round_id,
            deadline: explosion.deadline,
        });
        msg!(
            "BOOM: Trading open for round {} until {}",
            explosion.round_id,
            explosion.deadline
        );
        Ok(())
    }

    /// Reveals the committed cap and fires once the pool's market cap
    /// reaches it. Anyone may call.
    pub fn trigger_presale_explosion_cap(
        ctx: Context<TriggerPresaleExplosionCap>,
        revealed_cap: u64,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let market_cap = ctx
            .accounts
            .pool
            .market_cap_saturating(ctx.accounts.mint.supply);

        let explosion = &mut ctx.accounts.presale_explosion;
        explosion.trigger_cap(revealed_cap, market_cap, now)?;
        announce_explosion(explosion);
        Ok(())
    }

    /// Fires once the deadline has passed. Anyone may call.
    pub fn trigger_presale_explosion_time(ctx: Context<TriggerPresaleExplosionTime>) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let explosion = &mut ctx.accounts.presale_explosion;
        explosion.trigger_time(now)?;
        announce_explosion(explosion);
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 13. PAYOUT
    // ═════════════════════════════════════════════════════════════════════
    /// Unwinds the pool into the payout vault and fixes the pot every
    /// holder claims against.
    pub fn register_payout(ctx: Context<RegisterPayout>, total_sol: u64) -> Result<()> {
        // ── Validation ──────────────────────────────────────────────────
        require!(
            ctx.accounts.presale_explosion.is_exploded(),
            BoomError::NotExploded
        );
        require!(
            !ctx.accounts.payout_pool.is_registered(),
            BoomError::AlreadyRegistered
        );

        let round_id = ctx.accounts.presale_round.round_id;
        let round_id_bytes = round_id.to_le_bytes();
        let rent_floor = Rent::get()?.minimum_balance(0);

        // ── Payout vault rent ───────────────────────────────────────────
        let payout_lamports = ctx.accounts.payout_vault.lamports();
        if payout_lamports < rent_floor {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.authority.to_account_info(),
                        to: ctx.accounts.payout_vault.to_account_info(),
                    },
                ),
                rent_floor - payout_lamports,
            )?;
        }

        // ── Sweep SOL reserve ───────────────────────────────────────────
        let sweep = ctx.accounts.sol_vault.lamports().saturating_sub(rent_floor);
        if sweep > 0 {
            let vault_bump = [ctx.accounts.pool.sol_vault_bump];
            let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, &round_id_bytes, &vault_bump];
            system_program::transfer(
                CpiContext::new_with_signer(
                    ctx.accounts.system_program.to_account_info(),
                    system_program::Transfer {
                        from: ctx.accounts.sol_vault.to_account_info(),
                        to: ctx.accounts.payout_vault.to_account_info(),
                    },
                    &[vault_seeds],
                ),
                sweep,
            )?;
        }

        // ── Burn pool tokens ────────────────────────────────────────────
        let leftover = ctx.accounts.token_vault.amount;
        if leftover > 0 {
            let pool_bump = [ctx.accounts.pool.bump];
            let pool_seeds: &[&[u8]] = &[POOL_SEED, &round_id_bytes, &pool_bump];
            token_2022::burn(
                CpiContext::new_with_signer(
                    ctx.accounts.token_program.to_account_info(),
                    token_2022::Burn {
                        mint: ctx.accounts.mint.to_account_info(),
                        from: ctx.accounts.token_vault.to_account_info(),
                        authority: ctx.accounts.pool.to_account_info(),
                    },
                    &[pool_seeds],
                ),
                leftover,
            )?;
        }

        let pool = &mut ctx.accounts.pool;
        pool.is_closed = true;
        pool.sync(rent_floor, rent_floor, 0);

        // ── Register ────────────────────────────────────────────────────
        ctx.accounts.mint.reload()?;
        let tokens_per_winner = ctx.accounts.presale_token.tokens_per_winner;
        let supply = ctx
            .accounts
            .presale_round
            .payout_supply(ctx.accounts.mint.supply, tokens_per_winner)?;
        let spendable = ctx
            .accounts
            .payout_vault
            .lamports()
            .saturating_sub(rent_floor);
        require!(total_sol <= spendable, BoomError::InsufficientLiquidity);

        let now = Clock::get()?.unix_timestamp;
        let payout = &mut ctx.accounts.payout_pool;
        payout.register(round_id, ctx.accounts.mint.key(), total_sol, supply, now)?;
        payout.bump = ctx.bumps.payout_pool;
        payout.vault_bump = ctx.bumps.payout_vault;

        emit!(PayoutRegistered {
            round_id,
            total_sol,
            supply_at_explosion: supply,
        });
        msg!(
            "BOOM: Payout registered. total_sol={}, supply={}, swept={}, burned={}",
            total_sol,
            supply,
            sweep,
            leftover
        );
        Ok(())
    }

    /// Burns `token_amount` of the caller's tokens for their pro-rata share
    /// of the pot.
    pub fn claim_explosion_payout(
        ctx: Context<ClaimExplosionPayout>,
        token_amount: u64,
    ) -> Result<()> {
        require!(
            ctx.accounts.presale_explosion.is_exploded(),
            BoomError::NotExploded
        );
        let round_id = ctx.accounts.presale_explosion.round_id;
        let balance = ctx.accounts.holder_token_account.amount;
        let mint_key = ctx.accounts.mint.key();

        let payout = ctx
            .accounts
            .payout_pool
            .as_mut()
            .ok_or(BoomError::NoPayoutPool)?;
        require!(payout.is_registered(), BoomError::NoPayoutPool);
        require_keys_eq!(payout.mint, mint_key, BoomError::InvalidMint);
        let share = payout.claim_share(token_amount, balance)?;
        let vault_bump = [payout.vault_bump];

        // ── Burn, then pay ──────────────────────────────────────────────
        token_2022::burn(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                token_2022::Burn {
                    mint: ctx.accounts.mint.to_account_info(),
                    from: ctx.accounts.holder_token_account.to_account_info(),
                    authority: ctx.accounts.holder.to_account_info(),
                },
            ),
            token_amount,
        )?;

        let round_id_bytes = round_id.to_le_bytes();
        let vault_seeds: &[&[u8]] = &[PAYOUT_VAULT_SEED, &round_id_bytes, &vault_bump];
        system_program::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.payout_vault.to_account_info(),
                    to: ctx.accounts.holder.to_account_info(),
                },
                &[vault_seeds],
            ),
            share,
        )?;

        emit!(PayoutClaimed {
            round_id,
            holder: ctx.accounts.holder.key(),
            tokens_burned: token_amount,
            sol_paid: share,
        });
        msg!(
            "BOOM: Payout {} lamports for {} tokens to {}",
            share,
            token_amount,
            ctx.accounts.holder.key()
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 14. REGISTER LP
    // ═════════════════════════════════════════════════════════════════════
    /// Records an external liquidity pool seeded with the round's token.
    pub fn register_lp(
        ctx: Context<RegisterLp>,
        round_id: u64,
        pool_id: Pubkey,
        lp_mint: Pubkey,
        vault_a: Pubkey,
        vault_b: Pubkey,
    ) -> Result<()> {
        require!(
            ctx.accounts.presale_round.is_finalized,
            BoomError::NotFinalized
        );

        let lp = &mut ctx.accounts.lp_info;
        lp.round_id = round_id;
        lp.pool_id = pool_id;
        lp.lp_mint = lp_mint;
        lp.vault_a = vault_a;
        lp.vault_b = vault_b;
        lp.registered_at = Clock::get()?.unix_timestamp;
        lp.bump = ctx.bumps.lp_info;

        emit!(LpRegistered {
            round_id,
            pool_id,
            lp_mint,
        });
        msg!("BOOM: LP registered. pool={}, lp_mint={}", pool_id, lp_mint);
        Ok(())
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Helpers
// ═════════════════════════════════════════════════════════════════════════

/// Debits a program-owned account directly. `to` may be any writable account.
fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(BoomError::InsufficientLiquidity)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(BoomError::ArithmeticOverflow)?;
    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn record_launch(
    token: &mut PresaleToken,
    round_id: u64,
    mint: Pubkey,
    total_supply: u64,
    tokens_per_winner: u64,
    now: i64,
    bump: u8,
    mint_authority_bump: u8,
) {
    token.round_id = round_id;
    token.mint = mint;
    token.total_supply = total_supply;
    token.tokens_per_winner = tokens_per_winner;
    token.created_at = now;
    token.bump = bump;
    token.mint_authority_bump = mint_authority_bump;

    emit!(PresaleTokenCreated {
        round_id,
        mint,
        total_supply,
        tokens_per_winner,
    });
}

fn announce_explosion(explosion: &PresaleExplosion) {
    emit!(ExplosionTriggered {
        round_id: explosion.round_id,
        reason: explosion.reason,
        revealed_cap: explosion.revealed_cap,
        explosion_time: explosion.explosion_time,
    });
    msg!(
        "BOOM: EXPLODED round {} ({:?}) at {}",
        explosion.round_id,
        explosion.reason,
        explosion.explosion_time
    );
}

/// Re-reads the vaults, quotes, checks slippage and the gate, moves both
/// legs, then re-reads the vaults again. Returns the amount paid out.
fn execute_swap(
    legs: contexts::SwapLegs<'_, '_>,
    amount_in: u64,
    min_amount_out: u64,
    is_buy: bool,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    legs.presale_explosion.ensure_trading_open(now)?;

    // ── Sync from vault truth ───────────────────────────────────────────
    legs.token_vault.reload()?;
    let rent_floor = Rent::get()?.minimum_balance(0);
    legs.pool
        .sync(legs.sol_vault.lamports(), rent_floor, legs.token_vault.amount);
    let amount_out = legs.pool.quote_checked(amount_in, min_amount_out, is_buy)?;

    let round_id = legs.pool.round_id;
    let round_id_bytes = round_id.to_le_bytes();
    let pool_key = legs.pool.key();
    let user_key = legs.user.key();
    let mint_key = legs.mint.key();
    let decimals = legs.mint.decimals;
    let token_program_id = legs.token_program.key();
    let gate_authority = legs.gate_config.authority;
    let hook_accounts = [
        legs.extra_account_meta_list.to_account_info(),
        legs.gate_config.to_account_info(),
        legs.whitelist.to_account_info(),
        legs.gate_program.to_account_info(),
    ];

    let sol_leg = if is_buy {
        system_program::transfer(
            CpiContext::new(
                legs.system_program.to_account_info(),
                system_program::Transfer {
                    from: legs.user.to_account_info(),
                    to: legs.sol_vault.to_account_info(),
                },
            ),
            amount_in,
        )?;

        legs.whitelist.check_transfer(
            &gate_authority,
            &GatedTransfer {
                mint: mint_key,
                source: legs.token_vault.key(),
                source_owner: pool_key,
                destination: legs.user_token_account.key(),
                destination_owner: user_key,
            },
        )?;

        let pool_bump = [legs.pool.bump];
        let pool_seeds: &[&[u8]] = &[POOL_SEED, &round_id_bytes, &pool_bump];
        invoke_transfer_checked(
            &token_program_id,
            legs.token_vault.to_account_info(),
            legs.mint.to_account_info(),
            legs.user_token_account.to_account_info(),
            legs.pool.to_account_info(),
            &hook_accounts,
            amount_out,
            decimals,
            &[pool_seeds],
        )?;
        amount_in
    } else {
        legs.whitelist.check_transfer(
            &gate_authority,
            &GatedTransfer {
                mint: mint_key,
                source: legs.user_token_account.key(),
                source_owner: user_key,
                destination: legs.token_vault.key(),
                destination_owner: pool_key,
            },
        )?;

        invoke_transfer_checked(
            &token_program_id,
            legs.user_token_account.to_account_info(),
            legs.mint.to_account_info(),
            legs.token_vault.to_account_info(),
            legs.user.to_account_info(),
            &hook_accounts,
            amount_in,
            decimals,
            &[],
        )?;

        let vault_bump = [legs.pool.sol_vault_bump];
        let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, &round_id_bytes, &vault_bump];
        system_program::transfer(
            CpiContext::new_with_signer(
                legs.system_program.to_account_info(),
                system_program::Transfer {
                    from: legs.sol_vault.to_account_info(),
                    to: legs.user.to_account_info(),
                },
                &[vault_seeds],
            ),
            amount_out,
        )?;
        amount_out
    };

    // ── Re-sync from vault truth ────────────────────────────────────────
    legs.token_vault.reload()?;
    legs.pool
        .sync(legs.sol_vault.lamports(), rent_floor, legs.token_vault.amount);
    legs.pool.record_swap(sol_leg)?;

    emit!(SwapExecuted {
        round_id,
        user: user_key,
        is_buy,
        amount_in,
        amount_out,
        sol_reserve: legs.pool.sol_reserve,
        token_reserve: legs.pool.token_reserve,
    });
    msg!(
        "BOOM: {} {} in, {} out. reserves sol={}, token={}",
        if is_buy { "Buy" } else { "Sell" },
        amount_in,
        amount_out,
        legs.pool.sol_reserve,
        legs.pool.token_reserve
    );
    Ok(amount_out)
}
