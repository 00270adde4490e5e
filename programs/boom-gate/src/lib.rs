use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::{ExecuteInstruction, TransferHookInstruction};

pub mod errors;
pub mod hook;
pub mod state;

use errors::GateError;
pub use hook::*;
pub use state::*;

declare_id!("5ajXtri2oN1atCQGhe6Zu1mXzZEAtLp1v23793Q18v8v");

pub const GATE_CONFIG_SEED: &[u8] = b"gate_config";
pub const WHITELIST_SEED: &[u8] = b"whitelist";
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

#[program]
pub mod boom_gate {
    use super::*;

    // ═════════════════════════════════════════════════════════════════════
    // 1. INITIALIZE GATE
    // ═════════════════════════════════════════════════════════════════════
    /// Creates the gate config. The signer becomes the gate authority, the
    /// only key allowed to change whitelists or move gated tokens while a
    /// mint is still locked.
    pub fn initialize_gate(ctx: Context<InitializeGate>) -> Result<()> {
        let config = &mut ctx.accounts.gate_config;
        config.authority = ctx.accounts.authority.key();
        config.bump = ctx.bumps.gate_config;

        msg!("BOOM GATE: Initialized. authority={}", config.authority);
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 2. INITIALIZE EXTRA ACCOUNT META LIST
    // ═════════════════════════════════════════════════════════════════════
    /// Writes the meta list Token-2022 uses to resolve the hook's extra
    /// accounts, and creates the mint's whitelist in the locked state.
    pub fn initialize_extra_account_meta_list(
        ctx: Context<InitializeExtraAccountMetaList>,
    ) -> Result<()> {
        let metas = extra_account_metas()?;
        let info = ctx.accounts.extra_account_meta_list.to_account_info();
        let mut data = info.try_borrow_mut_data()?;
        ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, &metas)?;

        let now = Clock::get()?.unix_timestamp;
        let whitelist = &mut ctx.accounts.whitelist;
        whitelist.mint = ctx.accounts.mint.key();
        whitelist.approved_address = Pubkey::default();
        whitelist.updated_at = now;
        whitelist.bump = ctx.bumps.whitelist;

        msg!(
            "BOOM GATE: Meta list ready, trading locked. mint={}",
            whitelist.mint
        );
        Ok(())
    }

    // ═════════════════════════════════════════════════════════════════════
    // 3. ADD WHITELIST
    // ═════════════════════════════════════════════════════════════════════
    /// Sets the approved liquidity address, creating the whitelist record
    /// if the mint has none yet.
    pub fn add_whitelist(ctx: Context<AddWhitelist>, address: Pubkey) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        let mint = ctx.accounts.mint.key();
        let whitelist = &mut ctx.accounts.whitelist;
        if whitelist.mint == Pubkey::default() {
            whitelist.mint = mint;
            whitelist.updated_at = now;
            whitelist.bump = ctx.bumps.whitelist;
        }
        apply_whitelist(whitelist, address, now)
    }

    // ═════════════════════════════════════════════════════════════════════
    // 4. UPDATE WHITELIST
    // ═════════════════════════════════════════════════════════════════════
    /// Replaces the approved liquidity address. Repeating the current
    /// address changes nothing. Passing `Pubkey::default()` re-locks the mint.
    pub fn update_whitelist(ctx: Context<UpdateWhitelist>, address: Pubkey) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        apply_whitelist(&mut ctx.accounts.whitelist, address, now)
    }

    // ═════════════════════════════════════════════════════════════════════
    // 5. TRANSFER HOOK
    // ═════════════════════════════════════════════════════════════════════
    /// Runs inside every Token-2022 transfer of a gated mint.
    pub fn transfer_hook(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
        hook::handler(ctx, amount)
    }

    /// Token-2022 invokes the hook with the interface's `Execute`
    /// discriminator rather than Anchor's, so route it by hand.
    pub fn fallback<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        data: &[u8],
    ) -> Result<()> {
        let instruction = TransferHookInstruction::unpack(data)?;
        match instruction {
            TransferHookInstruction::Execute { amount } => {
                let amount_bytes = amount.to_le_bytes();
                __private::__global::transfer_hook(program_id, accounts, &amount_bytes)
            }
            _ => Err(ProgramError::InvalidInstructionData.into()),
        }
    }
}

fn apply_whitelist(whitelist: &mut MintWhitelist, address: Pubkey, now: i64) -> Result<()> {
    if !whitelist.approve(address, now) {
        msg!("BOOM GATE: Whitelist unchanged. mint={}", whitelist.mint);
        return Ok(());
    }

    emit!(WhitelistUpdated {
        mint: whitelist.mint,
        approved_address: address,
        updated_at: now,
    });
    msg!(
        "BOOM GATE: Whitelist updated. mint={}, approved={}",
        whitelist.mint,
        address
    );
    Ok(())
}

#[event]
pub struct WhitelistUpdated {
    pub mint: Pubkey,
    pub approved_address: Pubkey,
    pub updated_at: i64,
}

// ═════════════════════════════════════════════════════════════════════════
// Account Contexts
// ═════════════════════════════════════════════════════════════════════════

#[derive(Accounts)]
pub struct InitializeGate<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = GateConfig::MAX_SIZE,
        seeds = [GATE_CONFIG_SEED],
        bump,
    )]
    pub gate_config: Account<'info, GateConfig>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct InitializeExtraAccountMetaList<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GATE_CONFIG_SEED],
        bump = gate_config.bump,
        has_one = authority @ GateError::Unauthorized,
    )]
    pub gate_config: Account<'info, GateConfig>,

    /// CHECK: written by this instruction with the TLV meta list.
    #[account(
        init,
        payer = authority,
        space = ExtraAccountMetaList::size_of(extra_account_metas()?.len())?,
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump,
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    /// The locked whitelist for this mint.
    #[account(
        init,
        payer = authority,
        space = MintWhitelist::MAX_SIZE,
        seeds = [WHITELIST_SEED, mint.key().as_ref()],
        bump,
    )]
    pub whitelist: Account<'info, MintWhitelist>,

    /// The gated Token-2022 mint.
    pub mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct AddWhitelist<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        seeds = [GATE_CONFIG_SEED],
        bump = gate_config.bump,
        has_one = authority @ GateError::Unauthorized,
    )]
    pub gate_config: Account<'info, GateConfig>,

    #[account(
        init_if_needed,
        payer = authority,
        space = MintWhitelist::MAX_SIZE,
        seeds = [WHITELIST_SEED, mint.key().as_ref()],
        bump,
    )]
    pub whitelist: Account<'info, MintWhitelist>,

    pub mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateWhitelist<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [GATE_CONFIG_SEED],
        bump = gate_config.bump,
        has_one = authority @ GateError::Unauthorized,
    )]
    pub gate_config: Account<'info, GateConfig>,

    #[account(
        mut,
        seeds = [WHITELIST_SEED, whitelist.mint.as_ref()],
        bump = whitelist.bump,
    )]
    pub whitelist: Account<'info, MintWhitelist>,
}
