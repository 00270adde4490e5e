use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};
use spl_tlv_account_resolution::{account::ExtraAccountMeta, seeds::Seed};
use spl_token_2022::extension::transfer_hook::TransferHookAccount;
use spl_token_2022::extension::{BaseStateWithExtensions, StateWithExtensions};
use spl_token_2022::state::Account as Token2022Account;

use crate::errors::GateError;
use crate::state::{GateConfig, GatedTransfer, MintWhitelist};
use crate::{EXTRA_ACCOUNT_METAS_SEED, GATE_CONFIG_SEED, WHITELIST_SEED};

// ─────────────────────────────────────────────────────────────────────────────
// Transfer Hook — the single-address whitelist
// ─────────────────────────────────────────────────────────────────────────────
//
// Token-2022 calls `execute` on every transfer of a gated mint with the fixed
// interface accounts:
//   0 source token account, 1 mint, 2 destination token account,
//   3 source owner/delegate, 4 extra-account-metas PDA
// followed by the extras resolved from the meta list:
//   5 gate config PDA, 6 mint whitelist PDA.
//
// Mint/burn never reach the hook, so winner allocations, pool seeding and
// payout burns are unaffected by the gate.

/// Extra accounts Token-2022 resolves for every transfer of a gated mint.
pub fn extra_account_metas() -> Result<Vec<ExtraAccountMeta>> {
    Ok(vec![
        ExtraAccountMeta::new_with_seeds(
            &[Seed::Literal {
                bytes: GATE_CONFIG_SEED.to_vec(),
            }],
            false, // is_signer
            false, // is_writable
        )?,
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal {
                    bytes: WHITELIST_SEED.to_vec(),
                },
                Seed::AccountKey { index: 1 }, // mint
            ],
            false,
            false,
        )?,
    ])
}

#[derive(Accounts)]
pub struct TransferHook<'info> {
    /// The source token account.
    #[account(token::mint = mint)]
    pub source_token: InterfaceAccount<'info, TokenAccount>,

    /// The gated mint.
    pub mint: InterfaceAccount<'info, Mint>,

    /// The destination token account.
    #[account(token::mint = mint)]
    pub destination_token: InterfaceAccount<'info, TokenAccount>,

    /// Source owner or delegate.
    /// CHECK: validated by Token-2022 before the hook runs.
    pub owner: UncheckedAccount<'info>,

    /// CHECK: the interface-mandated meta list, checked by seeds.
    #[account(
        seeds = [EXTRA_ACCOUNT_METAS_SEED, mint.key().as_ref()],
        bump,
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        seeds = [GATE_CONFIG_SEED],
        bump = gate_config.bump,
    )]
    pub gate_config: Account<'info, GateConfig>,

    #[account(
        seeds = [WHITELIST_SEED, mint.key().as_ref()],
        bump = whitelist.bump,
    )]
    pub whitelist: Account<'info, MintWhitelist>,
}

impl<'info> TransferHook<'info> {
    pub fn gated_transfer(&self) -> GatedTransfer {
        GatedTransfer {
            mint: self.mint.key(),
            source: self.source_token.key(),
            source_owner: self.source_token.owner,
            destination: self.destination_token.key(),
            destination_owner: self.destination_token.owner,
        }
    }
}

/// Rejects direct calls to `execute` that are not part of a live transfer.
fn assert_is_transferring(source_token: &AccountInfo) -> Result<()> {
    let data = source_token.try_borrow_data()?;
    let account = StateWithExtensions::<Token2022Account>::unpack(&data)?;
    let extension = account.get_extension::<TransferHookAccount>()?;
    require!(
        bool::from(extension.transferring),
        GateError::NotTransferring
    );
    Ok(())
}

pub fn handler(ctx: Context<TransferHook>, amount: u64) -> Result<()> {
    assert_is_transferring(&ctx.accounts.source_token.to_account_info())?;

    let transfer = ctx.accounts.gated_transfer();
    let result = ctx
        .accounts
        .whitelist
        .check_transfer(&ctx.accounts.gate_config.authority, &transfer);

    if result.is_err() {
        msg!(
            "BOOM GATE: Transfer BLOCKED. mint={}, amount={}",
            transfer.mint,
            amount
        );
        return result;
    }

    msg!(
        "BOOM GATE: Transfer OK. mint={}, amount={}",
        transfer.mint,
        amount
    );
    Ok(())
}
