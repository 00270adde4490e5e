use anchor_lang::prelude::*;

use crate::errors::GateError;

// ─────────────────────────────────────────────────────────────────────────────
// GateConfig — one per deployment
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"gate_config"]

#[account]
#[derive(Debug)]
pub struct GateConfig {
    /// Protocol authority. Manages whitelists and may move tokens while
    /// trading is still locked (liquidity setup).
    pub authority: Pubkey,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl GateConfig {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // authority
        + 1;  // bump
}

// ─────────────────────────────────────────────────────────────────────────────
// MintWhitelist — one per gated mint
// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds: [b"whitelist", mint.key().as_ref()]

#[account]
#[derive(Debug)]
pub struct MintWhitelist {
    /// The gated Token-2022 mint.
    pub mint: Pubkey,

    /// The single liquidity address tokens may move to or from.
    /// `Pubkey::default()` means none is approved and trading is disabled.
    pub approved_address: Pubkey,

    /// Unix timestamp of the last whitelist change.
    pub updated_at: i64,

    /// Bump seed for this PDA.
    pub bump: u8,
}

impl MintWhitelist {
    pub const MAX_SIZE: usize = 8  // discriminator
        + 32  // mint
        + 32  // approved_address
        + 8   // updated_at
        + 1;  // bump

    pub fn is_trading_enabled(&self) -> bool {
        self.approved_address != Pubkey::default()
    }

    /// Replace the approved address. Setting the current value again is a no-op.
    pub fn approve(&mut self, address: Pubkey, now: i64) -> bool {
        if self.approved_address == address {
            return false;
        }
        self.approved_address = address;
        self.updated_at = now;
        true
    }

    /// The gate rule shared by the transfer hook and by every program that
    /// moves the gated token itself.
    pub fn check_transfer(&self, authority: &Pubkey, transfer: &GatedTransfer) -> Result<()> {
        if transfer.source_owner == *authority {
            return Ok(());
        }
        require_keys_eq!(self.mint, transfer.mint, GateError::NotWhitelisted);
        require!(self.is_trading_enabled(), GateError::TradingDisabled);

        let approved = self.approved_address;
        let touches_approved = transfer.source == approved
            || transfer.source_owner == approved
            || transfer.destination == approved
            || transfer.destination_owner == approved;
        require!(touches_approved, GateError::NotWhitelisted);

        Ok(())
    }
}

/// The parties of a single token movement, as seen by the gate.
#[derive(Clone, Copy, Debug)]
pub struct GatedTransfer {
    pub mint: Pubkey,
    pub source: Pubkey,
    pub source_owner: Pubkey,
    pub destination: Pubkey,
    pub destination_owner: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist(mint: Pubkey, approved: Pubkey) -> MintWhitelist {
        MintWhitelist {
            mint,
            approved_address: approved,
            updated_at: 0,
            bump: 255,
        }
    }

    fn transfer(mint: Pubkey, source: Pubkey, destination: Pubkey) -> GatedTransfer {
        GatedTransfer {
            mint,
            source,
            source_owner: Pubkey::new_unique(),
            destination,
            destination_owner: Pubkey::new_unique(),
        }
    }

    fn error_code(result: Result<()>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(e)) => e.error_code_number,
            other => panic!("expected anchor error, got {:?}", other),
        }
    }

    #[test]
    fn locked_mint_rejects_everyone_but_the_authority() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let list = whitelist(mint, Pubkey::default());

        let mut t = transfer(mint, Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            error_code(list.check_transfer(&authority, &t)),
            u32::from(GateError::TradingDisabled)
        );

        t.source_owner = authority;
        assert!(list.check_transfer(&authority, &t).is_ok());
    }

    #[test]
    fn only_the_approved_vault_may_send_or_receive() {
        let mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let list = whitelist(mint, vault);

        let sell = transfer(mint, Pubkey::new_unique(), vault);
        assert!(list.check_transfer(&authority, &sell).is_ok());

        let buy = transfer(mint, vault, Pubkey::new_unique());
        assert!(list.check_transfer(&authority, &buy).is_ok());

        let wallet_to_wallet = transfer(mint, Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            error_code(list.check_transfer(&authority, &wallet_to_wallet)),
            u32::from(GateError::NotWhitelisted)
        );
    }

    #[test]
    fn approved_owner_matches_its_token_accounts() {
        let mint = Pubkey::new_unique();
        let lp = Pubkey::new_unique();
        let list = whitelist(mint, lp);

        let mut t = transfer(mint, Pubkey::new_unique(), Pubkey::new_unique());
        t.destination_owner = lp;
        assert!(list.check_transfer(&Pubkey::new_unique(), &t).is_ok());
    }

    #[test]
    fn whitelist_of_another_mint_denies() {
        let vault = Pubkey::new_unique();
        let list = whitelist(Pubkey::new_unique(), vault);
        let t = transfer(Pubkey::new_unique(), Pubkey::new_unique(), vault);
        assert_eq!(
            error_code(list.check_transfer(&Pubkey::new_unique(), &t)),
            u32::from(GateError::NotWhitelisted)
        );
    }

    #[test]
    fn approve_is_idempotent() {
        let mut list = whitelist(Pubkey::new_unique(), Pubkey::default());
        let vault = Pubkey::new_unique();
        assert!(list.approve(vault, 10));
        assert!(!list.approve(vault, 20));
        assert_eq!(list.approved_address, vault);
        assert_eq!(list.updated_at, 10);
    }
}
