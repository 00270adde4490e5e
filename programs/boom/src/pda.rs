//! Address derivation for every record the program stores, for off-chain
//! readers that need the keys without the instruction contexts.

use anchor_lang::prelude::*;

use crate::constants::*;

fn round_scoped(seed: &[u8], round_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed, &round_id.to_le_bytes()], &crate::ID)
}

pub fn presale_round(round_id: u64) -> (Pubkey, u8) {
    round_scoped(PRESALE_SEED, round_id)
}

pub fn user_deposit(round_id: u64, depositor: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DEPOSIT_SEED, &round_id.to_le_bytes(), depositor.as_ref()],
        &crate::ID,
    )
}

pub fn presale_token(round_id: u64) -> (Pubkey, u8) {
    round_scoped(PRESALE_TOKEN_SEED, round_id)
}

pub fn mint_authority(round_id: u64) -> (Pubkey, u8) {
    round_scoped(MINT_AUTHORITY_SEED, round_id)
}

pub fn pool(round_id: u64) -> (Pubkey, u8) {
    round_scoped(POOL_SEED, round_id)
}

pub fn sol_vault(round_id: u64) -> (Pubkey, u8) {
    round_scoped(SOL_VAULT_SEED, round_id)
}

pub fn presale_explosion(round_id: u64) -> (Pubkey, u8) {
    round_scoped(PRESALE_EXPLOSION_SEED, round_id)
}

pub fn payout_pool(round_id: u64) -> (Pubkey, u8) {
    round_scoped(PAYOUT_POOL_SEED, round_id)
}

pub fn payout_vault(round_id: u64) -> (Pubkey, u8) {
    round_scoped(PAYOUT_VAULT_SEED, round_id)
}

pub fn lp_info(round_id: u64) -> (Pubkey, u8) {
    round_scoped(LP_INFO_SEED, round_id)
}

/// Gate accounts Token-2022 resolves for a mint's transfers.
pub fn gate_whitelist(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[boom_gate::WHITELIST_SEED, mint.as_ref()], &boom_gate::ID)
}

pub fn gate_config() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[boom_gate::GATE_CONFIG_SEED], &boom_gate::ID)
}

pub fn extra_account_metas(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[boom_gate::EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()],
        &boom_gate::ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_keys_are_deterministic_and_distinct() {
        assert_eq!(presale_round(7), presale_round(7));
        assert_ne!(presale_round(7).0, presale_round(8).0);

        let keys = [
            presale_round(1).0,
            presale_token(1).0,
            mint_authority(1).0,
            pool(1).0,
            sol_vault(1).0,
            presale_explosion(1).0,
            payout_pool(1).0,
            payout_vault(1).0,
            lp_info(1).0,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn deposits_are_keyed_by_depositor() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        assert_eq!(user_deposit(1, &alice), user_deposit(1, &alice));
        assert_ne!(user_deposit(1, &alice).0, user_deposit(1, &bob).0);
        assert_ne!(user_deposit(1, &alice).0, user_deposit(2, &alice).0);
    }

    #[test]
    fn round_id_is_little_endian() {
        let (expected, bump) = Pubkey::find_program_address(
            &[b"presale", &[1, 0, 0, 0, 0, 0, 0, 0]],
            &crate::ID,
        );
        assert_eq!(presale_round(1), (expected, bump));
    }

    #[test]
    fn gate_accounts_live_under_the_gate_program() {
        let mint = Pubkey::new_unique();
        let (whitelist, _) = gate_whitelist(&mint);
        let (expected, _) =
            Pubkey::find_program_address(&[b"whitelist", mint.as_ref()], &boom_gate::ID);
        assert_eq!(whitelist, expected);
        assert_ne!(extra_account_metas(&mint).0, whitelist);
        assert_ne!(gate_config().0, whitelist);
    }
}
