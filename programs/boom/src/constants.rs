// ─────────────────────────────────────────────────────────────────────────────
// PDA seeds
// ─────────────────────────────────────────────────────────────────────────────
// Every round-scoped record is keyed by [seed, round_id.to_le_bytes()],
// per-depositor records append the depositor key.

pub const PRESALE_SEED: &[u8] = b"presale";
pub const DEPOSIT_SEED: &[u8] = b"deposit";
pub const PRESALE_TOKEN_SEED: &[u8] = b"presale_token";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
pub const POOL_SEED: &[u8] = b"pool";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";
pub const PRESALE_EXPLOSION_SEED: &[u8] = b"presale_explosion";
pub const PAYOUT_POOL_SEED: &[u8] = b"payout_pool";
pub const PAYOUT_VAULT_SEED: &[u8] = b"payout_vault";
pub const LP_INFO_SEED: &[u8] = b"lp_info";

// ─────────────────────────────────────────────────────────────────────────────
// Protocol limits
// ─────────────────────────────────────────────────────────────────────────────

/// Basis-point denominator for pool fees.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Decimals of every presale token mint.
pub const TOKEN_DECIMALS: u8 = 9;

/// Upper bound on depositors per round. Keeps the on-chain lottery
/// replay in `mark_winner` within compute limits.
pub const MAX_DEPOSITORS: u32 = 512;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;
