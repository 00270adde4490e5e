use anchor_lang::prelude::*;

#[error_code]
pub enum BoomError {
    // ── Presale ─────────────────────────────────────────────────────────
    #[msg("Deposit bounds are invalid (min must be > 0 and <= max)")]
    InvalidBounds,
    #[msg("Invalid round configuration")]
    InvalidConfig,
    #[msg("Deposit amount outside the round bounds")]
    OutOfBounds,
    #[msg("Presale round has ended")]
    RoundEnded,
    #[msg("Presale round is still open")]
    RoundNotEnded,
    #[msg("Presale round has already been finalized")]
    AlreadyFinalized,
    #[msg("Presale round has not been finalized yet")]
    NotFinalized,
    #[msg("Presale round is full")]
    RoundFull,
    #[msg("Depositor already has a deposit in this round")]
    AlreadyDeposited,
    #[msg("More winner indexes than lottery spots")]
    TooManyWinners,

    // ── Lottery ─────────────────────────────────────────────────────────
    #[msg("Depositor is already marked as winner")]
    AlreadyWinner,
    #[msg("Depositor was not selected by the lottery")]
    NotSelected,
    #[msg("Depositor is not a winner")]
    NotAWinner,
    #[msg("Lottery winners cannot claim a refund")]
    WinnerCannotRefund,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Not every selected winner has been marked yet")]
    WinnersPending,

    // ── Token launch ────────────────────────────────────────────────────
    #[msg("No winners have been marked for this round")]
    NoWinners,
    #[msg("Presale token already exists for this round")]
    AlreadyCreated,
    #[msg("Supply must be greater than zero")]
    ZeroSupply,
    #[msg("Total supply does not cover the winner allocations")]
    SupplyTooSmall,
    #[msg("Token name too long (max 32 bytes)")]
    NameTooLong,
    #[msg("Token symbol too long (max 10 bytes)")]
    SymbolTooLong,
    #[msg("Invalid mint for this round")]
    InvalidMint,
    #[msg("Mint authority must be the round's mint authority PDA")]
    InvalidMintAuthority,

    // ── Pool ────────────────────────────────────────────────────────────
    #[msg("Fee must be below 10000 bps")]
    InvalidFee,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Pool has insufficient liquidity")]
    InsufficientLiquidity,
    #[msg("Output below minimum amount")]
    SlippageExceeded,
    #[msg("Trading is closed for this round")]
    TradingClosed,

    // ── Explosion ───────────────────────────────────────────────────────
    #[msg("Explosion is already armed")]
    AlreadyArmed,
    #[msg("Explosion is not armed")]
    NotArmed,
    #[msg("Explosion timer already started")]
    TimerAlreadyStarted,
    #[msg("Explosion timer was never started")]
    NoDeadlineSet,
    #[msg("Invalid reveal")]
    InvalidReveal,
    #[msg("Round has already exploded")]
    AlreadyExploded,
    #[msg("Explosion deadline not reached yet")]
    DeadlineNotReached,
    #[msg("Market cap has not reached the revealed cap")]
    CapNotReached,

    // ── Payout ──────────────────────────────────────────────────────────
    #[msg("Round has not exploded")]
    NotExploded,
    #[msg("No payout pool registered for this round")]
    NoPayoutPool,
    #[msg("Payout pool already registered")]
    AlreadyRegistered,
    #[msg("Nothing to redeem")]
    ZeroBalance,
    #[msg("Insufficient token balance")]
    InsufficientBalance,
    #[msg("Payout share rounds to zero")]
    PayoutTooSmall,
    #[msg("Payout pool exhausted")]
    PayoutExhausted,

    // ── Common ──────────────────────────────────────────────────────────
    #[msg("Denied")]
    Unauthorized,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
