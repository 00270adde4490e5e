use anchor_lang::prelude::*;

#[error_code]
pub enum GateError {
    #[msg("Transfer denied")]
    NotWhitelisted,
    #[msg("Trading is not enabled for this mint yet")]
    TradingDisabled,
    #[msg("Denied")]
    Unauthorized,
    #[msg("Hook invoked outside of a Token-2022 transfer")]
    NotTransferring,
}
