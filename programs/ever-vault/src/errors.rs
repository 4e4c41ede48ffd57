use anchor_lang::prelude::*;

/// Custom error codes for the EverVault program
///
/// Security: Descriptive error messages without information leakage.
/// Every error aborts the whole instruction - no partial state change
/// is ever observable to the caller.
#[error_code]
pub enum VaultError {
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Withdrawal exceeds caller's share balance")]
    InsufficientShares,

    #[msg("Lending market cannot return enough principal to cover the withdrawal")]
    LiquidityUnavailable,

    #[msg("Underlying asset transfer would be rejected")]
    TransferFailure,

    #[msg("Invest amount exceeds idle vault principal")]
    InsufficientIdleAssets,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero - vault has no shares")]
    DivisionByZero,

    #[msg("Invalid token mint - does not match vault asset")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Unauthorized - only vault authority can perform this action")]
    Unauthorized,

    #[msg("Withdrawal fee cannot exceed 10000 basis points")]
    InvalidFeeRate,

    #[msg("Market position account must be distinct from the vault token account")]
    InvalidMarketAccount,
}
