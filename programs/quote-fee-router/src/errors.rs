use anchor_lang::prelude::*;

#[error_code]
pub enum FeeRouterError {
    #[msg("Account already initialized for this vault")]
    AlreadyInitialized,

    #[msg("Invalid parameter")]
    InvalidParameter,

    #[msg("Distribution window not reached (24h required)")]
    GateNotElapsed,

    #[msg("Base fees detected, quote-only invariant violated")]
    BaseFeePresent,

    #[msg("Page submitted out of order")]
    OutOfOrderPage,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Payout transfer failed")]
    TransferFailed,

    #[msg("No distribution day is open")]
    DayNotOpen,

    #[msg("A distribution day is already open")]
    DayAlreadyOpen,

    #[msg("Fees can only be claimed before the first page of the day")]
    ClaimWindowClosed,

    #[msg("Investor stake not fully paged for this day")]
    PagesRemaining,

    #[msg("Page stake exceeds the total locked captured at day open")]
    StakeMismatch,

    #[msg("Invalid investor accounts")]
    InvalidInvestorAccount,

    #[msg("Invalid stake registry account")]
    InvalidRegistryAccount,

    #[msg("Distribution accounting invariant violated")]
    InvariantViolation,
}
