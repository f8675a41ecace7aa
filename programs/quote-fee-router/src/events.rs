use anchor_lang::prelude::*;

#[event]
pub struct PolicyCreated {
    pub vault: Pubkey,
    pub quote_mint: Pubkey,
    pub creator_quote_ata: Pubkey,
    pub y0: u64,
    pub investor_fee_share_bps: u16,
    pub daily_cap: Option<u64>,
    pub min_payout: u64,
    pub timestamp: i64,
}

#[event]
pub struct ProgressCreated {
    pub vault: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct QuoteFeesClaimed {
    pub vault: Pubkey,
    pub amount_claimed: u64,
    pub carry_over_prev: u64,
    pub total_locked_for_day: u64,
    pub distribution_day: u64,
    pub timestamp: i64,
}

#[event]
pub struct InvestorPayout {
    pub vault: Pubkey,
    pub investor: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub locked_amount: u64,
    pub page: u32,
    pub timestamp: i64,
}

#[event]
pub struct InvestorPayoutPage {
    pub vault: Pubkey,
    pub page: u32,
    pub total_payout: u64,
    pub dust_deferred: u64,
    pub investor_count: u32,
    pub daily_distributed_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct CreatorPayoutDayClosed {
    pub vault: Pubkey,
    pub creator_payout: u64,
    pub cap_overflow: u64,
    pub carry_in: u64,
    pub carry_out: u64,
    pub total_distributed_to_investors: u64,
    pub claimed: u64,
    pub distribution_day: u64,
    pub timestamp: i64,
}
