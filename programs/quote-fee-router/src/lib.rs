use anchor_lang::prelude::*;

pub mod constants;
pub mod distribution;
pub mod errors;
pub mod events;
pub mod fee_claim;
pub mod instructions;
pub mod math;
pub mod payouts;
pub mod stake_registry;
pub mod state;

use instructions::*;
use state::{PolicyParams, ProgressSnapshot};

declare_id!("4qNDSGkcnyX9o18U1RrPoMomhyE2j5VXB7e7LfbAE4K7");

#[program]
pub mod quote_fee_router {
    use super::*;

    /// Create the immutable distribution policy of a vault
    pub fn create_policy(ctx: Context<CreatePolicy>, params: PolicyParams) -> Result<()> {
        instructions::create_policy(ctx, params)
    }

    /// Create the zeroed day progress of a vault
    pub fn create_progress(ctx: Context<CreateProgress>) -> Result<()> {
        instructions::create_progress(ctx)
    }

    /// Open a distribution day (at most once per 24h) and claim quote fees
    pub fn open_day(ctx: Context<OpenDay>) -> Result<ProgressSnapshot> {
        instructions::open_day(ctx)
    }

    /// Pay the next page of investors pro rata to locked stake
    pub fn submit_page<'info>(
        ctx: Context<'_, '_, '_, 'info, SubmitPage<'info>>,
        page_index: u32,
    ) -> Result<ProgressSnapshot> {
        instructions::submit_page(ctx, page_index)
    }

    /// Close the day and route the residual to the creator
    pub fn close_day(ctx: Context<CloseDay>) -> Result<ProgressSnapshot> {
        instructions::close_day(ctx)
    }
}
