use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::FeeRouterError,
    events::ProgressCreated,
    state::{Policy, Progress},
};

#[derive(Accounts)]
pub struct CreateProgress<'info> {
    /// CHECK: only used as a PDA seed
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [POLICY_SEED, vault.key().as_ref()],
        bump = policy.bump,
        has_one = vault,
        constraint = policy.initialized @ FeeRouterError::InvalidParameter
    )]
    pub policy: Box<Account<'info, Policy>>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Progress::LEN,
        seeds = [PROGRESS_SEED, vault.key().as_ref()],
        bump
    )]
    pub progress: Box<Account<'info, Progress>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_progress(ctx: Context<CreateProgress>) -> Result<()> {
    let vault = ctx.accounts.vault.key();
    ctx.accounts.progress.initialize(vault, ctx.bumps.progress)?;

    msg!("progress created for vault {}", vault);
    emit!(ProgressCreated {
        vault,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
