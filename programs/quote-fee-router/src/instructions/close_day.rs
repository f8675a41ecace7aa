use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    distribution,
    events::CreatorPayoutDayClosed,
    payouts::TreasuryPayouts,
    state::{Policy, Progress, ProgressSnapshot},
};

#[derive(Accounts)]
pub struct CloseDay<'info> {
    /// CHECK: only used as a PDA seed
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [POLICY_SEED, vault.key().as_ref()],
        bump = policy.bump,
        has_one = vault,
        has_one = treasury_quote,
        has_one = creator_quote_ata
    )]
    pub policy: Box<Account<'info, Policy>>,

    #[account(
        mut,
        seeds = [PROGRESS_SEED, vault.key().as_ref()],
        bump = progress.bump,
        has_one = vault
    )]
    pub progress: Box<Account<'info, Progress>>,

    /// CHECK: PDA derivation
    #[account(
        seeds = [VAULT_SEED, vault.key().as_ref(), INVESTOR_FEE_POSITION_OWNER_SEED],
        bump
    )]
    pub fee_position_owner: UncheckedAccount<'info>,

    #[account(mut)]
    pub treasury_quote: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub creator_quote_ata: Box<Account<'info, TokenAccount>>,

    pub crank_operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn close_day(ctx: Context<CloseDay>) -> Result<ProgressSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    let vault = ctx.accounts.vault.key();

    let bump = [ctx.bumps.fee_position_owner];
    let seeds: &[&[u8]] = &[
        VAULT_SEED,
        vault.as_ref(),
        INVESTOR_FEE_POSITION_OWNER_SEED,
        &bump,
    ];
    let signer = &[seeds];

    let creator = ctx.accounts.creator_quote_ata.to_account_info();
    let mut payouts = TreasuryPayouts {
        token_program: ctx.accounts.token_program.to_account_info(),
        treasury: ctx.accounts.treasury_quote.to_account_info(),
        authority: ctx.accounts.fee_position_owner.to_account_info(),
        destinations: std::slice::from_ref(&creator),
        signer_seeds: signer,
    };
    let close = distribution::settle_close(
        &ctx.accounts.policy,
        &mut ctx.accounts.progress,
        now,
        &mut payouts,
    )?;

    let progress = &ctx.accounts.progress;
    msg!(
        "day {} closed: creator {} (overflow {}), investors {}, carry {}",
        progress.day_count,
        close.creator_payout,
        close.cap_overflow,
        close.distributed_to_investors,
        close.carry_out
    );
    emit!(CreatorPayoutDayClosed {
        vault,
        creator_payout: close.creator_payout,
        cap_overflow: close.cap_overflow,
        carry_in: close.carry_in,
        carry_out: close.carry_out,
        total_distributed_to_investors: close.distributed_to_investors,
        claimed: close.claimed,
        distribution_day: progress.day_count,
        timestamp: now,
    });

    Ok(progress.snapshot())
}
