use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    distribution,
    events::QuoteFeesClaimed,
    fee_claim::PositionFeeClaim,
    stake_registry,
    state::{Policy, Progress, ProgressSnapshot},
};

#[derive(Accounts)]
pub struct OpenDay<'info> {
    /// CHECK: only used as a PDA seed
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [POLICY_SEED, vault.key().as_ref()],
        bump = policy.bump,
        has_one = vault,
        has_one = fee_position,
        has_one = treasury_quote,
        has_one = treasury_base
    )]
    pub policy: Box<Account<'info, Policy>>,

    #[account(
        mut,
        seeds = [PROGRESS_SEED, vault.key().as_ref()],
        bump = progress.bump,
        has_one = vault
    )]
    pub progress: Box<Account<'info, Progress>>,

    /// Stake registry summary carrying the day's locked total
    /// CHECK: owner, discriminator and vault validated in handler
    pub registry_summary: UncheckedAccount<'info>,

    /// The honorary fee position
    /// CHECK: validated against policy
    #[account(mut)]
    pub fee_position: UncheckedAccount<'info>,

    /// CHECK: PDA derivation
    #[account(
        seeds = [VAULT_SEED, vault.key().as_ref(), INVESTOR_FEE_POSITION_OWNER_SEED],
        bump
    )]
    pub fee_position_owner: UncheckedAccount<'info>,

    #[account(mut)]
    pub treasury_quote: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub treasury_base: Box<Account<'info, TokenAccount>>,

    /// CHECK: program ID validation
    #[account(address = DLMM_PROGRAM_ID)]
    pub dlmm_program: UncheckedAccount<'info>,

    pub crank_operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn open_day(ctx: Context<OpenDay>) -> Result<ProgressSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    let vault = ctx.accounts.vault.key();
    let total_locked =
        stake_registry::read_total_locked(&ctx.accounts.registry_summary, &ctx.accounts.policy)?;
    let carry_over_prev = ctx.accounts.progress.carry_over;

    let bump = [ctx.bumps.fee_position_owner];
    let seeds: &[&[u8]] = &[
        VAULT_SEED,
        vault.as_ref(),
        INVESTOR_FEE_POSITION_OWNER_SEED,
        &bump,
    ];
    let signer = &[seeds];

    let claimed = {
        let mut claimer = PositionFeeClaim {
            dlmm_program: ctx.accounts.dlmm_program.to_account_info(),
            fee_position: ctx.accounts.fee_position.to_account_info(),
            position_owner: ctx.accounts.fee_position_owner.to_account_info(),
            treasury_quote: &mut ctx.accounts.treasury_quote,
            treasury_base: &mut ctx.accounts.treasury_base,
            token_program: ctx.accounts.token_program.to_account_info(),
            signer_seeds: signer,
        };
        distribution::open_day_and_claim(&mut ctx.accounts.progress, now, total_locked, &mut claimer)?
    };

    let progress = &ctx.accounts.progress;
    msg!(
        "day {} opened: claimed {} quote, total locked {}",
        progress.day_count,
        claimed.quote,
        total_locked
    );
    emit!(QuoteFeesClaimed {
        vault,
        amount_claimed: claimed.quote,
        carry_over_prev,
        total_locked_for_day: total_locked,
        distribution_day: progress.day_count,
        timestamp: now,
    });

    Ok(progress.snapshot())
}
