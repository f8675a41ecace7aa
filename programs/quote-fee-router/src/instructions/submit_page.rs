use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    distribution,
    events::{InvestorPayout, InvestorPayoutPage},
    payouts::TreasuryPayouts,
    stake_registry,
    state::{Policy, Progress, ProgressSnapshot},
};

#[derive(Accounts)]
pub struct SubmitPage<'info> {
    /// CHECK: only used as a PDA seed
    pub vault: UncheckedAccount<'info>,

    #[account(
        seeds = [POLICY_SEED, vault.key().as_ref()],
        bump = policy.bump,
        has_one = vault,
        has_one = treasury_quote
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

    pub crank_operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
    // Remaining accounts: [stake_entry_0, investor_ata_0, stake_entry_1, investor_ata_1, ...]
    // ordered by investor key, continuing the previous page's order
}

pub fn submit_page<'info>(
    ctx: Context<'_, '_, '_, 'info, SubmitPage<'info>>,
    page_index: u32,
) -> Result<ProgressSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    let vault = ctx.accounts.vault.key();
    let investors = stake_registry::read_investor_page(ctx.remaining_accounts, &ctx.accounts.policy)?;

    let bump = [ctx.bumps.fee_position_owner];
    let seeds: &[&[u8]] = &[
        VAULT_SEED,
        vault.as_ref(),
        INVESTOR_FEE_POSITION_OWNER_SEED,
        &bump,
    ];
    let signer = &[seeds];

    let mut payouts = TreasuryPayouts {
        token_program: ctx.accounts.token_program.to_account_info(),
        treasury: ctx.accounts.treasury_quote.to_account_info(),
        authority: ctx.accounts.fee_position_owner.to_account_info(),
        destinations: ctx.remaining_accounts,
        signer_seeds: signer,
    };
    let outcome = distribution::settle_page(
        &ctx.accounts.policy,
        &mut ctx.accounts.progress,
        page_index,
        &investors,
        &mut payouts,
    )?;

    for payout in &outcome.payouts {
        emit!(InvestorPayout {
            vault,
            investor: payout.investor,
            destination: payout.destination,
            amount: payout.amount,
            locked_amount: payout.locked_amount,
            page: page_index,
            timestamp: now,
        });
    }

    let progress = &ctx.accounts.progress;
    msg!(
        "page {}: paid {} to {} of {} investors, {} deferred",
        page_index,
        outcome.distributed,
        outcome.payouts.len(),
        outcome.investor_count,
        outcome.dust
    );
    emit!(InvestorPayoutPage {
        vault,
        page: page_index,
        total_payout: outcome.distributed,
        dust_deferred: outcome.dust,
        investor_count: outcome.investor_count,
        daily_distributed_after: progress.distributed_for_day,
        timestamp: now,
    });

    Ok(progress.snapshot())
}
