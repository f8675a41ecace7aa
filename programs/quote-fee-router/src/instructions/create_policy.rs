use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::FeeRouterError,
    events::PolicyCreated,
    state::{Policy, PolicyAccounts, PolicyParams},
};

#[derive(Accounts)]
pub struct CreatePolicy<'info> {
    /// Vault the policy is keyed by
    /// CHECK: only used as a PDA seed
    pub vault: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = authority,
        space = Policy::LEN,
        seeds = [POLICY_SEED, vault.key().as_ref()],
        bump
    )]
    pub policy: Box<Account<'info, Policy>>,

    /// Quote mint (usually USDC)
    pub quote_mint: Box<Account<'info, Mint>>,

    /// Base mint of the pair (for invariant checks only)
    #[account(constraint = base_mint.key() != quote_mint.key() @ FeeRouterError::InvalidParameter)]
    pub base_mint: Box<Account<'info, Mint>>,

    /// Program-owned quote treasury ATA
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = quote_mint,
        associated_token::authority = fee_position_owner,
    )]
    pub treasury_quote: Box<Account<'info, TokenAccount>>,

    /// Program-owned base treasury ATA (must stay empty)
    #[account(
        init_if_needed,
        payer = authority,
        associated_token::mint = base_mint,
        associated_token::authority = fee_position_owner,
    )]
    pub treasury_base: Box<Account<'info, TokenAccount>>,

    /// Creator's quote token account receiving day residuals
    #[account(
        constraint = creator_quote_ata.mint == quote_mint.key() @ FeeRouterError::InvalidParameter
    )]
    pub creator_quote_ata: Box<Account<'info, TokenAccount>>,

    /// PDA owning the fee position and treasuries
    /// CHECK: derived and used as authority only
    #[account(
        seeds = [VAULT_SEED, vault.key().as_ref(), INVESTOR_FEE_POSITION_OWNER_SEED],
        bump
    )]
    pub fee_position_owner: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn create_policy(ctx: Context<CreatePolicy>, params: PolicyParams) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let vault = ctx.accounts.vault.key();
    let accounts = PolicyAccounts {
        quote_mint: ctx.accounts.quote_mint.key(),
        base_mint: ctx.accounts.base_mint.key(),
        creator_quote_ata: ctx.accounts.creator_quote_ata.key(),
        treasury_quote: ctx.accounts.treasury_quote.key(),
        treasury_base: ctx.accounts.treasury_base.key(),
    };

    let policy = &mut ctx.accounts.policy;
    policy.initialize(vault, &params, accounts, now, ctx.bumps.policy)?;

    msg!(
        "policy created for vault {}: y0={} share_bps={} cap={:?} min_payout={}",
        vault,
        policy.y0,
        policy.investor_fee_share_bps,
        policy.daily_cap(),
        policy.min_payout
    );

    emit!(PolicyCreated {
        vault,
        quote_mint: policy.quote_mint,
        creator_quote_ata: policy.creator_quote_ata,
        y0: policy.y0,
        investor_fee_share_bps: policy.investor_fee_share_bps,
        daily_cap: policy.daily_cap(),
        min_payout: policy.min_payout,
        timestamp: now,
    });

    Ok(())
}
