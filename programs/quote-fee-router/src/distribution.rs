//! Day steps of the crank. Each step is staged on a copy of `Progress` and
//! committed only after its external effects (claim, transfers) succeed, so a
//! failed step leaves the persisted state untouched and can be retried.

use anchor_lang::prelude::*;

use crate::{
    fee_claim::{ClaimedFees, FeeClaimer},
    payouts::PayoutExecutor,
    stake_registry::InvestorStake,
    state::{DayClose, PageOutcome, Policy, Progress},
};

/// Opens a day and claims the position fees into the treasury.
pub fn open_day_and_claim<C: FeeClaimer>(
    progress: &mut Progress,
    now: i64,
    total_locked: u64,
    claimer: &mut C,
) -> Result<ClaimedFees> {
    let mut staged = progress.clone();
    staged.open_day(now, total_locked)?;

    let claimed = claimer.claim()?;
    staged.record_claim(claimed.quote, claimed.base)?;

    *progress = staged;
    Ok(claimed)
}

/// Pays one page of investors.
pub fn settle_page<P: PayoutExecutor>(
    policy: &Policy,
    progress: &mut Progress,
    page_index: u32,
    investors: &[InvestorStake],
    executor: &mut P,
) -> Result<PageOutcome> {
    let mut staged = progress.clone();
    let outcome = staged.process_page(policy, page_index, investors)?;

    for payout in &outcome.payouts {
        executor.pay(&payout.destination, payout.amount)?;
    }

    *progress = staged;
    Ok(outcome)
}

/// Closes the day, paying the residual to the creator's quote account.
pub fn settle_close<P: PayoutExecutor>(
    policy: &Policy,
    progress: &mut Progress,
    now: i64,
    executor: &mut P,
) -> Result<DayClose> {
    let mut staged = progress.clone();
    let close = staged.close_day(policy, now)?;

    if close.creator_payout > 0 {
        executor.pay(&policy.creator_quote_ata, close.creator_payout)?;
    }

    *progress = staged;
    Ok(close)
}
