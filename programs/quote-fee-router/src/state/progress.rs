use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_INVESTORS_PER_PAGE, SECONDS_PER_DAY},
    errors::FeeRouterError,
    math,
    stake_registry::InvestorStake,
    state::Policy,
};

/// Per-vault day state. `current_day_start_ts == 0` means no day is open.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Associated vault
    pub vault: Pubkey,

    /// Close time of the last completed distribution day
    pub last_distribution_ts: i64,

    /// Open time of the current day, 0 when closed
    pub current_day_start_ts: i64,

    /// Registry stake total captured at day open
    pub total_locked_for_day: u64,

    /// Stake consumed by committed pages
    pub locked_seen_for_day: u64,

    /// Quote fees claimed for the current day
    pub claimed_for_day: u64,

    /// Paid to investors so far today
    pub distributed_for_day: u64,

    /// Carry handed over by the previous day, routed to the creator at close
    pub carry_in_for_day: u64,

    /// Dust deferred today; becomes the next day's carry
    pub carry_over: u64,

    /// Next expected page index
    pub cursor: u32,

    /// Highest investor key paged today; pages must list investors in strictly increasing key order
    pub last_investor: Pubkey,

    /// Number of days opened
    pub day_count: u64,

    /// Lifetime accounting
    pub total_claimed: u64,
    pub total_to_investors: u64,
    pub total_to_creator: u64,

    pub initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

/// One investor transfer produced by a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub investor: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub locked_amount: u64,
}

/// Result of a committed page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageOutcome {
    pub page_index: u32,
    pub payouts: Vec<Payout>,
    pub distributed: u64,
    pub dust: u64,
    pub locked: u64,
    pub investor_count: u32,
}

/// Result of closing a day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayClose {
    pub day_start_ts: i64,
    /// capped pool + carry in - investor payouts - carry out
    pub residual: u64,
    /// Claimed fees above the daily cap
    pub cap_overflow: u64,
    /// residual + cap_overflow
    pub creator_payout: u64,
    pub carry_in: u64,
    pub carry_out: u64,
    pub distributed_to_investors: u64,
    pub claimed: u64,
}

/// Progress state returned to callers after each step.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub day_open: bool,
    pub last_distribution_ts: i64,
    pub current_day_start_ts: i64,
    pub total_locked_for_day: u64,
    pub locked_seen_for_day: u64,
    pub claimed_for_day: u64,
    pub distributed_for_day: u64,
    pub carry_in_for_day: u64,
    pub carry_over: u64,
    pub cursor: u32,
    pub day_count: u64,
}

impl Progress {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        8 + // last_distribution_ts
        8 + // current_day_start_ts
        8 + // total_locked_for_day
        8 + // locked_seen_for_day
        8 + // claimed_for_day
        8 + // distributed_for_day
        8 + // carry_in_for_day
        8 + // carry_over
        4 + // cursor
        32 + // last_investor
        8 + // day_count
        8 + // total_claimed
        8 + // total_to_investors
        8 + // total_to_creator
        1 + // initialized
        1 + // bump
        32; // _reserved

    pub fn initialize(&mut self, vault: Pubkey, bump: u8) -> Result<()> {
        require!(!self.initialized, FeeRouterError::AlreadyInitialized);
        *self = Progress {
            vault,
            initialized: true,
            bump,
            ..Default::default()
        };
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.current_day_start_ts != 0
    }

    /// Earliest time the next day may open, None before the first distribution.
    pub fn next_open_ts(&self) -> Option<i64> {
        (self.last_distribution_ts != 0)
            .then(|| self.last_distribution_ts.saturating_add(SECONDS_PER_DAY))
    }

    pub fn open_day(&mut self, now: i64, total_locked: u64) -> Result<()> {
        require!(!self.is_open(), FeeRouterError::DayAlreadyOpen);
        require_gt!(now, 0, FeeRouterError::InvalidParameter);
        if let Some(opens_at) = self.next_open_ts() {
            require_gte!(now, opens_at, FeeRouterError::GateNotElapsed);
        }
        let day_count = self
            .day_count
            .checked_add(1)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;

        self.current_day_start_ts = now;
        self.total_locked_for_day = total_locked;
        self.locked_seen_for_day = 0;
        self.claimed_for_day = 0;
        self.distributed_for_day = 0;
        self.carry_in_for_day = self.carry_over;
        self.carry_over = 0;
        self.cursor = 0;
        self.last_investor = Pubkey::default();
        self.day_count = day_count;
        Ok(())
    }

    /// Adds a claim to the open day. Any base amount aborts the step.
    pub fn record_claim(&mut self, quote_amount: u64, base_amount: u64) -> Result<()> {
        require!(self.is_open(), FeeRouterError::DayNotOpen);
        require_eq!(self.cursor, 0, FeeRouterError::ClaimWindowClosed);
        require_eq!(base_amount, 0, FeeRouterError::BaseFeePresent);

        let claimed_for_day = self
            .claimed_for_day
            .checked_add(quote_amount)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let total_claimed = self
            .total_claimed
            .checked_add(quote_amount)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;

        self.claimed_for_day = claimed_for_day;
        self.total_claimed = total_claimed;
        Ok(())
    }

    /// Computes payouts for page `page_index` and advances the cursor.
    /// Nothing is written unless every check and computation succeeds.
    pub fn process_page(
        &mut self,
        policy: &Policy,
        page_index: u32,
        investors: &[InvestorStake],
    ) -> Result<PageOutcome> {
        require!(self.is_open(), FeeRouterError::DayNotOpen);
        require_eq!(page_index, self.cursor, FeeRouterError::OutOfOrderPage);
        require!(
            !investors.is_empty() && investors.len() <= MAX_INVESTORS_PER_PAGE,
            FeeRouterError::InvalidParameter
        );

        let page_locked = investors
            .iter()
            .try_fold(0u64, |acc, stake| acc.checked_add(stake.locked_amount))
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let locked_seen = self
            .locked_seen_for_day
            .checked_add(page_locked)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        require_gte!(
            self.total_locked_for_day,
            locked_seen,
            FeeRouterError::StakeMismatch
        );

        let investor_pool =
            policy.investor_pool_for_day(self.claimed_for_day, self.total_locked_for_day)?;

        let mut last_investor = self.last_investor;
        let mut outcome = PageOutcome {
            page_index,
            locked: page_locked,
            investor_count: investors.len() as u32,
            ..Default::default()
        };
        for stake in investors {
            // Ordering rules out an investor appearing twice in a day.
            require!(stake.investor > last_investor, FeeRouterError::StakeMismatch);
            last_investor = stake.investor;

            let weight = math::stake_weight(stake.locked_amount, self.total_locked_for_day)?;
            let amount = math::weighted_payout(investor_pool, weight)?;

            if amount == 0 || amount < policy.min_payout {
                outcome.dust = outcome
                    .dust
                    .checked_add(amount)
                    .ok_or(FeeRouterError::ArithmeticOverflow)?;
                continue;
            }

            outcome.distributed = outcome
                .distributed
                .checked_add(amount)
                .ok_or(FeeRouterError::ArithmeticOverflow)?;
            outcome.payouts.push(Payout {
                investor: stake.investor,
                destination: stake.destination,
                amount,
                locked_amount: stake.locked_amount,
            });
        }

        let distributed_for_day = self
            .distributed_for_day
            .checked_add(outcome.distributed)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let carry_over = self
            .carry_over
            .checked_add(outcome.dust)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let total_to_investors = self
            .total_to_investors
            .checked_add(outcome.distributed)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let cursor = self
            .cursor
            .checked_add(1)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;

        // Paid plus deferred can never exceed the investor pool.
        let committed = distributed_for_day
            .checked_add(carry_over)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        require_gte!(investor_pool, committed, FeeRouterError::InvariantViolation);

        self.distributed_for_day = distributed_for_day;
        self.carry_over = carry_over;
        self.total_to_investors = total_to_investors;
        self.locked_seen_for_day = locked_seen;
        self.last_investor = last_investor;
        self.cursor = cursor;
        Ok(outcome)
    }

    /// Settles the creator residual and returns to `Closed`.
    pub fn close_day(&mut self, policy: &Policy, now: i64) -> Result<DayClose> {
        require!(self.is_open(), FeeRouterError::DayNotOpen);
        require_gte!(now, self.current_day_start_ts, FeeRouterError::InvalidParameter);
        require_eq!(
            self.locked_seen_for_day,
            self.total_locked_for_day,
            FeeRouterError::PagesRemaining
        );

        let pool = policy.distributable_pool(self.claimed_for_day);
        let residual = pool
            .checked_add(self.carry_in_for_day)
            .ok_or(FeeRouterError::ArithmeticOverflow)?
            .checked_sub(self.distributed_for_day)
            .and_then(|rest| rest.checked_sub(self.carry_over))
            .ok_or(FeeRouterError::InvariantViolation)?;
        let cap_overflow = self
            .claimed_for_day
            .checked_sub(pool)
            .ok_or(FeeRouterError::InvariantViolation)?;
        let creator_payout = residual
            .checked_add(cap_overflow)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;
        let total_to_creator = self
            .total_to_creator
            .checked_add(creator_payout)
            .ok_or(FeeRouterError::ArithmeticOverflow)?;

        let close = DayClose {
            day_start_ts: self.current_day_start_ts,
            residual,
            cap_overflow,
            creator_payout,
            carry_in: self.carry_in_for_day,
            carry_out: self.carry_over,
            distributed_to_investors: self.distributed_for_day,
            claimed: self.claimed_for_day,
        };

        self.total_to_creator = total_to_creator;
        self.carry_in_for_day = 0;
        self.cursor = 0;
        self.current_day_start_ts = 0;
        self.last_distribution_ts = now;
        Ok(close)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            day_open: self.is_open(),
            last_distribution_ts: self.last_distribution_ts,
            current_day_start_ts: self.current_day_start_ts,
            total_locked_for_day: self.total_locked_for_day,
            locked_seen_for_day: self.locked_seen_for_day,
            claimed_for_day: self.claimed_for_day,
            distributed_for_day: self.distributed_for_day,
            carry_in_for_day: self.carry_in_for_day,
            carry_over: self.carry_over,
            cursor: self.cursor,
            day_count: self.day_count,
        }
    }
}
