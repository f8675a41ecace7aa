use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_BPS, NO_DAILY_CAP},
    errors::FeeRouterError,
    math,
};

/// Creation arguments for a vault's distribution policy.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PolicyParams {
    /// Reference lockable amount (Y0)
    pub y0: u64,
    /// Maximum investor fee share in basis points (<= 10000)
    pub investor_fee_share_bps: u16,
    /// Daily cap on the distributable pool; None means uncapped
    pub daily_cap: Option<u64>,
    /// Minimum payout amount (dust threshold)
    pub min_payout: u64,
    /// Fee-bearing position fees are claimed from
    pub fee_position: Pubkey,
    /// Program owning the stake registry accounts
    pub stake_registry: Pubkey,
}

/// Token accounts and mints a policy is bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyAccounts {
    pub quote_mint: Pubkey,
    pub base_mint: Pubkey,
    pub creator_quote_ata: Pubkey,
    pub treasury_quote: Pubkey,
    pub treasury_base: Pubkey,
}

#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Policy {
    /// Vault this policy belongs to
    pub vault: Pubkey,

    /// Reference lockable amount normalizing the locked fraction (Y0)
    pub y0: u64,

    /// Investor fee share in basis points (max 10000)
    pub investor_fee_share_bps: u16,

    /// Cap on the daily distributable pool, `NO_DAILY_CAP` when uncapped
    pub daily_cap: u64,

    /// Minimum payout amount (dust threshold)
    pub min_payout: u64,

    /// The quote mint (usually USDC)
    pub quote_mint: Pubkey,

    /// Base mint of the pair, only watched for quote-only violations
    pub base_mint: Pubkey,

    /// Creator's quote token account receiving the day residual
    pub creator_quote_ata: Pubkey,

    /// Treasury ATAs for quote and base (base used only for invariant checks)
    pub treasury_quote: Pubkey,
    pub treasury_base: Pubkey,

    /// The honorary fee position
    pub fee_position: Pubkey,

    /// Owner program of registry summary and stake entry accounts
    pub stake_registry: Pubkey,

    pub created_at: i64,

    pub initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl Policy {
    pub const LEN: usize = 8 + // discriminator
        32 + // vault
        8 + // y0
        2 + // investor_fee_share_bps
        8 + // daily_cap
        8 + // min_payout
        32 + // quote_mint
        32 + // base_mint
        32 + // creator_quote_ata
        32 + // treasury_quote
        32 + // treasury_base
        32 + // fee_position
        32 + // stake_registry
        8 + // created_at
        1 + // initialized
        1 + // bump
        32; // _reserved

    pub fn validate_params(params: &PolicyParams) -> Result<()> {
        require!(
            params.investor_fee_share_bps <= MAX_BPS,
            FeeRouterError::InvalidParameter
        );
        require!(params.y0 > 0, FeeRouterError::InvalidParameter);
        Ok(())
    }

    /// One-shot initialization; a policy is never rewritten afterwards.
    pub fn initialize(
        &mut self,
        vault: Pubkey,
        params: &PolicyParams,
        accounts: PolicyAccounts,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(!self.initialized, FeeRouterError::AlreadyInitialized);
        Self::validate_params(params)?;

        self.vault = vault;
        self.y0 = params.y0;
        self.investor_fee_share_bps = params.investor_fee_share_bps;
        self.daily_cap = params.daily_cap.unwrap_or(NO_DAILY_CAP);
        self.min_payout = params.min_payout;
        self.quote_mint = accounts.quote_mint;
        self.base_mint = accounts.base_mint;
        self.creator_quote_ata = accounts.creator_quote_ata;
        self.treasury_quote = accounts.treasury_quote;
        self.treasury_base = accounts.treasury_base;
        self.fee_position = params.fee_position;
        self.stake_registry = params.stake_registry;
        self.created_at = now;
        self.initialized = true;
        self.bump = bump;
        Ok(())
    }

    pub fn daily_cap(&self) -> Option<u64> {
        (self.daily_cap != NO_DAILY_CAP).then_some(self.daily_cap)
    }

    pub fn distributable_pool(&self, claimed_for_day: u64) -> u64 {
        math::distributable_pool(claimed_for_day, self.daily_cap)
    }

    pub fn eligible_bps(&self, total_locked: u64) -> Result<u16> {
        math::eligible_bps(self.investor_fee_share_bps, total_locked, self.y0)
    }

    /// Investor share of the capped pool for a day with `total_locked` stake.
    pub fn investor_pool_for_day(&self, claimed_for_day: u64, total_locked: u64) -> Result<u64> {
        let eligible = self.eligible_bps(total_locked)?;
        math::investor_pool(self.distributable_pool(claimed_for_day), eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn params(y0: u64, share_bps: u16, daily_cap: Option<u64>) -> PolicyParams {
        PolicyParams {
            y0,
            investor_fee_share_bps: share_bps,
            daily_cap,
            min_payout: 1_000,
            fee_position: Pubkey::new_unique(),
            stake_registry: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_initialize_sets_fields() {
        let vault = Pubkey::new_unique();
        let accounts = PolicyAccounts {
            quote_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        let p = params(10_000_000_000, 5_000, Some(1_000_000_000));

        let mut policy = Policy::default();
        policy.initialize(vault, &p, accounts, 1_700_000_000, 254).unwrap();

        assert!(policy.initialized);
        assert_eq!(policy.vault, vault);
        assert_eq!(policy.y0, 10_000_000_000);
        assert_eq!(policy.daily_cap(), Some(1_000_000_000));
        assert_eq!(policy.quote_mint, accounts.quote_mint);
        assert_eq!(policy.fee_position, p.fee_position);
        assert_eq!(policy.bump, 254);
    }

    #[test]
    fn test_uncapped_policy_uses_sentinel() {
        let mut policy = Policy::default();
        policy
            .initialize(Pubkey::new_unique(), &params(1, 0, None), PolicyAccounts::default(), 1, 0)
            .unwrap();
        assert_eq!(policy.daily_cap, NO_DAILY_CAP);
        assert_eq!(policy.daily_cap(), None);
        assert_eq!(policy.distributable_pool(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_second_initialize_rejected() {
        let mut policy = Policy::default();
        let vault = Pubkey::new_unique();
        policy
            .initialize(vault, &params(100, 100, None), PolicyAccounts::default(), 1, 0)
            .unwrap();
        let before = policy.clone();

        let err = policy
            .initialize(vault, &params(200, 200, None), PolicyAccounts::default(), 2, 0)
            .unwrap_err();
        let expected: Error = FeeRouterError::AlreadyInitialized.into();
        assert_eq!(err, expected);
        assert_eq!(policy, before);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let invalid: Error = FeeRouterError::InvalidParameter.into();

        let mut policy = Policy::default();
        let err = policy
            .initialize(Pubkey::new_unique(), &params(100, 10_001, None), PolicyAccounts::default(), 1, 0)
            .unwrap_err();
        assert_eq!(err, invalid);
        assert!(!policy.initialized);

        let err = policy
            .initialize(Pubkey::new_unique(), &params(0, 5_000, None), PolicyAccounts::default(), 1, 0)
            .unwrap_err();
        assert_eq!(err, invalid);

        // Share at the bound is accepted.
        assert!(Policy::validate_params(&params(1, 10_000, None)).is_ok());
    }

    #[test]
    fn test_investor_pool_for_day_applies_cap_then_share() {
        let mut policy = Policy::default();
        policy
            .initialize(
                Pubkey::new_unique(),
                &params(1_000_000, 5_000, Some(100_000)),
                PolicyAccounts::default(),
                1,
                0,
            )
            .unwrap();

        // Fully locked: 50% of the capped pool.
        assert_eq!(policy.investor_pool_for_day(1_000_000, 1_000_000).unwrap(), 50_000);
        // 10% locked: 10% of the capped pool.
        assert_eq!(policy.investor_pool_for_day(1_000_000, 100_000).unwrap(), 10_000);
        // Under the cap the claimed amount is the pool.
        assert_eq!(policy.investor_pool_for_day(40_000, 1_000_000).unwrap(), 20_000);
    }
}
