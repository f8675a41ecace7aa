use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, WEIGHT_SCALE},
    errors::FeeRouterError,
};

/// floor(a * b / denominator), failing instead of wrapping.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator != 0, FeeRouterError::ArithmeticOverflow);
    let product = a
        .checked_mul(b)
        .ok_or(FeeRouterError::ArithmeticOverflow)?;
    Ok(product
        .checked_div(denominator)
        .ok_or(FeeRouterError::ArithmeticOverflow)?)
}

pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(FeeRouterError::ArithmeticOverflow))
}

/// Share of Y0 still locked, in bps, clamped to 10000.
pub fn locked_fraction_bps(total_locked: u64, y0: u64) -> Result<u16> {
    require!(y0 > 0, FeeRouterError::InvalidParameter);
    let fraction = mul_div_floor(total_locked as u128, BPS_DENOMINATOR, y0 as u128)?;
    Ok(fraction.min(BPS_DENOMINATOR) as u16)
}

/// Investor entitlement in bps: shrinks with the locked fraction, never above `share_bps`.
pub fn eligible_bps(investor_fee_share_bps: u16, total_locked: u64, y0: u64) -> Result<u16> {
    let locked_bps = locked_fraction_bps(total_locked, y0)?;
    Ok(investor_fee_share_bps.min(locked_bps))
}

/// The cap bounds the day's pool before it is split.
pub fn distributable_pool(claimed_for_day: u64, daily_cap: u64) -> u64 {
    claimed_for_day.min(daily_cap)
}

pub fn investor_pool(distributable_pool: u64, eligible_bps: u16) -> Result<u64> {
    to_u64(mul_div_floor(
        distributable_pool as u128,
        eligible_bps as u128,
        BPS_DENOMINATOR,
    )?)
}

/// Stake weight scaled by `WEIGHT_SCALE`. Zero when nothing is locked.
pub fn stake_weight(locked_amount: u64, total_locked: u64) -> Result<u128> {
    if total_locked == 0 {
        return Ok(0);
    }
    mul_div_floor(locked_amount as u128, WEIGHT_SCALE, total_locked as u128)
}

pub fn weighted_payout(investor_pool: u64, weight: u128) -> Result<u64> {
    to_u64(mul_div_floor(investor_pool as u128, weight, WEIGHT_SCALE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_DAILY_CAP;
    use anchor_lang::error::Error;
    use proptest::prelude::*;

    #[test]
    fn test_mul_div_floor_rounds_down() {
        assert_eq!(mul_div_floor(100, 33, 100).unwrap(), 33);
        assert_eq!(mul_div_floor(7, 1, 2).unwrap(), 3);
        assert_eq!(mul_div_floor(0, 100, 10).unwrap(), 0);
    }

    #[test]
    fn test_mul_div_floor_overflow_and_zero_denominator() {
        let overflow: Error = FeeRouterError::ArithmeticOverflow.into();
        assert_eq!(mul_div_floor(u128::MAX, 2, 1).unwrap_err(), overflow);
        assert_eq!(mul_div_floor(1, 1, 0).unwrap_err(), overflow);
        assert_eq!(to_u64(u64::MAX as u128 + 1).unwrap_err(), overflow);
        assert_eq!(to_u64(u64::MAX as u128).unwrap(), u64::MAX);
    }

    #[test]
    fn test_example_a_partial_lock() {
        let y0 = 1_000_000_000_000;
        let total_locked = 250_000_000_000;
        assert_eq!(locked_fraction_bps(total_locked, y0).unwrap(), 2_500);

        let eligible = eligible_bps(5_000, total_locked, y0).unwrap();
        assert_eq!(eligible, 2_500);

        let pool = distributable_pool(10_000_000_000, NO_DAILY_CAP);
        assert_eq!(investor_pool(pool, eligible).unwrap(), 2_500_000_000);
    }

    #[test]
    fn test_example_b_cap_boundary() {
        let claimed = 200_000_000_000;
        let cap = 100_000_000_000;

        // Uncapped intended investor share lands exactly on the cap.
        let uncapped = investor_pool(distributable_pool(claimed, NO_DAILY_CAP), 5_000).unwrap();
        assert_eq!(uncapped, cap);

        let pool = distributable_pool(claimed, cap);
        assert_eq!(pool, cap);
        assert_eq!(claimed - pool, 100_000_000_000);
        assert_eq!(investor_pool(pool, 5_000).unwrap(), 50_000_000_000);
    }

    #[test]
    fn test_example_c_nothing_locked() {
        let eligible = eligible_bps(5_000, 0, 1_000_000).unwrap();
        assert_eq!(eligible, 0);
        assert_eq!(investor_pool(1_000_000_000, eligible).unwrap(), 0);
        assert_eq!(stake_weight(0, 0).unwrap(), 0);
    }

    #[test]
    fn test_locked_fraction_clamps_above_y0() {
        assert_eq!(locked_fraction_bps(3_000, 1_000).unwrap(), 10_000);
        assert_eq!(eligible_bps(7_500, 3_000, 1_000).unwrap(), 7_500);
    }

    #[test]
    fn test_zero_y0_rejected() {
        let invalid: Error = FeeRouterError::InvalidParameter.into();
        assert_eq!(locked_fraction_bps(10, 0).unwrap_err(), invalid);
    }

    #[test]
    fn test_weights_split_pool_pro_rata() {
        let total = 10_000_000_000u64;
        let pool = 1_000_000_000u64;
        let payouts: Vec<u64> = [4_000_000_000u64, 3_000_000_000, 2_000_000_000, 1_000_000_000]
            .iter()
            .map(|locked| weighted_payout(pool, stake_weight(*locked, total).unwrap()).unwrap())
            .collect();
        assert_eq!(payouts, vec![400_000_000, 300_000_000, 200_000_000, 100_000_000]);
    }

    #[test]
    fn test_thirds_floor_leaves_remainder() {
        let weight = stake_weight(1, 3).unwrap();
        let payout = weighted_payout(100, weight).unwrap();
        assert_eq!(payout, 33);
        assert!(payout * 3 <= 100);
    }

    proptest! {
        #[test]
        fn eligible_bps_stays_within_share(
            share_bps in 0u16..=10_000,
            y0 in 1u64..=u64::MAX,
            total_locked in any::<u64>(),
        ) {
            let eligible = eligible_bps(share_bps, total_locked, y0).unwrap();
            prop_assert!(eligible <= share_bps);
            if total_locked == 0 {
                prop_assert_eq!(eligible, 0);
            }
        }

        #[test]
        fn page_payouts_never_exceed_pool(
            pool in any::<u64>(),
            stakes in proptest::collection::vec(0u64..=1_000_000_000_000, 1..32),
        ) {
            let total: u64 = stakes.iter().sum();
            let mut paid: u128 = 0;
            for locked in &stakes {
                let weight = stake_weight(*locked, total).unwrap();
                paid += weighted_payout(pool, weight).unwrap() as u128;
            }
            prop_assert!(paid <= pool as u128);
        }
    }
}
