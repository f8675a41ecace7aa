use anchor_lang::prelude::*;

/// PDA seeds
pub const VAULT_SEED: &[u8] = b"vault";
/// Owner PDA of the fee position and both treasuries: [VAULT_SEED, vault, INVESTOR_FEE_POSITION_OWNER_SEED]
pub const INVESTOR_FEE_POSITION_OWNER_SEED: &[u8] = b"investor_fee_pos_owner";
pub const POLICY_SEED: &[u8] = b"policy";
pub const PROGRESS_SEED: &[u8] = b"progress";

/// Time constants
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Distribution constants
pub const MAX_INVESTORS_PER_PAGE: usize = 64;
pub const MAX_BPS: u16 = 10_000;
pub const BPS_DENOMINATOR: u128 = MAX_BPS as u128;

/// Fixed-point scale for per-investor stake weights.
pub const WEIGHT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Stored in `Policy::daily_cap` when the policy has no daily cap.
pub const NO_DAILY_CAP: u64 = u64::MAX;

/// Meteora DLMM V2 Program ID (mainnet)
pub const DLMM_PROGRAM_ID: Pubkey = solana_program::pubkey!("LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo");

/// Account discriminators of the external stake registry.
pub const REGISTRY_SUMMARY_DISCRIMINATOR: [u8; 8] = *b"stkrsumm";
pub const STAKE_ENTRY_DISCRIMINATOR: [u8; 8] = *b"stkentry";
