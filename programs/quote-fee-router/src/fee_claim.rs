use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};
use anchor_spl::token::TokenAccount;

use crate::errors::FeeRouterError;

/// Amounts observed by a single claim against the fee position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimedFees {
    pub quote: u64,
    pub base: u64,
}

/// Source of the day's fees. `base` must come back zero for the claim to be accepted.
pub trait FeeClaimer {
    fn claim(&mut self) -> Result<ClaimedFees>;
}

/// Anchor sighash of the DLMM position fee claim instruction.
pub fn claim_fee_discriminator() -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(b"global:claim_fee").to_bytes()[..8]);
    discriminator
}

pub fn claim_fee_instruction(
    dlmm_program: &Pubkey,
    position: &Pubkey,
    position_owner: &Pubkey,
    treasury_quote: &Pubkey,
    treasury_base: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *dlmm_program,
        accounts: vec![
            AccountMeta::new(*position, false),
            AccountMeta::new_readonly(*position_owner, true),
            AccountMeta::new(*treasury_quote, false),
            AccountMeta::new(*treasury_base, false),
            AccountMeta::new_readonly(*token_program, false),
        ],
        data: claim_fee_discriminator().to_vec(),
    }
}

pub fn balance_delta(before: u64, after: u64) -> Result<u64> {
    Ok(after
        .checked_sub(before)
        .ok_or(FeeRouterError::InvariantViolation)?)
}

/// Quote and base treasury balances at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreasuryBalances {
    pub quote: u64,
    pub base: u64,
}

impl TreasuryBalances {
    /// Fees that arrived since `before`. Tokens already held are not attributed to the claim.
    pub fn claimed_since(&self, before: &TreasuryBalances) -> Result<ClaimedFees> {
        Ok(ClaimedFees {
            quote: balance_delta(before.quote, self.quote)?,
            base: balance_delta(before.base, self.base)?,
        })
    }
}

/// Claims from the honorary position into the program treasuries, signed by the owner PDA.
pub struct PositionFeeClaim<'a, 'info> {
    pub dlmm_program: AccountInfo<'info>,
    pub fee_position: AccountInfo<'info>,
    pub position_owner: AccountInfo<'info>,
    pub treasury_quote: &'a mut Account<'info, TokenAccount>,
    pub treasury_base: &'a mut Account<'info, TokenAccount>,
    pub token_program: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl FeeClaimer for PositionFeeClaim<'_, '_> {
    fn claim(&mut self) -> Result<ClaimedFees> {
        let before = self.balances();

        let instruction = claim_fee_instruction(
            self.dlmm_program.key,
            self.fee_position.key,
            self.position_owner.key,
            &self.treasury_quote.key(),
            &self.treasury_base.key(),
            self.token_program.key,
        );
        invoke_signed(
            &instruction,
            &[
                self.fee_position.clone(),
                self.position_owner.clone(),
                self.treasury_quote.to_account_info(),
                self.treasury_base.to_account_info(),
                self.token_program.clone(),
                self.dlmm_program.clone(),
            ],
            self.signer_seeds,
        )?;

        self.treasury_quote.reload()?;
        self.treasury_base.reload()?;

        self.balances().claimed_since(&before)
    }
}

impl PositionFeeClaim<'_, '_> {
    fn balances(&self) -> TreasuryBalances {
        TreasuryBalances {
            quote: self.treasury_quote.amount,
            base: self.treasury_base.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_instruction_layout() {
        let program = Pubkey::new_unique();
        let position = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let base = Pubkey::new_unique();
        let token_program = anchor_spl::token::ID;

        let ix = claim_fee_instruction(&program, &position, &owner, &quote, &base, &token_program);
        assert_eq!(ix.program_id, program);
        assert_eq!(ix.data, claim_fee_discriminator().to_vec());
        assert_eq!(ix.accounts.len(), 5);

        // Only the owner PDA signs; both treasuries are writable.
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts.iter().filter(|m| m.is_signer).count(), 1);
        assert_eq!(ix.accounts[2].pubkey, quote);
        assert!(ix.accounts[2].is_writable);
        assert_eq!(ix.accounts[3].pubkey, base);
        assert!(ix.accounts[3].is_writable);
        assert!(!ix.accounts[4].is_writable);
    }

    #[test]
    fn test_discriminator_is_stable() {
        assert_eq!(claim_fee_discriminator(), claim_fee_discriminator());
        assert_ne!(claim_fee_discriminator(), [0u8; 8]);
    }

    #[test]
    fn test_balance_delta() {
        assert_eq!(balance_delta(100, 250).unwrap(), 150);
        assert_eq!(balance_delta(7, 7).unwrap(), 0);
        let invariant: anchor_lang::error::Error = FeeRouterError::InvariantViolation.into();
        assert_eq!(balance_delta(10, 9).unwrap_err(), invariant);
    }

    #[test]
    fn test_tokens_held_before_claim_are_not_claimed() {
        // One base unit sent to the treasury ahead of time.
        let before = TreasuryBalances { quote: 40, base: 1 };

        let after = TreasuryBalances { quote: 1_040, base: 1 };
        assert_eq!(
            after.claimed_since(&before).unwrap(),
            ClaimedFees { quote: 1_000, base: 0 }
        );

        let after = TreasuryBalances { quote: 1_040, base: 6 };
        assert_eq!(after.claimed_since(&before).unwrap().base, 5);
    }
}
