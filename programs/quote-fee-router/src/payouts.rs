use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::FeeRouterError;

/// Applies quote transfers out of the treasury.
pub trait PayoutExecutor {
    fn pay(&mut self, destination: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL transfers from the quote treasury, signed by the fee position owner PDA.
pub struct TreasuryPayouts<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub treasury: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    /// Token accounts a payout may target
    pub destinations: &'a [AccountInfo<'info>],
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl PayoutExecutor for TreasuryPayouts<'_, '_> {
    fn pay(&mut self, destination: &Pubkey, amount: u64) -> Result<()> {
        let to = self
            .destinations
            .iter()
            .find(|info| info.key == destination)
            .ok_or(FeeRouterError::InvalidInvestorAccount)?;

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.treasury.clone(),
                    to: to.clone(),
                    authority: self.authority.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )
        .map_err(|e| {
            msg!("transfer of {} to {} failed: {}", amount, destination, e);
            error!(FeeRouterError::TransferFailed)
        })
    }
}
