use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address,
    token::{self, TokenAccount},
};
use bytemuck::{Pod, Zeroable};

use crate::{
    constants::{REGISTRY_SUMMARY_DISCRIMINATOR, STAKE_ENTRY_DISCRIMINATOR},
    errors::FeeRouterError,
    state::Policy,
};

/// One investor of a page, as handed to the distribution engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvestorStake {
    pub investor: Pubkey,
    pub locked_amount: u64,
    pub destination: Pubkey,
}

/// Registry account holding the vault's locked total for the day.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct RegistrySummary {
    pub discriminator: [u8; 8],
    pub vault: Pubkey,
    pub total_locked: u64,
}

/// Registry account holding one investor's locked stake.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StakeEntry {
    pub discriminator: [u8; 8],
    pub vault: Pubkey,
    pub investor: Pubkey,
    pub locked_amount: u64,
}

fn read_pod<T: Pod>(data: &[u8]) -> Result<T> {
    let bytes = data
        .get(..std::mem::size_of::<T>())
        .ok_or(FeeRouterError::InvalidRegistryAccount)?;
    bytemuck::try_pod_read_unaligned(bytes)
        .map_err(|_| error!(FeeRouterError::InvalidRegistryAccount))
}

pub fn parse_registry_summary(data: &[u8], vault: &Pubkey) -> Result<RegistrySummary> {
    let summary: RegistrySummary = read_pod(data)?;
    require!(
        summary.discriminator == REGISTRY_SUMMARY_DISCRIMINATOR,
        FeeRouterError::InvalidRegistryAccount
    );
    require_keys_eq!(summary.vault, *vault, FeeRouterError::InvalidRegistryAccount);
    Ok(summary)
}

pub fn parse_stake_entry(data: &[u8], vault: &Pubkey) -> Result<StakeEntry> {
    let entry: StakeEntry = read_pod(data)?;
    require!(
        entry.discriminator == STAKE_ENTRY_DISCRIMINATOR,
        FeeRouterError::InvalidRegistryAccount
    );
    require_keys_eq!(entry.vault, *vault, FeeRouterError::InvalidRegistryAccount);
    Ok(entry)
}

/// Payouts only go to the investor's canonical quote ATA.
pub fn validate_destination(
    investor: &Pubkey,
    destination: &Pubkey,
    destination_mint: &Pubkey,
    destination_owner: &Pubkey,
    quote_mint: &Pubkey,
) -> Result<()> {
    require_keys_eq!(*destination_mint, *quote_mint, FeeRouterError::InvalidInvestorAccount);
    require_keys_eq!(*destination_owner, *investor, FeeRouterError::InvalidInvestorAccount);
    require_keys_eq!(
        *destination,
        get_associated_token_address(investor, quote_mint),
        FeeRouterError::InvalidInvestorAccount
    );
    Ok(())
}

/// Locked total for the day, read once at day open.
pub fn read_total_locked(summary: &AccountInfo, policy: &Policy) -> Result<u64> {
    require_keys_eq!(
        *summary.owner,
        policy.stake_registry,
        FeeRouterError::InvalidRegistryAccount
    );
    let data = summary.try_borrow_data()?;
    Ok(parse_registry_summary(&data, &policy.vault)?.total_locked)
}

/// Remaining accounts come in pairs: [stake_entry, destination_token_account].
pub fn read_investor_page(accounts: &[AccountInfo], policy: &Policy) -> Result<Vec<InvestorStake>> {
    require!(
        !accounts.is_empty() && accounts.len() % 2 == 0,
        FeeRouterError::InvalidInvestorAccount
    );
    accounts
        .chunks_exact(2)
        .map(|pair| read_investor(&pair[0], &pair[1], policy))
        .collect()
}

fn read_investor(
    stake_info: &AccountInfo,
    destination_info: &AccountInfo,
    policy: &Policy,
) -> Result<InvestorStake> {
    require_keys_eq!(
        *stake_info.owner,
        policy.stake_registry,
        FeeRouterError::InvalidRegistryAccount
    );
    let entry = {
        let data = stake_info.try_borrow_data()?;
        parse_stake_entry(&data, &policy.vault)?
    };

    require_keys_eq!(
        *destination_info.owner,
        token::ID,
        FeeRouterError::InvalidInvestorAccount
    );
    let destination = {
        let data = destination_info.try_borrow_data()?;
        TokenAccount::try_deserialize(&mut &data[..])
            .map_err(|_| error!(FeeRouterError::InvalidInvestorAccount))?
    };
    validate_destination(
        &entry.investor,
        destination_info.key,
        &destination.mint,
        &destination.owner,
        &policy.quote_mint,
    )?;

    Ok(InvestorStake {
        investor: entry.investor,
        locked_amount: entry.locked_amount,
        destination: destination_info.key(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn entry_bytes(discriminator: [u8; 8], vault: Pubkey, investor: Pubkey, locked: u64) -> Vec<u8> {
        let entry = StakeEntry {
            discriminator,
            vault,
            investor,
            locked_amount: locked,
        };
        bytemuck::bytes_of(&entry).to_vec()
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(std::mem::size_of::<RegistrySummary>(), 48);
        assert_eq!(std::mem::size_of::<StakeEntry>(), 80);
    }

    #[test]
    fn test_parse_stake_entry() {
        let vault = Pubkey::new_unique();
        let investor = Pubkey::new_unique();
        let mut data = entry_bytes(STAKE_ENTRY_DISCRIMINATOR, vault, investor, 4_000_000_000);
        // Trailing bytes beyond the known layout are ignored.
        data.extend_from_slice(&[0u8; 16]);

        let entry = parse_stake_entry(&data, &vault).unwrap();
        assert_eq!(entry.investor, investor);
        assert_eq!(entry.locked_amount, 4_000_000_000);
    }

    #[test]
    fn test_parse_rejects_foreign_accounts() {
        let invalid: Error = FeeRouterError::InvalidRegistryAccount.into();
        let vault = Pubkey::new_unique();
        let investor = Pubkey::new_unique();

        let wrong_kind = entry_bytes(REGISTRY_SUMMARY_DISCRIMINATOR, vault, investor, 1);
        assert_eq!(parse_stake_entry(&wrong_kind, &vault).unwrap_err(), invalid);

        let other_vault = entry_bytes(STAKE_ENTRY_DISCRIMINATOR, Pubkey::new_unique(), investor, 1);
        assert_eq!(parse_stake_entry(&other_vault, &vault).unwrap_err(), invalid);

        let short = entry_bytes(STAKE_ENTRY_DISCRIMINATOR, vault, investor, 1);
        assert_eq!(parse_stake_entry(&short[..40], &vault).unwrap_err(), invalid);
    }

    #[test]
    fn test_parse_registry_summary() {
        let vault = Pubkey::new_unique();
        let summary = RegistrySummary {
            discriminator: REGISTRY_SUMMARY_DISCRIMINATOR,
            vault,
            total_locked: 250_000_000_000,
        };
        let data = bytemuck::bytes_of(&summary).to_vec();
        assert_eq!(parse_registry_summary(&data, &vault).unwrap().total_locked, 250_000_000_000);

        let other = Pubkey::new_unique();
        assert!(parse_registry_summary(&data, &other).is_err());
    }

    #[test]
    fn test_destination_must_be_investor_quote_ata() {
        let invalid: Error = FeeRouterError::InvalidInvestorAccount.into();
        let investor = Pubkey::new_unique();
        let quote_mint = Pubkey::new_unique();
        let ata = get_associated_token_address(&investor, &quote_mint);

        assert!(validate_destination(&investor, &ata, &quote_mint, &investor, &quote_mint).is_ok());

        let wrong_mint = Pubkey::new_unique();
        assert_eq!(
            validate_destination(&investor, &ata, &wrong_mint, &investor, &quote_mint).unwrap_err(),
            invalid
        );

        let stranger = Pubkey::new_unique();
        assert_eq!(
            validate_destination(&investor, &ata, &quote_mint, &stranger, &quote_mint).unwrap_err(),
            invalid
        );

        let side_account = Pubkey::new_unique();
        assert_eq!(
            validate_destination(&investor, &side_account, &quote_mint, &investor, &quote_mint)
                .unwrap_err(),
            invalid
        );
    }
}
