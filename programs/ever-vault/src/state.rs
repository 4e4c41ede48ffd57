use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::VaultError;

/// Global vault state tracking principal, deployed capital and shares
///
/// Security considerations:
/// - Authority and fee recipient stored in state (not instruction args)
/// - Total assets and shares tracked for ERC-4626 math
/// - Deployed assets tracked separately so idle liquidity is always known
/// - Bumps stored for efficient PDA signing
/// - 128 bytes padding for future upgrades
#[account]
pub struct VaultState {
    /// Authority that can move vault principal in and out of the lending market
    pub authority: Pubkey,          // 32 bytes

    /// Mint of the underlying asset token (USDC)
    pub asset_mint: Pubkey,         // 32 bytes

    /// Mint of the vault share token
    pub share_mint: Pubkey,         // 32 bytes

    /// Lending-market position token account holding deployed principal.
    /// Its balance is the liquidity the vault can pull back on demand.
    pub market_account: Pubkey,     // 32 bytes

    /// Mint of the secondary reserve asset (WBTC); recorded at construction
    /// for off-chain collaborators, never moved by this program
    pub secondary_reserve_mint: Pubkey, // 32 bytes

    /// Account credited with withdrawal fees
    pub fee_recipient: Pubkey,      // 32 bytes

    /// Withdrawal fee in basis points (0-10000), fixed at construction
    pub withdrawal_fee_bps: u16,    // 2 bytes

    /// Total principal backing shares (idle + deployed)
    pub total_assets: u64,          // 8 bytes

    /// Portion of total_assets currently deployed into the lending market
    pub deployed_assets: u64,       // 8 bytes

    /// Total shares issued to depositors
    pub total_shares: u64,          // 8 bytes

    /// Bump seed for vault state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for share mint PDA
    pub share_bump: u8,             // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,         // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 128],       // 128 bytes
}

/// Resolved amounts for a withdrawal request, computed before any state
/// mutation so a failing request leaves the vault untouched
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalPlan {
    /// Principal value of the redeemed shares at the current exchange rate
    pub gross_amount: u64,

    /// Fee taken from the gross amount, routed to the fee recipient
    pub fee_amount: u64,

    /// Amount paid out to the withdrawing account (gross - fee)
    pub net_amount: u64,

    /// Principal that must be pulled back from the lending market before
    /// the payout can be made; zero when idle liquidity covers the request
    pub divest_amount: u64,
}

impl VaultState {
    /// Calculate shares to mint for a given asset amount
    ///
    /// ERC-4626 formula:
    /// - If first deposit: shares = assets
    /// - Otherwise: shares = assets * totalShares / totalAssets
    ///
    /// Truncates toward zero; residual value stays with the vault.
    /// Security: Uses checked math to prevent overflow
    pub fn calculate_shares(&self, assets: u64) -> Result<u64> {
        // First deposit: 1:1 ratio
        if self.total_shares == 0 || self.total_assets == 0 {
            return Ok(assets);
        }

        // Subsequent deposits: proportional to current ratio
        // shares = assets * total_shares / total_assets
        // Using u128 for intermediate calculation to prevent overflow
        let assets_u128 = assets as u128;
        let total_shares_u128 = self.total_shares as u128;
        let total_assets_u128 = self.total_assets as u128;

        let shares_u128 = assets_u128
            .checked_mul(total_shares_u128)
            .ok_or(error!(VaultError::MathOverflow))?
            .checked_div(total_assets_u128)
            .ok_or(error!(VaultError::DivisionByZero))?;

        u64::try_from(shares_u128).map_err(|_| error!(VaultError::MathOverflow))
    }

    /// Calculate asset value of shares
    ///
    /// ERC-4626 formula: assets = shares * totalAssets / totalShares
    ///
    /// Security: Uses checked math to prevent overflow
    pub fn calculate_assets(&self, shares: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(0);
        }

        let shares_u128 = shares as u128;
        let total_assets_u128 = self.total_assets as u128;
        let total_shares_u128 = self.total_shares as u128;

        let assets_u128 = shares_u128
            .checked_mul(total_assets_u128)
            .ok_or(error!(VaultError::MathOverflow))?
            .checked_div(total_shares_u128)
            .ok_or(error!(VaultError::DivisionByZero))?;

        u64::try_from(assets_u128).map_err(|_| error!(VaultError::MathOverflow))
    }

    /// Calculate the withdrawal fee on a gross amount
    ///
    /// fee = floor(gross * fee_bps / 10000), so fee <= gross holds for any
    /// fee rate up to 10000 bps
    pub fn calculate_fee(&self, gross_amount: u64) -> Result<u64> {
        let fee_u128 = (gross_amount as u128)
            .checked_mul(self.withdrawal_fee_bps as u128)
            .ok_or(error!(VaultError::MathOverflow))?
            / BPS_DENOMINATOR as u128;

        u64::try_from(fee_u128).map_err(|_| error!(VaultError::MathOverflow))
    }

    /// Principal sitting in the vault token account, available without
    /// touching the lending market
    pub fn idle_assets(&self) -> u64 {
        self.total_assets.saturating_sub(self.deployed_assets)
    }

    /// Total principal backing shares - the dashboard's TVL read
    pub fn total_value_locked(&self) -> u64 {
        self.total_assets
    }

    /// Resolve a withdrawal request against current liquidity
    ///
    /// Pure computation: checks the request, prices the shares, computes the
    /// fee split and decides how much must be divested from the lending
    /// market. Fails with InsufficientShares for empty or oversized requests
    /// and LiquidityUnavailable when idle principal plus market liquidity
    /// cannot cover the gross amount. No state is mutated here.
    pub fn plan_withdrawal(
        &self,
        shares: u64,
        idle_balance: u64,
        market_liquidity: u64,
    ) -> Result<WithdrawalPlan> {
        require!(
            shares > 0 && shares <= self.total_shares,
            VaultError::InsufficientShares
        );

        let gross_amount = self.calculate_assets(shares)?;
        let fee_amount = self.calculate_fee(gross_amount)?;
        let net_amount = gross_amount
            .checked_sub(fee_amount)
            .ok_or(error!(VaultError::MathOverflow))?;

        // Gross covers both the payout and the fee transfer
        let divest_amount = gross_amount.saturating_sub(idle_balance);
        require!(
            divest_amount <= market_liquidity,
            VaultError::LiquidityUnavailable
        );

        Ok(WithdrawalPlan {
            gross_amount,
            fee_amount,
            net_amount,
            divest_amount,
        })
    }
}
