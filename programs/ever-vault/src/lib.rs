// EverVault - pooled USDC vault with lending-market yield routing
// Security: Follows Solana security best practices with comprehensive validation
// Architecture: Single market position fixed at construction; no runtime governance

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("EVRg1jat9g2AFcczLGNdpaMtcz84BDj2tdATiLYPQgCd");

#[program]
pub mod ever_vault {
    use super::*;

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Validates authority is signer
    /// - Rejects fee rates above 10000 bps
    /// - Initializes vault state with proper PDAs
    /// - Creates share mint with vault as mint authority, decimals matching
    ///   the asset mint
    pub fn initialize(
        ctx: Context<Initialize>,
        withdrawal_fee_bps: Option<u16>,
        fee_recipient: Option<Pubkey>,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, withdrawal_fee_bps, fee_recipient)
    }

    /// Deposit assets into the vault and receive shares
    ///
    /// Security considerations:
    /// - Validates user token accounts (mint, owner)
    /// - Uses checked math for share calculation
    /// - Follows checks-effects-interactions pattern
    /// - Emits event for tracking
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Redeem shares for the underlying asset, net of the withdrawal fee
    ///
    /// Security considerations:
    /// - Validates the caller holds the shares being burned
    /// - Resolves liquidity (including a market divest) before any mutation
    /// - Pays the fee recipient in the same transaction
    /// - Emits event for tracking
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, shares)
    }

    /// Deploy idle vault principal into the lending-market position
    ///
    /// Security considerations:
    /// - Authority-only function (has_one constraint)
    /// - Destination fixed at construction; prevents routing to arbitrary
    ///   addresses
    /// - Tracks deployed amount for transparency
    /// - Emits event for tracking
    pub fn invest(ctx: Context<Invest>, amount: u64) -> Result<()> {
        instructions::invest::handler(ctx, amount)
    }

    /// Pull principal back from the lending-market position
    ///
    /// Security considerations:
    /// - Authority-only function (has_one constraint)
    /// - Fails with LiquidityUnavailable when the market cannot return the
    ///   requested amount; never silently short
    /// - Emits event for tracking
    pub fn divest(ctx: Context<Divest>, amount: u64) -> Result<()> {
        instructions::divest::handler(ctx, amount)
    }
}
