use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Initialize a new vault for a given asset token
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Vault authority - can move principal in and out of the lending market
    /// Security: Must be signer, stored in state
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: Initialized with proper space and padding for upgrades
    #[account(
        init,
        payer = authority,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset token mint (the stablecoin users deposit)
    /// Security: No constraints needed - any valid mint can have a vault
    pub asset_mint: Account<'info, Mint>,

    /// Secondary reserve asset mint (WBTC); recorded as configuration only
    pub secondary_reserve_mint: Account<'info, Mint>,

    /// Share token mint PDA (vault shares)
    /// Shares carry the asset mint's decimals so claims and principal stay
    /// in the same fixed-point unit
    /// Security: Mint authority is vault_authority PDA
    #[account(
        init,
        payer = authority,
        seeds = [SHARE_MINT_SEED, asset_mint.key().as_ref()],
        bump,
        mint::decimals = asset_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA - used as mint authority for shares
    /// Security: CHECK constraint ensures correct derivation
    /// CHECK: PDA used as mint authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for holding idle principal
    /// Security: Owned by vault_authority PDA, correct mint
    #[account(
        init,
        payer = authority,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Lending-market position token account
    /// Holds principal deployed into the market; its balance is the
    /// liquidity the vault can pull back on demand
    /// Security: Must be owned by vault_authority so the vault can always
    /// sign divest transfers, and must not alias the idle token account
    #[account(
        constraint = market_account.mint == asset_mint.key() @ VaultError::InvalidMint,
        constraint = market_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
        constraint = market_account.key() != vault_token_account.key() @ VaultError::InvalidMarketAccount,
    )]
    pub market_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    withdrawal_fee_bps: Option<u16>,
    fee_recipient: Option<Pubkey>,
) -> Result<()> {
    // CHECKS: Validate fee rate
    let fee_bps = withdrawal_fee_bps.unwrap_or(DEFAULT_WITHDRAWAL_FEE_BPS);
    require!(
        fee_bps as u64 <= BPS_DENOMINATOR,
        VaultError::InvalidFeeRate
    );

    let vault_state = &mut ctx.accounts.vault_state;

    // EFFECTS: Initialize vault state
    vault_state.authority = ctx.accounts.authority.key();
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.share_mint = ctx.accounts.share_mint.key();
    vault_state.market_account = ctx.accounts.market_account.key();
    vault_state.secondary_reserve_mint = ctx.accounts.secondary_reserve_mint.key();
    // Fee recipient defaults to the deployer
    vault_state.fee_recipient = fee_recipient.unwrap_or_else(|| ctx.accounts.authority.key());
    vault_state.withdrawal_fee_bps = fee_bps;
    vault_state.total_assets = 0;
    vault_state.deployed_assets = 0;
    vault_state.total_shares = 0;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.share_bump = ctx.bumps.share_mint;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 128];

    // INTERACTIONS: Emit event
    emit!(VaultInitialized {
        vault: vault_state.key(),
        authority: vault_state.authority,
        asset_mint: vault_state.asset_mint,
        share_mint: vault_state.share_mint,
        fee_recipient: vault_state.fee_recipient,
        withdrawal_fee_bps: vault_state.withdrawal_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
