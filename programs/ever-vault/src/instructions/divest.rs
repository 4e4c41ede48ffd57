use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Pull principal back from the lending-market position into the idle pool
///
/// Security considerations:
/// - Authority-only function (has_one constraint)
/// - Fails loudly when the market cannot return the requested amount;
///   a short return is never silently accepted
#[derive(Accounts)]
pub struct Divest<'info> {
    /// Vault authority - only they can divest
    /// Security: Must be signer and match vault_state.authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    /// Security: has_one constraint validates authority from state
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Vault authority PDA
    /// Security: CHECK constraint, validated by seeds
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account (destination)
    /// Security: Must be correct mint and owned by vault_authority
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Lending-market position account (source)
    /// Security: Must be the account recorded at initialization
    #[account(
        mut,
        address = vault_state.market_account,
    )]
    pub market_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Divest>, amount: u64) -> Result<()> {
    // CHECKS: Validate amount against withdrawable market liquidity
    require!(amount > 0, VaultError::ZeroAmount);
    require!(
        ctx.accounts.market_account.amount >= amount,
        VaultError::LiquidityUnavailable
    );

    let vault_state = &mut ctx.accounts.vault_state;

    // EFFECTS: Divesting above the tracked deployed principal realizes
    // accrued market yield into the idle pool
    vault_state.deployed_assets = vault_state.deployed_assets.saturating_sub(amount);

    // INTERACTIONS: Move principal back to the vault

    let asset_mint_key = vault_state.asset_mint;
    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let transfer_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.market_account.to_account_info(),
            to: ctx.accounts.vault_token_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    // Emit event for tracking
    emit!(Divested {
        vault: vault_state.key(),
        authority: ctx.accounts.authority.key(),
        amount,
        deployed_assets: vault_state.deployed_assets,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
