use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Deploy idle vault principal into the lending-market position
///
/// Security considerations:
/// - Authority-only function (has_one constraint)
/// - Destination fixed at construction; no arbitrary targets
/// - Tracks deployed amount so idle liquidity is always known
#[derive(Accounts)]
pub struct Invest<'info> {
    /// Vault authority - only they can invest
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

    /// Vault's token account (source of the deployment)
    /// Security: Must be correct mint and owned by vault_authority
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Lending-market position account (destination)
    /// Security: Must be the account recorded at initialization
    #[account(
        mut,
        address = vault_state.market_account,
    )]
    pub market_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Invest>, amount: u64) -> Result<()> {
    // CHECKS: Validate amount against idle principal
    require!(amount > 0, VaultError::ZeroAmount);

    let vault_state = &mut ctx.accounts.vault_state;

    require!(
        ctx.accounts.vault_token_account.amount >= amount
            && amount <= vault_state.idle_assets(),
        VaultError::InsufficientIdleAssets
    );

    // EFFECTS: Track deployment before the transfer
    vault_state.deployed_assets = vault_state
        .deployed_assets
        .checked_add(amount)
        .ok_or(VaultError::MathOverflow)?;

    // INTERACTIONS: Move principal into the market position

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
            from: ctx.accounts.vault_token_account.to_account_info(),
            to: ctx.accounts.market_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(transfer_ctx, amount)?;

    // Emit event for tracking
    emit!(Invested {
        vault: vault_state.key(),
        authority: ctx.accounts.authority.key(),
        amount,
        deployed_assets: vault_state.deployed_assets,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
