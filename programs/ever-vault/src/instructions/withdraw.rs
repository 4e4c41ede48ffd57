use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Redeem shares for the underlying asset, net of the withdrawal fee
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer and owns the burned shares
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state and authority PDAs validated with seeds
/// ✅ 6. MATH SAFETY: Gross/fee/net amounts resolved with checked math
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner on every account
/// ✅ 8. BUSINESS LOGIC: Liquidity resolved before any mutation; CEI ordering
/// ✅ 10. EVENTS: Emits Withdrawn event
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User redeeming shares
    /// Security: Must be signer
    #[account(mut)]
    pub user: Signer<'info>,

    /// Vault state PDA
    /// Security: Validated by seeds, contains totals and config
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Share mint
    /// Security: Must match vault_state.share_mint
    #[account(
        mut,
        address = vault_state.share_mint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// Security: CHECK constraint, validated by seeds
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// User's share token account (shares burned from here)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    /// User's asset token account (net payout destination)
    /// Security: Must be owned by user and correct mint
    #[account(
        mut,
        constraint = user_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = user_asset_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// Vault's token account holding idle principal
    /// Security: Must be correct mint and owned by vault_authority
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Lending-market position account; shortfall is divested from here
    /// Security: Must be the account recorded at initialization
    #[account(
        mut,
        address = vault_state.market_account,
    )]
    pub market_account: Account<'info, TokenAccount>,

    /// Fee recipient's asset token account
    /// Security: Must be owned by the configured fee recipient, correct mint
    #[account(
        mut,
        constraint = fee_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = fee_token_account.owner == vault_state.fee_recipient @ VaultError::InvalidOwner,
    )]
    pub fee_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    // CHECKS: Validate the request against the caller's balance
    require!(shares > 0, VaultError::InsufficientShares);
    require!(
        ctx.accounts.user_share_account.amount >= shares,
        VaultError::InsufficientShares
    );

    let idle_balance = ctx.accounts.vault_token_account.amount;
    let market_liquidity = ctx.accounts.market_account.amount;

    let vault_state = &mut ctx.accounts.vault_state;

    // Resolve gross/fee/net and the market shortfall before touching state;
    // LiquidityUnavailable surfaces here with nothing mutated
    let plan = vault_state.plan_withdrawal(shares, idle_balance, market_liquidity)?;

    // EFFECTS: Update vault state BEFORE external calls
    vault_state.total_shares = vault_state
        .total_shares
        .checked_sub(shares)
        .ok_or(VaultError::MathOverflow)?;

    vault_state.total_assets = vault_state
        .total_assets
        .checked_sub(plan.gross_amount)
        .ok_or(VaultError::MathOverflow)?;

    // Divesting above the tracked deployed principal realizes accrued
    // market yield into the idle pool
    vault_state.deployed_assets = vault_state
        .deployed_assets
        .saturating_sub(plan.divest_amount);

    // INTERACTIONS: External calls after state updates

    // Burn the redeemed shares; the user signs for their own share account
    let burn_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Burn {
            mint: ctx.accounts.share_mint.to_account_info(),
            from: ctx.accounts.user_share_account.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::burn(burn_ctx, shares)?;

    let asset_mint_key = vault_state.asset_mint;
    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    // Pull the shortfall back from the lending market
    if plan.divest_amount > 0 {
        let divest_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.market_account.to_account_info(),
                to: ctx.accounts.vault_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(divest_ctx, plan.divest_amount)?;
    }

    // Pay the net amount to the user
    let payout_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        Transfer {
            from: ctx.accounts.vault_token_account.to_account_info(),
            to: ctx.accounts.user_asset_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        },
        signer_seeds,
    );
    token::transfer(payout_ctx, plan.net_amount)?;

    // Route the fee to the fee recipient
    if plan.fee_amount > 0 {
        let fee_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.fee_token_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(fee_ctx, plan.fee_amount)?;
    }

    // Emit event: shares is the gross burned amount, usdc_amount the net payout
    emit!(Withdrawn {
        vault: vault_state.key(),
        user: ctx.accounts.user.key(),
        shares,
        usdc_amount: plan.net_amount,
        total_assets: vault_state.total_assets,
        total_shares: vault_state.total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
