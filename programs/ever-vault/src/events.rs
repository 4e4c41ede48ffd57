use anchor_lang::prelude::*;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub fee_recipient: Pubkey,
    pub withdrawal_fee_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub usdc_amount: u64,
    pub shares_minted: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are redeemed
///
/// `shares` is the gross amount burned; `usdc_amount` is the net payout after
/// the withdrawal fee. Indexers recover the realized fee from the difference
/// against the gross principal equivalent - no fee field is stored.
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub shares: u64,
    pub usdc_amount: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when idle principal is deployed into the lending market
#[event]
pub struct Invested {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub deployed_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when principal is pulled back from the lending market
#[event]
pub struct Divested {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub deployed_assets: u64,
    pub timestamp: i64,
}
