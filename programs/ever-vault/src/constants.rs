// Constants for the EverVault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for vault authority PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Total basis points (100%) - denominator in fee calculations
/// Example: fee = amount * fee_bps / BPS_DENOMINATOR
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Default withdrawal fee: 50 bps = 0.5% of the gross amount
pub const DEFAULT_WITHDRAWAL_FEE_BPS: u16 = 50;

/// Space for VaultState account (8 discriminator + 32 authority + 32 asset_mint +
/// 32 share_mint + 32 market_account + 32 secondary_reserve_mint +
/// 32 fee_recipient + 2 withdrawal_fee_bps + 8 total_assets + 8 deployed_assets +
/// 8 total_shares + 1 bump + 1 share_bump + 1 authority_bump + 128 padding)
pub const VAULT_STATE_SIZE: usize =
    8 + 32 + 32 + 32 + 32 + 32 + 32 + 2 + 8 + 8 + 8 + 1 + 1 + 1 + 128;
