use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Campaign,
    Status,
    Balance,
    TotalRaised,
    TotalWithdrawn,
    ContributorCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contribution(Address),
}

/// Stored lifecycle status. `Funded` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignStatus {
    Active,
    Funded,
    Cancelled,
}

/// Read-only view of the lifecycle. `Failed` is never stored: it is an
/// `Active` campaign whose end date has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignState {
    Active,
    Funded,
    Cancelled,
    Failed,
}

/// Reward tier of a single contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

// Campaign metadata, fixed at initialization
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub title: String,
    pub funding_goal: i128,
    pub created_at: u64,
    pub end_date: u64,
    pub owner: Address,
    pub token: Address,
    pub unit: i128, // 10^decimals of the token
}

// Per-contributor aggregate
#[derive(Clone, Debug, Default, PartialEq)]
#[contracttype]
pub struct ContributionRecord {
    pub count: u32,
    pub total_value: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CampaignError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidInput = 3,
    BelowMinimum = 4,
    CampaignClosed = 5,
    Unauthorized = 6,
    InvalidTransition = 7,
    InsufficientBalance = 8,
    TransferFailed = 9,
    ArithmeticOverflow = 10,
}

// Constants
pub const CAMPAIGN_DURATION_DAYS: u32 = 30;
pub const MIN_CONTRIBUTION_DIVISOR: i128 = 100; // 0.01 unit
pub const SILVER_DIVISOR: i128 = 4;             // 0.25 unit
pub const MIN_TOKEN_DECIMALS: u32 = 2;
pub const MAX_TOKEN_DECIMALS: u32 = 38; // 10^38 still fits in i128
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
