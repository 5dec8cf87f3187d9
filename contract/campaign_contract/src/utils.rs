use soroban_sdk::Env;

use crate::storage_types::{
    CampaignError, Tier, MAX_TOKEN_DECIMALS, MIN_CONTRIBUTION_DIVISOR, MIN_TOKEN_DECIMALS,
    SILVER_DIVISOR,
};

/// Convert days to seconds
pub fn days_to_seconds(days: u32) -> u64 {
    days as u64 * 86400
}

/// Check if timestamp is in the past
pub fn is_past(env: &Env, timestamp: u64) -> bool {
    env.ledger().timestamp() > timestamp
}

/// One whole token expressed in its smallest unit.
pub fn unit_from_decimals(decimals: u32) -> Result<i128, CampaignError> {
    if !(MIN_TOKEN_DECIMALS..=MAX_TOKEN_DECIMALS).contains(&decimals) {
        return Err(CampaignError::InvalidInput);
    }
    Ok(10i128.pow(decimals))
}

pub fn min_contribution(unit: i128) -> i128 {
    unit / MIN_CONTRIBUTION_DIVISOR
}

/// Classify a single contribution. Callers must have checked the minimum.
pub fn tier_for(unit: i128, amount: i128) -> Tier {
    if amount >= unit {
        Tier::Gold
    } else if amount >= unit / SILVER_DIVISOR {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}
