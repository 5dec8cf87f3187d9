#![no_std]


mod events;
mod storage_types;
mod utils;

pub use events::{
    CampaignCancelledEvent, ContributionReceivedEvent, FundingCompleteEvent, FundsWithdrawnEvent,
};
pub use storage_types::{
    Campaign, CampaignError, CampaignState, CampaignStatus, ContributionRecord, Tier,
};

use storage_types::{DataKey, PersistentKey, CAMPAIGN_DURATION_DAYS, TTL_INSTANCE, TTL_PERSISTENT};

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, String};

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    /// Create the campaign held by this contract instance.
    ///
    /// `funding_goal` is in the smallest unit of `token`. The campaign runs for
    /// 30 days from the current ledger timestamp.
    pub fn initialize(
        e: Env,
        owner: Address,
        token: Address,
        title: String,
        funding_goal: i128,
    ) -> Result<(), CampaignError> {
        if e.storage().instance().has(&DataKey::Campaign) {
            return Err(CampaignError::AlreadyInitialized);
        }
        owner.require_auth();

        if title.len() == 0 || funding_goal <= 0 {
            return Err(CampaignError::InvalidInput);
        }

        let decimals = token::Client::new(&e, &token).decimals();
        let unit = utils::unit_from_decimals(decimals)?;

        let created_at = e.ledger().timestamp();
        let end_date = created_at
            .checked_add(utils::days_to_seconds(CAMPAIGN_DURATION_DAYS))
            .ok_or(CampaignError::ArithmeticOverflow)?;

        let campaign = Campaign {
            title,
            funding_goal,
            created_at,
            end_date,
            owner: owner.clone(),
            token,
            unit,
        };

        e.storage().instance().set(&DataKey::Campaign, &campaign);
        e.storage().instance().set(&DataKey::Status, &CampaignStatus::Active);
        e.storage().instance().set(&DataKey::Balance, &0i128);
        e.storage().instance().set(&DataKey::TotalRaised, &0i128);
        e.storage().instance().set(&DataKey::TotalWithdrawn, &0i128);
        e.storage().instance().set(&DataKey::ContributorCount, &0u32);
        extend_instance(&e);

        log!(&e, "campaign initialized", owner, funding_goal, end_date);
        Ok(())
    }

    /// Contribute `amount` of the campaign token and return the tier earned by
    /// this single contribution.
    pub fn contribute(e: Env, contributor: Address, amount: i128) -> Result<Tier, CampaignError> {
        contributor.require_auth();
        let campaign = load_campaign(&e)?;

        if amount < utils::min_contribution(campaign.unit) {
            return Err(CampaignError::BelowMinimum);
        }
        if load_status(&e)? != CampaignStatus::Active || utils::is_past(&e, campaign.end_date) {
            return Err(CampaignError::CampaignClosed);
        }

        let previous_balance = load_amount(&e, &DataKey::Balance);
        let balance = previous_balance
            .checked_add(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        let total_raised = load_amount(&e, &DataKey::TotalRaised)
            .checked_add(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;

        let contributors: u32 = e.storage().instance().get(&DataKey::ContributorCount).unwrap_or(0);

        let key = PersistentKey::Contribution(contributor.clone());
        let mut record: ContributionRecord = e.storage().persistent().get(&key).unwrap_or_default();
        let first_contribution = record.count == 0;
        record.count = record
            .count
            .checked_add(1)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        record.total_value = record
            .total_value
            .checked_add(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        let contributors = if first_contribution {
            contributors
                .checked_add(1)
                .ok_or(CampaignError::ArithmeticOverflow)?
        } else {
            contributors
        };

        let token_client = token::Client::new(&e, &campaign.token);
        token_client.transfer(&contributor, &e.current_contract_address(), &amount);

        e.storage().persistent().set(&key, &record);
        extend_persistent(&e, &key);
        e.storage().instance().set(&DataKey::Balance, &balance);
        e.storage().instance().set(&DataKey::TotalRaised, &total_raised);
        e.storage().instance().set(&DataKey::ContributorCount, &contributors);

        let tier = utils::tier_for(campaign.unit, amount);
        events::emit_contribution_received(
            &e,
            ContributionReceivedEvent {
                contributor: contributor.clone(),
                amount,
                tier,
            },
        );
        log!(&e, "contribution accepted", contributor, amount, balance);

        if previous_balance < campaign.funding_goal && balance >= campaign.funding_goal {
            e.storage().instance().set(&DataKey::Status, &CampaignStatus::Funded);
            events::emit_funding_complete(
                &e,
                FundingCompleteEvent {
                    title: campaign.title,
                    total_balance: balance,
                },
            );
            log!(&e, "funding goal reached", balance);
        }

        extend_instance(&e);
        Ok(tier)
    }

    /// Cancel an active campaign. Only `Active -> Cancelled` is allowed.
    pub fn cancel(e: Env, caller: Address, reason: String) -> Result<(), CampaignError> {
        let campaign = authorize_owner(&e, &caller)?;

        if load_status(&e)? != CampaignStatus::Active {
            return Err(CampaignError::InvalidTransition);
        }

        e.storage().instance().set(&DataKey::Status, &CampaignStatus::Cancelled);
        extend_instance(&e);

        events::emit_campaign_cancelled(
            &e,
            CampaignCancelledEvent {
                title: campaign.title,
                owner: campaign.owner,
                reason,
            },
        );
        log!(&e, "campaign cancelled", caller);
        Ok(())
    }

    /// Transfer the whole balance to the owner. Returns the amount moved.
    pub fn withdraw(e: Env, caller: Address) -> Result<i128, CampaignError> {
        let campaign = authorize_owner(&e, &caller)?;

        let amount = load_amount(&e, &DataKey::Balance);
        if amount == 0 {
            return Ok(0);
        }
        Self::release_funds(&e, &campaign, amount)
    }

    /// Transfer part of the balance to the owner.
    pub fn withdraw_amount(e: Env, caller: Address, amount: i128) -> Result<i128, CampaignError> {
        let campaign = authorize_owner(&e, &caller)?;

        if amount <= 0 {
            return Err(CampaignError::InvalidInput);
        }
        if amount > load_amount(&e, &DataKey::Balance) {
            return Err(CampaignError::InsufficientBalance);
        }
        Self::release_funds(&e, &campaign, amount)
    }

    /// View functions
    pub fn title(e: Env) -> Result<String, CampaignError> {
        Ok(load_campaign(&e)?.title)
    }

    pub fn funding_goal(e: Env) -> Result<i128, CampaignError> {
        Ok(load_campaign(&e)?.funding_goal)
    }

    pub fn created_at(e: Env) -> Result<u64, CampaignError> {
        Ok(load_campaign(&e)?.created_at)
    }

    pub fn end_date(e: Env) -> Result<u64, CampaignError> {
        Ok(load_campaign(&e)?.end_date)
    }

    pub fn owner(e: Env) -> Result<Address, CampaignError> {
        Ok(load_campaign(&e)?.owner)
    }

    pub fn token_address(e: Env) -> Result<Address, CampaignError> {
        Ok(load_campaign(&e)?.token)
    }

    pub fn get_campaign(e: Env) -> Result<Campaign, CampaignError> {
        load_campaign(&e)
    }

    pub fn balance(e: Env) -> Result<i128, CampaignError> {
        load_campaign(&e)?;
        Ok(load_amount(&e, &DataKey::Balance))
    }

    /// True while the campaign still accepts contributions.
    pub fn get_status(e: Env) -> Result<bool, CampaignError> {
        let campaign = load_campaign(&e)?;
        Ok(load_status(&e)? == CampaignStatus::Active && !utils::is_past(&e, campaign.end_date))
    }

    pub fn status(e: Env) -> Result<CampaignStatus, CampaignError> {
        load_status(&e)
    }

    /// Lifecycle including the derived `Failed` state.
    pub fn state(e: Env) -> Result<CampaignState, CampaignError> {
        let campaign = load_campaign(&e)?;
        Ok(match load_status(&e)? {
            CampaignStatus::Funded => CampaignState::Funded,
            CampaignStatus::Cancelled => CampaignState::Cancelled,
            CampaignStatus::Active if utils::is_past(&e, campaign.end_date) => CampaignState::Failed,
            CampaignStatus::Active => CampaignState::Active,
        })
    }

    pub fn min_contribution(e: Env) -> Result<i128, CampaignError> {
        Ok(utils::min_contribution(load_campaign(&e)?.unit))
    }

    /// Tier a contribution of `amount` would earn.
    pub fn tier_for(e: Env, amount: i128) -> Result<Tier, CampaignError> {
        let unit = load_campaign(&e)?.unit;
        if amount < utils::min_contribution(unit) {
            return Err(CampaignError::BelowMinimum);
        }
        Ok(utils::tier_for(unit, amount))
    }

    pub fn total_raised(e: Env) -> i128 {
        load_amount(&e, &DataKey::TotalRaised)
    }

    pub fn total_withdrawn(e: Env) -> i128 {
        load_amount(&e, &DataKey::TotalWithdrawn)
    }

    pub fn contributor_count(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::ContributorCount).unwrap_or(0)
    }

    pub fn get_contribution(e: Env, contributor: Address) -> Option<ContributionRecord> {
        e.storage().persistent().get(&PersistentKey::Contribution(contributor))
    }

    pub fn contribution_count_of(e: Env, contributor: Address) -> u32 {
        Self::get_contribution(e, contributor)
            .map(|record| record.count)
            .unwrap_or(0)
    }

    pub fn total_contributions_of(e: Env, contributor: Address) -> i128 {
        Self::get_contribution(e, contributor)
            .map(|record| record.total_value)
            .unwrap_or(0)
    }
}

impl CampaignContract {
    // Debits before the transfer and restores the balance if the token rejects it.
    // The host also reverts every write of an invocation that returns `Err`, so
    // a failed withdrawal leaves no trace in storage either way.
    fn release_funds(e: &Env, campaign: &Campaign, amount: i128) -> Result<i128, CampaignError> {
        let balance = load_amount(e, &DataKey::Balance);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;
        let total_withdrawn = load_amount(e, &DataKey::TotalWithdrawn)
            .checked_add(amount)
            .ok_or(CampaignError::ArithmeticOverflow)?;

        e.storage().instance().set(&DataKey::Balance, &remaining);

        let token_client = token::Client::new(e, &campaign.token);
        match token_client.try_transfer(&e.current_contract_address(), &campaign.owner, &amount) {
            Ok(Ok(_)) => {}
            _ => {
                e.storage().instance().set(&DataKey::Balance, &balance);
                log!(e, "withdrawal transfer failed, balance restored", amount, balance);
                return Err(CampaignError::TransferFailed);
            }
        }

        e.storage().instance().set(&DataKey::TotalWithdrawn, &total_withdrawn);
        extend_instance(e);

        events::emit_funds_withdrawn(
            e,
            FundsWithdrawnEvent {
                owner: campaign.owner.clone(),
                amount,
                remaining,
            },
        );
        log!(e, "funds withdrawn", amount, remaining);
        Ok(amount)
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn load_campaign(e: &Env) -> Result<Campaign, CampaignError> {
    e.storage()
        .instance()
        .get(&DataKey::Campaign)
        .ok_or(CampaignError::NotInitialized)
}

fn load_status(e: &Env) -> Result<CampaignStatus, CampaignError> {
    e.storage()
        .instance()
        .get(&DataKey::Status)
        .ok_or(CampaignError::NotInitialized)
}

fn load_amount(e: &Env, key: &DataKey) -> i128 {
    e.storage().instance().get(key).unwrap_or(0)
}

fn authorize_owner(e: &Env, caller: &Address) -> Result<Campaign, CampaignError> {
    caller.require_auth();
    let campaign = load_campaign(e)?;
    if *caller != campaign.owner {
        return Err(CampaignError::Unauthorized);
    }
    Ok(campaign)
}
