use soroban_sdk::{contracttype, Address, Env, String, Symbol};

use crate::storage_types::Tier;

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionReceivedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub tier: Tier,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct FundingCompleteEvent {
    pub title: String,
    pub total_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignCancelledEvent {
    pub title: String,
    pub owner: Address,
    pub reason: String,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct FundsWithdrawnEvent {
    pub owner: Address,
    pub amount: i128,
    pub remaining: i128,
}

pub fn emit_contribution_received(env: &Env, event: ContributionReceivedEvent) {
    env.events().publish(
        (Symbol::new(env, "contribution_received"),),
        event,
    );
}

pub fn emit_funding_complete(env: &Env, event: FundingCompleteEvent) {
    env.events().publish(
        (Symbol::new(env, "funding_complete"),),
        event,
    );
}

pub fn emit_campaign_cancelled(env: &Env, event: CampaignCancelledEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_cancelled"),),
        event,
    );
}

pub fn emit_funds_withdrawn(env: &Env, event: FundsWithdrawnEvent) {
    env.events().publish(
        (Symbol::new(env, "funds_withdrawn"),),
        event,
    );
}
