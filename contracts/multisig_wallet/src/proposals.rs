//! Append-only proposal log with per-proposal confirmation lists.
//!
//! Proposals are never deleted. Each record and its confirmations live in
//! persistent storage under their own key.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::MultisigError;
use crate::types::{Confirmation, DataKey, Proposal};

// Roughly 30 and 90 days at 5s ledgers.
const PROPOSAL_TTL_THRESHOLD: u32 = 518_400;
const PROPOSAL_TTL_EXTEND_TO: u32 = 1_555_200;

pub fn count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0u64)
}

/// Stores `proposal` under the next free index and returns that index.
pub fn append(env: &Env, mut proposal: Proposal) -> u64 {
    let index = count(env);
    proposal.index = index;
    proposal.executed = false;

    save(env, &proposal);

    let confirmations: Vec<Confirmation> = Vec::new(env);
    save_confirmations(env, index, &confirmations);

    env.storage()
        .instance()
        .set(&DataKey::ProposalCount, &(index + 1));

    index
}

pub fn get(env: &Env, index: u64) -> Result<Proposal, MultisigError> {
    if index >= count(env) {
        return Err(MultisigError::UnknownProposal);
    }

    env.storage()
        .persistent()
        .get(&DataKey::Proposal(index))
        .ok_or(MultisigError::UnknownProposal)
}

pub fn confirmations(env: &Env, index: u64) -> Vec<Confirmation> {
    env.storage()
        .persistent()
        .get(&DataKey::Confirmations(index))
        .unwrap_or(Vec::new(env))
}

pub fn is_confirmed(env: &Env, index: u64, owner: &Address) -> bool {
    confirmations(env, index)
        .iter()
        .any(|confirmation| confirmation.owner == *owner)
}

/// Records `owner`'s confirmation and returns the new confirmation count.
pub fn confirm(env: &Env, index: u64, owner: &Address) -> Result<u32, MultisigError> {
    let proposal = get(env, index)?;
    let mut confirmations = confirmations(env, index);

    if confirmations.iter().any(|confirmation| confirmation.owner == *owner) {
        return Err(MultisigError::AlreadyConfirmed);
    }

    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    confirmations.push_back(Confirmation {
        owner: owner.clone(),
        confirmed_at: env.ledger().timestamp(),
    });
    save_confirmations(env, index, &confirmations);

    Ok(confirmations.len())
}

/// Flips the executed flag. Must run before any external side effect of the
/// proposal so a reentrant caller sees it as executed.
pub fn mark_executed(env: &Env, index: u64) -> Result<Proposal, MultisigError> {
    let mut proposal = get(env, index)?;
    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    proposal.executed = true;
    save(env, &proposal);
    Ok(proposal)
}

fn save(env: &Env, proposal: &Proposal) {
    let key = DataKey::Proposal(proposal.index);
    env.storage().persistent().set(&key, proposal);
    env.storage()
        .persistent()
        .extend_ttl(&key, PROPOSAL_TTL_THRESHOLD, PROPOSAL_TTL_EXTEND_TO);
}

fn save_confirmations(env: &Env, index: u64, confirmations: &Vec<Confirmation>) {
    let key = DataKey::Confirmations(index);
    env.storage().persistent().set(&key, confirmations);
    env.storage()
        .persistent()
        .extend_ttl(&key, PROPOSAL_TTL_THRESHOLD, PROPOSAL_TTL_EXTEND_TO);
}
