//! Insertion-ordered owner registry kept in instance storage.
//!
//! `add` and `remove` are only reached from proposal dispatch; nothing outside
//! the quorum path mutates the committee.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::MultisigError;
use crate::events::{OwnerAdded, OwnerRemoved};
use crate::types::DataKey;

pub fn init(env: &Env, owners: &Vec<Address>) -> Result<(), MultisigError> {
    if owners.is_empty() {
        return Err(MultisigError::EmptyOwnersList);
    }

    let mut registry: Vec<Address> = Vec::new(env);
    for owner in owners.iter() {
        if registry.contains(&owner) {
            return Err(MultisigError::DuplicateOwner);
        }
        registry.push_back(owner);
    }

    env.storage().instance().set(&DataKey::Owners, &registry);
    Ok(())
}

pub fn list(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Owners)
        .unwrap_or(Vec::new(env))
}

pub fn count(env: &Env) -> u32 {
    list(env).len()
}

pub fn contains(env: &Env, id: &Address) -> bool {
    list(env).contains(id)
}

pub fn add(env: &Env, candidate: &Address) -> Result<(), MultisigError> {
    let mut owners = list(env);
    if owners.contains(candidate) {
        return Err(MultisigError::DuplicateOwner);
    }

    owners.push_back(candidate.clone());
    env.storage().instance().set(&DataKey::Owners, &owners);

    OwnerAdded {
        owner: candidate.clone(),
    }
    .publish(env);
    Ok(())
}

pub fn remove(env: &Env, existing: &Address) -> Result<(), MultisigError> {
    let mut owners = list(env);
    let position = owners
        .first_index_of(existing)
        .ok_or(MultisigError::UnknownOwner)?;

    // The committee must always be able to reach a quorum.
    if owners.len() == 1 {
        return Err(MultisigError::LastOwner);
    }

    owners.remove(position);
    env.storage().instance().set(&DataKey::Owners, &owners);

    OwnerRemoved {
        owner: existing.clone(),
    }
    .publish(env);
    Ok(())
}
