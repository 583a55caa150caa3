use soroban_sdk::{Bytes, Env, Vec};

use crate::assets::{self, AssetTransfer};
use crate::errors::MultisigError;
use crate::events::BatchTransferExecuted;
use crate::types::{decode_payload, BatchLeg, MAX_TOKEN_ID};

/// Decodes and checks the legs carried by a batch proposal's payload.
pub fn decode(env: &Env, payload: &Bytes) -> Result<Vec<BatchLeg>, MultisigError> {
    let legs: Vec<BatchLeg> = decode_payload(env, payload)?;

    if legs.is_empty() {
        return Err(MultisigError::EmptyBatch);
    }

    if legs.iter().any(|leg| leg.value < 0) {
        return Err(MultisigError::InvalidAmount);
    }

    // NFT ids share the proposal's `i128` amount range.
    if legs
        .iter()
        .any(|leg| leg.token_address.is_some() && leg.value == 0 && leg.token_id > MAX_TOKEN_ID)
    {
        return Err(MultisigError::InvalidAmount);
    }

    Ok(legs)
}

/// Executes `legs` strictly in order. The first failing leg aborts the batch
/// and, with it, the whole invocation.
pub fn run(env: &Env, legs: &Vec<BatchLeg>) -> Result<(), MultisigError> {
    for leg in legs.iter() {
        let movement = match &leg.token_address {
            None => AssetTransfer::Native {
                to: &leg.recipient,
                amount: leg.value,
            },
            Some(token) if leg.value > 0 => AssetTransfer::Fungible {
                token,
                to: &leg.recipient,
                amount: leg.value,
            },
            Some(token) => AssetTransfer::NonFungible {
                token,
                to: &leg.recipient,
                token_id: leg.token_id,
            },
        };
        assets::transfer(env, movement)?;

        BatchTransferExecuted {
            recipient: leg.recipient.clone(),
            token_address: leg.token_address.clone(),
            value: leg.value,
            token_id: leg.token_id,
        }
        .publish(env);
    }

    Ok(())
}
