//! Moves custody assets out of the wallet.
//!
//! Native currency goes through the Stellar Asset Contract configured at
//! initialization, fungible tokens through the standard token interface, and
//! non-fungible tokens through [`NonFungibleToken`]. A failing call surfaces as
//! [`MultisigError::TransferFailed`].

use soroban_sdk::{contractclient, token, Address, Env};

use crate::errors::MultisigError;
use crate::types::DataKey;

/// Minimal interface the wallet needs from a non-fungible token contract.
///
/// Implementations that notify contract recipients on `transfer` may call back
/// into the wallet; the host rejects re-entry and the proposal is already
/// marked executed by then.
#[contractclient(name = "NonFungibleTokenClient")]
pub trait NonFungibleToken {
    fn owner_of(env: Env, token_id: u128) -> Address;
    fn transfer(env: Env, from: Address, to: Address, token_id: u128);
}

pub enum AssetTransfer<'a> {
    Native {
        to: &'a Address,
        amount: i128,
    },
    Fungible {
        token: &'a Address,
        to: &'a Address,
        amount: i128,
    },
    /// Spends an allowance granted by `from` to the wallet.
    FungibleFrom {
        token: &'a Address,
        from: &'a Address,
        to: &'a Address,
        amount: i128,
    },
    NonFungible {
        token: &'a Address,
        to: &'a Address,
        token_id: u128,
    },
}

pub fn native_token(env: &Env) -> Result<Address, MultisigError> {
    env.storage()
        .instance()
        .get(&DataKey::NativeToken)
        .ok_or(MultisigError::NotInitialized)
}

pub fn native_balance(env: &Env) -> Result<i128, MultisigError> {
    let native = native_token(env)?;
    Ok(token::Client::new(env, &native).balance(&env.current_contract_address()))
}

/// Pulls `amount` of native currency from `sender` into custody.
pub fn receive_native(env: &Env, sender: &Address, amount: i128) -> Result<(), MultisigError> {
    let native = native_token(env)?;
    let client = token::Client::new(env, &native);
    settle(client.try_transfer(sender, &env.current_contract_address(), &amount))
}

pub fn transfer(env: &Env, transfer: AssetTransfer) -> Result<(), MultisigError> {
    let custody = env.current_contract_address();

    match transfer {
        AssetTransfer::Native { to, amount } => {
            if amount == 0 {
                return Ok(());
            }
            let native = native_token(env)?;
            let client = token::Client::new(env, &native);
            settle(client.try_transfer(&custody, to, &amount))
        }
        AssetTransfer::Fungible { token, to, amount } => {
            if amount == 0 {
                return Ok(());
            }
            let client = token::Client::new(env, token);
            settle(client.try_transfer(&custody, to, &amount))
        }
        AssetTransfer::FungibleFrom {
            token,
            from,
            to,
            amount,
        } => {
            let client = token::Client::new(env, token);
            settle(client.try_transfer_from(&custody, from, to, &amount))
        }
        AssetTransfer::NonFungible {
            token,
            to,
            token_id,
        } => {
            let client = NonFungibleTokenClient::new(env, token);
            settle(client.try_transfer(&custody, to, &token_id))
        }
    }
}

fn settle<T, C, E, I>(outcome: Result<Result<T, C>, Result<E, I>>) -> Result<(), MultisigError> {
    match outcome {
        Ok(Ok(_)) => Ok(()),
        _ => Err(MultisigError::TransferFailed),
    }
}
