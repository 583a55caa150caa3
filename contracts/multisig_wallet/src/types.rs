use soroban_sdk::{contracttype, xdr::FromXdr, Address, Bytes, Env, Symbol, Val, Vec};

use crate::errors::MultisigError;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owners,
    NativeToken,
    ProposalCount,
    Proposal(u64),
    Confirmations(u64),
}

/// Numbering is part of the event ABI; do not reorder.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalKind {
    NativeTransfer = 0,
    FungibleTransfer = 1,
    NonFungibleTransfer = 2,
    AddOwner = 3,
    RemoveOwner = 4,
    BatchTransfer = 5,
    Other = 6,
    FungibleTransferFrom = 7,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub index: u64,
    pub kind: ProposalKind,
    pub target: Address,
    pub value: i128,
    pub token_address: Option<Address>,
    /// Token amount, or the NFT id for non-fungible transfers. Ids above
    /// [`MAX_TOKEN_ID`] cannot be stored and are rejected with `InvalidAmount`.
    pub amount_or_token_id: i128,
    pub proposer: Address,
    pub payload: Bytes,
    pub executed: bool,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Confirmation {
    pub owner: Address,
    pub confirmed_at: u64,
}

/// Largest NFT id a proposal can carry.
pub const MAX_TOKEN_ID: u128 = i128::MAX as u128;

/// One transfer inside a batch proposal.
///
/// The asset is inferred from the fields: no `token_address` moves native
/// currency, a token with a positive `value` moves fungible units, and a token
/// with a zero `value` moves the non-fungible `token_id` (at most
/// [`MAX_TOKEN_ID`]). A zero-unit fungible leg cannot be expressed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchLeg {
    pub recipient: Address,
    pub token_address: Option<Address>,
    pub value: i128,
    pub token_id: u128,
}

/// Payload of an `Other` proposal: the function to invoke on the target.
#[contracttype]
#[derive(Clone)]
pub struct CallPayload {
    pub function: Symbol,
    pub args: Vec<Val>,
}

/// Decodes an XDR-encoded proposal payload. An empty payload never decodes.
pub fn decode_payload<T: FromXdr>(env: &Env, payload: &Bytes) -> Result<T, MultisigError> {
    if payload.is_empty() {
        return Err(MultisigError::MalformedPayload);
    }
    T::from_xdr(env, payload).map_err(|_| MultisigError::MalformedPayload)
}
