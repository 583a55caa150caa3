use soroban_sdk::{contractevent, Address, Bytes};

use crate::types::ProposalKind;

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    #[topic]
    pub sender: Address,
    pub amount: i128,
    pub balance: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitTransaction {
    #[topic]
    pub index: u64,
    pub kind: ProposalKind,
    pub target: Address,
    pub value: i128,
    pub token_address: Option<Address>,
    pub amount_or_token_id: i128,
    pub proposer: Address,
    pub payload: Bytes,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmTransaction {
    #[topic]
    pub owner: Address,
    #[topic]
    pub index: u64,
}

/// `owner` is the owner whose confirmation completed the quorum.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecuteTransaction {
    #[topic]
    pub index: u64,
    pub kind: ProposalKind,
    pub target: Address,
    pub value: i128,
    pub token_address: Option<Address>,
    pub amount_or_token_id: i128,
    pub owner: Address,
    pub payload: Bytes,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerAdded {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerRemoved {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchTransferExecuted {
    #[topic]
    pub recipient: Address,
    pub token_address: Option<Address>,
    pub value: i128,
    pub token_id: u128,
}
