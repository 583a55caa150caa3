use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MultisigError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    EmptyOwnersList = 3,
    NotOwner = 4,
    DuplicateOwner = 5,
    UnknownOwner = 6,
    LastOwner = 7,
    UnknownProposal = 8,
    AlreadyConfirmed = 9,
    AlreadyExecuted = 10,
    InvalidProposal = 11,
    MalformedPayload = 12,
    EmptyBatch = 13,
    InvalidAmount = 14,
    TransferFailed = 15,
    CallFailed = 16,
}
