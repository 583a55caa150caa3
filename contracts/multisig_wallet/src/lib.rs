#![no_std]

mod assets;
mod batch;
mod errors;
mod events;
mod multisig;
mod owners;
mod proposals;
mod quorum;
mod types;

pub use assets::{NonFungibleToken, NonFungibleTokenClient};
pub use errors::MultisigError;
pub use events::*;
pub use multisig::*;
pub use types::{BatchLeg, CallPayload, Confirmation, Proposal, ProposalKind};
