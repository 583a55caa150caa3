use soroban_sdk::{
    contract, contractimpl, log, xdr::ToXdr, Address, Bytes, Env, Symbol, Val, Vec,
};

use crate::assets::{self, AssetTransfer};
use crate::batch;
use crate::errors::MultisigError;
use crate::events::{ConfirmTransaction, Deposit, ExecuteTransaction, SubmitTransaction};
use crate::owners;
use crate::proposals;
use crate::quorum;
use crate::types::{
    decode_payload, BatchLeg, CallPayload, Confirmation, DataKey, Proposal, ProposalKind,
};

// Roughly 30 and 90 days at 5s ledgers.
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_555_200;

#[contract]
pub struct MultisigWallet;

#[contractimpl]
impl MultisigWallet {
    pub fn initialize(
        env: Env,
        owners: Vec<Address>,
        native_token: Address,
    ) -> Result<(), MultisigError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(MultisigError::AlreadyInitialized);
        }

        owners::init(&env, &owners)?;

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage()
            .instance()
            .set(&DataKey::NativeToken, &native_token);
        env.storage().instance().set(&DataKey::ProposalCount, &0u64);
        Self::extend_instance(&env);

        log!(&env, "multisig initialized", owners.len());
        Ok(())
    }

    /// Pulls native currency from `sender` into custody. Deposits only grow
    /// committee funds, so they need no confirmation.
    pub fn deposit(env: Env, sender: Address, amount: i128) -> Result<i128, MultisigError> {
        Self::require_initialized(&env)?;
        sender.require_auth();

        if amount <= 0 {
            return Err(MultisigError::InvalidAmount);
        }

        assets::receive_native(&env, &sender, amount)?;
        let balance = assets::native_balance(&env)?;
        Self::extend_instance(&env);

        Deposit {
            sender: sender.clone(),
            amount,
            balance,
        }
        .publish(&env);

        log!(&env, "deposit received", sender, amount);
        Ok(balance)
    }

    /// Records a proposal, confirms it on the caller's behalf and executes it
    /// right away if that single confirmation already forms a quorum.
    #[allow(clippy::too_many_arguments)]
    pub fn submit(
        env: Env,
        caller: Address,
        kind: ProposalKind,
        target: Address,
        value: i128,
        token_address: Option<Address>,
        amount_or_token_id: i128,
        payload: Bytes,
    ) -> Result<u64, MultisigError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        Self::validate(
            &env,
            kind,
            &target,
            value,
            &token_address,
            amount_or_token_id,
            &payload,
        )?;

        let index = proposals::append(
            &env,
            Proposal {
                index: 0,
                kind,
                target: target.clone(),
                value,
                token_address: token_address.clone(),
                amount_or_token_id,
                proposer: caller.clone(),
                payload: payload.clone(),
                executed: false,
                created_at: env.ledger().timestamp(),
            },
        );
        Self::extend_instance(&env);

        SubmitTransaction {
            index,
            kind,
            target,
            value,
            token_address,
            amount_or_token_id,
            proposer: caller.clone(),
            payload,
        }
        .publish(&env);

        log!(&env, "proposal submitted", index, kind);

        Self::record_confirmation(&env, &caller, index)?;
        Ok(index)
    }

    pub fn confirm_transaction(env: Env, caller: Address, index: u64) -> Result<(), MultisigError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;
        Self::extend_instance(&env);

        Self::record_confirmation(&env, &caller, index)
    }

    pub fn send_native(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<u64, MultisigError> {
        let payload = Bytes::new(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::NativeTransfer,
            to,
            amount,
            None,
            0,
            payload,
        )
    }

    pub fn transfer_token(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<u64, MultisigError> {
        let payload = Bytes::new(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::FungibleTransfer,
            to,
            0,
            Some(token),
            amount,
            payload,
        )
    }

    /// Proposes spending an allowance that `from` granted to this wallet.
    pub fn transfer_token_from(
        env: Env,
        caller: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<u64, MultisigError> {
        let payload = from.to_xdr(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::FungibleTransferFrom,
            to,
            0,
            Some(token),
            amount,
            payload,
        )
    }

    pub fn safe_transfer_nft(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        token_id: u128,
    ) -> Result<u64, MultisigError> {
        let token_id = i128::try_from(token_id).map_err(|_| MultisigError::InvalidAmount)?;
        let payload = Bytes::new(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::NonFungibleTransfer,
            to,
            0,
            Some(token),
            token_id,
            payload,
        )
    }

    pub fn add_owner(env: Env, caller: Address, owner: Address) -> Result<u64, MultisigError> {
        let payload = Bytes::new(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::AddOwner,
            owner,
            0,
            None,
            0,
            payload,
        )
    }

    pub fn remove_owner(env: Env, caller: Address, owner: Address) -> Result<u64, MultisigError> {
        let payload = Bytes::new(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::RemoveOwner,
            owner,
            0,
            None,
            0,
            payload,
        )
    }

    pub fn batch_transfer(
        env: Env,
        caller: Address,
        legs: Vec<BatchLeg>,
    ) -> Result<u64, MultisigError> {
        let payload = legs.to_xdr(&env);
        let custody = env.current_contract_address();
        Self::submit(
            env,
            caller,
            ProposalKind::BatchTransfer,
            custody,
            0,
            None,
            0,
            payload,
        )
    }

    /// Proposes invoking `function` on `target` after sending it `value` in
    /// native currency.
    pub fn call_contract(
        env: Env,
        caller: Address,
        target: Address,
        value: i128,
        function: Symbol,
        args: Vec<Val>,
    ) -> Result<u64, MultisigError> {
        let payload = CallPayload { function, args }.to_xdr(&env);
        Self::submit(
            env,
            caller,
            ProposalKind::Other,
            target,
            value,
            None,
            0,
            payload,
        )
    }

    pub fn get_owners(env: Env) -> Result<Vec<Address>, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(owners::list(&env))
    }

    pub fn get_owner_count(env: Env) -> Result<u32, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(owners::count(&env))
    }

    pub fn is_owner(env: Env, id: Address) -> Result<bool, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(owners::contains(&env, &id))
    }

    /// Confirmations a proposal needs against the current committee size.
    pub fn required_confirmations(env: Env) -> Result<u32, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(quorum::required_confirmations(owners::count(&env)))
    }

    pub fn get_proposal(env: Env, index: u64) -> Result<Proposal, MultisigError> {
        Self::require_initialized(&env)?;
        proposals::get(&env, index)
    }

    pub fn get_confirmations(env: Env, index: u64) -> Result<Vec<Confirmation>, MultisigError> {
        Self::require_initialized(&env)?;
        proposals::get(&env, index)?;
        Ok(proposals::confirmations(&env, index))
    }

    pub fn is_confirmed(env: Env, index: u64, owner: Address) -> Result<bool, MultisigError> {
        Self::require_initialized(&env)?;
        proposals::get(&env, index)?;
        Ok(proposals::is_confirmed(&env, index, &owner))
    }

    pub fn is_executed(env: Env, index: u64) -> Result<bool, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(proposals::get(&env, index)?.executed)
    }

    pub fn get_proposal_count(env: Env) -> Result<u64, MultisigError> {
        Self::require_initialized(&env)?;
        Ok(proposals::count(&env))
    }

    pub fn native_token(env: Env) -> Result<Address, MultisigError> {
        Self::require_initialized(&env)?;
        assets::native_token(&env)
    }

    /// Native currency currently held in custody.
    pub fn native_balance(env: Env) -> Result<i128, MultisigError> {
        Self::require_initialized(&env)?;
        assets::native_balance(&env)
    }
}

impl MultisigWallet {
    fn require_initialized(env: &Env) -> Result<(), MultisigError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(MultisigError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), MultisigError> {
        if !owners::contains(env, caller) {
            return Err(MultisigError::NotOwner);
        }
        Ok(())
    }

    fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }

    fn record_confirmation(env: &Env, owner: &Address, index: u64) -> Result<(), MultisigError> {
        let confirmations = proposals::confirm(env, index, owner)?;

        ConfirmTransaction {
            owner: owner.clone(),
            index,
        }
        .publish(env);

        Self::execute_if_quorum(env, owner, index, confirmations)
    }

    /// State is committed (`executed` set) before dispatch touches any other
    /// contract. If dispatch fails the returned error aborts the invocation
    /// and the host discards the flag together with the confirmation.
    fn execute_if_quorum(
        env: &Env,
        owner: &Address,
        index: u64,
        confirmations: u32,
    ) -> Result<(), MultisigError> {
        if !quorum::is_satisfied(confirmations, owners::count(env)) {
            return Ok(());
        }

        let proposal = proposals::mark_executed(env, index)?;
        Self::dispatch(env, &proposal)?;

        ExecuteTransaction {
            index,
            kind: proposal.kind,
            target: proposal.target.clone(),
            value: proposal.value,
            token_address: proposal.token_address.clone(),
            amount_or_token_id: proposal.amount_or_token_id,
            owner: owner.clone(),
            payload: proposal.payload.clone(),
        }
        .publish(env);

        log!(env, "proposal executed", index, confirmations);
        Ok(())
    }

    fn dispatch(env: &Env, proposal: &Proposal) -> Result<(), MultisigError> {
        match proposal.kind {
            ProposalKind::NativeTransfer => assets::transfer(
                env,
                AssetTransfer::Native {
                    to: &proposal.target,
                    amount: proposal.value,
                },
            ),
            ProposalKind::FungibleTransfer => assets::transfer(
                env,
                AssetTransfer::Fungible {
                    token: Self::token_of(proposal)?,
                    to: &proposal.target,
                    amount: proposal.amount_or_token_id,
                },
            ),
            ProposalKind::FungibleTransferFrom => {
                let from: Address = decode_payload(env, &proposal.payload)?;
                assets::transfer(
                    env,
                    AssetTransfer::FungibleFrom {
                        token: Self::token_of(proposal)?,
                        from: &from,
                        to: &proposal.target,
                        amount: proposal.amount_or_token_id,
                    },
                )
            }
            ProposalKind::NonFungibleTransfer => assets::transfer(
                env,
                AssetTransfer::NonFungible {
                    token: Self::token_of(proposal)?,
                    to: &proposal.target,
                    token_id: Self::token_id_of(proposal)?,
                },
            ),
            ProposalKind::AddOwner => owners::add(env, &proposal.target),
            ProposalKind::RemoveOwner => owners::remove(env, &proposal.target),
            ProposalKind::BatchTransfer => {
                let legs = batch::decode(env, &proposal.payload)?;
                batch::run(env, &legs)
            }
            ProposalKind::Other => Self::call(env, proposal),
        }
    }

    fn call(env: &Env, proposal: &Proposal) -> Result<(), MultisigError> {
        let call: CallPayload = decode_payload(env, &proposal.payload)?;

        assets::transfer(
            env,
            AssetTransfer::Native {
                to: &proposal.target,
                amount: proposal.value,
            },
        )?;

        match env.try_invoke_contract::<Val, soroban_sdk::Error>(
            &proposal.target,
            &call.function,
            call.args,
        ) {
            Ok(Ok(_)) => Ok(()),
            _ => Err(MultisigError::CallFailed),
        }
    }

    fn token_of(proposal: &Proposal) -> Result<&Address, MultisigError> {
        proposal
            .token_address
            .as_ref()
            .ok_or(MultisigError::InvalidProposal)
    }

    fn token_id_of(proposal: &Proposal) -> Result<u128, MultisigError> {
        u128::try_from(proposal.amount_or_token_id).map_err(|_| MultisigError::InvalidAmount)
    }

    /// Checks that the proposal's fields match what its kind carries.
    fn validate(
        env: &Env,
        kind: ProposalKind,
        target: &Address,
        value: i128,
        token_address: &Option<Address>,
        amount_or_token_id: i128,
        payload: &Bytes,
    ) -> Result<(), MultisigError> {
        // Sign comes first for every kind, ahead of the shape check.
        if value < 0 || amount_or_token_id < 0 {
            return Err(MultisigError::InvalidAmount);
        }

        let no_token = token_address.is_none();
        let bare = no_token && value == 0 && amount_or_token_id == 0 && payload.is_empty();

        match kind {
            ProposalKind::NativeTransfer => {
                Self::shape(no_token && amount_or_token_id == 0 && payload.is_empty())
            }
            ProposalKind::FungibleTransfer | ProposalKind::NonFungibleTransfer => {
                Self::shape(!no_token && value == 0 && payload.is_empty())
            }
            ProposalKind::FungibleTransferFrom => {
                Self::shape(!no_token && value == 0)?;
                decode_payload::<Address>(env, payload).map(|_| ())
            }
            ProposalKind::AddOwner => {
                Self::shape(bare)?;
                if owners::contains(env, target) {
                    return Err(MultisigError::DuplicateOwner);
                }
                Ok(())
            }
            ProposalKind::RemoveOwner => {
                Self::shape(bare)?;
                if !owners::contains(env, target) {
                    return Err(MultisigError::UnknownOwner);
                }
                Ok(())
            }
            ProposalKind::BatchTransfer => {
                Self::shape(no_token && value == 0 && amount_or_token_id == 0)?;
                batch::decode(env, payload).map(|_| ())
            }
            ProposalKind::Other => {
                Self::shape(no_token && amount_or_token_id == 0)?;
                decode_payload::<CallPayload>(env, payload).map(|_| ())
            }
        }
    }

    fn shape(matches: bool) -> Result<(), MultisigError> {
        if matches {
            Ok(())
        } else {
            Err(MultisigError::InvalidProposal)
        }
    }
}
