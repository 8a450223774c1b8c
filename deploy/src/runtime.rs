//! Seams between the deployment workflow and the network it runs against.
//!
//! The workflow in [`crate::deployer`] only talks to these traits, so the same
//! code drives a live Fuel node ([`crate::fuel`]) or a recording mock in tests.
#![allow(async_fn_in_trait)]

use crate::error::Result;

/// An account identity able to authorize transactions.
pub trait Signer: Clone {
    fn address(&self) -> String;
}

/// A deployable contract, resolved by name from the runtime.
pub trait ContractFactory {
    type Contract;

    /// Submits the deployment with no constructor arguments and resolves once
    /// the network has confirmed it.
    async fn deploy(self) -> Result<Self::Contract>;
}

/// Handle to a deployed CardDeck contract.
pub trait CardDeckContract: Sized {
    type Signer: Signer;

    fn address(&self) -> String;

    /// Returns a handle whose calls are authorized by `signer`.
    fn connect(&self, signer: &Self::Signer) -> Self;

    /// Submits `mint(id, proof)` and waits for confirmation.
    async fn mint(&self, id: u64, proof: &str) -> Result<MintReceipt>;

    async fn get_mint(&self, id: u64) -> Result<String>;
}

/// The network the contract is deployed to.
pub trait NetworkRuntime {
    type Signer: Signer;
    type Contract: CardDeckContract<Signer = Self::Signer>;
    type Factory: ContractFactory<Contract = Self::Contract>;

    async fn contract_factory(&self, name: &str) -> Result<Self::Factory>;

    /// Signer identities in the order the runtime reports them.
    async fn signers(&self) -> Result<Vec<Self::Signer>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub id: u64,
    pub tx_id: Option<String>,
}
