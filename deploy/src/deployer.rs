use std::path::PathBuf;

use fuels::prelude::WalletUnlocked;
use tracing::{debug, error, info};

use crate::error::{DeployError, Result};
use crate::fixture::{card_deck_mints, MintRequest};
use crate::fuel::FuelRuntime;
use crate::runtime::{CardDeckContract, ContractFactory, MintReceipt, NetworkRuntime, Signer};
use crate::shared::{config, get_wallets};

pub const CARD_DECK_CONTRACT: &str = "CardDeck";

/// Progress of a [`CardDeckDeployer`]. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Undeployed,
    Deploying,
    DeployedNoSigner,
    Ready,
    Minting(u64),
    Verifying,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

#[derive(Debug, Clone)]
pub struct DeployOptions {
    pub mints: Vec<MintRequest>,
    /// Read every mint back with `get_mint` once the sequence is confirmed.
    pub verify_mints: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        DeployOptions {
            mints: card_deck_mints(),
            verify_mints: false,
        }
    }
}

pub struct Deployment<R: NetworkRuntime> {
    pub card_deck: R::Contract,
    pub signer: R::Signer,
    pub receipts: Vec<MintReceipt>,
}

pub struct CardDeckDeployer<R: NetworkRuntime> {
    runtime: R,
    card_deck: Option<R::Contract>,
    signer: Option<R::Signer>,
    receipts: Vec<MintReceipt>,
    verify_mints: bool,
    stage: Stage,
}

impl<R: NetworkRuntime> CardDeckDeployer<R> {
    pub fn new(runtime: R) -> Self {
        CardDeckDeployer {
            runtime,
            card_deck: None,
            signer: None,
            receipts: Vec::new(),
            verify_mints: false,
            stage: Stage::Undeployed,
        }
    }

    pub fn with_verification(mut self, verify_mints: bool) -> Self {
        self.verify_mints = verify_mints;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn card_deck(&self) -> Option<&R::Contract> {
        self.card_deck.as_ref()
    }

    pub fn signer(&self) -> Option<&R::Signer> {
        self.signer.as_ref()
    }

    pub fn receipts(&self) -> &[MintReceipt] {
        &self.receipts
    }

    /// Deploys CardDeck, selects the first signer and mints `mints` with it.
    pub async fn deploy(&mut self, mints: &[MintRequest]) -> Result<()> {
        self.deploy_contract().await?;
        self.mint(mints).await
    }

    /// Deploys CardDeck and selects the first signer, leaving the deployer
    /// `Ready` to mint.
    pub async fn deploy_contract(&mut self) -> Result<()> {
        self.expect_stage(Stage::Undeployed)?;
        let outcome = self.deploy_and_select_signer().await;
        self.settle(outcome)
    }

    /// Mints `mints` in order, each one confirmed before the next is sent.
    pub async fn mint(&mut self, mints: &[MintRequest]) -> Result<()> {
        if self.card_deck.is_none() {
            return Err(DeployError::NotDeployed);
        }
        if self.signer.is_none() {
            return Err(DeployError::SignerNotSelected);
        }
        self.expect_stage(Stage::Ready)?;
        let outcome = self.mint_and_verify(mints).await;
        self.settle(outcome)
    }

    pub fn into_deployment(self) -> Result<Deployment<R>> {
        self.expect_stage(Stage::Done)?;
        match (self.card_deck, self.signer) {
            (Some(card_deck), Some(signer)) => Ok(Deployment {
                card_deck,
                signer,
                receipts: self.receipts,
            }),
            (None, _) => Err(DeployError::NotDeployed),
            (_, None) => Err(DeployError::SignerNotSelected),
        }
    }

    async fn deploy_and_select_signer(&mut self) -> Result<()> {
        self.stage = Stage::Deploying;
        let factory = self.runtime.contract_factory(CARD_DECK_CONTRACT).await?;
        let card_deck = factory.deploy().await?;
        info!("Deployed to {}", card_deck.address());
        self.card_deck = Some(card_deck);
        self.stage = Stage::DeployedNoSigner;

        let signer = self
            .runtime
            .signers()
            .await?
            .into_iter()
            .next()
            .ok_or(DeployError::NoSigners)?;
        info!("signer: {}", signer.address());
        self.signer = Some(signer);
        self.stage = Stage::Ready;
        Ok(())
    }

    async fn mint_and_verify(&mut self, mints: &[MintRequest]) -> Result<()> {
        let (card_deck, signer) = match (&self.card_deck, &self.signer) {
            (Some(card_deck), Some(signer)) => (card_deck.connect(signer), signer.address()),
            (None, _) => return Err(DeployError::NotDeployed),
            (_, None) => return Err(DeployError::SignerNotSelected),
        };

        for request in mints {
            self.stage = Stage::Minting(request.id());
            info!(id = request.id(), "Minting a card..");
            let receipt = card_deck
                .mint(request.id(), request.proof())
                .await
                .map_err(|err| DeployError::MintFailed {
                    id: request.id(),
                    source: Box::new(err),
                })?;
            debug!(id = request.id(), tx_id = ?receipt.tx_id, signer = %signer, "mint confirmed");
            self.receipts.push(receipt);
            info!(id = request.id(), "Minted a card");
        }

        if self.verify_mints {
            self.stage = Stage::Verifying;
            for request in mints {
                let stored = card_deck.get_mint(request.id()).await?;
                if stored != request.proof() {
                    return Err(DeployError::ProofMismatch {
                        id: request.id(),
                        expected: request.proof().to_string(),
                        actual: stored,
                    });
                }
                debug!(id = request.id(), proof = %stored, "mint verified");
            }
        }

        self.stage = Stage::Done;
        Ok(())
    }

    fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(DeployError::InvalidStage {
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    fn settle(&mut self, outcome: Result<()>) -> Result<()> {
        if outcome.is_err() {
            self.stage = Stage::Failed;
        }
        outcome
    }
}

/// Deploys CardDeck through `runtime` and runs the configured mints.
pub async fn run<R: NetworkRuntime>(runtime: R, options: DeployOptions) -> Result<Deployment<R>> {
    let mut deployer = CardDeckDeployer::new(runtime).with_verification(options.verify_mints);
    deployer.deploy(&options.mints).await?;
    deployer.into_deployment()
}

/// Logs a failed run and maps it to the process exit status.
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            error!("{:?}", err);
            1
        }
    }
}

pub struct LocalDeployParams {
    pub deployer_wallet: WalletUnlocked,
    pub signers: Vec<WalletUnlocked>,
    pub contracts_dir: PathBuf,
    pub options: DeployOptions,
}

pub enum DeployTarget {
    Local(LocalDeployParams),
    OnChain,
}

pub async fn deploy(target: DeployTarget) -> Result<Deployment<FuelRuntime>> {
    let (runtime, options) = match target {
        DeployTarget::Local(p) => (
            FuelRuntime::new(p.deployer_wallet, p.signers, p.contracts_dir),
            p.options,
        ),
        DeployTarget::OnChain => {
            let config = config()?;
            let (deployer, signers) = get_wallets(&config).await?;
            debug!("Deployer wallet address: {}", Signer::address(&deployer));
            debug!(fuel_url = %config.fuel_url, signers = signers.len(), "Deploy config loaded");
            let options = DeployOptions {
                verify_mints: config.verify_mints,
                ..DeployOptions::default()
            };
            (
                FuelRuntime::new(deployer, signers, config.contracts_dir.clone()),
                options,
            )
        }
    };
    run(runtime, options).await
}
