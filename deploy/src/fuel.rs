use std::path::{Path, PathBuf};

use fuels::accounts::ViewOnlyAccount;
use fuels::types::AsciiString;
use fuels::prelude::{
    abigen,
    Contract,
    ContractId,
    Execution,
    LoadConfiguration,
    TxPolicies,
    WalletUnlocked,
};
use rand::Rng;
use tracing::debug;

use crate::error::{DeployError, Result};
use crate::runtime::{CardDeckContract, ContractFactory, MintReceipt, NetworkRuntime, Signer};

abigen!(
    Contract(
        name = "CardDeck",
        abi = "card_deck/out/release/card_deck-abi.json"
    ),
);

/// `CardDeck` -> `card_deck`, the forc project and artifact name.
pub fn artifact_name(contract: &str) -> String {
    let mut name = String::with_capacity(contract.len() + 4);
    for (i, c) in contract.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// CardDeck takes its proofs as a Sway `str`, which only carries ASCII.
pub fn proof_argument(proof: &str) -> Result<AsciiString> {
    Ok(AsciiString::new(proof.to_string())?)
}

pub fn artifact_path(contracts_dir: &Path, contract: &str) -> PathBuf {
    let name = artifact_name(contract);
    contracts_dir
        .join(&name)
        .join("out")
        .join("release")
        .join(format!("{}.bin", name))
}

impl Signer for WalletUnlocked {
    fn address(&self) -> String {
        ViewOnlyAccount::address(self).to_string()
    }
}

/// A Fuel node reached through a funded deployer wallet.
pub struct FuelRuntime {
    deployer: WalletUnlocked,
    signers: Vec<WalletUnlocked>,
    contracts_dir: PathBuf,
}

impl FuelRuntime {
    pub fn new(deployer: WalletUnlocked, signers: Vec<WalletUnlocked>, contracts_dir: PathBuf) -> Self {
        FuelRuntime {
            deployer,
            signers,
            contracts_dir,
        }
    }
}

impl NetworkRuntime for FuelRuntime {
    type Signer = WalletUnlocked;
    type Contract = FuelCardDeck;
    type Factory = FuelContractFactory;

    async fn contract_factory(&self, name: &str) -> Result<FuelContractFactory> {
        let bin_path = artifact_path(&self.contracts_dir, name);
        if !bin_path.is_file() {
            return Err(DeployError::ArtifactNotFound(bin_path));
        }
        debug!("Resolved {} artifact at {}", name, bin_path.display());
        Ok(FuelContractFactory {
            bin_path,
            wallet: self.deployer.clone(),
        })
    }

    async fn signers(&self) -> Result<Vec<WalletUnlocked>> {
        Ok(self.signers.clone())
    }
}

pub struct FuelContractFactory {
    bin_path: PathBuf,
    wallet: WalletUnlocked,
}

impl ContractFactory for FuelContractFactory {
    type Contract = FuelCardDeck;

    // deploy() returns once the transaction is committed
    async fn deploy(self) -> Result<FuelCardDeck> {
        let salt: [u8; 32] = rand::thread_rng().gen();
        let contract_id: ContractId = Contract::load_from(
            &self.bin_path,
            LoadConfiguration::default(),
        )?
            .with_salt(salt)
            .deploy(&self.wallet, TxPolicies::default())
            .await?
            .into();
        Ok(FuelCardDeck::connect_existing(contract_id, self.wallet))
    }
}

#[derive(Clone)]
pub struct FuelCardDeck {
    contract_id: ContractId,
    instance: CardDeck<WalletUnlocked>,
}

impl FuelCardDeck {
    /// Attaches to a CardDeck that is already on chain.
    pub fn connect_existing(contract_id: ContractId, wallet: WalletUnlocked) -> Self {
        FuelCardDeck {
            contract_id,
            instance: CardDeck::new(contract_id, wallet),
        }
    }

    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }
}

impl CardDeckContract for FuelCardDeck {
    type Signer = WalletUnlocked;

    fn address(&self) -> String {
        format!("{:#x}", self.contract_id)
    }

    fn connect(&self, signer: &WalletUnlocked) -> Self {
        FuelCardDeck {
            contract_id: self.contract_id,
            instance: self.instance.clone().with_account(signer.clone()),
        }
    }

    async fn mint(&self, id: u64, proof: &str) -> Result<MintReceipt> {
        let response = self
            .instance
            .methods()
            .mint(id, proof_argument(proof)?)
            .call()
            .await?;
        Ok(MintReceipt {
            id,
            tx_id: response.tx_id.map(|tx_id| format!("{:#x}", tx_id)),
        })
    }

    async fn get_mint(&self, id: u64) -> Result<String> {
        let proof = self
            .instance
            .methods()
            .get_mint(id)
            .simulate(Execution::StateReadOnly)
            .await?
            .value;
        Ok(proof.to_string())
    }
}
