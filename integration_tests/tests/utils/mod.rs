use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use card_deck_deploy::error::Result;
use card_deck_deploy::runtime::{CardDeckContract, ContractFactory, MintReceipt, NetworkRuntime, Signer};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub const DEPLOYED_ADDRESS: &str = "0xABC0000000000000000000000000000000000000";
pub const FIRST_SIGNER: &str = "0xSIGNER1";

/// Every collaborator call the mock observes, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ContractFactory(String),
    Deploy,
    Signers,
    Mint { id: u64, proof: String, signer: Option<String> },
    GetMint(u64),
}

#[derive(Default)]
struct MockState {
    address: String,
    signers: Vec<String>,
    calls: Vec<Call>,
    minted: HashMap<u64, String>,
    fail_deployment: bool,
    fail_signers: bool,
    rejected_mint: Option<u64>,
    tampered: HashMap<u64, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSigner(pub String);

impl Signer for MockSigner {
    fn address(&self) -> String {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct MockRuntime {
    state: Arc<Mutex<MockState>>,
}

impl MockRuntime {
    pub fn new(address: &str) -> Self {
        MockRuntime {
            state: Arc::new(Mutex::new(MockState {
                address: address.to_string(),
                ..MockState::default()
            })),
        }
    }

    pub fn with_signers(self, signers: &[&str]) -> Self {
        self.state.lock().unwrap().signers = signers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn failing_deployment(self) -> Self {
        self.state.lock().unwrap().fail_deployment = true;
        self
    }

    pub fn failing_signers(self) -> Self {
        self.state.lock().unwrap().fail_signers = true;
        self
    }

    pub fn rejecting_mint(self, id: u64) -> Self {
        self.state.lock().unwrap().rejected_mint = Some(id);
        self
    }

    /// Makes `get_mint(id)` report `proof` regardless of what was minted.
    pub fn tampering_with(self, id: u64, proof: &str) -> Self {
        self.state.lock().unwrap().tampered.insert(id, proof.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mints(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Mint { id, proof, .. } => Some((id, proof)),
                _ => None,
            })
            .collect()
    }

    pub fn minted(&self) -> HashMap<u64, String> {
        self.state.lock().unwrap().minted.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl NetworkRuntime for MockRuntime {
    type Signer = MockSigner;
    type Contract = MockCardDeck;
    type Factory = MockFactory;

    async fn contract_factory(&self, name: &str) -> Result<MockFactory> {
        self.record(Call::ContractFactory(name.to_string()));
        Ok(MockFactory {
            runtime: self.clone(),
        })
    }

    async fn signers(&self) -> Result<Vec<MockSigner>> {
        self.record(Call::Signers);
        let state = self.state.lock().unwrap();
        if state.fail_signers {
            return Err(anyhow!("accounts are not accessible").into());
        }
        Ok(state.signers.iter().cloned().map(MockSigner).collect())
    }
}

pub struct MockFactory {
    runtime: MockRuntime,
}

impl ContractFactory for MockFactory {
    type Contract = MockCardDeck;

    async fn deploy(self) -> Result<MockCardDeck> {
        self.runtime.record(Call::Deploy);
        if self.runtime.state.lock().unwrap().fail_deployment {
            return Err(anyhow!("deployment was not confirmed").into());
        }
        Ok(MockCardDeck {
            runtime: self.runtime,
            signer: None,
        })
    }
}

pub struct MockCardDeck {
    runtime: MockRuntime,
    signer: Option<MockSigner>,
}

impl CardDeckContract for MockCardDeck {
    type Signer = MockSigner;

    fn address(&self) -> String {
        self.runtime.state.lock().unwrap().address.clone()
    }

    fn connect(&self, signer: &MockSigner) -> Self {
        MockCardDeck {
            runtime: self.runtime.clone(),
            signer: Some(signer.clone()),
        }
    }

    async fn mint(&self, id: u64, proof: &str) -> Result<MintReceipt> {
        self.runtime.record(Call::Mint {
            id,
            proof: proof.to_string(),
            signer: self.signer.as_ref().map(|s| s.0.clone()),
        });
        let mut state = self.runtime.state.lock().unwrap();
        if state.rejected_mint == Some(id) {
            return Err(anyhow!("execution reverted: invalid proof").into());
        }
        if state.minted.contains_key(&id) {
            return Err(anyhow!("execution reverted: card already minted").into());
        }
        state.minted.insert(id, proof.to_string());
        Ok(MintReceipt {
            id,
            tx_id: Some(format!("0x{:064x}", id)),
        })
    }

    async fn get_mint(&self, id: u64) -> Result<String> {
        self.runtime.record(Call::GetMint(id));
        let state = self.runtime.state.lock().unwrap();
        state
            .tampered
            .get(&id)
            .or_else(|| state.minted.get(&id))
            .cloned()
            .ok_or_else(|| anyhow!("card {} is not minted", id).into())
    }
}

/// Collects formatted log output for the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn install() -> (CapturedLogs, DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

pub struct CapturedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter {
            buffer: self.buffer.clone(),
        }
    }
}
