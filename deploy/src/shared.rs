use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;
use fuels::crypto::SecretKey;
use fuels::prelude::{Provider, WalletUnlocked};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::error::{DeployError, Result};

const DEFAULT_CONTRACTS_DIR: &str = "..";

#[derive(Clone)]
pub struct Config {
    pub fuel_url: String,
    pub deployer_pk: String,
    pub signer_pks: Vec<String>,
    pub contracts_dir: PathBuf,
    pub verify_mints: bool,
}

impl Config {
    /// Builds the config from any key/value source, usually the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(DeployError::MissingEnv(name));
        let fuel_url = required("FUEL_URL")?;
        let deployer_pk = required("DEPLOYER_PK")?;
        // an empty SIGNER_PKS is honoured and leaves no signers
        let signer_pks = match lookup("SIGNER_PKS") {
            Some(keys) => keys
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect(),
            None => vec![deployer_pk.clone()],
        };
        let contracts_dir = lookup("CONTRACTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTRACTS_DIR));
        let verify_mints = match lookup("VERIFY_MINTS") {
            Some(value) => parse_flag("VERIFY_MINTS", &value)?,
            None => false,
        };
        Ok(Config {
            fuel_url,
            deployer_pk,
            signer_pks,
            contracts_dir,
            verify_mints,
        })
    }
}

/// Loads `.env` if present, then reads the config from the environment.
pub fn config() -> Result<Config> {
    match dotenv() {
        Ok(_) => {}
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err.into()),
    }
    Config::from_lookup(|name| std::env::var(name).ok())
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => Err(DeployError::InvalidEnv {
            name,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}

fn wallet_from_key(name: &'static str, pk: &str, provider: &Provider) -> Result<WalletUnlocked> {
    let secret_key = SecretKey::from_str(pk).map_err(|err| DeployError::InvalidEnv {
        name,
        reason: format!("{:?}", err),
    })?;
    Ok(WalletUnlocked::new_from_private_key(secret_key, Some(provider.clone())))
}

/// Returns the deployer wallet and the signer wallets, in configured order.
pub async fn get_wallets(config: &Config) -> Result<(WalletUnlocked, Vec<WalletUnlocked>)> {
    let provider = Provider::connect(&config.fuel_url).await?;
    let deployer = wallet_from_key("DEPLOYER_PK", &config.deployer_pk, &provider)?;
    let signers = config
        .signer_pks
        .iter()
        .map(|pk| wallet_from_key("SIGNER_PKS", pk, &provider))
        .collect::<Result<Vec<_>>>()?;
    Ok((deployer, signers))
}

/// Warnings and errors go to stderr, everything else to stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout))
        .init();
}
