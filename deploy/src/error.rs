use std::path::PathBuf;
use thiserror::Error;

use crate::deployer::Stage;

pub type Result<T> = std::result::Result<T, DeployError>;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Contract artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("No signer accounts are available")]
    NoSigners,
    #[error("The contract hasn't been deployed yet")]
    NotDeployed,
    #[error("No signer has been selected")]
    SignerNotSelected,
    #[error("Expected deployer stage {expected:?}, found {actual:?}")]
    InvalidStage { expected: Stage, actual: Stage },
    #[error("Mint {id} failed: {source}")]
    MintFailed {
        id: u64,
        #[source]
        source: Box<DeployError>,
    },
    #[error("Mint {id} stored proof {actual}, expected {expected}")]
    ProofMismatch {
        id: u64,
        expected: String,
        actual: String,
    },
    #[error("Invalid mint request {id}: {reason}")]
    InvalidMintRequest { id: u64, reason: &'static str },
    #[error("Missing env var {0}")]
    MissingEnv(&'static str),
    #[error("Invalid env var {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Fuel error: {0}")]
    Fuel(#[from] fuels::types::errors::Error),
    #[error("Runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}
