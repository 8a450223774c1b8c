use crate::error::{DeployError, Result};

pub const FIRST_CARD_ID: u64 = 1;
pub const FIRST_CARD_PROOF: &str = "0x21373022272527af1283e01282b202d";
pub const SECOND_CARD_ID: u64 = 2;
pub const SECOND_CARD_PROOF: &str = "0x21373022272527af3434847ef2d";

/// A single `mint(id, proof)` call. The proof is opaque to us and is handed
/// to the contract as-is. Only built through [`MintRequest::new`] or
/// [`card_deck_mints`], so every request has a positive id and a hex proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    id: u64,
    proof: String,
}

impl MintRequest {
    pub fn new(id: u64, proof: impl Into<String>) -> Result<Self> {
        let proof = proof.into();
        if id == 0 {
            return Err(DeployError::InvalidMintRequest {
                id,
                reason: "id must be positive",
            });
        }
        let digits = proof
            .strip_prefix("0x")
            .ok_or(DeployError::InvalidMintRequest {
                id,
                reason: "proof must start with 0x",
            })?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DeployError::InvalidMintRequest {
                id,
                reason: "proof must be hex encoded",
            });
        }
        Ok(MintRequest { id, proof })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn proof(&self) -> &str {
        &self.proof
    }
}

/// The two cards minted right after deployment.
pub fn card_deck_mints() -> Vec<MintRequest> {
    vec![
        MintRequest {
            id: FIRST_CARD_ID,
            proof: FIRST_CARD_PROOF.to_string(),
        },
        MintRequest {
            id: SECOND_CARD_ID,
            proof: SECOND_CARD_PROOF.to_string(),
        },
    ]
}
