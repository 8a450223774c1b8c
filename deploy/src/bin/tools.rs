use std::process::ExitCode;
use std::str::FromStr;

use card_deck_deploy::deployer::exit_status;
use card_deck_deploy::error::{DeployError, Result};
use card_deck_deploy::fixture::MintRequest;
use card_deck_deploy::fuel::FuelCardDeck;
use card_deck_deploy::runtime::CardDeckContract;
use card_deck_deploy::shared::{config, get_wallets, init_tracing};
use clap::{Parser, Subcommand};
use fuels::prelude::ContractId;
use tracing::info;

/// Operator calls against an already deployed CardDeck.
#[derive(Parser)]
struct Cli {
    /// Contract id of the deployed CardDeck.
    #[arg(long)]
    contract: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the proof stored for a card.
    GetMint {
        #[arg(long)]
        id: u64,
    },
    /// Mint a single card with the deployer wallet.
    Mint {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        proof: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let result = call_on_chain_function(cli).await;
    ExitCode::from(exit_status(&result))
}

async fn call_on_chain_function(cli: Cli) -> Result<()> {
    let contract_id = ContractId::from_str(&cli.contract).map_err(|err| DeployError::InvalidEnv {
        name: "--contract",
        reason: err.to_string(),
    })?;
    let config = config()?;
    let (deployer, _) = get_wallets(&config).await?;
    let card_deck = FuelCardDeck::connect_existing(contract_id, deployer);

    match cli.command {
        Command::GetMint { id } => {
            let proof = card_deck.get_mint(id).await?;
            info!("mint {}: {}", id, proof);
        }
        Command::Mint { id, proof } => {
            let request = MintRequest::new(id, proof)?;
            let receipt = card_deck.mint(request.id(), request.proof()).await?;
            info!("Minted a card: {:?}", receipt);
        }
    }
    Ok(())
}
