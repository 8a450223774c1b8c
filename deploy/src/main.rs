use std::process::ExitCode;

use card_deck_deploy::deployer::{self, DeployTarget};
use card_deck_deploy::shared::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let result = deployer::deploy(DeployTarget::OnChain).await;
    ExitCode::from(deployer::exit_status(&result))
}
