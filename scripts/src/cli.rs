//! Definitions of CLI arguments and commands for the deploy scripts

use std::{
    fmt::{self, Display},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ethers::providers::Middleware;

use crate::{
    commands::{deploy_all, deploy_contract},
    constants::{
        CHARACTER_ABI, CHARACTER_BYTECODE, CHARACTER_CONTRACT_KEY, DEFAULT_DEPLOYMENTS_PATH,
        DEFAULT_EXTERNAL_TOKEN_ADDRESS, DEFAULT_INITIAL_SUPPLY, DEFAULT_RATE_EXTERNAL_TO_GAME,
        DEFAULT_RATE_GAME_TO_EXTERNAL, DEFAULT_RPC_URL, EXCHANGE_ABI, EXCHANGE_BYTECODE,
        EXCHANGE_CONTRACT_KEY, ITEMS_ABI, ITEMS_BYTECODE, ITEMS_CONTRACT_KEY, TOKEN_ABI,
        TOKEN_BYTECODE, TOKEN_CONTRACT_KEY,
    },
    errors::ScriptError,
};

/// Manage deployments of the Arcadia game contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Path to the file in which deployed addresses are recorded
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The deploy script commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy all of the game contracts in dependency order
    DeployAll(DeployAllArgs),
    /// Deploy a single game contract
    DeployContract(DeployContractArgs),
}

impl Command {
    /// Run the command against the given RPC client
    pub async fn run(
        self,
        client: Arc<impl Middleware>,
        deployments_path: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::DeployAll(args) => deploy_all(args, client, deployments_path).await,
            Command::DeployContract(args) => {
                deploy_contract(args, client, deployments_path).await
            }
        }
    }
}

/// Deploy the full set of game contracts.
///
/// Contracts are deployed in the order token, items, character, exchange;
/// the exchange constructor receives the freshly deployed token's address.
#[derive(Args)]
pub struct DeployAllArgs {
    /// Initial token supply minted to the deployer
    #[arg(long, default_value_t = DEFAULT_INITIAL_SUPPLY)]
    pub initial_supply: u64,

    /// Address of the external token the exchange trades against
    #[arg(long, default_value = DEFAULT_EXTERNAL_TOKEN_ADDRESS)]
    pub external_token: String,

    /// Game-token-to-external-token conversion rate
    #[arg(long, default_value_t = DEFAULT_RATE_GAME_TO_EXTERNAL)]
    pub rate_game_to_external: u64,

    /// External-token-to-game-token conversion rate
    #[arg(long, default_value_t = DEFAULT_RATE_EXTERNAL_TO_GAME)]
    pub rate_external_to_game: u64,
}

/// Deploy a single game contract.
///
/// The exchange depends on the game token's address; it is taken from
/// `--token-address` when given, and from the deployments file otherwise.
#[derive(Args)]
pub struct DeployContractArgs {
    /// The contract to deploy
    #[arg(short, long)]
    pub contract: ArcadiaContract,

    /// Initial token supply minted to the deployer (token only)
    #[arg(long, default_value_t = DEFAULT_INITIAL_SUPPLY)]
    pub initial_supply: u64,

    /// Address of the game token (exchange only)
    #[arg(long)]
    pub token_address: Option<String>,

    /// Address of the external token the exchange trades against (exchange only)
    #[arg(long, default_value = DEFAULT_EXTERNAL_TOKEN_ADDRESS)]
    pub external_token: String,

    /// Game-token-to-external-token conversion rate (exchange only)
    #[arg(long, default_value_t = DEFAULT_RATE_GAME_TO_EXTERNAL)]
    pub rate_game_to_external: u64,

    /// External-token-to-game-token conversion rate (exchange only)
    #[arg(long, default_value_t = DEFAULT_RATE_EXTERNAL_TO_GAME)]
    pub rate_external_to_game: u64,
}

/// The deployable game contracts
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArcadiaContract {
    /// The fungible game token
    Token,
    /// The game items contract
    Items,
    /// The player character contract
    Character,
    /// The token exchange contract
    Exchange,
}

impl ArcadiaContract {
    /// The name of the compiled contract
    pub fn name(&self) -> &'static str {
        match self {
            ArcadiaContract::Token => "ArcadiaToken",
            ArcadiaContract::Items => "ArcadiaItems",
            ArcadiaContract::Character => "ArcadiaCharacter",
            ArcadiaContract::Exchange => "ArcadiaExchange",
        }
    }

    /// The deployments-file key under which this contract's address is recorded
    pub fn deployments_key(&self) -> &'static str {
        match self {
            ArcadiaContract::Token => TOKEN_CONTRACT_KEY,
            ArcadiaContract::Items => ITEMS_CONTRACT_KEY,
            ArcadiaContract::Character => CHARACTER_CONTRACT_KEY,
            ArcadiaContract::Exchange => EXCHANGE_CONTRACT_KEY,
        }
    }

    /// The embedded compilation artifact for this contract,
    /// as an (ABI, bytecode) pair
    pub fn artifact(&self) -> (&'static str, &'static str) {
        match self {
            ArcadiaContract::Token => (TOKEN_ABI, TOKEN_BYTECODE),
            ArcadiaContract::Items => (ITEMS_ABI, ITEMS_BYTECODE),
            ArcadiaContract::Character => (CHARACTER_ABI, CHARACTER_BYTECODE),
            ArcadiaContract::Exchange => (EXCHANGE_ABI, EXCHANGE_BYTECODE),
        }
    }
}

impl Display for ArcadiaContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
