//! Implementations of the deploy commands

use std::sync::Arc;

use ethers::{
    abi::Token,
    providers::Middleware,
    types::{Address, U256},
};
use tracing::info;

use crate::{
    cli::{ArcadiaContract, DeployAllArgs, DeployContractArgs},
    deploy::{ContractDeployer, FactoryDeployer},
    errors::ScriptError,
    utils::{parse_addr_from_deployments_file, parse_address, write_deployed_address},
};

/// The deployed addresses of a full deployment run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployedAddresses {
    /// The game token contract address
    pub token: Address,
    /// The items contract address
    pub items: Address,
    /// The character contract address
    pub character: Address,
    /// The exchange contract address
    pub exchange: Address,
}

/// Deploy all four game contracts in dependency order
pub async fn deploy_all(
    args: DeployAllArgs,
    client: Arc<impl Middleware>,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let deployer = FactoryDeployer::new(client);
    deploy_game_contracts(&deployer, &args, deployments_path).await?;
    Ok(())
}

/// Deploy the game contracts in the order token, items, character,
/// exchange, recording each address in the deployments file as it lands.
///
/// A deployment failure is fatal: contracts deployed before the failing
/// step stay on chain and in the deployments file, and nothing after it
/// is attempted.
pub async fn deploy_game_contracts(
    deployer: &impl ContractDeployer,
    args: &DeployAllArgs,
    deployments_path: &str,
) -> Result<DeployedAddresses, ScriptError> {
    // Resolve the external token address up front, before any
    // transaction is submitted
    let external_token = parse_address(&args.external_token)?;

    let token = deploy_and_record(
        deployer,
        ArcadiaContract::Token,
        vec![Token::Uint(U256::from(args.initial_supply))],
        deployments_path,
    )
    .await?;

    let items =
        deploy_and_record(deployer, ArcadiaContract::Items, vec![], deployments_path).await?;

    let character = deploy_and_record(
        deployer,
        ArcadiaContract::Character,
        vec![],
        deployments_path,
    )
    .await?;

    let exchange = deploy_and_record(
        deployer,
        ArcadiaContract::Exchange,
        exchange_ctor_args(
            token,
            external_token,
            args.rate_game_to_external,
            args.rate_external_to_game,
        ),
        deployments_path,
    )
    .await?;

    Ok(DeployedAddresses {
        token,
        items,
        character,
        exchange,
    })
}

/// Deploy a single game contract
pub async fn deploy_contract(
    args: DeployContractArgs,
    client: Arc<impl Middleware>,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let ctor_args = match args.contract {
        ArcadiaContract::Token => vec![Token::Uint(U256::from(args.initial_supply))],
        ArcadiaContract::Items | ArcadiaContract::Character => vec![],
        ArcadiaContract::Exchange => {
            let token = match &args.token_address {
                Some(addr) => parse_address(addr)?,
                None => parse_addr_from_deployments_file(
                    deployments_path,
                    ArcadiaContract::Token.deployments_key(),
                )?,
            };
            let external_token = parse_address(&args.external_token)?;

            exchange_ctor_args(
                token,
                external_token,
                args.rate_game_to_external,
                args.rate_external_to_game,
            )
        }
    };

    let deployer = FactoryDeployer::new(client);
    deploy_and_record(&deployer, args.contract, ctor_args, deployments_path).await?;

    Ok(())
}

/// Deploy a contract, print its address, and record it in the
/// deployments file
async fn deploy_and_record(
    deployer: &impl ContractDeployer,
    contract: ArcadiaContract,
    ctor_args: Vec<Token>,
    deployments_path: &str,
) -> Result<Address, ScriptError> {
    info!("Deploying {contract}...");
    let address = deployer.deploy(contract, ctor_args).await?;

    println!("{contract} deployed at {address:#x}");
    write_deployed_address(deployments_path, contract.deployments_key(), address)?;

    Ok(address)
}

/// Assemble the exchange constructor arguments.
///
/// The first argument must be the game token's address; the exchange
/// converts between it and the external token at the two given rates.
fn exchange_ctor_args(
    token: Address,
    external_token: Address,
    rate_game_to_external: u64,
    rate_external_to_game: u64,
) -> Vec<Token> {
    vec![
        Token::Address(token),
        Token::Address(external_token),
        Token::Uint(U256::from(rate_game_to_external)),
        Token::Uint(U256::from(rate_external_to_game)),
    ]
}
