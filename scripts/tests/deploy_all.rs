//! Tests for the full deployment sequence, run against a scripted
//! deployer so that no chain is required

use std::{str::FromStr, sync::Mutex};

use async_trait::async_trait;
use clap::Parser;
use ethers::{
    abi::Token,
    types::{Address, U256},
};
use eyre::Result;
use scripts::{
    cli::{ArcadiaContract, Cli, Command, DeployAllArgs},
    commands::deploy_game_contracts,
    constants::{
        DEFAULT_DEPLOYMENTS_PATH, DEFAULT_EXTERNAL_TOKEN_ADDRESS, DEFAULT_INITIAL_SUPPLY,
        DEFAULT_RATE_EXTERNAL_TO_GAME, DEFAULT_RATE_GAME_TO_EXTERNAL, DEFAULT_RPC_URL,
    },
    deploy::ContractDeployer,
    errors::ScriptError,
    utils::parse_addr_from_deployments_file,
};
use tempfile::TempDir;

/// The addresses the scripted deployer hands out, in deployment order
const SCRIPTED_ADDRESSES: [Address; 4] = [
    Address::repeat_byte(0xaa),
    Address::repeat_byte(0xbb),
    Address::repeat_byte(0xcc),
    Address::repeat_byte(0xdd),
];

/// A deployer that returns scripted addresses and records every call
#[derive(Default)]
struct ScriptedDeployer {
    /// The (contract, constructor args) pairs of the calls made so far
    calls: Mutex<Vec<(ArcadiaContract, Vec<Token>)>>,
    /// The call index at which to simulate a reverted deployment
    fail_at: Option<usize>,
}

impl ScriptedDeployer {
    fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(ArcadiaContract, Vec<Token>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractDeployer for ScriptedDeployer {
    async fn deploy(
        &self,
        contract: ArcadiaContract,
        ctor_args: Vec<Token>,
    ) -> Result<Address, ScriptError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((contract, ctor_args));

        if self.fail_at == Some(index) {
            return Err(ScriptError::ContractDeployment(
                "execution reverted".to_string(),
            ));
        }

        Ok(SCRIPTED_ADDRESSES[index])
    }
}

/// `DeployAllArgs` as a plain `deploy-all` invocation produces them
fn default_args() -> DeployAllArgs {
    DeployAllArgs {
        initial_supply: DEFAULT_INITIAL_SUPPLY,
        external_token: DEFAULT_EXTERNAL_TOKEN_ADDRESS.to_string(),
        rate_game_to_external: DEFAULT_RATE_GAME_TO_EXTERNAL,
        rate_external_to_game: DEFAULT_RATE_EXTERNAL_TO_GAME,
    }
}

/// A scratch deployments-file path inside a temp dir
fn deployments_path(dir: &TempDir) -> String {
    dir.path()
        .join("deployments.json")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_deploys_all_contracts_in_order() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = deployments_path(&dir);
    let deployer = ScriptedDeployer::default();

    let deployed = deploy_game_contracts(&deployer, &default_args(), &path).await?;

    let order: Vec<ArcadiaContract> = deployer.calls().into_iter().map(|(c, _)| c).collect();
    assert_eq!(
        order,
        vec![
            ArcadiaContract::Token,
            ArcadiaContract::Items,
            ArcadiaContract::Character,
            ArcadiaContract::Exchange,
        ]
    );

    assert_eq!(deployed.token, SCRIPTED_ADDRESSES[0]);
    assert_eq!(deployed.items, SCRIPTED_ADDRESSES[1]);
    assert_eq!(deployed.character, SCRIPTED_ADDRESSES[2]);
    assert_eq!(deployed.exchange, SCRIPTED_ADDRESSES[3]);

    // Each address must also have been recorded in the deployments file
    for (contract, address) in [
        (ArcadiaContract::Token, deployed.token),
        (ArcadiaContract::Items, deployed.items),
        (ArcadiaContract::Character, deployed.character),
        (ArcadiaContract::Exchange, deployed.exchange),
    ] {
        assert_eq!(
            parse_addr_from_deployments_file(&path, contract.deployments_key())?,
            address,
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_exchange_receives_token_address() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let deployer = ScriptedDeployer::default();

    let deployed =
        deploy_game_contracts(&deployer, &default_args(), &deployments_path(&dir)).await?;

    let calls = deployer.calls();
    let (contract, exchange_args) = calls.last().unwrap();

    assert_eq!(*contract, ArcadiaContract::Exchange);
    assert_eq!(exchange_args[0], Token::Address(deployed.token));

    Ok(())
}

#[tokio::test]
async fn test_default_constructor_args() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let deployer = ScriptedDeployer::default();

    deploy_game_contracts(&deployer, &default_args(), &deployments_path(&dir)).await?;

    let calls = deployer.calls();
    let external_token = Address::from_str(DEFAULT_EXTERNAL_TOKEN_ADDRESS)?;

    assert_eq!(calls[0].1, vec![Token::Uint(U256::from(1_000_000_000u64))]);
    assert!(calls[1].1.is_empty());
    assert!(calls[2].1.is_empty());
    assert_eq!(
        calls[3].1,
        vec![
            Token::Address(SCRIPTED_ADDRESSES[0]),
            Token::Address(external_token),
            Token::Uint(U256::from(1000u64)),
            Token::Uint(U256::from(100u64)),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_aborts_after_failed_deployment() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = deployments_path(&dir);

    // Simulate a revert on the items deployment (the second call)
    let deployer = ScriptedDeployer::failing_at(1);

    let err = deploy_game_contracts(&deployer, &default_args(), &path)
        .await
        .unwrap_err();
    assert!(matches!(err, ScriptError::ContractDeployment(_)));

    // Token and items were attempted; character and exchange never were
    let order: Vec<ArcadiaContract> = deployer.calls().into_iter().map(|(c, _)| c).collect();
    assert_eq!(order, vec![ArcadiaContract::Token, ArcadiaContract::Items]);

    // The token's address was recorded before the failure and survives it
    assert_eq!(
        parse_addr_from_deployments_file(&path, ArcadiaContract::Token.deployments_key())?,
        SCRIPTED_ADDRESSES[0],
    );
    assert!(parse_addr_from_deployments_file(
        &path,
        ArcadiaContract::Items.deployments_key()
    )
    .is_err());

    Ok(())
}

#[tokio::test]
async fn test_malformed_external_token_fails_before_deploying() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let deployer = ScriptedDeployer::default();

    let args = DeployAllArgs {
        external_token: "not-an-address".to_string(),
        ..default_args()
    };

    let err = deploy_game_contracts(&deployer, &args, &deployments_path(&dir))
        .await
        .unwrap_err();
    assert!(matches!(err, ScriptError::CalldataConstruction(_)));
    assert!(deployer.calls().is_empty());

    Ok(())
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["scripts", "--priv-key", "0xdeadbeef", "deploy-all"]).unwrap();

    assert_eq!(cli.rpc_url, DEFAULT_RPC_URL);
    assert_eq!(cli.deployments_path, DEFAULT_DEPLOYMENTS_PATH);

    let Command::DeployAll(args) = cli.command else {
        panic!("expected deploy-all");
    };
    assert_eq!(args.initial_supply, DEFAULT_INITIAL_SUPPLY);
    assert_eq!(args.external_token, DEFAULT_EXTERNAL_TOKEN_ADDRESS);
    assert_eq!(args.rate_game_to_external, DEFAULT_RATE_GAME_TO_EXTERNAL);
    assert_eq!(args.rate_external_to_game, DEFAULT_RATE_EXTERNAL_TO_GAME);
}
