//! The "deploy and wait" seam: submitting a contract-creation transaction
//! and suspending until it is mined.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    abi::{Abi, Token},
    contract::ContractFactory,
    providers::Middleware,
    types::{Address, Bytes},
    utils::hex::FromHex,
};

use crate::{cli::ArcadiaContract, constants::NUM_DEPLOY_CONFIRMATIONS, errors::ScriptError};

/// A capability for deploying a game contract and waiting for the
/// creation transaction to be mined.
///
/// The production implementation submits through an RPC client; tests
/// substitute a scripted implementation so that orchestration order can
/// be exercised without a chain.
#[async_trait]
pub trait ContractDeployer {
    /// Deploy `contract` with the given constructor arguments, returning
    /// the deployed contract's address once the transaction is mined
    async fn deploy(
        &self,
        contract: ArcadiaContract,
        ctor_args: Vec<Token>,
    ) -> Result<Address, ScriptError>;
}

/// Deploys contracts from their embedded compilation artifacts via a
/// contract factory
pub struct FactoryDeployer<M> {
    /// The RPC client with which deployment transactions are signed
    /// and submitted
    client: Arc<M>,
}

impl<M> FactoryDeployer<M> {
    /// Construct a deployer around an RPC client
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<M: Middleware> ContractDeployer for FactoryDeployer<M> {
    async fn deploy(
        &self,
        contract: ArcadiaContract,
        ctor_args: Vec<Token>,
    ) -> Result<Address, ScriptError> {
        let (abi, bytecode) = parse_artifact(contract)?;

        let factory = ContractFactory::new(abi, bytecode, self.client.clone());
        let deployed = factory
            .deploy_tokens(ctor_args)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(deployed.address())
    }
}

/// Parse a contract's embedded compilation artifact into its ABI
/// and bytecode
pub fn parse_artifact(contract: ArcadiaContract) -> Result<(Abi, Bytes), ScriptError> {
    let (raw_abi, raw_bytecode) = contract.artifact();

    let abi: Abi =
        serde_json::from_str(raw_abi).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    let bytecode = Bytes::from_hex(raw_bytecode.trim_end())
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    Ok((abi, bytecode))
}
