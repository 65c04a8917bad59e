//! Constants used in the deploy scripts

/// The ABI of the ArcadiaToken contract
pub const TOKEN_ABI: &str = include_str!("../artifacts/ArcadiaToken.abi");

/// The bytecode of the ArcadiaToken contract
pub const TOKEN_BYTECODE: &str = include_str!("../artifacts/ArcadiaToken.bin");

/// The ABI of the ArcadiaItems contract
pub const ITEMS_ABI: &str = include_str!("../artifacts/ArcadiaItems.abi");

/// The bytecode of the ArcadiaItems contract
pub const ITEMS_BYTECODE: &str = include_str!("../artifacts/ArcadiaItems.bin");

/// The ABI of the ArcadiaCharacter contract
pub const CHARACTER_ABI: &str = include_str!("../artifacts/ArcadiaCharacter.abi");

/// The bytecode of the ArcadiaCharacter contract
pub const CHARACTER_BYTECODE: &str = include_str!("../artifacts/ArcadiaCharacter.bin");

/// The ABI of the ArcadiaExchange contract
pub const EXCHANGE_ABI: &str = include_str!("../artifacts/ArcadiaExchange.abi");

/// The bytecode of the ArcadiaExchange contract
pub const EXCHANGE_BYTECODE: &str = include_str!("../artifacts/ArcadiaExchange.bin");

/// The number of confirmations to wait for a contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 1;

/// The top-level key under which deployed addresses are recorded
/// in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The deployments-file key for the token contract
pub const TOKEN_CONTRACT_KEY: &str = "token";

/// The deployments-file key for the items contract
pub const ITEMS_CONTRACT_KEY: &str = "items";

/// The deployments-file key for the character contract
pub const CHARACTER_CONTRACT_KEY: &str = "character";

/// The deployments-file key for the exchange contract
pub const EXCHANGE_CONTRACT_KEY: &str = "exchange";

/// The default RPC URL (a local devnet)
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The initial token supply minted to the deployer by the
/// token constructor
pub const DEFAULT_INITIAL_SUPPLY: u64 = 1_000_000_000;

/// The address of the external token the exchange trades against
pub const DEFAULT_EXTERNAL_TOKEN_ADDRESS: &str = "0x51eF9Ae8f376A39A8fd18D96888c7Dc05C703747";

/// The game-token-to-external-token conversion rate
pub const DEFAULT_RATE_GAME_TO_EXTERNAL: u64 = 1000;

/// The external-token-to-game-token conversion rate
pub const DEFAULT_RATE_EXTERNAL_TO_GAME: u64 = 100;
