use config::{Config as ConfigLoader, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::contract::parse_address;
use crate::error::Error;
use crate::logging::LoggingConfig;

/// OP token / governance predeploy on Optimism
pub const OP_PREDEPLOY_ADDRESS: &str = "0x4200000000000000000000000000000000000042";

/// CAIP-2 identifier for OP Mainnet
pub const OPTIMISM_CHAIN_ID: &str = "eip155:10";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "OP_FRAME";

/// Chain the frame's transactions target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
    /// Human-readable chain name
    pub name: String,
    /// CAIP-2 chain id (e.g., eip155:10)
    pub chain_id: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: "optimism".to_string(),
            chain_id: OPTIMISM_CHAIN_ID.to_string(),
        }
    }
}

impl ChainConfig {
    /// Numeric EVM chain id from the `eip155:<id>` form
    pub fn numeric_id(&self) -> Result<u64, Error> {
        self.chain_id
            .strip_prefix("eip155:")
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Chain id must look like eip155:<number>, got '{}'",
                    self.chain_id
                ))
            })
    }
}

/// Contract address configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContractAddresses {
    /// ERC-20 token whose allowance is approved
    pub token: String,
    /// Governance contract that receives the approval and the delegation
    pub delegate: String,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            token: OP_PREDEPLOY_ADDRESS.to_string(),
            delegate: OP_PREDEPLOY_ADDRESS.to_string(),
        }
    }
}

/// Token information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenInfo {
    /// Token symbol shown on screens
    pub symbol: String,
    /// Token decimals used to scale entered amounts
    pub decimals: u8,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            symbol: "OP".to_string(),
            decimals: 18,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Path prefix all screens are served under
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            base_path: "/api".to_string(),
        }
    }
}

/// Complete frame configuration, built once at startup and shared read-only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame title
    pub title: String,
    /// Target chain
    pub chain: ChainConfig,
    /// Contract addresses
    pub contracts: ContractAddresses,
    /// Token metadata
    pub token: TokenInfo,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            title: "OP Delegation Farcaster".to_string(),
            chain: ChainConfig::default(),
            contracts: ContractAddresses::default(),
            token: TokenInfo::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FrameConfig {
    /// Set the token contract address
    pub fn with_token_contract(mut self, token: impl Into<String>) -> Self {
        self.contracts.token = token.into();
        self
    }

    /// Set the delegate contract address
    pub fn with_delegate_contract(mut self, delegate: impl Into<String>) -> Self {
        self.contracts.delegate = delegate.into();
        self
    }

    /// Set the chain id
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain.chain_id = chain_id.into();
        self
    }

    /// Set the base path screens are served under
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.server.base_path = base_path.into();
        self
    }

    /// Layer defaults, an optional config file and `OP_FRAME_*` environment variables
    ///
    /// Nested keys use a double underscore, e.g. `OP_FRAME_CONTRACTS__TOKEN` or
    /// `OP_FRAME_SERVER__PORT`.
    pub fn from_sources(config_file: Option<&Path>) -> Result<Self, Error> {
        let mut builder =
            ConfigLoader::builder().add_source(ConfigLoader::try_from(&Self::default())?);

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: FrameConfig = settings.try_deserialize()?;
        config.logging.apply_env();

        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Load `.env` (if present), then layer the optional file and environment
    pub fn from_env(config_file: Option<&Path>) -> Result<Self, Error> {
        if let Err(e) = dotenv::dotenv() {
            debug!("Could not load .env file: {}", e);
        } else {
            info!("Loaded environment from .env file");
        }

        Self::from_sources(config_file)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &PathBuf) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let config: FrameConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &PathBuf) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("op-delegation-frame");
        path.push("config.toml");
        path
    }

    /// Config file to load: the explicit path, else the default path when it exists
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| {
            let path = Self::default_path();
            path.exists().then_some(path)
        })
    }

    /// Render the default configuration as a commented TOML document
    pub fn generate_example_config() -> Result<String, Error> {
        let body = toml::to_string_pretty(&Self::default())
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        Ok(format!(
            "# OP delegation frame configuration\n\
             # Every key can be overridden with OP_FRAME_<SECTION>__<KEY>, e.g. OP_FRAME_SERVER__PORT=8080\n\n{}",
            body
        ))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.is_empty() {
            return Err(Error::Config("Title cannot be empty".to_string()));
        }

        self.chain.numeric_id()?;

        parse_address(&self.contracts.token)
            .map_err(|e| Error::Config(format!("Token contract: {}", e)))?;
        parse_address(&self.contracts.delegate)
            .map_err(|e| Error::Config(format!("Delegate contract: {}", e)))?;

        if self.token.symbol.is_empty() {
            return Err(Error::Config("Token symbol cannot be empty".to_string()));
        }

        // 10^78 no longer fits in a uint256
        if self.token.decimals > 77 {
            return Err(Error::Config(format!(
                "Token decimals must be at most 77, got {}",
                self.token.decimals
            )));
        }

        if self.server.host.is_empty() {
            return Err(Error::Config("HTTP host cannot be empty".to_string()));
        }

        if self.server.port == 0 {
            return Err(Error::Config(
                "HTTP port must be greater than 0".to_string(),
            ));
        }

        let base = &self.server.base_path;
        if !base.starts_with('/') || (base.len() > 1 && base.ends_with('/')) {
            return Err(Error::Config(format!(
                "Base path must start with '/' and not end with '/', got '{}'",
                base
            )));
        }

        Ok(())
    }
}
