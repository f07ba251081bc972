//! Configuration for tokenattr sessions
//!
//! Describes which RPC endpoint serves which chain. A [`SessionPoolConfig`] is
//! turned into a live [`SessionPool`](crate::SessionPool) with
//! [`SessionPool::from_config`](crate::SessionPool::from_config).
//!
//! # Example: Explicit endpoints
//!
//! ```rust
//! use tokenattr::{ChainEndpoint, SessionPoolConfig};
//!
//! let config = SessionPoolConfig::builder()
//!     .endpoint(ChainEndpoint::mainnet("https://eth.llamarpc.com"))
//!     .endpoint(ChainEndpoint::arbitrum("https://arb1.arbitrum.io/rpc"))
//!     .build();
//! assert_eq!(config.endpoints.len(), 2);
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! use alloy_chains::NamedChain;
//! use tokenattr::SessionPoolConfig;
//!
//! // Reads ETHEREUM_RPC_URL and BASE_RPC_URL, loading `.env` if present
//! let config = SessionPoolConfig::from_env([NamedChain::Mainnet.into(), NamedChain::Base.into()])?;
//! ```

use alloy_chains::{Chain, NamedChain};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SessionError;

/// Endpoints of a session pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPoolConfig {
    /// One RPC endpoint per chain; later entries replace earlier ones
    pub endpoints: Vec<ChainEndpoint>,
}

impl SessionPoolConfig {
    #[must_use]
    pub fn builder() -> SessionPoolConfigBuilder {
        SessionPoolConfigBuilder::new()
    }

    /// Loads one endpoint per chain from `<CHAIN>_RPC_URL` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingEnvVar`] for the first chain whose
    /// variable is not set.
    pub fn from_env(chains: impl IntoIterator<Item = Chain>) -> Result<Self, SessionError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded environment file");
        }

        let mut builder = Self::builder();
        for chain in chains {
            let var = rpc_url_env_var(chain);
            let url = dotenvy::var(&var).map_err(|source| SessionError::MissingEnvVar {
                chain,
                var: var.clone(),
                source,
            })?;
            builder = builder.endpoint(ChainEndpoint::new(chain, url));
        }
        Ok(builder.build())
    }
}

/// Builder for [`SessionPoolConfig`]
#[derive(Debug, Clone, Default)]
pub struct SessionPoolConfigBuilder {
    endpoints: Vec<ChainEndpoint>,
}

impl SessionPoolConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an endpoint
    #[must_use]
    pub fn endpoint(mut self, endpoint: ChainEndpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Add an endpoint for a chain by URL
    #[must_use]
    pub fn chain(self, chain: impl Into<Chain>, url: impl Into<String>) -> Self {
        self.endpoint(ChainEndpoint::new(chain, url))
    }

    #[must_use]
    pub fn build(self) -> SessionPoolConfig {
        SessionPoolConfig {
            endpoints: self.endpoints,
        }
    }
}

/// Configuration for a chain endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEndpoint {
    /// The chain this endpoint serves
    pub chain: Chain,
    /// The RPC endpoint URL
    pub url: String,
}

impl ChainEndpoint {
    #[must_use]
    pub fn new(chain: impl Into<Chain>, url: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            url: url.into(),
        }
    }

    /// Create an Ethereum mainnet endpoint
    #[must_use]
    pub fn mainnet(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Mainnet, url)
    }

    /// Create a Base mainnet endpoint
    #[must_use]
    pub fn base(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Base, url)
    }

    /// Create an Optimism mainnet endpoint
    #[must_use]
    pub fn optimism(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Optimism, url)
    }

    /// Create an Arbitrum One endpoint
    #[must_use]
    pub fn arbitrum(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Arbitrum, url)
    }

    /// Create a Polygon mainnet endpoint
    #[must_use]
    pub fn polygon(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Polygon, url)
    }

    /// Create a Sepolia testnet endpoint
    #[must_use]
    pub fn sepolia(url: impl Into<String>) -> Self {
        Self::new(NamedChain::Sepolia, url)
    }
}

/// Environment variable holding a chain's RPC URL
///
/// Ethereum mainnet uses `ETHEREUM_RPC_URL`; other named chains use their
/// upper-cased name (`BASE_RPC_URL`, `ARBITRUM_RPC_URL`); unnamed chains use
/// `CHAIN_<id>_RPC_URL`.
#[must_use]
pub fn rpc_url_env_var(chain: Chain) -> String {
    match chain.named() {
        Some(NamedChain::Mainnet) => "ETHEREUM_RPC_URL".to_string(),
        Some(named) => format!("{}_RPC_URL", named.as_str().to_uppercase().replace('-', "_")),
        None => format!("CHAIN_{}_RPC_URL", chain.id()),
    }
}
