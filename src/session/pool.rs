// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Session pooling across networks
//!
//! The [`SessionPool`] maintains one session per chain and is the usual
//! [`SessionProvider`] handed to a [`CallExecutor`](crate::CallExecutor).
//!
//! # Examples
//!
//! ```rust,ignore
//! use tokenattr::{ChainEndpoint, SessionPool, SessionPoolConfig};
//!
//! let config = SessionPoolConfig::builder()
//!     .endpoint(ChainEndpoint::mainnet("https://eth.llamarpc.com"))
//!     .endpoint(ChainEndpoint::base("https://mainnet.base.org"))
//!     .build();
//!
//! let pool = SessionPool::from_config(&config)?;
//! assert!(pool.contains(NamedChain::Base.into()));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use alloy_chains::Chain;
use tracing::{debug, info};

use super::{ProviderSession, Session, SessionProvider};
use crate::config::SessionPoolConfig;
use crate::errors::SessionError;

/// A thread-safe pool of sessions indexed by chain
///
/// Lookups take a read lock, so concurrent calls on different networks never
/// contend; adding or removing a session takes the write lock.
#[derive(Default)]
pub struct SessionPool {
    sessions: RwLock<HashMap<Chain, Arc<dyn Session>>>,
}

impl SessionPool {
    /// Create a new empty session pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool with an HTTP session for every configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint URL is invalid
    pub fn from_config(config: &SessionPoolConfig) -> Result<Self, SessionError> {
        let pool = Self::new();
        for endpoint in &config.endpoints {
            pool.add(endpoint.chain, &endpoint.url)?;
        }
        Ok(pool)
    }

    /// Add an HTTP session for a specific chain
    ///
    /// If a session already exists for this chain, it will be replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid
    pub fn add(&self, chain: Chain, url: &str) -> Result<(), SessionError> {
        let session = ProviderSession::connect_http(chain, url)?;
        self.insert(chain, Arc::new(session))?;
        info!(chain = %chain, url = url, "Added session to pool");
        Ok(())
    }

    /// Register any session implementation for a chain
    ///
    /// # Errors
    ///
    /// Returns an error if the pool lock is poisoned
    pub fn insert(&self, chain: Chain, session: Arc<dyn Session>) -> Result<(), SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?;

        if sessions.insert(chain, session).is_some() {
            debug!(chain = %chain, "Replaced existing session");
        }
        Ok(())
    }

    /// Get the session for a specific chain
    #[must_use]
    pub fn get(&self, chain: Chain) -> Option<Arc<dyn Session>> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(&chain).cloned())
    }

    /// Remove a session from the pool
    ///
    /// Calls already in flight on the removed session keep running.
    pub fn remove(&self, chain: Chain) -> Option<Arc<dyn Session>> {
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(&chain))
    }

    /// Check if a session exists for a chain
    #[must_use]
    pub fn contains(&self, chain: Chain) -> bool {
        self.sessions
            .read()
            .ok()
            .is_some_and(|sessions| sessions.contains_key(&chain))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all chains with a session
    #[must_use]
    pub fn chains(&self) -> Vec<Chain> {
        self.sessions
            .read()
            .map(|sessions| sessions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Clear all sessions from the pool
    pub fn clear(&self) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.clear();
            info!("Cleared all sessions from pool");
        }
    }
}

impl SessionProvider for SessionPool {
    fn session_for(&self, network: Chain) -> Option<Arc<dyn Session>> {
        self.get(network)
    }
}

impl fmt::Debug for SessionPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionPool")
            .field("chains", &self.chains())
            .finish()
    }
}
