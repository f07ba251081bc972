// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Session backed by an alloy provider

use std::fmt;
use std::sync::Arc;

use alloy_chains::Chain;
use alloy_network::{AnyNetwork, Network, TransactionBuilder};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use async_trait::async_trait;
use tracing::{debug, warn, Instrument};

use super::{CallOutput, ContractCall, Session};
use crate::errors::{SessionError, TransportError};
use crate::spans;

/// A [`Session`] that performs calls with `eth_call` through an alloy provider.
///
/// Uses `AnyNetwork` so the same session type works on every EVM chain.
///
/// # Examples
///
/// ```rust,ignore
/// use alloy_chains::NamedChain;
/// use tokenattr::ProviderSession;
///
/// let session = ProviderSession::connect_http(NamedChain::Mainnet.into(), "https://eth.llamarpc.com")?;
/// ```
#[derive(Clone)]
pub struct ProviderSession {
    chain: Chain,
    provider: Arc<RootProvider<AnyNetwork>>,
}

impl ProviderSession {
    /// Wraps an existing provider.
    #[must_use]
    pub fn new(chain: Chain, provider: Arc<RootProvider<AnyNetwork>>) -> Self {
        Self { chain, provider }
    }

    /// Creates a bare HTTP provider for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidUrl`] if the URL does not parse.
    pub fn connect_http(chain: Chain, url: &str) -> Result<Self, SessionError> {
        let parsed_url: url::Url = url.parse().map_err(|e| {
            warn!(url = url, error = ?e, "Invalid provider URL");
            SessionError::InvalidUrl(url.to_string(), e)
        })?;

        let client = alloy_rpc_client::ClientBuilder::default().http(parsed_url);

        // No fillers: eth_call needs neither nonce nor gas
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .network::<AnyNetwork>()
            .connect_client(client);

        Ok(Self::new(chain, Arc::new(provider)))
    }

    #[must_use]
    pub fn chain(&self) -> Chain {
        self.chain
    }
}

impl fmt::Debug for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSession")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Session for ProviderSession {
    async fn call(&self, call: ContractCall) -> Result<CallOutput, TransportError> {
        let signature = call.fragment.signature();
        let span = spans::provider_call(self.chain, call.contract, &signature);

        async move {
            let operation = format!("eth_call {signature}");
            let tx = <AnyNetwork as Network>::TransactionRequest::default()
                .with_to(call.contract)
                .with_input(call.calldata());

            let data = self
                .provider
                .call(tx)
                .await
                .map_err(|e| TransportError::new(operation.clone(), e))?;
            debug!(bytes = data.len(), "eth_call returned");

            call.fragment
                .decode_output(&data)
                .map_err(|e| TransportError::new(operation, e))
        }
        .instrument(span)
        .await
    }
}
