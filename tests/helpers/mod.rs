// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for tokenattr integration tests
//!
//! Provides a scriptable mock [`Session`] so the cache and executor can be
//! tested without a blockchain connection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy_chains::Chain;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, Address, U256};
use async_trait::async_trait;
use tokenattr::{
    CallArgument, CallDescriptor, CallOutput, ContractCall, Session, SessionProvider,
    SolidityType, TransportError,
};
use tokio::sync::watch;

pub const CONTRACT: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const OWNER: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

/// What a [`MockSession`] answers
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// One positional output
    Value(DynSolValue),
    /// No positional output at all
    Empty,
    /// A transport failure with this message
    Fail(String),
}

/// Mock Session for testing the executor and cache
///
/// Counts calls, records every [`ContractCall`] it receives and can hold
/// responses back until its [`Gate`] is opened.
///
/// # Example
///
/// ```rust,ignore
/// let (session, gate) = MockSession::returning(uint(42)).gated();
/// let session = Arc::new(session);
/// // ... issue requests, they all wait ...
/// gate.open();
/// ```
pub struct MockSession {
    response: Mutex<MockResponse>,
    calls: AtomicUsize,
    recorded: Mutex<Vec<ContractCall>>,
    gate: Option<watch::Receiver<bool>>,
}

/// Releases the calls held by a gated [`MockSession`]
pub struct Gate {
    sender: watch::Sender<bool>,
}

impl Gate {
    /// Let every pending and future call through
    pub fn open(&self) {
        self.sender.send_replace(true);
    }
}

impl MockSession {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn returning(value: DynSolValue) -> Self {
        Self::new(MockResponse::Value(value))
    }

    pub fn empty() -> Self {
        Self::new(MockResponse::Empty)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockResponse::Fail(message.to_string()))
    }

    /// Hold every call until the returned gate is opened
    pub fn gated(mut self) -> (Self, Gate) {
        let (sender, receiver) = watch::channel(false);
        self.gate = Some(receiver);
        (self, Gate { sender })
    }

    /// Change the answer for subsequent calls
    pub fn set_response(&self, response: MockResponse) {
        *self.response.lock().unwrap() = response;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_calls(&self) -> Vec<ContractCall> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Session for MockSession {
    async fn call(&self, call: ContractCall) -> Result<CallOutput, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(call);

        if let Some(gate) = &self.gate {
            let mut gate = gate.clone();
            let _ = gate.wait_for(|open| *open).await;
        }

        let response = self.response.lock().unwrap().clone();
        match response {
            MockResponse::Value(value) => Ok(CallOutput::new(vec![value])),
            MockResponse::Empty => Ok(CallOutput::empty()),
            MockResponse::Fail(message) => Err(TransportError::message("mock call", message)),
        }
    }
}

/// Session provider serving the given sessions
pub fn provider(sessions: Vec<(Chain, Arc<MockSession>)>) -> Arc<dyn SessionProvider> {
    let sessions: HashMap<Chain, Arc<dyn Session>> = sessions
        .into_iter()
        .map(|(chain, session)| (chain, session as Arc<dyn Session>))
        .collect();
    Arc::new(sessions)
}

/// Session provider with a single session on chain 1
pub fn mainnet_provider(session: Arc<MockSession>) -> Arc<dyn SessionProvider> {
    provider(vec![(Chain::from_id(1), session)])
}

pub fn uint(value: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 256)
}

/// `balanceOf(OWNER)` on `CONTRACT`, network 1, returning uint256
pub fn balance_of() -> CallDescriptor {
    CallDescriptor::new(
        1u64,
        CONTRACT,
        "balanceOf",
        vec![CallArgument::Address(OWNER)],
        SolidityType::UINT256,
    )
}

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
