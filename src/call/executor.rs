// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use tracing::{debug, Instrument};

use super::{decode_output, CallDescriptor};
use crate::errors::CallError;
use crate::session::{ContractCall, SessionProvider};
use crate::spans;
use crate::types::{AttributeValue, CallArgument};

/// Performs attribute calls against the sessions of a [`SessionProvider`].
///
/// Each [`execute`](Self::execute) issues exactly one network request and
/// never retries. Cloning is cheap and shares the provider.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tokenattr::{CallExecutor, SessionPool};
///
/// let executor = CallExecutor::new(Arc::new(SessionPool::from_config(&config)?));
/// let value = executor.execute(&descriptor).await?;
/// ```
#[derive(Clone)]
pub struct CallExecutor {
    sessions: Arc<dyn SessionProvider>,
}

impl CallExecutor {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        Self { sessions }
    }

    /// Executes the call described by `descriptor` and decodes its result.
    ///
    /// # Errors
    ///
    /// - [`CallError::InvalidFunction`] if no function fragment can be built
    /// - [`CallError::SessionUnavailable`] if the network has no session
    /// - [`CallError::Transport`] if the session fails
    /// - [`CallError::EmptyResult`] if a non-void call returned nothing
    pub async fn execute(&self, descriptor: &CallDescriptor) -> Result<AttributeValue, CallError> {
        let span = spans::execute_call(descriptor);
        self.execute_once(descriptor).instrument(span).await
    }

    async fn execute_once(&self, descriptor: &CallDescriptor) -> Result<AttributeValue, CallError> {
        let fragment = descriptor.fragment()?;

        let session = self
            .sessions
            .session_for(descriptor.network())
            .ok_or_else(|| CallError::SessionUnavailable {
                network: descriptor.network(),
                function: descriptor.function_name().to_string(),
            })?;

        let call = ContractCall {
            contract: descriptor.contract(),
            fragment,
            arguments: descriptor
                .arguments()
                .iter()
                .map(CallArgument::to_sol_value)
                .collect(),
        };
        debug!(signature = %call.fragment.signature(), "Issuing contract call");

        let output = session.call(call).await.map_err(|source| {
            CallError::transport(descriptor.function_name(), descriptor.contract(), source)
        })?;

        decode_output(
            &output,
            descriptor.return_type(),
            descriptor.function_name(),
            descriptor.contract(),
        )
    }
}

impl fmt::Debug for CallExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallExecutor").finish_non_exhaustive()
    }
}
