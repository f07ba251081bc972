//! Single-flight resolution cache for attribute calls
//!
//! Many consumers often ask for the same attribute at once (several views of
//! one token rendering together). The [`AttributeCache`] coalesces identical
//! requests into one outbound call and fans the result out to every waiter.
//!
//! It only caches in-flight work: once a call settles its entry is removed,
//! so the next identical request issues a fresh call.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokenattr::{AttributeCache, SessionPool};
//!
//! let cache = AttributeCache::new(Arc::new(SessionPool::from_config(&config)?));
//!
//! let first = cache.get_value("balance", descriptor.clone());
//! let second = cache.get_value("balance", descriptor); // no second network call
//!
//! assert_eq!(first.resolved().await, second.resolved().await);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt as _;
use tokio::runtime::Handle;
use tracing::{debug, warn, Instrument};

use crate::call::{AttributeId, CallDescriptor, CallExecutor};
use crate::session::SessionProvider;
use crate::spans;
use crate::subscribable::{Publisher, Subscribable};
use crate::types::AttributeValue;

/// Publishers of every handle waiting on one in-flight call
type Waiters = Vec<Publisher<AttributeValue>>;

/// Deduplicating cache of in-flight attribute calls.
///
/// # Guarantees
///
/// - At most one call per distinct [`CallDescriptor`] is in flight at a time.
/// - Every handle attached before settlement receives the value exactly once.
/// - A failed call resolves no handle; the handles close without a value and
///   the failure is logged.
/// - Nothing outlives settlement: the entry is removed in the same critical
///   section that collects its waiters.
///
/// # Runtime
///
/// Calls run as Tokio tasks. [`get_value`](Self::get_value) spawns on the
/// runtime given to [`with_runtime`](Self::with_runtime), or on the ambient
/// runtime otherwise. Without either, a request that would start a call gets
/// a closed handle and nothing is recorded.
#[derive(Clone)]
pub struct AttributeCache {
    executor: CallExecutor,
    in_flight: Arc<Mutex<HashMap<CallDescriptor, Waiters>>>,
    runtime: Option<Handle>,
}

impl AttributeCache {
    /// Creates a cache executing calls through `sessions`.
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        Self::with_executor(CallExecutor::new(sessions))
    }

    #[must_use]
    pub fn with_executor(executor: CallExecutor) -> Self {
        Self {
            executor,
            in_flight: Arc::default(),
            runtime: None,
        }
    }

    /// Spawns calls on `runtime`, so `get_value` can be used from threads that
    /// are not part of a Tokio runtime.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// The executor used for calls.
    ///
    /// Callers that need the failure cause (the cache handle only reports
    /// "no value") can execute descriptors through it directly.
    #[must_use]
    pub fn executor(&self) -> &CallExecutor {
        &self.executor
    }

    /// Requests the value of an attribute.
    ///
    /// Returns immediately with a handle owned by this caller. If an identical
    /// call is already in flight the handle is attached to it, otherwise a new
    /// call is started.
    pub fn get_value(
        &self,
        attribute_id: impl Into<AttributeId>,
        descriptor: CallDescriptor,
    ) -> Subscribable<AttributeValue> {
        let attribute_id = attribute_id.into();
        let span = spans::get_value(&attribute_id, &descriptor);
        let _guard = span.enter();

        let (publisher, handle) = Subscribable::pending();
        let runtime = self.runtime.clone().or_else(|| Handle::try_current().ok());

        let mut in_flight = self.lock_in_flight();
        if let Some(waiters) = in_flight.get_mut(&descriptor) {
            waiters.push(publisher);
            debug!(waiters = waiters.len(), "Attached to in-flight call");
            return handle;
        }
        let Some(runtime) = runtime else {
            warn!(
                attribute_id = %attribute_id,
                "No Tokio runtime to run the call on, closing the handle"
            );
            return handle;
        };
        in_flight.insert(descriptor.clone(), vec![publisher]);
        drop(in_flight);

        debug!("Starting call");
        self.spawn_call(&runtime, attribute_id, descriptor);
        handle
    }

    /// Number of calls currently in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.lock_in_flight().len()
    }

    /// Whether a call for `descriptor` is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self, descriptor: &CallDescriptor) -> bool {
        self.lock_in_flight().contains_key(descriptor)
    }

    fn spawn_call(&self, runtime: &Handle, attribute_id: AttributeId, descriptor: CallDescriptor) {
        let executor = self.executor.clone();
        let entry = EntryGuard {
            in_flight: Arc::clone(&self.in_flight),
            descriptor: Some(descriptor.clone()),
        };
        let span = spans::resolve_attribute(&attribute_id, &descriptor);

        let task = async move {
            let outcome = AssertUnwindSafe(executor.execute(&descriptor))
                .catch_unwind()
                .await;
            let waiters = entry.settle();

            match outcome {
                Ok(Ok(value)) => {
                    debug!(waiters = waiters.len(), value = %value, "Call resolved");
                    for waiter in waiters {
                        waiter.send(value.clone());
                    }
                }
                Ok(Err(error)) => {
                    warn!(
                        attribute_id = %attribute_id,
                        chain_id = descriptor.network().id(),
                        error = %error,
                        waiters = waiters.len(),
                        "Attribute call failed"
                    );
                }
                Err(_) => {
                    warn!(
                        attribute_id = %attribute_id,
                        chain_id = descriptor.network().id(),
                        waiters = waiters.len(),
                        "Attribute call panicked"
                    );
                }
            }
        }
        .instrument(span);

        runtime.spawn(task);
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<CallDescriptor, Waiters>> {
        lock(&self.in_flight)
    }
}

// The map stays consistent across a panic (every mutation is a single
// insert, push or remove), so a poisoned lock is still usable.
fn lock(
    in_flight: &Mutex<HashMap<CallDescriptor, Waiters>>,
) -> MutexGuard<'_, HashMap<CallDescriptor, Waiters>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the in-flight entry of one driver task.
///
/// The entry is removed when the task settles it, and also when the task is
/// dropped without settling (cancelled on runtime shutdown, or never polled
/// because the runtime was already gone). Dropping the entry drops its
/// publishers, which closes every attached handle.
struct EntryGuard {
    in_flight: Arc<Mutex<HashMap<CallDescriptor, Waiters>>>,
    descriptor: Option<CallDescriptor>,
}

impl EntryGuard {
    /// Removes the entry and hands back its waiters.
    fn settle(mut self) -> Waiters {
        self.descriptor
            .take()
            .and_then(|descriptor| lock(&self.in_flight).remove(&descriptor))
            .unwrap_or_default()
    }
}

impl Drop for EntryGuard {
    fn drop(&mut self) {
        if let Some(descriptor) = self.descriptor.take() {
            if let Some(waiters) = lock(&self.in_flight).remove(&descriptor) {
                warn!(
                    waiters = waiters.len(),
                    "Attribute call dropped before settling"
                );
            }
        }
    }
}

impl fmt::Debug for AttributeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeCache")
            .field("in_flight", &self.in_flight_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::session::{CallOutput, ContractCall, Session};
    use crate::types::SolidityType;
    use alloy_chains::Chain;
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::{address, U256};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Session that answers every call with `value`, or panics when `value` is None
    struct FixedSession {
        value: Option<u64>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Session for FixedSession {
        async fn call(&self, _call: ContractCall) -> Result<CallOutput, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            match self.value {
                Some(value) => Ok(CallOutput::new(vec![DynSolValue::Uint(
                    U256::from(value),
                    256,
                )])),
                None => panic!("session blew up"),
            }
        }
    }

    fn cache_with(session: Arc<FixedSession>) -> AttributeCache {
        let mut sessions: HashMap<Chain, Arc<dyn Session>> = HashMap::new();
        sessions.insert(Chain::from_id(1), session);
        AttributeCache::new(Arc::new(sessions))
    }

    fn total_supply() -> CallDescriptor {
        CallDescriptor::new(
            1u64,
            address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            "totalSupply",
            vec![],
            SolidityType::UINT256,
        )
    }

    #[tokio::test]
    async fn test_entry_exists_until_settlement() {
        let session = Arc::new(FixedSession {
            value: Some(5),
            calls: AtomicUsize::new(0),
        });
        let cache = cache_with(session.clone());

        let handle = cache.get_value("supply", total_supply());
        assert!(cache.is_in_flight(&total_supply()));
        assert_eq!(cache.in_flight_count(), 1);

        assert_eq!(handle.resolved().await, Some(AttributeValue::Uint(U256::from(5))));
        assert_eq!(cache.in_flight_count(), 0);
        assert_eq!(session.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_panicking_session_clears_entry() {
        let session = Arc::new(FixedSession {
            value: None,
            calls: AtomicUsize::new(0),
        });
        let cache = cache_with(session.clone());

        let handle = cache.get_value("supply", total_supply());
        assert_eq!(handle.resolved().await, None);
        assert!(!cache.is_in_flight(&total_supply()));

        // The slot is free again for a fresh attempt
        let retry = cache.get_value("supply", total_supply());
        assert_eq!(retry.resolved().await, None);
        assert_eq!(session.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_explicit_runtime_allows_calls_from_plain_threads() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let session = Arc::new(FixedSession {
            value: Some(9),
            calls: AtomicUsize::new(0),
        });
        let cache = cache_with(session).with_runtime(runtime.handle().clone());

        let handle = cache.get_value("supply", total_supply());
        let value = runtime.block_on(handle.resolved());
        assert_eq!(value, Some(AttributeValue::Uint(U256::from(9))));
    }

    #[test]
    fn test_request_outside_runtime_leaves_no_entry() {
        let session = Arc::new(FixedSession {
            value: Some(4),
            calls: AtomicUsize::new(0),
        });
        let cache = cache_with(session.clone());

        let handle = cache.get_value("supply", total_supply());
        assert!(handle.is_closed());
        assert!(!handle.is_resolved());
        assert_eq!(cache.in_flight_count(), 0);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let value = runtime.block_on(async { cache.get_value("supply", total_supply()).resolved().await });
        assert_eq!(value, Some(AttributeValue::Uint(U256::from(4))));
        assert_eq!(session.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.in_flight_count(), 0);
    }

    #[test]
    fn test_shut_down_runtime_leaves_no_entry() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let handle = runtime.handle().clone();
        drop(runtime);

        let session = Arc::new(FixedSession {
            value: Some(4),
            calls: AtomicUsize::new(0),
        });
        let cache = cache_with(session.clone()).with_runtime(handle);

        let value = cache.get_value("supply", total_supply());
        assert!(value.is_closed());
        assert!(!value.is_resolved());
        assert_eq!(cache.in_flight_count(), 0);
        assert_eq!(session.calls.load(Ordering::SeqCst), 0);
    }
}
