//! Span creation helpers for tokenattr operations.
//!
//! Telemetry is kept out of the business logic: each instrumented operation
//! has a helper here returning its span, and the operation enters it (or
//! instruments its future with it).

use alloy_chains::Chain;
use alloy_primitives::Address;
use tracing::{Level, Span};

use crate::call::{AttributeId, CallDescriptor};

/// Create span for a `get_value` request.
///
/// Parent: caller's span
/// Children: none (the call itself runs in a `resolve_attribute` span)
#[inline]
pub(crate) fn get_value(attribute_id: &AttributeId, descriptor: &CallDescriptor) -> Span {
    tracing::debug_span!(
        "tokenattr.get_value",
        attribute_id = %attribute_id,
        chain_id = descriptor.network().id(),
        contract = %descriptor.contract(),
        function = descriptor.function_name(),
    )
}

/// Create span for the background task driving one in-flight call.
///
/// Parent: None (root span, the task outlives the request that started it)
/// Children: execute_call span
#[inline]
pub(crate) fn resolve_attribute(attribute_id: &AttributeId, descriptor: &CallDescriptor) -> Span {
    tracing::span!(
        parent: None,
        Level::INFO,
        "tokenattr.resolve_attribute",
        attribute_id = %attribute_id,
        chain_id = descriptor.network().id(),
        contract = %descriptor.contract(),
        function = descriptor.function_name(),
    )
}

/// Create span for executing one contract call.
///
/// Parent: resolve_attribute span, or the caller's span when the executor is
/// used directly
/// Children: provider_call span
#[inline]
pub(crate) fn execute_call(descriptor: &CallDescriptor) -> Span {
    tracing::debug_span!(
        "tokenattr.execute_call",
        chain_id = descriptor.network().id(),
        contract = %descriptor.contract(),
        function = descriptor.function_name(),
        return_type = %descriptor.return_type(),
    )
}

/// Create span for an `eth_call` through an alloy provider.
///
/// Parent: execute_call span
/// Children: alloy transport spans
#[inline]
pub(crate) fn provider_call(chain: Chain, contract: Address, signature: &str) -> Span {
    tracing::trace_span!(
        "tokenattr.provider_call",
        chain_id = chain.id(),
        contract = %contract,
        signature = signature,
    )
}
