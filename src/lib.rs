//! Single-flight resolution of smart-contract backed token attributes.
//!
//! Token attributes such as balances, owners or names are often computed by
//! calling a contract function. When several consumers need the same
//! attribute at the same time, [`AttributeCache`] makes sure the call goes
//! out once and every consumer gets the decoded [`AttributeValue`].
//!
//! The pieces, leaves first:
//!
//! - [`AttributeValue`], [`SolidityType`], [`CallArgument`] - the typed value domain
//! - [`decode_value`] / [`decode_output`] - best-effort decoding of call results
//! - [`CallDescriptor`] - the structural key of one unique call
//! - [`CallExecutor`] - one call, one round trip through a [`Session`]
//! - [`AttributeCache`] - coalesces identical in-flight calls and fans out results
//!
//! Sessions are injected through [`SessionProvider`]; [`SessionPool`] with
//! [`ProviderSession`] is the alloy-backed implementation.

mod cache;
mod call;
pub mod config;
pub mod errors;
pub mod session;
mod spans;
mod subscribable;
mod types;

pub use cache::AttributeCache;
pub use call::{
    decode_output, decode_value, AttributeId, CallDescriptor, CallExecutor, FunctionFragment,
};
pub use config::{ChainEndpoint, SessionPoolConfig, SessionPoolConfigBuilder};
pub use errors::{CallError, DescriptorError, SessionError, TransportError};
pub use session::{
    CallOutput, ContractCall, ProviderSession, Session, SessionPool, SessionProvider,
};
pub use subscribable::{Publisher, Subscribable};
pub use types::{AttributeValue, CallArgument, SolidityType};
