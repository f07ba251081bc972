//! Error types for the tokenattr library.
//!
//! Each layer has its own error type:
//! - [`CallError`] - Errors from executing a single contract function call
//! - [`TransportError`] - Failures reported by a [`Session`](crate::Session)
//! - [`SessionError`] - Errors from building or mutating a [`SessionPool`](crate::SessionPool)
//! - [`DescriptorError`] - Errors from building call descriptors and Solidity types
//!
//! The [`AttributeCache`](crate::AttributeCache) itself never fails: a failed call
//! closes the returned handle without a value, and the cause is logged.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tokenattr::{CallError, CallExecutor};
//!
//! match executor.execute(&descriptor).await {
//!     Ok(value) => println!("value: {value}"),
//!     Err(CallError::SessionUnavailable { network, .. }) => {
//!         eprintln!("no session configured for {network}");
//!     }
//!     Err(e) => eprintln!("call failed: {e}"),
//! }
//! ```

mod call;
mod descriptor;
mod session;
mod transport;

pub use call::CallError;
pub use descriptor::DescriptorError;
pub use session::SessionError;
pub use transport::TransportError;
