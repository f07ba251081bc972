// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract function calls backing token attributes
//!
//! A [`CallDescriptor`] identifies one unique call. The [`CallExecutor`] turns a
//! descriptor into exactly one round trip through a [`Session`](crate::Session)
//! and decodes the response with [`decode_output`].

mod decode;
mod descriptor;
mod executor;
mod fragment;

pub use decode::{decode_output, decode_value};
pub use descriptor::{AttributeId, CallDescriptor};
pub use executor::CallExecutor;
pub use fragment::FunctionFragment;
