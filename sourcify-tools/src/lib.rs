// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for fetching verified contracts from a Sourcify repository and submitting compiled
//! contracts for verification.
//!
//! The [`core::workflow`] module holds the two state machines driving the plugin forms. They talk
//! to the server through [`core::client::VerificationService`] and to the development environment
//! through [`core::host::Host`].

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod utils;

pub use error::{Error, Result};
