// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod chain;
pub mod client;
pub mod compilation;
pub mod config;
pub mod contract;
pub mod host;
pub mod plugin;
pub mod session;
pub mod verification;
pub mod workflow;
