// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Registry of chains a contract can be fetched from or verified on.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Chain {
    #[serde(rename = "chainId")]
    pub id: u64,
    pub name: String,
    /// Longer name for some networks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Chain {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// User-visible label: the title if present, otherwise the name.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Chain list entry as published by the verification server.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainEntry {
    chain_id: u64,
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    supported: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChainList {
    List(Vec<ChainEntry>),
    Map(BTreeMap<String, ChainEntry>),
}

/// Ordered, read-only set of known chains. Chain ids are unique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRegistry {
    chains: Vec<Chain>,
}

impl ChainRegistry {
    pub fn new(chains: impl IntoIterator<Item = Chain>) -> Result<Self> {
        let chains: Vec<Chain> = chains.into_iter().collect();
        let mut seen = HashSet::new();
        for chain in &chains {
            if !seen.insert(chain.id) {
                return Err(Error::DuplicateChain(chain.id));
            }
        }
        Ok(Self { chains })
    }

    /// Chains the plugin ships with.
    pub fn builtin() -> Self {
        Self {
            chains: vec![
                Chain::new(1, "mainnet").with_title("Ethereum Mainnet"),
                Chain::new(3, "ropsten").with_title("Ropsten"),
                Chain::new(4, "rinkeby").with_title("Rinkeby"),
                Chain::new(42, "kovan").with_title("Kovan"),
                Chain::new(5, "goerli").with_title("Görli"),
            ],
        }
    }

    /// Parses a chain list, either as an array or as a map keyed by chain id.
    ///
    /// Entries explicitly marked as unsupported are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries = match serde_json::from_str(json)? {
            ChainList::List(entries) => entries,
            ChainList::Map(entries) => entries.into_values().collect(),
        };
        let chains = entries
            .into_iter()
            .filter(|entry| entry.supported != Some(false))
            .map(|entry| Chain {
                id: entry.chain_id,
                name: entry.name,
                title: entry.title,
            });
        Self::new(chains)
    }

    pub fn list_chains(&self) -> &[Chain] {
        &self.chains
    }

    /// The chain selected before the user picks one, if any.
    pub fn default_chain(&self) -> Option<&Chain> {
        self.chains.first()
    }

    pub fn get(&self, id: u64) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    /// Resolves a user-visible value to a chain.
    ///
    /// The value may be a decimal chain id, a chain name or a display label.
    pub fn resolve(&self, value: &str) -> Option<&Chain> {
        let value = value.trim();
        if let Ok(id) = value.parse::<u64>() {
            return self.get(id);
        }
        self.chains
            .iter()
            .find(|chain| chain.name.eq_ignore_ascii_case(value))
            .or_else(|| self.chains.iter().find(|chain| chain.label() == value))
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
