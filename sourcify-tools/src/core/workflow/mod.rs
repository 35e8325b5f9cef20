// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Fetch and verify workflows.
//!
//! Each workflow owns its state in a [`tokio::sync::watch`] channel and changes it only by
//! dispatching actions through a pure `reduce` function. A workflow is the error boundary for its
//! own submissions: failures end up in the state's `error` field and never propagate to the
//! caller.

pub mod fetch;
pub mod verify;

/// How a call to `submit` was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The submission ran to completion. Check the workflow state for the outcome.
    Completed,
    /// Another submission of the same workflow was still in flight; nothing was done.
    InFlight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Warning,
    Success,
}

/// Banner derived from workflow and session state for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub heading: String,
    /// Where the verified assets can be viewed.
    pub link: Option<String>,
}

impl Alert {
    pub fn danger(heading: impl Into<String>) -> Self {
        Self::new(AlertKind::Danger, heading)
    }

    pub fn warning(heading: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, heading)
    }

    pub fn success(heading: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, heading)
    }

    fn new(kind: AlertKind, heading: impl Into<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}
