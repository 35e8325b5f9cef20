// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

pub type SourcifyResult = Result<(), SourcifyError>;

#[derive(Debug)]
pub struct SourcifyError {
    error: eyre::Error,
    exit_code: ExitCode,
}

/// Exit code for bad command line input, matching clap's usage errors.
const USAGE_EXIT_CODE: u8 = 2;

impl SourcifyError {
    /// Error in the arguments or the files they point at, reported before any workflow runs.
    pub fn usage(error: impl Into<eyre::Error>) -> Self {
        Self {
            error: error.into(),
            exit_code: ExitCode::from(USAGE_EXIT_CODE),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for SourcifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for SourcifyError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for SourcifyError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<sourcify_tools::Error> for SourcifyError {
    fn from(err: sourcify_tools::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}
