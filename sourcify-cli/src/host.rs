// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Host backed by the local file system.

use std::{
    fs,
    path::{Component, Path, PathBuf},
    sync::Mutex,
};

use sourcify_tools::{
    core::{
        compilation::{ArtifactFile, CompilationArtifacts},
        contract::FetchResult,
        host::{CompilationFinished, Host},
    },
    Error, Result,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Directory fetched contracts are stored under, one subdirectory per address.
pub const VERIFIED_SOURCES_DIR: &str = "verified-sources";
const METADATA_FILE: &str = "metadata.json";

/// Reads compiler output from an artifact directory and writes fetched sources below `out`.
#[derive(Debug)]
pub struct DirectoryHost {
    out: PathBuf,
    artifacts: Option<PathBuf>,
    listeners: Mutex<Vec<UnboundedSender<CompilationFinished>>>,
    last_saved: Mutex<Option<PathBuf>>,
}

impl DirectoryHost {
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            out: out.into(),
            artifacts: None,
            listeners: Mutex::default(),
            last_saved: Mutex::default(),
        }
    }

    pub fn with_artifacts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts = Some(dir.into());
        self
    }

    /// Announces a finished build to all subscribers, returning how many are still listening.
    pub fn compilation_finished(&self) -> usize {
        let target = self
            .artifacts
            .as_ref()
            .map(|dir| dir.display().to_string());
        let Ok(mut listeners) = self.listeners.lock() else {
            return 0;
        };
        listeners.retain(|listener| {
            listener
                .send(CompilationFinished {
                    target: target.clone(),
                })
                .is_ok()
        });
        listeners.len()
    }

    fn contract_dir(&self, address: &str) -> PathBuf {
        self.out.join(VERIFIED_SOURCES_DIR).join(sanitize(address))
    }
}

impl Host for DirectoryHost {
    fn subscribe_compilation_finished(&self) -> UnboundedReceiver<CompilationFinished> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(tx);
        }
        rx
    }

    async fn fetch_last_compilation(&self) -> Result<CompilationArtifacts> {
        let dir = self
            .artifacts
            .as_deref()
            .ok_or_else(|| Error::host("no artifact directory configured"))?;

        let mut files = Vec::new();
        collect_files(dir, dir, &mut files)?;
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let contract_name = files
            .iter()
            .find(|file| file.name == METADATA_FILE)
            .and_then(|file| compilation_target(&file.content))
            .or_else(|| {
                dir.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default();
        Ok(CompilationArtifacts {
            contract_name,
            files,
        })
    }

    async fn save_fetched(&self, result: &FetchResult, address: &str) -> Result<()> {
        let dir = self.contract_dir(address);
        fs::create_dir_all(&dir)?;
        fs::write(
            dir.join(METADATA_FILE),
            serde_json::to_string_pretty(&result.metadata)?,
        )?;
        for source in &result.sources {
            let path = if source.path.is_empty() {
                &source.name
            } else {
                &source.path
            };
            let relative = sanitize(path);
            if relative.as_os_str().is_empty() {
                log::warn!("skipping source with unusable path {path:?}");
                continue;
            }
            let target = dir.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &source.content)?;
            log::debug!("wrote {}", target.display());
        }
        if let Ok(mut last_saved) = self.last_saved.lock() {
            *last_saved = Some(dir);
        }
        Ok(())
    }

    async fn focus_file_manager(&self) -> Result<()> {
        let last_saved = self
            .last_saved
            .lock()
            .map_err(Error::host)?
            .clone();
        if let Some(dir) = last_saved {
            log::info!("sources saved to {}", dir.display());
        }
        Ok(())
    }
}

/// Reads every file below `dir`, naming each by its `/`-separated path relative to `root`.
fn collect_files(root: &Path, dir: &Path, files: &mut Vec<ArtifactFile>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
            continue;
        }
        let name = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(ArtifactFile::new(name, fs::read_to_string(&path)?));
    }
    Ok(())
}

/// Contract name from the `settings.compilationTarget` entry of solc metadata.
fn compilation_target(metadata: &str) -> Option<String> {
    let metadata: serde_json::Value = serde_json::from_str(metadata).ok()?;
    metadata["settings"]["compilationTarget"]
        .as_object()?
        .values()
        .next()?
        .as_str()
        .map(ToOwned::to_owned)
}

/// Keeps only the normal components of `path`, so it cannot escape the directory it is joined to.
fn sanitize(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
