//! Audio path providers
//!
//! The analysis core only needs a path. Where it comes from (a command-line
//! argument, an environment variable or the session file) is decided by a
//! [`PathProvider`], so no UI toolkit leaks into the pipeline.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::config::{Session, AUDIO_PATH_ENV};
use crate::error::{Result, SpectraError};

/// Something that may supply the audio path for a run
pub trait PathProvider {
    /// Short description used in diagnostics
    fn describe(&self) -> String;

    /// `Ok(None)` when this provider has nothing to offer
    fn provide(&self) -> Result<Option<PathBuf>>;
}

/// A path given directly, e.g. as a command-line argument
#[derive(Debug, Clone)]
pub struct LiteralPath(pub PathBuf);

impl PathProvider for LiteralPath {
    fn describe(&self) -> String {
        "command-line argument".to_string()
    }

    fn provide(&self) -> Result<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

/// A path read from an environment variable
#[derive(Debug, Clone)]
pub struct EnvPath {
    var: String,
}

impl EnvPath {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvPath {
    fn default() -> Self {
        Self::new(AUDIO_PATH_ENV)
    }
}

impl PathProvider for EnvPath {
    fn describe(&self) -> String {
        format!("${}", self.var)
    }

    fn provide(&self) -> Result<Option<PathBuf>> {
        Ok(env::var_os(&self.var)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from))
    }
}

/// The `audio_path` recorded in a session file
#[derive(Debug, Clone)]
pub struct SessionPath {
    file: PathBuf,
}

impl SessionPath {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }
}

impl PathProvider for SessionPath {
    fn describe(&self) -> String {
        format!("session file {}", self.file.display())
    }

    fn provide(&self) -> Result<Option<PathBuf>> {
        Ok(Session::load(&self.file)?.map(|s| s.audio_path))
    }
}

/// Ask each provider in order; the first one with a path wins
///
/// # Errors
/// Propagates a provider's error, or `NoAudioPath` if none had a path.
pub fn resolve_path(providers: &[Box<dyn PathProvider>]) -> Result<PathBuf> {
    for provider in providers {
        if let Some(path) = provider.provide()? {
            debug!(source = %provider.describe(), path = %path.display(), "resolved audio path");
            return Ok(path);
        }
    }

    let tried = providers
        .iter()
        .map(|p| p.describe())
        .collect::<Vec<_>>()
        .join(", ");
    Err(SpectraError::NoAudioPath(tried))
}
