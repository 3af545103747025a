//! Analysis parameters and the session file
//!
//! The session file records the last selected audio path (and optional
//! parameter overrides) as JSON:
//!
//! ```json
//! { "audio_path": "recordings/vowel.wav", "frame_length": 2048, "lpc_order": 16 }
//! ```
//!
//! `audio_path` is required; the parameter fields may be omitted.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SpectraError};
use crate::filters::windows::WindowType;
use crate::lpc::LpcMethod;
use crate::spectrum::analysis::MAX_FRAME_LENGTH;
use crate::spectrum::curve::FrequencyAxis;

pub const DEFAULT_FRAME_LENGTH: usize = 2048;
pub const DEFAULT_LPC_ORDER: usize = 16;

/// Default session file, relative to the working directory
pub const DEFAULT_SESSION_FILE: &str = ".frame-spectra.json";

/// Environment variable read by the environment path provider
pub const AUDIO_PATH_ENV: &str = "FRAME_SPECTRA_AUDIO";

/// Parameters for one analysis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Requested frame length in samples
    pub frame_length: usize,

    /// LPC model order
    pub lpc_order: usize,

    /// Taper applied to the frame
    pub window: WindowType,

    pub lpc_method: LpcMethod,

    /// Frequency axis shared by both curves
    pub axis: FrequencyAxis,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_length: DEFAULT_FRAME_LENGTH,
            lpc_order: DEFAULT_LPC_ORDER,
            window: WindowType::Hann,
            lpc_method: LpcMethod::Autocorrelation,
            axis: FrequencyAxis::Linspace,
        }
    }
}

impl AnalysisConfig {
    /// Reject out-of-range parameters before any computation
    pub fn validate(&self) -> Result<()> {
        if self.frame_length == 0 {
            return Err(SpectraError::InvalidParameter(
                "frame_length must be a positive integer".to_string(),
            ));
        }
        if self.frame_length > MAX_FRAME_LENGTH {
            return Err(SpectraError::InvalidParameter(format!(
                "frame_length must not exceed {MAX_FRAME_LENGTH}"
            )));
        }
        if self.lpc_order == 0 {
            return Err(SpectraError::InvalidParameter(
                "lpc_order must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Fill parameters the caller left unset from a session's overrides
    ///
    /// Overrides belong to the session's selection: they are ignored unless
    /// `path` is the session's `audio_path`.
    pub fn with_session_overrides(
        mut self,
        session: &Session,
        path: &Path,
        frame_length_set: bool,
        lpc_order_set: bool,
    ) -> Self {
        if session.audio_path.as_path() != path {
            debug!(
                session = %session.audio_path.display(),
                path = %path.display(),
                "session overrides not applied to a different file"
            );
            return self;
        }
        if let (false, Some(frame_length)) = (frame_length_set, session.frame_length) {
            self.frame_length = frame_length;
        }
        if let (false, Some(lpc_order)) = (lpc_order_set, session.lpc_order) {
            self.lpc_order = lpc_order;
        }
        self
    }
}

/// Persisted selection, written by `select` and read back by later runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub audio_path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lpc_order: Option<usize>,
}

impl Session {
    pub fn new(audio_path: impl Into<PathBuf>) -> Self {
        Self {
            audio_path: audio_path.into(),
            frame_length: None,
            lpc_order: None,
        }
    }

    /// Read a session file
    ///
    /// # Returns
    /// `Ok(None)` if the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SpectraError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let session: Session = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), audio = %session.audio_path.display(), "loaded session");
        Ok(Some(session))
    }

    /// Write the session file, replacing any previous one
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.frame_length, 2048);
        assert_eq!(config.lpc_order, 16);
        assert_eq!(config.window, WindowType::Hann);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_parameters_rejected() {
        let config = AnalysisConfig {
            frame_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SpectraError::InvalidParameter(_))));

        let config = AnalysisConfig {
            lpc_order: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SpectraError::InvalidParameter(_))));
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = Session {
            audio_path: PathBuf::from("take 3.wav"),
            frame_length: Some(1024),
            lpc_order: None,
        };
        session.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("lpc_order"));

        assert_eq!(Session::load(&path).unwrap(), Some(session));
    }

    #[test]
    fn test_missing_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Session::load(&dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_malformed_session_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ \"frame_length\": 12 }").unwrap();

        assert!(matches!(Session::load(&path), Err(SpectraError::Session(_))));
    }

    #[test]
    fn test_session_overrides_only_unset_fields() {
        let session = Session {
            audio_path: PathBuf::from("a.wav"),
            frame_length: Some(512),
            lpc_order: Some(8),
        };

        let config = AnalysisConfig::default().with_session_overrides(
            &session,
            Path::new("a.wav"),
            false,
            true,
        );
        assert_eq!(config.frame_length, 512);
        assert_eq!(config.lpc_order, 16);
    }

    #[test]
    fn test_session_overrides_ignored_for_other_file() {
        let session = Session {
            audio_path: PathBuf::from("a.wav"),
            frame_length: Some(512),
            lpc_order: Some(8),
        };

        let config = AnalysisConfig::default().with_session_overrides(
            &session,
            Path::new("b.wav"),
            false,
            false,
        );
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_oversized_frame_length_rejected() {
        for frame_length in [MAX_FRAME_LENGTH + 1, usize::MAX / 2] {
            let config = AnalysisConfig {
                frame_length,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(SpectraError::InvalidParameter(_))));
        }

        let config = AnalysisConfig {
            frame_length: MAX_FRAME_LENGTH,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
