//! Handoff file readers

pub mod address;
pub mod credentials;

pub use address::read_address;
pub use credentials::SplunkCredentials;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading a handoff file, classified so diagnostics name both
/// the file and the kind of failure.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },
}

impl InputError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
