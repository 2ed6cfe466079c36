//! Error types for a generation run.
//!
//! A run either completes or fails with the first error encountered. Nothing
//! is retried and nothing already written is rolled back: errors carry enough
//! context (paths, template names) for the caller to diagnose the failure,
//! not to resume it.

use std::io;
use std::path::PathBuf;

/// Failure modes of a generation run.
///
/// Each variant corresponds to one stage of the pipeline. The first error
/// aborts the run; output written before the failure stays on disk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model transformer rejected the raw input. Raised before any
    /// output is written.
    #[error("model transform failed")]
    Transform(#[source] anyhow::Error),

    /// A referenced template or partial file does not exist in the
    /// template set.
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// A storage operation (read, write, directory create/remove) failed.
    #[error("storage operation failed on {path}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template body failed to parse or render. `name` identifies the
    /// template (action output, rule input, or partial) for diagnostics.
    #[error("render failed for {name}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(name: impl Into<String>, source: minijinja::Error) -> Self {
        Error::Render {
            name: name.into(),
            source,
        }
    }
}
