use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub mod graphviz;

pub use graphviz::{Graphviz, ImageFormat};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("rendering backend not found: {0}")]
    BackendUnavailable(PathBuf),
    #[error("failed to invoke rendering backend {program}: {source}")]
    Invoke {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("rendering backend exited with {status}: {stderr}")]
    BackendFailed { status: ExitStatus, stderr: String },
    #[error("failed to write graph description: {0}")]
    Spool(#[from] std::io::Error),
    #[error("output image was not written: {0}")]
    OutputWrite(PathBuf),
}
