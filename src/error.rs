use thiserror::Error;

use crate::config::ConfigError;
use crate::render::RenderError;
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum DepictError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("metadata source error: {0}")]
    Source(#[from] SourceError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DepictError>;
