use std::path::PathBuf;

use thiserror::Error;

pub mod apt;
pub mod pip;
pub mod traits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceId {
    Pip,
    Apt,
}

/// Resolved executable paths for the metadata tools.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub pip: PathBuf,
    pub apt_cache: PathBuf,
}

pub fn source_for(id: &SourceId, tools: &ToolPaths) -> Box<dyn traits::MetadataSource> {
    match id {
        SourceId::Pip => Box::new(pip::PipSource::new(tools.pip.clone())),
        SourceId::Apt => Box::new(apt::AptSource::new(tools.apt_cache.clone())),
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to invoke {tool}: {source}")]
    Invoke {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
