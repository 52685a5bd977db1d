use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use crate::graph::viz;
use crate::graph::DependencyGraph;
use crate::render::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Spools the DOT description to a temporary file and hands it to an
/// external Graphviz layout executable.
pub struct Graphviz {
    program: PathBuf,
    format: ImageFormat,
}

impl Graphviz {
    pub fn new(program: PathBuf, format: ImageFormat) -> Self {
        Self { program, format }
    }

    pub fn render(&self, graph: &DependencyGraph, output: &Path) -> Result<(), RenderError> {
        let dot = viz::render_dot(&graph.root, &graph.edges);
        let mut spool = NamedTempFile::new()?;
        spool.write_all(dot.as_bytes())?;
        spool.flush()?;

        // the spool file is deleted when dropped, on every exit path below
        let invoked = Command::new(&self.program)
            .arg(format!("-T{}", self.format.as_str()))
            .arg(spool.path())
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    RenderError::BackendUnavailable(self.program.clone())
                } else {
                    RenderError::Invoke {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !invoked.status.success() {
            return Err(RenderError::BackendFailed {
                status: invoked.status,
                stderr: String::from_utf8_lossy(&invoked.stderr).trim().to_string(),
            });
        }
        if !output.is_file() {
            return Err(RenderError::OutputWrite(output.to_path_buf()));
        }

        Ok(())
    }
}
