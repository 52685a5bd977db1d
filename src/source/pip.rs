use std::path::PathBuf;
use std::process::Command;

use crate::core::package::PackageId;
use crate::source::traits::MetadataSource;
use crate::source::SourceError;

/// Queries installed Python distributions via `pip show`.
pub struct PipSource {
    program: PathBuf,
}

impl PipSource {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

/// Dependency names live on the `Requires:` header line, comma-separated;
/// an absent or empty line means no declared dependencies.
fn parse_show_output(stdout: &str) -> Vec<PackageId> {
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Requires:") {
            return rest
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(PackageId::new)
                .collect();
        }
    }
    Vec::new()
}

impl MetadataSource for PipSource {
    fn id(&self) -> &'static str {
        "pip"
    }

    fn lookup(&self, package: &PackageId) -> Result<Option<Vec<PackageId>>, SourceError> {
        let output = Command::new(&self.program)
            .args(["show", package.as_str()])
            .output()
            .map_err(|source| SourceError::Invoke {
                tool: self.program.clone(),
                source,
            })?;

        // pip warns on stderr and exits non-zero for unknown distributions
        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Some(parse_show_output(&stdout)))
    }
}
