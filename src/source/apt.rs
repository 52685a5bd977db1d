use std::path::PathBuf;
use std::process::Command;

use crate::core::package::PackageId;
use crate::source::traits::MetadataSource;
use crate::source::SourceError;

/// Queries the system package database via `apt-cache depends`.
pub struct AptSource {
    program: PathBuf,
}

impl AptSource {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }
}

/// One trimmed `Depends:` line per dependency. Alternative branches
/// (`|Depends:`) and angle-bracketed virtual targets are skipped.
fn parse_depends_output(stdout: &str) -> Vec<PackageId> {
    let mut deps = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Depends:") {
            let name = rest.trim();
            if name.is_empty() || name.starts_with('<') {
                continue;
            }
            deps.push(PackageId::new(name));
        }
    }
    deps
}

impl MetadataSource for AptSource {
    fn id(&self) -> &'static str {
        "apt"
    }

    fn lookup(&self, package: &PackageId) -> Result<Option<Vec<PackageId>>, SourceError> {
        let output = Command::new(&self.program)
            .args(["depends", package.as_str()])
            .output()
            .map_err(|source| SourceError::Invoke {
                tool: self.program.clone(),
                source,
            })?;

        // apt-cache exits non-zero ("E: No packages found") for unknown names
        if !output.status.success() {
            return Ok(None);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Some(parse_depends_output(&stdout)))
    }
}
