use crate::core::package::PackageId;
use crate::source::SourceError;

/// A system that can be asked for a package's direct declared dependencies.
/// `Ok(None)` means the source has no record of the package; only a failure
/// to run the underlying tool at all is an error.
pub trait MetadataSource {
    fn id(&self) -> &'static str;
    fn lookup(&self, package: &PackageId) -> Result<Option<Vec<PackageId>>, SourceError>;
}
