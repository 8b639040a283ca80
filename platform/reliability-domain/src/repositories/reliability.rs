use crate::error::ExportError;
use std::path::Path;

/// Sink for the rendered reliability lookup.
///
/// Implementations must not leave a partial file behind on failure.
pub trait ReliabilityWriter {
    fn write_reliability_json(&self, path: &Path, contents: &str) -> Result<(), ExportError>;
}
