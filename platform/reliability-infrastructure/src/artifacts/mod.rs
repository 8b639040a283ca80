use reliability_domain::error::ExportError;
use reliability_domain::repositories::reliability::ReliabilityWriter;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Writes the reliability lookup through a temporary sibling and a rename, so
/// a failed run never leaves a truncated file at the target path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemReliabilityWriter {
    create_parent_dirs: bool,
}

impl FilesystemReliabilityWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_parent_dirs(mut self, create_parent_dirs: bool) -> Self {
        self.create_parent_dirs = create_parent_dirs;
        self
    }
}

fn record_write_metrics(start: Instant, result: &Result<(), ExportError>) {
    let result_label = match result {
        Ok(()) => "ok",
        Err(err) => err.kind(),
    };
    metrics::counter!(
        "ticker_reliability.infra.reliability.write.calls_total",
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("ticker_reliability.infra.reliability.write_ms", "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

impl ReliabilityWriter for FilesystemReliabilityWriter {
    fn write_reliability_json(&self, path: &Path, contents: &str) -> Result<(), ExportError> {
        let start = Instant::now();
        let result = write_atomic(path, contents.as_bytes(), self.create_parent_dirs);
        record_write_metrics(start, &result);
        result
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn write_atomic(
    path: &Path,
    contents: &[u8],
    create_parent_dirs: bool,
) -> Result<(), ExportError> {
    let file_name = path.file_name().ok_or_else(|| ExportError::Io {
        path: path.to_path_buf(),
        message: "output path has no file name".to_string(),
    })?;
    let parent = parent_dir(path);

    if create_parent_dirs {
        fs::create_dir_all(&parent).map_err(|err| ExportError::io(&parent, &err))?;
    } else if !parent.is_dir() {
        return Err(ExportError::Io {
            path: path.to_path_buf(),
            message: format!("parent directory {} does not exist", parent.display()),
        });
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp-{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let written = fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&tmp_path, path));

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(ExportError::io(path, &err));
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote reliability json");
    Ok(())
}
