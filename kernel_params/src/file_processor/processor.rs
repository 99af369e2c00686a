//! Kernel file loading with compile-time size limits and global logging integration

use crate::config::compile_time::document::{MAX_LINE_COUNT, MAX_SOURCE_SIZE};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_performance};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Errors raised while loading a kernel source from disk
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: &std::io::Error, path: &Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound { path },
            ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
            ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path, error),
            },
        }
    }
}

/// Metadata collected while loading a kernel file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Number of lines in the source
    pub line_count: usize,
}

impl FileMetadata {
    /// File size in human-readable format
    pub fn human_readable_size(&self) -> String {
        human_size(self.size)
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// A loaded kernel source together with its metadata
#[derive(Debug, Clone)]
pub struct LoadedKernel {
    pub source: String,
    pub metadata: FileMetadata,
    pub load_duration: Duration,
}

impl LoadedKernel {
    /// True when the source holds nothing but whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Loads kernel sources, enforcing the compile-time document limits
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    preferences: FileProcessorPreferences,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preferences(preferences: FileProcessorPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &FileProcessorPreferences {
        &self.preferences
    }

    pub fn max_source_size() -> u64 {
        MAX_SOURCE_SIZE
    }

    pub fn max_line_count() -> usize {
        MAX_LINE_COUNT
    }

    /// Load a kernel file. A failure is logged once and returned.
    pub fn load(&self, file_path: &str) -> Result<LoadedKernel, FileProcessorError> {
        self.load_inner(file_path).map_err(|error| {
            log_error!(error.error_code(), &error.to_string(), "file" => file_path);
            error
        })
    }

    fn load_inner(&self, file_path: &str) -> Result<LoadedKernel, FileProcessorError> {
        let start = Instant::now();
        log_debug!("Loading kernel file", "file" => file_path);

        let path = validate_path(file_path)?;
        let size = fs::metadata(&path)
            .map_err(|e| FileProcessorError::from_io(&e, &path))?
            .len();

        if size > MAX_SOURCE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size,
                max_size: MAX_SOURCE_SIZE,
            });
        }

        let bytes = fs::read(&path).map_err(|e| FileProcessorError::from_io(&e, &path))?;
        // Raw text: bytes outside UTF-8 can only sit in comments or bodies
        let source = String::from_utf8_lossy(&bytes).into_owned();

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            return Err(FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            });
        }

        let loaded = LoadedKernel {
            source,
            metadata: FileMetadata {
                path,
                size,
                line_count,
            },
            load_duration: start.elapsed(),
        };

        if self.preferences.reject_empty_files && loaded.is_effectively_empty() {
            return Err(FileProcessorError::EmptyFile {
                path: file_path.to_string(),
            });
        }

        if self.preferences.enable_performance_logging {
            log_performance!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "Kernel file loaded",
                duration = loaded.load_duration,
                "file" => file_path,
                "size" => loaded.metadata.human_readable_size(),
                "lines" => line_count
            );
        }

        Ok(loaded)
    }
}

fn validate_path(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    if file_path.is_empty() {
        return Err(FileProcessorError::InvalidPath {
            path: String::new(),
        });
    }

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(FileProcessorError::FileNotFound {
            path: file_path.to_string(),
        });
    }
    if !path.is_file() {
        return Err(FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        });
    }

    path.canonicalize()
        .map_err(|e| FileProcessorError::from_io(&e, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_memory_logger;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn quiet() -> FileProcessor {
        FileProcessor::from_preferences(FileProcessorPreferences {
            enable_performance_logging: false,
            reject_empty_files: false,
        })
    }

    #[test]
    fn test_load_kernel_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blur.kernel");
        fs::write(&path, "uniform float radius;\nuniform vec2 center;\n").unwrap();

        let loaded = quiet().load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.metadata.line_count, 2);
        assert_eq!(loaded.metadata.size, 43);
        assert!(loaded.source.starts_with("uniform float"));
    }

    #[test]
    fn test_missing_file() {
        let result = quiet().load("/definitely/not/here.kernel");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_path() {
        assert_matches!(quiet().load(""), Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = quiet().load(dir.path().to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_non_utf8_comment_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.kernel");
        fs::write(&path, b"// caf\xe9\nuniform float a;\n").unwrap();

        let loaded = quiet().load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.metadata.line_count, 2);

        let table = crate::params::scan_parameters(&loaded.source).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.descriptors()[0].name, "a");
    }

    #[test]
    fn test_empty_file_accepted_by_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.kernel");
        fs::write(&path, "").unwrap();

        let loaded = quiet().load(path.to_str().unwrap()).unwrap();
        assert!(loaded.is_effectively_empty());
    }

    #[test]
    fn test_empty_file_rejected_when_configured() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.kernel");
        fs::write(&path, "  \n\t\n").unwrap();

        let processor = FileProcessor::from_preferences(FileProcessorPreferences {
            enable_performance_logging: false,
            reject_empty_files: true,
        });
        let result = processor.load(path.to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::EmptyFile { .. }));
    }

    #[test]
    fn test_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.kernel");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_SOURCE_SIZE + 1).unwrap();

        let result = quiet().load(path.to_str().unwrap());
        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size == MAX_SOURCE_SIZE + 1 && max_size == MAX_SOURCE_SIZE
        );
    }

    #[test]
    fn test_error_codes() {
        let error = FileProcessorError::FileNotFound {
            path: "x.kernel".to_string(),
        };
        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");

        let error = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(error.error_code(), codes::file_processing::TOO_MANY_LINES);
    }

    #[test]
    fn test_failure_logged_once() {
        let logger = test_memory_logger();
        let path = "/missing/logged-once.kernel";
        let _ = quiet().load(path);

        let events: Vec<_> = logger
            .get_events_with_code(codes::file_processing::FILE_NOT_FOUND)
            .into_iter()
            .filter(|e| e.context.get("file").map(String::as_str) == Some(path))
            .collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.00 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.00 MB");
    }
}
