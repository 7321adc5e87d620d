use crate::config::ProcessingConfig;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Handles file system traversal and discovery of usage log files
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    suffix: String,
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::from_config(&ProcessingConfig::default())
    }
}

impl FileDiscovery {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(config.log_suffix.clone())
    }

    /// Whether the file name carries the log suffix
    pub fn is_log_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(&self.suffix))
            .unwrap_or(false)
    }

    /// Walk `root` recursively, yielding regular log files in traversal order.
    ///
    /// Walk errors are yielded as-is; an error at depth 0 means the root itself
    /// could not be walked.
    pub fn log_files<'a>(
        &'a self,
        root: &Path,
    ) -> impl Iterator<Item = walkdir::Result<PathBuf>> + 'a {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_log_file(entry.path()) {
                        Some(Ok(entry.into_path()))
                    } else {
                        None
                    }
                }
                Err(err) => Some(Err(err)),
            })
    }
}
