use std::path::{Component, Path};

/// Path segment that precedes `<project>/<session>` in a Claude data tree.
pub const PROJECTS_SEGMENT: &str = "projects";

/// Session-related path utilities
pub struct SessionUtils;

impl SessionUtils {
    /// Extract `(project, session)` from a log file path.
    ///
    /// Scans for the first `projects` segment and takes the next two segments.
    /// Returns two empty strings when the pattern is absent.
    pub fn extract_project_session(path: &Path) -> (String, String) {
        let segments: Vec<String> = path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        for (i, segment) in segments.iter().enumerate() {
            if segment == PROJECTS_SEGMENT && i + 2 < segments.len() {
                return (segments[i + 1].clone(), segments[i + 2].clone());
            }
        }

        (String::new(), String::new())
    }

    /// The grouping key for a session. `project="a", session="b/c"` and
    /// `project="a/b", session="c"` share a key.
    pub fn session_key(project: &str, session: &str) -> String {
        format!("{}/{}", project, session)
    }
}
