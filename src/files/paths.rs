// Filesystem path utilities.
// Resolves platform directories for config, logs, and CSV exports.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tripdesk")
}

/// Path to the configuration file (~/.config/tripdesk/config.json on Linux).
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Directory holding the log file.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Where exports land when the config does not say otherwise.
/// Falls back to the current directory when there is no download folder.
pub fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Path of the `<entity>.csv` file inside an export directory.
pub fn export_path(dir: &Path, entity: &str) -> PathBuf {
    dir.join(format!("{}.csv", sanitize_name(entity)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            _ => c.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("participants"), "participants");
        assert_eq!(sanitize_name("Useful Infos"), "useful_infos");
        assert_eq!(sanitize_name("a/b:c"), "a_b_c");
    }

    #[test]
    fn test_export_path() {
        let path = export_path(Path::new("/tmp/out"), "participants");
        assert!(path.ends_with("out/participants.csv"));
    }

    #[test]
    fn test_config_path_file_name() {
        // Only checks construction, not the filesystem
        if let Some(path) = config_path() {
            assert!(path.ends_with("config.json"));
        }
    }
}
