//! Runtime configuration
//!
//! Everything is read from the environment once at startup.

use std::path::{Path, PathBuf};

/// Environment variable overriding the database location
pub const DATABASE_PATH_VAR: &str = "NUTRILOG_DATABASE_PATH";

/// Log directive always added on top of `RUST_LOG`
pub const DEFAULT_LOG_DIRECTIVE: &str = "nutrilog=info";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    /// Build the configuration from environment variables
    pub fn from_env() -> Self {
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_database_path());

        Self { database_path }
    }
}

/// `<project>/data/nutrilog.db`, where the project root is the directory of
/// the executable with any trailing `target/{debug,release}` stripped
pub fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    database_path_for(&exe_dir)
}

fn database_path_for(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("nutrilog.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_cargo_target_dir() {
        let path = database_path_for(Path::new("/home/me/nutrilog/target/release"));
        assert_eq!(path, PathBuf::from("/home/me/nutrilog/data/nutrilog.db"));

        let path = database_path_for(Path::new("/home/me/nutrilog/target/debug"));
        assert_eq!(path, PathBuf::from("/home/me/nutrilog/data/nutrilog.db"));
    }

    #[test]
    fn test_installed_binary_keeps_its_dir() {
        let path = database_path_for(Path::new("/opt/nutrilog/bin"));
        assert_eq!(path, PathBuf::from("/opt/nutrilog/bin/data/nutrilog.db"));
    }
}
