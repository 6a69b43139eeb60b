//! Library location configuration
//!
//! Decides which shared object [`crate::library::VcfLibrary`] opens. An
//! explicit path (from code or `TILEDB_VCF_LIBRARY`) is used exclusively;
//! otherwise the platform default names are tried in order and resolved by
//! the system loader's search path.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable holding an explicit library path.
pub const LIBRARY_PATH_ENV: &str = "TILEDB_VCF_LIBRARY";

/// File names tried when no explicit path is configured.
pub const DEFAULT_LIBRARY_NAMES: &[&str] =
    &["libtiledbvcf.so", "libtiledbvcf.dylib", "tiledbvcf.dll"];

/// Where to find libtiledbvcf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Explicit path to the shared library
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LibraryConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// An empty `TILEDB_VCF_LIBRARY` is treated as unset.
    pub fn from_env() -> Self {
        let path = env::var_os(LIBRARY_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { path }
    }

    /// Candidate paths, in the order they should be tried.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match &self.path {
            Some(path) => vec![path.clone()],
            None => DEFAULT_LIBRARY_NAMES.iter().map(PathBuf::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_is_exclusive() {
        let config = LibraryConfig::with_path("/opt/tiledbvcf/lib/libtiledbvcf.so");
        assert_eq!(
            config.candidates(),
            vec![PathBuf::from("/opt/tiledbvcf/lib/libtiledbvcf.so")]
        );
    }

    #[test]
    fn test_default_candidates() {
        let config = LibraryConfig::default();
        let candidates = config.candidates();
        assert_eq!(candidates.len(), DEFAULT_LIBRARY_NAMES.len());
        assert_eq!(candidates[0], PathBuf::from("libtiledbvcf.so"));
    }

    #[test]
    fn test_deserialize_without_path() {
        let config: LibraryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LibraryConfig::default());

        let config: LibraryConfig =
            serde_json::from_str(r#"{"path": "/tmp/libtiledbvcf.so"}"#).unwrap();
        assert_eq!(config.path, Some(PathBuf::from("/tmp/libtiledbvcf.so")));
    }
}
