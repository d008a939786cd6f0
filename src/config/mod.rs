use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Sentinel line opening the auto-generated README region.
pub const START_MARKER: &str = "<!-- KOTE_STATS_START -->";
/// Sentinel line closing the auto-generated README region.
pub const END_MARKER: &str = "<!-- KOTE_STATS_END -->";

/// Extensions counted when `filter_by_extension` is on.
const DEFAULT_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cs", "go", "java", "js", "kt", "py", "rb", "rs", "swift", "ts",
];

/// Resolved configuration for one run.
///
/// Every path is explicit — nothing is derived from the executable location
/// or the current working directory beyond ordinary relative-path resolution.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Directory containing the repository checkouts to scan.
    pub root: PathBuf,
    /// Markdown file whose sentinel block is rewritten.
    pub readme: PathBuf,
    /// Candidate names for the solutions folder; first existing one wins.
    pub solutions_dirnames: Vec<String>,
    /// When true, only files with a known extension are counted.
    pub filter_by_extension: bool,
    pub known_extensions: BTreeSet<String>,
    /// Skip git history queries entirely (today counts become 0).
    pub skip_git: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("repos"),
            readme: PathBuf::from("profile/README.md"),
            solutions_dirnames: vec!["solutions".to_string(), "solution".to_string()],
            filter_by_extension: false,
            known_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            skip_git: false,
        }
    }
}

/// Scan settings that may be overridden from a JSON config file.
///
/// Only the scan-shape fields live here; paths and the git toggle are
/// CLI-only so a shared config file stays portable between checkouts.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileOverrides {
    pub solutions_dirnames: Option<Vec<String>>,
    pub filter_by_extension: Option<bool>,
    pub known_extensions: Option<BTreeSet<String>>,
}

/// Load overrides from a JSON file.
pub fn load_overrides(path: &Path) -> Result<FileOverrides> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

impl StatsConfig {
    /// Fold file-level overrides into this config.
    pub fn apply(&mut self, overrides: FileOverrides) {
        if let Some(names) = overrides.solutions_dirnames {
            self.solutions_dirnames = names;
        }
        if let Some(filter) = overrides.filter_by_extension {
            self.filter_by_extension = filter;
        }
        if let Some(extensions) = overrides.known_extensions {
            self.known_extensions = extensions;
        }
    }
}
