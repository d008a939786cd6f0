use anyhow::{Context, Result};
use ignore::WalkBuilder;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::RepoEntry;
use crate::config::StatsConfig;
use crate::git;

/// Solution file stems look like `boj_1000`; the prefix match is
/// case-insensitive, the id is the uniqueness key.
static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^boj_(\d+)$").unwrap()
});

/// Extract the problem id from a file stem, if it matches the convention.
pub fn problem_id(stem: &str) -> Option<u64> {
    let captures = ID_PATTERN.captures(stem)?;
    captures.get(1)?.as_str().parse().ok()
}

/// File and unique-id counts for one repository's solutions folder.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SolutionCounts {
    pub file_count: usize,
    pub ids: BTreeSet<u64>,
}

/// List the immediate subdirectories of `root`, sorted case-insensitively.
///
/// A missing root is created rather than treated as an error, so a fresh
/// checkout produces an empty (header-only) table instead of failing.
pub fn list_repo_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create repos root {}", root.display()))?;

    let mut dirs = Vec::new();
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to read repos root {}", root.display()))?;
    for entry in entries {
        let entry = entry.context("Failed to read repos root entry")?;
        if entry.file_type().context("Failed to stat repos root entry")?.is_dir() {
            dirs.push(entry.path());
        }
    }

    dirs.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(dirs)
}

/// Find the solutions folder for a repo: first configured name that exists.
fn solutions_dir(repo_dir: &Path, config: &StatsConfig) -> Option<PathBuf> {
    config
        .solutions_dirnames
        .iter()
        .map(|name| repo_dir.join(name))
        .find(|candidate| candidate.is_dir())
}

/// Walk a repo's solutions folder and count files and distinct problem ids.
///
/// A repo without a solutions folder yields zero counts — that is a normal
/// state for a freshly created checkout, not an error.
pub fn count_solutions(repo_dir: &Path, config: &StatsConfig) -> Result<SolutionCounts> {
    let mut counts = SolutionCounts::default();
    let Some(dir) = solutions_dir(repo_dir, config) else {
        return Ok(counts);
    };

    // standard_filters off: ignore-file semantics don't apply to a stats scan
    let walker = WalkBuilder::new(&dir).standard_filters(false).build();
    for result in walker {
        let entry = result
            .with_context(|| format!("Failed to walk solutions dir {}", dir.display()))?;
        if !entry.file_type().is_some_and(|ty| ty.is_file()) {
            continue;
        }
        let path = entry.path();

        if config.filter_by_extension {
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase());
            let known = extension
                .as_deref()
                .is_some_and(|ext| config.known_extensions.contains(ext));
            if !known {
                continue;
            }
        }

        counts.file_count += 1;
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            && let Some(id) = problem_id(stem)
        {
            counts.ids.insert(id);
        }
    }

    Ok(counts)
}

/// Scan every repo under the configured root and assemble its table row.
///
/// Git-derived fields degrade per repo: a checkout without `.git` is skipped
/// silently, and a failing history query logs a warning and falls back to
/// zero rather than aborting the run.
pub fn collect_entries(config: &StatsConfig) -> Result<Vec<RepoEntry>> {
    let today = git::today_in_kst();
    let mut entries = Vec::new();

    for repo_dir in list_repo_dirs(&config.root)? {
        let name = repo_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let counts = count_solutions(&repo_dir, config)?;

        let (today_count, last_commit_date) =
            if config.skip_git || !git::has_metadata(&repo_dir) {
                (0, None)
            } else {
                let today_count =
                    match git::today_added_ids(&repo_dir, &config.solutions_dirnames, today) {
                        Ok(ids) => ids.len(),
                        Err(err) => {
                            warn!("git history query failed for {name}: {err}");
                            0
                        }
                    };
                (today_count, git::last_commit_date(&repo_dir).ok())
            };

        debug!(
            "{name}: {} ids across {} files, {today_count} today",
            counts.ids.len(),
            counts.file_count
        );
        entries.push(RepoEntry {
            name,
            total_count: counts.ids.len(),
            file_count: counts.file_count,
            today_count,
            last_commit_date,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_id_matches_prefix_case_insensitively() {
        assert_eq!(problem_id("boj_1000"), Some(1000));
        assert_eq!(problem_id("BOJ_1234"), Some(1234));
        assert_eq!(problem_id("Boj_42"), Some(42));
    }

    #[test]
    fn problem_id_rejects_non_matching_stems() {
        assert_eq!(problem_id("boj_"), None);
        assert_eq!(problem_id("boj_12a"), None);
        assert_eq!(problem_id("leetcode_1000"), None);
        assert_eq!(problem_id("readme"), None);
        assert_eq!(problem_id("xboj_1000"), None);
    }

    #[test]
    fn missing_solutions_dir_yields_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("a");
        fs::create_dir(&repo).unwrap();

        let counts = count_solutions(&repo, &StatsConfig::default()).unwrap();
        assert_eq!(counts, SolutionCounts::default());
    }

    #[test]
    fn duplicate_ids_across_files_count_once() {
        let dir = tempfile::tempdir().unwrap();
        let solutions = dir.path().join("a/solutions");
        fs::create_dir_all(&solutions).unwrap();
        fs::write(solutions.join("boj_1000.py"), "").unwrap();
        fs::write(solutions.join("boj_1000.cpp"), "").unwrap();

        let counts = count_solutions(&dir.path().join("a"), &StatsConfig::default()).unwrap();
        assert_eq!(counts.file_count, 2);
        assert_eq!(counts.ids.len(), 1);
    }

    #[test]
    fn singular_solution_dirname_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let solutions = dir.path().join("a/solution");
        fs::create_dir_all(&solutions).unwrap();
        fs::write(solutions.join("boj_2557.rs"), "").unwrap();

        let counts = count_solutions(&dir.path().join("a"), &StatsConfig::default()).unwrap();
        assert_eq!(counts.file_count, 1);
        assert!(counts.ids.contains(&2557));
    }

    #[test]
    fn extension_filter_excludes_unknown_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let solutions = dir.path().join("a/solutions");
        fs::create_dir_all(&solutions).unwrap();
        fs::write(solutions.join("boj_9999.txt"), "").unwrap();
        fs::write(solutions.join("boj_1000.py"), "").unwrap();
        fs::write(solutions.join("boj_1001"), "").unwrap();

        let config = StatsConfig {
            filter_by_extension: true,
            ..StatsConfig::default()
        };
        let counts = count_solutions(&dir.path().join("a"), &config).unwrap();
        assert_eq!(counts.file_count, 1);
        assert_eq!(counts.ids.iter().copied().collect::<Vec<_>>(), vec![1000]);
    }

    #[test]
    fn nested_solution_files_are_found() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/solutions/graphs/bfs");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("boj_1260.py"), "").unwrap();

        let counts = count_solutions(&dir.path().join("a"), &StatsConfig::default()).unwrap();
        assert_eq!(counts.ids.len(), 1);
    }

    #[test]
    fn list_repo_dirs_creates_missing_root_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("repos");

        let empty = list_repo_dirs(&root).unwrap();
        assert!(empty.is_empty());
        assert!(root.is_dir(), "missing root should be created");

        fs::create_dir(root.join("Zebra")).unwrap();
        fs::create_dir(root.join("apple")).unwrap();
        fs::write(root.join("stray-file"), "").unwrap();

        let names: Vec<String> = list_repo_dirs(&root)
            .unwrap()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["apple", "Zebra"]);
    }
}
