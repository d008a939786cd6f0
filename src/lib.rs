pub mod cli;
pub mod config;
pub mod git;
pub mod markers;
pub mod scan;
pub mod table;

/// Statistics for a single repository checkout.
///
/// Recomputed from filesystem and git state on every run; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoEntry {
    pub name: String,
    /// Number of distinct problem ids found in the solutions folder.
    pub total_count: usize,
    /// Number of solution files (after the optional extension filter).
    pub file_count: usize,
    /// Distinct problem ids first added today (KST), per git history.
    pub today_count: usize,
    /// Date of the most recent commit (`YYYY-MM-DD`), if the repo has one.
    pub last_commit_date: Option<String>,
}
