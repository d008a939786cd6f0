use chrono::{FixedOffset, NaiveDate, Utc};
use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

use crate::scan::problem_id;

/// The "today" window is evaluated in KST regardless of the host timezone.
const KST_OFFSET_SECS: i32 = 9 * 3600;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command failed: {0}")]
    CommandFailed(String),
    #[error("no commits found")]
    NoCommits,
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GitError>;

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("offset is in range")
}

/// Current calendar date in KST.
pub fn today_in_kst() -> NaiveDate {
    Utc::now().with_timezone(&kst()).date_naive()
}

/// Whether the checkout has git metadata at all.
///
/// Repos without `.git` are never queried; their git-derived fields stay at
/// their defaults.
pub fn has_metadata(repo_dir: &Path) -> bool {
    repo_dir.join(".git").exists()
}

/// Distinct problem ids first added to the solutions folder on `date` (KST).
///
/// Runs `git log --diff-filter=A --name-status` bounded to the KST calendar
/// day and parses the tab-separated status/path lines. Only additions under
/// one of the solutions dirnames contribute.
pub fn today_added_ids(
    repo_dir: &Path,
    solutions_dirnames: &[String],
    date: NaiveDate,
) -> Result<BTreeSet<u64>> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .arg("log")
        .arg("--diff-filter=A")
        .arg("--name-status")
        .arg("--pretty=format:")
        .arg(format!("--since={date} 00:00:00 +0900"))
        .arg(format!("--until={date} 23:59:59 +0900"))
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed(format!(
            "git log failed: {}",
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8(output.stdout)?;
    let ids = parse_added_ids(&stdout, solutions_dirnames);
    debug!("{}: {} ids added on {date}", repo_dir.display(), ids.len());
    Ok(ids)
}

/// Parse `--name-status` output into the set of added problem ids.
fn parse_added_ids(stdout: &str, solutions_dirnames: &[String]) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();

    for line in stdout.lines() {
        let Some((status, path)) = line.split_once('\t') else {
            continue;
        };
        if !status.starts_with('A') {
            continue;
        }

        // Paths are repo-relative; the solutions folder is an immediate child.
        let Some((first, _)) = path.split_once('/') else {
            continue;
        };
        if !solutions_dirnames.iter().any(|name| name == first) {
            continue;
        }

        if let Some(stem) = Path::new(path).file_stem().and_then(|stem| stem.to_str())
            && let Some(id) = problem_id(stem)
        {
            ids.insert(id);
        }
    }

    ids
}

/// Date of the most recent commit, formatted `YYYY-MM-DD`.
pub fn last_commit_date(repo_dir: &Path) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .arg("log")
        .arg("-1")
        .arg("--format=%cd")
        .arg("--date=short")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed(format!(
            "git log -1 failed: {}",
            stderr.trim()
        )));
    }

    let date = String::from_utf8(output.stdout)?.trim().to_string();
    if date.is_empty() {
        return Err(GitError::NoCommits);
    }
    Ok(date)
}
