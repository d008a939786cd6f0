use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{END_MARKER, START_MARKER};

/// Byte offsets of the start marker and the end marker, when both are
/// present with the end marker after the start marker.
fn marker_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find(START_MARKER)?;
    let end = text[start..].find(END_MARKER)?;
    Some((start, start + end))
}

/// Replace the sentinel-delimited region of `original` with `block`.
///
/// The sentinels themselves are kept; everything strictly between them is
/// replaced and the surrounding text is preserved verbatim. If either
/// sentinel is missing (or they are out of order), both are appended at the
/// end of the file first — the auto-heal policy means this never fails.
pub fn replace_block(original: &str, block: &str) -> String {
    match marker_span(original) {
        Some(span) => splice(original, span, block),
        None => {
            let healed = format!(
                "{}\n\n{START_MARKER}\n{END_MARKER}\n",
                original.trim_end()
            );
            match marker_span(&healed) {
                Some(span) => splice(&healed, span, block),
                // Unreachable: healed text always carries both markers in order
                None => healed,
            }
        }
    }
}

fn splice(text: &str, (start, end): (usize, usize), block: &str) -> String {
    let prefix = &text[..start];
    let suffix = &text[end + END_MARKER.len()..];
    format!(
        "{prefix}{START_MARKER}\n{}\n{END_MARKER}{suffix}",
        block.trim_end()
    )
}

/// Create the target README with a marker skeleton if it does not exist.
pub fn ensure_readme(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    if path.exists() {
        return Ok(());
    }

    let skeleton = format!(
        "## Problem Solving Stats\n\n{START_MARKER}\n(this section is auto-generated)\n{END_MARKER}\n"
    );
    fs::write(path, skeleton).with_context(|| format!("Failed to create {}", path.display()))
}

/// Rewrite the README's marker block in place.
///
/// Returns whether the file content actually changed, so callers can report
/// an already-up-to-date run.
pub fn update_file(path: &Path, block: &str) -> Result<bool> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let updated = replace_block(&original, block);
    if updated == original {
        return Ok(false);
    }
    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
