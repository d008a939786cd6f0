use crate::RepoEntry;

const HEADER: &str = "| Repo | Solved | Files | Today | Last commit |\n|---|---:|---:|---:|---|\n";

/// Render the stats table as markdown.
///
/// An empty entry list yields the header and alignment rows only; the totals
/// footer appears only when there is at least one data row. Rendering never
/// fails.
pub fn render(entries: &[RepoEntry]) -> String {
    let mut out = String::from(HEADER);
    if entries.is_empty() {
        return out;
    }

    let mut total_ids = 0;
    let mut total_files = 0;
    let mut total_today = 0;
    for entry in entries {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            entry.name,
            entry.total_count,
            entry.file_count,
            entry.today_count,
            entry.last_commit_date.as_deref().unwrap_or("-"),
        ));
        total_ids += entry.total_count;
        total_files += entry.file_count;
        total_today += entry.today_count;
    }

    out.push_str(&format!(
        "| **Total** | {total_ids} | {total_files} | {total_today} |  |\n"
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, total: usize, files: usize, today: usize) -> RepoEntry {
        RepoEntry {
            name: name.to_string(),
            total_count: total,
            file_count: files,
            today_count: today,
            last_commit_date: None,
        }
    }

    #[test]
    fn empty_entries_render_header_only() {
        let table = render(&[]);
        assert_eq!(table, HEADER);
        assert_eq!(table.lines().count(), 2);
    }

    #[test]
    fn rows_appear_in_input_order_with_totals_footer() {
        let table = render(&[entry("algo", 3, 4, 1), entry("daily", 2, 2, 0)]);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "| algo | 3 | 4 | 1 | - |");
        assert_eq!(lines[3], "| daily | 2 | 2 | 0 | - |");
        assert_eq!(lines[4], "| **Total** | 5 | 6 | 1 |  |");
    }

    #[test]
    fn last_commit_date_is_rendered_when_present() {
        let mut e = entry("algo", 1, 1, 0);
        e.last_commit_date = Some("2026-08-29".to_string());

        let table = render(&[e]);
        assert!(table.contains("| algo | 1 | 1 | 0 | 2026-08-29 |"));
    }
}
