//! Porcelain status parsing and classification.
//!
//! [`StatusReport::classify`] maps raw `git status --porcelain` text into
//! four disjoint buckets (staged, unstaged, untracked, conflicts) plus a
//! clean flag. The classification is a pure function over the captured
//! text: it never touches the repository, the disk, or the network, and it
//! never fails.
//!
//! Two quirks of the classification are contractual and covered by tests:
//!
//! - The conflict code set is closed (`UU`, `AA`, `DD`, `DU`, `UD`). Codes
//!   like `AU` that git can also emit for unmerged paths fall through to
//!   the staged branch instead.
//! - Staged and unstaged classification are alternatives, not independent.
//!   A path with both index and worktree changes (e.g. `MM`) is reported
//!   staged only; its worktree modification is not listed.

use serde::Serialize;

/// The two-character codes treated as merge conflicts.
pub const CONFLICT_CODES: [&str; 5] = ["UU", "AA", "DD", "DU", "UD"];

/// Index/worktree states that mark a path as tracked-and-changed.
const CHANGE_STATES: [char; 5] = ['A', 'M', 'D', 'R', 'C'];

/// One changed path parsed from a porcelain status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Repo-relative path, taken verbatim from the line. Rename arrows
    /// (`old -> new`) are not specially parsed.
    pub path: String,
    /// Index (staged) state character.
    pub index: char,
    /// Worktree (unstaged) state character.
    pub worktree: char,
}

impl StatusEntry {
    /// Parse a single porcelain line: two status characters, a separator,
    /// and the path. Returns `None` for lines shorter than three
    /// characters; such lines carry no classifiable entry.
    pub fn parse(line: &str) -> Option<Self> {
        let mut chars = line.char_indices();
        let (_, index) = chars.next()?;
        let (_, worktree) = chars.next()?;
        let (sep_at, sep) = chars.next()?;
        let path = line[sep_at + sep.len_utf8()..].to_string();
        Some(Self {
            path,
            index,
            worktree,
        })
    }

    /// The two-character status code.
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.index);
        code.push(self.worktree);
        code
    }

    /// Whether this entry denotes an untracked file (`??`).
    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }
}

/// A path with its single-character change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub file: String,
    pub status: char,
}

/// A path with unmerged changes, keyed by its full two-character code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub file: String,
    pub status: String,
}

/// Classified view of the repository state. Constructed fresh per call and
/// never mutated afterwards; it has no persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusReport {
    pub is_clean: bool,
    pub staged: Vec<FileChange>,
    pub unstaged: Vec<FileChange>,
    pub untracked: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

impl StatusReport {
    /// Classify raw porcelain output.
    ///
    /// Blank lines are ignored entirely. Non-blank lines shorter than
    /// three characters, and lines with unrecognized codes, land in no
    /// bucket but still mark the repository dirty: `is_clean` reflects the
    /// non-blank line count, not the bucket sizes.
    pub fn classify(raw: &str) -> Self {
        let mut report = StatusReport::default();
        let mut non_blank = 0usize;

        for line in raw.lines() {
            if line.trim().is_empty() {
                continue;
            }
            non_blank += 1;

            let Some(entry) = StatusEntry::parse(line) else {
                continue;
            };

            let code = entry.code();
            if CONFLICT_CODES.contains(&code.as_str()) {
                report.conflicts.push(Conflict {
                    file: entry.path,
                    status: code,
                });
            } else if CHANGE_STATES.contains(&entry.index) {
                report.staged.push(FileChange {
                    file: entry.path,
                    status: entry.index,
                });
            } else if CHANGE_STATES.contains(&entry.worktree) {
                report.unstaged.push(FileChange {
                    file: entry.path,
                    status: entry.worktree,
                });
            } else if entry.is_untracked() {
                report.untracked.push(entry.path);
            }
            // Anything else (whitespace-only or unrecognized codes) is
            // dropped from every bucket; the line already counted toward
            // dirtiness above.
        }

        report.is_clean = non_blank == 0;
        report
    }

    /// Human-readable bucket counts.
    pub fn summary(&self) -> String {
        format!(
            "Staged: {}, Unstaged: {}, Untracked: {}, Conflicts: {}",
            self.staged.len(),
            self.unstaged.len(),
            self.untracked.len(),
            self.conflicts.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn change(file: &str, status: char) -> FileChange {
        FileChange {
            file: file.to_string(),
            status,
        }
    }

    #[test]
    fn empty_input_is_clean() {
        let report = StatusReport::classify("");
        assert!(report.is_clean);
        assert!(report.staged.is_empty());
        assert!(report.unstaged.is_empty());
        assert!(report.untracked.is_empty());
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn blank_lines_only_is_clean() {
        let report = StatusReport::classify("\n   \n\t\n");
        assert!(report.is_clean);
    }

    #[test]
    fn untracked_file() {
        let report = StatusReport::classify("?? newfile.txt");
        assert_eq!(report.untracked, vec!["newfile.txt".to_string()]);
        assert!(!report.is_clean);
        assert!(report.staged.is_empty());
        assert!(report.unstaged.is_empty());
    }

    #[rstest]
    #[case("UU")]
    #[case("AA")]
    #[case("DD")]
    #[case("DU")]
    #[case("UD")]
    fn conflict_codes_land_in_conflicts_only(#[case] code: &str) {
        let report = StatusReport::classify(&format!("{code} merged.rs"));
        assert_eq!(
            report.conflicts,
            vec![Conflict {
                file: "merged.rs".to_string(),
                status: code.to_string(),
            }]
        );
        assert!(report.staged.is_empty());
        assert!(report.unstaged.is_empty());
        assert!(report.untracked.is_empty());
    }

    #[test]
    fn au_is_not_in_the_conflict_set() {
        // The conflict set is closed. `AU` (added by us, unmerged) has an
        // index state of 'A' and therefore classifies as staged.
        let report = StatusReport::classify("AU theirs.rs");
        assert!(report.conflicts.is_empty());
        assert_eq!(report.staged, vec![change("theirs.rs", 'A')]);
    }

    #[rstest]
    #[case('A')]
    #[case('M')]
    #[case('D')]
    #[case('R')]
    #[case('C')]
    fn index_states_classify_as_staged(#[case] state: char) {
        let report = StatusReport::classify(&format!("{state}  lib.rs"));
        assert_eq!(report.staged, vec![change("lib.rs", state)]);
    }

    #[test]
    fn worktree_only_change_classifies_as_unstaged() {
        let report = StatusReport::classify(" M lib.rs");
        assert_eq!(report.unstaged, vec![change("lib.rs", 'M')]);
        assert!(report.staged.is_empty());
    }

    #[test]
    fn staged_wins_over_unstaged_for_mixed_changes() {
        // `MM` means modified in the index AND in the worktree. The
        // classification is exclusive: the path is reported staged only,
        // and the worktree modification is dropped.
        let report = StatusReport::classify("MM both.rs");
        assert_eq!(report.staged, vec![change("both.rs", 'M')]);
        assert!(report.unstaged.is_empty());
    }

    #[test]
    fn short_line_is_dropped_but_still_dirty() {
        let report = StatusReport::classify("M");
        assert!(!report.is_clean);
        assert!(report.staged.is_empty());
        assert!(report.unstaged.is_empty());
        assert!(report.untracked.is_empty());
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn unrecognized_code_is_dropped_but_still_dirty() {
        let report = StatusReport::classify("!! ignored.log");
        assert!(!report.is_clean);
        assert!(report.staged.is_empty());
        assert!(report.unstaged.is_empty());
        assert!(report.untracked.is_empty());
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn mixed_scenario_preserves_input_order() {
        let raw = "M  foo.py\n M bar.py\nA  baz.py\n?? qux.log\n";
        let report = StatusReport::classify(raw);

        assert_eq!(
            report.staged,
            vec![change("foo.py", 'M'), change("baz.py", 'A')]
        );
        assert_eq!(report.unstaged, vec![change("bar.py", 'M')]);
        assert_eq!(report.untracked, vec!["qux.log".to_string()]);
        assert!(report.conflicts.is_empty());
        assert!(!report.is_clean);
    }

    #[test]
    fn rename_line_keeps_arrow_in_path() {
        // Rename source/destination is not specially parsed.
        let report = StatusReport::classify("R  old.rs -> new.rs");
        assert_eq!(report.staged, vec![change("old.rs -> new.rs", 'R')]);
    }

    #[test]
    fn path_with_spaces_survives() {
        let report = StatusReport::classify("?? dir with spaces/file name.txt");
        assert_eq!(
            report.untracked,
            vec!["dir with spaces/file name.txt".to_string()]
        );
    }

    #[test]
    fn summary_counts_buckets() {
        let raw = "M  a\nM  b\n M c\n?? d\nUU e\n";
        let report = StatusReport::classify(raw);
        assert_eq!(
            report.summary(),
            "Staged: 2, Unstaged: 1, Untracked: 1, Conflicts: 1"
        );
    }

    #[test]
    fn entry_parse_short_lines() {
        assert_eq!(StatusEntry::parse(""), None);
        assert_eq!(StatusEntry::parse("M"), None);
        assert_eq!(StatusEntry::parse("MM"), None);
    }

    #[test]
    fn entry_parse_empty_path() {
        // Exactly three characters: both states plus the separator, with
        // nothing after it.
        let entry = StatusEntry::parse("M  ").unwrap();
        assert_eq!(entry.index, 'M');
        assert_eq!(entry.worktree, ' ');
        assert_eq!(entry.path, "");
    }

    #[test]
    fn serializes_with_file_and_status_keys() {
        let report = StatusReport::classify("M  foo.py\nUU bar.py");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["staged"][0]["file"], "foo.py");
        assert_eq!(value["staged"][0]["status"], "M");
        assert_eq!(value["conflicts"][0]["status"], "UU");
    }
}
