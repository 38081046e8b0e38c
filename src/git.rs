//! Git working-tree summarization.
//!
//! At most three external lookups per run: a repository discovery probe,
//! one combined porcelain status query, and (only when the tree is dirty)
//! one numstat diff. Any failure along the way degrades to
//! `NotRepository`; nothing in this module can abort a render.

use std::process::{Command, Stdio};

/// Branch sentinel when no symbolic ref is checked out.
pub const DETACHED: &str = "detached HEAD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitState {
    NotRepository,
    Clean {
        branch: String,
        ahead: u32,
        behind: u32,
    },
    Dirty {
        branch: String,
        files: u32,
        added: u32,
        removed: u32,
        ahead: u32,
        behind: u32,
    },
}

/// Branch metadata plus pending-file count from one porcelain v2 query.
#[derive(Debug, PartialEq, Eq)]
pub struct StatusSummary {
    pub branch: String,
    pub ahead: u32,
    pub behind: u32,
    pub files: u32,
}

impl Default for StatusSummary {
    fn default() -> Self {
        Self {
            branch: DETACHED.to_string(),
            ahead: 0,
            behind: 0,
            files: 0,
        }
    }
}

/// Determine the git state of `dir`.
pub fn inspect(dir: &str) -> GitState {
    let Ok(repo) = gix::discover(dir) else {
        return GitState::NotRepository;
    };
    // Bare repositories have nothing to summarize.
    if repo.work_dir().is_none() {
        return GitState::NotRepository;
    }

    let Some(status) = run_git(dir, &["status", "--porcelain=v2", "--branch"]) else {
        // Covers a missing git binary, a corrupt repository, and
        // pre-porcelain-v2 versions of git alike.
        return GitState::NotRepository;
    };
    let summary = parse_status(&status);

    if summary.files == 0 {
        return GitState::Clean {
            branch: summary.branch,
            ahead: summary.ahead,
            behind: summary.behind,
        };
    }

    let (added, removed) = run_git(dir, &["diff", "--numstat", "HEAD"])
        .map(|out| parse_numstat(&out))
        .unwrap_or((0, 0));

    GitState::Dirty {
        branch: summary.branch,
        files: summary.files,
        added,
        removed,
        ahead: summary.ahead,
        behind: summary.behind,
    }
}

/// Run one git query; None on spawn failure or nonzero exit. `output()`
/// reaps the child before returning.
fn run_git(dir: &str, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git status --porcelain=v2 --branch` output: `# branch.*` header
/// lines carry branch and ahead/behind, every other non-empty line is one
/// changed or untracked file.
pub fn parse_status(output: &str) -> StatusSummary {
    let mut summary = StatusSummary::default();
    for line in output.lines() {
        if let Some(meta) = line.strip_prefix("# ") {
            if let Some(head) = meta.strip_prefix("branch.head ") {
                if head != "(detached)" {
                    summary.branch = head.to_string();
                }
            } else if let Some(ab) = meta.strip_prefix("branch.ab ") {
                let mut parts = ab.split_whitespace();
                summary.ahead = parts
                    .next()
                    .and_then(|n| n.strip_prefix('+'))
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(0);
                summary.behind = parts
                    .next()
                    .and_then(|n| n.strip_prefix('-'))
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(0);
            }
        } else if !line.is_empty() {
            summary.files += 1;
        }
    }
    summary
}

/// Sum added/removed line counts from `git diff --numstat` output.
/// Binary files report `-` in both columns and contribute 0/0.
pub fn parse_numstat(output: &str) -> (u32, u32) {
    let mut added = 0u32;
    let mut removed = 0u32;
    for line in output.lines() {
        let mut cols = line.split('\t');
        let file_added = cols.next().and_then(|n| n.parse::<u32>().ok()).unwrap_or(0);
        let file_removed = cols.next().and_then(|n| n.parse::<u32>().ok()).unwrap_or(0);
        added = added.saturating_add(file_added);
        removed = removed.saturating_add(file_removed);
    }
    (added, removed)
}
