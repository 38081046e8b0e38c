//! Segment builders and line assembly.
//!
//! Every builder is a pure function from extracted fields to a display
//! string; an empty string means the segment is omitted. The assembler
//! joins whatever is left with one muted separator.

use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;

use crate::git::GitState;
use crate::input::SessionInput;
use crate::platform::Icons;

// Tokyo Night Colors (bright)
pub const RESET: &str = "\x1b[0m";
pub const ITALIC: &str = "\x1b[3m";
pub const TN_CYAN: &str = "\x1b[38;2;125;207;255m";
pub const TN_PURPLE: &str = "\x1b[38;2;187;154;247m";
pub const TN_GREEN: &str = "\x1b[38;2;158;206;106m";
pub const TN_ORANGE: &str = "\x1b[38;2;255;158;100m";
pub const TN_TEAL: &str = "\x1b[38;2;42;195;222m";
pub const TN_GRAY: &str = "\x1b[38;2;120;140;180m";
pub const TN_RED: &str = "\x1b[38;2;247;118;142m";

pub const SEP: &str = "\x1b[38;2;86;95;137m | \x1b[0m";

pub const BAR_WIDTH: u64 = 15;
const BAR_FILLED: &str = "\u{2588}"; // █
const BAR_EMPTY: &str = "\u{2591}"; // ░

/// Context consumption as a truncated integer percentage. Exceeding the
/// window yields values past 100; only the bar clamps, not this number.
pub fn context_percent(usage: u64, window: i64) -> u64 {
    if usage == 0 || window <= 0 {
        return 0;
    }
    #[allow(clippy::cast_sign_loss)] // window > 0 checked above
    let window = window as u64;
    usage.saturating_mul(100) / window
}

/// Fixed-width bar: filled cells truncate from `width * percent / 100`
/// and clamp at the cell budget.
pub fn render_bar(percent: u64) -> String {
    let filled = (BAR_WIDTH * percent / 100).min(BAR_WIDTH) as usize;
    let empty = BAR_WIDTH as usize - filled;
    let mut bar = String::with_capacity(BAR_WIDTH as usize * 3);
    for _ in 0..filled {
        bar.push_str(BAR_FILLED);
    }
    for _ in 0..empty {
        bar.push_str(BAR_EMPTY);
    }
    bar
}

/// Strip embedded line breaks so upstream data can never split the
/// single-line output.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
    } else {
        Cow::Borrowed(s)
    }
}

pub fn model_segment(icons: &Icons, name: &str) -> String {
    format!("{} {TN_ORANGE}{}{RESET}", icons.model, sanitize(name))
}

pub fn context_segment(icons: &Icons, usage: u64, window: i64) -> String {
    let percent = context_percent(usage, window);
    format!("{} {TN_TEAL}{} {percent}%{RESET}", icons.context, render_bar(percent))
}

pub fn directory_segment(icons: &Icons, dir: &str) -> String {
    let basename = Path::new(dir)
        .file_name()
        .map_or_else(|| Cow::Borrowed(dir), |n| n.to_string_lossy());
    format!("{} {TN_CYAN}{}{RESET}", icons.directory, sanitize(&basename))
}

/// Parenthesized git summary, or the bare not-a-repo marker.
pub fn git_fragment(icons: &Icons, state: &GitState) -> String {
    match state {
        GitState::NotRepository => format!("{ITALIC}{TN_GRAY}no git{RESET}"),
        GitState::Clean { branch, ahead, behind } => {
            let mut s = format!("{} ({TN_PURPLE}{}{RESET}", icons.branch, sanitize(branch));
            push_tracking(&mut s, *ahead, *behind);
            s.push(')');
            s
        }
        GitState::Dirty { branch, files, added, removed, ahead, behind } => {
            let mut s = format!("{} ({TN_PURPLE}{}{RESET}", icons.branch, sanitize(branch));
            let _ = write!(s, "{SEP}{TN_GRAY}{files} files{RESET}");
            if *added > 0 {
                let _ = write!(s, " {TN_GREEN}+{added}{RESET}");
            }
            if *removed > 0 {
                let _ = write!(s, " {TN_RED}-{removed}{RESET}");
            }
            push_tracking(&mut s, *ahead, *behind);
            s.push(')');
            s
        }
    }
}

/// Ahead/behind sub-fragments, ahead first, each only when nonzero.
fn push_tracking(s: &mut String, ahead: u32, behind: u32) {
    if ahead > 0 {
        let _ = write!(s, "{SEP}{TN_GREEN}\u{2191}{ahead}{RESET}");
    }
    if behind > 0 {
        let _ = write!(s, "{SEP}{TN_RED}\u{2193}{behind}{RESET}");
    }
}

/// Omitted entirely when the cost is zero, absent, or null.
pub fn cost_segment(icons: &Icons, cost: f64) -> String {
    if cost == 0.0 {
        return String::new();
    }
    format!("{} {TN_GREEN}${cost:.2}{RESET}", icons.cost)
}

/// Omitted only when both counts are zero; +5/-0 renders both halves.
pub fn lines_segment(icons: &Icons, added: u64, removed: u64) -> String {
    if added == 0 && removed == 0 {
        return String::new();
    }
    format!("{} {TN_GREEN}+{added}{RESET}/{TN_RED}-{removed}{RESET}", icons.diff)
}

/// Join non-empty segments; an omitted segment leaves no separator pair
/// behind.
pub fn assemble(segments: &[String]) -> String {
    let mut line = String::with_capacity(256);
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        if !line.is_empty() {
            line.push_str(SEP);
        }
        line.push_str(segment);
    }
    line
}

/// Build the whole status line from extracted fields and git state.
pub fn status_line(icons: &Icons, input: &SessionInput, current_dir: &str, git: &GitState) -> String {
    let directory_and_git = format!(
        "{} {}",
        directory_segment(icons, current_dir),
        git_fragment(icons, git)
    );
    let segments = [
        model_segment(icons, input.model_name()),
        context_segment(icons, input.current_usage(), input.window_size()),
        directory_and_git,
        cost_segment(icons, input.cost_usd()),
        lines_segment(icons, input.lines_added(), input.lines_removed()),
    ];
    assemble(&segments)
}
