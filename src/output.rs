//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! ## Parse
//!
//! ```text
//! 001 text <p>Before</p> (13 bytes)
//! 002 Image #3
//!     Tag: <!--vps:embed:image:3-->
//! 003 text <p>After</p> (12 bytes)
//! ```
//!
//! ## Check
//!
//! ```text
//! pages/home.html (2 embeds)
//!     gallery: 1, video: 1
//!     Line 3: unknown kind "video" (id 12)
//!     Line 7: malformed marker <!--vps:embed:image:-->
//!
//! Checked 1 file: 2 embeds, 1 problem
//! ```

use crate::build::build_embed_tag;
use crate::check::{CheckReport, FileReport, Problem};
use crate::config::LabelStyle;
use crate::parse::summarize;
use crate::placeholder::placeholder_label;
use crate::reference::{ContentSegment, EmbedReference};

const PREVIEW_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `n thing` / `n things`.
fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Collapse whitespace runs and truncate to `max` characters, appending `...`.
fn preview(text: &str, max: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn reference_label(reference: &EmbedReference) -> String {
    placeholder_label(
        reference.kind.as_str(),
        &reference.target_id.to_string(),
        reference.extra.as_deref().unwrap_or_default(),
        LabelStyle::Full,
    )
}

// ============================================================================
// Parse output
// ============================================================================

pub fn format_segments(segments: &[ContentSegment]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            ContentSegment::Text { content } => lines.push(format!(
                "{} text {} ({})",
                format_index(i + 1),
                preview(content, PREVIEW_CHARS),
                plural(content.len(), "byte")
            )),
            ContentSegment::Embed { reference } => {
                lines.push(format!("{} {}", format_index(i + 1), reference_label(reference)));
                lines.push(format!("{}Tag: {}", indent(1), build_embed_tag(reference)));
            }
        }
    }
    lines
}

pub fn print_segments(segments: &[ContentSegment]) {
    for line in format_segments(segments) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

fn format_problem(problem: &Problem) -> String {
    match problem {
        Problem::UnknownKind { line, kind, id } => {
            format!("Line {line}: unknown kind \"{kind}\" (id {id})")
        }
        Problem::IdOutOfRange { line, kind, id } => {
            format!("Line {line}: {kind} id {id} is out of range")
        }
        Problem::Malformed(marker) => {
            format!("Line {}: malformed marker {}", marker.line, marker.snippet)
        }
    }
}

fn format_file_report(file: &FileReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({})",
        file.path.display(),
        plural(file.references.len(), "embed")
    )];

    let counts = summarize(&file.references);
    if !counts.is_empty() {
        let summary: Vec<String> = counts
            .iter()
            .map(|(kind, n)| format!("{kind}: {n}"))
            .collect();
        lines.push(format!("{}{}", indent(1), summary.join(", ")));
    }
    for problem in &file.problems {
        lines.push(format!("{}{}", indent(1), format_problem(problem)));
    }
    lines
}

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    for file in &report.files {
        lines.extend(format_file_report(file));
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {}, {}",
        plural(report.files.len(), "file"),
        plural(report.reference_count(), "embed"),
        plural(report.problem_count(), "problem")
    ));
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}
