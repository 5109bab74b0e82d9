//! The embed tag grammar.
//!
//! An embed tag is a single HTML comment:
//!
//! ```text
//! <!--vps:embed:<kind>:<digits>[:<extra>]-->
//! ```
//!
//! - `kind`: one or more lowercase ASCII letters
//! - `digits`: one or more ASCII digits, leading zeros allowed
//! - `extra`: optional, everything up to `-->`; may not contain `-`
//!
//! The `-` exclusion in `extra` keeps the terminator unambiguous. It also means
//! an `extra` payload can never carry a hyphen; tags that try simply do not
//! match and stay ordinary text.
//!
//! Matching is done with one compiled [`Regex`] shared by the whole process.
//! `regex::Regex` holds no match cursor, so every call scans with its own
//! iterator and concurrent callers never interfere.

use regex::Regex;
use std::sync::LazyLock;

pub const TAG_PREFIX: &str = "<!--vps:embed:";
pub const TAG_SUFFIX: &str = "-->";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--vps:embed:([a-z]+):([0-9]+)(?::([^-]*))?-->").expect("embed tag pattern")
});

/// One tag occurrence, borrowing its parts from the scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub kind: &'a str,
    /// The digit run exactly as written.
    pub id: &'a str,
    /// `None` when the tag has no `:extra` part; `Some("")` for a bare trailing `:`.
    pub extra: Option<&'a str>,
}

/// Scan `document` left to right for non-overlapping tags.
pub fn scan_tags(document: &str) -> impl Iterator<Item = TagMatch<'_>> {
    TAG_RE.captures_iter(document).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(TagMatch {
            start: whole.start(),
            end: whole.end(),
            kind: caps.get(1)?.as_str(),
            id: caps.get(2)?.as_str(),
            extra: caps.get(3).map(|m| m.as_str()),
        })
    })
}

/// Whether the whole of `text` is exactly one tag.
pub fn is_tag(text: &str) -> bool {
    scan_tags(text)
        .next()
        .is_some_and(|m| m.start == 0 && m.end == text.len())
}

/// An occurrence of the tag prefix that does not start a well-formed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedMarker {
    /// Byte offset of the prefix in the document.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// The start of the marker text, cut at the first line break.
    pub snippet: String,
}

const SNIPPET_CHARS: usize = 48;

/// Locate `<!--vps:embed:` prefixes that the grammar rejected.
///
/// These render as invisible comments and are otherwise silently ignored, so
/// the content audit surfaces them to editors.
pub fn find_malformed(document: &str) -> Vec<MalformedMarker> {
    let mut tags = scan_tags(document).peekable();
    let mut markers = Vec::new();

    for (offset, _) in document.match_indices(TAG_PREFIX) {
        while tags.peek().is_some_and(|t| t.start < offset) {
            tags.next();
        }
        if tags.peek().is_some_and(|t| t.start == offset) {
            continue;
        }
        let rest = &document[offset..];
        let snippet: String = rest
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(SNIPPET_CHARS)
            .collect();
        markers.push(MalformedMarker {
            offset,
            line: document[..offset].matches('\n').count() + 1,
            snippet,
        });
    }

    markers
}
