//! Splitting page bodies into text and embed segments.
//!
//! The parser is permissive: it never fails. Anything that is not a
//! well-formed tag, including tag-like text with a missing id or a wrong
//! prefix, is left in the surrounding text segment. Editorial content must
//! always stay renderable, so "does not match" is the only error channel.

use crate::grammar::scan_tags;
use crate::kind::EmbedKind;
use crate::reference::{ContentSegment, EmbedReference};
use std::collections::BTreeMap;

/// Decompose `document` into ordered segments.
///
/// Text between tags is emitted verbatim and only when non-empty. A document
/// without any tag, including the empty document, yields exactly one text
/// segment.
///
/// A digit run too large for a `u64` makes that tag fail to match; it stays
/// part of the surrounding text.
pub fn parse_embeds(document: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for tag in scan_tags(document) {
        let Ok(target_id) = tag.id.parse::<u64>() else {
            continue;
        };
        if tag.start > last {
            segments.push(ContentSegment::text(&document[last..tag.start]));
        }
        segments.push(ContentSegment::embed(EmbedReference {
            kind: EmbedKind::from(tag.kind),
            target_id,
            extra: tag.extra.map(str::to_string),
        }));
        last = tag.end;
    }

    if segments.is_empty() {
        return vec![ContentSegment::text(document)];
    }
    if last < document.len() {
        segments.push(ContentSegment::text(&document[last..]));
    }

    segments
}

/// The embed references of `document`, in document order.
pub fn collect_references(document: &str) -> Vec<EmbedReference> {
    parse_embeds(document)
        .into_iter()
        .filter_map(|segment| match segment {
            ContentSegment::Embed { reference } => Some(reference),
            ContentSegment::Text { .. } => None,
        })
        .collect()
}

/// Count references per kind token.
pub fn summarize(references: &[EmbedReference]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for reference in references {
        *counts.entry(reference.kind.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}
