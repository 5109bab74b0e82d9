//! Serializing references back into tag text.

use crate::grammar::{TAG_PREFIX, TAG_SUFFIX};
use crate::kind::EmbedKind;
use crate::reference::{ContentSegment, EmbedReference};

/// Canonical tag text for `reference`.
///
/// Only carousels carry their `extra` payload, and only when it is non-empty;
/// other kinds drop it. The kind token is written as-is, so unknown kinds
/// produce a tag with their literal token.
pub fn build_embed_tag(reference: &EmbedReference) -> String {
    match (&reference.kind, reference.extra.as_deref()) {
        (EmbedKind::Carousel, Some(extra)) if !extra.is_empty() => format!(
            "{TAG_PREFIX}{}:{}:{extra}{TAG_SUFFIX}",
            reference.kind, reference.target_id
        ),
        _ => format!(
            "{TAG_PREFIX}{}:{}{TAG_SUFFIX}",
            reference.kind, reference.target_id
        ),
    }
}

/// Reassemble a document from its segments.
///
/// Inverse of [`crate::parse::parse_embeds`] for documents whose tags are in
/// canonical form (no leading zeros, no extra on non-carousel kinds).
pub fn join_segments(segments: &[ContentSegment]) -> String {
    let mut document = String::new();
    for segment in segments {
        match segment {
            ContentSegment::Text { content } => document.push_str(content),
            ContentSegment::Embed { reference } => document.push_str(&build_embed_tag(reference)),
        }
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_embeds;

    #[test]
    fn builds_simple_tag() {
        let tag = build_embed_tag(&EmbedReference::new(EmbedKind::Gallery, 5));
        assert_eq!(tag, "<!--vps:embed:gallery:5-->");
    }

    #[test]
    fn builds_carousel_with_extra() {
        let r = EmbedReference::with_extra(EmbedKind::Carousel, 7, "true:false:600");
        assert_eq!(
            build_embed_tag(&r),
            "<!--vps:embed:carousel:7:true:false:600-->"
        );
    }

    #[test]
    fn carousel_with_empty_extra_has_no_suffix() {
        let r = EmbedReference::with_extra(EmbedKind::Carousel, 7, "");
        assert_eq!(build_embed_tag(&r), "<!--vps:embed:carousel:7-->");
    }

    #[test]
    fn non_carousel_extra_is_dropped() {
        let r = EmbedReference::with_extra(EmbedKind::Image, 3, "ignored");
        assert_eq!(build_embed_tag(&r), "<!--vps:embed:image:3-->");
    }

    #[test]
    fn unknown_kind_uses_literal_token() {
        let r = EmbedReference::new(EmbedKind::Unknown("video".to_string()), 12);
        assert_eq!(build_embed_tag(&r), "<!--vps:embed:video:12-->");
    }

    #[test]
    fn join_reverses_parse() {
        let doc = "<h1>T</h1><!--vps:embed:hero:1-->\n<p>a</p><!--vps:embed:carousel:2:true:true:300--><!--vps:embed:video:3-->";
        assert_eq!(join_segments(&parse_embeds(doc)), doc);
    }

    #[test]
    fn join_of_empty_document() {
        assert_eq!(join_segments(&parse_embeds("")), "");
    }
}
