//! Editor placeholders for embed tags.
//!
//! HTML comments are invisible on a contenteditable surface and a user typing
//! around one can corrupt it. While a page body is open in the editor, each
//! tag is swapped for an atomic, visible element carrying the same data:
//!
//! ```html
//! <span class="vps-embed-placeholder" contenteditable="false"
//!       data-embed-kind="carousel" data-embed-id="7"
//!       data-embed-extra="true:false:600">Carousel #7 (autoplay on, dots off, 600 ms)</span>
//! ```
//!
//! The id attribute keeps the digit run exactly as written and the extra
//! attribute keeps the raw payload, so converting back reproduces the
//! original tag byte for byte. The label text is for the editor only and is
//! discarded on the way back.
//!
//! Converting tags to placeholders twice is harmless: the forward direction
//! only matches comment tags, never placeholder markup.

use crate::carousel::parse_carousel_params;
use crate::config::{LabelStyle, PlaceholderConfig};
use crate::grammar::{TAG_PREFIX, TAG_SUFFIX, TagMatch, is_tag, scan_tags};
use crate::kind::EmbedKind;
use maud::html;
use regex::Regex;
use std::sync::LazyLock;

pub const PLACEHOLDER_CLASS: &str = "vps-embed-placeholder";
pub const KIND_ATTR: &str = "data-embed-kind";
pub const ID_ATTR: &str = "data-embed-id";
pub const EXTRA_ATTR: &str = "data-embed-extra";

const CLOSE_SPAN: &str = "</span>";

static OPEN_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<span\b([^<>]*)>").expect("span pattern"));

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern")
});

/// Replace every embed tag with a placeholder element, using full labels.
pub fn convert_tags_to_placeholders(document: &str) -> String {
    convert_tags_to_placeholders_with(document, &PlaceholderConfig::default())
}

/// Replace every embed tag with a placeholder element.
pub fn convert_tags_to_placeholders_with(document: &str, config: &PlaceholderConfig) -> String {
    let mut out = String::with_capacity(document.len());
    let mut last = 0;

    for tag in scan_tags(document) {
        out.push_str(&document[last..tag.start]);
        out.push_str(&render_placeholder(&tag, config.label));
        last = tag.end;
    }
    out.push_str(&document[last..]);

    out
}

fn render_placeholder(tag: &TagMatch<'_>, style: LabelStyle) -> String {
    let extra = tag.extra.unwrap_or_default();
    let label = placeholder_label(tag.kind, tag.id, extra, style);
    html! {
        span class=(PLACEHOLDER_CLASS) contenteditable="false"
            data-embed-kind=(tag.kind) data-embed-id=(tag.id) data-embed-extra=(extra) {
            (label)
        }
    }
    .into_string()
}

/// Visible text inside a placeholder.
///
/// ```text
/// full:    Gallery #5
///          Carousel #7 (autoplay on, dots off, 600 ms)
///          Embed video #12
/// compact: gallery:5
/// ```
pub fn placeholder_label(kind: &str, id: &str, extra: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Compact => format!("{kind}:{id}"),
        LabelStyle::Full => {
            let parsed = EmbedKind::from(kind);
            match parsed {
                EmbedKind::Carousel => {
                    let p = parse_carousel_params(extra);
                    format!(
                        "{} #{id} (autoplay {}, dots {}, {} ms)",
                        parsed.label(),
                        on_off(p.autoplay),
                        on_off(p.dot_duration),
                        p.speed
                    )
                }
                EmbedKind::Unknown(_) => format!("{} {kind} #{id}", parsed.label()),
                _ => format!("{} #{id}", parsed.label()),
            }
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Replace every placeholder element with its canonical embed tag.
///
/// A placeholder is a `<span>` whose class list contains
/// [`PLACEHOLDER_CLASS`] and that carries kind and id attributes. Attribute
/// order and quoting style do not matter; a missing extra attribute counts as
/// empty. A placeholder whose attributes no longer form a valid tag (after a
/// hand edit, say) is left untouched.
pub fn convert_placeholders_to_tags(document: &str) -> String {
    let mut out = String::with_capacity(document.len());
    let mut last = 0;

    for caps in OPEN_SPAN_RE.captures_iter(document) {
        let Some(open) = caps.get(0) else { continue };
        if open.start() < last {
            continue;
        }
        let Some(tag) = caps.get(1).and_then(|attrs| placeholder_tag(attrs.as_str())) else {
            continue;
        };
        let Some(close) = document[open.end()..].find(CLOSE_SPAN) else {
            continue;
        };
        out.push_str(&document[last..open.start()]);
        out.push_str(&tag);
        last = open.end() + close + CLOSE_SPAN.len();
    }
    out.push_str(&document[last..]);

    out
}

/// The tag encoded by a placeholder's attribute list, if it is one.
fn placeholder_tag(attrs: &str) -> Option<String> {
    let mut is_placeholder = false;
    let mut kind = None;
    let mut id = None;
    let mut extra = None;

    for caps in ATTR_RE.captures_iter(attrs) {
        let name = caps.get(1)?.as_str().to_ascii_lowercase();
        let raw = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        let value = html_escape::decode_html_entities(raw);
        match name.as_str() {
            "class" => {
                is_placeholder = value.split_ascii_whitespace().any(|c| c == PLACEHOLDER_CLASS);
            }
            KIND_ATTR => kind = Some(value.into_owned()),
            ID_ATTR => id = Some(value.into_owned()),
            EXTRA_ATTR => extra = Some(value.into_owned()),
            _ => {}
        }
    }

    if !is_placeholder {
        return None;
    }
    let (kind, id) = (kind?, id?);
    let tag = match extra.as_deref() {
        Some(extra) if !extra.is_empty() => format!("{TAG_PREFIX}{kind}:{id}:{extra}{TAG_SUFFIX}"),
        _ => format!("{TAG_PREFIX}{kind}:{id}{TAG_SUFFIX}"),
    };
    is_tag(&tag).then_some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallery_placeholder_carries_kind_and_id() {
        let html = convert_tags_to_placeholders("<!--vps:embed:gallery:5-->");
        assert!(html.contains(r#"class="vps-embed-placeholder""#));
        assert!(html.contains(r#"contenteditable="false""#));
        assert!(html.contains(r#"data-embed-kind="gallery""#));
        assert!(html.contains(r#"data-embed-id="5""#));
        assert!(html.contains(r#"data-embed-extra="""#));
        assert!(html.contains(">Gallery #5</span>"));
        assert!(!html.contains("<!--"));
    }

    #[test]
    fn carousel_round_trip() {
        let tag = "<!--vps:embed:carousel:7:true:false:600-->";
        let html = convert_tags_to_placeholders(tag);
        assert!(html.contains(r#"data-embed-extra="true:false:600""#));
        assert!(html.contains("Carousel #7 (autoplay on, dots off, 600 ms)"));
        assert_eq!(convert_placeholders_to_tags(&html), tag);
    }

    #[test]
    fn text_outside_tags_is_untouched() {
        let doc = "<p>a &amp; b</p>\n<!--vps:embed:image:3-->\n<p>c</p>";
        let html = convert_tags_to_placeholders(doc);
        assert!(html.starts_with("<p>a &amp; b</p>\n<span"));
        assert!(html.ends_with("</span>\n<p>c</p>"));
        assert_eq!(convert_placeholders_to_tags(&html), doc);
    }

    #[test]
    fn leading_zero_id_is_kept_verbatim() {
        let doc = "<!--vps:embed:image:007-->";
        let html = convert_tags_to_placeholders(doc);
        assert!(html.contains(r#"data-embed-id="007""#));
        assert_eq!(convert_placeholders_to_tags(&html), doc);
    }

    #[test]
    fn empty_extra_is_dropped_on_the_way_back() {
        let html = convert_tags_to_placeholders("<!--vps:embed:carousel:7:-->");
        assert_eq!(
            convert_placeholders_to_tags(&html),
            "<!--vps:embed:carousel:7-->"
        );
    }

    #[test]
    fn extra_with_markup_characters_round_trips() {
        let doc = r#"<!--vps:embed:carousel:1:a"b<c>&amp;'d-->"#;
        let html = convert_tags_to_placeholders(doc);
        assert!(!html.contains(r#"a"b"#));
        assert_eq!(convert_placeholders_to_tags(&html), doc);
    }

    #[test]
    fn unknown_kind_round_trips() {
        let doc = "<p>x</p><!--vps:embed:video:12--><p>y</p>";
        let html = convert_tags_to_placeholders(doc);
        assert!(html.contains("Embed video #12"));
        assert_eq!(convert_placeholders_to_tags(&html), doc);
    }

    #[test]
    fn forward_transform_does_not_double_wrap() {
        let once = convert_tags_to_placeholders("<!--vps:embed:hero:2-->");
        let twice = convert_tags_to_placeholders(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn compact_labels() {
        let config = PlaceholderConfig {
            label: LabelStyle::Compact,
        };
        let html = convert_tags_to_placeholders_with("<!--vps:embed:carousel:7:true:true:1-->", &config);
        assert!(html.contains(">carousel:7</span>"));
        assert_eq!(
            convert_placeholders_to_tags(&html),
            "<!--vps:embed:carousel:7:true:true:1-->"
        );
    }

    #[test]
    fn recognizes_reordered_attributes_and_single_quotes() {
        let html = r#"<p><span data-embed-id='9' data-embed-kind="collapse" contenteditable="false" class="x vps-embed-placeholder selected">anything</span></p>"#;
        assert_eq!(
            convert_placeholders_to_tags(html),
            "<p><!--vps:embed:collapse:9--></p>"
        );
    }

    #[test]
    fn missing_extra_attribute_counts_as_empty() {
        let html = r#"<span class="vps-embed-placeholder" data-embed-kind="image" data-embed-id="4">Image #4</span>"#;
        assert_eq!(convert_placeholders_to_tags(html), "<!--vps:embed:image:4-->");
    }

    #[test]
    fn ordinary_spans_are_untouched() {
        let html = r#"<span class="note">n</span><span data-embed-kind="image" data-embed-id="4">x</span>"#;
        assert_eq!(convert_placeholders_to_tags(html), html);
    }

    #[test]
    fn placeholder_nested_in_ordinary_span() {
        let inner = convert_tags_to_placeholders("<!--vps:embed:gallery:5-->");
        let html = format!(r#"<span class="wrap">before {inner} after</span>"#);
        assert_eq!(
            convert_placeholders_to_tags(&html),
            r#"<span class="wrap">before <!--vps:embed:gallery:5--> after</span>"#
        );
    }

    #[test]
    fn corrupted_placeholder_is_left_alone() {
        let html = r#"<span class="vps-embed-placeholder" data-embed-kind="Gallery" data-embed-id="5">x</span>"#;
        assert_eq!(convert_placeholders_to_tags(html), html);
        let html = r#"<span class="vps-embed-placeholder" data-embed-kind="gallery" data-embed-id="five">x</span>"#;
        assert_eq!(convert_placeholders_to_tags(html), html);
    }

    #[test]
    fn unterminated_span_opener_before_placeholder() {
        let doc = r#"<p>x <span data-x="1" <!--vps:embed:image:3--></p>"#;
        let html = convert_tags_to_placeholders(doc);
        assert!(html.starts_with(r#"<p>x <span data-x="1" <span class="vps-embed-placeholder""#));
        assert_eq!(convert_placeholders_to_tags(&html), doc);
    }

    #[test]
    fn unclosed_placeholder_is_left_alone() {
        let html = r#"<span class="vps-embed-placeholder" data-embed-kind="gallery" data-embed-id="5">"#;
        assert_eq!(convert_placeholders_to_tags(html), html);
    }

    #[test]
    fn labels() {
        assert_eq!(placeholder_label("hero", "3", "", LabelStyle::Full), "Hero #3");
        assert_eq!(
            placeholder_label("carousel", "1", "", LabelStyle::Full),
            "Carousel #1 (autoplay off, dots off, 500 ms)"
        );
        assert_eq!(placeholder_label("hero", "3", "", LabelStyle::Compact), "hero:3");
    }
}
