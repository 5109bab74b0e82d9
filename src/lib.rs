//! # vps-embed
//!
//! Embed tags for CMS page bodies. Editors reference galleries, images, hero
//! banners, collapsible child-page lists and carousels inline with the page
//! HTML using a small comment-based tag:
//!
//! ```text
//! <p>Our latest trip:</p>
//! <!--vps:embed:carousel:7:true:false:600-->
//! <p>More below.</p>
//! ```
//!
//! This crate parses those tags, builds them, decodes carousel parameters,
//! and converts tags to editor placeholders and back.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`grammar`] | The tag pattern, raw tag scanning, malformed-marker detection |
//! | [`kind`] | `EmbedKind`: the five rendered kinds plus an unknown fallback |
//! | [`reference`] | `EmbedReference` and `ContentSegment` values handed to renderers |
//! | [`parse`] | `parse_embeds`: split a page body into text and embed segments |
//! | [`build`] | `build_embed_tag`: serialize a reference back to tag text |
//! | [`carousel`] | Carousel parameter payload codec |
//! | [`placeholder`] | Tag ⇄ editor placeholder transform |
//! | [`check`] | Audit a directory of page bodies for unknown kinds and malformed tags |
//! | [`config`] | `vps-embed.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Every Engine Function Is Total
//!
//! Parsing, building, carousel decoding and the placeholder transform never
//! return errors. Text that does not match the grammar is ordinary content.
//! A typo in an embed tag must never make a page unrenderable or crash the
//! editor, so "does not match" is the only failure mode. The [`check`]
//! command exists to surface those silent misses.
//!
//! ## Storage Form vs. Editing Form
//!
//! Tags are the storage and interchange format. Placeholders exist only while
//! a body is open in the editor. The round trip
//!
//! ```text
//! convert_placeholders_to_tags(convert_tags_to_placeholders(d)) == d
//! ```
//!
//! holds for every document, so opening and saving a page without touching
//! an embed never changes its stored bytes.
//!
//! ## Unknown Kinds Survive
//!
//! Any lowercase token is a valid kind at the grammar level. Kinds without a
//! renderer are kept as [`kind::EmbedKind::Unknown`] and pass through parse,
//! build and the placeholder transform unchanged, so content written for a
//! newer renderer is not destroyed by an older editor.

pub mod build;
pub mod carousel;
pub mod check;
pub mod config;
pub mod grammar;
pub mod kind;
pub mod output;
pub mod parse;
pub mod placeholder;
pub mod reference;

pub use build::{build_embed_tag, join_segments};
pub use carousel::{CarouselParameters, build_carousel_tag, parse_carousel_params};
pub use kind::EmbedKind;
pub use parse::{collect_references, parse_embeds};
pub use placeholder::{convert_placeholders_to_tags, convert_tags_to_placeholders};
pub use reference::{ContentSegment, EmbedReference};
