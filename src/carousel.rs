//! Carousel parameters.
//!
//! Carousel tags carry a colon-delimited payload after the target id:
//!
//! ```text
//! <!--vps:embed:carousel:7:true:false:600-->
//!                          ^^^^ ^^^^^ ^^^
//!                          |    |     speed (ms)
//!                          |    dot_duration
//!                          autoplay
//! ```
//!
//! Decoding is total: missing or unrecognized fields fall back to defaults.

use crate::build::build_embed_tag;
use crate::kind::EmbedKind;
use crate::reference::EmbedReference;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPEED_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselParameters {
    pub autoplay: bool,
    /// Whether `speed` overrides the slideshow's autoplay speed. A flag, not a
    /// duration, despite the name.
    pub dot_duration: bool,
    /// Milliseconds. Unsigned because a `-` cannot appear in a tag payload.
    pub speed: u64,
}

impl Default for CarouselParameters {
    fn default() -> Self {
        Self {
            autoplay: false,
            dot_duration: false,
            speed: DEFAULT_SPEED_MS,
        }
    }
}

impl CarouselParameters {
    /// The `extra` payload encoding these parameters.
    pub fn to_extra(&self) -> String {
        format!("{}:{}:{}", self.autoplay, self.dot_duration, self.speed)
    }
}

/// Decode a carousel `extra` payload.
///
/// Only the literal `true` sets a flag. `speed` falls back to 500 when absent,
/// empty, negative or not a base-10 integer.
pub fn parse_carousel_params(extra: &str) -> CarouselParameters {
    let mut fields = extra.split(':');
    let autoplay = fields.next() == Some("true");
    let dot_duration = fields.next() == Some("true");
    let speed = fields
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SPEED_MS);

    CarouselParameters {
        autoplay,
        dot_duration,
        speed,
    }
}

/// Canonical carousel tag for `target_id` with `params`.
pub fn build_carousel_tag(target_id: u64, params: &CarouselParameters) -> String {
    build_embed_tag(&EmbedReference::with_extra(
        EmbedKind::Carousel,
        target_id,
        params.to_extra(),
    ))
}

impl EmbedReference {
    /// Decoded carousel parameters, or `None` for other kinds.
    ///
    /// A carousel without an `extra` payload gets the defaults.
    pub fn carousel_params(&self) -> Option<CarouselParameters> {
        match self.kind {
            EmbedKind::Carousel => Some(parse_carousel_params(
                self.extra.as_deref().unwrap_or_default(),
            )),
            _ => None,
        }
    }
}
