//! Embed kinds.
//!
//! The tag grammar accepts any run of lowercase ASCII letters as a kind token,
//! but only five kinds are dispatched to a renderer:
//!
//! | Token | Target id refers to |
//! |-------|---------------------|
//! | `gallery` | a gallery |
//! | `image` | a file |
//! | `hero` | a file shown as a banner |
//! | `collapse` | a page whose children are listed in a collapsible panel |
//! | `carousel` | a gallery shown as a slideshow (carries parameters) |
//!
//! Anything else becomes [`EmbedKind::Unknown`], which keeps the literal token
//! so a tag referencing a kind this build does not know about still survives
//! parse → build and the placeholder round trip unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    Gallery,
    Image,
    Hero,
    Collapse,
    Carousel,
    /// A token the grammar matched but no renderer handles.
    Unknown(String),
}

impl EmbedKind {
    /// All dispatched kinds, in display order.
    pub const KNOWN: [EmbedKind; 5] = [
        EmbedKind::Gallery,
        EmbedKind::Image,
        EmbedKind::Hero,
        EmbedKind::Collapse,
        EmbedKind::Carousel,
    ];

    /// The literal token used in tag text.
    pub fn as_str(&self) -> &str {
        match self {
            EmbedKind::Gallery => "gallery",
            EmbedKind::Image => "image",
            EmbedKind::Hero => "hero",
            EmbedKind::Collapse => "collapse",
            EmbedKind::Carousel => "carousel",
            EmbedKind::Unknown(token) => token,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EmbedKind::Unknown(_))
    }

    /// Human-readable name shown in editor placeholders and CLI output.
    pub fn label(&self) -> &str {
        match self {
            EmbedKind::Gallery => "Gallery",
            EmbedKind::Image => "Image",
            EmbedKind::Hero => "Hero",
            EmbedKind::Collapse => "Collapse",
            EmbedKind::Carousel => "Carousel",
            EmbedKind::Unknown(_) => "Embed",
        }
    }
}

impl From<&str> for EmbedKind {
    fn from(token: &str) -> Self {
        match token {
            "gallery" => EmbedKind::Gallery,
            "image" => EmbedKind::Image,
            "hero" => EmbedKind::Hero,
            "collapse" => EmbedKind::Collapse,
            "carousel" => EmbedKind::Carousel,
            other => EmbedKind::Unknown(other.to_string()),
        }
    }
}

impl FromStr for EmbedKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EmbedKind::from(s))
    }
}

impl fmt::Display for EmbedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EmbedKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmbedKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(EmbedKind::from(token.as_str()))
    }
}
