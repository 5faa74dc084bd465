//! Shared types used by configuration and the imaging backend.
//!
//! [`Fit`] and [`Position`] are deserialized straight from the size entries
//! in the config file and handed unchanged to the backend, so both sides
//! agree on one spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an image is fitted when both width and height constrain the output.
///
/// Ignored when only one dimension is set: the other one then follows the
/// source aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    /// Scale to cover both dimensions, then crop the overflow at [`Position`].
    #[default]
    Cover,
    /// Scale to fit inside both dimensions, then pad to the exact box at [`Position`].
    Contain,
    /// Stretch to both dimensions, ignoring the aspect ratio.
    Fill,
    /// Largest aspect-preserving size not exceeding either dimension.
    Inside,
    /// Smallest aspect-preserving size not below either dimension.
    Outside,
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Fit::Cover => "cover",
            Fit::Contain => "contain",
            Fit::Fill => "fill",
            Fit::Inside => "inside",
            Fit::Outside => "outside",
        };
        f.write_str(s)
    }
}

/// Anchor used when cropping (`cover`) or padding (`contain`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Left,
    Right,
    Top,
    Bottom,
    #[default]
    Center,
    #[serde(alias = "left top", alias = "top left")]
    LeftTop,
    #[serde(alias = "right top", alias = "top right")]
    RightTop,
    #[serde(alias = "left bottom", alias = "bottom left")]
    LeftBottom,
    #[serde(alias = "right bottom", alias = "bottom right")]
    RightBottom,
}

/// Horizontal or vertical placement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of a `inner`-long span placed inside an `outer`-long span.
    pub fn offset(self, outer: u32, inner: u32) -> u32 {
        let slack = outer.saturating_sub(inner);
        match self {
            Align::Start => 0,
            Align::Center => slack / 2,
            Align::End => slack,
        }
    }
}

impl Position {
    /// Split into (horizontal, vertical) alignment.
    pub fn alignment(self) -> (Align, Align) {
        match self {
            Position::Left => (Align::Start, Align::Center),
            Position::Right => (Align::End, Align::Center),
            Position::Top => (Align::Center, Align::Start),
            Position::Bottom => (Align::Center, Align::End),
            Position::Center => (Align::Center, Align::Center),
            Position::LeftTop => (Align::Start, Align::Start),
            Position::RightTop => (Align::End, Align::Start),
            Position::LeftBottom => (Align::Start, Align::End),
            Position::RightBottom => (Align::End, Align::End),
        }
    }
}
