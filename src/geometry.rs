//! ViewBox resolution for source documents

use std::fmt;
use std::str::FromStr;

use svgtypes::{Length, LengthUnit};

use crate::error::SpriteError;
use crate::source::SourceDocument;

/// A `(min-x, min-y, width, height)` coordinate mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse a `viewBox` attribute value
    ///
    /// Requires four numbers and a positive width and height.
    pub fn parse(value: &str) -> Option<Self> {
        let vb = svgtypes::ViewBox::from_str(value).ok()?;
        let parsed = Self::new(vb.x, vb.y, vb.w, vb.h);
        parsed.is_drawable().then_some(parsed)
    }

    fn is_drawable(&self) -> bool {
        [self.min_x, self.min_y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            format_number(self.min_x),
            format_number(self.min_y),
            format_number(self.width),
            format_number(self.height)
        )
    }
}

/// Format a coordinate without a trailing `.0` or a negative zero
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Parse a `width` or `height` value, stripping any absolute unit
///
/// Percentages are relative to an unknown viewport and are rejected.
pub fn parse_dimension(value: &str) -> Option<f64> {
    let length = Length::from_str(value.trim()).ok()?;
    if length.unit == LengthUnit::Percent {
        return None;
    }
    (length.number.is_finite() && length.number > 0.0).then_some(length.number)
}

/// Derive the canonical viewBox of a source
///
/// A valid `viewBox` wins; otherwise `width` and `height` synthesize one at
/// the origin. Missing geometry is never defaulted.
pub fn resolve_view_box(document: &SourceDocument) -> Result<ViewBox, SpriteError> {
    if let Some(view_box) = document.attribute("viewBox").and_then(ViewBox::parse) {
        return Ok(view_box);
    }

    let width = document.attribute("width").and_then(parse_dimension);
    let height = document.attribute("height").and_then(parse_dimension);
    match (width, height) {
        (Some(width), Some(height)) => Ok(ViewBox::new(0.0, 0.0, width, height)),
        _ => Err(SpriteError::invalid(
            &document.path,
            "unable to determine dimensions from viewBox or width/height",
        )),
    }
}
