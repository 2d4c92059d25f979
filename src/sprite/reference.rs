//! Shadow `use` and `view` elements

use crate::config::GenerateOptions;
use crate::geometry::ViewBox;
use crate::source::Attribute;

use super::{Slot, Symbol};

/// A reference to a symbol, owning no markup
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowElement {
    Use(UseElement),
    View(ViewElement),
}

/// Instantiates a symbol at its layout slot
#[derive(Debug, Clone, PartialEq)]
pub struct UseElement {
    /// Id of the referenced symbol, without `#`
    pub target: String,
    pub x: f64,
    pub y: f64,
    /// Explicit size, present when root sizes are requested
    pub size: Option<(f64, f64)>,
}

/// Named viewport addressable as `sprite.svg#<id>`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewElement {
    pub id: String,
    pub view_box: ViewBox,
    pub attributes: Vec<Attribute>,
}

/// Emit the shadow elements of one symbol, `use` first
///
/// `with_use` is false when there are no symbols to reference.
pub fn emit_references(
    symbol: &Symbol,
    slot: Slot,
    options: &GenerateOptions,
    with_use: bool,
    sizes: bool,
) -> Vec<ShadowElement> {
    let mut shadows = Vec::new();

    if with_use && options.use_ {
        shadows.push(ShadowElement::Use(UseElement {
            target: symbol.id.clone(),
            x: slot.x,
            y: slot.y,
            size: sizes.then_some((slot.width, slot.height)),
        }));
    }

    if let Some(suffix) = options.view.suffix() {
        let attributes = options
            .view_attributes
            .iter()
            .filter_map(|name| symbol.attribute(name).map(|value| Attribute::new(name, value)))
            .collect();
        shadows.push(ShadowElement::View(ViewElement {
            id: format!("{}{}", symbol.id, suffix),
            view_box: slot.view_box(),
            attributes,
        }));
    }

    shadows
}
