//! Sprite assembly
//!
//! Symbols are folded into a [`SpriteDocument`] in input order, then laid
//! out, given their shadow elements and titles, and serialized.

mod document;
mod layout;
mod reference;
mod svg;
mod symbol;
mod title;

pub use document::{SpriteDocument, SpriteEntry, XLINK_NAMESPACE};
pub use layout::{Layout, LayoutPolicy, Slot};
pub use reference::{emit_references, ShadowElement, UseElement, ViewElement};
pub use svg::{SpriteWriter, SVG_NAMESPACE};
pub use symbol::{derive_id, Symbol};
pub use title::inject_title;
