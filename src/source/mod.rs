//! Source documents and their root attributes
//!
//! Each input SVG is parsed once into a [`SourceDocument`]. The root element's
//! attributes are kept as declared; the child markup is kept verbatim.

mod attributes;
mod document;

pub use attributes::{
    filter_transferable, propagate_namespaces, Attribute, AttributeSet, RESERVED_ATTRIBUTES,
};
pub use document::{SourceDocument, SourceFile};
