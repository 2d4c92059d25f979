//! Conversion of one source document into a symbol

use std::path::Path;

use crate::config::{Prefix, SpriteOptions};
use crate::error::SpriteError;
use crate::geometry::ViewBox;
use crate::source::{filter_transferable, propagate_namespaces, Attribute, AttributeSet, SourceDocument};

/// A named, addressable fragment of the sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub id: String,
    pub view_box: ViewBox,
    /// Pass-through attributes, never one of the reserved names
    pub attributes: Vec<Attribute>,
    /// Generated title, set by the title injector
    pub title: Option<String>,
    /// Whether the source already declares its own `<title>`
    pub declares_title: bool,
    /// Original child markup, verbatim
    pub children: String,
}

/// Derive an id from the file stem and apply the prefix
pub fn derive_id(path: &Path, prefix: &Prefix) -> Result<String, SpriteError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SpriteError::invalid(path, "cannot derive an identifier from the file name"))?;

    let id = prefix.apply(stem);
    if id.is_empty() {
        return Err(SpriteError::invalid(path, "identifier is empty"));
    }
    Ok(id)
}

impl Symbol {
    /// Build a symbol, registering the source's namespaces on `root`
    pub fn build(
        document: SourceDocument,
        view_box: ViewBox,
        options: &SpriteOptions,
        root: &mut AttributeSet,
    ) -> Result<Self, SpriteError> {
        let id = derive_id(&document.path, &options.prefix)?;

        propagate_namespaces(&document.root_attributes, root);

        // A declaration hoisted to the root is redundant here; a conflicting one is not.
        let attributes = filter_transferable(&document.root_attributes)
            .into_iter()
            .filter(|a| !a.is_namespace_declaration() || root.get(&a.name) != Some(a.value.as_str()))
            .collect();

        Ok(Self {
            id,
            view_box,
            attributes,
            title: None,
            declares_title: document.has_title,
            children: document.children,
        })
    }

    /// Look up a pass-through attribute by exact name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}
