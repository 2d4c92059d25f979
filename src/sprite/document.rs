//! The sprite under construction

use std::collections::HashSet;

use tracing::warn;

use crate::config::SpriteConfig;
use crate::error::SpriteError;
use crate::source::AttributeSet;

use super::reference::{emit_references, ShadowElement};
use super::svg::SpriteWriter;
use super::title::inject_title;
use super::{Slot, Symbol};

pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// One symbol and the shadow elements that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteEntry {
    pub symbol: Symbol,
    /// Placement in root coordinates, assigned by the layout
    pub slot: Slot,
    pub shadows: Vec<ShadowElement>,
}

/// Accumulator threaded through the sources in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteDocument {
    /// Root attributes beyond the default `xmlns`, first declaration wins
    pub root_attributes: AttributeSet,
    entries: Vec<SpriteEntry>,
    /// Root size, set only when sizes are requested
    pub size: Option<(f64, f64)>,
}

impl SpriteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SpriteEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|e| &e.symbol)
    }

    /// Append a symbol
    ///
    /// A symbol whose id is taken replaces the earlier one, which is removed
    /// from its position. In strict mode that is an error instead.
    pub fn add_symbol(&mut self, symbol: Symbol, strict: bool) -> Result<(), SpriteError> {
        if let Some(index) = self.entries.iter().position(|e| e.symbol.id == symbol.id) {
            if strict {
                return Err(SpriteError::DuplicateIdentifier { id: symbol.id });
            }
            warn!(id = %symbol.id, "duplicate symbol id, keeping the later source");
            self.entries.remove(index);
        }
        let slot = Slot {
            x: 0.0,
            y: 0.0,
            width: symbol.view_box.width,
            height: symbol.view_box.height,
        };
        self.entries.push(SpriteEntry {
            symbol,
            slot,
            shadows: Vec::new(),
        });
        Ok(())
    }

    /// Lay out the symbols and attach their `use`/`view` elements
    ///
    /// In strict mode a `view` id that collides with any other id is an error.
    pub fn emit_references(&mut self, config: &SpriteConfig) -> Result<(), SpriteError> {
        let sizes = config.output.svg.sizes;
        let with_use = config.sprite.generate.symbol;
        let boxes: Vec<_> = self.entries.iter().map(|e| e.symbol.view_box).collect();
        let layout = config
            .output
            .svg
            .layout
            .arrange(&boxes, config.sprite.gutter);

        for (entry, slot) in self.entries.iter_mut().zip(&layout.slots) {
            entry.slot = *slot;
            entry.shadows =
                emit_references(&entry.symbol, *slot, &config.sprite.generate, with_use, sizes);
        }

        let has_use = self
            .entries
            .iter()
            .flat_map(|e| &e.shadows)
            .any(|s| matches!(s, ShadowElement::Use(_)));
        if has_use {
            self.root_attributes.set_if_absent("xmlns:xlink", XLINK_NAMESPACE);
        }

        self.size = sizes.then_some((layout.width, layout.height));

        if config.sprite.strict_ids {
            self.check_view_ids()?;
        }
        Ok(())
    }

    fn check_view_ids(&self) -> Result<(), SpriteError> {
        let mut ids: HashSet<&str> = self.symbols().map(|s| s.id.as_str()).collect();
        let views = self.entries.iter().flat_map(|e| &e.shadows).filter_map(|s| match s {
            ShadowElement::View(view) => Some(view.id.as_str()),
            ShadowElement::Use(_) => None,
        });
        for id in views {
            if !ids.insert(id) {
                return Err(SpriteError::DuplicateIdentifier { id: id.to_string() });
            }
        }
        Ok(())
    }

    pub fn inject_titles(&mut self, enabled: bool) {
        for entry in &mut self.entries {
            inject_title(&mut entry.symbol, enabled);
        }
    }

    /// Serialize; `as_symbols` false writes each source inline at its slot
    pub fn to_svg(&self, as_symbols: bool) -> String {
        let mut writer = SpriteWriter::new();
        writer.open_root(&self.root_attributes, self.size);
        for entry in &self.entries {
            if as_symbols {
                writer.add_symbol(&entry.symbol);
            } else {
                writer.add_inline(&entry.symbol, entry.slot);
            }
            for shadow in &entry.shadows {
                writer.add_shadow(shadow);
            }
        }
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewBox;
    use crate::sprite::LayoutPolicy;

    fn symbol(id: &str, size: f64, children: &str) -> Symbol {
        Symbol {
            id: id.to_string(),
            view_box: ViewBox::new(0.0, 0.0, size, size),
            attributes: vec![],
            title: None,
            declares_title: false,
            children: children.to_string(),
        }
    }

    fn ids(doc: &SpriteDocument) -> Vec<&str> {
        doc.symbols().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_symbols_keep_insertion_order() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("b", 1.0, ""), false).unwrap();
        doc.add_symbol(symbol("a", 1.0, ""), false).unwrap();
        assert_eq!(ids(&doc), ["b", "a"]);
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("x", 1.0, "first"), false).unwrap();
        doc.add_symbol(symbol("y", 1.0, ""), false).unwrap();
        doc.add_symbol(symbol("x", 1.0, "second"), false).unwrap();

        assert_eq!(ids(&doc), ["y", "x"]);
        assert_eq!(doc.entries()[1].symbol.children, "second");
    }

    #[test]
    fn test_duplicate_id_strict() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("x", 1.0, ""), true).unwrap();
        let err = doc.add_symbol(symbol("x", 1.0, ""), true).unwrap_err();
        assert!(matches!(err, SpriteError::DuplicateIdentifier { id } if id == "x"));
    }

    #[test]
    fn test_view_id_colliding_with_symbol() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("a", 1.0, ""), true).unwrap();
        doc.add_symbol(symbol("a-view", 1.0, ""), true).unwrap();

        let lenient = SpriteConfig::default().with_view(true);
        doc.emit_references(&lenient).unwrap();

        let strict = lenient.with_strict_ids(true);
        let err = doc.emit_references(&strict).unwrap_err();
        assert!(matches!(err, SpriteError::DuplicateIdentifier { id } if id == "a-view"));
    }

    #[test]
    fn test_sizes_are_optional() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("a", 16.0, ""), false).unwrap();
        doc.add_symbol(symbol("b", 32.0, ""), false).unwrap();

        doc.emit_references(&SpriteConfig::default()).unwrap();
        assert_eq!(doc.size, None);

        doc.emit_references(&SpriteConfig::default().with_sizes(true)).unwrap();
        assert_eq!(doc.size, Some((32.0, 32.0)));
    }

    #[test]
    fn test_use_declares_xlink_once() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("a", 16.0, ""), false).unwrap();
        doc.root_attributes.set_if_absent("xmlns:xlink", "urn:custom");

        doc.emit_references(&SpriteConfig::default().with_use(true)).unwrap();
        assert_eq!(doc.root_attributes.get("xmlns:xlink"), Some("urn:custom"));
        assert_eq!(doc.root_attributes.len(), 1);
    }

    #[test]
    fn test_stack_layout_offsets_shadows() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("a", 10.0, ""), false).unwrap();
        doc.add_symbol(symbol("b", 20.0, ""), false).unwrap();

        let config = SpriteConfig::default()
            .with_layout(LayoutPolicy::Stack)
            .with_gutter(5.0)
            .with_view(true);
        doc.emit_references(&config).unwrap();

        match &doc.entries()[1].shadows[..] {
            [ShadowElement::View(view)] => {
                assert_eq!(view.view_box, ViewBox::new(0.0, 15.0, 20.0, 20.0));
            }
            other => panic!("unexpected shadows {other:?}"),
        }
    }

    #[test]
    fn test_titles_and_serialization() {
        let mut doc = SpriteDocument::new();
        doc.add_symbol(symbol("a", 10.0, "<g/>"), false).unwrap();
        doc.emit_references(&SpriteConfig::default()).unwrap();
        doc.inject_titles(true);

        assert_eq!(
            doc.to_svg(true),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <symbol id=\"a\" viewBox=\"0 0 10 10\"><title>a</title><g/></symbol>\n</svg>"
        );
    }
}
