//! Serialization of the sprite document

use quick_xml::escape::escape;

use crate::geometry::format_number;
use crate::source::{Attribute, AttributeSet};

use super::reference::ShadowElement;
use super::{Slot, Symbol};

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Build the sprite markup one element per line
pub struct SpriteWriter {
    lines: Vec<String>,
    indent: usize,
}

impl SpriteWriter {
    pub fn new() -> Self {
        Self {
            lines: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        "  ".repeat(self.indent)
    }

    /// Write the root start tag
    pub fn open_root(&mut self, attributes: &AttributeSet, size: Option<(f64, f64)>) {
        let mut tag = format!(r#"<svg xmlns="{SVG_NAMESPACE}""#);
        push_attributes(&mut tag, attributes.iter());
        if let Some((width, height)) = size {
            push_attribute(&mut tag, "width", &format_number(width));
            push_attribute(&mut tag, "height", &format_number(height));
        }
        tag.push('>');
        self.lines.push(tag);
    }

    /// Add a `<symbol>` with its title and source children
    pub fn add_symbol(&mut self, symbol: &Symbol) {
        let mut tag = format!("{}<symbol", self.indent_str());
        push_attribute(&mut tag, "id", &symbol.id);
        push_attribute(&mut tag, "viewBox", &symbol.view_box.to_string());
        push_attributes(&mut tag, symbol.attributes.iter());
        tag.push('>');
        push_content(&mut tag, symbol);
        tag.push_str("</symbol>");
        self.lines.push(tag);
    }

    /// Add the symbol's content as a nested `<svg>` placed at its slot
    pub fn add_inline(&mut self, symbol: &Symbol, slot: Slot) {
        let mut tag = format!("{}<svg", self.indent_str());
        push_attribute(&mut tag, "id", &symbol.id);
        push_attribute(&mut tag, "viewBox", &symbol.view_box.to_string());
        push_position(&mut tag, slot.x, slot.y);
        push_attribute(&mut tag, "width", &format_number(slot.width));
        push_attribute(&mut tag, "height", &format_number(slot.height));
        push_attributes(&mut tag, symbol.attributes.iter());
        tag.push('>');
        push_content(&mut tag, symbol);
        tag.push_str("</svg>");
        self.lines.push(tag);
    }

    pub fn add_shadow(&mut self, shadow: &ShadowElement) {
        let mut tag = self.indent_str();
        match shadow {
            ShadowElement::Use(element) => {
                tag.push_str("<use");
                push_attribute(&mut tag, "xlink:href", &format!("#{}", element.target));
                push_position(&mut tag, element.x, element.y);
                if let Some((width, height)) = element.size {
                    push_attribute(&mut tag, "width", &format_number(width));
                    push_attribute(&mut tag, "height", &format_number(height));
                }
            }
            ShadowElement::View(element) => {
                tag.push_str("<view");
                push_attribute(&mut tag, "id", &element.id);
                push_attribute(&mut tag, "viewBox", &element.view_box.to_string());
                push_attributes(&mut tag, element.attributes.iter());
            }
        }
        tag.push_str("/>");
        self.lines.push(tag);
    }

    /// Close the root and join everything
    pub fn finish(mut self) -> String {
        self.lines.push("</svg>".to_string());
        self.lines.join("\n")
    }
}

impl Default for SpriteWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_attribute(tag: &mut String, name: &str, value: &str) {
    tag.push(' ');
    tag.push_str(name);
    tag.push_str("=\"");
    tag.push_str(&escape(value));
    tag.push('"');
}

fn push_attributes<'a>(tag: &mut String, attributes: impl Iterator<Item = &'a Attribute>) {
    for attribute in attributes {
        push_attribute(tag, &attribute.name, &attribute.value);
    }
}

fn push_position(tag: &mut String, x: f64, y: f64) {
    if x != 0.0 {
        push_attribute(tag, "x", &format_number(x));
    }
    if y != 0.0 {
        push_attribute(tag, "y", &format_number(y));
    }
}

fn push_content(tag: &mut String, symbol: &Symbol) {
    if let Some(title) = &symbol.title {
        tag.push_str("<title>");
        tag.push_str(&escape(title));
        tag.push_str("</title>");
    }
    tag.push_str(&symbol.children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewBox;
    use crate::sprite::{UseElement, ViewElement};
    use pretty_assertions::assert_eq;

    fn symbol() -> Symbol {
        Symbol {
            id: "a&b".to_string(),
            view_box: ViewBox::new(0.0, 0.0, 16.0, 8.0),
            attributes: vec![Attribute::new("data-name", "\"quoted\"")],
            title: Some("a&b".to_string()),
            declares_title: false,
            children: "<path d=\"M0 0\"/>".to_string(),
        }
    }

    #[test]
    fn test_empty_root() {
        let mut writer = SpriteWriter::new();
        writer.open_root(&AttributeSet::new(), None);
        assert_eq!(
            writer.finish(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n</svg>"
        );
    }

    #[test]
    fn test_root_size() {
        let mut writer = SpriteWriter::new();
        writer.open_root(&AttributeSet::new(), Some((32.0, 24.5)));
        assert!(writer
            .finish()
            .starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="24.5">"#));
    }

    #[test]
    fn test_symbol_escapes_values() {
        let mut writer = SpriteWriter::new();
        writer.add_symbol(&symbol());
        assert_eq!(
            writer.lines[0],
            r#"  <symbol id="a&amp;b" viewBox="0 0 16 8" data-name="&quot;quoted&quot;"><title>a&amp;b</title><path d="M0 0"/></symbol>"#
        );
    }

    #[test]
    fn test_inline_symbol_at_slot() {
        let mut writer = SpriteWriter::new();
        let slot = Slot {
            x: 0.0,
            y: 20.0,
            width: 16.0,
            height: 8.0,
        };
        writer.add_inline(&symbol(), slot);
        assert!(writer.lines[0].starts_with(
            r#"  <svg id="a&amp;b" viewBox="0 0 16 8" y="20" width="16" height="8""#
        ));
        assert!(writer.lines[0].ends_with("</svg>"));
    }

    #[test]
    fn test_shadow_elements() {
        let mut writer = SpriteWriter::new();
        writer.add_shadow(&ShadowElement::Use(UseElement {
            target: "a".into(),
            x: 0.0,
            y: 0.0,
            size: Some((16.0, 8.0)),
        }));
        writer.add_shadow(&ShadowElement::View(ViewElement {
            id: "a-view".into(),
            view_box: ViewBox::new(0.0, 0.0, 16.0, 8.0),
            attributes: vec![Attribute::new("preserveAspectRatio", "none")],
        }));
        assert_eq!(writer.lines[0], r##"  <use xlink:href="#a" width="16" height="8"/>"##);
        assert_eq!(
            writer.lines[1],
            r#"  <view id="a-view" viewBox="0 0 16 8" preserveAspectRatio="none"/>"#
        );
    }
}
