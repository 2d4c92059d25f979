//! Parsing of individual source SVG files

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::attributes::Attribute;
use crate::error::SpriteError;

/// Raw contents of one input, before parsing
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Read a source from disk
    pub fn read(path: &Path) -> Result<Self, SpriteError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SpriteError::read(path, e))?;
        Ok(Self::new(path, contents))
    }
}

/// One parsed input document
///
/// Only the root element is interpreted. Everything between the root's
/// start and end tags is kept as verbatim markup.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Root attributes in declaration order, unfiltered
    pub root_attributes: Vec<Attribute>,
    /// Markup between `<svg …>` and `</svg>`
    pub children: String,
    /// Whether an immediate child is a `<title>` element
    pub has_title: bool,
}

impl SourceDocument {
    pub fn parse(source: &SourceFile) -> Result<Self, SpriteError> {
        Self::parse_str(&source.path, &source.contents)
    }

    pub fn parse_str(path: &Path, text: &str) -> Result<Self, SpriteError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);

        let mut root_attributes = None;
        let mut children = None;
        let mut has_title = false;
        let mut content_start = 0;
        let mut depth = 0usize;
        let mut entities = HashMap::new();

        loop {
            let position = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(SpriteError::parse(
                        path,
                        format!("{} at position {}", e, reader.error_position()),
                    ))
                }
            };

            match event {
                Event::Start(ref e) | Event::Empty(ref e) if depth == 0 => {
                    if root_attributes.is_some() {
                        return Err(SpriteError::parse(path, "multiple root elements"));
                    }
                    root_attributes = Some(read_root_attributes(path, e, &entities)?);
                    if matches!(event, Event::Start(_)) {
                        content_start = reader.buffer_position() as usize;
                        depth = 1;
                    } else {
                        children = Some(String::new());
                    }
                }
                Event::Start(ref e) => {
                    has_title |= depth == 1 && is_title(e);
                    depth += 1;
                }
                Event::Empty(ref e) => {
                    has_title |= depth == 1 && is_title(e);
                }
                Event::End(_) => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| SpriteError::parse(path, "unexpected closing tag"))?;
                    if depth == 0 {
                        children = Some(text[content_start..position].to_string());
                    }
                }
                Event::DocType(ref e) if depth == 0 => {
                    entities = declared_entities(&String::from_utf8_lossy(&e[..]));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match (root_attributes, children) {
            (Some(root_attributes), Some(children)) => Ok(Self {
                path: path.to_path_buf(),
                root_attributes,
                children,
                has_title,
            }),
            (None, _) => Err(SpriteError::parse(path, "document has no root element")),
            (Some(_), None) => Err(SpriteError::parse(path, "unexpected end of document")),
        }
    }

    /// Look up a root attribute, ignoring ASCII case of the name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }
}

fn is_title(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"title"
}

/// General entities declared in an internal DTD subset
///
/// Parameter entities and external (`SYSTEM`/`PUBLIC`) entities are ignored.
fn declared_entities(doctype: &str) -> HashMap<String, String> {
    let mut entities = HashMap::new();
    for declaration in doctype.split("<!ENTITY").skip(1) {
        let declaration = declaration.trim_start();
        if declaration.starts_with('%') {
            continue;
        }
        let Some((name, rest)) = declaration.split_once(char::is_whitespace) else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        if let Some((value, _)) = rest[1..].split_once(quote) {
            entities
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }
    entities
}

fn read_root_attributes(
    path: &Path,
    root: &BytesStart<'_>,
    entities: &HashMap<String, String>,
) -> Result<Vec<Attribute>, SpriteError> {
    if root.local_name().as_ref() != b"svg" {
        let name = String::from_utf8_lossy(root.name().as_ref()).into_owned();
        return Err(SpriteError::parse(
            path,
            format!("root element is <{name}>, expected <svg>"),
        ));
    }

    root.attributes()
        .map(|attr| {
            let attr = attr.map_err(|e| SpriteError::parse(path, e.to_string()))?;
            let name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| SpriteError::parse(path, e.to_string()))?;
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|e| SpriteError::parse(path, e.to_string()))?;
            let value = unescape_with(raw, |name| {
                entities
                    .get(name)
                    .map(String::as_str)
                    .or_else(|| resolve_predefined_entity(name))
            })
            .map_err(|e| SpriteError::parse(path, e.to_string()))?;
            Ok(Attribute::new(name, value.into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<SourceDocument, SpriteError> {
        SourceDocument::parse_str(Path::new("icon.svg"), text)
    }

    #[test]
    fn test_parse_root_attributes_in_order() {
        let doc = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"><path d="M0 0"/></svg>"#,
        )
        .unwrap();
        let names: Vec<_> = doc.root_attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["xmlns", "viewBox", "fill"]);
        assert_eq!(doc.attribute("viewbox"), Some("0 0 24 24"));
    }

    #[test]
    fn test_parse_keeps_children_verbatim() {
        let doc = parse("<?xml version=\"1.0\"?>\n<svg viewBox=\"0 0 1 1\">\n  <g><!-- note --><path d=\"M0 0\"/></g>\n</svg>\n").unwrap();
        assert_eq!(doc.children, "\n  <g><!-- note --><path d=\"M0 0\"/></g>\n");
    }

    #[test]
    fn test_parse_self_closing_root() {
        let doc = parse(r#"<svg width="10" height="10"/>"#).unwrap();
        assert_eq!(doc.children, "");
        assert!(!doc.has_title);
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let doc = parse(r#"<svg data-label="a &amp; b" viewBox="0 0 1 1"></svg>"#).unwrap();
        assert_eq!(doc.attribute("data-label"), Some("a & b"));
    }

    #[test]
    fn test_detects_immediate_title_only() {
        let direct = parse(r#"<svg viewBox="0 0 1 1"><title>Mine</title></svg>"#).unwrap();
        assert!(direct.has_title);

        let nested = parse(r#"<svg viewBox="0 0 1 1"><g><title>Nested</title></g></svg>"#).unwrap();
        assert!(!nested.has_title);
    }

    #[test]
    fn test_root_attributes_resolve_dtd_entities() {
        let doc = parse(concat!(
            "<?xml version=\"1.0\"?>\n",
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"svg11.dtd\" [\n",
            "  <!ENTITY ns_extend \"http://ns.adobe.com/Extensibility/1.0/\">\n",
            "  <!ENTITY % local SYSTEM \"local.ent\">\n",
            "]>\n",
            "<svg xmlns:x=\"&ns_extend;\" data-note=\"a &amp; b\" viewBox=\"0 0 1 1\"/>",
        ))
        .unwrap();
        assert_eq!(
            doc.attribute("xmlns:x"),
            Some("http://ns.adobe.com/Extensibility/1.0/")
        );
        assert_eq!(doc.attribute("data-note"), Some("a & b"));
    }

    #[test]
    fn test_undeclared_entity_is_a_parse_failure() {
        let err = parse(r#"<svg xmlns:x="&missing;" viewBox="0 0 1 1"/>"#).unwrap_err();
        assert!(matches!(err, SpriteError::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_non_svg_root() {
        let err = parse(r#"<html><body/></html>"#).unwrap_err();
        assert!(matches!(err, SpriteError::ParseFailure { .. }));
        assert!(err.to_string().contains("expected <svg>"));
    }

    #[test]
    fn test_rejects_mismatched_tags() {
        let err = parse(r#"<svg viewBox="0 0 1 1"><g></path></svg>"#).unwrap_err();
        assert!(matches!(err, SpriteError::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_unterminated_root() {
        let err = parse(r#"<svg viewBox="0 0 1 1"><g/>"#).unwrap_err();
        assert!(matches!(err, SpriteError::ParseFailure { .. }));
    }

    #[test]
    fn test_rejects_empty_document() {
        let err = parse("   ").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }
}
