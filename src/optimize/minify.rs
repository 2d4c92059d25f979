//! Built-in minifier
//!
//! A streaming rewrite with quick-xml. Attribute values and text are written
//! back byte for byte; only markup between elements is touched.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::Deserialize;

use super::{OptimizeError, Optimizer};

/// Individually switchable minification rules
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyOptions {
    pub remove_comments: bool,
    /// Drop whitespace-only text that sits between markup
    pub collapse_whitespace: bool,
    /// Drop `<metadata>` subtrees
    pub remove_metadata: bool,
    /// Rewrite `<a></a>` as `<a/>`
    pub collapse_empty: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            remove_comments: true,
            collapse_whitespace: true,
            remove_metadata: true,
            collapse_empty: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Minifier {
    options: MinifyOptions,
}

impl Minifier {
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MinifyOptions {
        &self.options
    }
}

fn markup_error(err: impl std::fmt::Display) -> OptimizeError {
    OptimizeError::Markup(err.to_string())
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(|b| b.is_ascii_whitespace())
}

impl Optimizer for Minifier {
    fn optimize(&self, svg: &str) -> Result<String, OptimizeError> {
        let options = &self.options;
        let mut reader = Reader::from_str(svg);
        let mut writer = Writer::new(Vec::with_capacity(svg.len()));

        // A start tag is held back until we know whether the element is empty.
        let mut pending_start: Option<BytesStart<'_>> = None;
        // Whitespace is held back until we know whether it is inside text.
        let mut pending_space: Option<BytesText<'_>> = None;
        let mut skipped_depth = 0usize;
        // Nesting depth inside text content, where whitespace is significant.
        let mut text_depth = 0usize;

        loop {
            let event = reader.read_event().map_err(markup_error)?;

            if skipped_depth > 0 {
                match event {
                    Event::Start(_) => skipped_depth += 1,
                    Event::End(_) => skipped_depth -= 1,
                    Event::Eof => break,
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Eof => break,
                Event::Start(ref e) if options.remove_metadata && is_metadata(e) => {
                    skipped_depth = 1;
                }
                Event::Empty(ref e) if options.remove_metadata && is_metadata(e) => {}
                Event::Comment(_) if options.remove_comments => {}
                Event::Text(text)
                    if options.collapse_whitespace && text_depth == 0 && is_blank(&text) =>
                {
                    pending_space.get_or_insert(text);
                }
                Event::End(end) => {
                    pending_space = None;
                    text_depth = text_depth.saturating_sub(1);
                    let written = match pending_start.take() {
                        Some(start) => writer.write_event(Event::Empty(start)),
                        None => writer.write_event(Event::End(end)),
                    };
                    written.map_err(markup_error)?;
                }
                other => {
                    if let Some(start) = pending_start.take() {
                        writer.write_event(Event::Start(start)).map_err(markup_error)?;
                    }
                    let inside_text = matches!(
                        other,
                        Event::Text(_) | Event::CData(_) | Event::GeneralRef(_)
                    );
                    match pending_space.take() {
                        Some(space) if inside_text => {
                            writer.write_event(Event::Text(space)).map_err(markup_error)?;
                        }
                        _ => {}
                    }
                    if let Event::Start(ref start) = other {
                        if text_depth > 0 || preserves_whitespace(start) {
                            text_depth += 1;
                        }
                    }
                    match other {
                        Event::Start(start) if options.collapse_empty => {
                            pending_start = Some(start);
                        }
                        other => writer.write_event(other).map_err(markup_error)?,
                    }
                }
            }
        }

        if let Some(start) = pending_start.take() {
            writer.write_event(Event::Start(start)).map_err(markup_error)?;
        }

        String::from_utf8(writer.into_inner()).map_err(markup_error)
    }
}

/// Text elements, and anything marked `xml:space="preserve"`
fn preserves_whitespace(element: &BytesStart<'_>) -> bool {
    matches!(
        element.local_name().as_ref(),
        b"text" | b"tspan" | b"textPath"
    ) || element
        .attributes()
        .flatten()
        .any(|a| a.key.as_ref() == b"xml:space" && a.value.as_ref() == b"preserve")
}

fn is_metadata(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"metadata"
}
