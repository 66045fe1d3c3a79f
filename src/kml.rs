//! KML document parsing.
//!
//! `quick-xml` does the tokenizing; this module folds its event stream into a small
//! owned element tree that the extractor can walk with plain `Option` lookups.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::Error;

/// A parsed XML element. Names are local, so `kml:Placemark` and `Placemark` compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Element { name, ..Default::default() }
    }

    fn from_start(start: &BytesStart) -> Self {
        Element::new(String::from_utf8_lossy(start.local_name().as_ref()).into_owned())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed text content, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        Some(self.text.as_str()).filter(|t| !t.is_empty())
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

pub fn parse_file(path: &Path) -> Result<Element, Error> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

pub fn parse_str(content: &str) -> Result<Element, Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(malformed(&reader, "content after the root element"));
                }
                stack.push(Element::from_start(e));
            }
            Event::Empty(ref e) => {
                let element = Element::from_start(e);
                close(element, &mut stack, &mut root)
                    .map_err(|message| malformed(&reader, message))?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed(&reader, "closing tag without an open element"))?;
                close(element, &mut stack, &mut root)
                    .map_err(|message| malformed(&reader, message))?;
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::MalformedDocument(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| Error::MalformedDocument("document has no root element".to_string()))
}

fn close(
    mut element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), &'static str> {
    element.text = element.text.trim().to_string();

    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err("content after the root element"),
    }
    Ok(())
}

fn malformed(reader: &Reader<&[u8]>, message: &str) -> Error {
    Error::MalformedDocument(format!("{message} at byte {}", reader.buffer_position()))
}
