//! Owned element tree on top of `quick-xml` events.
//!
//! Element and attribute names are stored by local name, so namespaced
//! documents (FrameNet) and plain ones are navigated the same way.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use verbgraph_core::files::read_capped;
use verbgraph_core::ParseError;

/// Hard ceiling on element nesting, independent of any corpus-specific guard.
pub const MAX_ELEMENT_DEPTH: usize = 1024;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Direct character data, whitespace-trimmed pieces joined by a space.
    pub text: String,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, or an empty string when absent.
    pub fn attr_or_empty(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// `<container><item/>...</container>` in one step.
    pub fn grandchildren<'a>(
        &'a self,
        container: &'a str,
        item: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children_named(container)
            .flat_map(move |c| c.children_named(item))
    }

    /// Every element named `name` below this one, document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_named(name, out);
        }
    }

    /// Trimmed text of the first child called `name`.
    pub fn child_text(&self, name: &str) -> String {
        self.child(name)
            .map(|c| c.deep_text())
            .unwrap_or_default()
    }

    /// Text of this element and all descendants, joined by single spaces.
    pub fn deep_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            out.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

fn xml_error(path: &Path, message: impl std::fmt::Display) -> ParseError {
    ParseError::Xml {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

fn open_element(start: &BytesStart<'_>, path: &Path) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| xml_error(path, e))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn push_text(stack: &mut [Element], text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        if !top.text.is_empty() {
            top.text.push(' ');
        }
        top.text.push_str(text);
    }
}

/// Parse a complete document into its root element.
pub fn parse_document(text: &str, path: &Path) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(path, format!("{e} at byte {}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error(path, "more than one root element"));
                }
                if stack.len() >= MAX_ELEMENT_DEPTH {
                    return Err(ParseError::DepthExceeded {
                        path: path.to_path_buf(),
                        limit: MAX_ELEMENT_DEPTH,
                    });
                }
                stack.push(open_element(&start, path)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start, path)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(xml_error(path, "more than one root element")),
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(xml_error(path, "closing tag without an open element"));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(text) => match text.unescape() {
                Ok(unescaped) => push_text(&mut stack, &unescaped),
                Err(_) => push_text(&mut stack, &String::from_utf8_lossy(&text)),
            },
            Event::CData(data) => {
                push_text(&mut stack, &String::from_utf8_lossy(&data.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(xml_error(path, "document ended inside an open element"));
    }
    root.ok_or_else(|| xml_error(path, "no root element"))
}

/// Read `path` (subject to `max_bytes`) and parse it.
pub fn parse_file(path: &Path, max_bytes: u64) -> Result<Element, ParseError> {
    let text = read_capped(path, max_bytes)?;
    parse_document(&text, path)
}

pub fn expect_root(root: &Element, expected: &str, path: &Path) -> Result<(), ParseError> {
    if root.name == expected {
        Ok(())
    } else {
        Err(ParseError::UnexpectedRoot {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            found: root.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Element, ParseError> {
        parse_document(text, Path::new("test.xml"))
    }

    #[test]
    fn builds_nested_tree_with_attributes_and_text() {
        let root = parse(
            r#"<?xml version="1.0"?>
            <VNCLASS ID="give-13.1">
              <MEMBERS><MEMBER name="give"/><MEMBER name="hand"/></MEMBERS>
              <EXAMPLES><EXAMPLE>They lent a bicycle to me.</EXAMPLE></EXAMPLES>
            </VNCLASS>"#,
        )
        .unwrap();

        assert_eq!(root.name, "VNCLASS");
        assert_eq!(root.attr("ID"), Some("give-13.1"));
        let names: Vec<_> = root
            .grandchildren("MEMBERS", "MEMBER")
            .map(|m| m.attr_or_empty("name"))
            .collect();
        assert_eq!(names, vec!["give", "hand"]);
        assert_eq!(root.child_text("EXAMPLES"), "They lent a bicycle to me.");
    }

    #[test]
    fn namespaces_are_stripped_to_local_names() {
        let root = parse(
            r#"<fn:frame xmlns:fn="http://framenet.icsi.berkeley.edu" fn:name="Giving">
                 <fn:definition>&lt;def-root&gt;A Donor&lt;/def-root&gt;</fn:definition>
               </fn:frame>"#,
        )
        .unwrap();
        assert_eq!(root.name, "frame");
        assert_eq!(root.attr("name"), Some("Giving"));
        assert_eq!(root.child_text("definition"), "<def-root>A Donor</def-root>");
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(matches!(parse("<a><b></a>"), Err(ParseError::Xml { .. })));
        assert!(matches!(parse("<a>"), Err(ParseError::Xml { .. })));
        assert!(matches!(parse(""), Err(ParseError::Xml { .. })));
        assert!(matches!(parse("<a/><b/>"), Err(ParseError::Xml { .. })));
    }

    #[test]
    fn wrong_root_is_reported() {
        let root = parse("<frameset/>").unwrap();
        let err = expect_root(&root, "VNCLASS", Path::new("x.xml")).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedRoot { found, .. } if found == "frameset"));
    }
}
