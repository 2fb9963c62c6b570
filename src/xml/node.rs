//! Owned XML element tree built from `quick-xml` events.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Deepest element nesting accepted by [`XmlNode::try_parse`].
///
/// Dropping and cloning a tree recurse, so depth stays bounded.
pub const MAX_XML_DEPTH: usize = 1024;

/// An XML element with its attributes, children and direct text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmlNode {
    /// Qualified element name (e.g. `p:sp`). Empty for an empty tree.
    pub name: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order (duplicates kept)
    pub children: Vec<XmlNode>,

    /// Concatenated direct text content
    pub text: String,
}

impl XmlNode {
    /// Create an element with the given qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse markup, returning an empty tree when it is malformed.
    pub fn parse(source: &str) -> Self {
        match Self::try_parse(source) {
            Ok(node) => node,
            Err(e) => {
                log::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Parse raw part bytes (UTF-8, BOM tolerated).
    pub fn parse_bytes(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        Self::parse(text.trim_start_matches('\u{feff}'))
    }

    /// Parse markup, surfacing [`Error::MalformedMarkup`] on failure.
    pub fn try_parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::MalformedMarkup(format!(
                    "position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(start) => {
                    if stack.len() >= MAX_XML_DEPTH {
                        return Err(Error::MalformedMarkup(format!(
                            "nesting deeper than {} elements",
                            MAX_XML_DEPTH
                        )));
                    }
                    stack.push(element_from(&start));
                }
                Event::Empty(start) => {
                    let node = element_from(&start);
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let mut node = stack
                        .pop()
                        .ok_or_else(|| Error::MalformedMarkup("unbalanced end tag".into()))?;
                    // indentation between child elements is not content
                    if !node.children.is_empty() && node.text.trim().is_empty() {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let value = text
                            .unescape()
                            .map_err(|e| Error::MalformedMarkup(e.to_string()))?;
                        current.text.push_str(&value);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::MalformedMarkup(format!(
                "unclosed element <{}>",
                stack.last().map(|n| n.name.as_str()).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| Error::MalformedMarkup("document has no root element".into()))
    }

    /// Check whether this is the empty tree.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.children.is_empty()
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }

    /// First child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given qualified name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a path of element names, taking the first match at each step.
    pub fn find(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// All nodes reachable by the path, expanding duplicates at every step.
    pub fn find_all(&self, path: &[&str]) -> Vec<&XmlNode> {
        let mut current = vec![self];
        for name in path {
            current = current
                .into_iter()
                .flat_map(|node| node.children.iter().filter(move |c| c.name == **name))
                .collect();
        }
        current
    }

    /// Depth-first pre-order iterator over all descendants (excluding self).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// All descendants with the given qualified name.
    pub fn descendants_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.descendants().filter(move |n| n.name == name)
    }

    /// First descendant with the given qualified name.
    pub fn descendant(&self, name: &str) -> Option<&XmlNode> {
        self.descendants().find(|n| n.name == name)
    }

    /// Attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Integer attribute, `0` when absent or unparsable.
    pub fn attr_i64(&self, name: &str) -> i64 {
        self.attr_i64_opt(name).unwrap_or(0)
    }

    /// Integer attribute, `None` when absent or unparsable.
    pub fn attr_i64_opt(&self, name: &str) -> Option<i64> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    /// Boolean attribute in OOXML spelling (`1`, `true`, `on`).
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).map(|v| matches!(v.trim(), "1" | "true" | "on"))
    }

    /// Text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for node in self.descendants() {
            out.push_str(&node.text);
        }
        out
    }

    /// Append a child, returning self (used by tests and builders).
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Add an attribute, returning self.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// Pre-order iterator returned by [`XmlNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a XmlNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn element_from(start: &BytesStart<'_>) -> XmlNode {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let attributes = start
        .attributes()
        .filter_map(|attr| attr.ok())
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            (key, value)
        })
        .collect();

    XmlNode {
        name,
        attributes,
        children: Vec::new(),
        text: String::new(),
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(Error::MalformedMarkup("multiple root elements".into())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:cSld>
    <p:spTree>
      <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr>
        <p:txBody><a:p><a:r><a:t>Hello &amp; welcome</a:t></a:r></a:p></p:txBody>
      </p:sp>
      <p:sp><p:nvSpPr><p:cNvPr id="x3" name="Body"/></p:nvSpPr></p:sp>
    </p:spTree>
  </p:cSld>
</p:sld>"#;

    #[test]
    fn test_parse_and_find() {
        let root = XmlNode::parse(SLIDE);
        assert_eq!(root.name, "p:sld");
        assert_eq!(root.local_name(), "sld");

        let shapes = root.find_all(&["p:cSld", "p:spTree", "p:sp"]);
        assert_eq!(shapes.len(), 2);

        let title = shapes[0].find(&["p:nvSpPr", "p:cNvPr"]).unwrap();
        assert_eq!(title.attr("name"), Some("Title 1"));
        assert_eq!(title.attr_i64("id"), 2);
        assert_eq!(shapes[0].text_content(), "Hello & welcome");
    }

    #[test]
    fn test_numeric_fallback() {
        let root = XmlNode::parse(SLIDE);
        let body = root
            .find_all(&["p:cSld", "p:spTree", "p:sp"])
            .into_iter()
            .nth(1)
            .and_then(|sp| sp.find(&["p:nvSpPr", "p:cNvPr"]))
            .unwrap();
        assert_eq!(body.attr_i64("id"), 0);
        assert_eq!(body.attr_i64("missing"), 0);
        assert!(body.attr_i64_opt("id").is_none());
    }

    #[test]
    fn test_malformed_yields_empty_tree() {
        let root = XmlNode::parse("<a:p><a:r></a:p>");
        assert!(root.is_empty());
        assert!(root.find(&["a:r"]).is_none());

        assert!(XmlNode::parse("").is_empty());
        assert!(XmlNode::parse("<open>").is_empty());
        assert!(matches!(
            XmlNode::try_parse("<a><b></a>"),
            Err(Error::MalformedMarkup(_))
        ));
    }

    #[test]
    fn test_descendants_order() {
        let root = XmlNode::parse("<r><a><b/></a><c/></r>");
        let names: Vec<_> = root.descendants().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_attr_bool() {
        let node = XmlNode::new("a:rPr").with_attr("b", "1").with_attr("i", "0");
        assert_eq!(node.attr_bool("b"), Some(true));
        assert_eq!(node.attr_bool("i"), Some(false));
        assert_eq!(node.attr_bool("u"), None);
    }

    #[test]
    fn test_bom_is_tolerated() {
        let data = "\u{feff}<w:document><w:body/></w:document>".as_bytes();
        let root = XmlNode::parse_bytes(data);
        assert_eq!(root.name, "w:document");
    }

    #[test]
    fn test_find_all_outlives_path() {
        let root = XmlNode::parse(SLIDE);
        let shapes = {
            let path = vec!["p:cSld".to_string(), "p:spTree".to_string(), "p:sp".to_string()];
            let names: Vec<&str> = path.iter().map(String::as_str).collect();
            root.find_all(&names)
        };
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}{}", "<a>".repeat(5000), "</a>".repeat(5000));
        assert!(matches!(
            XmlNode::try_parse(&deep),
            Err(Error::MalformedMarkup(_))
        ));
        assert!(XmlNode::parse(&deep).is_empty());

        let limit = format!(
            "{}{}",
            "<a>".repeat(MAX_XML_DEPTH),
            "</a>".repeat(MAX_XML_DEPTH)
        );
        let root = XmlNode::try_parse(&limit).unwrap();
        assert_eq!(root.name, "a");
    }
}
