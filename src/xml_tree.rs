//! XML decode boundary
//!
//! The service answers with attribute-less XML documents whose repeated
//! elements may appear zero, one or many times. This module turns such a
//! document into a small key/value tree and exposes every child lookup as an
//! [`Occurrence`], so callers handle the single-vs-many ambiguity explicitly
//! instead of inspecting runtime shapes.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors that can occur while decoding a response document
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The response body is not well-formed XML
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The response body is not valid UTF-8
    #[error("Response body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// A field the normalizer relies on is missing from the document
    #[error("Missing required element <{field}>")]
    MissingField { field: &'static str },

    /// A numeric field holds something that is not a number
    #[error("Element <{field}> is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A raw body was handed out where a decoded document was expected
    #[error("Expected an XML document but the response was fetched raw")]
    NotDecoded,

    /// A decoded document was handed out where raw bytes were expected
    #[error("Expected raw bytes but the response was decoded as XML")]
    AlreadyDecoded,
}

/// A decoded XML node
///
/// Elements without child elements collapse into their trimmed text content,
/// so `<id>17</id>` becomes `Text("17")` and `<Overview/>` becomes `Text("")`.
/// The document root itself is not kept as a key; the tree starts at the
/// children of the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Leaf element (or element holding only whitespace)
    Text(String),
    /// Element with child elements, in document order
    Element(Vec<(String, XmlNode)>),
}

/// How often a child element appears below its parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occurrence<'a> {
    /// No child with that name
    Absent,
    /// Exactly one child with that name
    Single(&'a XmlNode),
    /// Two or more children with that name, in document order
    Many(Vec<&'a XmlNode>),
}

impl<'a> Occurrence<'a> {
    /// Normalizes the occurrence into a list, whatever its cardinality
    pub fn into_vec(self) -> Vec<&'a XmlNode> {
        match self {
            Occurrence::Absent => Vec::new(),
            Occurrence::Single(node) => vec![node],
            Occurrence::Many(nodes) => nodes,
        }
    }

    /// Returns the first node, if any
    pub fn first(self) -> Option<&'a XmlNode> {
        match self {
            Occurrence::Absent => None,
            Occurrence::Single(node) => Some(node),
            Occurrence::Many(nodes) => nodes.into_iter().next(),
        }
    }
}

impl XmlNode {
    /// Parses an XML document into a tree rooted below the document element
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Xml` if the text is not well-formed XML. No
    /// partially parsed tree is ever returned.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        let document = roxmltree::Document::parse(text)?;
        Ok(Self::from_element(document.root_element()))
    }

    /// Decodes raw response bytes as UTF-8 and parses them
    pub fn parse_bytes(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        let text = String::from_utf8(bytes)?;
        Self::parse(&text)
    }

    fn from_element(node: roxmltree::Node<'_, '_>) -> Self {
        let children: Vec<(String, XmlNode)> = node
            .children()
            .filter(|child| child.is_element())
            .map(|child| {
                (
                    child.tag_name().name().to_string(),
                    Self::from_element(child),
                )
            })
            .collect();

        if children.is_empty() {
            let text: String = node
                .children()
                .filter(|child| child.is_text())
                .filter_map(|child| child.text())
                .collect();
            XmlNode::Text(text.trim().to_string())
        } else {
            XmlNode::Element(children)
        }
    }

    /// Looks up all children with the given tag name
    ///
    /// Text nodes have no children, so the lookup on them is always `Absent`.
    pub fn children(&self, name: &str) -> Occurrence<'_> {
        let mut matches: Vec<&XmlNode> = match self {
            XmlNode::Element(children) => children
                .iter()
                .filter(|(key, _)| key == name)
                .map(|(_, node)| node)
                .collect(),
            XmlNode::Text(_) => return Occurrence::Absent,
        };

        match matches.len() {
            0 => Occurrence::Absent,
            1 => Occurrence::Single(matches.remove(0)),
            _ => Occurrence::Many(matches),
        }
    }

    /// Collects all children with the given tag name into a list
    pub fn list(&self, name: &str) -> Vec<&XmlNode> {
        self.children(name).into_vec()
    }

    /// Returns the text of the first child with the given name
    ///
    /// Children that themselves have child elements have no text and yield `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self.children(name).first()? {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        }
    }

    /// Like [`XmlNode::field`], but treats empty text as absent
    pub fn non_empty_field(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|text| !text.is_empty())
    }

    /// Returns the field text or an empty string when it is absent
    pub fn field_or_default(&self, name: &str) -> String {
        self.field(name).unwrap_or_default().to_string()
    }

    /// Whether the node carries no data at all
    pub fn is_empty(&self) -> bool {
        match self {
            XmlNode::Text(text) => text.is_empty(),
            XmlNode::Element(children) => children.is_empty(),
        }
    }
}
