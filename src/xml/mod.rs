//! Generic XML node model.
//!
//! Every part of an OOXML container is parsed into an [`XmlNode`] tree. The
//! tree is addressed by qualified element names (`p:sp`, `a:t`) and never
//! fails on lookup: absent nodes are `None`, absent numeric attributes fall
//! back to `0`. Malformed markup produces an empty tree so that extraction
//! degrades to defaults instead of aborting.

mod node;

pub use node::{Descendants, XmlNode, MAX_XML_DEPTH};
