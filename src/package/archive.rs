//! In-memory ZIP container reader.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::xml::XmlNode;

use super::relationships::Relationships;

/// Largest uncompressed size accepted for a single entry.
pub const MAX_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

/// Upper bound on buffer space reserved from an entry's declared size.
const MAX_PREALLOC_BYTES: u64 = 1 << 20;

/// A document container opened from bytes.
#[derive(Debug, Clone, Default)]
pub struct Package {
    entries: BTreeMap<String, Vec<u8>>,
    extension: String,
}

impl Package {
    /// Open a container from raw bytes.
    ///
    /// `extension` is the declared file extension (e.g. `pptx`), kept for
    /// format detection when the content is ambiguous.
    pub fn from_bytes(data: &[u8], extension: &str) -> Result<Self> {
        Self::from_bytes_limited(data, extension, MAX_ENTRY_BYTES)
    }

    /// Open a container, rejecting it when any entry inflates past `limit`.
    pub(crate) fn from_bytes_limited(data: &[u8], extension: &str, limit: u64) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut entries = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = match archive.by_index(i) {
                Ok(file) => file,
                Err(e) => {
                    log::warn!("Skipping unreadable archive entry {}: {}", i, e);
                    continue;
                }
            };
            if file.is_dir() {
                continue;
            }

            let name = normalize_entry_name(file.name());
            // declared sizes are untrusted
            let mut buf = Vec::with_capacity(file.size().min(MAX_PREALLOC_BYTES) as usize);
            let read = Read::by_ref(&mut file).take(limit.saturating_add(1)).read_to_end(&mut buf);
            if let Err(e) = read {
                log::warn!("Skipping archive entry {}: {}", name, e);
                continue;
            }
            if buf.len() as u64 > limit {
                return Err(Error::CorruptContainer(format!(
                    "entry {} exceeds {} bytes",
                    name, limit
                )));
            }
            entries.insert(name, buf);
        }

        if entries.is_empty() {
            return Err(Error::CorruptContainer("archive has no entries".into()));
        }

        log::debug!("Opened container with {} entries", entries.len());

        Ok(Self {
            entries,
            extension: extension.trim_start_matches('.').to_lowercase(),
        })
    }

    /// Build a package directly from named parts.
    pub fn from_parts<I, K, V>(parts: I, extension: &str) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self {
            entries: parts
                .into_iter()
                .map(|(k, v)| (normalize_entry_name(&k.into()), v.into()))
                .collect(),
            extension: extension.trim_start_matches('.').to_lowercase(),
        }
    }

    /// Declared file extension, lowercase without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Number of entries in the container.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a part exists.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(&normalize_entry_name(path))
    }

    /// Raw bytes of a part.
    pub fn open_entry(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .get(&normalize_entry_name(path))
            .map(|v| v.as_slice())
    }

    /// All part paths starting with `prefix`, in sorted order.
    pub fn list_entries(&self, prefix: &str) -> Vec<&str> {
        let prefix = normalize_entry_name(prefix);
        self.entries
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Parse a part as XML. A missing part is `None`; malformed markup is an
    /// empty tree.
    pub fn read_xml(&self, path: &str) -> Option<XmlNode> {
        match self.open_entry(path) {
            Some(data) => Some(XmlNode::parse_bytes(data)),
            None => {
                log::debug!("Missing part: {}", path);
                None
            }
        }
    }

    /// Parse a part as XML, substituting the empty tree when it is missing.
    pub fn xml_or_empty(&self, path: &str) -> XmlNode {
        self.read_xml(path).unwrap_or_default()
    }

    /// Parse a part that must be present.
    pub fn require_xml(&self, path: &str) -> Result<XmlNode> {
        let data = self
            .open_entry(path)
            .ok_or_else(|| Error::MissingPart(path.to_string()))?;
        let text = String::from_utf8_lossy(data);
        XmlNode::try_parse(text.trim_start_matches('\u{feff}'))
            .map_err(|_| Error::MalformedMarkup(path.to_string()))
    }

    /// Relationships of a part (`dir/_rels/name.rels`), empty when absent.
    pub fn relationships(&self, part: &str) -> Relationships {
        let rels_path = rels_path_for(part);
        match self.read_xml(&rels_path) {
            Some(root) => Relationships::from_xml(&root, part),
            None => Relationships::default(),
        }
    }
}

/// Path of the relationship part belonging to `part`.
fn rels_path_for(part: &str) -> String {
    let part = normalize_entry_name(part);
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None if part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", part),
    }
}

fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/").trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_and_list_entries() {
        let data = build_zip(&[
            ("ppt/presentation.xml", "<p:presentation/>"),
            ("ppt/slides/slide1.xml", "<p:sld/>"),
            ("ppt/slides/slide2.xml", "<p:sld/>"),
        ]);
        let package = Package::from_bytes(&data, ".PPTX").unwrap();

        assert_eq!(package.extension(), "pptx");
        assert_eq!(package.len(), 3);
        assert!(package.open_entry("ppt/presentation.xml").is_some());
        assert!(package.open_entry("/ppt/presentation.xml").is_some());
        assert!(package.open_entry("ppt/missing.xml").is_none());
        assert_eq!(
            package.list_entries("ppt/slides/"),
            vec!["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]
        );
        assert!(package.list_entries("word/").is_empty());
    }

    #[test]
    fn test_not_an_archive() {
        let result = Package::from_bytes(b"definitely not a zip file", "pptx");
        assert!(matches!(result, Err(Error::CorruptContainer(_))));

        let result = Package::from_bytes(&[], "docx");
        assert!(matches!(result, Err(Error::CorruptContainer(_))));
    }

    #[test]
    fn test_missing_part_is_none() {
        let package = Package::from_parts([("word/document.xml", "<w:document/>")], "docx");
        assert!(package.read_xml("word/styles.xml").is_none());
        assert!(package.xml_or_empty("word/styles.xml").is_empty());
        assert!(matches!(
            package.require_xml("word/styles.xml"),
            Err(Error::MissingPart(_))
        ));
    }

    #[test]
    fn test_malformed_part_is_empty_tree() {
        let package = Package::from_parts([("word/document.xml", "<w:document><w:body>")], "docx");
        assert!(package.read_xml("word/document.xml").unwrap().is_empty());
        assert!(matches!(
            package.require_xml("word/document.xml"),
            Err(Error::MalformedMarkup(_))
        ));
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let big = "x".repeat(4096);
        let data = build_zip(&[("ppt/presentation.xml", "<p:presentation/>"), ("ppt/media/blob.bin", &big)]);

        let result = Package::from_bytes_limited(&data, "pptx", 1024);
        match result {
            Err(Error::CorruptContainer(msg)) => assert!(msg.contains("ppt/media/blob.bin")),
            other => panic!("expected CorruptContainer, got {:?}", other),
        }

        let package = Package::from_bytes_limited(&data, "pptx", 4096).unwrap();
        assert_eq!(package.open_entry("ppt/media/blob.bin").map(<[u8]>::len), Some(4096));
    }

    #[test]
    fn test_rels_path() {
        assert_eq!(
            rels_path_for("ppt/slides/slide1.xml"),
            "ppt/slides/_rels/slide1.xml.rels"
        );
        assert_eq!(rels_path_for(""), "_rels/.rels");
    }
}
