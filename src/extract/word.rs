//! Word-processing feature aggregation.

use std::collections::{BTreeSet, HashMap};

use crate::detect::DOCUMENT_PART;
use crate::error::Result;
use crate::model::{
    ColumnsInfo, DropCapInfo, EquationInfo, PictureInfo, SmartArtInfo, StructureInfo,
    StyleSummary, TabStopInfo, TableSummary, TocInfo, WordArtInfo, WordFeatures,
    WordHeaderFooter,
};
use crate::package::{Package, Relationships};
use crate::xml::XmlNode;

use super::options::{ErrorMode, ExtractOptions};
use super::shapes::load_smart_art;

const STYLES_PART: &str = "word/styles.xml";

const URI_PICTURE: &str = "drawingml/2006/picture";
const URI_DIAGRAM: &str = "drawingml/2006/diagram";

const TOC_GALLERY: &str = "Table of Contents";
const PAGE_NUMBER_GALLERY: &str = "Page Numbers";

/// Run-level text effects that turn a text box into WordArt.
const TEXT_EFFECTS: &[&str] = &["w14:textOutline", "w14:textFill", "w14:glow", "w14:reflection", "w14:shadow"];

/// Deepest heading level recognized.
const MAX_HEADING_LEVEL: u8 = 9;

/// A style definition from `word/styles.xml`.
#[derive(Debug, Clone, Default)]
struct StyleDef {
    name: String,
    heading_level: Option<u8>,
    toc_level: Option<u8>,
    custom: bool,
}

/// Style definitions keyed by style id.
#[derive(Debug, Default)]
struct StyleSheet {
    styles: HashMap<String, StyleDef>,
    order: Vec<String>,
    fonts: Vec<String>,
}

impl StyleSheet {
    fn parse(root: &XmlNode) -> Self {
        let mut sheet = Self::default();

        for node in root.descendants_named("w:rFonts") {
            push_font(&mut sheet.fonts, node);
        }

        for style in root.children_named("w:style") {
            let Some(id) = style.attr("w:styleId") else {
                continue;
            };
            let name = style
                .child("w:name")
                .and_then(|n| n.attr("w:val"))
                .unwrap_or(id)
                .to_string();
            let outline = style
                .find(&["w:pPr", "w:outlineLvl"])
                .and_then(|n| n.attr_i64_opt("w:val"));

            let def = StyleDef {
                heading_level: numbered_style(&name, "heading")
                    .or_else(|| numbered_style(id, "heading"))
                    .or_else(|| outline_level(outline)),
                toc_level: numbered_style(&name, "toc").or_else(|| numbered_style(id, "toc")),
                custom: style.attr_bool("w:customStyle").unwrap_or(false),
                name,
            };
            sheet.order.push(id.to_string());
            sheet.styles.insert(id.to_string(), def);
        }

        sheet
    }

    fn get(&self, id: &str) -> Option<&StyleDef> {
        self.styles.get(id)
    }
}

/// Level `N` of a style named `<prefix> N` or `<prefix>N`, case-insensitive.
fn numbered_style(name: &str, prefix: &str) -> Option<u8> {
    let lower = name.to_ascii_lowercase();
    let level: u8 = lower.strip_prefix(prefix)?.trim().parse().ok()?;
    (1..=MAX_HEADING_LEVEL).contains(&level).then_some(level)
}

/// Heading level from a zero-based `w:outlineLvl`; 9 means body text.
fn outline_level(value: Option<i64>) -> Option<u8> {
    value
        .filter(|v| (0..i64::from(MAX_HEADING_LEVEL)).contains(v))
        .map(|v| v as u8 + 1)
}

fn push_font(fonts: &mut Vec<String>, r_fonts: &XmlNode) {
    if let Some(font) = r_fonts
        .attr("w:ascii")
        .or_else(|| r_fonts.attr("w:hAnsi"))
        .filter(|f| !f.is_empty())
    {
        if !fonts.iter().any(|f| f == font) {
            fonts.push(font.to_string());
        }
    }
}

/// Pre-order walk that skips `mc:Fallback` branches, so content duplicated
/// for older readers is counted once.
fn content_nodes(root: &XmlNode) -> Vec<&XmlNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&XmlNode> = root.children.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.name == "mc:Fallback" {
            continue;
        }
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}

fn field_starts_with(nodes: &[&XmlNode], code: &str) -> bool {
    nodes.iter().any(|n| match n.name.as_str() {
        "w:instrText" => n.text.trim().to_ascii_uppercase().starts_with(code),
        "w:fldSimple" => n
            .attr("w:instr")
            .is_some_and(|i| i.trim().to_ascii_uppercase().starts_with(code)),
        _ => false,
    })
}

fn has_gallery(nodes: &[&XmlNode], gallery: &str) -> bool {
    nodes.iter().any(|n| {
        n.name == "w:docPartGallery" && n.attr("w:val").is_some_and(|v| v.starts_with(gallery))
    })
}

fn paragraph_text(p: &XmlNode) -> String {
    p.descendants_named("w:t").map(|t| t.text.as_str()).collect()
}

fn paragraph_style(p: &XmlNode) -> Option<&str> {
    p.find(&["w:pPr", "w:pStyle"]).and_then(|s| s.attr("w:val"))
}

/// Extract the full feature set of a word-processing package.
pub fn extract_word(package: &Package, options: &ExtractOptions) -> Result<WordFeatures> {
    let root = match options.error_mode {
        ErrorMode::Strict => package.require_xml(DOCUMENT_PART)?,
        ErrorMode::Lenient => package.xml_or_empty(DOCUMENT_PART),
    };
    let styles = StyleSheet::parse(&package.xml_or_empty(STYLES_PART));
    let rels = package.relationships(DOCUMENT_PART);

    let empty = XmlNode::default();
    let body = root.child("w:body").unwrap_or(&empty);
    let nodes = content_nodes(body);
    let paragraphs: Vec<&XmlNode> = nodes.iter().copied().filter(|n| n.name == "w:p").collect();

    let features = WordFeatures {
        structure: structure_of(&nodes, &paragraphs, &styles),
        toc: toc_of(&nodes, &paragraphs, &styles),
        header_footer: header_footer_of(package, &rels),
        columns: columns_of(&nodes),
        drop_cap: drop_cap_of(&nodes),
        pictures: pictures_of(&nodes),
        word_art: word_art_of(&nodes),
        tables: tables_of(&nodes),
        equations: EquationInfo {
            count: nodes.iter().filter(|n| n.name == "m:oMath").count(),
        },
        tab_stops: tab_stops_of(&nodes),
        smart_art: if options.extract_smart_art {
            smart_art_of(&nodes, package, &rels)
        } else {
            SmartArtInfo::default()
        },
        styles: style_summary_of(&nodes, &paragraphs, &styles),
    };

    log::debug!(
        "Word document: {} paragraphs, {} headings, {} tables",
        features.structure.paragraph_count,
        features.structure.heading_count,
        features.tables.count
    );
    Ok(features)
}

fn heading_level_of(p: &XmlNode, styles: &StyleSheet) -> Option<u8> {
    paragraph_style(p)
        .and_then(|id| styles.get(id))
        .and_then(|s| s.heading_level)
        .or_else(|| outline_level(p.find(&["w:pPr", "w:outlineLvl"]).and_then(|n| n.attr_i64_opt("w:val"))))
}

fn structure_of(nodes: &[&XmlNode], paragraphs: &[&XmlNode], styles: &StyleSheet) -> StructureInfo {
    let mut info = StructureInfo::default();

    for p in paragraphs {
        let text = paragraph_text(p);
        if text.trim().is_empty() {
            continue;
        }
        info.paragraph_count += 1;
        info.word_count += text.split_whitespace().count();

        if let Some(level) = heading_level_of(p, styles) {
            info.heading_count += 1;
            *info.headings_by_level.entry(level).or_default() += 1;
        }
    }

    info.section_count = nodes.iter().filter(|n| n.name == "w:sectPr").count();
    info.page_break_count = nodes
        .iter()
        .filter(|n| {
            (n.name == "w:br" && n.attr("w:type") == Some("page"))
                || (n.name == "w:pageBreakBefore" && n.attr_bool("w:val").unwrap_or(true))
        })
        .count();

    info
}

fn toc_of(nodes: &[&XmlNode], paragraphs: &[&XmlNode], styles: &StyleSheet) -> TocInfo {
    let automatic = field_starts_with(nodes, "TOC") || has_gallery(nodes, TOC_GALLERY);

    let levels: Vec<u8> = paragraphs
        .iter()
        .filter(|p| !paragraph_text(p).trim().is_empty())
        .filter_map(|p| paragraph_style(p).and_then(|id| styles.get(id)).and_then(|s| s.toc_level))
        .collect();

    let entry_count = if levels.is_empty() {
        nodes
            .iter()
            .filter(|n| {
                n.name == "w:hyperlink" && n.attr("w:anchor").is_some_and(|a| a.starts_with("_Toc"))
            })
            .count()
    } else {
        levels.len()
    };

    TocInfo {
        present: automatic || entry_count > 0,
        automatic,
        entry_count,
        max_level: levels.iter().copied().max().unwrap_or(if entry_count > 0 { 1 } else { 0 }),
    }
}

fn header_footer_of(package: &Package, rels: &Relationships) -> WordHeaderFooter {
    let mut info = WordHeaderFooter::default();

    for (kind, is_header) in [("header", true), ("footer", false)] {
        for rel in rels.all_of_type(kind) {
            let Some(part) = package.read_xml(&rel.target) else {
                log::debug!("{} part {} not found", kind, rel.target);
                continue;
            };
            let nodes = content_nodes(&part);
            let text: String = nodes
                .iter()
                .filter(|n| n.name == "w:t")
                .map(|n| n.text.as_str())
                .collect::<Vec<_>>()
                .join("");
            let text = text.trim();
            let page_number = field_starts_with(&nodes, "PAGE") || has_gallery(&nodes, PAGE_NUMBER_GALLERY);
            let has_content = !text.is_empty() || page_number;

            info.has_page_number |= page_number;
            let (flag, joined) = if is_header {
                (&mut info.has_header, &mut info.header_text)
            } else {
                (&mut info.has_footer, &mut info.footer_text)
            };
            *flag |= has_content;
            if !text.is_empty() {
                if !joined.is_empty() {
                    joined.push('\n');
                }
                joined.push_str(text);
            }
        }
    }

    info
}

fn columns_of(nodes: &[&XmlNode]) -> ColumnsInfo {
    let mut info = ColumnsInfo::default();
    for sect in nodes.iter().filter(|n| n.name == "w:sectPr") {
        let cols = sect.child("w:cols");
        let num = cols
            .and_then(|c| c.attr_i64_opt("w:num"))
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1)
            .max(1);
        info.max_columns = info.max_columns.max(num);
        if num >= 2 {
            info.sections_with_columns += 1;
            info.has_separator |= cols.and_then(|c| c.attr_bool("w:sep")).unwrap_or(false);
        }
    }
    info
}

fn drop_cap_of(nodes: &[&XmlNode]) -> DropCapInfo {
    let mut info = DropCapInfo::default();
    for frame in nodes.iter().filter(|n| n.name == "w:framePr") {
        let Some(mode) = frame.attr("w:dropCap").filter(|m| *m != "none") else {
            continue;
        };
        info.count += 1;
        if !info.modes.iter().any(|m| m == mode) {
            info.modes.push(mode.to_string());
        }
    }
    info
}

fn graphic_uri(drawing: &XmlNode) -> Option<&str> {
    drawing
        .find(&["a:graphic", "a:graphicData"])
        .and_then(|g| g.attr("uri"))
}

fn pictures_of(nodes: &[&XmlNode]) -> PictureInfo {
    let mut info = PictureInfo::default();
    for node in nodes {
        match node.name.as_str() {
            "wp:inline" if graphic_uri(node).is_some_and(|u| u.ends_with(URI_PICTURE)) => info.inline += 1,
            "wp:anchor" if graphic_uri(node).is_some_and(|u| u.ends_with(URI_PICTURE)) => info.floating += 1,
            "v:imagedata" => info.inline += 1,
            _ => {}
        }
    }
    info.count = info.inline + info.floating;
    info
}

fn word_art_of(nodes: &[&XmlNode]) -> WordArtInfo {
    let count = nodes
        .iter()
        .filter(|n| match n.name.as_str() {
            "wps:wsp" => {
                let warp = n
                    .find(&["wps:bodyPr", "a:prstTxWarp"])
                    .and_then(|w| w.attr("prst"))
                    .is_some_and(|p| p != "textNoShape");
                warp || n
                    .descendants()
                    .any(|d| TEXT_EFFECTS.contains(&d.name.as_str()))
            }
            "v:shape" => n.child("v:textpath").is_some(),
            _ => false,
        })
        .count();
    WordArtInfo { count }
}

fn tables_of(nodes: &[&XmlNode]) -> TableSummary {
    let mut info = TableSummary::default();
    for tbl in nodes.iter().filter(|n| n.name == "w:tbl") {
        info.count += 1;
        let rows: Vec<&XmlNode> = tbl.children_named("w:tr").collect();
        let grid = tbl.find_all(&["w:tblGrid", "w:gridCol"]).len();
        let widest = rows
            .iter()
            .map(|r| r.children_named("w:tc").count())
            .max()
            .unwrap_or(0);

        info.max_rows = info.max_rows.max(rows.len());
        info.max_columns = info.max_columns.max(grid.max(widest));
        info.has_header_row |= rows
            .iter()
            .any(|r| r.find(&["w:trPr", "w:tblHeader"]).is_some());
    }
    info
}

fn tab_stops_of(nodes: &[&XmlNode]) -> TabStopInfo {
    let mut info = TabStopInfo::default();
    for tab in nodes
        .iter()
        .filter(|n| n.name == "w:tabs")
        .flat_map(|tabs| tabs.children_named("w:tab"))
    {
        let alignment = tab.attr("w:val").unwrap_or("left");
        if alignment == "clear" {
            continue;
        }
        info.count += 1;
        if tab.attr("w:leader").is_some_and(|l| l != "none") {
            info.with_leader += 1;
        }
        if !info.alignments.iter().any(|a| a == alignment) {
            info.alignments.push(alignment.to_string());
        }
    }
    info
}

fn smart_art_of(nodes: &[&XmlNode], package: &Package, rels: &Relationships) -> SmartArtInfo {
    let mut info = SmartArtInfo::default();
    for data in nodes.iter().filter(|n| {
        n.name == "a:graphicData" && n.attr("uri").is_some_and(|u| u.ends_with(URI_DIAGRAM))
    }) {
        let Some(ids) = data.child("dgm:relIds") else {
            continue;
        };
        let art = load_smart_art(ids, package, rels);
        info.count += 1;
        info.node_count += art.node_count();
        info.max_depth = info.max_depth.max(art.depth());
    }
    info
}

fn style_summary_of(nodes: &[&XmlNode], paragraphs: &[&XmlNode], styles: &StyleSheet) -> StyleSummary {
    let mut used_levels: BTreeSet<u8> = BTreeSet::new();
    for p in paragraphs {
        if let Some(level) = paragraph_style(p)
            .and_then(|id| styles.get(id))
            .and_then(|s| s.heading_level)
        {
            used_levels.insert(level);
        }
    }

    let mut fonts = styles.fonts.clone();
    for node in nodes.iter().filter(|n| n.name == "w:rFonts") {
        push_font(&mut fonts, node);
    }

    StyleSummary {
        custom_styles: styles
            .order
            .iter()
            .filter_map(|id| styles.get(id))
            .filter(|s| s.custom)
            .map(|s| s.name.clone())
            .collect(),
        heading_styles_used: used_levels.into_iter().collect(),
        fonts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<w:styles xmlns:w="w">
      <w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/></w:rPr></w:rPrDefault></w:docDefaults>
      <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:pPr><w:outlineLvl w:val="0"/></w:pPr></w:style>
      <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
      <w:style w:type="paragraph" w:styleId="TOC1"><w:name w:val="toc 1"/></w:style>
      <w:style w:type="paragraph" w:styleId="TOC2"><w:name w:val="toc 2"/></w:style>
      <w:style w:type="paragraph" w:customStyle="1" w:styleId="Callout"><w:name w:val="Callout"/><w:rPr><w:rFonts w:ascii="Georgia"/></w:rPr></w:style>
    </w:styles>"#;

    fn para(style: Option<&str>, text: &str) -> String {
        let ppr = style
            .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
            .unwrap_or_default();
        format!(r#"<w:p>{}<w:r><w:t>{}</w:t></w:r></w:p>"#, ppr, text)
    }

    fn document(body: &str) -> String {
        format!(
            r#"<w:document xmlns:w="w" xmlns:wp="wp" xmlns:a="a" xmlns:m="m" xmlns:mc="mc" xmlns:wps="wps" xmlns:v="v"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn package(body: &str, extra: &[(&str, &str)]) -> Package {
        let mut parts = vec![
            ("word/document.xml".to_string(), document(body)),
            ("word/styles.xml".to_string(), STYLES.to_string()),
        ];
        parts.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        Package::from_parts(parts, "docx")
    }

    fn sect(cols: &str) -> String {
        format!(r#"<w:sectPr>{}</w:sectPr>"#, cols)
    }

    #[test]
    fn test_structure_and_toc() {
        let body = [
            r#"<w:sdt><w:sdtPr><w:docPartObj><w:docPartGallery w:val="Table of Contents"/></w:docPartObj></w:sdtPr><w:sdtContent>"#.to_string(),
            para(Some("TOC1"), "Intro"),
            para(Some("TOC2"), "Background"),
            para(Some("TOC1"), "Results"),
            "</w:sdtContent></w:sdt>".to_string(),
            para(Some("Heading1"), "Intro"),
            para(None, "Some body text here"),
            para(Some("Heading2"), "Background"),
            r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#.to_string(),
            para(Some("Heading1"), "Results"),
            sect(""),
        ]
        .concat();

        let features = extract_word(&package(&body, &[]), &ExtractOptions::default()).unwrap();
        let s = &features.structure;
        assert_eq!(s.heading_count, 3);
        assert_eq!(s.heading_levels(), 2);
        assert_eq!(s.section_count, 1);
        assert_eq!(s.page_break_count, 1);
        assert_eq!(s.paragraph_count, 7);

        let toc = &features.toc;
        assert!(toc.present && toc.automatic);
        assert_eq!(toc.entry_count, 3);
        assert_eq!(toc.max_level, 2);

        assert_eq!(features.styles.heading_styles_used, vec![1, 2]);
        assert_eq!(features.styles.custom_styles, vec!["Callout"]);
        assert!(features.styles.fonts.contains(&"Georgia".to_string()));
    }

    #[test]
    fn test_manual_toc() {
        let body = [para(Some("TOC1"), "One"), para(Some("TOC1"), "Two")].concat();
        let toc = extract_word(&package(&body, &[]), &ExtractOptions::default())
            .unwrap()
            .toc;
        assert!(toc.present);
        assert!(!toc.automatic);
        assert_eq!(toc.entry_count, 2);
    }

    #[test]
    fn test_layout_features() {
        let body = [
            r#"<w:p><w:pPr><w:framePr w:dropCap="drop" w:lines="3"/></w:pPr><w:r><w:t>O</w:t></w:r></w:p>"#.to_string(),
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="right" w:leader="dot" w:pos="9000"/><w:tab w:val="clear" w:pos="720"/><w:tab w:val="center" w:pos="4500"/></w:tabs></w:pPr></w:p>"#.to_string(),
            r#"<w:p><m:oMathPara><m:oMath><m:r><m:t>x</m:t></m:r></m:oMath></m:oMathPara></w:p>"#.to_string(),
            r#"<w:tbl><w:tblGrid><w:gridCol/><w:gridCol/><w:gridCol/></w:tblGrid>
                <w:tr><w:trPr><w:tblHeader/></w:trPr><w:tc/><w:tc/><w:tc/></w:tr><w:tr><w:tc/><w:tc/><w:tc/></w:tr></w:tbl>"#.to_string(),
            r#"<w:p><w:r><w:drawing><wp:inline><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"/></a:graphic></wp:inline></w:drawing></w:r></w:p>"#.to_string(),
            r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wp:anchor><a:graphic><a:graphicData uri="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"><wps:wsp><wps:bodyPr><a:prstTxWarp prst="textWave1"/></wps:bodyPr></wps:wsp></a:graphicData></a:graphic></wp:anchor></w:drawing></mc:Choice>
                <mc:Fallback><w:pict><v:shape><v:textpath string="Wave"/></v:shape></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#.to_string(),
            sect(r#"<w:cols w:num="2" w:sep="1"/>"#),
        ]
        .concat();

        let f = extract_word(&package(&body, &[]), &ExtractOptions::default()).unwrap();
        assert!(f.drop_cap.present());
        assert_eq!(f.drop_cap.modes, vec!["drop"]);
        assert_eq!(f.tab_stops.count, 2);
        assert_eq!(f.tab_stops.with_leader, 1);
        assert_eq!(f.equations.count, 1);
        assert_eq!(f.tables.count, 1);
        assert_eq!((f.tables.max_rows, f.tables.max_columns), (2, 3));
        assert!(f.tables.has_header_row);
        assert_eq!(f.pictures.inline, 1);
        // the anchor holds a text shape, not a picture
        assert_eq!(f.pictures.floating, 0);
        // fallback VML copy is not counted twice
        assert_eq!(f.word_art.count, 1);
        assert_eq!(f.columns.max_columns, 2);
        assert!(f.columns.has_separator);
    }

    #[test]
    fn test_header_footer_parts() {
        let rels = r#"<Relationships>
            <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
            <Relationship Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
        </Relationships>"#;
        let header = r#"<w:hdr xmlns:w="w"><w:p><w:r><w:t>Annual Report</w:t></w:r></w:p></w:hdr>"#;
        let footer = r#"<w:ftr xmlns:w="w"><w:p><w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText xml:space="preserve"> PAGE   \* MERGEFORMAT </w:instrText></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r></w:p></w:ftr>"#;
        let pkg = package(
            &para(None, "Body"),
            &[
                ("word/_rels/document.xml.rels", rels),
                ("word/header1.xml", header),
                ("word/footer1.xml", footer),
            ],
        );

        let hf = extract_word(&pkg, &ExtractOptions::default()).unwrap().header_footer;
        assert!(hf.has_header);
        assert_eq!(hf.header_text, "Annual Report");
        assert!(hf.has_footer);
        assert!(hf.has_page_number);
    }

    #[test]
    fn test_missing_document_part() {
        let pkg = Package::from_parts([("word/styles.xml", STYLES)], "docx");
        assert!(extract_word(&pkg, &ExtractOptions::new().strict()).is_err());
        let f = extract_word(&pkg, &ExtractOptions::default()).unwrap();
        assert_eq!(f.structure.paragraph_count, 0);
    }

    #[test]
    fn test_numbered_style() {
        assert_eq!(numbered_style("heading 2", "heading"), Some(2));
        assert_eq!(numbered_style("Heading3", "heading"), Some(3));
        assert_eq!(numbered_style("Heading", "heading"), None);
        assert_eq!(numbered_style("toc 10", "toc"), None);
        assert_eq!(outline_level(Some(9)), None);
        assert_eq!(outline_level(Some(0)), Some(1));
    }
}
