//! Cascading text-style resolution.
//!
//! A run's effective formatting is looked up attribute by attribute through
//! the chain run → paragraph → shape list style → layout placeholder → master
//! placeholder → master text styles → theme fonts. The first level that sets
//! an attribute wins for that attribute only, so bold may come from the run
//! while the font comes from the theme.

use crate::model::{Placeholder, ThemeData};
use crate::xml::XmlNode;

use super::drawing::solid_fill_of;

/// Size used when no level sets one, in points.
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Font used when neither the chain nor the theme names one.
pub const DEFAULT_FONT: &str = "Calibri";

/// Fully resolved run formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// Font family
    pub font: String,
    /// Size in points
    pub size: f64,
    /// Bold
    pub is_bold: bool,
    /// Italic
    pub is_italic: bool,
    /// Color, if any level sets a solid fill
    pub color: Option<String>,
}

/// Inputs describing one run's position in the markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSource<'n> {
    /// Run properties (`a:rPr`)
    pub run_pr: Option<&'n XmlNode>,
    /// Paragraph properties (`a:pPr`)
    pub para_pr: Option<&'n XmlNode>,
    /// Owning shape (`p:sp`)
    pub shape: Option<&'n XmlNode>,
    /// Placeholder of the owning shape
    pub placeholder: Option<&'n Placeholder>,
    /// Paragraph level (0-based)
    pub level: u8,
}

/// Layout, master and theme of the slide being extracted.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    /// Theme of the master
    pub theme: &'a ThemeData,
    /// `p:sldLayout` root
    pub layout: Option<&'a XmlNode>,
    /// `p:sldMaster` root
    pub master: Option<&'a XmlNode>,
}

impl<'a> StyleContext<'a> {
    /// Create a context.
    pub fn new(theme: &'a ThemeData, layout: Option<&'a XmlNode>, master: Option<&'a XmlNode>) -> Self {
        Self {
            theme,
            layout,
            master,
        }
    }

    /// Matching placeholder shape on the layout.
    pub fn layout_placeholder(&self, ph: &Placeholder) -> Option<&'a XmlNode> {
        self.layout.and_then(|root| find_placeholder(root, ph, true))
    }

    /// Matching placeholder shape on the master.
    pub fn master_placeholder(&self, ph: &Placeholder) -> Option<&'a XmlNode> {
        self.master.and_then(|root| find_placeholder(root, ph, false))
    }

    /// Resolve the effective formatting of a run.
    pub fn resolve(&self, source: RunSource<'_>) -> ResolvedStyle {
        let level_name = format!("a:lvl{}pPr", source.level.min(8) + 1);
        let mut layers: Vec<&XmlNode> = Vec::with_capacity(6);

        if let Some(rpr) = source.run_pr {
            layers.push(rpr);
        }
        if let Some(def) = source.para_pr.and_then(|p| p.child("a:defRPr")) {
            layers.push(def);
        }
        if let Some(def) = source.shape.and_then(|s| list_style_def(s, &level_name)) {
            layers.push(def);
        }
        if let Some(ph) = source.placeholder {
            if let Some(def) = self
                .layout_placeholder(ph)
                .and_then(|s| list_style_def(s, &level_name))
            {
                layers.push(def);
            }
            if let Some(def) = self
                .master_placeholder(ph)
                .and_then(|s| list_style_def(s, &level_name))
            {
                layers.push(def);
            }
        }

        let is_title = source.placeholder.is_some_and(|p| p.is_title());
        let text_style = match source.placeholder {
            Some(p) if p.is_title() => "p:titleStyle",
            Some(_) => "p:bodyStyle",
            None => "p:otherStyle",
        };
        if let Some(def) = self
            .master
            .and_then(|m| m.find(&["p:txStyles", text_style, &level_name, "a:defRPr"]))
        {
            layers.push(def);
        }

        let font = layers
            .iter()
            .find_map(|l| typeface_of(l))
            .map(|t| self.theme_font_ref(t, is_title))
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| self.theme_font(is_title));

        ResolvedStyle {
            font,
            size: layers
                .iter()
                .find_map(|l| l.attr_i64_opt("sz"))
                .map(|sz| sz as f64 / 100.0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            is_bold: layers
                .iter()
                .find_map(|l| l.attr_bool("b"))
                .unwrap_or(false),
            is_italic: layers
                .iter()
                .find_map(|l| l.attr_bool("i"))
                .unwrap_or(false),
            color: layers
                .iter()
                .find_map(|l| solid_fill_of(l, Some(self.theme))),
        }
    }

    /// Theme font for titles (major) or body text (minor).
    fn theme_font(&self, is_title: bool) -> String {
        let scheme = &self.theme.font_scheme;
        let font = if is_title { &scheme.major } else { &scheme.minor };
        if font.is_empty() {
            DEFAULT_FONT.to_string()
        } else {
            font.clone()
        }
    }

    /// Resolve `+mj-lt` / `+mn-lt` theme references.
    fn theme_font_ref(&self, typeface: &str, is_title: bool) -> String {
        if typeface.starts_with("+mj") {
            self.theme_font(true)
        } else if typeface.starts_with("+mn") {
            self.theme_font(false)
        } else if typeface.starts_with('+') {
            self.theme_font(is_title)
        } else {
            typeface.to_string()
        }
    }
}

/// Read the placeholder reference of a shape-like node.
pub fn placeholder_of(shape: &XmlNode) -> Option<Placeholder> {
    let nv = shape
        .child("p:nvSpPr")
        .or_else(|| shape.child("p:nvPicPr"))
        .or_else(|| shape.child("p:nvGraphicFramePr"))?;
    let ph = nv.find(&["p:nvPr", "p:ph"])?;

    Some(Placeholder {
        kind: ph.attr("type").unwrap_or("body").to_string(),
        idx: ph.attr_i64_opt("idx"),
    })
}

/// Type equivalence classes used when matching placeholders up the chain.
fn normalized_kind(kind: &str) -> &str {
    match kind {
        "ctrTitle" | "title" => "title",
        "subTitle" | "obj" | "body" => "body",
        other => other,
    }
}

fn find_placeholder<'a>(root: &'a XmlNode, ph: &Placeholder, match_idx: bool) -> Option<&'a XmlNode> {
    let shapes = root.find_all(&["p:cSld", "p:spTree", "p:sp"]);
    let candidates: Vec<(&XmlNode, Placeholder)> = shapes
        .into_iter()
        .filter_map(|sp| placeholder_of(sp).map(|p| (sp, p)))
        .collect();

    if match_idx {
        if let Some(idx) = ph.idx {
            if let Some((sp, _)) = candidates.iter().find(|(_, p)| p.idx == Some(idx)) {
                return Some(sp);
            }
        }
    }

    let wanted = normalized_kind(&ph.kind);
    candidates
        .iter()
        .find(|(_, p)| normalized_kind(&p.kind) == wanted)
        .map(|(sp, _)| *sp)
}

fn list_style_def<'a>(shape: &'a XmlNode, level_name: &str) -> Option<&'a XmlNode> {
    shape.find(&["p:txBody", "a:lstStyle", level_name, "a:defRPr"])
}

fn typeface_of(props: &XmlNode) -> Option<&str> {
    props
        .child("a:latin")
        .and_then(|l| l.attr("typeface"))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontScheme;

    const MASTER: &str = r#"<p:sldMaster xmlns:a="a" xmlns:p="p">
  <p:cSld><p:spTree>
    <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title Placeholder 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
      <p:txBody><a:lstStyle><a:lvl1pPr><a:defRPr sz="4000" b="1"/></a:lvl1pPr></a:lstStyle></p:txBody></p:sp>
    <p:sp><p:nvSpPr><p:cNvPr id="3" name="Text Placeholder 2"/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
  </p:spTree></p:cSld>
  <p:txStyles>
    <p:titleStyle><a:lvl1pPr><a:defRPr sz="4400"><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>
    <p:bodyStyle>
      <a:lvl1pPr><a:defRPr sz="2800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr>
      <a:lvl2pPr><a:defRPr sz="2400" i="1"/></a:lvl2pPr>
    </p:bodyStyle>
  </p:txStyles>
</p:sldMaster>"#;

    const LAYOUT: &str = r#"<p:sldLayout xmlns:a="a" xmlns:p="p">
  <p:cSld name="Title and Content"><p:spTree>
    <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
      <p:txBody><a:lstStyle><a:lvl1pPr><a:defRPr><a:latin typeface="Georgia"/></a:defRPr></a:lvl1pPr></a:lstStyle></p:txBody></p:sp>
    <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content Placeholder 2"/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr></p:sp>
  </p:spTree></p:cSld>
</p:sldLayout>"#;

    fn theme() -> ThemeData {
        ThemeData {
            name: "Custom".into(),
            color_scheme: vec![crate::model::SchemeColor {
                slot: "dk1".into(),
                value: "111111".into(),
            }],
            font_scheme: FontScheme {
                name: "Custom".into(),
                major: "Montserrat".into(),
                minor: "Open Sans".into(),
            },
        }
    }

    #[test]
    fn test_title_cascade_mixes_levels() {
        let theme = theme();
        let master = XmlNode::parse(MASTER);
        let layout = XmlNode::parse(LAYOUT);
        let ctx = StyleContext::new(&theme, Some(&layout), Some(&master));

        let ph = Placeholder {
            kind: "title".into(),
            idx: None,
        };
        let rpr = XmlNode::parse(r#"<a:rPr i="1"/>"#);
        let style = ctx.resolve(RunSource {
            run_pr: Some(&rpr),
            placeholder: Some(&ph),
            ..Default::default()
        });

        // italic from run, font from layout, size and bold from master placeholder
        assert!(style.is_italic);
        assert_eq!(style.font, "Georgia");
        assert_eq!(style.size, 40.0);
        assert!(style.is_bold);
    }

    #[test]
    fn test_body_cascade_reaches_master_styles_and_theme() {
        let theme = theme();
        let master = XmlNode::parse(MASTER);
        let layout = XmlNode::parse(LAYOUT);
        let ctx = StyleContext::new(&theme, Some(&layout), Some(&master));

        let ph = Placeholder {
            kind: "body".into(),
            idx: Some(1),
        };
        let style = ctx.resolve(RunSource {
            placeholder: Some(&ph),
            ..Default::default()
        });
        assert_eq!(style.size, 28.0);
        assert_eq!(style.font, "Open Sans");
        assert_eq!(style.color.as_deref(), Some("111111"));
        assert!(!style.is_bold);

        let style = ctx.resolve(RunSource {
            placeholder: Some(&ph),
            level: 1,
            ..Default::default()
        });
        assert_eq!(style.size, 24.0);
        assert!(style.is_italic);
    }

    #[test]
    fn test_run_overrides_everything() {
        let theme = theme();
        let master = XmlNode::parse(MASTER);
        let ctx = StyleContext::new(&theme, None, Some(&master));
        let rpr = XmlNode::parse(
            r#"<a:rPr sz="1200" b="0"><a:solidFill><a:srgbClr val="ff0000"/></a:solidFill><a:latin typeface="Arial"/></a:rPr>"#,
        );
        let ph = Placeholder {
            kind: "title".into(),
            idx: None,
        };
        let style = ctx.resolve(RunSource {
            run_pr: Some(&rpr),
            placeholder: Some(&ph),
            ..Default::default()
        });
        assert_eq!(style.size, 12.0);
        assert!(!style.is_bold);
        assert_eq!(style.font, "Arial");
        assert_eq!(style.color.as_deref(), Some("FF0000"));
    }

    #[test]
    fn test_defaults_without_context() {
        let theme = ThemeData::default();
        let ctx = StyleContext::new(&theme, None, None);
        let style = ctx.resolve(RunSource::default());
        assert_eq!(style.font, DEFAULT_FONT);
        assert_eq!(style.size, DEFAULT_FONT_SIZE);
        assert!(!style.is_bold && !style.is_italic);
        assert!(style.color.is_none());
    }

    #[test]
    fn test_placeholder_of() {
        let sp = XmlNode::parse(r#"<p:sp><p:nvSpPr><p:nvPr><p:ph idx="10" type="sldNum"/></p:nvPr></p:nvSpPr></p:sp>"#);
        let ph = placeholder_of(&sp).unwrap();
        assert_eq!(ph.kind, "sldNum");
        assert_eq!(ph.idx, Some(10));
        assert!(ph.is_header_footer());

        let sp = XmlNode::parse(r#"<p:sp><p:nvSpPr><p:nvPr/></p:nvSpPr></p:sp>"#);
        assert!(placeholder_of(&sp).is_none());
    }
}
