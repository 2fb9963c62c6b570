//! Theme part parsing.

use crate::model::{FontScheme, SchemeColor, ThemeData};
use crate::xml::XmlNode;

/// Build [`ThemeData`] from an `a:theme` root. An empty tree yields the
/// default (non-custom) theme.
pub fn parse_theme(root: &XmlNode) -> ThemeData {
    let elements = root.child("a:themeElements");

    let color_scheme = elements
        .and_then(|e| e.child("a:clrScheme"))
        .map(|scheme| {
            scheme
                .children
                .iter()
                .filter_map(|slot| {
                    super::drawing::color_of(slot, None).map(|value| SchemeColor {
                        slot: slot.local_name().to_string(),
                        value,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let font_scheme = elements
        .and_then(|e| e.child("a:fontScheme"))
        .map(|fonts| FontScheme {
            name: fonts.attr("name").unwrap_or_default().to_string(),
            major: latin_typeface(fonts, "a:majorFont"),
            minor: latin_typeface(fonts, "a:minorFont"),
        })
        .unwrap_or_default();

    ThemeData {
        name: root.attr("name").unwrap_or_default().to_string(),
        color_scheme,
        font_scheme,
    }
}

fn latin_typeface(fonts: &XmlNode, which: &str) -> String {
    fonts
        .find(&[which, "a:latin"])
        .and_then(|l| l.attr("typeface"))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Facet">
  <a:themeElements>
    <a:clrScheme name="Facet">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="2C3C43"/></a:dk2>
      <a:lt2><a:srgbClr val="EBEBEB"/></a:lt2>
      <a:accent1><a:srgbClr val="90C226"/></a:accent1>
      <a:accent2><a:srgbClr val="54A021"/></a:accent2>
    </a:clrScheme>
    <a:fontScheme name="Facet">
      <a:majorFont><a:latin typeface="Trebuchet MS"/></a:majorFont>
      <a:minorFont><a:latin typeface="Trebuchet MS"/></a:minorFont>
    </a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_parse_theme() {
        let theme = parse_theme(&XmlNode::parse(THEME));
        assert_eq!(theme.name, "Facet");
        assert!(theme.is_custom());
        assert_eq!(theme.color_scheme.len(), 6);
        assert_eq!(theme.color("tx1"), Some("000000"));
        assert_eq!(theme.accent_colors(), vec!["90C226", "54A021"]);
        assert_eq!(theme.font_scheme.major, "Trebuchet MS");
    }

    #[test]
    fn test_empty_theme() {
        let theme = parse_theme(&XmlNode::default());
        assert!(!theme.is_custom());
        assert!(theme.color_scheme.is_empty());
    }
}
