//! Theme data.

use serde::{Deserialize, Serialize};

/// Theme names shipped with the authoring applications.
pub const DEFAULT_THEME_NAMES: &[&str] = &[
    "",
    "Office Theme",
    "Office",
    "Default Theme",
    "Default Design",
    "Blank",
];

/// Theme of a document (`a:theme`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeData {
    /// Theme name (`a:theme@name`)
    pub name: String,

    /// Scheme colors in markup order (`dk1`, `lt1`, `dk2`, `lt2`, `accent1`..)
    pub color_scheme: Vec<SchemeColor>,

    /// Major/minor fonts
    pub font_scheme: FontScheme,
}

impl ThemeData {
    /// A theme is custom when its name is not one of the default names.
    pub fn is_custom(&self) -> bool {
        let name = self.name.trim();
        !DEFAULT_THEME_NAMES
            .iter()
            .any(|d| d.eq_ignore_ascii_case(name))
    }

    /// Color value of a scheme slot (`accent1`, `tx1` aliases `dk1`).
    pub fn color(&self, slot: &str) -> Option<&str> {
        let slot = match slot {
            "tx1" => "dk1",
            "bg1" => "lt1",
            "tx2" => "dk2",
            "bg2" => "lt2",
            other => other,
        };
        self.color_scheme
            .iter()
            .find(|c| c.slot == slot)
            .map(|c| c.value.as_str())
    }

    /// Accent colors (`accent1`..`accent6`).
    pub fn accent_colors(&self) -> Vec<&str> {
        self.color_scheme
            .iter()
            .filter(|c| c.slot.starts_with("accent"))
            .map(|c| c.value.as_str())
            .collect()
    }
}

/// A named color slot of the color scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeColor {
    /// Slot name (`accent1`)
    pub slot: String,
    /// Hex value (`4472C4`)
    pub value: String,
}

/// Theme fonts (`a:fontScheme`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontScheme {
    /// Scheme name
    pub name: String,
    /// Heading font (`a:majorFont/a:latin`)
    pub major: String,
    /// Body font (`a:minorFont/a:latin`)
    pub minor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_custom() {
        let mut theme = ThemeData {
            name: "Office Theme".into(),
            ..Default::default()
        };
        assert!(!theme.is_custom());

        theme.name = "office theme".into();
        assert!(!theme.is_custom());

        theme.name = "Ion Boardroom".into();
        assert!(theme.is_custom());

        assert!(!ThemeData::default().is_custom());
    }

    #[test]
    fn test_color_aliases() {
        let theme = ThemeData {
            color_scheme: vec![
                SchemeColor {
                    slot: "dk1".into(),
                    value: "000000".into(),
                },
                SchemeColor {
                    slot: "accent1".into(),
                    value: "4472C4".into(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(theme.color("tx1"), Some("000000"));
        assert_eq!(theme.color("accent1"), Some("4472C4"));
        assert_eq!(theme.accent_colors(), vec!["4472C4"]);
    }
}
