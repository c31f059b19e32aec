//! Bridge to host-native named color lists.
//!
//! Hosts that keep colors in a flat name -> color table (system color
//! pickers, swatch panels) implement [`ColorListAdapter`] for their own list
//! type and go through [`NamedColorList`], which owns the mapping rules.

use crate::{Color, Palette};

/// Platform-neutral named color list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedColorList {
    /// List name, if the host has one.
    pub name: Option<String>,
    /// `(key, color)` entries in order.
    pub entries: Vec<(String, Color)>,
}

impl NamedColorList {
    /// Creates a list.
    pub fn new(name: Option<String>, entries: Vec<(String, Color)>) -> Self {
        Self { name, entries }
    }

    /// Every entry becomes a global color named after its key.
    pub fn to_palette(&self) -> Palette {
        let colors = self
            .entries
            .iter()
            .map(|(key, color)| color.clone().with_name(key.clone()))
            .collect();
        Palette::new(self.name.clone().unwrap_or_default(), colors)
    }

    /// Flattens a palette, keying entries `groupIndex:groupName:colorIndex:colorName`.
    ///
    /// Group 0 is the synthetic global group, so keys never collide even
    /// when names repeat across groups.
    pub fn from_palette(palette: &Palette) -> Self {
        let entries = palette
            .all_groups()
            .iter()
            .enumerate()
            .flat_map(|(gi, group)| {
                group.colors.iter().enumerate().map(move |(ci, color)| {
                    (format!("{gi}:{}:{ci}:{}", group.name, color.name()), color.clone())
                })
            })
            .collect();
        let name = (!palette.name.is_empty()).then(|| palette.name.clone());
        Self { name, entries }
    }
}

/// Host-specific glue between a native color list and [`NamedColorList`].
pub trait ColorListAdapter {
    /// The host list type.
    type Native;

    /// Reads a native list.
    fn to_named_list(&self, native: &Self::Native) -> NamedColorList;

    /// Builds a native list.
    fn from_named_list(&self, list: &NamedColorList) -> Self::Native;

    /// Native list -> palette of global colors.
    fn palette_from_native(&self, native: &Self::Native) -> Palette {
        self.to_named_list(native).to_palette()
    }

    /// Palette -> native list with composite keys.
    fn native_from_palette(&self, palette: &Palette) -> Self::Native {
        self.from_named_list(&NamedColorList::from_palette(palette))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    /// Stands in for a host table: plain `(name, hex)` pairs.
    struct HexTable;

    impl ColorListAdapter for HexTable {
        type Native = Vec<(String, String)>;

        fn to_named_list(&self, native: &Self::Native) -> NamedColorList {
            let entries = native
                .iter()
                .filter_map(|(k, hex)| Color::from_hex(hex).ok().map(|c| (k.clone(), c)))
                .collect();
            NamedColorList::new(Some("host".into()), entries)
        }

        fn from_named_list(&self, list: &NamedColorList) -> Self::Native {
            list.entries
                .iter()
                .filter_map(|(k, c)| c.hex_rgb(true).ok().map(|h| (k.clone(), h)))
                .collect()
        }
    }

    #[test]
    fn test_from_palette_keys() {
        let palette = Palette::new("p", vec![Color::gray(0.0).with_name("black")])
            .with_group(Group::new("g", vec![Color::gray(1.0).with_name("white"), Color::gray(0.5)]));
        let list = NamedColorList::from_palette(&palette);
        let keys: Vec<&str> = list.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["0:global:0:black", "1:g:0:white", "1:g:1:"]);
        assert_eq!(list.name.as_deref(), Some("p"));
    }

    #[test]
    fn test_to_palette() {
        let list = NamedColorList::new(None, vec![("red".into(), Color::rgb(1.0, 0.0, 0.0))]);
        let palette = list.to_palette();
        assert_eq!(palette.name, "");
        assert!(palette.groups.is_empty());
        assert_eq!(palette.colors[0].name(), "red");
    }

    #[test]
    fn test_adapter_roundtrip() {
        let native = vec![("a".to_string(), "#ff0000".to_string()), ("bad".into(), "zz".into())];
        let palette = HexTable.palette_from_native(&native);
        assert_eq!(palette.colors.len(), 1);
        assert_eq!(palette.name, "host");

        let back = HexTable.native_from_palette(&palette);
        assert_eq!(back, vec![("0:global:0:a".to_string(), "#ff0000".to_string())]);
    }
}
