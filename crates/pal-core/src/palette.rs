//! Palettes and color groups.

use crate::{Color, ColorSpace, Result};

/// Name of the synthetic group holding a palette's ungrouped colors.
pub const GLOBAL_GROUP_NAME: &str = "global";

/// A named bucket of colors. Groups do not nest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Group name.
    pub name: String,
    /// Colors in order.
    pub colors: Vec<Color>,
}

impl Group {
    /// Creates a group.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }
}

/// A color palette: global colors plus named groups.
///
/// # Example
///
/// ```rust
/// use pal_core::{Color, Group, Palette};
///
/// let palette = Palette::new("demo", vec![Color::rgb255(255, 0, 0)])
///     .with_group(Group::new("greys", vec![Color::gray(0.25), Color::gray(0.75)]));
///
/// assert_eq!(palette.all_groups()[0].name, "global");
/// assert_eq!(palette.all_colors().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    /// Palette name (may be empty).
    pub name: String,
    /// Colors not assigned to any group.
    pub colors: Vec<Color>,
    /// Named groups.
    pub groups: Vec<Group>,
}

impl Palette {
    /// Creates a palette with global colors and no groups.
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Self {
        Self {
            name: name.into(),
            colors,
            groups: Vec::new(),
        }
    }

    /// Returns the palette with an extra group appended.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// A palette of `count` colors blended from `first` to `last`.
    pub fn interpolated(
        name: impl Into<String>,
        first: &Color,
        last: &Color,
        count: usize,
    ) -> Result<Self> {
        Ok(Self::new(name, Color::interpolate(first, last, count)?))
    }

    /// Global colors as a synthetic `"global"` group followed by all groups.
    ///
    /// Recomputed on every call; the palette never stores it.
    pub fn all_groups(&self) -> Vec<Group> {
        std::iter::once(Group::new(GLOBAL_GROUP_NAME, self.colors.clone()))
            .chain(self.groups.iter().cloned())
            .collect()
    }

    /// Every color, global first then group by group. Group boundaries are lost.
    pub fn all_colors(&self) -> Vec<Color> {
        self.colors
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.colors.iter()))
            .cloned()
            .collect()
    }

    /// Total number of colors across global colors and groups.
    pub fn color_count(&self) -> usize {
        self.colors.len() + self.groups.iter().map(|g| g.colors.len()).sum::<usize>()
    }

    /// Copy of this palette with every color converted to `colorspace`.
    ///
    /// Fails on the first color that cannot be converted.
    pub fn converted(&self, colorspace: ColorSpace) -> Result<Palette> {
        let convert = |colors: &[Color]| -> Result<Vec<Color>> {
            colors.iter().map(|c| c.convert(colorspace)).collect()
        };
        let groups = self
            .groups
            .iter()
            .map(|g| Ok(Group::new(g.name.clone(), convert(&g.colors)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Palette {
            name: self.name.clone(),
            colors: convert(&self.colors)?,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Palette {
        Palette::new("p", vec![Color::rgb(1.0, 0.0, 0.0)])
            .with_group(Group::new("a", vec![Color::gray(0.5)]))
            .with_group(Group::new("b", vec![Color::cmyk(0.0, 0.0, 0.0, 1.0), Color::gray(0.1)]))
    }

    #[test]
    fn test_all_groups() {
        let p = sample();
        let groups = p.all_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, GLOBAL_GROUP_NAME);
        assert_eq!(groups[0].colors.len(), 1);
        assert_eq!(groups[2].name, "b");
        // not stored
        assert_eq!(p.groups.len(), 2);
    }

    #[test]
    fn test_all_colors() {
        let p = sample();
        let all = p.all_colors();
        assert_eq!(all.len(), 4);
        assert_eq!(p.color_count(), 4);
        assert_eq!(all[1], Color::gray(0.5));
    }

    #[test]
    fn test_converted() {
        let p = sample().converted(ColorSpace::Rgb).unwrap();
        assert!(p.all_colors().iter().all(|c| c.colorspace() == ColorSpace::Rgb));
        assert_eq!(p.groups[1].name, "b");

        let with_lab = Palette::new("", vec![Color::lab(1.0, 0.0, 0.0)]);
        assert!(with_lab.converted(ColorSpace::Rgb).is_err());
    }

    #[test]
    fn test_interpolated() {
        let p = Palette::interpolated("ramp", &Color::gray(0.0), &Color::gray(1.0), 3).unwrap();
        assert_eq!(p.name, "ramp");
        assert_eq!(p.colors.len(), 3);
    }
}
