//! Gradient data model: color stops, optional transparency stops, sampling.
//!
//! Rendering is out of scope; this module only owns the stop data and the
//! math to sort, normalize, sample and flatten it.
//!
//! # Example
//!
//! ```rust
//! use pal_core::{Color, Gradient};
//!
//! let g = Gradient::from_colors_and_positions(
//!     vec![Color::gray(1.0), Color::gray(0.0)],
//!     &[100.0, 0.0],
//! );
//! let n = g.normalized().unwrap();
//! assert_eq!(n.stops[0].position, 0.0);
//! assert_eq!(n.stops[0].color, Color::gray(0.0));
//! assert_eq!(n.stops[1].position, 1.0);
//! ```

use crate::{Color, Error, Palette, Result};

/// A color at a position along a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Position, `[0, 1]` once normalized.
    pub position: f64,
    /// Stop color.
    pub color: Color,
}

impl Stop {
    /// Creates a stop.
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// An opacity value at a position, for formats that keep alpha separate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransparencyStop {
    /// Position, `[0, 1]` once normalized.
    pub position: f64,
    /// Opacity in `[0, 1]`.
    pub value: f64,
}

impl TransparencyStop {
    /// Creates a transparency stop.
    pub fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

/// A color ramp.
///
/// `name` and `transparency_stops` are presence-tagged: `None` and
/// `Some(vec![])` are different values and survive a round trip as such.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    /// Optional gradient name.
    pub name: Option<String>,
    /// Color stops, in file order.
    pub stops: Vec<Stop>,
    /// Separate opacity ramp, if the source format has one.
    pub transparency_stops: Option<Vec<TransparencyStop>>,
}

impl Gradient {
    /// Creates an unnamed gradient from stops.
    pub fn new(stops: Vec<Stop>) -> Self {
        Self {
            name: None,
            stops,
            transparency_stops: None,
        }
    }

    /// Returns the gradient with a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the gradient with a transparency ramp.
    pub fn with_transparency_stops(mut self, stops: Vec<TransparencyStop>) -> Self {
        self.transparency_stops = Some(stops);
        self
    }

    /// Evenly spaced stops, first at 0 and last at 1.
    pub fn from_colors(colors: Vec<Color>) -> Self {
        let count = colors.len();
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, color)| Stop::new(even_position(i, count), color))
            .collect();
        Self::new(stops)
    }

    /// Stops at explicit positions. Extra colors or positions are ignored.
    pub fn from_colors_and_positions(colors: Vec<Color>, positions: &[f64]) -> Self {
        let stops = colors
            .into_iter()
            .zip(positions.iter().copied())
            .map(|(color, position)| Stop::new(position, color))
            .collect();
        Self::new(stops)
    }

    /// One evenly spaced stop per palette color (`index / (count - 1)`).
    ///
    /// The palette name becomes the gradient name when non-empty.
    pub fn from_palette(palette: &Palette) -> Self {
        let mut gradient = Self::from_colors(palette.all_colors());
        if !palette.name.is_empty() {
            gradient.name = Some(palette.name.clone());
        }
        gradient
    }

    /// Copy with color and transparency stops ordered by ascending position.
    ///
    /// The sort is stable, so stops sharing a position keep their file order.
    pub fn sorted(&self) -> Gradient {
        let mut out = self.clone();
        out.stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        if let Some(ts) = out.transparency_stops.as_mut() {
            ts.sort_by(|a, b| a.position.total_cmp(&b.position));
        }
        out
    }

    /// Copy with positions rescaled linearly onto `[0, 1]` and sorted.
    ///
    /// Color stops and transparency stops are each rescaled over their own
    /// range. A single stop lands at 0.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateStopPosition`] if two stops share a position after
    ///   rescaling (a degenerate ramp has no defined color there).
    /// - [`Error::InvalidFormat`] for non-finite positions.
    pub fn normalized(&self) -> Result<Gradient> {
        let positions: Vec<f64> = self.stops.iter().map(|s| s.position).collect();
        let rescaled = normalize_positions(&positions)?;
        let mut stops: Vec<Stop> = self
            .stops
            .iter()
            .zip(rescaled)
            .map(|(s, position)| Stop::new(position, s.color.clone()))
            .collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        check_distinct(stops.iter().map(|s| s.position))?;

        let transparency_stops = match &self.transparency_stops {
            Some(ts) => {
                let positions: Vec<f64> = ts.iter().map(|t| t.position).collect();
                let rescaled = normalize_positions(&positions)?;
                let mut out: Vec<TransparencyStop> = ts
                    .iter()
                    .zip(rescaled)
                    .map(|(t, position)| TransparencyStop::new(position, t.value))
                    .collect();
                out.sort_by(|a, b| a.position.total_cmp(&b.position));
                check_distinct(out.iter().map(|t| t.position))?;
                Some(out)
            }
            None => None,
        };

        Ok(Gradient {
            name: self.name.clone(),
            stops,
            transparency_stops,
        })
    }

    /// Color at position `t`, clamped to the end stops.
    ///
    /// A position that hits a stop exactly returns that stop's color;
    /// anything between two stops is a linear mix.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGradient`] without stops, [`Error::InvalidFormat`] when
    /// `t` or a stop position is not finite.
    pub fn color_at(&self, t: f64) -> Result<Color> {
        check_finite(t)?;
        sample_color(&self.sorted().stops, t)
    }

    /// Opacity from the transparency ramp at `t`; 1.0 when there is none.
    ///
    /// Fails with [`Error::InvalidFormat`] on non-finite positions.
    pub fn alpha_at(&self, t: f64) -> Result<f64> {
        check_finite(t)?;
        match &self.sorted().transparency_stops {
            Some(ts) => sample_opacity(ts, t),
            None => Ok(1.0),
        }
    }

    /// Folds the transparency ramp into the color stops.
    ///
    /// Every distinct position from either ramp becomes a color stop whose
    /// alpha is the color alpha times the resampled opacity. The result has
    /// no transparency stops. Without a transparency ramp this is a copy.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGradient`] if there is a transparency ramp but no color
    /// stops, [`Error::InvalidFormat`] for non-finite positions, or a
    /// conversion error if adjacent stops cannot be mixed.
    pub fn merge_transparency_stops(&self) -> Result<Gradient> {
        let sorted = self.sorted();
        let Some(ts) = sorted.transparency_stops.as_deref() else {
            return Ok(sorted);
        };
        if sorted.stops.is_empty() {
            return Err(Error::EmptyGradient);
        }

        let mut positions: Vec<f64> = sorted
            .stops
            .iter()
            .map(|s| s.position)
            .chain(ts.iter().map(|t| t.position))
            .collect();
        positions.sort_by(f64::total_cmp);
        positions.dedup();

        let stops = positions
            .into_iter()
            .map(|position| {
                let color = sample_color(&sorted.stops, position)?;
                let alpha = color.alpha() as f64 * sample_opacity(ts, position)?;
                Ok(Stop::new(position, color.with_alpha(alpha as f32)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Gradient {
            name: sorted.name.clone(),
            stops,
            transparency_stops: None,
        })
    }
}

/// An ordered collection of gradients, for formats that bundle several.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradients {
    /// Gradients in file order.
    pub gradients: Vec<Gradient>,
}

impl Gradients {
    /// Creates a collection.
    pub fn new(gradients: Vec<Gradient>) -> Self {
        Self { gradients }
    }

    /// Number of gradients.
    pub fn len(&self) -> usize {
        self.gradients.len()
    }

    /// True when there are no gradients.
    pub fn is_empty(&self) -> bool {
        self.gradients.is_empty()
    }
}

impl From<Gradient> for Gradients {
    fn from(gradient: Gradient) -> Self {
        Self::new(vec![gradient])
    }
}

fn even_position(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

fn normalize_positions(positions: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = positions.iter().find(|p| !p.is_finite()) {
        return Err(Error::format(format!("non-finite stop position: {bad}")));
    }
    match positions.len() {
        0 => return Ok(Vec::new()),
        1 => return Ok(vec![0.0]),
        _ => {}
    }

    let min = positions.iter().copied().fold(f64::INFINITY, f64::min);
    let max = positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return Err(Error::DuplicateStopPosition(0.0));
    }
    Ok(positions.iter().map(|p| (p - min) / range).collect())
}

fn check_distinct(sorted: impl Iterator<Item = f64>) -> Result<()> {
    let mut prev: Option<f64> = None;
    for p in sorted {
        if prev == Some(p) {
            return Err(Error::DuplicateStopPosition(p));
        }
        prev = Some(p);
    }
    Ok(())
}

fn check_finite(position: f64) -> Result<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(Error::format(format!("non-finite stop position: {position}")))
    }
}

fn sample_color(sorted: &[Stop], t: f64) -> Result<Color> {
    sorted.iter().try_for_each(|s| check_finite(s.position))?;
    let first = sorted.first().ok_or(Error::EmptyGradient)?;
    let last = &sorted[sorted.len() - 1];
    if t <= first.position {
        return Ok(first.color.clone());
    }
    if t >= last.position {
        return Ok(last.color.clone());
    }
    if let Some(hit) = sorted.iter().find(|s| s.position == t) {
        return Ok(hit.color.clone());
    }

    // first.position < t < last.position and no exact hit
    let idx = sorted.partition_point(|s| s.position < t);
    let (a, b) = (&sorted[idx - 1], &sorted[idx]);
    let frac = (t - a.position) / (b.position - a.position);
    a.color.mix(&b.color, frac as f32)
}

fn sample_opacity(sorted: &[TransparencyStop], t: f64) -> Result<f64> {
    sorted.iter().try_for_each(|s| check_finite(s.position))?;
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Ok(1.0);
    };
    if t <= first.position {
        return Ok(first.value);
    }
    if t >= last.position {
        return Ok(last.value);
    }
    let idx = sorted.partition_point(|s| s.position < t);
    let (a, b) = (&sorted[idx - 1], &sorted[idx]);
    if b.position == t {
        return Ok(b.value);
    }
    let frac = (t - a.position) / (b.position - a.position);
    Ok(a.value + (b.value - a.value) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_from_colors() {
        let g = Gradient::from_colors(vec![hex("#ffffff"), hex("#444444"), hex("#000000")]);
        assert!(g.name.is_none());
        let positions: Vec<f64> = g.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);

        let single = Gradient::from_colors(vec![hex("#ffffff")]);
        assert_eq!(single.stops[0].position, 0.0);
    }

    #[test]
    fn test_sorted() {
        let g = Gradient::from_colors_and_positions(
            vec![hex("#ffffff"), hex("#444444"), hex("#000000")],
            &[0.2, 1.0, 0.0],
        )
        .sorted();
        assert_eq!(g.stops[0].position, 0.0);
        assert_eq!(g.stops[0].color.hex_rgb(true).unwrap(), "#000000");
        assert_eq!(g.stops[1].position, 0.2);
        assert_eq!(g.stops[1].color.hex_rgb(true).unwrap(), "#ffffff");
        assert_eq!(g.stops[2].color.hex_rgb(true).unwrap(), "#444444");
    }

    #[test]
    fn test_normalized() {
        let g = Gradient::from_colors_and_positions(
            vec![hex("#ffffff"), hex("#121212"), hex("#444444"), hex("#000000")],
            &[100.0, 0.0, 5.0, 85.0],
        );
        let n = g.normalized().unwrap();
        let positions: Vec<f64> = n.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.05, 0.85, 1.0]);
        assert_eq!(n.stops[0].color.hex_rgb(true).unwrap(), "#121212");
        assert_eq!(n.stops[3].color.hex_rgb(true).unwrap(), "#ffffff");
        // source untouched
        assert_eq!(g.stops[0].position, 100.0);
    }

    #[test]
    fn test_normalized_non_zero_based() {
        let g = Gradient::from_colors_and_positions(
            vec![hex("#ffffff"), hex("#121212"), hex("#444444")],
            &[60.0, 45.0, 30.0],
        );
        let n = g.normalized().unwrap();
        assert_eq!(n.stops[0].position, 0.0);
        assert_eq!(n.stops[0].color.hex_rgb(true).unwrap(), "#444444");
        assert_relative_eq!(n.stops[1].position, 0.5);
        assert_eq!(n.stops[2].position, 1.0);
        assert_eq!(n.stops[2].color.hex_rgb(true).unwrap(), "#ffffff");
    }

    #[test]
    fn test_normalized_duplicate_fails() {
        let same = Gradient::from_colors_and_positions(vec![hex("#ffffff"), hex("#000000")], &[20.0, 20.0]);
        assert!(matches!(same.normalized(), Err(Error::DuplicateStopPosition(_))));

        let dup = Gradient::from_colors_and_positions(
            vec![hex("#ffffff"), hex("#000000"), hex("#ff0000")],
            &[0.0, 0.5, 0.5],
        );
        assert!(matches!(dup.normalized(), Err(Error::DuplicateStopPosition(p)) if p == 0.5));
        // structurally allowed
        assert_eq!(dup.sorted().stops.len(), 3);
    }

    #[test]
    fn test_color_at() {
        let g = Gradient::from_colors(vec![Color::gray(0.0), Color::gray(1.0)]);
        assert_relative_eq!(g.color_at(0.25).unwrap().components()[0], 0.25);
        assert_eq!(g.color_at(-1.0).unwrap(), Color::gray(0.0));
        assert_eq!(g.color_at(2.0).unwrap(), Color::gray(1.0));
        assert!(matches!(Gradient::default().color_at(0.5), Err(Error::EmptyGradient)));
    }

    #[test]
    fn test_non_finite_positions_fail() {
        let g = Gradient::from_colors(vec![Color::gray(0.0), Color::gray(1.0)]);
        assert!(matches!(g.color_at(f64::NAN), Err(Error::InvalidFormat(_))));
        assert!(matches!(g.alpha_at(f64::INFINITY), Err(Error::InvalidFormat(_))));

        let bad_stop = Gradient::from_colors_and_positions(vec![Color::gray(0.0), Color::gray(1.0)], &[0.0, f64::NAN]);
        assert!(matches!(bad_stop.color_at(0.5), Err(Error::InvalidFormat(_))));

        let bad_alpha = g.clone().with_transparency_stops(vec![
            TransparencyStop::new(0.0, 1.0),
            TransparencyStop::new(f64::NAN, 0.5),
        ]);
        assert!(matches!(bad_alpha.merge_transparency_stops(), Err(Error::InvalidFormat(_))));
        assert!(matches!(bad_alpha.alpha_at(0.5), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_alpha_at() {
        let g = Gradient::from_colors(vec![Color::gray(0.0), Color::gray(1.0)]);
        assert_eq!(g.alpha_at(0.5).unwrap(), 1.0);
        let faded = g.with_transparency_stops(vec![TransparencyStop::new(0.0, 1.0), TransparencyStop::new(1.0, 0.0)]);
        assert_relative_eq!(faded.alpha_at(0.25).unwrap(), 0.75);
    }

    #[test]
    fn test_merge_transparency_stops() {
        let g = Gradient::new(vec![
            Stop::new(0.0, Color::rgb(0.0, 0.0, 1.0)),
            Stop::new(1.0, Color::rgb(1.0, 1.0, 0.0)),
        ])
        .with_transparency_stops(vec![
            TransparencyStop::new(0.0, 1.0),
            TransparencyStop::new(0.2, 0.25),
            TransparencyStop::new(1.0, 1.0),
        ]);

        let merged = g.merge_transparency_stops().unwrap();
        assert!(merged.transparency_stops.is_none());
        assert_eq!(merged.stops.len(), 3);
        assert_eq!(merged.stops[1].position, 0.2);
        assert_relative_eq!(merged.stops[1].color.alpha(), 0.25);
        assert_relative_eq!(merged.stops[1].color.components()[0], 0.2, epsilon = 1e-6);
        assert_eq!(merged.stops[2].color.alpha(), 1.0);
    }

    #[test]
    fn test_merge_union_count() {
        let g = Gradient::new(vec![
            Stop::new(0.0, Color::gray(0.0)),
            Stop::new(0.5, Color::gray(0.5)),
            Stop::new(1.0, Color::gray(1.0)),
        ])
        .with_transparency_stops(vec![
            TransparencyStop::new(0.25, 0.0),
            TransparencyStop::new(0.5, 0.5),
            TransparencyStop::new(0.75, 1.0),
        ]);
        let merged = g.merge_transparency_stops().unwrap();
        // {0, .5, 1} U {.25, .5, .75}
        assert_eq!(merged.stops.len(), 5);
        assert_eq!(merged.stops[0].color.alpha(), 0.0);
        assert_relative_eq!(merged.stops[2].color.alpha(), 0.5);
    }

    #[test]
    fn test_merge_without_transparency() {
        let g = Gradient::from_colors(vec![Color::gray(0.0), Color::gray(1.0)]).with_name("plain");
        let merged = g.merge_transparency_stops().unwrap();
        assert_eq!(merged, g);

        let empty = Gradient::default().with_transparency_stops(vec![TransparencyStop::new(0.0, 1.0)]);
        assert!(matches!(empty.merge_transparency_stops(), Err(Error::EmptyGradient)));
    }

    #[test]
    fn test_from_palette() {
        let palette = Palette::new("mona", vec![Color::gray(0.0), Color::gray(0.5), Color::gray(1.0)]);
        let g = Gradient::from_palette(&palette);
        assert_eq!(g.name.as_deref(), Some("mona"));
        assert_eq!(g.stops[1].position, 0.5);

        let unnamed = Gradient::from_palette(&Palette::default());
        assert!(unnamed.name.is_none());
        assert!(unnamed.stops.is_empty());
    }

    #[test]
    fn test_gradients() {
        let gs = Gradients::from(Gradient::default());
        assert_eq!(gs.len(), 1);
        assert!(!gs.is_empty());
        assert!(Gradients::default().is_empty());
    }
}
