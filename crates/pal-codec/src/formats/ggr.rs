//! GIMP gradient (.ggr).
//!
//! ```text
//! GIMP Gradient
//! Name: Sunrise
//! 2
//! 0.000000 0.250000 0.500000 1 0 0 1 1 1 0 1 0 0
//! 0.500000 0.750000 1.000000 1 1 0 1 0 0 1 1 0 0
//! ```
//!
//! Each segment row is `left mid right r0 g0 b0 a0 r1 g1 b1 a1 blend coloring`,
//! optionally followed by two endpoint color-source flags. Only linear RGB
//! blending is modelled: midpoints and blend types are read and dropped.

use crate::coder::{decode_utf8, header_text, Coder};
use pal_core::{Color, Error, Gradient, Gradients, Result, Stop};
use std::io::Write;
use tracing::{debug, warn};

const SIGNATURE: &str = "GIMP Gradient";

/// GIMP gradient coder. A `.ggr` file holds exactly one gradient.
#[derive(Debug, Clone, Copy, Default)]
pub struct GgrCoder;

impl GgrCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

struct Segment {
    left: f64,
    right: f64,
    start: Color,
    end: Color,
}

fn parse_segment(line: &str, lineno: usize) -> Result<Segment> {
    let fields = line
        .split_whitespace()
        .map(|f| f.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::format(format!("line {lineno}: {e}")))?;
    if fields.len() != 13 && fields.len() != 15 {
        return Err(Error::format(format!(
            "line {lineno}: expected 13 or 15 fields, got {}",
            fields.len()
        )));
    }
    if let Some(bad) = fields.iter().find(|f| !f.is_finite()) {
        return Err(Error::format(format!("line {lineno}: non-finite value {bad}")));
    }

    let (blend, coloring) = (fields[11], fields[12]);
    if blend != 0.0 || coloring != 0.0 {
        debug!(line = lineno, blend, coloring, "non-linear segment read as linear RGB");
    }
    let color = |i: usize| Color::rgba(fields[i] as f32, fields[i + 1] as f32, fields[i + 2] as f32, fields[i + 3] as f32);
    Ok(Segment {
        left: fields[0],
        right: fields[2],
        start: color(3),
        end: color(7),
    })
}

/// Rescales sorted stop positions onto `[0, 1]`.
///
/// Unlike [`Gradient::normalized`] this keeps coincident positions, which
/// GIMP uses for hard edges.
fn unit_positions(sorted: &[Stop]) -> Result<Vec<f64>> {
    if let Some(bad) = sorted.iter().find(|s| !s.position.is_finite()) {
        return Err(Error::format(format!("non-finite stop position: {}", bad.position)));
    }
    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first.position, last.position),
        _ => return Ok(Vec::new()),
    };
    let range = max - min;
    if range <= 0.0 {
        return Err(Error::DuplicateStopPosition(min));
    }
    Ok(sorted.iter().map(|s| (s.position - min) / range).collect())
}

impl Coder for GgrCoder {
    type Model = Gradients;

    fn name(&self) -> &'static str {
        "GIMP Gradient"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ggr"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        header_text(header).starts_with(SIGNATURE)
    }

    fn decode(&self, data: &[u8]) -> Result<Gradients> {
        let text = decode_utf8(data)?;
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        match lines.next() {
            Some((_, first)) if first.starts_with(SIGNATURE) => {}
            _ => return Err(Error::format("missing 'GIMP Gradient' signature")),
        }

        let mut name = None;
        let (count_line, count_text) = loop {
            match lines.next() {
                Some((_, line)) if line.starts_with("Name:") => {
                    name = line.strip_prefix("Name:").map(|n| n.trim().to_string());
                }
                Some(entry) => break entry,
                None => return Err(Error::format("missing segment count")),
            }
        };
        let count: usize = count_text
            .parse()
            .map_err(|_| Error::format(format!("line {count_line}: bad segment count {count_text:?}")))?;

        // count comes from the file
        let mut stops: Vec<Stop> = Vec::with_capacity(count.min(1024) + 1);
        for _ in 0..count {
            let (lineno, line) = lines
                .next()
                .ok_or_else(|| Error::format(format!("expected {count} segments")))?;
            let segment = parse_segment(line, lineno)?;
            let shared = stops
                .last()
                .is_some_and(|s| s.position == segment.left && s.color == segment.start);
            if !shared {
                stops.push(Stop::new(segment.left, segment.start));
            }
            stops.push(Stop::new(segment.right, segment.end));
        }
        if lines.next().is_some() {
            warn!(declared = count, "ignoring lines after the last GIMP gradient segment");
        }

        Ok(Gradients::from(Gradient {
            name,
            stops,
            transparency_stops: None,
        }))
    }

    fn encode(&self, gradients: &Gradients) -> Result<Vec<u8>> {
        let gradient = match gradients.gradients.as_slice() {
            [] => return Err(Error::EmptyGradient),
            [one] => one,
            many => return Err(Error::TooManyEntries { count: many.len(), max: 1 }),
        };
        let merged = gradient.merge_transparency_stops()?;
        if merged.stops.is_empty() {
            return Err(Error::EmptyGradient);
        }

        let stops = &merged.stops;
        let segments: Vec<(f64, f64, &Color, &Color)> = match stops.as_slice() {
            [only] => vec![(0.0, 1.0, &only.color, &only.color)],
            _ => {
                let positions = unit_positions(stops)?;
                stops
                    .windows(2)
                    .zip(positions.windows(2))
                    .map(|(s, p)| (p[0], p[1], &s[0].color, &s[1].color))
                    .collect()
            }
        };

        let mut out = Vec::new();
        writeln!(out, "{SIGNATURE}")?;
        if let Some(name) = &merged.name {
            writeln!(out, "Name: {name}")?;
        }
        writeln!(out, "{}", segments.len())?;
        for (left, right, start, end) in segments {
            let [r0, g0, b0] = start.rgb_components()?;
            let [r1, g1, b1] = end.rgb_components()?;
            writeln!(
                out,
                "{left:.6} {:.6} {right:.6} {r0:.6} {g0:.6} {b0:.6} {:.6} {r1:.6} {g1:.6} {b1:.6} {:.6} 0 0",
                (left + right) / 2.0,
                start.alpha(),
                end.alpha(),
            )?;
        }
        Ok(out)
    }
}
