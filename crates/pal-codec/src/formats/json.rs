//! JSON palettes (.jsoncolorpalette) and gradients (.jsongradient).
//!
//! Colors are written with their colorspace name and raw components, so
//! every colorspace (LAB included) and the color type survive a round trip.
//!
//! ```json
//! {
//!   "name": "demo",
//!   "colors": [
//!     { "name": "red", "colorspace": "RGB", "components": [1.0, 0.0, 0.0], "alpha": 1.0, "colorType": "global" }
//!   ],
//!   "groups": []
//! }
//! ```

use crate::coder::{header_text, Coder};
use pal_core::{
    Color, ColorSpace, ColorType, Error, Gradient, Gradients, Group, Palette, Result, Stop,
    TransparencyStop,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorDto {
    #[serde(default)]
    name: String,
    colorspace: String,
    components: Vec<f32>,
    #[serde(default = "opaque")]
    alpha: f32,
    #[serde(default = "global")]
    color_type: String,
}

fn opaque() -> f32 {
    1.0
}

fn global() -> String {
    ColorType::Global.as_str().to_string()
}

impl From<&Color> for ColorDto {
    fn from(color: &Color) -> Self {
        Self {
            name: color.name().to_string(),
            colorspace: color.colorspace().as_str().to_string(),
            components: color.components().to_vec(),
            alpha: color.alpha(),
            color_type: color.color_type().as_str().to_string(),
        }
    }
}

impl TryFrom<ColorDto> for Color {
    type Error = Error;

    fn try_from(dto: ColorDto) -> Result<Self> {
        let colorspace = ColorSpace::from_str(&dto.colorspace)
            .ok_or_else(|| Error::UnsupportedColorSpace(dto.colorspace.clone()))?;
        let color_type = ColorType::from_str(&dto.color_type)
            .ok_or_else(|| Error::format(format!("unknown color type {:?}", dto.color_type)))?;
        Ok(Color::new(dto.name, colorspace, dto.components)?
            .with_alpha(dto.alpha)
            .with_color_type(color_type))
    }
}

fn colors_from(dtos: Vec<ColorDto>) -> Result<Vec<Color>> {
    dtos.into_iter().map(Color::try_from).collect()
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupDto {
    name: String,
    colors: Vec<ColorDto>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PaletteDto {
    #[serde(default)]
    name: String,
    #[serde(default)]
    colors: Vec<ColorDto>,
    #[serde(default)]
    groups: Vec<GroupDto>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StopDto {
    position: f64,
    color: ColorDto,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransparencyStopDto {
    position: f64,
    value: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GradientDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    stops: Vec<StopDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transparency_stops: Option<Vec<TransparencyStopDto>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GradientsDto {
    gradients: Vec<GradientDto>,
}

fn parse_error(e: serde_json::Error) -> Error {
    Error::format(format!("JSON: {e}"))
}

fn looks_like_json_with(header: &[u8], key: &str) -> bool {
    let text = header_text(header);
    text.starts_with('{') && text.contains(&format!("\"{key}\""))
}

/// JSON palette coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPaletteCoder;

impl JsonPaletteCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for JsonPaletteCoder {
    type Model = Palette;

    fn name(&self) -> &'static str {
        "JSON Palette"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jsoncolorpalette"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        looks_like_json_with(header, "colors") || looks_like_json_with(header, "groups")
    }

    fn decode(&self, data: &[u8]) -> Result<Palette> {
        let dto: PaletteDto = serde_json::from_slice(data).map_err(parse_error)?;
        let groups = dto
            .groups
            .into_iter()
            .map(|g| Ok(Group::new(g.name, colors_from(g.colors)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Palette {
            name: dto.name,
            colors: colors_from(dto.colors)?,
            groups,
        })
    }

    fn encode(&self, palette: &Palette) -> Result<Vec<u8>> {
        let dto = PaletteDto {
            name: palette.name.clone(),
            colors: palette.colors.iter().map(ColorDto::from).collect(),
            groups: palette
                .groups
                .iter()
                .map(|g| GroupDto {
                    name: g.name.clone(),
                    colors: g.colors.iter().map(ColorDto::from).collect(),
                })
                .collect(),
        };
        serde_json::to_vec_pretty(&dto).map_err(|e| Error::InvalidString(e.to_string()))
    }
}

/// JSON gradient coder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGradientCoder;

impl JsonGradientCoder {
    /// Creates the coder.
    pub fn new() -> Self {
        Self
    }
}

impl Coder for JsonGradientCoder {
    type Model = Gradients;

    fn name(&self) -> &'static str {
        "JSON Gradient"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jsongradient"]
    }

    fn can_decode(&self, header: &[u8]) -> bool {
        looks_like_json_with(header, "gradients")
    }

    fn decode(&self, data: &[u8]) -> Result<Gradients> {
        let dto: GradientsDto = serde_json::from_slice(data).map_err(parse_error)?;
        let gradients = dto
            .gradients
            .into_iter()
            .map(|g| {
                let stops = g
                    .stops
                    .into_iter()
                    .map(|s| Ok(Stop::new(s.position, Color::try_from(s.color)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Gradient {
                    name: g.name,
                    stops,
                    transparency_stops: g.transparency_stops.map(|ts| {
                        ts.into_iter()
                            .map(|t| TransparencyStop::new(t.position, t.value))
                            .collect()
                    }),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Gradients::new(gradients))
    }

    fn encode(&self, gradients: &Gradients) -> Result<Vec<u8>> {
        let dto = GradientsDto {
            gradients: gradients
                .gradients
                .iter()
                .map(|g| GradientDto {
                    name: g.name.clone(),
                    stops: g
                        .stops
                        .iter()
                        .map(|s| StopDto { position: s.position, color: ColorDto::from(&s.color) })
                        .collect(),
                    transparency_stops: g.transparency_stops.as_ref().map(|ts| {
                        ts.iter()
                            .map(|t| TransparencyStopDto { position: t.position, value: t.value })
                            .collect()
                    }),
                })
                .collect(),
        };
        serde_json::to_vec_pretty(&dto).map_err(|e| Error::InvalidString(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_roundtrip() {
        let palette = Palette::new(
            "json",
            vec![
                Color::rgba(1.0, 0.5, 0.25, 0.5).with_name("peach"),
                Color::lab(53.2, 80.1, 67.2).with_color_type(ColorType::Spot),
            ],
        )
        .with_group(Group::new("inks", vec![Color::cmyk(0.0, 0.1, 0.2, 0.3).with_color_type(ColorType::Normal)]));

        let data = JsonPaletteCoder.encode(&palette).unwrap();
        assert!(JsonPaletteCoder.can_decode(&data));
        assert_eq!(JsonPaletteCoder.decode(&data).unwrap(), palette);
    }

    #[test]
    fn test_palette_defaults() {
        let data = br#"{"colors":[{"colorspace":"gray","components":[0.5]}]}"#;
        let palette = JsonPaletteCoder.decode(data).unwrap();
        assert_eq!(palette.name, "");
        assert_eq!(palette.colors[0], Color::gray(0.5));
    }

    #[test]
    fn test_palette_invalid() {
        let arity = br#"{"colors":[{"colorspace":"RGB","components":[1.0]}]}"#;
        assert!(matches!(JsonPaletteCoder.decode(arity), Err(Error::InvalidComponentCount { .. })));
        let space = br#"{"colors":[{"colorspace":"HSB","components":[1.0, 0.0, 0.0]}]}"#;
        assert!(matches!(JsonPaletteCoder.decode(space), Err(Error::UnsupportedColorSpace(_))));
        assert!(matches!(JsonPaletteCoder.decode(b"{\"colors\": ["), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_gradient_presence_preserved() {
        let with_empty = Gradient::from_colors(vec![Color::gray(0.0), Color::gray(1.0)])
            .with_name("ramp")
            .with_transparency_stops(vec![]);
        let without = Gradient::from_colors(vec![Color::rgb(1.0, 0.0, 0.0)]);
        let gradients = Gradients::new(vec![with_empty, without]);

        let data = JsonGradientCoder.encode(&gradients).unwrap();
        assert!(JsonGradientCoder.can_decode(&data));
        let decoded = JsonGradientCoder.decode(&data).unwrap();
        assert_eq!(decoded, gradients);
        assert_eq!(decoded.gradients[0].transparency_stops, Some(vec![]));
        assert!(decoded.gradients[1].name.is_none());
        assert!(decoded.gradients[1].transparency_stops.is_none());
    }
}
