//! Integration tests for the palette and gradient registries.

use pal_codec::coder::Coder;
use pal_codec::formats::{AcoCoder, RiffCoder};
use pal_codec::{load_palette, load_palette_as, save_gradients, save_palette, GradientRegistry, PaletteRegistry};
use pal_core::{Color, ColorSpace, Error, ErrorKind, Gradient, Gradients, Group, Palette, TransparencyStop};
use tempfile::tempdir;

/// A palette every palette format can hold, apart from names and groups.
fn test_palette() -> Palette {
    Palette::new(
        "registry",
        vec![
            Color::rgb255(255, 0, 0).with_name("red"),
            Color::rgb255(0, 128, 255).with_name("sky"),
        ],
    )
    .with_group(Group::new("greys", vec![Color::rgb255(64, 64, 64).with_name("dark")]))
}

#[test]
fn every_palette_extension_saves_and_loads() {
    let dir = tempdir().unwrap();
    let palette = test_palette();
    let registry = PaletteRegistry::global();

    for ext in registry.extensions() {
        let path = dir.path().join(format!("out.{ext}"));
        save_palette(&palette, &path).unwrap_or_else(|e| panic!("save .{ext}: {e}"));
        let loaded = load_palette(&path).unwrap_or_else(|e| panic!("load .{ext}: {e}"));
        assert_eq!(loaded.color_count(), palette.color_count(), ".{ext} lost colors");

        let rgb: Vec<[u8; 4]> = loaded.all_colors().iter().map(|c| c.to_rgba8().unwrap()).collect();
        assert_eq!(rgb[1], [0, 128, 255, 255], ".{ext} changed a color");
    }
}

#[test]
fn grouped_formats_keep_structure() {
    let registry = PaletteRegistry::global();
    let palette = test_palette();
    for ext in ["ase", "xml", "jsoncolorpalette"] {
        let data = registry.data(&palette, ext).unwrap();
        let decoded = registry.load_data(&data, ext).unwrap();
        assert_eq!(decoded.groups.len(), 1, ".{ext}");
        assert_eq!(decoded.groups[0].name, "greys", ".{ext}");
        assert_eq!(decoded.groups[0].colors[0].name(), "dark", ".{ext}");
    }

    // ASE has no palette name field
    for ext in ["xml", "jsoncolorpalette"] {
        let decoded = registry.load_data(&registry.data(&palette, ext).unwrap(), ext).unwrap();
        assert_eq!(decoded.name, "registry", ".{ext}");
    }
}

#[test]
fn unknown_extension_is_a_lookup_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("swatches.clr");
    std::fs::write(&path, b"anything").unwrap();

    let err = load_palette(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedCoderType(ref ext) if ext == "clr"));
    assert_eq!(err.kind(), ErrorKind::Lookup);

    let err = save_palette(&test_palette(), dir.path().join("noext")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn ambiguous_txt_retried_with_forced_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("colors.txt");
    std::fs::write(&path, "#ff0000 red\n#00ff00 green\n").unwrap();

    // .txt is Paint.NET first, which rejects rows that are not 8 characters
    let err = load_palette(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)));

    let palette = load_palette_as(&path, "rgb").unwrap();
    assert_eq!(palette.colors.len(), 2);
    assert_eq!(palette.colors[1].name(), "green");
}

#[test]
fn load_auto_prefers_signature_over_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.pal");
    let palette = Palette::new("", vec![Color::rgb255(1, 2, 3), Color::rgb255(4, 5, 6)]);
    RiffCoder::new().save(&palette, &path).unwrap();

    // by extension `.pal` is JASC
    let registry = PaletteRegistry::global();
    assert!(registry.load(&path, None).is_err());

    let loaded = registry.load_auto(&path).unwrap();
    assert_eq!(loaded.colors, palette.colors);
}

#[test]
fn load_auto_falls_back_to_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.rgba");
    std::fs::write(&path, "ff000080\n").unwrap();

    let palette = PaletteRegistry::global().load_auto(&path).unwrap();
    assert_eq!(palette.colors[0].to_rgba8().unwrap(), [255, 0, 0, 128]);
}

#[test]
fn aco_cmyk_zero_ink_through_registry() {
    let registry = PaletteRegistry::global();
    let palette = Palette::new("", vec![Color::cmyk(0.0, 0.0, 0.0, 0.0)]);
    let data = registry.data(&palette, "aco").unwrap();
    assert!(AcoCoder::new().can_decode(&data));

    // every stored channel is 65535 - 0
    assert_eq!(&data[6..14], &[0xFF; 8]);
    let decoded = registry.load_data(&data, "aco").unwrap();
    assert_eq!(decoded.colors[0].colorspace(), ColorSpace::Cmyk);
    assert_eq!(decoded.colors[0].components(), &[0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn gradients_save_and_load() {
    let dir = tempdir().unwrap();
    let gradient = Gradient::from_colors(vec![Color::rgb(0.0, 0.0, 0.0), Color::rgb(1.0, 1.0, 1.0)])
        .with_name("mono")
        .with_transparency_stops(vec![TransparencyStop::new(0.0, 1.0), TransparencyStop::new(1.0, 1.0)]);
    let gradients = Gradients::from(gradient);

    let json = dir.path().join("mono.jsongradient");
    save_gradients(&gradients, &json).unwrap();
    assert_eq!(pal_codec::load_gradients(&json).unwrap(), gradients);

    let ggr = dir.path().join("mono.ggr");
    save_gradients(&gradients, &ggr).unwrap();
    let loaded = GradientRegistry::global().load_auto(&ggr).unwrap();
    assert_eq!(loaded.gradients[0].name.as_deref(), Some("mono"));
    assert!(loaded.gradients[0].transparency_stops.is_none());
}

#[test]
fn palette_and_gradient_registries_are_disjoint() {
    assert!(PaletteRegistry::global().coder_for_extension("ggr").is_none());
    assert!(GradientRegistry::global().coder_for_extension("gpl").is_none());
    assert_eq!(GradientRegistry::global().extensions(), vec!["jsongradient", "ggr"]);
}
