use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Medal colours
// ---------------------------------------------------------------------------

pub const GOLD: Srgb<u8> = Srgb::new(0xFF, 0xD7, 0x00);
pub const SILVER: Srgb<u8> = Srgb::new(0xC0, 0xC0, 0xC0);
pub const BRONZE: Srgb<u8> = Srgb::new(0xCD, 0x7F, 0x32);

/// Heatmap end points: weakest (−1) to strongest (+1) correlation.
const HEAT_LOW: Srgb<u8> = Srgb::new(0xF7, 0xFB, 0xFF);
const HEAT_HIGH: Srgb<u8> = Srgb::new(0x08, 0x30, 0x6B);

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// Colour for series `i`: the requested colour if there is one, otherwise
/// an evenly spaced hue out of `n`.
pub fn series_color(requested: &[Srgb<u8>], i: usize, n: usize) -> Color32 {
    match requested.get(i) {
        Some(&c) => to_color32(c),
        None => generate_palette(n.max(1))
            .get(i)
            .copied()
            .map_or(Color32::GRAY, to_color32),
    }
}

// ---------------------------------------------------------------------------
// Sequential "blues" scale for the correlation heatmap
// ---------------------------------------------------------------------------

/// Map a correlation in `[-1, 1]` onto the white→blue scale.
/// Undefined (NaN) cells are drawn grey.
pub fn heat_color(value: f64) -> Color32 {
    if !value.is_finite() {
        return Color32::DARK_GRAY;
    }
    let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
    let low: LinSrgb = HEAT_LOW.into_format::<f32>().into_linear();
    let high: LinSrgb = HEAT_HIGH.into_format::<f32>().into_linear();
    let mixed: Srgb = Srgb::from_linear(low.mix(high, t));
    to_color32(mixed.into_format())
}

/// Readable text colour on top of a heatmap cell.
pub fn heat_text_color(value: f64) -> Color32 {
    if value.is_finite() && value > 0.0 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
