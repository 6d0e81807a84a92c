use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Genre → colour (scatter hue)
// ---------------------------------------------------------------------------

/// Maps genre labels to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: BTreeSet<&str> = labels.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();
        ColorMap { mapping }
    }

    /// Colour for `label`; grey for unknown or missing labels.
    pub fn color_for(&self, label: Option<&str>) -> Color32 {
        label
            .and_then(|l| self.mapping.get(l))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlation coefficients
// ---------------------------------------------------------------------------

/// Blue for −1, near-white for 0, red for +1.
pub fn coolwarm(value: f64) -> Color32 {
    let v = value.clamp(-1.0, 1.0) as f32;
    let hue = if v < 0.0 { 220.0 } else { 5.0 };
    let lightness = 0.95 - 0.45 * v.abs();
    hsl_to_color32(hue, 0.7, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| b != a));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn repeated_labels_share_a_colour() {
        let cm = ColorMap::new(["Drama", "Action", "Drama"]);
        assert_eq!(cm.mapping.len(), 2);
        assert_eq!(cm.color_for(Some("Drama")), cm.color_for(Some("Drama")));
        assert_ne!(cm.color_for(Some("Drama")), cm.color_for(Some("Action")));
        assert_eq!(cm.color_for(Some("Western")), Color32::GRAY);
        assert_eq!(cm.color_for(None), Color32::GRAY);
    }

    #[test]
    fn coolwarm_is_symmetric_in_intensity() {
        let neg = coolwarm(-1.0);
        let pos = coolwarm(1.0);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
        let zero = coolwarm(0.0);
        assert!(zero.r() > 230 && zero.g() > 230 && zero.b() > 230);
    }
}
