use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Facet id → Color32
// ---------------------------------------------------------------------------

/// Stable colour per facet id, assigned in report order.
#[derive(Debug, Clone, Default)]
pub struct FacetColors {
    mapping: BTreeMap<i64, Color32>,
}

impl FacetColors {
    pub fn new(facets: &[i64]) -> Self {
        let mapping = facets
            .iter()
            .copied()
            .zip(generate_palette(facets.len()))
            .collect();
        FacetColors { mapping }
    }

    pub fn color_for(&self, facet: i64) -> Color32 {
        self.mapping.get(&facet).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_facet_is_grey() {
        let colors = FacetColors::new(&[4, 1]);
        assert_ne!(colors.color_for(4), colors.color_for(1));
        assert_eq!(colors.color_for(99), Color32::GRAY);
    }
}
