use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours on evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Category → Color32
// ---------------------------------------------------------------------------

/// Stable colours for one category column. Built from the full store's
/// options so a category keeps its colour while filters change.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
