use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Region;

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
// Region → Color32
// ---------------------------------------------------------------------------

/// One colour per state, fixed over all six so a state keeps its colour
/// whatever the current filter shows.
#[derive(Debug, Clone)]
pub struct RegionColors {
    mapping: BTreeMap<Region, Color32>,
}

impl Default for RegionColors {
    fn default() -> Self {
        let mapping = Region::ALL
            .into_iter()
            .zip(generate_palette(Region::ALL.len()))
            .collect();
        RegionColors { mapping }
    }
}

impl RegionColors {
    pub fn color_for(&self, region: Region) -> Color32 {
        self.mapping.get(&region).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        let unique: BTreeSet<[u8; 4]> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_every_region_has_a_colour() {
        let colors = RegionColors::default();
        for region in Region::ALL {
            assert_ne!(colors.color_for(region), Color32::GRAY);
        }
    }
}
