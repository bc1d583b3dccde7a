//! Color palettes for the chart panels.

use plotters::style::colors::colormaps::ViridisRGB;
use plotters::style::RGBColor;

/// Continuous colormaps. Viridis comes from plotters; the others are
/// sampled by linear interpolation between anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Plasma,
    Magma,
    Coolwarm,
}

/// Qualitative palettes, cycled when more colors are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualitative {
    Set1,
    Set2,
    Tab10,
}

const PLASMA: [(u8, u8, u8); 10] = [
    (13, 8, 135),
    (70, 3, 159),
    (114, 1, 168),
    (156, 23, 158),
    (189, 55, 134),
    (216, 87, 107),
    (237, 121, 83),
    (251, 159, 58),
    (253, 202, 38),
    (240, 249, 33),
];

const MAGMA: [(u8, u8, u8); 10] = [
    (0, 0, 4),
    (24, 15, 61),
    (68, 15, 118),
    (114, 31, 129),
    (158, 47, 127),
    (205, 64, 113),
    (241, 96, 93),
    (253, 150, 104),
    (254, 202, 141),
    (252, 253, 191),
];

const COOLWARM: [(u8, u8, u8); 9] = [
    (59, 76, 192),
    (98, 130, 234),
    (141, 176, 254),
    (184, 208, 249),
    (221, 221, 221),
    (245, 196, 173),
    (244, 154, 123),
    (222, 96, 77),
    (180, 4, 38),
];

const SET1: [(u8, u8, u8); 9] = [
    (228, 26, 28),
    (55, 126, 184),
    (77, 175, 74),
    (152, 78, 163),
    (255, 127, 0),
    (255, 255, 51),
    (166, 86, 40),
    (247, 129, 191),
    (153, 153, 153),
];

const SET2: [(u8, u8, u8); 8] = [
    (102, 194, 165),
    (252, 141, 98),
    (141, 160, 203),
    (231, 138, 195),
    (166, 216, 84),
    (255, 217, 47),
    (229, 196, 148),
    (179, 179, 179),
];

const TAB10: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

/// Fill for cells without a value (e.g. an undefined correlation).
pub const MISSING: RGBColor = RGBColor(230, 230, 230);

impl Colormap {
    /// Color at position `t` in [0, 1]; values outside are clamped.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let anchors: &[(u8, u8, u8)] = match self {
            Colormap::Viridis => return ViridisRGB::get_color(t),
            Colormap::Plasma => &PLASMA,
            Colormap::Magma => &MAGMA,
            Colormap::Coolwarm => &COOLWARM,
        };
        let pos = t * (anchors.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = (lower + 1).min(anchors.len() - 1);
        let frac = pos - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (anchors[lower], anchors[upper]);
        RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// `n` colors spread over the map, skipping both extremes.
    pub fn colors(&self, n: usize) -> Vec<RGBColor> {
        (1..=n)
            .map(|i| self.sample(i as f64 / (n + 1) as f64))
            .collect()
    }
}

impl Qualitative {
    fn table(&self) -> &'static [(u8, u8, u8)] {
        match self {
            Qualitative::Set1 => &SET1,
            Qualitative::Set2 => &SET2,
            Qualitative::Tab10 => &TAB10,
        }
    }

    pub fn color(&self, index: usize) -> RGBColor {
        let table = self.table();
        let (r, g, b) = table[index % table.len()];
        RGBColor(r, g, b)
    }

    pub fn colors(&self, n: usize) -> Vec<RGBColor> {
        (0..n).map(|i| self.color(i)).collect()
    }
}

/// Perceived brightness in [0, 1], used to pick readable annotation text.
pub fn luminance(color: RGBColor) -> f64 {
    (0.299 * color.0 as f64 + 0.587 * color.1 as f64 + 0.114 * color.2 as f64) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_hits_anchors_at_the_ends() {
        assert_eq!(Colormap::Plasma.sample(0.0), RGBColor(13, 8, 135));
        assert_eq!(Colormap::Plasma.sample(1.0), RGBColor(240, 249, 33));
        assert_eq!(Colormap::Coolwarm.sample(0.5), RGBColor(221, 221, 221));
    }

    #[test]
    fn sample_clamps_out_of_range() {
        assert_eq!(Colormap::Magma.sample(-3.0), Colormap::Magma.sample(0.0));
        assert_eq!(Colormap::Magma.sample(7.0), Colormap::Magma.sample(1.0));
    }

    #[test]
    fn colors_skip_extremes() {
        let colors = Colormap::Plasma.colors(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], Colormap::Plasma.sample(0.0));
        assert_ne!(colors[2], Colormap::Plasma.sample(1.0));
        assert_eq!(colors[1], Colormap::Plasma.sample(0.5));
    }

    #[test]
    fn viridis_follows_plotters_colormap() {
        assert_eq!(Colormap::Viridis.sample(0.0), ViridisRGB::get_color(0.0));
        assert_eq!(Colormap::Viridis.sample(0.25), ViridisRGB::get_color(0.25));
        assert_eq!(Colormap::Viridis.sample(2.0), ViridisRGB::get_color(1.0));
        assert_eq!(Colormap::Viridis.colors(4).len(), 4);
    }

    #[test]
    fn qualitative_palettes_cycle() {
        assert_eq!(Qualitative::Set2.color(0), Qualitative::Set2.color(8));
        assert_eq!(Qualitative::Set1.colors(12).len(), 12);
    }

    #[test]
    fn luminance_orders_dark_and_light() {
        assert!(luminance(RGBColor(0, 0, 4)) < 0.1);
        assert!(luminance(RGBColor(252, 253, 191)) > 0.9);
    }
}
