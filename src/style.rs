use plotters::style::RGBColor;

pub const SPOTIFY_GREEN: RGBColor = RGBColor(0x1d, 0xb9, 0x54);
pub const SPOTIFY_DARK: RGBColor = RGBColor(0x19, 0x14, 0x14);
pub const SPOTIFY_WHITE: RGBColor = RGBColor(0xff, 0xff, 0xff);

const PASTEL_PINK: RGBColor = RGBColor(0xff, 0xf0, 0xf5);
const PASTEL_TEAL: RGBColor = RGBColor(0xa0, 0xe7, 0xe5);
const PASTEL_GOLD: RGBColor = RGBColor(0xff, 0xd2, 0x7f);
const INK: RGBColor = RGBColor(0x33, 0x33, 0x33);

pub const CONFETTI_PALETTE: [RGBColor; 5] = [
    RGBColor(0xff, 0xd2, 0x7f),
    RGBColor(0xff, 0xb6, 0xb9),
    RGBColor(0xa0, 0xe7, 0xe5),
    RGBColor(0xb5, 0xea, 0xd7),
    RGBColor(0xff, 0xda, 0xc1),
];

/// Styling for the aggregate bar chart. Passed explicitly into the render
/// call so two renders with different settings never interfere.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub bar_fill: RGBColor,
    pub top_fill: RGBColor,
    pub text_color: RGBColor,
    /// Factor by which the x range extends past the maximum count.
    pub axis_headroom: f64,
    pub confetti_count: usize,
    /// Fixed seed for the confetti scatter; entropy-seeded when `None`.
    pub confetti_seed: Option<u64>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            background: PASTEL_PINK,
            bar_fill: PASTEL_TEAL,
            top_fill: PASTEL_GOLD,
            text_color: INK,
            axis_headroom: 1.3,
            confetti_count: 50,
            confetti_seed: None,
        }
    }
}

/// Styling for the personal slides.
#[derive(Debug, Clone)]
pub struct SlideStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub accent: RGBColor,
    pub text_color: RGBColor,
}

impl Default for SlideStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: SPOTIFY_DARK,
            accent: SPOTIFY_GREEN,
            text_color: SPOTIFY_WHITE,
        }
    }
}
