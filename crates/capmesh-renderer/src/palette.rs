use serde::{Deserialize, Serialize};

/// RGB color for scene elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_f32_array(&self, opacity: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            opacity,
        ]
    }
}

pub const OBSTACLE: Color = Color::rgb(220, 60, 60);
pub const VOID: Color = Color::rgb(90, 90, 90);
pub const BOUNDS: Color = Color::rgb(30, 30, 30);
pub const CANDIDATE: Color = Color::rgb(250, 200, 40);
pub const OUTLINE: Color = Color::rgb(40, 160, 80);

const LAYER_COLORS: [Color; 6] = [
    Color::rgb(60, 120, 220),
    Color::rgb(60, 190, 200),
    Color::rgb(150, 90, 210),
    Color::rgb(230, 130, 40),
    Color::rgb(120, 180, 60),
    Color::rgb(200, 80, 150),
];

/// Fill color for a node usable on the given layers; single-layer nodes
/// take their layer's color, multi-layer nodes the color of their lowest
/// layer one step further along the palette.
pub fn layer_color(available_z: &[usize]) -> Color {
    let first = available_z.iter().copied().min().unwrap_or(0);
    let offset = if available_z.len() > 1 { 1 } else { 0 };
    LAYER_COLORS[(first + offset) % LAYER_COLORS.len()]
}
