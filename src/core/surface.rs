use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl(f32, f32, f32),
}

impl Color {
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    /// CSS color string for Canvas2D and DOM styles.
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgb(r, g, b) => format!("rgb({}, {}, {})", r, g, b),
            Color::Rgba(r, g, b, a) => format!("rgba({}, {}, {}, {})", r, g, b, a),
            Color::Hsl(h, s, l) => format!("hsl({:.1}, {:.1}%, {:.1}%)", h, s, l),
        }
    }
}

/// 2D drawing surface the field renders into.
pub trait Surface {
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    /// Translucent erase that leaves fading trails.
    fn fade_trails(&mut self, alpha: f32);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    /// `None` restores the page's default background.
    fn set_background_color(&mut self, color: Option<Color>);
}
