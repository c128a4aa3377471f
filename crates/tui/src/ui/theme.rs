use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub surface_bright: Color,
    pub positive: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(110, 118, 125),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(55, 65, 75),
            border_focused: Color::Rgb(110, 190, 190),
            surface_bright: Color::Rgb(26, 32, 40),
            positive: Color::Rgb(120, 190, 120),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
