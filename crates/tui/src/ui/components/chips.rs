use ratatui::{
    style::Style,
    text::Span,
};

use crate::colors;

/// Creates a labelled chip with the entity color as background.
///
/// Text color is picked for contrast against the background, so light
/// chips get dark text and vice versa.
#[must_use]
pub fn color_chip(label: &str, color: &str) -> Span<'static> {
    Span::styled(
        format!(" {label} "),
        Style::default()
            .bg(colors::terminal_color(color))
            .fg(colors::terminal_color(colors::contrast_color(color))),
    )
}

/// Creates a two-cell color swatch without a label.
#[must_use]
pub fn swatch(color: &str) -> Span<'static> {
    Span::styled("██", Style::default().fg(colors::terminal_color(color)))
}
