use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use store::Money;

use crate::ui::theme::Theme;

/// Creates a styled span for an expense amount.
///
/// Amounts are always positive in this app, so there is no sign coloring;
/// rows render in the plain text color.
#[must_use]
pub fn amount_span(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(amount.to_string(), Style::default().fg(theme.text))
}

/// Creates a styled span with bold modifier for totals.
#[must_use]
pub fn total_span(amount: Money, theme: &Theme) -> Span<'static> {
    Span::styled(
        amount.to_string(),
        Style::default()
            .fg(theme.positive)
            .add_modifier(Modifier::BOLD),
    )
}
