use ratatui::{
    style::Style,
    text::Span,
};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Creates a separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Common hint groups for reuse across screens.
pub mod common {
    use super::KeyHint;

    /// Navigation hints for list views.
    pub fn list_navigation() -> Vec<KeyHint> {
        vec![KeyHint::new("↑↓", "selecionar")]
    }

    /// Hints for create/edit/delete on the selected row.
    pub fn crud_operations() -> Vec<KeyHint> {
        vec![
            KeyHint::new("c", "criar"),
            KeyHint::new("e", "editar"),
            KeyHint::new("d", "excluir"),
        ]
    }

    /// Hints for form editing.
    pub fn form_editing() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "próximo"),
            KeyHint::new("Enter", "salvar"),
            KeyHint::new("Esc", "cancelar"),
        ]
    }
}
