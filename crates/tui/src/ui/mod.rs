pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;
use components::hints::{self, KeyHint};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar (label + underline)
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        crate::app::Section::Groups => screens::groups::render(frame, layout[2], state),
        crate::app::Section::Users => screens::users::render(frame, layout[2], state),
        crate::app::Section::PaymentMethods => {
            screens::payment_methods::render(frame, layout[2], state)
        }
        crate::app::Section::Tags => screens::tags::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.connection.ok { "OK" } else { "ERR" };
    let status_style = if state.connection.ok {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };

    let line = Line::from(vec![
        Span::styled("Servidor", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Fuso", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.timezone)),
        Span::styled("Atualizado", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state);
    if !context_hints.is_empty() {
        parts.push(hints::hint_separator(theme));
        parts.extend(hints::hints_to_spans(&context_hints, theme));
    }

    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(
        &[KeyHint::new("r", "atualizar"), KeyHint::new("q", "sair")],
        theme,
    ));

    let bar = Paragraph::new(Line::from(parts));
    frame.render_widget(bar, area);
}

/// Returns context-specific keyboard hints based on current section and mode.
fn get_context_hints(state: &AppState) -> Vec<KeyHint> {
    match state.section {
        crate::app::Section::Groups => get_groups_hints(state),
        crate::app::Section::Users => match state.users.mode {
            crate::app::UsersMode::List => list_hints(),
            _ => hints::common::form_editing(),
        },
        crate::app::Section::PaymentMethods => match state.methods.mode {
            crate::app::MethodsMode::List => list_hints(),
            _ => hints::common::form_editing(),
        },
        crate::app::Section::Tags => match state.tags.mode {
            crate::app::TagsMode::List => list_hints(),
            _ => hints::common::form_editing(),
        },
    }
}

fn get_groups_hints(state: &AppState) -> Vec<KeyHint> {
    match state.groups.mode {
        crate::app::GroupsMode::List => {
            let mut hints = list_hints();
            hints.push(KeyHint::new("Enter", "detalhe"));
            hints
        }
        crate::app::GroupsMode::Detail => vec![
            KeyHint::new("c", "nova despesa"),
            KeyHint::new("e", "editar"),
            KeyHint::new("d", "excluir"),
            KeyHint::new("b", "voltar"),
        ],
        _ => hints::common::form_editing(),
    }
}

fn list_hints() -> Vec<KeyHint> {
    let mut hints = hints::common::list_navigation();
    hints.extend(hints::common::crud_operations());
    hints
}
