use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, TagsMode},
    ui::{components::chips, theme::Theme},
};

use super::payment_methods::render_color_form;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mode = match state.tags.mode {
        TagsMode::List => "Lista",
        TagsMode::Create => "Criar",
        TagsMode::Edit => "Editar",
    };
    let mut line = vec![
        Span::styled("Modo", Style::default().fg(theme.dim)),
        Span::raw(format!(": {mode}")),
    ];
    if let Some(err) = state.tags.error.as_ref() {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Tags");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let show_form = matches!(state.tags.mode, TagsMode::Create | TagsMode::Edit);
    let (form_area, list_area) = if show_form {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);
        (Some(layout[0]), layout[1])
    } else {
        (None, area)
    };

    if let Some(form_area) = form_area {
        let title = if state.tags.mode == TagsMode::Edit {
            "Editar tag"
        } else {
            "Nova tag"
        };
        render_color_form(frame, form_area, &state.tags.form, title, theme);
    }
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.tags.items.is_empty() {
        let lines = vec![Line::from(vec![
            Span::raw("Nenhuma tag. Pressione "),
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" para criar uma."),
        ])];
        let empty_msg = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty_msg, list_area);
        return;
    }

    let items = state
        .tags
        .items
        .iter()
        .map(|tag| ListItem::new(Line::from(chips::color_chip(&tag.name, &tag.color))))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.tags.selected));

    let list = List::new(items)
        .block(list_block)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, list_area, &mut list_state);
}
