use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, ColorForm, ColorFormField, MethodsMode},
    colors,
    ui::{components::chips, theme::Theme},
};

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
    let mode = match state.methods.mode {
        MethodsMode::List => "Lista",
        MethodsMode::Create => "Criar",
        MethodsMode::Edit => "Editar",
    };
    let mut line = vec![
        Span::styled("Modo", Style::default().fg(theme.dim)),
        Span::raw(format!(": {mode}")),
    ];
    if let Some(err) = state.methods.error.as_ref() {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Formas de pagamento");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let show_form = matches!(state.methods.mode, MethodsMode::Create | MethodsMode::Edit);
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
        let title = if state.methods.mode == MethodsMode::Edit {
            "Editar forma de pagamento"
        } else {
            "Nova forma de pagamento"
        };
        render_color_form(frame, form_area, &state.methods.form, title, theme);
    }
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.methods.items.is_empty() {
        let lines = vec![Line::from(vec![
            Span::raw("Nenhuma forma de pagamento. Pressione "),
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
        .methods
        .items
        .iter()
        .map(|method| {
            let spans = vec![
                chips::swatch(&method.color),
                Span::raw(" "),
                Span::styled(method.name.clone(), Style::default().fg(theme.text)),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.methods.selected));

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

/// Name field plus the preset palette. Shared with the tags screen, which
/// calls it with its own form and title.
pub fn render_color_form(
    frame: &mut Frame<'_>,
    area: Rect,
    form: &ColorForm,
    title: &str,
    theme: &Theme,
) {
    let mut lines = Vec::new();
    lines.push(render_field(
        "Nome",
        form.name.as_str(),
        form.focus == ColorFormField::Name,
        theme,
    ));
    lines.push(palette_line(form, theme));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<10}", "Prévia"), Style::default().fg(theme.text)),
        Span::raw(" "),
        chips::color_chip(if form.name.is_empty() { "exemplo" } else { form.name.as_str() }, form.color()),
    ]));
    lines.push(Line::from(Span::styled(
        "Enter: salvar • Tab: próximo • ↑↓: escolher cor • Esc: cancelar",
        Style::default().fg(theme.dim),
    )));
    if let Some(err) = form.error.as_ref() {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn palette_line(form: &ColorForm, theme: &Theme) -> Line<'static> {
    let focused = form.focus == ColorFormField::Color;
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let bracket_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };

    let mut spans = vec![
        Span::styled(format!("{:<10}", "Cor"), label_style),
        Span::raw(" "),
    ];
    for (i, preset) in colors::PRESET_COLORS.iter().enumerate() {
        if i == form.color_index {
            spans.push(Span::styled("[", bracket_style));
            spans.push(chips::swatch(preset));
            spans.push(Span::styled("]", bracket_style));
        } else {
            spans.push(Span::raw(" "));
            spans.push(chips::swatch(preset));
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}

fn render_field(label: &str, value: &str, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let value_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(" "),
        Span::styled(value.to_string(), value_style),
    ])
}
