use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::expense::ExpenseView;
use store::Money;

use crate::{
    app::{AppState, ExpenseFormField, GroupsMode},
    totals,
    ui::{
        components::{
            card::{Card, StatCard},
            chips, money,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);

    match state.groups.mode {
        GroupsMode::Detail | GroupsMode::NewExpense | GroupsMode::EditExpense => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(layout[1]);
            render_expenses(frame, columns[0], state, &theme);
            render_summary(frame, columns[1], state, &theme);
        }
        GroupsMode::List | GroupsMode::Create | GroupsMode::Rename => {
            render_list(frame, layout[1], state, &theme)
        }
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mode = match state.groups.mode {
        GroupsMode::List => "Lista",
        GroupsMode::Create => "Criar",
        GroupsMode::Rename => "Renomear",
        GroupsMode::Detail => "Detalhe",
        GroupsMode::NewExpense => "Nova despesa",
        GroupsMode::EditExpense => "Editar despesa",
    };
    let mut line = vec![
        Span::styled("Modo", Style::default().fg(theme.dim)),
        Span::raw(format!(": {mode}")),
    ];
    if let Some(group) = current_group_name(state) {
        line.push(Span::raw("   "));
        line.push(Span::styled("Grupo", Style::default().fg(theme.dim)));
        line.push(Span::raw(format!(": {group}")));
    }
    if let Some(err) = state.groups.error.as_ref() {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Grupos");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn current_group_name(state: &AppState) -> Option<&str> {
    let group_id = state.groups.detail.group_id?;
    if state.groups.mode == GroupsMode::List
        || state.groups.mode == GroupsMode::Create
        || state.groups.mode == GroupsMode::Rename
    {
        return None;
    }
    state
        .groups
        .items
        .iter()
        .find(|group| group.id == group_id)
        .map(|group| group.name.as_str())
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let show_form = matches!(state.groups.mode, GroupsMode::Create | GroupsMode::Rename);
    let (form_area, list_area) = if show_form {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);
        (Some(layout[0]), layout[1])
    } else {
        (None, area)
    };

    if let Some(form_area) = form_area {
        render_group_form(frame, form_area, state, theme);
    }
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.groups.items.is_empty() {
        let lines = vec![Line::from(vec![
            Span::raw("Nenhum grupo. Pressione "),
            Span::styled("c", Style::default().fg(theme.accent)),
            Span::raw(" para criar um."),
        ])];
        let empty_msg = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty_msg, list_area);
        return;
    }

    let items = state
        .groups
        .items
        .iter()
        .map(|group| {
            let count = group.expenses.len();
            let label = if count == 1 { "despesa" } else { "despesas" };
            let spans = vec![
                Span::styled(group.name.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                money::amount_span(totals::row_total(&group.expenses), theme),
                Span::raw("  "),
                Span::styled(format!("· {count} {label}"), Style::default().fg(theme.dim)),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.groups.selected));

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

fn render_group_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.groups.form;
    let is_rename = state.groups.mode == GroupsMode::Rename;

    let mut lines = Vec::new();
    lines.push(render_field("Nome", form.name.as_str(), true, theme));
    lines.push(Line::from(Span::styled(
        if is_rename {
            "Enter: renomear • Esc: cancelar"
        } else {
            "Enter: criar • Esc: cancelar"
        },
        Style::default().fg(theme.dim),
    )));
    if let Some(err) = form.error.as_ref() {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    let block = Block::default()
        .title(if is_rename { "Renomear grupo" } else { "Novo grupo" })
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_expenses(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let show_form = matches!(
        state.groups.mode,
        GroupsMode::NewExpense | GroupsMode::EditExpense
    );
    let (form_area, list_area) = if show_form {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(area);
        (Some(layout[0]), layout[1])
    } else {
        (None, area)
    };

    if let Some(form_area) = form_area {
        render_expense_form(frame, form_area, state, theme);
    }

    if let Some(err) = state.groups.detail.error.as_ref() {
        let block = Block::default()
            .title("Despesas")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.error));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.as_str(),
                Style::default().fg(theme.error),
            )))
            .alignment(Alignment::Center)
            .block(block),
            list_area,
        );
        return;
    }

    let list_block = Block::default()
        .title("Despesas")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    if state.groups.detail.expenses.is_empty() {
        let empty_msg = Paragraph::new(Line::from("Nenhuma despesa encontrada."))
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(empty_msg, list_area);
        return;
    }

    let items = state
        .groups
        .detail
        .expenses
        .iter()
        .map(|expense| ListItem::new(expense_line(expense, state, theme)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(Some(state.groups.detail.selected));

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

fn expense_line(expense: &ExpenseView, state: &AppState, theme: &Theme) -> Line<'static> {
    let when = expense
        .created_at
        .with_timezone(&state.timezone)
        .format("%d %b %H:%M")
        .to_string();
    let payer = expense
        .payer
        .as_ref()
        .map(|payer| payer.name.as_str())
        .unwrap_or("Desconhecido");

    let mut spans = vec![
        Span::styled(when, Style::default().fg(theme.dim)),
        Span::raw(" "),
        Span::raw(expense.name.clone()),
        Span::raw("  "),
        money::amount_span(Money::new(expense.amount_cents), theme),
        Span::raw("  "),
        Span::styled(format!("Pago por: {payer}"), Style::default().fg(theme.dim)),
    ];
    if let Some(method) = expense.payment_method.as_ref() {
        spans.push(Span::raw(" "));
        spans.push(chips::color_chip(&method.name, &method.color));
    }
    for tag in &expense.tags {
        spans.push(Span::raw(" "));
        spans.push(chips::color_chip(&tag.name, &tag.color));
    }
    Line::from(spans)
}

fn render_expense_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.groups.detail.form;
    let editing = state.groups.mode == GroupsMode::EditExpense;

    let payer = form
        .payer_index
        .and_then(|index| state.users.items.get(index))
        .map(|user| user.name.as_str())
        .unwrap_or("Selecione...");
    let method = form
        .method_index
        .and_then(|index| state.methods.items.get(index))
        .map(|method| method.name.as_str())
        .unwrap_or("Selecione...");

    let mut lines = vec![
        render_field("Nome", form.name.as_str(), form.focus == ExpenseFormField::Name, theme),
        render_field(
            "Valor",
            form.amount.as_str(),
            form.focus == ExpenseFormField::Amount,
            theme,
        ),
        render_field("Pago por", payer, form.focus == ExpenseFormField::Payer, theme),
        render_field("Pagamento", method, form.focus == ExpenseFormField::Method, theme),
        tags_line(state, theme),
        Line::from(Span::styled(
            "Enter: salvar • Tab: próximo • ↑↓: escolher • Espaço: marcar tag • Esc: cancelar",
            Style::default().fg(theme.dim),
        )),
    ];
    if let Some(err) = form.error.as_ref() {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(theme.error),
        )));
    }

    let card = Card::new(if editing { "Editar despesa" } else { "Nova despesa" }, theme)
        .focused(true);
    card.render_with(frame, area, Paragraph::new(lines));
}

/// Tag picker line. The cursor entry is bracketed, chosen tags render as
/// chips, the rest stay dim.
fn tags_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let form = &state.groups.detail.form;
    let focused = form.focus == ExpenseFormField::Tags;
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut spans = vec![
        Span::styled(format!("{:<10}", "Tags"), label_style),
        Span::raw(" "),
    ];

    if state.tags.items.is_empty() {
        spans.push(Span::styled(
            "Nenhuma tag cadastrada",
            Style::default().fg(theme.dim),
        ));
        return Line::from(spans);
    }

    for (i, tag) in state.tags.items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let at_cursor = focused && i == form.tag_cursor;
        if at_cursor {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
        }
        if form.selected_tags.contains(&tag.id) {
            spans.push(chips::color_chip(&tag.name, &tag.color));
        } else {
            spans.push(Span::styled(
                tag.name.clone(),
                Style::default().fg(theme.dim),
            ));
        }
        if at_cursor {
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        }
    }

    Line::from(spans)
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    if state.groups.detail.group_id.is_none() {
        render_empty(frame, area, theme, "Nenhum grupo selecionado.");
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let expenses = &state.groups.detail.expenses;
    let count = expenses.len();
    let label = if count == 1 { "despesa" } else { "despesas" };
    StatCard::new("Total", totals::total_amount(expenses).to_string(), theme)
        .value_color(theme.positive)
        .subtitle(format!("{count} {label}"))
        .render(frame, layout[0]);

    let lines = totals::per_payer_totals(expenses)
        .into_iter()
        .map(|(name, total)| {
            Line::from(vec![
                Span::raw(format!("{name:<14}")),
                money::total_span(total, theme),
            ])
        })
        .collect::<Vec<_>>();

    let card = Card::new("Por pessoa", theme);
    if lines.is_empty() {
        card.render_with(
            frame,
            layout[1],
            Paragraph::new(Line::from(Span::styled(
                "Sem despesas para dividir.",
                Style::default().fg(theme.dim),
            ))),
        );
    } else {
        card.render_with(frame, layout[1], Paragraph::new(lines));
    }
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

fn render_empty(frame: &mut Frame<'_>, area: Rect, theme: &Theme, message: &str) {
    let block = Block::default()
        .title("Resumo")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(
        Paragraph::new(Line::from(message.to_string()))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}
