// Tracker view: header, add form and the day sections
//
// Everything drawn here comes from the ViewTree; the only App state read
// directly is the cursor, the spinner frame and the theme.

use crate::model::{TrainingType, Weekday};
use crate::tui::app::App;
use crate::tui::components::formatters::{fit_width, max_label_width};
use crate::tui::view_model::{FormPanel, Header, ViewTree};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Title line + totals line + borders
pub const HEADER_HEIGHT: u16 = 4;
/// Day line + type line + buttons + borders
pub const FORM_HEIGHT: u16 = 5;

pub fn render_header(f: &mut Frame, area: Rect, header: &Header, app: &App) {
    let theme = &app.theme;

    let mut title = vec![Span::styled(
        format!("📅 {}", header.title),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )];
    if header.loading {
        title.push(Span::styled(
            format!("  {} carregando…", app.spinner_frame()),
            Style::default().fg(theme.muted),
        ));
    }

    let mut totals = vec![Span::styled(
        format!("Total de treinos: {}", header.total),
        Style::default().fg(theme.muted),
    )];
    for (i, (kind, count)) in header.counts.iter().enumerate() {
        totals.push(Span::raw(if i == 0 { "  │  " } else { " · " }));
        totals.push(Span::styled(
            format!("{} {}", kind, count),
            Style::default().fg(theme.kind_color(*kind)),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(title), Line::from(totals)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border)),
    );

    f.render_widget(paragraph, area);
}

pub fn render_form(f: &mut Frame, area: Rect, form: &FormPanel, app: &App) {
    let theme = &app.theme;
    let label_style = Style::default().fg(theme.muted);
    let value_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let picker = |label: &'static str, value: Option<String>, placeholder: &'static str| {
        let value = match value {
            Some(v) => Span::styled(format!("◀ {} ▶", v), value_style),
            None => Span::styled(placeholder, label_style),
        };
        Line::from(vec![Span::styled(label, label_style), value])
    };

    let save_style = if form.can_submit {
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.status_bar)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };

    let lines = vec![
        picker(
            "Dia:  ",
            form.day.map(|d| d.to_string()),
            "Escolha o dia (←/→)",
        ),
        picker(
            "Tipo: ",
            form.kind.map(|k| k.to_string()),
            "Escolha o tipo (↑/↓)",
        ),
        Line::from(vec![
            Span::styled(" Salvar (Enter) ", save_style),
            Span::raw("  "),
            Span::styled(" Cancelar (Esc) ", Style::default().fg(theme.foreground)),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .title(" Novo treino "),
    );

    f.render_widget(paragraph, area);
}

pub fn render_days(f: &mut Frame, area: Rect, tree: &ViewTree, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Semana ");

    if tree.sections.is_empty() {
        let message = if tree.header.loading {
            "Carregando treinos…"
        } else {
            "Nenhum treino registrado. Pressione 'a' para adicionar."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let kind_width = max_label_width(TrainingType::ALL.iter().map(|k| k.label()));
    let day_width = max_label_width(Weekday::ALL.iter().map(|d| d.label()));

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_item = None;
    let mut row_index = 0;

    for section in &tree.sections {
        items.push(ListItem::new(Line::from(Span::styled(
            fit_width(section.day.label(), day_width),
            Style::default()
                .fg(theme.day_header)
                .add_modifier(Modifier::BOLD),
        ))));

        for row in &section.rows {
            if row_index == app.cursor {
                selected_item = Some(items.len());
            }
            row_index += 1;

            items.push(ListItem::new(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    fit_width(row.kind.label(), kind_width),
                    Style::default().fg(theme.kind_color(row.kind)),
                ),
                Span::raw("  "),
                Span::styled(row.date.clone(), Style::default().fg(theme.muted)),
                Span::styled(format!("  #{:<5}", row.id.0), Style::default().fg(theme.muted)),
                Span::styled("×", Style::default().fg(theme.error)),
            ])));
        }
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default().with_selected(selected_item);
    f.render_stateful_widget(list, area, &mut state);
}
