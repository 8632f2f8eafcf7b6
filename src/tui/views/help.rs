// Help overlay: key bindings by context, then the active theme and store.

use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// (section, [(keys, action)])
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Treinos",
        &[
            ("a", "Novo treino"),
            ("↑/↓, k/j", "Mover seleção"),
            ("d, Del", "Remover selecionado"),
            ("r", "Recarregar lista"),
        ],
    ),
    (
        "Formulário",
        &[
            ("←/→, h/l", "Escolher dia"),
            ("↑/↓, k/j", "Escolher tipo"),
            ("Enter", "Salvar"),
            ("Esc", "Cancelar"),
        ],
    ),
    (
        "Geral",
        &[
            ("L", "Mostrar/ocultar logs"),
            ("?", "Esta ajuda"),
            ("q", "Sair"),
        ],
    ),
];

const HELP_WIDTH: u16 = 44;

pub fn render(f: &mut Frame, app: &App) {
    match &app.modal {
        Some(modal @ Modal::Help) => render_help(f, app, modal.title()),
        None => {}
    }
}

fn render_help(f: &mut Frame, app: &App, title: &str) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.title);
    let desc_style = Style::default().fg(theme.foreground);
    let section_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (section, keys) in BINDINGS {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("  {}", section), section_style));
        lines.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("    {:<12}", key), key_style),
                Span::styled(*action, desc_style),
            ])
        }));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  Tema: ", desc_style),
        Span::styled(theme.name.as_str(), key_style),
        Span::styled("  |  Loja: ", desc_style),
        Span::styled(app.session.store_name(), key_style),
    ]));

    // Content plus the two border rows
    let height = lines.len() as u16 + 2;
    let area = centered(f.area(), HELP_WIDTH, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .border_type(theme.border_type)
        .title(title)
        .title_bottom(Line::from(" ? ou Esc para fechar ").centered());

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(block),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
