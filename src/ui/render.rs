use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::containers::Route;

use super::app::{route_title, App, InputMode};
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Message bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    match app.route {
        Route::Bills => super::screens::bills::render(f, chunks[1], app),
        Route::NewBill => super::screens::new_bill::render(f, chunks[1], app),
    }
    render_status_bar(f, chunks[2], app);
    render_message_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = route_title(app.route);
    let left = Line::from(vec![
        Span::styled(
            " Billed ",
            Style::default()
                .fg(theme::ACCENT)
                .bg(theme::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {title}"),
            Style::default().fg(theme::HEADER_FG).bg(theme::HEADER_BG),
        ),
    ]);
    let user = format!("{} ({}) ", app.session.email, app.session.user_type);

    let available = area.width as usize;
    let used: usize = left.width() + user.chars().count();
    let pad = available.saturating_sub(used);

    let mut spans = left.spans;
    spans.push(Span::styled(
        " ".repeat(pad),
        Style::default().bg(theme::HEADER_BG),
    ));
    spans.push(Span::styled(
        user,
        Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Browse => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} | {} notes", route_title(app.route), app.bills.len());

    let right = match app.route {
        Route::Bills => " n nouvelle | Entrée justificatif | r rafraîchir | ? aide ",
        Route::NewBill => " Ctrl-s envoyer | Échap retour | ? aide ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode_label, mode_style),
        Span::styled(info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_message_bar(f: &mut Frame, area: Rect, app: &App) {
    let content = if app.status_message.is_empty() {
        Line::from(Span::styled(
            " ? pour l'aide, Ctrl-q pour quitter",
            theme::dim_style(),
        ))
    } else {
        Line::from(Span::styled(
            app.status_message.as_str(),
            theme::message_bar_style(),
        ))
    };
    let bar = Paragraph::new(content).style(Style::default().bg(theme::MESSAGE_BG));
    f.render_widget(bar, area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            " BillTUI — aide ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Notes de frais",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  j/k ou flèches   Naviguer          Entrée   Voir le justificatif",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  n                Nouvelle note     r        Rafraîchir",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Nouvelle note",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  j/k              Changer de champ  Entrée   Modifier / choisir",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  +/- (Type)       Changer le type   Ctrl-s   Envoyer la note",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Échap   Retour/Fermer        Ctrl-q   Quitter",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Appuyez sur une touche pour fermer ",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
