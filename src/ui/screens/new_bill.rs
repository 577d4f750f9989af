use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::containers::ReceiptState;
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    render_fields(f, chunks[0], app);
    render_receipt_status(f, chunks[1], app);

    if app.input_mode == InputMode::Browse {
        render_file_browser(f, area, app);
    }
}

fn field_value(app: &App, field: FormField) -> String {
    match field {
        FormField::ExpenseType => app.form.fields.expense_type.clone(),
        FormField::Name => app.form.fields.name.clone(),
        FormField::Date => app.form.fields.date.clone(),
        FormField::Amount => app.form.fields.amount.clone(),
        FormField::Vat => app.form.fields.vat.clone(),
        FormField::Pct => app.form.fields.pct.clone(),
        FormField::Commentary => app.form.fields.commentary.clone(),
        FormField::Receipt => app
            .form
            .receipt_file_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "—".into()),
    }
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = FormField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == app.field_index;
            let editing = selected && app.input_mode == InputMode::Editing;
            let value = if editing {
                format!("{}▏", app.edit_buffer)
            } else {
                field_value(app, *field)
            };
            let value_style = if editing {
                Style::default().fg(theme::GREEN)
            } else if selected {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<20}", field.label()),
                    Style::default().fg(theme::TEXT_DIM),
                ),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " j/k naviguer | Entrée modifier | Ctrl-s envoyer | Échap retour ",
                theme::dim_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_receipt_status(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.form.state() {
        ReceiptState::Empty => (
            "Aucun justificatif — sélectionnez un fichier jpg, jpeg ou png".to_string(),
            theme::dim_style(),
        ),
        ReceiptState::Uploading => ("Envoi du justificatif…".to_string(), theme::dim_style()),
        ReceiptState::Uploaded(r) => (
            format!("Justificatif envoyé: {}", r.file_name),
            Style::default().fg(theme::GREEN),
        ),
        ReceiptState::Submitting(_) => ("Envoi en cours…".to_string(), theme::dim_style()),
        ReceiptState::Submitted => (
            "Note de frais envoyée".to_string(),
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        ),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Justificatif ", theme::dim_style())),
    );
    f.render_widget(paragraph, area);
}

fn render_file_browser(f: &mut Frame, area: Rect, app: &App) {
    let popup_width = area.width.saturating_sub(8).min(72);
    let popup_height = area.height.saturating_sub(4).min(20);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let page = popup_height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .browser_entries
        .iter()
        .enumerate()
        .skip(app.browser_scroll)
        .take(page.max(1))
        .map(|(i, path)| {
            let name = if Some(path.as_path()) == app.browser_path.parent() {
                "..".to_string()
            } else {
                let base = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("?")
                    .to_string();
                if path.is_dir() {
                    format!("{base}/")
                } else {
                    base
                }
            };
            let style = if i == app.browser_index {
                theme::selected_style()
            } else if path.is_dir() {
                Style::default().fg(theme::ACCENT)
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(Span::styled(truncate(&name, 64), style)))
        })
        .collect();

    f.render_widget(Clear, popup_area);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(
                format!(
                    " Justificatif: {} ",
                    truncate(&app.browser_path.display().to_string(), 50)
                ),
                theme::header_style(),
            )),
    );
    f.render_widget(list, popup_area);
}
