use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if let Some(ref message) = app.error_banner {
        render_error_banner(f, area, message);
        return;
    }

    if app.bills.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucune note de frais pour le moment",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Appuyez sur n pour en créer une",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Notes de frais (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Type", "Nom", "Date", "Montant", "Statut"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .bills
        .iter()
        .enumerate()
        .skip(app.bill_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, bill)| {
            let style = if i == app.bill_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(truncate(&bill.expense_type, 22)),
                Cell::from(truncate(&bill.name, 32)),
                Cell::from(bill.date.clone()),
                Cell::from(format_amount(bill.amount)),
                Cell::from(Span::styled(
                    bill.status.clone(),
                    theme::status_style(&bill.status),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Notes de frais ({}) ", app.bills.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);

    if let Some(ref modal) = app.receipt_modal {
        render_receipt_modal(f, area, modal);
    }
}

/// Full-page banner carrying the store's literal error message
/// ("Erreur 404", "Erreur 500").
fn render_error_banner(f: &mut Frame, area: Rect, message: &str) {
    let body = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::banner_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Appuyez sur r pour réessayer",
            theme::dim_style(),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::RED))
        .title(Span::styled(" Erreur ", theme::banner_style()));
    f.render_widget(Paragraph::new(body).centered().block(block), area);
}

fn render_receipt_modal(f: &mut Frame, area: Rect, modal: &crate::containers::ReceiptModal) {
    let body = vec![
        Line::from(""),
        Line::from(Span::styled(
            modal.file_name.clone(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            truncate(&modal.file_url, 60),
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled("Échap pour fermer", theme::dim_style())),
    ];

    let popup_width = 66.min(area.width.saturating_sub(4));
    let popup_height = (body.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(body).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG))
            .title(Span::styled(" Justificatif ", theme::header_style())),
    );
    f.render_widget(popup, popup_area);
}
