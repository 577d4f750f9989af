use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::containers::{BillsList, Route};
use crate::models::{Session, EXPENSE_TYPES};
use crate::store::BillsStore;
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut dyn BillsStore, session: Session) -> Result<()> {
    let mut app = App::new(session);
    app.refresh_bills(Some(&*store));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut dyn BillsStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store),
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Browse => handle_browser_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut dyn BillsStore) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => match app.route {
            Route::Bills => handle_bills_input(key, app, store),
            Route::NewBill => handle_new_bill_input(key, app, store),
        },
    }
}

fn handle_bills_input(key: event::KeyEvent, app: &mut App, store: &mut dyn BillsStore) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => scroll_down(
            &mut app.bill_index,
            &mut app.bill_scroll,
            app.bills.len(),
            app.visible_rows,
        ),
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut app.bill_index, &mut app.bill_scroll),
        KeyCode::Char('g') => scroll_to_top(&mut app.bill_index, &mut app.bill_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.bill_index,
            &mut app.bill_scroll,
            app.bills.len(),
            app.visible_rows,
        ),
        KeyCode::Char('n') => {
            app.route = BillsList::new(None).click_new_bill();
            app.reset_form();
            app.set_status("");
        }
        KeyCode::Char('r') => {
            app.refresh_bills(Some(&*store));
            app.set_status("Liste rafraîchie");
        }
        KeyCode::Enter => {
            if let Some(row) = app.selected_bill() {
                let modal = BillsList::new(None).click_icon_eye(row);
                app.receipt_modal = Some(modal);
            }
        }
        KeyCode::Esc => {
            app.receipt_modal = None;
        }
        _ => {}
    }
}

fn handle_new_bill_input(key: event::KeyEvent, app: &mut App, store: &mut dyn BillsStore) {
    let fields = FormField::all();
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            match app.form.submit(store) {
                Ok(route) => {
                    app.route = route;
                    app.refresh_bills(Some(&*store));
                    app.set_status("Note de frais envoyée");
                }
                Err(err) => app.set_status(err.to_string()),
            }
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.field_index + 1 < fields.len() {
                app.field_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.field_index = app.field_index.saturating_sub(1);
        }
        KeyCode::Char('+') | KeyCode::Char('=')
            if fields[app.field_index] == FormField::ExpenseType =>
        {
            cycle_expense_type(app, 1);
        }
        KeyCode::Char('-') if fields[app.field_index] == FormField::ExpenseType => {
            cycle_expense_type(app, -1);
        }
        KeyCode::Enter => match fields[app.field_index] {
            FormField::ExpenseType => cycle_expense_type(app, 1),
            FormField::Receipt => {
                app.input_mode = InputMode::Browse;
                app.refresh_browser();
            }
            field => {
                app.edit_buffer = field_value(app, field);
                app.input_mode = InputMode::Editing;
            }
        },
        KeyCode::Esc => {
            app.route = Route::Bills;
            app.set_status("");
        }
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            commit_field(app);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.edit_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.edit_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_browser_input(key: event::KeyEvent, app: &mut App, store: &mut dyn BillsStore) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => scroll_down(
            &mut app.browser_index,
            &mut app.browser_scroll,
            app.browser_entries.len(),
            app.visible_rows,
        ),
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.browser_index, &mut app.browser_scroll)
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.browser_index, &mut app.browser_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.browser_index,
            &mut app.browser_scroll,
            app.browser_entries.len(),
            app.visible_rows,
        ),
        KeyCode::Enter => {
            let Some(entry) = app.browser_entries.get(app.browser_index).cloned() else {
                return;
            };
            if entry.is_dir() {
                app.browser_path = entry;
                app.refresh_browser();
            } else {
                match app.form.attach_receipt(store, &entry) {
                    Ok(()) => {
                        app.input_mode = InputMode::Normal;
                        app.set_status("Justificatif envoyé");
                    }
                    Err(err) => app.set_status(err.to_string()),
                }
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn field_value(app: &App, field: FormField) -> String {
    match field {
        FormField::ExpenseType => app.form.fields.expense_type.clone(),
        FormField::Name => app.form.fields.name.clone(),
        FormField::Date => app.form.fields.date.clone(),
        FormField::Amount => app.form.fields.amount.clone(),
        FormField::Vat => app.form.fields.vat.clone(),
        FormField::Pct => app.form.fields.pct.clone(),
        FormField::Commentary => app.form.fields.commentary.clone(),
        FormField::Receipt => String::new(),
    }
}

fn commit_field(app: &mut App) {
    let value = std::mem::take(&mut app.edit_buffer);
    match FormField::all()[app.field_index] {
        FormField::ExpenseType => {
            // Free text is not allowed here, the value must be one of the
            // known categories.
            if EXPENSE_TYPES.contains(&value.as_str()) {
                app.form.fields.expense_type = value;
            }
        }
        FormField::Name => app.form.fields.name = value,
        FormField::Date => app.form.fields.date = value,
        FormField::Amount => app.form.fields.amount = value,
        FormField::Vat => app.form.fields.vat = value,
        FormField::Pct => app.form.fields.pct = value,
        FormField::Commentary => app.form.fields.commentary = value,
        FormField::Receipt => {}
    }
}

fn cycle_expense_type(app: &mut App, step: isize) {
    let idx = EXPENSE_TYPES
        .iter()
        .position(|t| *t == app.form.fields.expense_type)
        .unwrap_or(0) as isize;
    let len = EXPENSE_TYPES.len() as isize;
    let next = (idx + step).rem_euclid(len) as usize;
    app.form.fields.expense_type = EXPENSE_TYPES[next].to_string();
}
