#![allow(clippy::unwrap_used)]

use ratatui::{backend::TestBackend, Terminal};

use crate::containers::Route;
use crate::models::{Session, UserType};
use crate::store::mock::MockStore;
use crate::store::{BillsStore, StoreError};

use super::app::{App, InputMode};
use super::render::render;

fn session() -> Session {
    Session::new(UserType::Employee, "employee@test.tld".into())
}

fn draw(app: &App) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| render(f, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

// ── bills page ──

#[test]
fn bills_page_shows_title_and_user() {
    let mut app = App::new(session());
    let store = MockStore::with_fixtures();
    app.refresh_bills(Some(&store as &dyn BillsStore));

    let screen = draw(&app);
    assert!(screen.contains("Mes notes de frais"));
    assert!(screen.contains("employee@test.tld"));
}

#[test]
fn bills_page_shows_formatted_rows() {
    let mut app = App::new(session());
    let store = MockStore::with_fixtures();
    app.refresh_bills(Some(&store as &dyn BillsStore));

    let screen = draw(&app);
    assert!(screen.contains("Hôtel et logement"));
    assert!(screen.contains("encore"));
    assert!(screen.contains("4 Avr. 04"));
    assert!(screen.contains("1 Jan. 01"));
    assert!(screen.contains("En attente"));
    assert!(screen.contains("Accepté"));
    assert!(screen.contains("Refusé"));
    assert!(screen.contains("400,00 €"));
}

#[test]
fn empty_bills_page_shows_placeholder() {
    let mut app = App::new(session());
    let store = MockStore::empty();
    app.refresh_bills(Some(&store as &dyn BillsStore));

    let screen = draw(&app);
    assert!(screen.contains("Aucune note de frais pour le moment"));
    assert!(screen.contains("Notes de frais (0)"));
}

#[test]
fn list_failure_renders_literal_error_message() {
    let mut app = App::new(session());
    let store = MockStore::failing_list(StoreError::NotFound);
    app.refresh_bills(Some(&store as &dyn BillsStore));

    let screen = draw(&app);
    assert!(screen.contains("Erreur 404"));
    assert!(screen.contains("Appuyez sur r pour réessayer"));
    // The table is replaced entirely by the banner.
    assert!(!screen.contains("Hôtel et logement"));
}

#[test]
fn internal_failure_renders_erreur_500() {
    let mut app = App::new(session());
    let store = MockStore::failing_list(StoreError::Internal);
    app.refresh_bills(Some(&store as &dyn BillsStore));

    let screen = draw(&app);
    assert!(screen.contains("Erreur 500"));
}

#[test]
fn receipt_modal_shows_file_details() {
    let mut app = App::new(session());
    let store = MockStore::with_fixtures();
    app.refresh_bills(Some(&store as &dyn BillsStore));
    let row = app.selected_bill().unwrap().clone();
    app.receipt_modal = Some(crate::containers::BillsList::new(None).click_icon_eye(&row));

    let screen = draw(&app);
    assert!(screen.contains("encore.jpg"));
    assert!(screen.contains("Échap pour fermer"));
}

// ── new-bill page ──

#[test]
fn new_bill_page_shows_form_fields() {
    let mut app = App::new(session());
    app.route = Route::NewBill;
    app.reset_form();

    let screen = draw(&app);
    assert!(screen.contains("Envoyer une note de frais"));
    assert!(screen.contains("Type de dépense"));
    assert!(screen.contains("Montant TTC"));
    assert!(screen.contains("Justificatif"));
    // First expense type is preselected.
    assert!(screen.contains("Transports"));
}

#[test]
fn new_bill_page_without_receipt_shows_hint() {
    let mut app = App::new(session());
    app.route = Route::NewBill;
    app.reset_form();

    let screen = draw(&app);
    assert!(screen.contains("jpg, jpeg ou png"));
}

#[test]
fn editing_field_shows_buffer_and_mode() {
    let mut app = App::new(session());
    app.route = Route::NewBill;
    app.reset_form();
    app.field_index = 1;
    app.input_mode = InputMode::Editing;
    app.edit_buffer = "Vol Paris Londres".into();

    let screen = draw(&app);
    assert!(screen.contains("Vol Paris Londres"));
    assert!(screen.contains("EDIT"));
}

// ── overlays ──

#[test]
fn help_overlay_renders_on_top() {
    let mut app = App::new(session());
    app.show_help = true;

    let screen = draw(&app);
    assert!(screen.contains("Quitter"));
    assert!(screen.contains("Nouvelle note"));
}

#[test]
fn status_message_appears_in_message_bar() {
    let mut app = App::new(session());
    app.set_status("Note de frais envoyée");

    let screen = draw(&app);
    assert!(screen.contains("Note de frais envoyée"));
}
