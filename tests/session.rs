use chrono::NaiveDate;
use crossterm::event::KeyCode;
use satsang_manager::{App, AppConfig, Page, Report, View};

fn app() -> App {
    App::new(
        &AppConfig::default(),
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
    )
}

fn press(app: &mut App, keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| app.handle_key(*key))
}

#[test]
fn q_quits_from_sidebar() {
    let mut app = app();
    assert!(app.handle_key(KeyCode::Char('q')));
}

#[test]
fn save_from_content_shows_success() {
    let mut app = app();
    // Backwards from the tab selector: Cancel Satsang, then Save Satsang.
    let quit = press(
        &mut app,
        &[KeyCode::Right, KeyCode::BackTab, KeyCode::BackTab, KeyCode::Enter],
    );
    assert!(!quit);
    assert_eq!(app.status_text(), Some("Satsang data saved successfully!"));
}

#[test]
fn typing_q_in_a_form_does_not_quit() {
    let mut app = app();
    assert!(!press(&mut app, &[KeyCode::Right, KeyCode::Char('q')]));
    assert!(press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]));
}

#[test]
fn walk_through_every_page() {
    let mut app = app();
    assert_eq!(app.navigation().view(), View::DataEntryForm);

    press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.navigation().view(), View::SelectReportPlaceholder);

    press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.navigation().current_report(), Some(Report::AverageSangat));

    press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.navigation().current_report(), Some(Report::CentreListing));

    press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.navigation().current_page(), Page::Settings);
    assert_eq!(app.navigation().current_report(), None);
}

#[test]
fn settings_save_reports_success() {
    let mut app = app();
    // Settings is the third sidebar entry; its form wraps backwards onto Save.
    press(
        &mut app,
        &[KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Right, KeyCode::BackTab, KeyCode::Enter],
    );
    assert_eq!(app.status_text(), Some("Settings saved successfully!"));
}

#[test]
fn export_acknowledges_format() {
    let mut app = app();
    // Open Centre Listing, enter its form, and step back from the filters
    // toggle onto "Export to PDF".
    press(
        &mut app,
        &[
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Right,
            KeyCode::BackTab,
            KeyCode::Enter,
        ],
    );
    assert_eq!(app.navigation().view(), View::CentreListingReport);
    assert_eq!(app.status_text(), Some("Report exported to PDF!"));
}
