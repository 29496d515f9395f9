//! Key handling for the entry screen
//!
//! Printable keys edit the input; Tab, Enter and Esc accept, submit and
//! cancel; the function keys change the selection.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App<'_>, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => app.set_today(Local::now().date_naive()),
        Event::Resize(_, _) => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App<'_>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            app.cancel();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab => app.accept_suggestion(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::End => app.input.move_end(),
        KeyCode::F(1) => app.cycle_wallet(),
        KeyCode::F(2) => app.cycle_merchant(),
        KeyCode::F(3) => app.cycle_category(),
        KeyCode::F(4) => app.toggle_continuous(),
        KeyCode::PageUp => app.shift_date(1),
        KeyCode::PageDown => app.shift_date(-1),
        KeyCode::Home => app.clear_date(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::TallyResult;
    use crate::models::{DraftTransaction, KnownVocabulary, TransactionRecord, Wallet, WalletType};
    use crate::parser::Lexicon;
    use crate::session::{InputSession, SessionState, TransactionSink};
    use chrono::NaiveDate;

    struct NullSink;

    impl TransactionSink for NullSink {
        fn submit(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
            Ok(TransactionRecord::from_draft(draft))
        }
    }

    fn press(app: &mut App<'_>, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn new_app<'a>(sink: &'a NullSink, settings: &'a Settings) -> App<'a> {
        let session = InputSession::new(
            KnownVocabulary::default(),
            Lexicon::default(),
            Wallet::new("Cash", WalletType::Cash),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );
        App::new(sink, settings, session)
    }

    #[test]
    fn test_type_accept_submit() {
        let settings = Settings::default();
        let mut app = new_app(&NullSink, &settings);

        for c in "99 groc".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.text(), "99 Groceries ");

        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
        assert_eq!(app.state(), SessionState::Closed);
        assert_eq!(app.submitted.len(), 1);
    }

    #[test]
    fn test_function_keys() {
        let settings = Settings::default();
        let mut app = new_app(&NullSink, &settings);
        for c in "250".chars() {
            press(&mut app, KeyCode::Char(c));
        }

        press(&mut app, KeyCode::F(1));
        assert_eq!(app.session.selection().wallet.name, "Personal & Payroll");
        press(&mut app, KeyCode::F(3));
        assert_eq!(app.session.selection().category.as_deref(), Some("Groceries"));
        press(&mut app, KeyCode::F(4));
        assert!(app.session.is_continuous());

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.effective_date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        press(&mut app, KeyCode::Home);
        assert_eq!(app.session.selection().date, None);
    }

    #[test]
    fn test_escape_and_ctrl_c_cancel() {
        let settings = Settings::default();
        let mut app = new_app(&NullSink, &settings);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state(), SessionState::Cancelled);

        let mut app = new_app(&NullSink, &settings);
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
        assert_eq!(app.session.text(), "");
    }
}
