//! Application state for the entry screen
//!
//! Wraps one `InputSession` and the text widget mirroring its input. The
//! session owns the text; the widget only adds a cursor on top of it.

use chrono::{Duration, NaiveDate};

use crate::config::Settings;
use crate::models::TransactionRecord;
use crate::parser::last_token;
use crate::session::{AfterSubmit, InputSession, SessionState, SubmitOutcome, TransactionSink};

use super::widgets::TextInput;

/// Kind of status message in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Footer message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Main application state
pub struct App<'a> {
    /// Where submitted drafts go
    pub sink: &'a dyn TransactionSink,

    /// Application settings
    pub settings: &'a Settings,

    /// The entry session
    pub session: InputSession,

    /// Input widget state (content mirrors the session text)
    pub input: TextInput,

    /// Records submitted during this run, newest first
    pub submitted: Vec<TransactionRecord>,

    /// Footer message
    pub status: Option<StatusMessage>,

    /// Whether the app should quit
    pub should_quit: bool,
}

/// Step through `items` from `current`: none → first → ... → last → none
fn cycle_optional<'i>(items: &'i [String], current: Option<&str>) -> Option<&'i String> {
    match current.and_then(|c| items.iter().position(|i| i == c)) {
        None => items.first(),
        Some(index) => items.get(index + 1),
    }
}

impl<'a> App<'a> {
    /// Create a new App
    pub fn new(sink: &'a dyn TransactionSink, settings: &'a Settings, session: InputSession) -> Self {
        let mut input = TextInput::new()
            .label("Entry")
            .placeholder("250 jollibee lunch tomorrow")
            .focused(true);
        input.set_content(session.text());

        Self {
            sink,
            settings,
            session,
            input,
            submitted: Vec::new(),
            status: None,
            should_quit: false,
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    /// Push the widget text into the session
    fn push_input(&mut self) {
        self.session.set_text(self.input.value());
    }

    /// Pull the session text into the widget (after the session rewrote it)
    fn pull_input(&mut self) {
        if self.input.value() != self.session.text() {
            self.input.set_content(self.session.text());
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if self.input.cursor_at_end() {
            self.session.insert_char(c);
            self.input.set_content(self.session.text());
        } else {
            self.input.insert(c);
            self.push_input();
        }
    }

    pub fn backspace(&mut self) {
        if self.input.cursor_at_end() {
            self.session.backspace();
            self.input.set_content(self.session.text());
        } else {
            self.input.backspace();
            self.push_input();
        }
    }

    pub fn delete(&mut self) {
        self.input.delete();
        self.push_input();
    }

    /// Tab: take the live suggestion
    pub fn accept_suggestion(&mut self) {
        if self.session.accept_suggestion() {
            self.input.set_content(self.session.text());
        }
    }

    /// Rest of the suggestion after what was typed of the last word, shown
    /// as ghost text when the cursor is at the end
    pub fn ghost_text(&self) -> Option<String> {
        if !self.input.cursor_at_end() {
            return None;
        }
        let suggestion = self.session.suggestion()?;
        let typed = last_token(self.session.text());
        let typed_chars = typed.chars().count();
        let matches_prefix = suggestion
            .text
            .chars()
            .zip(typed.chars())
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()));

        if matches_prefix && suggestion.text.chars().count() >= typed_chars {
            let rest: String = suggestion.text.chars().skip(typed_chars).collect();
            Some(format!("{}  ⇥ {}", rest, suggestion.label))
        } else {
            Some(format!("  → {}  ⇥ {}", suggestion.text, suggestion.label))
        }
    }

    /// F1: next wallet, wrapping around
    pub fn cycle_wallet(&mut self) {
        let wallets = &self.session.vocabulary().wallets;
        if wallets.is_empty() {
            return;
        }
        let current = &self.session.selection().wallet;
        let next = wallets
            .iter()
            .position(|w| w == current)
            .map(|i| (i + 1) % wallets.len())
            .unwrap_or(0);
        let wallet = wallets[next].clone();
        self.session.select_wallet(wallet);
    }

    /// F2: next merchant, passing through "none"
    pub fn cycle_merchant(&mut self) {
        let next = cycle_optional(
            &self.session.vocabulary().merchants,
            self.session.selection().merchant.as_deref(),
        )
        .cloned();
        self.session.select_merchant(next);
        self.pull_input();
    }

    /// F3: next category, passing through "none"
    pub fn cycle_category(&mut self) {
        let next = cycle_optional(
            &self.session.vocabulary().categories,
            self.session.selection().category.as_deref(),
        )
        .cloned();
        self.session.select_category(next);
        self.pull_input();
    }

    /// F4
    pub fn toggle_continuous(&mut self) {
        let on = self.session.toggle_continuous();
        let text = if on {
            "Continuous mode on"
        } else {
            "Continuous mode off"
        };
        self.set_status(StatusKind::Info, text);
    }

    /// The date the next submit would use
    pub fn effective_date(&self) -> NaiveDate {
        self.session
            .selection()
            .date
            .or_else(|| self.session.preview().map(|d| d.date))
            .unwrap_or_else(|| self.session.today())
    }

    /// PageUp/PageDown: pick a date relative to the current one
    pub fn shift_date(&mut self, days: i64) {
        let date = self.effective_date() + Duration::days(days);
        self.session.select_date(Some(date));
    }

    /// Home: go back to the date typed in the text (or today)
    pub fn clear_date(&mut self) {
        self.session.select_date(None);
    }

    /// Keep the session's "today" in step with the clock
    pub fn set_today(&mut self, today: NaiveDate) {
        self.session.set_today(today);
    }

    /// Enter. Store errors are shown in the footer and leave the input as is.
    pub fn submit(&mut self) {
        match self.session.submit(self.sink) {
            Ok(SubmitOutcome::NothingToSubmit) => {
                self.set_status(StatusKind::Info, "Nothing to submit: no amount yet");
            }
            Ok(SubmitOutcome::Submitted { record, next }) => {
                let text = format!(
                    "Saved {} {}",
                    record.amount.format_with_symbol(&self.settings.currency_symbol),
                    record.wallet
                );
                self.submitted.insert(0, record);
                self.set_status(StatusKind::Success, text);
                match next {
                    AfterSubmit::Reset => self.input.clear(),
                    AfterSubmit::Closed => self.should_quit = true,
                }
            }
            Err(e) => {
                self.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    /// Esc
    pub fn cancel(&mut self) {
        self.session.cancel();
        self.should_quit = true;
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::TallyResult;
    use crate::models::{DraftTransaction, KnownVocabulary, Wallet, WalletType};
    use crate::parser::Lexicon;

    #[derive(Default)]
    struct MemorySink {
        count: RefCell<usize>,
    }

    impl TransactionSink for MemorySink {
        fn submit(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
            *self.count.borrow_mut() += 1;
            Ok(TransactionRecord::from_draft(draft))
        }
    }

    fn session() -> InputSession {
        InputSession::new(
            KnownVocabulary::default(),
            Lexicon::default(),
            Wallet::new("UB Platinum", WalletType::Card),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
    }

    fn type_text(app: &mut App<'_>, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_typing_and_ghost_text() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        type_text(&mut app, "250 sun");
        assert_eq!(app.session.text(), "250 sun");
        assert_eq!(app.ghost_text().as_deref(), Some("burst  ⇥ Merchant"));

        app.accept_suggestion();
        assert_eq!(app.input.value(), "250 Sunburst ");
        assert!(app.input.cursor_at_end());
    }

    #[test]
    fn test_mid_text_edit_syncs_session() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        type_text(&mut app, "50 lunch");
        for _ in 0.."lunch".len() + 1 {
            app.input.move_left();
        }
        app.insert_char('0');
        assert_eq!(app.session.text(), "500 lunch");
        assert!(app.ghost_text().is_none());
    }

    #[test]
    fn test_cycles() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        app.cycle_wallet();
        assert_eq!(app.session.selection().wallet.name, "Cash");

        app.cycle_merchant();
        assert_eq!(app.session.selection().merchant.as_deref(), Some("SM Supermarket"));
        app.cycle_merchant();
        assert_eq!(app.session.selection().merchant.as_deref(), Some("Cardinal Bakeshop"));

        let merchants = app.session.vocabulary().merchants.len();
        for _ in 0..merchants - 1 {
            app.cycle_merchant();
        }
        assert_eq!(app.session.selection().merchant, None);
    }

    #[test]
    fn test_cycle_merchant_rewrites_input() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        type_text(&mut app, "250 ");
        app.cycle_merchant();
        type_text(&mut app, "SM Supermarket");
        app.cycle_merchant();
        assert_eq!(app.input.value(), "250 Cardinal Bakeshop");
    }

    #[test]
    fn test_date_shifting() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        type_text(&mut app, "250 tomorrow");
        app.shift_date(1);
        assert_eq!(app.effective_date(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        app.clear_date();
        assert_eq!(app.effective_date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_set_today_updates_effective_date() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session());

        type_text(&mut app, "250 today");
        app.set_today(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(app.effective_date(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_submit_and_cancel() {
        let sink = MemorySink::default();
        let settings = Settings::default();
        let mut app = App::new(&sink, &settings, session().with_continuous(true));

        app.submit();
        assert_eq!(*sink.count.borrow(), 0);

        type_text(&mut app, "250 lunch");
        app.submit();
        assert_eq!(*sink.count.borrow(), 1);
        assert_eq!(app.input.value(), "");
        assert!(!app.should_quit);
        assert_eq!(app.submitted.len(), 1);

        app.cancel();
        assert!(app.should_quit);
        assert_eq!(app.state(), SessionState::Cancelled);
    }
}
