//! Interactive entry session
//!
//! Holds the text being typed together with the hand-picked selection, and
//! keeps the live preview and inline suggestion in step with it. Every
//! handler recomputes both from the same text snapshot before returning.

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::error::TallyResult;
use crate::models::{DraftTransaction, KnownVocabulary, TransactionRecord, Wallet};
use crate::parser::{apply_suggestion, Lexicon, Selection, Suggestion, TransactionParser};

/// Receives submitted drafts and turns them into stored records
pub trait TransactionSink {
    /// Persist a draft; the sink assigns the id and timestamps
    fn submit(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord>;
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    /// Closed after a submit outside continuous mode
    Closed,
    Cancelled,
}

/// What the session did after a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterSubmit {
    /// Continuous mode: input cleared, session still open
    Reset,
    Closed,
}

/// Result of [`InputSession::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No preview (no amount) or the session is no longer open
    NothingToSubmit,
    Submitted {
        record: TransactionRecord,
        next: AfterSubmit,
    },
}

/// One transaction entry session
#[derive(Debug, Clone)]
pub struct InputSession {
    parser: TransactionParser,
    text: String,
    selection: Selection,
    today: NaiveDate,
    continuous: bool,
    preview: Option<DraftTransaction>,
    suggestion: Option<Suggestion>,
    state: SessionState,
}

impl InputSession {
    pub fn new(
        vocabulary: KnownVocabulary,
        lexicon: Lexicon,
        wallet: Wallet,
        today: NaiveDate,
    ) -> Self {
        Self::with_parser(TransactionParser::new(vocabulary, lexicon), wallet, today)
    }

    pub fn with_parser(parser: TransactionParser, wallet: Wallet, today: NaiveDate) -> Self {
        Self {
            parser,
            text: String::new(),
            selection: Selection::new(wallet),
            today,
            continuous: false,
            preview: None,
            suggestion: None,
            state: SessionState::Open,
        }
    }

    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn preview(&self) -> Option<&DraftTransaction> {
        self.preview.as_ref()
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.suggestion.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn vocabulary(&self) -> &KnownVocabulary {
        self.parser.vocabulary()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Replace the whole input text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.text.is_empty() {
            self.selection.merchant = None;
            self.selection.category = None;
        }
        self.refresh();
    }

    /// Append a character to the input
    pub fn insert_char(&mut self, c: char) {
        let mut text = std::mem::take(&mut self.text);
        text.push(c);
        self.set_text(text);
    }

    /// Remove the last character of the input
    pub fn backspace(&mut self) {
        let mut text = std::mem::take(&mut self.text);
        text.pop();
        self.set_text(text);
    }

    /// Replace the last token with the live suggestion. Returns `false` when
    /// there is nothing to accept.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(suggestion) = self.suggestion.take() else {
            return false;
        };
        trace!(text = %suggestion.text, kind = %suggestion.kind, "accepting suggestion");
        let text = apply_suggestion(&self.text, &suggestion);
        self.set_text(text);
        true
    }

    pub fn select_wallet(&mut self, wallet: Wallet) {
        self.selection.wallet = wallet;
        self.refresh();
    }

    /// Pick a merchant. If the previously picked merchant appears in the
    /// text, its first occurrence is replaced by the new one.
    pub fn select_merchant(&mut self, merchant: Option<String>) {
        let previous = std::mem::replace(&mut self.selection.merchant, merchant.clone());
        self.replace_in_text(previous.as_deref(), merchant.as_deref());
        self.refresh();
    }

    /// Pick a category, replacing the previous one in the text like
    /// [`select_merchant`](Self::select_merchant)
    pub fn select_category(&mut self, category: Option<String>) {
        let previous = std::mem::replace(&mut self.selection.category, category.clone());
        self.replace_in_text(previous.as_deref(), category.as_deref());
        self.refresh();
    }

    /// Pick a date explicitly, or clear the pick with `None`
    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selection.date = date;
        self.refresh();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.selection.description = description;
        self.refresh();
    }

    pub fn toggle_continuous(&mut self) -> bool {
        self.continuous = !self.continuous;
        self.continuous
    }

    /// Move "today" forward (or back); relative words and the fallback date
    /// follow it. A session left open past midnight is rolled over this way.
    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            debug!(%today, "session date changed");
            self.today = today;
            self.refresh();
        }
    }

    /// Hand the current preview to `sink`
    pub fn submit(&mut self, sink: &dyn TransactionSink) -> TallyResult<SubmitOutcome> {
        if !self.is_open() {
            return Ok(SubmitOutcome::NothingToSubmit);
        }
        let Some(draft) = self.preview.as_ref().filter(|d| d.is_submittable()) else {
            return Ok(SubmitOutcome::NothingToSubmit);
        };

        let record = sink.submit(draft)?;
        debug!(id = %record.id, amount = %record.amount, "transaction submitted");

        let next = if self.continuous {
            self.text.clear();
            self.preview = None;
            self.suggestion = None;
            self.selection.merchant = None;
            self.selection.category = None;
            AfterSubmit::Reset
        } else {
            self.state = SessionState::Closed;
            AfterSubmit::Closed
        };

        Ok(SubmitOutcome::Submitted { record, next })
    }

    /// Close the session without submitting anything
    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("entry session cancelled");
            self.state = SessionState::Cancelled;
        }
    }

    fn replace_in_text(&mut self, previous: Option<&str>, next: Option<&str>) {
        let Some(previous) = previous.filter(|p| !p.is_empty()) else {
            return;
        };
        if self.text.contains(previous) {
            self.text = self.text.replacen(previous, next.unwrap_or(""), 1);
        }
    }

    fn refresh(&mut self) {
        let parsed = self
            .parser
            .parse(&self.text, &self.selection, self.today, self.today);
        trace!(
            text = %self.text,
            has_preview = parsed.draft.is_some(),
            has_suggestion = parsed.suggestion.is_some(),
            "input refreshed"
        );
        self.preview = parsed.draft;
        self.suggestion = parsed.suggestion;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::TallyError;
    use crate::models::{Money, WalletType};
    use crate::parser::SuggestionKind;

    #[derive(Default)]
    struct MemorySink {
        submitted: RefCell<Vec<DraftTransaction>>,
    }

    impl TransactionSink for MemorySink {
        fn submit(&self, draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
            self.submitted.borrow_mut().push(draft.clone());
            Ok(TransactionRecord::from_draft(draft))
        }
    }

    struct FailingSink;

    impl TransactionSink for FailingSink {
        fn submit(&self, _draft: &DraftTransaction) -> TallyResult<TransactionRecord> {
            Err(TallyError::Storage("disk full".into()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn session() -> InputSession {
        InputSession::new(
            KnownVocabulary::default(),
            Lexicon::default(),
            Wallet::new("Cash", WalletType::Cash),
            today(),
        )
    }

    #[test]
    fn test_set_today_rolls_relative_dates() {
        let mut session = session();
        session.set_text("250 tomorrow");
        assert_eq!(session.preview().unwrap().date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());

        session.set_today(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(session.today(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(session.preview().unwrap().date, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());

        session.set_text("250 lunch");
        assert_eq!(session.preview().unwrap().date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }

    #[test]
    fn test_typing_updates_preview_and_suggestion() {
        let mut session = session();
        for c in "250 lunch sun".chars() {
            session.insert_char(c);
        }
        assert_eq!(session.preview().unwrap().amount, Money::from_units(-250));
        assert_eq!(session.suggestion().unwrap().kind, SuggestionKind::Merchant);

        session.backspace();
        session.backspace();
        assert_eq!(session.text(), "250 lunch s");
        assert!(session.suggestion().is_none());
    }

    #[test]
    fn test_accept_suggestion() {
        let mut session = session();
        session.set_text("250  lunch sun");
        assert!(session.accept_suggestion());
        assert_eq!(session.text(), "250  lunch Sunburst ");
        assert!(session.suggestion().is_none());
        // Accepting does not pick the merchant
        assert_eq!(session.preview().unwrap().merchant, "");
        assert!(!session.accept_suggestion());
    }

    #[test]
    fn test_select_merchant_rewrites_text() {
        let mut session = session();
        session.set_text("250 ");
        session.select_merchant(Some("Sunburst".into()));
        assert_eq!(session.text(), "250 ");
        session.set_text("250 Sunburst lunch");
        session.select_merchant(Some("Rustan's".into()));
        assert_eq!(session.text(), "250 Rustan's lunch");
        assert_eq!(session.preview().unwrap().merchant, "Rustan's");
    }

    #[test]
    fn test_select_category_rewrites_text() {
        let mut session = session();
        session.set_text("99");
        session.select_category(Some("Snacks".into()));
        session.set_text("99 Snacks");
        session.select_category(Some("Meals".into()));
        assert_eq!(session.text(), "99 Meals");
        assert_eq!(session.preview().unwrap().category, "Meals");
    }

    #[test]
    fn test_clearing_text_resets_merchant_and_category() {
        let mut session = session();
        session.set_text("250");
        session.select_merchant(Some("Sunburst".into()));
        session.select_category(Some("Meals".into()));
        session.set_text("");
        assert_eq!(session.selection().merchant, None);
        assert_eq!(session.selection().category, None);
    }

    #[test]
    fn test_selected_date_and_description() {
        let mut session = session();
        let picked = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        session.set_text("250 tomorrow");
        assert_eq!(
            session.preview().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
        session.select_date(Some(picked));
        session.set_description(Some("team lunch".into()));
        let draft = session.preview().unwrap();
        assert_eq!(draft.date, picked);
        assert_eq!(draft.description.as_deref(), Some("team lunch"));
    }

    #[test]
    fn test_select_wallet() {
        let mut session = session();
        session.set_text("250");
        session.select_wallet(Wallet::new("GCash", WalletType::Card));
        let draft = session.preview().unwrap();
        assert_eq!(draft.wallet, "GCash");
        assert_eq!(draft.wallet_type, WalletType::Card);
    }

    #[test]
    fn test_submit_without_amount() {
        let sink = MemorySink::default();
        let mut session = session();
        session.set_text("lunch");
        assert_eq!(session.submit(&sink).unwrap(), SubmitOutcome::NothingToSubmit);
        assert!(sink.submitted.borrow().is_empty());
        assert!(session.is_open());
    }

    #[test]
    fn test_submit_closes_session() {
        let sink = MemorySink::default();
        let mut session = session();
        session.set_text("+500 refund");
        match session.submit(&sink).unwrap() {
            SubmitOutcome::Submitted { record, next } => {
                assert_eq!(record.amount, Money::from_units(500));
                assert_eq!(next, AfterSubmit::Closed);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.submit(&sink).unwrap(), SubmitOutcome::NothingToSubmit);
        assert_eq!(sink.submitted.borrow().len(), 1);
    }

    #[test]
    fn test_continuous_mode_resets() {
        let sink = MemorySink::default();
        let mut session = session().with_continuous(true);
        session.set_text("250 Sunburst");
        session.select_merchant(Some("Sunburst".into()));

        match session.submit(&sink).unwrap() {
            SubmitOutcome::Submitted { next, .. } => assert_eq!(next, AfterSubmit::Reset),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(session.is_open());
        assert_eq!(session.text(), "");
        assert!(session.preview().is_none());
        assert!(session.suggestion().is_none());
        assert_eq!(session.selection().merchant, None);
        assert_eq!(session.selection().wallet.name, "Cash");

        assert_eq!(sink.submitted.borrow()[0].merchant, "Sunburst");
        assert!(!session.toggle_continuous());
    }

    #[test]
    fn test_sink_error_keeps_input() {
        let mut session = session();
        session.set_text("250");
        assert!(session.submit(&FailingSink).is_err());
        assert!(session.is_open());
        assert_eq!(session.text(), "250");
    }

    #[test]
    fn test_cancel_writes_nothing() {
        let sink = MemorySink::default();
        let mut session = session();
        session.set_text("250");
        session.cancel();
        assert_eq!(session.state(), SessionState::Cancelled);
        assert_eq!(session.submit(&sink).unwrap(), SubmitOutcome::NothingToSubmit);
        assert!(sink.submitted.borrow().is_empty());
    }
}
