//! Parse, suggest and add commands
//!
//! One-shot versions of the entry session: the sentence comes from the
//! command line and the selection from flags.

use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;

use super::resolve_wallet;
use crate::config::Settings;
use crate::display::{format_draft_details, format_suggestion, format_transaction_details};
use crate::error::{TallyError, TallyResult};
use crate::parser::{Extractor, Selection, TransactionParser};
use crate::session::{InputSession, SubmitOutcome};
use crate::storage::Storage;

/// A sentence plus the selection flags shared by `parse` and `add`
#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// Wallet name (defaults to the configured wallet)
    #[arg(short, long)]
    pub wallet: Option<String>,
    /// Merchant name from the vocabulary
    #[arg(short, long)]
    pub merchant: Option<String>,
    /// Category name from the vocabulary
    #[arg(short, long)]
    pub category: Option<String>,
    /// Date override (YYYY-MM-DD, "yesterday", "mar 11", ...)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Free-form note
    #[arg(short, long)]
    pub note: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
    /// The sentence, e.g. 250 jollibee lunch tomorrow
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl DraftArgs {
    pub fn sentence(&self) -> String {
        self.text.join(" ")
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `--date` value: an ISO date or anything the extractor reads as a date
pub fn parse_date_arg(value: &str, extractor: &Extractor, today: NaiveDate) -> TallyResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        return Ok(date);
    }
    extractor
        .extract(value)
        .iter()
        .find_map(|e| e.matched.resolve_date(today))
        .ok_or_else(|| TallyError::Validation(format!("Unrecognized date: {}", value)))
}

/// Turn the flags into a selection, checking names against the vocabulary
pub fn build_selection(
    parser: &TransactionParser,
    settings: &Settings,
    args: &DraftArgs,
    today: NaiveDate,
) -> TallyResult<Selection> {
    let vocabulary = parser.vocabulary();
    let mut selection = Selection::new(resolve_wallet(vocabulary, settings, args.wallet.as_deref())?);

    if let Some(name) = &args.merchant {
        let merchant = vocabulary
            .find_merchant(name)
            .ok_or_else(|| TallyError::merchant_not_found(name))?;
        selection = selection.with_merchant(merchant);
    }
    if let Some(name) = &args.category {
        let category = vocabulary
            .find_category(name)
            .ok_or_else(|| TallyError::category_not_found(name))?;
        selection = selection.with_category(category);
    }
    if let Some(value) = &args.date {
        selection = selection.with_date(parse_date_arg(value, parser.extractor(), today)?);
    }
    if let Some(note) = &args.note {
        selection = selection.with_description(note.clone());
    }

    Ok(selection)
}

fn parser_for(storage: &Storage, settings: &Settings) -> TallyResult<TransactionParser> {
    let vocabulary = storage.vocabulary.load()?;
    Ok(TransactionParser::new(vocabulary, settings.lexicon()))
}

/// `tally parse`: show what the sentence would become
pub fn handle_parse_command(storage: &Storage, settings: &Settings, args: DraftArgs) -> TallyResult<()> {
    let parser = parser_for(storage, settings)?;
    let today = today();
    let selection = build_selection(&parser, settings, &args, today)?;
    let parsed = parser.parse(&args.sentence(), &selection, today, today);

    if args.json {
        let output = json!({
            "draft": parsed.draft,
            "suggestion": parsed.suggestion,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &parsed.draft {
        Some(draft) => println!(
            "{}",
            format_draft_details(draft, &settings.currency_symbol, &settings.date_format)
        ),
        None => println!("No amount found"),
    }
    if let Some(suggestion) = &parsed.suggestion {
        println!("Suggestion: {}", format_suggestion(suggestion));
    }
    Ok(())
}

/// `tally suggest`: completion for the last word
pub fn handle_suggest_command(storage: &Storage, settings: &Settings, text: &[String]) -> TallyResult<()> {
    let parser = parser_for(storage, settings)?;
    match parser.suggest(&text.join(" ")) {
        Some(suggestion) => println!("{}", format_suggestion(&suggestion)),
        None => println!("No suggestion"),
    }
    Ok(())
}

/// `tally add`: parse the sentence and store the result
pub fn handle_add_command(storage: &Storage, settings: &Settings, args: DraftArgs) -> TallyResult<()> {
    let parser = parser_for(storage, settings)?;
    let today = today();
    let selection = build_selection(&parser, settings, &args, today)?;

    let mut session = InputSession::with_parser(parser, selection.wallet.clone(), today);
    session.select_merchant(selection.merchant);
    session.select_category(selection.category);
    session.select_date(selection.date);
    session.set_description(selection.description);
    session.set_text(args.sentence());

    match session.submit(&storage.transactions)? {
        SubmitOutcome::Submitted { record, .. } => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Added transaction:");
                print!("{}", format_transaction_details(&record, &settings.currency_symbol));
            }
            Ok(())
        }
        SubmitOutcome::NothingToSubmit => Err(TallyError::Validation(format!(
            "No amount found in \"{}\"",
            args.sentence()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KnownVocabulary;
    use crate::parser::Lexicon;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn args(text: &str) -> DraftArgs {
        DraftArgs {
            wallet: None,
            merchant: None,
            category: None,
            date: None,
            note: None,
            json: false,
            text: text.split_whitespace().map(String::from).collect(),
        }
    }

    #[test]
    fn test_parse_date_arg() {
        let extractor = Extractor::default();
        let today = ymd(2024, 6, 1);
        assert_eq!(parse_date_arg("2024-03-05", &extractor, today).unwrap(), ymd(2024, 3, 5));
        assert_eq!(parse_date_arg("yesterday", &extractor, today).unwrap(), ymd(2024, 5, 31));
        assert_eq!(parse_date_arg("mar 11", &extractor, today).unwrap(), ymd(2024, 3, 11));
        assert!(parse_date_arg("someday", &extractor, today)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_build_selection_uses_stored_spelling() {
        let parser = TransactionParser::new(KnownVocabulary::default(), Lexicon::default());
        let mut draft_args = args("250");
        draft_args.merchant = Some("sunburst".into());
        draft_args.category = Some("meals".into());
        draft_args.wallet = Some("gcash".into());
        draft_args.note = Some("team lunch".into());

        let selection = build_selection(&parser, &Settings::default(), &draft_args, ymd(2024, 6, 1)).unwrap();
        assert_eq!(selection.merchant.as_deref(), Some("Sunburst"));
        assert_eq!(selection.category.as_deref(), Some("Meals"));
        assert_eq!(selection.wallet.name, "GCash");
        assert_eq!(selection.description.as_deref(), Some("team lunch"));
    }

    #[test]
    fn test_build_selection_unknown_names() {
        let parser = TransactionParser::default();
        let mut draft_args = args("250");
        draft_args.category = Some("Travel".into());
        let err = build_selection(&parser, &Settings::default(), &draft_args, ymd(2024, 6, 1)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_sentence_joins_words() {
        assert_eq!(args("250  jollibee lunch").sentence(), "250 jollibee lunch");
    }
}
