use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use tally_cli::cli::{
    handle_add_command, handle_audit_command, handle_list_command, handle_parse_command,
    handle_suggest_command, handle_vocab_command, resolve_wallet, DraftArgs,
};
use tally_cli::config::{paths::TallyPaths, settings::Settings};
use tally_cli::parser::TransactionParser;
use tally_cli::session::InputSession;
use tally_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "tally",
    author = "Kaylee Beyene",
    version,
    about = "Type a sentence, get a transaction",
    long_about = "tally turns short sentences like \"250 jollibee lunch tomorrow\" \
                  into transactions. Use it one-shot from the command line or \
                  open the interactive entry screen."
)]
struct Cli {
    /// Log level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a sentence would become, without saving it
    Parse(DraftArgs),

    /// Show the suggestion for the last word of a sentence
    Suggest {
        /// The sentence typed so far
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Parse a sentence and save the transaction
    Add(DraftArgs),

    /// List saved transactions
    List {
        /// Only transactions for this wallet
        #[arg(short, long)]
        wallet: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the merchants, categories and wallets in use
    Vocab,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Open the interactive entry screen
    #[command(alias = "tui")]
    Entry {
        /// Wallet to start with
        #[arg(short, long)]
        wallet: Option<String>,
        /// Keep the screen open after each save
        #[arg(long)]
        continuous: bool,
    },

    /// Write default settings and vocabulary files
    Init,

    /// Show current configuration and paths
    Config,
}

/// Send `tracing` output to stderr, filtered by RUST_LOG or `level`
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "tally_cli={},{}={}",
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "paths resolved");

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Parse(args)) => {
            handle_parse_command(&storage, &settings, args)?;
        }
        Some(Commands::Suggest { text }) => {
            handle_suggest_command(&storage, &settings, &text)?;
        }
        Some(Commands::Add(args)) => {
            handle_add_command(&storage, &settings, args)?;
        }
        Some(Commands::List { wallet, limit }) => {
            handle_list_command(&storage, &settings, wallet.as_deref(), limit)?;
        }
        Some(Commands::Vocab) => {
            handle_vocab_command(&storage)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Entry { wallet, continuous }) => {
            let vocabulary = storage.vocabulary.load()?;
            let wallet = resolve_wallet(&vocabulary, &settings, wallet.as_deref())?;
            let parser = TransactionParser::new(vocabulary, settings.lexicon());
            let session = InputSession::with_parser(parser, wallet, Local::now().date_naive())
                .with_continuous(continuous || settings.continuous_mode);

            let saved = tally_cli::tui::run_entry(&storage.transactions, &settings, session)?;
            println!("Saved {} transaction(s).", saved.len());
        }
        Some(Commands::Init) => {
            println!("Initializing tally at: {}", paths.base_dir().display());
            let created = tally_cli::storage::init::initialize_storage(&paths)?;
            if created.is_empty() {
                println!("Already initialized; nothing to write.");
            } else {
                for path in created {
                    println!("  created {}", path.display());
                }
            }
            println!();
            println!("Edit the vocabulary file to add your own merchants, categories and wallets.");
            println!("Run 'tally entry' to start typing transactions.");
        }
        Some(Commands::Config) => {
            println!("tally Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Vocabulary file:  {}", paths.vocabulary_file().display());
            println!("Transactions:     {}", paths.transactions_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Stored records:   {}", storage.transactions.count()?);
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  Default wallet:    {}",
                settings.default_wallet.as_deref().unwrap_or("(first in vocabulary)")
            );
            println!("  Continuous mode:   {}", settings.continuous_mode);
            if !settings.extra_currency_words.is_empty() {
                println!(
                    "  Currency words:    {}",
                    settings.extra_currency_words.join(", ")
                );
            }
        }
        None => {
            println!("tally - natural-language expense entry");
            println!();
            if tally_cli::storage::needs_initialization(&paths) {
                println!("Run 'tally init' to write editable settings and vocabulary files.");
            }
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally entry' to open the interactive entry screen.");
        }
    }

    Ok(())
}
