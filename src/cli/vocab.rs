//! Vocabulary command

use crate::display::format_vocabulary;
use crate::error::TallyResult;
use crate::storage::Storage;

/// `tally vocab`: print the merchants, categories and wallets in use
pub fn handle_vocab_command(storage: &Storage) -> TallyResult<()> {
    let vocabulary = storage.vocabulary.load()?;
    if !storage.vocabulary.exists() {
        println!(
            "(built-in vocabulary; run 'tally init' to write an editable copy to {})",
            storage.vocabulary.path().display()
        );
        println!();
    }
    print!("{}", format_vocabulary(&vocabulary));
    Ok(())
}
