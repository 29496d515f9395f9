//! Vocabulary repository
//!
//! Merchants, categories and wallets live in a hand-editable YAML file. A
//! missing file means the built-in vocabulary.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::KnownVocabulary;

use super::file_io::{read_yaml, write_yaml_atomic};

/// Repository for the known vocabulary
pub struct VocabularyRepository {
    path: PathBuf,
}

impl VocabularyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the vocabulary, falling back to the built-in one when the file
    /// does not exist
    pub fn load(&self) -> TallyResult<KnownVocabulary> {
        match read_yaml::<KnownVocabulary, _>(&self.path)? {
            Some(vocabulary) => {
                validate(&vocabulary)?;
                debug!(
                    merchants = vocabulary.merchants.len(),
                    categories = vocabulary.categories.len(),
                    wallets = vocabulary.wallets.len(),
                    "vocabulary loaded"
                );
                Ok(vocabulary)
            }
            None => {
                debug!(path = %self.path.display(), "no vocabulary file, using built-in lists");
                Ok(KnownVocabulary::default())
            }
        }
    }

    pub fn save(&self, vocabulary: &KnownVocabulary) -> TallyResult<()> {
        validate(vocabulary)?;
        write_yaml_atomic(&self.path, vocabulary)
    }
}

fn validate(vocabulary: &KnownVocabulary) -> TallyResult<()> {
    let blank = vocabulary
        .merchants
        .iter()
        .chain(&vocabulary.categories)
        .chain(vocabulary.wallets.iter().map(|w| &w.name))
        .any(|name| name.trim().is_empty());
    if blank {
        return Err(TallyError::Validation(
            "Vocabulary names must not be blank".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Wallet, WalletType};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, VocabularyRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = VocabularyRepository::new(temp_dir.path().join("vocabulary.yaml"));
        (temp_dir, repo)
    }

    #[test]
    fn test_missing_file_gives_default() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(!repo.exists());
        assert_eq!(repo.load().unwrap(), KnownVocabulary::default());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, repo) = create_test_repo();
        let vocabulary = KnownVocabulary {
            merchants: vec!["Jollibee".into(), "Mang Inasal".into()],
            categories: vec!["Meals".into()],
            wallets: vec![Wallet::new("GCash", WalletType::Card)],
        };
        repo.save(&vocabulary).unwrap();
        assert_eq!(repo.load().unwrap(), vocabulary);
    }

    #[test]
    fn test_hand_written_file() {
        let (_temp_dir, repo) = create_test_repo();
        std::fs::write(
            repo.path(),
            "merchants:\n  - Jollibee\nwallets:\n  - name: Cash\n    type: cash\n",
        )
        .unwrap();
        let vocabulary = repo.load().unwrap();
        assert_eq!(vocabulary.merchants, vec!["Jollibee".to_string()]);
        assert_eq!(vocabulary.default_wallet().unwrap().wallet_type, WalletType::Cash);
    }

    #[test]
    fn test_blank_names_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        let mut vocabulary = KnownVocabulary::default();
        vocabulary.categories.push("  ".into());
        assert!(repo.save(&vocabulary).unwrap_err().is_validation());
    }
}
