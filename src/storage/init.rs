//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and the default
//! vocabulary file.

use std::path::PathBuf;

use crate::config::{Settings, TallyPaths};
use crate::error::TallyResult;
use crate::models::KnownVocabulary;

use super::vocabulary::VocabularyRepository;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone. Returns the files that were written.
pub fn initialize_storage(paths: &TallyPaths) -> TallyResult<Vec<PathBuf>> {
    paths.ensure_directories()?;
    let mut written = Vec::new();

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
        written.push(paths.settings_file());
    }

    let vocabulary = VocabularyRepository::new(paths.vocabulary_file());
    if !vocabulary.exists() {
        vocabulary.save(&KnownVocabulary::default())?;
        written.push(paths.vocabulary_file());
    }

    Ok(written)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &TallyPaths) -> bool {
    !paths.settings_file().exists() || !paths.vocabulary_file().exists()
}
