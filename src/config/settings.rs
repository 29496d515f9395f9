//! User settings for tally
//!
//! Display preferences, the default wallet, continuous-entry mode, and extra
//! currency words fed into the parser's lexicon.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::parser::Lexicon;

/// User settings for tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Wallet selected when an entry session opens (first wallet if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_wallet: Option<String>,

    /// Whether the entry session stays open after each submit
    #[serde(default)]
    pub continuous_mode: bool,

    /// Additional words the parser should treat as currency markers (e.g. "usd")
    #[serde(default)]
    pub extra_currency_words: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₱".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_wallet: None,
            continuous_mode: false,
            extra_currency_words: Vec::new(),
        }
    }
}

impl Settings {
    /// Build the parser lexicon: the built-in word classes plus any
    /// user-configured currency words
    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::default();
        for word in &self.extra_currency_words {
            lexicon.add_currency(word);
        }
        lexicon
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                TallyError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TallyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            TallyError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            TallyError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::WordClass;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₱");
        assert!(!settings.continuous_mode);
        assert!(settings.default_wallet.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.continuous_mode = true;
        settings.default_wallet = Some("Cash".into());

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.continuous_mode);
        assert_eq!(loaded.default_wallet.as_deref(), Some("Cash"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"continuous_mode": true}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(loaded.continuous_mode);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_extra_currency_words_reach_lexicon() {
        let settings = Settings {
            extra_currency_words: vec!["USD".into()],
            ..Settings::default()
        };
        let lexicon = settings.lexicon();
        assert_eq!(lexicon.classify("usd"), Some(WordClass::Currency));
    }
}
