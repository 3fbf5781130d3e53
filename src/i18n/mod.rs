use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::error::AppError;

/// Idiomas soportados por la interfaz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Spanish]
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "es" => Language::Spanish,
            _ => Language::English,
        }
    }
}

/// Flat key → display-string table for the active language, loaded from
/// `lang/lang_<code>.json`. Lookup never fails: unmapped keys come back
/// verbatim.
pub struct Translations {
    lang_dir: PathBuf,
    table: HashMap<String, String>,
}

impl Translations {
    pub fn new(lang_dir: PathBuf) -> Self {
        Self {
            lang_dir,
            table: HashMap::new(),
        }
    }

    /// Replaces the active table with the one for `language`. On any
    /// failure the previous table stays in place and the error is returned
    /// for the caller to report.
    pub fn load(&mut self, language: Language) -> Result<(), AppError> {
        let path = self.lang_dir.join(format!("lang_{}.json", language.code()));
        let table = fs::read_to_string(&path)
            .map_err(AppError::from)
            .and_then(|text| serde_json::from_str(&text).map_err(AppError::from))
            .map_err(|err| {
                warn!("no se pudo cargar {}: {}", path.display(), err);
                err
            })?;
        self.table = table;
        Ok(())
    }

    pub fn tr<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.get(key).map(String::as_str).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_table(dir: &std::path::Path, code: &str, json: &str) {
        fs::write(dir.join(format!("lang_{code}.json")), json).unwrap();
    }

    #[test]
    fn unmapped_key_falls_back_to_the_key_itself() {
        let translations = Translations::new(PathBuf::from("/nonexistent"));
        assert_eq!(translations.tr("save"), "save");
    }

    #[test]
    fn missing_language_file_keeps_previous_table() {
        let dir = tempdir().unwrap();
        write_table(dir.path(), "en", r#"{"save": "Save"}"#);

        let mut translations = Translations::new(dir.path().to_path_buf());
        translations.load(Language::English).unwrap();
        assert_eq!(translations.tr("save"), "Save");

        assert!(translations.load(Language::Spanish).is_err());
        assert_eq!(translations.tr("save"), "Save");
    }

    #[test]
    fn switching_language_swaps_the_table() {
        let dir = tempdir().unwrap();
        write_table(dir.path(), "en", r#"{"save": "Save"}"#);
        write_table(dir.path(), "es", r#"{"save": "Guardar"}"#);

        let mut translations = Translations::new(dir.path().to_path_buf());
        translations.load(Language::English).unwrap();
        assert_eq!(translations.tr("save"), "Save");

        translations.load(Language::Spanish).unwrap();
        assert_eq!(translations.tr("save"), "Guardar");
    }

    #[test]
    fn language_codes_round_trip() {
        for language in Language::all() {
            assert_eq!(Language::from_code(language.code()), *language);
        }
        assert_eq!(Language::from_code("fr"), Language::English);
    }
}
